// Radio station registry API client
// Queries the MIC (総務省) radio station information search by callsign.
// See: https://www.tele.soumu.go.jp/musen/
//
// Only the JSON list endpoint is used. One client is built per run and
// reused for every request.

use reqwest::Client;

use crate::error::EnrichError;

/// Registry list endpoint
pub const DEFAULT_REGISTRY_URL: &str = "https://www.tele.soumu.go.jp/musen/list";

/// Amateur stations (ST=1), detail info (DA=1), JSON output (OF=2),
/// matched on callsign (MA). The callsign is appended as-is.
const LIST_QUERY: &str = "ST=1&DA=1&SC=1&DC=1&OF=2&OW=AT&MA=";

/// Raw answer from the registry
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryResponse {
    pub status: u16,
    pub body: String,
}

impl RegistryResponse {
    /// Only a 200 answer carries a usable body
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Connection, TLS or body read failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Source of station records by callsign
#[allow(async_fn_in_trait)]
pub trait StationRegistry {
    async fn lookup(&self, callsign: &str) -> Result<RegistryResponse, RegistryError>;
}

/// HTTP client for the registry
pub struct RegistryClient {
    http: Client,
    base_url: String,
}

impl RegistryClient {
    /// Create a client for `base_url`.
    ///
    /// With `legacy_tls` set the client is pinned to the rustls backend.
    /// The registry server does not support RFC 5746 secure renegotiation,
    /// which OpenSSL 3 (the platform backend on Linux) refuses by default.
    /// rustls never renegotiates and accepts such servers. This is a
    /// deliberate compatibility downgrade for this one host.
    pub fn new(base_url: &str, legacy_tls: bool) -> Result<Self, EnrichError> {
        let mut builder =
            Client::builder().user_agent(concat!("jcc-enrich/", env!("CARGO_PKG_VERSION")));

        if legacy_tls {
            log::warn!("Registry client: legacy TLS server compatibility enabled (rustls backend)");
            builder = builder.use_rustls_tls();
        }

        let http = builder.build().map_err(EnrichError::HttpClient)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('?').to_string(),
        })
    }

    /// Full request URL for a callsign
    pub fn request_url(&self, callsign: &str) -> String {
        format!("{}?{}{}", self.base_url, LIST_QUERY, callsign)
    }
}

impl StationRegistry for RegistryClient {
    async fn lookup(&self, callsign: &str) -> Result<RegistryResponse, RegistryError> {
        let url = self.request_url(callsign);
        log::debug!("Registry request: {}", url);

        let response = self.http.get(&url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        log::debug!("Registry response for {}: HTTP {}, {} bytes", callsign, status, body.len());

        Ok(RegistryResponse { status, body })
    }
}
