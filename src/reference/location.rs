// Municipality extraction from Japanese addresses
//
// Registry addresses read like "東京都渋谷区神南1丁目" or "北海道札幌市中央区".
// The prefecture (ending in 都/道/府/県) is dropped and the municipality
// that directly follows it (ending in 市/区/町/村) is returned.

use regex::Regex;
use std::sync::OnceLock;

const ADDRESS_PATTERN: &str = r"([一-龥]+[都道府県])([一-龥]+(市|区|町|村))";

static ADDRESS_RE: OnceLock<Regex> = OnceLock::new();

fn address_regex() -> &'static Regex {
    ADDRESS_RE.get_or_init(|| Regex::new(ADDRESS_PATTERN).expect("address pattern is valid"))
}

/// Municipality name with its suffix, e.g. "渋谷区", or None if the address
/// has no prefecture + municipality sequence
pub fn extract_city(address: &str) -> Option<String> {
    address_regex()
        .captures(address)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().to_string())
}
