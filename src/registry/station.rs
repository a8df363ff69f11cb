// Registry response parsing
//
// The list endpoint answers with
//   {"musenInformation": {...}, "musen": [{"listInfo": {...}, "detailInfo": {...}}]}
// where "musen" is null or [] when nothing matched. Only the first
// station's equipment location is used. The key really is spelled
// "radioEuipmentLocation".

use serde::Deserialize;

/// Top level of a list response
#[derive(Debug, Deserialize)]
pub struct StationList {
    #[serde(default)]
    pub musen: Option<Vec<Station>>,
}

#[derive(Debug, Deserialize)]
pub struct Station {
    #[serde(rename = "detailInfo", default)]
    pub detail_info: Option<DetailInfo>,
}

#[derive(Debug, Deserialize)]
pub struct DetailInfo {
    #[serde(rename = "radioEuipmentLocation", default)]
    pub radio_equipment_location: Option<String>,
}

/// Why no address could be taken from a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationMiss {
    /// Body is not the expected JSON
    Malformed,
    /// "musen" is null, missing or empty
    NoStation,
    /// First station has no equipment location
    NoLocation,
}

/// Equipment location of the first station in a list response
pub fn extract_location(body: &str) -> Result<String, LocationMiss> {
    let list: StationList = serde_json::from_str(body).map_err(|e| {
        log::debug!("Registry body is not a station list: {}", e);
        LocationMiss::Malformed
    })?;

    let station = list
        .musen
        .and_then(|stations| stations.into_iter().next())
        .ok_or(LocationMiss::NoStation)?;

    station
        .detail_info
        .and_then(|d| d.radio_equipment_location)
        .ok_or(LocationMiss::NoLocation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_station_location() {
        let body = r#"{
            "musenInformation": {"totalCount": "2", "lastUpdateDate": "2026-10-01"},
            "musen": [
                {"listInfo": {"name": "JA1ABC"}, "detailInfo": {"radioEuipmentLocation": "東京都渋谷区"}},
                {"listInfo": {"name": "JA1ABC"}, "detailInfo": {"radioEuipmentLocation": "大阪府堺市"}}
            ]
        }"#;
        assert_eq!(extract_location(body), Ok("東京都渋谷区".to_string()));
    }

    #[test]
    fn test_null_station_list() {
        let body = r#"{"musenInformation": {"totalCount": "0"}, "musen": null}"#;
        assert_eq!(extract_location(body), Err(LocationMiss::NoStation));
    }

    #[test]
    fn test_empty_station_list() {
        assert_eq!(extract_location(r#"{"musen": []}"#), Err(LocationMiss::NoStation));
        assert_eq!(extract_location("{}"), Err(LocationMiss::NoStation));
    }

    #[test]
    fn test_missing_location() {
        let body = r#"{"musen": [{"listInfo": {"name": "JA1ABC"}}]}"#;
        assert_eq!(extract_location(body), Err(LocationMiss::NoLocation));
    }

    #[test]
    fn test_malformed_body() {
        assert_eq!(extract_location("<html>Service Unavailable</html>"), Err(LocationMiss::Malformed));
        assert_eq!(extract_location(""), Err(LocationMiss::Malformed));
        assert_eq!(extract_location(r#"{"musen": "none"}"#), Err(LocationMiss::Malformed));
    }
}
