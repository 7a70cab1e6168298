//! Wire types for moov API responses.
//!
//! Both station endpoints wrap their results in a `network` array; the gif
//! endpoint nests its payload under `ctx`.

use serde::{Deserialize, Serialize};

use crate::domain::{Station, Suggestion};

/// `GET /api/transport/findstation/{query}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindStationResponse {
    pub network: Vec<Suggestion>,
}

/// `GET /api/transport/station/{station}/{network}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationResponse {
    pub network: Vec<Station>,
}

/// `GET /api/transport/getgif/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GifResponse {
    pub ctx: GifContext,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GifContext {
    /// Base64-encoded GIF bytes.
    pub gif: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_find_station() {
        let json = r#"{"network": [
            {"station": "Gares", "network": "Rennes"},
            {"station": "Gares", "network": "SNCF"}
        ]}"#;
        let resp: FindStationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.network.len(), 2);
        assert_eq!(resp.network[1], Suggestion::new("Gares", "SNCF"));
    }

    #[test]
    fn parse_station() {
        let json = r#"{"network": [{"station": "Gares", "network": "SNCF", "id": 12}]}"#;
        let resp: StationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.network[0].name, "Gares");
        assert_eq!(resp.network[0].extra["id"], 12);
    }

    #[test]
    fn parse_gif() {
        let json = r#"{"ctx": {"gif": "R0lGODlh"}}"#;
        let resp: GifResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.ctx.gif, "R0lGODlh");
    }

    #[test]
    fn missing_network_field_is_an_error() {
        let result: Result<FindStationResponse, _> = serde_json::from_str(r#"{"error": "x"}"#);
        assert!(result.is_err());
    }
}
