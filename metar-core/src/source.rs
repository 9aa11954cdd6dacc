use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{error::MetarError, model::Observation};

/// aviationweather.gov Data API endpoint for METAR products.
pub const DEFAULT_ENDPOINT: &str = "https://aviationweather.gov/api/data/metar";

/// Source of single-station observations.
///
/// The CLI and tests depend on this seam rather than the concrete HTTP
/// client.
#[async_trait]
pub trait ObservationSource: Send + Sync {
    /// Fetches the most recent observation for `station`.
    async fn observation(&self, station: &str) -> Result<Observation, MetarError>;
}

/// HTTP client for the aviationweather.gov Data API.
#[derive(Debug, Clone)]
pub struct AviationWeather {
    endpoint: String,
    http: Client,
}

impl AviationWeather {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT.to_owned())
    }

    /// Client against a non-default endpoint, e.g. from configuration.
    pub fn with_endpoint(endpoint: String) -> Self {
        Self {
            endpoint,
            http: Client::new(),
        }
    }
}

impl Default for AviationWeather {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObservationSource for AviationWeather {
    async fn observation(&self, station: &str) -> Result<Observation, MetarError> {
        debug!(station, endpoint = %self.endpoint, "requesting observation");

        let body = self
            .http
            .get(&self.endpoint)
            .query(&[("ids", station), ("format", "json")])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        first_observation(&body, station)
    }
}

/// Decodes a JSON result set and yields its first observation.
///
/// An empty array is `NoObservationFound`; elements past the first are
/// ignored. Split from the HTTP call so the decode path tests without a
/// network.
pub fn first_observation(body: &str, station: &str) -> Result<Observation, MetarError> {
    let records: Vec<Observation> = serde_json::from_str(body)?;
    debug!(station, records = records.len(), "observation payload decoded");

    records
        .into_iter()
        .next()
        .ok_or_else(|| MetarError::NoObservationFound {
            station: station.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_set_is_no_observation_found() {
        let err = first_observation("[]", "KPVD").unwrap_err();
        assert!(matches!(
            err,
            MetarError::NoObservationFound { ref station } if station == "KPVD"
        ));
        assert!(err.to_string().contains("KPVD"));
    }

    #[test]
    fn first_of_many_records_is_used() {
        let body = r#"[{"icaoId": "KPVD"}, {"icaoId": "KBOS"}]"#;
        let obs = first_observation(body, "KPVD").unwrap();
        assert_eq!(obs.station, "KPVD");
    }

    #[test]
    fn malformed_payload_is_a_field_error() {
        let err = first_observation(r#"[{"wdir": {}}]"#, "KPVD").unwrap_err();
        assert!(matches!(err, MetarError::MalformedField(_)));

        let err = first_observation("not json", "KPVD").unwrap_err();
        assert!(matches!(err, MetarError::MalformedField(_)));
    }
}
