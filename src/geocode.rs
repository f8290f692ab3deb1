use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// The coordinates a successful geocode resolves to, together with the
/// canonical label for the place. Lives for one request only.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    pub location: String,
}

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Unable to connect to location services!")]
    Connect(#[source] reqwest::Error),
    #[error("Location service error: {0}")]
    Status(reqwest::StatusCode),
    #[error("Unable to find location. Try another search.")]
    NoMatch,
}

/// Translates a free-text place name into coordinates and a canonical label.
///
/// An empty upstream result set is an error, never an absent payload: callers
/// always get either usable coordinates or a message they can surface as-is.
#[async_trait::async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<Coordinates>;
}

pub struct OpenMeteoGeocoder {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GeoSearchResponse {
    #[serde(default)]
    results: Vec<GeoSearchResult>,
}

#[derive(Debug, Deserialize)]
struct GeoSearchResult {
    latitude: f64,
    longitude: f64,
    name: String,
    admin1: Option<String>,
    country: Option<String>,
}

impl OpenMeteoGeocoder {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: "https://geocoding-api.open-meteo.com/v1/search".to_string(),
        })
    }

    fn best_match(response: GeoSearchResponse) -> Result<Coordinates, GeocodeError> {
        let result = response.results.into_iter().next().ok_or(GeocodeError::NoMatch)?;

        let mut location = result.name;
        for part in [result.admin1, result.country].into_iter().flatten() {
            location.push_str(", ");
            location.push_str(&part);
        }

        Ok(Coordinates {
            latitude: result.latitude,
            longitude: result.longitude,
            location,
        })
    }
}

#[async_trait::async_trait]
impl Geocoder for OpenMeteoGeocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinates> {
        info!("Geocoding \"{}\"", address);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("name", address), ("count", "1")])
            .send()
            .await
            .map_err(GeocodeError::Connect)?;

        if !response.status().is_success() {
            return Err(GeocodeError::Status(response.status()).into());
        }

        let parsed: GeoSearchResponse =
            response.json().await.map_err(GeocodeError::Connect)?;

        Ok(Self::best_match(parsed)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_match_takes_first_result_and_joins_label() {
        let parsed: GeoSearchResponse = serde_json::from_str(
            r#"{
                "results": [
                    {
                        "latitude": 51.50853,
                        "longitude": -0.12574,
                        "name": "London",
                        "admin1": "England",
                        "country": "United Kingdom"
                    },
                    {
                        "latitude": 42.98339,
                        "longitude": -81.23304,
                        "name": "London",
                        "admin1": "Ontario",
                        "country": "Canada"
                    }
                ]
            }"#,
        )
        .unwrap();

        let coords = OpenMeteoGeocoder::best_match(parsed).unwrap();
        assert_eq!(coords.latitude, 51.50853);
        assert_eq!(coords.longitude, -0.12574);
        assert_eq!(coords.location, "London, England, United Kingdom");
    }

    #[test]
    fn best_match_skips_absent_label_parts() {
        let parsed: GeoSearchResponse = serde_json::from_str(
            r#"{"results": [{"latitude": 1.0, "longitude": 2.0, "name": "Atlantis"}]}"#,
        )
        .unwrap();

        let coords = OpenMeteoGeocoder::best_match(parsed).unwrap();
        assert_eq!(coords.location, "Atlantis");
    }

    #[test]
    fn missing_result_set_is_an_explicit_error() {
        // Open-Meteo omits the results field entirely when nothing matched.
        let parsed: GeoSearchResponse = serde_json::from_str(r#"{"generationtime_ms": 0.5}"#).unwrap();

        let err = OpenMeteoGeocoder::best_match(parsed).unwrap_err();
        assert_eq!(err.to_string(), "Unable to find location. Try another search.");
    }

    #[test]
    fn empty_result_set_is_an_explicit_error() {
        let parsed: GeoSearchResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();

        assert!(matches!(
            OpenMeteoGeocoder::best_match(parsed),
            Err(GeocodeError::NoMatch)
        ));
    }
}
