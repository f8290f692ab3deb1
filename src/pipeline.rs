use std::sync::Arc;

use thiserror::Error;

use crate::forecast::Forecaster;
use crate::geocode::Geocoder;

/// Success envelope for the weather endpoint: the forecast text, the
/// canonical place label from geocoding, and the caller's original query
/// echoed back verbatim.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ForecastReport {
    pub forecast: String,
    pub location: String,
    pub address: String,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("You must provide a city")]
    MissingAddress,
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

/// Two-stage lookup chain: city name to coordinates, then coordinates to a
/// forecast summary. The stages run strictly in sequence and the first
/// failure short-circuits the rest; upstream error messages pass through
/// unchanged. Holds no state between calls, so one instance serves all
/// requests concurrently.
pub struct ForecastPipeline {
    geocoder: Arc<dyn Geocoder>,
    forecaster: Arc<dyn Forecaster>,
}

impl ForecastPipeline {
    pub fn new(geocoder: Arc<dyn Geocoder>, forecaster: Arc<dyn Forecaster>) -> Self {
        Self { geocoder, forecaster }
    }

    pub async fn resolve(&self, address: &str) -> Result<ForecastReport, PipelineError> {
        // Checked before any upstream call is made.
        if address.is_empty() {
            return Err(PipelineError::MissingAddress);
        }

        let coordinates = self.geocoder.geocode(address).await?;

        let forecast = self
            .forecaster
            .forecast(coordinates.latitude, coordinates.longitude)
            .await?;

        Ok(ForecastReport {
            forecast,
            location: coordinates.location,
            address: address.to_string(),
        })
    }
}
