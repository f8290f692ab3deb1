use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Unable to connect to weather service!")]
    Connect(#[source] reqwest::Error),
    #[error("Weather service error: {0}")]
    Status(reqwest::StatusCode),
}

/// Translates coordinates into a one-line, human-readable weather summary.
#[async_trait::async_trait]
pub trait Forecaster: Send + Sync {
    async fn forecast(&self, latitude: f64, longitude: f64) -> Result<String>;
}

pub struct OpenMeteoForecaster {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentConditions,
    hourly: Option<HourlyConditions>,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: f64,
    weather_code: i32,
}

#[derive(Debug, Deserialize)]
struct HourlyConditions {
    #[serde(default)]
    precipitation_probability: Vec<f64>,
}

impl OpenMeteoForecaster {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: "https://api.open-meteo.com/v1/forecast".to_string(),
        })
    }

    fn describe_weather_code(code: i32) -> &'static str {
        match code {
            0 => "Clear sky",
            1 => "Mainly clear",
            2 => "Partly cloudy",
            3 => "Overcast",
            45 => "Foggy",
            48 => "Depositing rime fog",
            51 => "Light drizzle",
            53 => "Moderate drizzle",
            55 => "Dense drizzle",
            61 => "Slight rain",
            63 => "Moderate rain",
            65 => "Heavy rain",
            71 => "Slight snow",
            73 => "Moderate snow",
            75 => "Heavy snow",
            80 => "Slight rain showers",
            81 => "Moderate rain showers",
            82 => "Violent rain showers",
            85 => "Slight snow showers",
            86 => "Heavy snow showers",
            95 => "Thunderstorm",
            96 => "Thunderstorm with slight hail",
            99 => "Thunderstorm with heavy hail",
            _ => "Unknown conditions",
        }
    }

    fn compose_summary(response: &ForecastResponse) -> String {
        let description = Self::describe_weather_code(response.current.weather_code);
        let rain_chance = response
            .hourly
            .as_ref()
            .and_then(|hourly| hourly.precipitation_probability.first())
            .copied()
            .unwrap_or(0.0);

        format!(
            "{}. It is currently {:.1} degrees out. There is a {:.0}% chance of rain.",
            description, response.current.temperature_2m, rain_chance
        )
    }
}

#[async_trait::async_trait]
impl Forecaster for OpenMeteoForecaster {
    async fn forecast(&self, latitude: f64, longitude: f64) -> Result<String> {
        info!("Fetching forecast for {}, {}", latitude, longitude);

        let params = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current", "temperature_2m,weather_code".to_string()),
            ("hourly", "precipitation_probability".to_string()),
            ("forecast_hours", "1".to_string()),
            ("temperature_unit", "fahrenheit".to_string()),
        ];

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(ForecastError::Connect)?;

        if !response.status().is_success() {
            return Err(ForecastError::Status(response.status()).into());
        }

        let parsed: ForecastResponse =
            response.json().await.map_err(ForecastError::Connect)?;

        Ok(Self::compose_summary(&parsed))
    }
}
