//! Current-weather lookup for the user's location (OpenWeather).

use std::time::Duration;

use potaful_core::report::format_fixed;
use potaful_core::weather::WeatherIcon;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::api::{endpoint, ensure_success, parse_base_url};
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WeatherResponse {
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    pub main: MainInfo,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WeatherCondition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MainInfo {
    pub temp: f64,
    pub humidity: i32,
}

/// Display-ready weather line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSummary {
    pub city: String,
    /// Capitalised description, `-` when the service sent none.
    pub condition: String,
    /// Rounded temperature, e.g. `"27°C"`.
    pub temperature: String,
    pub humidity: i32,
    pub icon: WeatherIcon,
}

impl WeatherResponse {
    pub fn summary(&self) -> WeatherSummary {
        let first = self.weather.first();
        WeatherSummary {
            city: self.name.clone(),
            condition: first
                .map(|w| capitalize(&w.description))
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "-".to_string()),
            temperature: format!("{}°C", format_fixed(self.main.temp, 0)),
            humidity: self.main.humidity,
            icon: WeatherIcon::from_code(first.map(|w| w.icon.as_str()).unwrap_or("")),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// HTTP client for the OpenWeather current-weather endpoint.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl WeatherClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> ApiResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url, api_key)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str, api_key: &str) -> ApiResult<Self> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
            api_key: api_key.to_string(),
        })
    }

    /// Current conditions for `city` in metric units.
    pub async fn current(&self, city: &str) -> ApiResult<WeatherResponse> {
        let city = city.trim();
        if city.is_empty() {
            return Err(ApiError::InvalidInput("City cannot be empty".into()));
        }

        let url = endpoint(&self.base_url, &["data", "2.5", "weather"])?;
        tracing::debug!(city, "Fetching current weather");

        let response = self
            .client
            .get(url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }
}
