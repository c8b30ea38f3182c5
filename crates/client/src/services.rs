//! All service clients built from one [`ClientConfig`].

use crate::api::PotApi;
use crate::config::ClientConfig;
use crate::error::ApiResult;
use crate::recommendation::RecommendationClient;
use crate::weather::WeatherClient;

/// Service clients sharing a single connection pool.
#[derive(Debug, Clone)]
pub struct Services {
    pub pots: PotApi,
    pub recommendations: RecommendationClient,
    /// `None` when no OpenWeather API key is configured.
    pub weather: Option<WeatherClient>,
}

impl Services {
    pub fn from_config(config: &ClientConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let weather = match &config.weather_api_key {
            Some(key) => Some(WeatherClient::with_client(
                client.clone(),
                &config.weather_url,
                key,
            )?),
            None => None,
        };

        Ok(Self {
            pots: PotApi::with_client(client.clone(), &config.api_url)?,
            recommendations: RecommendationClient::with_client(client, &config.webhook_url)?,
            weather,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_requires_api_key() {
        let services = Services::from_config(&ClientConfig::default()).unwrap();
        assert!(services.weather.is_none());
        assert_eq!(services.pots.base_url().as_str(), "https://api.lutfialvarop.cloud/");

        let config = ClientConfig {
            weather_api_key: Some("key".into()),
            ..ClientConfig::default()
        };
        assert!(Services::from_config(&config).unwrap().weather.is_some());
    }
}
