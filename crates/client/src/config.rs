use std::path::PathBuf;
use std::time::Duration;

/// Default REST backend for pots and authentication.
pub const DEFAULT_API_URL: &str = "https://api.lutfialvarop.cloud";
/// Default workflow-automation host serving the recommendation webhook.
pub const DEFAULT_WEBHOOK_URL: &str = "https://potaful2.app.n8n.cloud";
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PREFS_PATH: &str = "potaful_prefs.json";

/// Invalid configuration value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Client configuration loaded from environment variables.
///
/// All fields have defaults pointing at the production services.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Pot service base URL.
    pub api_url: String,
    /// Recommendation webhook base URL.
    pub webhook_url: String,
    /// OpenWeather base URL.
    pub weather_url: String,
    /// OpenWeather API key; weather lookups are unavailable without it.
    pub weather_api_key: Option<String>,
    /// Per-request timeout for every HTTP call.
    pub request_timeout: Duration,
    /// Location of the preference file.
    pub prefs_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            weather_api_key: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            prefs_path: PathBuf::from(DEFAULT_PREFS_PATH),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                            |
    /// |-----------------------|------------------------------------|
    /// | `POTAFUL_API_URL`     | `https://api.lutfialvarop.cloud`   |
    /// | `POTAFUL_WEBHOOK_URL` | `https://potaful2.app.n8n.cloud`   |
    /// | `OPENWEATHER_API_URL` | `https://api.openweathermap.org`   |
    /// | `OPENWEATHER_API_KEY` | unset                              |
    /// | `HTTP_TIMEOUT_SECS`   | `30`                               |
    /// | `POTAFUL_PREFS_PATH`  | `potaful_prefs.json`               |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from `lookup`.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let request_timeout = match non_empty("HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    key: "HTTP_TIMEOUT_SECS",
                    expected: "a positive integer",
                    value: raw.clone(),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        key: "HTTP_TIMEOUT_SECS",
                        expected: "a positive integer",
                        value: raw,
                    });
                }
                Duration::from_secs(secs)
            }
            None => defaults.request_timeout,
        };

        Ok(Self {
            api_url: non_empty("POTAFUL_API_URL").unwrap_or(defaults.api_url),
            webhook_url: non_empty("POTAFUL_WEBHOOK_URL").unwrap_or(defaults.webhook_url),
            weather_url: non_empty("OPENWEATHER_API_URL").unwrap_or(defaults.weather_url),
            weather_api_key: non_empty("OPENWEATHER_API_KEY"),
            request_timeout,
            prefs_path: non_empty("POTAFUL_PREFS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.prefs_path),
        })
    }
}
