//! Weather condition icons.

use serde::Serialize;

/// Icon category for an OpenWeather icon code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIcon {
    ClearDay,
    ClearNight,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Cloudy,
    Drizzle,
    Rain,
    Thunder,
    Snow,
    Mist,
    Unknown,
}

impl WeatherIcon {
    /// Map an icon code such as `"10n"`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "01d" => WeatherIcon::ClearDay,
            "01n" => WeatherIcon::ClearNight,
            "02d" => WeatherIcon::PartlyCloudyDay,
            "02n" => WeatherIcon::PartlyCloudyNight,
            "03d" | "03n" | "04d" | "04n" => WeatherIcon::Cloudy,
            "09d" | "09n" => WeatherIcon::Drizzle,
            "10d" | "10n" => WeatherIcon::Rain,
            "11d" | "11n" => WeatherIcon::Thunder,
            "13d" | "13n" => WeatherIcon::Snow,
            "50d" | "50n" => WeatherIcon::Mist,
            _ => WeatherIcon::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeatherIcon::ClearDay => "clear (day)",
            WeatherIcon::ClearNight => "clear (night)",
            WeatherIcon::PartlyCloudyDay => "partly cloudy (day)",
            WeatherIcon::PartlyCloudyNight => "partly cloudy (night)",
            WeatherIcon::Cloudy => "cloudy",
            WeatherIcon::Drizzle => "drizzle",
            WeatherIcon::Rain => "rain",
            WeatherIcon::Thunder => "thunderstorm",
            WeatherIcon::Snow => "snow",
            WeatherIcon::Mist => "mist",
            WeatherIcon::Unknown => "unknown",
        }
    }
}
