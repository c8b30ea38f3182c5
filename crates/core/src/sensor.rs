//! Sensor parameter kinds, readings and the per-pot sensor payload.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Physical quantity measured by a pot's sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Ph,
    Moisture,
    SoilHumidity,
    Nitrogen,
    Phosphorus,
    Potassium,
    Conductivity,
    Temperature,
    Salinity,
}

impl SensorKind {
    pub const ALL: [SensorKind; 9] = [
        SensorKind::Ph,
        SensorKind::Moisture,
        SensorKind::SoilHumidity,
        SensorKind::Nitrogen,
        SensorKind::Phosphorus,
        SensorKind::Potassium,
        SensorKind::Conductivity,
        SensorKind::Temperature,
        SensorKind::Salinity,
    ];

    /// Canonical lowercase name, also accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            SensorKind::Ph => "ph",
            SensorKind::Moisture => "moisture",
            SensorKind::SoilHumidity => "soil_humidity",
            SensorKind::Nitrogen => "nitrogen",
            SensorKind::Phosphorus => "phosphorus",
            SensorKind::Potassium => "potassium",
            SensorKind::Conductivity => "conductivity",
            SensorKind::Temperature => "temperature",
            SensorKind::Salinity => "salinity",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SensorKind::Ph => "Soil pH",
            SensorKind::Moisture => "Soil Moisture",
            SensorKind::SoilHumidity => "Soil Humidity",
            SensorKind::Nitrogen => "Nitrogen",
            SensorKind::Phosphorus => "Phosphorus",
            SensorKind::Potassium => "Potassium",
            SensorKind::Conductivity => "Conductivity",
            SensorKind::Temperature => "Temperature",
            SensorKind::Salinity => "Salinity",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            SensorKind::Ph => "pH",
            SensorKind::Moisture | SensorKind::SoilHumidity => "%",
            SensorKind::Nitrogen | SensorKind::Phosphorus | SensorKind::Potassium => "mg/kg",
            SensorKind::Conductivity | SensorKind::Salinity => "µS/cm",
            SensorKind::Temperature => "°C",
        }
    }

    /// Whether the sensor reports whole numbers (N/P/K).
    pub fn is_integral(self) -> bool {
        matches!(
            self,
            SensorKind::Nitrogen | SensorKind::Phosphorus | SensorKind::Potassium
        )
    }
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SensorKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "ph" => Ok(SensorKind::Ph),
            "moisture" => Ok(SensorKind::Moisture),
            "soil_humidity" | "humidity" => Ok(SensorKind::SoilHumidity),
            "nitrogen" | "n" => Ok(SensorKind::Nitrogen),
            "phosphorus" | "p" => Ok(SensorKind::Phosphorus),
            "potassium" | "k" => Ok(SensorKind::Potassium),
            "conductivity" | "ec" => Ok(SensorKind::Conductivity),
            "temperature" | "temp" => Ok(SensorKind::Temperature),
            "salinity" => Ok(SensorKind::Salinity),
            _ => Err(CoreError::UnknownSensorKind(s.to_string())),
        }
    }
}

/// A single reading paired with the quantity it measures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorReading {
    pub kind: SensorKind,
    pub value: f64,
}

impl SensorReading {
    pub fn new(kind: SensorKind, value: f64) -> Self {
        Self { kind, value }
    }
}

/// Latest sensor payload for one pot, as returned by the pot-status endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorData {
    #[serde(rename = "n")]
    pub nitrogen: i32,
    #[serde(rename = "p")]
    pub phosphorus: i32,
    #[serde(rename = "k")]
    pub potassium: i32,
    pub temperature: f64,
    pub moisture: f64,
    pub ph: f64,
    pub salinity: f64,
    pub conductivity: f64,
    pub water_level: f64,
    pub soil_health: f64,
}

impl SensorData {
    /// Readings in dashboard display order.
    pub fn readings(&self) -> [SensorReading; 8] {
        [
            SensorReading::new(SensorKind::Salinity, self.salinity),
            SensorReading::new(SensorKind::Conductivity, self.conductivity),
            SensorReading::new(SensorKind::Nitrogen, f64::from(self.nitrogen)),
            SensorReading::new(SensorKind::Phosphorus, f64::from(self.phosphorus)),
            SensorReading::new(SensorKind::Potassium, f64::from(self.potassium)),
            SensorReading::new(SensorKind::Ph, self.ph),
            SensorReading::new(SensorKind::Moisture, self.moisture),
            SensorReading::new(SensorKind::Temperature, self.temperature),
        ]
    }
}
