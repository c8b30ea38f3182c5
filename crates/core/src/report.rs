//! Per-pot status report built from a sensor payload.
//!
//! Classifies every reading of a [`SensorData`] and pairs it with the
//! formatted value a dashboard shows next to the health badge.

use serde::Serialize;

use crate::classifier::classify_reading;
use crate::health::HealthBand;
use crate::sensor::{SensorData, SensorKind, SensorReading};

/// Classified status of one sensor parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterStatus {
    pub kind: SensorKind,
    pub value: f64,
    pub display_value: String,
    pub band: HealthBand,
}

impl ParameterStatus {
    pub fn from_reading(reading: SensorReading) -> Self {
        let display_value = if reading.kind.is_integral() {
            format!("{}", reading.value.trunc() as i64)
        } else {
            format_reading(reading.value)
        };

        Self {
            kind: reading.kind,
            value: reading.value,
            display_value,
            band: classify_reading(&reading),
        }
    }
}

/// Classified view of a pot's latest sensor payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PotStatusReport {
    pub parameters: Vec<ParameterStatus>,
    /// Water reservoir level, e.g. `"1.50L"`.
    pub water_level: String,
    pub soil_health: f64,
}

impl PotStatusReport {
    pub fn from_sensor_data(data: &SensorData) -> Self {
        let parameters = data
            .readings()
            .into_iter()
            .map(ParameterStatus::from_reading)
            .collect();

        Self {
            parameters,
            water_level: format_water_level(data.water_level),
            soil_health: data.soil_health,
        }
    }

    /// Most severe band across all parameters.
    pub fn worst_band(&self) -> HealthBand {
        self.parameters
            .iter()
            .map(|p| p.band)
            .max()
            .unwrap_or(HealthBand::Good)
    }

    pub fn get(&self, kind: SensorKind) -> Option<&ParameterStatus> {
        self.parameters.iter().find(|p| p.kind == kind)
    }

    /// Parameters that are not [`HealthBand::Good`], worst first.
    pub fn attention_items(&self) -> Vec<&ParameterStatus> {
        let mut items: Vec<_> = self
            .parameters
            .iter()
            .filter(|p| p.band != HealthBand::Good)
            .collect();
        items.sort_by(|a, b| b.band.cmp(&a.band));
        items
    }
}

/// Whole numbers without decimals, everything else with one.
pub fn format_reading(value: f64) -> String {
    if value.fract() == 0.0 {
        format_fixed(value, 0)
    } else {
        format_fixed(value, 1)
    }
}

pub fn format_water_level(litres: f64) -> String {
    format!("{}L", format_fixed(litres, 2))
}

/// Fixed-point formatting with ties rounded away from zero (`66.25` -> `"66.3"`).
///
/// `format!("{:.1}")` rounds ties to even, which would show `66.2`.
pub fn format_fixed(value: f64, decimals: u8) -> String {
    let scale = 10f64.powi(i32::from(decimals));
    let rounded = (value * scale).round() / scale;
    format!("{rounded:.prec$}", prec = usize::from(decimals))
}
