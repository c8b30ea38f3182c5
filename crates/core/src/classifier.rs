//! Sensor health classification.
//!
//! Pure logic, no I/O. Each [`SensorKind`] owns a declarative [`RangeTable`];
//! [`classify`] scans it in order and returns the band of the first interval
//! containing the value, or the table's fallback band when none does.
//!
//! The tables keep the decimal step of the published ranges (`5.79` next to
//! `5.8`, `59.9` next to `60`). A value that lands strictly inside one of those
//! steps belongs to no interval and takes the fallback.
//!
//! Comparisons run in single precision, the width the pot firmware reports
//! in, so `5.7900001` reads as `5.79`.

use crate::health::HealthBand;
use crate::sensor::{SensorKind, SensorReading};

/// A numeric interval of sensor values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interval {
    /// `min <= v <= max`
    Closed(f64, f64),
    /// `v < bound`
    Below(f64),
    /// `v > bound`
    Above(f64),
}

impl Interval {
    /// Membership test in `f32`. Finite values beyond the `f32` range
    /// become infinite and only match the open-ended intervals.
    pub fn contains(self, value: f64) -> bool {
        let value = value as f32;
        match self {
            Interval::Closed(min, max) => min as f32 <= value && value <= max as f32,
            Interval::Below(bound) => value < bound as f32,
            Interval::Above(bound) => value > bound as f32,
        }
    }
}

/// Ordered interval-to-band rules for one sensor kind.
#[derive(Debug, Clone, Copy)]
pub struct RangeTable {
    pub rules: &'static [(Interval, HealthBand)],
    /// Band returned when no rule matches.
    pub fallback: HealthBand,
}

impl RangeTable {
    /// First matching rule wins.
    pub fn lookup(&self, value: f64) -> HealthBand {
        self.rules
            .iter()
            .find(|(interval, _)| interval.contains(value))
            .map(|(_, band)| *band)
            .unwrap_or(self.fallback)
    }

    /// Closed interval mapped to [`HealthBand::Good`].
    pub fn good_range(&self) -> Option<(f64, f64)> {
        self.rules.iter().find_map(|(interval, band)| match interval {
            Interval::Closed(min, max) if *band == HealthBand::Good => Some((*min, *max)),
            _ => None,
        })
    }
}

use HealthBand::{Critical, Fair, Good, NeedsAttention};
use Interval::{Above, Below, Closed};

const PH: RangeTable = RangeTable {
    rules: &[
        (Closed(5.8, 6.5), Good),
        (Closed(5.5, 5.79), Fair),
        (Closed(6.51, 6.8), Fair),
        (Closed(5.2, 5.49), NeedsAttention),
        (Closed(6.81, 7.2), NeedsAttention),
        (Below(5.2), Critical),
        (Above(7.2), Critical),
    ],
    fallback: Critical,
};

const MOISTURE: RangeTable = RangeTable {
    rules: &[
        (Closed(60.0, 75.0), Good),
        (Closed(50.0, 59.9), Fair),
        (Closed(75.1, 80.0), Fair),
        (Closed(40.0, 49.9), NeedsAttention),
        (Closed(80.1, 90.0), NeedsAttention),
        (Below(40.0), Critical),
        (Above(90.0), Critical),
    ],
    fallback: Critical,
};

// Soil humidity has no explicit attention band; whatever is left over between
// Fair and Critical is NeedsAttention.
const SOIL_HUMIDITY: RangeTable = RangeTable {
    rules: &[
        (Closed(60.0, 75.0), Good),
        (Closed(50.0, 59.9), Fair),
        (Closed(75.1, 85.0), Fair),
        (Below(40.0), Critical),
        (Above(90.0), Critical),
    ],
    fallback: NeedsAttention,
};

const NITROGEN: RangeTable = RangeTable {
    rules: &[
        (Closed(30.0, 60.0), Good),
        (Closed(20.0, 29.0), Fair),
        (Closed(61.0, 80.0), Fair),
        (Closed(10.0, 19.0), NeedsAttention),
        (Closed(81.0, 100.0), NeedsAttention),
        (Below(10.0), Critical),
        (Above(100.0), Critical),
    ],
    fallback: Critical,
};

const PHOSPHORUS: RangeTable = RangeTable {
    rules: &[
        (Closed(10.0, 25.0), Good),
        (Closed(7.0, 9.0), Fair),
        (Closed(26.0, 40.0), Fair),
        (Closed(5.0, 6.0), NeedsAttention),
        (Closed(41.0, 60.0), NeedsAttention),
        (Below(5.0), Critical),
        (Above(60.0), Critical),
    ],
    fallback: Critical,
};

const POTASSIUM: RangeTable = RangeTable {
    rules: &[
        (Closed(150.0, 220.0), Good),
        (Closed(120.0, 149.0), Fair),
        (Closed(221.0, 300.0), Fair),
        (Closed(100.0, 119.0), NeedsAttention),
        (Closed(301.0, 400.0), NeedsAttention),
        (Below(100.0), Critical),
        (Above(400.0), Critical),
    ],
    fallback: Critical,
};

const CONDUCTIVITY: RangeTable = RangeTable {
    rules: &[
        (Closed(1.2, 2.0), Good),
        (Closed(0.8, 1.19), Fair),
        (Closed(2.01, 2.3), Fair),
        (Closed(0.5, 0.79), NeedsAttention),
        (Closed(2.31, 2.6), NeedsAttention),
        (Below(0.5), Critical),
        (Above(2.6), Critical),
    ],
    fallback: Critical,
};

const TEMPERATURE: RangeTable = RangeTable {
    rules: &[
        (Closed(20.0, 30.0), Good),
        (Closed(18.0, 19.9), Fair),
        (Closed(30.1, 32.0), Fair),
        (Closed(15.0, 17.9), NeedsAttention),
        (Closed(32.1, 35.0), NeedsAttention),
        (Below(15.0), Critical),
        (Above(35.0), Critical),
    ],
    fallback: Critical,
};

/// Range table used for a sensor kind.
///
/// Salinity is graded on the conductivity scale.
pub fn range_table(kind: SensorKind) -> &'static RangeTable {
    match kind {
        SensorKind::Ph => &PH,
        SensorKind::Moisture => &MOISTURE,
        SensorKind::SoilHumidity => &SOIL_HUMIDITY,
        SensorKind::Nitrogen => &NITROGEN,
        SensorKind::Phosphorus => &PHOSPHORUS,
        SensorKind::Potassium => &POTASSIUM,
        SensorKind::Conductivity | SensorKind::Salinity => &CONDUCTIVITY,
        SensorKind::Temperature => &TEMPERATURE,
    }
}

/// Classify a reading into a [`HealthBand`].
///
/// Total over `f64`: NaN and infinities are [`HealthBand::Critical`].
pub fn classify(kind: SensorKind, value: f64) -> HealthBand {
    if !value.is_finite() {
        return Critical;
    }
    range_table(kind).lookup(value)
}

/// Convenience wrapper over [`classify`].
pub fn classify_reading(reading: &SensorReading) -> HealthBand {
    classify(reading.kind, reading.value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
