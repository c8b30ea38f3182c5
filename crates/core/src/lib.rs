//! Domain logic for the Potaful plant-pot monitor.
//!
//! Everything here is pure: sensor health classification, hydration
//! conditions, pot status reports and weather icon mapping. Network and
//! storage concerns live in `potaful-client` and `potaful-store`.

pub mod classifier;
pub mod error;
pub mod health;
pub mod hydration;
pub mod report;
pub mod sensor;
pub mod weather;

pub use classifier::{classify, classify_reading};
pub use health::HealthBand;
pub use sensor::{SensorData, SensorKind, SensorReading};
