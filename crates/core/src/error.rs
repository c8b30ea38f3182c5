/// Errors from parsing domain values supplied by users or the wire.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Name does not match any [`SensorKind`](crate::SensorKind) or alias.
    #[error("unknown sensor kind: {0}")]
    UnknownSensorKind(String),
}
