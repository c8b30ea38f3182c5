//! Server-computed watering urgency for a pot.

use serde::{Deserialize, Serialize};

/// Hydration condition tag attached to each pot in the hydration summary.
///
/// Unrecognised tags deserialize as [`HydrationCondition::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HydrationCondition {
    Urgent,
    Warning,
    Safe,
    #[default]
    #[serde(other)]
    Unknown,
}

impl HydrationCondition {
    /// Parse a raw tag, case-insensitively. `None` maps to `Unknown`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(|t| t.trim().to_ascii_uppercase()).as_deref() {
            Some("URGENT") => HydrationCondition::Urgent,
            Some("WARNING") => HydrationCondition::Warning,
            Some("SAFE") => HydrationCondition::Safe,
            _ => HydrationCondition::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HydrationCondition::Urgent => "Urgent",
            HydrationCondition::Warning => "Warning",
            HydrationCondition::Safe => "Safe",
            HydrationCondition::Unknown => "Unknown",
        }
    }

    /// Lower is more urgent; `Unknown` sorts last.
    pub fn urgency_rank(self) -> u8 {
        match self {
            HydrationCondition::Urgent => 0,
            HydrationCondition::Warning => 1,
            HydrationCondition::Safe => 2,
            HydrationCondition::Unknown => 3,
        }
    }

    pub fn needs_watering(self) -> bool {
        matches!(self, HydrationCondition::Urgent | HydrationCondition::Warning)
    }
}

impl std::fmt::Display for HydrationCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
