//! Health bands assigned to individual sensor readings.
//!
//! A [`HealthBand`] is static display data: every band has a stable key,
//! a human-readable label and a colour pair used to render a badge.

use serde::Serialize;

/// Ordinal health category for a single sensor reading.
///
/// Variants are declared from best to worst so the derived `Ord` matches
/// severity (`Good < Fair < NeedsAttention < Critical`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    /// Reading is inside the ideal range.
    Good,
    /// Reading is slightly outside the ideal range.
    Fair,
    /// Reading is far enough outside the ideal range to act on.
    NeedsAttention,
    /// Reading is outside every tabulated range.
    Critical,
}

/// Foreground/background colour pair for a rendered badge (`#RRGGBB`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BandColors {
    pub background: &'static str,
    pub text: &'static str,
}

/// Display record handed to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BandDisplay {
    pub key: &'static str,
    pub label: &'static str,
    pub background_color: &'static str,
    pub text_color: &'static str,
}

impl HealthBand {
    /// All bands in severity order.
    pub const ALL: [HealthBand; 4] = [
        HealthBand::Good,
        HealthBand::Fair,
        HealthBand::NeedsAttention,
        HealthBand::Critical,
    ];

    /// Stable identifier, safe to persist or compare.
    pub fn key(self) -> &'static str {
        match self {
            HealthBand::Good => "good",
            HealthBand::Fair => "fair",
            HealthBand::NeedsAttention => "needs_attention",
            HealthBand::Critical => "critical",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HealthBand::Good => "Good",
            HealthBand::Fair => "Fair",
            HealthBand::NeedsAttention => "Needs Attention",
            HealthBand::Critical => "Critical",
        }
    }

    pub fn colors(self) -> BandColors {
        match self {
            HealthBand::Good => BandColors {
                background: "#E8F5E9",
                text: "#2E7D32",
            },
            HealthBand::Fair => BandColors {
                background: "#FFFDE7",
                text: "#F9A825",
            },
            HealthBand::NeedsAttention => BandColors {
                background: "#FFF3E0",
                text: "#EF6C00",
            },
            HealthBand::Critical => BandColors {
                background: "#FFEBEE",
                text: "#C62828",
            },
        }
    }

    /// Position in the severity ordering, `0` for `Good` up to `3`.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Flatten the band into the record consumed by a renderer.
    pub fn display(self) -> BandDisplay {
        let colors = self.colors();
        BandDisplay {
            key: self.key(),
            label: self.label(),
            background_color: colors.background,
            text_color: colors.text,
        }
    }

    /// Look up a band by its stable key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|band| band.key() == key)
    }
}

impl std::fmt::Display for HealthBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_ordered_by_severity() {
        assert!(HealthBand::Good < HealthBand::Fair);
        assert!(HealthBand::Fair < HealthBand::NeedsAttention);
        assert!(HealthBand::NeedsAttention < HealthBand::Critical);
        assert_eq!(HealthBand::Critical.rank(), 3);
    }

    #[test]
    fn keys_round_trip() {
        for band in HealthBand::ALL {
            assert_eq!(HealthBand::from_key(band.key()), Some(band));
        }
        assert_eq!(HealthBand::from_key("bogus"), None);
    }

    #[test]
    fn display_record_carries_colors() {
        let display = HealthBand::NeedsAttention.display();
        assert_eq!(display.key, "needs_attention");
        assert_eq!(display.label, "Needs Attention");
        assert_eq!(display.background_color, "#FFF3E0");
        assert_eq!(display.text_color, "#EF6C00");
    }

    #[test]
    fn colors_are_distinct_per_band() {
        let mut seen = std::collections::HashSet::new();
        for band in HealthBand::ALL {
            assert!(seen.insert(band.colors().text));
        }
    }
}
