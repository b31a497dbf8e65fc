//! Result types: what the coaching engine hands back.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Shown under every coaching snapshot.
pub const DISCLAIMER: &str = "This tool provides supportive guidance, not medical advice.";

/// Coarse summary of overall reported strain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Green,
    Yellow,
    Red,
}

impl Zone {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }

    /// Short headline for the zone.
    pub fn label(self) -> &'static str {
        match self {
            Self::Green => "Aligned Day",
            Self::Yellow => "Needs Gentle Support",
            Self::Red => "High-Tension Day",
        }
    }

    pub fn core_message(self) -> &'static str {
        match self {
            Self::Green => {
                "Your inputs suggest you're in a good rhythm today. \
                 Keep leaning into routines that support you."
            }
            Self::Yellow => {
                "There are a few pressure points showing up today. \
                 Nothing alarming, but small adjustments will help."
            }
            Self::Red => {
                "Your system is carrying a lot right now. \
                 Today calls for simplicity, grounding, and low-pressure steps."
            }
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One coaching snapshot, recomputed in full on every submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachingResult {
    pub zone: Zone,
    pub label: String,
    pub core_message: String,

    /// Suggestions in rule evaluation order.
    pub tips: Vec<String>,
}

impl CoachingResult {
    /// A result carrying the fixed copy for `zone`.
    pub fn for_zone(zone: Zone, tips: Vec<String>) -> Self {
        Self {
            zone,
            label: zone.label().to_string(),
            core_message: zone.core_message().to_string(),
            tips,
        }
    }
}
