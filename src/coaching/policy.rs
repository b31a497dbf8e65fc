//! Scoring policies: weight tables, zone thresholds, and tip rules.
//!
//! Two presets exist because the widget shipped in two flavours. `Adaptive`
//! rewards good readings with negative offsets and adds mood-related tips;
//! `Classic` only penalizes strain.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{InputState, Zone};

/// A named scoring preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Bidirectional weights and the full tip set.
    #[default]
    Adaptive,

    /// Penalty-only weights; no mood or steady-state tips.
    Classic,
}

impl Preset {
    pub const ALL: [Self; 2] = [Self::Adaptive, Self::Classic];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Adaptive => "adaptive",
            Self::Classic => "classic",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Adaptive => "bidirectional weights, mood and steady-state tips",
            Self::Classic => "penalty-only weights, core tips",
        }
    }

    /// Build the full policy for this preset.
    pub fn policy(self) -> ScoringPolicy {
        match self {
            Self::Adaptive => ScoringPolicy {
                preset: self,
                weights: Weights {
                    energy: [3, 0, -1],
                    mood: [3, 1, 0],
                    hunger: [0, 0, 3],
                    sleep: [4, 0, -1],
                    stress: [-1, 0, 4],
                },
                thresholds: Thresholds::default(),
                tip_rules: vec![
                    TipRule::LowEnergy,
                    TipRule::HighStress,
                    TipRule::PoorSleep,
                    TipRule::StrongHunger,
                    TipRule::LowMood,
                    TipRule::Progress,
                    TipRule::Steady,
                ],
            },
            Self::Classic => ScoringPolicy {
                preset: self,
                weights: Weights {
                    energy: [3, 0, 0],
                    mood: [3, 0, 0],
                    hunger: [0, 0, 3],
                    sleep: [4, 0, 0],
                    stress: [0, 0, 4],
                },
                thresholds: Thresholds::default(),
                tip_rules: vec![
                    TipRule::LowEnergy,
                    TipRule::HighStress,
                    TipRule::PoorSleep,
                    TipRule::StrongHunger,
                    TipRule::Progress,
                ],
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score contribution per option, one row per field.
///
/// Each row is indexed by the option's declaration order,
/// e.g. `energy[0]` is the weight for `low`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weights {
    pub energy: [i32; 3],
    pub mood: [i32; 3],
    pub hunger: [i32; 3],
    pub sleep: [i32; 3],
    pub stress: [i32; 3],
}

impl Weights {
    pub fn score(&self, input: &InputState) -> i32 {
        self.energy[input.energy.index()]
            + self.mood[input.mood.index()]
            + self.hunger[input.hunger.index()]
            + self.sleep[input.sleep.index()]
            + self.stress[input.stress.index()]
    }
}

/// Inclusive upper bounds for the green and yellow zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub green_max: i32,
    pub yellow_max: i32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            green_max: 2,
            yellow_max: 7,
        }
    }
}

impl Thresholds {
    pub fn zone(self, score: i32) -> Zone {
        if score <= self.green_max {
            Zone::Green
        } else if score <= self.yellow_max {
            Zone::Yellow
        } else {
            Zone::Red
        }
    }
}

/// One tip-producing rule. Rules run in the order the policy lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipRule {
    LowEnergy,
    HighStress,
    PoorSleep,
    StrongHunger,
    LowMood,

    /// Always emits: echoes the progress note, or asks for a small win.
    Progress,

    /// Emits only when none of the condition rules fired.
    Steady,
}

impl TipRule {
    pub fn name(self) -> &'static str {
        match self {
            Self::LowEnergy => "low-energy",
            Self::HighStress => "high-stress",
            Self::PoorSleep => "poor-sleep",
            Self::StrongHunger => "strong-hunger",
            Self::LowMood => "low-mood",
            Self::Progress => "progress",
            Self::Steady => "steady",
        }
    }
}

/// A complete, named rule set for the coaching engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringPolicy {
    pub preset: Preset,
    pub weights: Weights,
    pub thresholds: Thresholds,
    pub tip_rules: Vec<TipRule>,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Preset::default().policy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive_upper_bounds() {
        let t = Thresholds::default();
        assert_eq!(t.zone(-3), Zone::Green);
        assert_eq!(t.zone(2), Zone::Green);
        assert_eq!(t.zone(3), Zone::Yellow);
        assert_eq!(t.zone(7), Zone::Yellow);
        assert_eq!(t.zone(8), Zone::Red);
    }

    #[test]
    fn classic_has_no_rewards() {
        let w = Preset::Classic.policy().weights;
        for row in [w.energy, w.mood, w.hunger, w.sleep, w.stress] {
            assert!(row.iter().all(|&v| v >= 0));
        }
    }

    #[test]
    fn adaptive_rule_order() {
        let names: Vec<&str> = Preset::Adaptive
            .policy()
            .tip_rules
            .iter()
            .map(|r| r.name())
            .collect();
        assert_eq!(
            names,
            [
                "low-energy",
                "high-stress",
                "poor-sleep",
                "strong-hunger",
                "low-mood",
                "progress",
                "steady"
            ]
        );
    }

    #[test]
    fn preset_deserializes_from_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            preset: Preset,
        }
        let w: Wrapper = toml::from_str(r#"preset = "classic""#).unwrap();
        assert_eq!(w.preset, Preset::Classic);
    }
}
