//! The coaching engine: maps a check-in to a zone and a list of tips.
//!
//! Classification is a pure function of the input and the policy. The
//! score only selects the zone; tips are chosen independently of it.

mod policy;

pub use policy::{Preset, ScoringPolicy, TipRule};

use crate::model::{CoachingResult, InputState};

const LOW_ENERGY_TIP: &str = "Get sunlight, hydrate, or add protein.";
const HIGH_STRESS_TIP: &str = "Take micro-breaks every 90 minutes.";
const POOR_SLEEP_TIP: &str = "Wind down earlier tonight.";
const STRONG_HUNGER_TIP: &str = "Add fiber + protein to your next meal.";
const LOW_MOOD_TIP: &str =
    "Do one small thing that lifts your mood: a short walk, music, or a call.";
const SMALL_WIN_TIP: &str = "Acknowledge one small win from today.";
const STEADY_TIP: &str = "You're in a stable zone. Keep doing what's working.";

/// Classify a check-in under the given policy.
pub fn classify(input: &InputState, policy: &ScoringPolicy) -> CoachingResult {
    let score = score(input, policy);
    let zone = policy.thresholds.zone(score);
    let tips = tips(input, &policy.tip_rules);

    tracing::debug!(
        preset = %policy.preset,
        score,
        zone = %zone,
        tips = tips.len(),
        "classified check-in"
    );

    CoachingResult::for_zone(zone, tips)
}

/// Raw strain score. Internal to zone selection; never shown to the user.
pub(crate) fn score(input: &InputState, policy: &ScoringPolicy) -> i32 {
    policy.weights.score(input)
}

fn tips(input: &InputState, rules: &[TipRule]) -> Vec<String> {
    let mut tips = Vec::new();
    let mut condition_fired = false;

    for rule in rules {
        match rule {
            TipRule::Progress => tips.push(progress_tip(input)),
            TipRule::Steady => {
                if !condition_fired {
                    tips.push(STEADY_TIP.to_string());
                }
            }
            condition => {
                if let Some(tip) = condition_tip(*condition, input) {
                    condition_fired = true;
                    tips.push(tip.to_string());
                }
            }
        }
    }

    tips
}

fn condition_tip(rule: TipRule, input: &InputState) -> Option<&'static str> {
    use crate::model::{Energy, Hunger, Mood, Sleep, Stress};

    let fired = match rule {
        TipRule::LowEnergy => input.energy == Energy::Low,
        TipRule::HighStress => input.stress == Stress::High,
        TipRule::PoorSleep => input.sleep == Sleep::Poor,
        TipRule::StrongHunger => input.hunger == Hunger::Strong,
        TipRule::LowMood => input.mood == Mood::Down,
        TipRule::Progress | TipRule::Steady => false,
    };
    if !fired {
        return None;
    }

    match rule {
        TipRule::LowEnergy => Some(LOW_ENERGY_TIP),
        TipRule::HighStress => Some(HIGH_STRESS_TIP),
        TipRule::PoorSleep => Some(POOR_SLEEP_TIP),
        TipRule::StrongHunger => Some(STRONG_HUNGER_TIP),
        TipRule::LowMood => Some(LOW_MOOD_TIP),
        TipRule::Progress | TipRule::Steady => None,
    }
}

fn progress_tip(input: &InputState) -> String {
    match input.progress_note() {
        Some(note) => format!("Build on your win: “{note}”."),
        None => SMALL_WIN_TIP.to_string(),
    }
}
