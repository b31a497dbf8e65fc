//! Core data model for FitCal.
//!
//! These types represent the check-in form and what comes back from it:
//! the five categorical readings, the optional progress note, and the
//! coaching result derived from them.

mod input;
mod result;

pub use input::{Energy, Field, Hunger, InputState, Mood, ParseChoiceError, Sleep, Stress};
pub use result::{CoachingResult, DISCLAIMER, Zone};
