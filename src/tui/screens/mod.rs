//! Screen rendering and input handling.

mod coaching;

pub use coaching::{CoachingScreen, ScreenAction};
