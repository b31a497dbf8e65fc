//! Terminal UI: the interactive coaching form.

mod app;
mod screens;

pub use app::run;
