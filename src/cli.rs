//! CLI interface for FitCal.
//!
//! Without a subcommand FitCal opens the interactive coaching form.
//! Subcommands are non-interactive: arguments in, a snapshot out.
//!
//! - `fitcal check` classifies one check-in given as flags.
//! - `fitcal presets` shows the available scoring presets.

mod format;

use clap::{Parser, Subcommand, ValueEnum};
use jiff::Timestamp;
use serde::Serialize;

use crate::coaching::{self, Preset, ScoringPolicy};
use crate::model::{CoachingResult, Energy, Hunger, InputState, Mood, Sleep, Stress};

use format::{format_policy, format_result};

/// FitCal: quick coaching from how you feel right now.
#[derive(Debug, Parser)]
#[command(name = "fitcal", after_long_help = USAGE_HELP)]
pub struct Cli {
    /// Scoring preset. Defaults to the `preset` key in ~/.fitcal/config.toml.
    #[arg(long, global = true, value_enum)]
    pub preset: Option<PresetArg>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

const USAGE_HELP: &str = r"Examples:
  fitcal                                   open the interactive form
  fitcal check --sleep poor --stress high
  fitcal check --energy low --progress 'Hit my protein goal' --json
  fitcal --preset classic presets";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify one check-in and print the coaching snapshot.
    ///
    /// Fields that are not given keep their defaults
    /// (medium, neutral, moderate, average, medium).
    Check(CheckArgs),

    /// List scoring presets with their weights, thresholds, and tip rules.
    Presets,
}

#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Energy level: low, medium, high.
    #[arg(long, default_value_t)]
    energy: Energy,

    /// Mood: down, neutral, good.
    #[arg(long, default_value_t)]
    mood: Mood,

    /// Hunger or cravings: light, moderate, strong.
    #[arg(long, default_value_t)]
    hunger: Hunger,

    /// Sleep quality: poor, average, great.
    #[arg(long, default_value_t)]
    sleep: Sleep,

    /// Stress level: low, medium, high.
    #[arg(long, default_value_t)]
    stress: Stress,

    /// A win or challenge from today.
    #[arg(long, default_value = "")]
    progress: String,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

impl CheckArgs {
    fn to_input(&self) -> InputState {
        InputState {
            energy: self.energy,
            mood: self.mood,
            hunger: self.hunger,
            sleep: self.sleep,
            stress: self.stress,
            progress: self.progress.clone(),
        }
    }
}

/// CLI-facing preset, mapped to the domain `Preset`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PresetArg {
    /// Bidirectional weights, mood and steady-state tips.
    Adaptive,
    /// Penalty-only weights, core tips.
    Classic,
}

impl PresetArg {
    pub fn to_domain(self) -> Preset {
        match self {
            Self::Adaptive => Preset::Adaptive,
            Self::Classic => Preset::Classic,
        }
    }
}

/// The JSON document printed by `check --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot<'a> {
    preset: Preset,
    input: &'a InputState,
    result: &'a CoachingResult,
    generated_at: Timestamp,
}

/// Run a subcommand, returning an error message on failure.
pub fn run(command: &Command, policy: &ScoringPolicy) -> Result<(), String> {
    match command {
        Command::Check(args) => cmd_check(args, policy),
        Command::Presets => {
            cmd_presets(policy.preset);
            Ok(())
        }
    }
}

fn cmd_check(args: &CheckArgs, policy: &ScoringPolicy) -> Result<(), String> {
    let input = args.to_input();
    let result = coaching::classify(&input, policy);

    if args.json {
        let snapshot = Snapshot {
            preset: policy.preset,
            input: &input,
            result: &result,
            generated_at: Timestamp::now(),
        };
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| format!("failed to serialize snapshot: {e}"))?;
        println!("{json}");
    } else {
        print!("{}", format_result(&result));
    }

    Ok(())
}

fn cmd_presets(selected: Preset) {
    for (i, preset) in Preset::ALL.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        let marker = if preset == selected { " (selected)" } else { "" };
        println!("{preset}{marker}: {}", preset.description());
        print!("{}", format_policy(&preset.policy()));
    }
}
