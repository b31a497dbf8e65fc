//! Output formatting for CLI display.

use std::fmt::Write;

use crate::coaching::ScoringPolicy;
use crate::model::{CoachingResult, DISCLAIMER, Energy, Field, Hunger, Mood, Sleep, Stress};

/// Format a coaching result for human-readable display.
pub(super) fn format_result(result: &CoachingResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", result.zone, result.label);
    let _ = writeln!(out, "{}", result.core_message);
    let _ = writeln!(out);
    let _ = writeln!(out, "What to focus on now:");
    for tip in &result.tips {
        let _ = writeln!(out, "  - {tip}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{DISCLAIMER}");
    out
}

/// Format a policy's weights, thresholds, and tip order.
pub(super) fn format_policy(policy: &ScoringPolicy) -> String {
    let w = &policy.weights;
    let rows: [(Field, &[&str], &[i32; 3]); 5] = [
        (Field::Energy, Energy::OPTIONS, &w.energy),
        (Field::Mood, Mood::OPTIONS, &w.mood),
        (Field::Hunger, Hunger::OPTIONS, &w.hunger),
        (Field::Sleep, Sleep::OPTIONS, &w.sleep),
        (Field::Stress, Stress::OPTIONS, &w.stress),
    ];

    let mut out = String::new();
    let _ = writeln!(out, "  weights:");
    for (field, options, weights) in rows {
        let cells = options
            .iter()
            .zip(weights)
            .map(|(option, weight)| format!("{option} {weight:+}"))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "    {:<18} {cells}", field.label());
    }

    let t = policy.thresholds;
    let _ = writeln!(
        out,
        "  zones: green <= {}, yellow <= {}, red above",
        t.green_max, t.yellow_max
    );

    let tips = policy
        .tip_rules
        .iter()
        .map(|r| r.name())
        .collect::<Vec<_>>()
        .join(" > ");
    let _ = writeln!(out, "  tips: {tips}");
    out
}
