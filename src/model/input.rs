//! Input types: the self-report readings collected by the form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A string that does not name any option of a field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field} `{value}`: expected one of {}", .expected.join(", "))]
pub struct ParseChoiceError {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static [&'static str],
}

/// Declares a closed set of options with its string forms and default.
///
/// Options are lowercase single words, so the serde representation and
/// the display string are the same.
macro_rules! choice {
    (
        $(#[$meta:meta])*
        $name:ident ($field:literal) {
            $($variant:ident => $text:literal),+ $(,)?
        }
        default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Option strings in declaration order.
            pub const OPTIONS: &'static [&'static str] = &[$($text),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }

            /// Position in declaration order.
            pub fn index(self) -> usize {
                self as usize
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseChoiceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(ParseChoiceError {
                        field: $field,
                        value: s.to_string(),
                        expected: Self::OPTIONS,
                    }),
                }
            }
        }
    };
}

choice! {
    /// How much energy the user reports.
    Energy ("energy") { Low => "low", Medium => "medium", High => "high" }
    default Medium
}

choice! {
    /// General mood.
    Mood ("mood") { Down => "down", Neutral => "neutral", Good => "good" }
    default Neutral
}

choice! {
    /// Hunger or cravings.
    Hunger ("hunger") { Light => "light", Moderate => "moderate", Strong => "strong" }
    default Moderate
}

choice! {
    /// Quality of last night's sleep.
    Sleep ("sleep") { Poor => "poor", Average => "average", Great => "great" }
    default Average
}

choice! {
    /// Perceived stress.
    Stress ("stress") { Low => "low", Medium => "medium", High => "high" }
    default Medium
}

/// The five categorical fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Energy,
    Mood,
    Hunger,
    Sleep,
    Stress,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Self; 5] = [
        Self::Energy,
        Self::Mood,
        Self::Hunger,
        Self::Sleep,
        Self::Stress,
    ];

    /// Label shown above the field's dropdown.
    pub fn label(self) -> &'static str {
        match self {
            Self::Energy => "Energy Level",
            Self::Mood => "Mood",
            Self::Hunger => "Hunger / Cravings",
            Self::Sleep => "Sleep Quality",
            Self::Stress => "Stress Level",
        }
    }

    pub fn options(self) -> &'static [&'static str] {
        match self {
            Self::Energy => Energy::OPTIONS,
            Self::Mood => Mood::OPTIONS,
            Self::Hunger => Hunger::OPTIONS,
            Self::Sleep => Sleep::OPTIONS,
            Self::Stress => Stress::OPTIONS,
        }
    }
}

/// Everything the user has entered so far.
///
/// Created with defaults when the form mounts and edited in place;
/// the categorical fields can never be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub energy: Energy,
    pub mood: Mood,
    pub hunger: Hunger,
    pub sleep: Sleep,
    pub stress: Stress,

    /// A win or challenge from today. Optional, may be empty.
    #[serde(default)]
    pub progress: String,
}

impl InputState {
    /// The current option string for a field.
    pub fn value(&self, field: Field) -> &'static str {
        match field {
            Field::Energy => self.energy.as_str(),
            Field::Mood => self.mood.as_str(),
            Field::Hunger => self.hunger.as_str(),
            Field::Sleep => self.sleep.as_str(),
            Field::Stress => self.stress.as_str(),
        }
    }

    /// Set a field from one of its option strings.
    ///
    /// The field is left untouched when the string is not a valid option.
    pub fn set(&mut self, field: Field, value: &str) -> Result<(), ParseChoiceError> {
        match field {
            Field::Energy => self.energy = value.parse()?,
            Field::Mood => self.mood = value.parse()?,
            Field::Hunger => self.hunger = value.parse()?,
            Field::Sleep => self.sleep = value.parse()?,
            Field::Stress => self.stress = value.parse()?,
        }
        Ok(())
    }

    /// The progress note with surrounding whitespace removed,
    /// or `None` when nothing meaningful was entered.
    pub fn progress_note(&self) -> Option<&str> {
        let trimmed = self.progress.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_form_mount_state() {
        let input = InputState::default();
        assert_eq!(input.energy, Energy::Medium);
        assert_eq!(input.mood, Mood::Neutral);
        assert_eq!(input.hunger, Hunger::Moderate);
        assert_eq!(input.sleep, Sleep::Average);
        assert_eq!(input.stress, Stress::Medium);
        assert!(input.progress.is_empty());
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(" LOW ".parse::<Energy>().unwrap(), Energy::Low);
        assert_eq!("Great".parse::<Sleep>().unwrap(), Sleep::Great);
    }

    #[test]
    fn parse_error_names_field_and_options() {
        let err = "sleepy".parse::<Mood>().unwrap_err();
        assert_eq!(err.field, "mood");
        assert_eq!(
            err.to_string(),
            "invalid mood `sleepy`: expected one of down, neutral, good"
        );
    }

    #[test]
    fn set_rejects_unknown_option_without_changing_field() {
        let mut input = InputState::default();
        assert!(input.set(Field::Hunger, "ravenous").is_err());
        assert_eq!(input.hunger, Hunger::Moderate);

        input.set(Field::Hunger, "strong").unwrap();
        assert_eq!(input.value(Field::Hunger), "strong");
    }

    #[test]
    fn field_options_follow_declaration_order() {
        for field in Field::ALL {
            let options = field.options();
            assert_eq!(options.len(), 3);
            let mut input = InputState::default();
            for (i, option) in options.iter().enumerate() {
                input.set(field, option).unwrap();
                assert_eq!(input.value(field), *option);
                let index = match field {
                    Field::Energy => input.energy.index(),
                    Field::Mood => input.mood.index(),
                    Field::Hunger => input.hunger.index(),
                    Field::Sleep => input.sleep.index(),
                    Field::Stress => input.stress.index(),
                };
                assert_eq!(index, i);
            }
        }
    }

    #[test]
    fn progress_note_ignores_whitespace() {
        let mut input = InputState::default();
        assert_eq!(input.progress_note(), None);
        input.progress = "  ".to_string();
        assert_eq!(input.progress_note(), None);
        input.progress = "  Hit my protein goal ".to_string();
        assert_eq!(input.progress_note(), Some("Hit my protein goal"));
    }

    #[test]
    fn deserializes_lowercase_options() {
        let input: InputState = serde_json::from_str(
            r#"{"energy":"low","mood":"good","hunger":"light","sleep":"great","stress":"high"}"#,
        )
        .unwrap();
        assert_eq!(input.energy, Energy::Low);
        assert_eq!(input.stress, Stress::High);
        assert!(input.progress.is_empty());
    }
}
