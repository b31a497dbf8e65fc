//! Form state: the single owner of the check-in and its latest result.

use crate::coaching::{self, ScoringPolicy};
use crate::model::{CoachingResult, Field, InputState, ParseChoiceError};

/// The check-in being edited, plus the result of the last submit.
#[derive(Debug, Clone)]
pub struct CoachingForm {
    policy: ScoringPolicy,
    input: InputState,
    result: Option<CoachingResult>,
}

impl CoachingForm {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self {
            policy,
            input: InputState::default(),
            result: None,
        }
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn result(&self) -> Option<&CoachingResult> {
        self.result.as_ref()
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Change a categorical field. Does not recompute the result.
    pub fn set_choice(&mut self, field: Field, value: &str) -> Result<(), ParseChoiceError> {
        self.input.set(field, value)
    }

    pub fn push_progress(&mut self, c: char) {
        self.input.progress.push(c);
    }

    pub fn pop_progress(&mut self) {
        self.input.progress.pop();
    }

    /// Classify the current input, replacing any previous result.
    pub fn submit(&mut self) -> &CoachingResult {
        self.result.insert(coaching::classify(&self.input, &self.policy))
    }

    /// Back to mount state: default input, no result.
    pub fn reset(&mut self) {
        self.input = InputState::default();
        self.result = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::coaching::Preset;
    use crate::model::Zone;

    #[test]
    fn no_result_until_submit() {
        let form = CoachingForm::new(Preset::Adaptive.policy());
        assert!(form.result().is_none());
    }

    #[test]
    fn submit_recomputes_from_current_input() {
        let mut form = CoachingForm::new(Preset::Adaptive.policy());
        assert_eq!(form.submit().zone, Zone::Green);

        form.set_choice(Field::Sleep, "poor").unwrap();
        form.set_choice(Field::Stress, "high").unwrap();
        // Editing alone leaves the previous result in place.
        assert_eq!(form.result().unwrap().zone, Zone::Green);

        assert_eq!(form.submit().zone, Zone::Red);
        assert_eq!(form.result().unwrap().zone, Zone::Red);
    }

    #[test]
    fn progress_editing() {
        let mut form = CoachingForm::new(Preset::Classic.policy());
        for c in "ran 5kx".chars() {
            form.push_progress(c);
        }
        form.pop_progress();
        assert_eq!(form.input().progress, "ran 5k");
        assert_eq!(form.submit().tips, ["Build on your win: “ran 5k”."]);
    }

    #[test]
    fn reset_clears_input_and_result() {
        let mut form = CoachingForm::new(Preset::Adaptive.policy());
        form.set_choice(Field::Energy, "low").unwrap();
        form.push_progress('x');
        form.submit();

        form.reset();
        assert_eq!(form.input(), &InputState::default());
        assert!(form.result().is_none());
    }
}
