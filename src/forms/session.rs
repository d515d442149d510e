//! Per-form validation state and its pure transitions.
//!
//! A [`FormSession`] never touches the document. Each input event produces the
//! list of [`UiUpdate`]s to apply, in order, so the whole decision logic can be
//! tested from plain strings.

use super::{
    intent::ChangeIntent,
    matching::{MatchState, compute_match},
    strength::Strength,
};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordField {
    Password,
    Confirm,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiUpdate {
    /// Write the hidden intent field and the `required` flag of both inputs.
    ChangeIntent(ChangeIntent),
    HideMeter,
    ShowStrength(Strength),
    HideIndicator,
    /// Show the indicator for a non-empty confirmation.
    ShowMatch(MatchState),
    SubmitEnabled(bool),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitRules {
    pub min_length: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitFailure {
    TooShort { min_length: usize },
    Mismatch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitVerdict {
    /// Edit form where the password is not being changed; no check applies.
    Skip,
    Allow,
    Block(SubmitFailure),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormSession {
    tracks_intent: bool,
    intent: ChangeIntent,
    strength: Option<Strength>,
    matching: MatchState,
    submit_enabled: bool,
}

impl FormSession {
    /// Session for a form that may declare a change-intent field (edit forms).
    pub fn new(tracks_intent: bool) -> Self {
        Self {
            tracks_intent,
            submit_enabled: true,
            ..Self::default()
        }
    }

    /// Seeds the intent from the value the server rendered into the hidden field.
    #[must_use]
    pub fn with_intent(mut self, intent: ChangeIntent) -> Self {
        if self.tracks_intent {
            self.intent = intent;
        }
        self
    }

    pub fn tracks_intent(&self) -> bool {
        self.tracks_intent
    }

    pub fn intent(&self) -> ChangeIntent {
        self.intent
    }

    pub fn strength(&self) -> Option<Strength> {
        self.strength
    }

    pub fn match_state(&self) -> MatchState {
        self.matching
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    /// Recomputes intent, strength (password field only) and match, in that order.
    pub fn on_input(&mut self, field: PasswordField, password: &str, confirm: &str) -> Vec<UiUpdate> {
        let mut updates = Vec::new();

        if self.tracks_intent {
            self.intent = ChangeIntent::from_fields(password, confirm);
            updates.push(UiUpdate::ChangeIntent(self.intent));
            if !self.intent.is_changing() {
                updates.push(UiUpdate::HideMeter);
                updates.push(UiUpdate::HideIndicator);
                if !self.submit_enabled {
                    // An abandoned change must not leave the form locked.
                    self.submit_enabled = true;
                    updates.push(UiUpdate::SubmitEnabled(true));
                }
            }
        }

        if field == PasswordField::Password {
            if password.is_empty() {
                self.strength = None;
                updates.push(UiUpdate::HideMeter);
            } else {
                let strength = Strength::of(password);
                self.strength = Some(strength);
                updates.push(UiUpdate::ShowStrength(strength));
            }
        }

        self.matching = compute_match(password, confirm);
        match self.matching {
            MatchState::Empty => updates.push(UiUpdate::HideIndicator),
            state => {
                self.submit_enabled = state == MatchState::Match;
                updates.push(UiUpdate::ShowMatch(state));
                updates.push(UiUpdate::SubmitEnabled(self.submit_enabled));
            }
        }

        debug!(
            ?field,
            intent = ?self.intent,
            matching = ?self.matching,
            "password form updated"
        );

        updates
    }

    /// Final check on submit, from the live field values.
    pub fn check_submit(&self, rules: SubmitRules, password: &str, confirm: &str) -> SubmitVerdict {
        if self.tracks_intent && !self.intent.is_changing() {
            return SubmitVerdict::Skip;
        }
        if password.chars().count() < rules.min_length {
            return SubmitVerdict::Block(SubmitFailure::TooShort {
                min_length: rules.min_length,
            });
        }
        if password != confirm {
            return SubmitVerdict::Block(SubmitFailure::Mismatch);
        }
        SubmitVerdict::Allow
    }
}
