//! Password confirmation comparison and its indicator.

use crate::dom::Element;
use serde::Deserialize;

pub const MATCH_CLASS: &str = "text-xs mt-2 font-bold text-green-600";
pub const MISMATCH_CLASS: &str = "text-xs mt-2 font-bold text-red-600";
/// Classes that mark a disabled submit control.
pub const SUBMIT_DISABLED_CLASSES: [&str; 2] = ["opacity-50", "cursor-not-allowed"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchState {
    /// Nothing typed into the confirmation yet.
    #[default]
    Empty,
    Match,
    Mismatch,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatchLabels {
    #[serde(rename = "match")]
    pub matched: String,
    pub no_match: String,
}

impl MatchState {
    /// Indicator text for this state; `None` while the confirmation is empty.
    pub fn message(self, labels: &MatchLabels) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Match => Some(&labels.matched),
            Self::Mismatch => Some(&labels.no_match),
        }
    }
}

pub fn compute_match(password: &str, confirm: &str) -> MatchState {
    if confirm.is_empty() {
        MatchState::Empty
    } else if password == confirm {
        MatchState::Match
    } else {
        MatchState::Mismatch
    }
}

/// Match indicator plus the submit control it gates, if one was configured.
#[derive(Clone, Debug)]
pub struct MatchIndicator<E> {
    pub indicator: Option<E>,
    pub submit: Option<E>,
}

impl<E: Element> MatchIndicator<E> {
    pub fn render(&self, password: &str, confirm: &str, labels: &MatchLabels) -> MatchState {
        let state = compute_match(password, confirm);
        self.show(state, labels);
        state
    }

    /// Renders `state`. An empty state hides the indicator and leaves the
    /// submit control untouched.
    pub fn show(&self, state: MatchState, labels: &MatchLabels) {
        let Some(message) = state.message(labels) else {
            self.hide();
            return;
        };

        if let Some(indicator) = &self.indicator {
            indicator.set_text(message);
            indicator.set_class_name(if state == MatchState::Match {
                MATCH_CLASS
            } else {
                MISMATCH_CLASS
            });
        }
        self.set_submit_enabled(state == MatchState::Match);
    }

    pub fn hide(&self) {
        if let Some(indicator) = &self.indicator {
            indicator.set_hidden(true);
        }
    }

    pub fn set_submit_enabled(&self, enabled: bool) {
        if let Some(submit) = &self.submit {
            submit.set_disabled(!enabled);
            submit.toggle_classes(&SUBMIT_DISABLED_CLASSES, !enabled);
        }
    }
}
