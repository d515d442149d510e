//! Password strength scoring and the meter that displays it.

use crate::dom::Element;
use serde::{Deserialize, Serialize};

/// Length at which the base bonus is granted.
const BASE_LENGTH: usize = 8;
/// Length at which the long-password bonus is granted.
const LONG_LENGTH: usize = 12;
const BASE_LENGTH_POINTS: u8 = 25;
const LONG_LENGTH_POINTS: u8 = 15;
const CLASS_POINTS: u8 = 15;

/// Score bands, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthBand {
    Weak,
    Medium,
    Good,
    Strong,
}

impl StrengthBand {
    pub const fn from_score(score: u8) -> Self {
        match score {
            0..40 => Self::Weak,
            40..60 => Self::Medium,
            60..80 => Self::Good,
            _ => Self::Strong,
        }
    }

    /// Bar and label color.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Weak => "#DC2626",
            Self::Medium => "#F59E0B",
            Self::Good => "#10B981",
            Self::Strong => "#059669",
        }
    }
}

/// Localized label text for each band, supplied by the page.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct StrengthLabels {
    pub weak: String,
    pub medium: String,
    pub good: String,
    pub strong: String,
}

impl StrengthLabels {
    pub fn label(&self, band: StrengthBand) -> &str {
        match band {
            StrengthBand::Weak => &self.weak,
            StrengthBand::Medium => &self.medium,
            StrengthBand::Good => &self.good,
            StrengthBand::Strong => &self.strong,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strength {
    pub score: u8,
    pub band: StrengthBand,
}

impl Strength {
    pub fn of(password: &str) -> Self {
        let score = score(password);
        Self {
            score,
            band: StrengthBand::from_score(score),
        }
    }
}

/// Computed strength together with the label and color it renders with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StrengthReport<'a> {
    pub score: u8,
    pub label: &'a str,
    pub color: &'static str,
}

/// Scores a password in `[0, 100]`.
///
/// Length is counted in characters. Lowercase, uppercase and digit checks are
/// ASCII-only; anything outside `[A-Za-z0-9]` counts as a symbol.
pub fn score(password: &str) -> u8 {
    let length = password.chars().count();
    let mut score = 0;

    if length >= BASE_LENGTH {
        score += BASE_LENGTH_POINTS;
    }
    if length >= LONG_LENGTH {
        score += LONG_LENGTH_POINTS;
    }

    let classes = [
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    for present in classes {
        if present {
            score += CLASS_POINTS;
        }
    }

    score
}

pub fn compute_strength<'a>(password: &str, labels: &'a StrengthLabels) -> StrengthReport<'a> {
    let strength = Strength::of(password);
    StrengthReport {
        score: strength.score,
        label: labels.label(strength.band),
        color: strength.band.color(),
    }
}

/// Meter container, progress bar and label. Missing parts are skipped.
#[derive(Clone, Debug)]
pub struct StrengthMeter<E> {
    pub meter: Option<E>,
    pub bar: Option<E>,
    pub text: Option<E>,
}

impl<E: Element> StrengthMeter<E> {
    /// Scores `password` and renders it; an empty password hides the meter.
    pub fn render(&self, password: &str, labels: &StrengthLabels) -> Option<Strength> {
        if password.is_empty() {
            self.hide();
            return None;
        }
        let strength = Strength::of(password);
        self.show(strength, labels);
        Some(strength)
    }

    pub fn show(&self, strength: Strength, labels: &StrengthLabels) {
        let color = strength.band.color();
        if let Some(meter) = &self.meter {
            meter.set_hidden(false);
        }
        if let Some(bar) = &self.bar {
            bar.set_style("width", &format!("{}%", strength.score));
            bar.set_style("background-color", color);
        }
        if let Some(text) = &self.text {
            text.set_text(labels.label(strength.band));
            text.set_style("color", color);
        }
    }

    pub fn hide(&self) {
        if let Some(meter) = &self.meter {
            meter.set_hidden(true);
        }
    }
}
