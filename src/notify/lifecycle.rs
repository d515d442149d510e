/// Fade-in duration once the element is painted.
pub const FADE_IN_MS: u32 = 300;
/// Fade-out duration; the element is detached when it elapses.
pub const FADE_OUT_MS: u32 = 500;
/// Vertical offset the element slides in from.
pub const ENTER_OFFSET: &str = "translateY(-8px)";
pub const SETTLED_OFFSET: &str = "translateY(0)";

/// Where a notification is in its life.
///
/// ```text
/// Entering -> Visible -> Dismissing -> Removed
///     \___________________^
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Entering,
    Visible,
    Dismissing,
    Removed,
}

impl Phase {
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Entering, Self::Visible | Self::Dismissing)
                | (Self::Visible, Self::Dismissing)
                | (Self::Dismissing, Self::Removed)
        )
    }

    /// Moves to `next` if allowed. Returns whether the phase changed.
    pub fn advance(&mut self, next: Self) -> bool {
        if self.can_transition_to(next) {
            *self = next;
            true
        } else {
            false
        }
    }

    /// Still on screen and dismissable.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Entering | Self::Visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_forward_path() {
        let mut phase = Phase::default();
        assert!(phase.advance(Phase::Visible));
        assert!(phase.advance(Phase::Dismissing));
        assert!(phase.advance(Phase::Removed));
        assert_eq!(phase, Phase::Removed);
    }

    #[test]
    fn entering_may_be_dismissed_before_settling() {
        let mut phase = Phase::Entering;
        assert!(phase.advance(Phase::Dismissing));
        assert!(!phase.advance(Phase::Visible));
        assert_eq!(phase, Phase::Dismissing);
    }

    #[test]
    fn removed_is_terminal() {
        let mut phase = Phase::Removed;
        for next in [Phase::Entering, Phase::Visible, Phase::Dismissing, Phase::Removed] {
            assert!(!phase.advance(next));
        }
        assert!(!phase.is_active());
    }

    #[test]
    fn dismissing_twice_is_rejected() {
        let mut phase = Phase::Visible;
        assert!(phase.advance(Phase::Dismissing));
        assert!(!phase.advance(Phase::Dismissing));
    }
}
