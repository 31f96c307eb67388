//! Wizard step types for session state management.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, FromRepr};

/// The seven screens of the wizard, in flow order.
///
/// Steps advance one at a time and only forward; the terminal `Feedback`
/// step returns to `Welcome` via an explicit session reset, never a
/// forward transition.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    FromRepr,
)]
#[repr(u8)]
pub enum Step {
    /// Name intake and introduction.
    Welcome = 1,
    /// Pick one of the fictional clients.
    ClientSelect = 2,
    /// Read the client brief; leaving this step starts the timer.
    Brief = 3,
    /// Fill in headline/USP/CTA/visual description and generate the poster.
    CampaignForm = 4,
    /// Write (or accept a suggested) Instagram caption.
    CaptionInput = 5,
    /// Review the assembled post and submit it to the client.
    Mockup = 6,
    /// Client feedback and score; terminal.
    Feedback = 7,
}

impl Step {
    /// The 1-based step number shown to the user.
    pub fn number(self) -> u8 {
        self as u8
    }

    /// The next step in flow order, or `None` at the terminal step.
    pub fn next(self) -> Option<Step> {
        Step::from_repr(self as u8 + 1)
    }

    /// Whether this is the terminal step.
    pub fn is_terminal(self) -> bool {
        matches!(self, Step::Feedback)
    }

    /// Whether the countdown timer is visible on this step.
    pub fn is_timed(self) -> bool {
        matches!(self, Step::CampaignForm | Step::CaptionInput | Step::Mockup)
    }
}

impl Default for Step {
    fn default() -> Self {
        Step::Welcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_step_numbers_are_contiguous() {
        let numbers: Vec<u8> = Step::iter().map(Step::number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_next_walks_the_flow() {
        assert_eq!(Step::Welcome.next(), Some(Step::ClientSelect));
        assert_eq!(Step::Mockup.next(), Some(Step::Feedback));
        assert_eq!(Step::Feedback.next(), None);
    }

    #[test]
    fn test_terminal_and_timed() {
        assert!(Step::Feedback.is_terminal());
        assert!(!Step::Welcome.is_terminal());
        assert!(Step::CampaignForm.is_timed());
        assert!(!Step::Brief.is_timed());
    }
}
