//! Session domain model.
//!
//! One `SessionState` record describes a full wizard run from welcome to
//! feedback. The record is memory-resident only; "play again" replaces it
//! wholesale so nothing leaks into a new persona.

use crate::client::ClientProfile;
use crate::error::{Result, TenmarkError};
use crate::step::Step;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A resolved image reference.
///
/// The generation gateway may hand back a remote URL, embedded image data as
/// a data URI, or a local placeholder path. Consumers treat all three
/// uniformly as "the image source".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum ImageSource {
    Url(String),
    DataUri(String),
    Placeholder(String),
}

impl ImageSource {
    /// The value a renderer embeds, regardless of variant.
    pub fn as_str(&self) -> &str {
        match self {
            ImageSource::Url(s) | ImageSource::DataUri(s) | ImageSource::Placeholder(s) => s,
        }
    }

    /// The universal placeholder substituted when an already-accepted image
    /// fails to render. Distinct from generation-time fallbacks.
    pub fn display_fallback() -> Self {
        ImageSource::Placeholder("placeholder-image.jpg".to_string())
    }
}

/// The single mutable record describing wizard progress.
///
/// Fields are written by the step that produces them and read by every later
/// step; `advance_to` enforces that a step's prerequisites are populated
/// before the step becomes current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Timestamp when the session was created (ISO 8601 format)
    pub created_at: String,
    pub current_step: Step,
    pub user_name: String,
    /// Chosen client; immutable once the selection step completes.
    pub client: Option<ClientProfile>,
    pub headline: String,
    pub usp: String,
    pub cta: String,
    pub visual_description: String,
    pub caption_text: String,
    /// The normalized prompt actually sent to the image capability.
    pub image_prompt: String,
    pub generated_image: Option<ImageSource>,
    /// Advisory busy-flags; the UI disables the triggering control while set.
    pub is_generating_image: bool,
    pub is_generating_caption: bool,
    pub is_generating_feedback: bool,
    /// Set once when the timed phase begins; cleared only by full reset.
    pub timer_start: Option<DateTime<Utc>>,
    /// Derived seconds, recomputable from `now - timer_start`.
    pub elapsed_time: u64,
    pub feedback_message: Option<String>,
    /// Final score, clamped to 0..=100, written exactly once.
    pub score: Option<u8>,
}

impl SessionState {
    /// A fresh session at the welcome step with all fields defaulted.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now().to_rfc3339(),
            current_step: Step::Welcome,
            user_name: String::new(),
            client: None,
            headline: String::new(),
            usp: String::new(),
            cta: String::new(),
            visual_description: String::new(),
            caption_text: String::new(),
            image_prompt: String::new(),
            generated_image: None,
            is_generating_image: false,
            is_generating_caption: false,
            is_generating_feedback: false,
            timer_start: None,
            elapsed_time: 0,
            feedback_message: None,
            score: None,
        }
    }

    /// Discards everything and starts over with a new id. Every field is
    /// cleared; partial carry-over between personas is not permitted.
    pub fn reset(&mut self) {
        *self = SessionState::new();
    }

    /// The field that must be populated before `target` may become current,
    /// if any is missing.
    pub fn missing_prerequisite(&self, target: Step) -> Option<&'static str> {
        match target {
            Step::Welcome => None,
            Step::ClientSelect => {
                if self.user_name.trim().is_empty() {
                    Some("user_name")
                } else {
                    None
                }
            }
            Step::Brief => {
                if self.client.is_none() {
                    Some("client")
                } else {
                    None
                }
            }
            Step::CampaignForm => None,
            Step::CaptionInput => {
                if self.headline.trim().is_empty() {
                    Some("headline")
                } else if self.usp.trim().is_empty() {
                    Some("usp")
                } else if self.cta.trim().is_empty() {
                    Some("cta")
                } else if self.visual_description.trim().is_empty() {
                    Some("visual_description")
                } else if self.generated_image.is_none() {
                    Some("generated_image")
                } else {
                    None
                }
            }
            Step::Mockup => {
                if self.caption_text.trim().is_empty() {
                    Some("caption_text")
                } else {
                    None
                }
            }
            Step::Feedback => {
                if self.feedback_message.is_none() || self.score.is_none() {
                    Some("feedback_message")
                } else {
                    None
                }
            }
        }
    }

    /// Whether `target` is a legal transition from the current step with all
    /// prerequisites populated.
    pub fn can_advance_to(&self, target: Step) -> bool {
        self.current_step.next() == Some(target) && self.missing_prerequisite(target).is_none()
    }

    /// Advances to `target`, enforcing order and prerequisites.
    ///
    /// # Errors
    ///
    /// `StepViolation` when `target` is not the immediate next step,
    /// `MissingField` when a prerequisite field is empty.
    pub fn advance_to(&mut self, target: Step) -> Result<()> {
        if self.current_step.next() != Some(target) {
            return Err(TenmarkError::StepViolation {
                from: self.current_step.number(),
                to: target.number(),
            });
        }
        if let Some(field) = self.missing_prerequisite(target) {
            return Err(TenmarkError::missing_field(field));
        }
        self.current_step = target;
        Ok(())
    }

    /// Starts the wall-clock timer. One-time side effect: calling again is a
    /// no-op so re-entering the step cannot restart the countdown.
    pub fn start_timer(&mut self, now: DateTime<Utc>) {
        if self.timer_start.is_none() {
            self.timer_start = Some(now);
        }
    }

    /// Writes the derived elapsed value only when it changed, so observers
    /// are not re-notified every tick. Returns whether a write happened.
    pub fn record_elapsed(&mut self, elapsed: u64) -> bool {
        if self.elapsed_time != elapsed {
            self.elapsed_time = elapsed;
            true
        } else {
            false
        }
    }

    /// Whether all four text deliverables are non-empty (completeness bonus).
    pub fn campaign_fields_complete(&self) -> bool {
        !self.headline.trim().is_empty()
            && !self.usp.trim().is_empty()
            && !self.cta.trim().is_empty()
            && !self.caption_text.trim().is_empty()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientRegistry;
    use chrono::TimeZone;

    fn state_at_campaign_form() -> SessionState {
        let mut state = SessionState::new();
        state.user_name = "Sari".to_string();
        state.advance_to(Step::ClientSelect).unwrap();
        state.client = ClientRegistry::builtin().get("GoodFood").cloned();
        state.advance_to(Step::Brief).unwrap();
        state.advance_to(Step::CampaignForm).unwrap();
        state
    }

    #[test]
    fn test_new_defaults() {
        let state = SessionState::new();
        assert_eq!(state.current_step, Step::Welcome);
        assert!(state.client.is_none());
        assert!(state.timer_start.is_none());
        assert_eq!(state.elapsed_time, 0);
        assert!(state.score.is_none());
    }

    #[test]
    fn test_cannot_skip_steps() {
        let mut state = SessionState::new();
        state.user_name = "Sari".to_string();
        let err = state.advance_to(Step::Brief).unwrap_err();
        assert!(matches!(
            err,
            TenmarkError::StepViolation { from: 1, to: 3 }
        ));
    }

    #[test]
    fn test_advance_requires_prerequisites() {
        let mut state = SessionState::new();
        let err = state.advance_to(Step::ClientSelect).unwrap_err();
        assert!(matches!(
            err,
            TenmarkError::MissingField { field: "user_name" }
        ));

        state.user_name = "Sari".to_string();
        state.advance_to(Step::ClientSelect).unwrap();
        assert_eq!(state.current_step, Step::ClientSelect);
    }

    #[test]
    fn test_empty_headline_blocks_caption_step() {
        let mut state = state_at_campaign_form();
        state.usp = "Level pedas custom".to_string();
        state.cta = "Pesan sekarang".to_string();
        state.visual_description = "ramen merah menyala".to_string();
        state.generated_image = Some(ImageSource::Url("https://example.com/a.png".to_string()));

        assert!(!state.can_advance_to(Step::CaptionInput));
        let err = state.advance_to(Step::CaptionInput).unwrap_err();
        assert!(matches!(
            err,
            TenmarkError::MissingField { field: "headline" }
        ));
    }

    #[test]
    fn test_image_required_before_caption_step() {
        let mut state = state_at_campaign_form();
        state.headline = "Pedas Menggila!".to_string();
        state.usp = "Level pedas custom".to_string();
        state.cta = "Pesan sekarang".to_string();
        state.visual_description = "ramen merah menyala".to_string();

        assert_eq!(
            state.missing_prerequisite(Step::CaptionInput),
            Some("generated_image")
        );
    }

    #[test]
    fn test_start_timer_is_one_shot() {
        let mut state = SessionState::new();
        let t0 = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2025, 6, 1, 10, 5, 0).unwrap();
        state.start_timer(t0);
        state.start_timer(t1);
        assert_eq!(state.timer_start, Some(t0));
    }

    #[test]
    fn test_record_elapsed_writes_only_on_change() {
        let mut state = SessionState::new();
        assert!(state.record_elapsed(5));
        assert!(!state.record_elapsed(5));
        assert!(state.record_elapsed(6));
        assert_eq!(state.elapsed_time, 6);
    }

    #[test]
    fn test_reset_clears_every_field() {
        let mut state = state_at_campaign_form();
        state.headline = "Pedas Menggila!".to_string();
        state.caption_text = "caption".to_string();
        state.generated_image = Some(ImageSource::display_fallback());
        state.timer_start = Some(Utc::now());
        state.elapsed_time = 120;
        state.feedback_message = Some("bagus".to_string());
        state.score = Some(95);

        let old_id = state.id.clone();
        state.reset();

        assert_ne!(state.id, old_id);
        assert_eq!(state.current_step, Step::Welcome);
        assert!(state.user_name.is_empty());
        assert!(state.client.is_none());
        assert!(state.headline.is_empty());
        assert!(state.caption_text.is_empty());
        assert!(state.generated_image.is_none());
        assert!(state.timer_start.is_none());
        assert_eq!(state.elapsed_time, 0);
        assert!(state.feedback_message.is_none());
        assert!(state.score.is_none());
    }

    #[test]
    fn test_image_source_uniform_access() {
        let url = ImageSource::Url("https://example.com/x.png".to_string());
        let data = ImageSource::DataUri("data:image/png;base64,AAAA".to_string());
        let local = ImageSource::display_fallback();
        assert_eq!(url.as_str(), "https://example.com/x.png");
        assert!(data.as_str().starts_with("data:image/png;base64,"));
        assert_eq!(local.as_str(), "placeholder-image.jpg");
    }
}
