//! Wizard use case.
//!
//! `Wizard` is the single update entry point for the session record: every
//! screen action goes through a method here, each of which validates the
//! step transition before mutating state. Generation results are merged
//! back through the same path, so the state machine never observes a
//! half-applied operation.

use crate::ticker::TimerTicker;
use chrono::Utc;
use std::sync::Arc;
use tenmark_core::error::{Result, TenmarkError};
use tenmark_core::{
    ClientProfile, ClientRegistry, ImageSource, SessionState, Step, scoring, timer,
};
use tenmark_interaction::{CampaignSubmission, CaptionBrief, GenerationGateway};
use tokio::sync::RwLock;

/// The four campaign-brief fields entered on the form screen.
#[derive(Debug, Clone, Default)]
pub struct CampaignFields {
    pub headline: String,
    pub usp: String,
    pub cta: String,
    pub visual_description: String,
}

/// Everything a renderer needs for the Instagram-style mockup. Absent
/// fields render as blanks; assembling the view never fails.
#[derive(Debug, Clone)]
pub struct MockupView {
    pub client_name: Option<String>,
    pub image: Option<ImageSource>,
    pub caption: Option<String>,
}

/// Countdown data derived for display.
#[derive(Debug, Clone, Copy)]
pub struct TimerView {
    pub elapsed: u64,
    pub remaining: u64,
}

/// Orchestrates one wizard session over the shared state record.
pub struct Wizard {
    /// The single mutable session record
    state: Arc<RwLock<SessionState>>,
    /// Boundary to the generative-AI provider
    gateway: Arc<GenerationGateway>,
    /// Static client content (briefs, personas, fallback feedback)
    registry: ClientRegistry,
    /// Recurring elapsed-seconds writer for the timed phase
    ticker: TimerTicker,
}

impl Wizard {
    pub fn new(gateway: Arc<GenerationGateway>, registry: ClientRegistry) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::new())),
            gateway,
            registry,
            ticker: TimerTicker::new(),
        }
    }

    /// A point-in-time copy of the session record for rendering.
    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn current_step(&self) -> Step {
        self.state.read().await.current_step
    }

    /// Clients offered on the selection screen.
    pub fn available_clients(&self) -> &[ClientProfile] {
        self.registry.all()
    }

    /// Welcome screen: records the player name and moves to client selection.
    pub async fn begin(&self, user_name: &str) -> Result<()> {
        if user_name.trim().is_empty() {
            return Err(TenmarkError::missing_field("user_name"));
        }
        let mut state = self.state.write().await;
        state.user_name = user_name.trim().to_string();
        state.advance_to(Step::ClientSelect)
    }

    /// Client selection: binds the chosen client and moves to the brief.
    pub async fn select_client(&self, name: &str) -> Result<()> {
        let client = self
            .registry
            .get(name)
            .cloned()
            .ok_or_else(|| TenmarkError::not_found("client", name))?;

        let mut state = self.state.write().await;
        state.client = Some(client);
        state.advance_to(Step::Brief)
    }

    /// The brief for the current client; blank when no client is bound yet
    /// rather than an error, so a mis-rendered screen shows empty content.
    pub async fn current_brief(&self) -> String {
        let state = self.state.read().await;
        match &state.client {
            Some(client) => self.registry.brief_for(&client.name, client.client_type),
            None => String::new(),
        }
    }

    /// Brief screen: enters the timed phase. Starting the timer is a
    /// one-time side effect; re-entry cannot restart the countdown.
    pub async fn start_campaign(&self) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.advance_to(Step::CampaignForm)?;
            state.start_timer(Utc::now());
        }
        self.ticker.start(self.state.clone());
        tracing::info!(target: "wizard", "Timed phase started");
        Ok(())
    }

    /// Campaign form submission: stores the four fields, builds the
    /// normalized poster prompt, and generates the image. Always yields an
    /// image source; generation failures have already been absorbed into a
    /// fallback by the gateway. The caller reviews the result before the
    /// step advances.
    pub async fn generate_poster(&self, fields: CampaignFields) -> Result<ImageSource> {
        if fields.headline.trim().is_empty() {
            return Err(TenmarkError::missing_field("headline"));
        }
        if fields.usp.trim().is_empty() {
            return Err(TenmarkError::missing_field("usp"));
        }
        if fields.cta.trim().is_empty() {
            return Err(TenmarkError::missing_field("cta"));
        }
        if fields.visual_description.trim().is_empty() {
            return Err(TenmarkError::missing_field("visual_description"));
        }

        let (prompt, client_type) = {
            let mut state = self.state.write().await;
            if state.current_step != Step::CampaignForm {
                return Err(TenmarkError::StepViolation {
                    from: state.current_step.number(),
                    to: Step::CampaignForm.number(),
                });
            }
            let client_type = state
                .client
                .as_ref()
                .map(|c| c.client_type)
                .ok_or_else(|| TenmarkError::missing_field("client"))?;

            let prompt = tenmark_interaction::prompts::image_prompt(
                &fields.headline,
                &fields.usp,
                &fields.cta,
                &fields.visual_description,
                client_type,
            );

            state.headline = fields.headline;
            state.usp = fields.usp;
            state.cta = fields.cta;
            state.visual_description = fields.visual_description;
            state.image_prompt = prompt.clone();
            state.is_generating_image = true;
            (prompt, client_type)
        };

        let image = self.gateway.request_image(&prompt, client_type).await;

        let mut state = self.state.write().await;
        state.generated_image = Some(image.clone());
        state.is_generating_image = false;
        Ok(image)
    }

    /// Accepts the generated poster and moves on to the caption screen.
    /// Returns the auto-generated caption suggestion for that screen.
    pub async fn accept_poster(&self) -> Result<String> {
        self.state.write().await.advance_to(Step::CaptionInput)?;
        self.suggest_caption().await
    }

    /// Generates (or regenerates) a caption suggestion for the current
    /// campaign. Total once the session has a client bound.
    pub async fn suggest_caption(&self) -> Result<String> {
        let brief = {
            let mut state = self.state.write().await;
            let client = state
                .client
                .as_ref()
                .ok_or_else(|| TenmarkError::missing_field("client"))?;
            let brief = CaptionBrief {
                headline: state.headline.clone(),
                usp: state.usp.clone(),
                cta: state.cta.clone(),
                client_type: client.client_type,
                client_name: client.name.clone(),
                personality: client.personality,
            };
            state.is_generating_caption = true;
            brief
        };

        let caption = self.gateway.request_caption(&brief).await;

        self.state.write().await.is_generating_caption = false;
        Ok(caption)
    }

    /// Caption screen: stores the final caption and assembles the mockup.
    pub async fn create_mockup(&self, caption: &str) -> Result<()> {
        if caption.trim().is_empty() {
            return Err(TenmarkError::missing_field("caption_text"));
        }
        let mut state = self.state.write().await;
        state.caption_text = caption.to_string();
        state.advance_to(Step::Mockup)
    }

    /// The assembled post for rendering. Never fails; missing pieces are
    /// simply absent.
    pub async fn mockup(&self) -> MockupView {
        let state = self.state.read().await;
        MockupView {
            client_name: state.client.as_ref().map(|c| c.name.clone()),
            image: state.generated_image.clone(),
            caption: if state.caption_text.is_empty() {
                None
            } else {
                Some(state.caption_text.clone())
            },
        }
    }

    /// Submits the mockup to the client: requests feedback, applies the
    /// bonus scoring, writes both exactly once, and enters the terminal
    /// step. The tick loop is stopped because the timed phase is over.
    pub async fn submit_to_client(&self) -> Result<()> {
        let submission = {
            let mut state = self.state.write().await;
            if state.current_step != Step::Mockup {
                return Err(TenmarkError::StepViolation {
                    from: state.current_step.number(),
                    to: Step::Feedback.number(),
                });
            }
            // Bring elapsed up to date so scoring does not trust a stale tick.
            if let Some(start) = state.timer_start {
                let elapsed = timer::elapsed_seconds(start, Utc::now());
                state.record_elapsed(elapsed);
            }

            let client = state
                .client
                .as_ref()
                .ok_or_else(|| TenmarkError::missing_field("client"))?;

            let submission = CampaignSubmission {
                client_name: client.name.clone(),
                client_type: client.client_type,
                personality: client.personality,
                headline: state.headline.clone(),
                usp: state.usp.clone(),
                cta: state.cta.clone(),
                caption_text: state.caption_text.clone(),
                elapsed_time: state.elapsed_time,
            };
            state.is_generating_feedback = true;
            submission
        };

        let (message, raw_score) = self.gateway.request_feedback(&submission).await;

        let mut state = self.state.write().await;
        let final_score = scoring::assemble(raw_score, &state);
        state.feedback_message = Some(message);
        state.score = Some(final_score);
        state.is_generating_feedback = false;
        state.advance_to(Step::Feedback)?;
        drop(state);

        self.ticker.stop();
        tracing::info!(target: "wizard", score = final_score, "Campaign reviewed");
        Ok(())
    }

    /// Countdown data for display; `None` before the timed phase starts.
    pub async fn timer_view(&self) -> Option<TimerView> {
        let state = self.state.read().await;
        let start = state.timer_start?;
        let now = Utc::now();
        Some(TimerView {
            elapsed: timer::elapsed_seconds(start, now),
            remaining: timer::remaining_seconds(start, now),
        })
    }

    /// Star rating (0..=5) derived from the final score.
    pub async fn star_rating(&self) -> u8 {
        let state = self.state.read().await;
        match state.score {
            Some(score) => ((score as f64 / 100.0) * 5.0).round() as u8,
            None => 0,
        }
    }

    /// Play again: cancels the tick loop and discards the whole record.
    pub async fn reset(&self) {
        self.ticker.stop();
        self.state.write().await.reset();
        tracing::info!(target: "wizard", "Session reset");
    }

    #[cfg(test)]
    pub(crate) async fn rewind_timer_for_test(&self, seconds: i64) {
        let mut state = self.state.write().await;
        let start = state.timer_start.unwrap_or_else(Utc::now);
        state.timer_start = Some(start - chrono::Duration::seconds(seconds));
    }
}
