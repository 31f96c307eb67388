//! Generation gateway for the wizard.
//!
//! Wraps the image and text capabilities behind operations that are total:
//! every call returns a usable result, with failures absorbed here and
//! replaced by deterministic fallback content. Nothing in this crate
//! surfaces an error to the step flow.

pub mod agent;
pub mod fallback;
pub mod openai_chat_agent;
pub mod openai_image_agent;
pub mod parse;
pub mod prompts;

pub use agent::{AgentError, ImageAgent, ImageRequest, TextAgent, TextRequest};
pub use openai_chat_agent::OpenAiChatAgent;
pub use openai_image_agent::OpenAiImageAgent;

use crate::parse::{ParsedFeedback, parse_feedback};
use std::sync::Arc;
use std::time::Duration;
use tenmark_core::scoring::FALLBACK_BASE_SCORE;
use tenmark_core::{ClientRegistry, ClientType, ImageSource, Personality};
use tokio::time::timeout;

/// Hard deadline for caption and feedback generation calls.
pub const GENERATION_DEADLINE: Duration = Duration::from_secs(25);

const GENERATION_TEMPERATURE: f32 = 0.7;
// Bounded so a slow provider settles well inside the deadline.
const CAPTION_MAX_TOKENS: u32 = 500;
const FEEDBACK_MAX_TOKENS: u32 = 1000;

/// Inputs for a caption suggestion.
#[derive(Debug, Clone)]
pub struct CaptionBrief {
    pub headline: String,
    pub usp: String,
    pub cta: String,
    pub client_type: ClientType,
    pub client_name: String,
    pub personality: Personality,
}

/// The full campaign as submitted to the client for review.
#[derive(Debug, Clone)]
pub struct CampaignSubmission {
    pub client_name: String,
    pub client_type: ClientType,
    pub personality: Personality,
    pub headline: String,
    pub usp: String,
    pub cta: String,
    pub caption_text: String,
    pub elapsed_time: u64,
}

/// The two-tier recovery policy for feedback generation: one transparent
/// retry, then pre-written content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeedbackStage {
    Attempt,
    Retry,
    StaticFallback,
}

/// Boundary component wrapping all external generative-AI calls.
///
/// Agents are optional: a gateway built without credentials short-circuits
/// every operation straight to its fallback without attempting a call.
pub struct GenerationGateway {
    text_agent: Option<Arc<dyn TextAgent>>,
    image_agent: Option<Arc<dyn ImageAgent>>,
    registry: ClientRegistry,
    deadline: Duration,
}

impl GenerationGateway {
    pub fn new(
        text_agent: Option<Arc<dyn TextAgent>>,
        image_agent: Option<Arc<dyn ImageAgent>>,
        registry: ClientRegistry,
    ) -> Self {
        Self {
            text_agent,
            image_agent,
            registry,
            deadline: GENERATION_DEADLINE,
        }
    }

    /// Builds a gateway from the secret config / environment. Missing
    /// credentials leave the corresponding capability unconfigured rather
    /// than failing construction.
    pub fn from_secrets(registry: ClientRegistry) -> Self {
        let text_agent: Option<Arc<dyn TextAgent>> = match OpenAiChatAgent::try_from_env() {
            Ok(agent) => Some(Arc::new(agent)),
            Err(err) => {
                tracing::warn!(target: "gateway", "Text capability unavailable: {err}");
                None
            }
        };
        let image_agent: Option<Arc<dyn ImageAgent>> = match OpenAiImageAgent::try_from_env() {
            Ok(agent) => Some(Arc::new(agent)),
            Err(err) => {
                tracing::warn!(target: "gateway", "Image capability unavailable: {err}");
                None
            }
        };
        Self::new(text_agent, image_agent, registry)
    }

    /// Overrides the call deadline (tests use a short one).
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Whether a text capability is configured.
    pub fn has_text_capability(&self) -> bool {
        self.text_agent.is_some()
    }

    /// Generates the poster image for an already-normalized prompt.
    ///
    /// Never fails: provider errors are replaced by the client-type-keyed
    /// stock photo, and a missing credential by the bundled placeholder.
    pub async fn request_image(&self, prompt: &str, client_type: ClientType) -> ImageSource {
        let Some(agent) = &self.image_agent else {
            tracing::warn!(target: "gateway", "Image capability not configured, using placeholder");
            return fallback::local_placeholder(client_type);
        };

        match agent.generate(ImageRequest::square(prompt)).await {
            Ok(source) => {
                tracing::debug!(target: "gateway", "Image generated");
                source
            }
            Err(err) => {
                tracing::warn!(target: "gateway", "Image generation failed: {err}");
                fallback::fallback_image(client_type)
            }
        }
    }

    /// Suggests an Instagram caption. Never fails and never returns an
    /// empty string: timeout or provider failure yields the templated
    /// caption built from the literal campaign fields.
    pub async fn request_caption(&self, brief: &CaptionBrief) -> String {
        let Some(agent) = &self.text_agent else {
            tracing::warn!(target: "gateway", "Text capability not configured, using template caption");
            return fallback::fallback_caption(brief);
        };

        let request = TextRequest {
            prompt: prompts::caption_prompt(brief),
            temperature: GENERATION_TEMPERATURE,
            max_tokens: CAPTION_MAX_TOKENS,
        };

        match timeout(self.deadline, agent.complete(request)).await {
            Ok(Ok(text)) if !text.trim().is_empty() => text,
            Ok(Ok(_)) => {
                tracing::warn!(target: "gateway", "Caption response was empty, using template");
                fallback::fallback_caption(brief)
            }
            Ok(Err(err)) => {
                tracing::warn!(target: "gateway", "Caption generation failed: {err}");
                fallback::fallback_caption(brief)
            }
            Err(_) => {
                tracing::warn!(
                    target: "gateway",
                    "Caption generation timed out after {:?}",
                    self.deadline
                );
                fallback::fallback_caption(brief)
            }
        }
    }

    /// Requests client feedback on the submitted campaign.
    ///
    /// Returns the feedback text and the raw (pre-bonus) score. Recovery is
    /// two-tier: a transient failure (call error, timeout, or a response
    /// the parser cannot use) retries the same call once; a second failure
    /// falls back to the pre-written paragraph with the fixed baseline
    /// score. A missing credential skips straight to the static content.
    pub async fn request_feedback(&self, submission: &CampaignSubmission) -> (String, u8) {
        let Some(agent) = &self.text_agent else {
            tracing::warn!(target: "gateway", "Text capability not configured, using static feedback");
            return self.static_feedback(submission);
        };

        let owner_name = self.registry.owner_name_for(&submission.client_name);
        let mut stage = FeedbackStage::Attempt;

        loop {
            match stage {
                FeedbackStage::Attempt | FeedbackStage::Retry => {
                    match self.try_feedback(agent.as_ref(), submission, &owner_name).await {
                        Ok(parsed) => return (parsed.message, parsed.score),
                        Err(err) => {
                            tracing::warn!(
                                target: "gateway",
                                "Feedback generation failed ({stage:?}): {err}"
                            );
                            stage = match stage {
                                FeedbackStage::Attempt => FeedbackStage::Retry,
                                _ => FeedbackStage::StaticFallback,
                            };
                        }
                    }
                }
                FeedbackStage::StaticFallback => return self.static_feedback(submission),
            }
        }
    }

    async fn try_feedback(
        &self,
        agent: &dyn TextAgent,
        submission: &CampaignSubmission,
        owner_name: &str,
    ) -> Result<ParsedFeedback, AgentError> {
        let request = TextRequest {
            prompt: prompts::feedback_prompt(submission, owner_name),
            temperature: GENERATION_TEMPERATURE,
            max_tokens: FEEDBACK_MAX_TOKENS,
        };

        let content = timeout(self.deadline, agent.complete(request))
            .await
            .map_err(|_| AgentError::Timeout(self.deadline))??;

        parse_feedback(&content).ok_or_else(|| {
            AgentError::ExecutionFailed(
                "Feedback response did not contain a parseable Feedback/Score pair".into(),
            )
        })
    }

    fn static_feedback(&self, submission: &CampaignSubmission) -> (String, u8) {
        let message = self
            .registry
            .fallback_feedback_for(&submission.client_name)
            .unwrap_or_else(|| fallback::generic_fallback_feedback(submission));
        (message, FALLBACK_BASE_SCORE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingTextAgent {
        calls: AtomicUsize,
    }

    impl FailingTextAgent {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TextAgent for FailingTextAgent {
        async fn complete(&self, _request: TextRequest) -> Result<String, AgentError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(AgentError::ExecutionFailed("forced failure".into()))
        }
    }

    struct FixedTextAgent(String);

    #[async_trait]
    impl TextAgent for FixedTextAgent {
        async fn complete(&self, _request: TextRequest) -> Result<String, AgentError> {
            Ok(self.0.clone())
        }
    }

    /// Fails on the first call, succeeds from the second.
    struct FlakyTextAgent {
        calls: AtomicUsize,
        response: String,
    }

    #[async_trait]
    impl TextAgent for FlakyTextAgent {
        async fn complete(&self, _request: TextRequest) -> Result<String, AgentError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(AgentError::ProcessError {
                    status_code: Some(503),
                    message: "unavailable".into(),
                    is_retryable: true,
                    retry_after: None,
                })
            } else {
                Ok(self.response.clone())
            }
        }
    }

    struct SlowTextAgent;

    #[async_trait]
    impl TextAgent for SlowTextAgent {
        async fn complete(&self, _request: TextRequest) -> Result<String, AgentError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("too late".into())
        }
    }

    struct FailingImageAgent;

    #[async_trait]
    impl ImageAgent for FailingImageAgent {
        async fn generate(&self, _request: ImageRequest) -> Result<ImageSource, AgentError> {
            Err(AgentError::ExecutionFailed("forced failure".into()))
        }
    }

    struct FixedImageAgent;

    #[async_trait]
    impl ImageAgent for FixedImageAgent {
        async fn generate(&self, _request: ImageRequest) -> Result<ImageSource, AgentError> {
            Ok(ImageSource::Url("https://example.com/poster.png".into()))
        }
    }

    fn goodfood_brief() -> CaptionBrief {
        CaptionBrief {
            headline: "Pedas Menggila!".to_string(),
            usp: "Level pedas custom".to_string(),
            cta: "Pesan sekarang".to_string(),
            client_type: ClientType::FoodAndBeverage,
            client_name: "GoodFood".to_string(),
            personality: Personality::Outspoken,
        }
    }

    fn goodfood_submission() -> CampaignSubmission {
        CampaignSubmission {
            client_name: "GoodFood".to_string(),
            client_type: ClientType::FoodAndBeverage,
            personality: Personality::Outspoken,
            headline: "Pedas Menggila!".to_string(),
            usp: "Level pedas custom".to_string(),
            cta: "Pesan sekarang".to_string(),
            caption_text: "Ramen pedas level dewa".to_string(),
            elapsed_time: 300,
        }
    }

    fn gateway_with(
        text: Option<Arc<dyn TextAgent>>,
        image: Option<Arc<dyn ImageAgent>>,
    ) -> GenerationGateway {
        GenerationGateway::new(text, image, ClientRegistry::builtin())
    }

    #[tokio::test]
    async fn test_image_success_passes_through() {
        let gateway = gateway_with(None, Some(Arc::new(FixedImageAgent)));
        let source = gateway
            .request_image("prompt", ClientType::FoodAndBeverage)
            .await;
        assert_eq!(
            source,
            ImageSource::Url("https://example.com/poster.png".into())
        );
    }

    #[tokio::test]
    async fn test_image_failure_falls_back_to_stock_photo() {
        let gateway = gateway_with(None, Some(Arc::new(FailingImageAgent)));
        let source = gateway.request_image("prompt", ClientType::Fashion).await;
        assert_eq!(source, fallback::fallback_image(ClientType::Fashion));
    }

    #[tokio::test]
    async fn test_image_without_credential_uses_placeholder() {
        let gateway = gateway_with(None, None);
        let source = gateway.request_image("prompt", ClientType::Barbershop).await;
        assert_eq!(source, fallback::local_placeholder(ClientType::Barbershop));
    }

    #[tokio::test]
    async fn test_caption_success_passes_through() {
        let agent = Arc::new(FixedTextAgent("Caption dari provider 🍜".into()));
        let gateway = gateway_with(Some(agent), None);
        assert_eq!(
            gateway.request_caption(&goodfood_brief()).await,
            "Caption dari provider 🍜"
        );
    }

    #[tokio::test]
    async fn test_caption_never_fails_and_never_empty() {
        let gateway = gateway_with(Some(FailingTextAgent::new()), None);
        let caption = gateway.request_caption(&goodfood_brief()).await;
        assert!(!caption.trim().is_empty());
        assert!(caption.contains("Pedas Menggila!"));
    }

    #[tokio::test]
    async fn test_caption_empty_response_uses_template() {
        let agent = Arc::new(FixedTextAgent("   ".into()));
        let gateway = gateway_with(Some(agent), None);
        let caption = gateway.request_caption(&goodfood_brief()).await;
        assert!(caption.contains("Pesan sekarang"));
    }

    #[tokio::test]
    async fn test_caption_deadline_is_enforced() {
        let gateway = gateway_with(Some(Arc::new(SlowTextAgent)), None)
            .with_deadline(Duration::from_millis(20));
        let caption = gateway.request_caption(&goodfood_brief()).await;
        assert!(caption.contains("Pedas Menggila!"));
    }

    #[tokio::test]
    async fn test_feedback_live_path_parses() {
        let agent = Arc::new(FixedTextAgent(
            "Feedback: \"Headline-nya kuat sekali, Budi suka.\"\nScore: 90".into(),
        ));
        let gateway = gateway_with(Some(agent), None);
        let (message, score) = gateway.request_feedback(&goodfood_submission()).await;
        assert_eq!(message, "Headline-nya kuat sekali, Budi suka.");
        assert_eq!(score, 90);
    }

    #[tokio::test]
    async fn test_feedback_retries_once_then_succeeds() {
        let agent = Arc::new(FlakyTextAgent {
            calls: AtomicUsize::new(0),
            response: "Feedback: \"Mantap setelah retry.\"\nScore: 80".into(),
        });
        let gateway = gateway_with(Some(agent.clone()), None);
        let (message, score) = gateway.request_feedback(&goodfood_submission()).await;
        assert_eq!(message, "Mantap setelah retry.");
        assert_eq!(score, 80);
        assert_eq!(agent.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_feedback_persistent_failure_uses_static_content() {
        let agent = FailingTextAgent::new();
        let gateway = gateway_with(Some(agent.clone()), None);
        let (message, score) = gateway.request_feedback(&goodfood_submission()).await;
        // Exactly one retry before giving up.
        assert_eq!(agent.calls.load(Ordering::SeqCst), 2);
        assert_eq!(
            Some(message),
            ClientRegistry::builtin().fallback_feedback_for("GoodFood")
        );
        assert_eq!(score, FALLBACK_BASE_SCORE);
    }

    #[tokio::test]
    async fn test_feedback_unparseable_response_is_transient() {
        let agent = Arc::new(FixedTextAgent("no structured pair here".into()));
        let gateway = gateway_with(Some(agent), None);
        let (message, score) = gateway.request_feedback(&goodfood_submission()).await;
        assert_eq!(score, FALLBACK_BASE_SCORE);
        assert!(message.contains("Budi dari GoodFood"));
    }

    #[tokio::test]
    async fn test_feedback_without_credential_short_circuits() {
        let gateway = gateway_with(None, None);
        let (message, score) = gateway.request_feedback(&goodfood_submission()).await;
        assert!(message.contains("GoodFood"));
        assert_eq!(score, FALLBACK_BASE_SCORE);
    }

    #[tokio::test]
    async fn test_feedback_unknown_client_gets_generic_template() {
        let mut submission = goodfood_submission();
        submission.client_name = "Warung Baru".to_string();
        let gateway = gateway_with(Some(FailingTextAgent::new()), None);
        let (message, score) = gateway.request_feedback(&submission).await;
        assert!(message.contains("\"Pedas Menggila!\""));
        assert_eq!(score, FALLBACK_BASE_SCORE);
    }
}
