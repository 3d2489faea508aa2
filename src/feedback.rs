use anyhow::Result;
use async_trait::async_trait;
use log::{error, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::CoachConfig;
use crate::questions::Question;

const MAX_FEEDBACK_TOKENS: u32 = 200;
const FEEDBACK_TEMPERATURE: f64 = 0.7;
/// One re-attempt on transport failures only; HTTP-level errors are
/// answered by the service and not worth repeating.
const MAX_SEND_ATTEMPTS: u32 = 2;

/// Outcome of a feedback request. Remote failures are part of the type,
/// not an error path: a degraded turn is still a recorded turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feedback {
    /// Trimmed text of the model's top completion.
    Generated(String),
    /// The remote call failed; carries the cause.
    Degraded(String),
}

impl Feedback {
    /// User-visible rendering. Degraded results keep the session usable
    /// by showing up as an error-shaped feedback string.
    pub fn text(&self) -> String {
        match self {
            Feedback::Generated(text) => text.clone(),
            Feedback::Degraded(reason) => format!("Error analyzing response: {}", reason),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Feedback::Degraded(_))
    }
}

#[async_trait]
pub trait GenerateFeedback {
    /// Never fails out of the component: every remote problem comes
    /// back as `Feedback::Degraded`.
    async fn generate(&self, question: &Question, response: &str) -> Feedback;
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// OpenAI chat-completions client for response analysis.
#[derive(Clone)]
pub struct FeedbackGenerator {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl FeedbackGenerator {
    pub fn new(config: &CoachConfig) -> Self {
        // Builder failure is a programming error; falling back to a
        // default client would silently lose the bounded timeouts.
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            api_key: config.openai_api_key.clone(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
        }
    }

    fn build_prompt(question: &Question, response: &str) -> String {
        format!(
            "Analyze this interview response to the question: \"{}\"\n\n\
             Response: \"{}\"\n\n\
             Provide constructive feedback in these areas:\n\
             1. Content relevance\n\
             2. Clarity and structure\n\
             3. Specific improvements\n\
             Keep the feedback concise and actionable.",
            question.text, response
        )
    }

    async fn request_completion(&self, prompt: &str, api_key: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: MAX_FEEDBACK_TOKENS,
            temperature: FEEDBACK_TEMPERATURE,
        };

        let mut attempt = 0;
        let response = loop {
            attempt += 1;
            let sent = self
                .client
                .post(format!("{}/chat/completions", self.base_url))
                .header("Authorization", format!("Bearer {}", api_key))
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await;

            match sent {
                Ok(response) => break response,
                Err(e) if attempt < MAX_SEND_ATTEMPTS => {
                    warn!("Feedback request failed (attempt {}), retrying: {}", attempt, e);
                }
                Err(e) => return Err(anyhow::anyhow!("request failed: {}", e)),
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("OpenAI API error {}: {}", status, body);
            return Err(anyhow::anyhow!("OpenAI API error: {}", status));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("failed to parse OpenAI response: {}", e))?;

        if let Some(usage) = chat.usage {
            info!(
                "Token usage - Prompt: {}, Completion: {}, Total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        chat.choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| anyhow::anyhow!("no choices in OpenAI response"))
    }
}

#[async_trait]
impl GenerateFeedback for FeedbackGenerator {
    async fn generate(&self, question: &Question, response: &str) -> Feedback {
        let api_key = match &self.api_key {
            Some(key) => key.clone(),
            None => {
                warn!("Skipping feedback call - OPENAI_API_KEY is not configured");
                return Feedback::Degraded("OPENAI_API_KEY is not configured".to_string());
            }
        };

        info!("🧠 Requesting feedback with model: {}", self.model);
        let prompt = Self::build_prompt(question, response);

        match self.request_completion(&prompt, &api_key).await {
            Ok(text) => Feedback::Generated(text),
            Err(e) => {
                error!("Feedback generation failed: {}", e);
                Feedback::Degraded(e.to_string())
            }
        }
    }
}
