use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_openai::{
    config::OpenAIConfig,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat},
    Client,
};
use async_trait::async_trait;

const COMPLETION_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_COMPLETION_TOKENS: u32 = 2000;

/// Boundary to the text-generation service. Every prompt here asks for a
/// JSON object; callers validate the payload themselves and must not trust
/// it blindly.
#[async_trait]
pub trait PromptRunner: Send + Sync {
    async fn run_json(&self, prompt: &str) -> Result<String>;
}

pub struct OpenaiClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenaiClient {
    pub fn new(api_key: String, model: String) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        OpenaiClient {
            client: Client::with_config(config),
            model,
        }
    }

    async fn chat_json(&self, prompt: &str) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages([ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into()])
            .response_format(ResponseFormat::JsonObject)
            .max_tokens(MAX_COMPLETION_TOKENS)
            .build()?;

        // A slow provider must look like a failed provider, not stall the
        // whole aggregation.
        let response = tokio::time::timeout(COMPLETION_TIMEOUT, self.client.chat().create(request))
            .await
            .map_err(|_| anyhow!("Openai request timed out"))??;

        let content = response
            .choices
            .first()
            .context("No choices in Openai response")?
            .message
            .content
            .clone()
            .context("No content in Openai response")?;

        Ok(content)
    }
}

#[async_trait]
impl PromptRunner for OpenaiClient {
    async fn run_json(&self, prompt: &str) -> Result<String> {
        self.chat_json(prompt).await
    }
}
