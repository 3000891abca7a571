use super::types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::models::Config;
use crate::{Error, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Thin HTTP wrapper around one Azure OpenAI deployment.
pub struct AzureOpenAiHttpClient {
    client: Client,
    api_key: String,
    url: String,
}

impl AzureOpenAiHttpClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self::new_with_client(config, client))
    }

    pub fn new_with_client(config: &Config, client: Client) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            url: config.completions_url(),
        }
    }

    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        tracing::info!("Calling Azure OpenAI at: {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .header("api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Azure OpenAI: {}", e);
                e
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Azure OpenAI API error: {} - {}", status.as_u16(), error_text);
            return Err(Error::Upstream {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Azure OpenAI response: {}\nBody: {}", e, body);
            Error::Parse(format!("unexpected completion payload: {}", e))
        })
    }
}
