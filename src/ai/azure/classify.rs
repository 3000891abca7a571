use super::client::AzureOpenAiHttpClient;
use super::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatMessageContent, MessagePart,
    ResponseFormat,
};
use crate::ai::{mime, ClassificationService};
use crate::models::{ClassificationRequest, Config};
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use serde_json::{Map, Value};

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

/// Standard alphabet, padding optional.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// URL-safe alphabet, padding optional.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

pub struct AzureClassifier {
    http: AzureOpenAiHttpClient,
    max_completion_tokens: u32,
}

impl AzureClassifier {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: AzureOpenAiHttpClient::new(config)?,
            max_completion_tokens: config.max_completion_tokens,
        })
    }

    pub fn build_request(&self, request: &ClassificationRequest) -> Result<ChatCompletionRequest> {
        let system_message = ChatMessage {
            role: "system".to_string(),
            content: Some(ChatMessageContent::Text(
                prompts::CLASSIFY_SYSTEM.to_string(),
            )),
        };

        let mut parts = Vec::new();
        if let Some(description) = request.description() {
            parts.push(MessagePart::text(prompts::render(
                prompts::CLASSIFY_USER,
                &[("description", description)],
            )));
        }
        if let Some(image) = request.image() {
            parts.push(MessagePart::image_url(image_data_url(image)?));
        }

        let user_message = ChatMessage {
            role: "user".to_string(),
            content: Some(ChatMessageContent::Parts(parts)),
        };

        Ok(ChatCompletionRequest {
            messages: vec![system_message, user_message],
            max_completion_tokens: self.max_completion_tokens,
            response_format: ResponseFormat::json_object(),
        })
    }
}

/// Validate a base64 payload and wrap it in a `data:` URL.
///
/// Padded or unpadded input in either alphabet is accepted and forwarded as-is.
fn image_data_url(image: &str) -> Result<String> {
    let payload: String = image.split_ascii_whitespace().collect();
    let bytes = STANDARD_LENIENT
        .decode(&payload)
        .or_else(|_| URL_SAFE_LENIENT.decode(&payload))
        .map_err(|e| Error::Validation(format!("Image must be valid base64: {}", e)))?;

    Ok(format!(
        "data:{};base64,{}",
        mime::detect_image_mime(&bytes),
        payload
    ))
}

/// Pull the JSON object out of the first choice's message content.
fn extract_classification(response: ChatCompletionResponse) -> Result<Map<String, Value>> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| Error::Parse("no message content in completion".to_string()))?;

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(other) => Err(Error::Parse(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => {
            tracing::error!("Model returned invalid JSON: {}\nContent: {}", e, content);
            Err(Error::Parse(e.to_string()))
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl ClassificationService for AzureClassifier {
    async fn classify(&self, request: &ClassificationRequest) -> Result<Map<String, Value>> {
        let completion_request = self.build_request(request)?;
        let response = self.http.chat_completion(&completion_request).await?;
        let classification = extract_classification(response)?;

        tracing::info!(
            "Classification successful: {}",
            request.description().unwrap_or("<image>")
        );
        Ok(classification)
    }
}
