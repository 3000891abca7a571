//! Data models and structures
//!
//! Defines the inbound classification request, the classification result the
//! model is asked to produce, and the process-wide configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_ENDPOINT: &str = "https://admin-me7pqlig-swedencentral.cognitiveservices.azure.com";
pub const DEFAULT_DEPLOYMENT: &str = "o4-mini-deploy";
pub const DEFAULT_API_VERSION: &str = "2025-01-01-preview";
pub const DEFAULT_MAX_COMPLETION_TOKENS: u32 = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

/// Body of `POST /classify`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Base64-encoded image bytes, optionally prefixed with a `data:` URL header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ClassificationRequest {
    pub fn from_description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// The description, unless it is missing or blank.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }

    /// The base64 payload with any `data:<mime>;base64,` header removed.
    pub fn image(&self) -> Option<&str> {
        self.image
            .as_deref()
            .map(|img| match img.split_once(";base64,") {
                Some((header, payload)) if header.starts_with("data:") => payload,
                _ => img,
            })
            .map(str::trim)
            .filter(|img| !img.is_empty())
    }

    pub fn validate(&self) -> Result<()> {
        if self.description().is_none() && self.image().is_none() {
            return Err(Error::Validation(
                "Either image or description must be provided".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Bin {
    Hazardous,
    Compost,
    Recycle,
    Landfill,
}

impl fmt::Display for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Bin::Hazardous => "Hazardous",
            Bin::Compost => "Compost",
            Bin::Recycle => "Recycle",
            Bin::Landfill => "Landfill",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Certainty {
    High,
    Medium,
    Low,
}

/// The classification the model is instructed to emit.
///
/// The service relays the model's object as-is; this type describes the
/// expected shape and is used to check that the model kept to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub item_type: String,
    pub bin: Bin,
    pub confidence: u8,
    pub tips: String,
    pub certainty: Certainty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_description: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub reasoning: Vec<String>,
}

impl ClassificationResult {
    /// Interpret a relayed classification object, rejecting out-of-range scores.
    pub fn from_object(object: &serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        let result: Self = serde_json::from_value(serde_json::Value::Object(object.clone()))?;
        if result.confidence > 100 {
            return Err(Error::Parse(format!(
                "confidence {} is outside 0-100",
                result.confidence
            )));
        }
        Ok(result)
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub endpoint: String,
    pub deployment: String,
    pub api_version: String,
    pub max_completion_tokens: u32,
    pub timeout_secs: u64,
    pub max_body_bytes: usize,
}

impl Config {
    /// Configuration with compiled-in defaults for everything but the key.
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            deployment: DEFAULT_DEPLOYMENT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            max_completion_tokens: DEFAULT_MAX_COMPLETION_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("AZURE_OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Config("AZURE_OPENAI_API_KEY not set".to_string()))?;

        Ok(Self {
            api_key,
            endpoint: std::env::var("AZURE_OPENAI_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            deployment: std::env::var("AZURE_OPENAI_DEPLOYMENT")
                .unwrap_or_else(|_| DEFAULT_DEPLOYMENT.to_string()),
            api_version: std::env::var("AZURE_OPENAI_API_VERSION")
                .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string()),
            max_completion_tokens: env_or(
                "CLASSIFIER_MAX_COMPLETION_TOKENS",
                DEFAULT_MAX_COMPLETION_TOKENS,
            )?,
            timeout_secs: env_or("CLASSIFIER_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            max_body_bytes: env_or("CLASSIFIER_MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
        })
    }

    /// Chat-completions URL for the configured deployment.
    pub fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> Result<T> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{} has an invalid value '{}'", name, raw))),
        Err(_) => Ok(default),
    }
}
