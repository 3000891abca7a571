//! AI service integration for waste classification
//!
//! Provides the classification seam used by the HTTP layer, the Azure OpenAI
//! chat-completions implementation, and an in-memory mock for tests.

pub mod azure;
pub mod mime;
pub mod mock;

pub use azure::AzureClassifier;
pub use mock::MockClassifier;

use crate::models::ClassificationRequest;
use crate::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Produces a classification object for one validated request.
///
/// The returned object is the model's JSON verbatim; callers add the
/// `success` flag.
#[async_trait]
pub trait ClassificationService: Send + Sync {
    async fn classify(&self, request: &ClassificationRequest) -> Result<Map<String, Value>>;
}
