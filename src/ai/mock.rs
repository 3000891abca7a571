use super::ClassificationService;
use crate::models::ClassificationRequest;
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum MockOutcome {
    Classification(Map<String, Value>),
    UpstreamStatus(u16),
}

/// Scripted classifier; responses cycle in the order they were added.
#[derive(Clone)]
pub struct MockClassifier {
    outcomes: Arc<Mutex<Vec<MockOutcome>>>,
    requests: Arc<Mutex<Vec<ClassificationRequest>>>,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a classification object. Non-object values are ignored.
    pub fn with_response(self, response: Value) -> Self {
        if let Value::Object(object) = response {
            self.outcomes
                .lock()
                .unwrap()
                .push(MockOutcome::Classification(object));
        }
        self
    }

    /// Queue an upstream failure with the given HTTP status.
    pub fn with_upstream_error(self, status: u16) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push(MockOutcome::UpstreamStatus(status));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<ClassificationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClassificationService for MockClassifier {
    async fn classify(&self, request: &ClassificationRequest) -> Result<Map<String, Value>> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };

        let outcomes = self.outcomes.lock().unwrap();
        if outcomes.is_empty() {
            // Default mock response
            let item = request.description().unwrap_or("Unknown item");
            return Ok(json!({
                "itemType": item,
                "bin": "Landfill",
                "confidence": 50,
                "tips": "When in doubt, throw it out",
                "certainty": "low",
                "categories": [],
                "reasoning": []
            })
            .as_object()
            .cloned()
            .unwrap_or_default());
        }

        match &outcomes[(call - 1) % outcomes.len()] {
            MockOutcome::Classification(object) => Ok(object.clone()),
            MockOutcome::UpstreamStatus(status) => Err(Error::Upstream {
                status: *status,
                body: "mock upstream failure".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_default_response_echoes_description() {
        let classifier = MockClassifier::new();
        let result = classifier
            .classify(&ClassificationRequest::from_description("tin can"))
            .await
            .unwrap();

        assert_eq!(result["itemType"], "tin can");
        assert_eq!(result["bin"], "Landfill");
    }

    #[tokio::test]
    async fn test_mock_cycles_outcomes() {
        let classifier = MockClassifier::new()
            .with_response(json!({ "itemType": "Apple core", "bin": "Compost" }))
            .with_upstream_error(503);
        let request = ClassificationRequest::from_description("apple core");

        assert_eq!(
            classifier.classify(&request).await.unwrap()["bin"],
            "Compost"
        );
        assert!(matches!(
            classifier.classify(&request).await,
            Err(Error::Upstream { status: 503, .. })
        ));
        // Should cycle back
        assert!(classifier.classify(&request).await.is_ok());
        assert_eq!(classifier.get_call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let classifier = MockClassifier::new();
        let shared = classifier.clone();

        classifier
            .classify(&ClassificationRequest::from_description("glass jar"))
            .await
            .unwrap();

        let requests = shared.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].description(), Some("glass jar"));
    }
}
