//! HTTP surface: `POST /classify` and `GET /health`.

use crate::ai::{AzureClassifier, ClassificationService};
use crate::models::{ClassificationRequest, ClassificationResult, Config};
use crate::{Error, Result};
use actix_web::{get, middleware, post, web, App, HttpResponse, HttpServer};
use serde_json::Value;
use tracing::{error, info, warn, Instrument};
use uuid::Uuid;

/// Shared, read-only state handed to every handler.
pub struct AppState {
    classifier: Box<dyn ClassificationService>,
}

impl AppState {
    pub fn new(classifier: Box<dyn ClassificationService>) -> Self {
        Self { classifier }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Box::new(AzureClassifier::new(config)?)))
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(classify).service(health);
}

#[post("/classify")]
pub async fn classify(state: web::Data<AppState>, body: web::Bytes) -> Result<HttpResponse> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("classify", %request_id);

    async move {
        info!("Waste classification request received");

        let result = handle_classify(&state, &body).await;
        if let Err(e) = &result {
            error!("Error in waste classification: {}", e);
        }
        result
    }
    .instrument(span)
    .await
}

async fn handle_classify(state: &AppState, body: &[u8]) -> Result<HttpResponse> {
    let request: ClassificationRequest = serde_json::from_slice(body)
        .map_err(|e| Error::Validation(format!("Invalid request body: {}", e)))?;
    request.validate()?;

    let mut classification = state.classifier.classify(&request).await?;

    match ClassificationResult::from_object(&classification) {
        Ok(result) => info!(
            "Classified '{}' as {} ({}%)",
            result.item_type, result.bin, result.confidence
        ),
        Err(e) => warn!("Classification does not match the expected schema: {}", e),
    }

    classification.insert("success".to_string(), Value::Bool(true));
    Ok(HttpResponse::Ok().json(classification))
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("healthy")
}

/// Bind and serve until shutdown.
pub async fn run(config: Config, host: &str, port: u16) -> Result<()> {
    let state = web::Data::new(AppState::from_config(&config)?);
    let max_body_bytes = config.max_body_bytes;

    info!(
        "Upstream deployment: {} (api-version {})",
        config.deployment, config.api_version
    );
    info!("Starting server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(max_body_bytes))
            .configure(configure_routes)
    })
    .bind((host, port))?
    .run()
    .await?;

    Ok(())
}
