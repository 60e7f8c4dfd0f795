//! HTTP surface: routing, handlers, and upload intake.
//!
//! One request in, one response out. The only shared state is immutable
//! (config plus a pooled HTTP client); the only resource with a lifecycle is
//! the spooled upload, whose guard deletes it on every exit path.

mod upload;

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::config::ScribedConfig;
use crate::error::TranscribeError;
use crate::transcription::{self, TranscriptionOptions};
use upload::SpooledUpload;

/// Uploads are capped at 2 GiB, matching the client-side limit.
const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024 * 1024;

/// Immutable per-process state shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ScribedConfig>,
    api_key: Arc<str>,
    http: reqwest::Client,
}

impl AppState {
    pub fn new(config: ScribedConfig, api_key: String, http: reqwest::Client) -> Self {
        Self {
            config: Arc::new(config),
            api_key: api_key.into(),
            http,
        }
    }
}

/// Builds the application router: the transcription endpoint, a health
/// check, and the static browser UI as fallback.
pub fn router(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();
    Router::new()
        .route("/transcribe", post(handle_transcribe))
        .route("/health", get(handle_health))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Accepts a multipart upload, relays it to Deepgram, and answers with the
/// translated result.
///
/// Expects one file field named `audio` plus optional string option fields.
/// The upload is spooled to disk before the provider call and removed when
/// the guard drops, whether the request succeeds or fails.
async fn handle_transcribe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, TranscribeError> {
    let mut upload: Option<SpooledUpload> = None;
    let mut fields: HashMap<String, String> = HashMap::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        TranscribeError::Validation(format!("Malformed multipart body: {e}"))
    })? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if name == "audio" {
            upload = Some(SpooledUpload::spool(&state.config.server.uploads_dir, field).await?);
        } else {
            let value = field.text().await.map_err(|e| {
                TranscribeError::Validation(format!("Malformed multipart body: {e}"))
            })?;
            fields.insert(name, value);
        }
    }

    let upload = upload
        .ok_or_else(|| TranscribeError::Validation("No file uploaded".to_string()))?;
    let options = TranscriptionOptions::from_form_fields(&fields);

    tracing::info!(
        "Transcribing {} ({} bytes, {}) with model {}",
        upload.original_name(),
        upload.size(),
        upload.mime_type(),
        options.model
    );

    let audio = upload.read().await?;
    let body = transcription::api::transcribe(
        &state.http,
        &state.config.deepgram.api_url,
        &state.api_key,
        audio,
        upload.mime_type(),
        &options,
    )
    .await?;
    let result = transcription::translate(&body, &options)?;

    // The upload guard drops here, deleting the spooled file on both the
    // success and error paths above.
    Ok(Json(json!({ "success": true, "result": result.into_value() })))
}
