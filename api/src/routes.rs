use std::sync::Arc;

use anyhow::Result;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::{engine::general_purpose::STANDARD, Engine};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use ta_services::{AnswerProvider, Settings, TextExtractor};

use crate::error::ApiError;
use crate::question_response::QuestionResponse;

const FALLBACK_PAGE: &str =
    "<h1>TDS Virtual TA API</h1><p>Frontend not found. See the README for the API reference.</p>";

/// Collaborator handles and settings, built once at startup and shared
/// read-only across all requests.
#[derive(Clone)]
pub struct AppState {
    pub qa: Arc<dyn AnswerProvider>,
    pub ocr: Arc<dyn TextExtractor>,
    pub settings: Arc<Settings>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(read_root))
        .route("/api/", post(answer_question))
        .route("/health", get(health_check))
        .route("/stats", get(get_stats))
        .nest_service(
            "/static",
            ServeDir::new(state.settings.frontend_dir.clone()),
        )
        .layer(DefaultBodyLimit::max(state.settings.max_upload_bytes))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Serve the frontend HTML, or a fallback page when it is missing.
/// Always 200.
async fn read_root(State(state): State<AppState>) -> Html<String> {
    let index_path = state.settings.frontend_dir.join("index.html");
    match tokio::fs::read_to_string(&index_path).await {
        Ok(contents) => Html(contents),
        Err(_) => Html(FALLBACK_PAGE.to_string()),
    }
}

/// Main endpoint: answer a question, with optional image input.
async fn answer_question(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<QuestionResponse>, ApiError> {
    let mut question: Option<String> = None;
    let mut image: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::unprocessable(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "question" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::unprocessable(e.to_string()))?;
                question = Some(text);
            }
            "image" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::unprocessable(e.to_string()))?;
                image = Some((filename, data));
            }
            _ => {}
        }
    }

    let question = match question {
        Some(question) if !question.trim().is_empty() => question,
        _ => return Err(ApiError::unprocessable("form field 'question' is required")),
    };

    if question.chars().count() > state.settings.max_question_chars {
        return Err(ApiError::unprocessable(format!(
            "question exceeds {} characters",
            state.settings.max_question_chars
        )));
    }

    match process_question(&state, question, image).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            log::error!("Error processing question: {}", e);
            Err(ApiError::internal(e.to_string()))
        }
    }
}

async fn process_question(
    state: &AppState,
    question: String,
    image: Option<(String, Bytes)>,
) -> Result<QuestionResponse> {
    let mut final_question = question;

    if let Some((filename, data)) = image {
        log::info!("Processing image: {}", filename);

        let image_base64 = STANDARD.encode(&data);
        let extracted_text = state.ocr.extract_text(&image_base64).await?;

        let extracted = extracted_text.trim();
        if !extracted.is_empty() {
            let preview: String = extracted.chars().take(100).collect();
            log::info!("Extracted text: {}...", preview);
        }

        final_question = compose_question(&final_question, &extracted_text);
    }

    let result = state.qa.get_answer(&final_question).await?;

    Ok(QuestionResponse {
        question: final_question,
        answer: result.answer,
        sources: result.sources,
        confidence: result.confidence,
    })
}

/// Append extracted image text to the question. Blank extractions are
/// discarded; the original question is always the prefix.
fn compose_question(question: &str, extracted_text: &str) -> String {
    let extracted = extracted_text.trim();
    if extracted.is_empty() {
        question.to_string()
    } else {
        format!("{}\n\nExtracted from image: {}", question, extracted)
    }
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy", "service": "TDS Virtual TA" }))
}

/// Opaque passthrough of the answer backend's statistics object.
async fn get_stats(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    match state.qa.get_stats().await {
        Ok(stats) => Ok(Json(stats)),
        Err(e) => {
            log::error!("Error getting stats: {}", e);
            Err(ApiError::internal(e.to_string()))
        }
    }
}
