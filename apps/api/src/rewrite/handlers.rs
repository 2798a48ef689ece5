//! Axum route handlers for the optimization API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::resume::chunker::Chunker;
use crate::resume::document::{extract_uploaded_pdf, is_allowed_upload, ALLOWED_UPLOAD_EXTENSION};
use crate::rewrite::pipeline::{run_pipeline, PipelineDeps, PipelineOutput};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub resume_text: String,
    /// Overrides the example experience text loaded at startup.
    #[serde(default)]
    pub example_text: Option<String>,
    /// Overrides `ENABLE_SEO_KEYWORDS` for this request.
    #[serde(default)]
    pub seo: Option<bool>,
}

/// POST /api/v1/optimize
///
/// Splits the résumé text, indexes its chunks and rewrites every section.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<PipelineOutput>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "resume_text cannot be empty".to_string(),
        ));
    }

    let output = optimize_text(
        &state,
        &request.resume_text,
        request.example_text.as_deref(),
        request.seo,
    )
    .await?;
    Ok(Json(output))
}

/// POST /api/v1/optimize/upload
///
/// Multipart form: `file` (PDF résumé, required), `example_text` and `seo` (optional).
pub async fn handle_optimize_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PipelineOutput>, AppError> {
    let mut document: Option<(String, Bytes)> = None;
    let mut example_text: Option<String> = None;
    let mut seo: Option<bool> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed upload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                if !is_allowed_upload(&filename) {
                    return Err(AppError::InvalidInput(format!(
                        "Only .{ALLOWED_UPLOAD_EXTENSION} files are accepted, got '{filename}'"
                    )));
                }
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("Malformed upload: {e}")))?;
                document = Some((filename, data));
            }
            "example_text" => {
                example_text = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::InvalidInput(format!("Malformed upload: {e}")))?,
                );
            }
            "seo" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("Malformed upload: {e}")))?;
                seo = Some(raw.trim().eq_ignore_ascii_case("true"));
            }
            _ => {}
        }
    }

    let (filename, data) =
        document.ok_or_else(|| AppError::InvalidInput("No file part in the request".to_string()))?;
    info!("Received upload {} ({} bytes)", filename, data.len());

    let text = extract_uploaded_pdf(data).await?;
    if text.trim().is_empty() {
        return Err(AppError::InvalidInput(format!(
            "No text could be extracted from '{filename}'"
        )));
    }

    let output = optimize_text(&state, &text, example_text.as_deref(), seo).await?;
    Ok(Json(output))
}

async fn optimize_text(
    state: &AppState,
    text: &str,
    example_override: Option<&str>,
    seo: Option<bool>,
) -> Result<PipelineOutput, AppError> {
    let annotator = if seo.unwrap_or(state.config.enable_seo_keywords) {
        let annotator = state.annotator.as_deref().ok_or_else(|| {
            AppError::Configuration("SEO keywords requested but GOOGLE_NLP_API_KEY is not set".to_string())
        })?;
        Some(annotator)
    } else {
        None
    };

    let example_text = example_override
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(state.example_text.as_ref());

    let deps = PipelineDeps {
        oracle: state.llm.clone(),
        index: state.index.as_ref(),
        annotator,
        chunker: Chunker::default(),
        concurrency: state.config.rewrite_concurrency,
    };

    run_pipeline(deps, text, example_text).await
}
