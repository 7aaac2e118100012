//! Resume upload endpoints — the three grouped parse requests.
//!
//! Each endpoint accepts one multipart file upload, gates on the declared
//! extension before any work, stages the bytes to a temporary file for the
//! text extractor, and fans out its group of section extractions. The staged
//! file is deleted when the handler returns.

use std::io::Write;
use std::time::Instant;

use anyhow::Context;
use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::info;

use crate::document::{self, DocumentType};
use crate::errors::AppError;
use crate::extraction::GroupOutcome;
use crate::metering::RequestMeta;
use crate::state::AppState;

const RAW_TEXT_PREVIEW_CHARS: usize = 1000;

/// Aggregate response for one grouped parse request: the section map
/// flattened at the top level, an `errors` map only when a member failed,
/// and the preview/telemetry block.
#[derive(Debug, Serialize)]
pub struct ParseResponse {
    #[serde(flatten)]
    sections: Map<String, Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    errors: BTreeMap<String, String>,
    raw_text_preview: String,
    meta: RequestMeta,
}

impl ParseResponse {
    fn assemble(outcome: GroupOutcome, resume_text: &str, started: Instant) -> Self {
        ParseResponse {
            sections: outcome.sections,
            errors: outcome.errors,
            raw_text_preview: resume_text.chars().take(RAW_TEXT_PREVIEW_CHARS).collect(),
            meta: RequestMeta::capture(resume_text, started),
        }
    }
}

/// POST /parse-resume — personal info, skills, education, employment.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParseResponse>, AppError> {
    let started = Instant::now();
    let text = upload_to_text(multipart).await?;
    let outcome = state.extractor.extract_primary_sections(&text).await;
    Ok(Json(ParseResponse::assemble(outcome, &text, started)))
}

/// POST /parse-second-priority — projects, certifications, awards, languages.
pub async fn handle_parse_second_priority(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParseResponse>, AppError> {
    let started = Instant::now();
    let text = upload_to_text(multipart).await?;
    let outcome = state.extractor.extract_secondary_sections(&text).await;
    Ok(Json(ParseResponse::assemble(outcome, &text, started)))
}

/// POST /parse-third-priority — memberships, training, skilling, conferences.
pub async fn handle_parse_third_priority(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParseResponse>, AppError> {
    let started = Instant::now();
    let text = upload_to_text(multipart).await?;
    let outcome = state.extractor.extract_tertiary_sections(&text).await;
    Ok(Json(ParseResponse::assemble(outcome, &text, started)))
}

/// Receives the upload, rejects undeclared types, stages the bytes, and
/// returns the extracted document text.
async fn upload_to_text(multipart: Multipart) -> Result<String, AppError> {
    let (filename, bytes) = read_file_field(multipart).await?;

    let extension = filename
        .rsplit('.')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    let doc_type = DocumentType::from_extension(&extension)
        .ok_or_else(|| AppError::UnsupportedFormat(extension.clone()))?;

    // Staged file is removed on drop, extraction success or not.
    let mut staged = tempfile::Builder::new()
        .prefix("resume-upload-")
        .suffix(&format!(".{extension}"))
        .tempfile()
        .context("could not stage upload")?;
    staged
        .write_all(&bytes)
        .context("could not write staged upload")?;

    let text = document::extract_text(staged.path(), doc_type).await?;
    info!(
        "extracted {} chars from {filename} ({doc_type:?})",
        text.chars().count()
    );
    Ok(text)
}

async fn read_file_field(mut multipart: Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Upload(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .map(str::to_string)
                .ok_or_else(|| AppError::Upload("file field has no filename".to_string()))?;
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Upload(e.to_string()))?;
            return Ok((filename, bytes));
        }
    }
    Err(AppError::Upload(
        "multipart body has no 'file' field".to_string(),
    ))
}
