//! Extraction Orchestrator — one asynchronous operation per resume section.
//!
//! Flow per operation: build_prompt → completion call → validate/coerce.
//! Operations are independent: no shared mutable state crosses calls, and a
//! failed section never blocks or corrupts its siblings. The three group
//! fan-outs mirror the three upload endpoints; within a group all member
//! extractions are issued concurrently so latency is bounded by the slowest
//! member, not their sum. Failed completion calls are not retried.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::warn;

use crate::llm_client::{CompletionError, CompletionService};
use crate::schema::EntityKind;

pub mod prompts;
pub mod validate;

use prompts::{build_prompt, RESUME_PARSER_SYSTEM};
use validate::{validate_response, ResponseError};

/// Failure of a single section's extraction, carrying the section it belongs
/// to so the grouped response can degrade per section.
#[derive(Debug, Error)]
#[error("{kind} extraction failed: {cause}")]
pub struct ExtractionError {
    pub kind: EntityKind,
    #[source]
    pub cause: ExtractionCause,
}

#[derive(Debug, Error)]
pub enum ExtractionCause {
    #[error("completion service error: {0}")]
    Service(#[from] CompletionError),

    #[error(transparent)]
    Response(#[from] ResponseError),
}

/// Aggregate result of one group fan-out. A failed member contributes `null`
/// under its section key plus an entry in `errors`; successful siblings are
/// always preserved.
#[derive(Debug, Default)]
pub struct GroupOutcome {
    pub sections: Map<String, Value>,
    pub errors: BTreeMap<String, String>,
}

impl GroupOutcome {
    fn collect(results: Vec<(EntityKind, Result<Value, ExtractionError>)>) -> Self {
        let mut outcome = GroupOutcome::default();
        for (kind, result) in results {
            match result {
                Ok(value) => {
                    outcome.sections.insert(kind.key().to_string(), value);
                }
                Err(error) => {
                    warn!("{error}");
                    outcome.sections.insert(kind.key().to_string(), Value::Null);
                    outcome.errors.insert(kind.key().to_string(), error.to_string());
                }
            }
        }
        outcome
    }
}

/// Composes the schema registry, prompt builder, and validator around one
/// completion-service collaborator.
pub struct Extractor {
    llm: Arc<dyn CompletionService>,
    /// Bounds in-flight completion calls per process.
    limiter: Semaphore,
}

impl Extractor {
    pub fn new(llm: Arc<dyn CompletionService>, max_concurrent: usize) -> Self {
        Self {
            llm,
            limiter: Semaphore::new(max_concurrent),
        }
    }

    /// Runs one section's extraction against one document's text.
    async fn extract(&self, kind: EntityKind, resume_text: &str) -> Result<Value, ExtractionError> {
        let prompt = build_prompt(kind, resume_text);

        let raw = {
            // The permit is held only for the completion round trip.
            let _permit = self
                .limiter
                .acquire()
                .await
                .expect("extraction limiter closed");
            self.llm
                .complete(&prompt, RESUME_PARSER_SYSTEM)
                .await
                .map_err(|e| ExtractionError {
                    kind,
                    cause: ExtractionCause::Service(e),
                })?
        };

        validate_response(kind.schema(), &raw).map_err(|e| ExtractionError {
            kind,
            cause: ExtractionCause::Response(e),
        })
    }

    // ── One operation per entity kind ───────────────────────────────────────

    pub async fn extract_personal_info(&self, text: &str) -> Result<Value, ExtractionError> {
        self.extract(EntityKind::PersonalInfo, text).await
    }

    pub async fn extract_skills(&self, text: &str) -> Result<Value, ExtractionError> {
        self.extract(EntityKind::Skills, text).await
    }

    pub async fn extract_education(&self, text: &str) -> Result<Value, ExtractionError> {
        self.extract(EntityKind::Education, text).await
    }

    pub async fn extract_employment_history(&self, text: &str) -> Result<Value, ExtractionError> {
        self.extract(EntityKind::Employment, text).await
    }

    pub async fn extract_projects(&self, text: &str) -> Result<Value, ExtractionError> {
        self.extract(EntityKind::Projects, text).await
    }

    pub async fn extract_certifications(&self, text: &str) -> Result<Value, ExtractionError> {
        self.extract(EntityKind::Certifications, text).await
    }

    pub async fn extract_awards(&self, text: &str) -> Result<Value, ExtractionError> {
        self.extract(EntityKind::Awards, text).await
    }

    pub async fn extract_languages(&self, text: &str) -> Result<Value, ExtractionError> {
        self.extract(EntityKind::Languages, text).await
    }

    pub async fn extract_memberships(&self, text: &str) -> Result<Value, ExtractionError> {
        self.extract(EntityKind::Memberships, text).await
    }

    pub async fn extract_training(&self, text: &str) -> Result<Value, ExtractionError> {
        self.extract(EntityKind::Training, text).await
    }

    pub async fn extract_skilling(&self, text: &str) -> Result<Value, ExtractionError> {
        self.extract(EntityKind::Skilling, text).await
    }

    pub async fn extract_conferences(&self, text: &str) -> Result<Value, ExtractionError> {
        self.extract(EntityKind::Conferences, text).await
    }

    // ── Group fan-outs, one per upload endpoint ─────────────────────────────

    /// personal_info, skills, education, employment.
    pub async fn extract_primary_sections(&self, text: &str) -> GroupOutcome {
        let (personal_info, skills, education, employment) = tokio::join!(
            self.extract_personal_info(text),
            self.extract_skills(text),
            self.extract_education(text),
            self.extract_employment_history(text),
        );
        GroupOutcome::collect(vec![
            (EntityKind::PersonalInfo, personal_info),
            (EntityKind::Skills, skills),
            (EntityKind::Education, education),
            (EntityKind::Employment, employment),
        ])
    }

    /// projects, certifications, awards, languages.
    pub async fn extract_secondary_sections(&self, text: &str) -> GroupOutcome {
        let (projects, certifications, awards, languages) = tokio::join!(
            self.extract_projects(text),
            self.extract_certifications(text),
            self.extract_awards(text),
            self.extract_languages(text),
        );
        GroupOutcome::collect(vec![
            (EntityKind::Projects, projects),
            (EntityKind::Certifications, certifications),
            (EntityKind::Awards, awards),
            (EntityKind::Languages, languages),
        ])
    }

    /// memberships, training, skilling, conferences.
    pub async fn extract_tertiary_sections(&self, text: &str) -> GroupOutcome {
        let (memberships, training, skilling, conferences) = tokio::join!(
            self.extract_memberships(text),
            self.extract_training(text),
            self.extract_skilling(text),
            self.extract_conferences(text),
        );
        GroupOutcome::collect(vec![
            (EntityKind::Memberships, memberships),
            (EntityKind::Training, training),
            (EntityKind::Skilling, skilling),
            (EntityKind::Conferences, conferences),
        ])
    }
}
