//! Axum route handlers for the coaching API.

use axum::{extract::State, Json};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::coaching::body::LenientJson;
use crate::coaching::prompts::{render_discipline_reset, render_study_plan};
use crate::coaching::reset_mode::ResetMode;
use crate::errors::AppError;
use crate::state::AppState;

const TOPIC_REQUIRED: &str = "Topic is required.";
const PLAN_FAILED: &str = "Failed to generate plan.";
const RESET_FAILED: &str = "Failed to generate reset advice.";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct StudyPlanRequest {
    #[serde(default, deserialize_with = "string_or_none")]
    pub topic: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StudyPlanResponse {
    pub plan: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DisciplineResetRequest {
    #[serde(default, deserialize_with = "string_or_none")]
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DisciplineResetResponse {
    pub message: String,
}

/// Non-string values (numbers, null, objects) read as absent.
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/study-plan
///
/// Builds a numbered study plan for a single topic.
pub async fn handle_study_plan(
    State(state): State<AppState>,
    LenientJson(request): LenientJson<StudyPlanRequest>,
) -> Result<Json<StudyPlanResponse>, AppError> {
    let topic = match request.topic {
        Some(topic) if !topic.trim().is_empty() => topic,
        _ => return Err(AppError::InvalidInput(TOPIC_REQUIRED.to_string())),
    };

    let prompt = render_study_plan(&topic);
    let plan = state
        .generator
        .generate(&prompt)
        .await
        .map_err(AppError::generation_failed(PLAN_FAILED))?;

    Ok(Json(StudyPlanResponse { plan }))
}

/// POST /api/discipline-reset
///
/// Returns a short reset message plus three steps for the given mode.
/// Unknown modes are answered with the skipped-prayer guidance, never a 400.
pub async fn handle_discipline_reset(
    State(state): State<AppState>,
    LenientJson(request): LenientJson<DisciplineResetRequest>,
) -> Result<Json<DisciplineResetResponse>, AppError> {
    let mode = ResetMode::from_label(request.mode.as_deref());
    debug!("Discipline reset requested: {mode:?}");

    let prompt = render_discipline_reset(mode);
    let message = state
        .generator
        .generate(&prompt)
        .await
        .map_err(AppError::generation_failed(RESET_FAILED))?;

    Ok(Json(DisciplineResetResponse { message }))
}
