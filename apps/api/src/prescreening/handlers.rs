use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::candidates::queries;
use crate::errors::{self, AppError};
use crate::models::feedback::EcFeedback;
use crate::prescreening::screening;
use crate::prescreening::tracks::Track;
use crate::state::AppState;

/// GET /api/v1/prescreening/emails
pub async fn handle_shortlisted_emails(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let emails = queries::shortlisted_emails(&state.db).await?;
    Ok(Json(json!({ "emails": emails })))
}

/// GET /api/v1/prescreening/:track/questions
pub async fn handle_questionnaire(
    State(state): State<AppState>,
    Path(track): Path<String>,
) -> Result<Json<Value>, AppError> {
    let track: Track = track.parse()?;
    let questions = screening::questionnaire(&state.db, track).await?;
    Ok(Json(json!(questions)))
}

/// POST /api/v1/prescreening/:track/feedback
pub async fn handle_submit_feedback(
    State(state): State<AppState>,
    Path(track): Path<String>,
    Json(feedback): Json<EcFeedback>,
) -> Result<Json<Value>, AppError> {
    let track: Track = track.parse()?;
    if feedback.candidate_email.trim().is_empty() {
        return Err(AppError::Validation(
            "Invalid request payload. candidateEmail and number_of_years_or_months (array) are required."
                .to_string(),
        ));
    }

    match screening::submit_feedback(&state.db, track, &feedback).await {
        Err(AppError::Database(e)) if errors::is_unique_violation(&e) => {
            return Err(AppError::Conflict(
                "Feedback already submitted for this candidate.".to_string(),
            ));
        }
        other => other?,
    }

    Ok(Json(json!({
        "success": true,
        "message": "Feedback inserted successfully."
    })))
}

/// GET /api/v1/prescreening/:track/feedback/:candidate_id
pub async fn handle_candidate_feedback(
    State(state): State<AppState>,
    Path((track, candidate_id)): Path<(String, i32)>,
) -> Result<Json<Value>, AppError> {
    let track: Track = track.parse()?;
    let row = screening::latest_feedback(&state.db, track, candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No feedback found for this candidate".to_string()))?;
    Ok(Json(json!(row)))
}
