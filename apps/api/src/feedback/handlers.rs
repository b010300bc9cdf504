use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::candidates::queries;
use crate::errors::AppError;
use crate::feedback::tables::{FullstackCombo, TechTable};
use crate::feedback::{forms, recorder, summary};
use crate::models::feedback::{RoundFeedbackForm, TechnicalFeedback};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormQuery {
    pub candidate_email: String,
    pub round_details: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFormRequest {
    pub form_data: RoundFeedbackForm,
    pub round_details: String,
}

#[derive(Deserialize)]
pub struct PositionQuery {
    pub position: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTechnicalRequest {
    pub candidate_email: String,
    pub responses: Value,
    pub detailed_feedback: String,
    pub result: String,
    pub position: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalFeedbackQuery {
    pub candidate_email: String,
    pub candidate_id: i32,
    pub position: String,
}

/// GET /api/v1/feedback/form
pub async fn handle_get_feedback_form(
    State(state): State<AppState>,
    Query(params): Query<FormQuery>,
) -> Result<Json<Value>, AppError> {
    let row = forms::get_feedback_form(&state.db, &params.candidate_email, &params.round_details)
        .await?
        .ok_or_else(|| AppError::NotFound("No feedback found".to_string()))?;
    Ok(Json(json!(row)))
}

/// POST /api/v1/feedback/form
pub async fn handle_submit_feedback_form(
    State(state): State<AppState>,
    Json(req): Json<SubmitFormRequest>,
) -> Result<Json<Value>, AppError> {
    if req.round_details.trim().is_empty() {
        return Err(AppError::Validation("Please fill all the fields".to_string()));
    }
    let row = forms::submit_feedback_form(&state.db, &req.form_data, &req.round_details).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Feedback submitted successfully",
        "data": row
    })))
}

/// GET /api/v1/l2/questions
pub async fn handle_questions_by_position(
    State(state): State<AppState>,
    Query(params): Query<PositionQuery>,
) -> Result<Json<Value>, AppError> {
    let table = TechTable::for_position(&params.position);
    let questions = recorder::skill_questions(&state.db, table.questions_table()).await?;
    if questions.is_empty() {
        return Err(AppError::NotFound(
            "No feedback questions found for this position".to_string(),
        ));
    }
    Ok(Json(json!(questions)))
}

/// GET /api/v1/l2/questions/:track
///
/// The track segment goes through the same position matching as the query
/// form, so "java", "dotnet", and the combined fullstack names all resolve
/// the way a position string would.
pub async fn handle_questions_by_track(
    State(state): State<AppState>,
    Path(track): Path<String>,
) -> Result<Json<Value>, AppError> {
    let table = TechTable::for_position(&track);
    let questions = recorder::skill_questions(&state.db, table.questions_table()).await?;
    if questions.is_empty() {
        return Err(AppError::NotFound(
            "No feedback questions found for this position".to_string(),
        ));
    }
    Ok(Json(json!(questions)))
}

/// POST /api/v1/l2/feedback
pub async fn handle_submit_technical(
    State(state): State<AppState>,
    Json(req): Json<SubmitTechnicalRequest>,
) -> Result<Json<Value>, AppError> {
    if !req.responses.is_array()
        || req.candidate_email.trim().is_empty()
        || req.detailed_feedback.trim().is_empty()
        || req.result.trim().is_empty()
        || req.position.trim().is_empty()
    {
        return Err(AppError::Validation(
            "Missing required fields: candidateEmail, responses (array), detailedFeedback, result, position"
                .to_string(),
        ));
    }

    let table = TechTable::for_position(&req.position);
    recorder::record_technical_feedback(
        &state.db,
        table.response_table(),
        &req.candidate_email,
        &req.responses,
        Some(&req.detailed_feedback),
        &req.result,
    )
    .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Feedback submitted successfully"
    })))
}

/// POST /api/v1/l2/:track/feedback
pub async fn handle_submit_technical_by_track(
    State(state): State<AppState>,
    Path(track): Path<String>,
    Json(req): Json<TechnicalFeedback>,
) -> Result<Json<Value>, AppError> {
    if !req.responses.is_array() || req.candidate_email.trim().is_empty() {
        return Err(AppError::Validation(
            "Missing required fields: candidateEmail, responses (array), detailedFeedback, result"
                .to_string(),
        ));
    }

    let table = TechTable::for_position(&track);
    recorder::record_technical_feedback(
        &state.db,
        table.response_table(),
        &req.candidate_email,
        &req.responses,
        req.detailed_feedback.as_deref(),
        &req.result,
    )
    .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Feedback submitted successfully"
    })))
}

/// GET /api/v1/l2/feedback/:candidate_id/:position
pub async fn handle_existing_feedback(
    State(state): State<AppState>,
    Path((candidate_id, position)): Path<(i32, String)>,
) -> Result<Json<Value>, AppError> {
    let table = TechTable::for_position(&position);
    let row = recorder::latest_feedback(&state.db, table.response_table(), candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No feedback found for this candidate".to_string()))?;
    Ok(Json(json!(row)))
}

/// GET /api/v1/l2/fullstack/:combo/questions
pub async fn handle_fullstack_questions(
    State(state): State<AppState>,
    Path(combo): Path<String>,
) -> Result<Json<Value>, AppError> {
    let combo: FullstackCombo = combo.parse()?;
    let questions = recorder::skill_questions(&state.db, combo.questions_table()).await?;
    Ok(Json(json!(questions)))
}

/// POST /api/v1/l2/fullstack/:combo/feedback
pub async fn handle_fullstack_feedback(
    State(state): State<AppState>,
    Path(combo): Path<String>,
    Json(req): Json<TechnicalFeedback>,
) -> Result<Json<Value>, AppError> {
    let combo: FullstackCombo = combo.parse()?;
    if !req.responses.is_array() || req.candidate_email.trim().is_empty() {
        return Err(AppError::Validation(
            "Invalid request payload. candidateEmail and responses (array) are required."
                .to_string(),
        ));
    }

    recorder::record_technical_feedback(
        &state.db,
        combo.response_table(),
        &req.candidate_email,
        &req.responses,
        req.detailed_feedback.as_deref(),
        &req.result,
    )
    .await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("{} feedback saved.", combo.display_name())
    })))
}

/// GET /api/v1/feedback/final/emails
pub async fn handle_final_emails(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let emails = queries::shortlisted_emails(&state.db).await?;
    if emails.is_empty() {
        return Err(AppError::NotFound(
            "No shortlisted candidates found".to_string(),
        ));
    }
    Ok(Json(json!({ "emails": emails })))
}

/// GET /api/v1/feedback/final
pub async fn handle_final_feedback(
    State(state): State<AppState>,
    Query(params): Query<FinalFeedbackQuery>,
) -> Result<Json<Value>, AppError> {
    let data = summary::final_feedback(
        &state.db,
        &params.candidate_email,
        params.candidate_id,
        &params.position,
    )
    .await?;
    Ok(Json(json!(data)))
}
