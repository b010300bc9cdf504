use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::panel::queries;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PanelDayQuery {
    pub l_2_interviewdate: NaiveDate,
    #[serde(rename = "userEmail")]
    pub user_email: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackDayQuery {
    pub interview_date: NaiveDate,
    #[serde(rename = "userEmail")]
    pub user_email: String,
}

#[derive(Debug, Deserialize)]
pub struct HrDayQuery {
    pub l_2_interviewdate: NaiveDate,
    #[serde(rename = "hrEmail")]
    pub hr_email: String,
}

#[derive(Debug, Deserialize)]
pub struct EngCenterRequest {
    #[serde(rename = "candidateEmail")]
    pub candidate_email: String,
}

/// GET /api/v1/panel/panel-candidates-info
pub async fn handle_panel_candidates(
    State(state): State<AppState>,
    Query(query): Query<PanelDayQuery>,
) -> Result<Json<Value>, AppError> {
    let candidates =
        queries::panel_candidates(&state.db, query.l_2_interviewdate, &query.user_email).await?;
    Ok(Json(json!(candidates)))
}

/// GET /api/v1/panel/feedback-for-panel-member
pub async fn handle_panel_feedback(
    State(state): State<AppState>,
    Query(query): Query<FeedbackDayQuery>,
) -> Result<Json<Value>, AppError> {
    let feedbacks =
        queries::panel_feedback(&state.db, query.interview_date, &query.user_email).await?;
    Ok(Json(json!(feedbacks)))
}

/// GET /api/v1/panel/feedback-table
pub async fn handle_feedback_table(
    State(state): State<AppState>,
    Query(query): Query<FeedbackDayQuery>,
) -> Result<Json<Value>, AppError> {
    let feedbacks =
        queries::combined_feedback(&state.db, query.interview_date, &query.user_email).await?;
    if feedbacks.is_empty() {
        return Err(AppError::NotFound("No feedback records found".to_string()));
    }
    Ok(Json(json!(feedbacks)))
}

/// POST /api/v1/panel/get-engcenter-select
pub async fn handle_eng_center(
    State(state): State<AppState>,
    Json(request): Json<EngCenterRequest>,
) -> Result<Json<Value>, AppError> {
    if request.candidate_email.trim().is_empty() {
        return Err(AppError::Validation("candidateEmail is required".to_string()));
    }
    let data = queries::eng_center(&state.db, &request.candidate_email)
        .await?
        .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;
    Ok(Json(json!(data)))
}

/// GET /api/v1/panel/hr-candidates-info
pub async fn handle_hr_candidates(
    State(state): State<AppState>,
    Query(query): Query<HrDayQuery>,
) -> Result<Json<Value>, AppError> {
    let candidates =
        queries::hr_candidates(&state.db, query.l_2_interviewdate, &query.hr_email).await?;
    Ok(Json(json!(candidates)))
}
