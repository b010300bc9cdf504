use axum::{extract::State, Json};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::candidates::store;
use crate::errors::AppError;
use crate::imocha::{self, results, InviteRequest, ResultsWindow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdatePhaseRequest {
    pub candidate_email: String,
    pub recruitment_phase: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResultsRequest {
    #[serde(default)]
    pub test_ids: Vec<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// POST /api/v1/imocha/invite-candidate
pub async fn handle_invite(
    State(state): State<AppState>,
    Json(request): Json<InviteRequest>,
) -> Result<Json<Value>, AppError> {
    let invite_id = request
        .invite_id
        .or_else(|| request.role.as_deref().and_then(imocha::role_invite_id))
        .ok_or_else(|| AppError::Validation("Missing inviteId in the request.".to_string()))?;

    info!(invite_id, email = ?request.email, "inviting candidate to iMocha test");
    let result = state.imocha.invite(invite_id, &request).await?;
    Ok(Json(result))
}

/// POST /api/v1/imocha/update-candidate-recruitment-phase
pub async fn handle_update_phase(
    State(state): State<AppState>,
    Json(request): Json<UpdatePhaseRequest>,
) -> Result<Json<Value>, AppError> {
    if request.candidate_email.trim().is_empty() || request.recruitment_phase.trim().is_empty() {
        return Err(AppError::Validation(
            "Candidate email and recruitment phase are required".to_string(),
        ));
    }

    let mut conn = state.db.acquire().await?;
    let candidate = store::update_phase_by_email_returning(
        &mut conn,
        &request.candidate_email,
        &request.recruitment_phase,
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;

    info!(
        candidate_email = %request.candidate_email,
        recruitment_phase = %request.recruitment_phase,
        "recruitment phase updated"
    );
    Ok(Json(json!({
        "success": true,
        "message": "Recruitment phase updated",
        "data": candidate
    })))
}

/// POST /api/v1/imocha/fetch-and-save-results
pub async fn handle_sync_results(
    State(state): State<AppState>,
    Json(request): Json<SyncResultsRequest>,
) -> Result<Json<Value>, AppError> {
    if request.test_ids.is_empty() {
        return Err(AppError::Validation("Test IDs array is required".to_string()));
    }

    let window = ResultsWindow {
        start: request.start_date,
        end: request.end_date,
    };
    let count = results::sync_results(&state, &request.test_ids, window).await?;

    Ok(Json(json!({
        "success": true,
        "message": "iMocha results fetched and saved successfully",
        "count": count
    })))
}

/// POST /api/v1/imocha/fetch-current-date
///
/// Sweeps the default test set for today's attempts.
pub async fn handle_sync_today(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let today = Utc::now().date_naive();
    let window = ResultsWindow {
        start: Some(today),
        end: Some(today),
    };
    let count = results::sync_results(&state, &results::DEFAULT_TEST_IDS, window).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Current date results fetched successfully",
        "count": count
    })))
}
