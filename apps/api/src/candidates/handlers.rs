use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::candidates::queries;
use crate::errors::{self, AppError};
use crate::models::candidate::NewCandidate;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct EmailStatusQuery {
    pub candidate_email: String,
}

#[derive(Deserialize)]
pub struct UpdateEmailStatusRequest {
    pub candidate_email: String,
    pub status: String,
}

#[derive(Deserialize)]
pub struct PanelEmailsQuery {
    pub domain: String,
}

#[derive(Deserialize)]
pub struct CandidateEmailQuery {
    #[serde(rename = "candidateEmail")]
    pub candidate_email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L2OutcomeRequest {
    pub candidate_email: String,
    pub feedback: String,
    pub result: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub email: String,
    pub status: String,
    pub panel: String,
    pub date_time: String,
    pub meeting_link: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RrfUploadRequest {
    pub rrf_ids: Vec<String>,
}

/// POST /api/v1/candidates
pub async fn handle_add_candidate(
    State(state): State<AppState>,
    Json(payload): Json<NewCandidate>,
) -> Result<Json<Value>, AppError> {
    if payload.candidate_name.trim().is_empty() || payload.candidate_email.trim().is_empty() {
        return Err(AppError::Validation(
            "Candidate name and email are required".to_string(),
        ));
    }

    let row = match queries::insert_candidate(&state.db, &payload).await {
        Err(AppError::Database(e)) if errors::is_unique_violation(&e) => {
            return Err(AppError::Conflict("Duplicate candidate email".to_string()));
        }
        other => other?,
    };

    Ok(Json(json!({
        "success": true,
        "message": "Candidate info saved",
        "data": row
    })))
}

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let rows = queries::list_candidates(&state.db).await?;
    Ok(Json(json!({ "success": true, "data": rows })))
}

/// GET /api/v1/candidates/shortlisted
pub async fn handle_shortlisted_candidates(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let candidates = queries::shortlisted_candidates(&state.db).await?;
    if candidates.is_empty() {
        return Err(AppError::NotFound(
            "No shortlisted candidates found.".to_string(),
        ));
    }
    Ok(Json(json!({
        "message": "Shortlisted candidates retrieved successfully.",
        "candidates": candidates
    })))
}

/// GET /api/v1/candidates/email-status
pub async fn handle_get_email_status(
    State(state): State<AppState>,
    Query(params): Query<EmailStatusQuery>,
) -> Result<Json<Value>, AppError> {
    match queries::email_status(&state.db, &params.candidate_email).await? {
        Some(status) => Ok(Json(json!({ "status": status }))),
        None => Err(AppError::NotFound("Candidate not found.".to_string())),
    }
}

/// POST /api/v1/candidates/email-status
pub async fn handle_update_email_status(
    State(state): State<AppState>,
    Json(req): Json<UpdateEmailStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let updated = queries::set_email_status(&state.db, &req.candidate_email, &req.status)
        .await?
        .ok_or_else(|| AppError::NotFound("Candidate not found.".to_string()))?;
    Ok(Json(json!({
        "message": "Email status updated successfully.",
        "candidate": updated
    })))
}

/// GET /api/v1/candidates/panel-emails
pub async fn handle_panel_emails(
    State(state): State<AppState>,
    Query(params): Query<PanelEmailsQuery>,
) -> Result<Json<Value>, AppError> {
    let emails = queries::panel_emails(&state.db, &params.domain).await?;
    if emails.is_empty() {
        return Err(AppError::NotFound(
            "No emails found for the selected domain".to_string(),
        ));
    }
    Ok(Json(json!(emails)))
}

/// GET /api/v1/candidates/profile
pub async fn handle_candidate_profile(
    State(state): State<AppState>,
    Query(params): Query<CandidateEmailQuery>,
) -> Result<Json<Value>, AppError> {
    let row = queries::candidate_profile(&state.db, &params.candidate_email)
        .await?
        .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;
    Ok(Json(json!(row)))
}

/// POST /api/v1/candidates/l2-outcome
pub async fn handle_record_l2_outcome(
    State(state): State<AppState>,
    Json(req): Json<L2OutcomeRequest>,
) -> Result<Json<Value>, AppError> {
    if req.feedback.trim().is_empty() || req.result.trim().is_empty() {
        return Err(AppError::Validation(
            "candidateEmail, feedback, and result are required".to_string(),
        ));
    }
    let updated =
        queries::record_l2_outcome(&state.db, &req.candidate_email, &req.feedback, &req.result)
            .await?
            .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;
    Ok(Json(json!({
        "success": true,
        "message": "Candidate feedback and result updated successfully",
        "updatedData": updated
    })))
}

/// PUT /api/v1/candidates/status
pub async fn handle_schedule_interview(
    State(state): State<AppState>,
    Json(req): Json<ScheduleRequest>,
) -> Result<Json<Value>, AppError> {
    let (date, time) = parse_interview_slot(&req.date_time)?;
    let updated = queries::schedule_interview(
        &state.db,
        &req.email,
        &req.status,
        &req.panel,
        date,
        time,
        &req.meeting_link,
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;
    Ok(Json(json!({
        "message": "Interview scheduled successfully.",
        "meetingLink": req.meeting_link,
        "updatedData": updated
    })))
}

/// GET /api/v1/rrf/ids
pub async fn handle_rrf_ids(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let ids = queries::rrf_ids(&state.db).await?;
    Ok(Json(json!({ "success": true, "rrfIds": ids })))
}

/// POST /api/v1/rrf/upload
pub async fn handle_upload_rrf_ids(
    State(state): State<AppState>,
    Json(req): Json<RrfUploadRequest>,
) -> Result<Json<Value>, AppError> {
    if req.rrf_ids.is_empty() {
        return Err(AppError::Validation("RRF IDs array is required".to_string()));
    }
    let count = queries::upload_rrf_ids(&state.db, &req.rrf_ids).await?;
    Ok(Json(json!({
        "success": true,
        "message": "RRF IDs uploaded successfully from Excel",
        "count": count
    })))
}

/// GET /api/v1/candidates/weekly-counts
pub async fn handle_weekly_counts(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let data = queries::weekly_counts(&state.db).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Weekly counts retrieved successfully",
        "data": data
    })))
}

/// GET /api/v1/candidates/resume-counts
pub async fn handle_resume_counts(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let data = queries::resume_counts(&state.db).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Resume counts retrieved successfully",
        "data": data
    })))
}

/// Splits an ISO-8601 interview slot ("2025-03-04T10:30:00.000Z") into the
/// date and time columns the schedule write expects. Subseconds and a
/// trailing `Z` are dropped; no timezone conversion is applied.
fn parse_interview_slot(raw: &str) -> Result<(NaiveDate, NaiveTime), AppError> {
    let trimmed = raw.strip_suffix('Z').unwrap_or(raw);
    let (date_part, time_part) = trimmed
        .split_once('T')
        .ok_or_else(|| AppError::Validation(format!("Invalid interview slot: {raw}")))?;
    let time_part = time_part.split_once('.').map_or(time_part, |(head, _)| head);

    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid interview date: {date_part}")))?;
    let time = NaiveTime::parse_from_str(time_part, "%H:%M:%S")
        .map_err(|_| AppError::Validation(format!("Invalid interview time: {time_part}")))?;
    Ok((date, time))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_interview_slot_with_subseconds() {
        let (date, time) = parse_interview_slot("2025-03-04T10:30:00.000Z").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
        assert_eq!(time, NaiveTime::from_hms_opt(10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_interview_slot_without_subseconds() {
        let (date, time) = parse_interview_slot("2025-12-01T09:05:30Z").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(time, NaiveTime::from_hms_opt(9, 5, 30).unwrap());
    }

    #[test]
    fn test_parse_interview_slot_date_only_rejected() {
        let err = parse_interview_slot("2025-03-04");
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_parse_interview_slot_garbage_rejected() {
        assert!(parse_interview_slot("not-a-date").is_err());
        assert!(parse_interview_slot("2025-13-40T99:99:99Z").is_err());
    }
}
