//! Questionnaire reads and screening-feedback writes for the prescreening
//! tracks.

use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::feedback::{EcFeedback, EcFeedbackRow, PrescreeningQuestionRow};
use crate::prescreening::tracks::Track;

/// Questions for one track's screening sheet, oldest first.
pub async fn questionnaire(pool: &PgPool, track: Track) -> Result<Vec<PrescreeningQuestionRow>, AppError> {
    let sql = format!(
        "SELECT id, question_text, mandatory_for_candidates, created_at, updated_at
         FROM {table}
         ORDER BY created_at ASC",
        table = track.questionnaire_table()
    );
    let rows = sqlx::query_as::<_, PrescreeningQuestionRow>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Records one screening per candidate per track. The insert is plain,
/// not an upsert: a second submission trips the unique constraint on
/// `candidate_id` and surfaces as a duplicate for the handler to map.
pub async fn submit_feedback(
    pool: &PgPool,
    track: Track,
    feedback: &EcFeedback,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let candidate_id = sqlx::query_scalar::<_, i32>(
        "SELECT id FROM candidate_info WHERE candidate_email = $1",
    )
    .bind(&feedback.candidate_email)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound("Candidate not found.".to_string()))?;

    let table = track.response_table();
    if track.has_extended_columns() {
        let sql = format!(
            "INSERT INTO {table} (
                candidate_id, number_of_years_or_months, detailed_feedback,
                introduction_to_valuemomentum, introduction_of_cloud_app_engineering,
                introduction_to_roles_responsibilities,
                did_candidate_qualify_using_pre_screening_qs,
                current_ctc, expected_ctc, notice_period, offer_in_hand, status, updated_at
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, CURRENT_TIMESTAMP)"
        );
        sqlx::query(&sql)
            .bind(candidate_id)
            .bind(Json(&feedback.number_of_years_or_months))
            .bind(&feedback.detailed_feedback)
            .bind(&feedback.introduction_to_valuemomentum)
            .bind(&feedback.introduction_of_cloud_app_engineering)
            .bind(&feedback.introduction_to_roles_responsibilities)
            .bind(&feedback.did_candidate_qualify_using_pre_screening_qs)
            .bind(&feedback.current_ctc)
            .bind(&feedback.expected_ctc)
            .bind(&feedback.notice_period)
            .bind(&feedback.offer_in_hand)
            .bind(&feedback.status)
            .execute(&mut *tx)
            .await?;
    } else {
        let sql = format!(
            "INSERT INTO {table} (candidate_id, number_of_years_or_months, detailed_feedback, updated_at)
             VALUES ($1, $2, $3, CURRENT_TIMESTAMP)"
        );
        sqlx::query(&sql)
            .bind(candidate_id)
            .bind(Json(&feedback.number_of_years_or_months))
            .bind(&feedback.detailed_feedback)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    info!(candidate_id, table, "prescreening feedback recorded");
    Ok(())
}

/// The stored screening for a candidate on one track, if any. Cloud-EC
/// tracks carry only the common columns, so the select list follows the
/// same split as the insert.
pub async fn latest_feedback(
    pool: &PgPool,
    track: Track,
    candidate_id: i32,
) -> Result<Option<EcFeedbackRow>, AppError> {
    let columns = if track.has_extended_columns() {
        "candidate_id, number_of_years_or_months, detailed_feedback, \
         introduction_to_valuemomentum, introduction_of_cloud_app_engineering, \
         introduction_to_roles_responsibilities, \
         did_candidate_qualify_using_pre_screening_qs, current_ctc, expected_ctc, \
         notice_period, offer_in_hand, status, updated_at"
    } else {
        "candidate_id, number_of_years_or_months, detailed_feedback, updated_at"
    };
    let sql = format!(
        "SELECT {columns} FROM {table} WHERE candidate_id = $1 ORDER BY updated_at DESC LIMIT 1",
        table = track.response_table()
    );
    let row = sqlx::query_as::<_, EcFeedbackRow>(&sql)
        .bind(candidate_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}
