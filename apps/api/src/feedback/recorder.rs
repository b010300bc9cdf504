//! Transactional write path for technical feedback.
//!
//! A submission resolves the candidate, upserts one response row per
//! candidate per track, and moves `recruitment_phase` for a recognized
//! verdict. All of it commits or rolls back together.

use serde_json::Value;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::candidates::store;
use crate::errors::AppError;
use crate::models::feedback::{SkillQuestionRow, TechFeedbackRow};
use crate::rounds::phase;

/// Records a technical feedback submission against the given response
/// table. The table name comes from `tables::TechTable` or
/// `tables::FullstackCombo`, never from the request.
///
/// The phase write is conditional on the phase observed when the
/// transaction began; losing that race rolls the whole submission back
/// with a `Conflict` so the interviewer can resubmit against fresh state.
pub async fn record_technical_feedback(
    pool: &PgPool,
    response_table: &'static str,
    candidate_email: &str,
    responses: &Value,
    overall_feedback: Option<&str>,
    result: &str,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let candidate = store::find_by_email(&mut tx, candidate_email)
        .await?
        .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;

    let upsert = format!(
        "INSERT INTO {response_table} (
            candidate_id, hr_email, candidate_email, interviewer_name, responses,
            overall_feedback, result, updated_at
         ) VALUES ($1, $2, $3, $4, $5, $6, $7, CURRENT_TIMESTAMP)
         ON CONFLICT (candidate_id) DO UPDATE SET
            responses = EXCLUDED.responses,
            overall_feedback = EXCLUDED.overall_feedback,
            result = EXCLUDED.result,
            interviewer_name = EXCLUDED.interviewer_name,
            hr_email = EXCLUDED.hr_email,
            candidate_email = EXCLUDED.candidate_email,
            updated_at = CURRENT_TIMESTAMP"
    );
    sqlx::query(&upsert)
        .bind(candidate.id)
        .bind(&candidate.hr_email)
        .bind(candidate_email)
        .bind(&candidate.panel_name)
        .bind(responses)
        .bind(overall_feedback)
        .bind(result)
        .execute(&mut *tx)
        .await?;

    match phase::l2_phase_for_result(result) {
        Some(next_phase) => {
            let moved = store::update_phase_by_id_checked(
                &mut tx,
                candidate.id,
                next_phase,
                candidate.recruitment_phase.as_deref(),
            )
            .await?;
            if moved == 0 {
                // Dropping the transaction rolls the upsert back too.
                return Err(AppError::Conflict(
                    "Recruitment phase changed while recording feedback; resubmit".to_string(),
                ));
            }
        }
        None => {
            warn!(
                email = candidate_email,
                result, "unrecognized result; recruitment phase left unchanged"
            );
        }
    }

    tx.commit().await?;
    info!(
        candidate_id = candidate.id,
        table = response_table,
        result,
        "technical feedback recorded"
    );
    Ok(())
}

/// Skill rows for one track's feedback sheet, oldest first.
pub async fn skill_questions(
    pool: &PgPool,
    questions_table: &'static str,
) -> Result<Vec<SkillQuestionRow>, AppError> {
    let sql = format!(
        "SELECT id, skill_category, skill_description, is_core_skill AS is_top_skill,
                created_at, updated_at
         FROM {questions_table}
         ORDER BY created_at ASC"
    );
    let rows = sqlx::query_as::<_, SkillQuestionRow>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// The most recent stored submission for a candidate on one track, used
/// to prefill the feedback sheet.
pub async fn latest_feedback(
    pool: &PgPool,
    response_table: &'static str,
    candidate_id: i32,
) -> Result<Option<TechFeedbackRow>, AppError> {
    let sql = format!(
        "SELECT responses, overall_feedback, result
         FROM {response_table}
         WHERE candidate_id = $1
         ORDER BY updated_at DESC
         LIMIT 1"
    );
    let row = sqlx::query_as::<_, TechFeedbackRow>(&sql)
        .bind(candidate_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}
