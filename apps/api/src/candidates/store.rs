//! Write path for `candidate_info.recruitment_phase`.
//!
//! Phase updates come from feedback submissions and from scheduling, keyed
//! either by candidate id or by email. Every function takes a plain
//! connection so callers can run it inside their own transaction.

use sqlx::PgConnection;

use crate::candidates::queries::CANDIDATE_COLUMNS;
use crate::errors::AppError;
use crate::models::candidate::{CandidateRef, CandidateRow};

/// Resolves the candidate row a feedback submission refers to.
pub async fn find_by_email(
    conn: &mut PgConnection,
    email: &str,
) -> Result<Option<CandidateRef>, AppError> {
    let row = sqlx::query_as::<_, CandidateRef>(
        "SELECT id, hr_email, panel_name, recruitment_phase
         FROM candidate_info
         WHERE candidate_email = $1",
    )
    .bind(email)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(row)
}

/// Unconditional phase write. Last writer wins.
pub async fn update_phase_by_id(
    conn: &mut PgConnection,
    id: i32,
    phase: &str,
) -> Result<u64, AppError> {
    let result = sqlx::query("UPDATE candidate_info SET recruitment_phase = $1 WHERE id = $2")
        .bind(phase)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

/// Conditional phase write: applies only while the row still carries the
/// phase the caller observed. `IS NOT DISTINCT FROM` lets a candidate with
/// no phase yet be claimed the same way. Returns 0 when a concurrent
/// writer got there first.
pub async fn update_phase_by_id_checked(
    conn: &mut PgConnection,
    id: i32,
    phase: &str,
    observed: Option<&str>,
) -> Result<u64, AppError> {
    let result = sqlx::query(
        "UPDATE candidate_info
         SET recruitment_phase = $1
         WHERE id = $2 AND recruitment_phase IS NOT DISTINCT FROM $3",
    )
    .bind(phase)
    .bind(id)
    .bind(observed)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected())
}

/// Phase write keyed by email, for callers that never loaded the id.
pub async fn update_phase_by_email(
    conn: &mut PgConnection,
    email: &str,
    phase: &str,
) -> Result<u64, AppError> {
    let result =
        sqlx::query("UPDATE candidate_info SET recruitment_phase = $1 WHERE candidate_email = $2")
            .bind(phase)
            .bind(email)
            .execute(&mut *conn)
            .await?;
    Ok(result.rows_affected())
}

/// Phase write keyed by email that echoes the updated row, for external
/// callers that show the candidate after the move. `None` when the email
/// matches nobody.
pub async fn update_phase_by_email_returning(
    conn: &mut PgConnection,
    email: &str,
    phase: &str,
) -> Result<Option<CandidateRow>, AppError> {
    let sql = format!(
        "UPDATE candidate_info SET recruitment_phase = $1
         WHERE candidate_email = $2
         RETURNING {CANDIDATE_COLUMNS}"
    );
    let row = sqlx::query_as::<_, CandidateRow>(&sql)
        .bind(phase)
        .bind(email)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}
