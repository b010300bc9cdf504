//! The general round feedback form (`feedbackform`), shared by every
//! interview round past L2.

use sqlx::PgPool;
use tracing::{info, warn};

use crate::candidates::store;
use crate::errors::AppError;
use crate::models::feedback::{FeedbackFormRow, RoundFeedbackForm};
use crate::rounds::phase;

const FORM_COLUMNS: &str = "round_details, candidate_email, imocha_score, rrf_id, position, \
     candidate_name, interview_date, interviewer_name, hr_email, detailed_feedback, result, \
     submitted_at, organizational_fitment, customer_communication, continuous_learning, \
     attitude_personality, communication_skills, project_fitment";

/// Stored form for one candidate and round, matched on the exact round
/// label the caller supplies.
pub async fn get_feedback_form(
    pool: &PgPool,
    candidate_email: &str,
    round_details: &str,
) -> Result<Option<FeedbackFormRow>, AppError> {
    let sql = format!(
        "SELECT {FORM_COLUMNS} FROM feedbackform
         WHERE candidate_email = $1 AND round_details = $2"
    );
    let row = sqlx::query_as::<_, FeedbackFormRow>(&sql)
        .bind(candidate_email)
        .bind(round_details)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Upserts the form for (candidate, round) and derives the next
/// recruitment phase from the verdict. The round label is cleaned of its
/// "Scheduled" marker first, so a form submitted from the
/// "EC Fitment Round Scheduled" screen lands under "EC Fitment Round".
pub async fn submit_feedback_form(
    pool: &PgPool,
    form: &RoundFeedbackForm,
    round_details: &str,
) -> Result<FeedbackFormRow, AppError> {
    let round = phase::clean_round_details(round_details);
    let mut tx = pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM feedbackform WHERE candidate_email = $1 AND round_details = $2",
    )
    .bind(&form.candidate_email)
    .bind(&round)
    .fetch_one(&mut *tx)
    .await?;

    let row = if existing > 0 {
        let sql = format!(
            "UPDATE feedbackform
             SET imocha_score = $1,
                 rrf_id = $2,
                 position = $3,
                 candidate_name = $4,
                 interview_date = $5,
                 interviewer_name = $6,
                 hr_email = $7,
                 detailed_feedback = $8,
                 result = $9,
                 submitted_at = NOW(),
                 organizational_fitment = $10,
                 customer_communication = $11,
                 continuous_learning = $12,
                 attitude_personality = $13,
                 communication_skills = $14,
                 project_fitment = $15
             WHERE candidate_email = $16 AND round_details = $17
             RETURNING {FORM_COLUMNS}"
        );
        sqlx::query_as::<_, FeedbackFormRow>(&sql)
            .bind(form.imocha_score)
            .bind(&form.rrf_id)
            .bind(&form.position)
            .bind(&form.candidate_name)
            .bind(form.interview_date)
            .bind(&form.interviewer_name)
            .bind(&form.hr_email)
            .bind(&form.detailed_feedback)
            .bind(&form.result)
            .bind(&form.organizational_fitment)
            .bind(&form.customer_communication)
            .bind(&form.continuous_learning)
            .bind(&form.attitude_personality)
            .bind(&form.communication_skills)
            .bind(&form.project_fitment)
            .bind(&form.candidate_email)
            .bind(&round)
            .fetch_one(&mut *tx)
            .await?
    } else {
        let sql = format!(
            "INSERT INTO feedbackform
               (round_details, candidate_email, imocha_score, rrf_id, position, candidate_name,
                interview_date, interviewer_name, hr_email, detailed_feedback, result,
                submitted_at, organizational_fitment, customer_communication,
                continuous_learning, attitude_personality, communication_skills, project_fitment)
             VALUES
               ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW(), $12, $13, $14, $15, $16, $17)
             RETURNING {FORM_COLUMNS}"
        );
        sqlx::query_as::<_, FeedbackFormRow>(&sql)
            .bind(&round)
            .bind(&form.candidate_email)
            .bind(form.imocha_score)
            .bind(&form.rrf_id)
            .bind(&form.position)
            .bind(&form.candidate_name)
            .bind(form.interview_date)
            .bind(&form.interviewer_name)
            .bind(&form.hr_email)
            .bind(&form.detailed_feedback)
            .bind(&form.result)
            .bind(&form.organizational_fitment)
            .bind(&form.customer_communication)
            .bind(&form.continuous_learning)
            .bind(&form.attitude_personality)
            .bind(&form.communication_skills)
            .bind(&form.project_fitment)
            .fetch_one(&mut *tx)
            .await?
    };

    match form.result.as_deref() {
        Some(result) => match phase::round_phase_for_result(result, &round) {
            Some(next_phase) => {
                store::update_phase_by_email(&mut tx, &form.candidate_email, &next_phase).await?;
                info!(
                    email = %form.candidate_email,
                    phase = %next_phase,
                    "recruitment phase derived from round verdict"
                );
            }
            None => {
                warn!(
                    email = %form.candidate_email,
                    result, "unrecognized result; recruitment phase left unchanged"
                );
            }
        },
        None => {
            warn!(
                email = %form.candidate_email,
                "form carried no result; recruitment phase left unchanged"
            );
        }
    }

    tx.commit().await?;
    Ok(row)
}
