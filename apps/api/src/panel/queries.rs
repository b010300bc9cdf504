use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::candidate::PanelCandidateRow;
use crate::models::panel::{CombinedFeedbackRow, EngCenterRow, PanelFeedbackRow};

/// Phases a panel member still acts on. A candidate leaves this set once a
/// final verdict lands or HR schedules the next round.
const PANEL_PHASES: [&str; 10] = [
    "L2 Technical Round Scheduled",
    "Shortlisted in L2",
    "Client Fitment Round Scheduled",
    "Shortlisted in Client Fitment Round",
    "Project Fitment Round Scheduled",
    "Shortlisted in Project Fitment Round",
    "Fitment Round Scheduled",
    "Shortlisted in Fitment Round",
    "EC Fitment Round Scheduled",
    "Shortlisted in EC Fitment Round",
];

/// Candidates assigned to a panel member on the given interview date.
pub async fn panel_candidates(
    pool: &PgPool,
    interview_date: NaiveDate,
    user_email: &str,
) -> Result<Vec<PanelCandidateRow>, AppError> {
    let rows = sqlx::query_as::<_, PanelCandidateRow>(
        "SELECT candidate_name, candidate_email, role, recruitment_phase, resume,
                l_2_interviewdate, imocha_report, meeting_link, l_2_interviewtime
         FROM candidate_info
         WHERE prescreening_status = 'Shortlisted'
           AND recruitment_phase = ANY($1)
           AND l_2_interviewdate = $2
           AND panel_name ILIKE $3",
    )
    .bind(&PANEL_PHASES[..])
    .bind(interview_date)
    .bind(user_email)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Round feedback a panel member filed on the given date.
pub async fn panel_feedback(
    pool: &PgPool,
    interview_date: NaiveDate,
    user_email: &str,
) -> Result<Vec<PanelFeedbackRow>, AppError> {
    let rows = sqlx::query_as::<_, PanelFeedbackRow>(
        "SELECT candidate_email, candidate_name, interview_date, interviewer_name,
                detailed_feedback, result, submitted_at, round_details, position
         FROM feedbackform
         WHERE interview_date = $1 AND interviewer_name ILIKE $2",
    )
    .bind(interview_date)
    .bind(user_email)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Combined feedback view across the round forms and the .NET and Java
/// technical response tables. The technical legs key on the day the
/// response row was last touched.
pub async fn combined_feedback(
    pool: &PgPool,
    interview_date: NaiveDate,
    user_email: &str,
) -> Result<Vec<CombinedFeedbackRow>, AppError> {
    let mut rows = sqlx::query_as::<_, CombinedFeedbackRow>(
        "SELECT candidate_name, candidate_email, position, hr_email, result,
                interview_date::timestamptz AS interview_date
         FROM feedbackform
         WHERE interview_date = $1 AND interviewer_name ILIKE $2",
    )
    .bind(interview_date)
    .bind(user_email)
    .fetch_all(pool)
    .await?;
    let form_count = rows.len();

    for table in ["app_dotnet_l2_feedback_response", "app_java_l2_feedback_response"] {
        let sql = format!(
            "SELECT c.candidate_name, f.candidate_email, c.role AS position, f.hr_email,
                    f.result, f.updated_at AS interview_date
             FROM {table} f
             LEFT JOIN candidate_info c ON f.candidate_email = c.candidate_email
             WHERE DATE(f.updated_at) = $1 AND f.interviewer_name ILIKE $2"
        );
        let mut leg = sqlx::query_as::<_, CombinedFeedbackRow>(&sql)
            .bind(interview_date)
            .bind(user_email)
            .fetch_all(pool)
            .await?;
        rows.append(&mut leg);
    }

    info!(
        date = %interview_date,
        user_email,
        total = rows.len(),
        forms = form_count,
        "combined feedback view assembled"
    );
    Ok(rows)
}

/// Engineering center and role for one candidate.
pub async fn eng_center(
    pool: &PgPool,
    candidate_email: &str,
) -> Result<Option<EngCenterRow>, AppError> {
    let row = sqlx::query_as::<_, EngCenterRow>(
        "SELECT eng_center, role FROM candidate_info WHERE candidate_email = $1",
    )
    .bind(candidate_email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Candidates an HR owner has in the legacy 'L2 Scheduled' phase on the
/// given date.
pub async fn hr_candidates(
    pool: &PgPool,
    interview_date: NaiveDate,
    hr_email: &str,
) -> Result<Vec<PanelCandidateRow>, AppError> {
    let rows = sqlx::query_as::<_, PanelCandidateRow>(
        "SELECT candidate_name, candidate_email, role, recruitment_phase, resume,
                l_2_interviewdate, imocha_report, meeting_link, l_2_interviewtime
         FROM candidate_info
         WHERE prescreening_status = 'Shortlisted'
           AND recruitment_phase = 'L2 Scheduled'
           AND l_2_interviewdate = $1
           AND hr_email = $2",
    )
    .bind(interview_date)
    .bind(hr_email)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
