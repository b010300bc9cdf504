//! SQL for candidate intake, listings, scheduling, and RRF bookkeeping.

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::candidate::{
    CandidateProfileRow, CandidateRow, CandidateSummaryRow, L2OutcomeRow, NewCandidate,
    ResumeCountsRow, ScheduleRow, ShortlistedCandidateRow, WeeklyCountRow,
};
use crate::rounds::phase;

pub(crate) const CANDIDATE_COLUMNS: &str =
    "id, candidate_name, candidate_email, prescreening_status, role, \
     recruitment_phase, resume_score, resume, candidate_phone, hr_email, rrf_id, eng_center, \
     additional_skills, content";

/// Inserts a freshly screened candidate and returns the stored row.
pub async fn insert_candidate(
    pool: &PgPool,
    candidate: &NewCandidate,
) -> Result<CandidateRow, AppError> {
    let sql = format!(
        "INSERT INTO candidate_info (
            candidate_name, candidate_email, prescreening_status, role, recruitment_phase,
            resume_score, resume, candidate_phone, hr_email, rrf_id, eng_center,
            additional_skills, content
         )
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
         RETURNING {CANDIDATE_COLUMNS}"
    );

    let row = sqlx::query_as::<_, CandidateRow>(&sql)
        .bind(&candidate.candidate_name)
        .bind(&candidate.candidate_email)
        .bind(&candidate.prescreening_status)
        .bind(&candidate.role)
        .bind(&candidate.recruitment_phase)
        .bind(&candidate.resume_score)
        .bind(&candidate.resume)
        .bind(&candidate.candidate_phone)
        .bind(&candidate.hr_email)
        .bind(&candidate.rrf_id)
        .bind(&candidate.eng_center)
        .bind(&candidate.additional_skills)
        .bind(&candidate.content)
        .fetch_one(pool)
        .await?;

    info!(
        candidate_id = row.id,
        email = %row.candidate_email,
        "candidate stored"
    );
    Ok(row)
}

/// Intake review listing, newest first.
pub async fn list_candidates(pool: &PgPool) -> Result<Vec<CandidateSummaryRow>, AppError> {
    let rows = sqlx::query_as::<_, CandidateSummaryRow>(
        "SELECT id, candidate_name, resume, content, prescreening_status, hr_email,
                rrf_id, eng_center, role
         FROM candidate_info
         ORDER BY id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Folds the latest assessment scores into `candidate_info`: 18 or more
/// qualifies for L2, less rejects in L1. Candidates whose phase already
/// moved past L1 are left alone so a stale score cannot drag them back.
pub async fn refresh_l1_outcomes(pool: &PgPool) -> Result<u64, AppError> {
    let result = sqlx::query(
        "UPDATE candidate_info
         SET l_1_score = ir.score,
             l_1_status = CASE
               WHEN ir.score >= 18 THEN 'qualified in l1'
               WHEN ir.score < 18 THEN 'failed in l1'
               ELSE 'no score available'
             END,
             recruitment_phase = CASE
               WHEN ir.score >= 18 THEN 'Moved to L2'
               WHEN ir.score < 18 THEN 'Rejected in L1'
               ELSE recruitment_phase
             END,
             imocha_report = ir.pdf_report_url
         FROM imocha_results ir
         WHERE candidate_info.candidate_email = ir.candidate_email
           AND candidate_info.prescreening_status = 'Shortlisted'
           AND candidate_info.recruitment_phase NOT IN (
             'Shortlisted in Fitment Round','L2 Technical Round Scheduled',
             'EC Fitment Round Scheduled','Shortlisted in EC Fitment Round',
             'Shortlisted in Client','Fitment Round Scheduled',
             'Project Fitment Round Scheduled','Shortlisted in Project Fitment Round',
             'Client Fitment Round Scheduled','Shortlisted in Client Fitment Round',
             'Shortlisted in L2','Rejected in L2','On Hold in L2',
             'No iMocha Exam','Schedule L2 Technical','Client Round Scheduled',
             'Rejected in Client','Rejected in Client Fitment Round',
             'Rejected in Project Fitment Round','Rejected in Fitment Round'
           )",
    )
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Shortlist view: refreshes L1 outcomes, then returns every shortlisted
/// candidate joined to their assessment result.
pub async fn shortlisted_candidates(
    pool: &PgPool,
) -> Result<Vec<ShortlistedCandidateRow>, AppError> {
    let refreshed = refresh_l1_outcomes(pool).await?;
    if refreshed > 0 {
        info!(rows = refreshed, "L1 outcomes refreshed from assessment results");
    }

    let rows = sqlx::query_as::<_, ShortlistedCandidateRow>(
        "SELECT ci.rrf_id, ci.hr_email, ci.candidate_name, ci.candidate_email,
                ci.prescreening_status, ir.score, ci.l_1_score, ci.role,
                ci.candidate_phone, ci.l_1_status, ci.date, ci.recruitment_phase,
                ir.pdf_report_url AS imocha_report
         FROM candidate_info ci
         LEFT JOIN imocha_results ir ON ci.candidate_email = ir.candidate_email
         WHERE ci.prescreening_status = 'Shortlisted'",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Invite-mail status for one candidate. A row with no status recorded
/// reads the same as a missing candidate.
pub async fn email_status(pool: &PgPool, email: &str) -> Result<Option<String>, AppError> {
    let status = sqlx::query_scalar::<_, Option<String>>(
        "SELECT email_status FROM candidate_info WHERE candidate_email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(status.flatten())
}

pub async fn set_email_status(
    pool: &PgPool,
    email: &str,
    status: &str,
) -> Result<Option<CandidateRow>, AppError> {
    let sql = format!(
        "UPDATE candidate_info SET email_status = $1
         WHERE candidate_email = $2
         RETURNING {CANDIDATE_COLUMNS}"
    );
    let row = sqlx::query_as::<_, CandidateRow>(&sql)
        .bind(status)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Interviewer emails registered for an engineering center.
pub async fn panel_emails(pool: &PgPool, domain: &str) -> Result<Vec<String>, AppError> {
    let emails = sqlx::query_scalar::<_, String>("SELECT email FROM panel_details WHERE account = $1")
        .bind(domain)
        .fetch_all(pool)
        .await?;
    Ok(emails)
}

/// Full per-candidate profile used by the prescreening and feedback
/// screens.
pub async fn candidate_profile(
    pool: &PgPool,
    email: &str,
) -> Result<Option<CandidateProfileRow>, AppError> {
    let row = sqlx::query_as::<_, CandidateProfileRow>(
        "SELECT id, candidate_name, candidate_email, role, rrf_id, hr_email,
                panel_name, l_2_interviewdate, l_1_score, additional_skills
         FROM candidate_info
         WHERE candidate_email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Emails of every candidate who cleared prescreening.
pub async fn shortlisted_emails(pool: &PgPool) -> Result<Vec<String>, AppError> {
    let emails = sqlx::query_scalar::<_, String>(
        "SELECT candidate_email FROM candidate_info WHERE prescreening_status = 'Shortlisted'",
    )
    .fetch_all(pool)
    .await?;
    Ok(emails)
}

/// Records an L2 verdict against the candidate row itself. The phase only
/// moves for the two known verdicts; anything else keeps the current phase.
pub async fn record_l2_outcome(
    pool: &PgPool,
    email: &str,
    feedback: &str,
    result: &str,
) -> Result<Option<L2OutcomeRow>, AppError> {
    let next_phase = phase::l2_phase_for_result(result);
    if next_phase.is_none() {
        warn!(%email, result, "unrecognized L2 result; leaving recruitment phase unchanged");
    }

    let row = sqlx::query_as::<_, L2OutcomeRow>(
        "UPDATE candidate_info
         SET l_2_feedback = $1,
             l_2_status = $2,
             recruitment_phase = COALESCE($3, recruitment_phase)
         WHERE candidate_email = $4
         RETURNING candidate_email, l_2_feedback, l_2_status, recruitment_phase",
    )
    .bind(feedback)
    .bind(result)
    .bind(next_phase)
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Books an interview slot: phase, meeting link, date, time, and panel in
/// one write.
pub async fn schedule_interview(
    pool: &PgPool,
    email: &str,
    status: &str,
    panel: &str,
    date: NaiveDate,
    time: NaiveTime,
    meeting_link: &str,
) -> Result<Option<ScheduleRow>, AppError> {
    let row = sqlx::query_as::<_, ScheduleRow>(
        "UPDATE candidate_info
         SET recruitment_phase = $1,
             meeting_link = $2,
             l_2_interviewdate = $3,
             l_2_interviewtime = $4,
             panel_name = $5
         WHERE candidate_email = $6
         RETURNING candidate_email, recruitment_phase, meeting_link,
                   l_2_interviewdate, l_2_interviewtime, panel_name",
    )
    .bind(status)
    .bind(meeting_link)
    .bind(date)
    .bind(time)
    .bind(panel)
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Every requisition id known to the tracker.
pub async fn rrf_ids(pool: &PgPool) -> Result<Vec<String>, AppError> {
    let ids = sqlx::query_scalar::<_, String>("SELECT DISTINCT rrfid FROM rrf ORDER BY rrfid")
        .fetch_all(pool)
        .await?;
    Ok(ids)
}

/// Bulk-registers requisition ids. Blank entries are skipped and existing
/// ids are left untouched; returns how many rows were actually inserted.
pub async fn upload_rrf_ids(pool: &PgPool, ids: &[String]) -> Result<u64, AppError> {
    let mut inserted = 0;
    for id in ids {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            continue;
        }
        let result = sqlx::query("INSERT INTO rrf (rrfid) VALUES ($1) ON CONFLICT (rrfid) DO NOTHING")
            .bind(trimmed)
            .execute(pool)
            .await?;
        inserted += result.rows_affected();
    }
    info!(total = ids.len(), inserted, "requisition ids uploaded");
    Ok(inserted)
}

/// Intake volume for the current month, bucketed into calendar weeks.
pub async fn weekly_counts(pool: &PgPool) -> Result<Vec<WeeklyCountRow>, AppError> {
    let rows = sqlx::query_as::<_, WeeklyCountRow>(
        "SELECT
           CASE
             WHEN EXTRACT(DAY FROM date) <= 7 THEN 'Week 1'
             WHEN EXTRACT(DAY FROM date) <= 14 THEN 'Week 2'
             WHEN EXTRACT(DAY FROM date) <= 21 THEN 'Week 3'
             ELSE 'Week 4'
           END AS week,
           COUNT(*) AS uploaded,
           COUNT(CASE WHEN prescreening_status = 'Rejected' THEN 1 END) AS rejected,
           COUNT(CASE WHEN prescreening_status = 'Shortlisted' THEN 1 END) AS shortlisted
         FROM candidate_info
         WHERE date IS NOT NULL
           AND EXTRACT(MONTH FROM date) = EXTRACT(MONTH FROM CURRENT_DATE)
           AND EXTRACT(YEAR FROM date) = EXTRACT(YEAR FROM CURRENT_DATE)
         GROUP BY 1
         ORDER BY MIN(CASE
             WHEN EXTRACT(DAY FROM date) <= 7 THEN 1
             WHEN EXTRACT(DAY FROM date) <= 14 THEN 2
             WHEN EXTRACT(DAY FROM date) <= 21 THEN 3
             ELSE 4
           END)",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Totals across the whole intake pipeline.
pub async fn resume_counts(pool: &PgPool) -> Result<ResumeCountsRow, AppError> {
    let row = sqlx::query_as::<_, ResumeCountsRow>(
        "SELECT COUNT(*) AS total_resumes,
                COUNT(CASE WHEN prescreening_status = 'Rejected' THEN 1 END) AS rejected_count,
                COUNT(CASE WHEN prescreening_status = 'Shortlisted' THEN 1 END) AS shortlisted_count
         FROM candidate_info",
    )
    .fetch_one(pool)
    .await?;
    Ok(row)
}
