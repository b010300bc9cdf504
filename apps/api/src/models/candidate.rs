use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A candidate as stored in `candidate_info`, in the shape returned by
/// intake and by id lookups.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: i32,
    pub candidate_name: String,
    pub candidate_email: String,
    pub prescreening_status: Option<String>,
    pub role: Option<String>,
    pub recruitment_phase: Option<String>,
    pub resume_score: Option<String>,
    pub resume: Option<String>,
    pub candidate_phone: Option<String>,
    pub hr_email: Option<String>,
    pub rrf_id: Option<String>,
    pub eng_center: Option<String>,
    pub additional_skills: Option<String>,
    pub content: Option<String>,
}

/// Payload for candidate intake. `resume` and `content` are stored opaquely;
/// scoring them is out of scope for this service.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCandidate {
    pub candidate_name: String,
    pub candidate_email: String,
    pub prescreening_status: Option<String>,
    pub role: Option<String>,
    pub recruitment_phase: Option<String>,
    pub resume_score: Option<String>,
    pub resume: Option<String>,
    pub candidate_phone: Option<String>,
    pub hr_email: Option<String>,
    pub rrf_id: Option<String>,
    pub eng_center: Option<String>,
    pub additional_skills: Option<String>,
    pub content: Option<String>,
}

/// Intake review listing (one row per uploaded resume).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CandidateSummaryRow {
    pub id: i32,
    pub candidate_name: String,
    pub resume: Option<String>,
    pub content: Option<String>,
    pub prescreening_status: Option<String>,
    pub hr_email: Option<String>,
    pub rrf_id: Option<String>,
    pub eng_center: Option<String>,
    pub role: Option<String>,
}

/// Shortlist view row: candidate joined to the latest iMocha result.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ShortlistedCandidateRow {
    pub rrf_id: Option<String>,
    pub hr_email: Option<String>,
    pub candidate_name: String,
    pub candidate_email: String,
    pub prescreening_status: Option<String>,
    pub score: Option<i32>,
    pub l_1_score: Option<i32>,
    pub role: Option<String>,
    pub candidate_phone: Option<String>,
    pub l_1_status: Option<String>,
    pub date: Option<NaiveDate>,
    pub recruitment_phase: Option<String>,
    pub imocha_report: Option<String>,
}

/// Per-candidate detail used by the interview tooling.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CandidateProfileRow {
    pub id: i32,
    pub candidate_name: String,
    pub candidate_email: String,
    pub role: Option<String>,
    pub rrf_id: Option<String>,
    pub hr_email: Option<String>,
    pub panel_name: Option<String>,
    pub l_2_interviewdate: Option<NaiveDate>,
    pub l_1_score: Option<i32>,
    pub additional_skills: Option<String>,
}

/// Candidate fields a feedback submission resolves before it writes
/// anything, including the phase observed at transaction start.
#[derive(Debug, Clone, FromRow)]
pub struct CandidateRef {
    pub id: i32,
    pub hr_email: Option<String>,
    pub panel_name: Option<String>,
    pub recruitment_phase: Option<String>,
}

/// Columns touched by an L2 outcome write, echoed back to the caller.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct L2OutcomeRow {
    pub candidate_email: String,
    pub l_2_feedback: Option<String>,
    pub l_2_status: Option<String>,
    pub recruitment_phase: Option<String>,
}

/// Columns touched by interview scheduling, echoed back to the caller.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ScheduleRow {
    pub candidate_email: String,
    pub recruitment_phase: Option<String>,
    pub meeting_link: Option<String>,
    pub l_2_interviewdate: Option<NaiveDate>,
    pub l_2_interviewtime: Option<NaiveTime>,
    pub panel_name: Option<String>,
}

/// Interview-day row for panel and HR views.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PanelCandidateRow {
    pub candidate_name: String,
    pub candidate_email: String,
    pub role: Option<String>,
    pub recruitment_phase: Option<String>,
    pub resume: Option<String>,
    pub l_2_interviewdate: Option<NaiveDate>,
    pub imocha_report: Option<String>,
    pub meeting_link: Option<String>,
    pub l_2_interviewtime: Option<NaiveTime>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WeeklyCountRow {
    pub week: String,
    pub uploaded: i64,
    pub rejected: i64,
    pub shortlisted: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ResumeCountsRow {
    pub total_resumes: i64,
    pub rejected_count: i64,
    pub shortlisted_count: i64,
}
