use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Feedback a panel member filed on a given interview date.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PanelFeedbackRow {
    pub candidate_email: String,
    pub candidate_name: Option<String>,
    pub interview_date: Option<NaiveDate>,
    pub interviewer_name: Option<String>,
    pub detailed_feedback: Option<String>,
    pub result: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub round_details: String,
    pub position: Option<String>,
}

/// One row of the combined feedback view, drawn from the round forms and
/// the per-stack technical response tables.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CombinedFeedbackRow {
    pub candidate_name: Option<String>,
    pub candidate_email: String,
    pub position: Option<String>,
    pub hr_email: Option<String>,
    pub result: Option<String>,
    pub interview_date: Option<DateTime<Utc>>,
}

/// Engineering-center assignment for a candidate.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EngCenterRow {
    pub eng_center: Option<String>,
    pub role: Option<String>,
}
