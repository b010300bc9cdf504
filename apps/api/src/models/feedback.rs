use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// A row of the general `feedbackform` table, keyed by
/// (candidate_email, round_details).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FeedbackFormRow {
    pub round_details: String,
    pub candidate_email: String,
    pub imocha_score: Option<f64>,
    pub rrf_id: Option<String>,
    pub position: Option<String>,
    pub candidate_name: Option<String>,
    pub interview_date: Option<NaiveDate>,
    pub interviewer_name: Option<String>,
    pub hr_email: Option<String>,
    pub detailed_feedback: Option<String>,
    pub result: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub organizational_fitment: Option<String>,
    pub customer_communication: Option<String>,
    pub continuous_learning: Option<String>,
    pub attitude_personality: Option<String>,
    pub communication_skills: Option<String>,
    pub project_fitment: Option<String>,
}

/// Payload of the general round feedback form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundFeedbackForm {
    pub candidate_email: String,
    pub imocha_score: Option<f64>,
    pub rrf_id: Option<String>,
    pub position: Option<String>,
    pub candidate_name: Option<String>,
    pub interview_date: Option<NaiveDate>,
    pub interviewer_name: Option<String>,
    pub hr_email: Option<String>,
    pub detailed_feedback: Option<String>,
    pub result: Option<String>,
    pub organizational_fitment: Option<String>,
    pub customer_communication: Option<String>,
    pub continuous_learning: Option<String>,
    pub attitude_personality: Option<String>,
    pub communication_skills: Option<String>,
    pub project_fitment: Option<String>,
}

/// Payload of a technical (L2 or fullstack) feedback submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalFeedback {
    pub candidate_email: String,
    pub responses: Value,
    pub detailed_feedback: Option<String>,
    pub result: String,
}

/// Stored technical feedback as read back for prefill.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TechFeedbackRow {
    pub responses: Value,
    pub overall_feedback: Option<String>,
    pub result: Option<String>,
}

/// A skill row from an L2 / fullstack question table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SkillQuestionRow {
    pub id: i32,
    pub skill_category: String,
    pub skill_description: Option<String>,
    pub is_top_skill: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A question row from a prescreening questionnaire table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PrescreeningQuestionRow {
    pub id: i32,
    pub question_text: String,
    pub mandatory_for_candidates: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Payload of an engineering-center prescreening feedback submission.
/// Missing sections arrive as empty objects, matching what the screening
/// form sends when a section is skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct EcFeedback {
    #[serde(rename = "candidateEmail")]
    pub candidate_email: String,
    pub number_of_years_or_months: Vec<Value>,
    pub detailed_feedback: Option<String>,
    #[serde(default = "empty_object")]
    pub introduction_to_valuemomentum: Value,
    #[serde(default = "empty_object")]
    pub introduction_of_cloud_app_engineering: Value,
    #[serde(default = "empty_object")]
    pub introduction_to_roles_responsibilities: Value,
    #[serde(default = "empty_object")]
    pub did_candidate_qualify_using_pre_screening_qs: Value,
    #[serde(default)]
    pub current_ctc: String,
    #[serde(default)]
    pub expected_ctc: String,
    #[serde(default)]
    pub notice_period: String,
    #[serde(default = "empty_object")]
    pub offer_in_hand: Value,
    #[serde(default)]
    pub status: String,
}

/// A stored EC screening response. The extended screening columns exist
/// only on the application-EC tables; reads from the cloud tables leave
/// them unset and they are dropped from the JSON.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EcFeedbackRow {
    pub candidate_id: i32,
    pub number_of_years_or_months: Option<Value>,
    pub detailed_feedback: Option<String>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub introduction_to_valuemomentum: Option<Value>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub introduction_of_cloud_app_engineering: Option<Value>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub introduction_to_roles_responsibilities: Option<Value>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub did_candidate_qualify_using_pre_screening_qs: Option<Value>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_ctc: Option<String>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_ctc: Option<String>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice_period: Option<String>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_in_hand: Option<Value>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub updated_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Final feedback aggregation
// ────────────────────────────────────────────────────────────────────────────

/// Prescreening block of the final feedback view.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PrescreeningSummary {
    pub prescreening_status: Option<String>,
    pub hr_email: Option<String>,
    pub feedback: Option<String>,
}

/// One completed round from `feedbackform` in the final feedback view.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RoundResultRow {
    pub result: Option<String>,
    pub detailed_feedback: Option<String>,
    pub round_details: Option<String>,
    pub interviewer_name: Option<String>,
}

/// The L2 technical block of the final feedback view.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TechResultRow {
    pub result: Option<String>,
    pub overall_feedback: Option<String>,
    pub interviewer_name: Option<String>,
}

/// Everything the final feedback screen shows for one candidate.
#[derive(Debug, Clone, Serialize)]
pub struct FinalFeedback {
    pub prescreening: PrescreeningSummary,
    pub feedback: Vec<RoundResultRow>,
    #[serde(rename = "l2Technical")]
    pub l2_technical: Option<TechResultRow>,
}
