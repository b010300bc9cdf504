//! Read-side aggregation for the final feedback screen: prescreening
//! verdict, every recorded round, and the L2 technical block in one
//! response.

use sqlx::PgPool;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::feedback::{FinalFeedback, PrescreeningSummary, RoundResultRow, TechResultRow};

/// EC prescreening response table for a position, resolved by ordered
/// substring match. Note the .NET arm matches ".net" only; SRE roles are
/// matched through "site".
fn ec_response_table(position: &str) -> Option<&'static str> {
    let pos = position.to_lowercase();
    if pos.contains("java") {
        Some("app_ec_java_feedback_response")
    } else if pos.contains(".net") {
        Some("app_ec_dotnet_feedback_response")
    } else if pos.contains("cloudops") {
        Some("cloud_ec_cloudops_feedback_response")
    } else if pos.contains("devops") {
        Some("cloud_ec_devops_feedback_response")
    } else if pos.contains("platform") {
        Some("cloud_ec_platform_feedback_response")
    } else if pos.contains("site") {
        Some("cloud_ec_site_feedback_response")
    } else {
        None
    }
}

/// L2 technical response table for a position. `None` sends the caller to
/// the round-form fallback.
fn l2_response_table(position: &str) -> Option<&'static str> {
    let pos = position.to_lowercase();
    if pos.contains("java") {
        Some("app_java_l2_feedback_response")
    } else if pos.contains(".net") {
        Some("app_dotnet_l2_feedback_response")
    } else if pos.contains("cloudops") {
        Some("cloud_cloudops_l2_feedback_response")
    } else if pos.contains("devops") {
        Some("cloud_devops_l2_feedback_response")
    } else if pos.contains("platform") {
        Some("cloud_platform_l2_feedback_response")
    } else if pos.contains("site") {
        Some("cloud_site_l2_feedback_response")
    } else {
        None
    }
}

/// Assembles the final feedback view for one candidate. Returns `NotFound`
/// only when every source comes back empty.
pub async fn final_feedback(
    pool: &PgPool,
    candidate_email: &str,
    candidate_id: i32,
    position: &str,
) -> Result<FinalFeedback, AppError> {
    let mut prescreening = PrescreeningSummary::default();
    let mut has_prescreening = false;

    let candidate = sqlx::query_as::<_, (Option<String>, Option<String>)>(
        "SELECT prescreening_status, hr_email FROM candidate_info WHERE candidate_email = $1",
    )
    .bind(candidate_email)
    .fetch_optional(pool)
    .await?;

    if let Some((status, hr_email)) = candidate {
        prescreening.prescreening_status = status;
        prescreening.hr_email = hr_email;
        has_prescreening = true;
    }

    // A missing or malformed EC table must not sink the rest of the view.
    if let Some(table) = ec_response_table(position) {
        let sql = format!("SELECT detailed_feedback FROM {table} WHERE candidate_id = $1");
        match sqlx::query_scalar::<_, Option<String>>(&sql)
            .bind(candidate_id)
            .fetch_optional(pool)
            .await
        {
            Ok(Some(detailed)) => {
                prescreening.feedback = detailed;
                has_prescreening = true;
            }
            Ok(None) => {}
            Err(e) => error!(table, "prescreening feedback lookup failed: {e}"),
        }
    } else {
        info!(position, "position matches no prescreening track");
    }

    let rounds = sqlx::query_as::<_, RoundResultRow>(
        "SELECT result, detailed_feedback, round_details, interviewer_name
         FROM feedbackform
         WHERE candidate_email = $1",
    )
    .bind(candidate_email)
    .fetch_all(pool)
    .await?;

    let l2_technical = match l2_response_table(position) {
        Some(table) => {
            let sql = format!(
                "SELECT result, overall_feedback, interviewer_name
                 FROM {table}
                 WHERE candidate_id = $1"
            );
            sqlx::query_as::<_, TechResultRow>(&sql)
                .bind(candidate_id)
                .fetch_optional(pool)
                .await?
        }
        None => {
            sqlx::query_as::<_, TechResultRow>(
                "SELECT result, detailed_feedback AS overall_feedback, interviewer_name
                 FROM feedbackform
                 WHERE candidate_email = $1
                 LIMIT 1",
            )
            .bind(candidate_email)
            .fetch_optional(pool)
            .await?
        }
    };

    if !has_prescreening && rounds.is_empty() && l2_technical.is_none() {
        return Err(AppError::NotFound(
            "No data found for this email".to_string(),
        ));
    }

    Ok(FinalFeedback {
        prescreening,
        feedback: rounds,
        l2_technical,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ec_table_resolution() {
        assert_eq!(
            ec_response_table("Senior Java Engineer"),
            Some("app_ec_java_feedback_response")
        );
        assert_eq!(
            ec_response_table(".NET Developer"),
            Some("app_ec_dotnet_feedback_response")
        );
        assert_eq!(
            ec_response_table("Site Reliability Engineer"),
            Some("cloud_ec_site_feedback_response")
        );
        assert_eq!(ec_response_table("Mendix Consultant"), None);
    }

    #[test]
    fn test_ec_dotnet_requires_dot_net_spelling() {
        // Unlike the technical-track resolver, the EC arm only knows the
        // ".net" spelling.
        assert_eq!(ec_response_table("dotnet developer"), None);
    }

    #[test]
    fn test_l2_table_resolution() {
        assert_eq!(
            l2_response_table("Java Backend"),
            Some("app_java_l2_feedback_response")
        );
        assert_eq!(
            l2_response_table("CloudOps Engineer"),
            Some("cloud_cloudops_l2_feedback_response")
        );
        assert_eq!(l2_response_table("Business Analyst"), None);
    }

    #[test]
    fn test_cloudops_beats_devops_ordering() {
        // "cloudops" is checked before "devops"; a role naming both still
        // resolves to the cloudops tables.
        assert_eq!(
            l2_response_table("cloudops/devops engineer"),
            Some("cloud_cloudops_l2_feedback_response")
        );
    }
}
