//! iMocha API client. The single point of entry for all iMocha calls;
//! no other module talks to the vendor directly.

use chrono::NaiveDate;
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::errors::AppError;

pub mod handlers;
pub mod results;

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum ImochaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("iMocha API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },
}

impl ImochaError {
    /// True when the terminal failure was the vendor rate limit, so a later
    /// sync cycle is expected to succeed without intervention.
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            ImochaError::RateLimited { .. } | ImochaError::Api { status: 429, .. }
        )
    }
}

impl From<ImochaError> for AppError {
    fn from(err: ImochaError) -> Self {
        AppError::Imocha(err.to_string())
    }
}

/// Invite payload accepted from our callers and forwarded to iMocha.
/// `invite_id` and `role` steer the call and are stripped from the
/// outbound body; the flag fields go through untyped because the vendor
/// is loose about their spelling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteRequest {
    #[serde(default, skip_serializing)]
    pub invite_id: Option<i64>,
    #[serde(default, skip_serializing)]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_email: Option<Value>,
    #[serde(rename = "callbackURL", skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(rename = "redirectURL", skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_mandatory_fields: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_instruction: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc_email: Option<String>,
}

/// Date window for the completed-attempts listing. Open ends are omitted
/// from the request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultsWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct AttemptsBody {
    #[serde(rename = "testId")]
    test_id: i64,
    #[serde(rename = "StartDateTime", skip_serializing_if = "Option::is_none")]
    start_date_time: Option<String>,
    #[serde(rename = "EndDateTime", skip_serializing_if = "Option::is_none")]
    end_date_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AttemptsEnvelope {
    result: Option<AttemptsResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttemptsResult {
    test_attempts: Option<Vec<TestAttempt>>,
}

/// One completed test attempt, as listed by the attempts endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestAttempt {
    pub test_invitation_id: i64,
}

/// Scored report for one invitation, in the shape the reports endpoint
/// returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImochaReport {
    pub candidate_email: String,
    pub score: Option<i32>,
    pub total_test_points: Option<i32>,
    pub score_percentage: Option<f64>,
    pub performance_category: Option<String>,
    pub test_name: Option<String>,
    pub pdf_report_url: Option<String>,
    pub attempted_on: Option<chrono::DateTime<chrono::Utc>>,
}

/// The iMocha HTTP client shared by all handlers.
/// Retries rate limits and server errors with exponential backoff.
#[derive(Clone)]
pub struct ImochaClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ImochaClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            api_key,
        }
    }

    /// Sends a test invite and returns the vendor response verbatim.
    pub async fn invite(
        &self,
        invite_id: i64,
        request: &InviteRequest,
    ) -> Result<Value, ImochaError> {
        let url = format!("{}/tests/{}/invite", self.base_url, invite_id);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(invite_id, status = status.as_u16(), "iMocha rejected the invite");
            return Err(ImochaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let data = response.json::<Value>().await?;
        info!(invite_id, "iMocha invite sent");
        Ok(data)
    }

    /// Lists completed attempts for one test within the window. A 404 means
    /// the test has no completed attempts and yields an empty list; 429 and
    /// server errors are retried with backoff and jitter.
    pub async fn test_attempts(
        &self,
        test_id: i64,
        window: ResultsWindow,
    ) -> Result<Vec<TestAttempt>, ImochaError> {
        let url = format!("{}/candidates/testattempts?state=completed", self.base_url);
        let body = AttemptsBody {
            test_id,
            start_date_time: window.start.map(|d| format!("{d}T00:00:00Z")),
            end_date_time: window.end.map(|d| format!("{d}T23:59:59Z")),
        };

        let mut last_error: Option<ImochaError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let jitter = rand::thread_rng().gen_range(0..1000);
                let delay =
                    std::time::Duration::from_millis(1000 * (1 << (attempt - 1)) + jitter);
                warn!(
                    test_id,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "retrying attempts fetch"
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(&url)
                .header("x-api-key", &self.api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(ImochaError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 404 {
                debug!(test_id, "no completed attempts");
                return Ok(Vec::new());
            }

            if status.as_u16() == 429 || status.is_server_error() {
                let message = response.text().await.unwrap_or_default();
                warn!(test_id, status = status.as_u16(), "attempts fetch throttled");
                last_error = Some(ImochaError::Api {
                    status: status.as_u16(),
                    message,
                });
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(ImochaError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let envelope = response.json::<AttemptsEnvelope>().await?;
            let attempts = envelope
                .result
                .and_then(|r| r.test_attempts)
                .unwrap_or_default();
            debug!(test_id, count = attempts.len(), "fetched completed attempts");
            return Ok(attempts);
        }

        Err(last_error.unwrap_or(ImochaError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    /// Fetches the scored report for one invitation. Any failure is logged
    /// and collapses to `None` so a bad report never sinks a sync pass.
    pub async fn report(&self, invitation_id: i64) -> Option<ImochaReport> {
        let url = format!("{}/reports/{}", self.base_url, invitation_id);

        let response = match self
            .client
            .get(&url)
            .header("x-api-key", &self.api_key)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(invitation_id, error = %e, "report fetch failed");
                return None;
            }
        };

        if !response.status().is_success() {
            debug!(
                invitation_id,
                status = response.status().as_u16(),
                "no report for invitation"
            );
            return None;
        }

        match response.json::<ImochaReport>().await {
            Ok(report) => Some(report),
            Err(e) => {
                warn!(invitation_id, error = %e, "report parse failed");
                None
            }
        }
    }
}

/// Invite id for a role, used when a caller names the role instead of the
/// test. Roles absent here have no standing L1 test.
pub fn role_invite_id(role: &str) -> Option<i64> {
    let id = match role {
        "Junior Azure DevOps Engineer" => 1292765,
        "Senior Azure DevOps Engineer" => 1292976,
        "Junior AWS DevOps Engineer" => 1292733,
        "Senior AWS DevOps Engineer" => 1292950,
        "Junior Azure Platform Engineer" => 1292775,
        "Junior AWS Platform Engineer" => 1292769,
        "Senior AWS Platform Engineer" => 1292990,
        "Lead AWS Platform Engineer" => 1295883,
        "Junior Azure Cloudops Engineer" => 1292781,
        "Junior AWS Cloudops Engineer" => 1292779,
        "AWS Data Engineer" => 1303946,
        "Azure Data Engineer" => 1293813,
        "Databricks Data Engineer" => 1293971,
        "Hadoop Data Engineer" => 1263132,
        "DataStage Data Engineer" => 1304065,
        "IBM MDM Data Engineer" => 1233151,
        "ETL Data Engineer" => 1294495,
        "Oracle Data Engineer" => 1302835,
        "IDMC Data Engineer" => 1294495,
        "Marklogic Data Engineer" => 1304066,
        "SQL Data Engineer" => 1304100,
        "Snowflake Data Engineer" => 1292173,
        "SSIS Data Engineer" => 1293822,
        "Power BI Data – BI Visualization Engineer" => 1303985,
        "Tableau Data – BI Visualization Engineer" => 1303999,
        "WebFOCUS Data – BI Visualization Engineer" => 1304109,
        "DataAnalyst" => 1304111,
        "Data Modeller" => 1304149,
        "Junior .Net Cloud Native Application Engineer - Backend" => 1304441,
        "Senior .Net Cloud Native Application Engineer - Backend" => 1228695,
        "Junior Java Cloud Native Application Engineer - Backend" => 1302022,
        "Senior Java Cloud Native Application Engineer - Backend" => 1228712,
        "Junior Angular Cloud Native Application Engineer - Frontend" => 1228715,
        "Senior Angular Cloud Native Application Engineer - Frontend" => 1228781,
        "Junior React Cloud Native Application Engineer - Frontend" => 1288123,
        "Senior React Cloud Native Application Engineer - Frontend" => 1228784,
        "Junior Java Angular Cloud Native Application Engineer - Full Stack" => 1228718,
        "Senior Java Angular Cloud Native Application Engineer - Full Stack" => 1228721,
        "Junior Java React Cloud Native Application Engineer - Full Stack" => 1228724,
        "Senior Java React Cloud Native Application Engineer - Full Stack" => 1228727,
        "Junior .Net Angular Cloud Native Application Engineer - Full Stack" => 1228730,
        "Senior .Net Angular Cloud Native Application Engineer - Full Stack" => 1228733,
        "Junior .Net React Cloud Native Application Engineer - Full Stack" => 1228736,
        "Senior .Net React Cloud Native Application Engineer - Full Stack" => 1228739,
        "Junior Mendix Cloud Native Application Engineer - Low Code" => 1228742,
        "Senior Mendix Cloud Native Application Engineer - Low Code" => 1228745,
        _ => return None,
    };
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_invite_id_known_roles() {
        assert_eq!(
            role_invite_id("Junior Java Cloud Native Application Engineer - Backend"),
            Some(1302022)
        );
        assert_eq!(role_invite_id("Senior Azure DevOps Engineer"), Some(1292976));
        assert_eq!(role_invite_id("Data Modeller"), Some(1304149));
    }

    #[test]
    fn test_role_invite_id_unknown_role() {
        assert_eq!(role_invite_id("Staff Cobol Engineer"), None);
        assert_eq!(role_invite_id(""), None);
    }

    #[test]
    fn test_role_invite_id_is_case_sensitive() {
        assert_eq!(role_invite_id("junior azure devops engineer"), None);
    }

    #[test]
    fn test_rate_limit_classification() {
        let limited = ImochaError::RateLimited { retries: 3 };
        assert!(limited.is_rate_limited());

        let throttled = ImochaError::Api {
            status: 429,
            message: "slow down".to_string(),
        };
        assert!(throttled.is_rate_limited());

        let denied = ImochaError::Api {
            status: 403,
            message: "bad key".to_string(),
        };
        assert!(!denied.is_rate_limited());
    }

    #[test]
    fn test_invite_request_strips_routing_fields() {
        let request = InviteRequest {
            invite_id: Some(1302022),
            role: Some("ignored".to_string()),
            email: Some("dev@example.com".to_string()),
            name: Some("Dev".to_string()),
            send_email: Some(serde_json::json!("yes")),
            callback_url: None,
            redirect_url: None,
            disable_mandatory_fields: None,
            hide_instruction: None,
            cc_email: None,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("inviteId").is_none());
        assert!(body.get("role").is_none());
        assert!(body.get("callbackURL").is_none());
        assert_eq!(body["email"], "dev@example.com");
        assert_eq!(body["sendEmail"], "yes");
    }
}
