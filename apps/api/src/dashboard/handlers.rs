use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::dashboard::queries::{self, ChartType};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    #[serde(rename = "chartType")]
    pub chart_type: String,
    #[serde(default = "default_period")]
    pub period: String,
}

fn default_period() -> String {
    "30".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ActivitiesQuery {
    pub limit: Option<i64>,
}

/// GET /api/v1/dashboard/stats
pub async fn handle_stats(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let candidates = queries::candidate_stats(&state.db).await?;
    let total_hr = queries::hr_count(&state.db).await?;
    let total_admins = queries::admin_count(&state.db).await?;
    let total_panels = queries::panel_count(&state.db).await?;
    let recent_activities = queries::recent_activities(&state.db).await?;
    let skill_distribution = queries::skill_distribution(&state.db).await?;
    let phase_distribution = queries::phase_distribution(&state.db).await?;

    Ok(Json(json!({
        "success": true,
        "stats": {
            "candidates": candidates,
            "hr": { "total_hr": total_hr },
            "admins": { "total_admins": total_admins },
            "panels": { "total_panels": total_panels },
            "recentActivities": recent_activities,
            "skillDistribution": skill_distribution,
            "phaseDistribution": phase_distribution,
        }
    })))
}

/// GET /api/v1/dashboard/chart
pub async fn handle_chart(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<Value>, AppError> {
    let chart_type: ChartType = query.chart_type.parse()?;
    let data = match chart_type {
        ChartType::CandidatesByDate => {
            json!(queries::candidates_by_date(&state.db, &query.period).await?)
        }
        ChartType::StatusDistribution => {
            json!(queries::status_chart(&state.db, &query.period).await?)
        }
        ChartType::PhaseDistribution => {
            json!(queries::phase_chart(&state.db, &query.period).await?)
        }
        ChartType::SkillDistribution => {
            json!(queries::skill_chart(&state.db, &query.period).await?)
        }
    };
    Ok(Json(json!({ "success": true, "data": data })))
}

/// GET /api/v1/dashboard/activities
pub async fn handle_activities(
    State(state): State<AppState>,
    Query(query): Query<ActivitiesQuery>,
) -> Result<Json<Value>, AppError> {
    let activities = queries::activities(&state.db, query.limit.unwrap_or(20)).await?;
    Ok(Json(json!({ "success": true, "activities": activities })))
}

/// GET /api/v1/dashboard/quick-stats
pub async fn handle_quick_stats(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let stats = queries::quick_stats(&state.db).await?;
    Ok(Json(json!({ "success": true, "stats": stats })))
}
