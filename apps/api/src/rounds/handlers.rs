use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::rounds::RoundInput;
use crate::rounds::{progression, registry};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SaveRoundsRequest {
    pub rounds: Vec<RoundInput>,
}

#[derive(Deserialize)]
pub struct RoundsQuery {
    pub rrf_id: String,
}

#[derive(Deserialize)]
pub struct NextRoundQuery {
    pub rrf_id: String,
    pub recruitment_phase: String,
}

/// POST /api/v1/rounds/save
pub async fn handle_save_rounds(
    State(state): State<AppState>,
    Json(req): Json<SaveRoundsRequest>,
) -> Result<Json<Value>, AppError> {
    let inserted = registry::save_rounds(&state.db, &req.rounds).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Rounds added successfully",
        "inserted": inserted
    })))
}

/// GET /api/v1/rounds
pub async fn handle_get_rounds(
    State(state): State<AppState>,
    Query(params): Query<RoundsQuery>,
) -> Result<Json<Value>, AppError> {
    let rounds = registry::get_rounds(&state.db, &params.rrf_id).await?;
    Ok(Json(json!({ "success": true, "rounds": rounds })))
}

/// GET /api/v1/rounds/next
pub async fn handle_next_round(
    State(state): State<AppState>,
    Query(params): Query<NextRoundQuery>,
) -> Result<Json<Value>, AppError> {
    let next =
        progression::next_round(&state.db, &params.rrf_id, &params.recruitment_phase).await?;
    Ok(Json(json!({ "nextRound": next })))
}
