use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One configured interview round for a requisition, as stored in
/// `rrf_rounds`. `round_order` is 1-based and ascending; the Fitment Round
/// is always re-slotted to the highest order on save.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RoundRow {
    pub recruitment_rounds: String,
    pub round_order: i32,
}

/// Round definition as submitted by the requisition setup screen.
#[derive(Debug, Clone, Deserialize)]
pub struct RoundInput {
    pub rrf_id: String,
    pub recruitment_rounds: String,
}
