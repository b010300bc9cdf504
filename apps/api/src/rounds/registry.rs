use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::rounds::{RoundInput, RoundRow};

fn is_fitment(round_name: &str) -> bool {
    round_name.eq_ignore_ascii_case("fitment round")
}

/// The insert work a `save_rounds` call will perform: new non-Fitment
/// rounds with their assigned orders, plus whether a Fitment Round must be
/// re-slotted to the end.
#[derive(Debug, PartialEq)]
pub struct RoundPlan {
    pub new_rounds: Vec<(String, i32)>,
    pub has_fitment: bool,
}

/// Plans inserts against a snapshot of the currently configured rounds.
///
/// Fitment entries are split out and handled separately. A non-Fitment
/// entry already present for the requisition is skipped; new entries get
/// orders continuing from the count of existing non-Fitment rounds. The
/// count base (rather than the max order) is load-bearing: downstream
/// screens assume orders assigned this way, including the collisions it
/// produces after a manual row deletion.
pub fn plan_round_inserts(existing: &[RoundRow], inputs: &[RoundInput]) -> RoundPlan {
    let mut has_fitment = false;
    let mut new_rounds = Vec::new();

    let mut order = existing
        .iter()
        .filter(|r| !is_fitment(&r.recruitment_rounds))
        .count() as i32;

    for input in inputs {
        if is_fitment(&input.recruitment_rounds) {
            has_fitment = true;
            continue;
        }
        if existing
            .iter()
            .any(|r| r.recruitment_rounds == input.recruitment_rounds)
        {
            continue;
        }
        order += 1;
        new_rounds.push((input.recruitment_rounds.clone(), order));
    }

    RoundPlan {
        new_rounds,
        has_fitment,
    }
}

/// Saves a batch of round definitions for one requisition. All entries are
/// expected to carry the same `rrf_id`; the first entry's id governs.
///
/// The whole operation, including the Fitment delete-and-reinsert that
/// keeps "Fitment Round" sorted last, runs in a single transaction, so a
/// crash can never leave a requisition temporarily missing its Fitment
/// row. Returns the number of inserted non-Fitment rounds; an empty batch
/// is a no-op.
pub async fn save_rounds(pool: &PgPool, rounds: &[RoundInput]) -> Result<usize, AppError> {
    let Some(first) = rounds.first() else {
        return Ok(0);
    };
    let rrf_id = first.rrf_id.as_str();

    let mut tx = pool.begin().await?;

    let existing: Vec<RoundRow> = sqlx::query_as(
        "SELECT recruitment_rounds, round_order FROM rrf_rounds WHERE rrf_id = $1 ORDER BY round_order ASC",
    )
    .bind(rrf_id)
    .fetch_all(&mut *tx)
    .await?;

    let plan = plan_round_inserts(&existing, rounds);

    for (name, order) in &plan.new_rounds {
        sqlx::query(
            "INSERT INTO rrf_rounds (rrf_id, recruitment_rounds, round_order) VALUES ($1, $2, $3)",
        )
        .bind(rrf_id)
        .bind(name)
        .bind(order)
        .execute(&mut *tx)
        .await?;
    }

    if plan.has_fitment {
        sqlx::query(
            "DELETE FROM rrf_rounds WHERE rrf_id = $1 AND LOWER(recruitment_rounds) = 'fitment round'",
        )
        .bind(rrf_id)
        .execute(&mut *tx)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rrf_rounds WHERE rrf_id = $1")
            .bind(rrf_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO rrf_rounds (rrf_id, recruitment_rounds, round_order) VALUES ($1, 'Fitment Round', $2)",
        )
        .bind(rrf_id)
        .bind(total as i32 + 1)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(
        "Saved rounds for rrf {rrf_id}: {} new, fitment re-slotted: {}",
        plan.new_rounds.len(),
        plan.has_fitment
    );
    Ok(plan.new_rounds.len())
}

/// Returns the configured rounds for a requisition in walk order. An
/// unconfigured requisition yields an empty list, not an error.
pub async fn get_rounds(pool: &PgPool, rrf_id: &str) -> Result<Vec<RoundRow>, AppError> {
    Ok(sqlx::query_as::<_, RoundRow>(
        "SELECT recruitment_rounds, round_order FROM rrf_rounds WHERE rrf_id = $1 ORDER BY round_order ASC",
    )
    .bind(rrf_id)
    .fetch_all(pool)
    .await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, order: i32) -> RoundRow {
        RoundRow {
            recruitment_rounds: name.to_string(),
            round_order: order,
        }
    }

    fn input(name: &str) -> RoundInput {
        RoundInput {
            rrf_id: "RRF001".to_string(),
            recruitment_rounds: name.to_string(),
        }
    }

    #[test]
    fn test_fitment_split_out_of_inserts() {
        let plan = plan_round_inserts(&[], &[input("L2 Technical"), input("Fitment Round")]);
        assert!(plan.has_fitment);
        assert_eq!(plan.new_rounds, vec![("L2 Technical".to_string(), 1)]);
    }

    #[test]
    fn test_fitment_detection_is_case_insensitive() {
        let plan = plan_round_inserts(&[], &[input("FITMENT ROUND")]);
        assert!(plan.has_fitment);
        assert!(plan.new_rounds.is_empty());
    }

    #[test]
    fn test_existing_round_skipped() {
        let existing = [row("L2 Technical", 1)];
        let plan = plan_round_inserts(&existing, &[input("L2 Technical"), input("EC Fitment")]);
        assert_eq!(plan.new_rounds, vec![("EC Fitment".to_string(), 2)]);
    }

    #[test]
    fn test_resave_of_same_batch_plans_nothing_new() {
        let existing = [row("L2 Technical", 1), row("EC Fitment", 2), row("Fitment Round", 3)];
        let plan = plan_round_inserts(
            &existing,
            &[input("L2 Technical"), input("EC Fitment"), input("Fitment Round")],
        );
        assert!(plan.new_rounds.is_empty());
        // Fitment still gets re-slotted to the end on every save.
        assert!(plan.has_fitment);
    }

    #[test]
    fn test_order_continues_from_non_fitment_count() {
        let existing = [row("L1 iMocha", 1), row("L2 Technical", 2), row("Fitment Round", 3)];
        let plan = plan_round_inserts(&existing, &[input("EC Fitment")]);
        assert_eq!(plan.new_rounds, vec![("EC Fitment".to_string(), 3)]);
    }

    #[test]
    fn test_count_base_collides_after_manual_deletion() {
        // With a hole in the sequence (order 2 deleted by hand), the count
        // base assigns an order that already exists. Pinned: changing this
        // to a max base would renumber rounds under existing requisitions.
        let existing = [row("L1 iMocha", 1), row("Client", 3)];
        let plan = plan_round_inserts(&existing, &[input("EC Fitment")]);
        assert_eq!(plan.new_rounds, vec![("EC Fitment".to_string(), 3)]);
    }

    #[test]
    fn test_duplicate_names_within_batch_both_planned() {
        // Dedupe only checks stored rounds, not the batch itself.
        let plan = plan_round_inserts(&[], &[input("L2 Technical"), input("L2 Technical")]);
        assert_eq!(
            plan.new_rounds,
            vec![("L2 Technical".to_string(), 1), ("L2 Technical".to_string(), 2)]
        );
    }

    #[test]
    fn test_empty_batch_plans_nothing() {
        let plan = plan_round_inserts(&[], &[]);
        assert!(plan.new_rounds.is_empty());
        assert!(!plan.has_fitment);
    }
}
