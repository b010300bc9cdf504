use sqlx::PgPool;
use tracing::warn;

use crate::errors::AppError;
use crate::models::rounds::RoundRow;
use crate::rounds::registry;

/// Maps a candidate's current phase onto the round name it corresponds to
/// in the registry. Phases produced by pass verdicts carry a "Shortlisted
/// in" prefix and abbreviated round names; everything else (typically a
/// "<Round> Scheduled" label cleaned by the caller, or the round name
/// itself) passes through unchanged.
pub fn canonical_round(recruitment_phase: &str) -> &str {
    match recruitment_phase {
        "Shortlisted in L2" => "L2 Technical",
        "Shortlisted in EC Fitment Round" => "EC Fitment",
        "Shortlisted in Project Fitment Round" => "Project Fitment",
        "Shortlisted in Client Fitment Round" => "Client Fitment",
        "Shortlisted in Client" => "Client",
        other => other,
    }
}

/// Pure walk over an ordered round list: the entry after the one matching
/// the canonicalized phase, if any.
pub fn next_round_in<'a>(rounds: &'a [RoundRow], recruitment_phase: &str) -> Option<&'a str> {
    let current = canonical_round(recruitment_phase);
    let idx = rounds
        .iter()
        .position(|r| r.recruitment_rounds == current)?;
    rounds.get(idx + 1).map(|r| r.recruitment_rounds.as_str())
}

/// Resolves the next configured round for a candidate on a requisition.
///
/// Returns `Ok(None)` when the requisition has no rounds configured, when
/// the phase matches no configured round (logged, since it usually means a
/// data-entry mismatch), or when the matched round is the last one.
pub async fn next_round(
    pool: &PgPool,
    rrf_id: &str,
    recruitment_phase: &str,
) -> Result<Option<String>, AppError> {
    let rounds = registry::get_rounds(pool, rrf_id).await?;

    if rounds.is_empty() {
        return Ok(None);
    }

    let current = canonical_round(recruitment_phase);
    if !rounds.iter().any(|r| r.recruitment_rounds == current) {
        warn!("Phase {recruitment_phase:?} matches no configured round for rrf {rrf_id}");
        return Ok(None);
    }

    Ok(next_round_in(&rounds, recruitment_phase).map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rounds(names: &[&str]) -> Vec<RoundRow> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| RoundRow {
                recruitment_rounds: name.to_string(),
                round_order: i as i32 + 1,
            })
            .collect()
    }

    #[test]
    fn test_canonical_round_mappings() {
        assert_eq!(canonical_round("Shortlisted in L2"), "L2 Technical");
        assert_eq!(canonical_round("Shortlisted in EC Fitment Round"), "EC Fitment");
        assert_eq!(
            canonical_round("Shortlisted in Project Fitment Round"),
            "Project Fitment"
        );
        assert_eq!(
            canonical_round("Shortlisted in Client Fitment Round"),
            "Client Fitment"
        );
        assert_eq!(canonical_round("Shortlisted in Client"), "Client");
    }

    #[test]
    fn test_canonical_round_passthrough() {
        assert_eq!(canonical_round("L2 Technical"), "L2 Technical");
        assert_eq!(canonical_round("Moved to L2"), "Moved to L2");
        assert_eq!(canonical_round(""), "");
    }

    #[test]
    fn test_next_round_after_canonicalized_phase() {
        let rounds = rounds(&["L2 Technical", "EC Fitment", "Fitment Round"]);
        assert_eq!(
            next_round_in(&rounds, "Shortlisted in L2"),
            Some("EC Fitment")
        );
        assert_eq!(
            next_round_in(&rounds, "Shortlisted in EC Fitment Round"),
            Some("Fitment Round")
        );
    }

    #[test]
    fn test_next_round_exact_name_match() {
        let rounds = rounds(&["L2 Technical", "Client Fitment", "Fitment Round"]);
        assert_eq!(next_round_in(&rounds, "L2 Technical"), Some("Client Fitment"));
    }

    #[test]
    fn test_last_round_has_no_next() {
        let rounds = rounds(&["L2 Technical", "Fitment Round"]);
        assert_eq!(next_round_in(&rounds, "Fitment Round"), None);
    }

    #[test]
    fn test_unmatched_phase_has_no_next() {
        let rounds = rounds(&["L2 Technical", "Fitment Round"]);
        assert_eq!(next_round_in(&rounds, "Rejected in L1"), None);
    }

    #[test]
    fn test_empty_registry_has_no_next() {
        assert_eq!(next_round_in(&[], "L2 Technical"), None);
    }

    #[test]
    fn test_rrf001_walk() {
        // A requisition configured as L1 iMocha → L2 Technical → EC Fitment
        // → Fitment Round, walked end to end.
        let rounds = rounds(&["L1 iMocha", "L2 Technical", "EC Fitment", "Fitment Round"]);
        assert_eq!(next_round_in(&rounds, "L1 iMocha"), Some("L2 Technical"));
        assert_eq!(next_round_in(&rounds, "Shortlisted in L2"), Some("EC Fitment"));
        assert_eq!(
            next_round_in(&rounds, "Shortlisted in EC Fitment Round"),
            Some("Fitment Round")
        );
        assert_eq!(next_round_in(&rounds, "Fitment Round"), None);
    }
}
