//! Phase derivation rules. There are two, and they are intentionally
//! separate: the L2/fullstack path always writes the fixed L2 phase pair,
//! while the general round form derives the phase from the round name it
//! was submitted for.

/// Derives the phase written after an L2 or fullstack technical verdict.
/// Any verdict other than the two known ones changes nothing.
pub fn l2_phase_for_result(result: &str) -> Option<&'static str> {
    match result {
        "Recommended" => Some("Shortlisted in L2"),
        "Rejected" => Some("Rejected in L2"),
        _ => None,
    }
}

/// Derives the phase written after a general round-form verdict, e.g.
/// "Shortlisted in Client Fitment Round".
pub fn round_phase_for_result(result: &str, round: &str) -> Option<String> {
    match result {
        "Recommended" => Some(format!("Shortlisted in {round}")),
        "Rejected" => Some(format!("Rejected in {round}")),
        _ => None,
    }
}

/// Normalizes a scheduling label into a round name: the first literal
/// "Scheduled" is dropped and surrounding whitespace trimmed, so
/// "Client Fitment Round Scheduled" becomes "Client Fitment Round".
pub fn clean_round_details(round_details: &str) -> String {
    round_details.replacen("Scheduled", "", 1).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l2_phase_known_results() {
        assert_eq!(l2_phase_for_result("Recommended"), Some("Shortlisted in L2"));
        assert_eq!(l2_phase_for_result("Rejected"), Some("Rejected in L2"));
    }

    #[test]
    fn test_l2_phase_unknown_result_is_noop() {
        assert_eq!(l2_phase_for_result("On Hold"), None);
        assert_eq!(l2_phase_for_result(""), None);
        assert_eq!(l2_phase_for_result("recommended"), None); // case-sensitive
    }

    #[test]
    fn test_round_phase_uses_round_name() {
        assert_eq!(
            round_phase_for_result("Recommended", "Client Fitment Round").as_deref(),
            Some("Shortlisted in Client Fitment Round")
        );
        assert_eq!(
            round_phase_for_result("Rejected", "Fitment Round").as_deref(),
            Some("Rejected in Fitment Round")
        );
        assert_eq!(round_phase_for_result("Pending", "Fitment Round"), None);
    }

    #[test]
    fn test_clean_round_details_strips_scheduled() {
        assert_eq!(
            clean_round_details("Client Fitment Round Scheduled"),
            "Client Fitment Round"
        );
        assert_eq!(clean_round_details("Fitment Round"), "Fitment Round");
    }

    #[test]
    fn test_clean_round_details_strips_only_first_occurrence() {
        assert_eq!(
            clean_round_details("Scheduled Scheduled"),
            "Scheduled"
        );
    }
}
