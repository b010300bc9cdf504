//! The round-progression engine: which interview rounds a requisition has,
//! which one a candidate faces next, and the phase strings feedback outcomes
//! produce. All recruitment-phase literals written to `candidate_info`
//! originate in this module.

pub mod handlers;
pub mod phase;
pub mod progression;
pub mod registry;
