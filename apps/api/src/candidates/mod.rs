//! Candidate intake, listings, scheduling, and the recruitment-phase store.

pub mod handlers;
pub mod queries;
pub mod store;
