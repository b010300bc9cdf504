//! Aggregate counters, charts, and activity feeds for the HR dashboard.

pub mod handlers;
pub mod queries;
