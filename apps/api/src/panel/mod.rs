//! Interview-day views for panel members and HR, keyed by date and the
//! interviewer or HR email on the candidate record.

pub mod handlers;
pub mod queries;
