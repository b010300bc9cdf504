//! Interview feedback: per-track technical responses, the general round
//! form, and the aggregated final view.

pub mod forms;
pub mod handlers;
pub mod recorder;
pub mod summary;
pub mod tables;
