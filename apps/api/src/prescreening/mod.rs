//! Prescreening questionnaires and feedback capture, one set of tables
//! per engineering track.

pub mod handlers;
pub mod screening;
pub mod tracks;
