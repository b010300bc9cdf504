pub mod candidate;
pub mod dashboard;
pub mod feedback;
pub mod panel;
pub mod rounds;
