//! Stats widget models

pub mod report;
pub mod wire;

// Re-export for convenience
pub use report::{Difficulty, QuestionCount, RecentSubmission, SubmissionStat, UserReport};
pub use wire::{GraphQlRequest, GraphQlResponse, UserDataPayload};
