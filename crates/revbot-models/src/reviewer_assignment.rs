use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Link between a pull request and one of its reviewers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewerAssignment {
    pub id: u64,
    pub pull_request_id: String,
    pub reviewer_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub assigned_at: OffsetDateTime,
}
