use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::PullRequestStatus;

/// Maximum number of reviewers on a pull request.
pub const MAX_REVIEWERS_COUNT: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    pub id: String,
    pub title: String,
    pub author_id: String,
    pub status: PullRequestStatus,
    pub needs_more_reviewers: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub merged_at: Option<OffsetDateTime>,
    pub reviewers: Vec<String>,
}

impl Default for PullRequest {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            author_id: String::new(),
            status: PullRequestStatus::Open,
            needs_more_reviewers: true,
            created_at: OffsetDateTime::UNIX_EPOCH,
            merged_at: None,
            reviewers: vec![],
        }
    }
}

impl PullRequest {
    pub fn is_merged(&self) -> bool {
        self.status == PullRequestStatus::Merged
    }

    pub fn has_reviewer(&self, user_id: &str) -> bool {
        self.reviewers.iter().any(|r| r == user_id)
    }

    /// `needs_more_reviewers` value matching a reviewer count.
    pub fn needs_more_reviewers_for(count: usize) -> bool {
        count < MAX_REVIEWERS_COUNT
    }
}
