use std::collections::HashMap;

use revbot_models::{PullRequestStatus, PullRequestStatusEntry, ReviewerAssignment, Team};
use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub(crate) struct PullRequestRecord {
    pub id: String,
    pub title: String,
    pub author_id: String,
    pub status_id: u64,
    pub needs_more_reviewers: bool,
    pub created_at: OffsetDateTime,
    pub merged_at: Option<OffsetDateTime>,
    /// Insertion order, used to break `created_at` ties.
    pub sequence: u64,
}

#[derive(Debug, Clone)]
pub(crate) struct UserRecord {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub team_id: u64,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub(crate) struct MemoryState {
    pub statuses: Vec<PullRequestStatusEntry>,
    pub teams: HashMap<u64, Team>,
    pub users: HashMap<String, UserRecord>,
    pub pull_requests: HashMap<String, PullRequestRecord>,
    pub assignments: Vec<ReviewerAssignment>,
    pub last_team_id: u64,
    pub last_assignment_id: u64,
    pub last_pull_request_sequence: u64,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            statuses: vec![
                PullRequestStatusEntry {
                    id: 1,
                    name: PullRequestStatus::Open.to_string(),
                },
                PullRequestStatusEntry {
                    id: 2,
                    name: PullRequestStatus::Merged.to_string(),
                },
            ],
            teams: HashMap::new(),
            users: HashMap::new(),
            pull_requests: HashMap::new(),
            assignments: Vec::new(),
            last_team_id: 0,
            last_assignment_id: 0,
            last_pull_request_sequence: 0,
        }
    }
}
