//! Domain models.

mod pagination;
mod pull_request;
mod pull_request_status;
mod reviewer_assignment;
mod stats;
mod team;
mod user;

pub use pagination::{Page, Pagination, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use pull_request::{PullRequest, MAX_REVIEWERS_COUNT};
pub use pull_request_status::{PullRequestStatus, PullRequestStatusEntry, PullRequestStatusError};
pub use reviewer_assignment::ReviewerAssignment;
pub use stats::{
    MostActiveTeam, PullRequestStats, Stats, TeamStats, UserAssignmentCount, UserStats,
};
pub use team::{Team, TeamWithMembers};
pub use user::{NewTeamMember, User};
