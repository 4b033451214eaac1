use async_trait::async_trait;
use revbot_models::{PullRequest, PullRequestStatusEntry, ReviewerAssignment, Stats, Team, User};
use time::OffsetDateTime;

use crate::{DatabaseError, Result};

#[async_trait]
pub trait PullRequestStore: Send {
    async fn pull_requests_create(
        &mut self,
        id: &str,
        title: &str,
        author_id: &str,
        status_id: u64,
        needs_more_reviewers: bool,
    ) -> Result<PullRequest>;
    async fn pull_requests_get(&mut self, id: &str) -> Result<Option<PullRequest>>;
    async fn pull_requests_get_expect(&mut self, id: &str) -> Result<PullRequest> {
        self.pull_requests_get(id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownPullRequest(id.into()))
    }
    /// Same as `pull_requests_get`, but keeps the pull request locked until the end of the transaction.
    async fn pull_requests_get_for_update(&mut self, id: &str) -> Result<Option<PullRequest>>;
    async fn pull_requests_get_for_update_expect(&mut self, id: &str) -> Result<PullRequest> {
        self.pull_requests_get_for_update(id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownPullRequest(id.into()))
    }
    /// Newest first. Returns the page and the total count.
    async fn pull_requests_all(&mut self, limit: u64, offset: u64)
        -> Result<(Vec<PullRequest>, u64)>;
    async fn pull_requests_list_by_reviewer(&mut self, user_id: &str) -> Result<Vec<PullRequest>>;
    async fn pull_requests_assign_reviewers(
        &mut self,
        id: &str,
        reviewer_ids: &[String],
    ) -> Result<()>;
    async fn pull_requests_replace_reviewer(
        &mut self,
        id: &str,
        old_reviewer_id: &str,
        new_reviewer_id: &str,
    ) -> Result<()>;
    async fn pull_requests_set_status(
        &mut self,
        id: &str,
        status_id: u64,
        merged_at: Option<OffsetDateTime>,
    ) -> Result<()>;
    async fn pull_requests_set_needs_more_reviewers(&mut self, id: &str, value: bool)
        -> Result<()>;
    async fn pull_request_statuses_all(&mut self) -> Result<Vec<PullRequestStatusEntry>>;
    async fn pull_request_statuses_get(&mut self, id: u64)
        -> Result<Option<PullRequestStatusEntry>>;
    async fn pull_request_statuses_get_expect(&mut self, id: u64) -> Result<PullRequestStatusEntry> {
        self.pull_request_statuses_get(id)
            .await?
            .ok_or(DatabaseError::UnknownStatusId(id))
    }
    async fn reviewer_assignments_list(&mut self, id: &str) -> Result<Vec<ReviewerAssignment>>;
}

#[async_trait]
pub trait UserStore: Send {
    async fn users_create(
        &mut self,
        id: &str,
        name: &str,
        team_id: u64,
        is_active: bool,
    ) -> Result<User>;
    async fn users_get(&mut self, id: &str) -> Result<Option<User>>;
    async fn users_get_expect(&mut self, id: &str) -> Result<User> {
        self.users_get(id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownUser(id.into()))
    }
    async fn users_list_by_team(&mut self, team_id: u64) -> Result<Vec<User>>;
    async fn users_set_active(&mut self, id: &str, value: bool) -> Result<User>;
    /// Random sample of active members of a team, never containing an excluded ID.
    async fn users_random_active_teammates(
        &mut self,
        team_id: u64,
        limit: usize,
        exclude_ids: &[String],
    ) -> Result<Vec<User>>;
    /// Random sample of active users from any team, never containing an excluded ID.
    async fn users_random_active(&mut self, limit: usize, exclude_ids: &[String])
        -> Result<Vec<User>>;
}

#[async_trait]
pub trait TeamStore: Send {
    async fn teams_create(&mut self, name: &str) -> Result<Team>;
    async fn teams_get(&mut self, name: &str) -> Result<Option<Team>>;
    async fn teams_get_expect(&mut self, name: &str) -> Result<Team> {
        self.teams_get(name)
            .await?
            .ok_or_else(|| DatabaseError::UnknownTeam(name.into()))
    }
    /// Newest first. Returns the page and the total count.
    async fn teams_all(&mut self, limit: u64, offset: u64) -> Result<(Vec<Team>, u64)>;
    /// Deactivates every active member of the team, returning the users that were flipped.
    async fn teams_deactivate_members(&mut self, name: &str) -> Result<Vec<User>>;
}

#[async_trait]
pub trait StatsStore: Send {
    async fn stats_get(&mut self) -> Result<Stats>;
}

/// Unit of work over every store.
///
/// Nothing done through a transaction is visible outside of it before `commit`.
/// Dropping a transaction without committing it discards its changes.
#[async_trait]
pub trait DbTransaction: PullRequestStore + UserStore + TeamStore + StatsStore + Send {
    async fn commit(self: Box<Self>) -> Result<()>;
    async fn rollback(self: Box<Self>) -> Result<()>;
}

#[async_trait]
pub trait DbService: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn DbTransaction>>;
    async fn health_check(&self) -> Result<()>;
}
