use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use revbot_database_interface::{
    DatabaseError, DbTransaction, PullRequestStore, Result, StatsStore, TeamStore, UserStore,
};
use revbot_models::{
    MostActiveTeam, PullRequest, PullRequestStats, PullRequestStatus, PullRequestStatusEntry,
    ReviewerAssignment, Stats, Team, TeamStats, User, UserAssignmentCount, UserStats,
};
use time::OffsetDateTime;
use tokio::sync::OwnedMutexGuard;

use crate::state::{MemoryState, PullRequestRecord, UserRecord};

const MOST_BUSY_USERS_COUNT: usize = 5;

/// In-memory transaction, working on a copy of the locked state.
pub struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
    rng: Arc<Mutex<ChaCha8Rng>>,
}

impl MemoryTransaction {
    pub(crate) fn new(guard: OwnedMutexGuard<MemoryState>, rng: Arc<Mutex<ChaCha8Rng>>) -> Self {
        let working = guard.clone();
        Self {
            guard,
            working,
            rng,
        }
    }

    fn build_user(&self, record: &UserRecord) -> User {
        let team_name = self
            .working
            .teams
            .get(&record.team_id)
            .map(|t| t.name.clone())
            .unwrap_or_default();

        User {
            id: record.id.clone(),
            name: record.name.clone(),
            is_active: record.is_active,
            team_id: record.team_id,
            team_name,
            created_at: record.created_at,
        }
    }

    fn build_pull_request(&self, record: &PullRequestRecord) -> Result<PullRequest> {
        let status = self
            .find_status(record.status_id)
            .and_then(|s| s.status())
            .ok_or(DatabaseError::UnknownStatusId(record.status_id))?;

        let mut assignments: Vec<_> = self
            .working
            .assignments
            .iter()
            .filter(|a| a.pull_request_id == record.id)
            .collect();
        assignments.sort_by_key(|a| a.id);

        Ok(PullRequest {
            id: record.id.clone(),
            title: record.title.clone(),
            author_id: record.author_id.clone(),
            status,
            needs_more_reviewers: record.needs_more_reviewers,
            created_at: record.created_at,
            merged_at: record.merged_at,
            reviewers: assignments
                .into_iter()
                .map(|a| a.reviewer_id.clone())
                .collect(),
        })
    }

    fn find_status(&self, id: u64) -> Option<&PullRequestStatusEntry> {
        self.working.statuses.iter().find(|s| s.id == id)
    }

    fn is_assigned(&self, pull_request_id: &str, reviewer_id: &str) -> bool {
        self.working
            .assignments
            .iter()
            .any(|a| a.pull_request_id == pull_request_id && a.reviewer_id == reviewer_id)
    }

    fn sample_active_users<F>(&self, limit: usize, exclude_ids: &[String], filter: F) -> Vec<User>
    where
        F: Fn(&UserRecord) -> bool,
    {
        let mut candidates: Vec<_> = self
            .working
            .users
            .values()
            .filter(|u| u.is_active && !exclude_ids.contains(&u.id) && filter(u))
            .collect();
        candidates.sort_by(|a, b| a.id.cmp(&b.id));

        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        candidates
            .choose_multiple(&mut *rng, limit)
            .map(|u| self.build_user(u))
            .collect()
    }
}

fn paginate<T>(items: Vec<T>, limit: u64, offset: u64) -> Vec<T> {
    items
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect()
}

#[async_trait]
impl PullRequestStore for MemoryTransaction {
    async fn pull_requests_create(
        &mut self,
        id: &str,
        title: &str,
        author_id: &str,
        status_id: u64,
        needs_more_reviewers: bool,
    ) -> Result<PullRequest> {
        if self.working.pull_requests.contains_key(id) {
            return Err(DatabaseError::PullRequestAlreadyExists(id.into()));
        }
        if self
            .working
            .pull_requests
            .values()
            .any(|p| p.title == title)
        {
            return Err(DatabaseError::PullRequestAlreadyExists(title.into()));
        }
        if !self.working.users.contains_key(author_id) {
            return Err(DatabaseError::UnknownAuthor(author_id.into()));
        }
        if self.find_status(status_id).is_none() {
            return Err(DatabaseError::UnknownStatusId(status_id));
        }

        self.working.last_pull_request_sequence += 1;
        let record = PullRequestRecord {
            id: id.into(),
            title: title.into(),
            author_id: author_id.into(),
            status_id,
            needs_more_reviewers,
            created_at: OffsetDateTime::now_utc(),
            merged_at: None,
            sequence: self.working.last_pull_request_sequence,
        };

        let pull_request = self.build_pull_request(&record)?;
        self.working.pull_requests.insert(id.into(), record);
        Ok(pull_request)
    }

    async fn pull_requests_get(&mut self, id: &str) -> Result<Option<PullRequest>> {
        self.working
            .pull_requests
            .get(id)
            .map(|r| self.build_pull_request(r))
            .transpose()
    }

    async fn pull_requests_get_for_update(&mut self, id: &str) -> Result<Option<PullRequest>> {
        // The whole state is already locked.
        self.pull_requests_get(id).await
    }

    async fn pull_requests_all(
        &mut self,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<PullRequest>, u64)> {
        let mut records: Vec<_> = self.working.pull_requests.values().collect();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.sequence.cmp(&a.sequence))
        });

        let total = records.len() as u64;
        let page = paginate(records, limit, offset)
            .into_iter()
            .map(|r| self.build_pull_request(r))
            .collect::<Result<Vec<_>>>()?;

        Ok((page, total))
    }

    async fn pull_requests_list_by_reviewer(&mut self, user_id: &str) -> Result<Vec<PullRequest>> {
        let mut records: Vec<_> = self
            .working
            .pull_requests
            .values()
            .filter(|p| self.is_assigned(&p.id, user_id))
            .collect();
        records.sort_by_key(|p| p.sequence);

        records
            .into_iter()
            .map(|r| self.build_pull_request(r))
            .collect()
    }

    async fn pull_requests_assign_reviewers(
        &mut self,
        id: &str,
        reviewer_ids: &[String],
    ) -> Result<()> {
        if !self.working.pull_requests.contains_key(id) {
            return Err(DatabaseError::UnknownPullRequest(id.into()));
        }

        for (index, reviewer_id) in reviewer_ids.iter().enumerate() {
            if !self.working.users.contains_key(reviewer_id) {
                return Err(DatabaseError::UnknownReviewer(reviewer_id.clone()));
            }

            if self.is_assigned(id, reviewer_id) || reviewer_ids[..index].contains(reviewer_id) {
                return Err(DatabaseError::ReviewerAlreadyAssigned(
                    id.into(),
                    reviewer_id.clone(),
                ));
            }
        }

        let now = OffsetDateTime::now_utc();
        for reviewer_id in reviewer_ids {
            self.working.last_assignment_id += 1;
            self.working.assignments.push(ReviewerAssignment {
                id: self.working.last_assignment_id,
                pull_request_id: id.into(),
                reviewer_id: reviewer_id.clone(),
                assigned_at: now,
            });
        }

        Ok(())
    }

    async fn pull_requests_replace_reviewer(
        &mut self,
        id: &str,
        old_reviewer_id: &str,
        new_reviewer_id: &str,
    ) -> Result<()> {
        if !self.working.users.contains_key(new_reviewer_id) {
            return Err(DatabaseError::UnknownReviewer(new_reviewer_id.into()));
        }
        if self.is_assigned(id, new_reviewer_id) {
            return Err(DatabaseError::ReviewerAlreadyAssigned(
                id.into(),
                new_reviewer_id.into(),
            ));
        }

        let assignment = self
            .working
            .assignments
            .iter_mut()
            .find(|a| a.pull_request_id == id && a.reviewer_id == old_reviewer_id)
            .ok_or_else(|| {
                DatabaseError::UnknownReviewerAssignment(id.into(), old_reviewer_id.into())
            })?;

        assignment.reviewer_id = new_reviewer_id.into();
        assignment.assigned_at = OffsetDateTime::now_utc();
        Ok(())
    }

    async fn pull_requests_set_status(
        &mut self,
        id: &str,
        status_id: u64,
        merged_at: Option<OffsetDateTime>,
    ) -> Result<()> {
        if self.find_status(status_id).is_none() {
            return Err(DatabaseError::UnknownStatusId(status_id));
        }

        let record = self
            .working
            .pull_requests
            .get_mut(id)
            .ok_or_else(|| DatabaseError::UnknownPullRequest(id.into()))?;
        record.status_id = status_id;
        record.merged_at = merged_at;
        Ok(())
    }

    async fn pull_requests_set_needs_more_reviewers(
        &mut self,
        id: &str,
        value: bool,
    ) -> Result<()> {
        let record = self
            .working
            .pull_requests
            .get_mut(id)
            .ok_or_else(|| DatabaseError::UnknownPullRequest(id.into()))?;
        record.needs_more_reviewers = value;
        Ok(())
    }

    async fn pull_request_statuses_all(&mut self) -> Result<Vec<PullRequestStatusEntry>> {
        let mut statuses = self.working.statuses.clone();
        statuses.sort_by_key(|s| s.id);
        Ok(statuses)
    }

    async fn pull_request_statuses_get(
        &mut self,
        id: u64,
    ) -> Result<Option<PullRequestStatusEntry>> {
        Ok(self.find_status(id).cloned())
    }

    async fn reviewer_assignments_list(&mut self, id: &str) -> Result<Vec<ReviewerAssignment>> {
        let mut assignments: Vec<_> = self
            .working
            .assignments
            .iter()
            .filter(|a| a.pull_request_id == id)
            .cloned()
            .collect();
        assignments.sort_by_key(|a| a.id);
        Ok(assignments)
    }
}

#[async_trait]
impl UserStore for MemoryTransaction {
    async fn users_create(
        &mut self,
        id: &str,
        name: &str,
        team_id: u64,
        is_active: bool,
    ) -> Result<User> {
        if !self.working.teams.contains_key(&team_id) {
            return Err(DatabaseError::UnknownTeamId(team_id));
        }
        if self.working.users.contains_key(id) {
            return Err(DatabaseError::UserAlreadyExists(id.into()));
        }

        let record = UserRecord {
            id: id.into(),
            name: name.into(),
            is_active,
            team_id,
            created_at: OffsetDateTime::now_utc(),
        };

        let user = self.build_user(&record);
        self.working.users.insert(id.into(), record);
        Ok(user)
    }

    async fn users_get(&mut self, id: &str) -> Result<Option<User>> {
        Ok(self.working.users.get(id).map(|u| self.build_user(u)))
    }

    async fn users_list_by_team(&mut self, team_id: u64) -> Result<Vec<User>> {
        let mut users: Vec<_> = self
            .working
            .users
            .values()
            .filter(|u| u.team_id == team_id)
            .map(|u| self.build_user(u))
            .collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(users)
    }

    async fn users_set_active(&mut self, id: &str, value: bool) -> Result<User> {
        let record = self
            .working
            .users
            .get_mut(id)
            .ok_or_else(|| DatabaseError::UnknownUser(id.into()))?;
        record.is_active = value;

        let record = record.clone();
        Ok(self.build_user(&record))
    }

    async fn users_random_active_teammates(
        &mut self,
        team_id: u64,
        limit: usize,
        exclude_ids: &[String],
    ) -> Result<Vec<User>> {
        Ok(self.sample_active_users(limit, exclude_ids, |u| u.team_id == team_id))
    }

    async fn users_random_active(
        &mut self,
        limit: usize,
        exclude_ids: &[String],
    ) -> Result<Vec<User>> {
        Ok(self.sample_active_users(limit, exclude_ids, |_| true))
    }
}

#[async_trait]
impl TeamStore for MemoryTransaction {
    async fn teams_create(&mut self, name: &str) -> Result<Team> {
        if self.working.teams.values().any(|t| t.name == name) {
            return Err(DatabaseError::TeamAlreadyExists(name.into()));
        }

        self.working.last_team_id += 1;
        let team = Team {
            id: self.working.last_team_id,
            name: name.into(),
            created_at: OffsetDateTime::now_utc(),
        };

        self.working.teams.insert(team.id, team.clone());
        Ok(team)
    }

    async fn teams_get(&mut self, name: &str) -> Result<Option<Team>> {
        Ok(self
            .working
            .teams
            .values()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn teams_all(&mut self, limit: u64, offset: u64) -> Result<(Vec<Team>, u64)> {
        let mut teams: Vec<_> = self.working.teams.values().cloned().collect();
        teams.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = teams.len() as u64;
        Ok((paginate(teams, limit, offset), total))
    }

    async fn teams_deactivate_members(&mut self, name: &str) -> Result<Vec<User>> {
        let team_id = self.teams_get_expect(name).await?.id;

        let mut flipped = Vec::new();
        for record in self.working.users.values_mut() {
            if record.team_id == team_id && record.is_active {
                record.is_active = false;
                flipped.push(record.clone());
            }
        }
        flipped.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(flipped.iter().map(|u| self.build_user(u)).collect())
    }
}

#[async_trait]
impl StatsStore for MemoryTransaction {
    async fn stats_get(&mut self) -> Result<Stats> {
        let state = &self.working;

        let mut pull_requests = PullRequestStats {
            total: state.pull_requests.len() as u64,
            ..Default::default()
        };
        for record in state.pull_requests.values() {
            match self.find_status(record.status_id).and_then(|s| s.status()) {
                Some(PullRequestStatus::Open) => pull_requests.open += 1,
                Some(PullRequestStatus::Merged) => pull_requests.merged += 1,
                None => (),
            }
        }

        let active = state.users.values().filter(|u| u.is_active).count() as u64;
        let inactive = state.users.len() as u64 - active;

        let mut assignment_counts: HashMap<&str, u64> = HashMap::new();
        for assignment in &state.assignments {
            *assignment_counts
                .entry(&assignment.reviewer_id[..])
                .or_default() += 1;
        }
        let mut most_busy_users: Vec<_> = assignment_counts
            .into_iter()
            .filter_map(|(user_id, assignments)| {
                state.users.get(user_id).map(|u| UserAssignmentCount {
                    user_id: u.id.clone(),
                    user_name: u.name.clone(),
                    assignments,
                })
            })
            .collect();
        most_busy_users.sort_by(|a, b| {
            b.assignments
                .cmp(&a.assignments)
                .then(a.user_id.cmp(&b.user_id))
        });
        most_busy_users.truncate(MOST_BUSY_USERS_COUNT);

        // Keyed by name so that ties resolve alphabetically.
        let mut team_counts: BTreeMap<&str, u64> = BTreeMap::new();
        for record in state.pull_requests.values() {
            let team = state
                .users
                .get(&record.author_id)
                .and_then(|u| state.teams.get(&u.team_id));
            if let Some(team) = team {
                *team_counts.entry(&team.name[..]).or_default() += 1;
            }
        }
        let most_active_team = team_counts
            .into_iter()
            .fold(None::<MostActiveTeam>, |best, (name, count)| match best {
                Some(b) if b.pull_requests_count >= count => Some(b),
                _ => Some(MostActiveTeam {
                    team_name: name.into(),
                    pull_requests_count: count,
                }),
            });

        Ok(Stats {
            pull_requests,
            users: UserStats {
                most_busy_users,
                active,
                inactive,
            },
            teams: TeamStats {
                total: state.teams.len() as u64,
                most_active_team,
            },
        })
    }
}

#[async_trait]
impl DbTransaction for MemoryTransaction {
    async fn commit(self: Box<Self>) -> Result<()> {
        let Self {
            mut guard, working, ..
        } = *self;
        *guard = working;

        tracing::trace!("Memory transaction committed");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        tracing::trace!("Memory transaction rolled back");
        Ok(())
    }
}
