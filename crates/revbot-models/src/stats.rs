use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub pull_requests: PullRequestStats,
    pub users: UserStats,
    pub teams: TeamStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestStats {
    pub total: u64,
    pub open: u64,
    pub merged: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStats {
    pub most_busy_users: Vec<UserAssignmentCount>,
    pub active: u64,
    pub inactive: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserAssignmentCount {
    pub user_id: String,
    pub user_name: String,
    pub assignments: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamStats {
    pub total: u64,
    pub most_active_team: Option<MostActiveTeam>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MostActiveTeam {
    pub team_name: String,
    pub pull_requests_count: u64,
}
