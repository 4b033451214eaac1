//! JSON bodies.

#![allow(missing_docs)]

use revbot_core::use_cases::pulls::Reassignment;
use revbot_models::{
    NewTeamMember, Page, Pagination, PullRequest, PullRequestStatus, Team, TeamWithMembers, User,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl ErrorResponse {
    pub fn new<C: Into<String>, M: Into<String>>(code: C, message: M) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl From<PageQuery> for Pagination {
    fn from(query: PageQuery) -> Self {
        Pagination::new(query.page, query.page_size)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamMemberJson {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

impl From<TeamMemberJson> for NewTeamMember {
    fn from(member: TeamMemberJson) -> Self {
        NewTeamMember::new(member.user_id, member.username, member.is_active)
    }
}

impl From<User> for TeamMemberJson {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.name,
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamJson {
    pub team_name: String,
    pub members: Vec<TeamMemberJson>,
}

impl From<TeamWithMembers> for TeamJson {
    fn from(team: TeamWithMembers) -> Self {
        Self {
            team_name: team.team.name,
            members: team.members.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamResponse {
    pub team: TeamJson,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TeamQuery {
    pub team_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeactivateTeamRequest {
    pub team_name: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamSummaryJson {
    pub team_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Team> for TeamSummaryJson {
    fn from(team: Team) -> Self {
        Self {
            team_name: team.name,
            created_at: team.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamsPage {
    pub teams: Vec<TeamSummaryJson>,
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl From<Page<Team>> for TeamsPage {
    fn from(page: Page<Team>) -> Self {
        let page = page.map(TeamSummaryJson::from);
        Self {
            teams: page.items,
            page: page.page,
            page_size: page.page_size,
            total_items: page.total_items,
            total_pages: page.total_pages,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserJson {
    pub user_id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

impl From<User> for UserJson {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.name,
            team_name: user.team_name,
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub user: UserJson,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetIsActiveRequest {
    pub user_id: String,
    pub is_active: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserQuery {
    pub user_id: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestJson {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
    pub assigned_reviewers: Vec<String>,
    pub need_more_reviewers: bool,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(rename = "mergedAt", with = "time::serde::rfc3339::option")]
    pub merged_at: Option<OffsetDateTime>,
}

impl From<PullRequest> for PullRequestJson {
    fn from(pr: PullRequest) -> Self {
        Self {
            pull_request_id: pr.id,
            pull_request_name: pr.title,
            author_id: pr.author_id,
            status: pr.status,
            assigned_reviewers: pr.reviewers,
            need_more_reviewers: pr.needs_more_reviewers,
            created_at: pr.created_at,
            merged_at: pr.merged_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestShortJson {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
}

impl From<PullRequest> for PullRequestShortJson {
    fn from(pr: PullRequest) -> Self {
        Self {
            pull_request_id: pr.id,
            pull_request_name: pr.title,
            author_id: pr.author_id,
            status: pr.status,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestResponse {
    pub pr: PullRequestJson,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReassignResponse {
    pub pr: PullRequestJson,
    pub replaced_by: String,
}

impl From<Reassignment> for ReassignResponse {
    fn from(reassignment: Reassignment) -> Self {
        Self {
            pr: reassignment.pull_request.into(),
            replaced_by: reassignment.replaced_by,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserReviewsResponse {
    pub user_id: String,
    pub pull_requests: Vec<PullRequestShortJson>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestsPage {
    pub pull_requests: Vec<PullRequestJson>,
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl From<Page<PullRequest>> for PullRequestsPage {
    fn from(page: Page<PullRequest>) -> Self {
        let page = page.map(PullRequestJson::from);
        Self {
            pull_requests: page.items,
            page: page.page,
            page_size: page.page_size,
            total_items: page.total_items,
            total_pages: page.total_pages,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTeamRequest {
    pub team_name: String,
    pub members: Vec<TeamMemberJson>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePullRequestRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssignReviewerRequest {
    pub pull_request_id: String,
    pub new_reviewer_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReassignReviewerRequest {
    pub pull_request_id: String,
    pub old_user_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MergePullRequestRequest {
    pub pull_request_id: String,
}
