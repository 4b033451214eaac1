//! Review assignment workflows.

#![warn(clippy::all)]
#![allow(clippy::new_without_default)]

mod context;
pub mod errors;
mod transaction;
pub mod use_cases;

pub use context::CoreContext;
pub use errors::{DomainError, ErrorKind, Result};
use shaku::module;
pub use transaction::UnitOfWork;
use use_cases::{
    pulls::{
        assign_reviewer::AssignReviewer, create_pull_request::CreatePullRequest,
        list_pull_requests::ListPullRequests, merge_pull_request::MergePullRequest,
        reassign_reviewer::ReassignReviewer,
    },
    stats::get_stats::GetStats,
    teams::{
        create_team_with_users::CreateTeamWithUsers,
        deactivate_team_and_reassign::DeactivateTeamAndReassign,
        get_team_with_members::GetTeamWithMembers, list_teams::ListTeams,
    },
    users::{list_user_reviews::ListUserReviews, set_user_active::SetUserActive},
};

module! {
    pub CoreModule {
        components = [
            CreatePullRequest, AssignReviewer, ReassignReviewer,
            MergePullRequest, ListPullRequests,
            CreateTeamWithUsers, GetTeamWithMembers, ListTeams,
            DeactivateTeamAndReassign,
            SetUserActive, ListUserReviews,
            GetStats
        ],
        providers = []
    }
}
