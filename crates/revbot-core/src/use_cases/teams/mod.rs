pub(crate) mod create_team_with_users;
pub(crate) mod deactivate_team_and_reassign;
pub(crate) mod get_team_with_members;
pub(crate) mod list_teams;

pub use create_team_with_users::CreateTeamWithUsersInterface;
pub use deactivate_team_and_reassign::{
    DeactivateTeamAndReassignInterface, ReviewerReplacement, TeamDeactivation,
};
pub use get_team_with_members::GetTeamWithMembersInterface;
pub use list_teams::ListTeamsInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    create_team_with_users::MockCreateTeamWithUsersInterface,
    deactivate_team_and_reassign::MockDeactivateTeamAndReassignInterface,
    get_team_with_members::MockGetTeamWithMembersInterface,
    list_teams::MockListTeamsInterface,
};
