use async_trait::async_trait;
use revbot_database_interface::{DbTransaction, TeamStore, UserStore};
use revbot_models::{NewTeamMember, TeamWithMembers};
use shaku::{Component, Interface};
use tracing::warn;

use crate::{CoreContext, DomainError, Result, UnitOfWork};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CreateTeamWithUsersInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        team_name: &str,
        members: &[NewTeamMember],
    ) -> Result<TeamWithMembers>;
}

#[derive(Component)]
#[shaku(interface = CreateTeamWithUsersInterface)]
pub(crate) struct CreateTeamWithUsers;

#[async_trait]
impl CreateTeamWithUsersInterface for CreateTeamWithUsers {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        team_name: &str,
        members: &[NewTeamMember],
    ) -> Result<TeamWithMembers> {
        let mut uow = UnitOfWork::begin(ctx.db_service).await?;
        let result = self.create(uow.store(), team_name, members).await;

        if matches!(
            result,
            Err(DomainError::TeamAlreadyExists(_) | DomainError::UserAlreadyExists(_))
        ) {
            warn!(team_name = %team_name, "Team creation rejected");
        }

        uow.finish(result).await
    }
}

impl CreateTeamWithUsers {
    async fn create(
        &self,
        tx: &mut dyn DbTransaction,
        team_name: &str,
        members: &[NewTeamMember],
    ) -> Result<TeamWithMembers> {
        let team = tx.teams_create(team_name).await?;

        for member in members {
            tx.users_create(&member.id, &member.name, team.id, member.is_active)
                .await?;
        }

        let members = tx.users_list_by_team(team.id).await?;
        Ok(TeamWithMembers { team, members })
    }
}
