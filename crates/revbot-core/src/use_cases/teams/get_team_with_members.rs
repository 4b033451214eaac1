use async_trait::async_trait;
use revbot_database_interface::{TeamStore, UserStore};
use revbot_models::TeamWithMembers;
use shaku::{Component, Interface};

use crate::{CoreContext, DomainError, Result, UnitOfWork};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait GetTeamWithMembersInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team_name: &str) -> Result<TeamWithMembers>;
}

#[derive(Component)]
#[shaku(interface = GetTeamWithMembersInterface)]
pub(crate) struct GetTeamWithMembers;

#[async_trait]
impl GetTeamWithMembersInterface for GetTeamWithMembers {
    #[tracing::instrument(skip(self, ctx))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team_name: &str) -> Result<TeamWithMembers> {
        let mut uow = UnitOfWork::begin(ctx.db_service).await?;
        let tx = uow.store();

        let result = match tx.teams_get(team_name).await {
            Ok(Some(team)) => tx
                .users_list_by_team(team.id)
                .await
                .map(|members| TeamWithMembers { team, members })
                .map_err(Into::into),
            Ok(None) => Err(DomainError::TeamNotFound(team_name.into())),
            Err(e) => Err(e.into()),
        };

        uow.finish(result).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::context::tests::CoreContextTest;

    #[tokio::test]
    async fn get() {
        let ctx = CoreContextTest::new();
        ctx.create_team("backend", &[("u1", true), ("u2", false)])
            .await;
        ctx.create_team("frontend", &[("u3", true)]).await;

        let team = GetTeamWithMembers
            .run(&ctx.as_context(), "backend")
            .await
            .unwrap();
        assert_eq!(team.team.name, "backend");
        assert_eq!(
            team.members.iter().map(|u| &u.id[..]).collect::<Vec<_>>(),
            vec!["u1", "u2"]
        );

        assert!(matches!(
            GetTeamWithMembers.run(&ctx.as_context(), "nope").await,
            Err(DomainError::TeamNotFound(_))
        ));
    }
}
