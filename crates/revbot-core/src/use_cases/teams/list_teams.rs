use async_trait::async_trait;
use revbot_database_interface::TeamStore;
use revbot_models::{Page, Pagination, Team};
use shaku::{Component, Interface};

use crate::{CoreContext, Result, UnitOfWork};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ListTeamsInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, pagination: Pagination) -> Result<Page<Team>>;
}

#[derive(Component)]
#[shaku(interface = ListTeamsInterface)]
pub(crate) struct ListTeams;

#[async_trait]
impl ListTeamsInterface for ListTeams {
    #[tracing::instrument(skip(self, ctx))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, pagination: Pagination) -> Result<Page<Team>> {
        let mut uow = UnitOfWork::begin(ctx.db_service).await?;
        let result = uow
            .store()
            .teams_all(pagination.limit(), pagination.offset())
            .await
            .map(|(items, total)| Page::new(items, pagination, total))
            .map_err(Into::into);

        uow.finish(result).await
    }
}
