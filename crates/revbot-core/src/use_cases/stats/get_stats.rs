use async_trait::async_trait;
use revbot_database_interface::StatsStore;
use revbot_models::Stats;
use shaku::{Component, Interface};

use crate::{CoreContext, Result, UnitOfWork};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait GetStatsInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>) -> Result<Stats>;
}

#[derive(Component)]
#[shaku(interface = GetStatsInterface)]
pub(crate) struct GetStats;

#[async_trait]
impl GetStatsInterface for GetStats {
    #[tracing::instrument(skip(self, ctx))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>) -> Result<Stats> {
        let mut uow = UnitOfWork::begin(ctx.db_service).await?;
        let result = uow.store().stats_get().await.map_err(Into::into);

        uow.finish(result).await
    }
}
