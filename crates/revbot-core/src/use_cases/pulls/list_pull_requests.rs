use async_trait::async_trait;
use revbot_database_interface::PullRequestStore;
use revbot_models::{Page, Pagination, PullRequest};
use shaku::{Component, Interface};

use crate::{CoreContext, Result, UnitOfWork};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ListPullRequestsInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pagination: Pagination,
    ) -> Result<Page<PullRequest>>;
}

#[derive(Component)]
#[shaku(interface = ListPullRequestsInterface)]
pub(crate) struct ListPullRequests;

#[async_trait]
impl ListPullRequestsInterface for ListPullRequests {
    #[tracing::instrument(skip(self, ctx))]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pagination: Pagination,
    ) -> Result<Page<PullRequest>> {
        let mut uow = UnitOfWork::begin(ctx.db_service).await?;
        let result = uow
            .store()
            .pull_requests_all(pagination.limit(), pagination.offset())
            .await
            .map(|(items, total)| Page::new(items, pagination, total))
            .map_err(Into::into);

        uow.finish(result).await
    }
}
