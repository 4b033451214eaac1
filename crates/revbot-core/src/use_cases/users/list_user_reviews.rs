use async_trait::async_trait;
use revbot_database_interface::{DbTransaction, PullRequestStore, UserStore};
use revbot_models::PullRequest;
use shaku::{Component, Interface};

use crate::{CoreContext, DomainError, Result, UnitOfWork};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ListUserReviewsInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, user_id: &str) -> Result<Vec<PullRequest>>;
}

#[derive(Component)]
#[shaku(interface = ListUserReviewsInterface)]
pub(crate) struct ListUserReviews;

#[async_trait]
impl ListUserReviewsInterface for ListUserReviews {
    #[tracing::instrument(skip(self, ctx))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, user_id: &str) -> Result<Vec<PullRequest>> {
        let mut uow = UnitOfWork::begin(ctx.db_service).await?;
        let result = self.list(uow.store(), user_id).await;

        uow.finish(result).await
    }
}

impl ListUserReviews {
    async fn list(&self, tx: &mut dyn DbTransaction, user_id: &str) -> Result<Vec<PullRequest>> {
        if tx.users_get(user_id).await?.is_none() {
            return Err(DomainError::UserNotFound(user_id.into()));
        }

        tx.pull_requests_list_by_reviewer(user_id)
            .await
            .map_err(Into::into)
    }
}
