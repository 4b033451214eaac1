use async_trait::async_trait;
use revbot_database_interface::{DbTransaction, PullRequestStore};
use revbot_models::{PullRequest, PullRequestStatus};
use shaku::{Component, Interface};
use time::OffsetDateTime;
use tracing::debug;

use super::resolve_status_id;
use crate::{CoreContext, Result, UnitOfWork};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait MergePullRequestInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, pull_request_id: &str) -> Result<PullRequest>;
}

#[derive(Component)]
#[shaku(interface = MergePullRequestInterface)]
pub(crate) struct MergePullRequest;

#[async_trait]
impl MergePullRequestInterface for MergePullRequest {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, pull_request_id: &str) -> Result<PullRequest> {
        let mut uow = UnitOfWork::begin(ctx.db_service).await?;
        let result = self.merge(uow.store(), pull_request_id).await;

        uow.finish(result).await
    }
}

impl MergePullRequest {
    async fn merge(&self, tx: &mut dyn DbTransaction, pull_request_id: &str) -> Result<PullRequest> {
        let pr = tx.pull_requests_get_for_update_expect(pull_request_id).await?;
        if pr.is_merged() {
            debug!(pull_request_id = %pull_request_id, "Pull request already merged");
            return Ok(pr);
        }

        let merged_status_id = resolve_status_id(tx, PullRequestStatus::Merged).await?;
        tx.pull_requests_set_status(
            pull_request_id,
            merged_status_id,
            Some(OffsetDateTime::now_utc()),
        )
        .await?;

        Ok(tx.pull_requests_get_expect(pull_request_id).await?)
    }
}
