use async_trait::async_trait;
use revbot_database_interface::{DbTransaction, PullRequestStore, UserStore};
use revbot_models::{PullRequest, MAX_REVIEWERS_COUNT};
use shaku::{Component, Interface};
use tracing::warn;

use crate::{CoreContext, DomainError, Result, UnitOfWork};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait AssignReviewerInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        reviewer_id: &str,
    ) -> Result<PullRequest>;
}

#[derive(Component)]
#[shaku(interface = AssignReviewerInterface)]
pub(crate) struct AssignReviewer;

#[async_trait]
impl AssignReviewerInterface for AssignReviewer {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        reviewer_id: &str,
    ) -> Result<PullRequest> {
        let mut uow = UnitOfWork::begin(ctx.db_service).await?;
        let result = self.assign(uow.store(), pull_request_id, reviewer_id).await;

        uow.finish(result).await
    }
}

impl AssignReviewer {
    async fn assign(
        &self,
        tx: &mut dyn DbTransaction,
        pull_request_id: &str,
        reviewer_id: &str,
    ) -> Result<PullRequest> {
        let pr = tx.pull_requests_get_for_update_expect(pull_request_id).await?;
        if !pr.needs_more_reviewers || pr.reviewers.len() >= MAX_REVIEWERS_COUNT {
            warn!(pull_request_id = %pull_request_id, "Pull request already has two reviewers");
            return Err(DomainError::PullRequestAlreadyHasTwoReviewers(
                pull_request_id.into(),
            ));
        }

        if tx.users_get(reviewer_id).await?.is_none() {
            return Err(DomainError::ReviewerNotFound(reviewer_id.into()));
        }

        if pr.has_reviewer(reviewer_id) {
            return Err(DomainError::ReviewerAlreadyAssigned {
                pull_request_id: pull_request_id.into(),
                reviewer_id: reviewer_id.into(),
            });
        }

        tx.pull_requests_assign_reviewers(pull_request_id, &[reviewer_id.to_string()])
            .await?;

        let count = pr.reviewers.len() + 1;
        if !PullRequest::needs_more_reviewers_for(count) {
            tx.pull_requests_set_needs_more_reviewers(pull_request_id, false)
                .await?;
        }

        Ok(tx.pull_requests_get_expect(pull_request_id).await?)
    }
}
