use async_trait::async_trait;
use revbot_database_interface::{DbTransaction, PullRequestStore, UserStore};
use revbot_models::PullRequest;
use shaku::{Component, Interface};
use tracing::{info, warn};

use crate::{
    use_cases::reviews::select_reviewers::pick_teammate_replacement, CoreContext, DomainError,
    Result, UnitOfWork,
};

/// Outcome of a reviewer reassignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassignment {
    pub pull_request: PullRequest,
    pub replaced_by: String,
}

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ReassignReviewerInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> Result<Reassignment>;
}

#[derive(Component)]
#[shaku(interface = ReassignReviewerInterface)]
pub(crate) struct ReassignReviewer;

#[async_trait]
impl ReassignReviewerInterface for ReassignReviewer {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> Result<Reassignment> {
        let mut uow = UnitOfWork::begin(ctx.db_service).await?;
        let result = self
            .reassign(uow.store(), pull_request_id, old_reviewer_id)
            .await;

        uow.finish(result).await
    }
}

impl ReassignReviewer {
    async fn reassign(
        &self,
        tx: &mut dyn DbTransaction,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> Result<Reassignment> {
        let pr = tx.pull_requests_get_for_update_expect(pull_request_id).await?;
        if pr.is_merged() {
            warn!(pull_request_id = %pull_request_id, "Cannot reassign on a merged pull request");
            return Err(DomainError::CannotReassignMergedPullRequest(
                pull_request_id.into(),
            ));
        }

        let old_reviewer = tx
            .users_get(old_reviewer_id)
            .await?
            .ok_or_else(|| DomainError::ReviewerNotFound(old_reviewer_id.into()))?;

        if !pr.has_reviewer(old_reviewer_id) {
            return Err(DomainError::ReviewerNotAssigned {
                pull_request_id: pull_request_id.into(),
                reviewer_id: old_reviewer_id.into(),
            });
        }

        let replacement = pick_teammate_replacement(tx, &pr, &old_reviewer).await?;
        tx.pull_requests_replace_reviewer(pull_request_id, old_reviewer_id, &replacement.id)
            .await?;

        info!(
            pull_request_id = %pull_request_id,
            old_reviewer_id = %old_reviewer_id,
            new_reviewer_id = %replacement.id,
            "Reviewer reassigned"
        );

        Ok(Reassignment {
            pull_request: tx.pull_requests_get_expect(pull_request_id).await?,
            replaced_by: replacement.id,
        })
    }
}
