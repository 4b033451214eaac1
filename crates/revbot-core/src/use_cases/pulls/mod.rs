pub(crate) mod assign_reviewer;
pub(crate) mod create_pull_request;
pub(crate) mod list_pull_requests;
pub(crate) mod merge_pull_request;
pub(crate) mod reassign_reviewer;

pub use assign_reviewer::AssignReviewerInterface;
pub use create_pull_request::CreatePullRequestInterface;
pub use list_pull_requests::ListPullRequestsInterface;
pub use merge_pull_request::MergePullRequestInterface;
pub use reassign_reviewer::{Reassignment, ReassignReviewerInterface};
use revbot_database_interface::{DbTransaction, PullRequestStore};
use revbot_models::PullRequestStatus;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    assign_reviewer::MockAssignReviewerInterface,
    create_pull_request::MockCreatePullRequestInterface,
    list_pull_requests::MockListPullRequestsInterface,
    merge_pull_request::MockMergePullRequestInterface,
    reassign_reviewer::MockReassignReviewerInterface,
};
use crate::{DomainError, Result};

/// Looks up the catalog identifier of a status.
pub(crate) async fn resolve_status_id(
    tx: &mut dyn DbTransaction,
    status: PullRequestStatus,
) -> Result<u64> {
    tx.pull_request_statuses_all()
        .await?
        .into_iter()
        .find(|entry| entry.status() == Some(status))
        .map(|entry| entry.id)
        .ok_or_else(|| DomainError::StatusNotFound(status.to_string()))
}
