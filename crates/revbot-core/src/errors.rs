//! Workflow errors.

use revbot_database_interface::DatabaseError;
use thiserror::Error;

/// Error category, used by outer layers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    InvalidStateTransition,
    ResourceExhausted,
    InternalInconsistency,
    Internal,
}

/// Workflow error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Pull request '{0}' not found")]
    PullRequestNotFound(String),

    #[error("Author '{0}' not found")]
    AuthorNotFound(String),

    #[error("Reviewer '{0}' not found")]
    ReviewerNotFound(String),

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("Team '{0}' not found")]
    TeamNotFound(String),

    #[error("Pull request status '{0}' not found")]
    StatusNotFound(String),

    #[error("User '{reviewer_id}' is not a reviewer of pull request '{pull_request_id}'")]
    ReviewerNotAssigned {
        pull_request_id: String,
        reviewer_id: String,
    },

    #[error("Pull request '{0}' already exists")]
    PullRequestAlreadyExists(String),

    #[error("Team '{0}' already exists")]
    TeamAlreadyExists(String),

    #[error("User '{0}' already exists")]
    UserAlreadyExists(String),

    #[error("User '{reviewer_id}' is already a reviewer of pull request '{pull_request_id}'")]
    ReviewerAlreadyAssigned {
        pull_request_id: String,
        reviewer_id: String,
    },

    #[error("Pull request '{0}' already has two reviewers")]
    PullRequestAlreadyHasTwoReviewers(String),

    #[error("Cannot reassign a reviewer on merged pull request '{0}'")]
    CannotReassignMergedPullRequest(String),

    #[error("No active candidate left to review pull request '{0}'")]
    NoMoreReviewersToReassign(String),

    #[error("Expected a single new reviewer for pull request '{pull_request_id}', got {count}")]
    CannotFetchNewReviewer {
        pull_request_id: String,
        count: usize,
    },

    /// Wraps [`revbot_database_interface::DatabaseError`].
    #[error("Database error: {source}")]
    DatabaseError { source: DatabaseError },
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PullRequestNotFound(_)
            | Self::AuthorNotFound(_)
            | Self::ReviewerNotFound(_)
            | Self::UserNotFound(_)
            | Self::TeamNotFound(_)
            | Self::ReviewerNotAssigned { .. } => ErrorKind::NotFound,
            Self::PullRequestAlreadyExists(_)
            | Self::TeamAlreadyExists(_)
            | Self::UserAlreadyExists(_)
            | Self::ReviewerAlreadyAssigned { .. } => ErrorKind::Conflict,
            Self::PullRequestAlreadyHasTwoReviewers(_)
            | Self::CannotReassignMergedPullRequest(_) => ErrorKind::InvalidStateTransition,
            Self::NoMoreReviewersToReassign(_) => ErrorKind::ResourceExhausted,
            Self::StatusNotFound(_) | Self::CannotFetchNewReviewer { .. } => {
                ErrorKind::InternalInconsistency
            }
            Self::DatabaseError { .. } => ErrorKind::Internal,
        }
    }
}

impl From<DatabaseError> for DomainError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::UnknownPullRequest(id) => Self::PullRequestNotFound(id),
            DatabaseError::PullRequestAlreadyExists(id) => Self::PullRequestAlreadyExists(id),
            DatabaseError::UnknownAuthor(id) => Self::AuthorNotFound(id),
            DatabaseError::UnknownUser(id) => Self::UserNotFound(id),
            DatabaseError::UserAlreadyExists(id) => Self::UserAlreadyExists(id),
            DatabaseError::UnknownTeam(name) => Self::TeamNotFound(name),
            DatabaseError::UnknownTeamId(id) => Self::TeamNotFound(id.to_string()),
            DatabaseError::TeamAlreadyExists(name) => Self::TeamAlreadyExists(name),
            DatabaseError::UnknownReviewer(id) => Self::ReviewerNotFound(id),
            DatabaseError::ReviewerAlreadyAssigned(pull_request_id, reviewer_id) => {
                Self::ReviewerAlreadyAssigned {
                    pull_request_id,
                    reviewer_id,
                }
            }
            DatabaseError::UnknownReviewerAssignment(pull_request_id, reviewer_id) => {
                Self::ReviewerNotAssigned {
                    pull_request_id,
                    reviewer_id,
                }
            }
            DatabaseError::UnknownStatusId(id) => Self::StatusNotFound(id.to_string()),
            e @ (DatabaseError::TransactionError { .. }
            | DatabaseError::ImplementationError { .. }) => Self::DatabaseError { source: e },
        }
    }
}

/// Result alias for `DomainError`.
pub type Result<T, E = DomainError> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn from_database_error() {
        let e: DomainError = DatabaseError::UnknownReviewerAssignment("pr1".into(), "u1".into()).into();
        assert!(matches!(e, DomainError::ReviewerNotAssigned { .. }));
        assert_eq!(e.kind(), ErrorKind::NotFound);

        let e: DomainError = DatabaseError::UnknownTeamId(3).into();
        assert!(matches!(e, DomainError::TeamNotFound(ref t) if t == "3"));

        let e: DomainError = DatabaseError::ImplementationError {
            source: "boom".into(),
        }
        .into();
        assert_eq!(e.kind(), ErrorKind::Internal);
    }

    #[test]
    fn kinds() {
        assert_eq!(
            DomainError::PullRequestAlreadyHasTwoReviewers("pr1".into()).kind(),
            ErrorKind::InvalidStateTransition
        );
        assert_eq!(
            DomainError::NoMoreReviewersToReassign("pr1".into()).kind(),
            ErrorKind::ResourceExhausted
        );
        assert_eq!(
            DomainError::CannotFetchNewReviewer {
                pull_request_id: "pr1".into(),
                count: 2
            }
            .kind(),
            ErrorKind::InternalInconsistency
        );
    }
}
