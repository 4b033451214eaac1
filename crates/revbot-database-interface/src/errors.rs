use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Unknown pull request '{0}'")]
    UnknownPullRequest(String),

    #[error("Pull request '{0}' already exists")]
    PullRequestAlreadyExists(String),

    #[error("Unknown author '{0}'")]
    UnknownAuthor(String),

    #[error("Unknown user '{0}'")]
    UnknownUser(String),

    #[error("User '{0}' already exists")]
    UserAlreadyExists(String),

    #[error("Unknown team '{0}'")]
    UnknownTeam(String),

    #[error("Unknown team ID '{0}'")]
    UnknownTeamId(u64),

    #[error("Team '{0}' already exists")]
    TeamAlreadyExists(String),

    #[error("Unknown reviewer '{0}'")]
    UnknownReviewer(String),

    #[error("Reviewer '{1}' is already assigned to pull request '{0}'")]
    ReviewerAlreadyAssigned(String, String),

    #[error("Reviewer '{1}' is not assigned to pull request '{0}'")]
    UnknownReviewerAssignment(String, String),

    #[error("Unknown pull request status ID '{0}'")]
    UnknownStatusId(u64),

    #[error("Transaction error: {source}")]
    TransactionError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

pub type Result<T, E = DatabaseError> = core::result::Result<T, E>;
