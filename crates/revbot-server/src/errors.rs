//! Server errors.

use actix_http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use revbot_core::{DomainError, ErrorKind};
use thiserror::Error;

use crate::dto::ErrorResponse;

/// Server error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error,\n  caused by: {}", source)]
    IoError { source: std::io::Error },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    DomainError { source: DomainError },
}

impl From<DomainError> for ServerError {
    fn from(source: DomainError) -> Self {
        Self::DomainError { source }
    }
}

impl ServerError {
    /// Error code exposed in response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::IoError { .. } => "INTERNAL",
            Self::DomainError { source } => match source {
                DomainError::TeamAlreadyExists(_) => "TEAM_EXISTS",
                DomainError::UserAlreadyExists(_) => "USER_EXISTS",
                DomainError::PullRequestAlreadyExists(_) => "PR_EXISTS",
                DomainError::ReviewerAlreadyAssigned { .. } => "ALREADY_ASSIGNED",
                DomainError::PullRequestAlreadyHasTwoReviewers(_) => "NOT_ASSIGNED",
                DomainError::CannotReassignMergedPullRequest(_) => "PR_MERGED",
                DomainError::NoMoreReviewersToReassign(_) => "NO_CANDIDATE",
                e if e.kind() == ErrorKind::NotFound => "NOT_FOUND",
                _ => "INTERNAL",
            },
        }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::IoError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::DomainError { source } => match source.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Conflict
                | ErrorKind::InvalidStateTransition
                | ErrorKind::ResourceExhausted => StatusCode::CONFLICT,
                ErrorKind::InternalInconsistency | ErrorKind::Internal => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        HttpResponse::build(status_code).json(ErrorResponse::new(self.code(), self.to_string()))
    }
}

/// Result alias for `ServerError`.
pub type Result<T> = core::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn status_and_code(e: DomainError) -> (StatusCode, &'static str) {
        let e = ServerError::from(e);
        (e.status_code(), e.code())
    }

    #[test]
    fn domain_errors() {
        assert_eq!(
            status_and_code(DomainError::PullRequestNotFound("pr1".into())),
            (StatusCode::NOT_FOUND, "NOT_FOUND")
        );
        assert_eq!(
            status_and_code(DomainError::TeamAlreadyExists("backend".into())),
            (StatusCode::CONFLICT, "TEAM_EXISTS")
        );
        assert_eq!(
            status_and_code(DomainError::PullRequestAlreadyHasTwoReviewers("pr1".into())),
            (StatusCode::CONFLICT, "NOT_ASSIGNED")
        );
        assert_eq!(
            status_and_code(DomainError::CannotReassignMergedPullRequest("pr1".into())),
            (StatusCode::CONFLICT, "PR_MERGED")
        );
        assert_eq!(
            status_and_code(DomainError::NoMoreReviewersToReassign("pr1".into())),
            (StatusCode::CONFLICT, "NO_CANDIDATE")
        );
        assert_eq!(
            status_and_code(DomainError::StatusNotFound("MERGED".into())),
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL")
        );
    }

    #[test]
    fn bad_request() {
        let e = ServerError::BadRequest("missing field".into());
        assert_eq!(e.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(e.code(), "BAD_REQUEST");
    }
}
