//! Reviewer selection policy.

use revbot_database_interface::{DbTransaction, UserStore};
use revbot_models::{PullRequest, User, MAX_REVIEWERS_COUNT};
use tracing::{error, warn};

use crate::{DomainError, Result};

/// Picks up to two active teammates of the author.
pub(crate) async fn pick_initial_reviewers(
    tx: &mut dyn DbTransaction,
    author: &User,
) -> Result<Vec<User>> {
    let exclude_ids = vec![author.id.clone()];

    Ok(tx
        .users_random_active_teammates(author.team_id, MAX_REVIEWERS_COUNT, &exclude_ids)
        .await?)
}

/// Picks one active teammate of the replaced reviewer.
///
/// The author and every current reviewer are excluded.
pub(crate) async fn pick_teammate_replacement(
    tx: &mut dyn DbTransaction,
    pull_request: &PullRequest,
    old_reviewer: &User,
) -> Result<User> {
    let exclude_ids = exclusions(pull_request, &[]);
    let candidates = tx
        .users_random_active_teammates(old_reviewer.team_id, 1, &exclude_ids)
        .await?;

    expect_single_candidate(&pull_request.id, candidates)
}

/// Picks one active user from any team, outside of the deactivated set.
///
/// The author and every current reviewer are excluded.
pub(crate) async fn pick_cascade_replacement(
    tx: &mut dyn DbTransaction,
    pull_request: &PullRequest,
    deactivated_ids: &[String],
) -> Result<User> {
    let exclude_ids = exclusions(pull_request, deactivated_ids);
    let candidates = tx.users_random_active(1, &exclude_ids).await?;

    expect_single_candidate(&pull_request.id, candidates)
}

fn exclusions(pull_request: &PullRequest, extra_ids: &[String]) -> Vec<String> {
    let mut ids = vec![pull_request.author_id.clone()];
    for id in pull_request.reviewers.iter().chain(extra_ids) {
        if !ids.contains(id) {
            ids.push(id.clone());
        }
    }

    ids
}

fn expect_single_candidate(pull_request_id: &str, mut candidates: Vec<User>) -> Result<User> {
    match candidates.len() {
        0 => {
            warn!(pull_request_id = %pull_request_id, "No candidate left for reassignment");
            Err(DomainError::NoMoreReviewersToReassign(pull_request_id.into()))
        }
        1 => Ok(candidates.remove(0)),
        count => {
            error!(pull_request_id = %pull_request_id, count = count, "Candidate selection returned too many users");
            Err(DomainError::CannotFetchNewReviewer {
                pull_request_id: pull_request_id.into(),
                count,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn user(id: &str) -> User {
        User {
            id: id.into(),
            ..Default::default()
        }
    }

    #[test]
    fn exclusion_set() {
        let pr = PullRequest {
            author_id: "a".into(),
            reviewers: vec!["r1".into(), "r2".into()],
            ..Default::default()
        };

        assert_eq!(exclusions(&pr, &[]), vec!["a", "r1", "r2"]);
        assert_eq!(
            exclusions(&pr, &["r1".into(), "d1".into()]),
            vec!["a", "r1", "r2", "d1"]
        );
    }

    #[test]
    fn single_candidate() {
        assert_eq!(
            expect_single_candidate("pr1", vec![user("u1")]).unwrap().id,
            "u1"
        );

        assert!(matches!(
            expect_single_candidate("pr1", vec![]),
            Err(DomainError::NoMoreReviewersToReassign(_))
        ));

        assert!(matches!(
            expect_single_candidate("pr1", vec![user("u1"), user("u2")]),
            Err(DomainError::CannotFetchNewReviewer { count: 2, .. })
        ));
    }
}
