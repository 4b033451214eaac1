use pretty_assertions::assert_eq;
use revbot_database_interface::{
    DatabaseError, DbTransaction, PullRequestStore, TeamStore, UserStore,
};
use revbot_models::{PullRequestStatus, PullRequestStatusEntry};
use time::OffsetDateTime;

use crate::testcase::db_test_case;

const OPEN: u64 = 1;
const MERGED: u64 = 2;

async fn seed_users(tx: &mut dyn DbTransaction) -> Result<(), DatabaseError> {
    let team = tx.teams_create("backend").await?;
    tx.users_create("u1", "Alice", team.id, true).await?;
    tx.users_create("u2", "Bob", team.id, true).await?;
    tx.users_create("u3", "Carol", team.id, true).await?;
    Ok(())
}

#[tokio::test]
async fn statuses() {
    db_test_case("pull_request_statuses", |db| async move {
        let mut tx = db.begin().await?;
        assert_eq!(
            tx.pull_request_statuses_all().await?,
            vec![
                PullRequestStatusEntry {
                    id: OPEN,
                    name: "OPEN".into()
                },
                PullRequestStatusEntry {
                    id: MERGED,
                    name: "MERGED".into()
                }
            ]
        );
        assert_eq!(
            tx.pull_request_statuses_get_expect(MERGED).await?.status(),
            Some(PullRequestStatus::Merged)
        );
        assert!(matches!(
            tx.pull_request_statuses_get_expect(99).await,
            Err(DatabaseError::UnknownStatusId(99))
        ));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn create() {
    db_test_case("pull_request_create", |db| async move {
        let mut tx = db.begin().await?;
        seed_users(&mut *tx).await?;

        let pr = tx
            .pull_requests_create("pr-1", "Add search", "u1", OPEN, true)
            .await?;
        assert_eq!(pr.id, "pr-1");
        assert_eq!(pr.title, "Add search");
        assert_eq!(pr.author_id, "u1");
        assert_eq!(pr.status, PullRequestStatus::Open);
        assert!(pr.needs_more_reviewers);
        assert_eq!(pr.merged_at, None);
        assert!(pr.reviewers.is_empty());
        tx.commit().await?;

        let mut tx = db.begin().await?;
        assert!(matches!(
            tx.pull_requests_create("pr-1", "Other", "u1", OPEN, true)
                .await,
            Err(DatabaseError::PullRequestAlreadyExists(_))
        ));
        tx.rollback().await?;

        let mut tx = db.begin().await?;
        assert!(matches!(
            tx.pull_requests_create("pr-2", "Add search", "u1", OPEN, true)
                .await,
            Err(DatabaseError::PullRequestAlreadyExists(_))
        ));
        tx.rollback().await?;

        let mut tx = db.begin().await?;
        assert!(matches!(
            tx.pull_requests_create("pr-2", "Other", "nope", OPEN, true)
                .await,
            Err(DatabaseError::UnknownAuthor(_))
        ));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn assign_reviewers() {
    db_test_case("pull_request_assign_reviewers", |db| async move {
        let mut tx = db.begin().await?;
        seed_users(&mut *tx).await?;
        tx.pull_requests_create("pr-1", "Add search", "u1", OPEN, true)
            .await?;

        tx.pull_requests_assign_reviewers("pr-1", &["u2".into(), "u3".into()])
            .await?;
        assert_eq!(
            tx.pull_requests_get_expect("pr-1").await?.reviewers,
            vec!["u2", "u3"]
        );

        let assignments = tx.reviewer_assignments_list("pr-1").await?;
        assert_eq!(assignments.len(), 2);
        assert!(assignments.iter().all(|a| a.pull_request_id == "pr-1"));
        tx.commit().await?;

        let mut tx = db.begin().await?;
        assert!(matches!(
            tx.pull_requests_assign_reviewers("pr-1", &["u2".into()])
                .await,
            Err(DatabaseError::ReviewerAlreadyAssigned(_, _))
        ));
        tx.rollback().await?;

        let mut tx = db.begin().await?;
        assert!(matches!(
            tx.pull_requests_assign_reviewers("pr-1", &["nope".into()])
                .await,
            Err(DatabaseError::UnknownReviewer(_))
        ));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn replace_reviewer() {
    db_test_case("pull_request_replace_reviewer", |db| async move {
        let mut tx = db.begin().await?;
        seed_users(&mut *tx).await?;
        tx.pull_requests_create("pr-1", "Add search", "u1", OPEN, true)
            .await?;
        tx.pull_requests_assign_reviewers("pr-1", &["u2".into()])
            .await?;

        tx.pull_requests_replace_reviewer("pr-1", "u2", "u3")
            .await?;
        assert_eq!(
            tx.pull_requests_get_expect("pr-1").await?.reviewers,
            vec!["u3"]
        );
        assert!(tx.pull_requests_list_by_reviewer("u2").await?.is_empty());
        tx.commit().await?;

        let mut tx = db.begin().await?;
        assert!(matches!(
            tx.pull_requests_replace_reviewer("pr-1", "u2", "u1")
                .await,
            Err(DatabaseError::UnknownReviewerAssignment(_, _))
        ));
        tx.rollback().await?;

        let mut tx = db.begin().await?;
        tx.pull_requests_assign_reviewers("pr-1", &["u2".into()])
            .await?;
        assert!(matches!(
            tx.pull_requests_replace_reviewer("pr-1", "u2", "u3")
                .await,
            Err(DatabaseError::ReviewerAlreadyAssigned(_, _))
        ));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn set_status() {
    db_test_case("pull_request_set_status", |db| async move {
        let mut tx = db.begin().await?;
        seed_users(&mut *tx).await?;
        tx.pull_requests_create("pr-1", "Add search", "u1", OPEN, true)
            .await?;

        let now = OffsetDateTime::now_utc();
        tx.pull_requests_set_status("pr-1", MERGED, Some(now))
            .await?;
        tx.pull_requests_set_needs_more_reviewers("pr-1", false)
            .await?;

        let pr = tx.pull_requests_get_expect("pr-1").await?;
        assert!(pr.is_merged());
        assert!(pr.merged_at.is_some());
        assert!(!pr.needs_more_reviewers);

        assert!(matches!(
            tx.pull_requests_set_status("nope", MERGED, None).await,
            Err(DatabaseError::UnknownPullRequest(_))
        ));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn all_and_by_reviewer() {
    db_test_case("pull_request_all_and_by_reviewer", |db| async move {
        let mut tx = db.begin().await?;
        seed_users(&mut *tx).await?;
        for (id, title) in [("pr-1", "One"), ("pr-2", "Two"), ("pr-3", "Three")] {
            tx.pull_requests_create(id, title, "u1", OPEN, true).await?;
        }
        tx.pull_requests_assign_reviewers("pr-1", &["u2".into()])
            .await?;
        tx.pull_requests_assign_reviewers("pr-3", &["u2".into(), "u3".into()])
            .await?;

        let (page, total) = tx.pull_requests_all(2, 0).await?;
        assert_eq!(total, 3);
        assert_eq!(
            page.iter().map(|p| &p.id[..]).collect::<Vec<_>>(),
            vec!["pr-3", "pr-2"]
        );

        let (page, _) = tx.pull_requests_all(2, 2).await?;
        assert_eq!(
            page.iter().map(|p| &p.id[..]).collect::<Vec<_>>(),
            vec!["pr-1"]
        );

        let reviewed = tx.pull_requests_list_by_reviewer("u2").await?;
        assert_eq!(
            reviewed.iter().map(|p| &p.id[..]).collect::<Vec<_>>(),
            vec!["pr-1", "pr-3"]
        );
        assert!(tx.pull_requests_list_by_reviewer("u1").await?.is_empty());

        Ok(())
    })
    .await;
}
