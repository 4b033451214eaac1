use revbot_database_interface::{PullRequestStore, TeamStore, UserStore};

use crate::testcase::db_test_case;

#[tokio::test]
async fn rollback() {
    db_test_case("transaction_rollback", |db| async move {
        let mut tx = db.begin().await?;
        let team = tx.teams_create("backend").await?;
        tx.users_create("u1", "Alice", team.id, true).await?;
        tx.rollback().await?;

        let mut tx = db.begin().await?;
        assert_eq!(tx.teams_get("backend").await?, None);
        assert_eq!(tx.users_get("u1").await?, None);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn commit() {
    db_test_case("transaction_commit", |db| async move {
        let mut tx = db.begin().await?;
        let team = tx.teams_create("backend").await?;
        tx.users_create("u1", "Alice", team.id, true).await?;
        tx.pull_requests_create("pr-1", "One", "u1", 1, true)
            .await?;
        tx.commit().await?;

        let mut tx = db.begin().await?;
        assert!(tx.users_get("u1").await?.is_some());
        assert!(tx.pull_requests_get_for_update("pr-1").await?.is_some());
        assert_eq!(tx.pull_requests_get_for_update("pr-2").await?, None);

        Ok(())
    })
    .await;
}
