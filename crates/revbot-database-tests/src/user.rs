use pretty_assertions::assert_eq;
use revbot_database_interface::{DatabaseError, TeamStore, UserStore};

use crate::testcase::db_test_case;

#[tokio::test]
async fn create() {
    db_test_case("user_create", |db| async move {
        let mut tx = db.begin().await?;
        assert!(matches!(
            tx.users_create("u1", "Alice", 1, true).await,
            Err(DatabaseError::UnknownTeamId(1))
        ));
        tx.rollback().await?;

        let mut tx = db.begin().await?;
        let team = tx.teams_create("backend").await?;
        let user = tx.users_create("u1", "Alice", team.id, true).await?;
        assert_eq!(user.id, "u1");
        assert_eq!(user.name, "Alice");
        assert_eq!(user.team_id, team.id);
        assert_eq!(user.team_name, "backend");
        assert!(user.is_active);
        tx.commit().await?;

        let mut tx = db.begin().await?;
        assert!(matches!(
            tx.users_create("u1", "Other", team.id, true).await,
            Err(DatabaseError::UserAlreadyExists(_))
        ));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn list_by_team() {
    db_test_case("user_list_by_team", |db| async move {
        let mut tx = db.begin().await?;
        let team = tx.teams_create("backend").await?;
        let other = tx.teams_create("frontend").await?;
        tx.users_create("u2", "Bob", team.id, false).await?;
        tx.users_create("u1", "Alice", team.id, true).await?;
        tx.users_create("u3", "Carol", other.id, true).await?;

        let users = tx.users_list_by_team(team.id).await?;
        assert_eq!(
            users.iter().map(|u| &u.id[..]).collect::<Vec<_>>(),
            vec!["u1", "u2"]
        );

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn set_active() {
    db_test_case("user_set_active", |db| async move {
        let mut tx = db.begin().await?;
        let team = tx.teams_create("backend").await?;
        tx.users_create("u1", "Alice", team.id, true).await?;

        let user = tx.users_set_active("u1", false).await?;
        assert!(!user.is_active);
        assert!(!tx.users_get_expect("u1").await?.is_active);

        assert!(matches!(
            tx.users_set_active("nope", true).await,
            Err(DatabaseError::UnknownUser(_))
        ));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn random_active_teammates() {
    db_test_case("user_random_active_teammates", |db| async move {
        let mut tx = db.begin().await?;
        let team = tx.teams_create("backend").await?;
        let other = tx.teams_create("frontend").await?;
        tx.users_create("u1", "Alice", team.id, true).await?;
        tx.users_create("u2", "Bob", team.id, true).await?;
        tx.users_create("u3", "Carol", team.id, true).await?;
        tx.users_create("u4", "Dave", team.id, false).await?;
        tx.users_create("u5", "Eve", other.id, true).await?;

        for _ in 0..10 {
            let users = tx
                .users_random_active_teammates(team.id, 2, &["u1".into()])
                .await?;
            assert_eq!(users.len(), 2);
            assert_ne!(users[0].id, users[1].id);
            for user in users {
                assert!(["u2", "u3"].contains(&&user.id[..]));
            }
        }

        let users = tx
            .users_random_active_teammates(team.id, 5, &["u1".into(), "u2".into()])
            .await?;
        assert_eq!(
            users.iter().map(|u| &u.id[..]).collect::<Vec<_>>(),
            vec!["u3"]
        );

        let users = tx
            .users_random_active_teammates(other.id, 2, &["u5".into()])
            .await?;
        assert!(users.is_empty());

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn random_active() {
    db_test_case("user_random_active", |db| async move {
        let mut tx = db.begin().await?;
        let team = tx.teams_create("backend").await?;
        let other = tx.teams_create("frontend").await?;
        tx.users_create("u1", "Alice", team.id, false).await?;
        tx.users_create("u2", "Bob", other.id, true).await?;
        tx.users_create("u3", "Carol", other.id, true).await?;

        let users = tx.users_random_active(5, &["u3".into()]).await?;
        assert_eq!(
            users.iter().map(|u| &u.id[..]).collect::<Vec<_>>(),
            vec!["u2"]
        );

        Ok(())
    })
    .await;
}
