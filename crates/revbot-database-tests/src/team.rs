use pretty_assertions::assert_eq;
use revbot_database_interface::{DatabaseError, TeamStore, UserStore};

use crate::testcase::db_test_case;

#[tokio::test]
async fn create() {
    db_test_case("team_create", |db| async move {
        let mut tx = db.begin().await?;
        let team = tx.teams_create("backend").await?;
        assert_eq!(team.name, "backend");
        assert_eq!(tx.teams_get("backend").await?, Some(team));
        tx.commit().await?;

        let mut tx = db.begin().await?;
        assert!(matches!(
            tx.teams_create("backend").await,
            Err(DatabaseError::TeamAlreadyExists(_))
        ));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn get_expect() {
    db_test_case("team_get_expect", |db| async move {
        let mut tx = db.begin().await?;
        assert_eq!(tx.teams_get("nope").await?, None);
        assert!(matches!(
            tx.teams_get_expect("nope").await,
            Err(DatabaseError::UnknownTeam(_))
        ));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn all() {
    db_test_case("team_all", |db| async move {
        let mut tx = db.begin().await?;
        for name in ["a", "b", "c"] {
            tx.teams_create(name).await?;
        }

        let (teams, total) = tx.teams_all(2, 0).await?;
        assert_eq!(total, 3);
        assert_eq!(
            teams.iter().map(|t| &t.name[..]).collect::<Vec<_>>(),
            vec!["c", "b"]
        );

        let (teams, total) = tx.teams_all(2, 2).await?;
        assert_eq!(total, 3);
        assert_eq!(
            teams.iter().map(|t| &t.name[..]).collect::<Vec<_>>(),
            vec!["a"]
        );

        let (teams, _) = tx.teams_all(2, 4).await?;
        assert!(teams.is_empty());

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn deactivate_members() {
    db_test_case("team_deactivate_members", |db| async move {
        let mut tx = db.begin().await?;
        let team = tx.teams_create("backend").await?;
        let other = tx.teams_create("frontend").await?;
        tx.users_create("u1", "Alice", team.id, true).await?;
        tx.users_create("u2", "Bob", team.id, false).await?;
        tx.users_create("u3", "Carol", team.id, true).await?;
        tx.users_create("u4", "Dave", other.id, true).await?;

        let flipped = tx.teams_deactivate_members("backend").await?;
        assert_eq!(
            flipped.iter().map(|u| &u.id[..]).collect::<Vec<_>>(),
            vec!["u1", "u3"]
        );
        assert!(flipped.iter().all(|u| !u.is_active && u.team_name == "backend"));
        assert!(tx.users_get_expect("u4").await?.is_active);

        // Nothing left to flip
        assert!(tx.teams_deactivate_members("backend").await?.is_empty());

        assert!(matches!(
            tx.teams_deactivate_members("nope").await,
            Err(DatabaseError::UnknownTeam(_))
        ));

        Ok(())
    })
    .await;
}
