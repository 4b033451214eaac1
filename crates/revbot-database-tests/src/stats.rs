use pretty_assertions::assert_eq;
use revbot_database_interface::{PullRequestStore, StatsStore, TeamStore, UserStore};
use revbot_models::{
    MostActiveTeam, PullRequestStats, Stats, TeamStats, UserAssignmentCount, UserStats,
};
use time::OffsetDateTime;

use crate::testcase::db_test_case;

#[tokio::test]
async fn empty() {
    db_test_case("stats_empty", |db| async move {
        let mut tx = db.begin().await?;
        assert_eq!(tx.stats_get().await?, Stats::default());

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn aggregates() {
    db_test_case("stats_aggregates", |db| async move {
        let mut tx = db.begin().await?;
        let backend = tx.teams_create("backend").await?;
        let frontend = tx.teams_create("frontend").await?;
        tx.users_create("u1", "Alice", backend.id, true).await?;
        tx.users_create("u2", "Bob", backend.id, true).await?;
        tx.users_create("u3", "Carol", backend.id, false).await?;
        tx.users_create("u4", "Dave", frontend.id, true).await?;

        tx.pull_requests_create("pr-1", "One", "u1", 1, true).await?;
        tx.pull_requests_create("pr-2", "Two", "u1", 1, true).await?;
        tx.pull_requests_create("pr-3", "Three", "u4", 1, true).await?;
        tx.pull_requests_assign_reviewers("pr-1", &["u2".into()])
            .await?;
        tx.pull_requests_assign_reviewers("pr-2", &["u2".into(), "u3".into()])
            .await?;
        tx.pull_requests_set_status("pr-2", 2, Some(OffsetDateTime::now_utc()))
            .await?;

        assert_eq!(
            tx.stats_get().await?,
            Stats {
                pull_requests: PullRequestStats {
                    total: 3,
                    open: 2,
                    merged: 1
                },
                users: UserStats {
                    most_busy_users: vec![
                        UserAssignmentCount {
                            user_id: "u2".into(),
                            user_name: "Bob".into(),
                            assignments: 2
                        },
                        UserAssignmentCount {
                            user_id: "u3".into(),
                            user_name: "Carol".into(),
                            assignments: 1
                        }
                    ],
                    active: 3,
                    inactive: 1
                },
                teams: TeamStats {
                    total: 2,
                    most_active_team: Some(MostActiveTeam {
                        team_name: "backend".into(),
                        pull_requests_count: 2
                    })
                }
            }
        );

        Ok(())
    })
    .await;
}
