use async_trait::async_trait;
use revbot_database_interface::{
    DatabaseError, DbService, DbTransaction, PullRequestStore, Result, StatsStore, TeamStore,
    UserStore,
};
use revbot_models::{
    MostActiveTeam, PullRequest, PullRequestStats, PullRequestStatusEntry, ReviewerAssignment,
    Stats, Team, TeamStats, User, UserAssignmentCount, UserStats,
};
use sqlx::{PgPool, Postgres, Row, Transaction};
use time::OffsetDateTime;

use crate::row::{
    PullRequestRow, PullRequestStatusEntryRow, ReviewerAssignmentRow, TeamRow, UserRow,
};

const PULL_REQUEST_SELECT: &str = r#"
    SELECT
        p.id,
        p.title,
        p.author_id,
        s.name AS status_name,
        p.needs_more_reviewers,
        p.created_at,
        p.merged_at,
        ARRAY(
            SELECT r.reviewer_id
            FROM pull_request_reviewer r
            WHERE r.pull_request_id = p.id
            ORDER BY r.id
        )::TEXT[] AS reviewers
    FROM pull_request p
    INNER JOIN pull_request_status s ON s.id = p.status_id
"#;

const USER_SELECT: &str = r#"
    SELECT
        u.id,
        u.name,
        u.is_active,
        u.team_id,
        t.name AS team_name,
        u.created_at
    FROM app_user u
    INNER JOIN team t ON t.id = u.team_id
"#;

const MOST_BUSY_USERS_COUNT: i64 = 5;

pub struct PostgresDb {
    pool: PgPool,
}

impl PostgresDb {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DbService for PostgresDb {
    async fn begin(&self) -> Result<Box<dyn DbTransaction>> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::TransactionError { source: e.into() })?;

        Ok(Box::new(PostgresTransaction { tx }))
    }

    #[tracing::instrument(skip(self))]
    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1;")
            .execute(&self.pool)
            .await
            .map_err(wrap_implementation_error)?;

        Ok(())
    }
}

pub struct PostgresTransaction {
    tx: Transaction<'static, Postgres>,
}

fn wrap_implementation_error(e: sqlx::Error) -> DatabaseError {
    DatabaseError::ImplementationError { source: e.into() }
}

/// Postgres has no unsigned integers, out-of-range values are clamped.
fn to_sql_bigint(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Maps a constraint violation to a domain error, by constraint name.
fn wrap_constraint_violation<F>(e: sqlx::Error, map: F) -> DatabaseError
where
    F: FnOnce(&str) -> Option<DatabaseError>,
{
    let mapped = e
        .as_database_error()
        .and_then(|db_error| db_error.constraint())
        .and_then(map);

    mapped.unwrap_or_else(|| wrap_implementation_error(e))
}

#[async_trait]
impl PullRequestStore for PostgresTransaction {
    #[tracing::instrument(skip(self))]
    async fn pull_requests_create(
        &mut self,
        id: &str,
        title: &str,
        author_id: &str,
        status_id: u64,
        needs_more_reviewers: bool,
    ) -> Result<PullRequest> {
        sqlx::query(
            r#"
            INSERT INTO pull_request
            (
                id,
                title,
                author_id,
                status_id,
                needs_more_reviewers
            )
            VALUES
            (
                $1,
                $2,
                $3,
                $4,
                $5
            );
        "#,
        )
        .bind(id)
        .bind(title)
        .bind(author_id)
        .bind(status_id as i32)
        .bind(needs_more_reviewers)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| {
            wrap_constraint_violation(e, |constraint| match constraint {
                "pull_request_pkey" => Some(DatabaseError::PullRequestAlreadyExists(id.into())),
                "pull_request_title_key" => {
                    Some(DatabaseError::PullRequestAlreadyExists(title.into()))
                }
                "pull_request_author_id_fkey" => {
                    Some(DatabaseError::UnknownAuthor(author_id.into()))
                }
                "pull_request_status_id_fkey" => Some(DatabaseError::UnknownStatusId(status_id)),
                _ => None,
            })
        })?;

        self.pull_requests_get_expect(id).await
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_get(&mut self, id: &str) -> Result<Option<PullRequest>> {
        let row = sqlx::query_as::<_, PullRequestRow>(&format!(
            r#"
            {PULL_REQUEST_SELECT}
            WHERE p.id = $1
        "#
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(wrap_implementation_error)?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_get_for_update(&mut self, id: &str) -> Result<Option<PullRequest>> {
        let row = sqlx::query_as::<_, PullRequestRow>(&format!(
            r#"
            {PULL_REQUEST_SELECT}
            WHERE p.id = $1
            FOR UPDATE OF p
        "#
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(wrap_implementation_error)?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_all(
        &mut self,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<PullRequest>, u64)> {
        let total: i64 = sqlx::query("SELECT COUNT(*) FROM pull_request;")
            .fetch_one(&mut *self.tx)
            .await
            .map_err(wrap_implementation_error)?
            .get(0);

        let rows = sqlx::query_as::<_, PullRequestRow>(&format!(
            r#"
            {PULL_REQUEST_SELECT}
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $1
            OFFSET $2
        "#
        ))
        .bind(to_sql_bigint(limit))
        .bind(to_sql_bigint(offset))
        .fetch_all(&mut *self.tx)
        .await
        .map_err(wrap_implementation_error)?;

        Ok((rows.into_iter().map(Into::into).collect(), total as u64))
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_list_by_reviewer(&mut self, user_id: &str) -> Result<Vec<PullRequest>> {
        let rows = sqlx::query_as::<_, PullRequestRow>(&format!(
            r#"
            {PULL_REQUEST_SELECT}
            WHERE EXISTS (
                SELECT 1
                FROM pull_request_reviewer r
                WHERE r.pull_request_id = p.id
                AND r.reviewer_id = $1
            )
            ORDER BY p.created_at, p.id
        "#
        ))
        .bind(user_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(wrap_implementation_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_assign_reviewers(
        &mut self,
        id: &str,
        reviewer_ids: &[String],
    ) -> Result<()> {
        for reviewer_id in reviewer_ids {
            sqlx::query(
                r#"
                INSERT INTO pull_request_reviewer
                (
                    pull_request_id,
                    reviewer_id
                )
                VALUES
                (
                    $1,
                    $2
                );
            "#,
            )
            .bind(id)
            .bind(reviewer_id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| {
                wrap_constraint_violation(e, |constraint| match constraint {
                    "pull_request_reviewer_unique" => Some(DatabaseError::ReviewerAlreadyAssigned(
                        id.into(),
                        reviewer_id.clone(),
                    )),
                    "pull_request_reviewer_pull_request_id_fkey" => {
                        Some(DatabaseError::UnknownPullRequest(id.into()))
                    }
                    "pull_request_reviewer_reviewer_id_fkey" => {
                        Some(DatabaseError::UnknownReviewer(reviewer_id.clone()))
                    }
                    _ => None,
                })
            })?;
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_replace_reviewer(
        &mut self,
        id: &str,
        old_reviewer_id: &str,
        new_reviewer_id: &str,
    ) -> Result<()> {
        let row = sqlx::query(
            r#"
            UPDATE pull_request_reviewer
            SET reviewer_id = $3,
            assigned_at = clock_timestamp()
            WHERE pull_request_id = $1
            AND reviewer_id = $2
            RETURNING id;
        "#,
        )
        .bind(id)
        .bind(old_reviewer_id)
        .bind(new_reviewer_id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| {
            wrap_constraint_violation(e, |constraint| match constraint {
                "pull_request_reviewer_unique" => Some(DatabaseError::ReviewerAlreadyAssigned(
                    id.into(),
                    new_reviewer_id.into(),
                )),
                "pull_request_reviewer_reviewer_id_fkey" => {
                    Some(DatabaseError::UnknownReviewer(new_reviewer_id.into()))
                }
                _ => None,
            })
        })?;

        row.map(|_| ()).ok_or_else(|| {
            DatabaseError::UnknownReviewerAssignment(id.into(), old_reviewer_id.into())
        })
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_set_status(
        &mut self,
        id: &str,
        status_id: u64,
        merged_at: Option<OffsetDateTime>,
    ) -> Result<()> {
        let row = sqlx::query(
            r#"
            UPDATE pull_request
            SET status_id = $2,
            merged_at = $3
            WHERE id = $1
            RETURNING id;
        "#,
        )
        .bind(id)
        .bind(status_id as i32)
        .bind(merged_at)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| {
            wrap_constraint_violation(e, |constraint| match constraint {
                "pull_request_status_id_fkey" => Some(DatabaseError::UnknownStatusId(status_id)),
                _ => None,
            })
        })?;

        row.map(|_| ())
            .ok_or_else(|| DatabaseError::UnknownPullRequest(id.into()))
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_set_needs_more_reviewers(
        &mut self,
        id: &str,
        value: bool,
    ) -> Result<()> {
        let row = sqlx::query(
            r#"
            UPDATE pull_request
            SET needs_more_reviewers = $2
            WHERE id = $1
            RETURNING id;
        "#,
        )
        .bind(id)
        .bind(value)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(wrap_implementation_error)?;

        row.map(|_| ())
            .ok_or_else(|| DatabaseError::UnknownPullRequest(id.into()))
    }

    #[tracing::instrument(skip(self))]
    async fn pull_request_statuses_all(&mut self) -> Result<Vec<PullRequestStatusEntry>> {
        let rows = sqlx::query_as::<_, PullRequestStatusEntryRow>(
            r#"
            SELECT *
            FROM pull_request_status
            ORDER BY id
        "#,
        )
        .fetch_all(&mut *self.tx)
        .await
        .map_err(wrap_implementation_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn pull_request_statuses_get(
        &mut self,
        id: u64,
    ) -> Result<Option<PullRequestStatusEntry>> {
        let row = sqlx::query_as::<_, PullRequestStatusEntryRow>(
            r#"
            SELECT *
            FROM pull_request_status
            WHERE id = $1
        "#,
        )
        .bind(id as i32)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(wrap_implementation_error)?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn reviewer_assignments_list(&mut self, id: &str) -> Result<Vec<ReviewerAssignment>> {
        let rows = sqlx::query_as::<_, ReviewerAssignmentRow>(
            r#"
            SELECT *
            FROM pull_request_reviewer
            WHERE pull_request_id = $1
            ORDER BY id
        "#,
        )
        .bind(id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(wrap_implementation_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl UserStore for PostgresTransaction {
    #[tracing::instrument(skip(self))]
    async fn users_create(
        &mut self,
        id: &str,
        name: &str,
        team_id: u64,
        is_active: bool,
    ) -> Result<User> {
        sqlx::query(
            r#"
            INSERT INTO app_user
            (
                id,
                name,
                is_active,
                team_id
            )
            VALUES
            (
                $1,
                $2,
                $3,
                $4
            );
        "#,
        )
        .bind(id)
        .bind(name)
        .bind(is_active)
        .bind(team_id as i32)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| {
            wrap_constraint_violation(e, |constraint| match constraint {
                "app_user_pkey" => Some(DatabaseError::UserAlreadyExists(id.into())),
                "app_user_team_id_fkey" => Some(DatabaseError::UnknownTeamId(team_id)),
                _ => None,
            })
        })?;

        self.users_get_expect(id).await
    }

    #[tracing::instrument(skip(self))]
    async fn users_get(&mut self, id: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            {USER_SELECT}
            WHERE u.id = $1
        "#
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(wrap_implementation_error)?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn users_list_by_team(&mut self, team_id: u64) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            {USER_SELECT}
            WHERE u.team_id = $1
            ORDER BY u.id
        "#
        ))
        .bind(team_id as i32)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(wrap_implementation_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn users_set_active(&mut self, id: &str, value: bool) -> Result<User> {
        let row = sqlx::query(
            r#"
            UPDATE app_user
            SET is_active = $2
            WHERE id = $1
            RETURNING id;
        "#,
        )
        .bind(id)
        .bind(value)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(wrap_implementation_error)?;

        if row.is_none() {
            return Err(DatabaseError::UnknownUser(id.into()));
        }

        self.users_get_expect(id).await
    }

    #[tracing::instrument(skip(self))]
    async fn users_random_active_teammates(
        &mut self,
        team_id: u64,
        limit: usize,
        exclude_ids: &[String],
    ) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            {USER_SELECT}
            WHERE u.team_id = $1
            AND u.is_active
            AND NOT (u.id = ANY($2))
            ORDER BY RANDOM()
            LIMIT $3
        "#
        ))
        .bind(team_id as i32)
        .bind(exclude_ids)
        .bind(limit as i64)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(wrap_implementation_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn users_random_active(
        &mut self,
        limit: usize,
        exclude_ids: &[String],
    ) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            {USER_SELECT}
            WHERE u.is_active
            AND NOT (u.id = ANY($1))
            ORDER BY RANDOM()
            LIMIT $2
        "#
        ))
        .bind(exclude_ids)
        .bind(limit as i64)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(wrap_implementation_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl TeamStore for PostgresTransaction {
    #[tracing::instrument(skip(self))]
    async fn teams_create(&mut self, name: &str) -> Result<Team> {
        let row = sqlx::query_as::<_, TeamRow>(
            r#"
            INSERT INTO team
            (
                name
            )
            VALUES
            (
                $1
            )
            RETURNING *;
        "#,
        )
        .bind(name)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            wrap_constraint_violation(e, |constraint| match constraint {
                "team_name_key" => Some(DatabaseError::TeamAlreadyExists(name.into())),
                _ => None,
            })
        })?;

        Ok(row.into())
    }

    #[tracing::instrument(skip(self))]
    async fn teams_get(&mut self, name: &str) -> Result<Option<Team>> {
        let row = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT *
            FROM team
            WHERE name = $1
        "#,
        )
        .bind(name)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(wrap_implementation_error)?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn teams_all(&mut self, limit: u64, offset: u64) -> Result<(Vec<Team>, u64)> {
        let total: i64 = sqlx::query("SELECT COUNT(*) FROM team;")
            .fetch_one(&mut *self.tx)
            .await
            .map_err(wrap_implementation_error)?
            .get(0);

        let rows = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT *
            FROM team
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            OFFSET $2
        "#,
        )
        .bind(to_sql_bigint(limit))
        .bind(to_sql_bigint(offset))
        .fetch_all(&mut *self.tx)
        .await
        .map_err(wrap_implementation_error)?;

        Ok((rows.into_iter().map(Into::into).collect(), total as u64))
    }

    #[tracing::instrument(skip(self))]
    async fn teams_deactivate_members(&mut self, name: &str) -> Result<Vec<User>> {
        let team = self.teams_get_expect(name).await?;

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            WITH deactivated AS (
                UPDATE app_user
                SET is_active = FALSE
                WHERE team_id = $1
                AND is_active
                RETURNING id, name, is_active, team_id, created_at
            )
            SELECT d.id, d.name, d.is_active, d.team_id, t.name AS team_name, d.created_at
            FROM deactivated d
            INNER JOIN team t ON t.id = d.team_id
            ORDER BY d.id
        "#,
        )
        .bind(team.id as i32)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(wrap_implementation_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl StatsStore for PostgresTransaction {
    #[tracing::instrument(skip(self))]
    async fn stats_get(&mut self) -> Result<Stats> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE s.name = 'OPEN') AS open,
                COUNT(*) FILTER (WHERE s.name = 'MERGED') AS merged
            FROM pull_request p
            INNER JOIN pull_request_status s ON s.id = p.status_id
        "#,
        )
        .fetch_one(&mut *self.tx)
        .await
        .map_err(wrap_implementation_error)?;

        let pull_requests = PullRequestStats {
            total: row.get::<i64, _>("total") as u64,
            open: row.get::<i64, _>("open") as u64,
            merged: row.get::<i64, _>("merged") as u64,
        };

        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE is_active) AS active,
                COUNT(*) FILTER (WHERE NOT is_active) AS inactive
            FROM app_user
        "#,
        )
        .fetch_one(&mut *self.tx)
        .await
        .map_err(wrap_implementation_error)?;

        let active = row.get::<i64, _>("active") as u64;
        let inactive = row.get::<i64, _>("inactive") as u64;

        let most_busy_users = sqlx::query(
            r#"
            SELECT u.id, u.name, COUNT(*) AS assignments
            FROM pull_request_reviewer r
            INNER JOIN app_user u ON u.id = r.reviewer_id
            GROUP BY u.id, u.name
            ORDER BY assignments DESC, u.id
            LIMIT $1
        "#,
        )
        .bind(MOST_BUSY_USERS_COUNT)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(wrap_implementation_error)?
        .into_iter()
        .map(|row| UserAssignmentCount {
            user_id: row.get("id"),
            user_name: row.get("name"),
            assignments: row.get::<i64, _>("assignments") as u64,
        })
        .collect();

        let teams_total: i64 = sqlx::query("SELECT COUNT(*) FROM team;")
            .fetch_one(&mut *self.tx)
            .await
            .map_err(wrap_implementation_error)?
            .get(0);

        let most_active_team = sqlx::query(
            r#"
            SELECT t.name, COUNT(*) AS pull_requests_count
            FROM pull_request p
            INNER JOIN app_user u ON u.id = p.author_id
            INNER JOIN team t ON t.id = u.team_id
            GROUP BY t.name
            ORDER BY pull_requests_count DESC, t.name
            LIMIT 1
        "#,
        )
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(wrap_implementation_error)?
        .map(|row| MostActiveTeam {
            team_name: row.get("name"),
            pull_requests_count: row.get::<i64, _>("pull_requests_count") as u64,
        });

        Ok(Stats {
            pull_requests,
            users: UserStats {
                most_busy_users,
                active,
                inactive,
            },
            teams: TeamStats {
                total: teams_total as u64,
                most_active_team,
            },
        })
    }
}

#[async_trait]
impl DbTransaction for PostgresTransaction {
    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| DatabaseError::TransactionError { source: e.into() })
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx
            .rollback()
            .await
            .map_err(|e| DatabaseError::TransactionError { source: e.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bigint_clamping() {
        assert_eq!(to_sql_bigint(0), 0);
        assert_eq!(to_sql_bigint(200), 200);
        assert_eq!(to_sql_bigint(i64::MAX as u64), i64::MAX);
        assert_eq!(to_sql_bigint(u64::MAX), i64::MAX);
    }
}
