use revbot_models::{PullRequest, PullRequestStatusEntry, ReviewerAssignment, Team, User};
use sqlx::{postgres::PgRow, FromRow, Row};

use crate::fields::PullRequestStatusDecode;

pub(crate) struct PullRequestRow(PullRequest);
pub(crate) struct PullRequestStatusEntryRow(PullRequestStatusEntry);
pub(crate) struct ReviewerAssignmentRow(ReviewerAssignment);
pub(crate) struct TeamRow(Team);
pub(crate) struct UserRow(User);

impl From<PullRequestRow> for PullRequest {
    fn from(r: PullRequestRow) -> Self {
        r.0
    }
}

impl From<PullRequestStatusEntryRow> for PullRequestStatusEntry {
    fn from(r: PullRequestStatusEntryRow) -> Self {
        r.0
    }
}

impl From<ReviewerAssignmentRow> for ReviewerAssignment {
    fn from(r: ReviewerAssignmentRow) -> Self {
        r.0
    }
}

impl From<TeamRow> for Team {
    fn from(r: TeamRow) -> Self {
        r.0
    }
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        r.0
    }
}

impl<'r> FromRow<'r, PgRow> for PullRequestRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(PullRequest {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            author_id: row.try_get("author_id")?,
            status: *row.try_get::<PullRequestStatusDecode, _>("status_name")?,
            needs_more_reviewers: row.try_get("needs_more_reviewers")?,
            created_at: row.try_get("created_at")?,
            merged_at: row.try_get("merged_at")?,
            reviewers: row.try_get("reviewers")?,
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for PullRequestStatusEntryRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(PullRequestStatusEntry {
            id: row.try_get::<i32, _>("id")? as u64,
            name: row.try_get("name")?,
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for ReviewerAssignmentRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(ReviewerAssignment {
            id: row.try_get::<i32, _>("id")? as u64,
            pull_request_id: row.try_get("pull_request_id")?,
            reviewer_id: row.try_get("reviewer_id")?,
            assigned_at: row.try_get("assigned_at")?,
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for TeamRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(Team {
            id: row.try_get::<i32, _>("id")? as u64,
            name: row.try_get("name")?,
            created_at: row.try_get("created_at")?,
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for UserRow {
    fn from_row(row: &'r PgRow) -> core::result::Result<Self, sqlx::Error> {
        Ok(Self(User {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            is_active: row.try_get("is_active")?,
            team_id: row.try_get::<i32, _>("team_id")? as u64,
            team_name: row.try_get("team_name")?,
            created_at: row.try_get("created_at")?,
        }))
    }
}
