use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub team_id: u64,
    pub team_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            is_active: true,
            team_id: 0,
            team_name: String::new(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }
}

/// Member description used when creating a team.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTeamMember {
    pub id: String,
    pub name: String,
    pub is_active: bool,
}

impl NewTeamMember {
    pub fn new<I: Into<String>, N: Into<String>>(id: I, name: N, is_active: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_active,
        }
    }
}
