use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::User;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub id: u64,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Default for Team {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamWithMembers {
    pub team: Team,
    pub members: Vec<User>,
}
