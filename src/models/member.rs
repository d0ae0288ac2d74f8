use crate::query_builder::{FilterValue, Filterable};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Logical column names shared by filters, sort keys and stores
pub mod columns {
    pub const MEMBER_ID: &str = "memberId";
    pub const USERNAME: &str = "username";
    pub const AGE: &str = "age";
    pub const TEAM_ID: &str = "teamId";
    pub const TEAM_NAME: &str = "teamName";

    pub const ALL: [&str; 5] = [MEMBER_ID, USERNAME, AGE, TEAM_ID, TEAM_NAME];
}

/// Member of the roster
/// Maps to `members` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Member {
    pub member_id: i64,
    pub username: String,
    pub age: i32,
    pub team_id: Option<i64>,
}

impl Member {
    pub fn new(
        member_id: i64,
        username: impl Into<String>,
        age: i32,
        team_id: Option<i64>,
    ) -> Self {
        Self {
            member_id,
            username: username.into(),
            age,
            team_id,
        }
    }
}

/// A member left-joined with its team; the row type every search returns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeam {
    pub member_id: i64,
    pub username: String,
    pub age: i32,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

impl Filterable for MemberTeam {
    fn column_value(&self, column: &str) -> Option<FilterValue> {
        match column {
            columns::MEMBER_ID => Some(FilterValue::from(self.member_id)),
            columns::USERNAME => Some(FilterValue::from(self.username.as_str())),
            columns::AGE => Some(FilterValue::from(self.age)),
            columns::TEAM_ID => self.team_id.map(FilterValue::from),
            columns::TEAM_NAME => self.team_name.as_deref().map(FilterValue::from),
            _ => None,
        }
    }
}
