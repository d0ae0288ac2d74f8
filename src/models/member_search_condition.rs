//! Search criteria for the member roster.
//!
//! Each field is independently optional. An absent field, or a text field with
//! no meaningful content, leaves the search unconstrained on that field.

use super::member::columns;
use crate::query_builder::conditions::{self, Fragment};
use crate::query_builder::SearchCriteria;
use serde::{Deserialize, Serialize};

/// Optional filters for a member search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberSearchCondition {
    username: Option<String>,
    team_name: Option<String>,
    age_goe: Option<i32>,
    age_loe: Option<i32>,
}

impl MemberSearchCondition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    pub fn with_age_goe(mut self, age_goe: i32) -> Self {
        self.age_goe = Some(age_goe);
        self
    }

    pub fn with_age_loe(mut self, age_loe: i32) -> Self {
        self.age_loe = Some(age_loe);
        self
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn team_name(&self) -> Option<&str> {
        self.team_name.as_deref()
    }

    pub fn age_goe(&self) -> Option<i32> {
        self.age_goe
    }

    pub fn age_loe(&self) -> Option<i32> {
        self.age_loe
    }
}

impl SearchCriteria for MemberSearchCondition {
    fn fragments(&self) -> Vec<Fragment> {
        vec![
            username_eq(self.username()),
            team_name_eq(self.team_name()),
            age_goe(self.age_goe),
            age_loe(self.age_loe),
        ]
    }
}

pub fn username_eq(username: Option<&str>) -> Fragment {
    conditions::eq(columns::USERNAME, username)
}

pub fn team_name_eq(team_name: Option<&str>) -> Fragment {
    conditions::eq(columns::TEAM_NAME, team_name)
}

pub fn age_goe(age_goe: Option<i32>) -> Fragment {
    conditions::goe(columns::AGE, age_goe)
}

pub fn age_loe(age_loe: Option<i32>) -> Fragment {
    conditions::loe(columns::AGE, age_loe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_builder::{compose, Condition, FilterValue};

    #[test]
    fn test_empty_condition_composes_identity() {
        assert!(compose(&MemberSearchCondition::new()).is_identity());
    }

    #[test]
    fn test_blank_strings_compose_identity() {
        let condition = MemberSearchCondition::new()
            .with_username("")
            .with_team_name("  ");
        assert!(compose(&condition).is_identity());
    }

    #[test]
    fn test_single_sided_range() {
        let filter = compose(&MemberSearchCondition::new().with_age_goe(15));
        assert_eq!(
            filter.conditions(),
            &[Condition::Gte {
                column: columns::AGE,
                value: FilterValue::Integer(15),
            }]
        );
    }

    #[test]
    fn test_all_fields_present() {
        let filter = compose(
            &MemberSearchCondition::new()
                .with_username("memberD")
                .with_team_name("teamB")
                .with_age_goe(35)
                .with_age_loe(40),
        );
        assert_eq!(filter.len(), 4);
        assert_eq!(
            filter.to_string(),
            "username = 'memberD' AND teamName = 'teamB' AND age >= 35 AND age <= 40"
        );
    }

    #[test]
    fn test_deserializes_request_parameters() {
        let condition: MemberSearchCondition =
            serde_json::from_str(r#"{"teamName": "teamB", "ageGoe": 35}"#).unwrap();
        assert_eq!(condition.team_name(), Some("teamB"));
        assert_eq!(condition.age_goe(), Some(35));
        assert_eq!(condition.username(), None);
        assert_eq!(condition.age_loe(), None);
    }
}
