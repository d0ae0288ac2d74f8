use proptest::prelude::*;
use roster_core::models::{Member, MemberSearchCondition};

/// Strategy for optional usernames, including blank ones that must be ignored
pub fn username_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "member[0-9]{1,2}",
    ])
}

pub fn team_name_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![
        Just("teamA".to_string()),
        Just("teamB".to_string()),
        Just("teamZ".to_string()),
    ])
}

pub fn age_bound_strategy() -> impl Strategy<Value = Option<i32>> {
    prop::option::of(0i32..=60)
}

/// Strategy for search criteria with any combination of fields set
pub fn condition_strategy() -> impl Strategy<Value = MemberSearchCondition> {
    (
        username_strategy(),
        team_name_strategy(),
        age_bound_strategy(),
        age_bound_strategy(),
    )
        .prop_map(|(username, team_name, age_goe, age_loe)| {
            let mut condition = MemberSearchCondition::new();
            if let Some(username) = username {
                condition = condition.with_username(username);
            }
            if let Some(team_name) = team_name {
                condition = condition.with_team_name(team_name);
            }
            if let Some(age_goe) = age_goe {
                condition = condition.with_age_goe(age_goe);
            }
            if let Some(age_loe) = age_loe {
                condition = condition.with_age_loe(age_loe);
            }
            condition
        })
}

/// Strategy for member rows; team ids 1 and 2 exist, 3 does not
pub fn members_strategy() -> impl Strategy<Value = Vec<Member>> {
    prop::collection::vec((0i32..=60, prop::option::of(1i64..=3)), 0..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (age, team_id))| {
                Member::new(i as i64 + 1, format!("member{}", i + 1), age, team_id)
            })
            .collect()
    })
}

/// Strategy for (offset, limit) windows, not necessarily page-aligned
pub fn window_strategy() -> impl Strategy<Value = (i64, i64)> {
    (0i64..50, 1i64..15)
}
