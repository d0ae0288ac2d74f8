#![allow(dead_code)]

pub mod strategies;

use roster_core::models::{Member, Team};
use roster_core::store::InMemoryMemberStore;

/// Four teamless members aged 10, 20, 30 and 40
pub fn ages_store() -> InMemoryMemberStore {
    InMemoryMemberStore::new(
        vec![],
        vec![
            Member::new(1, "member1", 10, None),
            Member::new(2, "member2", 20, None),
            Member::new(3, "member3", 30, None),
            Member::new(4, "member4", 40, None),
        ],
    )
}

/// memberA..memberD split across teamA and teamB
pub fn roster_store() -> InMemoryMemberStore {
    InMemoryMemberStore::new(roster_teams(), roster_members())
}

pub fn roster_teams() -> Vec<Team> {
    vec![Team::new(1, "teamA"), Team::new(2, "teamB")]
}

pub fn roster_members() -> Vec<Member> {
    vec![
        Member::new(1, "memberA", 10, Some(1)),
        Member::new(2, "memberB", 20, Some(1)),
        Member::new(3, "memberC", 30, Some(2)),
        Member::new(4, "memberD", 40, Some(2)),
    ]
}

/// `count` members with ages 1..=count, alternating between the roster teams
pub fn numbered_store(count: usize) -> InMemoryMemberStore {
    let members = (1..=count)
        .map(|i| {
            Member::new(
                i as i64,
                format!("member{i}"),
                i as i32,
                Some(if i % 2 == 0 { 2 } else { 1 }),
            )
        })
        .collect();
    InMemoryMemberStore::new(roster_teams(), members)
}
