pub mod member;
pub mod member_search_condition;
pub mod team;

// Re-export core models for easy access
pub use member::{columns, Member, MemberTeam};
pub use member_search_condition::MemberSearchCondition;
pub use team::Team;
