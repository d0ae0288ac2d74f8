//! # Query Builder System
//!
//! Dynamic predicate composition and pagination values.
//!
//! ## Key Components
//!
//! - [`conditions`] - Condition combinators: optional operand in, fragment or "no constraint" out
//! - [`filter`] - Predicate composer folding fragments into one [`ComposedFilter`]
//! - [`pagination`] - [`PageRequest`] windows and [`PageResult`] pages
//! - [`joins`] - JOIN clauses used by table sources
//! - [`builder`] - Rendering of content and count statements for PostgreSQL
//!
//! ## Example Usage
//!
//! ```rust
//! use roster_core::query_builder::{conditions, ComposedFilter};
//!
//! let username: Option<&str> = None;
//! let filter = ComposedFilter::from_fragments(vec![
//!     conditions::eq("username", username),
//!     conditions::goe("age", Some(35)),
//!     conditions::loe("age", Some(40)),
//! ]);
//! assert_eq!(filter.len(), 2);
//! assert_eq!(filter.to_string(), "age >= 35 AND age <= 40");
//! ```

pub mod builder;
pub mod conditions;
pub mod filter;
pub mod joins;
pub mod pagination;

pub use builder::{Column, TableSource};
pub use conditions::{fragment_for, Condition, ConstraintKind, FilterValue, Fragment};
pub use filter::{compose, ComposedFilter, Filterable, SearchCriteria};
pub use joins::{Join, JoinType};
pub use pagination::{Direction, NullHandling, PageRequest, PageResult, SortOrder};
