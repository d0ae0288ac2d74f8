#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Roster Core
//!
//! Dynamic search filters and count-avoiding pagination over a member/team
//! roster backed by PostgreSQL.
//!
//! ## Overview
//!
//! A search takes a criteria object whose fields are all optional. Each field
//! becomes a condition fragment, absent or blank fields contribute nothing,
//! and the remaining fragments are AND-ed into one [`ComposedFilter`]. The
//! filter drives a paginated content query, and the total row count is only
//! asked of the database when the returned page cannot determine it.
//!
//! ## Module Organization
//!
//! - [`query_builder`] - Condition combinators, filter composition, page values and SQL rendering
//! - [`repository`] - Paginated executor, count resolution and the search façade
//! - [`store`] - PostgreSQL and in-memory query collaborators
//! - [`models`] - Members, teams, the joined projection and search criteria
//! - [`config`] - Layered configuration
//! - [`database`] - Pool construction and migrations
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use roster_core::models::{Member, MemberSearchCondition, Team};
//! use roster_core::query_builder::PageRequest;
//! use roster_core::repository::SearchRepository;
//! use roster_core::store::InMemoryMemberStore;
//!
//! # async fn example() -> roster_core::Result<()> {
//! let store = InMemoryMemberStore::new(
//!     vec![Team::new(1, "teamA")],
//!     vec![
//!         Member::new(1, "member1", 10, Some(1)),
//!         Member::new(2, "member2", 20, Some(1)),
//!     ],
//! );
//! let repository = SearchRepository::new(store);
//!
//! let condition = MemberSearchCondition::new().with_age_goe(15);
//! let page = repository.search(&condition, &PageRequest::new(0, 10)?).await?;
//!
//! assert_eq!(page.total(), 1);
//! assert_eq!(repository.store().count_query_count(), 0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test                       # Unit, integration and property tests
//! cargo test --features test-db    # Adds #[sqlx::test] suites (needs DATABASE_URL)
//! ```

pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod query_builder;
pub mod repository;
pub mod store;

pub use config::{ConfigManager, ConfigurationError, RosterConfig};
pub use error::{QueryOperation, Result, SearchError};
pub use models::{MemberSearchCondition, MemberTeam};
pub use query_builder::{compose, ComposedFilter, PageRequest, PageResult, SearchCriteria};
pub use repository::{CountStrategy, SearchRepository, SearchSettings};
pub use store::{InMemoryMemberStore, PgMemberStore, StoreError};
