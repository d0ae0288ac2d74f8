//! # Query Collaborators
//!
//! Implementations of the content and count query contracts consumed by the
//! search repository:
//!
//! - [`PgMemberStore`] runs both queries against PostgreSQL through `sqlx`
//! - [`InMemoryMemberStore`] evaluates the same filters over an in-memory roster

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryMemberStore;
pub use postgres::PgMemberStore;

use thiserror::Error;

/// Failures raised by a query collaborator
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {message}")]
    Unavailable { message: String },

    #[error("Store contract violation: {message}")]
    ContractViolation { message: String },
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn contract_violation(message: impl Into<String>) -> Self {
        Self::ContractViolation {
            message: message.into(),
        }
    }
}
