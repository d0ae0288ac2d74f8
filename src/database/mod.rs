//! # Database Connection
//!
//! Pool construction from [`DatabaseConfig`](crate::config::DatabaseConfig),
//! health checks and schema migrations for the `teams`/`members` schema.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use roster_core::config::ConfigManager;
//! use roster_core::database::DatabaseConnection;
//! use roster_core::store::PgMemberStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let db = DatabaseConnection::connect(&manager.config().database).await?;
//! db.migrate().await?;
//! let store = PgMemberStore::new(db.pool().clone());
//! # Ok(())
//! # }
//! ```

pub mod connection;

pub use connection::{DatabaseConnection, MIGRATOR};
