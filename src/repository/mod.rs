//! # Search Repository
//!
//! Paginated search over composed filters.
//!
//! ## Architecture
//!
//! - [`PaginatedQueryExecutor`]: passes a filter and window to a [`ContentQuery`]
//!   collaborator and returns one page of rows
//! - [`count`]: decides whether a page's total can be inferred from its shape or
//!   needs a [`CountQuery`] round trip
//! - [`SearchRepository`]: the façade composing criteria, fetching content and
//!   resolving the total for a single `search` call
//!
//! The repository owns its executor; stores plug in through the two collaborator
//! traits rather than by extending a shared base type.

pub mod count;
pub mod executor;
pub mod search;

pub use count::{infer_total, resolve_total, CountStrategy};
pub use executor::PaginatedQueryExecutor;
pub use search::{SearchRepository, SearchSettings};

use crate::query_builder::{ComposedFilter, SortOrder};
use crate::store::StoreError;
use async_trait::async_trait;
use std::sync::Arc;

/// Runs a filtered, ordered, windowed content query.
///
/// Implementations must honor `offset` and `limit` exactly and apply `order`
/// deterministically, breaking ties between equal sort keys themselves.
#[async_trait]
pub trait ContentQuery: Send + Sync {
    type Row: Send;

    /// Sort properties this collaborator can order by
    fn sortable_properties(&self) -> Vec<&'static str>;

    async fn run_content_query(
        &self,
        filter: &ComposedFilter,
        offset: u64,
        limit: u64,
        order: &[SortOrder],
    ) -> Result<Vec<Self::Row>, StoreError>;

    /// Every matching row, ordered but not windowed
    async fn run_unpaged_query(
        &self,
        filter: &ComposedFilter,
        order: &[SortOrder],
    ) -> Result<Vec<Self::Row>, StoreError>;
}

/// Counts the rows matching a filter, without ordering or windowing
#[async_trait]
pub trait CountQuery: Send + Sync {
    async fn run_count_query(&self, filter: &ComposedFilter) -> Result<u64, StoreError>;
}

#[async_trait]
impl<T: ContentQuery + ?Sized> ContentQuery for Arc<T> {
    type Row = T::Row;

    fn sortable_properties(&self) -> Vec<&'static str> {
        (**self).sortable_properties()
    }

    async fn run_content_query(
        &self,
        filter: &ComposedFilter,
        offset: u64,
        limit: u64,
        order: &[SortOrder],
    ) -> Result<Vec<Self::Row>, StoreError> {
        (**self).run_content_query(filter, offset, limit, order).await
    }

    async fn run_unpaged_query(
        &self,
        filter: &ComposedFilter,
        order: &[SortOrder],
    ) -> Result<Vec<Self::Row>, StoreError> {
        (**self).run_unpaged_query(filter, order).await
    }
}

#[async_trait]
impl<T: CountQuery + ?Sized> CountQuery for Arc<T> {
    async fn run_count_query(&self, filter: &ComposedFilter) -> Result<u64, StoreError> {
        (**self).run_count_query(filter).await
    }
}
