use super::ContentQuery;
use crate::error::{QueryOperation, Result, SearchError};
use crate::query_builder::{ComposedFilter, PageRequest, SortOrder};
use crate::store::StoreError;
use tracing::debug;

/// Fetches one page of rows through a content query collaborator.
///
/// The filter and window are passed through unchanged and rows come back in
/// collaborator order; no retry, fallback or secondary sort happens here.
#[derive(Debug, Clone)]
pub struct PaginatedQueryExecutor<Q> {
    query: Q,
}

impl<Q: ContentQuery> PaginatedQueryExecutor<Q> {
    pub fn new(query: Q) -> Self {
        Self { query }
    }

    pub fn collaborator(&self) -> &Q {
        &self.query
    }

    pub async fn fetch_page(
        &self,
        filter: &ComposedFilter,
        page: &PageRequest,
    ) -> Result<Vec<Q::Row>> {
        let rows = self
            .query
            .run_content_query(filter, page.offset(), page.limit(), page.sort())
            .await
            .map_err(|e| SearchError::query_failed(QueryOperation::Content, e))?;

        if rows.len() as u64 > page.limit() {
            return Err(SearchError::query_failed(
                QueryOperation::Content,
                StoreError::contract_violation(format!(
                    "content query returned {} rows for a limit of {}",
                    rows.len(),
                    page.limit()
                )),
            ));
        }

        debug!(
            offset = page.offset(),
            limit = page.limit(),
            returned = rows.len(),
            "Fetched content page"
        );
        Ok(rows)
    }

    /// Fetch every matching row without a window
    pub async fn fetch_all(
        &self,
        filter: &ComposedFilter,
        order: &[SortOrder],
    ) -> Result<Vec<Q::Row>> {
        self.query
            .run_unpaged_query(filter, order)
            .await
            .map_err(|e| SearchError::query_failed(QueryOperation::Content, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_builder::conditions::goe;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records what it was asked for and replays a canned result
    struct RecordingQuery {
        rows: Vec<u32>,
        fail: bool,
        seen: Mutex<Vec<(ComposedFilter, u64, u64, Vec<SortOrder>)>>,
    }

    impl RecordingQuery {
        fn returning(rows: Vec<u32>) -> Self {
            Self {
                rows,
                fail: false,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ContentQuery for RecordingQuery {
        type Row = u32;

        fn sortable_properties(&self) -> Vec<&'static str> {
            vec!["age"]
        }

        async fn run_content_query(
            &self,
            filter: &ComposedFilter,
            offset: u64,
            limit: u64,
            order: &[SortOrder],
        ) -> std::result::Result<Vec<u32>, StoreError> {
            self.seen
                .lock()
                .unwrap()
                .push((filter.clone(), offset, limit, order.to_vec()));
            if self.fail {
                return Err(StoreError::unavailable("connection refused"));
            }
            Ok(self.rows.clone())
        }

        async fn run_unpaged_query(
            &self,
            _filter: &ComposedFilter,
            _order: &[SortOrder],
        ) -> std::result::Result<Vec<u32>, StoreError> {
            Ok(self.rows.clone())
        }
    }

    #[tokio::test]
    async fn test_filter_and_window_passed_through() {
        let executor = PaginatedQueryExecutor::new(RecordingQuery::returning(vec![30, 20]));
        let filter = ComposedFilter::from_fragments(vec![goe("age", Some(15))]);
        let page = PageRequest::new(3, 2)
            .unwrap()
            .sorted_by(SortOrder::desc("age"));

        let rows = executor.fetch_page(&filter, &page).await.unwrap();

        // collaborator order is preserved, no re-sorting
        assert_eq!(rows, vec![30, 20]);
        let seen = executor.collaborator().seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, filter);
        assert_eq!((seen[0].1, seen[0].2), (3, 2));
        assert_eq!(seen[0].3, vec![SortOrder::desc("age")]);
    }

    #[tokio::test]
    async fn test_collaborator_failure_propagates() {
        let mut query = RecordingQuery::returning(vec![]);
        query.fail = true;
        let executor = PaginatedQueryExecutor::new(query);
        let page = PageRequest::new(0, 2).unwrap();

        let err = executor
            .fetch_page(&ComposedFilter::identity(), &page)
            .await
            .unwrap_err();

        assert_eq!(err.failed_operation(), Some(QueryOperation::Content));
        // no retry
        assert_eq!(executor.collaborator().seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_over_fetch_is_rejected() {
        let executor = PaginatedQueryExecutor::new(RecordingQuery::returning(vec![1, 2, 3]));
        let page = PageRequest::new(0, 2).unwrap();

        let err = executor
            .fetch_page(&ComposedFilter::identity(), &page)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SearchError::QueryExecutionFailed {
                source: StoreError::ContractViolation { .. },
                ..
            }
        ));
    }
}
