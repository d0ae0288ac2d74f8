use super::count::{infer_total, resolve_total, CountStrategy};
use super::executor::PaginatedQueryExecutor;
use super::{ContentQuery, CountQuery};
use crate::config::RosterConfig;
use crate::constants::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::error::{QueryOperation, Result, SearchError};
use crate::logging::{log_error, log_search_operation};
use crate::query_builder::{ComposedFilter, PageRequest, PageResult, SearchCriteria};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, instrument};

/// Tunables for the search façade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub count_strategy: CountStrategy,
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            count_strategy: CountStrategy::Deferred,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl SearchSettings {
    pub fn from_config(config: &RosterConfig) -> Self {
        Self {
            count_strategy: config.search.count_strategy,
            default_page_size: config.pagination.default_page_size,
            max_page_size: config.pagination.max_page_size,
        }
    }
}

/// Entry point for paginated searches.
///
/// Each call composes a fresh filter and issues at most one content query and
/// at most one count query. No state is kept between calls, so one repository
/// can serve concurrent searches.
#[derive(Debug)]
pub struct SearchRepository<S> {
    executor: PaginatedQueryExecutor<S>,
    settings: SearchSettings,
}

impl<S> SearchRepository<S>
where
    S: ContentQuery + CountQuery,
{
    pub fn new(store: S) -> Self {
        Self::with_settings(store, SearchSettings::default())
    }

    pub fn with_settings(store: S, settings: SearchSettings) -> Self {
        Self {
            executor: PaginatedQueryExecutor::new(store),
            settings,
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        self.executor.collaborator()
    }

    /// First page at the configured default page size
    pub fn first_page(&self) -> Result<PageRequest> {
        let size = i64::try_from(self.settings.default_page_size).map_err(|_| {
            SearchError::invalid_argument(
                "default_page_size",
                format!("{} is out of range", self.settings.default_page_size),
            )
        })?;
        PageRequest::of_page(0, size)
    }

    /// Search one page of rows matching `criteria`
    #[instrument(skip_all, fields(offset = page.offset(), limit = page.limit()))]
    pub async fn search<C>(&self, criteria: &C, page: &PageRequest) -> Result<PageResult<S::Row>>
    where
        C: SearchCriteria + ?Sized,
    {
        self.validate_page(page)?;

        let filter = criteria.compose();
        debug!(
            filter = %filter,
            strategy = ?self.settings.count_strategy,
            "Composed search filter"
        );

        let count_issued = AtomicBool::new(false);
        let outcome = match self.settings.count_strategy {
            CountStrategy::Deferred => self.search_deferred(&filter, page, &count_issued).await,
            CountStrategy::Speculative => {
                self.search_speculative(&filter, page, &count_issued).await
            }
        };

        match outcome {
            Ok((content, total)) => {
                let count_query_issued = count_issued.load(Ordering::Relaxed);
                log_search_operation(
                    "search",
                    &filter.to_string(),
                    page.offset(),
                    page.limit(),
                    content.len(),
                    total,
                    count_query_issued,
                );
                Ok(PageResult::new(content, total, page))
            }
            Err(e) => {
                log_error(
                    "search_repository",
                    "search",
                    &e.to_string(),
                    Some(&filter.to_string()),
                );
                Err(e)
            }
        }
    }

    /// Every row matching `criteria`, in the store's default order
    pub async fn search_all<C>(&self, criteria: &C) -> Result<Vec<S::Row>>
    where
        C: SearchCriteria + ?Sized,
    {
        let filter = criteria.compose();
        debug!(filter = %filter, "Searching without pagination");
        self.executor.fetch_all(&filter, &[]).await
    }

    /// Number of rows matching `criteria`
    pub async fn count<C>(&self, criteria: &C) -> Result<u64>
    where
        C: SearchCriteria + ?Sized,
    {
        self.count_filtered(&criteria.compose()).await
    }

    async fn search_deferred(
        &self,
        filter: &ComposedFilter,
        page: &PageRequest,
        count_issued: &AtomicBool,
    ) -> Result<(Vec<S::Row>, u64)> {
        let content = self.executor.fetch_page(filter, page).await?;
        let total = resolve_total(content.len(), page, || {
            count_issued.store(true, Ordering::Relaxed);
            self.count_filtered(filter)
        })
        .await?;
        Ok((content, total))
    }

    async fn search_speculative(
        &self,
        filter: &ComposedFilter,
        page: &PageRequest,
        count_issued: &AtomicBool,
    ) -> Result<(Vec<S::Row>, u64)> {
        count_issued.store(true, Ordering::Relaxed);
        let (content, count) = tokio::join!(
            self.executor.fetch_page(filter, page),
            self.count_filtered(filter)
        );
        let content = content?;

        if infer_total(content.len(), page).is_some() {
            if let Err(e) = &count {
                debug!(error = %e, "Discarding failed speculative count");
            }
        }
        let total = resolve_total(content.len(), page, || futures::future::ready(count)).await?;
        Ok((content, total))
    }

    async fn count_filtered(&self, filter: &ComposedFilter) -> Result<u64> {
        self.store()
            .run_count_query(filter)
            .await
            .map_err(|e| SearchError::query_failed(QueryOperation::Count, e))
    }

    /// Reject bad windows before any query is issued
    fn validate_page(&self, page: &PageRequest) -> Result<()> {
        if page.limit() > self.settings.max_page_size {
            return Err(SearchError::invalid_argument(
                "limit",
                format!(
                    "{} exceeds the maximum page size of {}",
                    page.limit(),
                    self.settings.max_page_size
                ),
            ));
        }

        let sortable = self.store().sortable_properties();
        if let Some(order) = page
            .sort()
            .iter()
            .find(|order| !sortable.contains(&order.property.as_str()))
        {
            return Err(SearchError::invalid_argument(
                "sort",
                format!("unsupported sort property '{}'", order.property),
            ));
        }

        Ok(())
    }
}
