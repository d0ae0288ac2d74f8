use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn to_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// Placement of NULL values in an ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullHandling {
    /// Whatever the store does natively
    #[default]
    Native,
    NullsFirst,
    NullsLast,
}

/// One ordering key, applied by the query collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub property: String,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub nulls: NullHandling,
}

impl SortOrder {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
            nulls: NullHandling::Native,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
            nulls: NullHandling::Native,
        }
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = NullHandling::NullsLast;
        self
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = NullHandling::NullsFirst;
        self
    }
}

/// Offset/limit window for one page, plus caller-supplied ordering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    offset: u64,
    limit: u64,
    sort: Vec<SortOrder>,
}

impl PageRequest {
    /// Create a window starting at `offset` holding at most `limit` rows.
    ///
    /// Offsets need not be a multiple of the limit.
    pub fn new(offset: i64, limit: i64) -> Result<Self> {
        if limit <= 0 {
            return Err(SearchError::invalid_argument(
                "limit",
                format!("must be positive, got {limit}"),
            ));
        }
        if offset < 0 {
            return Err(SearchError::invalid_argument(
                "offset",
                format!("must not be negative, got {offset}"),
            ));
        }
        if offset.checked_add(limit).is_none() {
            return Err(SearchError::invalid_argument(
                "offset",
                format!("window {offset}+{limit} overflows"),
            ));
        }

        Ok(Self {
            offset: offset as u64,
            limit: limit as u64,
            sort: Vec::new(),
        })
    }

    /// Create the window for a zero-based page number
    pub fn of_page(page: i64, size: i64) -> Result<Self> {
        if page < 0 {
            return Err(SearchError::invalid_argument(
                "page",
                format!("must not be negative, got {page}"),
            ));
        }
        let offset = page.checked_mul(size.max(1)).ok_or_else(|| {
            SearchError::invalid_argument("page", format!("page {page} of size {size} overflows"))
        })?;
        Self::new(offset, size)
    }

    /// Append an ordering key
    pub fn sorted_by(mut self, order: SortOrder) -> Self {
        self.sort.push(order);
        self
    }

    pub fn with_sort(mut self, sort: Vec<SortOrder>) -> Self {
        self.sort = sort;
        self
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn sort(&self) -> &[SortOrder] {
        &self.sort
    }

    /// Zero-based page number this window starts on
    pub fn page_number(&self) -> u64 {
        self.offset / self.limit
    }

    /// The window directly after this one, keeping the ordering
    pub fn next(&self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.limit),
            limit: self.limit,
            sort: self.sort.clone(),
        }
    }
}

/// One page of content plus the total number of matching rows.
///
/// The window always comes from a validated [`PageRequest`], so `limit` is
/// never zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult<T> {
    content: Vec<T>,
    total: u64,
    offset: u64,
    limit: u64,
}

impl<T> PageResult<T> {
    pub fn new(content: Vec<T>, total: u64, page: &PageRequest) -> Self {
        Self {
            content,
            total,
            offset: page.offset(),
            limit: page.limit(),
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of pages of `limit` rows needed to hold `total` rows
    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(self.limit)
    }

    /// Zero-based page number
    pub fn page_number(&self) -> u64 {
        self.offset.checked_div(self.limit).unwrap_or(0)
    }

    pub fn has_next(&self) -> bool {
        self.offset + (self.content.len() as u64) < self.total
    }

    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            content: self.content.into_iter().map(f).collect(),
            total: self.total,
            offset: self.offset,
            limit: self.limit,
        }
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limit_rejected() {
        let err = PageRequest::new(0, 0).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("limit"));
    }

    #[test]
    fn test_negative_limit_rejected() {
        assert!(PageRequest::new(0, -5).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_negative_offset_rejected() {
        let err = PageRequest::new(-1, 10).unwrap_err();
        assert!(err.to_string().contains("offset"));
    }

    #[test]
    fn test_overflowing_window_rejected() {
        assert!(PageRequest::new(i64::MAX, 1).is_err());
        assert!(PageRequest::of_page(i64::MAX, 2).is_err());
    }

    #[test]
    fn test_non_aligned_offset_allowed() {
        let page = PageRequest::new(3, 2).unwrap();
        assert_eq!(page.offset(), 3);
        assert_eq!(page.limit(), 2);
        assert_eq!(page.page_number(), 1);
    }

    #[test]
    fn test_page_based_window() {
        let page = PageRequest::of_page(2, 10).unwrap(); // third page
        assert_eq!(page.offset(), 20);
        assert_eq!(page.limit(), 10);
        assert_eq!(page.next().offset(), 30);
    }

    #[test]
    fn test_sort_is_kept_in_order() {
        let page = PageRequest::new(0, 5)
            .unwrap()
            .sorted_by(SortOrder::desc("age"))
            .sorted_by(SortOrder::asc("username").nulls_last());

        assert_eq!(page.sort().len(), 2);
        assert_eq!(page.sort()[0].direction, Direction::Desc);
        assert_eq!(page.sort()[1].nulls, NullHandling::NullsLast);
        assert_eq!(page.next().sort(), page.sort());
    }

    #[test]
    fn test_total_pages_calculation() {
        let page = PageRequest::new(0, 10).unwrap();
        assert_eq!(PageResult::<u8>::new(vec![], 25, &page).total_pages(), 3);
        assert_eq!(PageResult::<u8>::new(vec![], 30, &page).total_pages(), 3);
        assert_eq!(PageResult::<u8>::new(vec![], 31, &page).total_pages(), 4);
        assert_eq!(PageResult::<u8>::new(vec![], 0, &page).total_pages(), 0);
    }

    #[test]
    fn test_navigation_flags() {
        let page = PageRequest::new(10, 10).unwrap();
        let result = PageResult::new((0..10).collect::<Vec<u8>>(), 25, &page);
        assert!(result.has_next());
        assert!(result.has_previous());
        assert_eq!(result.page_number(), 1);

        let last = PageResult::new((0..5).collect::<Vec<u8>>(), 15, &page);
        assert!(last.is_last());
    }

    #[test]
    fn test_map_keeps_window() {
        let page = PageRequest::new(2, 2).unwrap();
        let result = PageResult::new(vec![1, 2], 7, &page).map(|n| n * 10);
        assert_eq!(result.content(), &[10, 20]);
        assert_eq!(result.total(), 7);
        assert_eq!(result.offset(), 2);
        assert_eq!(result.limit(), 2);
        assert_eq!(result.into_content(), vec![10, 20]);
    }

    #[test]
    fn test_result_window_comes_from_request() {
        let page = PageRequest::of_page(0, 1).unwrap();
        let result = PageResult::new(vec!['a'], 3, &page);
        assert_eq!(result.limit(), 1);
        assert_eq!(result.total_pages(), 3);
        assert_eq!(result.page_number(), 0);
        assert_eq!(PageResult::<char>::new(vec![], 0, &page).total_pages(), 0);
    }

    #[test]
    fn test_with_sort_replaces_ordering() {
        let page = PageRequest::new(0, 5)
            .unwrap()
            .sorted_by(SortOrder::desc("age"))
            .with_sort(vec![SortOrder::asc("team_name").nulls_first()]);

        assert_eq!(page.sort().len(), 1);
        assert_eq!(page.sort()[0].property, "team_name");
        assert_eq!(page.sort()[0].nulls, NullHandling::NullsFirst);
    }
}
