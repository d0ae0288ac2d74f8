//! # Search Error Types
//!
//! Structured error handling for the search layer using thiserror.
//! Every failure surfaces to the caller unchanged; deciding what a failure
//! means to an end user (status codes, messages) belongs to the caller.

use crate::store::StoreError;
use std::fmt;
use thiserror::Error;

/// Which delegated query a failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOperation {
    Content,
    Count,
}

impl fmt::Display for QueryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryOperation::Content => write!(f, "content query"),
            QueryOperation::Count => write!(f, "count query"),
        }
    }
}

/// Errors produced by a search call
#[derive(Error, Debug)]
pub enum SearchError {
    /// Caller contract violation, detected before any query is issued
    #[error("Invalid argument: {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    /// A delegated content or count query failed
    #[error("Query execution failed: {operation}")]
    QueryExecutionFailed {
        operation: QueryOperation,
        #[source]
        source: StoreError,
    },
}

impl SearchError {
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn query_failed(operation: QueryOperation, source: StoreError) -> Self {
        Self::QueryExecutionFailed { operation, source }
    }

    /// True when the caller supplied bad input
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, SearchError::InvalidArgument { .. })
    }

    /// The failed operation, if this is a query failure
    pub fn failed_operation(&self) -> Option<QueryOperation> {
        match self {
            SearchError::QueryExecutionFailed { operation, .. } => Some(*operation),
            SearchError::InvalidArgument { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
