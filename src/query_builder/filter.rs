//! Predicate composition.
//!
//! A [`ComposedFilter`] is the conjunction of every active fragment produced
//! for one search call. Absent fragments are dropped before the conjunction is
//! formed, so they never contribute a truth value of their own.

use super::conditions::{Condition, FilterValue, Fragment};
use serde::Serialize;
use std::fmt;

/// Rows that can be tested against a composed filter in memory
pub trait Filterable {
    /// Value of the named column, `None` when the column is NULL or unknown
    fn column_value(&self, column: &str) -> Option<FilterValue>;
}

/// Criteria objects that know how to turn themselves into fragments
pub trait SearchCriteria {
    /// One fragment per optional field, in declaration order
    fn fragments(&self) -> Vec<Fragment>;

    fn compose(&self) -> ComposedFilter {
        ComposedFilter::from_fragments(self.fragments())
    }
}

/// Compose criteria into a single filter
pub fn compose<C: SearchCriteria + ?Sized>(criteria: &C) -> ComposedFilter {
    criteria.compose()
}

/// Conjunction of active predicate fragments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComposedFilter {
    conditions: Vec<Condition>,
}

impl ComposedFilter {
    /// The filter that matches every row
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn from_fragments<I>(fragments: I) -> Self
    where
        I: IntoIterator<Item = Fragment>,
    {
        Self {
            conditions: fragments.into_iter().flatten().collect(),
        }
    }

    /// True when no constraint is active
    pub fn is_identity(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Evaluate the conjunction against a row
    pub fn matches<R: Filterable + ?Sized>(&self, row: &R) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.evaluate(row.column_value(condition.column()).as_ref()))
    }
}

impl fmt::Display for ComposedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conditions.is_empty() {
            return write!(f, "<all rows>");
        }
        let parts: Vec<String> = self.conditions.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(" AND "))
    }
}
