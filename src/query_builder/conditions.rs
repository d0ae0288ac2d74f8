use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// A typed filter operand
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
}

impl FilterValue {
    /// Whether the value carries a usable constraint.
    ///
    /// Blank text is treated the same as an absent value.
    pub fn is_meaningful(&self) -> bool {
        match self {
            FilterValue::Text(text) => !text.trim().is_empty(),
            FilterValue::Integer(_) => true,
        }
    }

    /// Compare two operands of the same type; mixed types are incomparable
    fn compare(&self, other: &FilterValue) -> Option<Ordering> {
        match (self, other) {
            (FilterValue::Text(a), FilterValue::Text(b)) => Some(a.cmp(b)),
            (FilterValue::Integer(a), FilterValue::Integer(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Text(text) => write!(f, "'{text}'"),
            FilterValue::Integer(n) => write!(f, "{n}"),
        }
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        FilterValue::Integer(i64::from(value))
    }
}

/// The kind of test a fragment performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Exact match
    Eq,
    /// Inclusive lower bound
    Goe,
    /// Inclusive upper bound
    Loe,
}

/// One atomic predicate on a named column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Condition {
    Eq {
        column: &'static str,
        value: FilterValue,
    },
    Gte {
        column: &'static str,
        value: FilterValue,
    },
    Lte {
        column: &'static str,
        value: FilterValue,
    },
}

/// A predicate fragment: an active condition, or `None` for "no constraint".
pub type Fragment = Option<Condition>;

impl Condition {
    pub fn new(column: &'static str, kind: ConstraintKind, value: FilterValue) -> Self {
        match kind {
            ConstraintKind::Eq => Condition::Eq { column, value },
            ConstraintKind::Goe => Condition::Gte { column, value },
            ConstraintKind::Loe => Condition::Lte { column, value },
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Condition::Eq { column, .. }
            | Condition::Gte { column, .. }
            | Condition::Lte { column, .. } => column,
        }
    }

    pub fn value(&self) -> &FilterValue {
        match self {
            Condition::Eq { value, .. }
            | Condition::Gte { value, .. }
            | Condition::Lte { value, .. } => value,
        }
    }

    pub fn kind(&self) -> ConstraintKind {
        match self {
            Condition::Eq { .. } => ConstraintKind::Eq,
            Condition::Gte { .. } => ConstraintKind::Goe,
            Condition::Lte { .. } => ConstraintKind::Loe,
        }
    }

    /// SQL comparison operator for this condition
    pub fn sql_operator(&self) -> &'static str {
        match self {
            Condition::Eq { .. } => "=",
            Condition::Gte { .. } => ">=",
            Condition::Lte { .. } => "<=",
        }
    }

    /// Evaluate against a row's column value.
    ///
    /// A missing (NULL) value never matches, mirroring SQL comparison semantics.
    pub fn evaluate(&self, actual: Option<&FilterValue>) -> bool {
        let Some(actual) = actual else {
            return false;
        };
        match (self, actual.compare(self.value())) {
            (_, None) => false,
            (Condition::Eq { .. }, Some(ordering)) => ordering == Ordering::Equal,
            (Condition::Gte { .. }, Some(ordering)) => ordering != Ordering::Less,
            (Condition::Lte { .. }, Some(ordering)) => ordering != Ordering::Greater,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.column(), self.sql_operator(), self.value())
    }
}

/// Turn an optional operand into a fragment.
///
/// Absent values, and text values without meaningful content, yield `None`.
pub fn fragment_for<V>(column: &'static str, value: Option<V>, kind: ConstraintKind) -> Fragment
where
    V: Into<FilterValue>,
{
    let value = value.map(Into::into).filter(FilterValue::is_meaningful)?;
    Some(Condition::new(column, kind, value))
}

/// Exact-match fragment
pub fn eq<V: Into<FilterValue>>(column: &'static str, value: Option<V>) -> Fragment {
    fragment_for(column, value, ConstraintKind::Eq)
}

/// Inclusive lower-bound fragment
pub fn goe<V: Into<FilterValue>>(column: &'static str, value: Option<V>) -> Fragment {
    fragment_for(column, value, ConstraintKind::Goe)
}

/// Inclusive upper-bound fragment
pub fn loe<V: Into<FilterValue>>(column: &'static str, value: Option<V>) -> Fragment {
    fragment_for(column, value, ConstraintKind::Loe)
}
