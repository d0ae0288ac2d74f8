//! SQL rendering for composed filters.
//!
//! A [`TableSource`] describes the projection a store reads from: base table,
//! joins, and the logical column names filters and sort keys may reference.
//! Content and count statements are both rendered from the same
//! [`ComposedFilter`], so the two can never disagree about which rows match.

use super::conditions::{Condition, FilterValue};
use super::filter::ComposedFilter;
use super::joins::Join;
use super::pagination::{NullHandling, SortOrder};
use crate::store::StoreError;
use sqlx::{Postgres, QueryBuilder};

/// A logical column name bound to its SQL expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub sql: &'static str,
}

impl Column {
    /// Table alias the SQL expression is qualified with, if any
    fn qualifier(&self) -> Option<&'static str> {
        self.sql.split_once('.').map(|(alias, _)| alias)
    }
}

/// Describes the rows a store projects and how to address their columns
#[derive(Debug, Clone)]
pub struct TableSource {
    base_table: &'static str,
    alias: &'static str,
    select_fields: Vec<&'static str>,
    joins: Vec<Join>,
    columns: Vec<Column>,
    tiebreaker: &'static str,
}

impl TableSource {
    /// Start a source on `base_table alias`; `tiebreaker` is a unique column
    /// expression appended to every ordering
    pub fn new(base_table: &'static str, alias: &'static str, tiebreaker: &'static str) -> Self {
        Self {
            base_table,
            alias,
            select_fields: vec!["*"],
            joins: Vec::new(),
            columns: Vec::new(),
            tiebreaker,
        }
    }

    pub fn select(mut self, fields: &[&'static str]) -> Self {
        self.select_fields = fields.to_vec();
        self
    }

    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    pub fn column(mut self, name: &'static str, sql: &'static str) -> Self {
        self.columns.push(Column { name, sql });
        self
    }

    /// Logical column names accepted for filtering and sorting
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.name).collect()
    }

    fn resolve(&self, name: &str) -> Result<&Column, StoreError> {
        self.columns
            .iter()
            .find(|column| column.name == name)
            .ok_or_else(|| StoreError::contract_violation(format!("unknown column '{name}'")))
    }

    /// Build `SELECT ... WHERE ... ORDER BY ... LIMIT ... OFFSET ...`.
    ///
    /// `window` is `(offset, limit)`; `None` renders an unwindowed query.
    pub fn content_query(
        &self,
        filter: &ComposedFilter,
        sort: &[SortOrder],
        window: Option<(u64, u64)>,
    ) -> Result<QueryBuilder<'static, Postgres>, StoreError> {
        let mut scope = SqlScope::new(format!(
            "SELECT {} FROM {} {}",
            self.select_fields.join(", "),
            self.base_table,
            self.alias
        ));
        for join in &self.joins {
            scope.push_join(join);
        }
        for condition in filter.conditions() {
            scope.add_condition(self.resolve(condition.column())?, condition);
        }
        scope.push_order(self.order_clause(sort)?);

        if let Some((offset, limit)) = window {
            scope.push_window(offset, limit)?;
        }

        Ok(scope.query)
    }

    /// Build `SELECT COUNT(*) ... WHERE ...` for the same filter.
    ///
    /// LEFT joins nobody filters on are omitted; they cannot change the count.
    pub fn count_query(
        &self,
        filter: &ComposedFilter,
    ) -> Result<QueryBuilder<'static, Postgres>, StoreError> {
        let filtered_aliases = filter
            .conditions()
            .iter()
            .map(|condition| {
                self.resolve(condition.column())
                    .map(|column| column.qualifier())
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut scope = SqlScope::new(format!(
            "SELECT COUNT(*) FROM {} {}",
            self.base_table, self.alias
        ));
        for join in &self.joins {
            if join.restricts_rows() || filtered_aliases.contains(&Some(join.alias)) {
                scope.push_join(join);
            }
        }
        for condition in filter.conditions() {
            scope.add_condition(self.resolve(condition.column())?, condition);
        }

        Ok(scope.query)
    }

    fn order_clause(&self, sort: &[SortOrder]) -> Result<String, StoreError> {
        let mut keys = Vec::with_capacity(sort.len() + 1);
        for order in sort {
            let column = self.resolve(&order.property)?;
            let mut key = format!("{} {}", column.sql, order.direction.to_sql());
            match order.nulls {
                NullHandling::Native => {}
                NullHandling::NullsFirst => key.push_str(" NULLS FIRST"),
                NullHandling::NullsLast => key.push_str(" NULLS LAST"),
            }
            keys.push(key);
        }
        if !sort.iter().any(|order| {
            self.resolve(&order.property)
                .map(|column| column.sql == self.tiebreaker)
                .unwrap_or(false)
        }) {
            keys.push(format!("{} ASC", self.tiebreaker));
        }
        Ok(keys.join(", "))
    }
}

/// Incrementally rendered statement
struct SqlScope {
    query: QueryBuilder<'static, Postgres>,
    has_conditions: bool,
}

impl SqlScope {
    fn new(head: String) -> Self {
        Self {
            query: QueryBuilder::new(head),
            has_conditions: false,
        }
    }

    /// JOINs must be pushed before the first condition
    fn push_join(&mut self, join: &Join) {
        debug_assert!(!self.has_conditions, "joins must precede WHERE");
        self.query.push(" ");
        self.query.push(join.to_sql());
    }

    fn add_condition(&mut self, column: &Column, condition: &Condition) {
        if self.has_conditions {
            self.query.push(" AND ");
        } else {
            self.query.push(" WHERE ");
            self.has_conditions = true;
        }
        self.query.push(column.sql);
        self.query.push(" ");
        self.query.push(condition.sql_operator());
        self.query.push(" ");
        match condition.value() {
            FilterValue::Text(text) => {
                self.query.push_bind(text.clone());
            }
            FilterValue::Integer(n) => {
                self.query.push_bind(*n);
            }
        }
    }

    fn push_order(&mut self, order: String) {
        self.query.push(" ORDER BY ");
        self.query.push(order);
    }

    fn push_window(&mut self, offset: u64, limit: u64) -> Result<(), StoreError> {
        let limit = i64::try_from(limit)
            .map_err(|_| StoreError::contract_violation(format!("limit {limit} out of range")))?;
        let offset = i64::try_from(offset)
            .map_err(|_| StoreError::contract_violation(format!("offset {offset} out of range")))?;
        self.query.push(" LIMIT ");
        self.query.push_bind(limit);
        self.query.push(" OFFSET ");
        self.query.push_bind(offset);
        Ok(())
    }
}
