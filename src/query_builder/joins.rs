/// Supported SQL JOIN kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
}

impl JoinType {
    pub fn to_sql(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT JOIN",
        }
    }
}

/// A JOIN clause on a table addressed through an alias
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub join_type: JoinType,
    pub table: &'static str,
    pub alias: &'static str,
    pub on_condition: &'static str,
}

impl Join {
    /// Create an INNER JOIN
    pub fn inner(table: &'static str, alias: &'static str, on_condition: &'static str) -> Self {
        Self {
            join_type: JoinType::Inner,
            table,
            alias,
            on_condition,
        }
    }

    /// Create a LEFT JOIN.
    ///
    /// Left joins must be many-to-one so that they never multiply base rows;
    /// count queries drop them when no filter references the joined table.
    pub fn left(table: &'static str, alias: &'static str, on_condition: &'static str) -> Self {
        Self {
            join_type: JoinType::Left,
            table,
            alias,
            on_condition,
        }
    }

    /// Whether the join can change the set of base rows
    pub fn restricts_rows(&self) -> bool {
        self.join_type == JoinType::Inner
    }

    pub fn to_sql(&self) -> String {
        format!(
            "{} {} {} ON {}",
            self.join_type.to_sql(),
            self.table,
            self.alias,
            self.on_condition
        )
    }
}
