//! Database schema summary types.
//!
//! Represents the compact table → columns mapping (plus foreign-key edges)
//! that gets embedded in the classifier prompt. Built fresh per request
//! from the live database; never persisted.

use serde::{Deserialize, Serialize};

/// Compact summary of a database schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaSummary {
    /// All tables, in introspection order.
    pub tables: Vec<TableSummary>,

    /// Foreign key relationships between tables.
    pub foreign_keys: Vec<ForeignKey>,
}

impl SchemaSummary {
    /// Creates a new empty schema summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no tables were discovered.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Formats the summary for inclusion in the classifier prompt.
    ///
    /// Produces a compact, human-readable representation that helps the
    /// LLM pick valid tables and columns.
    pub fn format_for_prompt(&self) -> String {
        if self.is_empty() {
            return "(no database schema available)".to_string();
        }

        let tables_text = self
            .tables
            .iter()
            .map(|table| format!("Table: {}\n  columns: {}\n", table.name, table.columns.join(", ")))
            .collect::<Vec<_>>()
            .join("");

        let foreign_keys_text = if self.foreign_keys.is_empty() {
            String::new()
        } else {
            let fk_lines = self
                .foreign_keys
                .iter()
                .map(|fk| {
                    format!(
                        "  - {}.{} -> {}.{}\n",
                        fk.from_table, fk.from_column, fk.to_table, fk.to_column
                    )
                })
                .collect::<Vec<_>>()
                .join("");
            format!("Foreign Keys:\n{}", fk_lines)
        };

        format!("{}{}", tables_text, foreign_keys_text)
    }
}

/// A table with its column names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableSummary {
    /// Table name (unique within the schema).
    pub name: String,

    /// Column names, in ordinal order.
    pub columns: Vec<String>,
}

impl TableSummary {
    /// Creates a table summary with the given name and columns.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }
}

/// A foreign key edge between two tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Source table name.
    pub from_table: String,

    /// Source column name.
    pub from_column: String,

    /// Target table name.
    pub to_table: String,

    /// Target column name.
    pub to_column: String,
}

impl ForeignKey {
    /// Creates a new foreign key edge.
    pub fn new(
        from_table: impl Into<String>,
        from_column: impl Into<String>,
        to_table: impl Into<String>,
        to_column: impl Into<String>,
    ) -> Self {
        Self {
            from_table: from_table.into(),
            from_column: from_column.into(),
            to_table: to_table.into(),
            to_column: to_column.into(),
        }
    }
}
