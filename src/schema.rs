//! Immutable ordered column tables.
//!
//! This module provides [`CsvSchema`], the column table a codec instance is
//! bound to, and [`Column`], one named, indexed entry in it.
//!
//! ## Why IndexMap?
//!
//! The schema keeps an [`IndexMap`] from name to index so that:
//!
//! - **Resolution is O(1)**: field-name events look columns up by name on
//!   every value write.
//! - **Order is declaration order**: output column order is always schema
//!   index order, never write order, so iteration must be deterministic.
//!
//! A schema is immutable after construction. Rebinding a codec to different
//! columns means building a new schema, never patching one in place, so a
//! row in flight can never observe a schema change.
//!
//! ## Examples
//!
//! ```rust
//! use flatcsv::CsvSchema;
//!
//! let schema = CsvSchema::builder()
//!     .column("age")
//!     .column("name")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.len(), 2);
//! assert_eq!(schema.index_of("name"), Some(1));
//! assert!(schema.index_of("email").is_none());
//! ```

use crate::{Error, Result};
use indexmap::IndexMap;
use std::fmt;

/// One column of a [`CsvSchema`]: a name and its position.
///
/// Indices are a dense `0..N-1` permutation matching declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    name: String,
    index: usize,
}

impl Column {
    /// The column name, unique within its schema.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The zero-based column position.
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// An immutable, ordered table of columns resolved by name or position.
///
/// Shared read-only by every row operation of a codec instance; safe to
/// clone or share across concurrently-running instances.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CsvSchema {
    columns: Vec<Column>,
    by_name: IndexMap<String, usize>,
}

impl CsvSchema {
    /// Starts building a schema.
    #[must_use]
    pub fn builder() -> CsvSchemaBuilder {
        CsvSchemaBuilder { names: Vec::new() }
    }

    /// Builds a schema from an ordered sequence of column names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] on a duplicate name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcsv::CsvSchema;
    ///
    /// let schema = CsvSchema::from_names(["a", "b", "c"]).unwrap();
    /// assert_eq!(schema.column_at(2).unwrap().name(), "c");
    ///
    /// assert!(CsvSchema::from_names(["a", "a"]).is_err());
    /// ```
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut by_name = IndexMap::new();
        let mut columns = Vec::new();
        for name in names {
            let name = name.into();
            let index = columns.len();
            if by_name.insert(name.clone(), index).is_some() {
                return Err(Error::configuration(format!(
                    "duplicate column name '{name}'"
                )));
            }
            columns.push(Column { name, index });
        }
        Ok(CsvSchema { columns, by_name })
    }

    /// Resolves a column name to its index.
    #[inline]
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Resolves a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index_of(name).and_then(|ix| self.columns.get(ix))
    }

    /// Returns the column at a position, if in range.
    #[must_use]
    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the schema has no columns.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterates columns in index order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// The column names joined for diagnostics, e.g. `"age", "name"`.
    #[must_use]
    pub fn known_columns(&self) -> String {
        let names: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("\"{}\"", c.name))
            .collect();
        names.join(", ")
    }
}

impl fmt::Display for CsvSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.known_columns())
    }
}

/// Builder for [`CsvSchema`], collecting columns in declaration order.
#[derive(Debug, Default)]
pub struct CsvSchemaBuilder {
    names: Vec<String>,
}

impl CsvSchemaBuilder {
    /// Appends a column.
    #[must_use]
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Finalizes the schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] on a duplicate column name.
    pub fn build(self) -> Result<CsvSchema> {
        CsvSchema::from_names(self.names)
    }
}
