//! Tabular (CSV) report input.

mod reader;

pub use reader::{ColumnMap, TableReader, read_matrix};

use crate::error::TableError;

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
