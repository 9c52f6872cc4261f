//! Typed errors for the storage and editing layers. Application glue (startup,
//! terminal handling) wraps these in `anyhow` with context instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a collection could not be read from or written to its file.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no data file at {}", path.display())]
    Missing { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unreadable data in {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// True when the file simply has not been written yet.
    pub fn is_missing(&self) -> bool {
        matches!(self, StoreError::Missing { .. })
    }
}

/// Editor action that needs a selected table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Load,
    Update,
    Delete,
}

impl RowAction {
    fn verb(self) -> &'static str {
        match self {
            RowAction::Load => "edit",
            RowAction::Update => "update",
            RowAction::Delete => "delete",
        }
    }
}

/// Rejected editor actions. None of these leave a trace in the list or on
/// disk.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Invalid {field} format.")]
    InvalidNumber { field: &'static str },

    #[error("{field} must be a date (YYYY-MM-DD).")]
    InvalidDate { field: &'static str },

    #[error("Select a {field} first.")]
    MissingChoice { field: &'static str },

    #[error("Please select a row to {}.", action.verb())]
    NoSelection { action: RowAction },
}
