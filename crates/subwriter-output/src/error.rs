//! Error types for spreadsheet output.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors writing an export spreadsheet.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write workbook {path}: {source}")]
    Xlsx {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("sheet has {columns} columns, more than a worksheet holds")]
    TooManyColumns { columns: usize },

    #[error("sheet has {rows} rows, more than a worksheet holds")]
    TooManyRows { rows: usize },
}

impl OutputError {
    /// The file the failed write targeted, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::CreateDir { path, .. }
            | Self::Io { path, .. }
            | Self::Xlsx { path, .. }
            | Self::Csv { path, .. } => Some(path),
            Self::TooManyColumns { .. } | Self::TooManyRows { .. } => None,
        }
    }

    /// True when the target exists but cannot be written, which usually
    /// means another program has it open.
    pub fn is_locked(&self) -> bool {
        let kind = match self {
            Self::Io { source, .. } => Some(source.kind()),
            Self::Xlsx {
                source: rust_xlsxwriter::XlsxError::IoError(source),
                ..
            } => Some(source.kind()),
            Self::Csv { source, .. } => match source.kind() {
                csv::ErrorKind::Io(source) => Some(source.kind()),
                _ => None,
            },
            _ => None,
        };
        kind == Some(io::ErrorKind::PermissionDenied)
    }

    /// Returns a short message suitable for a status line.
    pub fn user_message(&self) -> String {
        match (self.path(), self.is_locked()) {
            (Some(path), true) => format!(
                "Could not write {}: is it open in another program?",
                path.display()
            ),
            (Some(path), false) => format!("Could not write {}.", path.display()),
            (None, _) => self.to_string(),
        }
    }
}

/// Result type alias for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locked_message() {
        let err = OutputError::Io {
            path: PathBuf::from("DELIVERY.xlsx"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(err.is_locked());
        assert_eq!(
            err.user_message(),
            "Could not write DELIVERY.xlsx: is it open in another program?"
        );
    }

    #[test]
    fn test_other_io_message() {
        let err = OutputError::Io {
            path: PathBuf::from("DELIVERY.csv"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(!err.is_locked());
        assert_eq!(err.user_message(), "Could not write DELIVERY.csv.");
    }
}
