//! Error types for contact book operations
//!
//! Not-found conditions are not errors; they are reported through the result
//! enums in [`crate::book`]. A corrupt store is a warning, see
//! [`crate::storage::CorruptStore`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during contact book operations
#[derive(Error, Debug)]
pub enum ContactError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid field '{0}': expected 'name' or 'number'")]
    InvalidField(String),

    #[error("Import row at line {line} is missing the '{column}' column")]
    MalformedRow { line: u64, column: String },

    #[error("Import file not found: {}", .0.display())]
    ImportFileNotFound(PathBuf),

    #[error("Failed to read import file {}: {source}", .path.display())]
    Import {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write export file {}: {source}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Storage error on {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize contacts: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ContactError {
    /// True for the validation family: bad input rather than a failed disk
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ContactError::MissingField(_)
                | ContactError::InvalidField(_)
                | ContactError::MalformedRow { .. }
                | ContactError::ImportFileNotFound(_)
        )
    }

    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ContactError::Storage {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ContactError::MissingField("Name");
        assert_eq!(err.to_string(), "Name is required");

        let err = ContactError::MalformedRow {
            line: 3,
            column: "Email".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Import row at line 3 is missing the 'Email' column"
        );
    }

    #[test]
    fn test_validation_grouping() {
        assert!(ContactError::InvalidField("email".into()).is_validation());
        assert!(ContactError::ImportFileNotFound(PathBuf::from("x.csv")).is_validation());

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!ContactError::storage("Contacts.json", io).is_validation());
    }
}
