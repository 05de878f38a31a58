//! Bulk import of contacts from CSV files
//!
//! The file must have a header row naming the `Name`, `Phone Number` and
//! `Email` columns. Other columns are ignored. Values are copied verbatim;
//! rows with empty names or phones are not filtered out.

use csv::{ReaderBuilder, StringRecord};
use log::info;
use std::io::Read;
use std::path::Path;

use crate::error::ContactError;
use crate::models::Contact;

pub const NAME_COLUMN: &str = "Name";
pub const PHONE_COLUMN: &str = "Phone Number";
pub const EMAIL_COLUMN: &str = "Email";

/// Column positions resolved from the header row
struct Columns {
    name: Option<usize>,
    phone: Option<usize>,
    email: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |column: &str| headers.iter().position(|h| h == column);
        Self {
            name: find(NAME_COLUMN),
            phone: find(PHONE_COLUMN),
            email: find(EMAIL_COLUMN),
        }
    }

    fn contact(&self, record: &StringRecord) -> Result<Contact, ContactError> {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let field = |index: Option<usize>, column: &str| {
            index
                .and_then(|i| record.get(i))
                .ok_or_else(|| ContactError::MalformedRow {
                    line,
                    column: column.to_string(),
                })
        };

        let name = field(self.name, NAME_COLUMN)?;
        let phone = field(self.phone, PHONE_COLUMN)?;
        let email = field(self.email, EMAIL_COLUMN)?;

        Ok(Contact::new(name, phone, Some(email.to_string())))
    }
}

/// Reads every contact from a CSV file
///
/// Fails on the first row that lacks a required column, so a bad file never
/// produces a partial import.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Contact>, ContactError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ContactError::ImportFileNotFound(path.to_path_buf()));
    }

    let reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|source| ContactError::Import {
            path: path.to_path_buf(),
            source,
        })?;

    let contacts = read_records(reader).map_err(|e| e.into_contact_error(path))?;

    info!("Read {} contact(s) from {:?}", contacts.len(), path);
    Ok(contacts)
}

/// Reads contacts from any CSV source, e.g. an in-memory buffer
pub fn read_csv_from<R: Read>(source: R) -> Result<Vec<Contact>, ContactError> {
    let reader = ReaderBuilder::new().flexible(true).from_reader(source);
    read_records(reader).map_err(|e| e.into_contact_error(Path::new("<input>")))
}

enum RowError {
    Csv(csv::Error),
    Contact(ContactError),
}

impl RowError {
    fn into_contact_error(self, path: &Path) -> ContactError {
        match self {
            RowError::Csv(source) => ContactError::Import {
                path: path.to_path_buf(),
                source,
            },
            RowError::Contact(e) => e,
        }
    }
}

fn read_records<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<Contact>, RowError> {
    let columns = Columns::from_headers(reader.headers().map_err(RowError::Csv)?);

    let mut contacts = Vec::new();
    for record in reader.records() {
        let record = record.map_err(RowError::Csv)?;
        contacts.push(columns.contact(&record).map_err(RowError::Contact)?);
    }
    Ok(contacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_csv_rows_in_order() {
        let csv = "Name,Phone Number,Email\nAda,555-1,ada@x.com\nBob,555-2,\n";
        let contacts = read_csv_from(csv.as_bytes()).unwrap();

        assert_eq!(
            contacts,
            vec![
                Contact::new("Ada", "555-1", Some("ada@x.com".to_string())),
                Contact::new("Bob", "555-2", None),
            ]
        );
    }

    #[test]
    fn test_read_csv_ignores_extra_columns_and_order() {
        let csv = "Email,Company,Phone Number,Name\na@x.com,Acme,555-1,Ada\n";
        let contacts = read_csv_from(csv.as_bytes()).unwrap();

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "Ada");
        assert_eq!(contacts[0].phone, "555-1");
        assert_eq!(contacts[0].email.as_deref(), Some("a@x.com"));
    }

    #[test]
    fn test_read_csv_keeps_duplicates_and_empty_values() {
        let csv = "Name,Phone Number,Email\nAda,555-1,\nAda,555-1,\n,,\n";
        let contacts = read_csv_from(csv.as_bytes()).unwrap();

        assert_eq!(contacts.len(), 3);
        assert_eq!(contacts[0], contacts[1]);
        assert_eq!(contacts[2].name, "");
    }

    #[test]
    fn test_short_row_names_line_and_column() {
        let csv = "Name,Phone Number,Email\nAda,555-1,a@x.com\nBob,555-2\n";
        let err = read_csv_from(csv.as_bytes()).unwrap_err();

        match err {
            ContactError::MalformedRow { line, column } => {
                assert_eq!(line, 3);
                assert_eq!(column, EMAIL_COLUMN);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_header_column() {
        let csv = "Name,Phone\nAda,555-1\n";
        let err = read_csv_from(csv.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            ContactError::MalformedRow { line: 2, ref column } if column == PHONE_COLUMN
        ));
    }

    #[test]
    fn test_header_only_file_is_empty_import() {
        let contacts = read_csv_from("Name\n".as_bytes()).unwrap();
        assert!(contacts.is_empty());
    }

    #[test]
    fn test_read_csv_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_csv(temp_dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, ContactError::ImportFileNotFound(_)));
    }

    #[test]
    fn test_read_csv_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("people.csv");
        fs::write(&path, "Name,Phone Number,Email\n\"Lovelace, Ada\",555-1,\n").unwrap();

        let contacts = read_csv(&path).unwrap();
        assert_eq!(contacts, vec![Contact::new("Lovelace, Ada", "555-1", None)]);
    }
}
