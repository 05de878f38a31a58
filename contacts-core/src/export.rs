use csv::Writer;
use log::info;
use std::fs;
use std::path::Path;

use crate::error::ContactError;
use crate::import::{EMAIL_COLUMN, NAME_COLUMN, PHONE_COLUMN};
use crate::models::Contact;
use crate::storage::to_document_json;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Default output file name for the format
    pub fn default_file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "contacts.csv",
            ExportFormat::Json => "contacts-export.json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!(
                "Unknown export format: {}. Supported formats: csv, json",
                s
            )),
        }
    }
}

/// Exports contacts in the given format, returning how many were written
pub fn export(
    contacts: &[Contact],
    format: ExportFormat,
    output_path: &Path,
) -> Result<usize, ContactError> {
    match format {
        ExportFormat::Csv => export_csv(contacts, output_path),
        ExportFormat::Json => export_json(contacts, output_path),
    }
}

/// Export contacts to a CSV file that the importer reads back unchanged
pub fn export_csv(contacts: &[Contact], output_path: &Path) -> Result<usize, ContactError> {
    let csv_err = |source: csv::Error| ContactError::Export {
        path: output_path.to_path_buf(),
        source,
    };

    let mut writer = Writer::from_path(output_path).map_err(csv_err)?;
    writer
        .write_record([NAME_COLUMN, PHONE_COLUMN, EMAIL_COLUMN])
        .map_err(csv_err)?;
    for contact in contacts {
        writer
            .write_record([
                contact.name.as_str(),
                contact.phone.as_str(),
                contact.email.as_deref().unwrap_or(""),
            ])
            .map_err(csv_err)?;
    }
    writer
        .flush()
        .map_err(|e| ContactError::storage(output_path, e))?;

    info!("Exported {} contact(s) to {:?}", contacts.len(), output_path);
    Ok(contacts.len())
}

/// Export contacts to JSON in the same document shape as the store
pub fn export_json(contacts: &[Contact], output_path: &Path) -> Result<usize, ContactError> {
    let json = to_document_json(contacts)?;
    fs::write(output_path, json).map_err(|e| ContactError::storage(output_path, e))?;

    info!("Exported {} contact(s) to {:?}", contacts.len(), output_path);
    Ok(contacts.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::read_csv;
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn sample() -> Vec<Contact> {
        vec![
            Contact::new("Lovelace, Ada", "555-1", Some("ada@x.com".to_string())),
            Contact::new("Bob \"B\" Smith", "555-2", None),
        ]
    }

    #[test]
    fn test_csv_export_reimports_same_contacts() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");

        assert_eq!(export_csv(&sample(), &path).unwrap(), 2);
        assert_eq!(read_csv(&path).unwrap(), sample());
    }

    #[test]
    fn test_csv_export_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");

        export_csv(&[], &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Name,Phone Number,Email\n");
    }

    #[test]
    fn test_json_export_is_loadable_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.json");

        export(&sample(), ExportFormat::Json, &path).unwrap();
        assert_eq!(Storage::new(&path).load().unwrap().contacts, sample());
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("yaml".parse::<ExportFormat>().is_err());
    }
}
