use log::debug;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::ContactError;
use crate::models::{Contact, ContactsDocument};

/// Warning raised when the store file exists but cannot be parsed
///
/// The unreadable content is replaced by an empty collection and will be
/// overwritten by the next save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorruptStore {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for CorruptStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Store file {} was empty or corrupt ({}). Starting fresh.",
            self.path.display(),
            self.reason
        )
    }
}

/// How the store file looked when it was loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreStatus {
    /// The file does not exist yet
    Missing,
    /// The file was parsed successfully
    Loaded,
    /// The file exists but could not be parsed
    Corrupt(CorruptStore),
}

/// Result of loading the store
#[derive(Debug, Clone)]
pub struct Loaded {
    pub contacts: Vec<Contact>,
    pub status: StoreStatus,
}

impl Loaded {
    pub fn warning(&self) -> Option<&CorruptStore> {
        match &self.status {
            StoreStatus::Corrupt(w) => Some(w),
            _ => None,
        }
    }
}

/// Write side of `ContactsDocument`, borrowing the contacts
#[derive(Serialize)]
struct DocumentRef<'a> {
    contacts: &'a [Contact],
}

/// Serializes contacts into the store document format (4-space indented JSON)
pub(crate) fn to_document_json(contacts: &[Contact]) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    DocumentRef { contacts }.serialize(&mut ser)?;
    Ok(buf)
}

/// Handles saving and loading contacts from a single JSON document on disk
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    /// Creates a new Storage instance
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    /// Returns the path to the storage file
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Returns true if the store file exists
    pub fn exists(&self) -> bool {
        self.file_path.exists()
    }

    /// Loads contacts from the JSON file
    ///
    /// A missing or unparsable file is not an error: both yield an empty
    /// collection, distinguished by [`StoreStatus`]. Only other I/O failures
    /// are returned as [`ContactError::Storage`].
    pub fn load(&self) -> Result<Loaded, ContactError> {
        let bytes = match fs::read(&self.file_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No store at {:?}, starting empty", self.file_path);
                return Ok(Loaded {
                    contacts: Vec::new(),
                    status: StoreStatus::Missing,
                });
            }
            Err(e) => return Err(ContactError::storage(&self.file_path, e)),
        };

        match serde_json::from_slice::<ContactsDocument>(&bytes) {
            Ok(document) => {
                debug!(
                    "Loaded {} contact(s) from {:?}",
                    document.contacts.len(),
                    self.file_path
                );
                Ok(Loaded {
                    contacts: document.contacts,
                    status: StoreStatus::Loaded,
                })
            }
            Err(e) => {
                let warning = CorruptStore {
                    path: self.file_path.clone(),
                    reason: e.to_string(),
                };
                debug!("Failed to parse {:?}: {}", self.file_path, e);
                Ok(Loaded {
                    contacts: Vec::new(),
                    status: StoreStatus::Corrupt(warning),
                })
            }
        }
    }

    /// Saves the full collection, overwriting the previous file content
    pub fn save(&self, contacts: &[Contact]) -> Result<(), ContactError> {
        // Create parent directories if they don't exist
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ContactError::storage(parent, e))?;
            }
        }

        let json = to_document_json(contacts)?;
        fs::write(&self.file_path, json).map_err(|e| ContactError::storage(&self.file_path, e))?;

        debug!("Saved {} contact(s) to {:?}", contacts.len(), self.file_path);
        Ok(())
    }
}
