//! Contact book operations
//!
//! Every operation is self-contained: it loads the store, works on the
//! in-memory collection, writes the whole collection back when it changed,
//! and reports a typed outcome. Nothing is cached between calls.

use log::{info, warn};
use std::path::Path;

use crate::error::ContactError;
use crate::import;
use crate::models::{Contact, UpdateField};
use crate::storage::{CorruptStore, Loaded, Storage, StoreStatus};

/// Outcome of adding a single contact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddResult {
    /// The contact was appended and saved
    Added(Contact),
    /// A contact with the same phone number is already stored; nothing was written
    AlreadyExists(Contact),
}

/// Outcome of listing the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// The store file has never been created
    NoStore,
    /// All stored contacts, in insertion order (may be empty)
    Contacts(Vec<Contact>),
}

/// Outcome of a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    Found(Vec<Contact>),
    NoMatches,
}

/// Outcome of an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateResult {
    Updated { before: Contact, after: Contact },
    NotFound,
}

/// Outcome of a delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteResult {
    /// Number of contacts removed
    Deleted(usize),
    NotFound,
}

type WarningHandler = Box<dyn Fn(&CorruptStore)>;

/// The contact store: add, import, list, search, update and delete contacts
/// held in a single JSON document.
pub struct ContactBook {
    storage: Storage,
    on_warning: Option<WarningHandler>,
}

impl ContactBook {
    /// Creates a contact book backed by the given storage
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            on_warning: None,
        }
    }

    /// Creates a contact book for the store file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::new(Storage::new(path))
    }

    /// Installs a callback that receives corrupt-store warnings
    ///
    /// Without a handler the warnings go to the log.
    pub fn with_warning_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&CorruptStore) + 'static,
    {
        self.on_warning = Some(Box::new(handler));
        self
    }

    /// Returns the underlying storage
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    fn load(&self) -> Result<Loaded, ContactError> {
        let loaded = self.storage.load()?;
        if let Some(warning) = loaded.warning() {
            match &self.on_warning {
                Some(handler) => handler(warning),
                None => warn!("{}", warning),
            }
        }
        Ok(loaded)
    }

    fn load_contacts(&self) -> Result<Vec<Contact>, ContactError> {
        Ok(self.load()?.contacts)
    }

    /// Adds one contact unless its phone number is already stored
    ///
    /// Name and phone must be non-empty. An empty email is stored as null.
    pub fn add_one(
        &self,
        name: &str,
        phone: &str,
        email: Option<&str>,
    ) -> Result<AddResult, ContactError> {
        if name.is_empty() {
            return Err(ContactError::MissingField("Name"));
        }
        if phone.is_empty() {
            return Err(ContactError::MissingField("Phone number"));
        }

        let mut contacts = self.load_contacts()?;

        if let Some(existing) = contacts.iter().find(|c| c.phone == phone) {
            return Ok(AddResult::AlreadyExists(existing.clone()));
        }

        let contact = Contact::new(name, phone, email.map(str::to_string));
        contacts.push(contact.clone());
        self.storage.save(&contacts)?;

        Ok(AddResult::Added(contact))
    }

    /// Appends every record as-is and saves
    ///
    /// Unlike [`ContactBook::add_one`], no duplicate check is made, neither
    /// against stored contacts nor within the batch. Returns the number of
    /// records appended.
    pub fn add_bulk(&self, records: Vec<Contact>) -> Result<usize, ContactError> {
        let mut contacts = self.load_contacts()?;
        let count = records.len();
        contacts.extend(records);
        self.storage.save(&contacts)?;

        info!("Appended {} contact(s) to {:?}", count, self.storage.path());
        Ok(count)
    }

    /// Imports contacts from a CSV file through [`ContactBook::add_bulk`]
    ///
    /// The whole file is read first; a malformed row aborts the import
    /// before the store is touched.
    pub fn import_file<P: AsRef<Path>>(&self, path: P) -> Result<usize, ContactError> {
        let records = import::read_csv(path)?;
        self.add_bulk(records)
    }

    /// Lists all contacts in stored order
    pub fn list(&self) -> Result<Listing, ContactError> {
        let loaded = self.load()?;
        if loaded.status == StoreStatus::Missing {
            return Ok(Listing::NoStore);
        }
        Ok(Listing::Contacts(loaded.contacts))
    }

    /// Returns every contact whose name or phone contains `term`
    pub fn search(&self, term: &str) -> Result<SearchResult, ContactError> {
        let matches: Vec<Contact> = self
            .load_contacts()?
            .into_iter()
            .filter(|c| c.matches(term))
            .collect();

        if matches.is_empty() {
            Ok(SearchResult::NoMatches)
        } else {
            Ok(SearchResult::Found(matches))
        }
    }

    /// Returns the first contact (in stored order) that `update` would touch
    pub fn find_first(&self, term: &str) -> Result<Option<Contact>, ContactError> {
        Ok(self.load_contacts()?.into_iter().find(|c| c.matches(term)))
    }

    /// Overwrites `field` on the first contact matching `term`
    ///
    /// Only the first match is ever modified, even when several contacts
    /// match. `field` must be exactly `"name"` or `"number"`; it is checked
    /// only once a match is found.
    pub fn update(
        &self,
        term: &str,
        field: &str,
        new_value: &str,
    ) -> Result<UpdateResult, ContactError> {
        let mut contacts = self.load_contacts()?;

        let Some(contact) = contacts.iter_mut().find(|c| c.matches(term)) else {
            return Ok(UpdateResult::NotFound);
        };

        let field: UpdateField = field.parse()?;
        if new_value.is_empty() {
            return Err(match field {
                UpdateField::Name => ContactError::MissingField("Name"),
                UpdateField::Number => ContactError::MissingField("Phone number"),
            });
        }

        let before = contact.clone();
        match field {
            UpdateField::Name => contact.name = new_value.to_string(),
            UpdateField::Number => contact.phone = new_value.to_string(),
        }
        let after = contact.clone();

        if field == UpdateField::Number
            && contacts
                .iter()
                .filter(|c| c.phone == after.phone)
                .count()
                > 1
        {
            warn!("Phone number {} is now shared by several contacts", after.phone);
        }

        self.storage.save(&contacts)?;
        Ok(UpdateResult::Updated { before, after })
    }

    /// Removes every contact whose name or phone contains `term`
    ///
    /// The store is only rewritten when something was removed.
    pub fn delete(&self, term: &str) -> Result<DeleteResult, ContactError> {
        let mut contacts = self.load_contacts()?;
        let original_len = contacts.len();
        contacts.retain(|c| !c.matches(term));

        let removed = original_len - contacts.len();
        if removed == 0 {
            return Ok(DeleteResult::NotFound);
        }

        self.storage.save(&contacts)?;
        Ok(DeleteResult::Deleted(removed))
    }
}
