pub mod book;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod storage;

// Re-export commonly used types
pub use book::{AddResult, ContactBook, DeleteResult, Listing, SearchResult, UpdateResult};
pub use config::{determine_store_path, get_config_path, Config};
pub use error::ContactError;
pub use export::ExportFormat;
pub use models::{Contact, ContactsDocument, UpdateField};
pub use storage::{CorruptStore, Loaded, Storage, StoreStatus};
