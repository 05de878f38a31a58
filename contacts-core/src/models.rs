use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ContactError;

/// A single contact record
///
/// The serialized key names match existing `Contacts.json` files, so stores
/// written by earlier versions of the tool keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    #[serde(rename = "Name", deserialize_with = "null_as_empty")]
    pub name: String,

    /// Uniqueness key for single adds
    #[serde(rename = "Phone Number", deserialize_with = "null_as_empty")]
    pub phone: String,

    /// Written as `null` when absent, never omitted
    #[serde(rename = "Email")]
    pub email: Option<String>,
}

/// Older stores hold `null` names and phones for short import rows
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Contact {
    /// Creates a new contact, treating an empty email as absent
    pub fn new(name: impl Into<String>, phone: impl Into<String>, email: Option<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.filter(|e| !e.is_empty()),
        }
    }

    /// Case-sensitive substring match against name or phone
    pub fn matches(&self, term: &str) -> bool {
        self.name.contains(term) || self.phone.contains(term)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Phone: {}, Email: {}",
            self.name,
            self.phone,
            self.email.as_deref().unwrap_or("None")
        )
    }
}

/// On-disk shape of the store as read back: a single `contacts` array
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ContactsDocument {
    pub contacts: Vec<Contact>,
}

/// Field that an update may overwrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateField {
    Name,
    Number,
}

impl FromStr for UpdateField {
    type Err = ContactError;

    /// Only the exact selectors `name` and `number` are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(UpdateField::Name),
            "number" => Ok(UpdateField::Number),
            other => Err(ContactError::InvalidField(other.to_string())),
        }
    }
}

impl fmt::Display for UpdateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateField::Name => write!(f, "name"),
            UpdateField::Number => write!(f, "number"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_serializes_with_store_key_names() {
        let contact = Contact::new("Ada", "555-1", None);
        let json = serde_json::to_string(&contact).unwrap();
        assert_eq!(json, r#"{"Name":"Ada","Phone Number":"555-1","Email":null}"#);
    }

    #[test]
    fn test_null_name_and_phone_read_as_empty() {
        let json = r#"{"Name":null,"Phone Number":null,"Email":null}"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact, Contact::new("", "", None));

        let json = r#"{"Name":3,"Phone Number":"1","Email":null}"#;
        assert!(serde_json::from_str::<Contact>(json).is_err());
    }

    #[test]
    fn test_empty_email_becomes_none() {
        let contact = Contact::new("Ada", "555-1", Some(String::new()));
        assert_eq!(contact.email, None);
    }

    #[test]
    fn test_matches_is_case_sensitive_substring() {
        let contact = Contact::new("Ada Lovelace", "555-0101", None);
        assert!(contact.matches("Love"));
        assert!(contact.matches("0101"));
        assert!(contact.matches(""));
        assert!(!contact.matches("love"));
        assert!(!contact.matches("ada@"));
    }

    #[test]
    fn test_update_field_parsing_is_exact() {
        assert_eq!("name".parse::<UpdateField>().unwrap(), UpdateField::Name);
        assert_eq!("number".parse::<UpdateField>().unwrap(), UpdateField::Number);
        assert!("Name".parse::<UpdateField>().is_err());
        assert!(" number".parse::<UpdateField>().is_err());
        assert!("email".parse::<UpdateField>().is_err());
    }
}
