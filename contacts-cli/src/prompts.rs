use anyhow::Result;
use inquire::{Confirm, Select, Text};
use std::fmt;
use std::path::PathBuf;

/// Top-level menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Add,
    View,
    Search,
    Update,
    Delete,
    Exit,
}

impl fmt::Display for MainChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MainChoice::Add => write!(f, "Add Contact"),
            MainChoice::View => write!(f, "View Contacts"),
            MainChoice::Search => write!(f, "Search Contact"),
            MainChoice::Update => write!(f, "Update Contact"),
            MainChoice::Delete => write!(f, "Delete Contact"),
            MainChoice::Exit => write!(f, "Exit"),
        }
    }
}

/// Entries of the add sub-menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddChoice {
    Manual,
    Import,
    Back,
}

impl fmt::Display for AddChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddChoice::Manual => write!(f, "Add contact manually"),
            AddChoice::Import => write!(f, "Import contacts from CSV file"),
            AddChoice::Back => write!(f, "Back to main menu"),
        }
    }
}

pub fn prompt_main_menu() -> Result<MainChoice> {
    let options = vec![
        MainChoice::Add,
        MainChoice::View,
        MainChoice::Search,
        MainChoice::Update,
        MainChoice::Delete,
        MainChoice::Exit,
    ];
    Ok(Select::new("Contact Book Menu:", options).prompt()?)
}

pub fn prompt_add_menu() -> Result<AddChoice> {
    let options = vec![AddChoice::Manual, AddChoice::Import, AddChoice::Back];
    Ok(Select::new("Add contact:", options).prompt()?)
}

/// Prompts the user for a new contact's name, phone number and email
///
/// Values are returned untouched; validation happens in the contact book.
pub fn prompt_new_contact() -> Result<(String, String, String)> {
    let name = Text::new("Name:").prompt()?;
    let phone = Text::new("Phone number:").prompt()?;
    let email = Text::new("Email:")
        .with_help_message("Leave empty if unknown")
        .prompt()?;

    Ok((name, phone, email))
}

pub fn prompt_csv_path() -> Result<PathBuf> {
    let path = Text::new("Path to CSV file:").prompt()?;
    Ok(PathBuf::from(path))
}

/// Prompts for the name or phone fragment used by search, update and delete
pub fn prompt_term(action: &str) -> Result<String> {
    let prompt = format!("Name or phone number to {}:", action);
    Ok(Text::new(&prompt).prompt()?)
}

/// Prompts for the field to update, normalized to lowercase without surrounding spaces
pub fn prompt_update_field() -> Result<String> {
    let choice = Text::new("Update name or number?").prompt()?;
    Ok(choice.trim().to_lowercase())
}

pub fn prompt_new_value(field: &str) -> Result<String> {
    let prompt = match field {
        "number" => "New phone number:".to_string(),
        other => format!("New {}:", other),
    };
    Ok(Text::new(&prompt).prompt()?)
}

pub fn confirm_delete(count: usize) -> Result<bool> {
    let prompt = if count == 1 {
        "Delete this contact?".to_string()
    } else {
        format!("Delete these {} contacts?", count)
    };
    Ok(Confirm::new(&prompt).with_default(false).prompt()?)
}
