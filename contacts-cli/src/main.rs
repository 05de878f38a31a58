mod cli;
mod menu;
mod prompts;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};

use contacts_core::{
    determine_store_path, export, get_config_path, AddResult, Config, Contact, ContactBook,
    DeleteResult, ExportFormat, Listing, SearchResult, UpdateField, UpdateResult,
};

use crate::cli::{Cli, Command, ConfigCommand};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Determine which contacts file to use
    let store_path = determine_store_path(cli.file.as_deref())?;
    let book = ContactBook::open(&store_path)
        .with_warning_handler(|warning| println!("{} {}", "!".yellow(), warning));

    match &cli.command {
        None | Some(Command::Menu) => {
            menu::run(&book)?;
        }
        Some(Command::Add {
            name,
            phone,
            email,
            interactive,
        }) => {
            // Default to interactive mode if no specific arguments are provided
            let should_be_interactive =
                *interactive || (name.is_none() && phone.is_none() && email.is_none());

            if should_be_interactive {
                add_contact_interactive(&book)?;
            } else {
                add_contact(
                    &book,
                    name.as_deref().unwrap_or_default(),
                    phone.as_deref().unwrap_or_default(),
                    email.as_deref(),
                )?;
            }
        }
        Some(Command::Import { file }) => {
            import_contacts(&book, file)?;
        }
        Some(Command::List) => {
            view_contacts(&book)?;
        }
        Some(Command::Search { term }) => {
            search_contacts(&book, term)?;
        }
        Some(Command::Update { term, field, value }) => {
            update_contact(&book, term, field.as_deref(), value.as_deref())?;
        }
        Some(Command::Del { term, yes }) => {
            delete_contacts(&book, term, *yes)?;
        }
        Some(Command::Export { format, output }) => {
            export_contacts(&book, format, output.as_deref())?;
        }
        Some(Command::Config(config_cmd)) => {
            handle_config_command(config_cmd, &store_path)?;
        }
    }

    Ok(())
}

fn add_contact_interactive(book: &ContactBook) -> Result<()> {
    let (name, phone, email) = prompts::prompt_new_contact()?;
    add_contact(book, &name, &phone, Some(email.as_str()))
}

fn add_contact(book: &ContactBook, name: &str, phone: &str, email: Option<&str>) -> Result<()> {
    match book.add_one(name, phone, email)? {
        AddResult::Added(contact) => {
            println!("{}", "Contact saved successfully!".green());
            println!("  {}", contact);
        }
        AddResult::AlreadyExists(existing) => {
            println!(
                "{} A contact with phone number {} already exists: {}",
                "!".yellow(),
                phone,
                existing.name
            );
        }
    }

    Ok(())
}

fn import_contacts(book: &ContactBook, file: &Path) -> Result<()> {
    let count = book.import_file(file)?;
    println!(
        "{} Imported {} contact(s) from {}",
        "✓".green(),
        count,
        file.display()
    );

    Ok(())
}

fn print_contacts(contacts: &[Contact]) {
    println!("{:<30} | {:<20} | {:<30}", "Name", "Phone Number", "Email");
    println!("{}", "-".repeat(86));

    for contact in contacts {
        let email = match &contact.email {
            Some(email) => email.normal(),
            None => "-".dimmed(),
        };
        println!("{:<30} | {:<20} | {:<30}", contact.name, contact.phone, email);
    }
}

fn view_contacts(book: &ContactBook) -> Result<()> {
    match book.list()? {
        Listing::NoStore => println!("{}", "No contacts available.".yellow()),
        Listing::Contacts(contacts) if contacts.is_empty() => {
            println!("{}", "Contact book is empty.".yellow())
        }
        Listing::Contacts(contacts) => {
            print_contacts(&contacts);
            println!("\n{} contact(s)", contacts.len());
        }
    }

    Ok(())
}

fn search_contacts(book: &ContactBook, term: &str) -> Result<()> {
    match book.search(term)? {
        SearchResult::Found(contacts) => print_contacts(&contacts),
        SearchResult::NoMatches => println!("{}", "Contact not found.".yellow()),
    }

    Ok(())
}

fn update_contact(
    book: &ContactBook,
    term: &str,
    field: Option<&str>,
    value: Option<&str>,
) -> Result<()> {
    // Show which contact will be changed before asking for the new value
    let Some(target) = book.find_first(term)? else {
        println!("{}", "Contact not found.".yellow());
        return Ok(());
    };
    println!("{}", "Contact to update:".yellow());
    println!("  {}", target);

    let field = match field {
        Some(f) => f.to_string(),
        None => prompts::prompt_update_field()?,
    };
    // Reject a bad field before asking for a value
    let _: UpdateField = field.parse()?;

    let value = match value {
        Some(v) => v.to_string(),
        None => prompts::prompt_new_value(&field)?,
    };

    match book.update(term, &field, &value)? {
        UpdateResult::Updated { before, after } => {
            println!("{}", "Contact updated.".green());
            println!("  {} -> {}", before, after);
        }
        UpdateResult::NotFound => println!("{}", "Contact not found.".yellow()),
    }

    Ok(())
}

fn delete_contacts(book: &ContactBook, term: &str, skip_confirm: bool) -> Result<()> {
    let SearchResult::Found(matches) = book.search(term)? else {
        println!("{}", "Contact not found.".yellow());
        return Ok(());
    };

    println!("{}", "Contacts to delete:".yellow());
    for contact in &matches {
        println!("  {}", contact);
    }

    // Confirm deletion unless --yes flag is used
    if !skip_confirm && !prompts::confirm_delete(matches.len())? {
        println!("{}", "Deletion cancelled.".yellow());
        return Ok(());
    }

    match book.delete(term)? {
        DeleteResult::Deleted(count) => {
            println!("{} Deleted {} contact(s).", "✓".green(), count)
        }
        DeleteResult::NotFound => println!("{}", "Contact not found.".yellow()),
    }

    Ok(())
}

fn export_contacts(book: &ContactBook, format: &str, output: Option<&Path>) -> Result<()> {
    let format: ExportFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let output_path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(format.default_file_name()));

    let contacts = match book.list()? {
        Listing::Contacts(contacts) => contacts,
        Listing::NoStore => Vec::new(),
    };

    let count = export::export(&contacts, format, &output_path)?;
    println!("Exported to {}", output_path.display());
    println!("  Total contacts: {}", count);

    Ok(())
}

fn handle_config_command(cmd: &ConfigCommand, store_path: &Path) -> Result<()> {
    let config_path = get_config_path()?;

    match cmd {
        ConfigCommand::Show => {
            println!("Config file:   {}", config_path.display());
            println!("Contacts file: {}", store_path.display());
        }
        ConfigCommand::SetPath { path } => {
            // A broken config is replaced rather than blocking the repair
            let mut config = Config::load_or_default(&config_path);
            config.store_path = Some(path.clone());
            config.save(&config_path)?;

            println!(
                "{} Contacts file set to {}",
                "✓".green(),
                path.display()
            );
        }
    }

    Ok(())
}
