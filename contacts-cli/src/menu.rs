//! Interactive menu loop
//!
//! Every action runs to completion or fails on its own: errors are printed
//! and the menu is shown again.

use anyhow::Result;
use colored::Colorize;
use inquire::InquireError;

use contacts_core::ContactBook;

use crate::prompts::{self, AddChoice, MainChoice};

/// Runs the main menu until the user exits
pub fn run(book: &ContactBook) -> Result<()> {
    println!("Contacts file: {}", book.storage().path().display());

    loop {
        let choice = match prompts::prompt_main_menu() {
            Ok(choice) => choice,
            Err(e) if is_cancelled(&e) => MainChoice::Exit,
            Err(e) => return Err(e),
        };

        let outcome = match choice {
            MainChoice::Add => add_menu(book),
            MainChoice::View => crate::view_contacts(book),
            MainChoice::Search => {
                prompts::prompt_term("search").and_then(|term| crate::search_contacts(book, &term))
            }
            MainChoice::Update => prompts::prompt_term("update")
                .and_then(|term| crate::update_contact(book, &term, None, None)),
            MainChoice::Delete => prompts::prompt_term("delete")
                .and_then(|term| crate::delete_contacts(book, &term, false)),
            MainChoice::Exit => {
                println!("Goodbye!");
                return Ok(());
            }
        };

        report(outcome);
    }
}

fn add_menu(book: &ContactBook) -> Result<()> {
    loop {
        let choice = match prompts::prompt_add_menu() {
            Ok(choice) => choice,
            Err(e) if is_cancelled(&e) => AddChoice::Back,
            Err(e) => return Err(e),
        };

        let outcome = match choice {
            AddChoice::Manual => crate::add_contact_interactive(book),
            AddChoice::Import => {
                prompts::prompt_csv_path().and_then(|path| crate::import_contacts(book, &path))
            }
            AddChoice::Back => return Ok(()),
        };

        report(outcome);
    }
}

fn report(outcome: Result<()>) {
    match outcome {
        Ok(()) => {}
        Err(e) if is_cancelled(&e) => println!("{}", "Cancelled.".yellow()),
        Err(e) => println!("{} {:#}", "Error:".red(), e),
    }
}

fn is_cancelled(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<InquireError>(),
        Some(InquireError::OperationCanceled) | Some(InquireError::OperationInterrupted)
    )
}
