use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about = "A simple contact book")]
pub struct Cli {
    /// Path to the contacts file (defaults to CONTACTS_FILE, the config file, or Contacts.json)
    #[clap(long, global = true)]
    pub file: Option<PathBuf>,

    /// Without a subcommand the interactive menu is started
    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the config file location and the resolved contacts file
    Show,

    /// Store the contacts file location in the config file
    SetPath {
        /// Path to the contacts file
        path: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the interactive menu
    Menu,

    /// Add a new contact
    Add {
        /// Name of the contact
        #[clap(long)]
        name: Option<String>,

        /// Phone number of the contact
        #[clap(long)]
        phone: Option<String>,

        /// Email address of the contact
        #[clap(long)]
        email: Option<String>,

        /// Use interactive mode (prompts)
        #[clap(long)]
        interactive: bool,
    },

    /// Import contacts from a CSV file (columns: Name, Phone Number, Email)
    Import {
        /// Path to the CSV file
        file: PathBuf,
    },

    /// List all contacts
    List,

    /// Search contacts by name or phone number
    Search {
        /// Text contained in the name or phone number
        term: String,
    },

    /// Update the first contact matching a term
    Update {
        /// Text contained in the name or phone number
        term: String,

        /// Field to change (name, number)
        #[clap(long)]
        field: Option<String>,

        /// New value for the field
        #[clap(long)]
        value: Option<String>,
    },

    /// Delete every contact matching a term
    Del {
        /// Text contained in the name or phone number
        term: String,

        /// Skip confirmation prompt
        #[clap(long, short = 'y')]
        yes: bool,
    },

    /// Export contacts to different formats
    Export {
        /// Output format (csv, json)
        #[clap(long, short = 'f', default_value = "csv")]
        format: String,

        /// Output file path
        #[clap(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Configuration commands
    #[clap(subcommand)]
    Config(ConfigCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_starts_menu() {
        let cli = Cli::try_parse_from(["contacts"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.file.is_none());
    }

    #[test]
    fn test_update_arguments() {
        let cli = Cli::try_parse_from([
            "contacts", "update", "Ada", "--field", "name", "--value", "Ada L.", "--file", "c.json",
        ])
        .unwrap();

        assert_eq!(cli.file, Some(PathBuf::from("c.json")));
        match cli.command {
            Some(Command::Update { term, field, value }) => {
                assert_eq!(term, "Ada");
                assert_eq!(field.as_deref(), Some("name"));
                assert_eq!(value.as_deref(), Some("Ada L."));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_export_defaults_to_csv() {
        let cli = Cli::try_parse_from(["contacts", "export"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Export { ref format, output: None }) if format == "csv"
        ));
    }
}
