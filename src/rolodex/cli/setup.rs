use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Returns the version string, with the git hash appended for non-release builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("ROLODEX_GIT_HASH");
    const IS_RELEASE: &str = env!("ROLODEX_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "rolodex", bin_name = "rolodex", version = get_version())]
#[command(about = "Personal contact directory", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Contact data file (overrides rolodex.json)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Use the per-user data directory instead of the working directory
    #[arg(long, global = true)]
    pub global: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new contact
    #[command(alias = "a")]
    Add {
        /// Contact name
        name: String,

        /// Phone number (10-15 digits, punctuation is ignored)
        phone: String,

        /// Email address
        #[arg(short, long)]
        email: Option<String>,

        /// Postal address
        #[arg(short, long)]
        address: Option<String>,

        /// Group label (defaults to "Other")
        #[arg(short, long)]
        group: Option<String>,

        /// Replace the contact if the name already exists
        #[arg(long)]
        force: bool,
    },

    /// Search contacts by name
    #[command(alias = "s")]
    Search {
        /// Part of a name, case-insensitive
        query: String,
    },

    /// Update fields of an existing contact
    #[command(alias = "u")]
    Update {
        /// Contact name
        name: String,

        #[arg(short, long)]
        phone: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        address: Option<String>,

        #[arg(short, long)]
        group: Option<String>,
    },

    /// Delete a contact
    #[command(alias = "rm")]
    Delete {
        /// Contact name
        name: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List all contacts
    #[command(alias = "ls")]
    List,

    /// Export all contacts to CSV
    Export {
        /// Output file (".csv" is appended if missing)
        #[arg(id = "output", value_name = "FILE")]
        file: Option<String>,
    },

    /// Show contact statistics
    Stats,

    /// Start the interactive menu (the default)
    Shell,
}

/// Logs go to stderr. `RUST_LOG` wins; otherwise warnings only, or debug with `--verbose`.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "rolodex=debug" } else { "warn" })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_options() {
        let cli = Cli::try_parse_from([
            "rolodex", "add", "Alice", "555-123-4567", "-e", "a@b.com", "-g", "Work",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add {
                name,
                phone,
                email,
                group,
                address,
                force,
            }) => {
                assert_eq!(name, "Alice");
                assert_eq!(phone, "555-123-4567");
                assert_eq!(email.as_deref(), Some("a@b.com"));
                assert_eq!(group.as_deref(), Some("Work"));
                assert_eq!(address, None);
                assert!(!force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from(["rolodex", "list", "--file", "book.json", "-v"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("book.json")));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["rolodex"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn add_requires_phone() {
        assert!(Cli::try_parse_from(["rolodex", "add", "Alice"]).is_err());
    }
}
