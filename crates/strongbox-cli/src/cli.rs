use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use strongbox_core::VERSION;

use crate::constants::VAULT_PATH_ENV;

/// Strongbox - a local, encrypted vault for your credentials
#[derive(Parser)]
#[command(name = "strongbox")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the vault directory
    #[arg(long, global = true, env = VAULT_PATH_ENV, value_name = "DIR")]
    pub vault: Option<String>,

    /// Read the master passphrase from the first line of stdin
    #[arg(long, global = true)]
    pub passphrase_stdin: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII instead of unicode symbols
    #[arg(long, global = true)]
    pub ascii: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Directory where the vault will be created
    #[arg(value_name = "DIR")]
    pub path: Option<String>,

    /// Do not write a config file pointing at the new vault
    #[arg(long)]
    pub no_config: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Service or website name
    #[arg(value_name = "SERVICE")]
    pub service: String,

    /// Account username
    #[arg(value_name = "USERNAME")]
    pub username: String,

    /// Free-text notes (stored unencrypted)
    #[arg(long)]
    pub notes: Option<String>,

    /// Read the secret from the next line of stdin instead of prompting
    #[arg(long)]
    pub secret_stdin: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Entry ID (full UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// New service name
    #[arg(long)]
    pub service: Option<String>,

    /// New username
    #[arg(long)]
    pub username: Option<String>,

    /// New notes (use "" to clear)
    #[arg(long)]
    pub notes: Option<String>,

    /// Replace the secret (prompted, or read from stdin with --secret-stdin)
    #[arg(long)]
    pub secret: bool,

    /// Read the new secret from the next line of stdin
    #[arg(long, requires = "secret")]
    pub secret_stdin: bool,
}

/// Arguments for the `rm` command
#[derive(Args)]
pub struct RmArgs {
    /// Entry ID (full UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `search` command
#[derive(Args)]
pub struct SearchArgs {
    /// Search query (matches service, username and notes)
    #[arg(value_name = "QUERY", default_value = "")]
    pub query: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Entry ID (full UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `reveal` command
#[derive(Args)]
pub struct RevealArgs {
    /// Entry ID (full UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the `reset` command
#[derive(Args)]
pub struct ResetArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `status` command
#[derive(Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new vault and set its master passphrase
    Init(InitArgs),

    /// Add a credential
    Add(AddArgs),

    /// Change fields of a credential
    Edit(EditArgs),

    /// Delete a credential
    Rm(RmArgs),

    /// List credentials (secrets stay hidden)
    List(ListArgs),

    /// Search credentials by service, username or notes
    Search(SearchArgs),

    /// Show a credential's details (secret stays hidden)
    Show(ShowArgs),

    /// Print a credential's secret
    Reveal(RevealArgs),

    /// Permanently delete the vault and every credential in it
    Reset(ResetArgs),

    /// Show vault location and initialization state
    Status(StatusArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::try_parse_from(["strongbox", "-vv", "status"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_edit_secret_stdin_requires_secret() {
        assert!(Cli::try_parse_from(["strongbox", "edit", "abc", "--secret-stdin"]).is_err());
        assert!(
            Cli::try_parse_from(["strongbox", "edit", "abc", "--secret", "--secret-stdin"]).is_ok()
        );
    }

    #[test]
    fn test_search_query_defaults_to_empty() {
        let cli = Cli::try_parse_from(["strongbox", "search"]).unwrap();
        match cli.command {
            Some(Commands::Search(args)) => assert_eq!(args.query, ""),
            _ => panic!("expected search"),
        }
    }
}
