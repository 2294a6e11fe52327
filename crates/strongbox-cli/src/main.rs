//! Strongbox CLI - a local, encrypted vault for credentials
//!
//! Each invocation opens the vault, unlocks it with the master passphrase,
//! performs one command, and locks it again.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::Parser;
use strongbox_core::{VaultError, VERSION};
use tracing_subscriber::EnvFilter;

use app::AppContext;
use cli::{Cli, Commands};
use commands::{entries, init, maintenance, misc};
use errors::CliError;
use ui::{blank_line, header, hint, print, print_error, OutputMode};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui_context(false, None);
        match classify(&e) {
            Some(cli_error) => {
                print_error(&ui_ctx, &cli_error.to_string(), cli_error.hint());
                std::process::exit(cli_error.exit_code());
            }
            None => {
                print_error(&ui_ctx, &format!("{:#}", e), None);
                std::process::exit(1);
            }
        }
    }
}

/// Logs go to stderr so stdout stays clean for `reveal` and `--json`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "strongbox_core={level},strongbox_cli={level},warn",
            level = level
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Find the structured error behind an `anyhow` chain, if any.
fn classify(err: &anyhow::Error) -> Option<CliError> {
    if let Some(cli_error) = err.downcast_ref::<CliError>() {
        return Some(cli_error.clone());
    }
    err.chain()
        .find_map(|cause| cause.downcast_ref::<VaultError>())
        .and_then(CliError::from_vault)
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => {
            init::handle_init(ctx, args)?;
        }
        Some(Commands::Add(args)) => {
            entries::handle_add(ctx, args)?;
        }
        Some(Commands::Edit(args)) => {
            entries::handle_edit(ctx, args)?;
        }
        Some(Commands::Rm(args)) => {
            entries::handle_rm(ctx, args)?;
        }
        Some(Commands::List(args)) => {
            entries::handle_list(ctx, args)?;
        }
        Some(Commands::Search(args)) => {
            entries::handle_search(ctx, args)?;
        }
        Some(Commands::Show(args)) => {
            entries::handle_show(ctx, args)?;
        }
        Some(Commands::Reveal(args)) => {
            entries::handle_reveal(ctx, args)?;
        }
        Some(Commands::Reset(args)) => {
            maintenance::handle_reset(ctx, args)?;
        }
        Some(Commands::Status(args)) => {
            maintenance::handle_status(ctx, args)?;
        }
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args.shell)?;
        }
        None => print_quickstart(ctx),
    }
    Ok(())
}

fn print_quickstart(ctx: &AppContext) {
    let ui_ctx = ctx.ui_context(false, None);
    match ui_ctx.mode {
        OutputMode::Pretty => {
            print(&ui_ctx, &header(&ui_ctx, VERSION, None));
            blank_line(&ui_ctx);
            print(&ui_ctx, "  strongbox init                      Create a vault");
            print(&ui_ctx, "  strongbox add <service> <username>  Store a credential");
            print(&ui_ctx, "  strongbox list                      List credentials");
            print(&ui_ctx, "  strongbox reveal <id>               Print a secret");
            blank_line(&ui_ctx);
            print(&ui_ctx, &hint(&ui_ctx, "strongbox --help"));
        }
        OutputMode::Plain | OutputMode::Json => {
            println!("strongbox {}", VERSION);
            println!("Run `strongbox --help` for usage.");
        }
    }
}
