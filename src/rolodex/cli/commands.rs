//! # CLI Layer
//!
//! This module is **one possible UI client** for rolodex. It is the only place
//! in the codebase that:
//! - Knows about terminal I/O (stdout, stdin, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: main dispatch (called by `main.rs`)
//! - `init_context()`: builds the API over the resolved data file
//! - `handle_*()`: per-command handlers that call the API and print the result
//!
//! One-shot subcommands return errors (exit code 1). The interactive shell
//! prints them and keeps going.

use super::print::{
    print_contact_details, print_contact_list, print_messages, print_stats,
};
use super::setup::{init_tracing, Cli, Commands};
use super::shell::Shell;
use clap::Parser;
use directories::ProjectDirs;
use rolodex::api::{CmdMessage, MessageLevel, RolodexApi};
use rolodex::config::RolodexConfig;
use rolodex::error::{RolodexError, Result};
use rolodex::model::{ContactUpdate, NewContact};
use rolodex::store::fs::FileStore;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

struct AppContext {
    api: RolodexApi<FileStore>,
    config: RolodexConfig,
    /// Startup problems the user should hear about, e.g. an ignored config file.
    notices: Vec<CmdMessage>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add {
            name,
            phone,
            email,
            address,
            group,
            force,
        }) => {
            let new = NewContact {
                name,
                phone,
                email,
                address,
                group,
            };
            handle_add(&mut ctx, new, force)
        }
        Some(Commands::Search { query }) => handle_search(&mut ctx, &query),
        Some(Commands::Update {
            name,
            phone,
            email,
            address,
            group,
        }) => {
            let update = ContactUpdate {
                phone,
                email,
                address,
                group,
            };
            handle_update(&mut ctx, &name, update)
        }
        Some(Commands::Delete { name, yes }) => handle_delete(&mut ctx, &name, yes),
        Some(Commands::List) => handle_list(&mut ctx),
        Some(Commands::Export { file }) => handle_export(&mut ctx, file),
        Some(Commands::Stats) => handle_stats(&mut ctx),
        Some(Commands::Shell) | None => handle_shell(&mut ctx),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut notices = Vec::new();
    let config = RolodexConfig::load(&cwd).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring config file, using defaults");
        notices.push(config_notice(&e));
        RolodexConfig::default()
    });

    let data_path = resolve_data_path(cli, &config, &cwd)?;
    tracing::debug!(path = %data_path.display(), "using contact file");

    let api = RolodexApi::open(FileStore::new(data_path)).with_recent_days(config.recent_days);
    Ok(AppContext {
        api,
        config,
        notices,
    })
}

fn config_notice(err: &RolodexError) -> CmdMessage {
    CmdMessage::warning(format!("Ignoring config file, using defaults: {}", err))
}

fn resolve_data_path(cli: &Cli, config: &RolodexConfig, cwd: &Path) -> Result<PathBuf> {
    if let Some(file) = &cli.file {
        return Ok(file.clone());
    }
    if cli.global {
        let dirs = ProjectDirs::from("com", "rolodex", "rolodex").ok_or_else(|| {
            RolodexError::Config("could not determine the user data directory".into())
        })?;
        return Ok(config.data_path(dirs.data_dir()));
    }
    Ok(config.data_path(cwd))
}

fn handle_add(ctx: &mut AppContext, new: NewContact, force: bool) -> Result<()> {
    print_load_messages(ctx)?;
    let result = ctx.api.add_contact(new, force)?;
    print_messages(&mut io::stdout(), &result.messages)?;
    Ok(())
}

fn handle_search(ctx: &mut AppContext, query: &str) -> Result<()> {
    print_load_messages(ctx)?;
    let result = ctx.api.search(query)?;
    let mut out = io::stdout();
    print_messages(&mut out, &result.messages)?;
    print_contact_details(&mut out, &result.contacts)?;
    Ok(())
}

fn handle_update(ctx: &mut AppContext, name: &str, update: ContactUpdate) -> Result<()> {
    print_load_messages(ctx)?;
    let result = ctx.api.update_contact(name, update)?;
    print_messages(&mut io::stdout(), &result.messages)?;
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, name: &str, yes: bool) -> Result<()> {
    print_load_messages(ctx)?;
    if !ctx.api.contacts().contains(name) {
        return Err(RolodexError::NotFound(name.trim().to_string()));
    }

    if !yes {
        print!("Are you sure you want to delete '{}'? (y/n): ", name.trim());
        io::stdout().flush().map_err(RolodexError::Io)?;

        let mut input = String::new();
        io::stdin()
            .lock()
            .read_line(&mut input)
            .map_err(RolodexError::Io)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    let result = ctx.api.delete_contact(name)?;
    print_messages(&mut io::stdout(), &result.messages)?;
    Ok(())
}

fn handle_list(ctx: &mut AppContext) -> Result<()> {
    print_load_messages(ctx)?;
    let result = ctx.api.list()?;
    let mut out = io::stdout();
    print_messages(&mut out, &result.messages)?;
    print_contact_list(&mut out, &result.contacts)?;
    Ok(())
}

fn handle_export(ctx: &mut AppContext, file: Option<String>) -> Result<()> {
    print_load_messages(ctx)?;
    let target = file.unwrap_or_else(|| ctx.config.export_file.clone());
    let result = ctx.api.export_csv(Some(&target))?;
    print_messages(&mut io::stdout(), &result.messages)?;
    Ok(())
}

fn handle_stats(ctx: &mut AppContext) -> Result<()> {
    print_load_messages(ctx)?;
    let result = ctx.api.stats()?;
    if let Some(stats) = &result.stats {
        print_stats(&mut io::stdout(), stats)?;
    }
    Ok(())
}

fn handle_shell(ctx: &mut AppContext) -> Result<()> {
    print_messages(&mut io::stderr(), &ctx.notices)?;
    let stdin = io::stdin();
    let shell = Shell::new(
        &mut ctx.api,
        stdin.lock(),
        io::stdout(),
        ctx.config.export_file.clone(),
    );
    shell.run()
}

/// One-shot commands only mention the load outcome when something went wrong.
fn print_load_messages(ctx: &AppContext) -> Result<()> {
    let warnings: Vec<_> = ctx
        .notices
        .iter()
        .cloned()
        .chain(ctx.api.load_messages())
        .filter(|m| m.level != MessageLevel::Info)
        .collect();
    print_messages(&mut io::stderr(), &warnings)?;
    Ok(())
}
