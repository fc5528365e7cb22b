//! # CLI Layer
//!
//! This module is **one possible client** of the gallery. It is the only place
//! that knows about the terminal:
//! - Parses arguments with clap
//! - Installs the tracing subscriber (stderr)
//! - Calls the matching [`CursedApi`] method
//! - Renders `CmdResult`s as styled text or JSON
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` from global flags
//! - `handle_*()`: Per-command handlers that call the API and print

use super::render::{
    print_messages, render_catalog, render_comparisons, render_config, render_json,
    render_result,
};
use super::setup::{
    print_grouped_help, print_help_for_command, print_subcommand_help, Cli, Commands,
    GalleryCommands, MiscCommands, TryCommands,
};
use clap::Parser;
use cursed::api::{CmdResult, ConfigAction, CursedApi};
use cursed::bench::Comparison;
use cursed::commands::chaos_sort::format_progress;
use cursed::error::Result;
use cursed::init::initialize;
use std::cell::Cell;
use std::io::{IsTerminal, Write};
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: CursedApi,
    json: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.help {
        if cli.command.is_none() {
            print_grouped_help();
        } else {
            print_subcommand_help(&cli.command);
        }
        return Ok(());
    }

    init_tracing(cli.verbose);

    if let Some(Commands::Misc(MiscCommands::Help { command })) = &cli.command {
        return handle_help(command.as_deref());
    }

    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Gallery(cmd)) => match cmd {
            GalleryCommands::List => handle_list(&ctx),
            GalleryCommands::Run { demos } => handle_run(&ctx, Some(demos)),
            GalleryCommands::All => handle_run(&ctx, None),
        },
        Some(Commands::Try(cmd)) => match cmd {
            TryCommands::Calc { x, op, y } => {
                let result = ctx.api.calculate(&x, &op, &y)?;
                emit(&ctx, &result)
            }
            TryCommands::Json { text } => emit(&ctx, &ctx.api.parse_json(&text)),
            TryCommands::Age { text } => emit(&ctx, &ctx.api.check_age(&text)),
            TryCommands::Api { bodies } => emit(&ctx, &ctx.api.api_requests(&bodies)),
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Config { key, value } => handle_config(&ctx, key, value),
            MiscCommands::Help { command } => handle_help(command.as_deref()),
        },
        None => handle_list(&ctx),
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` picks debug for this crate.
fn init_tracing(verbose: bool) {
    let default = if verbose { "cursed=debug" } else { "cursed=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let api = initialize(cli.work_dir.clone())?;
    Ok(AppContext {
        api,
        json: cli.json,
    })
}

fn emit(ctx: &AppContext, result: &CmdResult) -> Result<()> {
    if ctx.json {
        println!("{}", render_json(result)?);
        return Ok(());
    }
    print!("{}", render_result(result));
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_demos();
    if ctx.json {
        println!("{}", render_json(&result.listed_demos)?);
        return Ok(());
    }
    print!("{}", render_catalog(&result.listed_demos));
    println!();
    print_messages(&result.messages);
    Ok(())
}

/// Runs the named demos, or all of them when `demos` is `None`.
fn handle_run(ctx: &AppContext, demos: Option<Vec<String>>) -> Result<()> {
    // the progress bar redraws in place, so only on a terminal
    let drawn = Cell::new(false);
    let draw = |p: f64| {
        drawn.set(true);
        let mut stderr = std::io::stderr();
        let _ = write!(stderr, "\rProgress: {}", format_progress(p));
        let _ = stderr.flush();
    };
    let progress: Option<&dyn Fn(f64)> =
        if !ctx.json && std::io::stderr().is_terminal() {
            Some(&draw)
        } else {
            None
        };

    let results = match &demos {
        Some(names) => ctx.api.run_demos(names, progress)?,
        None => ctx.api.run_all(progress)?,
    };
    if drawn.get() {
        eprintln!();
    }

    if ctx.json {
        println!("{}", render_json(&results)?);
        return Ok(());
    }

    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", render_result(result));
        print_messages(&result.messages);
    }

    if results.len() > 1 {
        let totals: Vec<Comparison> = results
            .iter()
            .flat_map(|r| r.comparisons.iter().cloned())
            .collect();
        if !totals.is_empty() {
            println!();
            println!("Summary of {} demos:", results.len());
            print!("{}", render_comparisons(&totals));
        }
    }
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ctx.api.config(action)?;
    if ctx.json {
        println!("{}", render_json(&result)?);
        return Ok(());
    }
    if let Some(config) = &result.config {
        if result.messages.is_empty() {
            print!("{}", render_config(config));
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_help(command: Option<&str>) -> Result<()> {
    match command {
        Some(name) => print_help_for_command(name),
        None => print_grouped_help(),
    }
    Ok(())
}
