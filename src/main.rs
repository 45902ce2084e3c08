//! lapview - browse, filter and compare laptop listings

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lapview::cli::{Cli, Commands};
use lapview::config::Config;
use lapview::error::Result;

mod commands;
mod utils;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    colored::control::set_override(atty::is(atty::Stream::Stdout));

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.hint() {
            eprintln!("\n{}", hint);
        }
        std::process::exit(1);
    }
}

/// Log to stderr; `-v` wins over RUST_LOG
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("lapview=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        // Commands that never touch the catalog
        Commands::Config { init } => return commands::cmd_config(init),
        Commands::Completions { shell } => return commands::cmd_completions(shell),
        _ => {}
    }

    let config = Config::load()?;
    let source = commands::open_source(&config, cli.file.as_deref())?;

    match cli.command {
        Commands::List {
            filters,
            details,
            json,
        } => commands::cmd_list(source.as_ref(), &config, &filters, details, json),
        Commands::Options { json } => commands::cmd_options(source.as_ref(), json),
        Commands::Show { id, json } => commands::cmd_show(source.as_ref(), &id, json),
        Commands::Compare { ids, json } => commands::cmd_compare(source.as_ref(), &ids, json),
        Commands::Stats { json } => commands::cmd_stats(source.as_ref(), json),
        Commands::Config { .. } | Commands::Completions { .. } => Ok(()),
    }
}
