//! Miscellaneous commands: config, completions

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;

use lapview::cli::{Cli, CompletionShell};
use lapview::config::Config;
use lapview::error::{LapviewError, Result};

/// Show the configuration, or write the default one with `--init`
pub fn cmd_config(init: bool) -> Result<()> {
    let path = Config::config_path()?;

    if init {
        if path.exists() {
            println!("Config already exists at {}", path.display());
            return Ok(());
        }
        Config::default().save()?;
        println!("{} Wrote default config to {}", "✓".green(), path.display());
        return Ok(());
    }

    let config = Config::load()?;
    let content = toml::to_string_pretty(&config)
        .map_err(|e| LapviewError::ConfigError(e.to_string()))?;

    println!("\n{}: {}", "Config file".bold(), path.display());
    if !path.exists() {
        println!("  (not created yet, showing defaults; run `lapview config --init`)");
    }
    println!("{}: {}\n", "Effective API URL".bold(), config.api_url());
    println!("{}", content);
    Ok(())
}

pub fn cmd_completions(shell: CompletionShell) -> Result<()> {
    let mut cmd = Cli::command();
    let shell = match shell {
        CompletionShell::Bash => Shell::Bash,
        CompletionShell::Zsh => Shell::Zsh,
        CompletionShell::Fish => Shell::Fish,
        CompletionShell::Powershell => Shell::PowerShell,
    };
    generate(shell, &mut cmd, "lapview", &mut io::stdout());
    Ok(())
}
