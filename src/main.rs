//! Nib - a minimal terminal text editor with syntax highlighting.
//!
//! # Usage
//!
//! ```bash
//! nib src/main.rs
//! nib --theme light notes.py
//! nib --no-highlight README.md
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use nib::app::App;
use nib::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use nib::highlight::{HighlightBackground, set_background_mode};
use nib::perf;

/// A minimal terminal text editor with syntax highlighting
#[derive(Parser, Debug)]
#[command(name = "nib", version, about, long_about = None)]
struct Cli {
    /// File to open (a new buffer is started when absent or unreadable)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Disable syntax highlighting
    #[arg(long)]
    no_highlight: bool,

    /// Force color scheme background (light or dark)
    #[arg(long, value_enum, default_value = "auto")]
    theme: ThemeMode,

    /// Enable startup performance logging
    #[arg(long)]
    perf: bool,

    /// Save current command-line flags as defaults in the config file
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    perf::set_enabled(effective.perf);

    match effective.theme.unwrap_or(ThemeMode::Auto) {
        // Auto falls back to the COLORFGBG sniff inside the highlighter.
        ThemeMode::Auto => set_background_mode(None),
        ThemeMode::Light => set_background_mode(Some(HighlightBackground::Light)),
        ThemeMode::Dark => set_background_mode(Some(HighlightBackground::Dark)),
    }

    tracing::info!("application started");

    // Run the application
    let mut app = App::new(cli.file).with_highlight(!effective.no_highlight);
    let result = app.run().context("Application error");

    tracing::info!("application exited");
    result
}
