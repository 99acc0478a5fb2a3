mod logging;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use zcalc::calculator::copy_to_clipboard;
use zcalc::{CalculatorSession, Config};

#[derive(Parser, Debug)]
#[command(name = "zcalc", version, about = "A keypad calculator for the terminal")]
struct Cli {
    /// Keys to press, then print the display and exit
    #[arg(short, long)]
    keys: Option<String>,

    /// Print the session state as JSON
    #[arg(long)]
    json: bool,

    /// Copy the final display text to the clipboard
    #[arg(long)]
    copy: bool,

    /// Show results with thousand separators
    #[arg(long)]
    group: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.group {
        config.display.group_digits = true;
    }

    let mut session = CalculatorSession::new(&config);
    let mut stdout = io::stdout().lock();

    match &cli.keys {
        Some(keys) => {
            session.type_keys(keys);
            print_session(&mut stdout, &session, cli.json)?;
        }
        None => run_interactive(&mut stdout, &mut session, cli.json)?,
    }

    if cli.copy {
        copy_display(session.display_text())?;
    }

    Ok(())
}

/// Read keystrokes line by line. The line break is pressed as a key too.
fn run_interactive(
    out: &mut impl Write,
    session: &mut CalculatorSession,
    json: bool,
) -> Result<()> {
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        if line.trim() == "q" {
            break;
        }

        session.type_keys(&line);
        session.press('\n');
        print_session(out, session, json)?;
    }

    Ok(())
}

/// Copy the display text, skipping an empty display. Returns whether
/// anything was copied.
fn copy_display(text: &str) -> Result<bool> {
    if text.is_empty() {
        warn!("display is empty, nothing copied");
        return Ok(false);
    }
    copy_to_clipboard(text)?;
    Ok(true)
}

fn print_session(out: &mut impl Write, session: &CalculatorSession, json: bool) -> Result<()> {
    if json {
        let snapshot = serde_json::to_string(&session.snapshot())?;
        writeln!(out, "{snapshot}")?;
    } else {
        writeln!(out, "{}", session.rendered_text())?;
    }
    out.flush()?;
    Ok(())
}
