//! Kero shell
//!
//! Headless front end: reads commands from stdin and drives a [`Browser`]
//! backed by a simulated engine and a terminal viewport.

mod commands;
mod engine;
mod viewport;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use kero_core::{Browser, Config, ReloadStop};

use commands::Command;
use engine::HeadlessEngine;
use viewport::TerminalViewport;

/// Build the configuration, honouring `KERO_DATA_DIR` and `KERO_HOME_URL`
fn load_config() -> anyhow::Result<Config> {
    let data_dir = std::env::var_os("KERO_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(Config::data_dir);

    let mut config = Config::new(data_dir);
    if let Ok(home_url) = std::env::var("KERO_HOME_URL") {
        config = config
            .with_home_url(&home_url)
            .context("Invalid KERO_HOME_URL")?;
    }

    Ok(config)
}

pub async fn run() -> anyhow::Result<()> {
    // Initialize logging
    kero_core::init_logging();

    tracing::info!("Starting Kero");

    let config = load_config()?;
    tracing::info!(database = %config.database_path.display(), "Using profile");

    let mut browser = Browser::new(
        config,
        Arc::new(HeadlessEngine::new()),
        Box::new(TerminalViewport::new()),
    )
    .context("Failed to open browser profile")?;

    browser.start();
    print_tabs(&browser);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read input")? {
                    Some(line) => {
                        if !execute(&mut browser, &line) {
                            break;
                        }
                    }
                    // EOF behaves like quit
                    None => break,
                }
            }
            Some(event) = browser.next_event() => {
                browser.dispatch(event);
            }
        }
    }

    browser.on_background();
    browser.shutdown().await;

    Ok(())
}

/// Run one input line. Returns `false` when the shell should exit.
fn execute(browser: &mut Browser, line: &str) -> bool {
    let Some(command) = commands::parse(line) else {
        if !line.trim().is_empty() {
            println!("Unrecognized input, try `help`");
        }
        return true;
    };

    match command {
        Command::Open { url: None, .. } => {
            browser.new_tab();
        }
        Command::Open {
            url: Some(url),
            activate,
        } => {
            browser.open_tab(&url, activate);
        }
        Command::Go(input) => {
            if browser.navigate(&input).is_none() {
                println!("Nothing to load");
            }
        }
        Command::Switch(index) => {
            if browser.registry().get(index).is_some() {
                browser.switch_tab(index);
            } else {
                println!("No tab {}", index + 1);
            }
        }
        Command::Close(index) => {
            match index.or_else(|| browser.registry().active_index()) {
                Some(index) if browser.registry().get(index).is_some() => browser.close_tab(index),
                Some(index) => println!("No tab {}", index + 1),
                None => {}
            }
        }
        Command::Reload => match browser.toggle_reload_stop() {
            Some(ReloadStop::Stopped) => println!("Stopped"),
            Some(ReloadStop::Reloaded) => println!("Reloading"),
            None => {}
        },
        Command::Back => browser.go_back(),
        Command::Forward => browser.go_forward(),
        Command::Tabs => print_tabs(browser),
        Command::History => match browser.recent_history() {
            Ok(entries) if entries.is_empty() => println!("No history"),
            Ok(entries) => {
                for entry in entries {
                    let title = if entry.title.is_empty() {
                        &entry.url
                    } else {
                        &entry.title
                    };
                    println!(
                        "{}  {}  {}",
                        entry.visited_at.format("%Y-%m-%d %H:%M"),
                        title,
                        entry.url
                    );
                }
            }
            Err(e) => tracing::warn!(error = %e, "Failed to read history"),
        },
        Command::ClearHistory => match browser.clear_history() {
            Ok(()) => println!("History cleared"),
            Err(e) => tracing::warn!(error = %e, "Failed to clear history"),
        },
        Command::Save => {
            if browser.save_snapshot() {
                println!("Tabs saved");
            }
        }
        Command::Help => println!("{}", commands::HELP),
        Command::Quit => return false,
    }

    true
}

fn print_tabs(browser: &Browser) {
    for tab in browser.tab_summaries() {
        let marker = if tab.is_active { '*' } else { ' ' };
        let loading = if tab.is_loading { " (loading)" } else { "" };
        println!("{marker}{:>3}. {}{loading}", tab.index + 1, tab.label);
    }
}
