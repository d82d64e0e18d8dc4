mod applet;
mod config;
mod daemon;
mod domain;
mod index;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};

use applet::state::AppletState;
use config::Settings;
use index::notmuch::NotmuchIndex;
use index::sync::SyncTool;

#[derive(Parser)]
#[command(name = "rs_mail_applet")]
#[command(about = "notmuch panel applet: unread poller + mail summary", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the interactive applet (count label + dropdown summary)
    Applet {
        /// Poll interval in seconds (overrides the config file)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Run headless: poll on the interval, log counts, notify on new unread mail
    Daemon {
        /// Poll interval in seconds (overrides the config file)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// One poll tick; print the icon name and label, then exit
    Status,

    /// Force refresh: run the sync tool, ingest new mail, then poll once
    Sync,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Applet { interval } => {
            let settings = load_settings(interval)?;
            let index = NotmuchIndex::new(settings.notmuch_program.clone());
            let sync = SyncTool::from_command(&settings.sync_command)?;
            applet::run_applet(&index, &sync, &settings)
        }

        Command::Daemon { interval } => {
            let settings = load_settings(interval)?;
            let index = NotmuchIndex::new(settings.notmuch_program.clone());
            daemon::run_daemon(&index, &settings)
        }

        Command::Status => {
            let settings = load_settings(None)?;
            let index = NotmuchIndex::new(settings.notmuch_program.clone());
            let mut state = AppletState::new(settings.max_summary_items);
            state.poll(&index);
            print_state(&state);
            Ok(())
        }

        Command::Sync => {
            let settings = load_settings(None)?;
            let index = NotmuchIndex::new(settings.notmuch_program.clone());
            let sync = SyncTool::from_command(&settings.sync_command)?;
            let mut state = AppletState::new(settings.max_summary_items);
            state.force_refresh(&index, &sync);
            print_state(&state);
            Ok(())
        }
    }
}

fn load_settings(interval_override: Option<u64>) -> Result<Settings> {
    let mut settings = config::load_settings().map_err(|e| anyhow!("Configuration error: {e}"))?;
    if let Some(secs) = interval_override {
        settings.update_interval_secs = secs;
    }
    Ok(settings)
}

/// Icon name and label, the way a panel would show them (label hidden at zero).
fn print_state(state: &AppletState) {
    match state.label() {
        Some(label) => println!("{} {}", state.icon(), label),
        None => println!("{}", state.icon()),
    }
}
