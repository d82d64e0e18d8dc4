pub mod notifier;

use std::{
    sync::Arc,
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::Duration,
};

use anyhow::Result;
use log::info;

use crate::applet::state::AppletState;
use crate::applet::timer::PollTimer;
use crate::config::Settings;
use crate::index::MailIndex;

use notifier::Notifier;

/// Upper bound on each sleep so ctrl-c is honored promptly.
const SLICE: Duration = Duration::from_millis(500);

/// Headless mode: the same poll cycle as the applet, with log lines for the
/// label and a desktop notification when unread mail appears.
pub fn run_daemon(index: &dyn MailIndex, settings: &Settings) -> Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    let r2 = running.clone();
    ctrlc::set_handler(move || {
        r2.store(false, Ordering::SeqCst);
    })?;

    let notifier = Notifier::new();
    let mut state = AppletState::new(settings.max_summary_items);
    let mut timer = PollTimer::new(settings.interval());

    // first tick right away; after that the timer sets the cadence
    state.poll(index);
    log_counts(&state);
    let mut was_unread = state.has_unread;
    timer.schedule();

    while running.load(Ordering::SeqCst) {
        if timer.fire() {
            state.poll(index);
            log_counts(&state);

            // notify on the rising edge only, not on every unread tick
            if state.has_unread && !was_unread {
                notifier.notify_unread(state.mail_count);
            }
            was_unread = state.has_unread;
        }

        let wait = timer.remaining().unwrap_or(SLICE).min(SLICE);
        thread::sleep(wait);
    }

    timer.cancel();
    Ok(())
}

fn log_counts(state: &AppletState) {
    info!(
        "inbox: {} total, unread: {}",
        state.mail_count, state.has_unread
    );
}
