pub mod events;
pub mod state;
pub mod timer;
pub mod ui;

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;

use crate::config::Settings;
use crate::index::MailIndex;
use crate::index::sync::SyncTool;

use events::handle_key;
use state::AppletState;
use timer::PollTimer;

/// Fallback wait when the timer is disarmed, so the loop still services input.
const IDLE_POLL: Duration = Duration::from_millis(500);

/// Interactive mode: one cooperative loop services the poll timer and the
/// keyboard; external calls block it for their duration.
pub fn run_applet(index: &dyn MailIndex, sync: &SyncTool, settings: &Settings) -> Result<()> {
    let mut state = AppletState::new(settings.max_summary_items);
    let mut timer = PollTimer::new(settings.interval());

    state.poll(index);
    timer.schedule();

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &mut state, &mut timer, index, sync);
    ratatui::restore();

    // leaving the panel: never exit with a deadline still armed
    timer.cancel();
    result
}

fn run(
    terminal: &mut DefaultTerminal,
    state: &mut AppletState,
    timer: &mut PollTimer,
    index: &dyn MailIndex,
    sync: &SyncTool,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, state))?;

        let wait = timer.remaining().unwrap_or(IDLE_POLL);
        if event::poll(wait)?
            && let Event::Key(key) = event::read()?
            && handle_key(key, state, timer, index, sync)?
        {
            return Ok(());
        }

        if timer.fire() {
            state.poll(index);
        }
    }
}
