use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use log::{info, warn};

use crate::applet::state::AppletState;
use crate::applet::timer::PollTimer;
use crate::config;
use crate::domain::mail::RowAction;
use crate::index::MailIndex;
use crate::index::sync::SyncTool;

/// Returns true when the applet should quit.
pub fn handle_key(
    key: KeyEvent,
    state: &mut AppletState,
    timer: &mut PollTimer,
    index: &dyn MailIndex,
    sync: &SyncTool,
) -> Result<bool> {
    state.status = None;

    match key.code {
        KeyCode::Char('q') => return Ok(true),

        KeyCode::Esc => {
            if state.menu_open {
                state.close_menu();
                return Ok(false);
            }
            return Ok(true);
        }

        KeyCode::Enter | KeyCode::Tab => state.toggle_menu(index),

        KeyCode::Down | KeyCode::Char('j') => state.move_selection(1),
        KeyCode::Up | KeyCode::Char('k') => state.move_selection(-1),

        KeyCode::Char('a') => run_action(RowAction::Archive, state, index),
        KeyCode::Char('t') => run_action(RowAction::Trash, state, index),
        KeyCode::Char('d') => run_action(RowAction::Delete, state, index),

        // middle-click equivalent: refresh the label without opening the menu
        KeyCode::Char('u') => state.poll(index),

        KeyCode::Char('R') => {
            state.force_refresh(index, sync);
            state.status = Some("Refreshed".to_string());
        }

        KeyCode::Char('S') => reload_settings(state, timer),

        _ => {}
    }

    Ok(false)
}

fn run_action(action: RowAction, state: &mut AppletState, index: &dyn MailIndex) {
    if state.run_row_action(action, index) {
        let done = match action {
            RowAction::Archive => "Archived",
            RowAction::Trash => "Marked trashed",
            RowAction::Delete => "Marked deleted",
        };
        state.status = Some(done.to_string());
    }
}

/// Re-read the config file. A changed interval reschedules the poll timer on
/// the spot; a changed row cap applies on the next menu open.
fn reload_settings(state: &mut AppletState, timer: &mut PollTimer) {
    match config::load_settings() {
        Ok(settings) => {
            state.max_summary_items = settings.max_summary_items;
            if timer.apply_interval(settings.interval()) {
                info!("poll interval is now {}s", settings.update_interval_secs);
            }
            state.status = Some("Settings reloaded".to_string());
        }
        Err(e) => {
            warn!("settings reload failed: {e}");
            state.status = Some("Settings reload failed".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::testing::FakeIndex;
    use std::time::Duration;

    fn press(c: char) -> KeyEvent {
        KeyEvent::from(KeyCode::Char(c))
    }

    fn fixture() -> (AppletState, PollTimer, SyncTool) {
        (
            AppletState::new(10),
            PollTimer::new(Duration::from_secs(60)),
            SyncTool::from_command(&["true".to_string()]).unwrap(),
        )
    }

    #[test]
    fn q_quits() {
        let (mut state, mut timer, sync) = fixture();
        let index = FakeIndex::default();
        assert!(handle_key(press('q'), &mut state, &mut timer, &index, &sync).unwrap());
    }

    #[test]
    fn esc_closes_the_menu_before_quitting() {
        let (mut state, mut timer, sync) = fixture();
        let index = FakeIndex::default();

        state.open_menu(&index);
        let esc = KeyEvent::from(KeyCode::Esc);
        assert!(!handle_key(esc, &mut state, &mut timer, &index, &sync).unwrap());
        assert!(!state.menu_open);

        let esc = KeyEvent::from(KeyCode::Esc);
        assert!(handle_key(esc, &mut state, &mut timer, &index, &sync).unwrap());
    }

    #[test]
    fn enter_toggles_the_menu() {
        let (mut state, mut timer, sync) = fixture();
        let index = FakeIndex {
            results: vec![FakeIndex::entry("t1", "s", "a")],
            total: 1,
            ..FakeIndex::default()
        };

        let enter = KeyEvent::from(KeyCode::Enter);
        handle_key(enter, &mut state, &mut timer, &index, &sync).unwrap();
        assert!(state.menu_open);
        assert_eq!(state.entries.len(), 1);

        let enter = KeyEvent::from(KeyCode::Enter);
        handle_key(enter, &mut state, &mut timer, &index, &sync).unwrap();
        assert!(!state.menu_open);
    }

    #[test]
    fn action_keys_mutate_the_selected_row() {
        let (mut state, mut timer, sync) = fixture();
        let index = FakeIndex {
            results: vec![FakeIndex::entry("t1", "s", "a")],
            total: 1,
            ..FakeIndex::default()
        };
        state.open_menu(&index);

        handle_key(press('t'), &mut state, &mut timer, &index, &sync).unwrap();
        assert!(index.call_log().contains(&"tag +trashed thread:t1".to_string()));
        assert!(!state.menu_open);
        assert_eq!(state.status.as_deref(), Some("Marked trashed"));
    }

    #[test]
    fn u_polls_without_opening_the_menu() {
        let (mut state, mut timer, sync) = fixture();
        let index = FakeIndex {
            total: 7,
            ..FakeIndex::default()
        };

        handle_key(press('u'), &mut state, &mut timer, &index, &sync).unwrap();
        assert_eq!(state.mail_count, 7);
        assert!(!state.menu_open);
        assert_eq!(index.calls_matching("search"), 0);
    }
}
