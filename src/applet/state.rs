use log::warn;
use ratatui::widgets::ListState;

use crate::domain::mail::{MailSummaryEntry, RowAction, ThreadId};
use crate::index::{INBOX_QUERY, INBOX_UNREAD_QUERY, MailIndex};
use crate::index::sync::SyncTool;

pub const UNREAD_ICON: &str = "mail-unread";
pub const READ_ICON: &str = "mail-read";

/// Everything the surface renders from. Mutated only by the poll cycle, the
/// summary loader and settings changes; never shared across threads.
pub struct AppletState {
    pub mail_count: u64,
    pub has_unread: bool,

    pub menu_open: bool,
    pub entries: Vec<MailSummaryEntry>,
    /// The search returned more rows than fit; the dropdown ends in "…".
    pub overflowed: bool,
    pub list_state: ListState,

    pub max_summary_items: usize,
    /// Transient footer message, cleared on the next key.
    pub status: Option<String>,
}

impl AppletState {
    pub fn new(max_summary_items: usize) -> Self {
        Self {
            mail_count: 0,
            has_unread: false,
            menu_open: false,
            entries: Vec::new(),
            overflowed: false,
            list_state: ListState::default(),
            max_summary_items,
            status: None,
        }
    }

    /// One poll tick: two count queries, zero substituted on failure.
    pub fn poll(&mut self, index: &dyn MailIndex) {
        self.mail_count = count_or_zero(index, INBOX_QUERY);
        self.has_unread = count_or_zero(index, INBOX_UNREAD_QUERY) > 0;
    }

    /// The count label; hidden while the inbox is empty.
    pub fn label(&self) -> Option<String> {
        (self.mail_count > 0).then(|| self.mail_count.to_string())
    }

    pub fn icon(&self) -> &'static str {
        if self.has_unread { UNREAD_ICON } else { READ_ICON }
    }

    /// The dropdown shows a single placeholder row instead of mail rows when
    /// the search came back empty.
    pub fn shows_placeholder(&self) -> bool {
        self.menu_open && self.entries.is_empty()
    }

    pub fn toggle_menu(&mut self, index: &dyn MailIndex) {
        if self.menu_open {
            self.close_menu();
        } else {
            self.open_menu(index);
        }
    }

    /// Menu open: clear, poll, re-query up to the row cap, then mark the
    /// inbox read the way the panel click always has.
    pub fn open_menu(&mut self, index: &dyn MailIndex) {
        self.menu_open = true;
        self.reload_summary(index);

        if let Err(e) = index.tag("-unread", INBOX_UNREAD_QUERY) {
            warn!("marking inbox read failed: {e}");
        }
        self.poll(index);
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
        self.entries.clear();
        self.overflowed = false;
        self.list_state.select(None);
    }

    /// Throw away whatever was loaded and ask the indexer again. Fetches one
    /// row past the cap so a truncated list is distinguishable from a full
    /// one.
    fn reload_summary(&mut self, index: &dyn MailIndex) {
        self.entries.clear();
        self.overflowed = false;
        self.poll(index);

        let want = self.max_summary_items;
        let fetched = match index.search_inbox(want + 1) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("inbox search failed: {e}");
                Vec::new()
            }
        };
        self.overflowed = fetched.len() > want;
        self.entries = fetched;
        self.entries.truncate(want);

        if self.entries.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }

    pub fn selected_thread(&self) -> Option<&ThreadId> {
        let idx = self.list_state.selected()?;
        self.entries.get(idx).map(|e| &e.thread_id)
    }

    pub fn move_selection(&mut self, delta: i32) {
        if self.entries.is_empty() {
            self.list_state.select(None);
            return;
        }
        let cur = self.list_state.selected().unwrap_or(0) as i32;
        let len = self.entries.len() as i32;
        let next = (cur + delta).clamp(0, len - 1) as usize;
        self.list_state.select(Some(next));
    }

    /// One tag mutation scoped to the selected row's thread, one full reload,
    /// menu closed. No partial-row removal: the reload re-queries the source
    /// of truth. Returns whether a row was acted on.
    pub fn run_row_action(&mut self, action: RowAction, index: &dyn MailIndex) -> bool {
        let Some(thread_id) = self.selected_thread().cloned() else {
            return false;
        };

        let scope = format!("thread:{thread_id}");
        if let Err(e) = index.tag(action.tag_op(), &scope) {
            warn!("{} failed for {scope}: {e}", action.name());
        }

        self.reload_summary(index);
        self.close_menu();
        true
    }

    /// Force refresh: run the sync tool, ingest new mail, poll. Failures are
    /// logged and the poll still runs.
    pub fn force_refresh(&mut self, index: &dyn MailIndex, sync: &SyncTool) {
        if let Err(e) = sync.run() {
            warn!("mail sync failed: {e}");
        }
        if let Err(e) = index.ingest_new() {
            warn!("index refresh failed: {e}");
        }
        self.poll(index);
    }
}

fn count_or_zero(index: &dyn MailIndex, query: &str) -> u64 {
    match index.count(query) {
        Ok(n) => n,
        Err(e) => {
            warn!("count {query:?} failed: {e}");
            0
        }
    }
}
