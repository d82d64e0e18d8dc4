use log::warn;
use notify_rust::{Hint, Notification};

pub struct Notifier;

impl Notifier {
    pub fn new() -> Self {
        Self
    }

    /// Best effort: a failed notification never stops the poll loop.
    pub fn notify_unread(&self, inbox_count: u64) {
        let shown = Notification::new()
            .summary("New mail")
            .body(&format!("{inbox_count} message(s) in the inbox"))
            .icon("mail-unread")
            .hint(Hint::Category("email".to_string()))
            .show();

        if let Err(e) = shown {
            warn!("notification error: {e}");
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
