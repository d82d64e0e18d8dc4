pub mod notmuch;
pub mod sync;

use anyhow::Result;

use crate::domain::mail::MailSummaryEntry;

pub const INBOX_QUERY: &str = "tag:inbox";
pub const INBOX_UNREAD_QUERY: &str = "tag:inbox and tag:unread";

/// The seam to the external mail indexer. Everything behind it is a blocking
/// call into another process; callers catch, log and default.
pub trait MailIndex {
    /// Number of messages matching `query`.
    fn count(&self, query: &str) -> Result<u64>;

    /// Newest inbox threads, at most `limit` of them.
    fn search_inbox(&self, limit: usize) -> Result<Vec<MailSummaryEntry>>;

    /// Apply one tag operation (e.g. "+trashed", "-unread") to everything
    /// matching `query`.
    fn tag(&self, op: &str, query: &str) -> Result<()>;

    /// Ingest freshly synced mail into the index.
    fn ingest_new(&self) -> Result<()>;
}
