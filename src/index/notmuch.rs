use std::process::Command;

use anyhow::{Result, anyhow};
use serde::Deserialize;

use crate::domain::mail::MailSummaryEntry;
use crate::index::{INBOX_QUERY, MailIndex};

/// Talks to the notmuch CLI. One blocking subprocess per call, stdout
/// captured, stderr dropped.
pub struct NotmuchIndex {
    program: String,
}

impl NotmuchIndex {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let out = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| anyhow!("failed to run {}: {e}", self.program))?;
        if !out.status.success() {
            return Err(anyhow!(
                "{} {} exited with {}",
                self.program,
                args.first().copied().unwrap_or(""),
                out.status
            ));
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}

impl MailIndex for NotmuchIndex {
    fn count(&self, query: &str) -> Result<u64> {
        parse_count(&self.run(&["count", query])?)
    }

    fn search_inbox(&self, limit: usize) -> Result<Vec<MailSummaryEntry>> {
        let limit_arg = format!("--limit={limit}");
        let stdout = self.run(&[
            "search",
            "--format=json",
            "--output=summary",
            &limit_arg,
            INBOX_QUERY,
        ])?;
        parse_search(&stdout)
    }

    fn tag(&self, op: &str, query: &str) -> Result<()> {
        self.run(&["tag", op, query])?;
        Ok(())
    }

    fn ingest_new(&self) -> Result<()> {
        self.run(&["new"])?;
        Ok(())
    }
}

/// Count queries answer with a newline-terminated integer.
fn parse_count(stdout: &str) -> Result<u64> {
    let trimmed = stdout.trim();
    trimmed
        .parse::<u64>()
        .map_err(|_| anyhow!("unparsable count output: {trimmed:?}"))
}

/// One record of `search --format=json --output=summary`. The real output
/// carries more fields (timestamp, tags, ...); only these three matter here.
#[derive(Debug, Deserialize)]
struct SearchRecord {
    thread: String,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    authors: String,
}

impl From<SearchRecord> for MailSummaryEntry {
    fn from(r: SearchRecord) -> Self {
        Self {
            thread_id: r.thread,
            subject: r.subject,
            sender: r.authors,
        }
    }
}

fn parse_search(stdout: &str) -> Result<Vec<MailSummaryEntry>> {
    let s = stdout.trim();
    if s.is_empty() {
        return Ok(Vec::new());
    }
    let records: Vec<SearchRecord> =
        serde_json::from_str(s).map_err(|e| anyhow!("unparsable search output: {e}"))?;
    Ok(records.into_iter().map(MailSummaryEntry::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn count_strips_trailing_newline() {
        assert_eq!(parse_count("3\n").unwrap(), 3);
    }

    #[test]
    fn count_tolerates_surrounding_space() {
        assert_eq!(parse_count(" 42 \n").unwrap(), 42);
    }

    #[test]
    fn count_rejects_empty_and_garbage() {
        assert!(parse_count("").is_err());
        assert!(parse_count("\n").is_err());
        assert!(parse_count("three").is_err());
        assert!(parse_count("-1").is_err());
    }

    // Trimmed transcript of a real `notmuch search --format=json` run; the
    // extra fields must not get in the way.
    const SEARCH_OUTPUT: &str = r#"[
        {"thread": "0000000000001f00",
         "timestamp": 1721381918,
         "date_relative": "today",
         "matched": 1,
         "total": 2,
         "authors": "Alice Example",
         "subject": "Build is green again",
         "tags": ["inbox", "unread"]},
        {"thread": "0000000000001e9b",
         "timestamp": 1721300011,
         "date_relative": "yesterday",
         "matched": 1,
         "total": 1,
         "authors": "bob@example.org",
         "subject": "Re: quarterly report",
         "tags": ["inbox"]}
    ]"#;

    #[test]
    fn search_maps_records_verbatim() {
        let entries = parse_search(SEARCH_OUTPUT).unwrap();
        assert_eq!(
            entries,
            vec![
                MailSummaryEntry {
                    thread_id: "0000000000001f00".to_string(),
                    subject: "Build is green again".to_string(),
                    sender: "Alice Example".to_string(),
                },
                MailSummaryEntry {
                    thread_id: "0000000000001e9b".to_string(),
                    subject: "Re: quarterly report".to_string(),
                    sender: "bob@example.org".to_string(),
                },
            ]
        );
    }

    #[test]
    fn search_treats_blank_output_as_no_mail() {
        assert_eq!(parse_search("").unwrap(), vec![]);
        assert_eq!(parse_search("\n").unwrap(), vec![]);
    }

    #[test]
    fn search_empty_array_is_no_mail() {
        assert_eq!(parse_search("[]\n").unwrap(), vec![]);
    }

    #[test]
    fn search_rejects_garbage() {
        assert!(parse_search("not json").is_err());
    }

    #[test]
    fn search_fills_missing_fields_with_empty_strings() {
        let entries = parse_search(r#"[{"thread": "abc"}]"#).unwrap();
        assert_eq!(entries[0].thread_id, "abc");
        assert_eq!(entries[0].subject, "");
        assert_eq!(entries[0].sender, "");
    }
}
