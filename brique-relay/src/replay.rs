//! Replays recorded backend pushes onto a push sink.
//!
//! Input is JSON lines:
//!
//! ```text
//! {"channel": "progress", "payload": {"id": "up1", "operation": "upload", "current": 50, "total": 100}}
//! {"channel": "progress:complete", "payload": {"id": "up1"}, "delayMs": 250}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. A line that is not a
//! valid record is logged and skipped; the replay carries on.

use std::time::Duration;

use brique_core::PushSink;
use serde::Deserialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayLine {
    pub channel: String,
    #[serde(default)]
    pub payload: Value,
    /// Wait this long before delivering the push.
    #[serde(default)]
    pub delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Pushes the sink accepted. A push the center later rejects at decode
    /// still counts here.
    pub emitted: usize,
    /// Malformed lines plus pushes the sink refused.
    pub skipped: usize,
}

/// `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str) -> Result<Option<ReplayLine>, serde_json::Error> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some)
}

pub async fn replay<R, S>(reader: R, sink: &S) -> std::io::Result<ReplayStats>
where
    R: AsyncBufRead + Unpin,
    S: PushSink + ?Sized,
{
    let mut stats = ReplayStats::default();
    let mut lines = reader.lines();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let record = match parse_line(&line) {
            Ok(Some(record)) => record,
            Ok(None) => continue,
            Err(e) => {
                warn!(line = line_no, "skipping malformed replay line: {e}");
                stats.skipped += 1;
                continue;
            }
        };

        if let Some(ms) = record.delay_ms.filter(|ms| *ms > 0) {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }

        match sink.emit(&record.channel, record.payload) {
            Ok(()) => {
                debug!(line = line_no, channel = %record.channel, "push replayed");
                stats.emitted += 1;
            }
            Err(e) => {
                warn!(line = line_no, channel = %record.channel, "push rejected by bridge: {e}");
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use brique_core::{LocalBridge, NotificationCenter, NotificationConfig, PushBridge};

    #[test]
    fn parse_skips_comments_and_blanks() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# recorded 2025-01-02").unwrap(), None);
        let rec = parse_line(r#"{"channel":"progress:complete","payload":{"id":"x"},"delayMs":5}"#)
            .unwrap()
            .expect("record");
        assert_eq!(rec.channel, "progress:complete");
        assert_eq!(rec.delay_ms, Some(5));
    }

    #[tokio::test(start_paused = true)]
    async fn emitted_counts_bridge_acceptance_not_application() {
        let bridge = Arc::new(LocalBridge::new());
        let center = NotificationCenter::new(NotificationConfig::default());
        center
            .attach(Arc::clone(&bridge) as Arc<dyn PushBridge>)
            .expect("attach");

        let input = "{\"channel\":\"notification\",\"payload\":{\"message\":\"title missing\"}}\n";
        let stats = replay(input.as_bytes(), bridge.as_ref()).await.expect("replay");
        assert_eq!(stats, ReplayStats { emitted: 1, skipped: 0 });
        assert!(center.snapshot().is_empty());
    }

    #[test]
    fn parse_rejects_missing_channel() {
        assert!(parse_line(r#"{"payload":{}}"#).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn replay_feeds_the_center() {
        let bridge = Arc::new(LocalBridge::new());
        let center = NotificationCenter::new(NotificationConfig::default());
        center
            .attach(Arc::clone(&bridge) as Arc<dyn PushBridge>)
            .expect("attach");

        let input = concat!(
            "{\"channel\":\"progress\",\"payload\":{\"id\":\"backup\",\"operation\":\"Création du backup\",\"current\":0,\"total\":100}}\n",
            "not json\n",
            "\n",
            "{\"channel\":\"notification\",\"payload\":{\"type\":\"warning\",\"title\":\"Backup partiel\",\"duration\":0}}\n",
            "{\"channel\":\"progress:complete\",\"payload\":{\"id\":\"backup\"},\"delayMs\":100}\n",
        );

        let stats = replay(input.as_bytes(), bridge.as_ref()).await.expect("replay");
        assert_eq!(stats, ReplayStats { emitted: 3, skipped: 1 });

        let snap = center.snapshot();
        assert!(snap.progress.is_empty());
        assert_eq!(snap.notifications.len(), 1);
        assert_eq!(snap.notifications[0].title, "Backup partiel");
    }
}
