//! Brique relay: headless host for the notification center.
//!
//! Reads recorded backend pushes (JSON lines, see `replay`), routes them
//! through an in-process bridge into a `NotificationCenter`, and writes every
//! resulting snapshot to stdout as one JSON line. Logs go to stderr.

mod replay;
mod settings;

use std::io::Write;
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::{bail, Context};
use brique_core::{CenterSnapshot, LocalBridge, NotificationCenter, PushBridge};
use serde::Serialize;
use settings::{default_settings_path, load_settings, save_settings};
use tokio::io::BufReader;
use tracing::info;

#[derive(Debug)]
struct Args {
    input: Option<PathBuf>,
    settings: Option<PathBuf>,
    linger_ms: Option<u64>,
    init_settings: bool,
}

#[derive(Serialize)]
struct SnapshotLine<'a> {
    seq: u64,
    #[serde(flatten)]
    snapshot: &'a CenterSnapshot,
}

const USAGE: &str =
    "usage: brique-relay [--input FILE] [--settings FILE] [--linger-ms N] [--init-settings]";

fn parse_args() -> anyhow::Result<Option<Args>> {
    let mut args = Args {
        input: None,
        settings: None,
        linger_ms: None,
        init_settings: false,
    };

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--input" | "-i" => {
                let value = it.next().context("--input requires a path")?;
                args.input = Some(PathBuf::from(value));
            }
            "--settings" => {
                let value = it.next().context("--settings requires a path")?;
                args.settings = Some(PathBuf::from(value));
            }
            "--linger-ms" => {
                let value = it.next().context("--linger-ms requires a value")?;
                let ms = value
                    .parse::<u64>()
                    .with_context(|| format!("invalid --linger-ms value: {value}"))?;
                args.linger_ms = Some(ms);
            }
            "--init-settings" => args.init_settings = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                return Ok(None);
            }
            other => bail!("unknown argument: {other}\n{USAGE}"),
        }
    }
    Ok(Some(args))
}

fn print_snapshot(seq: u64, snapshot: &CenterSnapshot) {
    let line = match serde_json::to_string(&SnapshotLine { seq, snapshot }) {
        Ok(line) => line,
        Err(e) => {
            tracing::warn!("failed to encode snapshot {seq}: {e}");
            return;
        }
    };
    let mut out = std::io::stdout().lock();
    if let Err(e) = writeln!(out, "{line}").and_then(|_| out.flush()) {
        tracing::warn!("failed to write snapshot {seq}: {e}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Tracing ───────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("brique_core=info,brique_relay=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let settings_path = args.settings.clone().unwrap_or_else(default_settings_path);
    let relay_settings = load_settings(&settings_path);
    let linger = Duration::from_millis(args.linger_ms.unwrap_or(relay_settings.linger_ms));
    info!(
        settings_path = ?settings_path,
        push_duration_ms = relay_settings.push_duration_ms,
        push_kind = %relay_settings.push_kind,
        linger_ms = linger.as_millis() as u64,
        "relay settings loaded"
    );

    if args.init_settings {
        save_settings(&settings_path, &relay_settings)
            .with_context(|| format!("cannot write settings to {}", settings_path.display()))?;
        info!(settings_path = ?settings_path, "settings written");
        return Ok(());
    }

    // ── Center + bridge ───────────────────────────────────────────────────
    let bridge = Arc::new(LocalBridge::new());
    let center = NotificationCenter::new(relay_settings.notification_config());
    center.attach(Arc::clone(&bridge) as Arc<dyn PushBridge>)?;

    let seq = Arc::new(AtomicU64::new(0));
    let seq_for_listener = Arc::clone(&seq);
    center.add_listener(move |snapshot| {
        let n = seq_for_listener.fetch_add(1, Ordering::Relaxed);
        print_snapshot(n, snapshot);
    });

    // ── Replay ────────────────────────────────────────────────────────────
    let stats = match &args.input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("cannot open replay input {}", path.display()))?;
            replay::replay(BufReader::new(file), bridge.as_ref()).await?
        }
        None => replay::replay(BufReader::new(tokio::io::stdin()), bridge.as_ref()).await?,
    };
    info!(
        emitted = stats.emitted,
        skipped = stats.skipped,
        "replay input exhausted"
    );

    if !linger.is_zero() {
        tokio::time::sleep(linger).await;
    }

    center.destroy();
    let snapshot = center.snapshot();
    info!(
        snapshots = seq.load(Ordering::Relaxed),
        notifications = snapshot.notifications.len(),
        progress = snapshot.progress.len(),
        "relay shutting down"
    );
    if !snapshot.progress.is_empty() {
        let open: Vec<&str> = snapshot.progress.keys().map(String::as_str).collect();
        tracing::warn!(?open, "operations still in progress at shutdown");
    }
    Ok(())
}
