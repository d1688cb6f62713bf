//! Watch mode: re-render whenever the document file changes.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use super::{read_input, render_output, report_parse_error, write_output};
use crate::config::Config;
use crate::workbench::Workbench;

/// Events from the file watcher
#[derive(Debug)]
enum WatcherEvent {
    DocumentChanged,
    WatcherError(notify::Error),
}

/// Watch `config.input` until `shutdown` completes.
///
/// Every change is fed through the editor like a keystroke: an invalid
/// document keeps the last good form and raises the banner.
pub async fn watch(
    config: &Config,
    mut workbench: Workbench,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    let target = std::fs::canonicalize(&config.input)
        .with_context(|| format!("Cannot watch {}", config.input.display()))?;
    // Editors often replace the file instead of writing it, so watch the directory
    let directory = target
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let file_name = target.file_name().map(|name| name.to_os_string());

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| match res {
            Ok(event) => {
                if let EventKind::Create(_) | EventKind::Modify(_) = event.kind {
                    let touches_target = event
                        .paths
                        .iter()
                        .any(|path| path.file_name().map(|n| n.to_os_string()) == file_name);
                    if touches_target {
                        let _ = tx.send(WatcherEvent::DocumentChanged);
                    }
                }
            }
            Err(e) => {
                let _ = tx.send(WatcherEvent::WatcherError(e));
            }
        },
        notify::Config::default().with_poll_interval(Duration::from_secs(1)),
    )?;
    watcher.watch(&directory, RecursiveMode::NonRecursive)?;
    log::info!("Watching {}", target.display());

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(WatcherEvent::DocumentChanged) => {
                    refresh(config, &mut workbench).await?;
                }
                Some(WatcherEvent::WatcherError(e)) => {
                    log::error!("Document watcher error: {}", e);
                }
                None => break,
            },
            _ = &mut shutdown => break,
        }
    }

    log::info!("Stopped watching {}", target.display());
    Ok(())
}

/// Re-read the document and rewrite the output if the text changed
async fn refresh(config: &Config, workbench: &mut Workbench) -> Result<()> {
    let text = match read_input(&config.input).await {
        Ok(text) => text,
        Err(e) => {
            // The file can briefly vanish while an editor swaps it in
            log::warn!("{:#}", e);
            return Ok(());
        }
    };

    if text == workbench.editor().text() {
        return Ok(());
    }

    let replaced = workbench.type_text(&text);
    report_parse_error(workbench, &config.input);
    log::debug!(
        "Document {}",
        if replaced { "updated" } else { "kept after a failed parse" }
    );

    write_output(config.output.as_deref(), &render_output(workbench, config)).await
}
