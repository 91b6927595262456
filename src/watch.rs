//! Re-running on file changes for `run --watch`

use crate::error::{Result, RunError};
use crate::loader::AccessScope;
use notify::{Event, EventKind, PollWatcher, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Block forever, calling `on_change` with the files that changed.
///
/// The parent directories of both files are polled, so files that are
/// replaced, removed or created later are still noticed. Events arriving
/// within one poll interval are batched into a single call.
pub fn watch_changes<F>(
    solution_file: &Path,
    input_file: &Path,
    poll_interval: Duration,
    mut on_change: F,
) -> Result<()>
where
    F: FnMut(AccessScope),
{
    let solution_file = std::path::absolute(solution_file)?;
    let input_file = std::path::absolute(input_file)?;

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = PollWatcher::new(
        tx,
        notify::Config::default().with_poll_interval(poll_interval),
    )
    .map_err(|e| RunError::Watch(e.to_string()))?;

    let dirs: BTreeSet<PathBuf> = [&solution_file, &input_file]
        .into_iter()
        .filter_map(|p| p.parent().map(Path::to_path_buf))
        .collect();
    for dir in &dirs {
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|e| RunError::Watch(format!("{}: {}", dir.display(), e)))?;
        info!(path = %dir.display(), "watching directory");
    }

    loop {
        let first = rx
            .recv()
            .map_err(|_| RunError::Watch("watcher stopped".to_string()))?;
        let mut batch = vec![first];
        while let Ok(next) = rx.recv_timeout(poll_interval) {
            batch.push(next);
        }

        let events: Vec<Event> = batch
            .into_iter()
            .filter_map(|res| match res {
                Ok(event) => Some(event),
                Err(e) => {
                    warn!(error = %e, "watch error");
                    None
                }
            })
            .collect();

        if let Some(scope) = change_scope(&events, &solution_file, &input_file) {
            debug!(?scope, "puzzle files changed");
            on_change(scope);
        }
    }
}

/// Which of the two files the events touch, if any
fn change_scope(events: &[Event], solution_file: &Path, input_file: &Path) -> Option<AccessScope> {
    let mut solution_changed = false;
    let mut input_changed = false;

    for event in events {
        if !matches!(
            event.kind,
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
        ) {
            continue;
        }
        for path in &event.paths {
            if path == solution_file {
                solution_changed = true;
            } else if path == input_file {
                input_changed = true;
            }
        }
    }

    match (solution_changed, input_changed) {
        (true, true) => Some(AccessScope::All),
        (true, false) => Some(AccessScope::Solution),
        (false, true) => Some(AccessScope::Input),
        (false, false) => None,
    }
}
