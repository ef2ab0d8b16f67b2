//! File-backed watch source.
//!
//! Watches a local YAML file whose top level is the raw key/value payload of
//! the mapping resource (`mapUsers`, `mapRoles`, `mapAccounts` as string
//! blocks). Intended for local runs and tests; a deployment against a real
//! configuration backend supplies its own [`WatchSource`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::sync::source::{MappingResource, WatchEvent, WatchOpenError, WatchSource};

/// Failure to read or interpret the watched file.
#[derive(Debug, Error)]
pub enum FileSourceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("document is not a map of string fields: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}

/// A [`WatchSource`] over a single local file.
pub struct FileSource {
    path: PathBuf,
    // Kept alive between opens; replacing it drops the previous watcher and
    // closes the previous event stream.
    watcher: Option<RecommendedWatcher>,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            watcher: None,
        }
    }
}

fn read_resource(path: &Path, name: &str) -> Result<MappingResource, FileSourceError> {
    let content = fs::read_to_string(path)?;
    let data: BTreeMap<String, String> = serde_yaml_ng::from_str(&content)?;
    Ok(MappingResource {
        name: name.to_string(),
        data,
    })
}

impl WatchSource for FileSource {
    async fn open(
        &mut self,
        resource: &str,
    ) -> Result<mpsc::UnboundedReceiver<WatchEvent>, WatchOpenError> {
        let (tx, rx) = mpsc::unbounded_channel();

        // The current content is the first event; an unreadable file at open
        // time fails the open rather than starting a blind watch.
        let initial = read_resource(&self.path, resource).map_err(WatchOpenError::new)?;
        let _ = tx.send(WatchEvent::Added(initial));

        let path = self.path.clone();
        let name = resource.to_string();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_remove() {
                        let _ = tx.send(WatchEvent::Deleted);
                    } else if event.kind.is_modify() || event.kind.is_create() {
                        match read_resource(&path, &name) {
                            Ok(resource) => {
                                let _ = tx.send(WatchEvent::Modified(resource));
                            }
                            Err(e) => {
                                let _ = tx.send(WatchEvent::Error(e.to_string()));
                            }
                        }
                    }
                }
                Err(e) => {
                    let _ = tx.send(WatchEvent::Error(e.to_string()));
                }
            },
            Config::default().with_poll_interval(Duration::from_millis(500)),
        )
        .map_err(WatchOpenError::new)?;

        watcher
            .watch(&self.path, RecursiveMode::NonRecursive)
            .map_err(WatchOpenError::new)?;
        self.watcher = Some(watcher);

        tracing::info!(path = ?self.path, resource = %resource, "file watch started");
        Ok(rx)
    }
}
