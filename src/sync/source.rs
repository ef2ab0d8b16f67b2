//! Watch transport abstraction.

use std::collections::BTreeMap;

use thiserror::Error;
use tokio::sync::mpsc;

/// The tracked resource as carried by add/modify events: a name plus the raw
/// key/value fields of the mapping document.
#[derive(Debug, Clone)]
pub struct MappingResource {
    pub name: String,
    pub data: BTreeMap<String, String>,
}

/// One change notification from the watch stream.
#[derive(Debug, Clone)]
pub enum WatchEvent {
    Added(MappingResource),
    Modified(MappingResource),
    /// The resource was removed; the mapping is now empty.
    Deleted,
    /// A transient stream-level error. The stream stays open.
    Error(String),
}

/// Failure to open a watch, as reported by the transport.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct WatchOpenError(Box<dyn std::error::Error + Send + Sync>);

impl WatchOpenError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(source.into())
    }
}

/// A transport that can open a watch on a named resource.
///
/// The returned receiver is the event stream; the stream ends when the
/// transport drops its sender, which the sync engine treats as "watch
/// expired, reopen". Implementations deliver events in order.
pub trait WatchSource {
    fn open(
        &mut self,
        resource: &str,
    ) -> impl std::future::Future<Output = Result<mpsc::UnboundedReceiver<WatchEvent>, WatchOpenError>>
           + Send;
}
