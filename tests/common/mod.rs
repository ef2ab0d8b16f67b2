//! Shared utilities for integration testing the sync loop.

use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use tokio::sync::mpsc;

use authmap::sync::{MappingResource, WatchEvent, WatchOpenError, WatchSource};

/// One scripted outcome of a watch-open attempt.
#[allow(dead_code)]
pub enum Open {
    Stream(mpsc::UnboundedReceiver<WatchEvent>),
    Fail(&'static str),
}

/// A watch source that plays back a script of open outcomes.
///
/// If the engine opens more watches than scripted, the open never resolves;
/// a test that hits that path fails by timeout.
pub struct ScriptedSource {
    opens: VecDeque<Open>,
}

impl ScriptedSource {
    #[allow(dead_code)]
    pub fn new(opens: Vec<Open>) -> Self {
        Self {
            opens: opens.into(),
        }
    }
}

impl WatchSource for ScriptedSource {
    async fn open(
        &mut self,
        _resource: &str,
    ) -> Result<mpsc::UnboundedReceiver<WatchEvent>, WatchOpenError> {
        match self.opens.pop_front() {
            Some(Open::Stream(rx)) => Ok(rx),
            Some(Open::Fail(message)) => Err(WatchOpenError::new(message)),
            None => std::future::pending().await,
        }
    }
}

/// Build a resource payload from literal field entries.
#[allow(dead_code)]
pub fn resource(name: &str, fields: &[(&str, &str)]) -> MappingResource {
    let data: BTreeMap<String, String> = fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    MappingResource {
        name: name.to_string(),
        data,
    }
}

/// Poll until `cond` holds, panicking after five seconds.
#[allow(dead_code)]
pub async fn wait_for(what: &str, cond: impl Fn() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !cond() {
        if tokio::time::Instant::now() > deadline {
            panic!("timed out waiting for {what}");
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
