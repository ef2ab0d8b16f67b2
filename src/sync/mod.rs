//! Resource synchronization subsystem.
//!
//! # Data Flow
//! ```text
//! watch transport (source.rs trait, file.rs local impl)
//!     → stream of Added/Modified/Deleted/Error events
//!     → engine.rs (one consumer, strict stream order)
//!     → mapstore::parser (on add/modify)
//!     → MapStore::replace
//!
//! On stream closure:
//!     engine.rs reopens the watch and keeps going
//! ```
//!
//! # Design Decisions
//! - The transport is behind the `WatchSource` trait so the loop is testable
//!   without a real backend
//! - First-ever open failure is fatal and surfaced to the supervisor; once a
//!   watch has been established, reopen failures retry forever with backoff
//! - Shutdown is observed between watches, never mid-stream

pub mod engine;
pub mod file;
pub mod source;

pub use engine::{SyncConfig, SyncEngine, SyncError};
pub use source::{MappingResource, WatchEvent, WatchOpenError, WatchSource};

/// Name of the single tracked configuration resource. Events for any other
/// resource are ignored.
pub const RESOURCE_NAME: &str = "aws-auth";
