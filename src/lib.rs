//! In-memory identity mapping store, continuously synchronized from a single
//! externally-managed configuration resource.
//!
//! The authentication path consults the local [`MapStore`] snapshot instead
//! of the slow, rate-limited configuration backend; a background
//! [`SyncEngine`] keeps the snapshot current over a watch stream and survives
//! stream failures for the process lifetime.

pub mod lifecycle;
pub mod mapstore;
pub mod observability;
pub mod resilience;
pub mod sync;

pub use lifecycle::Shutdown;
pub use mapstore::{LookupError, MapStore, RoleMapping, UserMapping};
pub use sync::{SyncConfig, SyncEngine, SyncError, RESOURCE_NAME};
