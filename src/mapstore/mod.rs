//! Identity mapping store subsystem.
//!
//! # Data Flow
//! ```text
//! raw resource fields (mapUsers / mapRoles / mapAccounts)
//!     → parser.rs (per-field YAML parse, errors aggregated)
//!     → typed record lists
//!     → store.rs (build Snapshot off-lock, atomic swap)
//!     → lookup callers observe the new snapshot
//! ```
//!
//! # Design Decisions
//! - A Snapshot is immutable once built; updates replace the whole thing
//! - One field failing to parse never discards the other fields
//! - User/role keys are lowercased so lookups are case-insensitive;
//!   account IDs match exactly

pub mod parser;
pub mod records;
pub mod store;

pub use records::{RoleMapping, UserMapping};
pub use store::{LookupError, MapStore};
