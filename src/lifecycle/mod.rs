//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! SIGTERM/SIGINT (signals.rs)
//!     → Shutdown::trigger (shutdown.rs)
//!     → sync loop observes the broadcast at its next checkpoint and exits
//! ```
//!
//! # Design Decisions
//! - One broadcast channel; any number of long-running tasks subscribe
//! - The sync loop is not interrupted mid-stream; shutdown takes effect at
//!   the next reconnect checkpoint

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
