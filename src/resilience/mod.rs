//! Resilience subsystem.
//!
//! # Design Decisions
//! - Reconnect delays grow exponentially and are capped, with jitter so a
//!   fleet of processes does not hammer the backend in lockstep
//! - The initial watch-open is deliberately not retried (see sync::engine)

pub mod backoff;
