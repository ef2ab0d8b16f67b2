//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! sync loop produces:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (watch-health gauge)
//!
//! Consumers:
//!     → log aggregation (stdout)
//!     → Prometheus scrape of the exporter endpoint
//! ```
//!
//! # Design Decisions
//! - The watch-health gauge is the only externally observable health signal;
//!   lookups emit nothing (misses are normal operation)
//! - Metrics go through the `metrics` facade, so the sink is pluggable

pub mod logging;
pub mod metrics;
