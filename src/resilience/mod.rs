//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     → retries.rs (bounded connect loop, fixed spacing)
//!
//! Per request, store calls:
//!     → timeouts.rs (client-side deadline on insert/ping)
//! ```
//!
//! # Design Decisions
//! - Retries happen only before the listener is bound
//! - Every store call has a deadline
//! - Failed inserts are surfaced, not queued

pub mod retries;
pub mod timeouts;
