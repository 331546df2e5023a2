//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace span, timeout)
//!     → capture.rs (/log)   → request.rs (headers + body → RequestRecord) → store.insert
//!     → health (/health)    → store.ping
//!     → response.rs (static plain-text failures)
//!     → Send to client
//! ```

pub mod capture;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
