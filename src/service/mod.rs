//! Service Boundary Module
//!
//! Accepts the three laureate queries, validates them, runs them on the query
//! engine and shapes the responses. The same contract is offered in-process and
//! over HTTP.
//!
//! ## Submodules
//! - **`api`**: the `LaureateService` trait every caller programs against.
//! - **`local`**: in-process binding; owns validation and error mapping.
//! - **`remote`**: reqwest client binding with per-call deadlines and transport error classification.
//! - **`handlers`**: axum handlers wrapping `local` with a worker limit and server-side deadlines.
//! - **`server`**: router, listener lifecycle and periodic snapshot refresh.
//! - **`protocol`**: endpoints and DTOs shared by all of the above.

pub mod api;
pub mod handlers;
pub mod local;
pub mod protocol;
pub mod remote;
pub mod server;
