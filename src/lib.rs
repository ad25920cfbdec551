//! Laureate Query Service Library
//!
//! Parameterized lookups over a small, read-only dataset of award records:
//! counts by category and year range, counts by rationale keyword, and prize
//! details by recipient name.
//!
//! ## Architecture Modules
//! - **`storage`**: the Record Store holding one document per award with its nested recipients.
//! - **`search`**: the Index (year, category, name and rationale postings) and the Query Engine,
//!   published together as an immutable snapshot.
//! - **`service`**: the Service Boundary. One `LaureateService` contract with an in-process
//!   binding and an HTTP/JSON binding, plus the axum server.
//! - **`ingestion`**: loads the public prize feed into a Record Store.
//! - **`config`** and **`error`**: explicit configuration and the error taxonomy.

pub mod config;
pub mod error;
pub mod ingestion;
pub mod search;
pub mod service;
pub mod storage;
