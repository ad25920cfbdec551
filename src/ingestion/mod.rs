//! Ingestion Module
//!
//! Populates the Record Store from the public prize feed.
//!
//! ## Workflow
//! 1. **Download**: fetches the feed over HTTP, or reads a local copy of it.
//! 2. **Filter**: drops prizes outside the configured year bounds.
//! 3. **Normalize**: absent laureate lists and names become empty, quoted motivations are unwrapped.
//! 4. **Store**: builds a `RecordStore` in feed order (last write wins per category and year).

pub mod source;
pub mod types;
