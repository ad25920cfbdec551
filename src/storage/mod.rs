//! Record Store Module
//!
//! Holds the denormalized award documents the query engine reads from.
//!
//! ## Core Concepts
//! - **AwardRecord**: one document per (category, year), carrying its nested recipients.
//! - **RecordId**: a dense slot number assigned in arrival order, so sorting ids yields dataset order.
//! - **Identity**: records are keyed by (lowercased category, year); re-inserting a key replaces
//!   the record in its existing slot (last write wins).
//! - **Access**: read-only after construction. There is no mutation API; a reload builds a new store.

pub mod memory;
pub mod types;
