//! Query Engine Module
//!
//! Answers the three supported query shapes over an immutable snapshot of the
//! award records.
//!
//! ## Overview
//! Queries resolve candidates through the secondary index and then verify them
//! against case-folded copies of the recipient fields, so no raw text is
//! re-folded at query time.
//!
//! ## Submodules
//! - **`tokenizer`**: case folding and alphanumeric tokenization shared by index and queries.
//! - **`index`**: year (ordered), category, name and rationale-term postings.
//! - **`engine`**: the three query operations and their post-filter verification.
//! - **`snapshot`**: store + index published as one unit, swapped atomically on reload.
//! - **`types`**: validated query inputs (`Category`, `YearRange`, `Keyword`, `FullName`) and results.

pub mod engine;
pub mod index;
pub mod snapshot;
pub mod tokenizer;
pub mod types;

#[cfg(test)]
mod tests;
