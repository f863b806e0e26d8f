//! Participant Storage Module
//!
//! Holds every accepted participant in memory and mirrors the collection to a
//! single JSON file.
//!
//! ## Core Concepts
//! - **Ordering**: Records are kept in insertion order; queries return them in that order.
//! - **Uniqueness**: Separate indexes for `p_no` and `mobile_no` back the dedup checks
//!   performed during ingestion.
//! - **Durability**: Every append rewrites the full snapshot. A missing or corrupt
//!   snapshot at startup yields an empty store instead of an error.
//! - **Sharing**: `SharedStore` wraps the store in a `tokio::sync::RwLock` so it can be
//!   injected into the HTTP handlers.

pub mod snapshot;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;
