//! Persistence contracts and implementations.
//!
//! # Responsibility
//! - Define the key-value contract persisted state is written through.
//! - Isolate SQL and JSON encoding details from the milestone tracker.
//!
//! # Invariants
//! - A write replaces the stored value for its key wholesale.
//! - Reading milestones never fails; corrupt data degrades to an empty set.

pub mod kv_repo;
pub mod milestone_repo;
