//! Domain model for person records.
//!
//! # Responsibility
//! - Define canonical data structures used by repositories and services.
//!
//! # Invariants
//! - Every person is identified by a stable `PersonId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod person;
