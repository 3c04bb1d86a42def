//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Own the randomness seam used for generated records.

pub mod person_service;
pub mod random;
