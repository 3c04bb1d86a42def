//! Core domain logic for the person store.
//! This crate is the single source of truth for person invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{init_logging, logging_status, LogLevel, LoggingConfig, LoggingError};
pub use model::person::{
    Person, PersonId, PersonValidationError, DEFAULT_AGE_YEARS, MAX_NAME_CHARS,
};
pub use repo::person_repo::{InMemoryPersonRepository, PersonRepository, RepoError, RepoResult};
pub use service::person_service::{GeneratorConfig, PersonService, MAX_GENERATED_AGE_YEARS};
pub use service::random::{RandomSource, SeededRandom, ThreadRandom};
