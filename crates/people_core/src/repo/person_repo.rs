//! Person repository contracts and in-memory implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and name-lookup APIs over person records.
//! - Keep storage details behind the `PersonRepository` trait.
//!
//! # Invariants
//! - Stored ids are unique; `add` rejects a second record with the same id.
//! - Records keep insertion order; `update` replaces in place.
//! - Read paths hand out clones, never references into the store.

use crate::model::person::{Person, PersonId, PersonValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for person repository and service operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Entity construction or rename rules were violated.
    Validation(PersonValidationError),
    /// A call argument was malformed (blank id/name, bad count or age).
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },
    /// No record matched the requested id.
    NotFound(PersonId),
    /// A record with this id is already stored.
    Conflict(PersonId),
}

impl RepoError {
    pub(crate) fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }

    /// Stable short label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidArgument { argument, reason } => {
                write!(f, "invalid argument `{argument}`: {reason}")
            }
            Self::NotFound(id) => write!(f, "person not found: {id}"),
            Self::Conflict(id) => write!(f, "person already exists: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::InvalidArgument { .. } | Self::NotFound(_) | Self::Conflict(_) => None,
        }
    }
}

impl From<PersonValidationError> for RepoError {
    fn from(value: PersonValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Repository interface for person CRUD and lookup.
pub trait PersonRepository {
    /// Appends one person.
    fn add(&mut self, person: Person) -> RepoResult<()>;
    /// Returns the person with `id`.
    fn get_by_id(&self, id: &str) -> RepoResult<Person>;
    /// Returns a copy of every stored person in insertion order.
    fn get_all(&self) -> RepoResult<Vec<Person>>;
    /// Returns every person whose name matches `name` ignoring case.
    fn find_by_name(&self, name: &str) -> RepoResult<Vec<Person>>;
    /// Replaces the stored record that has the same id.
    fn update(&mut self, person: Person) -> RepoResult<()>;
    /// Removes the person with `id`.
    fn delete(&mut self, id: &str) -> RepoResult<()>;
}

/// List-backed person repository living for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPersonRepository {
    people: Vec<Person>,
}

impl InMemoryPersonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.people
            .iter()
            .position(|person| person.id().as_str() == id)
    }
}

impl PersonRepository for InMemoryPersonRepository {
    fn add(&mut self, person: Person) -> RepoResult<()> {
        if self.position_of(person.id().as_str()).is_some() {
            return Err(RepoError::Conflict(person.id().clone()));
        }

        self.people.push(person);
        Ok(())
    }

    fn get_by_id(&self, id: &str) -> RepoResult<Person> {
        ensure_not_blank("id", id)?;

        self.people
            .iter()
            .find(|person| person.id().as_str() == id)
            .cloned()
            .ok_or_else(|| RepoError::NotFound(PersonId::from(id)))
    }

    fn get_all(&self) -> RepoResult<Vec<Person>> {
        Ok(self.people.clone())
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Vec<Person>> {
        ensure_not_blank("name", name)?;

        Ok(self
            .people
            .iter()
            .filter(|person| names_match(person.name(), name))
            .cloned()
            .collect())
    }

    fn update(&mut self, person: Person) -> RepoResult<()> {
        let index = self
            .position_of(person.id().as_str())
            .ok_or_else(|| RepoError::NotFound(person.id().clone()))?;

        self.people[index] = person;
        Ok(())
    }

    fn delete(&mut self, id: &str) -> RepoResult<()> {
        ensure_not_blank("id", id)?;

        let index = self
            .position_of(id)
            .ok_or_else(|| RepoError::NotFound(PersonId::from(id)))?;

        self.people.remove(index);
        Ok(())
    }
}

/// Rejects empty or whitespace-only string arguments.
pub(crate) fn ensure_not_blank(argument: &'static str, value: &str) -> RepoResult<()> {
    if value.trim().is_empty() {
        return Err(RepoError::invalid_argument(
            argument,
            "cannot be null or empty",
        ));
    }
    Ok(())
}

/// Case-insensitive ordinal comparison using simple uppercase folding.
fn names_match(left: &str, right: &str) -> bool {
    left.chars()
        .flat_map(char::to_uppercase)
        .eq(right.chars().flat_map(char::to_uppercase))
}
