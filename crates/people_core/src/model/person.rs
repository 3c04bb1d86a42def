//! Person domain model.
//!
//! # Responsibility
//! - Define the canonical person record stored by repositories.
//! - Keep validated construction separate from trusted rehydration.
//!
//! # Invariants
//! - `id` is assigned once and never changes for the record lifetime.
//! - Validated construction rejects blank or over-long names.
//! - Validated construction rejects birth dates strictly after "now".
//! - `date_of_birth` is immutable after construction.

use chrono::{DateTime, Datelike, Months, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Maximum accepted name length, in chars.
pub const MAX_NAME_CHARS: usize = 255;

/// Age applied by [`Person::with_default_birth`] when no birth date is given.
pub const DEFAULT_AGE_YEARS: u32 = 15;

/// Stable identifier for a person record.
///
/// Opaque string form so records rehydrated from external sources can keep
/// whatever identity they were stored with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    /// Generates a fresh UUID v4 identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether this id is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Display for PersonId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PersonId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PersonId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Validation failures raised while constructing or renaming a person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonValidationError {
    /// Name is empty or whitespace-only.
    BlankName,
    /// Name exceeds [`MAX_NAME_CHARS`].
    NameTooLong { chars: usize, max: usize },
    /// Birth date lies strictly after the construction instant.
    BirthDateInFuture {
        date_of_birth: DateTime<Utc>,
        now: DateTime<Utc>,
    },
}

impl Display for PersonValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "name cannot be null or empty"),
            Self::NameTooLong { chars, max } => {
                write!(f, "name has {chars} chars; at most {max} are allowed")
            }
            Self::BirthDateInFuture { date_of_birth, now } => write!(
                f,
                "date of birth {} cannot be in the future (now {})",
                date_of_birth.to_rfc3339(),
                now.to_rfc3339()
            ),
        }
    }
}

impl Error for PersonValidationError {}

/// Canonical person record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    id: PersonId,
    name: String,
    date_of_birth: DateTime<Utc>,
}

impl Person {
    /// Creates a validated person with a freshly generated id.
    ///
    /// Besides the blank-name and future-birth checks, names are also capped
    /// at [`MAX_NAME_CHARS`] chars.
    ///
    /// # Errors
    /// - `BlankName` / `NameTooLong` when `name` breaks name rules.
    /// - `BirthDateInFuture` when `date_of_birth` is after now.
    pub fn new(
        name: impl Into<String>,
        date_of_birth: DateTime<Utc>,
    ) -> Result<Self, PersonValidationError> {
        let name = name.into();
        validate_name(&name)?;

        let now = Utc::now();
        if date_of_birth > now {
            return Err(PersonValidationError::BirthDateInFuture { date_of_birth, now });
        }

        Ok(Self {
            id: PersonId::generate(),
            name,
            date_of_birth,
        })
    }

    /// Creates a validated person born [`DEFAULT_AGE_YEARS`] years ago.
    ///
    /// Legacy form kept for callers that never supplied a birth date. Prefer
    /// [`Person::new`] in new code.
    pub fn with_default_birth(name: impl Into<String>) -> Result<Self, PersonValidationError> {
        let now = Utc::now();
        let date_of_birth = now
            .checked_sub_months(Months::new(DEFAULT_AGE_YEARS * 12))
            .unwrap_or(now);
        Self::new(name, date_of_birth)
    }

    /// Rebuilds a person from already-trusted data.
    ///
    /// Used by import/storage paths where identity already exists. This
    /// constructor performs no validation; general callers must go through
    /// [`Person::new`].
    pub fn rehydrate(
        id: impl Into<PersonId>,
        name: impl Into<String>,
        date_of_birth: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date_of_birth,
        }
    }

    pub fn id(&self) -> &PersonId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date_of_birth(&self) -> DateTime<Utc> {
        self.date_of_birth
    }

    /// Replaces the name after checking the same rules as construction.
    ///
    /// On error the previous name is kept.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), PersonValidationError> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// Re-checks name rules on the current state.
    ///
    /// Birth date is not re-checked: "future" only has meaning at
    /// construction time.
    pub fn validate(&self) -> Result<(), PersonValidationError> {
        validate_name(&self.name)
    }

    /// Returns whether `date_of_birth + years <= now`.
    pub fn is_at_least_years_old(&self, years: u32, now: DateTime<Utc>) -> bool {
        years
            .checked_mul(12)
            .and_then(|months| self.date_of_birth.checked_add_months(Months::new(months)))
            .is_some_and(|threshold| threshold <= now)
    }

    /// Whole calendar years elapsed between birth and `now`.
    ///
    /// Returns 0 for birth dates after `now`.
    pub fn age_years_at(&self, now: DateTime<Utc>) -> u32 {
        let span = now.year() - self.date_of_birth.year();
        let Ok(mut years) = u32::try_from(span) else {
            return 0;
        };
        while years > 0 && !self.is_at_least_years_old(years, now) {
            years -= 1;
        }
        years
    }
}

fn validate_name(name: &str) -> Result<(), PersonValidationError> {
    if name.trim().is_empty() {
        return Err(PersonValidationError::BlankName);
    }

    let chars = name.chars().count();
    if chars > MAX_NAME_CHARS {
        return Err(PersonValidationError::NameTooLong {
            chars,
            max: MAX_NAME_CHARS,
        });
    }

    Ok(())
}
