//! Person use-case service.
//!
//! # Responsibility
//! - Provide validated CRUD entry points over a `PersonRepository`.
//! - Layer derived use-cases: random batch generation, age-filtered name
//!   lookup and the marriage name merge.
//!
//! # Invariants
//! - Repository errors are returned unchanged; the service never translates
//!   or swallows them.
//! - Argument checks run before any repository call, so a rejected call
//!   leaves the store untouched.
//! - Batch generation is not transactional: records added before a failure
//!   stay in the repository.

use crate::model::person::{Person, MAX_NAME_CHARS};
use crate::repo::person_repo::{ensure_not_blank, PersonRepository, RepoError, RepoResult};
use crate::service::random::{RandomSource, ThreadRandom};
use chrono::{DateTime, Months, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Oldest age the generator accepts as an upper bound, in years.
pub const MAX_GENERATED_AGE_YEARS: u32 = 150;

const DEFAULT_NAME_POOL: [&str; 5] = ["Alice", "Bob", "Charlie", "Diana", "Ethan"];

/// Inputs for random person generation.
///
/// Ages are drawn uniformly from `[min_age_years, max_age_years)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Names picked uniformly for generated persons.
    pub names: Vec<String>,
    /// Inclusive lower age bound.
    pub min_age_years: u32,
    /// Exclusive upper age bound.
    pub max_age_years: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            names: DEFAULT_NAME_POOL.iter().map(|name| name.to_string()).collect(),
            min_age_years: 18,
            max_age_years: 85,
        }
    }
}

impl GeneratorConfig {
    /// Checks that the pool is usable and the age window is non-empty.
    pub fn validate(&self) -> RepoResult<()> {
        if self.names.is_empty() {
            return Err(RepoError::invalid_argument(
                "names",
                "name pool cannot be empty",
            ));
        }
        if u32::try_from(self.names.len()).is_err() {
            return Err(RepoError::invalid_argument("names", "name pool is too large"));
        }
        for name in &self.names {
            if name.trim().is_empty() || name.chars().count() > MAX_NAME_CHARS {
                return Err(RepoError::invalid_argument(
                    "names",
                    format!("pool entry `{name}` is not a valid person name"),
                ));
            }
        }
        if self.min_age_years >= self.max_age_years {
            return Err(RepoError::invalid_argument(
                "min_age_years",
                format!(
                    "must be below max_age_years ({} >= {})",
                    self.min_age_years, self.max_age_years
                ),
            ));
        }
        if self.max_age_years > MAX_GENERATED_AGE_YEARS {
            return Err(RepoError::invalid_argument(
                "max_age_years",
                format!("must be at most {MAX_GENERATED_AGE_YEARS}"),
            ));
        }
        Ok(())
    }
}

/// Use-case service wrapper for person operations.
pub struct PersonService<R: PersonRepository, G: RandomSource = ThreadRandom> {
    repo: R,
    random: G,
    generator: GeneratorConfig,
}

impl<R: PersonRepository> PersonService<R> {
    /// Creates a service using system randomness and the default generator.
    pub fn new(repo: R) -> Self {
        Self::with_random(repo, ThreadRandom)
    }
}

impl<R: PersonRepository, G: RandomSource> PersonService<R, G> {
    /// Creates a service with a caller-supplied random source.
    pub fn with_random(repo: R, random: G) -> Self {
        Self {
            repo,
            random,
            generator: GeneratorConfig::default(),
        }
    }

    /// Creates a service with a custom generator configuration.
    ///
    /// # Errors
    /// - `InvalidArgument` when `generator` fails [`GeneratorConfig::validate`].
    pub fn with_generator(repo: R, random: G, generator: GeneratorConfig) -> RepoResult<Self> {
        generator.validate()?;
        Ok(Self {
            repo,
            random,
            generator,
        })
    }

    /// Read-only access to the wrapped repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Adds one person through the repository.
    pub fn add_person(&mut self, person: Person) -> RepoResult<()> {
        let id = person.id().clone();
        let result = self.repo.add(person);
        log_outcome("person_add", &result);
        if result.is_ok() {
            debug!("event=person_add module=service status=ok id={id}");
        }
        result
    }

    /// Gets one person by id.
    pub fn get_person_by_id(&self, id: &str) -> RepoResult<Person> {
        let result = ensure_not_blank("id", id).and_then(|()| self.repo.get_by_id(id));
        log_outcome("person_get", &result);
        result
    }

    /// Lists every stored person in insertion order.
    pub fn get_all_persons(&self) -> RepoResult<Vec<Person>> {
        let result = self.repo.get_all();
        log_outcome("person_list", &result);
        result
    }

    /// Finds persons whose name matches ignoring case.
    pub fn get_person_by_name(&self, name: &str) -> RepoResult<Vec<Person>> {
        let result = ensure_not_blank("name", name).and_then(|()| self.repo.find_by_name(name));
        log_outcome("person_find_by_name", &result);
        result
    }

    /// Replaces an existing person record.
    ///
    /// Returns repository-level not-found errors unchanged.
    pub fn update_person(&mut self, person: Person) -> RepoResult<()> {
        let id = person.id().clone();
        let result = self.repo.update(person);
        log_outcome("person_update", &result);
        if result.is_ok() {
            debug!("event=person_update module=service status=ok id={id}");
        }
        result
    }

    /// Deletes one person by id.
    pub fn delete_person(&mut self, id: &str) -> RepoResult<()> {
        let result = ensure_not_blank("id", id).and_then(|()| self.repo.delete(id));
        log_outcome("person_delete", &result);
        if result.is_ok() {
            debug!("event=person_delete module=service status=ok id={id}");
        }
        result
    }

    /// Generates `count` random persons, adds each, and returns the batch.
    ///
    /// # Contract
    /// - `count == 0` is rejected before anything is generated.
    /// - Names come from the configured pool; ages are whole calendar years
    ///   in the configured half-open window.
    /// - Stops at the first failed add; earlier adds are kept.
    pub fn generate_and_add_random_persons(&mut self, count: usize) -> RepoResult<Vec<Person>> {
        if count == 0 {
            let err = RepoError::invalid_argument("count", "must be greater than zero");
            warn!(
                "event=person_generate module=service status=error kind={}",
                err.kind()
            );
            return Err(err);
        }

        let now = Utc::now();
        let mut persons = Vec::with_capacity(count);
        for _ in 0..count {
            let result = self
                .generate_person(now)
                .and_then(|person| self.repo.add(person.clone()).map(|()| person));
            log_outcome("person_generate", &result);
            persons.push(result?);
        }

        debug!("event=person_generate module=service status=ok count={count}");
        Ok(persons)
    }

    /// Finds persons by name who are at least `min_age` years old.
    ///
    /// A person qualifies when `date_of_birth + min_age years <= now`.
    pub fn get_persons_by_name_and_age(&self, name: &str, min_age: i32) -> RepoResult<Vec<Person>> {
        let result = self.persons_by_name_and_age(name, min_age, Utc::now());
        log_outcome("person_find_by_name_and_age", &result);
        result
    }

    /// Appends the partner's name to the person's name and persists it.
    ///
    /// The merged name is stored exactly as `"<person> <partner>"`, without
    /// name validation. The partner record is only read.
    pub fn merge_on_marriage(&mut self, person_id: &str, partner_id: &str) -> RepoResult<Person> {
        let result = self.merge_names(person_id, partner_id);
        log_outcome("person_merge_on_marriage", &result);
        if result.is_ok() {
            debug!(
                "event=person_merge_on_marriage module=service status=ok id={person_id} partner_id={partner_id}"
            );
        }
        result
    }

    fn persons_by_name_and_age(
        &self,
        name: &str,
        min_age: i32,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<Person>> {
        ensure_not_blank("name", name)?;
        let min_age = u32::try_from(min_age)
            .map_err(|_| RepoError::invalid_argument("min_age", "age cannot be negative"))?;

        let mut persons = self.repo.find_by_name(name)?;
        persons.retain(|person| person.is_at_least_years_old(min_age, now));
        Ok(persons)
    }

    fn merge_names(&mut self, person_id: &str, partner_id: &str) -> RepoResult<Person> {
        ensure_not_blank("person_id", person_id)?;
        ensure_not_blank("partner_id", partner_id)?;

        let person = self.repo.get_by_id(person_id)?;
        let partner = self.repo.get_by_id(partner_id)?;

        // Both names come from stored records, so the merge is a rehydration.
        let merged = Person::rehydrate(
            person.id().clone(),
            format!("{} {}", person.name(), partner.name()),
            person.date_of_birth(),
        );
        self.repo.update(merged.clone())?;
        Ok(merged)
    }

    fn generate_person(&mut self, now: DateTime<Utc>) -> RepoResult<Person> {
        // `GeneratorConfig::validate` guarantees the pool length fits in u32.
        let pool_len = self.generator.names.len() as u32;
        let index = self.random.gen_range(0, pool_len) as usize;
        let name = self.generator.names.get(index).cloned().ok_or_else(|| {
            RepoError::invalid_argument("random", "source returned an index outside the name pool")
        })?;

        let age = self.random.gen_range(
            self.generator.min_age_years,
            self.generator.max_age_years,
        );
        let date_of_birth = now
            .checked_sub_months(Months::new(age * 12))
            .ok_or_else(|| {
                RepoError::invalid_argument("age", format!("{age} years is out of range"))
            })?;

        Ok(Person::new(name, date_of_birth)?)
    }
}

fn log_outcome<T>(event: &str, result: &RepoResult<T>) {
    if let Err(err) = result {
        warn!(
            "event={event} module=service status=error kind={}",
            err.kind()
        );
    }
}
