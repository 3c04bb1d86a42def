use chrono::{Duration, Months, Utc};
use people_core::{Person, PersonId, PersonValidationError, MAX_NAME_CHARS};
use proptest::prelude::*;
use std::collections::HashSet;
use uuid::Uuid;

#[test]
fn new_sets_name_birth_date_and_uuid_id() {
    let date_of_birth = Utc::now() - Duration::days(30 * 365);
    let person = Person::new("TestPerson", date_of_birth).unwrap();

    assert_eq!(person.name(), "TestPerson");
    assert_eq!(person.date_of_birth(), date_of_birth);
    assert!(!person.id().is_blank());
    assert!(Uuid::parse_str(person.id().as_str()).is_ok());
}

#[test]
fn default_birth_is_fifteen_years_ago() {
    let expected = Utc::now().checked_sub_months(Months::new(15 * 12)).unwrap();
    let person = Person::with_default_birth("TestPerson").unwrap();

    assert_eq!(person.name(), "TestPerson");
    assert_eq!(person.date_of_birth().date_naive(), expected.date_naive());
    assert_eq!(person.age_years_at(Utc::now()), 15);
}

#[test]
fn blank_names_are_rejected() {
    for name in ["", "   ", "\t\n"] {
        let err = Person::with_default_birth(name).unwrap_err();
        assert_eq!(err, PersonValidationError::BlankName, "name {name:?}");
    }
}

#[test]
fn over_long_name_is_rejected() {
    let name = "x".repeat(MAX_NAME_CHARS + 1);
    let err = Person::with_default_birth(name).unwrap_err();
    assert_eq!(
        err,
        PersonValidationError::NameTooLong {
            chars: MAX_NAME_CHARS + 1,
            max: MAX_NAME_CHARS,
        }
    );
}

#[test]
fn future_birth_date_is_rejected() {
    let tomorrow = Utc::now() + Duration::days(1);
    let err = Person::new("FuturePerson", tomorrow).unwrap_err();
    assert!(matches!(
        err,
        PersonValidationError::BirthDateInFuture { date_of_birth, .. } if date_of_birth == tomorrow
    ));
}

#[test]
fn generated_ids_are_unique() {
    let ids: HashSet<PersonId> = (0..100)
        .map(|_| Person::with_default_birth("Same").unwrap().id().clone())
        .collect();
    assert_eq!(ids.len(), 100);
}

#[test]
fn rename_changes_name() {
    let mut person = Person::with_default_birth("OriginalName").unwrap();
    person.rename("NewName").unwrap();
    assert_eq!(person.name(), "NewName");
}

#[test]
fn rename_rejects_blank_and_keeps_previous_name() {
    let mut person = Person::with_default_birth("OriginalName").unwrap();
    let id = person.id().clone();

    let err = person.rename("  ").unwrap_err();
    assert_eq!(err, PersonValidationError::BlankName);
    assert_eq!(person.name(), "OriginalName");
    assert_eq!(person.id(), &id);
}

#[test]
fn rehydrate_keeps_trusted_values_without_validation() {
    let tomorrow = Utc::now() + Duration::days(1);
    let person = Person::rehydrate("legacy-7", "", tomorrow);

    assert_eq!(person.id().as_str(), "legacy-7");
    assert_eq!(person.name(), "");
    assert_eq!(person.date_of_birth(), tomorrow);
    assert_eq!(person.validate(), Err(PersonValidationError::BlankName));
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let date_of_birth = "1990-06-15T08:30:00Z".parse().unwrap();
    let person = Person::rehydrate("11111111-2222-4333-8444-555555555555", "Alice", date_of_birth);

    let json = serde_json::to_value(&person).unwrap();
    assert_eq!(json["id"], "11111111-2222-4333-8444-555555555555");
    assert_eq!(json["name"], "Alice");
    assert_eq!(json["date_of_birth"], "1990-06-15T08:30:00Z");

    let decoded: Person = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, person);
}

proptest! {
    #[test]
    fn valid_inputs_are_stored_as_given(
        name in "[A-Za-z][A-Za-z ]{0,40}",
        days_ago in 0i64..40_000,
    ) {
        let date_of_birth = Utc::now() - Duration::days(days_ago);
        let person = Person::new(name.clone(), date_of_birth).unwrap();

        prop_assert_eq!(person.name(), name.as_str());
        prop_assert_eq!(person.date_of_birth().date_naive(), date_of_birth.date_naive());
        prop_assert!(Uuid::parse_str(person.id().as_str()).is_ok());
    }

    #[test]
    fn whitespace_names_always_fail(name in "[ \t\r\n]{0,12}") {
        let err = Person::new(name, Utc::now() - Duration::days(1)).unwrap_err();
        prop_assert_eq!(err, PersonValidationError::BlankName);
    }

    #[test]
    fn future_birth_dates_always_fail(seconds_ahead in 60i64..1_000_000_000) {
        let date_of_birth = Utc::now() + Duration::seconds(seconds_ahead);
        let err = Person::new("Alice", date_of_birth).unwrap_err();
        let is_future_error = matches!(err, PersonValidationError::BirthDateInFuture { .. });
        prop_assert!(is_future_error);
    }
}
