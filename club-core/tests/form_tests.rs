use club_core::view::*;
use pretty_assertions::assert_eq;
use regex::Regex;
use rstest::rstest;
use std::collections::BTreeMap;

fn values(pairs: &[(&str, FieldValue)]) -> BTreeMap<String, FieldValue> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn player_rules() -> ValidationRules {
    ValidationRules::new()
        .field("name", ValidationRule::new().required().min_length(3).max_length(10))
        .field("age", ValidationRule::new().min(0.0).max(100.0))
        .field(
            "phone",
            ValidationRule::new().pattern(Regex::new(r"^\d{7,10}$").unwrap()),
        )
}

fn player_form() -> FormValidator {
    FormValidator::new(
        values(&[
            ("name", "".into()),
            ("age", 20.into()),
            ("nickname", "whatever".into()),
        ]),
        player_rules(),
    )
}

// ===== validate_field =====

#[test]
fn test_required_empty_string() {
    let form = FormValidator::new(
        BTreeMap::new(),
        ValidationRules::new().field("name", ValidationRule::new().required()),
    );
    assert_eq!(
        form.validate_field("name", &"".into()).as_deref(),
        Some("This field is required")
    );
    assert_eq!(form.validate_field("name", &"Ana".into()), None);
}

#[rstest]
#[case("ab", Some("Must be at least 3 characters"))]
#[case("abc", None)]
#[case("abcdefghij", None)]
#[case("abcdefghijk", Some("Must be at most 10 characters"))]
fn test_length_rules(#[case] input: &str, #[case] expected: Option<&str>) {
    let form = player_form();
    assert_eq!(form.validate_field("name", &input.into()).as_deref(), expected);
}

#[rstest]
#[case(150.0, Some("Must be less than or equal to 100"))]
#[case(-1.0, Some("Must be greater than or equal to 0"))]
#[case(50.0, None)]
#[case(100.0, None)]
fn test_numeric_rules(#[case] input: f64, #[case] expected: Option<&str>) {
    let form = player_form();
    assert_eq!(form.validate_field("age", &input.into()).as_deref(), expected);
}

#[test]
fn test_pattern_rule() {
    let form = player_form();
    assert_eq!(
        form.validate_field("phone", &"12ab".into()).as_deref(),
        Some("Invalid format")
    );
    assert_eq!(form.validate_field("phone", &"3001234567".into()), None);
}

#[test]
fn test_empty_optional_field_skips_checks() {
    let form = player_form();
    assert_eq!(form.validate_field("phone", &"".into()), None);
    assert_eq!(form.validate_field("phone", &FieldValue::Empty), None);
}

#[test]
fn test_unruled_field_never_errors() {
    let form = player_form();
    assert_eq!(form.validate_field("nickname", &"".into()), None);
    assert_eq!(form.validate_field("nickname", &FieldValue::Number(-5.0)), None);
}

#[test]
fn test_rule_type_gating() {
    // Length rules never apply to numbers, range rules never apply to text.
    let form = FormValidator::new(
        BTreeMap::new(),
        ValidationRules::new()
            .field("code", ValidationRule::new().min_length(5).min(10.0)),
    );
    assert_eq!(form.validate_field("code", &FieldValue::Number(3.0)).as_deref(), Some("Must be greater than or equal to 10"));
    assert_eq!(form.validate_field("code", &"1".into()).as_deref(), Some("Must be at least 5 characters"));
    assert_eq!(form.validate_field("code", &FieldValue::Bool(true)), None);
}

#[test]
fn test_custom_validator_runs_last() {
    let rules = ValidationRules::new().field(
        "email",
        ValidationRule::new()
            .required()
            .custom(|value| match value.as_text() {
                Some(text) if !text.contains('@') => Some("Invalid email".to_string()),
                _ => None,
            }),
    );
    let form = FormValidator::new(BTreeMap::new(), rules);

    assert_eq!(form.validate_field("email", &"".into()).as_deref(), Some("This field is required"));
    assert_eq!(form.validate_field("email", &"nope".into()).as_deref(), Some("Invalid email"));
    assert_eq!(form.validate_field("email", &"a@b.co".into()), None);
}

// ===== Stateful operations =====

#[test]
fn test_set_value_untouched_does_not_validate() {
    let mut form = player_form();
    form.set_value("name", "ab");
    assert_eq!(form.value("name"), &FieldValue::from("ab"));
    assert!(form.errors().is_empty());
}

#[test]
fn test_set_touched_validates_current_value() {
    let mut form = player_form();
    form.set_touched("name");
    assert!(form.is_touched("name"));
    assert_eq!(form.error("name"), Some("This field is required"));
}

#[test]
fn test_set_value_after_touch_revalidates() {
    let mut form = player_form();
    form.set_touched("name");
    form.set_value("name", "ab");
    assert_eq!(form.error("name"), Some("Must be at least 3 characters"));

    form.set_value("name", "Carlos");
    assert_eq!(form.error("name"), None);
    assert!(form.is_valid());
}

#[test]
fn test_validate_all_one_failing_one_passing() {
    let rules = ValidationRules::new()
        .field("name", ValidationRule::new().required())
        .field("age", ValidationRule::new().min(0.0).max(100.0));
    let mut form = FormValidator::new(values(&[("name", "".into()), ("age", 50.into())]), rules);

    assert!(!form.validate_all());
    assert_eq!(form.errors().len(), 1);
    assert!(form.error("name").is_some());
}

#[test]
fn test_validate_all_replaces_previous_errors() {
    let mut form = player_form();
    form.set_touched("phone");
    form.set_value("phone", "bad");
    assert!(form.error("phone").is_some());

    form.set_value("phone", "3001234567");
    form.set_value("name", "Carlos");
    assert!(form.validate_all());
    assert!(form.errors().is_empty());
}

#[test]
fn test_validate_all_checks_missing_ruled_fields() {
    let rules = ValidationRules::new().field("email", ValidationRule::new().required());
    let mut form = FormValidator::new(BTreeMap::new(), rules);
    assert!(!form.validate_all());
    assert_eq!(form.error("email"), Some("This field is required"));
}

#[test]
fn test_reset_restores_initial_values() {
    let mut form = player_form();
    let initial = form.values().clone();

    form.set_touched("name");
    form.set_value("name", "x");
    form.set_value("age", 500);
    form.validate_all();

    form.reset(None);
    assert_eq!(form.values(), &initial);
    assert!(form.errors().is_empty());
    assert!(form.touched().is_empty());
}

#[test]
fn test_reset_with_overrides_merges_over_initial() {
    let mut form = player_form();
    form.set_value("age", 99);
    form.set_value("nickname", "changed");

    form.reset(Some(values(&[("name", "Laura".into())])));

    assert_eq!(form.value("name"), &FieldValue::from("Laura"));
    assert_eq!(form.value("age"), &FieldValue::Number(20.0));
    assert_eq!(form.value("nickname"), &FieldValue::from("whatever"));
}

#[test]
fn test_stateless_rules_validate() {
    let errors = player_rules().validate(&values(&[
        ("name", "Jo".into()),
        ("age", 30.into()),
        ("phone", "x".into()),
    ]));
    let expected: FieldErrors = [
        ("name".to_string(), "Must be at least 3 characters".to_string()),
        ("phone".to_string(), "Invalid format".to_string()),
    ]
    .into_iter()
    .collect();
    assert_eq!(errors, expected);
}
