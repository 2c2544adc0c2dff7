//! End-to-end processing of submitted data against a static form.

use dynaform_fields::{Arguments, DynamicFields, FieldsError, FormData};
use dynaform_forms::{FieldKind, FieldSpec, Form, FormInstance, Rule, ValidatorKind};
use serde_json::json;

type Fields = DynamicFields<FieldKind, ValidatorKind>;

fn simple_form() -> Form {
    Form::new()
        .field(
            FieldSpec::new("first_name", "First name", FieldKind::Text)
                .validator(Rule::input_required()),
        )
        .field(
            FieldSpec::new("last_name", "Last name", FieldKind::Text)
                .validator(Rule::input_required()),
        )
}

fn post() -> FormData {
    FormData::new()
        .with("first_name", "John")
        .with("last_name", "Doe")
}

fn required(message: &str) -> Arguments {
    Arguments::new().kwarg("message", message)
}

fn errors_of<'f>(form: &'f FormInstance, key: &str) -> Vec<&'f str> {
    form.errors()
        .get(key)
        .map(|errors| errors.iter().map(String::as_str).collect())
        .unwrap_or_default()
}

#[test_log::test]
fn single_field_without_validation() {
    let mut fields = Fields::new();
    fields
        .add_field("email", "Email", FieldKind::Text, Arguments::new())
        .unwrap();

    let form = fields
        .process(&simple_form(), &post().with("email", ""))
        .unwrap();

    let email = form.field("email").unwrap();
    assert_eq!(email.label(), "Email");
    assert_eq!(email.data(), &json!(""));
    assert!(email.validators().is_empty());
    assert_eq!(form.field_names(), ["first_name", "last_name", "email"]);
}

#[test_log::test]
fn single_field_with_validation_error() {
    let mut fields = Fields::new();
    fields
        .add_field("email", "Email", FieldKind::Text, Arguments::new())
        .unwrap();
    fields
        .add_validator("email", ValidatorKind::InputRequired, Arguments::new())
        .unwrap();

    let mut form = fields
        .process(&simple_form(), &post().with("email", ""))
        .unwrap();

    assert!(!form.validate());
    assert_eq!(errors_of(&form, "email"), ["This field is required."]);
}

#[test]
fn single_field_with_validation_success() {
    let mut fields = Fields::new();
    fields
        .add_field("email", "Email", FieldKind::Text, Arguments::new())
        .unwrap();
    fields
        .add_validator("email", ValidatorKind::InputRequired, Arguments::new())
        .unwrap();

    let mut form = fields
        .process(&simple_form(), &post().with("email", "foo"))
        .unwrap();

    assert!(form.validate());
    assert_eq!(form.data("email"), Some(&json!("foo")));
}

#[test]
fn sets_of_single_fields() {
    let mut fields = Fields::new();
    fields
        .add_field("email", "Email", FieldKind::Text, Arguments::new())
        .unwrap();
    fields
        .add_validator("email", ValidatorKind::InputRequired, Arguments::new())
        .unwrap();

    let data = post()
        .with("email_1", "one@mail.mock")
        .with("email_2", "two@mail.mock")
        .with("email_3", "three@mail.mock");
    let mut form = fields.process(&simple_form(), &data).unwrap();

    assert!(form.validate());
    assert_eq!(form.data("email_1"), Some(&json!("one@mail.mock")));
    assert_eq!(form.data("email_2"), Some(&json!("two@mail.mock")));
    assert_eq!(form.data("email_3"), Some(&json!("three@mail.mock")));
    assert!(!form.contains("email"));
    assert_eq!(form.field("email_2").unwrap().label(), "Email");
}

#[test]
fn sets_of_multiple_fields() {
    let mut fields = Fields::new();
    fields
        .add_field("email", "Email", FieldKind::Text, Arguments::new())
        .unwrap();
    fields
        .add_validator("email", ValidatorKind::InputRequired, Arguments::new())
        .unwrap();
    fields
        .add_field("telephone", "Telephone", FieldKind::Text, Arguments::new())
        .unwrap();
    fields
        .add_validator("telephone", ValidatorKind::InputRequired, Arguments::new())
        .unwrap();

    let data = post()
        .with("email_1", "one@mail.mock")
        .with("telephone_1", "14564678")
        .with("email_2", "two@mail.mock")
        .with("telephone_2", "64578952")
        .with("email_3", "three@mail.mock")
        .with("telephone_3", "31794561");
    let mut form = fields.process(&simple_form(), &data).unwrap();

    assert!(form.validate());
    assert_eq!(
        form.field_names(),
        [
            "first_name",
            "last_name",
            "email_1",
            "telephone_1",
            "email_2",
            "telephone_2",
            "email_3",
            "telephone_3",
        ]
    );
    assert_eq!(form.data("telephone_2"), Some(&json!("64578952")));
}

#[test]
fn placeholder_takes_the_set_number() {
    let mut fields = Fields::new();
    fields
        .add_field("email", "Email", FieldKind::Text, Arguments::new())
        .unwrap();
    fields
        .add_validator(
            "email",
            ValidatorKind::InputRequired,
            required("Please fill in %email%."),
        )
        .unwrap();

    let mut form = fields
        .process(&simple_form(), &post().with("email_1", ""))
        .unwrap();

    assert!(!form.validate());
    assert_eq!(errors_of(&form, "email_1"), ["Please fill in email_1."]);
}

#[test_log::test]
fn placeholders_resolve_unregistered_siblings() {
    let mut fields = Fields::new();
    fields
        .add_field("email", "Email", FieldKind::Text, Arguments::new())
        .unwrap();
    fields
        .add_validator(
            "email",
            ValidatorKind::InputRequired,
            required("Please fill in %telephone% or %pager%."),
        )
        .unwrap();
    fields
        .add_field("telephone", "Telephone", FieldKind::Text, Arguments::new())
        .unwrap();

    let data = post()
        .with("email_1", "")
        .with("telephone_1", "")
        .with("pager_1", "")
        .with("email_2", "")
        .with("telephone_2", "")
        .with("pager_2", "");
    let mut form = fields.process(&simple_form(), &data).unwrap();

    assert!(!form.validate());
    assert_eq!(
        errors_of(&form, "email_1"),
        ["Please fill in telephone_1 or pager_1."]
    );
    assert_eq!(
        errors_of(&form, "email_2"),
        ["Please fill in telephone_2 or pager_2."]
    );
    assert!(!form.contains("pager_1"));
    assert!(errors_of(&form, "telephone_1").is_empty());
}

#[test]
fn long_names_with_digits_and_underscores() {
    let message = "Please fill in %a_very_long_10_field_name% or %yet_another_34_long_2_name_10%.";
    let mut fields = Fields::new();
    for name in ["a_very_long_10_field_name", "yet_another_34_long_2_name_10"] {
        fields
            .add_field(
                name,
                "A very long field name",
                FieldKind::Text,
                Arguments::new(),
            )
            .unwrap();
        fields
            .add_validator(name, ValidatorKind::InputRequired, required(message))
            .unwrap();
    }

    let data = post()
        .with("a_very_long_10_field_name_1", "")
        .with("yet_another_34_long_2_name_10_1", "")
        .with("a_very_long_10_field_name_2", "")
        .with("yet_another_34_long_2_name_10_2", "");
    let mut form = fields.process(&simple_form(), &data).unwrap();

    assert!(!form.validate());
    let first = "Please fill in a_very_long_10_field_name_1 or yet_another_34_long_2_name_10_1.";
    let second = "Please fill in a_very_long_10_field_name_2 or yet_another_34_long_2_name_10_2.";
    assert_eq!(errors_of(&form, "a_very_long_10_field_name_1"), [first]);
    assert_eq!(errors_of(&form, "yet_another_34_long_2_name_10_1"), [first]);
    assert_eq!(errors_of(&form, "a_very_long_10_field_name_2"), [second]);
    assert_eq!(
        errors_of(&form, "yet_another_34_long_2_name_10_2"),
        [second]
    );
}

#[test]
fn canonical_key_keeps_placeholders_literal() {
    let mut fields = Fields::new();
    fields
        .add_field("email", "Email", FieldKind::Text, Arguments::new())
        .unwrap();
    fields
        .add_validator(
            "email",
            ValidatorKind::InputRequired,
            required("Please fill in %email%."),
        )
        .unwrap();

    let mut form = fields
        .process(&simple_form(), &post().with("email", ""))
        .unwrap();

    assert!(!form.validate());
    assert_eq!(errors_of(&form, "email"), ["Please fill in %email%."]);
}

#[test]
fn unrecognized_keys_are_dropped() {
    let mut fields = Fields::new();
    fields
        .add_field("email", "Email", FieldKind::Text, Arguments::new())
        .unwrap();

    let data = post()
        .with("csrf_token", "abc")
        .with("email_", "x")
        .with("email_x", "y")
        .with("phone_1", "z");
    let form = fields.process(&simple_form(), &data).unwrap();

    assert_eq!(form.field_names(), ["first_name", "last_name"]);
}

#[test]
fn static_fields_are_never_shadowed() {
    let mut fields = Fields::new();
    fields
        .add_field(
            "first_name",
            "Other first name",
            FieldKind::Text,
            Arguments::new(),
        )
        .unwrap();

    let form = fields.process(&simple_form(), &post()).unwrap();

    assert_eq!(form.len(), 2);
    assert_eq!(form.field("first_name").unwrap().label(), "First name");
}

#[test]
fn processing_twice_gives_independent_forms() {
    let mut fields = Fields::new();
    fields
        .add_field("email", "Email", FieldKind::Text, Arguments::new())
        .unwrap();
    fields
        .add_validator(
            "email",
            ValidatorKind::InputRequired,
            required("Please fill in %email%."),
        )
        .unwrap();

    let mut first = fields
        .process(&simple_form(), &post().with("email_1", ""))
        .unwrap();
    let mut second = fields
        .process(&simple_form(), &post().with("email_7", ""))
        .unwrap();

    assert!(!first.validate());
    assert!(!second.validate());
    assert_eq!(errors_of(&first, "email_1"), ["Please fill in email_1."]);
    assert_eq!(errors_of(&second, "email_7"), ["Please fill in email_7."]);
    assert!(!second.contains("email_1"));
}

#[test_log::test]
fn registrations_apply_only_to_later_processing() {
    let mut fields = Fields::new();
    fields
        .add_field("email", "Email", FieldKind::Text, Arguments::new())
        .unwrap();
    let data = post().with("email_1", "").with("phone_1", "");

    let mut first = fields.process(&simple_form(), &data).unwrap();

    fields
        .add_field("phone", "Phone", FieldKind::Text, Arguments::new())
        .unwrap();
    fields
        .add_validator(
            "email",
            ValidatorKind::InputRequired,
            required("need %phone%"),
        )
        .unwrap();
    let mut second = fields.process(&simple_form(), &data).unwrap();

    assert_eq!(first.field_names(), ["first_name", "last_name", "email_1"]);
    assert_eq!(
        second.field_names(),
        ["first_name", "last_name", "email_1", "phone_1"]
    );
    assert!(first.field("email_1").unwrap().validators().is_empty());

    assert!(first.validate());
    assert!(errors_of(&first, "email_1").is_empty());
    assert!(!second.validate());
    assert_eq!(errors_of(&second, "email_1"), ["need phone_1"]);
    assert_eq!(second.errors().len(), 1);
}

#[test]
fn construction_arguments_reach_every_occurrence() {
    let mut fields = Fields::new();
    fields
        .add_field(
            "country",
            "Country",
            FieldKind::Text,
            Arguments::new()
                .kwarg("default", "NL")
                .kwarg("description", "Two-letter code"),
        )
        .unwrap();

    let data = post().with("country_1", "BE").with("country_2", "");
    let form = fields.process(&simple_form(), &data).unwrap();

    for key in ["country_1", "country_2"] {
        assert_eq!(
            form.field(key).unwrap().description(),
            Some("Two-letter code")
        );
    }
    assert_eq!(form.data("country_1"), Some(&json!("BE")));
}

#[test]
fn pre_bound_schema_uses_its_own_request() {
    let mut fields = Fields::with_binding(dynaform_fields::BindingMode::PreBound);
    fields
        .add_field("email", "Email", FieldKind::Text, Arguments::new())
        .unwrap();

    let request = post().with("email_1", "bound@mail.mock");
    let schema = simple_form().bound_to(request.clone());

    let submitted = FormData::new().with("email_1", "ignored@mail.mock");
    let form = fields.process(&schema, &submitted).unwrap();

    assert_eq!(form.data("email_1"), Some(&json!("bound@mail.mock")));
    assert_eq!(form.data("first_name"), Some(&json!("John")));
}

#[test]
fn registry_errors() {
    let mut fields = Fields::new();

    let err = fields
        .add_validator("email", ValidatorKind::InputRequired, Arguments::new())
        .unwrap_err();
    assert!(matches!(err, FieldsError::UnknownField { ref name } if name == "email"));

    fields
        .add_field("email", "Email", FieldKind::Text, Arguments::new())
        .unwrap();
    let err = fields
        .add_field("email", "Other", FieldKind::Integer, Arguments::new())
        .unwrap_err();
    assert!(matches!(err, FieldsError::DuplicateField { ref name } if name == "email"));

    let template = fields.get("email").unwrap();
    assert_eq!(template.label(), "Email");
    assert_eq!(template.field_type(), &FieldKind::Text);
}

#[test]
fn bad_validator_arguments_surface_at_process() {
    let mut fields = Fields::new();
    fields
        .add_field(
            "middle_name",
            "Middle Name",
            FieldKind::Text,
            Arguments::new(),
        )
        .unwrap();
    fields
        .add_validator("middle_name", ValidatorKind::Length, Arguments::new())
        .unwrap();

    let err = fields
        .process(&simple_form(), &post().with("middle_name_1", "foo"))
        .unwrap_err();
    match err {
        FieldsError::ValidatorConstruction {
            field, validator, ..
        } => {
            assert_eq!(field, "middle_name_1");
            assert_eq!(validator, "length");
        }
        other => panic!("unexpected error: {other}"),
    }

    // No occurrence submitted, nothing constructed.
    assert!(fields.process(&simple_form(), &post()).is_ok());
}
