use crate::{
    domain::{ApplicationForm, FieldValue, FormField, GradeLevel, Stream},
    error::{failure_message, rejection_message, GENERIC_FAILURE_MESSAGE, SUBMISSION_FAILED_MESSAGE},
    protocol::{applications_url, CreateApplicationResponse, CONFIRMED_FALLBACK_ID},
    validation::IssueKind,
};

fn complete_form() -> ApplicationForm {
    ApplicationForm {
        full_name: "Asha Rao".into(),
        email: "asha@example.com".into(),
        phone: "9876543210".into(),
        consent: true,
        ..ApplicationForm::default()
    }
}

#[test]
fn default_form_matches_documented_defaults() {
    let form = ApplicationForm::default();
    assert_eq!(form.full_name, "");
    assert_eq!(form.grade_level, GradeLevel::Eleven);
    assert_eq!(form.stream, Stream::Pcm);
    assert_eq!(form.preferred_intake, "2025-26");
    assert!(!form.consent);
}

#[test]
fn form_serializes_with_exact_wire_keys() {
    let value = serde_json::to_value(ApplicationForm::default()).expect("serialize");
    let object = value.as_object().expect("object");

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    let mut expected: Vec<&str> = FormField::ALL.iter().map(|field| field.name()).collect();
    expected.sort_unstable();
    assert_eq!(keys, expected);

    assert_eq!(object["grade_level"], "11");
    assert_eq!(object["stream"], "PCM");
    assert_eq!(object["consent"], false);
}

#[test]
fn enum_options_use_display_strings_on_the_wire() {
    let form = ApplicationForm {
        grade_level: GradeLevel::GapYear,
        stream: Stream::Pcmb,
        ..ApplicationForm::default()
    };
    let value = serde_json::to_value(&form).expect("serialize");
    assert_eq!(value["grade_level"], "Gap Year");
    assert_eq!(value["stream"], "PCMB");
}

#[test]
fn grade_level_parses_exact_wire_values_only() {
    assert_eq!("12".parse::<GradeLevel>(), Ok(GradeLevel::Twelve));
    assert_eq!("Gap Year".parse::<GradeLevel>(), Ok(GradeLevel::GapYear));
    assert!("Class 11".parse::<GradeLevel>().is_err());
    assert!("gap year".parse::<GradeLevel>().is_err());
    assert!(" 12 ".parse::<GradeLevel>().is_err());
    assert!("13".parse::<GradeLevel>().is_err());
}

#[test]
fn stream_parses_exact_wire_values_only() {
    assert_eq!("PCMB".parse::<Stream>(), Ok(Stream::Pcmb));
    assert_eq!("Arts".parse::<Stream>(), Ok(Stream::Arts));
    assert!("pcmb".parse::<Stream>().is_err());
    assert!(" Arts ".parse::<Stream>().is_err());
    assert!("Biology".parse::<Stream>().is_err());
}

#[test]
fn accepted_option_values_read_back_unchanged() {
    let mut form = ApplicationForm::default();
    for level in GradeLevel::ALL {
        assert!(form.apply(FormField::GradeLevel, level.as_str().into()));
        assert_eq!(form.value(FormField::GradeLevel), FieldValue::from(level.as_str()));
    }
    assert!(!form.apply(FormField::Stream, "pcm".into()));
    assert_eq!(form.value(FormField::Stream), FieldValue::from("PCM"));
}

#[test]
fn apply_replaces_only_the_named_field() {
    let mut form = complete_form();
    let before = form.clone();

    assert!(form.apply(FormField::City, "Pune".into()));
    assert_eq!(form.city, "Pune");
    assert_eq!(
        ApplicationForm {
            city: before.city.clone(),
            ..form.clone()
        },
        before
    );
}

#[test]
fn apply_rejects_mismatched_value_kinds() {
    let mut form = ApplicationForm::default();
    assert!(!form.apply(FormField::Consent, "yes".into()));
    assert!(!form.apply(FormField::FullName, FieldValue::Flag(true)));
    assert!(!form.apply(FormField::Stream, "Biology".into()));
    assert_eq!(form, ApplicationForm::default());
}

#[test]
fn value_reads_back_what_apply_wrote() {
    let mut form = ApplicationForm::default();
    form.apply(FormField::GradeLevel, "Other".into());
    form.apply(FormField::Consent, true.into());
    assert_eq!(form.value(FormField::GradeLevel), FieldValue::Text("Other".into()));
    assert_eq!(form.value(FormField::Consent), FieldValue::Flag(true));
}

#[test]
fn field_names_round_trip_and_unknown_is_none() {
    for field in FormField::ALL {
        assert_eq!(FormField::from_name(field.name()), Some(field));
    }
    assert_eq!(FormField::from_name("nonexistent"), None);
    assert_eq!(FormField::from_name("Full_Name"), None);
}

#[test]
fn validate_accepts_complete_form() {
    assert!(complete_form().is_submittable());
}

#[test]
fn validate_reports_missing_required_fields_and_consent() {
    let issues = ApplicationForm::default().validate();
    let reported: Vec<(FormField, IssueKind)> =
        issues.iter().map(|issue| (issue.field, issue.kind)).collect();
    assert_eq!(
        reported,
        vec![
            (FormField::FullName, IssueKind::Missing),
            (FormField::Email, IssueKind::Missing),
            (FormField::Phone, IssueKind::Missing),
            (FormField::Consent, IssueKind::ConsentRequired),
        ]
    );
}

#[test]
fn validate_flags_malformed_email() {
    for email in ["asha", "asha@", "@example.com", "asha @example.com", "a@b@c"] {
        let form = ApplicationForm {
            email: email.into(),
            ..complete_form()
        };
        let issues = form.validate();
        assert_eq!(issues.len(), 1, "email {email:?}");
        assert_eq!(issues[0].kind, IssueKind::InvalidEmail);
        assert_eq!(issues[0].to_string(), "email is not a valid email address");
    }
}

#[test]
fn applications_url_joins_base_without_double_slash() {
    assert_eq!(applications_url(""), "/api/applications");
    assert_eq!(
        applications_url("https://admissions.example.edu/"),
        "https://admissions.example.edu/api/applications"
    );
}

#[test]
fn confirmation_id_accepts_strings_and_numbers() {
    let text = CreateApplicationResponse::from_body(r#"{"id":"APP123"}"#).expect("text id");
    assert_eq!(text.confirmation_id(), "APP123");

    let number = CreateApplicationResponse::from_body(r#"{"id":42,"status":"received"}"#)
        .expect("numeric id");
    assert_eq!(number.confirmation_id(), "42");
}

#[test]
fn confirmation_id_falls_back_when_absent() {
    for body in [
        "{}",
        r#"{"id":null}"#,
        r#"{"id":""}"#,
        r#"{"id":true}"#,
        r#"{"id":{"n":1}}"#,
        r#"{"id":["APP1"]}"#,
        "[1, 2]",
        "\"received\"",
    ] {
        let response = CreateApplicationResponse::from_body(body).expect("parse");
        assert_eq!(response.confirmation_id(), CONFIRMED_FALLBACK_ID, "body {body}");
    }
}

#[test]
fn success_body_that_is_not_json_is_an_error() {
    assert!(CreateApplicationResponse::from_body("thanks!").is_err());
    assert!(CreateApplicationResponse::from_body("").is_err());
}

#[test]
fn failure_messages_fall_back_on_blank_detail() {
    assert_eq!(rejection_message("Invalid phone"), "Invalid phone");
    assert_eq!(rejection_message("  \n"), SUBMISSION_FAILED_MESSAGE);
    assert_eq!(
        rejection_message("  Invalid phone: expected 10 digits\n"),
        "  Invalid phone: expected 10 digits\n"
    );
    assert_eq!(failure_message("connection refused"), "connection refused");
    assert_eq!(failure_message(""), GENERIC_FAILURE_MESSAGE);
}
