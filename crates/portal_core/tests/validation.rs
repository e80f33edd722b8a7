use portal_core::{
    is_valid_email, is_valid_phone, validate_section, FieldKind, FieldDef, FormFields,
    FormLayout, SectionDef, ValidationReason,
};

#[test]
fn phone_separators_are_stripped() {
    assert!(is_valid_phone("98765 43210"));
    assert!(is_valid_phone("98765-43210"));
    assert!(is_valid_phone("+9876543210"));
    assert!(is_valid_phone("6000000000"));
}

#[test]
fn phone_must_start_with_six_to_nine_and_have_ten_digits() {
    assert!(!is_valid_phone("1234567890"));
    assert!(!is_valid_phone("5876543210"));
    assert!(!is_valid_phone("987654321"));
    assert!(!is_valid_phone("98765432100"));
    assert!(!is_valid_phone("98765abcde"));
    // Devanagari and Arabic-Indic digits are decimal digits, but not a dialable number.
    assert!(!is_valid_phone(
        "9\u{0968}\u{0969}\u{096A}\u{096B}\u{096C}\u{096D}\u{096E}\u{096F}\u{0966}"
    ));
    assert!(!is_valid_phone("98765\u{0669}3210"));
}

#[test]
fn email_is_a_shape_check() {
    assert!(is_valid_email("a@b.c"));
    assert!(is_valid_email("first.last@mail.example.in"));
    assert!(!is_valid_email("not-an-email"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("a b@c.d"));
}

#[test]
fn validation_stops_at_first_failure() {
    let layout = FormLayout::job_application();
    let personal = layout.section(1).unwrap();
    let fields = FormFields::from([
        ("fullName", "Asha Verma"),
        ("email", "not-an-email"),
        ("phone", "123"),
    ]);

    let err = validate_section(personal, &fields).unwrap_err();

    assert_eq!(err.field, "email");
    assert_eq!(err.reason, ValidationReason::InvalidEmail);
    assert_eq!(err.to_string(), "Please enter a valid email address");
}

#[test]
fn invalid_phone_is_reported_by_name() {
    let layout = FormLayout::job_application();
    let personal = layout.section(1).unwrap();
    let fields = FormFields::from([
        ("fullName", "Asha Verma"),
        ("email", "asha@example.in"),
        ("phone", "1234567890"),
        ("currentAddress", "Pune"),
    ]);

    let err = validate_section(personal, &fields).unwrap_err();

    assert_eq!(err.field, "phone");
    assert_eq!(
        err.message(),
        "Please enter a valid 10-digit Indian phone number"
    );
}

#[test]
fn optional_fields_are_skipped() {
    let layout = FormLayout::job_application();
    let skills = layout.section(5).unwrap();
    let fields = FormFields::from([("keySkills", "Welding"), ("finalDate", "2026-11-01")]);

    assert!(validate_section(skills, &fields).is_ok());
}

#[test]
fn email_kind_is_checked_regardless_of_field_name() {
    let section = SectionDef {
        title: "Referee",
        fields: vec![FieldDef {
            name: "refereeContact",
            label: "Referee Contact",
            kind: FieldKind::Email,
            required: true,
        }],
    };
    let fields = FormFields::from([("refereeContact", "nobody")]);

    let err = validate_section(&section, &fields).unwrap_err();
    assert_eq!(err.reason, ValidationReason::InvalidEmail);
}
