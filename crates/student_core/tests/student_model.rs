use student_core::{Gender, Student, StudentValidationError};

#[test]
fn new_student_is_transient() {
    let student = Student::new("Jamila", "jamila@gmail.com", Gender::Female);

    assert_eq!(student.id, None);
    assert!(!student.is_persisted());
    student.validate().unwrap();
}

#[test]
fn blank_name_is_rejected() {
    let student = Student::new("   ", "jamila@gmail.com", Gender::Female);
    assert_eq!(student.validate(), Err(StudentValidationError::EmptyName));
}

#[test]
fn non_positive_id_is_rejected() {
    let student = Student::with_id(0, "Jamila", "jamila@gmail.com", Gender::Female);
    assert_eq!(student.validate(), Err(StudentValidationError::InvalidId(0)));
}

#[test]
fn validation_does_not_normalize_email() {
    let student = Student::new("Jamila", "Jamila@Gmail.com", Gender::Female);
    student.validate().unwrap();
    assert_eq!(student.email, "Jamila@Gmail.com");
}

#[test]
fn serde_uses_uppercase_gender_and_omits_missing_id() {
    let transient = Student::new("Jamila", "jamila@gmail.com", Gender::Female);
    let json = serde_json::to_value(&transient).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "Jamila",
            "email": "jamila@gmail.com",
            "gender": "FEMALE"
        })
    );

    let persisted: Student = serde_json::from_str(
        r#"{"id":7,"name":"Alex","email":"alex@example.com","gender":"MALE"}"#,
    )
    .unwrap();
    assert_eq!(
        persisted,
        Student::with_id(7, "Alex", "alex@example.com", Gender::Male)
    );
}

#[test]
fn serde_rejects_unknown_gender() {
    let result = serde_json::from_str::<Student>(
        r#"{"name":"Alex","email":"alex@example.com","gender":"OTHER"}"#,
    );
    assert!(result.is_err());
}
