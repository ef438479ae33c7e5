use super::*;
use serde_json::json;

fn object(value: &Value) -> &Object {
    as_object(value).expect("object")
}

#[test]
fn non_object_payload_is_rejected() {
    assert_eq!(as_object(&json!("Taro")), Err(ValidationError::NotAnObject));
    assert_eq!(as_object(&Value::Null), Err(ValidationError::NotAnObject));
    assert_eq!(as_object(&json!([1, 2])), Err(ValidationError::NotAnObject));
}

#[test]
fn required_string_rejects_missing_blank_and_non_string() {
    let payload = json!({ "blank": "   ", "number": 42 });
    let obj = object(&payload);
    for field in ["missing", "blank", "number"] {
        assert_eq!(
            required_string(obj, field),
            Err(ValidationError::Required { field })
        );
    }
}

#[test]
fn required_string_keeps_value_untrimmed() {
    let payload = json!({ "name": " Taro " });
    assert_eq!(required_string(object(&payload), "name").as_deref(), Ok(" Taro "));
}

#[test]
fn optional_string_checks_type_only_when_present() {
    let payload = json!({ "name": "Taro", "email": 7, "nick": null });
    let obj = object(&payload);
    assert_eq!(optional_string(obj, "name"), Ok(Some("Taro".to_string())));
    assert_eq!(optional_string(obj, "nick"), Ok(None));
    assert_eq!(optional_string(obj, "absent"), Ok(None));
    assert_eq!(
        optional_string(obj, "email").map_err(|e| e.to_string()),
        Err("email must be string".to_string())
    );
}

#[test]
fn optional_bool_rejects_strings() {
    let payload = json!({ "includeRoles": "yes", "flag": true });
    let obj = object(&payload);
    assert_eq!(optional_bool(obj, "flag"), Ok(Some(true)));
    assert_eq!(
        optional_bool(obj, "includeRoles").map_err(|e| e.to_string()),
        Err("includeRoles must be boolean".to_string())
    );
}

#[test]
fn optional_page_requires_positive_integer() {
    let payload = json!({ "ok": 3, "zero": 0, "negative": -1, "fraction": 1.5, "text": "2" });
    let obj = object(&payload);
    assert_eq!(optional_page(obj, "ok"), Ok(Some(3)));
    assert_eq!(optional_page(obj, "absent"), Ok(None));
    for field in ["zero", "negative", "fraction", "text"] {
        assert!(optional_page(obj, field).is_err(), "{field} should be rejected");
    }
}

#[test]
fn check_page_only_rejects_zero() {
    assert_eq!(check_page(None, "page"), Ok(None));
    assert_eq!(check_page(Some(2), "page"), Ok(Some(2)));
    assert!(check_page(Some(0), "page").is_err());
}

#[test]
fn page_errors_read_the_same_from_payload_and_form() {
    let payload = json!({ "page": 0 });
    let from_payload = optional_page(object(&payload), "page").unwrap_err();
    let from_form = check_page(Some(0), "page").unwrap_err();
    assert_eq!(from_payload, from_form);
    assert_eq!(from_form.to_string(), "page must be a positive integer");
}
