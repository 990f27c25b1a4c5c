#![allow(non_snake_case)]

use super::*;

#[test]
fn engine_error___cancelled___display_message() {
    assert_eq!(EngineError::Cancelled.to_string(), "synthesis cancelled");
}

#[test]
fn engine_error___shape_mismatch___display_includes_context() {
    let error = EngineError::ShapeMismatch {
        emitter: "addition",
        shape: "complex",
        type_name: "Acme.Boundary".to_string(),
    };

    let message = error.to_string();

    assert!(message.contains("addition"));
    assert!(message.contains("complex"));
    assert!(message.contains("Acme.Boundary"));
}

#[test]
fn diagnostic___captures_type_name_and_message() {
    let error = EngineError::Internal("descriptor resolution failed".to_string());

    let diagnostic = Diagnostic::new("Acme.ProductName", &error);

    assert_eq!(diagnostic.type_name, "Acme.ProductName");
    assert!(diagnostic.message.contains("descriptor resolution failed"));
}
