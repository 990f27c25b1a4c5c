#![allow(non_snake_case)]

use super::*;
use valuegen_core::{MemberDescriptor, RawKeyedSettings, ResolvedComparer};

fn key(kind: MemberKind) -> EqualityMemberDescriptor {
    let comparer = if kind.is_textual() {
        ResolvedComparer::OrdinalIgnoreCase
    } else {
        ResolvedComparer::Natural
    };
    EqualityMemberDescriptor {
        member: MemberDescriptor::new("Value", kind),
        equality_comparer: comparer,
        ordering_comparer: None,
    }
}

fn settings(raw: RawKeyedSettings) -> KeyedSettings {
    KeyedSettings::resolve(&raw)
}

fn emit_parsing(
    descriptor: &TypeDescriptor,
    key: &EqualityMemberDescriptor,
    settings: &KeyedSettings,
) -> String {
    emit_keyed_parsing(descriptor, key, settings, &CancellationToken::new())
        .unwrap_or_else(|e| panic!("emission failed: {e}"))
}

// =========================================================================
// Parse
// =========================================================================

#[test]
fn parsing___numeric_key_parses_text_through_key_type() {
    let descriptor = TypeDescriptor::new("Amount", Some("Acme"));

    let text = emit_parsing(
        &descriptor,
        &key(MemberKind::Int32),
        &settings(RawKeyedSettings::default()),
    );

    assert!(text.contains(
        "public static Amount Parse(string s, global::System.IFormatProvider? provider)"
    ));
    assert!(text.contains("var key = int.Parse(s, provider);"));
    assert!(text.contains("var validationError = Validate(key, provider, out var obj);"));
}

#[test]
fn parsing___string_key_skips_key_conversion() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme")).reference_type();

    let text = emit_parsing(
        &descriptor,
        &key(MemberKind::String),
        &settings(RawKeyedSettings::default()),
    );

    assert!(text.contains("var key = s;"));
    assert!(!text.contains("string.Parse"));
}

#[test]
fn parsing___throw_policy_raises_format_exception_on_validation_failure() {
    let descriptor = TypeDescriptor::new("Amount", Some("Acme"));

    let text = emit_parsing(
        &descriptor,
        &key(MemberKind::Int32),
        &settings(RawKeyedSettings::default()),
    );

    assert!(text.contains(
        "throw new global::System.FormatException(validationError.ToString());"
    ));
    assert!(!text.contains("CreateInvalidInstance"));
}

#[test]
fn parsing___invalid_instance_policy_constructs_through_private_ctor() {
    let descriptor = TypeDescriptor::new("AirportCode", Some("Acme")).reference_type();
    let settings = settings(RawKeyedSettings {
        parse_error_handling: ParseErrorHandling::InvalidInstance,
        ..RawKeyedSettings::default()
    });

    let text = emit_parsing(&descriptor, &key(MemberKind::String), &settings);

    assert!(text.contains("return CreateInvalidInstance(key);"));
    assert!(text.contains(
        "private static AirportCode CreateInvalidInstance(string value)"
    ));
    assert!(text.contains("return new AirportCode(value);"));
    assert!(!text.contains("FormatException"));
}

#[test]
fn parsing___invalid_instance_struct_unwraps_nullable_result() {
    let descriptor = TypeDescriptor::new("Amount", Some("Acme"));
    let settings = settings(RawKeyedSettings {
        parse_error_handling: ParseErrorHandling::InvalidInstance,
        ..RawKeyedSettings::default()
    });

    let text = emit_parsing(&descriptor, &key(MemberKind::Int32), &settings);

    assert!(text.contains("return obj.Value;"));
}

// =========================================================================
// TryParse
// =========================================================================

#[test]
fn parsing___try_parse_rejects_null_without_throwing() {
    let descriptor = TypeDescriptor::new("Amount", Some("Acme"));

    let text = emit_parsing(
        &descriptor,
        &key(MemberKind::Int32),
        &settings(RawKeyedSettings::default()),
    );

    assert!(text.contains(
        "public static bool TryParse(string? s, global::System.IFormatProvider? provider, out Amount? result)"
    ));
    assert!(text.contains("if (s is null)"));
    assert!(text.contains("if (!int.TryParse(s, provider, out var key))"));
}

#[test]
fn parsing___try_parse_fails_on_validation_error_in_both_policies() {
    let descriptor = TypeDescriptor::new("AirportCode", Some("Acme")).reference_type();
    let invalid_instance = settings(RawKeyedSettings {
        parse_error_handling: ParseErrorHandling::InvalidInstance,
        ..RawKeyedSettings::default()
    });

    for s in [settings(RawKeyedSettings::default()), invalid_instance] {
        let text = emit_parsing(&descriptor, &key(MemberKind::String), &s);

        assert!(text.contains("if (validationError is null && obj is not null)"));
        assert!(text.contains("result = obj;"));
        assert!(text.contains("return false;"));
    }
}

// =========================================================================
// Formatting
// =========================================================================

#[test]
fn formatting___delegates_to_key_iformattable() {
    let descriptor = TypeDescriptor::new("Amount", Some("Acme"));

    let text = emit_keyed_formatting(&descriptor, &key(MemberKind::Decimal), &CancellationToken::new())
        .unwrap_or_else(|e| panic!("emission failed: {e}"));

    assert!(text.contains("global::System.IFormattable"));
    assert!(text.contains(
        "public string ToString(string? format, global::System.IFormatProvider? formatProvider)"
    ));
    assert!(text.contains("return Value.ToString(format, formatProvider);"));
    assert!(text.contains("return ToString(format, null);"));
}

#[test]
fn formatting___cancelled_token_aborts_emission() {
    let descriptor = TypeDescriptor::new("Amount", Some("Acme"));
    let token = CancellationToken::new();
    token.cancel();

    let result = emit_keyed_formatting(&descriptor, &key(MemberKind::Double), &token);

    assert!(result.is_err());
}
