#![allow(non_snake_case)]

use super::*;
use valuegen_core::{
    MemberDescriptor, MemberKind, OperatorsMode, RawKeyedSettings, ResolvedComparer,
};

fn string_key() -> EqualityMemberDescriptor {
    EqualityMemberDescriptor {
        member: MemberDescriptor::new("Value", MemberKind::String),
        equality_comparer: ResolvedComparer::OrdinalIgnoreCase,
        ordering_comparer: None,
    }
}

fn int_key() -> EqualityMemberDescriptor {
    EqualityMemberDescriptor {
        member: MemberDescriptor::new("Value", MemberKind::Int32),
        equality_comparer: ResolvedComparer::Natural,
        ordering_comparer: None,
    }
}

fn default_settings() -> KeyedSettings {
    KeyedSettings::resolve(&RawKeyedSettings::default())
}

fn emit(
    descriptor: &TypeDescriptor,
    key: &EqualityMemberDescriptor,
    settings: &KeyedSettings,
) -> String {
    emit_keyed_primary(descriptor, key, settings, &CancellationToken::new())
        .unwrap_or_else(|e| panic!("emission failed: {e}"))
}

// =========================================================================
// Scaffold and declaration
// =========================================================================

#[test]
fn keyed_primary___class_declares_equatable_partial() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme")).reference_type();

    let text = emit(&descriptor, &string_key(), &default_settings());

    assert!(text.contains("namespace Acme"));
    assert!(text.contains("partial class ProductName :"));
    assert!(text.contains("global::System.IEquatable<ProductName>"));
    assert!(text.contains("private static readonly int _typeHashSeed = "));
}

#[test]
fn keyed_primary___struct_gets_default_instance_property() {
    let descriptor = TypeDescriptor::new("Amount", Some("Acme"));

    let text = emit(&descriptor, &int_key(), &default_settings());

    assert!(text.contains("partial struct Amount"));
    assert!(text.contains("public static Amount Empty => default;"));
}

#[test]
fn keyed_primary___class_has_no_default_instance_property() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme")).reference_type();

    let text = emit(&descriptor, &string_key(), &default_settings());

    assert!(!text.contains("Empty => default"));
}

#[test]
fn keyed_primary___constructor_is_private_and_unvalidated() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme")).reference_type();

    let text = emit(&descriptor, &string_key(), &default_settings());

    assert!(text.contains("private ProductName(string value)"));
    assert!(text.contains("Value = value;"));
}

// =========================================================================
// Factory surface
// =========================================================================

#[test]
fn keyed_primary___reference_key_without_coercion_throws_on_null() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme")).reference_type();

    let text = emit(&descriptor, &string_key(), &default_settings());

    assert!(text.contains(
        "public static global::Valuegen.Runtime.ValidationError? Validate(string? value, global::System.IFormatProvider? provider, out ProductName? obj)"
    ));
    assert!(text.contains("throw new global::System.ArgumentNullException(nameof(value));"));
}

#[test]
fn keyed_primary___null_coercion_short_circuits_instead_of_throwing() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme")).reference_type();
    let settings = KeyedSettings::resolve(&RawKeyedSettings {
        null_in_factory_methods_yields_null: true,
        ..RawKeyedSettings::default()
    });

    let text = emit(&descriptor, &string_key(), &settings);

    assert!(!text.contains("ArgumentNullException"));
    assert!(text.contains("if (value is null)"));
    assert!(text.contains("obj = default;"));
}

#[test]
fn keyed_primary___empty_string_coercion_adds_length_check() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme")).reference_type();
    let settings = KeyedSettings::resolve(&RawKeyedSettings {
        empty_string_in_factory_methods_yields_null: true,
        ..RawKeyedSettings::default()
    });

    let text = emit(&descriptor, &string_key(), &settings);

    assert!(text.contains("if (value.Length == 0)"));
}

#[test]
fn keyed_primary___value_key_with_coercion_gets_nullable_wrapper_overload() {
    let descriptor = TypeDescriptor::new("Amount", Some("Acme"));
    let settings = KeyedSettings::resolve(&RawKeyedSettings {
        null_in_factory_methods_yields_null: true,
        ..RawKeyedSettings::default()
    });

    let text = emit(&descriptor, &int_key(), &settings);

    assert!(text.contains("Validate(int? value, global::System.IFormatProvider? provider"));
    assert!(text.contains("return Validate(value.Value, provider, out obj);"));
    assert!(text.contains("Validate(int value, global::System.IFormatProvider? provider"));
}

#[test]
fn keyed_primary___validate_invokes_partial_hooks() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme")).reference_type();

    let text = emit(&descriptor, &string_key(), &default_settings());

    assert!(text.contains(
        "ValidateFactoryArguments(ref validationError, ref key, ref factoryArgumentsValidationState);"
    ));
    assert!(text.contains("instance.FactoryPostInit(factoryArgumentsValidationState);"));
    assert!(text.contains("static partial void ValidateFactoryArguments("));
    assert!(text.contains("partial void FactoryPostInit(object? factoryArgumentsValidationState);"));
}

#[test]
fn keyed_primary___reference_key_rebinds_non_nullable_local_for_hook() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme")).reference_type();

    let text = emit(&descriptor, &string_key(), &default_settings());

    // The hook takes `ref string`; the nullable parameter is re-declared
    // past the null guard so consumers build without nullability warnings.
    assert!(text.contains("string key = value;"));
    assert!(text.contains("var instance = new ProductName(key);"));
    assert!(!text.contains("ref value,"));
}

#[test]
fn keyed_primary___value_key_passes_parameter_straight_to_hook() {
    let descriptor = TypeDescriptor::new("Amount", Some("Acme"));

    let text = emit(&descriptor, &int_key(), &default_settings());

    assert!(text.contains(
        "ValidateFactoryArguments(ref validationError, ref value, ref factoryArgumentsValidationState);"
    ));
    assert!(!text.contains("int key = value;"));
}

#[test]
fn keyed_primary___create_throws_validation_exception() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme")).reference_type();

    let text = emit(&descriptor, &string_key(), &default_settings());

    assert!(text.contains("public static ProductName Create(string? value)"));
    assert!(text.contains(
        "throw new global::Valuegen.Runtime.ValidationException(validationError.ToString());"
    ));
    assert!(text.contains("return obj!;"));
}

#[test]
fn keyed_primary___create_returns_nullable_under_null_coercion() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme")).reference_type();
    let settings = KeyedSettings::resolve(&RawKeyedSettings {
        null_in_factory_methods_yields_null: true,
        ..RawKeyedSettings::default()
    });

    let text = emit(&descriptor, &string_key(), &settings);

    assert!(text.contains("public static ProductName? Create(string? value)"));
    assert!(!text.contains("return obj!;"));
}

#[test]
fn keyed_primary___try_create_has_both_overloads() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme")).reference_type();

    let text = emit(&descriptor, &string_key(), &default_settings());

    assert!(text.contains("public static bool TryCreate(string? value, out ProductName? obj)"));
    assert!(text.contains(
        "public static bool TryCreate(string? value, out ProductName? obj, out global::Valuegen.Runtime.ValidationError? validationError)"
    ));
    assert!(text.contains("return TryCreate(value, out obj, out _);"));
}

#[test]
fn keyed_primary___skip_factory_methods_suppresses_factory_and_hooks() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme")).reference_type();
    let settings = KeyedSettings::resolve(&RawKeyedSettings {
        skip_factory_methods: true,
        ..RawKeyedSettings::default()
    });

    let text = emit(&descriptor, &string_key(), &settings);

    assert!(!text.contains("Validate("));
    assert!(!text.contains("TryCreate"));
    assert!(!text.contains("ValidateFactoryArguments"));
    // The from-key conversion routes through Create, so it goes too.
    assert!(!text.contains("operator ProductName(string"));
    // Equality stays.
    assert!(text.contains("public bool Equals(ProductName? other)"));
}

// =========================================================================
// Conversions
// =========================================================================

#[test]
fn keyed_primary___default_conversions_implicit_out_explicit_in() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme")).reference_type();

    let text = emit(&descriptor, &string_key(), &default_settings());

    assert!(text.contains("public static implicit operator string?(ProductName? obj)"));
    assert!(text.contains("return obj is null ? default : obj.Value;"));
    assert!(text.contains("public static explicit operator ProductName(string value)"));
    assert!(text.contains("return Create(value);"));
}

#[test]
fn keyed_primary___struct_conversion_avoids_nullable_value_collision() {
    let descriptor = TypeDescriptor::new("Amount", Some("Acme"));

    let text = emit(&descriptor, &int_key(), &default_settings());

    assert!(text.contains("public static implicit operator int(Amount obj)"));
    assert!(text.contains("public static implicit operator int?(Amount? obj)"));
    assert!(text.contains("return obj.HasValue ? obj.Value.Value : default;"));
}

#[test]
fn keyed_primary___conversion_none_suppresses_operator() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme")).reference_type();
    let settings = KeyedSettings::resolve(&RawKeyedSettings {
        conversion_to_key: Some(ConversionMode::None),
        conversion_from_key: Some(ConversionMode::None),
        ..RawKeyedSettings::default()
    });

    let text = emit(&descriptor, &string_key(), &settings);

    assert!(!text.contains("operator string"));
    assert!(!text.contains("operator ProductName(string"));
}

// =========================================================================
// Equality, hashing, operators, ToString
// =========================================================================

#[test]
fn keyed_primary___textual_key_compares_ordinal_ignore_case() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme")).reference_type();

    let text = emit(&descriptor, &string_key(), &default_settings());

    assert!(text.contains(
        "global::System.StringComparer.OrdinalIgnoreCase.Equals(Value, other.Value)"
    ));
    assert!(text.contains(
        "global::System.StringComparer.OrdinalIgnoreCase.GetHashCode(Value)"
    ));
    assert!(text.contains("return _typeHashSeed + "));
}

#[test]
fn keyed_primary___equality_operators_null_safe_for_classes() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme")).reference_type();

    let text = emit(&descriptor, &string_key(), &default_settings());

    assert!(text.contains(
        "public static bool operator ==(ProductName? left, ProductName? right)"
    ));
    assert!(text.contains("return right is null;"));
    assert!(text.contains(
        "public static bool operator !=(ProductName? left, ProductName? right)"
    ));
}

#[test]
fn keyed_primary___key_overloads_emitted_in_both_operand_orders() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme")).reference_type();
    let settings = KeyedSettings::resolve(&RawKeyedSettings {
        equality_comparison_operators: OperatorsMode::DefaultWithKeyTypeOverloads,
        ..RawKeyedSettings::default()
    });

    let text = emit(&descriptor, &string_key(), &settings);

    assert!(text.contains("public static bool operator ==(ProductName obj, string value)"));
    assert!(text.contains("public static bool operator ==(string value, ProductName obj)"));
    assert!(text.contains("obj is not null && "));
}

#[test]
fn keyed_primary___operators_mode_none_suppresses_equality_operators() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme")).reference_type();
    let settings = KeyedSettings::resolve(&RawKeyedSettings {
        equality_comparison_operators: OperatorsMode::None,
        ..RawKeyedSettings::default()
    });

    let text = emit(&descriptor, &string_key(), &settings);

    assert!(!text.contains("operator =="));
    assert!(text.contains("public override bool Equals(object? other)"));
}

#[test]
fn keyed_primary___to_string_returns_textual_key_directly() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme")).reference_type();

    let text = emit(&descriptor, &string_key(), &default_settings());

    assert!(text.contains("public override string ToString()"));
    assert!(text.contains("return Value;"));
}

#[test]
fn keyed_primary___to_string_formats_value_key() {
    let descriptor = TypeDescriptor::new("Amount", Some("Acme"));

    let text = emit(&descriptor, &int_key(), &default_settings());

    assert!(text.contains("return Value.ToString();"));
}

#[test]
fn keyed_primary___skip_to_string_suppresses_override() {
    let descriptor = TypeDescriptor::new("Amount", Some("Acme"));
    let settings = KeyedSettings::resolve(&RawKeyedSettings {
        skip_to_string: true,
        ..RawKeyedSettings::default()
    });

    let text = emit(&descriptor, &int_key(), &settings);

    assert!(!text.contains("public override string ToString()"));
}

// =========================================================================
// Determinism and cancellation
// =========================================================================

#[test]
fn keyed_primary___emission_is_byte_identical_across_runs() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme")).reference_type();
    let settings = default_settings();

    let first = emit(&descriptor, &string_key(), &settings);
    let second = emit(&descriptor, &string_key(), &settings);

    assert_eq!(first, second);
}

#[test]
fn keyed_primary___cancelled_token_aborts_emission() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme")).reference_type();
    let token = CancellationToken::new();
    token.cancel();

    let result = emit_keyed_primary(&descriptor, &string_key(), &default_settings(), &token);

    assert!(result.is_err());
}
