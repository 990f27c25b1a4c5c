//! Property-based tests for settings resolution
//!
//! Resolution is a pure function; these properties pin the derivation rules
//! over arbitrary flag combinations rather than hand-picked cases.

use proptest::prelude::*;
use valuegen_core::{KeyedSettings, OperatorsMode, ParseErrorHandling, RawKeyedSettings};

fn arb_operators_mode() -> impl Strategy<Value = OperatorsMode> {
    prop_oneof![
        Just(OperatorsMode::None),
        Just(OperatorsMode::Default),
        Just(OperatorsMode::DefaultWithKeyTypeOverloads),
    ]
}

fn arb_raw_keyed_settings() -> impl Strategy<Value = RawKeyedSettings> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        proptest::option::of("[A-Za-z][A-Za-z0-9]{0,12}"),
        arb_operators_mode(),
        arb_operators_mode(),
        proptest::option::of(arb_operators_mode()),
        any::<bool>(),
    )
        .prop_map(
            |(
                skip_factory_methods,
                skip_ordering,
                skip_formatting,
                skip_to_string,
                skip_parsing,
                empty_string,
                null_coercion,
                default_instance_property_name,
                comparison,
                equality,
                addition,
                invalid_instance,
            )| RawKeyedSettings {
                skip_factory_methods,
                skip_ordering,
                skip_formatting,
                skip_to_string,
                skip_parsing,
                empty_string_in_factory_methods_yields_null: empty_string,
                null_in_factory_methods_yields_null: null_coercion,
                default_instance_property_name,
                comparison_operators: comparison,
                equality_comparison_operators: equality,
                addition_operators: addition,
                parse_error_handling: if invalid_instance {
                    ParseErrorHandling::InvalidInstance
                } else {
                    ParseErrorHandling::Throw
                },
                ..RawKeyedSettings::default()
            },
        )
}

proptest! {
    /// Property: resolution is idempotent over its own output flags
    #[test]
    fn proptest_resolution_is_deterministic(raw in arb_raw_keyed_settings()) {
        let first = KeyedSettings::resolve(&raw);
        let second = KeyedSettings::resolve(&raw);

        prop_assert_eq!(first, second);
    }

    /// Property: empty-string coercion always implies null coercion
    #[test]
    fn proptest_empty_string_implies_null_coercion(raw in arb_raw_keyed_settings()) {
        let resolved = KeyedSettings::resolve(&raw);

        if resolved.empty_string_in_factory_methods_yields_null {
            prop_assert!(resolved.null_in_factory_methods_yields_null);
        }
    }

    /// Property: suppressing the factory always suppresses parsing
    #[test]
    fn proptest_skip_factories_implies_skip_parsing(raw in arb_raw_keyed_settings()) {
        let resolved = KeyedSettings::resolve(&raw);

        if resolved.skip_factory_methods {
            prop_assert!(resolved.skip_parsing);
        }
    }

    /// Property: equality operators are never weaker than comparison
    /// operators
    #[test]
    fn proptest_equality_at_least_comparison(raw in arb_raw_keyed_settings()) {
        let resolved = KeyedSettings::resolve(&raw);

        prop_assert!(resolved.equality_comparison_operators >= resolved.comparison_operators);
    }

    /// Property: the default-instance property always ends up with a
    /// non-empty name
    #[test]
    fn proptest_default_instance_name_is_never_empty(raw in arb_raw_keyed_settings()) {
        let resolved = KeyedSettings::resolve(&raw);

        prop_assert!(!resolved.default_instance_property_name.is_empty());
    }

    /// Property: resolution never escalates a raw flag the rules do not
    /// touch
    #[test]
    fn proptest_untouched_flags_pass_through(raw in arb_raw_keyed_settings()) {
        let resolved = KeyedSettings::resolve(&raw);

        prop_assert_eq!(resolved.skip_factory_methods, raw.skip_factory_methods);
        prop_assert_eq!(resolved.skip_ordering, raw.skip_ordering);
        prop_assert_eq!(resolved.skip_formatting, raw.skip_formatting);
        prop_assert_eq!(resolved.skip_to_string, raw.skip_to_string);
        prop_assert_eq!(resolved.comparison_operators, raw.comparison_operators);
        prop_assert_eq!(resolved.parse_error_handling, raw.parse_error_handling);
    }
}
