//! Raw configuration flags and their resolution into consistent settings.
//!
//! Callers supply [`RawKeyedSettings`] / [`RawComplexSettings`] with any
//! subset of flags set; [`KeyedSettings::resolve`] and
//! [`ComplexSettings::resolve`] fill every gap with documented defaults and
//! apply the cascading derivation rules. Resolution is a pure function with
//! no failure path, and each rule is order-independent so the outcome never
//! depends on field-assignment order.
//!
//! # Derivation rules
//!
//! - **R1**: `empty_string_in_factory_methods_yields_null` forces
//!   `null_in_factory_methods_yields_null` (empty-string handling is a
//!   stricter subset of null handling).
//! - **R2**: `skip_factory_methods` forces `skip_parsing` (parsing requires
//!   the validating factory).
//! - **R3**: `equality_comparison_operators` is raised to at least
//!   `comparison_operators` (ordering requires equality).
//! - **R4**: `default_instance_property_name` defaults to `"Empty"`.

use serde::{Deserialize, Serialize};

/// Generation mode for one operator category.
///
/// Variant order is the escalation order used by rule R3.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum OperatorsMode {
    /// Do not emit this operator category.
    None,

    /// Emit operators between two instances of the synthesized type.
    #[default]
    Default,

    /// Additionally emit mixed-operand overloads against the raw key type,
    /// in both operand orders.
    DefaultWithKeyTypeOverloads,
}

impl OperatorsMode {
    /// Whether any operators are emitted at all.
    pub fn emits(&self) -> bool {
        *self != OperatorsMode::None
    }

    /// Whether mixed-operand key-type overloads are emitted.
    pub fn emits_key_overloads(&self) -> bool {
        *self == OperatorsMode::DefaultWithKeyTypeOverloads
    }
}

/// Direction-specific conversion operator mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConversionMode {
    None,
    Implicit,
    Explicit,
}

/// Behavior of the emitted `Parse` on unparseable input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseErrorHandling {
    /// Throw a format exception (general value objects).
    #[default]
    Throw,

    /// Always return a constructed instance; failure is expressed through
    /// the instance's own validity flag (enumerated-singleton variant, which
    /// models an open identifier space).
    InvalidInstance,
}

/// Raw flags for a keyed (single significant member) target.
///
/// Absent flags mean "use the documented default", exactly as the host
/// integration layer delivers them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RawKeyedSettings {
    pub skip_factory_methods: bool,
    pub skip_ordering: bool,
    pub skip_formatting: bool,
    pub skip_to_string: bool,
    pub skip_parsing: bool,
    pub empty_string_in_factory_methods_yields_null: bool,
    pub null_in_factory_methods_yields_null: bool,
    pub default_instance_property_name: Option<String>,
    pub conversion_to_key: Option<ConversionMode>,
    pub conversion_from_key: Option<ConversionMode>,
    pub comparison_operators: OperatorsMode,
    pub equality_comparison_operators: OperatorsMode,
    /// Arithmetic categories are opt-in; absent means none.
    pub addition_operators: Option<OperatorsMode>,
    pub subtraction_operators: Option<OperatorsMode>,
    pub multiplication_operators: Option<OperatorsMode>,
    pub division_operators: Option<OperatorsMode>,
    pub parse_error_handling: ParseErrorHandling,
}

/// Fully resolved, internally consistent settings for a keyed target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyedSettings {
    pub skip_factory_methods: bool,
    pub skip_ordering: bool,
    pub skip_formatting: bool,
    pub skip_to_string: bool,
    pub skip_parsing: bool,
    pub empty_string_in_factory_methods_yields_null: bool,
    pub null_in_factory_methods_yields_null: bool,
    pub default_instance_property_name: String,
    pub conversion_to_key: ConversionMode,
    pub conversion_from_key: ConversionMode,
    pub comparison_operators: OperatorsMode,
    pub equality_comparison_operators: OperatorsMode,
    pub addition_operators: OperatorsMode,
    pub subtraction_operators: OperatorsMode,
    pub multiplication_operators: OperatorsMode,
    pub division_operators: OperatorsMode,
    pub parse_error_handling: ParseErrorHandling,
}

impl KeyedSettings {
    /// Resolve raw flags into consistent settings.
    ///
    /// Pure and infallible; see the module docs for the derivation rules.
    pub fn resolve(raw: &RawKeyedSettings) -> Self {
        Self {
            skip_factory_methods: raw.skip_factory_methods,
            skip_ordering: raw.skip_ordering,
            skip_formatting: raw.skip_formatting,
            skip_to_string: raw.skip_to_string,
            skip_parsing: rule_skip_factories_implies_skip_parsing(raw),
            empty_string_in_factory_methods_yields_null: raw
                .empty_string_in_factory_methods_yields_null,
            null_in_factory_methods_yields_null: rule_empty_string_implies_null(raw),
            default_instance_property_name: rule_default_instance_name(
                raw.default_instance_property_name.as_deref(),
            ),
            conversion_to_key: raw.conversion_to_key.unwrap_or(ConversionMode::Implicit),
            conversion_from_key: raw.conversion_from_key.unwrap_or(ConversionMode::Explicit),
            comparison_operators: raw.comparison_operators,
            equality_comparison_operators: rule_equality_at_least_comparison(raw),
            addition_operators: raw.addition_operators.unwrap_or(OperatorsMode::None),
            subtraction_operators: raw.subtraction_operators.unwrap_or(OperatorsMode::None),
            multiplication_operators: raw.multiplication_operators.unwrap_or(OperatorsMode::None),
            division_operators: raw.division_operators.unwrap_or(OperatorsMode::None),
            parse_error_handling: raw.parse_error_handling,
        }
    }
}

/// R1: empty-string coercion is a stricter subset of null coercion.
fn rule_empty_string_implies_null(raw: &RawKeyedSettings) -> bool {
    raw.null_in_factory_methods_yields_null || raw.empty_string_in_factory_methods_yields_null
}

/// R2: parsing requires the validating factory.
fn rule_skip_factories_implies_skip_parsing(raw: &RawKeyedSettings) -> bool {
    raw.skip_parsing || raw.skip_factory_methods
}

/// R3: you cannot order without first being able to test equality.
fn rule_equality_at_least_comparison(raw: &RawKeyedSettings) -> OperatorsMode {
    raw.equality_comparison_operators.max(raw.comparison_operators)
}

/// R4: the default-instance property is named `Empty` unless overridden.
fn rule_default_instance_name(name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => "Empty".to_string(),
    }
}

/// Raw flags for a complex (multi-member) target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RawComplexSettings {
    pub skip_factory_methods: bool,
    pub skip_to_string: bool,
    pub default_instance_property_name: Option<String>,
}

/// Fully resolved settings for a complex target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComplexSettings {
    pub skip_factory_methods: bool,
    pub skip_to_string: bool,
    pub default_instance_property_name: String,
}

impl ComplexSettings {
    /// Resolve raw flags into consistent settings. Only R4 applies here:
    /// the complex shape has no parsing, conversion, or operator categories.
    pub fn resolve(raw: &RawComplexSettings) -> Self {
        Self {
            skip_factory_methods: raw.skip_factory_methods,
            skip_to_string: raw.skip_to_string,
            default_instance_property_name: rule_default_instance_name(
                raw.default_instance_property_name.as_deref(),
            ),
        }
    }
}

/// Resolved settings for either shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolvedSettings {
    Keyed(KeyedSettings),
    Complex(ComplexSettings),
}

impl ResolvedSettings {
    /// Whether the validating factory is suppressed.
    pub fn skip_factory_methods(&self) -> bool {
        match self {
            ResolvedSettings::Keyed(s) => s.skip_factory_methods,
            ResolvedSettings::Complex(s) => s.skip_factory_methods,
        }
    }

    pub fn as_keyed(&self) -> Option<&KeyedSettings> {
        match self {
            ResolvedSettings::Keyed(s) => Some(s),
            ResolvedSettings::Complex(_) => None,
        }
    }

    pub fn as_complex(&self) -> Option<&ComplexSettings> {
        match self {
            ResolvedSettings::Complex(s) => Some(s),
            ResolvedSettings::Keyed(_) => None,
        }
    }
}

/// Which external serialization libraries the consuming project references.
///
/// Capability detection itself happens outside the engine; these flags are an
/// input. An emitter only runs when its flag is set and the target has not
/// opted out via [`AdapterOptOuts`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SerializerCapabilities {
    pub system_text_json: bool,
    pub newtonsoft_json: bool,
    pub message_pack: bool,
    pub protobuf_net: bool,
}

impl SerializerCapabilities {
    /// All four format libraries referenced.
    pub fn all() -> Self {
        Self {
            system_text_json: true,
            newtonsoft_json: true,
            message_pack: true,
            protobuf_net: true,
        }
    }
}

/// Per-type adapter opt-outs: a type that declares its own adapter for a
/// format wins over the generated one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AdapterOptOuts {
    pub system_text_json: bool,
    pub newtonsoft_json: bool,
    pub message_pack: bool,
    pub protobuf_net: bool,
}
