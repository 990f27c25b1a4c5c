//! Naming convention utilities for emitted C#.
//!
//! Member names arrive in PascalCase (the target-language convention);
//! factory and operator parameters are camelCase, with reserved words
//! escaped using the `@` verbatim-identifier prefix.

/// C# reserved words that must be escaped when used as identifiers.
const RESERVED: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Convert a PascalCase member name to a camelCase parameter name,
/// escaping reserved words.
///
/// # Examples
///
/// ```
/// use valuegen_emit::naming::parameter_name;
///
/// assert_eq!(parameter_name("Value"), "value");
/// assert_eq!(parameter_name("DisplayName"), "displayName");
/// assert_eq!(parameter_name("Class"), "@class");
/// ```
pub fn parameter_name(member_name: &str) -> String {
    let camel = to_camel_case(member_name);
    if RESERVED.contains(&camel.as_str()) {
        format!("@{camel}")
    } else {
        camel
    }
}

/// Lowercase the first letter of a PascalCase identifier.
///
/// # Examples
///
/// ```
/// use valuegen_emit::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("DisplayName"), "displayName");
/// assert_eq!(to_camel_case("X"), "x");
/// assert_eq!(to_camel_case(""), "");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use valuegen_emit::naming::capitalize;
///
/// assert_eq!(capitalize("value"), "Value");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}
