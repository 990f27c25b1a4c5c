//! Shared C# rendering: type references, artifact scaffolding, and
//! comparer-aware equality/hash/compare expressions.
//!
//! Every artifact starts with the same auto-generated header and the same
//! namespace / containing-type scaffold, so partial declarations from
//! different emitters line up on the same type. Comparer expressions are
//! rendered from the resolved [`ResolvedComparer`] only — equality and
//! hashing always agree because they come from the same resolution.

use crate::writer::CodeWriter;
use valuegen_core::{EqualityMemberDescriptor, MemberDescriptor, ResolvedComparer, TypeDescriptor};

/// Namespace of the runtime support library referenced by emitted code.
pub const RUNTIME_NS: &str = "global::Valuegen.Runtime";

/// Fully qualified validation-error type in emitted code.
pub fn validation_error_type() -> String {
    format!("{RUNTIME_NS}.ValidationError")
}

/// Fully qualified validation-exception type in emitted code.
pub fn validation_exception_type() -> String {
    format!("{RUNTIME_NS}.ValidationException")
}

/// Type reference for the synthesized type, including generic parameters.
pub fn type_reference(descriptor: &TypeDescriptor) -> String {
    if descriptor.generics_arity == 0 {
        descriptor.name.clone()
    } else {
        let params: Vec<String> = (1..=descriptor.generics_arity)
            .map(|i| format!("T{i}"))
            .collect();
        format!("{}<{}>", descriptor.name, params.join(", "))
    }
}

/// Rendered member type, honoring the nullability annotation.
pub fn member_type(member: &MemberDescriptor) -> String {
    let base = member.kind.element_type_name();
    if member.is_nullable {
        format!("{base}?")
    } else {
        base.to_string()
    }
}

/// Rendered member type forced nullable (factory inputs, out parameters).
pub fn nullable_member_type(member: &MemberDescriptor) -> String {
    let base = member.kind.element_type_name();
    format!("{base}?")
}

/// Write the fixed auto-generated header.
pub fn file_header(w: &mut CodeWriter) {
    w.line("//------------------------------------------------------------------------------");
    w.line("// <auto-generated>");
    w.line("//     This code was generated by valuegen.");
    w.line("//     Changes to this file will be lost if the code is regenerated.");
    w.line("// </auto-generated>");
    w.line("//------------------------------------------------------------------------------");
    w.blank();
    w.line("#nullable enable");
    w.blank();
}

/// Open the namespace and containing-type partials for an artifact.
///
/// Containing types are emitted as `partial` with an unknowable kind, so
/// `class` is assumed; nested value-object declarations inside structs are
/// not supported by the host contract.
pub fn open_scaffold(w: &mut CodeWriter, descriptor: &TypeDescriptor) {
    file_header(w);

    if let Some(ns) = &descriptor.namespace {
        w.open(&format!("namespace {ns}"));
    }

    for containing in &descriptor.containing_types {
        w.open(&format!("partial class {containing}"));
    }
}

/// Close everything [`open_scaffold`] opened.
pub fn close_scaffold(w: &mut CodeWriter, descriptor: &TypeDescriptor) {
    for _ in &descriptor.containing_types {
        w.close();
    }

    if descriptor.namespace.is_some() {
        w.close();
    }
}

/// Open the partial declaration of the synthesized type itself.
pub fn open_type(w: &mut CodeWriter, descriptor: &TypeDescriptor, interfaces: &[String]) {
    let keyword = descriptor.declaration_keyword();
    let reference = type_reference(descriptor);

    if interfaces.is_empty() {
        w.open(&format!("partial {keyword} {reference}"));
    } else {
        w.line(&format!("partial {keyword} {reference} :"));
        for (i, interface) in interfaces.iter().enumerate() {
            let separator = if i + 1 == interfaces.len() { "" } else { "," };
            w.line(&format!("    {interface}{separator}"));
        }
        w.open_brace();
    }
}

/// The per-type hash seed field declaration.
pub fn hash_seed_field(descriptor: &TypeDescriptor) -> String {
    format!(
        "private static readonly int _typeHashSeed = {};",
        descriptor.type_salt()
    )
}

/// Equality test between `left` and `right` using the resolved comparer.
pub fn equality_expression(
    member: &EqualityMemberDescriptor,
    left: &str,
    right: &str,
) -> String {
    match &member.equality_comparer {
        ResolvedComparer::Explicit(comparer) => {
            format!("{}.Equals({left}, {right})", comparer.accessor)
        }
        ResolvedComparer::OrdinalIgnoreCase => format!(
            "global::System.StringComparer.OrdinalIgnoreCase.Equals({left}, {right})"
        ),
        ResolvedComparer::Natural => {
            let ty = member_type(&member.member);
            format!(
                "global::System.Collections.Generic.EqualityComparer<{ty}>.Default.Equals({left}, {right})"
            )
        }
    }
}

/// Hash contribution of one member, null-guarded for nullable/reference
/// members so that hashing never throws.
pub fn hash_contribution(member: &EqualityMemberDescriptor, expr: &str) -> String {
    let raw = match &member.equality_comparer {
        ResolvedComparer::Explicit(comparer) => {
            format!("{}.GetHashCode({expr})", comparer.accessor)
        }
        ResolvedComparer::OrdinalIgnoreCase => format!(
            "global::System.StringComparer.OrdinalIgnoreCase.GetHashCode({expr})"
        ),
        ResolvedComparer::Natural => {
            let ty = member_type(&member.member);
            format!(
                "global::System.Collections.Generic.EqualityComparer<{ty}>.Default.GetHashCode({expr}!)"
            )
        }
    };

    if member.member.is_nullable || member.member.is_reference_type {
        format!("({expr} is null ? 0 : {raw})")
    } else {
        raw
    }
}

/// Ordering comparison between `left` and `right`.
///
/// Precedence: explicit ordering comparer, then the resolved equality
/// comparer for textual members (the case-sensitivity rule applies to the
/// comparison direction too), then natural ordering.
pub fn compare_expression(
    member: &EqualityMemberDescriptor,
    left: &str,
    right: &str,
) -> String {
    if let Some(ordering) = &member.ordering_comparer {
        return format!("{}.Compare({left}, {right})", ordering.accessor);
    }

    if member.member.kind.is_textual() {
        return match &member.equality_comparer {
            ResolvedComparer::Explicit(comparer) => {
                format!("{}.Compare({left}, {right})", comparer.accessor)
            }
            _ => format!(
                "global::System.StringComparer.OrdinalIgnoreCase.Compare({left}, {right})"
            ),
        };
    }

    let ty = member_type(&member.member);
    format!(
        "global::System.Collections.Generic.Comparer<{ty}>.Default.Compare({left}, {right})"
    )
}

#[cfg(test)]
#[path = "csharp/csharp_tests.rs"]
mod csharp_tests;
