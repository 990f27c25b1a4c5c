#![allow(non_snake_case)]

use super::*;
use valuegen_core::{ComparerRef, MemberKind};

fn eq_member(member: MemberDescriptor, comparer: ResolvedComparer) -> EqualityMemberDescriptor {
    EqualityMemberDescriptor {
        member,
        equality_comparer: comparer,
        ordering_comparer: None,
    }
}

#[test]
fn type_reference___plain_type_is_bare_name() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme"));

    assert_eq!(type_reference(&descriptor), "ProductName");
}

#[test]
fn type_reference___generic_type_lists_parameters() {
    let mut descriptor = TypeDescriptor::new("Envelope", Some("Acme"));
    descriptor.generics_arity = 2;

    assert_eq!(type_reference(&descriptor), "Envelope<T1, T2>");
}

#[test]
fn member_type___appends_question_mark_for_nullable() {
    let plain = MemberDescriptor::new("Count", MemberKind::Int32);
    let nullable = MemberDescriptor::new("Count", MemberKind::Int32).nullable();

    assert_eq!(member_type(&plain), "int");
    assert_eq!(member_type(&nullable), "int?");
}

#[test]
fn open_scaffold___emits_header_namespace_and_containing_types() {
    let mut descriptor = TypeDescriptor::new("Inner", Some("Acme.Domain"));
    descriptor.containing_types = vec!["Outer".to_string()];
    let mut w = CodeWriter::new();

    open_scaffold(&mut w, &descriptor);
    close_scaffold(&mut w, &descriptor);
    let text = w.into_string();

    assert!(text.starts_with("//---"));
    assert!(text.contains("// <auto-generated>"));
    assert!(text.contains("#nullable enable"));
    assert!(text.contains("namespace Acme.Domain"));
    assert!(text.contains("partial class Outer"));
}

#[test]
fn open_scaffold___no_namespace_opens_nothing() {
    let descriptor = TypeDescriptor::new("Amount", None);
    let mut w = CodeWriter::new();

    open_scaffold(&mut w, &descriptor);

    assert_eq!(w.depth(), 0);
}

#[test]
fn open_type___renders_interface_list() {
    let descriptor = TypeDescriptor::new("ProductName", None).reference_type();
    let mut w = CodeWriter::new();

    open_type(
        &mut w,
        &descriptor,
        &["global::System.IEquatable<ProductName>".to_string()],
    );
    let text = w.into_string();

    assert!(text.contains("partial class ProductName :"));
    assert!(text.contains("    global::System.IEquatable<ProductName>"));
}

#[test]
fn open_type___struct_without_interfaces() {
    let descriptor = TypeDescriptor::new("Amount", None);
    let mut w = CodeWriter::new();

    open_type(&mut w, &descriptor, &[]);

    assert!(w.into_string().contains("partial struct Amount"));
}

#[test]
fn equality_expression___ordinal_ignore_case() {
    let member = eq_member(
        MemberDescriptor::new("Value", MemberKind::String),
        ResolvedComparer::OrdinalIgnoreCase,
    );

    assert_eq!(
        equality_expression(&member, "Value", "other.Value"),
        "global::System.StringComparer.OrdinalIgnoreCase.Equals(Value, other.Value)"
    );
}

#[test]
fn equality_expression___natural_uses_default_equality_comparer() {
    let member = eq_member(
        MemberDescriptor::new("Count", MemberKind::Int32),
        ResolvedComparer::Natural,
    );

    assert_eq!(
        equality_expression(&member, "Count", "other.Count"),
        "global::System.Collections.Generic.EqualityComparer<int>.Default.Equals(Count, other.Count)"
    );
}

#[test]
fn equality_expression___explicit_comparer_uses_accessor() {
    let member = eq_member(
        MemberDescriptor::new("Value", MemberKind::String),
        ResolvedComparer::Explicit(ComparerRef::new("StringComparer.Ordinal", "string")),
    );

    assert_eq!(
        equality_expression(&member, "a", "b"),
        "StringComparer.Ordinal.Equals(a, b)"
    );
}

#[test]
fn hash_contribution___null_guards_reference_members() {
    let member = eq_member(
        MemberDescriptor::new("Value", MemberKind::String),
        ResolvedComparer::OrdinalIgnoreCase,
    );

    let expr = hash_contribution(&member, "Value");

    assert!(expr.starts_with("(Value is null ? 0 :"));
}

#[test]
fn hash_contribution___plain_value_member_is_unguarded() {
    let member = eq_member(
        MemberDescriptor::new("Count", MemberKind::Int32),
        ResolvedComparer::Natural,
    );

    let expr = hash_contribution(&member, "Count");

    assert!(!expr.contains("is null"));
}

#[test]
fn compare_expression___explicit_ordering_comparer_wins() {
    let mut member = eq_member(
        MemberDescriptor::new("Value", MemberKind::String),
        ResolvedComparer::OrdinalIgnoreCase,
    );
    member.ordering_comparer = Some(ComparerRef::new("MyComparers.Custom", "string"));

    assert_eq!(
        compare_expression(&member, "a", "b"),
        "MyComparers.Custom.Compare(a, b)"
    );
}

#[test]
fn compare_expression___textual_follows_equality_case_rule() {
    let member = eq_member(
        MemberDescriptor::new("Value", MemberKind::String),
        ResolvedComparer::OrdinalIgnoreCase,
    );

    assert_eq!(
        compare_expression(&member, "a", "b"),
        "global::System.StringComparer.OrdinalIgnoreCase.Compare(a, b)"
    );
}

#[test]
fn compare_expression___natural_ordering_for_numeric_members() {
    let member = eq_member(
        MemberDescriptor::new("Count", MemberKind::Int32),
        ResolvedComparer::Natural,
    );

    assert_eq!(
        compare_expression(&member, "a", "b"),
        "global::System.Collections.Generic.Comparer<int>.Default.Compare(a, b)"
    );
}

#[test]
fn hash_seed_field___embeds_type_salt() {
    let descriptor = TypeDescriptor::new("ProductName", Some("Acme"));

    let field = hash_seed_field(&descriptor);

    assert!(field.starts_with("private static readonly int _typeHashSeed = "));
    assert!(field.contains(&descriptor.type_salt().to_string()));
}
