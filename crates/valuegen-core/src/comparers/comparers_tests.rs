#![allow(non_snake_case)]

use super::*;
use crate::descriptor::MemberKind;

fn text_member(name: &str) -> MemberDescriptor {
    MemberDescriptor::new(name, MemberKind::String)
}

fn int_member(name: &str) -> MemberDescriptor {
    MemberDescriptor::new(name, MemberKind::Int32)
}

#[test]
fn resolve_comparers___textual_member_defaults_to_ordinal_ignore_case() {
    let declarations = vec![MemberEqualityDeclaration::plain(text_member("Name"))];

    let resolved = resolve_comparers("ProductName", &declarations);

    assert_eq!(
        resolved[0].equality_comparer,
        ResolvedComparer::OrdinalIgnoreCase
    );
}

#[test]
fn resolve_comparers___non_textual_member_defaults_to_natural() {
    let declarations = vec![MemberEqualityDeclaration::plain(int_member("Count"))];

    let resolved = resolve_comparers("Boundary", &declarations);

    assert_eq!(resolved[0].equality_comparer, ResolvedComparer::Natural);
}

#[test]
fn resolve_comparers___matching_explicit_comparer_is_kept() {
    let comparer = ComparerRef::new("StringComparer.Ordinal", "string");
    let declarations = vec![MemberEqualityDeclaration {
        member: text_member("Name"),
        equality_comparer: Some(comparer.clone()),
        ordering_comparer: None,
    }];

    let resolved = resolve_comparers("ProductName", &declarations);

    assert_eq!(
        resolved[0].equality_comparer,
        ResolvedComparer::Explicit(comparer)
    );
}

#[test]
fn resolve_comparers___mismatched_comparer_degrades_to_default() {
    // Declared for int, member is string: invalid, must not abort synthesis.
    let comparer = ComparerRef::new("MyComparers.IntComparer", "int");
    let declarations = vec![MemberEqualityDeclaration {
        member: text_member("Name"),
        equality_comparer: Some(comparer),
        ordering_comparer: None,
    }];

    let resolved = resolve_comparers("ProductName", &declarations);

    assert_eq!(
        resolved[0].equality_comparer,
        ResolvedComparer::OrdinalIgnoreCase
    );
}

#[test]
fn resolve_comparers___mismatched_comparer_on_numeric_member_degrades_to_natural() {
    let comparer = ComparerRef::new("StringComparer.Ordinal", "string");
    let declarations = vec![MemberEqualityDeclaration {
        member: int_member("Count"),
        equality_comparer: Some(comparer),
        ordering_comparer: None,
    }];

    let resolved = resolve_comparers("Boundary", &declarations);

    assert_eq!(resolved[0].equality_comparer, ResolvedComparer::Natural);
}

#[test]
fn resolve_comparers___mismatched_ordering_comparer_is_dropped() {
    let ordering = ComparerRef::new("MyComparers.IntComparer", "int");
    let declarations = vec![MemberEqualityDeclaration {
        member: text_member("Name"),
        equality_comparer: None,
        ordering_comparer: Some(ordering),
    }];

    let resolved = resolve_comparers("ProductName", &declarations);

    assert!(resolved[0].ordering_comparer.is_none());
}

#[test]
fn resolve_comparers___matching_ordering_comparer_is_kept() {
    let ordering = ComparerRef::new("StringComparer.Ordinal", "string");
    let declarations = vec![MemberEqualityDeclaration {
        member: text_member("Name"),
        equality_comparer: None,
        ordering_comparer: Some(ordering.clone()),
    }];

    let resolved = resolve_comparers("ProductName", &declarations);

    assert_eq!(resolved[0].ordering_comparer, Some(ordering));
}

#[test]
fn resolve_comparers___preserves_declaration_order() {
    let declarations = vec![
        MemberEqualityDeclaration::plain(text_member("Name")),
        MemberEqualityDeclaration::plain(int_member("Count")),
    ];

    let resolved = resolve_comparers("Pair", &declarations);

    assert_eq!(resolved[0].member.name, "Name");
    assert_eq!(resolved[1].member.name, "Count");
}

#[test]
fn resolve_comparers___opaque_element_type_matches_by_name() {
    let member = MemberDescriptor::new("Amount", MemberKind::Opaque("Money".to_string()));
    let comparer = ComparerRef::new("MoneyComparer.Default", "Money");
    let declarations = vec![MemberEqualityDeclaration {
        member,
        equality_comparer: Some(comparer.clone()),
        ordering_comparer: None,
    }];

    let resolved = resolve_comparers("Invoice", &declarations);

    assert_eq!(
        resolved[0].equality_comparer,
        ResolvedComparer::Explicit(comparer)
    );
}

#[test]
fn resolve_comparers___empty_member_list_yields_empty_result() {
    let resolved = resolve_comparers("Marker", &[]);

    assert!(resolved.is_empty());
}
