//! Per-member equality/ordering comparer resolution.
//!
//! Every member gets exactly one resolved equality comparer that feeds both
//! equality and hashing emission, so the emitted `Equals`/`GetHashCode` pair
//! can never disagree (hash/equality consistency is a hard invariant).
//!
//! Default rule: textual members compare ordinal-ignore-case; everything
//! else uses natural equality. A declared comparer whose element type does
//! not match the member's type is ignored with a warning — synthesis never
//! fails over a cosmetic misconfiguration.

use crate::descriptor::MemberDescriptor;
use serde::{Deserialize, Serialize};

/// A comparer declared on a member: a target-language accessor expression
/// plus the element type the comparer is declared for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComparerRef {
    /// Accessor expression, e.g. `StringComparer.Ordinal` or
    /// `MyComparers.CaseSensitive`.
    pub accessor: String,

    /// Declared element type, validated against the member's type.
    pub element_type: String,
}

impl ComparerRef {
    pub fn new(accessor: impl Into<String>, element_type: impl Into<String>) -> Self {
        Self {
            accessor: accessor.into(),
            element_type: element_type.into(),
        }
    }
}

/// The comparer an emitted member actually uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolvedComparer {
    /// A valid declared comparer.
    Explicit(ComparerRef),

    /// Default for textual members with no declared comparer.
    OrdinalIgnoreCase,

    /// Natural equality of the member type.
    Natural,
}

/// A member together with its declared comparers, as supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberEqualityDeclaration {
    pub member: MemberDescriptor,

    #[serde(default)]
    pub equality_comparer: Option<ComparerRef>,

    #[serde(default)]
    pub ordering_comparer: Option<ComparerRef>,
}

impl MemberEqualityDeclaration {
    /// A declaration with no explicit comparers.
    pub fn plain(member: MemberDescriptor) -> Self {
        Self {
            member,
            equality_comparer: None,
            ordering_comparer: None,
        }
    }
}

/// A member with fully resolved comparers, ready for emission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EqualityMemberDescriptor {
    pub member: MemberDescriptor,
    pub equality_comparer: ResolvedComparer,
    pub ordering_comparer: Option<ComparerRef>,
}

/// Resolve the comparers for every member of a type, in declaration order.
///
/// `type_name` is only used for the degradation warning.
pub fn resolve_comparers(
    type_name: &str,
    declarations: &[MemberEqualityDeclaration],
) -> Vec<EqualityMemberDescriptor> {
    declarations
        .iter()
        .map(|declaration| resolve_member(type_name, declaration))
        .collect()
}

fn resolve_member(
    type_name: &str,
    declaration: &MemberEqualityDeclaration,
) -> EqualityMemberDescriptor {
    let member = &declaration.member;

    let equality_comparer = match &declaration.equality_comparer {
        Some(comparer) if comparer_matches(comparer, member) => {
            ResolvedComparer::Explicit(comparer.clone())
        }
        Some(comparer) => {
            tracing::warn!(
                type_name,
                member = %member.name,
                declared = %comparer.element_type,
                actual = %member.kind.element_type_name(),
                "ignoring comparer with mismatched element type, falling back to default"
            );
            default_comparer(member)
        }
        None => default_comparer(member),
    };

    let ordering_comparer = match &declaration.ordering_comparer {
        Some(comparer) if comparer_matches(comparer, member) => Some(comparer.clone()),
        Some(comparer) => {
            tracing::warn!(
                type_name,
                member = %member.name,
                declared = %comparer.element_type,
                actual = %member.kind.element_type_name(),
                "ignoring ordering comparer with mismatched element type"
            );
            None
        }
        None => None,
    };

    EqualityMemberDescriptor {
        member: member.clone(),
        equality_comparer,
        ordering_comparer,
    }
}

fn comparer_matches(comparer: &ComparerRef, member: &MemberDescriptor) -> bool {
    comparer.element_type == member.kind.element_type_name()
}

fn default_comparer(member: &MemberDescriptor) -> ResolvedComparer {
    if member.kind.is_textual() {
        ResolvedComparer::OrdinalIgnoreCase
    } else {
        ResolvedComparer::Natural
    }
}

#[cfg(test)]
#[path = "comparers/comparers_tests.rs"]
mod comparers_tests;
