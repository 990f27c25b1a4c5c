//! Descriptor model for synthesis targets.
//!
//! A descriptor is an immutable, structurally comparable snapshot of one
//! user-defined value type: its identity, its member list with semantic type
//! classification, and its shape (keyed vs. complex). Descriptors are created
//! once per synthesis pass from host-supplied metadata and discarded after
//! emission; the incremental cache relies on structural equality (never
//! reference identity) to detect "no change".

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Semantic classification of a member's type.
///
/// The engine never sees real host-compiler type symbols; it works off this
/// closed classification plus an opaque escape hatch carrying the
/// target-language type name verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberKind {
    Boolean,
    Int32,
    Int64,
    Decimal,
    Double,
    String,
    DateTime,
    Guid,
    /// Any other type, carried by its target-language name.
    Opaque(String),
}

impl MemberKind {
    /// Whether this kind is textual (drives the default comparer rule).
    pub fn is_textual(&self) -> bool {
        matches!(self, MemberKind::String)
    }

    /// Whether this kind is numeric (drives arithmetic-operator gating).
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            MemberKind::Int32 | MemberKind::Int64 | MemberKind::Decimal | MemberKind::Double
        )
    }

    /// Whether values of this kind have a defined ordering.
    pub fn supports_comparison(&self) -> bool {
        !matches!(self, MemberKind::Boolean | MemberKind::Opaque(_))
    }

    /// Whether this kind supports format-string rendering.
    pub fn supports_formatting(&self) -> bool {
        self.is_numeric() || matches!(self, MemberKind::DateTime | MemberKind::Guid)
    }

    /// Whether this kind can be produced from its textual representation.
    pub fn supports_parsing(&self) -> bool {
        self.is_numeric()
            || matches!(self, MemberKind::String | MemberKind::DateTime | MemberKind::Guid)
    }

    /// Whether this kind is a reference type in the target language.
    ///
    /// Opaque kinds carry their own flag on the member descriptor instead.
    pub fn is_reference_kind(&self) -> bool {
        matches!(self, MemberKind::String)
    }

    /// Canonical element-type name, used to validate declared comparers and
    /// to render member types in emitted code.
    pub fn element_type_name(&self) -> &str {
        match self {
            MemberKind::Boolean => "bool",
            MemberKind::Int32 => "int",
            MemberKind::Int64 => "long",
            MemberKind::Decimal => "decimal",
            MemberKind::Double => "double",
            MemberKind::String => "string",
            MemberKind::DateTime => "global::System.DateTime",
            MemberKind::Guid => "global::System.Guid",
            MemberKind::Opaque(name) => name,
        }
    }
}

/// One synthesized constructor/factory parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberDescriptor {
    /// Member name as declared (PascalCase in the target language).
    pub name: String,

    /// Semantic type classification.
    pub kind: MemberKind,

    /// Whether the member type carries a nullable annotation.
    #[serde(default)]
    pub is_nullable: bool,

    /// Whether the member type is a reference type.
    #[serde(default)]
    pub is_reference_type: bool,
}

impl MemberDescriptor {
    /// Create a member descriptor with nullability and reference-ness
    /// derived from the kind.
    pub fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        let is_reference_type = kind.is_reference_kind();
        Self {
            name: name.into(),
            kind,
            is_nullable: false,
            is_reference_type,
        }
    }

    /// Mark the member as nullable.
    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }
}

/// Identity of a synthesis target type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Simple type name (no namespace).
    pub name: String,

    /// Namespace, if any.
    #[serde(default)]
    pub namespace: Option<String>,

    /// Containing-type chain for nested declarations, outermost first.
    #[serde(default)]
    pub containing_types: Vec<String>,

    /// Whether the target is a reference type (class) or value type (struct).
    #[serde(default)]
    pub is_reference_type: bool,

    /// Whether the declaration sits in a nullable-annotation context.
    #[serde(default = "default_true")]
    pub nullable_context: bool,

    /// Number of generic parameters on the declaration.
    #[serde(default)]
    pub generics_arity: usize,
}

fn default_true() -> bool {
    true
}

impl TypeDescriptor {
    /// Create a descriptor for a non-nested type.
    pub fn new(name: impl Into<String>, namespace: Option<&str>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.map(str::to_string),
            containing_types: Vec::new(),
            is_reference_type: false,
            nullable_context: true,
            generics_arity: 0,
        }
    }

    /// Mark the target as a reference type.
    pub fn reference_type(mut self) -> Self {
        self.is_reference_type = true;
        self
    }

    /// Fully qualified name: namespace, containing types, then the name.
    pub fn qualified_name(&self) -> String {
        let mut parts = Vec::new();
        if let Some(ns) = &self.namespace {
            parts.push(ns.as_str());
        }
        for containing in &self.containing_types {
            parts.push(containing.as_str());
        }
        parts.push(self.name.as_str());
        parts.join(".")
    }

    /// Deterministic per-type hash seed.
    ///
    /// Derived from the fully qualified identity (including generics arity),
    /// so two distinct types with structurally identical members never share
    /// a seed. SHA-256 keeps the value stable across runs and platforms,
    /// which the idempotent-emission guarantee requires.
    pub fn type_salt(&self) -> i32 {
        let mut hasher = Sha256::new();
        hasher.update(self.qualified_name().as_bytes());
        hasher.update(self.generics_arity.to_le_bytes());
        let digest = hasher.finalize();
        i32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
    }

    /// Target-language keyword introducing the declaration.
    pub fn declaration_keyword(&self) -> &'static str {
        if self.is_reference_type { "class" } else { "struct" }
    }
}

/// Shape classification of a synthesis target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    /// Exactly one significant member; identity and conversions are defined
    /// entirely in terms of that key.
    Keyed { key: MemberDescriptor },

    /// Multiple significant members; equality/hash defined over the declared
    /// equality members. An empty member list is a valid "marker" object.
    Complex { members: Vec<MemberDescriptor> },
}

impl Shape {
    /// The key member, for keyed shapes.
    pub fn key(&self) -> Option<&MemberDescriptor> {
        match self {
            Shape::Keyed { key } => Some(key),
            Shape::Complex { .. } => None,
        }
    }

    /// All members in declaration order.
    pub fn members(&self) -> Vec<&MemberDescriptor> {
        match self {
            Shape::Keyed { key } => vec![key],
            Shape::Complex { members } => members.iter().collect(),
        }
    }
}
