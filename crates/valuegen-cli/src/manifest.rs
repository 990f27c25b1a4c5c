//! Manifest parsing and validation
//!
//! A `valuegen.toml` manifest declares the serializer capabilities of the
//! consuming project plus one `[[types]]` entry per synthesis target. A
//! keyed target carries a `[types.key]` table; a complex target carries
//! `[[types.members]]`. Settings tables map straight onto the raw settings
//! structs from `valuegen-core`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use valuegen_core::{
    AdapterOptOuts, ComparerRef, MemberDescriptor, MemberEqualityDeclaration, MemberKind,
    RawComplexSettings, RawKeyedSettings, SerializerCapabilities, TypeDescriptor,
};
use valuegen_emit::{SynthesisRequest, Target};

/// valuegen.toml manifest structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Manifest {
    pub capabilities: SerializerCapabilities,
    pub types: Vec<TypeEntry>,
}

/// One `[[types]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TypeEntry {
    pub name: String,

    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default)]
    pub containing_types: Vec<String>,

    /// `struct` (default) or `class`.
    #[serde(default)]
    pub kind: DeclarationKind,

    #[serde(default)]
    pub generics_arity: usize,

    /// Present for keyed targets.
    #[serde(default)]
    pub key: Option<MemberEntry>,

    /// Present for complex targets. An empty list is a marker object.
    #[serde(default)]
    pub members: Option<Vec<MemberEntry>>,

    #[serde(default)]
    pub settings: RawKeyedSettings,

    #[serde(default)]
    pub complex_settings: RawComplexSettings,

    #[serde(default)]
    pub opt_outs: AdapterOptOuts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclarationKind {
    #[default]
    Struct,
    Class,
}

/// One member, in either a `[types.key]` table or a `[[types.members]]`
/// entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MemberEntry {
    pub name: String,

    /// Member type name; anything not in the built-in set is carried as an
    /// opaque target-language type.
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub nullable: bool,

    /// For opaque types only: whether the type is a reference type.
    #[serde(default)]
    pub reference: bool,

    #[serde(default)]
    pub equality_comparer: Option<ComparerEntry>,

    #[serde(default)]
    pub ordering_comparer: Option<ComparerEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ComparerEntry {
    pub accessor: String,
    pub element_type: String,
}

/// Map a manifest type name onto the semantic kind classification.
pub fn parse_member_kind(name: &str) -> MemberKind {
    match name.to_ascii_lowercase().as_str() {
        "bool" | "boolean" => MemberKind::Boolean,
        "int" | "int32" => MemberKind::Int32,
        "long" | "int64" => MemberKind::Int64,
        "decimal" => MemberKind::Decimal,
        "double" => MemberKind::Double,
        "string" => MemberKind::String,
        "datetime" | "date-time" => MemberKind::DateTime,
        "guid" | "uuid" => MemberKind::Guid,
        _ => MemberKind::Opaque(name.to_string()),
    }
}

impl MemberEntry {
    fn to_declaration(&self) -> MemberEqualityDeclaration {
        let kind = parse_member_kind(&self.type_name);
        let mut member = MemberDescriptor::new(&self.name, kind.clone());
        member.is_nullable = self.nullable;
        if matches!(kind, MemberKind::Opaque(_)) {
            member.is_reference_type = self.reference;
        }

        MemberEqualityDeclaration {
            member,
            equality_comparer: self
                .equality_comparer
                .as_ref()
                .map(|c| ComparerRef::new(&c.accessor, &c.element_type)),
            ordering_comparer: self
                .ordering_comparer
                .as_ref()
                .map(|c| ComparerRef::new(&c.accessor, &c.element_type)),
        }
    }
}

impl TypeEntry {
    fn to_descriptor(&self) -> TypeDescriptor {
        let mut descriptor = TypeDescriptor::new(&self.name, self.namespace.as_deref());
        descriptor.containing_types = self.containing_types.clone();
        descriptor.is_reference_type = self.kind == DeclarationKind::Class;
        descriptor.generics_arity = self.generics_arity;
        descriptor
    }

    fn to_target(&self) -> Result<Target> {
        let descriptor = self.to_descriptor();

        match (&self.key, &self.members) {
            (Some(key), None) => Ok(Target::Keyed {
                descriptor,
                key: key.to_declaration(),
                settings: self.settings.clone(),
                opt_outs: self.opt_outs,
            }),
            (None, Some(members)) => Ok(Target::Complex {
                descriptor,
                members: members.iter().map(MemberEntry::to_declaration).collect(),
                settings: self.complex_settings.clone(),
                opt_outs: self.opt_outs,
            }),
            (Some(_), Some(_)) => {
                anyhow::bail!("Type '{}' declares both a key and members", self.name)
            }
            (None, None) => {
                anyhow::bail!("Type '{}' declares neither a key nor members", self.name)
            }
        }
    }
}

impl Manifest {
    /// Load manifest from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read manifest: {:?}", path.as_ref()))?;

        Self::from_toml(&content)
    }

    /// Parse manifest from string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse manifest")
    }

    /// Validate the manifest
    pub fn validate(&self) -> Result<()> {
        if self.types.is_empty() {
            anyhow::bail!("Manifest declares no types");
        }

        let mut names = HashSet::new();
        for entry in &self.types {
            if entry.name.is_empty() {
                anyhow::bail!("Type name cannot be empty");
            }

            if !names.insert((entry.namespace.clone(), entry.name.clone())) {
                anyhow::bail!("Duplicate type '{}'", entry.name);
            }

            match (&entry.key, &entry.members) {
                (Some(key), None) => {
                    if key.name.is_empty() {
                        anyhow::bail!("Key member of '{}' has no name", entry.name);
                    }
                }
                (None, Some(members)) => {
                    let mut member_names = HashSet::new();
                    for member in members {
                        if member.name.is_empty() {
                            anyhow::bail!("Member of '{}' has no name", entry.name);
                        }
                        if !member_names.insert(member.name.as_str()) {
                            anyhow::bail!(
                                "Duplicate member '{}' on type '{}'",
                                member.name,
                                entry.name
                            );
                        }
                    }
                }
                (Some(_), Some(_)) => {
                    anyhow::bail!("Type '{}' declares both a key and members", entry.name)
                }
                (None, None) => {
                    anyhow::bail!("Type '{}' declares neither a key nor members", entry.name)
                }
            }
        }

        Ok(())
    }

    /// Build the synthesis request this manifest describes.
    pub fn to_request(&self) -> Result<SynthesisRequest> {
        let targets = self
            .types
            .iter()
            .map(TypeEntry::to_target)
            .collect::<Result<Vec<_>>>()?;

        Ok(SynthesisRequest {
            targets,
            capabilities: self.capabilities,
        })
    }
}

/// Check command implementation
pub fn check(manifest_path: Option<String>) -> Result<()> {
    let path = manifest_path.unwrap_or_else(|| "valuegen.toml".to_string());

    println!("Checking manifest: {}", path);

    let manifest = Manifest::from_file(&path)?;
    manifest.validate()?;

    let keyed = manifest.types.iter().filter(|t| t.key.is_some()).count();
    let complex = manifest.types.len() - keyed;

    println!("✓ Types: {} ({} keyed, {} complex)", manifest.types.len(), keyed, complex);
    println!("\nManifest is valid!");

    Ok(())
}
