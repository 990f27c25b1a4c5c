//! Emitted-text artifacts and their addressing.
//!
//! Every emitter produces exactly one artifact per type, addressed by a
//! stable file-name suffix so multiple emitters targeting the same type
//! never collide. Artifacts carry a SHA-256 content hash, which is the only
//! state the host persists (for incremental caching by content).

use crate::descriptor::TypeDescriptor;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The closed set of emitters.
///
/// This is deliberately a tagged enum matched exhaustively at the engine's
/// single composition point, rather than an open trait hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmitterKind {
    /// Validated factory, constructor, conversions, equality, hashing,
    /// `ToString` — keyed or complex depending on the shape.
    Primary,
    Comparison,
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Parsing,
    Formatting,
    SystemTextJson,
    NewtonsoftJson,
    MessagePack,
    ProtobufNet,
}

impl EmitterKind {
    /// All emitter kinds in deterministic planning order.
    pub const ALL: [EmitterKind; 12] = [
        EmitterKind::Primary,
        EmitterKind::Comparison,
        EmitterKind::Addition,
        EmitterKind::Subtraction,
        EmitterKind::Multiplication,
        EmitterKind::Division,
        EmitterKind::Parsing,
        EmitterKind::Formatting,
        EmitterKind::SystemTextJson,
        EmitterKind::NewtonsoftJson,
        EmitterKind::MessagePack,
        EmitterKind::ProtobufNet,
    ];

    /// Stable per-emitter file-name suffix.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            EmitterKind::Primary => ".g.cs",
            EmitterKind::Comparison => ".Comparison.g.cs",
            EmitterKind::Addition => ".Addition.g.cs",
            EmitterKind::Subtraction => ".Subtraction.g.cs",
            EmitterKind::Multiplication => ".Multiplication.g.cs",
            EmitterKind::Division => ".Division.g.cs",
            EmitterKind::Parsing => ".Parsing.g.cs",
            EmitterKind::Formatting => ".Formatting.g.cs",
            EmitterKind::SystemTextJson => ".Json.g.cs",
            EmitterKind::NewtonsoftJson => ".NewtonsoftJson.g.cs",
            EmitterKind::MessagePack => ".MessagePack.g.cs",
            EmitterKind::ProtobufNet => ".ProtobufNet.g.cs",
        }
    }

    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            EmitterKind::Primary => "primary",
            EmitterKind::Comparison => "comparison",
            EmitterKind::Addition => "addition",
            EmitterKind::Subtraction => "subtraction",
            EmitterKind::Multiplication => "multiplication",
            EmitterKind::Division => "division",
            EmitterKind::Parsing => "parsing",
            EmitterKind::Formatting => "formatting",
            EmitterKind::SystemTextJson => "system-text-json",
            EmitterKind::NewtonsoftJson => "newtonsoft-json",
            EmitterKind::MessagePack => "message-pack",
            EmitterKind::ProtobufNet => "protobuf-net",
        }
    }
}

/// One emitted-text artifact for one (type, emitter) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Simple name of the synthesized type.
    pub type_name: String,

    /// Which emitter produced this artifact.
    pub kind: EmitterKind,

    /// The emitted source text.
    pub text: String,

    /// Lowercase hex SHA-256 of `text`.
    pub content_hash: String,
}

impl Artifact {
    /// Wrap emitted text, computing its content hash.
    pub fn new(type_name: impl Into<String>, kind: EmitterKind, text: String) -> Self {
        let content_hash = hex::encode(Sha256::digest(text.as_bytes()));
        Self {
            type_name: type_name.into(),
            kind,
            text,
            content_hash,
        }
    }

    /// File name for this artifact: type name plus the emitter suffix.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.type_name, self.kind.file_suffix())
    }
}

/// Structural cache key for "should this emitter run for this type".
///
/// Equality is structural over the descriptor, never reference identity, so
/// re-running synthesis with unchanged semantic input is a cache no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmitKey {
    pub descriptor: TypeDescriptor,
    pub kind: EmitterKind,
}

impl EmitKey {
    pub fn new(descriptor: TypeDescriptor, kind: EmitterKind) -> Self {
        Self { descriptor, kind }
    }
}
