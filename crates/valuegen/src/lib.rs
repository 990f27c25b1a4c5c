//! # valuegen
//!
//! Deterministic boilerplate synthesis for structural value types.
//!
//! valuegen takes declarative descriptors of user-defined value types and
//! emits the C# surface a hand-written value object would carry: validated
//! construction, equality and hashing, ordering, conversions, parsing and
//! formatting, and serialization adapters for the four common format
//! libraries. Emission is pure text assembly: the same request always
//! produces byte-identical artifacts, which is what makes incremental
//! caching by content hash safe.
//!
//! ## Quick Start
//!
//! ```
//! use valuegen::prelude::*;
//! use valuegen::Target;
//!
//! let target = Target::Keyed {
//!     descriptor: TypeDescriptor::new("ProductName", Some("Acme.Catalog")).reference_type(),
//!     key: MemberEqualityDeclaration::plain(MemberDescriptor::new("Value", MemberKind::String)),
//!     settings: RawKeyedSettings::default(),
//!     opt_outs: Default::default(),
//! };
//!
//! let artifacts = valuegen::synthesize(
//!     &target,
//!     &SerializerCapabilities::default(),
//!     &CancellationToken::new(),
//! )?;
//! assert!(artifacts[0].text.contains("partial class ProductName"));
//! # Ok::<(), EngineError>(())
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`valuegen_core`] - Descriptors, settings resolution, comparers, errors
//! - [`valuegen_emit`] - Emitters and the synthesis engine

// Re-export core types
pub use valuegen_core::{
    AdapterOptOuts, Artifact, CancellationToken, ComparerRef, ComplexSettings, Diagnostic,
    EmitterKind, EngineError, EngineResult, EqualityMemberDescriptor, KeyedSettings,
    MemberDescriptor, MemberEqualityDeclaration, MemberKind, OperatorsMode, ParseErrorHandling,
    RawComplexSettings, RawKeyedSettings, ResolvedComparer, SerializerCapabilities, Shape,
    TypeDescriptor, resolve_comparers,
};

// Re-export the engine surface
pub use valuegen_emit::{
    CodeWriter, PassOutcome, SynthesisRequest, Target, plan, synthesize, synthesize_all,
};

/// Prelude module for convenient imports.
///
/// Use `use valuegen::prelude::*;` to import commonly used types.
pub mod prelude {
    pub use valuegen_emit::prelude::*;
}
