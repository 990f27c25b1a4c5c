//! valuegen-core - Descriptor model, settings resolution, and comparer policy
//!
//! This crate provides the foundational types for the valuegen synthesis
//! engine:
//! - [`TypeDescriptor`] / [`MemberDescriptor`] / [`Shape`] describing one
//!   synthesis target
//! - [`KeyedSettings`] / [`ComplexSettings`] resolved from raw flags
//! - [`resolve_comparers`] for the per-member equality/ordering policy
//! - [`Artifact`] / [`EmitterKind`] addressing emitted text
//! - [`EngineError`] / [`Diagnostic`] for per-declaration failure isolation
//! - [`CancellationToken`] for cooperative cancellation
//!
//! Everything here is immutable and structurally comparable; a synthesis
//! pass reads its inputs, emits text, and shares no mutable state with any
//! other pass.

mod artifact;
mod cancellation;
mod comparers;
mod descriptor;
mod error;
mod settings;

pub use artifact::{Artifact, EmitKey, EmitterKind};
pub use cancellation::CancellationToken;
pub use comparers::{
    ComparerRef, EqualityMemberDescriptor, MemberEqualityDeclaration, ResolvedComparer,
    resolve_comparers,
};
pub use descriptor::{MemberDescriptor, MemberKind, Shape, TypeDescriptor};
pub use error::{Diagnostic, EngineError, EngineResult};
pub use settings::{
    AdapterOptOuts, ComplexSettings, ConversionMode, KeyedSettings, OperatorsMode,
    ParseErrorHandling, RawComplexSettings, RawKeyedSettings, ResolvedSettings,
    SerializerCapabilities,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Artifact, CancellationToken, ComparerRef, Diagnostic, EmitterKind, EngineError,
        EngineResult, EqualityMemberDescriptor, KeyedSettings, MemberDescriptor,
        MemberEqualityDeclaration, MemberKind, OperatorsMode, RawComplexSettings,
        RawKeyedSettings, SerializerCapabilities, Shape, TypeDescriptor, resolve_comparers,
    };
}
