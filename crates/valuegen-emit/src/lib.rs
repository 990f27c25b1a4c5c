//! valuegen-emit - Deterministic source-text emitters and the synthesis
//! engine
//!
//! This crate turns resolved descriptors from `valuegen-core` into C#
//! source-text artifacts:
//! - [`CodeWriter`] and the `csharp`/`naming` helpers for uniform rendering
//! - Shape emitters: keyed and complex primaries, comparison, arithmetic,
//!   parsing, formatting
//! - Serialization adapters for System.Text.Json, Newtonsoft.Json,
//!   MessagePack, and protobuf-net
//! - The [`engine`] module: planning, per-declaration failure isolation,
//!   and cooperative cancellation
//!
//! All emission is pure text assembly: the same request always produces
//! byte-identical artifacts.

pub mod complex;
pub mod csharp;
pub mod engine;
pub mod keyed;
pub mod naming;
pub mod operators;
pub mod parsing;
pub mod serialization;
pub mod writer;

pub use engine::{PassOutcome, SynthesisRequest, Target, plan, synthesize, synthesize_all};
pub use writer::CodeWriter;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::engine::{
        PassOutcome, SynthesisRequest, Target, plan, synthesize, synthesize_all,
    };
    pub use valuegen_core::prelude::*;
}
