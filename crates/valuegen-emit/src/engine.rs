//! Synthesis engine: plans which emitters apply to each target and runs
//! them in a deterministic order.
//!
//! Planning is a pure function of the resolved target and the serializer
//! capabilities, so the same input always yields the same artifact set in
//! the same order. A pass isolates failures per declaration: one failing
//! target is reported as a diagnostic and the rest of the pass continues.
//! Only cooperative cancellation aborts the whole pass.

use crate::operators::ArithmeticOp;
use crate::{complex, keyed, operators, parsing, serialization};
use valuegen_core::{
    AdapterOptOuts, Artifact, CancellationToken, ComplexSettings, Diagnostic, EmitterKind,
    EngineError, EngineResult, EqualityMemberDescriptor, KeyedSettings, MemberEqualityDeclaration,
    RawComplexSettings, RawKeyedSettings, SerializerCapabilities, TypeDescriptor,
    resolve_comparers,
};

/// One declaration to synthesize, as supplied by the host.
#[derive(Debug, Clone)]
pub enum Target {
    Keyed {
        descriptor: TypeDescriptor,
        key: MemberEqualityDeclaration,
        settings: RawKeyedSettings,
        opt_outs: AdapterOptOuts,
    },
    Complex {
        descriptor: TypeDescriptor,
        members: Vec<MemberEqualityDeclaration>,
        settings: RawComplexSettings,
        opt_outs: AdapterOptOuts,
    },
}

impl Target {
    pub fn descriptor(&self) -> &TypeDescriptor {
        match self {
            Target::Keyed { descriptor, .. } | Target::Complex { descriptor, .. } => descriptor,
        }
    }
}

/// A full synthesis pass: every declaration plus ambient capabilities.
#[derive(Debug, Clone, Default)]
pub struct SynthesisRequest {
    pub targets: Vec<Target>,
    pub capabilities: SerializerCapabilities,
}

/// Result of a pass: artifacts for every successful declaration, one
/// diagnostic per failed declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassOutcome {
    pub artifacts: Vec<Artifact>,
    pub diagnostics: Vec<Diagnostic>,
}

/// A target with settings resolved and comparers validated.
enum ResolvedTarget {
    Keyed {
        descriptor: TypeDescriptor,
        key: EqualityMemberDescriptor,
        settings: KeyedSettings,
        opt_outs: AdapterOptOuts,
    },
    Complex {
        descriptor: TypeDescriptor,
        members: Vec<EqualityMemberDescriptor>,
        settings: ComplexSettings,
        opt_outs: AdapterOptOuts,
    },
}

fn resolve(target: &Target) -> ResolvedTarget {
    match target {
        Target::Keyed {
            descriptor,
            key,
            settings,
            opt_outs,
        } => {
            let mut resolved =
                resolve_comparers(&descriptor.qualified_name(), std::slice::from_ref(key));
            ResolvedTarget::Keyed {
                descriptor: descriptor.clone(),
                key: resolved.remove(0),
                settings: KeyedSettings::resolve(settings),
                opt_outs: *opt_outs,
            }
        }
        Target::Complex {
            descriptor,
            members,
            settings,
            opt_outs,
        } => ResolvedTarget::Complex {
            descriptor: descriptor.clone(),
            members: resolve_comparers(&descriptor.qualified_name(), members),
            settings: ComplexSettings::resolve(settings),
            opt_outs: *opt_outs,
        },
    }
}

impl ResolvedTarget {
    fn descriptor(&self) -> &TypeDescriptor {
        match self {
            ResolvedTarget::Keyed { descriptor, .. }
            | ResolvedTarget::Complex { descriptor, .. } => descriptor,
        }
    }

    /// Whether a serialization adapter for one format should be emitted.
    fn serializer_applies(&self, capability: bool, opted_out: bool, skip_factories: bool) -> bool {
        // Generic declarations cannot carry `typeof` converter attributes.
        capability
            && !opted_out
            && !skip_factories
            && self.descriptor().generics_arity == 0
    }

    /// Which emitters apply, in deterministic planning order.
    fn plan(&self, capabilities: &SerializerCapabilities) -> Vec<EmitterKind> {
        EmitterKind::ALL
            .into_iter()
            .filter(|kind| self.applies(*kind, capabilities))
            .collect()
    }

    fn applies(&self, kind: EmitterKind, capabilities: &SerializerCapabilities) -> bool {
        match self {
            ResolvedTarget::Keyed {
                key,
                settings,
                opt_outs,
                ..
            } => match kind {
                EmitterKind::Primary => true,
                EmitterKind::Comparison => {
                    settings.comparison_operators.emits()
                        && !settings.skip_ordering
                        && key.member.kind.supports_comparison()
                }
                EmitterKind::Addition
                | EmitterKind::Subtraction
                | EmitterKind::Multiplication
                | EmitterKind::Division => {
                    let op = arithmetic_op(kind);
                    op.mode(settings).emits()
                        && key.member.kind.is_numeric()
                        && !settings.skip_factory_methods
                }
                EmitterKind::Parsing => {
                    !settings.skip_parsing && key.member.kind.supports_parsing()
                }
                EmitterKind::Formatting => {
                    !settings.skip_formatting && key.member.kind.supports_formatting()
                }
                EmitterKind::SystemTextJson => self.serializer_applies(
                    capabilities.system_text_json,
                    opt_outs.system_text_json,
                    settings.skip_factory_methods,
                ),
                EmitterKind::NewtonsoftJson => self.serializer_applies(
                    capabilities.newtonsoft_json,
                    opt_outs.newtonsoft_json,
                    settings.skip_factory_methods,
                ),
                EmitterKind::MessagePack => self.serializer_applies(
                    capabilities.message_pack,
                    opt_outs.message_pack,
                    settings.skip_factory_methods,
                ),
                EmitterKind::ProtobufNet => self.serializer_applies(
                    capabilities.protobuf_net,
                    opt_outs.protobuf_net,
                    settings.skip_factory_methods,
                ),
            },
            ResolvedTarget::Complex {
                settings, opt_outs, ..
            } => match kind {
                EmitterKind::Primary => true,
                EmitterKind::Comparison
                | EmitterKind::Addition
                | EmitterKind::Subtraction
                | EmitterKind::Multiplication
                | EmitterKind::Division
                | EmitterKind::Parsing
                | EmitterKind::Formatting => false,
                EmitterKind::SystemTextJson => self.serializer_applies(
                    capabilities.system_text_json,
                    opt_outs.system_text_json,
                    settings.skip_factory_methods,
                ),
                EmitterKind::NewtonsoftJson => self.serializer_applies(
                    capabilities.newtonsoft_json,
                    opt_outs.newtonsoft_json,
                    settings.skip_factory_methods,
                ),
                EmitterKind::MessagePack => self.serializer_applies(
                    capabilities.message_pack,
                    opt_outs.message_pack,
                    settings.skip_factory_methods,
                ),
                EmitterKind::ProtobufNet => self.serializer_applies(
                    capabilities.protobuf_net,
                    opt_outs.protobuf_net,
                    settings.skip_factory_methods,
                ),
            },
        }
    }

    fn emit(&self, kind: EmitterKind, token: &CancellationToken) -> EngineResult<String> {
        match self {
            ResolvedTarget::Keyed {
                descriptor,
                key,
                settings,
                ..
            } => match kind {
                EmitterKind::Primary => keyed::emit_keyed_primary(descriptor, key, settings, token),
                EmitterKind::Comparison => {
                    operators::emit_keyed_comparison(descriptor, key, settings, token)
                }
                EmitterKind::Addition
                | EmitterKind::Subtraction
                | EmitterKind::Multiplication
                | EmitterKind::Division => operators::emit_keyed_arithmetic(
                    descriptor,
                    key,
                    settings,
                    arithmetic_op(kind),
                    token,
                ),
                EmitterKind::Parsing => {
                    parsing::emit_keyed_parsing(descriptor, key, settings, token)
                }
                EmitterKind::Formatting => parsing::emit_keyed_formatting(descriptor, key, token),
                EmitterKind::SystemTextJson => {
                    serialization::system_text_json::emit_keyed(descriptor, &key.member, token)
                }
                EmitterKind::NewtonsoftJson => {
                    serialization::newtonsoft_json::emit_keyed(descriptor, &key.member, token)
                }
                EmitterKind::MessagePack => {
                    serialization::message_pack::emit_keyed(descriptor, &key.member, token)
                }
                EmitterKind::ProtobufNet => {
                    serialization::protobuf_net::emit_keyed(descriptor, &key.member, token)
                }
            },
            ResolvedTarget::Complex {
                descriptor,
                members,
                settings,
                ..
            } => match kind {
                EmitterKind::Primary => {
                    complex::emit_complex_primary(descriptor, members, settings, token)
                }
                EmitterKind::Comparison
                | EmitterKind::Addition
                | EmitterKind::Subtraction
                | EmitterKind::Multiplication
                | EmitterKind::Division
                | EmitterKind::Parsing
                | EmitterKind::Formatting => Err(EngineError::ShapeMismatch {
                    emitter: kind.name(),
                    shape: "complex",
                    type_name: descriptor.qualified_name(),
                }),
                EmitterKind::SystemTextJson => {
                    serialization::system_text_json::emit_complex(descriptor, members, token)
                }
                EmitterKind::NewtonsoftJson => {
                    serialization::newtonsoft_json::emit_complex(descriptor, members, token)
                }
                EmitterKind::MessagePack => {
                    serialization::message_pack::emit_complex(descriptor, members, token)
                }
                EmitterKind::ProtobufNet => {
                    serialization::protobuf_net::emit_complex(descriptor, members, token)
                }
            },
        }
    }
}

fn arithmetic_op(kind: EmitterKind) -> ArithmeticOp {
    match kind {
        EmitterKind::Addition => ArithmeticOp::Addition,
        EmitterKind::Subtraction => ArithmeticOp::Subtraction,
        EmitterKind::Multiplication => ArithmeticOp::Multiplication,
        _ => ArithmeticOp::Division,
    }
}

/// Which emitters would run for a target. Exposed for dry-run inspection.
pub fn plan(target: &Target, capabilities: &SerializerCapabilities) -> Vec<EmitterKind> {
    resolve(target).plan(capabilities)
}

/// Synthesize all artifacts for one target.
pub fn synthesize(
    target: &Target,
    capabilities: &SerializerCapabilities,
    token: &CancellationToken,
) -> EngineResult<Vec<Artifact>> {
    let resolved = resolve(target);
    let descriptor = resolved.descriptor();
    let kinds = resolved.plan(capabilities);

    tracing::debug!(
        type_name = %descriptor.qualified_name(),
        emitters = kinds.len(),
        "planned emission"
    );

    let mut artifacts = Vec::with_capacity(kinds.len());
    for kind in kinds {
        token.ensure_not_cancelled()?;
        let text = resolved.emit(kind, token)?;
        artifacts.push(Artifact::new(descriptor.name.clone(), kind, text));
    }

    Ok(artifacts)
}

/// Run a full pass over every target in the request.
///
/// A failing declaration is reported once and skipped; cancellation is the
/// only error that aborts the pass.
pub fn synthesize_all(
    request: &SynthesisRequest,
    token: &CancellationToken,
) -> EngineResult<PassOutcome> {
    let mut outcome = PassOutcome::default();

    for target in &request.targets {
        token.ensure_not_cancelled()?;

        match synthesize(target, &request.capabilities, token) {
            Ok(artifacts) => outcome.artifacts.extend(artifacts),
            Err(EngineError::Cancelled) => return Err(EngineError::Cancelled),
            Err(error) => {
                let type_name = target.descriptor().qualified_name();
                tracing::warn!(%type_name, %error, "declaration failed, skipping");
                outcome.diagnostics.push(Diagnostic::new(type_name, &error));
            }
        }
    }

    tracing::info!(
        artifacts = outcome.artifacts.len(),
        diagnostics = outcome.diagnostics.len(),
        "synthesis pass complete"
    );

    Ok(outcome)
}
