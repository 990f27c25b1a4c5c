//! protobuf-net adapter emitter.
//!
//! protobuf-net has no converter model, so the adapter is a surrogate: a
//! mutable `[ProtoContract]` class with one `[ProtoMember]` per member and
//! implicit conversions to and from the synthesized type. The
//! surrogate-to-value conversion runs `Validate` and raises `ProtoException`
//! on failure. A module initializer registers the surrogate with the default
//! runtime type model.

use crate::csharp;
use crate::writer::CodeWriter;
use valuegen_core::{
    CancellationToken, EngineResult, EqualityMemberDescriptor, MemberDescriptor, TypeDescriptor,
};

const PROTO_NS: &str = "global::ProtoBuf";

fn surrogate_name(descriptor: &TypeDescriptor) -> String {
    format!("{}Surrogate", descriptor.name)
}

fn registration_name(descriptor: &TypeDescriptor) -> String {
    format!("{}ProtoRegistration", descriptor.name)
}

/// Emit the adapter for a keyed type: a single-member surrogate.
pub fn emit_keyed(
    descriptor: &TypeDescriptor,
    key: &MemberDescriptor,
    token: &CancellationToken,
) -> EngineResult<String> {
    let members = [key.clone()];
    emit_surrogate(descriptor, &members, true, token)
}

/// Emit the adapter for a complex type: a member-wise surrogate.
pub fn emit_complex(
    descriptor: &TypeDescriptor,
    members: &[EqualityMemberDescriptor],
    token: &CancellationToken,
) -> EngineResult<String> {
    let members: Vec<MemberDescriptor> = members.iter().map(|m| m.member.clone()).collect();
    emit_surrogate(descriptor, &members, false, token)
}

fn emit_surrogate(
    descriptor: &TypeDescriptor,
    members: &[MemberDescriptor],
    keyed: bool,
    token: &CancellationToken,
) -> EngineResult<String> {
    let tref = csharp::type_reference(descriptor);
    let surrogate = surrogate_name(descriptor);
    let mut w = CodeWriter::new();

    csharp::open_scaffold(&mut w, descriptor);

    w.line(&format!("[{PROTO_NS}.ProtoContract]"));
    w.open(&format!("internal sealed class {surrogate}"));

    for (index, member) in members.iter().enumerate() {
        w.line(&format!("[{PROTO_NS}.ProtoMember({})]", index + 1));
        w.line(&format!(
            "public {} {} {{ get; set; }}",
            surrogate_member_type(member),
            member.name
        ));
        w.blank();
    }

    token.ensure_not_cancelled()?;

    emit_from_surrogate(&mut w, descriptor, &tref, &surrogate, members, keyed);
    emit_to_surrogate(&mut w, descriptor, &tref, &surrogate, members);

    w.close();
    w.blank();

    token.ensure_not_cancelled()?;

    emit_registration(&mut w, descriptor, &tref, &surrogate);

    csharp::close_scaffold(&mut w, descriptor);

    Ok(w.into_string())
}

/// Surrogate properties are nullable for reference kinds so an empty
/// surrogate is constructible; required-ness is enforced by `Validate`.
fn surrogate_member_type(member: &MemberDescriptor) -> String {
    if member.is_reference_type || member.is_nullable {
        csharp::nullable_member_type(member)
    } else {
        csharp::member_type(member)
    }
}

fn emit_from_surrogate(
    w: &mut CodeWriter,
    descriptor: &TypeDescriptor,
    tref: &str,
    surrogate: &str,
    members: &[MemberDescriptor],
    keyed: bool,
) {
    let is_class = descriptor.is_reference_type;

    if is_class {
        w.open(&format!(
            "public static implicit operator {tref}?({surrogate}? surrogate)"
        ));
        w.open("if (surrogate is null)");
        w.line("return null;");
        w.close();
    } else {
        w.open(&format!(
            "public static implicit operator {tref}({surrogate}? surrogate)"
        ));
        w.open("if (surrogate is null)");
        w.line("return default;");
        w.close();
    }
    w.blank();

    let mut args: Vec<String> = members
        .iter()
        .map(|m| {
            let access = format!("surrogate.{}", m.name);
            if m.is_reference_type && !m.is_nullable {
                format!("{access}!")
            } else {
                access
            }
        })
        .collect();
    if keyed {
        // Keyed Validate additionally takes a format provider.
        args.push("null".to_string());
    }
    let separator = if args.is_empty() { "" } else { ", " };
    w.line(&format!(
        "var validationError = {}.Validate({}{separator}out var obj);",
        descriptor.name,
        args.join(", ")
    ));
    w.blank();
    w.open("if (validationError is not null || obj is null)");
    w.line(&format!(
        "throw new {PROTO_NS}.ProtoException(validationError?.ToString() ?? \"Validation failed\");"
    ));
    w.close();
    w.blank();
    if is_class {
        w.line("return obj;");
    } else {
        w.line("return obj.Value;");
    }
    w.close();
    w.blank();
}

fn emit_to_surrogate(
    w: &mut CodeWriter,
    descriptor: &TypeDescriptor,
    tref: &str,
    surrogate: &str,
    members: &[MemberDescriptor],
) {
    let is_class = descriptor.is_reference_type;

    if is_class {
        w.open(&format!(
            "public static implicit operator {surrogate}?({tref}? value)"
        ));
        w.open("if (value is null)");
        w.line("return null;");
        w.close();
        w.blank();
    } else {
        w.open(&format!(
            "public static implicit operator {surrogate}({tref} value)"
        ));
    }

    if members.is_empty() {
        w.line(&format!("return new {surrogate}();"));
    } else {
        w.line(&format!("return new {surrogate}"));
        w.open_brace();
        for member in members {
            w.line(&format!("{} = value.{},", member.name, member.name));
        }
        w.close_with(";");
    }
    w.close();
    w.blank();
}

fn emit_registration(
    w: &mut CodeWriter,
    descriptor: &TypeDescriptor,
    tref: &str,
    surrogate: &str,
) {
    w.open(&format!(
        "internal static class {}",
        registration_name(descriptor)
    ));
    w.line("[global::System.Runtime.CompilerServices.ModuleInitializer]");
    w.open("internal static void Register()");
    w.line(&format!(
        "{PROTO_NS}.Meta.RuntimeTypeModel.Default.Add(typeof({tref}), false).SetSurrogate(typeof({surrogate}));"
    ));
    w.close();
    w.close();
}
