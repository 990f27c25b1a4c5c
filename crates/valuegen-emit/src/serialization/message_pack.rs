//! MessagePack adapter emitter.
//!
//! Keyed types serialize as the bare key value; complex types as a
//! fixed-length array in member declaration order, nullable members encoded
//! as nil. A payload whose array length differs from the member count is
//! rejected before any member is read. Kinds with native reader/writer
//! support go direct; decimal, Guid, and opaque kinds round-trip through the
//! options resolver.

use super::local_name;
use crate::csharp;
use crate::writer::CodeWriter;
use valuegen_core::{
    CancellationToken, EngineResult, EqualityMemberDescriptor, MemberDescriptor, MemberKind,
    TypeDescriptor,
};

const MSGPACK_NS: &str = "global::MessagePack";

fn formatter_name(descriptor: &TypeDescriptor) -> String {
    format!("{}MessagePackFormatter", descriptor.name)
}

fn emit_formatter_registration(w: &mut CodeWriter, descriptor: &TypeDescriptor) {
    w.line(&format!(
        "[{MSGPACK_NS}.MessagePackFormatter(typeof({}))]",
        formatter_name(descriptor)
    ));
    w.open(&format!(
        "partial {} {}",
        descriptor.declaration_keyword(),
        csharp::type_reference(descriptor)
    ));
    w.close();
    w.blank();
}

/// Emit the adapter for a keyed type.
pub fn emit_keyed(
    descriptor: &TypeDescriptor,
    key: &MemberDescriptor,
    token: &CancellationToken,
) -> EngineResult<String> {
    let tref = csharp::type_reference(descriptor);
    let is_class = descriptor.is_reference_type;
    let formatter = formatter_name(descriptor);
    let converted = if is_class {
        format!("{tref}?")
    } else {
        tref.clone()
    };
    let mut w = CodeWriter::new();

    csharp::open_scaffold(&mut w, descriptor);
    emit_formatter_registration(&mut w, descriptor);

    w.open(&format!(
        "internal sealed class {formatter} : {MSGPACK_NS}.Formatters.IMessagePackFormatter<{converted}>"
    ));

    // Deserialize: key -> Validate -> instance.
    w.open(&format!(
        "public {converted} Deserialize(ref {MSGPACK_NS}.MessagePackReader reader, {MSGPACK_NS}.MessagePackSerializerOptions options)"
    ));
    w.open("if (reader.TryReadNil())");
    if is_class {
        w.line("return null;");
    } else {
        w.line(&format!(
            "throw new {MSGPACK_NS}.MessagePackSerializationException(\"Unexpected nil for {tref}\");"
        ));
    }
    w.close();
    w.blank();
    w.line(&format!("var key = {};", read_expression(&key.kind)));
    w.line(&format!(
        "var validationError = {}.Validate(key, null, out var obj);",
        descriptor.name
    ));
    w.blank();
    w.open("if (validationError is not null || obj is null)");
    w.line(&format!(
        "throw new {MSGPACK_NS}.MessagePackSerializationException(validationError?.ToString() ?? \"Validation failed\");"
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

    token.ensure_not_cancelled()?;

    // Serialize: bare key.
    w.open(&format!(
        "public void Serialize(ref {MSGPACK_NS}.MessagePackWriter writer, {converted} value, {MSGPACK_NS}.MessagePackSerializerOptions options)"
    ));
    if is_class {
        w.open("if (value is null)");
        w.line("writer.WriteNil();");
        w.line("return;");
        w.close();
        w.blank();
    }
    write_statement(&mut w, &key.kind, &format!("value.{}", key.name));
    w.close();

    w.close();
    csharp::close_scaffold(&mut w, descriptor);

    Ok(w.into_string())
}

/// Emit the adapter for a complex type.
pub fn emit_complex(
    descriptor: &TypeDescriptor,
    members: &[EqualityMemberDescriptor],
    token: &CancellationToken,
) -> EngineResult<String> {
    let tref = csharp::type_reference(descriptor);
    let is_class = descriptor.is_reference_type;
    let formatter = formatter_name(descriptor);
    let converted = if is_class {
        format!("{tref}?")
    } else {
        tref.clone()
    };
    let mut w = CodeWriter::new();

    csharp::open_scaffold(&mut w, descriptor);
    emit_formatter_registration(&mut w, descriptor);

    w.open(&format!(
        "internal sealed class {formatter} : {MSGPACK_NS}.Formatters.IMessagePackFormatter<{converted}>"
    ));

    emit_complex_deserialize(&mut w, descriptor, &tref, &converted, members);

    token.ensure_not_cancelled()?;

    emit_complex_serialize(&mut w, &converted, is_class, members);

    w.close();
    csharp::close_scaffold(&mut w, descriptor);

    Ok(w.into_string())
}

fn emit_complex_deserialize(
    w: &mut CodeWriter,
    descriptor: &TypeDescriptor,
    tref: &str,
    converted: &str,
    members: &[EqualityMemberDescriptor],
) {
    let is_class = descriptor.is_reference_type;

    w.open(&format!(
        "public {converted} Deserialize(ref {MSGPACK_NS}.MessagePackReader reader, {MSGPACK_NS}.MessagePackSerializerOptions options)"
    ));
    w.open("if (reader.TryReadNil())");
    if is_class {
        w.line("return null;");
    } else {
        w.line(&format!(
            "throw new {MSGPACK_NS}.MessagePackSerializationException(\"Unexpected nil for {tref}\");"
        ));
    }
    w.close();
    w.blank();
    // Named to avoid clashing with a member local (a member may well be
    // called Count).
    w.line("var memberCount = reader.ReadArrayHeader();");
    w.blank();
    w.open(&format!("if (memberCount != {})", members.len()));
    w.line(&format!(
        "throw new {MSGPACK_NS}.MessagePackSerializationException($\"Invalid member count {{memberCount}} for {tref}\");"
    ));
    w.close();
    w.blank();

    for m in members {
        let local = local_name(&m.member);
        let read = read_expression(&m.member.kind);
        if m.member.is_nullable {
            w.line(&format!(
                "var {local} = reader.TryReadNil() ? default({}) : {read};",
                csharp::nullable_member_type(&m.member)
            ));
        } else {
            w.line(&format!("var {local} = {read};"));
        }
    }
    if !members.is_empty() {
        w.blank();
    }

    let args = members
        .iter()
        .map(|m| validate_argument(&m.member))
        .collect::<Vec<_>>()
        .join(", ");
    let separator = if args.is_empty() { "" } else { ", " };
    w.line(&format!(
        "var validationError = {}.Validate({args}{separator}out var obj);",
        descriptor.name
    ));
    w.blank();
    w.open("if (validationError is not null || obj is null)");
    w.line(&format!(
        "throw new {MSGPACK_NS}.MessagePackSerializationException(validationError?.ToString() ?? \"Validation failed\");"
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

fn emit_complex_serialize(
    w: &mut CodeWriter,
    converted: &str,
    is_class: bool,
    members: &[EqualityMemberDescriptor],
) {
    w.open(&format!(
        "public void Serialize(ref {MSGPACK_NS}.MessagePackWriter writer, {converted} value, {MSGPACK_NS}.MessagePackSerializerOptions options)"
    ));
    if is_class {
        w.open("if (value is null)");
        w.line("writer.WriteNil();");
        w.line("return;");
        w.close();
        w.blank();
    }
    w.line(&format!("writer.WriteArrayHeader({});", members.len()));
    w.blank();

    for m in members {
        let name = &m.member.name;
        if m.member.is_nullable {
            w.open(&format!("if (value.{name} is null)"));
            w.line("writer.WriteNil();");
            w.close();
            w.open("else");
            let access = if m.member.is_reference_type {
                format!("value.{name}")
            } else {
                format!("value.{name}.Value")
            };
            write_statement(w, &m.member.kind, &access);
            w.close();
        } else {
            write_statement(w, &m.member.kind, &format!("value.{name}"));
        }
    }
    w.close();
}

fn validate_argument(member: &MemberDescriptor) -> String {
    if member.is_reference_type && !member.is_nullable {
        format!("{}!", local_name(member))
    } else {
        local_name(member)
    }
}

/// Whether the reader/writer has a native method for this kind.
fn has_native_support(kind: &MemberKind) -> bool {
    matches!(
        kind,
        MemberKind::Boolean
            | MemberKind::Int32
            | MemberKind::Int64
            | MemberKind::Double
            | MemberKind::String
            | MemberKind::DateTime
    )
}

fn read_expression(kind: &MemberKind) -> String {
    match kind {
        MemberKind::Boolean => "reader.ReadBoolean()".to_string(),
        MemberKind::Int32 => "reader.ReadInt32()".to_string(),
        MemberKind::Int64 => "reader.ReadInt64()".to_string(),
        MemberKind::Double => "reader.ReadDouble()".to_string(),
        MemberKind::String => "reader.ReadString()".to_string(),
        MemberKind::DateTime => "reader.ReadDateTime()".to_string(),
        MemberKind::Decimal | MemberKind::Guid | MemberKind::Opaque(_) => {
            let element = kind.element_type_name();
            format!(
                "{MSGPACK_NS}.FormatterResolverExtensions.GetFormatterWithVerify<{element}>(options.Resolver).Deserialize(ref reader, options)"
            )
        }
    }
}

fn write_statement(w: &mut CodeWriter, kind: &MemberKind, access: &str) {
    if has_native_support(kind) {
        w.line(&format!("writer.Write({access});"));
    } else {
        let element = kind.element_type_name();
        w.line(&format!(
            "{MSGPACK_NS}.FormatterResolverExtensions.GetFormatterWithVerify<{element}>(options.Resolver).Serialize(ref writer, {access}, options);"
        ));
    }
}
