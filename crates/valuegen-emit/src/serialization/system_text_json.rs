//! System.Text.Json adapter emitter.
//!
//! Keyed types get a converter deriving the runtime library's generic keyed
//! converter base, which reads/writes the bare key and funnels reads through
//! `Validate`. Complex types get a hand-written converter: unknown members
//! and missing required members are payload errors, and `Validate` runs
//! before any instance escapes. Write paths honor the ambient
//! `DefaultIgnoreCondition`: `WhenWritingNull` omits null members and
//! `WhenWritingDefault` additionally omits default-valued value members.

use super::{is_required, local_name, seen_flag};
use crate::csharp;
use crate::writer::CodeWriter;
use valuegen_core::{
    CancellationToken, EngineResult, EqualityMemberDescriptor, MemberDescriptor, MemberKind,
    TypeDescriptor,
};

const JSON_NS: &str = "global::System.Text.Json";

fn converter_name(descriptor: &TypeDescriptor) -> String {
    format!("{}JsonConverter", descriptor.name)
}

fn emit_converter_registration(w: &mut CodeWriter, descriptor: &TypeDescriptor) {
    w.line(&format!(
        "[{JSON_NS}.Serialization.JsonConverter(typeof({}))]",
        converter_name(descriptor)
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
    let key_type = key.kind.element_type_name();
    let base = if descriptor.is_reference_type {
        "KeyedJsonConverter"
    } else {
        "KeyedStructJsonConverter"
    };
    let converter = converter_name(descriptor);
    let mut w = CodeWriter::new();

    csharp::open_scaffold(&mut w, descriptor);
    emit_converter_registration(&mut w, descriptor);

    token.ensure_not_cancelled()?;

    w.open(&format!(
        "internal sealed class {converter} : {}.{base}<{tref}, {key_type}>",
        csharp::RUNTIME_NS
    ));
    w.line(&format!("public {converter}()"));
    w.line(&format!(
        "    : base({tref}.Validate, static obj => obj.{})",
        key.name
    ));
    w.open_brace();
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
    let converter = converter_name(descriptor);
    let mut w = CodeWriter::new();

    csharp::open_scaffold(&mut w, descriptor);
    emit_converter_registration(&mut w, descriptor);

    w.open(&format!(
        "internal sealed class {converter} : {JSON_NS}.Serialization.JsonConverter<{tref}>"
    ));

    emit_read(&mut w, descriptor, &tref, members);

    token.ensure_not_cancelled()?;

    emit_write(&mut w, &tref, members);

    w.close();
    csharp::close_scaffold(&mut w, descriptor);

    Ok(w.into_string())
}

fn emit_read(
    w: &mut CodeWriter,
    descriptor: &TypeDescriptor,
    tref: &str,
    members: &[EqualityMemberDescriptor],
) {
    w.open(&format!(
        "public override {tref} Read(ref {JSON_NS}.Utf8JsonReader reader, global::System.Type typeToConvert, {JSON_NS}.JsonSerializerOptions options)"
    ));
    w.open(&format!(
        "if (reader.TokenType != {JSON_NS}.JsonTokenType.StartObject)"
    ));
    w.line(&format!(
        "throw new {JSON_NS}.JsonException(\"Expected an object\");"
    ));
    w.close();
    w.blank();

    for m in members {
        w.line(&format!("{} = default;", local_declaration(&m.member)));
        if is_required(&m.member) {
            w.line(&format!("var {} = false;", seen_flag(&m.member)));
        }
    }
    if !members.is_empty() {
        w.blank();
    }

    w.open("while (reader.Read())");
    w.open(&format!(
        "if (reader.TokenType == {JSON_NS}.JsonTokenType.EndObject)"
    ));
    w.line("break;");
    w.close();
    w.blank();
    w.line("var propertyName = reader.GetString();");
    w.line("reader.Read();");
    w.blank();
    w.open("switch (propertyName)");
    for m in members {
        w.line(&format!("case \"{}\":", m.member.name));
        let read = read_expression(&m.member.kind);
        if m.member.is_nullable {
            w.line(&format!(
                "    {} = reader.TokenType == {JSON_NS}.JsonTokenType.Null ? default : {read};",
                local_name(&m.member)
            ));
        } else {
            w.line(&format!("    {} = {read};", local_name(&m.member)));
        }
        if is_required(&m.member) {
            w.line(&format!("    {} = true;", seen_flag(&m.member)));
        }
        w.line("    break;");
    }
    w.line("default:");
    w.line(&format!(
        "    throw new {JSON_NS}.JsonException($\"Unknown member '{{propertyName}}'\");"
    ));
    w.close();
    w.close();
    w.blank();

    let required: Vec<&EqualityMemberDescriptor> =
        members.iter().filter(|m| is_required(&m.member)).collect();
    if !required.is_empty() {
        let condition = required
            .iter()
            .map(|m| format!("!{}", seen_flag(&m.member)))
            .collect::<Vec<_>>()
            .join(" || ");
        w.open(&format!("if ({condition})"));
        w.line(&format!(
            "throw new {JSON_NS}.JsonException(\"Missing required member\");"
        ));
        w.close();
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
        "throw new {JSON_NS}.JsonException(validationError?.ToString() ?? \"Validation failed\");"
    ));
    w.close();
    w.blank();
    if descriptor.is_reference_type {
        w.line("return obj;");
    } else {
        w.line("return obj.Value;");
    }
    w.close();
    w.blank();
}

fn emit_write(w: &mut CodeWriter, tref: &str, members: &[EqualityMemberDescriptor]) {
    w.open(&format!(
        "public override void Write({JSON_NS}.Utf8JsonWriter writer, {tref} value, {JSON_NS}.JsonSerializerOptions options)"
    ));
    w.line("writer.WriteStartObject();");
    w.blank();

    for m in members {
        let name = &m.member.name;
        if m.member.is_nullable {
            // Null members honor both ambient omission policies; default
            // for a nullable member is null, so WhenWritingDefault omits it
            // too.
            w.open(&format!("if (value.{name} is null)"));
            w.open(&format!(
                "if (options.DefaultIgnoreCondition != {JSON_NS}.Serialization.JsonIgnoreCondition.WhenWritingNull && options.DefaultIgnoreCondition != {JSON_NS}.Serialization.JsonIgnoreCondition.WhenWritingDefault)"
            ));
            w.line(&format!("writer.WriteNull(\"{name}\");"));
            w.close();
            w.close();
            w.open("else");
            let access = if m.member.is_reference_type {
                format!("value.{name}")
            } else {
                format!("value.{name}.Value")
            };
            write_statement(w, &m.member.kind, name, &access);
            w.close();
        } else if m.member.is_reference_type {
            // Validated non-null; a reference member can never hold its
            // default value here.
            write_statement(w, &m.member.kind, name, &format!("value.{name}"));
        } else {
            let member_type = csharp::member_type(&m.member);
            w.open(&format!(
                "if (options.DefaultIgnoreCondition != {JSON_NS}.Serialization.JsonIgnoreCondition.WhenWritingDefault || !global::System.Collections.Generic.EqualityComparer<{member_type}>.Default.Equals(value.{name}, default))"
            ));
            write_statement(w, &m.member.kind, name, &format!("value.{name}"));
            w.close();
        }
    }

    w.blank();
    w.line("writer.WriteEndObject();");
    w.close();
}

fn local_declaration(member: &MemberDescriptor) -> String {
    if member.is_reference_type || member.is_nullable {
        format!(
            "{} {}",
            csharp::nullable_member_type(member),
            local_name(member)
        )
    } else {
        format!("{} {}", csharp::member_type(member), local_name(member))
    }
}

fn validate_argument(member: &MemberDescriptor) -> String {
    if member.is_reference_type && !member.is_nullable {
        format!("{}!", local_name(member))
    } else {
        local_name(member)
    }
}

fn read_expression(kind: &MemberKind) -> String {
    match kind {
        MemberKind::Boolean => "reader.GetBoolean()".to_string(),
        MemberKind::Int32 => "reader.GetInt32()".to_string(),
        MemberKind::Int64 => "reader.GetInt64()".to_string(),
        MemberKind::Decimal => "reader.GetDecimal()".to_string(),
        MemberKind::Double => "reader.GetDouble()".to_string(),
        MemberKind::String => "reader.GetString()".to_string(),
        MemberKind::DateTime => "reader.GetDateTime()".to_string(),
        MemberKind::Guid => "reader.GetGuid()".to_string(),
        MemberKind::Opaque(name) => {
            format!("{JSON_NS}.JsonSerializer.Deserialize<{name}>(ref reader, options)")
        }
    }
}

fn write_statement(w: &mut CodeWriter, kind: &MemberKind, property: &str, access: &str) {
    match kind {
        MemberKind::Boolean => {
            w.line(&format!("writer.WriteBoolean(\"{property}\", {access});"));
        }
        MemberKind::Int32 | MemberKind::Int64 | MemberKind::Decimal | MemberKind::Double => {
            w.line(&format!("writer.WriteNumber(\"{property}\", {access});"));
        }
        MemberKind::String | MemberKind::DateTime | MemberKind::Guid => {
            w.line(&format!("writer.WriteString(\"{property}\", {access});"));
        }
        MemberKind::Opaque(_) => {
            w.line(&format!("writer.WritePropertyName(\"{property}\");"));
            w.line(&format!(
                "{JSON_NS}.JsonSerializer.Serialize(writer, {access}, options);"
            ));
        }
    }
}
