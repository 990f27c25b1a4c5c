//! Newtonsoft.Json adapter emitter.
//!
//! Same contract as the System.Text.Json adapter, expressed through
//! Json.NET's converter model: keyed types derive the runtime library's
//! generic keyed converter base; complex types get a hand-written converter
//! over a loaded `JObject`. Write paths honor the serializer's
//! `NullValueHandling` and `DefaultValueHandling`.

use super::{is_required, local_name, seen_flag};
use crate::csharp;
use crate::writer::CodeWriter;
use valuegen_core::{
    CancellationToken, EngineResult, EqualityMemberDescriptor, MemberDescriptor, MemberKind,
    TypeDescriptor,
};

const NEWTONSOFT_NS: &str = "global::Newtonsoft.Json";

fn converter_name(descriptor: &TypeDescriptor) -> String {
    format!("{}NewtonsoftJsonConverter", descriptor.name)
}

fn emit_converter_registration(w: &mut CodeWriter, descriptor: &TypeDescriptor) {
    w.line(&format!(
        "[{NEWTONSOFT_NS}.JsonConverter(typeof({}))]",
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
        "KeyedNewtonsoftJsonConverter"
    } else {
        "KeyedStructNewtonsoftJsonConverter"
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
    let is_class = descriptor.is_reference_type;
    let converter = converter_name(descriptor);
    // Json.NET's generic converter is instantiated with the nullable
    // reference for classes, so the null payload case is typed.
    let converted = if is_class {
        format!("{tref}?")
    } else {
        tref.clone()
    };
    let mut w = CodeWriter::new();

    csharp::open_scaffold(&mut w, descriptor);
    emit_converter_registration(&mut w, descriptor);

    w.open(&format!(
        "internal sealed class {converter} : {NEWTONSOFT_NS}.JsonConverter<{converted}>"
    ));

    emit_read(&mut w, descriptor, &tref, &converted, members);

    token.ensure_not_cancelled()?;

    emit_write(&mut w, &converted, is_class, members);

    w.close();
    csharp::close_scaffold(&mut w, descriptor);

    Ok(w.into_string())
}

fn emit_read(
    w: &mut CodeWriter,
    descriptor: &TypeDescriptor,
    tref: &str,
    converted: &str,
    members: &[EqualityMemberDescriptor],
) {
    let is_class = descriptor.is_reference_type;

    w.open(&format!(
        "public override {converted} ReadJson({NEWTONSOFT_NS}.JsonReader reader, global::System.Type objectType, {converted} existingValue, bool hasExistingValue, {NEWTONSOFT_NS}.JsonSerializer serializer)"
    ));
    w.open(&format!(
        "if (reader.TokenType == {NEWTONSOFT_NS}.JsonToken.Null)"
    ));
    if is_class {
        w.line("return null;");
    } else {
        w.line(&format!(
            "throw new {NEWTONSOFT_NS}.JsonSerializationException(\"Unexpected null for {tref}\");"
        ));
    }
    w.close();
    w.blank();
    w.line(&format!(
        "var payload = {NEWTONSOFT_NS}.Linq.JObject.Load(reader);"
    ));
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

    w.open("foreach (var property in payload.Properties())");
    w.open("switch (property.Name)");
    for m in members {
        let element = csharp::nullable_member_type(&m.member);
        w.line(&format!("case \"{}\":", m.member.name));
        w.line(&format!(
            "    {} = property.Value.ToObject<{element}>(serializer);",
            local_name(&m.member)
        ));
        if is_required(&m.member) {
            w.line(&format!("    {} = true;", seen_flag(&m.member)));
        }
        w.line("    break;");
    }
    w.line("default:");
    w.line(&format!(
        "    throw new {NEWTONSOFT_NS}.JsonSerializationException($\"Unknown member '{{property.Name}}'\");"
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
            "throw new {NEWTONSOFT_NS}.JsonSerializationException(\"Missing required member\");"
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
        "throw new {NEWTONSOFT_NS}.JsonSerializationException(validationError?.ToString() ?? \"Validation failed\");"
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

fn emit_write(
    w: &mut CodeWriter,
    converted: &str,
    is_class: bool,
    members: &[EqualityMemberDescriptor],
) {
    w.open(&format!(
        "public override void WriteJson({NEWTONSOFT_NS}.JsonWriter writer, {converted} value, {NEWTONSOFT_NS}.JsonSerializer serializer)"
    ));
    if is_class {
        w.open("if (value is null)");
        w.line("writer.WriteNull();");
        w.line("return;");
        w.close();
        w.blank();
    }
    w.line("writer.WriteStartObject();");
    w.blank();

    for m in members {
        let name = &m.member.name;
        if m.member.is_nullable {
            // Null members honor both ambient omission policies; default
            // for a nullable member is null, so DefaultValueHandling.Ignore
            // omits it too.
            w.open(&format!("if (value.{name} is null)"));
            w.open(&format!(
                "if (serializer.NullValueHandling != {NEWTONSOFT_NS}.NullValueHandling.Ignore && !serializer.DefaultValueHandling.HasFlag({NEWTONSOFT_NS}.DefaultValueHandling.Ignore))"
            ));
            w.line(&format!("writer.WritePropertyName(\"{name}\");"));
            w.line("writer.WriteNull();");
            w.close();
            w.close();
            w.open("else");
            write_member(w, &m.member, &format!("value.{name}"));
            w.close();
        } else if m.member.is_reference_type {
            // Validated non-null; a reference member can never hold its
            // default value here.
            write_member(w, &m.member, &format!("value.{name}"));
        } else {
            let member_type = csharp::member_type(&m.member);
            w.open(&format!(
                "if (!serializer.DefaultValueHandling.HasFlag({NEWTONSOFT_NS}.DefaultValueHandling.Ignore) || !global::System.Collections.Generic.EqualityComparer<{member_type}>.Default.Equals(value.{name}, default))"
            ));
            write_member(w, &m.member, &format!("value.{name}"));
            w.close();
        }
    }

    w.blank();
    w.line("writer.WriteEndObject();");
    w.close();
}

/// Write one non-null member value.
///
/// `JsonWriter.WriteValue(object)` only handles primitive CLR types, so
/// opaque members delegate to the serializer's own converter resolution.
fn write_member(w: &mut CodeWriter, member: &MemberDescriptor, access: &str) {
    let name = &member.name;
    w.line(&format!("writer.WritePropertyName(\"{name}\");"));
    if matches!(member.kind, MemberKind::Opaque(_)) {
        w.line(&format!("serializer.Serialize(writer, {access});"));
    } else {
        w.line(&format!("writer.WriteValue({access});"));
    }
}

fn local_declaration(member: &MemberDescriptor) -> String {
    format!(
        "{} {}",
        csharp::nullable_member_type(member),
        local_name(member)
    )
}

fn validate_argument(member: &MemberDescriptor) -> String {
    let local = local_name(member);
    if member.is_nullable {
        local
    } else if member.is_reference_type {
        format!("{local}!")
    } else {
        // Required value member: surfaced as nullable by ToObject, proven
        // present by the seen flag.
        format!("{local}.Value")
    }
}
