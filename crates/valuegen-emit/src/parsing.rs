//! Parsing and formatting emitters (keyed shape only).
//!
//! Parsing goes text -> key -> `Validate`, so a parsed instance passes the
//! same validation as a constructed one. Two error policies exist:
//!
//! - `Throw`: any failure surfaces as `FormatException` (general value
//!   objects).
//! - `InvalidInstance`: a key that parses but fails validation still yields
//!   a constructed instance via the unvalidated constructor. This models an
//!   open identifier space where unknown identifiers must round-trip. A
//!   string that does not even parse to the key type still throws.
//!
//! Formatting is a passthrough of the key's `IFormattable` implementation.

use crate::csharp;
use crate::naming::parameter_name;
use crate::writer::CodeWriter;
use valuegen_core::{
    CancellationToken, EngineResult, EqualityMemberDescriptor, KeyedSettings, MemberKind,
    ParseErrorHandling, TypeDescriptor,
};

/// Emit the parsing artifact: `Parse` and `TryParse`.
pub fn emit_keyed_parsing(
    descriptor: &TypeDescriptor,
    key: &EqualityMemberDescriptor,
    settings: &KeyedSettings,
    token: &CancellationToken,
) -> EngineResult<String> {
    let ctx = ParsingCtx {
        descriptor,
        key,
        settings,
    };
    let mut w = CodeWriter::new();

    csharp::open_scaffold(&mut w, descriptor);
    csharp::open_type(&mut w, descriptor, &[]);

    ctx.emit_parse(&mut w);

    token.ensure_not_cancelled()?;

    ctx.emit_try_parse(&mut w);

    if ctx.settings.parse_error_handling == ParseErrorHandling::InvalidInstance {
        ctx.emit_create_invalid_instance(&mut w);
    }

    w.close();
    csharp::close_scaffold(&mut w, descriptor);

    Ok(w.into_string())
}

struct ParsingCtx<'a> {
    descriptor: &'a TypeDescriptor,
    key: &'a EqualityMemberDescriptor,
    settings: &'a KeyedSettings,
}

impl ParsingCtx<'_> {
    fn type_reference(&self) -> String {
        csharp::type_reference(self.descriptor)
    }

    fn key_type(&self) -> String {
        csharp::member_type(&self.key.member)
    }

    fn key_is_string(&self) -> bool {
        self.key.member.kind == MemberKind::String
    }

    /// Expression turning the input text into a key value, throwing
    /// `FormatException` on malformed input.
    fn parse_expression(&self) -> String {
        if self.key_is_string() {
            "s".to_string()
        } else {
            format!("{}.Parse(s, provider)", self.key_type())
        }
    }

    fn emit_parse(&self, w: &mut CodeWriter) {
        let tref = self.type_reference();

        w.open(&format!(
            "public static {tref} Parse(string s, global::System.IFormatProvider? provider)"
        ));
        w.line(&format!("var key = {};", self.parse_expression()));
        w.line("var validationError = Validate(key, provider, out var obj);");
        w.blank();

        match self.settings.parse_error_handling {
            ParseErrorHandling::Throw => {
                w.open("if (validationError is not null)");
                w.line("throw new global::System.FormatException(validationError.ToString());");
                w.close();
                w.blank();
                w.line("return obj!;");
            }
            ParseErrorHandling::InvalidInstance => {
                w.open("if (validationError is null && obj is not null)");
                if self.descriptor.is_reference_type {
                    w.line("return obj;");
                } else {
                    w.line("return obj.Value;");
                }
                w.close();
                w.blank();
                w.line("return CreateInvalidInstance(key);");
            }
        }

        w.close();
        w.blank();
    }

    fn emit_try_parse(&self, w: &mut CodeWriter) {
        let tref = self.type_reference();

        w.open(&format!(
            "public static bool TryParse(string? s, global::System.IFormatProvider? provider, out {tref}? result)"
        ));
        w.open("if (s is null)");
        w.line("result = default;");
        w.line("return false;");
        w.close();
        w.blank();

        if self.key_is_string() {
            w.line("var key = s;");
        } else {
            w.open(&format!(
                "if (!{}.TryParse(s, provider, out var key))",
                self.key_type()
            ));
            w.line("result = default;");
            w.line("return false;");
            w.close();
            w.blank();
        }

        w.line("var validationError = Validate(key, provider, out var obj);");
        w.blank();
        w.open("if (validationError is null && obj is not null)");
        w.line("result = obj;");
        w.line("return true;");
        w.close();
        w.blank();
        w.line("result = default;");
        w.line("return false;");
        w.close();
        w.blank();
    }

    fn emit_create_invalid_instance(&self, w: &mut CodeWriter) {
        let tref = self.type_reference();
        let param = parameter_name(&self.key.member.name);

        w.open(&format!(
            "private static {tref} CreateInvalidInstance({} {param})",
            self.key_type()
        ));
        w.line(&format!("return new {tref}({param});"));
        w.close();
    }
}

/// Emit the formatting artifact: `IFormattable` delegating to the key.
pub fn emit_keyed_formatting(
    descriptor: &TypeDescriptor,
    key: &EqualityMemberDescriptor,
    token: &CancellationToken,
) -> EngineResult<String> {
    let key_name = &key.member.name;
    let mut w = CodeWriter::new();

    csharp::open_scaffold(&mut w, descriptor);
    csharp::open_type(
        &mut w,
        descriptor,
        &["global::System.IFormattable".to_string()],
    );

    w.open("public string ToString(string? format, global::System.IFormatProvider? formatProvider)");
    w.line(&format!(
        "return {key_name}.ToString(format, formatProvider);"
    ));
    w.close();
    w.blank();

    token.ensure_not_cancelled()?;

    w.open("public string ToString(string? format)");
    w.line("return ToString(format, null);");
    w.close();

    w.close();
    csharp::close_scaffold(&mut w, descriptor);

    Ok(w.into_string())
}

#[cfg(test)]
#[path = "parsing/parsing_tests.rs"]
mod parsing_tests;
