//! Primary emitter for the keyed shape.
//!
//! Emits, for a descriptor with exactly one key member: the validating
//! factory triad (`Validate`/`Create`/`TryCreate`), the private constructor,
//! conversion operators to/from the key type, comparer-aware equality and
//! hashing, equality operators, and `ToString`.
//!
//! Failure semantics of the emitted code: `Validate` and `TryCreate` never
//! throw for data-dependent failures; only `Create` converts a populated
//! validation error into an exception. A null key where the configuration
//! does not allow null is a programmer-contract violation and throws from
//! `Validate` immediately. The private constructor performs no validation —
//! that is the hook the enumerated-singleton generator uses to build
//! "invalid but constructed" instances.

use crate::csharp;
use crate::naming::parameter_name;
use crate::writer::CodeWriter;
use valuegen_core::{
    CancellationToken, ConversionMode, EngineResult, EqualityMemberDescriptor, KeyedSettings,
    TypeDescriptor,
};

/// Emit the primary artifact for a keyed type.
pub fn emit_keyed_primary(
    descriptor: &TypeDescriptor,
    key: &EqualityMemberDescriptor,
    settings: &KeyedSettings,
    token: &CancellationToken,
) -> EngineResult<String> {
    let ctx = Ctx {
        descriptor,
        key,
        settings,
    };
    let mut w = CodeWriter::new();

    csharp::open_scaffold(&mut w, descriptor);
    csharp::open_type(
        &mut w,
        descriptor,
        &[format!(
            "global::System.IEquatable<{}>",
            ctx.type_reference()
        )],
    );

    w.line(&csharp::hash_seed_field(descriptor));
    w.blank();
    ctx.emit_key_property(&mut w);
    ctx.emit_default_instance(&mut w);
    ctx.emit_constructor(&mut w);

    token.ensure_not_cancelled()?;

    if !settings.skip_factory_methods {
        ctx.emit_validate(&mut w);
        ctx.emit_create(&mut w);
        ctx.emit_try_create(&mut w);
        ctx.emit_factory_hooks(&mut w);
    }

    token.ensure_not_cancelled()?;

    ctx.emit_conversion_to_key(&mut w);
    ctx.emit_conversion_from_key(&mut w);

    token.ensure_not_cancelled()?;

    ctx.emit_equality(&mut w);
    ctx.emit_hash_code(&mut w);
    ctx.emit_equality_operators(&mut w);

    if !settings.skip_to_string {
        ctx.emit_to_string(&mut w);
    }

    w.close();
    csharp::close_scaffold(&mut w, descriptor);

    Ok(w.into_string())
}

struct Ctx<'a> {
    descriptor: &'a TypeDescriptor,
    key: &'a EqualityMemberDescriptor,
    settings: &'a KeyedSettings,
}

impl Ctx<'_> {
    fn type_reference(&self) -> String {
        csharp::type_reference(self.descriptor)
    }

    fn is_struct(&self) -> bool {
        !self.descriptor.is_reference_type
    }

    fn key_name(&self) -> &str {
        &self.key.member.name
    }

    fn key_type(&self) -> String {
        csharp::member_type(&self.key.member)
    }

    fn key_nullable_type(&self) -> String {
        csharp::nullable_member_type(&self.key.member)
    }

    fn param(&self) -> String {
        parameter_name(self.key_name())
    }

    /// Whether the factory surface accepts and propagates null.
    fn coerces_null(&self) -> bool {
        self.settings.null_in_factory_methods_yields_null
    }

    /// Whether the key is a reference type in emitted code.
    fn key_is_reference(&self) -> bool {
        self.key.member.is_reference_type
    }

    /// The parameter type of the public factory surface.
    fn factory_input_type(&self) -> String {
        if self.coerces_null() || self.key_is_reference() {
            self.key_nullable_type()
        } else {
            self.key_type()
        }
    }

    /// `Create` returns a nullable instance when null coercion is on.
    fn create_returns_nullable(&self) -> bool {
        self.coerces_null()
    }

    fn validation_error(&self) -> String {
        csharp::validation_error_type()
    }

    fn emit_key_property(&self, w: &mut CodeWriter) {
        w.line(&format!(
            "public {} {} {{ get; }}",
            self.key_type(),
            self.key_name()
        ));
        w.blank();
    }

    fn emit_default_instance(&self, w: &mut CodeWriter) {
        // Reference types have no meaningful default instance.
        if self.is_struct() {
            w.line(&format!(
                "public static {} {} => default;",
                self.type_reference(),
                self.settings.default_instance_property_name
            ));
            w.blank();
        }
    }

    fn emit_constructor(&self, w: &mut CodeWriter) {
        w.open(&format!(
            "private {}({} {})",
            self.descriptor.name,
            self.key_type(),
            self.param()
        ));
        w.line(&format!("{} = {};", self.key_name(), self.param()));
        w.close();
        w.blank();
    }

    fn emit_validate(&self, w: &mut CodeWriter) {
        let tref = self.type_reference();
        let param = self.param();
        let ve = self.validation_error();

        // Value-type keys with null coercion get a nullable wrapper overload;
        // reference-type keys inline the null check (the overloads would
        // otherwise collide on erased nullability).
        if self.coerces_null() && !self.key_is_reference() {
            w.open(&format!(
                "public static {ve}? Validate({}? {param}, global::System.IFormatProvider? provider, out {tref}? obj)",
                self.key_type()
            ));
            w.open(&format!("if ({param} is null)"));
            w.line("obj = default;");
            w.line("return null;");
            w.close();
            w.blank();
            w.line(&format!(
                "return Validate({param}.Value, provider, out obj);"
            ));
            w.close();
            w.blank();
        }

        let input = if self.key_is_reference() {
            self.key_nullable_type()
        } else {
            self.key_type()
        };

        w.open(&format!(
            "public static {ve}? Validate({input} {param}, global::System.IFormatProvider? provider, out {tref}? obj)"
        ));

        if self.key_is_reference() {
            if self.coerces_null() {
                w.open(&format!("if ({param} is null)"));
                w.line("obj = default;");
                w.line("return null;");
                w.close();
            } else {
                w.open(&format!("if ({param} is null)"));
                w.line(&format!(
                    "throw new global::System.ArgumentNullException(nameof({param}));"
                ));
                w.close();
            }
            w.blank();
        }

        if self.key.member.kind.is_textual()
            && self.settings.empty_string_in_factory_methods_yields_null
        {
            w.open(&format!("if ({param}.Length == 0)"));
            w.line("obj = default;");
            w.line("return null;");
            w.close();
            w.blank();
        }

        // The hook takes the key by non-nullable ref; reference keys arrive
        // as a nullable parameter, so re-declare past the null guard to keep
        // the generated code warning-free.
        let key = if self.key_is_reference() {
            let local = if param == "key" { "keyArgument" } else { "key" };
            w.line(&format!("{} {local} = {param};", self.key_type()));
            local.to_string()
        } else {
            param.clone()
        };

        w.line(&format!("var validationError = default({ve});"));
        w.line("object? factoryArgumentsValidationState = null;");
        w.line(&format!(
            "ValidateFactoryArguments(ref validationError, ref {key}, ref factoryArgumentsValidationState);"
        ));
        w.blank();
        w.open("if (validationError is null)");
        w.line(&format!("var instance = new {tref}({key});"));
        w.line("instance.FactoryPostInit(factoryArgumentsValidationState);");
        w.line("obj = instance;");
        w.line("return null;");
        w.close();
        w.blank();
        w.line("obj = default;");
        w.line("return validationError;");
        w.close();
        w.blank();
    }

    fn emit_create(&self, w: &mut CodeWriter) {
        let tref = self.type_reference();
        let param = self.param();

        let (return_type, return_expr) = if self.create_returns_nullable() {
            (format!("{tref}?"), "return obj;".to_string())
        } else {
            (tref.clone(), "return obj!;".to_string())
        };

        w.open(&format!(
            "public static {return_type} Create({} {param})",
            self.factory_input_type()
        ));
        w.line(&format!(
            "var validationError = Validate({param}, null, out var obj);"
        ));
        w.blank();
        w.open("if (validationError is not null)");
        w.line(&format!(
            "throw new {}(validationError.ToString());",
            csharp::validation_exception_type()
        ));
        w.close();
        w.blank();
        w.line(&return_expr);
        w.close();
        w.blank();
    }

    fn emit_try_create(&self, w: &mut CodeWriter) {
        let tref = self.type_reference();
        let param = self.param();
        let input = self.factory_input_type();
        let ve = self.validation_error();

        w.open(&format!(
            "public static bool TryCreate({input} {param}, out {tref}? obj)"
        ));
        w.line(&format!("return TryCreate({param}, out obj, out _);"));
        w.close();
        w.blank();

        w.open(&format!(
            "public static bool TryCreate({input} {param}, out {tref}? obj, out {ve}? validationError)"
        ));
        w.line(&format!(
            "validationError = Validate({param}, null, out obj);"
        ));
        w.line("return validationError is null;");
        w.close();
        w.blank();
    }

    fn emit_factory_hooks(&self, w: &mut CodeWriter) {
        let param = self.param();
        let ve = self.validation_error();

        w.line("static partial void ValidateFactoryArguments(");
        w.line(&format!("    ref {ve}? validationError,"));
        w.line(&format!("    ref {} {param},", self.key_type()));
        w.line("    ref object? factoryArgumentsValidationState);");
        w.blank();
        w.line("partial void FactoryPostInit(object? factoryArgumentsValidationState);");
        w.blank();
    }

    fn conversion_keyword(mode: ConversionMode) -> Option<&'static str> {
        match mode {
            ConversionMode::None => None,
            ConversionMode::Implicit => Some("implicit"),
            ConversionMode::Explicit => Some("explicit"),
        }
    }

    fn emit_conversion_to_key(&self, w: &mut CodeWriter) {
        let Some(keyword) = Self::conversion_keyword(self.settings.conversion_to_key) else {
            return;
        };
        let tref = self.type_reference();
        let key_name = self.key_name();

        if self.is_struct() {
            w.open(&format!(
                "public static {keyword} operator {}({tref} obj)",
                self.key_type()
            ));
            w.line(&format!("return obj.{key_name};"));
            w.close();
            w.blank();

            w.open(&format!(
                "public static {keyword} operator {}({tref}? obj)",
                self.key_nullable_type()
            ));
            w.line(&format!(
                "return obj.HasValue ? obj.Value.{key_name} : default;"
            ));
            w.close();
            w.blank();
        } else {
            w.open(&format!(
                "public static {keyword} operator {}({tref}? obj)",
                self.key_nullable_type()
            ));
            w.line(&format!("return obj is null ? default : obj.{key_name};"));
            w.close();
            w.blank();
        }
    }

    fn emit_conversion_from_key(&self, w: &mut CodeWriter) {
        // Routes through Create, so it needs the factory.
        if self.settings.skip_factory_methods {
            return;
        }
        let Some(keyword) = Self::conversion_keyword(self.settings.conversion_from_key) else {
            return;
        };
        let tref = self.type_reference();
        let param = self.param();
        let bang = if self.create_returns_nullable() { "!" } else { "" };

        w.open(&format!(
            "public static {keyword} operator {tref}({} {param})",
            self.key_type()
        ));
        w.line(&format!("return Create({param}){bang};"));
        w.close();
        w.blank();
    }

    fn emit_equality(&self, w: &mut CodeWriter) {
        let tref = self.type_reference();
        let equality =
            csharp::equality_expression(self.key, self.key_name(), &format!("other.{}", self.key_name()));

        w.open("public override bool Equals(object? other)");
        w.line(&format!("return other is {tref} obj && Equals(obj);"));
        w.close();
        w.blank();

        if self.is_struct() {
            w.open(&format!("public bool Equals({tref} other)"));
            w.line(&format!("return {equality};"));
            w.close();
        } else {
            w.open(&format!("public bool Equals({tref}? other)"));
            w.open("if (other is null)");
            w.line("return false;");
            w.close();
            w.blank();
            w.open("if (ReferenceEquals(this, other))");
            w.line("return true;");
            w.close();
            w.blank();
            w.line(&format!("return {equality};"));
            w.close();
        }
        w.blank();
    }

    fn emit_hash_code(&self, w: &mut CodeWriter) {
        let contribution = csharp::hash_contribution(self.key, self.key_name());

        w.open("public override int GetHashCode()");
        w.open("unchecked");
        w.line(&format!("return _typeHashSeed + {contribution};"));
        w.close();
        w.close();
        w.blank();
    }

    fn emit_equality_operators(&self, w: &mut CodeWriter) {
        let mode = self.settings.equality_comparison_operators;
        if !mode.emits() {
            return;
        }
        let tref = self.type_reference();

        if self.is_struct() {
            w.open(&format!(
                "public static bool operator ==({tref} left, {tref} right)"
            ));
            w.line("return left.Equals(right);");
            w.close();
            w.blank();
            w.open(&format!(
                "public static bool operator !=({tref} left, {tref} right)"
            ));
            w.line("return !(left == right);");
            w.close();
            w.blank();
        } else {
            w.open(&format!(
                "public static bool operator ==({tref}? left, {tref}? right)"
            ));
            w.open("if (left is null)");
            w.line("return right is null;");
            w.close();
            w.blank();
            w.line("return left.Equals(right);");
            w.close();
            w.blank();
            w.open(&format!(
                "public static bool operator !=({tref}? left, {tref}? right)"
            ));
            w.line("return !(left == right);");
            w.close();
            w.blank();
        }

        if mode.emits_key_overloads() {
            self.emit_key_equality_overloads(w);
        }
    }

    fn emit_key_equality_overloads(&self, w: &mut CodeWriter) {
        let tref = self.type_reference();
        let param = self.param();
        let key_type = self.key_type();
        let equality =
            csharp::equality_expression(self.key, &format!("obj.{}", self.key_name()), &param);

        let guard = if self.is_struct() { "" } else { "obj is not null && " };

        w.open(&format!(
            "public static bool operator ==({tref} obj, {key_type} {param})"
        ));
        w.line(&format!("return {guard}{equality};"));
        w.close();
        w.blank();
        w.open(&format!(
            "public static bool operator !=({tref} obj, {key_type} {param})"
        ));
        w.line(&format!("return !(obj == {param});"));
        w.close();
        w.blank();
        w.open(&format!(
            "public static bool operator ==({key_type} {param}, {tref} obj)"
        ));
        w.line(&format!("return obj == {param};"));
        w.close();
        w.blank();
        w.open(&format!(
            "public static bool operator !=({key_type} {param}, {tref} obj)"
        ));
        w.line(&format!("return !(obj == {param});"));
        w.close();
        w.blank();
    }

    fn emit_to_string(&self, w: &mut CodeWriter) {
        let key_name = self.key_name();
        let nullable = self.key.member.is_nullable;
        let expression = if self.key.member.kind.is_textual() {
            if nullable {
                format!("return {key_name} ?? string.Empty;")
            } else {
                format!("return {key_name};")
            }
        } else if nullable || self.key.member.is_reference_type {
            format!("return {key_name}?.ToString() ?? string.Empty;")
        } else {
            format!("return {key_name}.ToString();")
        };

        w.open("public override string ToString()");
        w.line(&expression);
        w.close();
    }
}

#[cfg(test)]
#[path = "keyed/keyed_tests.rs"]
mod keyed_tests;
