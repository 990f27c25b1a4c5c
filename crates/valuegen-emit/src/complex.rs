//! Primary emitter for the complex shape.
//!
//! A complex target has an arbitrary list of significant members. The
//! emitted type gets read-only properties, a private member-wise
//! constructor, the validating factory triad over all members, comparer-aware
//! equality/hash over the declared equality members, and a `{ A = ..., B =
//! ... }` style `ToString`.
//!
//! An empty member list is legal and produces a marker object: all instances
//! equal, the hash is the bare type seed, and `ToString` renders the bare
//! type name.
//!
//! Each artifact also carries a member-registration table the serialization
//! adapters read at runtime, so adapter and constructor can never disagree
//! about the member list.

use crate::csharp;
use crate::naming::parameter_name;
use crate::writer::CodeWriter;
use valuegen_core::{
    CancellationToken, ComplexSettings, EngineResult, EqualityMemberDescriptor, TypeDescriptor,
};

/// Emit the primary artifact for a complex type.
pub fn emit_complex_primary(
    descriptor: &TypeDescriptor,
    members: &[EqualityMemberDescriptor],
    settings: &ComplexSettings,
    token: &CancellationToken,
) -> EngineResult<String> {
    let ctx = Ctx {
        descriptor,
        members,
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
    ctx.emit_member_registration(&mut w);
    ctx.emit_properties(&mut w);
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
    members: &'a [EqualityMemberDescriptor],
    settings: &'a ComplexSettings,
}

impl Ctx<'_> {
    fn type_reference(&self) -> String {
        csharp::type_reference(self.descriptor)
    }

    fn is_struct(&self) -> bool {
        !self.descriptor.is_reference_type
    }

    fn validation_error(&self) -> String {
        csharp::validation_error_type()
    }

    /// `name: Type` pairs in declaration order, camelCased for parameters.
    fn parameter_list(&self) -> String {
        self.members
            .iter()
            .map(|m| {
                format!(
                    "{} {}",
                    csharp::member_type(&m.member),
                    parameter_name(&m.member.name)
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Parameter names only, same order.
    fn argument_list(&self) -> String {
        self.members
            .iter()
            .map(|m| parameter_name(&m.member.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn emit_member_registration(&self, w: &mut CodeWriter) {
        w.line(&format!(
            "internal static readonly {}.AssignableMember[] AssignableMembers = new {}.AssignableMember[]",
            csharp::RUNTIME_NS,
            csharp::RUNTIME_NS
        ));
        w.open_brace();
        for m in self.members {
            w.line(&format!(
                "new {}.AssignableMember(\"{}\", typeof({})),",
                csharp::RUNTIME_NS,
                m.member.name,
                m.member.kind.element_type_name()
            ));
        }
        // An array initializer closes with `};`, which CodeWriter cannot
        // express through close().
        w.close_with(";");
        w.blank();
    }

    fn emit_properties(&self, w: &mut CodeWriter) {
        for m in self.members {
            w.line(&format!(
                "public {} {} {{ get; }}",
                csharp::member_type(&m.member),
                m.member.name
            ));
        }
        if !self.members.is_empty() {
            w.blank();
        }
    }

    fn emit_default_instance(&self, w: &mut CodeWriter) {
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
            "private {}({})",
            self.descriptor.name,
            self.parameter_list()
        ));
        for m in self.members {
            w.line(&format!(
                "{} = {};",
                m.member.name,
                parameter_name(&m.member.name)
            ));
        }
        w.close();
        w.blank();
    }

    fn emit_validate(&self, w: &mut CodeWriter) {
        let tref = self.type_reference();
        let ve = self.validation_error();
        let params = self.parameter_list();
        let separator = if params.is_empty() { "" } else { ", " };

        w.open(&format!(
            "public static {ve}? Validate({params}{separator}out {tref}? obj)"
        ));
        w.line(&format!("var validationError = default({ve});"));
        w.line("object? factoryArgumentsValidationState = null;");

        let mut hook_args = vec!["ref validationError".to_string()];
        for m in self.members {
            hook_args.push(format!("ref {}", parameter_name(&m.member.name)));
        }
        hook_args.push("ref factoryArgumentsValidationState".to_string());
        w.line(&format!(
            "ValidateFactoryArguments({});",
            hook_args.join(", ")
        ));

        w.blank();
        w.open("if (validationError is null)");
        w.line(&format!(
            "var instance = new {tref}({});",
            self.argument_list()
        ));
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
        let params = self.parameter_list();
        let args = self.argument_list();
        let separator = if args.is_empty() { "" } else { ", " };

        w.open(&format!("public static {tref} Create({params})"));
        w.line(&format!(
            "var validationError = Validate({args}{separator}out var obj);"
        ));
        w.blank();
        w.open("if (validationError is not null)");
        w.line(&format!(
            "throw new {}(validationError.ToString());",
            csharp::validation_exception_type()
        ));
        w.close();
        w.blank();
        w.line("return obj!;");
        w.close();
        w.blank();
    }

    fn emit_try_create(&self, w: &mut CodeWriter) {
        let tref = self.type_reference();
        let ve = self.validation_error();
        let params = self.parameter_list();
        let args = self.argument_list();
        let separator = if args.is_empty() { "" } else { ", " };

        w.open(&format!(
            "public static bool TryCreate({params}{separator}out {tref}? obj)"
        ));
        w.line(&format!(
            "return TryCreate({args}{separator}out obj, out _);"
        ));
        w.close();
        w.blank();

        w.open(&format!(
            "public static bool TryCreate({params}{separator}out {tref}? obj, out {ve}? validationError)"
        ));
        w.line(&format!(
            "validationError = Validate({args}{separator}out obj);"
        ));
        w.line("return validationError is null;");
        w.close();
        w.blank();
    }

    fn emit_factory_hooks(&self, w: &mut CodeWriter) {
        let ve = self.validation_error();

        w.line("static partial void ValidateFactoryArguments(");
        w.line(&format!("    ref {ve}? validationError,"));
        for m in self.members {
            w.line(&format!(
                "    ref {} {},",
                csharp::member_type(&m.member),
                parameter_name(&m.member.name)
            ));
        }
        w.line("    ref object? factoryArgumentsValidationState);");
        w.blank();
        w.line("partial void FactoryPostInit(object? factoryArgumentsValidationState);");
        w.blank();
    }

    fn emit_equality(&self, w: &mut CodeWriter) {
        let tref = self.type_reference();

        w.open("public override bool Equals(object? other)");
        w.line(&format!("return other is {tref} obj && Equals(obj);"));
        w.close();
        w.blank();

        if self.is_struct() {
            w.open(&format!("public bool Equals({tref} other)"));
            self.emit_equality_body(w);
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
            self.emit_equality_body(w);
            w.close();
        }
        w.blank();
    }

    fn emit_equality_body(&self, w: &mut CodeWriter) {
        // Marker object: identity is the type itself.
        if self.members.is_empty() {
            w.line("return true;");
            return;
        }

        for (i, m) in self.members.iter().enumerate() {
            let expression = csharp::equality_expression(
                m,
                &m.member.name,
                &format!("other.{}", m.member.name),
            );
            if i == 0 {
                w.line(&format!("return {expression}"));
            } else {
                w.line(&format!("    && {expression}"));
            }
        }
        // Terminate the chained expression.
        w.line("    ;");
    }

    fn emit_hash_code(&self, w: &mut CodeWriter) {
        w.open("public override int GetHashCode()");
        w.open("unchecked");

        if self.members.is_empty() {
            w.line("return _typeHashSeed;");
        } else {
            w.line("var hash = _typeHashSeed;");
            for m in self.members {
                let contribution = csharp::hash_contribution(m, &m.member.name);
                w.line(&format!("hash += {contribution};"));
            }
            w.line("return hash;");
        }

        w.close();
        w.close();
        w.blank();
    }

    fn emit_equality_operators(&self, w: &mut CodeWriter) {
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
    }

    fn emit_to_string(&self, w: &mut CodeWriter) {
        w.open("public override string ToString()");

        if self.members.is_empty() {
            w.line(&format!("return \"{}\";", self.descriptor.name));
        } else {
            let parts = self
                .members
                .iter()
                .map(|m| format!("{} = {{{}}}", m.member.name, m.member.name))
                .collect::<Vec<_>>()
                .join(", ");
            w.line(&format!("return $\"{{{{ {parts} }}}}\";"));
        }

        w.close();
    }
}
