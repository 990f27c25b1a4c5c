//! Comparison and arithmetic operator emitters (keyed shape only).
//!
//! Comparison produces `IComparable<T>`/`IComparable` plus the four
//! relational operators; arithmetic produces one artifact per category
//! (`+`, `-`, `*`, `/`), each routing the computed key back through `Create`
//! so operator results are validated like any other construction. Every
//! category carries a normal and an `operator checked` pair.

use crate::csharp;
use crate::naming::parameter_name;
use crate::writer::CodeWriter;
use valuegen_core::{
    CancellationToken, EngineResult, EqualityMemberDescriptor, KeyedSettings,
    OperatorsMode, TypeDescriptor,
};

/// Emit the comparison artifact: `CompareTo` plus `<`, `<=`, `>`, `>=`.
pub fn emit_keyed_comparison(
    descriptor: &TypeDescriptor,
    key: &EqualityMemberDescriptor,
    settings: &KeyedSettings,
    token: &CancellationToken,
) -> EngineResult<String> {
    let tref = csharp::type_reference(descriptor);
    let is_struct = !descriptor.is_reference_type;
    let key_name = &key.member.name;
    let mut w = CodeWriter::new();

    csharp::open_scaffold(&mut w, descriptor);
    csharp::open_type(
        &mut w,
        descriptor,
        &[
            format!("global::System.IComparable<{tref}>"),
            "global::System.IComparable".to_string(),
        ],
    );

    let compare = csharp::compare_expression(key, key_name, &format!("other.{key_name}"));

    if is_struct {
        w.open(&format!("public int CompareTo({tref} other)"));
        w.line(&format!("return {compare};"));
        w.close();
    } else {
        w.open(&format!("public int CompareTo({tref}? other)"));
        w.open("if (other is null)");
        w.line("return 1;");
        w.close();
        w.blank();
        w.line(&format!("return {compare};"));
        w.close();
    }
    w.blank();

    token.ensure_not_cancelled()?;

    w.open("public int CompareTo(object? obj)");
    w.open("if (obj is null)");
    w.line("return 1;");
    w.close();
    w.blank();
    w.open(&format!("if (obj is {tref} other)"));
    w.line("return CompareTo(other);");
    w.close();
    w.blank();
    w.line(&format!(
        "throw new global::System.ArgumentException($\"Cannot compare {{obj.GetType()}} to {tref}\", nameof(obj));"
    ));
    w.close();
    w.blank();

    emit_relational_operators(&mut w, &tref, is_struct);

    token.ensure_not_cancelled()?;

    if settings.comparison_operators.emits_key_overloads() {
        emit_relational_key_overloads(&mut w, &tref, is_struct, key);
    }

    w.close();
    csharp::close_scaffold(&mut w, descriptor);

    Ok(w.into_string())
}

fn emit_relational_operators(w: &mut CodeWriter, tref: &str, is_struct: bool) {
    if is_struct {
        for (op, test) in [("<", "< 0"), ("<=", "<= 0"), (">", "> 0"), (">=", ">= 0")] {
            w.open(&format!(
                "public static bool operator {op}({tref} left, {tref} right)"
            ));
            w.line(&format!("return left.CompareTo(right) {test};"));
            w.close();
            w.blank();
        }
        return;
    }

    // Null sorts first, matching CompareTo's null contract.
    let bodies = [
        ("<", "return left is null ? right is not null : left.CompareTo(right) < 0;"),
        ("<=", "return left is null || left.CompareTo(right) <= 0;"),
        (">", "return left is not null && left.CompareTo(right) > 0;"),
        (">=", "return left is null ? right is null : left.CompareTo(right) >= 0;"),
    ];
    for (op, body) in bodies {
        w.open(&format!(
            "public static bool operator {op}({tref}? left, {tref}? right)"
        ));
        w.line(body);
        w.close();
        w.blank();
    }
}

fn emit_relational_key_overloads(
    w: &mut CodeWriter,
    tref: &str,
    is_struct: bool,
    key: &EqualityMemberDescriptor,
) {
    let key_type = csharp::member_type(&key.member);
    let param = parameter_name(&key.member.name);
    let compare = csharp::compare_expression(key, &format!("obj.{}", key.member.name), &param);

    for (op, test, null_body) in [
        ("<", "< 0", "obj is null"),
        ("<=", "<= 0", "obj is null"),
        (">", "> 0", "obj is not null"),
        (">=", ">= 0", "obj is not null"),
    ] {
        // Instance on the left.
        w.open(&format!(
            "public static bool operator {op}({tref} obj, {key_type} {param})"
        ));
        if is_struct {
            w.line(&format!("return {compare} {test};"));
        } else if op == "<" || op == "<=" {
            w.line(&format!("return {null_body} || {compare} {test};"));
        } else {
            w.line(&format!("return {null_body} && {compare} {test};"));
        }
        w.close();
        w.blank();
    }

    for (op, mirrored) in [("<", ">"), ("<=", ">="), (">", "<"), (">=", "<=")] {
        // Key on the left delegates to the mirrored instance-first overload.
        w.open(&format!(
            "public static bool operator {op}({key_type} {param}, {tref} obj)"
        ));
        w.line(&format!("return obj {mirrored} {param};"));
        w.close();
        w.blank();
    }
}

/// One arithmetic operator category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl ArithmeticOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            ArithmeticOp::Addition => "+",
            ArithmeticOp::Subtraction => "-",
            ArithmeticOp::Multiplication => "*",
            ArithmeticOp::Division => "/",
        }
    }

    /// The configured mode for this category.
    pub fn mode(&self, settings: &KeyedSettings) -> OperatorsMode {
        match self {
            ArithmeticOp::Addition => settings.addition_operators,
            ArithmeticOp::Subtraction => settings.subtraction_operators,
            ArithmeticOp::Multiplication => settings.multiplication_operators,
            ArithmeticOp::Division => settings.division_operators,
        }
    }
}

/// Emit one arithmetic artifact.
///
/// The result of the raw key computation goes back through `Create`, so an
/// operator can never manufacture an instance that validation would reject.
pub fn emit_keyed_arithmetic(
    descriptor: &TypeDescriptor,
    key: &EqualityMemberDescriptor,
    settings: &KeyedSettings,
    op: ArithmeticOp,
    token: &CancellationToken,
) -> EngineResult<String> {
    let tref = csharp::type_reference(descriptor);
    let key_name = &key.member.name;
    let symbol = op.symbol();
    // Create returns a nullable instance under null coercion; operator
    // results are always non-null because the operands' keys are.
    let bang = if settings.null_in_factory_methods_yields_null {
        "!"
    } else {
        ""
    };
    let mut w = CodeWriter::new();

    csharp::open_scaffold(&mut w, descriptor);
    csharp::open_type(&mut w, descriptor, &[]);

    w.open(&format!(
        "public static {tref} operator {symbol}({tref} left, {tref} right)"
    ));
    w.line(&format!(
        "return Create(left.{key_name} {symbol} right.{key_name}){bang};"
    ));
    w.close();
    w.blank();

    token.ensure_not_cancelled()?;

    // The checked pair is uniform across key kinds; `checked` only changes
    // behavior for the integral ones.
    w.open(&format!(
        "public static {tref} operator checked {symbol}({tref} left, {tref} right)"
    ));
    w.line(&format!(
        "return Create(checked(left.{key_name} {symbol} right.{key_name})){bang};"
    ));
    w.close();
    w.blank();

    if op.mode(settings).emits_key_overloads() {
        let key_type = csharp::member_type(&key.member);
        let param = parameter_name(key_name);

        w.open(&format!(
            "public static {tref} operator {symbol}({tref} left, {key_type} {param})"
        ));
        w.line(&format!("return Create(left.{key_name} {symbol} {param}){bang};"));
        w.close();
        w.blank();
        w.open(&format!(
            "public static {tref} operator {symbol}({key_type} {param}, {tref} right)"
        ));
        w.line(&format!("return Create({param} {symbol} right.{key_name}){bang};"));
        w.close();
        w.blank();
    }

    w.close();
    csharp::close_scaffold(&mut w, descriptor);

    Ok(w.into_string())
}
