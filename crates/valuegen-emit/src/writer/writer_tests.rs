#![allow(non_snake_case)]

use super::*;

#[test]
fn code_writer___line___applies_indentation() {
    let mut writer = CodeWriter::new();

    writer.open("namespace Acme");
    writer.line("using System;");

    assert_eq!(
        writer.into_string(),
        "namespace Acme\n{\n    using System;\n"
    );
}

#[test]
fn code_writer___blank_lines_have_no_trailing_whitespace() {
    let mut writer = CodeWriter::new();

    writer.open("class A");
    writer.line("");
    writer.blank();
    writer.close();

    let text = writer.into_string();

    for line in text.lines() {
        assert_eq!(line, line.trim_end());
    }
}

#[test]
fn code_writer___open_close___nest_correctly() {
    let mut writer = CodeWriter::new();

    writer.open("class Outer");
    writer.open("class Inner");
    writer.line("int x;");
    writer.close();
    writer.close();

    assert_eq!(
        writer.into_string(),
        "class Outer\n{\n    class Inner\n    {\n        int x;\n    }\n}\n"
    );
}

#[test]
fn code_writer___depth___tracks_nesting() {
    let mut writer = CodeWriter::new();

    assert_eq!(writer.depth(), 0);
    writer.open("a");
    writer.open("b");
    assert_eq!(writer.depth(), 2);
    writer.close();
    assert_eq!(writer.depth(), 1);
}

#[test]
fn code_writer___close_with___appends_suffix_to_brace() {
    let mut writer = CodeWriter::new();

    writer.open("var xs = new int[]");
    writer.line("1,");
    writer.close_with(";");

    assert_eq!(
        writer.into_string(),
        "var xs = new int[]\n{\n    1,\n};\n"
    );
}

#[test]
fn code_writer___close_at_zero_depth_is_harmless() {
    let mut writer = CodeWriter::new();

    writer.close();

    assert_eq!(writer.into_string(), "}\n");
}
