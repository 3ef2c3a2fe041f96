//! Whole-document conversion snapshots
//!
//! End-to-end conversions of small but representative documents, asserted
//! as inline snapshots so the exact emitted HTML is visible in the test.

use md2html::convert;

#[test]
fn test_readme_style_document() {
    let source = "# Title\n\nSome **bold** text\n\n- one\n- two\n";
    insta::assert_snapshot!(
        convert(source).unwrap(),
        @"<!DOCTYPE html><html><body><h1>Title </h1><br>Some <strong>bold</strong> text<br><ul><li>one</li><li>two</li></ul></body></html>"
    );
}

#[test]
fn test_quote_and_code_document() {
    let source = "> line one\n> line two\n\ncode: `x < 1`\n";
    insta::assert_snapshot!(
        convert(source).unwrap(),
        @"<!DOCTYPE html><html><body><blockquote>line one<br>line two</blockquote>code: <code>x &lt; 1</code></body></html>"
    );
}

#[test]
fn test_guide_style_document() {
    let source = "## Guide\n\n1. first\n2. second\n\n[home](http://h)\n\n![logo](l.png)\n";
    insta::assert_snapshot!(
        convert(source).unwrap(),
        @r#"<!DOCTYPE html><html><body><h2>Guide </h2><br><ol><li>first</li><li>second</li></ol><a href="http://h">home</a><br><img src="l.png" alt="logo"></body></html>"#
    );
}

#[test]
fn test_fenced_code_document() {
    let source = "# Usage\n\n```\nmd2html <path>\n```\n";
    insta::assert_snapshot!(
        convert(source).unwrap(),
        @"<!DOCTYPE html><html><body><h1>Usage </h1><br><pre><code>\nmd2html &lt;path&gt;\n</code></pre></body></html>"
    );
}
