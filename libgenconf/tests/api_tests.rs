//! Integration tests for the public parsing, query, and rendering API.

use std::io::Cursor;

use libgenconf::{parse, parse_file, parse_reader, Item, ParseError, Quote, RenderOptions};
use pretty_assertions::assert_eq;

fn render(input: &str) -> String {
    parse(input).unwrap().render(&RenderOptions::default())
}

#[test]
fn test_round_trip_is_idempotent() {
    let input = "\
<outer   first>
  a 1
\t\tb \"two words\"
  <inner>
  c 'x y'
  #note
  </inner>

</outer>
<outer second>
d
</outer>
";
    let first = render(input);
    let second = render(&first);
    assert_eq!(first, second);
}

#[test]
fn test_attribute_repetition() {
    let doc = parse("<blk>\nk a\nk b\n</blk>").unwrap();
    let blk = doc.root().get("blk").unwrap();
    assert_eq!(blk.values("k"), vec!["a", "b"]);
    assert_eq!(blk.value("k"), "a");
    assert_eq!(blk.map()["k"], "b");
}

#[test]
fn test_double_quoted_round_trip() {
    let doc = parse("k \"a b\"").unwrap();
    match doc.root().nodes().next() {
        Some(Item::Attribute(attr)) => {
            assert_eq!(attr.value, "a b");
            assert_eq!(attr.quote, Quote::Double);
        }
        other => panic!("expected attribute, got {:?}", other),
    }
    assert_eq!(doc.to_string(), "k \"a b\"\n");
}

#[test]
fn test_single_quoted_round_trip() {
    assert_eq!(render("k 'a b'"), "k 'a b'\n");
}

#[test]
fn test_unquoted_round_trip() {
    assert_eq!(render("k v"), "k v\n");
}

#[test]
fn test_unquoted_extra_tokens_are_dropped() {
    let doc = parse("k first second third").unwrap();
    assert_eq!(doc.root().value("k"), "first");
    assert_eq!(doc.to_string(), "k first\n");
}

#[test]
fn test_quote_like_keys_are_stable() {
    for input in [
        "a\"b x\" junk",
        "key\"tight\"",
        "key \"a\" junk",
        "key 'a' junk",
        "key \"open",
        "'k' v",
        "\"k\" v",
        "\"k\" 'v w'",
    ] {
        let first = render(input);
        let second = render(&first);
        assert_eq!(first, second, "unstable rendering of {:?}", input);
    }
}

#[test]
fn test_quote_like_keys_are_unquoted_attributes() {
    let doc = parse("'k' v\n\"k\" w\na\"b x\" junk").unwrap();
    let root = doc.root();
    assert_eq!(root.value("'k'"), "v");
    assert_eq!(root.value("\"k\""), "w");
    assert_eq!(root.value("a\"b"), "x\"");
    assert_eq!(doc.to_string(), "'k' v\n\"k\" w\na\"b x\"\n");
}

#[test]
fn test_shorthand_value_cannot_start_with_slash() {
    let err = parse("<db /x>\nk v\n</db>\nafter 1\n").unwrap_err();
    assert_eq!(err.line(), Some("<db /x>"));
}

#[test]
fn test_deep_nesting_round_trip() {
    let depth = 100_000;
    let input = format!("{}{}", "<a>\n".repeat(depth), "</a>\n".repeat(depth));
    let doc = parse(&input).unwrap();
    let rendered = doc.render(&RenderOptions::default().with_indent_width(0));
    assert!(rendered == input, "deeply nested document did not round trip");
}

#[test]
fn test_shorthand_block_merge() {
    let doc = parse("<db main>\nhost a\n</db>\n<db replica>\nhost b\n</db>").unwrap();
    let root = doc.root();
    assert_eq!(root.get_all("db").len(), 1);
    assert_eq!(root.get("db").unwrap().children(), vec!["main", "replica"]);
}

#[test]
fn test_path_resolution() {
    let doc = parse("<a>\n<b>\nk v\n</b>\n</a>").unwrap();
    let root = doc.root();
    assert_eq!(root.get_value_from_path("a/b/k"), "v");
    assert_eq!(root.get_value_from_path("a/missing/k"), "");
    assert_eq!(root.get_value_from_path("a/b/missing"), "");
}

#[test]
fn test_malformed_line_is_fatal() {
    let err = parse("<a>\nk v\n<\n</a>").unwrap_err();
    match err {
        ParseError::UnrecognizedLine { line, location } => {
            assert_eq!(line, "<");
            assert_eq!(location, " at line 3");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_blank_line_and_comment_preserved() {
    let input = "<blk>\n    key \"some value\"\n\n    # a remark\n</blk>\n";
    assert_eq!(render(input), input);
}

#[test]
fn test_mismatched_close_tag_is_not_an_error() {
    let doc = parse("<open>\nk v\n</different>").unwrap();
    assert_eq!(doc.root().get("open").unwrap().value("k"), "v");
    assert_eq!(doc.to_string(), "<open>\n    k v\n</open>\n");
}

#[test]
fn test_parse_reader() {
    let doc = parse_reader(Cursor::new("<x>\r\ny 1\r\n</x>\r\n")).unwrap();
    assert_eq!(doc.root().get_value_from_path("x/y"), "1");
}

#[test]
fn test_parse_file_missing() {
    let err = parse_file("definitely/not/here.conf").unwrap_err();
    assert!(matches!(err, ParseError::SourceUnavailable { .. }));
    assert!(err.to_string().starts_with("Cannot open <definitely/not/here.conf>"));
}

#[test]
fn test_indent_width_is_per_call() {
    let doc = parse("<a>\n<b>\nk v\n</b>\n</a>").unwrap();
    let two = doc.render(&RenderOptions::default().with_indent_width(2));
    let zero = doc.render(&RenderOptions::default().with_indent_width(0));
    assert_eq!(two, "<a>\n  <b>\n    k v\n  </b>\n</a>\n");
    assert_eq!(zero, "<a>\n<b>\nk v\n</b>\n</a>\n");
    assert_eq!(parse(&two).unwrap().to_string(), parse(&zero).unwrap().to_string());
}

#[test]
fn test_independent_parses_share_nothing() {
    let a = parse("k 1").unwrap();
    let b = parse("k 2").unwrap();
    assert_eq!(a.root().value("k"), "1");
    assert_eq!(b.root().value("k"), "2");
}
