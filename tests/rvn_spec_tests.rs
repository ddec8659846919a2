//! Byte-level conformance tests for the RVN wire format: exact encoder
//! output, radix and escape handling, trailing-comma and whitespace
//! tolerance, tag parenthesization, and arity enforcement.

use serde::{Deserialize, Serialize};
use serde_rvn::{from_str, from_str_partial, to_string, to_string_pretty, Value};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Pair {
    a: u8,
    b: u8,
}

#[test]
fn lists_always_carry_trailing_commas() {
    assert_eq!(to_string(&vec![1, 2]).unwrap(), "[1,2,]");
    assert_eq!(
        to_string_pretty(&vec![1, 2, 3]).unwrap(),
        "[\n    1,\n    2,\n    3,\n]"
    );
}

#[test]
fn empty_compounds_stay_flat_in_pretty() {
    assert_eq!(to_string_pretty(&Vec::<u8>::new()).unwrap(), "[]");
    assert_eq!(
        to_string_pretty(&std::collections::BTreeMap::<String, u8>::new()).unwrap(),
        "{}"
    );
}

#[test]
fn integers_decode_at_the_requested_width() {
    assert_eq!(from_str::<u8>("23").unwrap(), 23);
    assert!(from_str::<u8>("999").is_err());
    assert!(from_str::<u8>("256").is_err());
    assert_eq!(from_str::<u8>("255").unwrap(), 255);
}

#[test]
fn radix_prefixes() {
    assert_eq!(from_str::<u8>("0b101").unwrap(), 5);
    assert_eq!(from_str::<i8>("-0x1a").unwrap(), -26);
    assert_eq!(from_str::<u32>("0xDEAD").unwrap(), 0xDEAD);
    assert_eq!(from_str::<u16>("0b1111_0000").unwrap(), 0b1111_0000);
}

#[test]
fn underscore_separators() {
    assert_eq!(from_str::<u32>("1_000_000").unwrap(), 1_000_000);
    assert_eq!(from_str::<f64>("1_000.5").unwrap(), 1000.5);
}

#[test]
fn negative_zero_follows_the_width() {
    assert_eq!(from_str::<i8>("-0").unwrap(), 0);
    assert!(from_str::<u8>("-0").is_err());
}

#[test]
fn string_escapes() {
    assert_eq!(from_str::<String>("\"a\\nc\"").unwrap(), "a\nc");
    assert_eq!(from_str::<String>("\"\\t\\\"\\\\\\$\"").unwrap(), "\t\"\\$");

    // Unknown escapes fail at the byte after the backslash.
    let err = from_str::<String>("\"\\X\"").unwrap_err();
    assert_eq!(err.offset(), Some(2));

    // Unicode escapes are not part of the format.
    assert!(from_str::<String>("\"\\u(1F600)\"").is_err());
}

#[test]
fn triple_quotes_are_rejected() {
    assert!(from_str::<String>("\"\"\"x\"\"\"").is_err());
    // A plain empty string is fine.
    assert_eq!(from_str::<String>("\"\"").unwrap(), "");
}

#[test]
fn dollar_signs_are_escaped_on_encode() {
    assert_eq!(to_string(&"$var").unwrap(), "\"\\$var\"");
    assert_eq!(from_str::<String>("\"\\$var\"").unwrap(), "$var");
}

#[test]
fn bool_literals_are_exact() {
    assert_eq!(from_str::<bool>("Bool.true").unwrap(), true);
    assert_eq!(from_str::<bool>("Bool.false").unwrap(), false);
    assert!(from_str::<bool>("true").is_err());
    assert!(from_str::<bool>("Bool.True").is_err());
    assert!(from_str::<bool>("Bool.tru").is_err());
}

#[test]
fn partial_decode_returns_the_rest() {
    let (pair, rest): (Pair, &str) = from_str_partial("{a:1,b:2}X").unwrap();
    assert_eq!(pair, Pair { a: 1, b: 2 });
    assert_eq!(rest, "X");
}

#[test]
fn nested_compound_decode() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Inner {
        key: Vec<u8>,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Outer {
        tuple: (u8, Inner),
    }

    let outer: Outer = from_str("{ tuple: (4, { key: [1,2,3] } ) }").unwrap();
    assert_eq!(
        outer,
        Outer {
            tuple: (4, Inner { key: vec![1, 2, 3] }),
        }
    );
}

#[test]
fn truncated_list_fails() {
    assert!(from_str::<Vec<u8>>("[0,1,").is_err());
}

#[test]
fn tuple_arity_is_enforced() {
    assert!(from_str::<(u8, u8)>("(1)").is_err());

    let err = from_str::<(u8, u8)>("(1,2,3)").unwrap_err();
    assert_eq!(err.offset(), Some(5)); // the first extra element

    assert_eq!(from_str::<(u8, u8)>("(1,2)").unwrap(), (1, 2));
    assert_eq!(from_str::<(u8, u8)>("(1,2,)").unwrap(), (1, 2));
}

#[test]
fn trailing_commas_are_optional_on_decode() {
    assert_eq!(from_str::<Vec<u8>>("[1,2]").unwrap(), vec![1, 2]);
    assert_eq!(from_str::<Vec<u8>>("[1,2,]").unwrap(), vec![1, 2]);
    assert_eq!(from_str::<Pair>("{a:1,b:2}").unwrap(), Pair { a: 1, b: 2 });
    assert_eq!(from_str::<Pair>("{a:1,b:2,}").unwrap(), Pair { a: 1, b: 2 });
}

#[test]
fn empty_records_accept_inner_whitespace() {
    use std::collections::BTreeMap;
    let empty: BTreeMap<String, u8> = from_str("{}").unwrap();
    assert!(empty.is_empty());
    let empty: BTreeMap<String, u8> = from_str("{ }").unwrap();
    assert!(empty.is_empty());
    let empty: BTreeMap<String, u8> = from_str("{ # nothing here\n }").unwrap();
    assert!(empty.is_empty());
}

#[test]
fn whitespace_and_comments_between_any_tokens() {
    let variants = [
        "[1,2,]",
        " [ 1 , 2 , ] ",
        "[\t1,\n2,]",
        "[ # first\n 1, # second\n 2 ]",
        "#leading comment\n[1,2]",
        "[1,2] # trailing comment",
    ];
    for text in variants {
        assert_eq!(from_str::<Vec<u8>>(text).unwrap(), vec![1, 2], "{text:?}");
    }
}

#[test]
fn comments_terminate_record_keys() {
    let pair: Pair = from_str("{a# note\n:1,b:2}").unwrap();
    assert_eq!(pair, Pair { a: 1, b: 2 });
}

#[test]
fn pretty_indentation_is_a_multiple_of_four() {
    #[derive(Serialize)]
    struct Doc {
        items: Vec<Vec<u8>>,
        meta: Pair,
    }

    let doc = Doc {
        items: vec![vec![1], vec![2, 3]],
        meta: Pair { a: 1, b: 2 },
    };

    let text = to_string_pretty(&doc).unwrap();
    for line in text.lines() {
        let leading = line.len() - line.trim_start_matches(' ').len();
        assert_eq!(leading % 4, 0, "line {line:?} has {leading} leading spaces");
        assert_eq!(line.trim_end(), line, "line {line:?} has trailing whitespace");
    }
}

mod tags {
    use super::*;

    #[derive(Serialize)]
    enum Attr {
        Bar(u8),
        Baz(u8, u8),
    }

    #[derive(Serialize)]
    enum Top {
        Foo(Attr, Attr),
    }

    #[derive(Serialize)]
    enum Nullary {
        Bar,
    }

    #[derive(Serialize)]
    enum Wrap {
        Foo(Nullary),
    }

    #[derive(Serialize)]
    enum WrapList {
        Foo(Vec<Nullary>),
    }

    #[test]
    fn nested_tags_are_parenthesized() {
        let value = Top::Foo(Attr::Bar(1), Attr::Baz(2, 3));
        assert_eq!(to_string(&value).unwrap(), "Foo (Bar 1) (Baz 2 3)");
    }

    #[test]
    fn nullary_tags_stay_bare() {
        assert_eq!(to_string(&Wrap::Foo(Nullary::Bar)).unwrap(), "Foo Bar");
    }

    #[test]
    fn brackets_reset_the_tag_context() {
        assert_eq!(
            to_string(&WrapList::Foo(vec![Nullary::Bar])).unwrap(),
            "Foo [Bar,]"
        );
    }

    #[test]
    fn pretty_tags_put_attributes_on_their_own_lines() {
        let value = Top::Foo(Attr::Bar(1), Attr::Baz(2, 3));
        assert_eq!(
            to_string_pretty(&value).unwrap(),
            "Foo\n    (\n        Bar\n            1\n    )\n    (\n        Baz\n            2\n            3\n    )"
        );
    }

    #[test]
    fn single_attribute_children_still_parenthesize() {
        let value = Wrap2::Foo(Attr::Bar(1));
        assert_eq!(to_string(&value).unwrap(), "Foo (Bar 1)");
        assert_eq!(
            to_string_pretty(&value).unwrap(),
            "Foo\n    (\n        Bar\n            1\n    )"
        );
    }

    #[derive(Serialize)]
    enum Wrap2 {
        Foo(Attr),
    }

    #[test]
    fn struct_variants_carry_one_record_attribute() {
        #[derive(Serialize)]
        enum Shape {
            Rect { w: u8, h: u8 },
        }

        assert_eq!(to_string(&Shape::Rect { w: 2, h: 3 }).unwrap(), "Rect {w:2,h:3,}");
    }

    #[test]
    fn tags_inside_records_need_no_parentheses() {
        #[derive(Serialize)]
        struct Holder {
            fill: Top,
        }

        let holder = Holder {
            fill: Top::Foo(Attr::Bar(1), Attr::Baz(2, 3)),
        };
        assert_eq!(
            to_string(&holder).unwrap(),
            "{fill:Foo (Bar 1) (Baz 2 3),}"
        );
    }
}

#[test]
fn format_agnostic_decode() {
    let pair = Pair { a: 9, b: 10 };
    let compact: Pair = from_str(&to_string(&pair).unwrap()).unwrap();
    let pretty: Pair = from_str(&to_string_pretty(&pair).unwrap()).unwrap();
    assert_eq!(compact, pretty);
}

#[test]
fn dynamic_tuples_surface_as_sequences() {
    let value: Value = from_str("(1, 2,)").unwrap();
    assert_eq!(value, Value::List(vec![Value::from(1), Value::from(2)]));
}

#[test]
fn skip_accepts_every_value_shape() {
    // Every field here is unknown to the target type and must be skipped
    // structurally.
    #[derive(Deserialize, Debug, PartialEq)]
    struct OnlyB {
        b: u8,
    }

    let text = "{
        s: \"text with \\\" quote\",
        n: -17,
        h: 0xff,
        f: 2.75,
        t: Bool.true,
        l: [1, [2], { x: 3 }],
        p: (1, \"two\"),
        r: { nested: { deeper: [] } },
        b: 8,
    }";
    assert_eq!(from_str::<OnlyB>(text).unwrap(), OnlyB { b: 8 });
}
