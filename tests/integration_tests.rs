use serde::{Deserialize, Serialize};
use serde_rvn::{from_str, from_str_partial, to_string, to_string_pretty, Value};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    totals: (u32, f64),
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Settings {
    retries: Option<u8>,
    verbose: bool,
}

fn alice() -> User {
    User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "dev".to_string()],
    }
}

#[test]
fn simple_struct_compact() {
    let text = to_string(&alice()).unwrap();
    assert_eq!(
        text,
        "{id:123,name:\"Alice\",active:Bool.true,tags:[\"admin\",\"dev\",],}"
    );

    let back: User = from_str(&text).unwrap();
    assert_eq!(alice(), back);
}

#[test]
fn simple_struct_pretty() {
    let text = to_string_pretty(&alice()).unwrap();
    assert_eq!(
        text,
        "{\n    id: 123,\n    name: \"Alice\",\n    active: Bool.true,\n    tags: [\n        \"admin\",\n        \"dev\",\n    ],\n}"
    );

    let back: User = from_str(&text).unwrap();
    assert_eq!(alice(), back);
}

#[test]
fn nested_struct_round_trip() {
    let order = Order {
        order_id: 7,
        customer: alice(),
        totals: (3, 19.5),
    };

    for text in [to_string(&order).unwrap(), to_string_pretty(&order).unwrap()] {
        let back: Order = from_str(&text).unwrap();
        assert_eq!(order, back);
    }
}

#[test]
fn unknown_fields_are_skipped() {
    let text = "{
        id: 1,
        extra: { deep: [1, (2, 3), \"x\"], flag: Bool.false },
        name: \"A\",
        junk: [0b10, -4.25,],
        active: Bool.true,
        tags: [],
    }";

    let user: User = from_str(text).unwrap();
    assert_eq!(
        user,
        User {
            id: 1,
            name: "A".to_string(),
            active: true,
            tags: vec![],
        }
    );
}

#[test]
fn comments_and_whitespace_are_insignificant() {
    let text = "{ # header comment
        id:\t123, # trailing note
        name: \"Alice\",
        # a full-line comment
        active: Bool.true,
        tags: [ \"admin\" , \"dev\" ],
    }";

    let back: User = from_str(text).unwrap();
    assert_eq!(alice(), back);
}

#[test]
fn option_fields_round_trip() {
    let some = Settings {
        retries: Some(3),
        verbose: false,
    };
    let none = Settings {
        retries: None,
        verbose: true,
    };

    assert_eq!(to_string(&some).unwrap(), "{retries:3,verbose:Bool.false,}");
    assert_eq!(to_string(&none).unwrap(), "{retries:None,verbose:Bool.true,}");

    let some_back: Settings = from_str(&to_string(&some).unwrap()).unwrap();
    let none_back: Settings = from_str(&to_string(&none).unwrap()).unwrap();
    assert_eq!(some, some_back);
    assert_eq!(none, none_back);
}

#[test]
fn missing_option_field_defaults_to_none() {
    let settings: Settings = from_str("{ verbose: Bool.true }").unwrap();
    assert_eq!(
        settings,
        Settings {
            retries: None,
            verbose: true,
        }
    );
}

#[test]
fn maps_round_trip_as_records() {
    let mut map = BTreeMap::new();
    map.insert("alpha".to_string(), 1u32);
    map.insert("beta".to_string(), 2);

    let text = to_string(&map).unwrap();
    assert_eq!(text, "{alpha:1,beta:2,}");

    let back: BTreeMap<String, u32> = from_str(&text).unwrap();
    assert_eq!(map, back);
}

#[test]
fn chars_and_unit_round_trip() {
    let text = to_string(&'é').unwrap();
    assert_eq!(text, "\"é\"");
    let c: char = from_str(&text).unwrap();
    assert_eq!(c, 'é');

    assert_eq!(to_string(&()).unwrap(), "()");
    let unit: () = from_str("( )").unwrap();
    assert_eq!(unit, ());
}

#[test]
fn arrays_encode_as_tuples() {
    let arr = [1u8, 2, 3];
    let text = to_string(&arr).unwrap();
    assert_eq!(text, "(1,2,3,)");
    let back: [u8; 3] = from_str(&text).unwrap();
    assert_eq!(arr, back);
}

#[test]
fn wide_integers_round_trip() {
    for value in [i128::MIN, -1, 0, 1, i128::MAX] {
        let text = to_string(&value).unwrap();
        let back: i128 = from_str(&text).unwrap();
        assert_eq!(value, back);
    }

    let max = u128::MAX;
    let back: u128 = from_str(&to_string(&max).unwrap()).unwrap();
    assert_eq!(max, back);
}

#[test]
fn floats_round_trip() {
    for value in [0.0f64, 1.0, -1.5, 0.1, 1e10, -12345.6789] {
        let text = to_string(&value).unwrap();
        let back: f64 = from_str(&text).unwrap();
        assert_eq!(value, back);
    }
}

#[test]
fn whole_floats_keep_their_point() {
    assert_eq!(to_string(&1.0f64).unwrap(), "1.0");
    assert_eq!(to_string(&-3.0f32).unwrap(), "-3.0");
}

#[test]
fn non_finite_floats_fail_to_encode() {
    assert!(to_string(&f64::NAN).is_err());
    assert!(to_string(&f64::INFINITY).is_err());
    assert!(to_string(&f32::NEG_INFINITY).is_err());
}

#[test]
fn borrowed_strings_decode_without_copying() {
    #[derive(Deserialize)]
    struct Borrowed<'a> {
        #[serde(borrow)]
        name: &'a str,
    }

    let text = "{ name: \"zero-copy\" }";
    let borrowed: Borrowed<'_> = from_str(text).unwrap();
    assert_eq!(borrowed.name, "zero-copy");
}

#[test]
fn enums_do_not_decode() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    enum Shade {
        Light,
    }

    assert_eq!(to_string(&Shade::Light).unwrap(), "Light");
    assert!(from_str::<Shade>("Light").is_err());
}

#[test]
fn tag_valued_fields_cannot_be_skipped() {
    let result: Result<User, _> = from_str("{ id: 1, odd: Foo 1, name: \"A\", active: Bool.true, tags: [] }");
    assert!(result.is_err());
}

#[test]
fn partial_decode_of_embedded_value() {
    let (user, rest): (User, &str) =
        from_str_partial("{id:1,name:\"A\",active:Bool.false,tags:[],} -- footer").unwrap();
    assert_eq!(user.id, 1);
    assert_eq!(rest, "-- footer");
}

#[test]
fn decode_errors_carry_offsets() {
    let err = from_str::<Vec<u8>>("[0,1,").unwrap_err();
    assert_eq!(err.offset(), Some(5));

    let err = from_str::<u8>("999").unwrap_err();
    assert_eq!(err.offset(), Some(3));

    let err = from_str::<String>("\"no closing quote").unwrap_err();
    assert_eq!(err.offset(), Some(0));
}

#[test]
fn deep_nesting_is_bounded() {
    let text = "[".repeat(300);
    assert!(from_str::<Value>(&text).is_err());
}

#[test]
fn dynamic_value_decoding() {
    let value: Value = from_str("{ a: 1, b: [Bool.true, \"x\",], c: -2.5 }").unwrap();
    assert_eq!(value.get("a").and_then(Value::as_i64), Some(1));
    assert_eq!(
        value.get("b").and_then(Value::as_list).map(Vec::len),
        Some(2)
    );
    assert_eq!(value.get("c").and_then(Value::as_f64), Some(-2.5));

    let round = to_string(&value).unwrap();
    let again: Value = from_str(&round).unwrap();
    assert_eq!(value, again);
}
