use serde_rvn::{rvn, Number, RvnMap, Value};

#[test]
fn rvn_macro_booleans() {
    assert_eq!(rvn!(true), Value::Bool(true));
    assert_eq!(rvn!(false), Value::Bool(false));
}

#[test]
fn rvn_macro_numbers() {
    assert_eq!(rvn!(42), Value::Number(Number::Integer(42)));
    assert_eq!(rvn!(-123), Value::Number(Number::Integer(-123)));
    assert_eq!(rvn!(3.5), Value::Number(Number::Float(3.5)));
}

#[test]
fn rvn_macro_strings() {
    assert_eq!(rvn!("hello"), Value::String("hello".to_string()));
    assert_eq!(rvn!(""), Value::String(String::new()));
}

#[test]
fn rvn_macro_lists() {
    assert_eq!(rvn!([]), Value::List(vec![]));
    assert_eq!(
        rvn!([1, 2, 3]),
        Value::List(vec![
            Value::Number(Number::Integer(1)),
            Value::Number(Number::Integer(2)),
            Value::Number(Number::Integer(3)),
        ])
    );
    // Trailing commas are fine, as on the wire.
    assert_eq!(rvn!([true,]), Value::List(vec![Value::Bool(true)]));
}

#[test]
fn rvn_macro_tuples() {
    assert_eq!(rvn!(()), Value::Tuple(vec![]));
    assert_eq!(
        rvn!((1, "two")),
        Value::Tuple(vec![
            Value::Number(Number::Integer(1)),
            Value::String("two".to_string()),
        ])
    );
}

#[test]
fn rvn_macro_records() {
    assert_eq!(rvn!({}), Value::Record(RvnMap::new()));

    let value = rvn!({
        "name": "Alice",
        "age": 30,
    });
    assert_eq!(value.get("name").and_then(Value::as_str), Some("Alice"));
    assert_eq!(value.get("age").and_then(Value::as_i64), Some(30));
}

#[test]
fn rvn_macro_nesting() {
    let value = rvn!({
        "user": { "id": 1, "tags": ["a", "b"] },
        "point": (3, 4),
    });

    let user = value.get("user").unwrap();
    assert_eq!(user.get("id").and_then(Value::as_i64), Some(1));
    assert!(user.get("tags").map(Value::is_list).unwrap_or(false));
    assert!(value.get("point").map(Value::is_tuple).unwrap_or(false));
}

#[test]
fn macro_values_display_compactly() {
    let value = rvn!({ "a": [1, 2], "b": (3,) });
    assert_eq!(value.to_string(), "{a:[1,2,],b:(3,),}");
}

#[test]
fn macro_values_round_trip() {
    let value = rvn!({ "xs": [1, 2, 3], "ok": true });
    let text = serde_rvn::to_string(&value).unwrap();
    let back: Value = serde_rvn::from_str(&text).unwrap();
    assert_eq!(value, back);
}
