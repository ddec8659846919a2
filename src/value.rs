//! Dynamic value representation for RVN data.
//!
//! This module provides the [`Value`] enum, which can hold any decodable RVN
//! value. The typed codec never goes through a value tree — structs and
//! tuples decode straight into their target types — but a dynamic tree is
//! useful when the shape of the input is not known at compile time, or when
//! building documents programmatically with the [`rvn!`](crate::rvn) macro.
//!
//! Tags have no `Value` carrier: they are an encode-only construct, produced
//! from Rust enums by the serializer and never recovered by the parser.
//!
//! ## Examples
//!
//! ```rust
//! use serde_rvn::{from_str, Value};
//!
//! let value: Value = from_str("{ name: \"Alice\", scores: [1, 2, 3,] }").unwrap();
//! assert_eq!(value.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```
//!
//! When the expected shape is unknown, parenthesized input necessarily
//! surfaces as a sequence, so a tuple read into a [`Value`] comes back as a
//! [`Value::List`].

use crate::RvnMap;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq, SerializeTuple};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed RVN value.
///
/// # Examples
///
/// ```rust
/// use serde_rvn::{Number, Value};
///
/// let num = Value::Number(Number::Integer(42));
/// let text = Value::String("hello".to_string());
///
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Record(RvnMap),
}

/// A numeric RVN value: a signed 128-bit integer or a binary float.
///
/// The integer variant is wide enough to hold every integer width the wire
/// format carries (8 through 128 bits).
///
/// # Examples
///
/// ```rust
/// use serde_rvn::Number;
///
/// assert!(Number::Integer(42).is_integer());
/// assert_eq!(Number::Integer(42).as_f64(), 42.0);
/// assert_eq!(Number::Float(2.5).as_i128(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i128),
    Float(f64),
}

impl Number {
    /// Returns `true` if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i128` if it is an integer or a
    /// fraction-free float in range.
    #[inline]
    #[must_use]
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i128::MIN as f64 && *f <= i128::MAX as f64 {
                    Some(*f as i128)
                } else {
                    None
                }
            }
        }
    }

    /// Converts this number to an `i64` if it fits.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_i128().and_then(|i| i64::try_from(i).ok())
    }

    /// Converts this number to an `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

macro_rules! number_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::Integer(value as i128)
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::Integer(value as i128))
                }
            }
        )*
    };
}

number_from_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<i128> for Number {
    fn from(value: i128) -> Self {
        Number::Integer(value)
    }
}

impl From<i128> for Value {
    fn from(value: i128) -> Self {
        Value::Number(Number::Integer(value))
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl Value {
    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is a list.
    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Returns `true` if the value is a tuple.
    #[inline]
    #[must_use]
    pub const fn is_tuple(&self) -> bool {
        matches!(self, Value::Tuple(_))
    }

    /// Returns `true` if the value is a record.
    #[inline]
    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    /// If the value is a boolean, returns it.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is an integer (or fraction-free float), returns it.
    #[inline]
    #[must_use]
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::Number(n) => n.as_i128(),
            _ => None,
        }
    }

    /// If the value is an integer that fits in `i64`, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the value is a number, returns it as `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a list, returns a reference to its elements.
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// If the value is a tuple, returns a reference to its elements.
    #[inline]
    #[must_use]
    pub fn as_tuple(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// If the value is a record, returns a reference to its fields.
    #[inline]
    #[must_use]
    pub fn as_record(&self) -> Option<&RvnMap> {
        match self {
            Value::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Looks up a field of a record value.
    ///
    /// Returns `None` if the value is not a record or the key is absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_record().and_then(|fields| fields.get(key))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(Number::Float(value as f64))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<RvnMap> for Value {
    fn from(value: RvnMap) -> Self {
        Value::Record(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_i64()
            .ok_or_else(|| crate::Error::custom(format!("expected integer, found {:?}", value)))
    }
}

impl TryFrom<Value> for i128 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_i128()
            .ok_or_else(|| crate::Error::custom(format!("expected integer, found {:?}", value)))
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| crate::Error::custom(format!("expected number, found {:?}", value)))
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| crate::Error::custom(format!("expected boolean, found {:?}", value)))
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(crate::Error::custom(format!(
                "expected string, found {:?}",
                other
            ))),
        }
    }
}

/// Displays the value in its Compact wire form.
///
/// ```rust
/// use serde_rvn::rvn;
///
/// let value = rvn!({ "a": [1, 2] });
/// assert_eq!(value.to_string(), "{a:[1,2,],}");
/// ```
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match crate::to_string(self) {
            Ok(s) => f.write_str(&s),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Integer(i)) => match i64::try_from(*i) {
                Ok(small) => serializer.serialize_i64(small),
                Err(_) => serializer.serialize_i128(*i),
            },
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Tuple(items) => {
                let mut tuple = serializer.serialize_tuple(items.len())?;
                for item in items {
                    tuple.serialize_element(item)?;
                }
                tuple.end()
            }
            Value::Record(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any RVN value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Value, E> {
                Ok(Value::Number(Number::Integer(value as i128)))
            }

            fn visit_i128<E>(self, value: i128) -> Result<Value, E> {
                Ok(Value::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Value, E> {
                Ok(Value::Number(Number::Integer(value as i128)))
            }

            fn visit_u128<E>(self, value: u128) -> Result<Value, E>
            where
                E: serde::de::Error,
            {
                match i128::try_from(value) {
                    Ok(i) => Ok(Value::Number(Number::Integer(i))),
                    Err(_) => Err(E::custom("integer out of range for a dynamic value")),
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Value, E> {
                Ok(Value::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Value, E> {
                Ok(Value::String(value))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Value::List(items))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut fields = RvnMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    fields.insert(key, value);
                }
                Ok(Value::Record(fields))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}
