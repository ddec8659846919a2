//! # serde_rvn
//!
//! A Serde-compatible codec for RVN, a human-editable data-interchange
//! format whose concrete syntax mirrors an expression sublanguage.
//!
//! ## What is RVN?
//!
//! RVN text is built from a small set of value shapes:
//!
//! - records: `{ name: "Alice", age: 30, }`
//! - lists: `[1, 2, 3,]`
//! - tuples: `(4, "five",)`
//! - tags: `Rgb 0 128 255` (encode-only, produced from Rust enums)
//! - strings with exactly five escapes: `\n`, `\t`, `\"`, `\\`, `\$`
//! - booleans: `Bool.true` and `Bool.false`
//! - integers in decimal, binary (`0b101`) and hex (`0x1a`), with `_`
//!   digit separators
//! - decimals: `-12.5`
//!
//! Whitespace, `#` line comments, and trailing commas are insignificant
//! everywhere, so files stay pleasant to edit by hand and to diff.
//!
//! ## Key Features
//!
//! - **Two output modes**: Compact for wire transfer, Pretty (four-space
//!   indent) for files humans maintain
//! - **Serde Compatible**: works with existing Rust types via
//!   `#[derive(Serialize, Deserialize)]`
//! - **Streaming decode**: values parse straight into their target types
//!   with borrowed strings; no intermediate tree
//! - **Forward-compatible records**: unknown record fields are skipped
//!   structurally, whatever their shape
//! - **Partial decoding**: [`from_str_partial`] returns the unconsumed
//!   input suffix for embedding RVN in a larger stream
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! serde_rvn = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Basic Serialization and Deserialization
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_rvn::{from_str, to_string, to_string_pretty};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     active: true,
//! };
//!
//! let compact = to_string(&user).unwrap();
//! assert_eq!(compact, "{id:123,name:\"Alice\",active:Bool.true,}");
//!
//! let pretty = to_string_pretty(&user).unwrap();
//! assert_eq!(
//!     pretty,
//!     "{\n    id: 123,\n    name: \"Alice\",\n    active: Bool.true,\n}"
//! );
//!
//! let back: User = from_str(&compact).unwrap();
//! assert_eq!(user, back);
//! ```
//!
//! ### Tags
//!
//! Rust enums encode as RVN tags. A tag nested directly inside another
//! tag's attribute list is parenthesized; everywhere else the surrounding
//! syntax already delimits it:
//!
//! ```rust
//! use serde::Serialize;
//! use serde_rvn::to_string;
//!
//! #[derive(Serialize)]
//! enum Shade {
//!     Light,
//!     Rgb(u8, u8, u8),
//! }
//!
//! #[derive(Serialize)]
//! enum Fill {
//!     Solid(Shade),
//! }
//!
//! assert_eq!(to_string(&Fill::Solid(Shade::Light)).unwrap(), "Solid Light");
//! assert_eq!(
//!     to_string(&Fill::Solid(Shade::Rgb(0, 128, 255))).unwrap(),
//!     "Solid (Rgb 0 128 255)"
//! );
//! ```
//!
//! Tags are an encode-only construct: decoding input positioned at a tag
//! fails, and record fields holding tags cannot be skipped over.
//!
//! ### Dynamic Values with the rvn! Macro
//!
//! ```rust
//! use serde_rvn::{rvn, Value};
//!
//! let data = rvn!({
//!     "name": "Alice",
//!     "age": 30,
//!     "tags": ["rust", "serde"],
//! });
//!
//! assert_eq!(data.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```
//!
//! ## Decoding Guarantees
//!
//! Every decoder consumes leading whitespace and comments, its token, and
//! trailing whitespace, uniformly across value shapes. [`from_str`] requires
//! the whole input to be consumed; [`from_str_partial`] hands back whatever
//! follows the first value. All parse failures carry the byte offset of the
//! failure cursor ([`Error::offset`]).
//!
//! ## Format Reference
//!
//! The wire format is documented in the [`spec`] module.

pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod spec;
pub mod value;

pub use de::Deserializer;
pub use error::{Error, Result};
pub use map::RvnMap;
pub use options::Format;
pub use ser::{Serializer, ValueSerializer};
pub use value::{Number, Value};

use serde::{Deserialize, Serialize};
use std::io;

/// Serializes any `T: Serialize` to Compact RVN text.
///
/// # Examples
///
/// ```rust
/// use serde_rvn::to_string;
///
/// assert_eq!(to_string(&vec![1, 2]).unwrap(), "[1,2,]");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented (non-finite floats,
/// maps with non-string keys).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_format(value, Format::Compact)
}

/// Serializes any `T: Serialize` to Pretty RVN text: newline-separated,
/// four spaces per nesting level, closing brackets on their own lines.
///
/// # Examples
///
/// ```rust
/// use serde_rvn::to_string_pretty;
///
/// assert_eq!(
///     to_string_pretty(&vec![1, 2, 3]).unwrap(),
///     "[\n    1,\n    2,\n    3,\n]"
/// );
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_format(value, Format::Pretty)
}

/// Serializes any `T: Serialize` to RVN text in the given [`Format`].
///
/// # Errors
///
/// Returns an error if the value cannot be represented.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_format<T>(value: &T, format: Format) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new(format);
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Converts any `T: Serialize` into a dynamic [`Value`].
///
/// Useful when RVN data needs to be inspected or assembled without a fixed
/// schema. Enum variants have no dynamic representation and are rejected.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_rvn::to_value;
///
/// #[derive(Serialize)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_record());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be captured as a [`Value`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serializes any `T: Serialize` to a writer as Compact RVN text.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_format(writer, value, Format::Compact)
}

/// Serializes any `T: Serialize` to a writer in the given [`Format`].
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_format<W, T>(mut writer: W, value: &T, format: Format) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_format(value, format)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserializes an instance of type `T` from RVN text.
///
/// The whole input must be consumed; trailing bytes beyond whitespace and
/// comments fail with the offset of the first stray byte.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_rvn::from_str;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let point: Point = from_str("{ x: 1, y: 2 }").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid RVN or cannot be deserialized
/// to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    let mut deserializer = Deserializer::from_str(s);
    let value = T::deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(value)
}

/// Deserializes one value from the front of `s`, returning it together with
/// the unconsumed suffix.
///
/// # Examples
///
/// ```rust
/// use serde_rvn::{from_str_partial, Value};
///
/// let (value, rest): (Value, &str) = from_str_partial("[1, 2,] trailing").unwrap();
/// assert!(value.is_list());
/// assert_eq!(rest, "trailing");
/// ```
///
/// # Errors
///
/// Returns an error if no value could be decoded; [`Error::offset`] then
/// locates the failure in the original input.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_partial<'a, T>(s: &'a str) -> Result<(T, &'a str)>
where
    T: Deserialize<'a>,
{
    let mut deserializer = Deserializer::from_str(s);
    let value = T::deserialize(&mut deserializer)?;
    Ok((value, deserializer.remainder()))
}

/// Deserializes an instance of type `T` from RVN bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid RVN, or
/// cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserializes an instance of type `T` from an I/O stream of RVN text.
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid RVN, or the
/// data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_round_trip() {
        let numbers = vec![1u8, 2, 3];
        let text = to_string(&numbers).unwrap();
        assert_eq!(text, "[1,2,3,]");
        let back: Vec<u8> = from_str(&text).unwrap();
        assert_eq!(numbers, back);
    }

    #[test]
    fn pretty_list_geometry() {
        let text = to_string_pretty(&vec![1, 2, 3]).unwrap();
        assert_eq!(text, "[\n    1,\n    2,\n    3,\n]");
    }

    #[test]
    fn tuple_round_trip() {
        let tuple = (4u8, "five".to_string());
        let text = to_string(&tuple).unwrap();
        assert_eq!(text, "(4,\"five\",)");
        let back: (u8, String) = from_str(&text).unwrap();
        assert_eq!(tuple, back);
    }

    #[test]
    fn partial_decode_returns_rest() {
        let (value, rest): (u8, &str) = from_str_partial(" 2 X").unwrap();
        assert_eq!(value, 2);
        assert_eq!(rest, "X");
    }

    #[test]
    fn full_decode_rejects_trailing_bytes() {
        let err = from_str::<u8>("2 X").unwrap_err();
        assert_eq!(err.offset(), Some(2));
    }

    #[test]
    fn to_value_captures_records() {
        let value = to_value(&std::collections::BTreeMap::from([("k", 1)])).unwrap();
        assert_eq!(value.get("k").and_then(Value::as_i64), Some(1));
    }

    #[test]
    fn writer_round_trip() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &vec![true, false]).unwrap();
        let back: Vec<bool> = from_slice(&buffer).unwrap();
        assert_eq!(back, vec![true, false]);
    }
}
