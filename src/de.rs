//! RVN deserialization.
//!
//! This module provides the [`Deserializer`] implementation that parses RVN
//! text into Rust data structures.
//!
//! ## Overview
//!
//! The parser is a recursive descent over the input bytes, holding nothing
//! but a cursor offset. No intermediate value tree is built for typed
//! decoding: each `deserialize_*` call consumes its token directly from the
//! input and hands the result to the visitor, and strings borrow from the
//! input whenever no escape sequence forces a rewrite.
//!
//! Every decoder strips leading whitespace and comments before consuming its
//! token and strips trailing whitespace after, so `" 2 X"` decodes to `2`
//! leaving `"X"` unconsumed, uniformly for every value shape. Whitespace is
//! spaces, tabs, newlines, and `#` line comments.
//!
//! Record decoding is driven by the caller's type: the derived visitor claims
//! the fields it knows, and any unclaimed key is consumed by a
//! shape-agnostic skip that discards one well-formed value of any kind.
//! Tuples enforce their arity in both directions — too few elements before
//! the closing `)` and extra elements after the expected count both fail.
//!
//! Tags (`Name attr attr`) are an encode-only construct; input positioned at
//! a tag fails to decode.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_rvn::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let data: Data = from_str("{ x: 1, y: 2 }").unwrap();
//! assert_eq!(data, Data { x: 1, y: 2 });
//! ```

use crate::{Error, Result};
use serde::de::value::BorrowedStrDeserializer;
use serde::de::{self, Visitor};
use std::borrow::Cow;

/// Compound nesting allowed before the parser gives up, guarding the native
/// call stack against pathological inputs.
const MAX_DEPTH: usize = 256;

/// The RVN deserializer.
///
/// Parses RVN text into Rust values implementing `Deserialize`. Created via
/// [`Deserializer::from_str`].
pub struct Deserializer<'de> {
    input: &'de str,
    pos: usize,
    remaining_depth: usize,
}

/// A number consumed by the self-describing paths (`deserialize_any` and
/// the skip used for unclaimed record fields). The widest widths are used so
/// any valid wire integer survives.
enum AnyNumber {
    Neg(i128),
    Pos(u128),
    Float(f64),
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Deserializer {
            input,
            pos: 0,
            remaining_depth: MAX_DEPTH,
        }
    }

    /// Returns the unconsumed suffix of the input.
    #[must_use]
    pub fn remainder(&self) -> &'de str {
        &self.input[self.pos..]
    }

    /// Fails unless the entire input has been consumed (trailing whitespace
    /// and comments excepted).
    pub fn end(&mut self) -> Result<()> {
        self.skip_whitespace();
        if self.pos == self.input.len() {
            Ok(())
        } else {
            Err(Error::too_short(self.pos))
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(Error::too_short(self.pos))
        }
    }

    /// Consumes spaces, tabs, newlines, and `#` line comments.
    fn skip_whitespace(&mut self) {
        let bytes = self.input.as_bytes();
        while let Some(&b) = bytes.get(self.pos) {
            match b {
                b' ' | b'\t' | b'\n' => self.pos += 1,
                b'#' => {
                    while let Some(&c) = bytes.get(self.pos) {
                        self.pos += 1;
                        if c == b'\n' {
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    fn descend(&mut self) -> Result<()> {
        if self.remaining_depth == 0 {
            return Err(Error::too_short(self.pos));
        }
        self.remaining_depth -= 1;
        Ok(())
    }

    fn ascend(&mut self) {
        self.remaining_depth += 1;
    }

    /// Consumes an integer span (`-`? then `0b`/`0x`? then a digit run with
    /// `_` separators) and returns the cleaned text plus its radix. The
    /// width-specific conversion decides whether the span was valid.
    fn scan_integer(&mut self) -> (String, u32) {
        let bytes = self.input.as_bytes();
        let mut text = String::new();
        if bytes.get(self.pos) == Some(&b'-') {
            text.push('-');
            self.pos += 1;
        }
        let rest = &self.input[self.pos..];
        let radix = if rest.starts_with("0b") {
            self.pos += 2;
            2
        } else if rest.starts_with("0x") {
            self.pos += 2;
            16
        } else {
            10
        };
        while let Some(&b) = bytes.get(self.pos) {
            let is_digit = match radix {
                2 => matches!(b, b'0' | b'1' | b'_'),
                16 => b.is_ascii_hexdigit() || b == b'_',
                _ => b.is_ascii_digit() || b == b'_',
            };
            if !is_digit {
                break;
            }
            if b != b'_' {
                text.push(b as char);
            }
            self.pos += 1;
        }
        (text, radix)
    }

    fn push_digit_run(&mut self, text: &mut String) {
        let bytes = self.input.as_bytes();
        while let Some(&b) = bytes.get(self.pos) {
            if !b.is_ascii_digit() && b != b'_' {
                break;
            }
            if b != b'_' {
                text.push(b as char);
            }
            self.pos += 1;
        }
    }

    /// Consumes a decimal span: `-`? digits (`.` digits)?, `_` separators
    /// allowed anywhere in a digit run.
    fn scan_decimal(&mut self) -> String {
        let mut text = String::new();
        if self.peek() == Some(b'-') {
            text.push('-');
            self.pos += 1;
        }
        self.push_digit_run(&mut text);
        if self.peek() == Some(b'.') {
            text.push('.');
            self.pos += 1;
            self.push_digit_run(&mut text);
        }
        text
    }

    fn parse_bool(&mut self) -> Result<bool> {
        let rest = &self.input[self.pos..];
        if rest.starts_with("Bool.true") {
            self.pos += "Bool.true".len();
            Ok(true)
        } else if rest.starts_with("Bool.false") {
            self.pos += "Bool.false".len();
            Ok(false)
        } else {
            Err(Error::too_short(self.pos))
        }
    }

    /// Parses a quoted string, borrowing from the input unless an escape
    /// forces a rewrite. The recognized escapes are `\n`, `\t`, `\"`, `\\`
    /// and `\$`; anything else after a backslash fails at that byte.
    fn parse_string(&mut self) -> Result<Cow<'de, str>> {
        let start = self.pos;
        if self.peek() != Some(b'"') {
            return Err(Error::too_short(self.pos));
        }
        // Triple-quoted strings are not part of the grammar.
        if self.input[self.pos..].starts_with("\"\"\"") {
            return Err(Error::too_short(start));
        }
        self.pos += 1;
        let bytes = self.input.as_bytes();
        let mut scratch: Option<String> = None;
        let mut segment_start = self.pos;
        loop {
            match bytes.get(self.pos) {
                None => return Err(Error::too_short(start)),
                Some(b'"') => {
                    let segment = &self.input[segment_start..self.pos];
                    self.pos += 1;
                    return Ok(match scratch {
                        Some(mut s) => {
                            s.push_str(segment);
                            Cow::Owned(s)
                        }
                        None => Cow::Borrowed(segment),
                    });
                }
                Some(b'\\') => {
                    let mut s = scratch.take().unwrap_or_default();
                    s.push_str(&self.input[segment_start..self.pos]);
                    self.pos += 1;
                    let unescaped = match bytes.get(self.pos) {
                        Some(b'n') => '\n',
                        Some(b't') => '\t',
                        Some(b'"') => '"',
                        Some(b'\\') => '\\',
                        Some(b'$') => '$',
                        _ => return Err(Error::too_short(self.pos)),
                    };
                    s.push(unescaped);
                    self.pos += 1;
                    segment_start = self.pos;
                    scratch = Some(s);
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    /// Consumes a record key: a maximal run of bytes that are not
    /// whitespace, `#`, or `:`. May be empty.
    fn parse_key(&mut self) -> &'de str {
        let start = self.pos;
        let bytes = self.input.as_bytes();
        while let Some(&b) = bytes.get(self.pos) {
            if matches!(b, b' ' | b'\t' | b'\n' | b'#' | b':') {
                break;
            }
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    /// Number scanner for the self-describing paths: a radix prefix selects
    /// an integer, a `.` in a decimal span selects a float, and everything
    /// converts at the widest width.
    fn parse_any_number(&mut self) -> Result<AnyNumber> {
        let negative = self.peek() == Some(b'-');
        let after_sign = self.pos + usize::from(negative);
        let prefixed = self.input[after_sign..].starts_with("0b")
            || self.input[after_sign..].starts_with("0x");
        if prefixed {
            let (text, radix) = self.scan_integer();
            return if negative {
                i128::from_str_radix(&text, radix)
                    .map(AnyNumber::Neg)
                    .map_err(|_| Error::too_short(self.pos))
            } else {
                u128::from_str_radix(&text, radix)
                    .map(AnyNumber::Pos)
                    .map_err(|_| Error::too_short(self.pos))
            };
        }
        let text = self.scan_decimal();
        if text.contains('.') {
            text.parse::<f64>()
                .map(AnyNumber::Float)
                .map_err(|_| Error::too_short(self.pos))
        } else if negative {
            text.parse::<i128>()
                .map(AnyNumber::Neg)
                .map_err(|_| Error::too_short(self.pos))
        } else {
            text.parse::<u128>()
                .map(AnyNumber::Pos)
                .map_err(|_| Error::too_short(self.pos))
        }
    }

    /// True when the cursor sits on the bare literal `None` (the one tag the
    /// host-side `Option` adapter recognizes).
    fn at_none_literal(&self) -> bool {
        let rest = &self.input[self.pos..];
        if !rest.starts_with("None") {
            return false;
        }
        match rest.as_bytes().get(4) {
            None => true,
            Some(b) => matches!(b, b' ' | b'\t' | b'\n' | b'#' | b',' | b']' | b')' | b'}'),
        }
    }

    /// Consumes one well-formed value of any shape and discards it. Used to
    /// advance past record fields the caller's type does not claim. Tags
    /// are not skippable; neither is anything else the grammar rejects.
    fn skip_value(&mut self) -> Result<()> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'"') => {
                self.parse_string()?;
            }
            Some(b'B') if self.input[self.pos..].starts_with("Bool.") => {
                self.parse_bool()?;
            }
            Some(b'-') | Some(b'0'..=b'9') => {
                self.parse_any_number()?;
            }
            Some(b'[') => self.skip_sequence(b']', false)?,
            Some(b'(') => self.skip_sequence(b')', false)?,
            Some(b'{') => self.skip_sequence(b'}', true)?,
            _ => return Err(Error::too_short(self.pos)),
        }
        self.skip_whitespace();
        Ok(())
    }

    /// Skips a comma-separated compound. With `keyed`, each element is a
    /// `key: value` field; keys are arbitrary, so this cannot share the
    /// typed record path.
    fn skip_sequence(&mut self, closer: u8, keyed: bool) -> Result<()> {
        self.descend()?;
        self.pos += 1;
        let mut first = true;
        loop {
            self.skip_whitespace();
            if self.peek() == Some(closer) {
                self.pos += 1;
                break;
            }
            if first {
                first = false;
            } else {
                match self.peek() {
                    Some(b',') => {
                        self.pos += 1;
                        self.skip_whitespace();
                        if self.peek() == Some(closer) {
                            self.pos += 1;
                            break;
                        }
                    }
                    _ => return Err(Error::too_short(self.pos)),
                }
            }
            if keyed {
                self.parse_key();
                self.skip_whitespace();
                self.expect(b':')?;
            }
            self.skip_value()?;
        }
        self.ascend();
        Ok(())
    }

    fn visit_cow_str<V>(&mut self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.skip_whitespace();
        let s = self.parse_string()?;
        self.skip_whitespace();
        match s {
            Cow::Borrowed(borrowed) => visitor.visit_borrowed_str(borrowed),
            Cow::Owned(owned) => visitor.visit_string(owned),
        }
    }
}

macro_rules! deserialize_integer {
    ($($method:ident: $ty:ty => $visit:ident),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: Visitor<'de>,
            {
                self.skip_whitespace();
                let (text, radix) = self.scan_integer();
                let parsed = <$ty>::from_str_radix(&text, radix)
                    .map_err(|_| Error::too_short(self.pos))?;
                self.skip_whitespace();
                visitor.$visit(parsed)
            }
        )*
    };
}

macro_rules! deserialize_float {
    ($($method:ident: $ty:ty => $visit:ident),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: Visitor<'de>,
            {
                self.skip_whitespace();
                let text = self.scan_decimal();
                let parsed = text
                    .parse::<$ty>()
                    .map_err(|_| Error::too_short(self.pos))?;
                self.skip_whitespace();
                visitor.$visit(parsed)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.skip_whitespace();
        match self.peek() {
            Some(b'"') => self.visit_cow_str(visitor),
            Some(b'B') if self.input[self.pos..].starts_with("Bool.") => {
                self.deserialize_bool(visitor)
            }
            Some(b'-') | Some(b'0'..=b'9') => {
                let number = self.parse_any_number()?;
                self.skip_whitespace();
                match number {
                    AnyNumber::Neg(i) => match i64::try_from(i) {
                        Ok(small) => visitor.visit_i64(small),
                        Err(_) => visitor.visit_i128(i),
                    },
                    AnyNumber::Pos(u) => match u64::try_from(u) {
                        Ok(small) => visitor.visit_u64(small),
                        Err(_) => visitor.visit_u128(u),
                    },
                    AnyNumber::Float(f) => visitor.visit_f64(f),
                }
            }
            Some(b'[') => self.deserialize_seq(visitor),
            Some(b'(') => {
                // A tuple of unknown arity surfaces as a sequence.
                self.descend()?;
                self.pos += 1;
                let value = visitor.visit_seq(ListAccess {
                    de: &mut *self,
                    closer: b')',
                    first: true,
                })?;
                self.expect(b')')?;
                self.ascend();
                self.skip_whitespace();
                Ok(value)
            }
            Some(b'{') => self.deserialize_map(visitor),
            _ => Err(Error::too_short(self.pos)),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.skip_whitespace();
        let value = self.parse_bool()?;
        self.skip_whitespace();
        visitor.visit_bool(value)
    }

    deserialize_integer! {
        deserialize_i8: i8 => visit_i8,
        deserialize_i16: i16 => visit_i16,
        deserialize_i32: i32 => visit_i32,
        deserialize_i64: i64 => visit_i64,
        deserialize_i128: i128 => visit_i128,
        deserialize_u8: u8 => visit_u8,
        deserialize_u16: u16 => visit_u16,
        deserialize_u32: u32 => visit_u32,
        deserialize_u64: u64 => visit_u64,
        deserialize_u128: u128 => visit_u128,
    }

    deserialize_float! {
        deserialize_f32: f32 => visit_f32,
        deserialize_f64: f64 => visit_f64,
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.skip_whitespace();
        let s = self.parse_string()?;
        self.skip_whitespace();
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(Error::custom("expected a single-character string")),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.visit_cow_str(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.visit_cow_str(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.skip_whitespace();
        if self.at_none_literal() {
            self.pos += "None".len();
            self.skip_whitespace();
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.skip_whitespace();
        self.expect(b'(')?;
        self.skip_whitespace();
        self.expect(b')')?;
        self.skip_whitespace();
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.skip_whitespace();
        self.descend()?;
        self.expect(b'[')?;
        let value = visitor.visit_seq(ListAccess {
            de: &mut *self,
            closer: b']',
            first: true,
        })?;
        self.expect(b']')?;
        self.ascend();
        self.skip_whitespace();
        Ok(value)
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.skip_whitespace();
        self.descend()?;
        self.expect(b'(')?;
        let value = visitor.visit_seq(TupleAccess {
            de: &mut *self,
            expected: len,
            seen: 0,
        })?;
        // The element loop leaves the cursor on `,` or `)`; anything still
        // ahead of the closer is an extra element.
        self.skip_whitespace();
        match self.peek() {
            Some(b')') => self.pos += 1,
            Some(b',') => {
                self.pos += 1;
                self.skip_whitespace();
                if self.peek() == Some(b')') {
                    self.pos += 1;
                } else {
                    return Err(Error::too_short(self.pos));
                }
            }
            _ => return Err(Error::too_short(self.pos)),
        }
        self.ascend();
        self.skip_whitespace();
        Ok(value)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_tuple(len, visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.skip_whitespace();
        self.descend()?;
        self.expect(b'{')?;
        let value = visitor.visit_map(RecordAccess {
            de: &mut *self,
            first: true,
        })?;
        self.expect(b'}')?;
        self.ascend();
        self.skip_whitespace();
        Ok(value)
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        // Tags are encode-only; there is no decoder for them.
        self.skip_whitespace();
        Err(Error::too_short(self.pos))
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.skip_value()?;
        visitor.visit_unit()
    }
}

struct ListAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
    closer: u8,
    first: bool,
}

impl<'de> de::SeqAccess<'de> for ListAccess<'_, 'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        self.de.skip_whitespace();
        if self.de.peek() == Some(self.closer) {
            return Ok(None);
        }
        if self.first {
            self.first = false;
        } else {
            match self.de.peek() {
                Some(b',') => {
                    self.de.pos += 1;
                    self.de.skip_whitespace();
                    if self.de.peek() == Some(self.closer) {
                        return Ok(None);
                    }
                }
                _ => return Err(Error::too_short(self.de.pos)),
            }
        }
        seed.deserialize(&mut *self.de).map(Some)
    }
}

struct TupleAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
    expected: usize,
    seen: usize,
}

impl<'de> de::SeqAccess<'de> for TupleAccess<'_, 'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        if self.seen == self.expected {
            return Ok(None);
        }
        self.de.skip_whitespace();
        if self.seen > 0 {
            match self.de.peek() {
                Some(b',') => {
                    self.de.pos += 1;
                    self.de.skip_whitespace();
                }
                _ => return Err(Error::too_short(self.de.pos)),
            }
        }
        // Closing before every expected element arrived is an arity error.
        if self.de.peek() == Some(b')') {
            return Err(Error::too_short(self.de.pos));
        }
        self.seen += 1;
        seed.deserialize(&mut *self.de).map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.expected - self.seen)
    }
}

struct RecordAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
    first: bool,
}

impl<'de> de::MapAccess<'de> for RecordAccess<'_, 'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        self.de.skip_whitespace();
        if self.de.peek() == Some(b'}') {
            return Ok(None);
        }
        if self.first {
            self.first = false;
        } else {
            match self.de.peek() {
                Some(b',') => {
                    self.de.pos += 1;
                    self.de.skip_whitespace();
                    if self.de.peek() == Some(b'}') {
                        return Ok(None);
                    }
                }
                _ => return Err(Error::too_short(self.de.pos)),
            }
        }
        let key = self.de.parse_key();
        seed.deserialize(BorrowedStrDeserializer::new(key)).map(Some)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        self.de.skip_whitespace();
        self.de.expect(b':')?;
        seed.deserialize(&mut *self.de)
    }
}
