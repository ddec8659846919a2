//! RVN serialization.
//!
//! This module provides the [`Serializer`] implementation that converts Rust
//! data structures into RVN text.
//!
//! ## Overview
//!
//! The serializer is a single tree-walk that appends into a growing `String`.
//! It is parameterized by a small format state threaded through the
//! recursion:
//!
//! - the output [`Format`] (Compact or Pretty),
//! - the current indent depth (four spaces per level in Pretty),
//! - an `in_tag` flag, true while encoding a tag's attribute list.
//!
//! Entering any bracketed compound (list, record, tuple) clears `in_tag` and
//! bumps the depth; entering a tag's attributes sets `in_tag`. The flag
//! exists for exactly one decision: a tag that itself carries attributes and
//! appears directly inside another tag's attribute list must be wrapped in
//! parentheses, because nothing else delimits it there.
//!
//! Every compound emits a comma after every element, including the last, so
//! Compact output looks like `[1,2,]` and `{x:1,y:2,}`.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde::Serialize;
//! use serde_rvn::{to_string, to_string_pretty};
//!
//! #[derive(Serialize)]
//! struct Data {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let data = Data { x: 1, y: 2 };
//! assert_eq!(to_string(&data).unwrap(), "{x:1,y:2,}");
//! assert_eq!(to_string_pretty(&data).unwrap(), "{\n    x: 1,\n    y: 2,\n}");
//! ```

use crate::options::{Format, INDENT};
use crate::{Error, Number, Result, RvnMap, Value};
use serde::{ser, Serialize};

/// The RVN serializer.
///
/// Converts values implementing `Serialize` into RVN text. Created via
/// [`Serializer::new`] with the desired output [`Format`].
pub struct Serializer {
    output: String,
    format: Format,
    indent: usize,
    in_tag: bool,
}

/// Saved encoder state around a bracketed compound.
struct CompoundFrame {
    in_tag: bool,
}

/// Saved encoder state around a tag and its attribute list.
struct TagFrame {
    paren: bool,
    indent: usize,
    in_tag: bool,
}

impl Serializer {
    pub fn new(format: Format) -> Self {
        Serializer {
            output: String::with_capacity(256),
            format,
            indent: 0,
            in_tag: false,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    #[inline]
    fn pretty(&self) -> bool {
        self.format.is_pretty()
    }

    fn write_indent(&mut self, levels: usize) {
        for _ in 0..levels {
            self.output.push_str(INDENT);
        }
    }

    fn write_string(&mut self, s: &str) {
        self.output.push('"');
        for ch in s.chars() {
            match ch {
                '\n' => self.output.push_str("\\n"),
                '\t' => self.output.push_str("\\t"),
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '$' => self.output.push_str("\\$"),
                _ => self.output.push(ch),
            }
        }
        self.output.push('"');
    }

    /// Appends a float in its shortest decimal form, with a `.0` suffix when
    /// the digits alone would read back as an integer. The wire grammar has
    /// no exponent, infinity, or NaN tokens.
    fn write_float<F: std::fmt::Display>(&mut self, v: F, finite: bool) -> Result<()> {
        if !finite {
            return Err(Error::custom("RVN cannot represent non-finite floats"));
        }
        let text = v.to_string();
        self.output.push_str(&text);
        if !text.contains('.') {
            self.output.push_str(".0");
        }
        Ok(())
    }

    /// Opens a list/record/tuple. Inside a compound the surrounding
    /// whitespace and brackets delimit everything, so `in_tag` is cleared.
    fn begin_compound(&mut self, open: char) -> CompoundFrame {
        self.output.push(open);
        let frame = CompoundFrame { in_tag: self.in_tag };
        self.in_tag = false;
        self.indent += 1;
        frame
    }

    fn end_compound(&mut self, frame: CompoundFrame, had_elements: bool, close: char) {
        self.indent -= 1;
        self.in_tag = frame.in_tag;
        if had_elements && self.pretty() {
            let levels = self.indent;
            self.write_indent(levels);
        }
        self.output.push(close);
    }

    /// Writes a tag name, parenthesizing when the tag carries attributes and
    /// already sits inside another tag's attribute list. Attributes go one
    /// level deeper than the tag, two when parenthesized.
    fn begin_tag(&mut self, name: &str, has_attrs: bool) -> TagFrame {
        let paren = self.in_tag && has_attrs;
        if paren {
            self.output.push('(');
            if self.pretty() {
                self.output.push('\n');
                let levels = self.indent + 1;
                self.write_indent(levels);
            }
        }
        self.output.push_str(name);
        let frame = TagFrame {
            paren,
            indent: self.indent,
            in_tag: self.in_tag,
        };
        self.in_tag = true;
        self.indent += if paren { 2 } else { 1 };
        frame
    }

    fn write_attr_separator(&mut self) {
        if self.pretty() {
            self.output.push('\n');
            let levels = self.indent;
            self.write_indent(levels);
        } else {
            self.output.push(' ');
        }
    }

    fn end_tag(&mut self, frame: TagFrame) {
        self.indent = frame.indent;
        self.in_tag = frame.in_tag;
        if frame.paren {
            if self.pretty() {
                let levels = self.indent;
                self.output.push('\n');
                self.write_indent(levels);
            }
            self.output.push(')');
        }
    }
}

macro_rules! serialize_integer {
    ($($method:ident: $ty:ty),* $(,)?) => {
        $(
            fn $method(self, v: $ty) -> Result<Self::Ok> {
                self.output.push_str(&v.to_string());
                Ok(())
            }
        )*
    };
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = SeqSerializer<'a>;
    type SerializeTuple = SeqSerializer<'a>;
    type SerializeTupleStruct = SeqSerializer<'a>;
    type SerializeTupleVariant = TupleVariantSerializer<'a>;
    type SerializeMap = MapSerializer<'a>;
    type SerializeStruct = StructSerializer<'a>;
    type SerializeStructVariant = StructVariantSerializer<'a>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        self.output.push_str(if v { "Bool.true" } else { "Bool.false" });
        Ok(())
    }

    serialize_integer! {
        serialize_i8: i8,
        serialize_i16: i16,
        serialize_i32: i32,
        serialize_i64: i64,
        serialize_i128: i128,
        serialize_u8: u8,
        serialize_u16: u16,
        serialize_u32: u32,
        serialize_u64: u64,
        serialize_u128: u128,
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        self.write_float(v, v.is_finite())
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        self.write_float(v, v.is_finite())
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        self.write_string(v.encode_utf8(&mut [0u8; 4]));
        Ok(())
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        self.write_string(v);
        Ok(())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        use ser::SerializeSeq;
        let mut seq = self.serialize_seq(Some(v.len()))?;
        for byte in v {
            seq.serialize_element(byte)?;
        }
        seq.end()
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        // Rust-side convention: Option renders as its variant tags, and the
        // nullary one stays bare.
        self.output.push_str("None");
        Ok(())
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        self.output.push_str("()");
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        // A nullary tag never needs parentheses, even inside another tag.
        self.output.push_str(variant);
        Ok(())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        let frame = self.begin_tag(variant, true);
        self.write_attr_separator();
        value.serialize(&mut *self)?;
        self.end_tag(frame);
        Ok(())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        let frame = self.begin_compound('[');
        Ok(SeqSerializer {
            ser: self,
            frame,
            close: ']',
            had_elements: false,
        })
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        let frame = self.begin_compound('(');
        Ok(SeqSerializer {
            ser: self,
            frame,
            close: ')',
            had_elements: false,
        })
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_tuple(len)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        let frame = self.begin_tag(variant, len > 0);
        Ok(TupleVariantSerializer { ser: self, frame })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        let frame = self.begin_compound('{');
        Ok(MapSerializer {
            ser: self,
            frame,
            had_fields: false,
            pending_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        let frame = self.begin_compound('{');
        Ok(StructSerializer {
            ser: self,
            frame,
            had_fields: false,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        // A struct variant is a tag carrying a single record attribute.
        let tag_frame = self.begin_tag(variant, true);
        self.write_attr_separator();
        let record_frame = self.begin_compound('{');
        Ok(StructVariantSerializer {
            ser: self,
            tag_frame,
            record_frame,
            had_fields: false,
        })
    }
}

pub struct SeqSerializer<'a> {
    ser: &'a mut Serializer,
    frame: CompoundFrame,
    close: char,
    had_elements: bool,
}

impl SeqSerializer<'_> {
    fn element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if self.ser.pretty() {
            if !self.had_elements {
                self.ser.output.push('\n');
            }
            let levels = self.ser.indent;
            self.ser.write_indent(levels);
        }
        self.had_elements = true;
        value.serialize(&mut *self.ser)?;
        self.ser.output.push(',');
        if self.ser.pretty() {
            self.ser.output.push('\n');
        }
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.ser.end_compound(self.frame, self.had_elements, self.close);
        Ok(())
    }
}

impl ser::SerializeSeq for SeqSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeTuple for SeqSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for SeqSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

pub struct TupleVariantSerializer<'a> {
    ser: &'a mut Serializer,
    frame: TagFrame,
}

impl ser::SerializeTupleVariant for TupleVariantSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.write_attr_separator();
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<Self::Ok> {
        self.ser.end_tag(self.frame);
        Ok(())
    }
}

pub struct StructSerializer<'a> {
    ser: &'a mut Serializer,
    frame: CompoundFrame,
    had_fields: bool,
}

fn write_record_field<T>(
    ser: &mut Serializer,
    had_fields: &mut bool,
    key: &str,
    value: &T,
) -> Result<()>
where
    T: ?Sized + Serialize,
{
    if ser.pretty() {
        if !*had_fields {
            ser.output.push('\n');
        }
        let levels = ser.indent;
        ser.write_indent(levels);
    }
    *had_fields = true;
    ser.output.push_str(key);
    ser.output.push(':');
    if ser.pretty() {
        ser.output.push(' ');
    }
    value.serialize(&mut *ser)?;
    ser.output.push(',');
    if ser.pretty() {
        ser.output.push('\n');
    }
    Ok(())
}

impl ser::SerializeStruct for StructSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        write_record_field(self.ser, &mut self.had_fields, key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.ser.end_compound(self.frame, self.had_fields, '}');
        Ok(())
    }
}

pub struct MapSerializer<'a> {
    ser: &'a mut Serializer,
    frame: CompoundFrame,
    had_fields: bool,
    pending_key: Option<String>,
}

impl ser::SerializeMap for MapSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(ValueSerializer)? {
            Value::String(s) => {
                self.pending_key = Some(s);
                Ok(())
            }
            _ => Err(Error::custom("map keys must be strings")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        write_record_field(self.ser, &mut self.had_fields, &key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.ser.end_compound(self.frame, self.had_fields, '}');
        Ok(())
    }
}

pub struct StructVariantSerializer<'a> {
    ser: &'a mut Serializer,
    tag_frame: TagFrame,
    record_frame: CompoundFrame,
    had_fields: bool,
}

impl ser::SerializeStructVariant for StructVariantSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        write_record_field(self.ser, &mut self.had_fields, key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.ser
            .end_compound(self.record_frame, self.had_fields, '}');
        self.ser.end_tag(self.tag_frame);
        Ok(())
    }
}

/// Serializer producing a dynamic [`Value`] instead of text; backs
/// [`to_value`](crate::to_value).
///
/// Tags (enum variants) have no dynamic representation, so every variant
/// shape is rejected here even though the text serializer accepts them.
pub struct ValueSerializer;

pub struct ValueSeqSerializer {
    items: Vec<Value>,
    tuple: bool,
}

pub struct ValueMapSerializer {
    fields: RvnMap,
    pending_key: Option<String>,
}

fn variant_error<T>() -> Result<T> {
    Err(Error::custom(
        "enum variants have no dynamic value representation",
    ))
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = ValueSeqSerializer;
    type SerializeTuple = ValueSeqSerializer;
    type SerializeTupleStruct = ValueSeqSerializer;
    type SerializeTupleVariant = ser::Impossible<Value, Error>;
    type SerializeMap = ValueMapSerializer;
    type SerializeStruct = ValueMapSerializer;
    type SerializeStructVariant = ser::Impossible<Value, Error>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        self.serialize_i128(v as i128)
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        self.serialize_i128(v as i128)
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        self.serialize_i128(v as i128)
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        self.serialize_i128(v as i128)
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        self.serialize_i128(v as i128)
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        self.serialize_i128(v as i128)
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        self.serialize_i128(v as i128)
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        self.serialize_i128(v as i128)
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        match i128::try_from(v) {
            Ok(i) => self.serialize_i128(i),
            Err(_) => Err(Error::custom("integer out of range for a dynamic value")),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Number(Number::Float(v as f64)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::List(
            v.iter().map(|&b| Value::from(b)).collect(),
        ))
    }

    fn serialize_none(self) -> Result<Value> {
        self.serialize_unit()
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Tuple(vec![]))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Value> {
        variant_error()
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        variant_error()
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<ValueSeqSerializer> {
        Ok(ValueSeqSerializer {
            items: Vec::with_capacity(len.unwrap_or(0)),
            tuple: false,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<ValueSeqSerializer> {
        Ok(ValueSeqSerializer {
            items: Vec::with_capacity(len),
            tuple: true,
        })
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<ValueSeqSerializer> {
        self.serialize_tuple(len)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        variant_error()
    }

    fn serialize_map(self, len: Option<usize>) -> Result<ValueMapSerializer> {
        Ok(ValueMapSerializer {
            fields: RvnMap::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<ValueMapSerializer> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        variant_error()
    }
}

impl ser::SerializeSeq for ValueSeqSerializer {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(if self.tuple {
            Value::Tuple(self.items)
        } else {
            Value::List(self.items)
        })
    }
}

impl ser::SerializeTuple for ValueSeqSerializer {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for ValueSeqSerializer {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeMap for ValueMapSerializer {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(ValueSerializer)? {
            Value::String(s) => {
                self.pending_key = Some(s);
                Ok(())
            }
            _ => Err(Error::custom("map keys must be strings")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.fields.insert(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Record(self.fields))
    }
}

impl ser::SerializeStruct for ValueMapSerializer {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.fields
            .insert(key.to_string(), value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Record(self.fields))
    }
}
