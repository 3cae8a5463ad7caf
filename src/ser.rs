//! CKT encoding.
//!
//! Anything implementing [`Encode`] can be written as CKT text. Encoding first
//! asks each value how it wants to be represented ([`Class`]), then emits the
//! primitives and tables that come out of that classification:
//!
//! - **Positional or named**: inside a table, a member whose key equals the
//!   number of positional members already written is emitted bare; every
//!   other member is written `key = value`. Positional members come first.
//! - **Omission**: values classified as [`Class::Omit`] (`None`, `()`,
//!   `i128`, big integers, ...) leave no trace, not even their key.
//! - **Cycles**: a table reached again while it is still being written fails
//!   with [`Error::CyclicReference`] instead of recursing forever.
//!
//! ## Usage
//!
//! ```rust
//! use serde_ckt::{encode, ckt, Indent};
//!
//! let value = ckt!({"color": "blue", "points": [[0, 0], [10, 1]]});
//! assert_eq!(
//!     encode(&value, Indent::None).unwrap(),
//!     "color=blue,points=[[0,0],[10,1]]"
//! );
//! ```
//!
//! For `T: Serialize` use [`to_string`](crate::to_string), which goes
//! through [`ValueSerializer`] first.

use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use indexmap::IndexMap;
use num_bigint::BigInt;
use serde::{ser, Serialize};

use crate::literal::{format_number, is_element_key, write_key, write_string};
use crate::options::Indent;
use crate::{Error, Result, Table, Value};

/// How a value is represented in CKT.
pub enum Class<'a> {
    /// No representation; the member is skipped entirely.
    Omit,
    Null,
    Bool(bool),
    /// Non-finite numbers are written as `null`.
    Number(f64),
    String(Cow<'a, str>),
    Table(&'a dyn TableSource),
    /// Replace the value by another one and classify that instead.
    Convert(Box<dyn Encode + 'a>),
}

/// Values that can be written as CKT.
///
/// # Examples
///
/// ```rust
/// use serde_ckt::{encode, Class, Encode, Indent};
///
/// struct Celsius(i32);
///
/// impl Encode for Celsius {
///     fn classify(&self) -> Class<'_> {
///         Class::Convert(Box::new(format!("{}C", self.0)))
///     }
/// }
///
/// let readings = vec![Celsius(21), Celsius(-4)];
/// assert_eq!(encode(&readings, Indent::None).unwrap(), "21C,\"-4C\"");
/// ```
pub trait Encode {
    fn classify(&self) -> Class<'_>;
}

/// A container the encoder can walk as a table.
///
/// `visit_entries` reports every member in order; returning the visitor's
/// error unchanged lets encoding failures propagate.
pub trait TableSource {
    fn visit_entries(&self, visitor: &mut dyn FnMut(&str, &dyn Encode) -> Result<()>)
        -> Result<()>;

    /// Name of the concrete type, part of the identity used for cycle
    /// detection. A struct and its first field share an address, so the
    /// address alone cannot tell them apart.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Encodes `value` as CKT text.
///
/// An empty indent produces compact output; anything else pretty-prints with
/// one member per line. A root that classifies as [`Class::Omit`] yields an
/// empty string.
///
/// # Examples
///
/// ```rust
/// use serde_ckt::{encode, Indent};
///
/// let rows = vec![vec!["a", "b"], vec!["c"]];
/// assert_eq!(encode(&rows, Indent::None).unwrap(), "[a,b],[c]");
/// assert_eq!(encode(&rows, "\t").unwrap(), "[\n\ta\n\tb\n]\n[\n\tc\n]");
/// assert_eq!(encode(&None::<i32>, Indent::None).unwrap(), "");
/// ```
///
/// # Errors
///
/// Returns [`Error::CyclicReference`] when a table contains itself.
pub fn encode<E>(value: &E, indent: impl Into<Indent>) -> Result<String>
where
    E: Encode + ?Sized,
{
    let indent = indent.into();
    let mut encoder = Encoder::new(&indent);
    Ok(encoder.render(&value)?.unwrap_or_default())
}

/// Address, size and concrete type of a table being written.
type Identity = (usize, usize, &'static str);

struct Encoder {
    indent: String,
    stack: Vec<Identity>,
}

impl Encoder {
    fn new(indent: &Indent) -> Self {
        Encoder {
            indent: indent.unit().into_owned(),
            stack: Vec::new(),
        }
    }

    fn pretty(&self) -> bool {
        !self.indent.is_empty()
    }

    fn render(&mut self, value: &dyn Encode) -> Result<Option<String>> {
        let text = match value.classify() {
            Class::Omit => return Ok(None),
            Class::Null => "null".to_string(),
            Class::Bool(b) => b.to_string(),
            Class::Number(n) => format_number(n),
            Class::String(s) => {
                let mut out = String::with_capacity(s.len());
                write_string(&mut out, &s);
                out
            }
            Class::Table(table) => self.render_table(table)?,
            Class::Convert(converted) => return self.render(converted.as_ref()),
        };
        Ok(Some(text))
    }

    fn line_break(&self, level: usize) -> String {
        let mut out = String::with_capacity(1 + self.indent.len() * level);
        out.push('\n');
        for _ in 0..level {
            out.push_str(&self.indent);
        }
        out
    }

    fn render_table(&mut self, table: &dyn TableSource) -> Result<String> {
        let identity = (
            table as *const dyn TableSource as *const () as usize,
            std::mem::size_of_val(table),
            table.type_name(),
        );
        if self.stack.contains(&identity) {
            return Err(Error::CyclicReference);
        }

        let equals = if self.pretty() { " = " } else { "=" };
        let mut elements: Vec<String> = Vec::new();
        let mut properties: Vec<String> = Vec::new();

        self.stack.push(identity);
        let visited = table.visit_entries(&mut |key, value| {
            if let Some(text) = self.render(value)? {
                if is_element_key(key, elements.len()) {
                    elements.push(text);
                } else {
                    let mut member = String::with_capacity(key.len() + equals.len() + text.len());
                    write_key(&mut member, key);
                    member.push_str(equals);
                    member.push_str(&text);
                    properties.push(member);
                }
            }
            Ok(())
        });
        self.stack.pop();
        visited?;

        let level = self.stack.len();
        let separator = if self.pretty() {
            self.line_break(level)
        } else {
            ",".to_string()
        };
        let mut body = elements.join(&separator);
        if !elements.is_empty() && !properties.is_empty() {
            body.push_str(&separator);
        }
        body.push_str(&properties.join(&separator));

        if level == 0 {
            return Ok(body);
        }
        if body.is_empty() {
            return Ok("[]".to_string());
        }
        if self.pretty() {
            Ok(format!("[{}{}{}]", separator, body, self.line_break(level - 1)))
        } else {
            Ok(format!("[{}]", body))
        }
    }
}

impl Encode for Value {
    fn classify(&self) -> Class<'_> {
        match self {
            Value::Null => Class::Null,
            Value::Bool(b) => Class::Bool(*b),
            Value::Number(n) => Class::Number(*n),
            Value::String(s) => Class::String(Cow::Borrowed(s)),
            Value::Table(table) => Class::Table(table),
        }
    }
}

impl Encode for Table {
    fn classify(&self) -> Class<'_> {
        Class::Table(self)
    }
}

impl TableSource for Table {
    fn visit_entries(
        &self,
        visitor: &mut dyn FnMut(&str, &dyn Encode) -> Result<()>,
    ) -> Result<()> {
        for (key, value) in self.iter() {
            visitor(key, value)?;
        }
        Ok(())
    }
}

impl Encode for bool {
    fn classify(&self) -> Class<'_> {
        Class::Bool(*self)
    }
}

macro_rules! encode_number {
    ($($ty:ty),*) => {
        $(
            impl Encode for $ty {
                fn classify(&self) -> Class<'_> {
                    Class::Number(*self as f64)
                }
            }
        )*
    };
}

encode_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

macro_rules! encode_omitted {
    ($($ty:ty),*) => {
        $(
            impl Encode for $ty {
                fn classify(&self) -> Class<'_> {
                    Class::Omit
                }
            }
        )*
    };
}

encode_omitted!(i128, u128, BigInt, ());

impl Encode for str {
    fn classify(&self) -> Class<'_> {
        Class::String(Cow::Borrowed(self))
    }
}

impl Encode for String {
    fn classify(&self) -> Class<'_> {
        Class::String(Cow::Borrowed(self))
    }
}

impl Encode for Cow<'_, str> {
    fn classify(&self) -> Class<'_> {
        Class::String(Cow::Borrowed(self))
    }
}

impl Encode for char {
    fn classify(&self) -> Class<'_> {
        Class::String(Cow::Owned(self.to_string()))
    }
}

impl<T: Encode> Encode for Option<T> {
    fn classify(&self) -> Class<'_> {
        match self {
            Some(value) => value.classify(),
            None => Class::Omit,
        }
    }
}

macro_rules! encode_pointer {
    ($($ptr:ident),*) => {
        $(
            impl<T: Encode + ?Sized> Encode for $ptr<T> {
                fn classify(&self) -> Class<'_> {
                    (**self).classify()
                }
            }
        )*
    };
}

encode_pointer!(Box, Rc, Arc);

impl<T: Encode + ?Sized> Encode for &T {
    fn classify(&self) -> Class<'_> {
        (**self).classify()
    }
}

fn visit_elements<'v, T: Encode + 'v>(
    elements: impl Iterator<Item = &'v T>,
    visitor: &mut dyn FnMut(&str, &dyn Encode) -> Result<()>,
) -> Result<()> {
    for (index, value) in elements.enumerate() {
        visitor(&index.to_string(), value)?;
    }
    Ok(())
}

impl<T: Encode> Encode for Vec<T> {
    fn classify(&self) -> Class<'_> {
        Class::Table(self)
    }
}

impl<T: Encode> TableSource for Vec<T> {
    fn visit_entries(
        &self,
        visitor: &mut dyn FnMut(&str, &dyn Encode) -> Result<()>,
    ) -> Result<()> {
        visit_elements(self.iter(), visitor)
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn classify(&self) -> Class<'_> {
        Class::Table(self)
    }
}

impl<T: Encode, const N: usize> TableSource for [T; N] {
    fn visit_entries(
        &self,
        visitor: &mut dyn FnMut(&str, &dyn Encode) -> Result<()>,
    ) -> Result<()> {
        visit_elements(self.iter(), visitor)
    }
}

impl<K: AsRef<str>, V: Encode> Encode for IndexMap<K, V> {
    fn classify(&self) -> Class<'_> {
        Class::Table(self)
    }
}

impl<K: AsRef<str>, V: Encode> TableSource for IndexMap<K, V> {
    fn visit_entries(
        &self,
        visitor: &mut dyn FnMut(&str, &dyn Encode) -> Result<()>,
    ) -> Result<()> {
        for (key, value) in self {
            visitor(key.as_ref(), value)?;
        }
        Ok(())
    }
}

impl<K: AsRef<str>, V: Encode> Encode for BTreeMap<K, V> {
    fn classify(&self) -> Class<'_> {
        Class::Table(self)
    }
}

impl<K: AsRef<str>, V: Encode> TableSource for BTreeMap<K, V> {
    fn visit_entries(
        &self,
        visitor: &mut dyn FnMut(&str, &dyn Encode) -> Result<()>,
    ) -> Result<()> {
        for (key, value) in self {
            visitor(key.as_ref(), value)?;
        }
        Ok(())
    }
}

/// Shared, possibly cyclic graphs: `Rc<RefCell<T>>` where `T` is a table.
impl<T: TableSource> Encode for RefCell<T> {
    fn classify(&self) -> Class<'_> {
        Class::Table(self)
    }
}

impl<T: TableSource> TableSource for RefCell<T> {
    fn visit_entries(
        &self,
        visitor: &mut dyn FnMut(&str, &dyn Encode) -> Result<()>,
    ) -> Result<()> {
        let inner = self
            .try_borrow()
            .map_err(|_| Error::custom("table is mutably borrowed"))?;
        inner.visit_entries(visitor)
    }
}

/// Dates are written as their UTC RFC 3339 text with millisecond precision.
impl<Tz: TimeZone> Encode for DateTime<Tz> {
    fn classify(&self) -> Class<'_> {
        let text = self
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true);
        Class::Convert(Box::new(text))
    }
}

/// Serializes any `T: Serialize` into a [`Value`].
///
/// `Ok(None)` means the value has no representation (`None`, `i128`,
/// `u128`) and is left out of its parent. Inside sequences such values
/// become `null` so that element positions are kept.
pub struct ValueSerializer;

pub struct SerializeVec {
    table: Table,
    variant: Option<&'static str>,
}

pub struct SerializeMap {
    table: Table,
    current_key: Option<String>,
    variant: Option<&'static str>,
}

fn to_value_or_omit<T: Serialize + ?Sized>(value: &T) -> Result<Option<Value>> {
    value.serialize(ValueSerializer)
}

fn tagged(variant: Option<&'static str>, value: Value) -> Value {
    match variant {
        Some(variant) => {
            let mut table = Table::with_capacity(1);
            table.insert(variant, value);
            Value::Table(table)
        }
        None => value,
    }
}

impl ser::Serializer for ValueSerializer {
    type Ok = Option<Value>;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Option<Value>> {
        Ok(Some(Value::Bool(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Option<Value>> {
        Ok(Some(Value::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Option<Value>> {
        Ok(Some(Value::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Option<Value>> {
        Ok(Some(Value::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Option<Value>> {
        Ok(Some(Value::from(v)))
    }

    fn serialize_i128(self, _v: i128) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_u8(self, v: u8) -> Result<Option<Value>> {
        Ok(Some(Value::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Option<Value>> {
        Ok(Some(Value::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Option<Value>> {
        Ok(Some(Value::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Option<Value>> {
        Ok(Some(Value::from(v)))
    }

    fn serialize_u128(self, _v: u128) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_f32(self, v: f32) -> Result<Option<Value>> {
        Ok(Some(Value::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Option<Value>> {
        Ok(Some(Value::Number(v)))
    }

    fn serialize_char(self, v: char) -> Result<Option<Value>> {
        Ok(Some(Value::from(v)))
    }

    fn serialize_str(self, v: &str) -> Result<Option<Value>> {
        Ok(Some(Value::from(v)))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Option<Value>> {
        Ok(Some(Value::Table(v.iter().map(|&b| Value::from(b)).collect())))
    }

    fn serialize_none(self) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Option<Value>> {
        Ok(Some(Value::Null))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Option<Value>> {
        Ok(Some(Value::Null))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Option<Value>> {
        Ok(Some(Value::from(variant)))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Option<Value>>
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
    ) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        let inner = to_value_or_omit(value)?.unwrap_or_default();
        Ok(Some(tagged(Some(variant), inner)))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0), None))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, Some(variant)))
    }
}

impl SerializeVec {
    fn new(len: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            table: Table::with_capacity(len),
            variant,
        }
    }

    fn push<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let value = to_value_or_omit(value)?.unwrap_or_default();
        self.table.push(value);
        Ok(())
    }

    fn finish(self) -> Result<Option<Value>> {
        Ok(Some(tagged(self.variant, Value::Table(self.table))))
    }
}

impl SerializeMap {
    fn new(len: usize, variant: Option<&'static str>) -> Self {
        SerializeMap {
            table: Table::with_capacity(len),
            current_key: None,
            variant,
        }
    }

    fn field<T: Serialize + ?Sized>(&mut self, key: String, value: &T) -> Result<()> {
        if let Some(value) = to_value_or_omit(value)? {
            self.table.insert(key, value);
        }
        Ok(())
    }

    fn finish(self) -> Result<Option<Value>> {
        Ok(Some(tagged(self.variant, Value::Table(self.table))))
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = match to_value_or_omit(key)? {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => format_number(n),
            Some(Value::Bool(b)) => b.to_string(),
            _ => return Err(Error::custom("map keys must be strings, numbers or booleans")),
        };
        self.current_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.field(key, value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key.to_string(), value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key.to_string(), value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}
