//! CKT decoding.
//!
//! Decoding happens in two stages. [`Decoder`] is a recursive-descent parser
//! over the [`Lexer`](crate::lexer) token stream that builds a [`Table`] tree,
//! merging positional and keyed members as it goes. The serde layer then walks
//! that tree: [`Deserializer`] wraps a decoded document and hands it to any
//! `T: Deserialize`.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_ckt::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, y: i32 }
//!
//! let data: Data = from_str("x = 1\ny = 2").unwrap();
//! assert_eq!(data, Data { x: 1, y: 2 });
//!
//! let nums: Vec<i32> = from_str("1, 2, 3").unwrap();
//! assert_eq!(nums, vec![1, 2, 3]);
//! ```
//!
//! ## Merge rules
//!
//! Inside one table, positional members take indices `0, 1, 2, ...` in the
//! order they appear. A keyed member whose key is a canonical decimal index
//! writes that slot directly and, when it lands at or past the next free
//! index, moves the counter to just after it. All indexed entries come out
//! first in ascending order, followed by named properties in the order they
//! were first assigned.
//!
//! ```rust
//! use serde_ckt::decode;
//!
//! let table = decode("a, 3 = d, b, name = x, c").unwrap();
//! let keys: Vec<_> = table.keys().collect();
//! assert_eq!(keys, vec!["0", "3", "4", "5", "name"]);
//! ```

use std::collections::BTreeMap;
use std::mem;

use indexmap::IndexMap;
use serde::de::{self, IntoDeserializer, Unexpected};
use serde::forward_to_deserialize_any;

use crate::lexer::{Lexer, Spanned, Token};
use crate::literal::{canonical_index, format_number, interpret, is_number, RESERVED_KEY};
use crate::options::DecodeOptions;
use crate::value::integral;
use crate::{Error, Result, Table, Value};

/// A member value before it is placed in its table.
enum Parsed {
    /// Unquoted text, subject to literal interpretation.
    Literal(String),
    /// Quoted or multiline text, always a string.
    Quoted(String),
    Table(Table),
}

impl Parsed {
    fn into_value(self) -> Value {
        match self {
            Parsed::Literal(text) => interpret(text),
            Parsed::Quoted(text) => Value::String(text),
            Parsed::Table(table) => Value::Table(table),
        }
    }
}

/// Collects the members of one table body.
#[derive(Default)]
struct TableBuilder {
    indexed: BTreeMap<u64, Value>,
    next_index: u64,
    properties: IndexMap<String, Value>,
}

impl TableBuilder {
    fn push(&mut self, value: Value) {
        self.indexed.insert(self.next_index, value);
        self.next_index = self.next_index.saturating_add(1);
    }

    fn assign(&mut self, key: String, value: Value) {
        if key == RESERVED_KEY {
            return;
        }
        match canonical_index(&key) {
            Some(index) => {
                if index >= self.next_index {
                    self.next_index = index + 1;
                }
                self.indexed.insert(index, value);
            }
            None => {
                self.properties.insert(key, value);
            }
        }
    }

    fn finish(self) -> Table {
        let mut table = Table::with_capacity(self.indexed.len() + self.properties.len());
        for (index, value) in self.indexed {
            table.insert(index.to_string(), value);
        }
        for (key, value) in self.properties {
            table.insert(key, value);
        }
        table
    }
}

/// Recursive-descent parser producing a [`Table`] from CKT text.
pub(crate) struct Decoder<'a> {
    lexer: Lexer<'a>,
    current: Spanned,
    depth: usize,
    max_depth: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a str, options: &DecodeOptions) -> Result<Self> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Decoder {
            lexer,
            current,
            depth: 0,
            max_depth: options.max_depth,
        })
    }

    /// Parses the whole input as the root table.
    pub fn decode(mut self) -> Result<Table> {
        self.parse_body(true)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn error(&self, msg: &str) -> Error {
        Error::parse(self.current.line, self.current.column, msg)
    }

    fn skip_newlines(&mut self) -> Result<()> {
        while self.current.token == Token::Newline {
            self.advance()?;
        }
        Ok(())
    }

    fn skip_separators(&mut self) -> Result<()> {
        while matches!(self.current.token, Token::Newline | Token::Separator) {
            self.advance()?;
        }
        Ok(())
    }

    fn parse_value(&mut self) -> Result<Option<Parsed>> {
        let parsed = match mem::take(&mut self.current.token) {
            Token::Literal(text) => Parsed::Literal(text),
            Token::String(text) | Token::Multiline(text) => Parsed::Quoted(text),
            Token::LBracket => {
                if self.depth >= self.max_depth {
                    return Err(self.error("nesting too deep"));
                }
                self.depth += 1;
                self.advance()?;
                let table = self.parse_body(false)?;
                self.depth -= 1;
                return Ok(Some(Parsed::Table(table)));
            }
            other => {
                self.current.token = other;
                return Ok(None);
            }
        };
        self.advance()?;
        Ok(Some(parsed))
    }

    fn parse_body(&mut self, root: bool) -> Result<Table> {
        let mut builder = TableBuilder::default();
        self.skip_separators()?;
        loop {
            let left = match self.parse_value()? {
                Some(left) => left,
                None => match self.current.token {
                    Token::Eof if root => break,
                    Token::RBracket if !root => {
                        self.advance()?;
                        break;
                    }
                    _ => return Err(self.error("expected value")),
                },
            };

            self.skip_newlines()?;
            if self.current.token == Token::Equals {
                let key = match left {
                    Parsed::Literal(text) | Parsed::Quoted(text) => text,
                    Parsed::Table(_) => return Err(self.error("unexpected =")),
                };
                self.advance()?;
                self.skip_newlines()?;
                let right = match self.parse_value()? {
                    Some(right) => right,
                    None => return Err(self.error("expected value")),
                };
                builder.assign(key, right.into_value());
            } else {
                builder.push(left.into_value());
            }
            self.skip_separators()?;
        }
        Ok(builder.finish())
    }
}

/// Deserializer over a decoded CKT document.
///
/// The root of every document is a table. Types that expect a single scalar
/// (a number, a string, a unit enum variant, ...) are served from a root table
/// holding exactly one element, so that `to_string(&42)` reads back as `42`.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_ckt::Deserializer;
///
/// let mut deserializer = Deserializer::from_str("hello").unwrap();
/// let text = String::deserialize(&mut deserializer).unwrap();
/// assert_eq!(text, "hello");
/// ```
pub struct Deserializer {
    root: Option<Table>,
}

impl Deserializer {
    /// Decodes `input` with default options.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Result<Self> {
        Self::from_str_with_options(input, &DecodeOptions::default())
    }

    pub fn from_str_with_options(input: &str, options: &DecodeOptions) -> Result<Self> {
        let root = Decoder::new(input, options)?.decode()?;
        Ok(Deserializer::from_table(root))
    }

    /// Wraps an already decoded document.
    #[must_use]
    pub fn from_table(root: Table) -> Self {
        Deserializer { root: Some(root) }
    }

    fn take_root(&mut self) -> Result<Table> {
        self.root
            .take()
            .ok_or_else(|| Error::custom("document already consumed"))
    }

    /// The whole document, or its only element when it has exactly one.
    fn take_scalar(&mut self) -> Result<Value> {
        let root = self.take_root()?;
        if root.len() == 1 && root.element_count() == 1 {
            Ok(root.into_values().next().unwrap_or_default())
        } else {
            Ok(Value::Table(root))
        }
    }

    fn take_table(&mut self) -> Result<ValueDeserializer> {
        Ok(ValueDeserializer::new(Value::Table(self.take_root()?)))
    }
}

macro_rules! forward_scalar {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                de::Deserializer::$method(ValueDeserializer::new(self.take_scalar()?), visitor)
            }
        )*
    };
}

macro_rules! forward_table {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                de::Deserializer::$method(self.take_table()?, visitor)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for &mut Deserializer {
    type Error = Error;

    forward_scalar! {
        deserialize_bool deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64
        deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64
        deserialize_f32 deserialize_f64 deserialize_char deserialize_str deserialize_string
        deserialize_bytes deserialize_byte_buf deserialize_unit deserialize_identifier
    }

    forward_table! {
        deserialize_any deserialize_seq deserialize_map deserialize_ignored_any
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match &self.root {
            Some(root) if root.is_empty() => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_unit(self, visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_seq(self, visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_seq(self, visitor)
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_map(self, visitor)
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(self.take_scalar()?).deserialize_enum(name, variants, visitor)
    }
}

/// Deserializes a `T` from a detached [`Value`].
pub(crate) struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    pub(crate) fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }

    fn unexpected(&self) -> Unexpected<'_> {
        match &self.value {
            Value::Null => Unexpected::Unit,
            Value::Bool(b) => Unexpected::Bool(*b),
            Value::Number(n) => Unexpected::Float(*n),
            Value::String(s) => Unexpected::Str(s),
            Value::Table(table) if table.is_list() => Unexpected::Seq,
            Value::Table(_) => Unexpected::Map,
        }
    }

    fn invalid_type<'de, V: de::Visitor<'de>>(&self, visitor: &V) -> Error {
        de::Error::invalid_type(self.unexpected(), visitor)
    }

    fn visit_number<'de, V>(n: f64, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match integral(n) {
            Some(i) => visitor.visit_i64(i),
            None => visitor.visit_f64(n),
        }
    }

    /// Numbers, plus quoted text that reads as a number.
    fn deserialize_number<'de, V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match &self.value {
            Value::Number(n) => Self::visit_number(*n, visitor),
            Value::String(s) if is_number(s) => match s.parse::<f64>() {
                Ok(n) => Self::visit_number(n, visitor),
                Err(_) => Err(self.invalid_type(&visitor)),
            },
            _ => Err(self.invalid_type(&visitor)),
        }
    }

    /// Strings, plus primitives rendered the way they are written.
    fn deserialize_text<'de, V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_string(s),
            Value::Number(n) => visitor.visit_string(format_number(n)),
            Value::Bool(b) => visitor.visit_string(b.to_string()),
            _ => Err(self.invalid_type(&visitor)),
        }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(n) => Self::visit_number(n, visitor),
            Value::String(s) => visitor.visit_string(s),
            Value::Table(table) if table.is_list() => {
                visitor.visit_seq(SeqDeserializer::new(table))
            }
            Value::Table(table) => visitor.visit_map(MapDeserializer::new(table)),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Bool(b) => visitor.visit_bool(b),
            _ => Err(self.invalid_type(&visitor)),
        }
    }

    fn deserialize_i8<V: de::Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_number(visitor)
    }

    fn deserialize_i16<V: de::Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_number(visitor)
    }

    fn deserialize_i32<V: de::Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_number(visitor)
    }

    fn deserialize_i64<V: de::Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_number(visitor)
    }

    fn deserialize_u8<V: de::Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_number(visitor)
    }

    fn deserialize_u16<V: de::Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_number(visitor)
    }

    fn deserialize_u32<V: de::Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_number(visitor)
    }

    fn deserialize_u64<V: de::Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_number(visitor)
    }

    fn deserialize_f32<V: de::Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_number(visitor)
    }

    fn deserialize_f64<V: de::Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_number(visitor)
    }

    fn deserialize_char<V: de::Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_text(visitor)
    }

    fn deserialize_str<V: de::Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_text(visitor)
    }

    fn deserialize_string<V: de::Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_text(visitor)
    }

    fn deserialize_identifier<V: de::Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_text(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            _ => Err(self.invalid_type(&visitor)),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Table(table) if table.is_list() => {
                visitor.visit_seq(SeqDeserializer::new(table))
            }
            _ => Err(self.invalid_type(&visitor)),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Table(table) => visitor.visit_map(MapDeserializer::new(table)),
            _ => Err(self.invalid_type(&visitor)),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Table(table) if table.len() == 1 => {
                let mut entries = table.into_iter();
                match entries.next() {
                    Some((variant, value)) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, value))
                    }
                    None => Err(Error::custom("expected enum variant")),
                }
            }
            _ => Err(self.invalid_type(&visitor)),
        }
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        i128 u128 bytes byte_buf
    }
}

struct SeqDeserializer {
    iter: indexmap::map::IntoValues<String, Value>,
}

impl SeqDeserializer {
    fn new(table: Table) -> Self {
        SeqDeserializer {
            iter: table.into_values(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(table: Table) -> Self {
        MapDeserializer {
            iter: table.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(KeyDeserializer { key }).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

/// Table keys are always strings; numeric map keys are parsed on request.
struct KeyDeserializer {
    key: String,
}

macro_rules! deserialize_parsed_key {
    ($($method:ident => $visit:ident,)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                match self.key.parse() {
                    Ok(parsed) => visitor.$visit(parsed),
                    Err(_) => Err(de::Error::invalid_type(Unexpected::Str(&self.key), &visitor)),
                }
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for KeyDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.key)
    }

    deserialize_parsed_key! {
        deserialize_bool => visit_bool,
        deserialize_i8 => visit_i8,
        deserialize_i16 => visit_i16,
        deserialize_i32 => visit_i32,
        deserialize_i64 => visit_i64,
        deserialize_u8 => visit_u8,
        deserialize_u16 => visit_u16,
        deserialize_u32 => visit_u32,
        deserialize_u64 => visit_u64,
        deserialize_f32 => visit_f32,
        deserialize_f64 => visit_f64,
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_enum(self.key.into_deserializer())
    }

    forward_to_deserialize_any! {
        i128 u128 char str string bytes byte_buf option unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Value>,
}

impl EnumDeserializer {
    fn new(variant: String, value: Value) -> Self {
        EnumDeserializer {
            variant,
            value: Some(value),
        }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(KeyDeserializer { key: self.variant })?;
        let visitor = VariantDeserializer { value: self.value };
        Ok((variant, visitor))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(Value::Null) | None => Ok(()),
            _ => Err(Error::custom("expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("expected newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Table(table)) if table.is_list() => {
                visitor.visit_seq(SeqDeserializer::new(table))
            }
            _ => Err(Error::custom("expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Table(table)) => visitor.visit_map(MapDeserializer::new(table)),
            _ => Err(Error::custom("expected struct variant")),
        }
    }
}
