//! # serde_ckt
//!
//! A codec for CKT, the Cricket Table notation, with a Serde bridge.
//!
//! ## What is CKT?
//!
//! CKT is a small configuration and data notation built around a single
//! container, the *table*. A table holds positional elements and named
//! properties side by side, so one syntax covers both lists and records:
//!
//! ```text
//! # a document is the body of the root table
//! title = "Release notes"
//! tags = [stable, lts]
//! size = [w = 640, h = 480]
//! ```
//!
//! Bare words are *literals*: `null`, `true`, `false` and numeric text are
//! read as those primitives, anything else stays a string. Quoted strings are
//! never reinterpreted. Lines starting with `|` form verbatim multiline text.
//!
//! ## Key Features
//!
//! - **One container**: [`Table`] keeps elements and properties in a single
//!   ordered map, with the element prefix tracked as entries are added
//! - **Positional or named**: the encoder writes a member bare when its key
//!   is the next list index, and as `key = value` otherwise
//! - **Cycle safe**: shared graphs built from `Rc<RefCell<_>>` encode fine;
//!   true cycles fail with [`Error::CyclicReference`]
//! - **Serde compatible**: `#[derive(Serialize, Deserialize)]` types go
//!   through [`to_string`] and [`from_str`]
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! serde_ckt = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Decoding and Encoding
//!
//! ```rust
//! use serde_ckt::{decode, encode, Indent, Value};
//!
//! let table = decode("a, b, name = x").unwrap();
//! assert_eq!(table.element_count(), 2);
//! assert_eq!(table.get("name"), Some(&Value::from("x")));
//!
//! assert_eq!(encode(&table, Indent::None).unwrap(), "a,b,name=x");
//! assert_eq!(encode(&table, 2usize).unwrap(), "a\nb\nname = x");
//! ```
//!
//! ### Typed Data
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_ckt::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     roles: Vec<String>,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     roles: vec!["admin".to_string(), "ops".to_string()],
//! };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "id=123,name=Alice,roles=[admin,ops]");
//!
//! let back: User = from_str(&text).unwrap();
//! assert_eq!(user, back);
//! ```
//!
//! ### Dynamic Values with the ckt! Macro
//!
//! ```rust
//! use serde_ckt::{ckt, Value};
//!
//! let data = ckt!({
//!     "name": "Alice",
//!     "tags": ["rust", "serde"]
//! });
//!
//! if let Value::Table(table) = &data {
//!     assert_eq!(table.get("name").and_then(Value::as_str), Some("Alice"));
//! }
//! assert_eq!(data.to_string(), "[name=Alice,tags=[rust,serde]]");
//! ```
//!
//! ## Notation Reference
//!
//! The full grammar lives in the [`grammar`] module.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - typed round trip through `to_string` / `from_str`
//! - **`dynamic_values.rs`** - decoding into tables and inspecting them
//! - **`shared_graph.rs`** - custom `Encode` types and cycle detection
//!
//! Run any of them with: `cargo run --example <name>`

pub mod de;
pub mod error;
pub mod grammar;
mod lexer;
mod literal;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use de::Deserializer;
pub use error::{Category, Error, Result};
pub use map::Table;
pub use options::{DecodeOptions, EncodeOptions, Indent};
pub use ser::{encode, Class, Encode, TableSource, ValueSerializer};
pub use value::Value;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Parses CKT text into its root table.
///
/// # Examples
///
/// ```rust
/// use serde_ckt::{decode, Value};
///
/// let table = decode("key = [ nested, 42 ]").unwrap();
/// let nested = table.get("key").and_then(Value::as_table).unwrap();
/// assert_eq!(nested.element(1), Some(&Value::Number(42.0)));
/// ```
///
/// # Errors
///
/// Returns a syntax error of the form `ckt <line>:<col> <reason>` when the
/// text is not valid CKT.
pub fn decode(text: &str) -> Result<Table> {
    decode_with_options(text, &DecodeOptions::default())
}

/// Parses CKT text with explicit [`DecodeOptions`].
///
/// # Errors
///
/// As [`decode`], plus `nesting too deep` when tables nest beyond
/// `options.max_depth`.
pub fn decode_with_options(text: &str, options: &DecodeOptions) -> Result<Table> {
    de::Decoder::new(text, options)?.decode()
}

/// Serialize any `T: Serialize` to a compact CKT string.
///
/// # Examples
///
/// ```rust
/// use serde_ckt::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "x=1,y=2");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized, for example a map
/// whose keys are tables.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, EncodeOptions::default())
}

/// Serialize any `T: Serialize` to a pretty-printed CKT string.
///
/// # Examples
///
/// ```rust
/// use serde_ckt::to_string_pretty;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Line { from: (i32, i32), to: (i32, i32) }
///
/// let text = to_string_pretty(&Line { from: (0, 0), to: (3, 4) }).unwrap();
/// assert_eq!(text, "from = [\n  0\n  0\n]\nto = [\n  3\n  4\n]");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, EncodeOptions::pretty())
}

/// Serialize any `T: Serialize` to a CKT string with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_ckt::{to_string_with_options, EncodeOptions};
///
/// let options = EncodeOptions::new().with_indent("\t");
/// let text = to_string_with_options(&vec![vec![1, 2]], options).unwrap();
/// assert_eq!(text, "[\n\t1\n\t2\n]");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: EncodeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    match value.serialize(ValueSerializer)? {
        Some(value) => encode(&value, options.indent),
        None => Ok(String::new()),
    }
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// Values with no CKT representation, such as `None`, become
/// [`Value::Null`] at the top level.
///
/// # Examples
///
/// ```rust
/// use serde_ckt::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_table());
/// assert_eq!(to_value(&None::<i32>).unwrap(), Value::Null);
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    Ok(value.serialize(ValueSerializer)?.unwrap_or_default())
}

/// Serialize any `T: Serialize` to a writer in compact CKT.
///
/// # Examples
///
/// ```rust
/// use serde_ckt::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &vec!["a", "b"]).unwrap();
/// assert_eq!(buffer, b"a,b");
/// ```
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
    to_writer_with_options(writer, value, EncodeOptions::default())
}

/// Serialize any `T: Serialize` to a writer in CKT with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: EncodeOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

/// Deserialize an instance of type `T` from CKT text.
///
/// A document with a single element can be read as that element:
///
/// ```rust
/// use serde_ckt::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
///
/// let port: u16 = from_str("8080").unwrap();
/// assert_eq!(port, 8080);
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid CKT or does not match `T`.
/// Syntax errors include the line and column.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(s, &DecodeOptions::default())
}

/// Deserialize an instance of type `T` from CKT text with custom options.
///
/// # Errors
///
/// As [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: &DecodeOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    let mut deserializer = Deserializer::from_str_with_options(s, options)?;
    T::deserialize(&mut deserializer)
}

/// Deserialize an instance of type `T` from an I/O stream of CKT.
///
/// # Examples
///
/// ```rust
/// use serde_ckt::from_reader;
/// use std::io::Cursor;
///
/// let cursor = Cursor::new(b"red, green, blue");
/// let colors: Vec<String> = from_reader(cursor).unwrap();
/// assert_eq!(colors, vec!["red", "green", "blue"]);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid CKT, or the
/// data does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader.read_to_string(&mut string)?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of CKT text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid CKT, or do
/// not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserialize an instance of type `T` from a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_ckt::{ckt, from_value};
/// use std::collections::HashMap;
///
/// let sizes: HashMap<String, u32> = from_value(ckt!({"w": 640, "h": 480})).unwrap();
/// assert_eq!(sizes["h"], 480);
/// ```
///
/// # Errors
///
/// Returns an error if the value does not match `T`.
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(de::ValueDeserializer::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    fn alice() -> User {
        User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        }
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let text = to_string(&point).unwrap();
        assert_eq!(text, "x=1,y=2");
        let point_back: Point = from_str(&text).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let text = to_string(&alice()).unwrap();
        assert_eq!(text, "id=123,name=Alice,active=true,tags=[admin,user]");
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(alice(), user_back);
    }

    #[test]
    fn test_pretty_printing() {
        let text = to_string_pretty(&alice()).unwrap();
        assert_eq!(
            text,
            "id = 123\nname = Alice\nactive = true\ntags = [\n  admin\n  user\n]"
        );
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(alice(), user_back);
    }

    #[test]
    fn test_to_value() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        let table = value.as_table().unwrap();
        assert_eq!(table.get("x"), Some(&Value::Number(1.0)));
        assert_eq!(table.get("y"), Some(&Value::Number(2.0)));
        let point: Point = from_value(value).unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });
    }

    #[test]
    fn test_arrays() {
        let numbers = vec![1, 2, 3, 4, 5];
        let text = to_string(&numbers).unwrap();
        assert_eq!(text, "1,2,3,4,5");
        let numbers_back: Vec<i32> = from_str(&text).unwrap();
        assert_eq!(numbers, numbers_back);
    }

    #[test]
    fn test_custom_options() {
        let options = EncodeOptions::new().with_indent("    ");
        let text = to_string_with_options(&alice(), options).unwrap();
        assert!(text.contains("tags = [\n    admin\n    user\n]"));
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(alice(), user_back);
    }

    #[test]
    fn test_writer_and_reader() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &alice()).unwrap();
        let user_back: User = from_reader(buffer.as_slice()).unwrap();
        assert_eq!(alice(), user_back);
        let from_bytes: User = from_slice(&buffer).unwrap();
        assert_eq!(alice(), from_bytes);
    }

    #[test]
    fn test_invalid_utf8_is_reported() {
        let err = from_slice::<Point>(&[0xff, 0xfe]).unwrap_err();
        assert_eq!(err.category(), Category::Data);
    }

    #[test]
    fn test_decode_error_position() {
        let err = decode("a = 1\nb = ]").unwrap_err();
        assert_eq!(err.to_string(), "ckt 2:5 expected value");
        assert_eq!(err.category(), Category::Syntax);
    }
}
