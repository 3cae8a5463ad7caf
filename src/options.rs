//! Configuration options for CKT encoding and decoding.
//!
//! - [`EncodeOptions`]: output layout, controlled by an [`Indent`]
//! - [`DecodeOptions`]: limits applied while parsing
//!
//! An empty indent selects compact output: members are joined by `,` and
//! keys are bound with `=`. Any non-empty indent selects pretty output with
//! one member per line.
//!
//! ## Examples
//!
//! ```rust
//! use serde_ckt::{encode, ckt, EncodeOptions, Indent};
//!
//! let value = ckt!({"name": "demo", "tags": ["a", "b"]});
//!
//! let compact = encode(&value, Indent::None).unwrap();
//! assert_eq!(compact, "name=demo,tags=[a,b]");
//!
//! let pretty = encode(&value, EncodeOptions::pretty().indent).unwrap();
//! assert_eq!(pretty, "name = demo\ntags = [\n  a\n  b\n]");
//! ```

use std::borrow::Cow;

/// Indentation unit for pretty output.
///
/// # Examples
///
/// ```rust
/// use serde_ckt::Indent;
///
/// assert_eq!(Indent::from(4usize).unit(), "    ");
/// assert_eq!(Indent::from("\t").unit(), "\t");
/// assert!(Indent::from(0usize).is_compact());
/// assert!(Indent::from(None::<usize>).is_compact());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Indent {
    /// Compact output.
    #[default]
    None,
    /// This many spaces per nesting level.
    Spaces(usize),
    /// The given text, repeated once per nesting level.
    Text(String),
}

impl Indent {
    /// The text inserted once per nesting level; empty in compact mode.
    #[must_use]
    pub fn unit(&self) -> Cow<'_, str> {
        match self {
            Indent::None => Cow::Borrowed(""),
            Indent::Spaces(count) => Cow::Owned(" ".repeat(*count)),
            Indent::Text(text) => Cow::Borrowed(text.as_str()),
        }
    }

    #[must_use]
    pub fn is_compact(&self) -> bool {
        self.unit().is_empty()
    }
}

impl From<usize> for Indent {
    fn from(count: usize) -> Self {
        Indent::Spaces(count)
    }
}

impl From<&str> for Indent {
    fn from(text: &str) -> Self {
        Indent::Text(text.to_string())
    }
}

impl From<String> for Indent {
    fn from(text: String) -> Self {
        Indent::Text(text)
    }
}

impl<T: Into<Indent>> From<Option<T>> for Indent {
    fn from(indent: Option<T>) -> Self {
        indent.map_or(Indent::None, Into::into)
    }
}

/// Configuration options for encoding.
///
/// # Examples
///
/// ```rust
/// use serde_ckt::{EncodeOptions, Indent};
///
/// // Default compact options
/// let options = EncodeOptions::new();
/// assert!(options.indent.is_compact());
///
/// // Pretty-printed with 2-space indentation
/// let options = EncodeOptions::pretty();
/// assert_eq!(options.indent, Indent::Spaces(2));
///
/// // Tabs
/// let options = EncodeOptions::new().with_indent("\t");
/// assert_eq!(options.indent.unit(), "\t");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    pub indent: Indent,
}

impl EncodeOptions {
    /// Creates default options (compact format).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for pretty-printed output with two-space indentation.
    #[must_use]
    pub fn pretty() -> Self {
        EncodeOptions {
            indent: Indent::Spaces(2),
        }
    }

    /// Sets the indentation; an empty indent means compact output.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<Indent>) -> Self {
        self.indent = indent.into();
        self
    }
}

/// Configuration options for decoding.
///
/// # Examples
///
/// ```rust
/// use serde_ckt::{decode_with_options, DecodeOptions};
///
/// let options = DecodeOptions::new().with_max_depth(1);
/// assert!(decode_with_options("a = [b]", &options).is_ok());
/// assert!(decode_with_options("a = [[b]]", &options).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Deepest `[` nesting accepted below the root.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions { max_depth: 128 }
    }
}

impl DecodeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_units() {
        assert_eq!(Indent::None.unit(), "");
        assert_eq!(Indent::Spaces(3).unit(), "   ");
        assert_eq!(Indent::Text("--".into()).unit(), "--");
        assert!(Indent::Text(String::new()).is_compact());
        assert!(!Indent::Spaces(1).is_compact());
    }

    #[test]
    fn test_indent_conversions() {
        assert_eq!(Indent::from(Some(2usize)), Indent::Spaces(2));
        assert_eq!(Indent::from(Some("\t")), Indent::Text("\t".into()));
        assert_eq!(Indent::from(None::<&str>), Indent::None);
    }

    #[test]
    fn test_option_builders() {
        assert_eq!(EncodeOptions::new().with_indent(4usize).indent, Indent::Spaces(4));
        assert_eq!(DecodeOptions::default().max_depth, 128);
        assert_eq!(DecodeOptions::new().with_max_depth(3).max_depth, 3);
    }
}
