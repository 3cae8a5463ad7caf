//! CKT Notation Reference
//!
//! This module documents the Cricket Table notation as read by
//! [`decode`](crate::decode) and written by [`encode`](crate::encode).
//!
//! # Overview
//!
//! A CKT document is the body of one table, the *root*. Tables hold members
//! separated by commas, semicolons or newlines. A member is either a bare
//! value, which becomes the next positional *element*, or `key = value`,
//! which sets a *property*:
//!
//! ```text
//! # elements
//! red, green, blue
//!
//! # properties
//! depth = 8
//! size = [w = 640, h = 480]
//! ```
//!
//! # Tokens
//!
//! | Token | Form |
//! |-------|------|
//! | separator | one or more of `,` `;` |
//! | newline | `\n`; accepted wherever a separator is |
//! | operators | `=` `[` `]` |
//! | literal | unquoted run, trailing whitespace trimmed |
//! | string | `"..."` on a single line |
//! | multiline | consecutive lines starting with `\|` |
//!
//! `#` starts a comment that runs to the end of the line. Space, tab, CR,
//! vertical tab and form feed between tokens are ignored.
//!
//! ## Literals
//!
//! A literal runs until one of `\n , ; " | = [ ] #` or a backslash. A
//! backslash followed by anything but a newline is kept in the run and
//! decoded as an escape, so `a\,b` is the single literal `a,b`.
//!
//! Unquoted literals are interpreted:
//!
//! - `null`, `true`, `false` (case-sensitive) become those primitives
//! - text matching `[+-]?digits(.digits)?([eE][+-]?digits)?` becomes a number
//! - everything else stays a string, so `1.`, `.5` and `0x10` are strings
//!
//! ## Strings
//!
//! Quoted strings are never interpreted: `"true"` is the string `true`. They
//! must close on the line they open; `\"` does not close them.
//!
//! ## Escapes
//!
//! Literals and strings share one escape table:
//!
//! | Escape | Character |
//! |--------|-----------|
//! | `\n` `\r` `\t` | newline, carriage return, tab |
//! | `\v` `\f` `\b` | vertical tab, form feed, backspace |
//! | `\0` | NUL |
//! | `\xHH` | code point `HH` |
//! | `\uHHHH` | UTF-16 unit `HHHH`; surrogate pairs combine |
//! | `\` + other | that character |
//!
//! A `\x` or `\u` with too few hex digits is an `incomplete hex escape`
//! error. An unpaired surrogate decodes to U+FFFD.
//!
//! ## Multiline Text
//!
//! ```text
//! poem =
//!   | first line
//!   |   second line, indented
//! ```
//!
//! Everything up to and including each `|` is removed and the lines are
//! joined with `\n`. The content is verbatim: no escapes, no comments, no
//! interpretation. The value above is `" first line\n   second line, indented"`.
//!
//! # Grammar
//!
//! ```text
//! document   := table-body EOF
//! table      := '[' table-body ']'
//! table-body := separators? (member separators?)*
//! member     := value ('=' value)?
//! value      := LITERAL | STRING | MULTILINE | table
//! ```
//!
//! Newlines may appear on either side of `=`. A table cannot be a key.
//!
//! # Merging Elements and Properties
//!
//! Elements take indices `0, 1, 2, ...` in order. A key written in canonical
//! decimal form (no sign, no leading zeros) addresses an index directly; if
//! it lands at or beyond the next free index, numbering continues after it:
//!
//! ```text
//! a, 3 = d, b      # 0 = a, 3 = d, 4 = b
//! a, 0 = z, b      # 0 = z, 1 = b
//! 07 = x           # property "07"
//! ```
//!
//! The decoded table lists indexed entries in ascending order, then
//! properties in first-assignment order. Assigning a key twice keeps the
//! first position and the last value. The key `__proto__` is ignored.
//!
//! # Encoding
//!
//! The encoder walks a table in order. A member whose key equals the number
//! of elements written so far is written bare; every other member is written
//! as `key = value` after all elements. Gaps therefore turn later indices
//! into properties:
//!
//! ```rust
//! use serde_ckt::{decode, encode, Indent};
//!
//! let table = decode("a, 3 = d, b").unwrap();
//! assert_eq!(encode(&table, Indent::None).unwrap(), "a,3=d,4=b");
//! ```
//!
//! Strings are written bare when they are *safe*: word characters at both
//! ends, only word characters and spaces between, and not a keyword or a
//! number. Everything else is quoted with lowercase hex escapes.
//!
//! Numbers use the shortest text that reads back exactly; magnitudes outside
//! `[1e-6, 1e21)` use exponent form (`1e+21`), and non-finite numbers are
//! written as `null`.
//!
//! ## Layout
//!
//! Compact output joins members with `,` and binds keys with `=`. Pretty
//! output puts each member on its own line, indents nested bodies one unit
//! per level and writes `key = value`:
//!
//! ```text
//! name = demo
//! tags = [
//!   a
//!   b
//! ]
//! empty = []
//! ```
//!
//! The root is never bracketed.
//!
//! # Errors
//!
//! All errors are fatal. Decode errors read `ckt <line>:<col> <reason>`, with
//! 1-based positions of the token that failed:
//!
//! | Reason | Cause |
//! |--------|-------|
//! | `unexpected character` | no token starts here, or an unclosed string |
//! | `incomplete hex escape` | `\x` / `\u` without enough hex digits |
//! | `expected value` | a member is missing, e.g. `a = ]` |
//! | `unexpected =` | a table on the left of `=` |
//! | `nesting too deep` | more nested `[` than [`DecodeOptions::max_depth`](crate::DecodeOptions) |
//!
//! Encoding a table that contains itself fails with `ckt: cyclic reference`.
