//! Lexical rules shared by the decoder and the encoder.
//!
//! Both directions have to agree on three things: which characters may appear
//! in an unquoted literal, how escape sequences map to characters, and which
//! bare words are read back as `null`, booleans or numbers. Keeping those rules
//! in one place is what makes `decode(encode(v)) == v` hold.

use crate::Value;

/// The one key a [`Table`](crate::Table) never stores.
pub(crate) const RESERVED_KEY: &str = "__proto__";

/// Whitespace skipped between tokens (newline is a token of its own).
#[inline]
pub(crate) fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\u{0B}' | '\u{0C}')
}

/// Characters allowed inside an unquoted literal, escapes aside.
#[inline]
pub(crate) fn is_literal_char(ch: char) -> bool {
    !matches!(
        ch,
        '\n' | ',' | ';' | '"' | '|' | '=' | '[' | ']' | '#' | '\\'
    )
}

fn named_escape(ch: char) -> Option<char> {
    match ch {
        '0' => Some('\0'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\u{0B}'),
        'f' => Some('\u{0C}'),
        'b' => Some('\u{08}'),
        _ => None,
    }
}

fn read_hex(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<u32> {
    let mut value = 0;
    for _ in 0..digits {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    Some(value)
}

/// Decodes the escape sequences of a literal or quoted string.
///
/// Returns `None` when a `\x` or `\u` escape is missing hex digits. A high
/// surrogate written as `\uD8xx` pairs with an immediately following low
/// surrogate escape; unpaired surrogates become U+FFFD.
pub(crate) fn unescape(raw: &str) -> Option<String> {
    if !raw.contains('\\') {
        return Some(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('x') => {
                let unit = read_hex(&mut chars, 2)?;
                out.push(char::from_u32(unit)?);
            }
            Some('u') => {
                let unit = read_hex(&mut chars, 4)?;
                if (0xD800..0xDC00).contains(&unit) {
                    let mut ahead = chars.clone();
                    if ahead.next() == Some('\\') && ahead.next() == Some('u') {
                        if let Some(low) = read_hex(&mut ahead, 4) {
                            if (0xDC00..0xE000).contains(&low) {
                                chars = ahead;
                                let scalar = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                                out.push(
                                    char::from_u32(scalar).unwrap_or(char::REPLACEMENT_CHARACTER),
                                );
                                continue;
                            }
                        }
                    }
                }
                out.push(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            Some(other) => out.push(named_escape(other).unwrap_or(other)),
            None => out.push('\\'),
        }
    }
    Some(out)
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// `[+-]?digits(.digits)?([eE][+-]?digits)?` over the whole text.
pub(crate) fn is_number(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
        None => (unsigned, None),
    };
    let mantissa_ok = match mantissa.split_once('.') {
        Some((whole, fraction)) => is_digits(whole) && is_digits(fraction),
        None => is_digits(mantissa),
    };
    let exponent_ok = match exponent {
        Some(exp) => is_digits(exp.strip_prefix(['+', '-']).unwrap_or(exp)),
        None => true,
    };
    mantissa_ok && exponent_ok
}

/// Turns the text of an unquoted literal into a primitive.
pub(crate) fn interpret(text: String) -> Value {
    match text.as_str() {
        "null" => Value::Null,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ if is_number(&text) => match text.parse::<f64>() {
            Ok(n) => Value::Number(n),
            Err(_) => Value::String(text),
        },
        _ => Value::String(text),
    }
}

/// Returns the index a key denotes when it is written in canonical decimal
/// form: no sign, no leading zeros. `u64::MAX` is excluded so the next index
/// always fits.
pub(crate) fn canonical_index(key: &str) -> Option<u64> {
    if !is_digits(key) || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    key.parse::<u64>().ok().filter(|&index| index < u64::MAX)
}

/// Whether `key` is the positional key for the element at `position`.
#[inline]
pub(crate) fn is_element_key(key: &str, position: usize) -> bool {
    canonical_index(key) == Some(position as u64)
}

#[inline]
fn is_word(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Word characters at both ends, only word characters and spaces between.
pub(crate) fn is_safe_literal(s: &str) -> bool {
    match (s.chars().next(), s.chars().last()) {
        (Some(first), Some(last)) => {
            is_word(first) && is_word(last) && s.chars().all(|ch| is_word(ch) || ch == ' ')
        }
        _ => false,
    }
}

/// Writes a string value, bare when reading it back yields the same string.
pub(crate) fn write_string(out: &mut String, s: &str) {
    if is_safe_literal(s) && !matches!(s, "null" | "true" | "false") && !is_number(s) {
        out.push_str(s);
    } else {
        write_quoted(out, s);
    }
}

/// Writes a property key. Keys are never interpreted, so only the shape matters.
pub(crate) fn write_key(out: &mut String, key: &str) {
    if is_safe_literal(key) {
        out.push_str(key);
    } else {
        write_quoted(out, key);
    }
}

pub(crate) fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0B}' => out.push_str("\\v"),
            '\u{0C}' => out.push_str("\\f"),
            '\u{08}' => out.push_str("\\b"),
            ' '..='~' => out.push(ch),
            _ if (ch as u32) <= 0xFF => out.push_str(&format!("\\x{:02x}", ch as u32)),
            _ => {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{:04x}", unit));
                }
            }
        }
    }
    out.push('"');
}

/// Shortest decimal text for a number; non-finite values have no
/// representation and become `null`.
pub(crate) fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "null".to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }
    let text = format!("{:e}", n);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_named_and_hex() {
        assert_eq!(
            unescape("\\0\\n\\r\\t\\v\\f\\b\\x00\\x1F\\x33\\xFF\\u1234").as_deref(),
            Some("\0\n\r\t\u{0B}\u{0C}\u{08}\0\u{1F}3\u{FF}\u{1234}")
        );
        assert_eq!(unescape(r"\q\\\'").as_deref(), Some("q\\'"));
        assert_eq!(unescape("plain").as_deref(), Some("plain"));
    }

    #[test]
    fn test_unescape_incomplete_hex() {
        assert_eq!(unescape(r"\x"), None);
        assert_eq!(unescape(r"\x4g"), None);
        assert_eq!(unescape(r"\u12"), None);
    }

    #[test]
    fn test_unescape_surrogates() {
        assert_eq!(unescape("\\ud83e\\udd7a").as_deref(), Some("\u{1F97A}"));
        assert_eq!(unescape(r"\ud83e!").as_deref(), Some("\u{FFFD}!"));
        assert_eq!(unescape(r"\udd7a").as_deref(), Some("\u{FFFD}"));
    }

    #[test]
    fn test_number_grammar() {
        for text in ["1", "10", "-10", "+10", "10e32", "10E31", "3.4", "-3.443e+12", "-0090.090E-2"] {
            assert!(is_number(text), "{} should be numeric", text);
        }
        for text in ["'10'", "+-10", "10:3", "1ee4", "*3", "1.", ".5", "", "e5", "1e"] {
            assert!(!is_number(text), "{} should not be numeric", text);
        }
    }

    #[test]
    fn test_interpret() {
        assert_eq!(interpret("null".into()), Value::Null);
        assert_eq!(interpret("true".into()), Value::Bool(true));
        assert_eq!(interpret("fAlse".into()), Value::String("fAlse".into()));
        assert_eq!(interpret("-0090.090E-2".into()), Value::Number(-0.9009));
        assert_eq!(interpret("+10".into()), Value::Number(10.0));
    }

    #[test]
    fn test_canonical_index() {
        assert_eq!(canonical_index("0"), Some(0));
        assert_eq!(canonical_index("281474976710656"), Some(281_474_976_710_656));
        assert_eq!(canonical_index("01"), None);
        assert_eq!(canonical_index("+1"), None);
        assert_eq!(canonical_index("1.0"), None);
        assert_eq!(canonical_index(""), None);
        assert_eq!(canonical_index("18446744073709551615"), None);
    }

    #[test]
    fn test_safe_literal_shape() {
        assert!(is_safe_literal("hello world"));
        assert!(is_safe_literal("1000 Cool Strings"));
        assert!(is_safe_literal("a"));
        assert!(!is_safe_literal(""));
        assert!(!is_safe_literal(" "));
        assert!(!is_safe_literal("hello, world"));
        assert!(!is_safe_literal("hello-world"));
        assert!(!is_safe_literal("trailing "));
    }

    #[test]
    fn test_write_string_quotes_reinterpretable_words() {
        let render = |s: &str| {
            let mut out = String::new();
            write_string(&mut out, s);
            out
        };
        assert_eq!(render("hello_world"), "hello_world");
        assert_eq!(render("10"), "\"10\"");
        assert_eq!(render("true"), "\"true\"");
        assert_eq!(render("1000! Cool Strings"), "\"1000! Cool Strings\"");
    }

    #[test]
    fn test_write_quoted_escapes() {
        let mut out = String::new();
        write_quoted(&mut out, "\u{18}weird\u{1A}\u{0C}\r\u{FF}\u{7F}\"\\\u{1F97A}");
        assert_eq!(
            out,
            "\"\\x18weird\\x1a\\f\\r\\xff\\x7f\\\"\\\\\\ud83e\\udd7a\""
        );
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(-98.44), "-98.44");
        assert_eq!(format_number(1e33), "1e+33");
        assert_eq!(format_number(6.0221409e23), "6.0221409e+23");
        assert_eq!(format_number(-2.99792458e-6), "-0.00000299792458");
        assert_eq!(format_number(-9.6574e-99), "-9.6574e-99");
        assert_eq!(format_number(f64::NAN), "null");
        assert_eq!(format_number(f64::NEG_INFINITY), "null");
    }
}
