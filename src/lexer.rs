//! Tokenizer for CKT text.
//!
//! The lexer is pull-based: the decoder asks for one token at a time and keeps
//! a single token of lookahead. Each token remembers where it started so that
//! errors can point at the beginning of the offending input.

use crate::error::{Error, Result};
use crate::literal::{is_literal_char, is_whitespace, unescape};

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) enum Token {
    #[default]
    Eof,
    Newline,
    /// A run of `,` and `;`.
    Separator,
    Equals,
    LBracket,
    RBracket,
    /// Unquoted text, escapes already decoded.
    Literal(String),
    /// Quoted text, escapes already decoded.
    String(String),
    /// `|` lines joined by `\n`, taken verbatim.
    Multiline(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}

#[derive(Clone, Copy)]
struct Mark {
    position: usize,
    line: usize,
    column: usize,
}

pub(crate) struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.input[self.position..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn mark(&self) -> Mark {
        Mark {
            position: self.position,
            line: self.line,
            column: self.column,
        }
    }

    fn reset(&mut self, mark: Mark) {
        self.position = mark.position;
        self.line = mark.line;
        self.column = mark.column;
    }

    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek_char() {
            if is_whitespace(ch) {
                self.bump();
            } else if ch == '#' {
                while let Some(c) = self.peek_char() {
                    if c == '\n' {
                        break;
                    }
                    self.bump();
                }
            } else {
                break;
            }
        }
    }

    pub fn next_token(&mut self) -> Result<Spanned> {
        self.skip_trivia();
        let start = self.mark();
        let spanned = |token| Spanned {
            token,
            line: start.line,
            column: start.column,
        };

        let ch = match self.peek_char() {
            Some(ch) => ch,
            None => return Ok(spanned(Token::Eof)),
        };

        let token = match ch {
            '\n' => {
                self.bump();
                Token::Newline
            }
            ',' | ';' => {
                while matches!(self.peek_char(), Some(',' | ';')) {
                    self.bump();
                }
                Token::Separator
            }
            '=' => {
                self.bump();
                Token::Equals
            }
            '[' => {
                self.bump();
                Token::LBracket
            }
            ']' => {
                self.bump();
                Token::RBracket
            }
            '"' => Token::String(self.scan_string(start)?),
            '|' => Token::Multiline(self.scan_multiline()),
            '\\' if !matches!(self.peek_second(), None | Some('\n')) => {
                Token::Literal(self.scan_literal(start)?)
            }
            c if is_literal_char(c) => Token::Literal(self.scan_literal(start)?),
            _ => return Err(Error::lex(start.line, start.column, "unexpected character")),
        };
        Ok(spanned(token))
    }

    fn scan_literal(&mut self, start: Mark) -> Result<String> {
        let mut end = start;
        while let Some(ch) = self.peek_char() {
            if ch == '\\' {
                if matches!(self.peek_second(), None | Some('\n')) {
                    break;
                }
                self.bump();
                self.bump();
                end = self.mark();
            } else if is_literal_char(ch) {
                self.bump();
                if !is_whitespace(ch) {
                    end = self.mark();
                }
            } else {
                break;
            }
        }
        self.reset(end);

        let raw = &self.input[start.position..end.position];
        unescape(raw).ok_or_else(|| Error::lex(start.line, start.column, "incomplete hex escape"))
    }

    fn scan_string(&mut self, start: Mark) -> Result<String> {
        self.bump();
        let content_start = self.position;
        loop {
            match self.peek_char() {
                None | Some('\n') => {
                    return Err(Error::lex(start.line, start.column, "unexpected character"));
                }
                Some('"') => break,
                Some('\\') => {
                    self.bump();
                    if self.peek_char().is_some_and(|c| c != '\n') {
                        self.bump();
                    }
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
        let raw = &self.input[content_start..self.position];
        self.bump();
        unescape(raw).ok_or_else(|| Error::lex(start.line, start.column, "incomplete hex escape"))
    }

    fn scan_multiline(&mut self) -> String {
        let mut lines: Vec<&str> = Vec::new();
        loop {
            // Positioned on the bar.
            self.bump();
            let content_start = self.position;
            while let Some(ch) = self.peek_char() {
                if ch == '\n' {
                    break;
                }
                self.bump();
            }
            let content = &self.input[content_start..self.position];
            lines.push(content.strip_suffix('\r').unwrap_or(content));

            if self.bump().is_none() {
                break;
            }
            let checkpoint = self.mark();
            while self.peek_char().is_some_and(is_whitespace) {
                self.bump();
            }
            if self.peek_char() != Some('|') {
                self.reset(checkpoint);
                break;
            }
        }
        lines.join("\n")
    }
}
