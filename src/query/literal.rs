//! Recursive-descent parser for shell object literals.
//!
//! Accepts the loose JavaScript literal dialect people type into a database
//! shell:
//! - Objects with bare or quoted keys: `{ name: "x", "full name": 'y' }`
//! - Arrays, strings (single or double quoted), numbers, booleans, null
//! - `ObjectId("<24 hex>")`, optionally written `new ObjectId(...)`
//!
//! Nothing is evaluated. Any other token is a syntax error.

use tracing::trace;

use crate::error::SyntaxError;

use super::value::{is_key_char, Document, ObjectId, Value};

/// Maximum nesting of objects and arrays.
pub const MAX_NESTING_DEPTH: usize = 128;

type ParseResult<T> = std::result::Result<T, SyntaxError>;

/// Parses one argument fragment into a value.
///
/// Empty or whitespace-only text yields an empty object, which is what an
/// omitted optional argument means.
pub fn parse_literal(text: &str) -> ParseResult<Value> {
    if text.trim().is_empty() {
        return Ok(Value::empty_object());
    }

    let mut parser = LiteralParser::new(text);
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if let Some(c) = parser.peek() {
        return Err(parser.error_here(format!("unexpected '{c}' after value")));
    }

    trace!(kind = value.kind_name(), "parsed literal");
    Ok(value)
}

struct LiteralParser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> LiteralParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn error_here(&self, reason: impl Into<String>) -> SyntaxError {
        SyntaxError::at(reason, self.pos)
    }

    fn expect(&mut self, expected: char) -> ParseResult<()> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(c) => Err(self.error_here(format!("expected '{expected}', found '{c}'"))),
            None => Err(self.error_here(format!("expected '{expected}', found end of input"))),
        }
    }

    fn enter(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(self.error_here(format!(
                "nesting deeper than {MAX_NESTING_DEPTH} levels"
            )));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_value(&mut self) -> ParseResult<Value> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(self.error_here("expected a value, found end of input")),
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some(quote @ ('"' | '\'')) => self.parse_string(quote).map(Value::String),
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_number(),
            Some(c) if is_key_char(c) => self.parse_keyword(),
            Some(c) => Err(self.error_here(format!("unexpected '{c}'"))),
        }
    }

    fn parse_object(&mut self) -> ParseResult<Value> {
        self.bump();
        self.enter()?;

        let mut doc = Document::new();
        self.skip_whitespace();
        if self.eat('}') {
            self.leave();
            return Ok(Value::Object(doc));
        }

        loop {
            self.skip_whitespace();
            let key = self.parse_key()?;
            self.expect(':')?;
            let value = self.parse_value()?;
            doc.insert(key, value);

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                    self.skip_whitespace();
                    if self.peek() == Some('}') {
                        return Err(self.error_here("trailing comma in object"));
                    }
                }
                Some('}') => {
                    self.bump();
                    break;
                }
                Some(c) => return Err(self.error_here(format!("expected ',' or '}}', found '{c}'"))),
                None => return Err(self.error_here("unterminated object")),
            }
        }

        self.leave();
        Ok(Value::Object(doc))
    }

    fn parse_key(&mut self) -> ParseResult<String> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => self.parse_string(quote),
            Some(c) if is_key_char(c) => Ok(self.take_word().to_string()),
            Some(c) => Err(self.error_here(format!("expected object key, found '{c}'"))),
            None => Err(self.error_here("expected object key, found end of input")),
        }
    }

    fn parse_array(&mut self) -> ParseResult<Value> {
        self.bump();
        self.enter()?;

        let mut items = Vec::new();
        self.skip_whitespace();
        if self.eat(']') {
            self.leave();
            return Ok(Value::Array(items));
        }

        loop {
            items.push(self.parse_value()?);

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                    self.skip_whitespace();
                    if self.peek() == Some(']') {
                        return Err(self.error_here("trailing comma in array"));
                    }
                }
                Some(']') => {
                    self.bump();
                    break;
                }
                Some(c) => return Err(self.error_here(format!("expected ',' or ']', found '{c}'"))),
                None => return Err(self.error_here("unterminated array")),
            }
        }

        self.leave();
        Ok(Value::Array(items))
    }

    /// Parses a quoted string starting at the opening quote.
    fn parse_string(&mut self, quote: char) -> ParseResult<String> {
        let start = self.pos;
        self.bump();

        let mut result = String::new();
        loop {
            let Some(c) = self.bump() else {
                return Err(SyntaxError::at("unterminated string", start));
            };

            if c == quote {
                return Ok(result);
            }
            if matches!(c, '\n' | '\r') {
                return Err(SyntaxError::at("unterminated string", start));
            }
            if c != '\\' {
                result.push(c);
                continue;
            }

            let Some(escaped) = self.bump() else {
                return Err(SyntaxError::at("unterminated string", start));
            };
            match escaped {
                'n' => result.push('\n'),
                't' => result.push('\t'),
                'r' => result.push('\r'),
                'b' => result.push('\u{8}'),
                'f' => result.push('\u{c}'),
                'v' => result.push('\u{b}'),
                '0' => result.push('\0'),
                'x' => result.push(self.parse_hex_escape()?),
                'u' => result.push(self.parse_unicode_escape()?),
                // Line continuation.
                '\n' => {}
                '\r' => {
                    self.eat('\n');
                }
                // Any other escaped character, quotes and backslash included, is literal.
                other => result.push(other),
            }
        }
    }

    fn take_hex(&mut self, len: usize) -> Option<u32> {
        let digits = self.input.get(self.pos..self.pos + len)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let code = u32::from_str_radix(digits, 16).ok()?;
        self.pos += len;
        Some(code)
    }

    fn parse_hex4(&mut self) -> ParseResult<u32> {
        let start = self.pos;
        self.take_hex(4)
            .ok_or_else(|| SyntaxError::at("invalid \\u escape", start))
    }

    /// Decodes the two digits of a `\x` escape.
    fn parse_hex_escape(&mut self) -> ParseResult<char> {
        let start = self.pos;
        self.take_hex(2)
            .and_then(char::from_u32)
            .ok_or_else(|| SyntaxError::at("invalid \\x escape", start))
    }

    /// Decodes the digits of a `\u` escape, joining surrogate pairs.
    fn parse_unicode_escape(&mut self) -> ParseResult<char> {
        let start = self.pos;
        let high = self.parse_hex4()?;

        let code = if (0xD800..0xDC00).contains(&high) {
            if !self.input[self.pos..].starts_with("\\u") {
                return Err(SyntaxError::at("unpaired surrogate in \\u escape", start));
            }
            self.pos += 2;
            let low = self.parse_hex4()?;
            if !(0xDC00..0xE000).contains(&low) {
                return Err(SyntaxError::at("unpaired surrogate in \\u escape", start));
            }
            0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
        } else {
            high
        };

        char::from_u32(code).ok_or_else(|| SyntaxError::at("invalid \\u escape", start))
    }

    fn take_digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn parse_number(&mut self) -> ParseResult<Value> {
        let start = self.pos;
        let mut is_float = false;

        self.eat('-');
        let int_start = self.pos;
        let int_len = self.take_digits();
        if int_len == 0 || (int_len > 1 && self.input[int_start..].starts_with('0')) {
            return Err(SyntaxError::at("invalid number", start));
        }

        if self.eat('.') {
            is_float = true;
            if self.take_digits() == 0 {
                return Err(SyntaxError::at("invalid number", start));
            }
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            self.bump();
            if !self.eat('+') {
                self.eat('-');
            }
            if self.take_digits() == 0 {
                return Err(SyntaxError::at("invalid number", start));
            }
        }

        let text = &self.input[start..self.pos];
        if !is_float {
            if let Ok(i) = text.parse::<i64>() {
                return Ok(Value::Int(i));
            }
        }

        match text.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Value::Float(f)),
            _ => Err(SyntaxError::at(format!("number out of range: {text}"), start)),
        }
    }

    fn take_word(&mut self) -> &'a str {
        let input = self.input;
        let start = self.pos;
        while matches!(self.peek(), Some(c) if is_key_char(c)) {
            self.pos += 1;
        }
        &input[start..self.pos]
    }

    fn parse_keyword(&mut self) -> ParseResult<Value> {
        let start = self.pos;
        match self.take_word() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "null" => Ok(Value::Null),
            "ObjectId" => self.parse_object_id_call(start),
            "new" => {
                self.skip_whitespace();
                let ctor_start = self.pos;
                match self.take_word() {
                    "ObjectId" => self.parse_object_id_call(ctor_start),
                    _ => Err(SyntaxError::at("expected ObjectId after 'new'", ctor_start)),
                }
            }
            word => Err(SyntaxError::at(format!("unknown token '{word}'"), start)),
        }
    }

    /// Parses `("<hex>")` after the `ObjectId` name.
    fn parse_object_id_call(&mut self, start: usize) -> ParseResult<Value> {
        self.expect('(')?;
        self.skip_whitespace();
        let hex = match self.peek() {
            Some(quote @ ('"' | '\'')) => self.parse_string(quote)?,
            _ => return Err(self.error_here("ObjectId expects a quoted hex string")),
        };
        self.expect(')')?;

        let oid = ObjectId::parse_str(&hex).map_err(|e| SyntaxError::at(e.reason, start))?;
        Ok(Value::ObjectId(oid))
    }
}
