//! Recursive-descent bencode parser
//!
//! The token kind is fully determined by its first byte, so the parser never
//! backtracks: digits start a byte string, `i` an integer, `l` a list and `d`
//! a dictionary. Canonical form is not enforced; integers with leading zeros
//! and dictionaries with unsorted keys are accepted as they appear.

use bytes::Bytes;
use tracing::{trace, warn};

use crate::decode::cursor::Cursor;
use crate::decode::options::DecodeOptions;
use crate::error::{DecodeError, Result};
use crate::value::{Dict, Value};

const INTEGER: u8 = b'i';
const LIST: u8 = b'l';
const DICT: u8 = b'd';
const END: u8 = b'e';
const COLON: u8 = b':';
const MINUS: u8 = b'-';
const NUL: u8 = 0;

/// Bencode parser over a single input buffer
#[derive(Debug, Clone)]
pub struct Parser {
    cursor: Cursor,
    options: DecodeOptions,
    depth: usize,
}

impl Parser {
    /// Create a parser with default options
    pub fn new(buf: Bytes) -> Self {
        Self::with_options(buf, DecodeOptions::default())
    }

    /// Create a parser with the given options
    pub fn with_options(buf: Bytes, options: DecodeOptions) -> Self {
        Self {
            cursor: Cursor::new(buf),
            options,
            depth: 0,
        }
    }

    /// Check if the whole buffer has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_exhausted()
    }

    /// Current offset into the buffer
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Parse every top-level value until the buffer is exhausted
    pub fn parse_stream(&mut self) -> Result<Vec<Value>> {
        let mut values = Vec::new();
        while !self.is_exhausted() {
            values.push(self.parse_value()?);
        }
        trace!("Parsed {} top-level values", values.len());
        Ok(values)
    }

    /// Parse the next value
    pub fn parse_value(&mut self) -> Result<Value> {
        match self.cursor.peek() {
            None => Err(DecodeError::UnexpectedEnd { context: "value" }),
            Some(NUL) => {
                warn!("NUL byte at offset {} decoded as nothing", self.position());
                self.cursor.advance();
                Ok(Value::Nothing)
            }
            Some(INTEGER) => self.parse_integer().map(Value::Integer),
            Some(LIST) => self.parse_list(),
            Some(DICT) => self.parse_dict(),
            Some(b'0'..=b'9') => self.parse_byte_string().map(Value::Bytes),
            Some(byte) => Err(DecodeError::UnknownToken {
                offset: self.position(),
                byte,
            }),
        }
    }

    /// Parse `<length>:<bytes>`
    fn parse_byte_string(&mut self) -> Result<Bytes> {
        let start = self.position();
        let mut length: usize = 0;

        loop {
            match self.cursor.peek() {
                None => return Err(DecodeError::UnexpectedEnd { context: "string length" }),
                Some(COLON) => break,
                Some(digit @ b'0'..=b'9') => {
                    length = length
                        .checked_mul(10)
                        .and_then(|l| l.checked_add(usize::from(digit - b'0')))
                        .ok_or_else(|| DecodeError::MalformedLength {
                            offset: start,
                            reason: "length does not fit in memory".to_string(),
                        })?;
                    self.cursor.advance();
                }
                Some(byte) => {
                    return Err(DecodeError::MalformedLength {
                        offset: self.position(),
                        reason: format!("unexpected byte {:?}", char::from(byte)),
                    });
                }
            }
        }
        self.cursor.advance();

        let offset = self.position();
        let available = self.cursor.remaining();
        let data = self.cursor.take(length).ok_or(DecodeError::TruncatedString {
            offset,
            declared: length,
            available,
        })?;

        trace!("Byte string of {} bytes at offset {}", length, start);
        Ok(data)
    }

    /// Parse `i<digits>e`
    fn parse_integer(&mut self) -> Result<i64> {
        let start = self.position();
        self.cursor.advance();

        let mut digits = String::new();
        if self.cursor.peek() == Some(MINUS) {
            digits.push('-');
            self.cursor.advance();
        }

        loop {
            match self.cursor.peek() {
                None => return Err(DecodeError::UnexpectedEnd { context: "integer" }),
                Some(END) => break,
                Some(digit @ b'0'..=b'9') => {
                    digits.push(char::from(digit));
                    self.cursor.advance();
                }
                Some(byte) => {
                    return Err(DecodeError::InvalidInteger {
                        offset: self.position(),
                        reason: format!("unexpected byte {:?}", char::from(byte)),
                    });
                }
            }
        }
        self.cursor.advance();

        if digits.trim_start_matches('-').is_empty() {
            return Err(DecodeError::InvalidInteger {
                offset: start,
                reason: "no digits".to_string(),
            });
        }

        let value = digits.parse::<i64>().map_err(|_| DecodeError::InvalidInteger {
            offset: start,
            reason: format!("{} does not fit in 64 bits", digits),
        })?;

        trace!("Integer {} at offset {}", value, start);
        Ok(value)
    }

    /// Parse `l<value>*e`
    fn parse_list(&mut self) -> Result<Value> {
        self.enter()?;
        let result = self.parse_list_items();
        self.leave();
        result
    }

    fn parse_list_items(&mut self) -> Result<Value> {
        self.cursor.advance();

        let mut list = Vec::new();
        loop {
            match self.cursor.peek() {
                None => return Err(DecodeError::UnexpectedEnd { context: "list" }),
                Some(END) => break,
                Some(_) => list.push(self.parse_value()?),
            }
        }
        self.cursor.advance();

        trace!("List of {} items", list.len());
        Ok(Value::List(list))
    }

    /// Parse `d(<byte string><value>)*e`
    fn parse_dict(&mut self) -> Result<Value> {
        self.enter()?;
        let result = self.parse_dict_entries();
        self.leave();
        result
    }

    fn parse_dict_entries(&mut self) -> Result<Value> {
        self.cursor.advance();

        let mut dict = Dict::new();
        loop {
            match self.cursor.peek() {
                None => return Err(DecodeError::UnexpectedEnd { context: "dictionary" }),
                Some(END) => break,
                Some(b'0'..=b'9') => {
                    let key = self.parse_byte_string()?;
                    let value = self.parse_value()?;
                    if dict.insert(key.clone(), value).is_some() {
                        trace!("Duplicate key {:?}, keeping the last value", String::from_utf8_lossy(&key));
                    }
                }
                Some(byte) => {
                    return Err(DecodeError::KeyMustBeString {
                        offset: self.position(),
                        byte,
                    });
                }
            }
        }
        self.cursor.advance();

        trace!("Dictionary of {} entries", dict.len());
        Ok(Value::Dict(dict))
    }

    /// Open a container; `depth` only grows when the limit allows it
    fn enter(&mut self) -> Result<()> {
        match self.options.max_depth {
            Some(limit) if self.depth >= limit => Err(DecodeError::NestingTooDeep {
                offset: self.position(),
                limit,
            }),
            _ => {
                self.depth += 1;
                Ok(())
            }
        }
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}
