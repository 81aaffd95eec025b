//! Error types for the bencode decoder
//!
//! Byte-level errors carry the offset into the input buffer where decoding
//! stopped. Projection errors describe the shape that was expected and the
//! shape that was found, and are wrapped in [`DecodeError::Context`] as they
//! bubble up through record fields and sequence elements.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Everything that can go wrong while decoding or projecting
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A byte string length prefix contained something other than digits
    #[error("malformed string length at offset {offset}: {reason}")]
    MalformedLength { offset: usize, reason: String },

    /// An integer token was empty, contained a non-digit or overflowed i64
    #[error("invalid integer at offset {offset}: {reason}")]
    InvalidInteger { offset: usize, reason: String },

    /// Input ran out inside a token
    #[error("unexpected end of input while reading {context}")]
    UnexpectedEnd { context: &'static str },

    /// A byte string declared more bytes than the buffer holds
    #[error("byte string at offset {offset} declares {declared} bytes but only {available} remain")]
    TruncatedString {
        offset: usize,
        declared: usize,
        available: usize,
    },

    /// A dictionary key did not start with a digit
    #[error("dictionary key at offset {offset} must be a byte string, found {}", display_byte(.byte))]
    KeyMustBeString { offset: usize, byte: u8 },

    /// The leading byte does not start any bencode token
    #[error("unknown token {} at offset {offset}", display_byte(.byte))]
    UnknownToken { offset: usize, byte: u8 },

    /// Lists and dictionaries nested deeper than the configured limit
    #[error("nesting deeper than {limit} levels at offset {offset}")]
    NestingTooDeep { offset: usize, limit: usize },

    /// The decoded value cannot be stored in the destination type
    #[error("cannot project {found} onto {expected}")]
    TypeMismatch { expected: &'static str, found: String },

    /// The destination type has no projection rule
    #[error("unsupported destination type: {0}")]
    UnsupportedType(&'static str),

    /// The source yielded zero bytes
    #[error("empty input")]
    EmptyInput,

    /// Rejected decoder options
    #[error("invalid decode options: {message} (field: {field})")]
    InvalidOptions { message: String, field: &'static str },

    /// Reading the source failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An error raised below a record field, map entry or sequence element
    #[error("{}: {source}", render_path(.path))]
    Context {
        path: Vec<PathSegment>,
        #[source]
        source: Box<DecodeError>,
    },
}

/// One step on the way from the projected root to a failing value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A record field, rendered `.name`
    Field(String),
    /// A map entry, rendered `["key"]`
    Key(String),
    /// A sequence element, rendered `[index]`
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

fn display_byte(byte: &u8) -> String {
    format!("{:?}", char::from(*byte))
}

fn render_path(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            PathSegment::Field(name) if out.is_empty() => out.push_str(name),
            PathSegment::Field(name) => {
                out.push('.');
                out.push_str(name);
            }
            PathSegment::Key(key) => out.push_str(&format!("[{:?}]", key)),
            PathSegment::Index(index) => out.push_str(&format!("[{}]", index)),
        }
    }
    out
}

impl DecodeError {
    /// Create a TypeMismatch error
    pub fn type_mismatch(expected: &'static str, found: impl Into<String>) -> Self {
        DecodeError::TypeMismatch {
            expected,
            found: found.into(),
        }
    }

    /// Create an InvalidOptions error for a named field
    pub fn invalid_options(message: impl Into<String>, field: &'static str) -> Self {
        DecodeError::InvalidOptions {
            message: message.into(),
            field,
        }
    }

    /// Prefix the error with a field name, map key or element index.
    ///
    /// Nested contexts are joined into a single path, so an error three levels
    /// down reads `info.files[2].length: ...` rather than stacking wrappers.
    pub fn with_context(self, segment: impl Into<PathSegment>) -> Self {
        let segment = segment.into();
        match self {
            DecodeError::Context { mut path, source } => {
                path.insert(0, segment);
                DecodeError::Context { path, source }
            }
            other => DecodeError::Context {
                path: vec![segment],
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, with any field context stripped
    pub fn root(&self) -> &DecodeError {
        match self {
            DecodeError::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// The rendered path the error was raised under, if any
    pub fn path(&self) -> Option<String> {
        self.segments().map(render_path)
    }

    /// The path segments the error was raised under, if any
    pub fn segments(&self) -> Option<&[PathSegment]> {
        match self {
            DecodeError::Context { path, .. } => Some(path),
            _ => None,
        }
    }
}
