//! Struct destinations
//!
//! Rust has no runtime field introspection, so each struct lists its fields
//! once with [`bencode_record!`](crate::bencode_record). The macro expands to
//! a [`Project`] impl that looks every listed field up in the dictionary by
//! its wire name.
//!
//! ```
//! use rust_bencode_decoder::{bencode_record, from_bytes};
//!
//! #[derive(Debug, Default)]
//! struct Person {
//!     age: i64,
//!     name: String,
//!     email: Option<String>,
//!     cache_key: u64,
//! }
//!
//! bencode_record!(Person {
//!     age,
//!     name = "name",
//!     email,
//!     cache_key = -,
//! });
//!
//! let mut person = Person::default();
//! from_bytes(&b"d3:agei30e4:name3:Joee"[..], &mut person).unwrap();
//! assert_eq!(person.age, 30);
//! assert_eq!(person.name, "Joe");
//! assert_eq!(person.email, None);
//! ```

use tracing::trace;

use crate::error::{DecodeError, Result};
use crate::project::Project;
use crate::value::{Dict, Value};

/// Dictionary view handed to generated record impls
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    record: &'static str,
    dict: &'a Dict,
}

impl<'a> Fields<'a> {
    /// Check that `value` is a dictionary and wrap it for field lookups
    pub fn new(record: &'static str, value: &'a Value) -> Result<Self> {
        match value {
            Value::Dict(dict) => Ok(Self { record, dict }),
            other => Err(DecodeError::type_mismatch(record, other.type_name())),
        }
    }

    /// Project the entry named `name` onto `dest`.
    ///
    /// A missing key leaves `dest` as it was.
    pub fn field<T: Project + ?Sized>(&self, name: &str, dest: &mut T) -> Result<()> {
        match self.dict.get(name.as_bytes()) {
            Some(value) => {
                trace!("{}.{} <- {}", self.record, name, value.type_name());
                dest.project(value).map_err(|e| e.with_context(name))
            }
            None => {
                trace!("{}.{} absent, left unchanged", self.record, name);
                Ok(())
            }
        }
    }
}

/// Implement [`Project`](crate::Project) for a struct from a field list.
///
/// Each entry is one of:
///
/// - `field` reads the dictionary key equal to the field's name
/// - `field = "wire name"` reads the given key instead
/// - `field = -` never touches the field
///
/// Fields left out of the list are never touched either. Keys that are
/// missing from the dictionary leave their field unchanged, and keys that
/// match no field are ignored.
#[macro_export]
macro_rules! bencode_record {
    (@fields $this:ident $fields:ident;) => {};
    (@fields $this:ident $fields:ident; $field:ident = - $(, $($rest:tt)*)?) => {
        $crate::bencode_record!(@fields $this $fields; $($($rest)*)?);
    };
    (@fields $this:ident $fields:ident; $field:ident = $name:literal $(, $($rest:tt)*)?) => {
        $fields.field($name, &mut $this.$field)?;
        $crate::bencode_record!(@fields $this $fields; $($($rest)*)?);
    };
    (@fields $this:ident $fields:ident; $field:ident $(, $($rest:tt)*)?) => {
        $fields.field(stringify!($field), &mut $this.$field)?;
        $crate::bencode_record!(@fields $this $fields; $($($rest)*)?);
    };
    ($record:ident { $($body:tt)* }) => {
        impl $crate::Project for $record {
            fn project(&mut self, value: &$crate::Value) -> $crate::Result<()> {
                let fields = $crate::project::Fields::new(stringify!($record), value)?;
                $crate::bencode_record!(@fields self fields; $($body)*);
                Ok(())
            }
        }
    };
}
