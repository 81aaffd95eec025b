//! Projection of decoded values onto typed destinations
//!
//! A destination implements [`Project`] and is filled in place from a
//! [`Value`]. Implementations are provided for text, integers, booleans,
//! floats, byte buffers, sequences, maps, `Option`, `Box` and [`Value`]
//! itself. Structs opt in through the [`bencode_record!`](crate::bencode_record)
//! macro, which lists each field with its wire name.

pub mod collection;
pub mod record;
pub mod scalar;

pub use record::Fields;

use crate::error::{DecodeError, Result};
use crate::value::Value;

/// A destination that a decoded [`Value`] can be written into
pub trait Project {
    /// Write `value` into `self`.
    ///
    /// On error the destination may be partially filled: record fields
    /// projected before the failing one keep their new values.
    fn project(&mut self, value: &Value) -> Result<()>;

    /// Fill a `Vec<Self>` from `value`.
    ///
    /// The default accepts a list and projects each element. `u8` overrides
    /// this so `Vec<u8>` also takes a byte string verbatim.
    #[doc(hidden)]
    fn project_vec(dest: &mut Vec<Self>, value: &Value) -> Result<()>
    where
        Self: Sized + Default,
    {
        collection::project_list(dest, value)
    }

    /// Fill a fixed-length slice of `Self` from `value`, element by element.
    #[doc(hidden)]
    fn project_slice(dest: &mut [Self], value: &Value) -> Result<()>
    where
        Self: Sized,
    {
        collection::project_list_in_place(dest, value)
    }
}

/// TypeMismatch for a value of the wrong shape
pub(crate) fn mismatch(expected: &'static str, found: &Value) -> DecodeError {
    DecodeError::type_mismatch(expected, found.type_name())
}
