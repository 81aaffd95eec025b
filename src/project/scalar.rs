//! Scalar destinations: text, integers, booleans, floats and open value slots

use tracing::trace;

use crate::error::{DecodeError, Result};
use crate::project::{collection, mismatch, Project};
use crate::value::Value;

impl Project for String {
    fn project(&mut self, value: &Value) -> Result<()> {
        let bytes = value.as_bytes().ok_or_else(|| mismatch("string", value))?;
        let text = std::str::from_utf8(bytes)
            .map_err(|_| DecodeError::type_mismatch("string", "non-UTF-8 byte string"))?;
        *self = text.to_string();
        Ok(())
    }
}

/// Widen a value to i64 for a signed destination.
///
/// Byte strings holding a decimal number are accepted too, since some
/// producers write numeric fields as strings.
fn signed(value: &Value, expected: &'static str) -> Result<i64> {
    match value {
        Value::Integer(i) => Ok(*i),
        Value::Bytes(b) => {
            let parsed = std::str::from_utf8(b).ok().and_then(|s| s.parse::<i64>().ok());
            match parsed {
                Some(i) => {
                    trace!("Numeric string {} accepted for {}", i, expected);
                    Ok(i)
                }
                None => Err(DecodeError::type_mismatch(
                    expected,
                    format!("byte string {:?}", String::from_utf8_lossy(b)),
                )),
            }
        }
        other => Err(mismatch(expected, other)),
    }
}

fn unsigned(value: &Value, expected: &'static str) -> Result<u64> {
    match value {
        Value::Integer(i) => u64::try_from(*i)
            .map_err(|_| DecodeError::type_mismatch(expected, format!("negative integer {}", i))),
        other => Err(mismatch(expected, other)),
    }
}

fn narrow<W, T>(wide: W, expected: &'static str) -> Result<T>
where
    W: Copy + std::fmt::Display,
    T: TryFrom<W>,
{
    T::try_from(wide)
        .map_err(|_| DecodeError::type_mismatch(expected, format!("integer {} out of range", wide)))
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {
        $(
            impl Project for $ty {
                fn project(&mut self, value: &Value) -> Result<()> {
                    let wide = signed(value, stringify!($ty))?;
                    *self = narrow(wide, stringify!($ty))?;
                    Ok(())
                }
            }
        )*
    };
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Project for $ty {
                fn project(&mut self, value: &Value) -> Result<()> {
                    let wide = unsigned(value, stringify!($ty))?;
                    *self = narrow(wide, stringify!($ty))?;
                    Ok(())
                }
            }
        )*
    };
}

impl_signed!(i8, i16, i32, i64, isize);
impl_unsigned!(u16, u32, u64, usize);

impl Project for u8 {
    fn project(&mut self, value: &Value) -> Result<()> {
        let wide = unsigned(value, "u8")?;
        *self = narrow(wide, "u8")?;
        Ok(())
    }

    fn project_vec(dest: &mut Vec<Self>, value: &Value) -> Result<()> {
        match value {
            Value::Bytes(b) => {
                *dest = b.to_vec();
                Ok(())
            }
            other => collection::project_list(dest, other),
        }
    }

    fn project_slice(dest: &mut [Self], value: &Value) -> Result<()> {
        match value {
            Value::Bytes(b) if b.len() == dest.len() => {
                dest.copy_from_slice(b);
                Ok(())
            }
            Value::Bytes(b) => Err(DecodeError::type_mismatch(
                "fixed-length byte array",
                format!("byte string of {} bytes, expected {}", b.len(), dest.len()),
            )),
            other => collection::project_list_in_place(dest, other),
        }
    }
}

impl Project for bool {
    fn project(&mut self, value: &Value) -> Result<()> {
        let i = value.as_integer().ok_or_else(|| mismatch("bool", value))?;
        *self = i != 0;
        Ok(())
    }
}

impl Project for f64 {
    fn project(&mut self, value: &Value) -> Result<()> {
        let i = value.as_integer().ok_or_else(|| mismatch("f64", value))?;
        *self = i as f64;
        Ok(())
    }
}

impl Project for f32 {
    fn project(&mut self, value: &Value) -> Result<()> {
        let i = value.as_integer().ok_or_else(|| mismatch("f32", value))?;
        *self = i as f32;
        Ok(())
    }
}

// Bencode has no character token; a one-byte string and a small integer are
// equally plausible, so neither is guessed.
impl Project for char {
    fn project(&mut self, _value: &Value) -> Result<()> {
        Err(DecodeError::UnsupportedType("char"))
    }
}

impl Project for Value {
    fn project(&mut self, value: &Value) -> Result<()> {
        *self = value.clone();
        Ok(())
    }
}
