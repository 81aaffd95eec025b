//! Container destinations: sequences, arrays, maps, byte buffers and wrappers

use bytes::Bytes;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::error::{DecodeError, PathSegment, Result};
use crate::project::{mismatch, Project};
use crate::value::{Dict, Value};

/// Replace `dest` with a freshly built vector, one element per list item
pub(crate) fn project_list<T>(dest: &mut Vec<T>, value: &Value) -> Result<()>
where
    T: Project + Default,
{
    let items = value.as_list().ok_or_else(|| mismatch("list", value))?;

    let mut projected = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let mut element = T::default();
        element
            .project(item)
            .map_err(|e| e.with_context(index))?;
        projected.push(element);
    }

    *dest = projected;
    Ok(())
}

/// Project a list of exactly `dest.len()` items element by element
pub(crate) fn project_list_in_place<T: Project>(dest: &mut [T], value: &Value) -> Result<()> {
    let items = value.as_list().ok_or_else(|| mismatch("fixed-length list", value))?;
    if items.len() != dest.len() {
        return Err(DecodeError::type_mismatch(
            "fixed-length list",
            format!("list of {} items, expected {}", items.len(), dest.len()),
        ));
    }

    for (index, (slot, item)) in dest.iter_mut().zip(items).enumerate() {
        slot.project(item)
            .map_err(|e| e.with_context(index))?;
    }
    Ok(())
}

/// Project each dictionary entry and hand it to `insert`
fn project_entries<K, V>(dict: &Dict, mut insert: impl FnMut(K, V)) -> Result<()>
where
    K: Project + Default,
    V: Project + Default,
{
    for (raw_key, raw_value) in dict {
        let label = String::from_utf8_lossy(raw_key).into_owned();

        let mut key = K::default();
        key.project(&Value::Bytes(raw_key.clone()))
            .map_err(|e| e.with_context(PathSegment::Key(label.clone())))?;

        let mut value = V::default();
        value
            .project(raw_value)
            .map_err(|e| e.with_context(PathSegment::Key(label)))?;

        insert(key, value);
    }
    Ok(())
}

impl<T: Project + Default> Project for Vec<T> {
    fn project(&mut self, value: &Value) -> Result<()> {
        T::project_vec(self, value)
    }
}

impl<T: Project, const N: usize> Project for [T; N] {
    fn project(&mut self, value: &Value) -> Result<()> {
        T::project_slice(self.as_mut_slice(), value)
    }
}

impl Project for Bytes {
    fn project(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Bytes(b) => {
                *self = b.clone();
                Ok(())
            }
            other => {
                let mut buf = Vec::new();
                u8::project_vec(&mut buf, other)?;
                *self = Bytes::from(buf);
                Ok(())
            }
        }
    }
}

impl<K, V, S> Project for HashMap<K, V, S>
where
    K: Project + Default + Eq + Hash,
    V: Project + Default,
    S: BuildHasher,
{
    fn project(&mut self, value: &Value) -> Result<()> {
        let dict = value.as_dict().ok_or_else(|| mismatch("map", value))?;
        project_entries(dict, |k: K, v: V| {
            self.insert(k, v);
        })
    }
}

impl<K, V> Project for BTreeMap<K, V>
where
    K: Project + Default + Ord,
    V: Project + Default,
{
    fn project(&mut self, value: &Value) -> Result<()> {
        let dict = value.as_dict().ok_or_else(|| mismatch("map", value))?;
        project_entries(dict, |k: K, v: V| {
            self.insert(k, v);
        })
    }
}

impl<T: Project + Default> Project for Option<T> {
    fn project(&mut self, value: &Value) -> Result<()> {
        if value.is_nothing() {
            *self = None;
            return Ok(());
        }
        self.get_or_insert_with(T::default).project(value)
    }
}

impl<T: Project + ?Sized> Project for Box<T> {
    fn project(&mut self, value: &Value) -> Result<()> {
        (**self).project(value)
    }
}
