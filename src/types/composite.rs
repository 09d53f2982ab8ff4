//! # Composite Type Nodes
//!
//! Tuple, List, Set and Map decoders. Composites hold child [`TypeRef`]s and
//! decode recursively: each element is framed by a length field, sliced out
//! of the parent buffer, and handed to the child decoder through a fresh
//! [`Buffer`] over the sub-span.
//!
//! ## Framing
//!
//! Collection counts and element lengths are 4 bytes wide from protocol
//! version 3 onward and 2 bytes wide before that. Tuples were only
//! standardized with version 3 framing, so tuple decoding clamps the
//! version to a floor of 3 for itself and its children.
//!
//! ## Truncation policy
//!
//! The two observable behaviors on a buffer that ends at an element's
//! *length field* differ by kind and are both load-bearing:
//!
//! - **Tuple**: remaining positions are backfilled with `Null`, preserving
//!   the declared arity.
//! - **List/Set/Map**: iteration stops and the output stays short; an
//!   incompletely received collection is returned as far as it got, without
//!   fabricating entries.
//!
//! A buffer that ends inside a *declared element payload* is an error
//! (`Truncated`) for every kind, as is a negative length (`InvalidValue`).

use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::wire::{marshal, Buffer};

use super::node::TypeRef;
use super::value::Value;

/// Protocol version from which 4-byte collection framing applies.
const WIDE_FRAMING_VERSION: u8 = 3;

/// Wire-supplied counts never size an allocation beyond this.
const PREALLOC_CAP: usize = 1024;

/// Fixed-arity heterogeneous sequence of child types.
#[derive(Debug)]
pub struct TupleType {
    fields: SmallVec<[TypeRef; 4]>,
}

impl TupleType {
    pub fn new(fields: SmallVec<[TypeRef; 4]>) -> Self {
        Self { fields }
    }

    /// Number of declared positions.
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    pub fn decode<'a>(&self, buffer: &mut Buffer<'a>, protocol_version: u8) -> Result<Value<'a>> {
        // Tuple elements are always framed with at least version 3 semantics.
        let version = protocol_version.max(WIDE_FRAMING_VERSION);

        let mut items = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let Some(len) = read_element_len(buffer, version)? else {
                break;
            };
            if len < 0 {
                return Err(Error::InvalidValue(format!(
                    "negative item length {} in tuple",
                    len
                )));
            }
            let mut item_buffer = Buffer::new(buffer.consume(len as usize)?);
            items.push(field.get().decode(&mut item_buffer, version)?);
        }

        // Positions past the end of the buffer decode as null.
        items.resize(self.fields.len(), Value::Null);
        Ok(Value::Tuple(items))
    }
}

/// Homogeneous count-prefixed sequence.
#[derive(Debug)]
pub struct ListType {
    item: TypeRef,
}

impl ListType {
    pub fn new(item: TypeRef) -> Self {
        Self { item }
    }

    pub fn decode<'a>(&self, buffer: &mut Buffer<'a>, protocol_version: u8) -> Result<Value<'a>> {
        drain_elements(&self.item, buffer, protocol_version, "list").map(Value::List)
    }
}

/// Same wire shape as a list, distinct output kind.
#[derive(Debug)]
pub struct SetType {
    item: TypeRef,
}

impl SetType {
    pub fn new(item: TypeRef) -> Self {
        Self { item }
    }

    pub fn decode<'a>(&self, buffer: &mut Buffer<'a>, protocol_version: u8) -> Result<Value<'a>> {
        drain_elements(&self.item, buffer, protocol_version, "set").map(Value::Set)
    }
}

/// Count-prefixed key/value pairs.
#[derive(Debug)]
pub struct MapType {
    key: TypeRef,
    value: TypeRef,
}

impl MapType {
    pub fn new(key: TypeRef, value: TypeRef) -> Self {
        Self { key, value }
    }

    pub fn decode<'a>(&self, buffer: &mut Buffer<'a>, protocol_version: u8) -> Result<Value<'a>> {
        let count = read_count(buffer, protocol_version)?;

        let mut entries = Vec::with_capacity(count.min(PREALLOC_CAP));
        for _ in 0..count {
            let Some(key) = decode_element(&self.key, buffer, protocol_version, "map")? else {
                break;
            };
            let Some(value) = decode_element(&self.value, buffer, protocol_version, "map")? else {
                break;
            };
            entries.push((key, value));
        }
        Ok(Value::Map(entries))
    }
}

/// Reads the collection item count, 4 or 2 bytes wide by protocol version.
fn read_count(buffer: &mut Buffer<'_>, version: u8) -> Result<usize> {
    if version >= WIDE_FRAMING_VERSION {
        Ok(marshal::unmarshal_u32(buffer.consume_array()?) as usize)
    } else {
        Ok(marshal::unmarshal_u16(buffer.consume_array()?) as usize)
    }
}

/// Reads an element length field of the version's framing width.
///
/// Returns `None` when the buffer ends at the field boundary, the signal
/// for an incompletely received collection.
fn read_element_len(buffer: &mut Buffer<'_>, version: u8) -> Result<Option<i64>> {
    let width = if version >= WIDE_FRAMING_VERSION { 4 } else { 2 };
    if buffer.residual() < width {
        return Ok(None);
    }
    let len = if version >= WIDE_FRAMING_VERSION {
        marshal::unmarshal_i32(buffer.consume_array()?) as i64
    } else {
        marshal::unmarshal_i16(buffer.consume_array()?) as i64
    };
    Ok(Some(len))
}

/// Reads one length-framed element and decodes it with `item_type`.
///
/// Returns `None` when the buffer ends at the length field.
fn decode_element<'a>(
    item_type: &TypeRef,
    buffer: &mut Buffer<'a>,
    version: u8,
    what: &'static str,
) -> Result<Option<Value<'a>>> {
    let Some(len) = read_element_len(buffer, version)? else {
        return Ok(None);
    };
    if len < 0 {
        return Err(Error::InvalidValue(format!(
            "negative item length {} in {}",
            len, what
        )));
    }
    let mut item_buffer = Buffer::new(buffer.consume(len as usize)?);
    item_type.get().decode(&mut item_buffer, version).map(Some)
}

fn drain_elements<'a>(
    item_type: &TypeRef,
    buffer: &mut Buffer<'a>,
    version: u8,
    what: &'static str,
) -> Result<Vec<Value<'a>>> {
    let count = read_count(buffer, version)?;

    let mut items = Vec::with_capacity(count.min(PREALLOC_CAP));
    for _ in 0..count {
        let Some(item) = decode_element(item_type, buffer, version, what)? else {
            break;
        };
        items.push(item);
    }
    Ok(items)
}
