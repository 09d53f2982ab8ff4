//! # Type Nodes
//!
//! `CqlType` is the closed set of decoder variants: one per simple wire
//! kind, plus the composite kinds built from child [`TypeRef`]s. A node is
//! immutable once constructed and carries no per-decode state, so one type
//! tree serves every row of a column, from any thread.
//!
//! `TypeRef` is the ownership-tagged handle through which nodes are held:
//!
//! - `Shared` points into the factory's static singleton table; singletons
//!   outlive every reference and are never released
//! - `Owned` is an exclusively owned composite subtree, released exactly
//!   once when the handle drops
//!
//! Dropping a composite therefore releases its owned children recursively
//! and leaves shared leaves untouched, even when a type tree was only
//! partially built before a resolution failure.

use std::borrow::Cow;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::{Error, Result};
use crate::wire::{marshal, Buffer};

use super::composite::{ListType, MapType, SetType, TupleType};
use super::value::Value;

/// Ownership-tagged handle to a type node.
#[derive(Debug)]
pub enum TypeRef {
    /// A leaf singleton owned by the factory's static table.
    Shared(&'static CqlType),
    /// A composite subtree owned exclusively by this handle.
    Owned(Box<CqlType>),
}

impl TypeRef {
    /// The node behind this handle.
    pub fn get(&self) -> &CqlType {
        match self {
            TypeRef::Shared(node) => node,
            TypeRef::Owned(node) => node,
        }
    }

    /// Decodes one encoded field under `protocol_version`.
    pub fn decode<'a>(&self, buffer: &mut Buffer<'a>, protocol_version: u8) -> Result<Value<'a>> {
        self.get().decode(buffer, protocol_version)
    }
}

/// A decoder for one wire type.
#[derive(Debug)]
pub enum CqlType {
    Int32,
    Int64,
    Float32,
    Float64,
    Boolean,
    Blob,
    Text,
    Ascii,
    Uuid,
    Inet,
    Timestamp,
    Varint,
    Decimal,
    Tuple(TupleType),
    List(ListType),
    Set(SetType),
    Map(MapType),
}

impl CqlType {
    /// Decodes one encoded field from `buffer`.
    ///
    /// The buffer must frame exactly one value of this type; simple
    /// variable-width kinds consume the entire residual span. Composite
    /// kinds slice sub-buffers per element and recurse.
    pub fn decode<'a>(&self, buffer: &mut Buffer<'a>, protocol_version: u8) -> Result<Value<'a>> {
        match self {
            CqlType::Int32 => Ok(Value::Int(marshal::unmarshal_i32(buffer.consume_array()?))),
            CqlType::Int64 => Ok(Value::BigInt(marshal::unmarshal_i64(
                buffer.consume_array()?,
            ))),
            CqlType::Float32 => Ok(Value::Float(marshal::unmarshal_f32(
                buffer.consume_array()?,
            ))),
            CqlType::Float64 => Ok(Value::Double(marshal::unmarshal_f64(
                buffer.consume_array()?,
            ))),
            CqlType::Boolean => Ok(Value::Bool(marshal::unmarshal_bool(
                buffer.consume_array()?,
            ))),
            CqlType::Blob => Ok(Value::Blob(Cow::Borrowed(buffer.take_residual()))),
            CqlType::Text => decode_utf8(buffer.take_residual()).map(Value::Text),
            CqlType::Ascii => decode_ascii(buffer.take_residual()).map(Value::Text),
            CqlType::Uuid => decode_uuid(buffer.take_residual()).map(Value::Uuid),
            CqlType::Inet => decode_inet(buffer.take_residual()).map(Value::Inet),
            CqlType::Timestamp => Ok(Value::Timestamp(marshal::unmarshal_i64(
                buffer.consume_array()?,
            ))),
            CqlType::Varint => Ok(Value::Varint(marshal::unmarshal_varint(
                buffer.take_residual(),
            )?)),
            CqlType::Decimal => {
                let scale = marshal::unmarshal_i32(buffer.consume_array()?);
                let unscaled = marshal::unmarshal_varint(buffer.take_residual())?;
                Ok(Value::Decimal { unscaled, scale })
            }
            CqlType::Tuple(tuple) => tuple.decode(buffer, protocol_version),
            CqlType::List(list) => list.decode(buffer, protocol_version),
            CqlType::Set(set) => set.decode(buffer, protocol_version),
            CqlType::Map(map) => map.decode(buffer, protocol_version),
        }
    }

    /// Returns true for the composite kinds holding child type references.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            CqlType::Tuple(_) | CqlType::List(_) | CqlType::Set(_) | CqlType::Map(_)
        )
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<Cow<'_, str>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::Encoding(format!("invalid utf-8 in text value: {}", e)))?;
    Ok(Cow::Borrowed(text))
}

fn decode_ascii(bytes: &[u8]) -> Result<Cow<'_, str>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::Encoding(format!("invalid ascii in text value: {}", e)))?;
    if let Some(bad) = text.bytes().find(|b| !b.is_ascii()) {
        return Err(Error::Encoding(format!(
            "non-ascii byte 0x{:02x} in ascii value",
            bad
        )));
    }
    Ok(Cow::Borrowed(text))
}

fn decode_uuid(bytes: &[u8]) -> Result<[u8; 16]> {
    bytes.try_into().map_err(|_| {
        Error::InvalidValue(format!("uuid requires 16 bytes, got {}", bytes.len()))
    })
}

fn decode_inet(bytes: &[u8]) -> Result<IpAddr> {
    match bytes.len() {
        4 => {
            let octets: [u8; 4] = bytes.try_into().unwrap(); // INVARIANT: length checked
            Ok(IpAddr::V4(Ipv4Addr::from(octets)))
        }
        16 => {
            let octets: [u8; 16] = bytes.try_into().unwrap(); // INVARIANT: length checked
            Ok(IpAddr::V6(Ipv6Addr::from(octets)))
        }
        n => Err(Error::InvalidValue(format!(
            "inet address requires 4 or 16 bytes, got {}",
            n
        ))),
    }
}
