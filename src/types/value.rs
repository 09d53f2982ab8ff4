//! # Decoded Value Representation
//!
//! `Value<'a>` is the native output of every decoder. Text and blob variants
//! borrow directly from the wire span via `Cow`, so decoding a row out of a
//! received frame copies nothing; [`Value::into_owned`] detaches a value
//! from the frame when it must outlive it.
//!
//! | Variant | Rust type | Produced by |
//! |---------|-----------|-------------|
//! | `Null` | - | absent tuple positions |
//! | `Int` / `BigInt` | i32 / i64 | int, bigint, counter |
//! | `Float` / `Double` | f32 / f64 | float, double |
//! | `Bool` | bool | boolean |
//! | `Blob` | Cow<[u8]> | blob |
//! | `Text` | Cow<str> | varchar, text, ascii |
//! | `Uuid` | [u8; 16] | uuid, timeuuid |
//! | `Inet` | IpAddr | inet |
//! | `Timestamp` | i64 | timestamp (ms since Unix epoch, UTC) |
//! | `Varint` | i128 | varint |
//! | `Decimal` | { unscaled, scale } | decimal, `unscaled * 10^(-scale)` |
//! | `Tuple` / `List` / `Set` | Vec<Value> | composites |
//! | `Map` | Vec<(Value, Value)> | maps, in wire order |

use std::borrow::Cow;
use std::net::IpAddr;

/// A decoded native value, borrowing text/blob spans from the wire buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Null,
    Int(i32),
    BigInt(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Blob(Cow<'a, [u8]>),
    Text(Cow<'a, str>),
    Uuid([u8; 16]),
    Inet(IpAddr),
    Timestamp(i64),
    Varint(i128),
    Decimal { unscaled: i128, scale: i32 },
    Tuple(Vec<Value<'a>>),
    List(Vec<Value<'a>>),
    Set(Vec<Value<'a>>),
    Map(Vec<(Value<'a>, Value<'a>)>),
}

impl<'a> Value<'a> {
    /// Returns true if this value is the null placeholder.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short kind name for diagnostics and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::BigInt(_) => "bigint",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Bool(_) => "boolean",
            Value::Blob(_) => "blob",
            Value::Text(_) => "text",
            Value::Uuid(_) => "uuid",
            Value::Inet(_) => "inet",
            Value::Timestamp(_) => "timestamp",
            Value::Varint(_) => "varint",
            Value::Decimal { .. } => "decimal",
            Value::Tuple(_) => "tuple",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
        }
    }

    /// Numeric view of this value, where one exists.
    ///
    /// Decimals are evaluated as `unscaled * 10^(-scale)`; precision beyond
    /// what `f64` carries is lost.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::BigInt(v) => Some(*v as f64),
            Value::Float(v) => Some(*v as f64),
            Value::Double(v) => Some(*v),
            Value::Varint(v) => Some(*v as f64),
            Value::Decimal { unscaled, scale } => {
                let divisor = 10f64.powi(*scale);
                Some(*unscaled as f64 / divisor)
            }
            _ => None,
        }
    }

    /// Clones any borrowed spans, detaching the value from the wire buffer.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::Null => Value::Null,
            Value::Int(v) => Value::Int(v),
            Value::BigInt(v) => Value::BigInt(v),
            Value::Float(v) => Value::Float(v),
            Value::Double(v) => Value::Double(v),
            Value::Bool(v) => Value::Bool(v),
            Value::Blob(b) => Value::Blob(Cow::Owned(b.into_owned())),
            Value::Text(s) => Value::Text(Cow::Owned(s.into_owned())),
            Value::Uuid(u) => Value::Uuid(u),
            Value::Inet(ip) => Value::Inet(ip),
            Value::Timestamp(ms) => Value::Timestamp(ms),
            Value::Varint(v) => Value::Varint(v),
            Value::Decimal { unscaled, scale } => Value::Decimal { unscaled, scale },
            Value::Tuple(items) => Value::Tuple(items.into_iter().map(Value::into_owned).collect()),
            Value::List(items) => Value::List(items.into_iter().map(Value::into_owned).collect()),
            Value::Set(items) => Value::Set(items.into_iter().map(Value::into_owned).collect()),
            Value::Map(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect(),
            ),
        }
    }
}
