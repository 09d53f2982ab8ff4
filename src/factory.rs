//! # Type Factory
//!
//! Resolves external type descriptors into decoder trees.
//!
//! The schema layer describes a column type as a name plus, for composite
//! kinds, an ordered subtype list. [`TypeFactory::resolve`] turns that
//! description into a [`TypeRef`]:
//!
//! - simple names resolve to `TypeRef::Shared` handles into a static
//!   singleton table (one leaf node per kind, built at compile time, shared
//!   by every resolve for the life of the process)
//! - composite names resolve their subtypes recursively and return a
//!   `TypeRef::Owned` subtree
//!
//! Resolution failures release any subtrees already built for the failing
//! composite (owned children recursively, shared singletons not at all)
//! before the error propagates.
//!
//! ## Usage
//!
//! ```
//! use cqlwire::{Buffer, SchemaType, TypeFactory, Value};
//!
//! let factory = TypeFactory::new();
//! let descriptor = SchemaType::composite(
//!     "ListType",
//!     vec![SchemaType::simple("Int32Type")],
//! );
//! let node = factory.resolve(&descriptor).unwrap();
//!
//! // [count=1][len=4][7]
//! let bytes = [0, 0, 0, 1, 0, 0, 0, 4, 0, 0, 0, 7];
//! let value = node.decode(&mut Buffer::new(&bytes), 3).unwrap();
//! assert_eq!(value, Value::List(vec![Value::Int(7)]));
//! ```

use phf::phf_map;
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::types::{CqlType, ListType, MapType, SetType, TupleType, TypeRef};

/// Narrow view of a schema-layer type description.
///
/// `subtypes` is fallible so host wrappers over dynamic schema objects can
/// report a malformed subtype collection as a
/// [`Descriptor`](crate::Error::Descriptor) failure instead of panicking.
/// Simple types report an empty list.
pub trait TypeDescriptor: Sized {
    /// Canonical type name, e.g. `"Int32Type"` or `"ListType"`.
    fn type_name(&self) -> &str;

    /// Ordered child descriptors of a composite kind.
    fn subtypes(&self) -> Result<&[Self]>;
}

/// Plain value implementation of [`TypeDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaType {
    name: String,
    subtypes: Vec<SchemaType>,
}

impl SchemaType {
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subtypes: Vec::new(),
        }
    }

    pub fn composite(name: impl Into<String>, subtypes: Vec<SchemaType>) -> Self {
        Self {
            name: name.into(),
            subtypes,
        }
    }
}

impl TypeDescriptor for SchemaType {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn subtypes(&self) -> Result<&[SchemaType]> {
        Ok(&self.subtypes)
    }
}

static INT32: CqlType = CqlType::Int32;
static INT64: CqlType = CqlType::Int64;
static FLOAT32: CqlType = CqlType::Float32;
static FLOAT64: CqlType = CqlType::Float64;
static BOOLEAN: CqlType = CqlType::Boolean;
static BLOB: CqlType = CqlType::Blob;
static TEXT: CqlType = CqlType::Text;
static ASCII: CqlType = CqlType::Ascii;
static UUID: CqlType = CqlType::Uuid;
static INET: CqlType = CqlType::Inet;
static TIMESTAMP: CqlType = CqlType::Timestamp;
static VARINT: CqlType = CqlType::Varint;
static DECIMAL: CqlType = CqlType::Decimal;

/// Leaf singletons, one node per simple kind, keyed by every canonical name
/// and alias the schema layer reports. Aliases share their kind's node.
static SIMPLE_TYPES: phf::Map<&'static str, &'static CqlType> = phf_map! {
    "Int32Type" => &INT32,
    "LongType" => &INT64,
    "CounterColumnType" => &INT64,
    "FloatType" => &FLOAT32,
    "DoubleType" => &FLOAT64,
    "BooleanType" => &BOOLEAN,
    "BytesType" => &BLOB,
    "UTF8Type" => &TEXT,
    "VarcharType" => &TEXT,
    "AsciiType" => &ASCII,
    "UUIDType" => &UUID,
    "TimeUUIDType" => &UUID,
    "LexicalUUIDType" => &UUID,
    "InetAddressType" => &INET,
    "DateType" => &TIMESTAMP,
    "TimestampType" => &TIMESTAMP,
    "IntegerType" => &VARINT,
    "DecimalType" => &DECIMAL,
};

/// Resolves type descriptors to decoder trees.
///
/// The factory itself is stateless; construct one per session and share it
/// freely. Resolved `TypeRef`s are meant to be obtained once per distinct
/// column type and reused for every row.
#[derive(Debug, Default)]
pub struct TypeFactory;

impl TypeFactory {
    pub fn new() -> Self {
        Self
    }

    /// Resolves `descriptor` into a decoder tree.
    pub fn resolve<D: TypeDescriptor>(&self, descriptor: &D) -> Result<TypeRef> {
        let name = descriptor.type_name();

        if let Some(&node) = SIMPLE_TYPES.get(name) {
            return Ok(TypeRef::Shared(node));
        }

        let node = match name {
            "TupleType" => {
                let fields = self.resolve_subtypes(descriptor)?;
                if fields.is_empty() {
                    return Err(Error::Descriptor(
                        "tuple requires at least one subtype".to_string(),
                    ));
                }
                CqlType::Tuple(TupleType::new(fields))
            }
            "ListType" => {
                let item = self.resolve_only_subtype(descriptor, "list")?;
                CqlType::List(ListType::new(item))
            }
            "SetType" => {
                let item = self.resolve_only_subtype(descriptor, "set")?;
                CqlType::Set(SetType::new(item))
            }
            "MapType" => {
                let subs = descriptor.subtypes()?;
                if subs.len() != 2 {
                    return Err(Error::Descriptor(format!(
                        "map requires exactly two subtypes, got {}",
                        subs.len()
                    )));
                }
                let key = self.resolve(&subs[0])?;
                let value = self.resolve(&subs[1])?;
                CqlType::Map(MapType::new(key, value))
            }
            other => {
                return Err(Error::Descriptor(format!(
                    "unrecognized type name `{}`",
                    other
                )))
            }
        };
        Ok(TypeRef::Owned(Box::new(node)))
    }

    /// Resolves every subtype of `descriptor` in order.
    ///
    /// On a mid-list failure the partially resolved children drop here,
    /// which releases owned subtrees and leaves shared singletons alone.
    fn resolve_subtypes<D: TypeDescriptor>(
        &self,
        descriptor: &D,
    ) -> Result<SmallVec<[TypeRef; 4]>> {
        let subs = descriptor.subtypes()?;
        let mut resolved = SmallVec::with_capacity(subs.len());
        for sub in subs {
            resolved.push(self.resolve(sub)?);
        }
        Ok(resolved)
    }

    fn resolve_only_subtype<D: TypeDescriptor>(
        &self,
        descriptor: &D,
        what: &'static str,
    ) -> Result<TypeRef> {
        let subs = descriptor.subtypes()?;
        if subs.len() != 1 {
            return Err(Error::Descriptor(format!(
                "{} requires exactly one subtype, got {}",
                what,
                subs.len()
            )));
        }
        self.resolve(&subs[0])
    }
}
