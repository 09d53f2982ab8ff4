//! # cqlwire - Type-Tree Driven CQL Wire Value Decoder
//!
//! `cqlwire` decodes values encoded in the CQL binary wire format into
//! native Rust values, driven by a type tree resolved from an external
//! schema description. It is the read-side core of a driver's row
//! materialization: the schema layer says what a column *is*, this crate
//! turns the column's bytes into what the caller *gets*.
//!
//! ## Quick Start
//!
//! ```
//! use cqlwire::{Buffer, SchemaType, TypeFactory, Value};
//!
//! // Resolve the column's type once, from the schema layer's description.
//! let factory = TypeFactory::new();
//! let column_type = factory
//!     .resolve(&SchemaType::simple("Int32Type"))
//!     .unwrap();
//!
//! // Decode every occurrence of the column with the same resolved tree.
//! let value = column_type
//!     .decode(&mut Buffer::new(&[0x00, 0x00, 0x00, 0x2A]), 4)
//!     .unwrap();
//! assert_eq!(value, Value::Int(42));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  factory: descriptor -> TypeRef (type tree)   │
//! ├──────────────────────────────────────────────┤
//! │  types: CqlType decoders  ->  Value<'a> tree  │
//! ├──────────────────────────────────────────────┤
//! │  wire: Buffer cursor + numeric unmarshaling   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Decoding is synchronous, single-shot and bounded by input length; the
//! bytes are an in-memory span the caller already received. Text and blob
//! values borrow from that span ([`Value::into_owned`] detaches them).
//!
//! ## Ownership of type trees
//!
//! [`TypeRef`] distinguishes shared leaf singletons (static, never
//! released) from owned composite subtrees (released exactly once on
//! drop). Resolved trees and the factory are immutable and `Send + Sync`;
//! only [`Buffer`]s are per-call.
//!
//! ## Protocol versions
//!
//! Collection framing is version-sensitive: counts and element lengths are
//! 2 bytes wide before protocol version 3 and 4 bytes from there on, and
//! tuples always decode with at least version 3 semantics. Callers pass the
//! session's negotiated version to every decode call.

pub mod error;
pub mod factory;
pub mod types;
pub mod wire;

pub use error::{Error, Result};
pub use factory::{SchemaType, TypeDescriptor, TypeFactory};
pub use types::{CqlType, TypeRef, Value};
pub use wire::Buffer;
