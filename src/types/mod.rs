//! # Type System
//!
//! The decoder's type model:
//!
//! - `node`: [`CqlType`], the closed set of per-kind decoders, and
//!   [`TypeRef`], the ownership-tagged handle (shared singleton vs. owned
//!   subtree)
//! - `composite`: Tuple/List/Set/Map nodes built from child `TypeRef`s
//! - `value`: [`Value`], the decoded native value tree
//!
//! Type trees are resolved once per distinct column type through
//! [`TypeFactory`](crate::factory::TypeFactory) and then reused for every
//! row; nodes are immutable and shareable across threads.

mod composite;
mod node;
mod value;

pub use composite::{ListType, MapType, SetType, TupleType};
pub use node::{CqlType, TypeRef};
pub use value::Value;
