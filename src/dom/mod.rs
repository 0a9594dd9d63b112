//! XML document tree.
//!
//! - Arena storage with index links
//! - quick-xml based parsing
//! - Compact serialization

mod arena;
mod parse;
mod serialize;

pub use arena::{Attribute, ChildrenIter, Document, Node, NodeData, NodeId};
pub use parse::parse;
pub use serialize::{serialize, serialize_node};
