// Static drive data model: node table, invariants, breadcrumb derivation.

pub mod drive;
pub mod fixture;
pub mod node;

pub use drive::{Crumb, Drive};
pub use node::{Node, NodeId, NodeKind};
