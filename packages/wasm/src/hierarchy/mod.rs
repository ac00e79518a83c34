//! Input hierarchy and its flattened, parent-indexed form.
//!
//! - `HierarchyNode`: the caller-owned nested tree
//! - `LayoutRect`: one entry of the flat pre-order list the engine owns
//! - `flatten`: pre-order conversion from the former to the latter

mod flat;
mod flatten;
mod node;

pub use flat::{LayoutRect, children_of, subtree_end};
pub use flatten::{Flattened, flatten};
pub use node::HierarchyNode;
