//! Scene graph
//!
//! - Node: tree element with owned children and uuid references
//! - Scene: root node plus the geometry and material collections
//! - NodeBuilder: chained node construction against a scene

pub mod node;
pub mod scene;

pub use node::{Node, NodeKind};
pub use scene::{NodeBuilder, Scene};

/// Three-component position. Serialized as `[x, y, z]`.
pub type Coordinate = glam::DVec3;
