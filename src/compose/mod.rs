//! Composition Engine
//!
//! Structural edits over whole scenes:
//! - [`merge`]: fold one scene into another
//! - [`add_cube`]: insert a box mesh with fresh geometry and material
//! - [`flatten`]: lazy leaf traversal over a node forest
//!
//! The free functions take `Option` operands and report an absent one as
//! [`ThreeError::InvalidArgument`](crate::errors::ThreeError::InvalidArgument).
//! The equivalent [`Scene`](crate::scene::Scene) methods take plain
//! references. Both mutate the target in place and hand it back.

pub mod builder;
pub mod flatten;
pub mod merge;

pub use builder::{DEFAULT_CUBE_COLOR, add_cube};
pub use flatten::{Leaves, flatten};
pub use merge::merge;
