#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

//! three.js Object JSON scene graph for the Myth engine.
//!
//! - [`resources`]: geometries, materials and their identifiers
//! - [`scene`]: the node tree and the [`Scene`] aggregate
//! - [`codec`]: polymorphic JSON decode / encode via a [`TypeRegistry`]
//! - [`compose`]: merge, add-cube and leaf flattening

pub mod codec;
pub mod compose;
pub mod errors;
pub mod resources;
pub mod scene;

pub use codec::{Codec, CodecSettings, TypeRegistry};
pub use compose::{add_cube, flatten, merge};
pub use errors::{Result, ThreeError};
pub use resources::primitives::*;
pub use resources::{
    CustomGeometry, CustomMaterial, EntityId, Geometry, GeometryData, GeometryShape, Material,
    MaterialData, MaterialSettings, MeshBasicMaterial, MeshPhongMaterial, MeshStandardMaterial,
    Side,
};
pub use scene::{Coordinate, Node, NodeKind, Scene};
