//! Entity resources
//!
//! Data-only definitions referenced from the scene graph by uuid:
//! - EntityId / EntityMap: identifiers and uuid-keyed collections
//! - Geometry: vertex payload plus a concrete shape variant
//! - Material: common settings plus a concrete material variant
//! - primitives: parametric geometry variants (box, sphere, plane)

pub mod id;
pub mod geometry;
pub mod material;
pub mod primitives;

pub use id::{EntityId, EntityMap, Identified};
pub use geometry::{CustomGeometry, Geometry, GeometryData, GeometryShape};
pub use material::{
    CustomMaterial, Material, MaterialData, MaterialSettings, Side,
    MeshBasicMaterial, MeshPhongMaterial, MeshStandardMaterial,
};
