use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};

use glam::DVec3;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::errors::{Result, ThreeError};
use crate::resources::id::{EntityId, Identified};
use crate::resources::primitives::{BoxGeometry, PlaneGeometry, SphereGeometry};

/// Vertex payload nested under a geometry's `data` key.
///
/// `vertices` is a flat list of `x, y, z` triplets; `faces` holds vertex
/// indices in face order. `colors`, `normals` and `uvs` are optional and left
/// empty when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeometryData {
    pub cast_shadow: bool,
    pub colors: Vec<u32>,
    pub double_sided: bool,
    pub faces: Vec<u32>,
    pub normals: Vec<f64>,
    pub receive_shadow: bool,
    pub scale: f64,
    pub uvs: Vec<f64>,
    pub vertices: Vec<f64>,
    pub visible: bool,
}

impl Default for GeometryData {
    fn default() -> Self {
        Self {
            cast_shadow: true,
            colors: Vec::new(),
            double_sided: true,
            faces: Vec::new(),
            normals: Vec::new(),
            receive_shadow: false,
            scale: 1.0,
            uvs: Vec::new(),
            vertices: Vec::new(),
            visible: true,
        }
    }
}

// ============================================================================
// Extension point
// ============================================================================

/// User-defined geometry variant.
///
/// Register a constructor for its tag with
/// [`TypeRegistry::register_custom_geometry`](crate::codec::TypeRegistry::register_custom_geometry)
/// to make it decodable.
pub trait CustomGeometry: fmt::Debug + Send + Sync + Any {
    /// Discriminator written to `type`. Must be constant for the type.
    fn kind(&self) -> &str;

    /// Variant fields, written beside `uuid`, `type` and `data`.
    fn to_fields(&self) -> Result<Map<String, Value>>;

    fn clone_box(&self) -> Box<dyn CustomGeometry>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Concrete geometry variant.
///
/// Built-in shapes dispatch statically; `Custom` carries anything registered
/// at runtime.
#[derive(Debug)]
pub enum GeometryShape {
    Plain,
    Box(BoxGeometry),
    Sphere(SphereGeometry),
    Plane(PlaneGeometry),
    Custom(Box<dyn CustomGeometry>),
}

impl GeometryShape {
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Plain => Geometry::TYPE,
            Self::Box(_) => BoxGeometry::TYPE,
            Self::Sphere(_) => SphereGeometry::TYPE,
            Self::Plane(_) => PlaneGeometry::TYPE,
            Self::Custom(g) => g.kind(),
        }
    }

    pub(crate) fn to_fields(&self) -> Result<Map<String, Value>> {
        match self {
            Self::Plain => Ok(Map::new()),
            Self::Box(g) => to_object(g),
            Self::Sphere(g) => to_object(g),
            Self::Plane(g) => to_object(g),
            Self::Custom(g) => g.to_fields(),
        }
    }
}

impl Clone for GeometryShape {
    fn clone(&self) -> Self {
        match self {
            Self::Plain => Self::Plain,
            Self::Box(g) => Self::Box(g.clone()),
            Self::Sphere(g) => Self::Sphere(g.clone()),
            Self::Plane(g) => Self::Plane(g.clone()),
            Self::Custom(g) => Self::Custom(g.clone_box()),
        }
    }
}

pub(crate) fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// A geometry entry of a scene's `geometries` array.
///
/// Equality and hashing use the uuid only.
#[derive(Debug, Clone)]
pub struct Geometry {
    uuid: EntityId,
    pub data: GeometryData,
    /// Per-geometry `materials` entries, carried through unchanged.
    pub materials: Vec<Value>,
    shape: GeometryShape,
}

impl Geometry {
    /// Tag of the plain, shape-less geometry.
    pub const TYPE: &'static str = "Geometry";

    /// Creates a plain geometry with a fresh uuid.
    #[must_use]
    pub fn new() -> Self {
        Self::from_shape(GeometryShape::Plain)
    }

    #[must_use]
    pub fn from_shape(shape: GeometryShape) -> Self {
        Self::with_uuid(EntityId::generate(), shape)
    }

    /// Creates a geometry with a caller-supplied uuid (blank means generate).
    #[must_use]
    pub fn with_uuid(uuid: impl Into<EntityId>, shape: GeometryShape) -> Self {
        Self {
            uuid: uuid.into(),
            data: GeometryData::default(),
            materials: Vec::new(),
            shape,
        }
    }

    #[must_use]
    pub fn new_box(width: f64, height: f64, depth: f64) -> Self {
        Self::from(BoxGeometry::new(width, height, depth))
    }

    #[must_use]
    pub fn new_sphere(radius: f64) -> Self {
        Self::from(SphereGeometry::new(radius))
    }

    #[must_use]
    pub fn new_plane(width: f64, height: f64) -> Self {
        Self::from(PlaneGeometry::new(width, height))
    }

    #[must_use]
    pub fn new_custom<T: CustomGeometry>(custom: T) -> Self {
        Self::from_shape(GeometryShape::Custom(Box::new(custom)))
    }

    #[inline]
    #[must_use]
    pub fn uuid(&self) -> &EntityId {
        &self.uuid
    }

    /// The `type` discriminator of this variant.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &str {
        self.shape.kind()
    }

    #[inline]
    #[must_use]
    pub fn shape(&self) -> &GeometryShape {
        &self.shape
    }

    #[must_use]
    pub fn as_box(&self) -> Option<&BoxGeometry> {
        match &self.shape {
            GeometryShape::Box(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_box_mut(&mut self) -> Option<&mut BoxGeometry> {
        match &mut self.shape {
            GeometryShape::Box(g) => Some(g),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sphere(&self) -> Option<&SphereGeometry> {
        match &self.shape {
            GeometryShape::Sphere(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_sphere_mut(&mut self) -> Option<&mut SphereGeometry> {
        match &mut self.shape {
            GeometryShape::Sphere(g) => Some(g),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_plane(&self) -> Option<&PlaneGeometry> {
        match &self.shape {
            GeometryShape::Plane(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_plane_mut(&mut self) -> Option<&mut PlaneGeometry> {
        match &mut self.shape {
            GeometryShape::Plane(g) => Some(g),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_custom<T: CustomGeometry>(&self) -> Option<&T> {
        match &self.shape {
            GeometryShape::Custom(g) => g.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }

    pub fn as_custom_mut<T: CustomGeometry>(&mut self) -> Option<&mut T> {
        match &mut self.shape {
            GeometryShape::Custom(g) => g.as_any_mut().downcast_mut::<T>(),
            _ => None,
        }
    }

    // ========================================================================
    // Vertex / face mutators
    // ========================================================================

    /// Appends one vertex given as exactly three finite components.
    pub fn add_vertex_triplet(&mut self, triplet: &[f64]) -> Result<()> {
        let &[x, y, z] = triplet else {
            return Err(ThreeError::invalid_argument(
                "triplet",
                format!("expected 3 components, got {}", triplet.len()),
            ));
        };
        self.add_vertex(DVec3::new(x, y, z))
    }

    /// Appends one vertex.
    pub fn add_vertex(&mut self, vertex: DVec3) -> Result<()> {
        if !vertex.is_finite() {
            return Err(ThreeError::invalid_argument(
                "vertex",
                format!("non-finite component in {vertex}"),
            ));
        }
        self.data.vertices.extend_from_slice(&vertex.to_array());
        Ok(())
    }

    /// Appends face-vertex indices.
    pub fn add_face_indices(&mut self, indices: &[u32]) -> Result<()> {
        if indices.is_empty() {
            return Err(ThreeError::invalid_argument("indices", "no indices given"));
        }
        self.data.faces.extend_from_slice(indices);
        Ok(())
    }

    /// Number of complete vertex triplets.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.data.vertices.len() / 3
    }

    #[must_use]
    pub fn vertex(&self, index: usize) -> Option<DVec3> {
        let start = index.checked_mul(3)?;
        let v = self.data.vertices.get(start..start.checked_add(3)?)?;
        Some(DVec3::new(v[0], v[1], v[2]))
    }

    /// Wire form: `uuid`, `type`, `data`, `materials` when present, and the
    /// variant's own fields.
    pub fn to_value(&self) -> Result<Value> {
        let mut object = self.shape.to_fields()?;
        object.insert("uuid".to_owned(), Value::String(self.uuid.to_string()));
        object.insert("type".to_owned(), Value::String(self.kind().to_owned()));
        object.insert("data".to_owned(), serde_json::to_value(&self.data)?);
        if !self.materials.is_empty() {
            object.insert("materials".to_owned(), Value::Array(self.materials.clone()));
        }
        Ok(Value::Object(object))
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new()
    }
}

impl Identified for Geometry {
    fn uuid(&self) -> &EntityId {
        &self.uuid
    }
}

impl PartialEq for Geometry {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl Eq for Geometry {}

impl Hash for Geometry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl Serialize for Geometry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

// ============================================================================
// Conversions from concrete shapes
// ============================================================================

impl From<BoxGeometry> for Geometry {
    fn from(shape: BoxGeometry) -> Self {
        Self::from_shape(GeometryShape::Box(shape))
    }
}

impl From<SphereGeometry> for Geometry {
    fn from(shape: SphereGeometry) -> Self {
        Self::from_shape(GeometryShape::Sphere(shape))
    }
}

impl From<PlaneGeometry> for Geometry {
    fn from(shape: PlaneGeometry) -> Self {
        Self::from_shape(GeometryShape::Plane(shape))
    }
}
