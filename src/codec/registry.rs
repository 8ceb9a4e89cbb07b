use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::{EntityCategory, Result, ThreeError};
use crate::resources::primitives::{BoxGeometry, PlaneGeometry, SphereGeometry};
use crate::resources::{
    CustomGeometry, CustomMaterial, Geometry, GeometryShape, Material, MaterialData,
    MeshBasicMaterial, MeshPhongMaterial, MeshStandardMaterial,
};

/// Builds a geometry variant from the fields of its JSON object
/// (everything except `type`, `uuid` and `data`).
pub type GeometryConstructor =
    Box<dyn Fn(&Map<String, Value>) -> Result<GeometryShape> + Send + Sync>;

/// Builds a material variant from the fields of its JSON object
/// (everything except `type` and `uuid`).
pub type MaterialConstructor =
    Box<dyn Fn(&Map<String, Value>) -> Result<MaterialData> + Send + Sync>;

/// Deserializes `T` from an object, defaulting absent fields.
pub fn parse_fields<T: DeserializeOwned>(fields: &Map<String, Value>) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(fields.clone()))?)
}

/// Maps `type` discriminators to variant constructors.
///
/// [`TypeRegistry::default`] knows every built-in variant. New kinds are
/// plugged in with the `register_*` methods; existing variants need no change.
pub struct TypeRegistry {
    geometries: FxHashMap<String, GeometryConstructor>,
    materials: FxHashMap<String, MaterialConstructor>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut geometries: Vec<_> = self.geometry_tags().collect();
        let mut materials: Vec<_> = self.material_tags().collect();
        geometries.sort_unstable();
        materials.sort_unstable();
        f.debug_struct("TypeRegistry")
            .field("geometries", &geometries)
            .field("materials", &materials)
            .finish()
    }
}

impl TypeRegistry {
    /// A registry that resolves nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            geometries: FxHashMap::default(),
            materials: FxHashMap::default(),
        }
    }

    /// A registry with every built-in geometry and material variant.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry
            .register_geometry(Geometry::TYPE, |_| Ok(GeometryShape::Plain))
            .register_geometry(BoxGeometry::TYPE, |f| Ok(GeometryShape::Box(parse_fields(f)?)))
            .register_geometry(SphereGeometry::TYPE, |f| {
                Ok(GeometryShape::Sphere(parse_fields(f)?))
            })
            .register_geometry(PlaneGeometry::TYPE, |f| {
                Ok(GeometryShape::Plane(parse_fields(f)?))
            });
        registry
            .register_material(Material::TYPE, |_| Ok(MaterialData::Plain))
            .register_material(MeshBasicMaterial::TYPE, |f| {
                Ok(MaterialData::Basic(parse_fields(f)?))
            })
            .register_material(MeshStandardMaterial::TYPE, |f| {
                Ok(MaterialData::Standard(parse_fields(f)?))
            })
            .register_material(MeshPhongMaterial::TYPE, |f| {
                Ok(MaterialData::Phong(parse_fields(f)?))
            });
        registry
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Registers (or replaces) the constructor for a geometry tag.
    pub fn register_geometry<F>(&mut self, tag: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn(&Map<String, Value>) -> Result<GeometryShape> + Send + Sync + 'static,
    {
        let tag = tag.into();
        log::debug!("Registering geometry type {tag}");
        if self.geometries.insert(tag.clone(), Box::new(constructor)).is_some() {
            log::warn!("Geometry type {tag} was already registered, constructor replaced");
        }
        self
    }

    /// Registers (or replaces) the constructor for a material tag.
    pub fn register_material<F>(&mut self, tag: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn(&Map<String, Value>) -> Result<MaterialData> + Send + Sync + 'static,
    {
        let tag = tag.into();
        log::debug!("Registering material type {tag}");
        if self.materials.insert(tag.clone(), Box::new(constructor)).is_some() {
            log::warn!("Material type {tag} was already registered, constructor replaced");
        }
        self
    }

    /// Registers `T` under `tag`, deserializing it from the object's fields.
    ///
    /// `tag` should equal what `T::kind` returns so encoded output decodes
    /// back into `T`.
    pub fn register_custom_geometry<T>(&mut self, tag: impl Into<String>) -> &mut Self
    where
        T: CustomGeometry + DeserializeOwned,
    {
        self.register_geometry(tag, |fields| {
            let custom: T = parse_fields(fields)?;
            Ok(GeometryShape::Custom(Box::new(custom)))
        })
    }

    /// Registers `T` under `tag`, deserializing it from the object's fields.
    pub fn register_custom_material<T>(&mut self, tag: impl Into<String>) -> &mut Self
    where
        T: CustomMaterial + DeserializeOwned,
    {
        self.register_material(tag, |fields| {
            let custom: T = parse_fields(fields)?;
            Ok(MaterialData::Custom(Box::new(custom)))
        })
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    #[must_use]
    pub fn has_geometry(&self, tag: &str) -> bool {
        self.geometries.contains_key(tag)
    }

    #[must_use]
    pub fn has_material(&self, tag: &str) -> bool {
        self.materials.contains_key(tag)
    }

    pub fn geometry_tags(&self) -> impl Iterator<Item = &str> {
        self.geometries.keys().map(String::as_str)
    }

    pub fn material_tags(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(String::as_str)
    }

    /// Runs the constructor registered for `tag`.
    ///
    /// An unregistered tag is an [`ThreeError::UnknownType`]; there is no
    /// fallback to the plain geometry.
    pub fn construct_geometry(
        &self,
        tag: &str,
        fields: &Map<String, Value>,
    ) -> Result<GeometryShape> {
        let constructor = self.geometries.get(tag).ok_or_else(|| ThreeError::UnknownType {
            category: EntityCategory::Geometry,
            tag: tag.to_owned(),
        })?;
        constructor(fields)
    }

    /// Runs the constructor registered for `tag`.
    pub fn construct_material(
        &self,
        tag: &str,
        fields: &Map<String, Value>,
    ) -> Result<MaterialData> {
        let constructor = self.materials.get(tag).ok_or_else(|| ThreeError::UnknownType {
            category: EntityCategory::Material,
            tag: tag.to_owned(),
        })?;
        constructor(fields)
    }
}
