//! three.js Object JSON codec
//!
//! Decoding and encoding of scenes in the three.js Object format:
//!
//! ```json
//! {
//!   "metadata":   { "version": 4.5, "type": "Object", "generator": "..." },
//!   "geometries": [ { "uuid": "...", "type": "BoxGeometry", "width": 1, ... } ],
//!   "materials":  [ { "uuid": "...", "type": "MeshStandardMaterial", ... } ],
//!   "object":     { "uuid": "...", "type": "Scene", "children": [ ... ] }
//! }
//! ```
//!
//! Geometries and materials are polymorphic: their `type` string is resolved
//! through a [`TypeRegistry`] on decode, and written back from the variant's
//! own `kind` on encode.

pub mod document;
pub mod registry;
pub mod settings;

pub use document::{MAX_NODE_DEPTH, Metadata};
pub use registry::{GeometryConstructor, MaterialConstructor, TypeRegistry, parse_fields};
pub use settings::CodecSettings;

use std::io::{Read, Write};

use serde::de::Error as _;
use serde_json::{Map, Value};

use crate::errors::{EntityCategory, Result, ThreeError};
use crate::resources::{EntityId, EntityMap, Geometry, GeometryData, Material, MaterialSettings};
use crate::scene::Scene;
use document::{DocumentRef, RawDocument};

/// Scene reader / writer bound to a type registry.
#[derive(Debug, Default)]
pub struct Codec {
    registry: TypeRegistry,
    settings: CodecSettings,
}

impl Codec {
    #[must_use]
    pub fn new(registry: TypeRegistry, settings: CodecSettings) -> Self {
        Self { registry, settings }
    }

    /// Built-in registry with custom settings.
    #[must_use]
    pub fn with_settings(settings: CodecSettings) -> Self {
        Self::new(TypeRegistry::default(), settings)
    }

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    #[inline]
    pub fn registry_mut(&mut self) -> &mut TypeRegistry {
        &mut self.registry
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &CodecSettings {
        &self.settings
    }

    // ========================================================================
    // Decode
    // ========================================================================

    /// Decodes one entry of a `geometries` array.
    pub fn decode_geometry(&self, value: Value) -> Result<Geometry> {
        let (tag, uuid, mut fields) = split_entity(value, EntityCategory::Geometry)?;
        let data = match fields.remove("data") {
            None | Some(Value::Null) => GeometryData::default(),
            Some(raw) => serde_json::from_value(raw)?,
        };
        let materials = match fields.remove("materials") {
            None | Some(Value::Null) => Vec::new(),
            Some(raw) => serde_json::from_value(raw)?,
        };
        log::trace!("Decoding geometry {uuid} as {tag}");
        let shape = self.registry.construct_geometry(&tag, &fields)?;
        if shape.kind() != tag {
            log::warn!("Geometry {uuid}: tag {tag} constructed a {} variant", shape.kind());
        }
        let mut geometry = Geometry::with_uuid(uuid, shape);
        geometry.data = data;
        geometry.materials = materials;
        Ok(geometry)
    }

    /// Decodes one entry of a `materials` array.
    pub fn decode_material(&self, value: Value) -> Result<Material> {
        let (tag, uuid, fields) = split_entity(value, EntityCategory::Material)?;
        log::trace!("Decoding material {uuid} as {tag}");
        let data = self.registry.construct_material(&tag, &fields)?;
        if data.kind() != tag {
            log::warn!("Material {uuid}: tag {tag} constructed a {} variant", data.kind());
        }
        let settings: MaterialSettings = parse_fields(&fields)?;
        let mut material = Material::with_uuid(uuid, data);
        material.settings = settings;
        Ok(material)
    }

    /// Decodes a whole document.
    ///
    /// Fails with [`ThreeError::DuplicateUuid`] when a collection repeats a
    /// uuid, and with [`ThreeError::DanglingReference`] when validation is
    /// enabled and a node reference does not resolve.
    pub fn decode_value(&self, value: Value) -> Result<Scene> {
        let document: RawDocument = serde_json::from_value(value)?;
        if let Some(metadata) = &document.metadata {
            log::trace!(
                "Decoding {} document v{} from {:?}",
                metadata.kind,
                metadata.version,
                metadata.generator
            );
        }

        let mut geometries = EntityMap::new();
        for raw in document.geometries {
            let geometry = self.decode_geometry(raw)?;
            let uuid = geometry.uuid().to_string();
            if !geometries.insert(geometry) {
                return Err(ThreeError::DuplicateUuid {
                    category: EntityCategory::Geometry,
                    uuid,
                });
            }
        }

        let mut materials = EntityMap::new();
        for raw in document.materials {
            let material = self.decode_material(raw)?;
            let uuid = material.uuid().to_string();
            if !materials.insert(material) {
                return Err(ThreeError::DuplicateUuid {
                    category: EntityCategory::Material,
                    uuid,
                });
            }
        }

        if self.settings.validate_references {
            Scene::from_parts(document.object, geometries, materials)
        } else {
            Ok(Scene::from_parts_unchecked(document.object, geometries, materials))
        }
    }

    pub fn decode_str(&self, json: &str) -> Result<Scene> {
        self.decode_value(serde_json::from_str(json)?)
    }

    pub fn decode_reader<R: Read>(&self, reader: R) -> Result<Scene> {
        self.decode_value(serde_json::from_reader(reader)?)
    }

    // ========================================================================
    // Encode
    // ========================================================================

    /// Encodes `scene` into a JSON value.
    ///
    /// Fails with [`ThreeError::DepthLimitExceeded`] when the node tree is
    /// deeper than [`MAX_NODE_DEPTH`], since decoding could not read it back.
    pub fn encode_value(&self, scene: &Scene) -> Result<Value> {
        Ok(serde_json::to_value(self.document(scene)?)?)
    }

    pub fn encode_string(&self, scene: &Scene) -> Result<String> {
        let document = self.document(scene)?;
        let json = if self.settings.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(json)
    }

    pub fn encode_writer<W: Write>(&self, scene: &Scene, writer: W) -> Result<()> {
        let document = self.document(scene)?;
        if self.settings.pretty {
            serde_json::to_writer_pretty(writer, &document)?;
        } else {
            serde_json::to_writer(writer, &document)?;
        }
        Ok(())
    }

    fn document<'a>(&self, scene: &'a Scene) -> Result<DocumentRef<'a>> {
        if self.settings.validate_references {
            scene.validate()?;
        }
        let depth = scene.root().depth();
        if depth > MAX_NODE_DEPTH {
            return Err(ThreeError::DepthLimitExceeded {
                depth,
                limit: MAX_NODE_DEPTH,
            });
        }
        Ok(DocumentRef {
            metadata: self.settings.emit_metadata.then(Metadata::default),
            geometries: scene.geometries(),
            materials: scene.materials(),
            object: scene.root(),
        })
    }
}

/// Splits an entity object into its `type`, its `uuid` and the rest.
fn split_entity(
    value: Value,
    category: EntityCategory,
) -> Result<(String, EntityId, Map<String, Value>)> {
    let Value::Object(mut fields) = value else {
        let message = format!("{category} entry must be a JSON object");
        return Err(serde_json::Error::custom(message).into());
    };
    let tag = match fields.remove("type") {
        Some(Value::String(tag)) => tag,
        Some(other) => {
            return Err(serde_json::Error::custom(format!(
                "{category} `type` must be a string, found {other}"
            ))
            .into());
        }
        None => return Err(serde_json::Error::missing_field("type").into()),
    };
    let uuid = match fields.remove("uuid") {
        Some(raw) => serde_json::from_value(raw)?,
        None => EntityId::generate(),
    };
    Ok((tag, uuid, fields))
}

// ============================================================================
// Scene shortcuts
// ============================================================================

impl Scene {
    /// Decodes a document with the built-in registry and default settings.
    pub fn from_json(json: &str) -> Result<Self> {
        Codec::default().decode_str(json)
    }

    /// Encodes with the built-in registry and default settings.
    pub fn to_json(&self) -> Result<String> {
        Codec::default().encode_string(self)
    }
}
