mod basic;
mod phong;
mod standard;

pub use basic::MeshBasicMaterial;
pub use phong::MeshPhongMaterial;
pub use standard::MeshStandardMaterial;

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::errors::Result;
use crate::resources::geometry::to_object;
use crate::resources::id::{EntityId, Identified};

// ============================================================================
// Common settings
// ============================================================================

/// Which faces are drawn. Encoded as three.js side constants (0, 1, 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

impl From<Side> for u8 {
    fn from(side: Side) -> Self {
        match side {
            Side::Front => 0,
            Side::Back => 1,
            Side::Double => 2,
        }
    }
}

impl TryFrom<u8> for Side {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Front),
            1 => Ok(Self::Back),
            2 => Ok(Self::Double),
            other => Err(format!("invalid side constant {other}")),
        }
    }
}

/// Settings shared by every material variant, flattened beside `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialSettings {
    pub name: String,
    pub transparent: bool,
    pub opacity: f64,
    pub side: Side,
    pub depth_test: bool,
    pub depth_write: bool,
    pub visible: bool,
}

impl Default for MaterialSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            transparent: false,
            opacity: 1.0,
            side: Side::Front,
            depth_test: true,
            depth_write: true,
            visible: true,
        }
    }
}

// ============================================================================
// Extension point
// ============================================================================

/// User-defined material variant.
pub trait CustomMaterial: fmt::Debug + Send + Sync + Any {
    /// Discriminator written to `type`. Must be constant for the type.
    fn kind(&self) -> &str;

    /// Variant fields, written beside the common settings.
    fn to_fields(&self) -> Result<Map<String, Value>>;

    fn clone_box(&self) -> Box<dyn CustomMaterial>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ============================================================================
// Material data enum
// ============================================================================

/// Concrete material variant.
///
/// Built-in materials dispatch statically; `Custom` is the dynamic escape
/// hatch for user types.
#[derive(Debug)]
pub enum MaterialData {
    Plain,
    Basic(MeshBasicMaterial),
    Standard(MeshStandardMaterial),
    Phong(MeshPhongMaterial),
    Custom(Box<dyn CustomMaterial>),
}

impl MaterialData {
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Plain => Material::TYPE,
            Self::Basic(_) => MeshBasicMaterial::TYPE,
            Self::Standard(_) => MeshStandardMaterial::TYPE,
            Self::Phong(_) => MeshPhongMaterial::TYPE,
            Self::Custom(m) => m.kind(),
        }
    }

    /// Integer color of the built-in variants.
    #[must_use]
    pub fn color(&self) -> Option<u32> {
        match self {
            Self::Basic(m) => Some(m.color),
            Self::Standard(m) => Some(m.color),
            Self::Phong(m) => Some(m.color),
            Self::Plain | Self::Custom(_) => None,
        }
    }

    pub(crate) fn to_fields(&self) -> Result<Map<String, Value>> {
        match self {
            Self::Plain => Ok(Map::new()),
            Self::Basic(m) => to_object(m),
            Self::Standard(m) => to_object(m),
            Self::Phong(m) => to_object(m),
            Self::Custom(m) => m.to_fields(),
        }
    }
}

impl Clone for MaterialData {
    fn clone(&self) -> Self {
        match self {
            Self::Plain => Self::Plain,
            Self::Basic(m) => Self::Basic(m.clone()),
            Self::Standard(m) => Self::Standard(m.clone()),
            Self::Phong(m) => Self::Phong(m.clone()),
            Self::Custom(m) => Self::Custom(m.clone_box()),
        }
    }
}

// ============================================================================
// Material wrapper
// ============================================================================

/// A material entry of a scene's `materials` array.
///
/// Equality and hashing use the uuid only.
#[derive(Debug, Clone)]
pub struct Material {
    uuid: EntityId,
    pub settings: MaterialSettings,
    data: MaterialData,
}

impl Material {
    /// Tag of the plain base material.
    pub const TYPE: &'static str = "Material";

    #[must_use]
    pub fn new(data: MaterialData) -> Self {
        Self::with_uuid(EntityId::generate(), data)
    }

    /// Creates a material with a caller-supplied uuid (blank means generate).
    #[must_use]
    pub fn with_uuid(uuid: impl Into<EntityId>, data: MaterialData) -> Self {
        Self {
            uuid: uuid.into(),
            settings: MaterialSettings::default(),
            data,
        }
    }

    #[must_use]
    pub fn new_custom<T: CustomMaterial>(custom_material: T) -> Self {
        Self::new(MaterialData::Custom(Box::new(custom_material)))
    }

    #[must_use]
    pub fn new_basic(color: u32) -> Self {
        Self::from(MeshBasicMaterial::new(color))
    }

    #[must_use]
    pub fn new_standard(color: u32) -> Self {
        Self::from(MeshStandardMaterial::new(color))
    }

    #[must_use]
    pub fn new_phong(color: u32) -> Self {
        Self::from(MeshPhongMaterial::new(color))
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
        self.data.kind()
    }

    #[inline]
    #[must_use]
    pub fn data(&self) -> &MaterialData {
        &self.data
    }

    #[must_use]
    pub fn as_custom<T: CustomMaterial>(&self) -> Option<&T> {
        match &self.data {
            MaterialData::Custom(m) => m.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }

    pub fn as_custom_mut<T: CustomMaterial>(&mut self) -> Option<&mut T> {
        match &mut self.data {
            MaterialData::Custom(m) => m.as_any_mut().downcast_mut::<T>(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_basic(&self) -> Option<&MeshBasicMaterial> {
        match &self.data {
            MaterialData::Basic(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_basic_mut(&mut self) -> Option<&mut MeshBasicMaterial> {
        match &mut self.data {
            MaterialData::Basic(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_standard(&self) -> Option<&MeshStandardMaterial> {
        match &self.data {
            MaterialData::Standard(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_standard_mut(&mut self) -> Option<&mut MeshStandardMaterial> {
        match &mut self.data {
            MaterialData::Standard(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_phong(&self) -> Option<&MeshPhongMaterial> {
        match &self.data {
            MaterialData::Phong(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_phong_mut(&mut self) -> Option<&mut MeshPhongMaterial> {
        match &mut self.data {
            MaterialData::Phong(m) => Some(m),
            _ => None,
        }
    }

    /// Wire form: `uuid`, `type`, the common settings and the variant fields.
    pub fn to_value(&self) -> Result<Value> {
        let mut object = self.data.to_fields()?;
        object.extend(to_object(&self.settings)?);
        object.insert("uuid".to_owned(), Value::String(self.uuid.to_string()));
        object.insert("type".to_owned(), Value::String(self.kind().to_owned()));
        Ok(Value::Object(object))
    }
}

impl Identified for Material {
    fn uuid(&self) -> &EntityId {
        &self.uuid
    }
}

impl PartialEq for Material {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl Eq for Material {}

impl Hash for Material {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl Serialize for Material {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl Deref for Material {
    type Target = MaterialData;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

// ============================================================================
// Sugar: concrete material -> Material
// ============================================================================

impl From<MeshBasicMaterial> for Material {
    fn from(data: MeshBasicMaterial) -> Self {
        Material::new(MaterialData::Basic(data))
    }
}

impl From<MeshStandardMaterial> for Material {
    fn from(data: MeshStandardMaterial) -> Self {
        Material::new(MaterialData::Standard(data))
    }
}

impl From<MeshPhongMaterial> for Material {
    fn from(data: MeshPhongMaterial) -> Self {
        Material::new(MaterialData::Phong(data))
    }
}
