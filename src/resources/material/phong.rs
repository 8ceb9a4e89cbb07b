use serde::{Deserialize, Serialize};

/// Blinn-Phong material, as `MeshPhongMaterial`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeshPhongMaterial {
    pub color: u32,
    pub specular: u32,
    pub shininess: f64,
    pub emissive: u32,
    pub wireframe: bool,
}

impl MeshPhongMaterial {
    pub const TYPE: &'static str = "MeshPhongMaterial";

    #[must_use]
    pub fn new(color: u32) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }
}

impl Default for MeshPhongMaterial {
    fn default() -> Self {
        Self {
            color: 0xFF_FFFF,
            specular: 0x11_1111,
            shininess: 30.0,
            emissive: 0x00_0000,
            wireframe: false,
        }
    }
}
