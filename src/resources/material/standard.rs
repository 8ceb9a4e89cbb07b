use serde::{Deserialize, Serialize};

/// Metallic-roughness material, as `MeshStandardMaterial`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeshStandardMaterial {
    /// Base color as `0xRRGGBB`.
    pub color: u32,
    pub roughness: f64,
    pub metalness: f64,
    /// Emissive color as `0xRRGGBB`.
    pub emissive: u32,
    pub wireframe: bool,
}

impl MeshStandardMaterial {
    pub const TYPE: &'static str = "MeshStandardMaterial";

    #[must_use]
    pub fn new(color: u32) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }
}

impl Default for MeshStandardMaterial {
    fn default() -> Self {
        Self {
            color: 0xFF_FFFF,
            roughness: 1.0,
            metalness: 0.0,
            emissive: 0x00_0000,
            wireframe: false,
        }
    }
}
