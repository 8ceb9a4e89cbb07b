use serde::{Deserialize, Serialize};

/// Unlit flat-color material, as `MeshBasicMaterial`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeshBasicMaterial {
    pub color: u32,
    pub wireframe: bool,
}

impl MeshBasicMaterial {
    pub const TYPE: &'static str = "MeshBasicMaterial";

    #[must_use]
    pub fn new(color: u32) -> Self {
        Self {
            color,
            wireframe: false,
        }
    }
}

impl Default for MeshBasicMaterial {
    fn default() -> Self {
        Self::new(0xFF_FFFF)
    }
}
