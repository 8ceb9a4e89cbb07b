use serde::{Deserialize, Serialize};

/// Flat rectangle in the XY plane, as `PlaneGeometry`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaneGeometry {
    pub width: f64,
    pub height: f64,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl PlaneGeometry {
    pub const TYPE: &'static str = "PlaneGeometry";

    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }
}

impl Default for PlaneGeometry {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            width_segments: 1,
            height_segments: 1,
        }
    }
}
