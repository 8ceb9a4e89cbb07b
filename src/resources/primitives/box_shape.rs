use serde::{Deserialize, Serialize};

/// Axis-aligned cuboid described by its dimensions, as `BoxGeometry`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoxGeometry {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub width_segments: u32,
    pub height_segments: u32,
    pub depth_segments: u32,
}

impl BoxGeometry {
    pub const TYPE: &'static str = "BoxGeometry";

    #[must_use]
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
            ..Default::default()
        }
    }

    /// Enclosed volume.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.width * self.height * self.depth
    }
}

impl Default for BoxGeometry {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
            width_segments: 1,
            height_segments: 1,
            depth_segments: 1,
        }
    }
}
