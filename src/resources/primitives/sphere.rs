use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// UV sphere parameters, as `SphereGeometry`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SphereGeometry {
    pub radius: f64,
    pub width_segments: u32,
    pub height_segments: u32,
    pub phi_start: f64,
    pub phi_length: f64,
    pub theta_start: f64,
    pub theta_length: f64,
}

impl SphereGeometry {
    pub const TYPE: &'static str = "SphereGeometry";

    #[must_use]
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            ..Default::default()
        }
    }
}

impl Default for SphereGeometry {
    fn default() -> Self {
        Self {
            radius: 1.0,
            width_segments: 32,
            height_segments: 16,
            phi_start: 0.0,
            phi_length: PI * 2.0,
            theta_start: 0.0,
            theta_length: PI,
        }
    }
}
