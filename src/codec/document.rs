use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resources::{EntityMap, Geometry, Material};
use crate::scene::Node;

/// Format version written to the `metadata` header.
pub const FORMAT_VERSION: f64 = 4.5;

/// Document type written to the `metadata` header.
pub const FORMAT_TYPE: &str = "Object";

/// Deepest node tree the codec writes, root counted as level 1.
///
/// Each node level costs two levels of JSON nesting (`{` and `children: [`),
/// and the decoder stops at 128 nested levels.
pub const MAX_NODE_DEPTH: usize = 60;

/// Header identifying the producer of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub version: f64,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub generator: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            kind: FORMAT_TYPE.to_owned(),
            generator: concat!("myth-threejs ", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

/// Incoming document. Entities stay as raw values until the registry
/// resolves their `type`.
#[derive(Debug, Deserialize)]
pub(crate) struct RawDocument {
    #[serde(default)]
    pub metadata: Option<Metadata>,
    pub object: Node,
    #[serde(default)]
    pub geometries: Vec<Value>,
    #[serde(default)]
    pub materials: Vec<Value>,
}

/// Outgoing document, borrowing from the scene.
#[derive(Serialize)]
pub(crate) struct DocumentRef<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    pub geometries: &'a EntityMap<Geometry>,
    pub materials: &'a EntityMap<Material>,
    pub object: &'a Node,
}
