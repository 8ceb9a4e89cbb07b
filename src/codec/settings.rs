//! Codec Settings
//!
//! ```rust,ignore
//! use myth_threejs::codec::{Codec, CodecSettings};
//!
//! // Human-readable output without the metadata header
//! let codec = Codec::with_settings(CodecSettings {
//!     pretty: true,
//!     emit_metadata: false,
//!     ..Default::default()
//! });
//! ```

// ---------------------------------------------------------------------------
// CodecSettings
// ---------------------------------------------------------------------------

/// Behaviour switches for [`Codec`](super::Codec).
///
/// | Field                 | Description                              | Default |
/// |-----------------------|------------------------------------------|---------|
/// | `pretty`              | Indented string output                   | `false` |
/// | `emit_metadata`       | Write the `metadata` header              | `true`  |
/// | `validate_references` | Check node references on decode / encode | `true`  |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecSettings {
    /// Indent string and writer output.
    pub pretty: bool,

    /// Write `{ version, type, generator }` ahead of the scene.
    ///
    /// Decoding accepts documents with or without the header either way.
    pub emit_metadata: bool,

    /// Fail with [`ThreeError::DanglingReference`](crate::errors::ThreeError::DanglingReference)
    /// when a node references a geometry or material missing from the scene.
    pub validate_references: bool,
}

impl Default for CodecSettings {
    fn default() -> Self {
        Self {
            pretty: false,
            emit_metadata: true,
            validate_references: true,
        }
    }
}
