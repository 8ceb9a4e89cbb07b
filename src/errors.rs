//! Error Types
//!
//! This module defines the error type shared by the entity model, the codec
//! and the composition tools.
//!
//! # Overview
//!
//! The main error type [`ThreeError`] covers:
//! - Absent or malformed operands (invalid arguments)
//! - Type resolution failures while decoding polymorphic entities
//! - Structural invariant violations (cycles, dangling references, duplicates)
//! - JSON syntax and shape errors
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, ThreeError>`.
//!
//! ```rust,ignore
//! use myth_threejs::errors::{ThreeError, Result};
//!
//! fn load(json: &str) -> Result<Scene> {
//!     Scene::from_json(json)
//! }
//! ```

use std::fmt;

use thiserror::Error;

/// Which entity collection an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityCategory {
    Geometry,
    Material,
    Node,
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Geometry => "geometry",
            Self::Material => "material",
            Self::Node => "node",
        })
    }
}

/// The main error type for scene modelling and serialization.
#[derive(Error, Debug)]
pub enum ThreeError {
    // ========================================================================
    // Argument Errors
    // ========================================================================
    /// A required operand was absent or outside its accepted domain.
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Parameter name as seen by the caller
        name: &'static str,
        /// What was wrong with it
        reason: String,
    },

    // ========================================================================
    // Decode Errors
    // ========================================================================
    /// The `type` discriminator has no registered constructor.
    #[error("Unknown {category} type: {tag:?}")]
    UnknownType {
        category: EntityCategory,
        tag: String,
    },

    /// JSON syntax or field shape error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ========================================================================
    // Structural Invariant Errors
    // ========================================================================
    /// Attaching `child` under `parent` would make a node its own ancestor.
    #[error("Cycle violation: node {child} cannot be attached below {parent}")]
    CycleViolation { parent: String, child: String },

    /// A node references a geometry or material missing from its scene.
    #[error("Node {node} references missing {category} {uuid}")]
    DanglingReference {
        node: String,
        category: EntityCategory,
        uuid: String,
    },

    /// Two entries of one collection share a uuid.
    #[error("Duplicate {category} uuid: {uuid}")]
    DuplicateUuid {
        category: EntityCategory,
        uuid: String,
    },

    /// A node tree is nested deeper than the JSON format can carry back.
    #[error("Node tree depth {depth} exceeds the encodable limit of {limit}")]
    DepthLimitExceeded { depth: usize, limit: usize },

    /// No node with the given uuid is reachable from the scene root.
    #[error("Node not found: {0}")]
    NodeNotFound(String),
}

impl ThreeError {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn absent(name: &'static str) -> Self {
        Self::invalid_argument(name, "value is absent")
    }
}

/// Alias for `Result<T, ThreeError>`.
pub type Result<T> = std::result::Result<T, ThreeError>;
