use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize};

use crate::compose::flatten::{Leaves, flatten};
use crate::errors::{Result, ThreeError};
use crate::resources::id::EntityId;
use crate::scene::Coordinate;

/// Object type string of a node (`"Mesh"`, `"Group"`, ...).
///
/// Unrecognized three.js object types are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Scene,
    Group,
    Mesh,
    #[default]
    Object3D,
    Other(String),
}

impl NodeKind {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Scene => "Scene",
            Self::Group => "Group",
            Self::Mesh => "Mesh",
            Self::Object3D => "Object3D",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for NodeKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Scene" => Self::Scene,
            "Group" => Self::Group,
            "Mesh" => Self::Mesh,
            "Object3D" => Self::Object3D,
            _ => Self::Other(s),
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_visible() -> bool {
    true
}

fn blank_as_none<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<EntityId>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()).map(EntityId::new))
}

/// A scene graph element.
///
/// # Hierarchy
///
/// A node owns its children, so every non-root node has exactly one parent
/// and the tree cannot contain a cycle by construction. [`Node::add_child`]
/// additionally rejects children that carry the parent's own identity.
///
/// # References
///
/// `geometry_ref` and `material_ref` are uuids resolved against the owning
/// [`Scene`](crate::scene::Scene)'s collections; the node never owns them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(default)]
    uuid: EntityId,
    #[serde(rename = "type", default)]
    kind: NodeKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cast_shadow: bool,
    #[serde(default)]
    pub receive_shadow: bool,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub position: Coordinate,
    #[serde(
        rename = "geometry",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub geometry_ref: Option<EntityId>,
    #[serde(
        rename = "material",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub material_ref: Option<EntityId>,
    #[serde(default)]
    children: Vec<Node>,
}

impl Node {
    /// Creates a node of `kind` with a fresh uuid at the origin.
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self::with_uuid(EntityId::generate(), kind)
    }

    /// Creates a node with a caller-supplied uuid (blank means generate).
    #[must_use]
    pub fn with_uuid(uuid: impl Into<EntityId>, kind: NodeKind) -> Self {
        Self {
            uuid: uuid.into(),
            kind,
            name: String::new(),
            cast_shadow: false,
            receive_shadow: false,
            visible: true,
            position: Coordinate::ZERO,
            geometry_ref: None,
            material_ref: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn new_group() -> Self {
        Self::new(NodeKind::Group)
    }

    /// Creates a mesh node referencing a geometry and a material by uuid.
    #[must_use]
    pub fn new_mesh(geometry: &EntityId, material: &EntityId) -> Self {
        let mut node = Self::new(NodeKind::Mesh);
        node.geometry_ref = Some(geometry.clone());
        node.material_ref = Some(material.clone());
        node
    }

    // === Chained configuration ===

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Coordinate) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_shadows(mut self, cast: bool, receive: bool) -> Self {
        self.cast_shadow = cast;
        self.receive_shadow = receive;
        self
    }

    // === Accessors ===

    #[inline]
    #[must_use]
    pub fn uuid(&self) -> &EntityId {
        &self.uuid
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns a read-only slice of the children.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Children are editable in place; adding goes through [`Node::add_child`].
    #[inline]
    pub fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    // === Hierarchy ===

    /// Appends `child`, returning a reference to it in its new place.
    ///
    /// Fails with [`ThreeError::CycleViolation`] when `child`'s subtree
    /// contains this node's uuid.
    pub fn add_child(&mut self, child: Node) -> Result<&mut Node> {
        if child.contains_uuid(self.uuid.as_str()) {
            return Err(ThreeError::CycleViolation {
                parent: self.uuid.to_string(),
                child: child.uuid.to_string(),
            });
        }
        self.children.push(child);
        let last = self.children.len() - 1;
        Ok(&mut self.children[last])
    }

    /// Appends without the identity check.
    #[inline]
    pub(crate) fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Detaches and returns the direct child with `uuid`.
    pub fn remove_child(&mut self, uuid: &str) -> Option<Node> {
        let index = self.children.iter().position(|c| c.uuid == uuid)?;
        Some(self.children.remove(index))
    }

    /// Detaches all children, preserving their order.
    pub fn take_children(&mut self) -> Vec<Node> {
        std::mem::take(&mut self.children)
    }

    /// Whether this node or any descendant carries `uuid`.
    #[must_use]
    pub fn contains_uuid(&self, uuid: &str) -> bool {
        self.find(uuid).is_some()
    }

    /// Depth-first search of this subtree (self included).
    #[must_use]
    pub fn find(&self, uuid: &str) -> Option<&Node> {
        if self.uuid == uuid {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(uuid))
    }

    pub fn find_mut(&mut self, uuid: &str) -> Option<&mut Node> {
        if self.uuid == uuid {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(uuid))
    }

    /// Number of nodes in this subtree, self included.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_len).sum::<usize>()
    }

    /// Number of levels in this subtree; a leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children.iter().map(|c| (c, level + 1)));
        }
        deepest
    }

    /// Leaf nodes of this subtree; a leaf yields itself.
    #[must_use]
    pub fn leaves(&self) -> Leaves<'_> {
        flatten(std::slice::from_ref(self))
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(NodeKind::Object3D)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}
