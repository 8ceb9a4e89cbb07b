use crate::compose::flatten::Leaves;
use crate::errors::{EntityCategory, Result, ThreeError};
use crate::resources::id::{EntityId, EntityMap, Identified};
use crate::resources::{Geometry, Material};
use crate::scene::Coordinate;
use crate::scene::node::{Node, NodeKind};

/// Scene aggregate: one root node plus the flat geometry and material
/// collections its subtree refers to.
///
/// Every `geometry_ref` / `material_ref` reachable from the root is expected
/// to resolve inside this scene. [`Scene::attach`] checks this on insertion
/// and [`Scene::validate`] checks the whole tree; edits made through
/// [`Scene::root_mut`] are the caller's responsibility until validated.
#[derive(Debug, Clone)]
pub struct Scene {
    root: Node,
    geometries: EntityMap<Geometry>,
    materials: EntityMap<Material>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates an empty scene whose root is a `Scene` node.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root(Node::new(NodeKind::Scene))
    }

    #[must_use]
    pub fn with_root(root: Node) -> Self {
        Self {
            root,
            geometries: EntityMap::new(),
            materials: EntityMap::new(),
        }
    }

    /// Assembles a scene from decoded parts and checks its references.
    pub fn from_parts(
        root: Node,
        geometries: EntityMap<Geometry>,
        materials: EntityMap<Material>,
    ) -> Result<Self> {
        let scene = Self::from_parts_unchecked(root, geometries, materials);
        scene.validate()?;
        Ok(scene)
    }

    pub(crate) fn from_parts_unchecked(
        root: Node,
        geometries: EntityMap<Geometry>,
        materials: EntityMap<Material>,
    ) -> Self {
        Self {
            root,
            geometries,
            materials,
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.root
    }

    #[inline]
    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    #[inline]
    #[must_use]
    pub fn geometries(&self) -> &EntityMap<Geometry> {
        &self.geometries
    }

    #[inline]
    #[must_use]
    pub fn materials(&self) -> &EntityMap<Material> {
        &self.materials
    }

    // ========================================================================
    // Collection API
    // ========================================================================

    #[must_use]
    pub fn geometry(&self, uuid: &str) -> Option<&Geometry> {
        self.geometries.get(uuid)
    }

    pub fn geometry_mut(&mut self, uuid: &str) -> Option<&mut Geometry> {
        self.geometries.get_mut(uuid)
    }

    #[must_use]
    pub fn material(&self, uuid: &str) -> Option<&Material> {
        self.materials.get(uuid)
    }

    pub fn material_mut(&mut self, uuid: &str) -> Option<&mut Material> {
        self.materials.get_mut(uuid)
    }

    /// Appends `geometry` if its uuid is new.
    ///
    /// Re-adding a known uuid is a no-op that keeps the stored entry and
    /// returns `false`.
    pub fn add_geometry(&mut self, geometry: Geometry) -> bool {
        let uuid = geometry.uuid().clone();
        let added = self.geometries.insert(geometry);
        if !added {
            log::debug!("Geometry {uuid} already present, keeping existing entry");
        }
        added
    }

    /// Appends `material` if its uuid is new. Same contract as
    /// [`Scene::add_geometry`].
    pub fn add_material(&mut self, material: Material) -> bool {
        let uuid = material.uuid().clone();
        let added = self.materials.insert(material);
        if !added {
            log::debug!("Material {uuid} already present, keeping existing entry");
        }
        added
    }

    /// Stores `geometry`, letting it replace an entry with the same uuid.
    pub(crate) fn import_geometry(&mut self, geometry: Geometry) {
        if let Some(previous) = self.geometries.upsert(geometry) {
            log::warn!("Geometry uuid collision on {}, later entry wins", previous.uuid());
        }
    }

    pub(crate) fn import_material(&mut self, material: Material) {
        if let Some(previous) = self.materials.upsert(material) {
            log::warn!("Material uuid collision on {}, later entry wins", previous.uuid());
        }
    }

    // ========================================================================
    // Hierarchy API
    // ========================================================================

    /// Appends `child` under the root node.
    pub fn add_child(&mut self, child: Node) -> Result<()> {
        let root = self.root.uuid().clone();
        self.attach(root.as_str(), child)
    }

    /// Appends `child` under the node with `parent_uuid`.
    ///
    /// Fails with [`ThreeError::NodeNotFound`] for an unknown parent,
    /// [`ThreeError::CycleViolation`] when `child`'s subtree carries the uuid
    /// of the parent or of any of its ancestors, and
    /// [`ThreeError::DanglingReference`] when `child`'s subtree references an
    /// entry missing from this scene.
    pub fn attach(&mut self, parent_uuid: &str, child: Node) -> Result<()> {
        let mut ancestors = Vec::new();
        if !collect_path(&self.root, parent_uuid, &mut ancestors) {
            return Err(ThreeError::NodeNotFound(parent_uuid.to_owned()));
        }
        if let Some(ancestor) = ancestors.iter().find(|a| child.contains_uuid(a.as_str())) {
            return Err(ThreeError::CycleViolation {
                parent: ancestor.to_string(),
                child: child.uuid().to_string(),
            });
        }
        self.check_references(&child)?;

        let parent = self
            .root
            .find_mut(parent_uuid)
            .ok_or_else(|| ThreeError::NodeNotFound(parent_uuid.to_owned()))?;
        parent.add_child(child)?;
        Ok(())
    }

    /// Starts building a node of `kind` to be attached to this scene.
    pub fn build_node(&'_ mut self, kind: NodeKind) -> NodeBuilder<'_> {
        NodeBuilder::new(self, kind)
    }

    #[must_use]
    pub fn find_node(&self, uuid: &str) -> Option<&Node> {
        self.root.find(uuid)
    }

    pub fn find_node_mut(&mut self, uuid: &str) -> Option<&mut Node> {
        self.root.find_mut(uuid)
    }

    /// Number of nodes reachable from the root, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.subtree_len()
    }

    /// Leaf nodes reachable from the root.
    #[must_use]
    pub fn leaves(&self) -> Leaves<'_> {
        self.root.leaves()
    }

    // ========================================================================
    // Invariants
    // ========================================================================

    /// Checks that every reference reachable from the root resolves.
    pub fn validate(&self) -> Result<()> {
        self.check_references(&self.root)
    }

    fn check_references(&self, subtree: &Node) -> Result<()> {
        // Iterative to stay safe on very deep hierarchies.
        let mut stack = vec![subtree];
        while let Some(node) = stack.pop() {
            if let Some(uuid) = &node.geometry_ref
                && !self.geometries.contains(uuid.as_str())
            {
                return Err(dangling(node, EntityCategory::Geometry, uuid));
            }
            if let Some(uuid) = &node.material_ref
                && !self.materials.contains(uuid.as_str())
            {
                return Err(dangling(node, EntityCategory::Material, uuid));
            }
            stack.extend(node.children().iter().rev());
        }
        Ok(())
    }

    pub(crate) fn into_parts(self) -> (Node, EntityMap<Geometry>, EntityMap<Material>) {
        (self.root, self.geometries, self.materials)
    }
}

fn dangling(node: &Node, category: EntityCategory, uuid: &EntityId) -> ThreeError {
    ThreeError::DanglingReference {
        node: node.uuid().to_string(),
        category,
        uuid: uuid.to_string(),
    }
}

/// Records the uuids from `node` down to `target` (inclusive) into `path`.
fn collect_path(node: &Node, target: &str, path: &mut Vec<EntityId>) -> bool {
    path.push(node.uuid().clone());
    if node.uuid() == &target {
        return true;
    }
    for child in node.children() {
        if collect_path(child, target, path) {
            return true;
        }
    }
    path.pop();
    false
}

// ============================================================================
// NodeBuilder
// ============================================================================

/// Chained construction of a node that is attached on [`NodeBuilder::build`].
pub struct NodeBuilder<'a> {
    scene: &'a mut Scene,
    node: Node,
    parent: Option<EntityId>,
}

impl<'a> NodeBuilder<'a> {
    pub fn new(scene: &'a mut Scene, kind: NodeKind) -> Self {
        Self {
            scene,
            node: Node::new(kind),
            parent: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.node.name = name.into();
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Coordinate) -> Self {
        self.node.position = position;
        self
    }

    #[must_use]
    pub fn with_shadows(mut self, cast: bool, receive: bool) -> Self {
        self.node.cast_shadow = cast;
        self.node.receive_shadow = receive;
        self
    }

    /// Stores `geometry` in the scene (if new) and references it.
    #[must_use]
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.node.geometry_ref = Some(geometry.uuid().clone());
        self.scene.add_geometry(geometry);
        self
    }

    /// Stores `material` in the scene (if new) and references it.
    #[must_use]
    pub fn with_material(mut self, material: Material) -> Self {
        self.node.material_ref = Some(material.uuid().clone());
        self.scene.add_material(material);
        self
    }

    /// Attaches below `parent` instead of the root.
    #[must_use]
    pub fn with_parent(mut self, parent: &EntityId) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    /// Attaches the node and returns its uuid.
    pub fn build(self) -> Result<EntityId> {
        let uuid = self.node.uuid().clone();
        match self.parent {
            Some(parent) => self.scene.attach(parent.as_str(), self.node)?,
            None => self.scene.add_child(self.node)?,
        }
        Ok(uuid)
    }
}
