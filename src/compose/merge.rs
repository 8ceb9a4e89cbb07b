use crate::errors::{Result, ThreeError};
use crate::scene::{Coordinate, Scene};

/// Folds `source` into `target`. See [`Scene::merge`].
///
/// Fails with [`ThreeError::InvalidArgument`] if either scene is absent, in
/// which case nothing is touched.
pub fn merge(
    target: Option<&mut Scene>,
    source: Option<Scene>,
    new_position: Option<Coordinate>,
) -> Result<&mut Scene> {
    let target = target.ok_or_else(|| ThreeError::absent("target"))?;
    let source = source.ok_or_else(|| ThreeError::absent("source"))?;
    target.merge(source, new_position)
}

impl Scene {
    /// Moves the content of `source` into this scene and returns `self`.
    ///
    /// 1. Every geometry and material of `source` is stored here under its
    ///    existing uuid. Nothing is renamed; on a uuid collision the entry
    ///    coming from `source` replaces the one already present.
    /// 2. If the source root has children, each is appended, in order, under
    ///    this scene's root. Otherwise the source root itself is appended.
    /// 3. With `new_position`, every node appended by this call has its
    ///    position overwritten. Nodes already present keep theirs.
    ///
    /// Fails with [`ThreeError::CycleViolation`], leaving both scenes as they
    /// were, when a node to be moved carries this scene's root uuid in its
    /// subtree.
    pub fn merge(
        &mut self,
        source: Scene,
        new_position: Option<Coordinate>,
    ) -> Result<&mut Self> {
        let root_uuid = self.root().uuid().as_str();
        let incoming = if source.root().is_leaf() {
            std::slice::from_ref(source.root())
        } else {
            source.root().children()
        };
        if let Some(node) = incoming.iter().find(|n| n.contains_uuid(root_uuid)) {
            return Err(ThreeError::CycleViolation {
                parent: root_uuid.to_owned(),
                child: node.uuid().to_string(),
            });
        }

        let (mut source_root, geometries, materials) = source.into_parts();

        for geometry in geometries {
            self.import_geometry(geometry);
        }
        for material in materials {
            self.import_material(material);
        }

        let moved = if source_root.is_leaf() {
            vec![source_root]
        } else {
            source_root.take_children()
        };

        log::debug!("Merging {} node(s) into scene {}", moved.len(), self.root().uuid());

        let root = self.root_mut();
        for mut node in moved {
            if let Some(position) = new_position {
                node.position = position;
            }
            root.push_child(node);
        }
        Ok(self)
    }
}
