use crate::errors::{Result, ThreeError};
use crate::resources::{Geometry, Material};
use crate::scene::{Coordinate, NodeKind, Scene};

/// Firebrick, `#B22222`.
pub const DEFAULT_CUBE_COLOR: u32 = 0xB2_2222;

/// Adds a cube to `scene`. See [`Scene::add_cube`].
///
/// Fails with [`ThreeError::InvalidArgument`] if `scene` is absent.
pub fn add_cube(
    scene: Option<&mut Scene>,
    width: f64,
    height: f64,
    depth: f64,
    position: Option<Coordinate>,
    color: Option<u32>,
) -> Result<&mut Scene> {
    let scene = scene.ok_or_else(|| ThreeError::absent("scene"))?;
    scene.add_cube(width, height, depth, position, color)
}

fn check_dimension(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ThreeError::invalid_argument(
            name,
            format!("expected a finite size, got {value}"),
        ))
    }
}

impl Scene {
    /// Adds a `BoxGeometry`, a `MeshStandardMaterial` and a shadow-casting
    /// `Mesh` node referencing both under the root. Returns `self`.
    ///
    /// All three get fresh uuids. `position` defaults to the origin and
    /// `color` to [`DEFAULT_CUBE_COLOR`].
    pub fn add_cube(
        &mut self,
        width: f64,
        height: f64,
        depth: f64,
        position: Option<Coordinate>,
        color: Option<u32>,
    ) -> Result<&mut Self> {
        check_dimension("width", width)?;
        check_dimension("height", height)?;
        check_dimension("depth", depth)?;

        let geometry = Geometry::new_box(width, height, depth);
        let material = Material::new_standard(color.unwrap_or(DEFAULT_CUBE_COLOR));

        let uuid = self
            .build_node(NodeKind::Mesh)
            .with_shadows(true, true)
            .with_position(position.unwrap_or_default())
            .with_geometry(geometry)
            .with_material(material)
            .build()?;

        log::debug!("Added {width}x{height}x{depth} cube {uuid}");
        Ok(self)
    }
}
