//! Resource Integration Tests
//!
//! Tests for:
//! - EntityId: generation, case-insensitive identity
//! - Geometry: variants, vertex / face mutators, wire form
//! - Material: variants, common settings, wire form
//! - Custom variants: construction and downcasting

use std::any::Any;

use glam::DVec3;
use myth_threejs::errors::{Result, ThreeError};
use myth_threejs::resources::{
    CustomGeometry, EntityId, Geometry, GeometryShape, Material, MaterialData, Side,
};
use myth_threejs::{BoxGeometry, MeshPhongMaterial, SphereGeometry};
use serde_json::{Map, Value, json};

// ============================================================================
// EntityId
// ============================================================================

#[test]
fn entity_id_blank_generates_fresh() {
    let a = EntityId::new("");
    let b = EntityId::new("   ");
    assert!(!a.as_str().is_empty());
    assert_ne!(a, b);
}

#[test]
fn entity_id_keeps_supplied_value() {
    let id = EntityId::new("g1");
    assert_eq!(id.as_str(), "g1");
    assert_eq!(id.to_string(), "g1");
}

#[test]
fn entity_id_is_case_insensitive() {
    assert_eq!(EntityId::new("AB-cd"), EntityId::new("ab-CD"));
    assert_eq!(EntityId::new("AB-cd"), "ab-cd");
}

#[test]
fn entity_id_generated_values_are_distinct() {
    let ids: Vec<EntityId> = (0..32).map(|_| EntityId::generate()).collect();
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn geometry_new_box_kind_and_dimensions() {
    let geometry = Geometry::new_box(2.0, 3.0, 4.0);
    assert_eq!(geometry.kind(), "BoxGeometry");
    let shape = geometry.as_box().expect("box variant");
    assert_eq!(shape.width, 2.0);
    assert_eq!(shape.height, 3.0);
    assert_eq!(shape.depth, 4.0);
    assert_eq!(shape.volume(), 24.0);
    assert!(geometry.as_sphere().is_none());
}

#[test]
fn geometry_kind_per_variant() {
    assert_eq!(Geometry::new().kind(), "Geometry");
    assert_eq!(Geometry::new_sphere(1.0).kind(), "SphereGeometry");
    assert_eq!(Geometry::new_plane(1.0, 1.0).kind(), "PlaneGeometry");
}

#[test]
fn geometry_data_defaults() {
    let geometry = Geometry::new();
    assert!(geometry.data.cast_shadow);
    assert!(geometry.data.double_sided);
    assert!(!geometry.data.receive_shadow);
    assert!(geometry.data.visible);
    assert_eq!(geometry.data.scale, 1.0);
    assert!(geometry.data.vertices.is_empty());
    assert!(geometry.data.faces.is_empty());
}

#[test]
fn geometry_identity_by_uuid_only() {
    let a = Geometry::with_uuid("SHARED", GeometryShape::Plain);
    let b = Geometry::with_uuid("shared", GeometryShape::Box(BoxGeometry::new(9.0, 9.0, 9.0)));
    assert_eq!(a, b);
    assert_ne!(Geometry::new_box(1.0, 1.0, 1.0), Geometry::new_box(1.0, 1.0, 1.0));
}

#[test]
fn geometry_add_vertex_triplet() -> Result<()> {
    let mut geometry = Geometry::new();
    geometry.add_vertex_triplet(&[1.0, 2.0, 3.0])?;
    geometry.add_vertex(DVec3::new(4.0, 5.0, 6.0))?;
    assert_eq!(geometry.vertex_count(), 2);
    assert_eq!(geometry.vertex(1), Some(DVec3::new(4.0, 5.0, 6.0)));
    assert_eq!(geometry.vertex(2), None);
    assert_eq!(geometry.vertex(usize::MAX / 3), None);
    assert_eq!(geometry.vertex(usize::MAX), None);
    assert_eq!(geometry.data.vertices, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    Ok(())
}

#[test]
fn geometry_add_vertex_rejects_wrong_arity() {
    let mut geometry = Geometry::new();
    for bad in [&[][..], &[1.0][..], &[1.0, 2.0][..], &[1.0, 2.0, 3.0, 4.0][..]] {
        let err = geometry.add_vertex_triplet(bad).unwrap_err();
        assert!(matches!(err, ThreeError::InvalidArgument { .. }));
    }
    assert_eq!(geometry.vertex_count(), 0);
}

#[test]
fn geometry_add_vertex_rejects_non_finite() {
    let mut geometry = Geometry::new();
    assert!(geometry.add_vertex_triplet(&[f64::NAN, 0.0, 0.0]).is_err());
    assert!(geometry.add_vertex(DVec3::new(0.0, f64::INFINITY, 0.0)).is_err());
    assert!(geometry.data.vertices.is_empty());
}

#[test]
fn geometry_add_face_indices() {
    let mut geometry = Geometry::new();
    assert!(geometry.add_face_indices(&[0, 1, 2]).is_ok());
    assert!(geometry.add_face_indices(&[2, 3, 0]).is_ok());
    assert_eq!(geometry.data.faces, vec![0, 1, 2, 2, 3, 0]);

    let err = geometry.add_face_indices(&[]).unwrap_err();
    assert!(matches!(err, ThreeError::InvalidArgument { name: "indices", .. }));
}

#[test]
fn geometry_wire_form() -> anyhow::Result<()> {
    let geometry = Geometry::with_uuid("g1", GeometryShape::Box(BoxGeometry::new(2.0, 3.0, 4.0)));
    let value = geometry.to_value()?;
    assert_eq!(value["uuid"], "g1");
    assert_eq!(value["type"], "BoxGeometry");
    assert_eq!(value["width"].as_f64(), Some(2.0));
    assert_eq!(value["widthSegments"], 1);
    assert_eq!(value["data"]["castShadow"], true);
    assert_eq!(value["data"]["scale"].as_f64(), Some(1.0));
    assert!(value["data"]["vertices"].as_array().is_some_and(Vec::is_empty));
    Ok(())
}

#[test]
fn geometry_sphere_defaults() {
    let sphere = SphereGeometry::default();
    assert_eq!(sphere.radius, 1.0);
    assert_eq!(sphere.width_segments, 32);
    assert_eq!(sphere.height_segments, 16);
    assert!((sphere.theta_length - std::f64::consts::PI).abs() < 1e-12);
}

// ============================================================================
// Material
// ============================================================================

#[test]
fn material_standard_defaults() {
    let material = Material::new_standard(0xB2_2222);
    assert_eq!(material.kind(), "MeshStandardMaterial");
    let standard = material.as_standard().expect("standard variant");
    assert_eq!(standard.color, 0xB2_2222);
    assert_eq!(standard.roughness, 1.0);
    assert_eq!(standard.metalness, 0.0);
    assert_eq!(material.color(), Some(0xB2_2222));
}

#[test]
fn material_settings_defaults() {
    let material = Material::new(MaterialData::Plain);
    assert_eq!(material.kind(), "Material");
    assert_eq!(material.color(), None);
    assert_eq!(material.settings.opacity, 1.0);
    assert_eq!(material.settings.side, Side::Front);
    assert!(!material.settings.transparent);
    assert!(material.settings.depth_test);
    assert!(material.settings.depth_write);
}

#[test]
fn material_wire_form() -> anyhow::Result<()> {
    let mut material = Material::from(MeshPhongMaterial::new(0x00_FF00));
    material.settings.side = Side::Double;
    material.settings.name = "leaf".to_owned();

    let value = material.to_value()?;
    assert_eq!(value["type"], "MeshPhongMaterial");
    assert_eq!(value["uuid"], material.uuid().as_str());
    assert_eq!(value["color"], 0x00_FF00);
    assert_eq!(value["specular"], 0x11_1111);
    assert_eq!(value["side"], 2);
    assert_eq!(value["name"], "leaf");
    assert_eq!(value["opacity"].as_f64(), Some(1.0));
    Ok(())
}

#[test]
fn material_mutation_through_accessor() {
    let mut material = Material::new_basic(0xFF_FFFF);
    if let Some(basic) = material.as_basic_mut() {
        basic.wireframe = true;
    }
    assert!(material.as_basic().is_some_and(|m| m.wireframe));
    assert!(material.as_standard().is_none());
}

// ============================================================================
// Custom variants
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Torus {
    radius: f64,
    tube: f64,
}

impl CustomGeometry for Torus {
    fn kind(&self) -> &str {
        "TorusGeometry"
    }

    fn to_fields(&self) -> Result<Map<String, Value>> {
        let mut fields = Map::new();
        fields.insert("radius".to_owned(), json!(self.radius));
        fields.insert("tube".to_owned(), json!(self.tube));
        Ok(fields)
    }

    fn clone_box(&self) -> Box<dyn CustomGeometry> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[test]
fn custom_geometry_reports_own_kind() -> anyhow::Result<()> {
    let geometry = Geometry::new_custom(Torus { radius: 1.0, tube: 0.25 });
    assert_eq!(geometry.kind(), "TorusGeometry");

    let value = geometry.to_value()?;
    assert_eq!(value["type"], "TorusGeometry");
    assert_eq!(value["tube"].as_f64(), Some(0.25));
    Ok(())
}

#[test]
fn custom_geometry_downcast_and_clone() {
    let mut geometry = Geometry::new_custom(Torus { radius: 1.0, tube: 0.25 });
    if let Some(torus) = geometry.as_custom_mut::<Torus>() {
        torus.radius = 3.0;
    }
    let copy = geometry.clone();
    assert_eq!(copy.as_custom::<Torus>().map(|t| t.radius), Some(3.0));
    assert!(Geometry::new_box(1.0, 1.0, 1.0).as_custom::<Torus>().is_none());
}
