//! Scene Integration Tests
//!
//! Tests for:
//! - Node: hierarchy, identity, cycle guard, lookup
//! - Scene: collections, attach, reference validation
//! - NodeBuilder: chained construction against a scene

use glam::DVec3;
use myth_threejs::errors::{EntityCategory, ThreeError};
use myth_threejs::resources::{EntityId, Geometry, Material};
use myth_threejs::scene::{Node, NodeKind, Scene};

// ============================================================================
// Node
// ============================================================================

#[test]
fn node_defaults() {
    let node = Node::new(NodeKind::Mesh);
    assert_eq!(node.kind(), &NodeKind::Mesh);
    assert!(node.visible);
    assert!(!node.cast_shadow);
    assert_eq!(node.position, DVec3::ZERO);
    assert!(node.geometry_ref.is_none());
    assert!(node.is_leaf());
}

#[test]
fn node_kind_string_form() {
    assert_eq!(NodeKind::from("Group".to_owned()), NodeKind::Group);
    assert_eq!(NodeKind::from("PointLight".to_owned()), NodeKind::Other("PointLight".to_owned()));
    assert_eq!(NodeKind::Other("PointLight".to_owned()).to_string(), "PointLight");
    assert_eq!(String::from(NodeKind::Object3D), "Object3D");
}

#[test]
fn node_add_child_keeps_order() -> anyhow::Result<()> {
    let mut parent = Node::new_group();
    let a = Node::new_group().with_name("a");
    let b = Node::new_group().with_name("b");
    parent.add_child(a)?;
    parent.add_child(b)?;

    let names: Vec<&str> = parent.children().iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(parent.subtree_len(), 3);
    Ok(())
}

#[test]
fn node_add_child_returns_attached_child() -> anyhow::Result<()> {
    let mut parent = Node::new_group();
    let child = parent.add_child(Node::new_group())?;
    child.add_child(Node::new(NodeKind::Mesh))?;
    assert_eq!(parent.subtree_len(), 3);
    Ok(())
}

#[test]
fn node_add_child_rejects_own_identity() {
    let mut parent = Node::with_uuid("p", NodeKind::Group);
    let mut child = Node::new_group();
    child
        .add_child(Node::with_uuid("P", NodeKind::Mesh))
        .expect("distinct uuids");

    let err = parent.add_child(child).unwrap_err();
    assert!(matches!(err, ThreeError::CycleViolation { .. }));
    assert!(parent.is_leaf());
}

#[test]
fn node_find_and_remove() -> anyhow::Result<()> {
    let mut root = Node::new_group();
    let mut mid = Node::with_uuid("mid", NodeKind::Group);
    mid.add_child(Node::with_uuid("deep", NodeKind::Mesh))?;
    root.add_child(mid)?;

    assert!(root.contains_uuid("DEEP"));
    assert_eq!(root.find("deep").map(Node::kind), Some(&NodeKind::Mesh));
    if let Some(deep) = root.find_mut("deep") {
        deep.name = "found".to_owned();
    }
    assert_eq!(root.find("deep").map(|n| n.name.as_str()), Some("found"));

    let removed = root.remove_child("mid").expect("direct child");
    assert_eq!(removed.subtree_len(), 2);
    assert!(!root.contains_uuid("deep"));
    assert!(root.remove_child("missing").is_none());
    Ok(())
}

#[test]
fn node_identity_by_uuid() {
    let a = Node::with_uuid("n1", NodeKind::Group).with_name("a");
    let b = Node::with_uuid("N1", NodeKind::Mesh).with_name("b");
    assert_eq!(a, b);
}

// ============================================================================
// Scene collections
// ============================================================================

#[test]
fn scene_new_has_scene_root() {
    let scene = Scene::new();
    assert_eq!(scene.root().kind(), &NodeKind::Scene);
    assert!(scene.geometries().is_empty());
    assert!(scene.materials().is_empty());
    assert_eq!(scene.node_count(), 1);
}

#[test]
fn scene_add_geometry_and_lookup() {
    let mut scene = Scene::new();
    let geometry = Geometry::with_uuid("G1", myth_threejs::GeometryShape::Plain);
    assert!(scene.add_geometry(geometry));
    assert!(scene.geometry("g1").is_some());
    assert!(scene.geometry("g2").is_none());
}

#[test]
fn scene_readd_same_uuid_is_noop() {
    let mut scene = Scene::new();
    let first = Material::with_uuid("m1", myth_threejs::MaterialData::Plain);
    let second = Material::new_standard(0x12_3456);
    let second = Material::with_uuid("M1", second.data().clone());

    assert!(scene.add_material(first));
    assert!(!scene.add_material(second));
    assert_eq!(scene.materials().len(), 1);
    assert_eq!(scene.material("m1").map(Material::kind), Some("Material"));
}

#[test]
fn scene_collections_keep_insertion_order() {
    let mut scene = Scene::new();
    for uuid in ["c", "a", "b"] {
        scene.add_geometry(Geometry::with_uuid(uuid, myth_threejs::GeometryShape::Plain));
    }
    let order: Vec<&str> = scene.geometries().iter().map(|g| g.uuid().as_str()).collect();
    assert_eq!(order, ["c", "a", "b"]);
}

// ============================================================================
// Attach & validation
// ============================================================================

#[test]
fn scene_attach_below_nested_parent() -> anyhow::Result<()> {
    let mut scene = Scene::new();
    scene.add_child(Node::with_uuid("group", NodeKind::Group))?;
    scene.attach("group", Node::with_uuid("leaf", NodeKind::Object3D))?;

    let group = scene.find_node("group").expect("attached");
    assert_eq!(group.children().len(), 1);
    assert_eq!(scene.node_count(), 3);
    Ok(())
}

#[test]
fn scene_attach_unknown_parent() {
    let mut scene = Scene::new();
    let err = scene.attach("nowhere", Node::new_group()).unwrap_err();
    assert!(matches!(err, ThreeError::NodeNotFound(uuid) if uuid == "nowhere"));
}

#[test]
fn scene_attach_rejects_ancestor_identity() -> anyhow::Result<()> {
    let mut scene = Scene::new();
    scene.add_child(Node::with_uuid("outer", NodeKind::Group))?;
    scene.attach("outer", Node::with_uuid("inner", NodeKind::Group))?;

    // A subtree carrying the grandparent's uuid.
    let mut intruder = Node::new_group();
    intruder.add_child(Node::with_uuid("outer", NodeKind::Mesh))?;

    let err = scene.attach("inner", intruder).unwrap_err();
    assert!(matches!(err, ThreeError::CycleViolation { parent, .. } if parent == "outer"));
    assert_eq!(scene.node_count(), 3);
    Ok(())
}

#[test]
fn scene_attach_rejects_dangling_reference() {
    let mut scene = Scene::new();
    let mut mesh = Node::new(NodeKind::Mesh);
    mesh.geometry_ref = Some(EntityId::new("ghost"));

    let err = scene.add_child(mesh).unwrap_err();
    match err {
        ThreeError::DanglingReference { category, uuid, .. } => {
            assert_eq!(category, EntityCategory::Geometry);
            assert_eq!(uuid, "ghost");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(scene.root().is_leaf());
}

#[test]
fn scene_validate_catches_edits_through_root_mut() -> anyhow::Result<()> {
    let mut scene = Scene::new();
    let geometry = Geometry::new_box(1.0, 1.0, 1.0);
    let material = Material::new_standard(0xFF_FFFF);
    let mesh = Node::new_mesh(geometry.uuid(), material.uuid());
    scene.add_geometry(geometry);
    scene.add_material(material);
    scene.add_child(mesh)?;
    scene.validate()?;

    let mut stray = Node::new(NodeKind::Mesh);
    stray.material_ref = Some(EntityId::new("missing"));
    scene.root_mut().add_child(stray)?;

    let err = scene.validate().unwrap_err();
    assert!(matches!(
        err,
        ThreeError::DanglingReference { category: EntityCategory::Material, .. }
    ));
    Ok(())
}

// ============================================================================
// NodeBuilder
// ============================================================================

#[test]
fn builder_adds_entities_and_references() -> anyhow::Result<()> {
    let mut scene = Scene::new();
    let geometry = Geometry::new_sphere(2.0);
    let geometry_uuid = geometry.uuid().clone();

    let uuid = scene
        .build_node(NodeKind::Mesh)
        .with_name("ball")
        .with_position(DVec3::new(1.0, 2.0, 3.0))
        .with_geometry(geometry)
        .with_material(Material::new_phong(0x44_AA88))
        .build()?;

    let node = scene.find_node(uuid.as_str()).expect("built node");
    assert_eq!(node.name, "ball");
    assert_eq!(node.position, DVec3::new(1.0, 2.0, 3.0));
    assert_eq!(node.geometry_ref.as_ref(), Some(&geometry_uuid));
    assert_eq!(scene.geometries().len(), 1);
    assert_eq!(scene.materials().len(), 1);
    scene.validate()?;
    Ok(())
}

#[test]
fn builder_with_parent() -> anyhow::Result<()> {
    let mut scene = Scene::new();
    let group = scene.build_node(NodeKind::Group).build()?;
    let child = scene.build_node(NodeKind::Object3D).with_parent(&group).build()?;

    let parent = scene.find_node(group.as_str()).expect("group");
    assert_eq!(parent.children().first().map(Node::uuid), Some(&child));
    Ok(())
}

#[test]
fn scene_leaves() -> anyhow::Result<()> {
    let mut scene = Scene::new();
    let group = scene.build_node(NodeKind::Group).build()?;
    scene.build_node(NodeKind::Object3D).with_parent(&group).build()?;
    scene.build_node(NodeKind::Object3D).with_parent(&group).build()?;
    scene.build_node(NodeKind::Object3D).build()?;

    assert_eq!(scene.leaves().count(), 3);
    assert!(scene.leaves().all(Node::is_leaf));
    Ok(())
}
