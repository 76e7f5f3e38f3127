//! Scene graph and Transform tests
//!
//! Tests for:
//! - Transform TRS dirty checking and Euler round trips
//! - Hierarchy propagation (parent · local)
//! - Re-parenting and cycle rejection
//! - Skin bindings driving joint matrices

use glam::{Affine3A, Mat4, Quat, Vec3};
use finrig::resources::geometry::Geometry;
use finrig::rig::builder::SkeletonBuilder;
use finrig::rig::skinning::SkinBinder;
use finrig::scene::node::Node;
use finrig::scene::transform::Transform;
use finrig::scene::Scene;
use std::f32::consts::FRAC_PI_2;

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

// ============================================================================
// Transform Unit Tests
// ============================================================================

#[test]
fn transform_default_is_identity() {
    let t = Transform::new();
    assert_eq!(t.position, Vec3::ZERO);
    assert_eq!(t.rotation, Quat::IDENTITY);
    assert_eq!(t.scale, Vec3::ONE);
}

#[test]
fn transform_update_local_matrix_dirty_check() {
    let mut t = Transform::new();

    // First call always recomputes
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.position = Vec3::new(1.0, 2.0, 3.0);
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.rotation = Quat::from_rotation_y(FRAC_PI_2);
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.scale = Vec3::splat(2.0);
    assert!(t.update_local_matrix());

    t.mark_dirty();
    assert!(t.update_local_matrix());
}

#[test]
fn transform_local_matrix_reflects_trs() {
    let mut t = Transform::from_position(Vec3::new(10.0, 20.0, 30.0));
    t.scale = Vec3::splat(2.0);
    t.update_local_matrix();

    let mat = Mat4::from(*t.local_matrix());
    assert!(vec3_approx(mat.w_axis.truncate(), Vec3::new(10.0, 20.0, 30.0)));
}

#[test]
fn transform_euler_roundtrip() {
    let mut t = Transform::new();
    let (x, y, z) = (0.3, 0.7, 1.2);
    t.set_rotation_euler(x, y, z);
    assert!(vec3_approx(t.rotation_euler(), Vec3::new(x, y, z)));
}

// ============================================================================
// Hierarchy
// ============================================================================

#[test]
fn world_matrix_is_parent_times_local() {
    let mut scene = Scene::new();

    let mut parent = Node::new("parent");
    parent.transform.position = Vec3::new(5.0, 0.0, 0.0);
    parent.transform.rotation = Quat::from_rotation_y(FRAC_PI_2);
    parent.transform.scale = Vec3::splat(2.0);
    let parent_handle = scene.add_node(parent);

    let mut child = Node::new("child");
    child.transform.position = Vec3::new(1.0, 0.0, 0.0);
    let child_handle = scene.add_to_parent(child, parent_handle);

    scene.update_matrix_world();

    let parent_node = scene.get_node(parent_handle).unwrap();
    let child_node = scene.get_node(child_handle).unwrap();
    let expected = *parent_node.transform.world_matrix() * *child_node.transform.local_matrix();
    assert_eq!(*child_node.transform.world_matrix(), expected);
    // (1,0,0) scaled by 2 and turned onto -Z, then offset
    assert!(vec3_approx(child_node.transform.world_position(), Vec3::new(5.0, 0.0, -2.0)));
}

#[test]
fn reparenting_moves_node_between_parents() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::new("a"));
    let b = scene.add_node(Node::new("b"));
    let child = scene.add_to_parent(Node::new("child"), a);

    scene.attach(child, b);
    assert_eq!(scene.get_node(child).unwrap().parent(), Some(b));
    assert!(scene.get_node(a).unwrap().children().is_empty());
    assert_eq!(scene.get_node(b).unwrap().children(), &[child]);
}

#[test]
fn attach_rejects_cycles() {
    let mut scene = Scene::new();
    let root = scene.add_node(Node::new("root"));
    let child = scene.add_to_parent(Node::new("child"), root);
    let grandchild = scene.add_to_parent(Node::new("grandchild"), child);

    scene.attach(root, grandchild);
    assert_eq!(scene.get_node(root).unwrap().parent(), None);
    assert_eq!(scene.root_nodes, vec![root]);

    scene.attach(child, child);
    assert_eq!(scene.get_node(child).unwrap().parent(), Some(root));
}

#[test]
fn find_node_by_name_searches_depth_first() {
    let mut scene = Scene::new();
    let root = scene.add_node(Node::new("root"));
    let fin = scene.add_to_parent(Node::new("fin"), root);
    assert_eq!(scene.find_node_by_name("fin"), Some(fin));
    assert_eq!(scene.find_node_by_name("gill"), None);
}

#[test]
fn update_subtree_refreshes_descendants() {
    let mut scene = Scene::new();
    let root = scene.add_node(Node::new("root"));
    let child = scene.add_to_parent(Node::from_position("child", Vec3::Y), root);
    scene.update_matrix_world();

    scene.get_node_mut(root).unwrap().transform.position = Vec3::new(0.0, 0.0, 3.0);
    scene.update_subtree(root);
    let pos = scene.get_node(child).unwrap().transform.world_position();
    assert!(vec3_approx(pos, Vec3::new(0.0, 1.0, 3.0)));
}

// ============================================================================
// Skinned meshes
// ============================================================================

#[test]
fn skin_binding_follows_mesh_node() {
    let mut scene = Scene::new();
    let swimmer = scene.add_node(Node::new("swimmer"));
    let key = scene.add_skeleton(SkeletonBuilder::dolphin().build().unwrap());

    let geometry = Geometry::from_positions(vec![Vec3::new(0.0, -10.0, 0.0), Vec3::new(0.0, 25.0, 0.0)]);
    let mesh = SkinBinder::default()
        .bind("body", geometry, key, scene.skeleton(key).unwrap())
        .unwrap();
    let mesh_node = scene.add_skinned_mesh(mesh, swimmer);

    scene.get_node_mut(swimmer).unwrap().transform.position = Vec3::new(4.0, 0.0, 0.0);
    scene.update_matrix_world();

    let mesh_world = *scene.get_node(mesh_node).unwrap().transform.world_matrix();
    let skeleton = scene.skeleton(key).unwrap();
    let root = skeleton.root_bone().transform.world_matrix();
    assert!(vec3_approx(root.translation.into(), mesh_world.translation.into()));

    // Bind pose: joint matrices cancel out
    for joint in skeleton.joint_matrices() {
        assert!(joint.abs_diff_eq(Mat4::IDENTITY, 1e-4));
    }
    assert_ne!(mesh_world, Affine3A::IDENTITY);
}
