//! Skeleton construction tests
//!
//! Tests for:
//! - Reference layout: bone count, names, parent/child links
//! - Bind-pose world positions
//! - Builder validation errors
//! - Joint matrices in the bind pose

use glam::{Affine3A, Mat4, Vec3};
use finrig::errors::RigError;
use finrig::rig::builder::{BoneSpec, SkeletonBuilder, bone_names};

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

fn mat4_approx(a: &Mat4, b: &Mat4) -> bool {
    a.to_cols_array()
        .iter()
        .zip(b.to_cols_array().iter())
        .all(|(x, y)| approx_eq(*x, *y))
}

// ============================================================================
// Reference layout
// ============================================================================

#[test]
fn dolphin_has_eight_bones_in_skin_order() {
    let skeleton = SkeletonBuilder::dolphin().build().unwrap();
    let names: Vec<&str> = skeleton.bones().iter().map(|b| b.name.as_str()).collect();
    assert_eq!(
        names,
        [
            bone_names::ROOT,
            bone_names::UPPER_SPINE,
            bone_names::MIDDLE_SPINE,
            bone_names::LOWER_SPINE,
            bone_names::TAIL_FIN,
            bone_names::LEFT_FLIPPER,
            bone_names::RIGHT_FLIPPER,
            bone_names::DORSAL_FIN,
        ]
    );
    for (i, bone) in skeleton.bones().iter().enumerate() {
        assert_eq!(bone.index(), i);
    }
}

#[test]
fn dolphin_parent_links() {
    let skeleton = SkeletonBuilder::dolphin().build().unwrap();
    let parent_of = |name: &str| {
        let bone = skeleton.bone_by_name(name).unwrap();
        bone.parent().map(|p| skeleton.bones()[p].name.clone())
    };

    assert_eq!(parent_of(bone_names::ROOT), None);
    assert_eq!(parent_of(bone_names::UPPER_SPINE).as_deref(), Some(bone_names::ROOT));
    assert_eq!(parent_of(bone_names::MIDDLE_SPINE).as_deref(), Some(bone_names::UPPER_SPINE));
    assert_eq!(parent_of(bone_names::LOWER_SPINE).as_deref(), Some(bone_names::MIDDLE_SPINE));
    assert_eq!(parent_of(bone_names::TAIL_FIN).as_deref(), Some(bone_names::LOWER_SPINE));
    assert_eq!(parent_of(bone_names::LEFT_FLIPPER).as_deref(), Some(bone_names::ROOT));
    assert_eq!(parent_of(bone_names::RIGHT_FLIPPER).as_deref(), Some(bone_names::ROOT));
    assert_eq!(parent_of(bone_names::DORSAL_FIN).as_deref(), Some(bone_names::LOWER_SPINE));

    assert_eq!(skeleton.root_bone_index(), 0);
    assert_eq!(skeleton.root_bone().children(), &[1, 5, 6]);
    assert_eq!(skeleton.bones()[3].children(), &[4, 7]);
}

#[test]
fn dolphin_bind_pose_world_positions() {
    let mut skeleton = SkeletonBuilder::dolphin().build().unwrap();
    skeleton.update_world_matrices(Affine3A::IDENTITY);

    let world = |name: &str| skeleton.bone_by_name(name).unwrap().transform.world_position();
    assert!(vec3_approx(world(bone_names::ROOT), Vec3::ZERO));
    assert!(vec3_approx(world(bone_names::UPPER_SPINE), Vec3::new(-2.5, 0.0, -0.5)));
    assert!(vec3_approx(world(bone_names::MIDDLE_SPINE), Vec3::new(-2.0, 0.0, -0.5)));
    assert!(vec3_approx(world(bone_names::LOWER_SPINE), Vec3::new(2.5, 0.0, -0.5)));
    assert!(vec3_approx(world(bone_names::TAIL_FIN), Vec3::new(8.0, 0.0, -0.5)));
    assert!(vec3_approx(world(bone_names::LEFT_FLIPPER), Vec3::new(-1.5, 0.4, -1.0)));
    assert!(vec3_approx(world(bone_names::RIGHT_FLIPPER), Vec3::new(-1.5, -0.4, -1.0)));
    assert!(vec3_approx(world(bone_names::DORSAL_FIN), Vec3::new(2.5, 0.0, 2.5)));
}

#[test]
fn builder_is_deterministic() {
    let a = SkeletonBuilder::dolphin().build().unwrap();
    let b = SkeletonBuilder::dolphin().build().unwrap();
    assert_eq!(a.len(), b.len());
    for (x, y) in a.bones().iter().zip(b.bones()) {
        assert_eq!(x.name, y.name);
        assert_eq!(x.parent(), y.parent());
        assert_eq!(x.rest_position(), y.rest_position());
    }
    assert_eq!(a.inverse_bind_matrices(), b.inverse_bind_matrices());
    // Ids are per instance
    assert_ne!(a.id, b.id);
}

#[test]
fn bind_pose_joint_matrices_are_identity() {
    let mut skeleton = SkeletonBuilder::dolphin().build().unwrap();
    let mesh_world = Affine3A::from_translation(Vec3::new(3.0, -1.0, 4.0));
    skeleton.update_world_matrices(mesh_world);
    skeleton.compute_joint_matrices(mesh_world.inverse());

    for joint in skeleton.joint_matrices() {
        assert!(mat4_approx(joint, &Mat4::IDENTITY));
    }
}

#[test]
fn rotating_a_spine_bone_moves_its_descendants() {
    let mut skeleton = SkeletonBuilder::dolphin().build().unwrap();
    skeleton.bone_by_name_mut(bone_names::MIDDLE_SPINE).unwrap().rotation.y = std::f32::consts::FRAC_PI_2;
    skeleton.update_world_matrices(Affine3A::IDENTITY);

    // Lower Spine sits 4.5 along the Middle Spine's local X, now rotated onto -Z
    let lower = skeleton.bone_by_name(bone_names::LOWER_SPINE).unwrap().transform.world_position();
    assert!(vec3_approx(lower, Vec3::new(-2.0, 0.0, -5.0)));

    // Flippers hang off the root and do not move
    let left = skeleton.bone_by_name(bone_names::LEFT_FLIPPER).unwrap().transform.world_position();
    assert!(vec3_approx(left, Vec3::new(-1.5, 0.4, -1.0)));
}

#[test]
fn reset_pose_restores_rest_transforms() {
    let mut skeleton = SkeletonBuilder::dolphin().build().unwrap();
    let bone = skeleton.bone_by_name_mut(bone_names::TAIL_FIN).unwrap();
    bone.rotation.x = 0.5;
    bone.transform.position.y = 2.0;

    skeleton.reset_pose();
    let bone = skeleton.bone_by_name(bone_names::TAIL_FIN).unwrap();
    assert_eq!(bone.rotation, Vec3::ZERO);
    assert_eq!(bone.position(), bone.rest_position());
}

#[test]
fn tight_bounds_cover_every_bone() {
    let skeleton = SkeletonBuilder::dolphin().build().unwrap();
    let bounds = skeleton.compute_tight_world_bounds().unwrap();
    assert!(vec3_approx(bounds.min, Vec3::new(-2.5, -0.4, -1.0)));
    assert!(vec3_approx(bounds.max, Vec3::new(8.0, 0.4, 2.5)));
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn single_bone_is_rejected() {
    let result = SkeletonBuilder::new("Stub").bone("Root", None, Vec3::ZERO).build();
    assert!(matches!(result, Err(RigError::InsufficientBones { count: 1 })));
}

#[test]
fn unknown_parent_is_rejected() {
    let result = SkeletonBuilder::new("Broken")
        .bone("Root", None, Vec3::ZERO)
        .bone("Fin", Some("Spine"), Vec3::X)
        .build();
    match result {
        Err(RigError::UnknownParent { bone, parent }) => {
            assert_eq!(bone, "Fin");
            assert_eq!(parent, "Spine");
        }
        other => panic!("expected UnknownParent, got {other:?}"),
    }
}

#[test]
fn parent_declared_after_child_is_rejected() {
    let result = SkeletonBuilder::new("Backwards")
        .bone("Root", None, Vec3::ZERO)
        .bone("Tip", Some("Mid"), Vec3::X)
        .bone("Mid", Some("Root"), Vec3::X)
        .build();
    assert!(matches!(result, Err(RigError::UnknownParent { .. })));
}

#[test]
fn duplicate_bone_is_rejected() {
    let result = SkeletonBuilder::new("Twins")
        .bone("Root", None, Vec3::ZERO)
        .bone("Fin", Some("Root"), Vec3::X)
        .bone("Fin", Some("Root"), Vec3::Y)
        .build();
    assert!(matches!(result, Err(RigError::DuplicateBone(name)) if name == "Fin"));
}

#[test]
fn second_root_is_rejected() {
    let result = SkeletonBuilder::from_specs(
        "Forest",
        vec![
            BoneSpec::new("A", None, Vec3::ZERO),
            BoneSpec::new("B", None, Vec3::X),
        ],
    )
    .build();
    assert!(matches!(result, Err(RigError::MultipleRoots { .. })));
}

#[test]
fn custom_layout_builds() -> anyhow::Result<()> {
    let skeleton = SkeletonBuilder::new("Eel")
        .bone("Head", None, Vec3::ZERO)
        .bone("Body", Some("Head"), Vec3::new(0.0, 3.0, 0.0))
        .bone("Tail", Some("Body"), Vec3::new(0.0, 3.0, 0.0))
        .build()?;
    assert_eq!(skeleton.len(), 3);
    assert_eq!(skeleton.find("Tail"), Some(2));
    assert_eq!(skeleton.find("Fin"), None);
    Ok(())
}
