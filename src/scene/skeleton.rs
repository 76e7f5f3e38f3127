use glam::{Affine3A, Mat4, Vec3};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use uuid::Uuid;

use crate::animation::binding::{Channel, Channels};
use crate::resources::BoundingBox;
use crate::scene::SkeletonKey;
use crate::scene::transform::Transform;

/// Component on the scene node that owns a skinned mesh.
///
/// Bones follow the node: joint matrices cancel its current world matrix.
#[derive(Debug, Clone)]
pub struct SkinBinding {
    pub skeleton: SkeletonKey,
}

/// A single joint of a [`Skeleton`].
///
/// Rotation is stored as XYZ Euler angles, the representation external
/// tuning edits one axis at a time. The transform's quaternion is rebuilt
/// from it on every world-matrix update.
#[derive(Debug, Clone)]
pub struct Bone {
    pub name: String,
    pub(crate) index: usize,
    pub(crate) parent: Option<usize>,
    pub(crate) children: SmallVec<[usize; 4]>,

    /// Offset from the parent in the bind pose.
    pub(crate) rest_position: Vec3,
    /// Euler XYZ rotation in radians.
    pub rotation: Vec3,
    pub transform: Transform,

    /// Channels pinned by external tuning; the pose driver leaves them alone.
    pub(crate) overrides: Channels,
}

impl Bone {
    pub(crate) fn new(name: &str, index: usize, parent: Option<usize>, offset: Vec3) -> Self {
        Self {
            name: name.to_string(),
            index,
            parent,
            children: SmallVec::new(),
            rest_position: offset,
            rotation: Vec3::ZERO,
            transform: Transform::from_position(offset),
            overrides: Channels::empty(),
        }
    }

    /// Stable index of this bone inside its skeleton (skin index space).
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn rest_position(&self) -> Vec3 {
        self.rest_position
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    #[must_use]
    pub fn channel(&self, channel: Channel) -> f32 {
        match channel {
            Channel::RotationX => self.rotation.x,
            Channel::RotationY => self.rotation.y,
            Channel::RotationZ => self.rotation.z,
            Channel::PositionX => self.transform.position.x,
            Channel::PositionY => self.transform.position.y,
            Channel::PositionZ => self.transform.position.z,
        }
    }

    pub fn set_channel(&mut self, channel: Channel, value: f32) {
        match channel {
            Channel::RotationX => self.rotation.x = value,
            Channel::RotationY => self.rotation.y = value,
            Channel::RotationZ => self.rotation.z = value,
            Channel::PositionX => self.transform.position.x = value,
            Channel::PositionY => self.transform.position.y = value,
            Channel::PositionZ => self.transform.position.z = value,
        }
    }

    #[inline]
    #[must_use]
    pub fn overrides(&self) -> Channels {
        self.overrides
    }

    #[inline]
    #[must_use]
    pub fn is_overridden(&self, channel: Channel) -> bool {
        self.overrides.contains(channel.flag())
    }

    pub fn set_override(&mut self, channel: Channel, overridden: bool) {
        self.overrides.set(channel.flag(), overridden);
    }

    /// Restores the bind pose and drops every override.
    pub fn reset(&mut self) {
        self.rotation = Vec3::ZERO;
        self.transform.position = self.rest_position;
        self.overrides = Channels::empty();
    }
}

#[derive(Debug, Clone)]
pub struct Skeleton {
    pub id: Uuid,
    pub name: String,

    // Ordered bone list; bones[i] is skin index i.
    // Parents always precede their children.
    bones: Vec<Bone>,
    by_name: FxHashMap<String, usize>,
    root_bone_index: usize,

    // Bind-pose inverses, computed once at construction.
    inverse_bind_matrices: Vec<Affine3A>,

    // Recomputed every frame from the bone world matrices.
    joint_matrices: Vec<Mat4>,
}

impl Skeleton {
    /// Assembles a skeleton from bones that are already in parent-first order.
    ///
    /// Use [`SkeletonBuilder`](crate::rig::SkeletonBuilder) which validates the
    /// hierarchy before calling this.
    pub(crate) fn new(name: &str, bones: Vec<Bone>, root_bone_index: usize) -> Self {
        let by_name = bones
            .iter()
            .map(|bone| (bone.name.clone(), bone.index))
            .collect();
        let count = bones.len();

        let mut skeleton = Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            bones,
            by_name,
            root_bone_index,
            inverse_bind_matrices: vec![Affine3A::IDENTITY; count],
            joint_matrices: vec![Mat4::IDENTITY; count],
        };
        skeleton.calculate_inverses();
        skeleton
    }

    /// Records the current pose, relative to the skeleton's parent, as the bind pose.
    fn calculate_inverses(&mut self) {
        self.update_world_matrices(Affine3A::IDENTITY);
        for (ibm, bone) in self.inverse_bind_matrices.iter_mut().zip(&self.bones) {
            *ibm = bone.transform.world_matrix.inverse();
        }
    }

    // ========================================================================
    // Bone access
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    #[inline]
    pub fn bones_mut(&mut self) -> &mut [Bone] {
        &mut self.bones
    }

    #[inline]
    #[must_use]
    pub fn bone(&self, index: usize) -> Option<&Bone> {
        self.bones.get(index)
    }

    #[inline]
    pub fn bone_mut(&mut self, index: usize) -> Option<&mut Bone> {
        self.bones.get_mut(index)
    }

    /// Index of the bone called `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    #[must_use]
    pub fn bone_by_name(&self, name: &str) -> Option<&Bone> {
        self.find(name).and_then(|i| self.bones.get(i))
    }

    pub fn bone_by_name_mut(&mut self, name: &str) -> Option<&mut Bone> {
        let index = self.find(name)?;
        self.bones.get_mut(index)
    }

    #[inline]
    #[must_use]
    pub fn root_bone(&self) -> &Bone {
        &self.bones[self.root_bone_index]
    }

    #[inline]
    #[must_use]
    pub fn root_bone_index(&self) -> usize {
        self.root_bone_index
    }

    #[inline]
    #[must_use]
    pub fn inverse_bind_matrices(&self) -> &[Affine3A] {
        &self.inverse_bind_matrices
    }

    /// Final skinning matrices, one per bone, in skin index order.
    #[inline]
    #[must_use]
    pub fn joint_matrices(&self) -> &[Mat4] {
        &self.joint_matrices
    }

    /// Puts every bone back into the bind pose.
    pub fn reset_pose(&mut self) {
        for bone in &mut self.bones {
            bone.reset();
        }
    }

    // ========================================================================
    // Per-frame matrices
    // ========================================================================

    /// Propagates bone transforms from `parent_world`, the world matrix of
    /// the node the skeleton hangs under.
    ///
    /// A single forward pass suffices because parents precede children.
    pub fn update_world_matrices(&mut self, parent_world: Affine3A) {
        for i in 0..self.bones.len() {
            let parent_matrix = match self.bones[i].parent {
                Some(p) => self.bones[p].transform.world_matrix,
                None => parent_world,
            };

            let bone = &mut self.bones[i];
            let r = bone.rotation;
            bone.transform.set_rotation_euler(r.x, r.y, r.z);
            bone.transform.update_local_matrix();
            let world = parent_matrix * *bone.transform.local_matrix();
            bone.transform.set_world_matrix(world);
        }
    }

    /// Updates the joint matrices.
    ///
    /// # Arguments
    /// * `root_matrix_inv`: inverse world matrix of the node carrying the
    ///   skinned mesh, bringing the bone transforms back into mesh space
    pub fn compute_joint_matrices(&mut self, root_matrix_inv: Affine3A) {
        for (i, bone) in self.bones.iter().enumerate() {
            let ibm = self.inverse_bind_matrices[i];
            self.joint_matrices[i] = (root_matrix_inv * bone.transform.world_matrix * ibm).into();
        }
    }

    /// Tight world-space bounds of the current bone positions.
    #[must_use]
    pub fn compute_tight_world_bounds(&self) -> Option<BoundingBox> {
        let mut points = self.bones.iter().map(|b| b.transform.world_position());
        let first = points.next()?;
        Some(points.fold(BoundingBox { min: first, max: first }, |bounds, p| {
            bounds.expand_to(p)
        }))
    }
}
