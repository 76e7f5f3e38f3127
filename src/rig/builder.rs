use glam::Vec3;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, RigError};
use crate::scene::skeleton::{Bone, Skeleton};

/// Names of the bones in the reference swimmer skeleton.
pub mod bone_names {
    pub const ROOT: &str = "Root";
    pub const UPPER_SPINE: &str = "Upper Spine";
    pub const MIDDLE_SPINE: &str = "Middle Spine";
    pub const LOWER_SPINE: &str = "Lower Spine";
    pub const TAIL_FIN: &str = "Tail Fin";
    pub const LEFT_FLIPPER: &str = "Left Flipper";
    pub const RIGHT_FLIPPER: &str = "Right Flipper";
    pub const DORSAL_FIN: &str = "Dorsal Fin";
}

/// Declarative description of one bone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneSpec {
    pub name: String,
    /// `None` for the root bone.
    #[serde(default)]
    pub parent: Option<String>,
    /// Offset from the parent bone in the bind pose.
    pub offset: Vec3,
}

impl BoneSpec {
    #[must_use]
    pub fn new(name: &str, parent: Option<&str>, offset: Vec3) -> Self {
        Self {
            name: name.to_string(),
            parent: parent.map(str::to_string),
            offset,
        }
    }
}

/// Builds a [`Skeleton`] from bone declarations.
///
/// Bones keep their declaration order, which becomes their skin index. A
/// parent must be declared before its children.
#[derive(Debug, Clone)]
pub struct SkeletonBuilder {
    name: String,
    specs: Vec<BoneSpec>,
}

impl SkeletonBuilder {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            specs: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_specs(name: &str, specs: Vec<BoneSpec>) -> Self {
        Self {
            name: name.to_string(),
            specs,
        }
    }

    /// Appends a bone.
    #[must_use]
    pub fn bone(mut self, name: &str, parent: Option<&str>, offset: Vec3) -> Self {
        self.specs.push(BoneSpec::new(name, parent, offset));
        self
    }

    #[must_use]
    pub fn specs(&self) -> &[BoneSpec] {
        &self.specs
    }

    /// The reference swimmer layout: a three-segment spine ending in a tail
    /// fin, a dorsal fin on the lower spine and two flippers on the root.
    #[must_use]
    pub fn dolphin() -> Self {
        Self::from_specs("Dolphin", dolphin_specs())
    }

    /// Validates the declarations and assembles the skeleton.
    pub fn build(&self) -> Result<Skeleton> {
        if self.specs.len() < 2 {
            return Err(RigError::InsufficientBones {
                count: self.specs.len(),
            });
        }

        let mut indices: FxHashMap<&str, usize> = FxHashMap::default();
        let mut bones: Vec<Bone> = Vec::with_capacity(self.specs.len());
        let mut root: Option<usize> = None;

        for (index, spec) in self.specs.iter().enumerate() {
            if indices.contains_key(spec.name.as_str()) {
                return Err(RigError::DuplicateBone(spec.name.clone()));
            }

            let parent = match &spec.parent {
                Some(parent_name) => Some(*indices.get(parent_name.as_str()).ok_or_else(|| {
                    RigError::UnknownParent {
                        bone: spec.name.clone(),
                        parent: parent_name.clone(),
                    }
                })?),
                None => {
                    if let Some(first) = root {
                        return Err(RigError::MultipleRoots {
                            first: self.specs[first].name.clone(),
                            second: spec.name.clone(),
                        });
                    }
                    root = Some(index);
                    None
                }
            };

            if let Some(p) = parent {
                bones[p].children.push(index);
            }
            bones.push(Bone::new(&spec.name, index, parent, spec.offset));
            indices.insert(spec.name.as_str(), index);
        }

        // The first declaration can only resolve without a parent, so a root exists.
        let root_index = root.unwrap_or(0);
        debug_assert!(no_cycles(&bones));

        log::debug!("Built skeleton '{}' with {} bones", self.name, bones.len());
        Ok(Skeleton::new(&self.name, bones, root_index))
    }
}

/// Reference bone layout, in skin index order.
#[must_use]
pub fn dolphin_specs() -> Vec<BoneSpec> {
    use self::bone_names::*;

    vec![
        BoneSpec::new(ROOT, None, Vec3::ZERO),
        BoneSpec::new(UPPER_SPINE, Some(ROOT), Vec3::new(-2.5, 0.0, -0.5)),
        BoneSpec::new(MIDDLE_SPINE, Some(UPPER_SPINE), Vec3::new(0.5, 0.0, 0.0)),
        BoneSpec::new(LOWER_SPINE, Some(MIDDLE_SPINE), Vec3::new(4.5, 0.0, 0.0)),
        BoneSpec::new(TAIL_FIN, Some(LOWER_SPINE), Vec3::new(5.5, 0.0, 0.0)),
        BoneSpec::new(LEFT_FLIPPER, Some(ROOT), Vec3::new(-1.5, 0.4, -1.0)),
        BoneSpec::new(RIGHT_FLIPPER, Some(ROOT), Vec3::new(-1.5, -0.4, -1.0)),
        BoneSpec::new(DORSAL_FIN, Some(LOWER_SPINE), Vec3::new(0.0, 0.0, 3.0)),
    ]
}

fn no_cycles(bones: &[Bone]) -> bool {
    bones.iter().all(|bone| {
        let mut seen = FxHashSet::default();
        let mut current = Some(bone.index);
        while let Some(i) = current {
            if !seen.insert(i) {
                return false;
            }
            current = bones[i].parent;
        }
        true
    })
}
