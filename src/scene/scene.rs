use slotmap::SlotMap;

use crate::resources::mesh::SkinnedMesh;
use crate::scene::node::Node;
use crate::scene::skeleton::{SkinBinding, Skeleton};
use crate::scene::transform_system;
use crate::scene::{MeshKey, NodeHandle, SkeletonKey};

/// Scene graph.
///
/// Pure data: node hierarchy plus component pools. Lights, cameras and GPU
/// resources belong to the external renderer and are not stored here.
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    // ==== Component pools ====
    pub meshes: SlotMap<MeshKey, SkinnedMesh>,
    pub skeletons: SlotMap<SkeletonKey, Skeleton>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            meshes: SlotMap::with_key(),
            skeletons: SlotMap::with_key(),
        }
    }

    /// Adds a node at the root level.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Adds a node as the last child of `parent`.
    pub fn add_to_parent(&mut self, child: Node, parent: NodeHandle) -> NodeHandle {
        let handle = self.nodes.insert(child);
        self.attach(handle, parent);
        handle
    }

    /// Re-parents `child` under `parent`, detaching it from its old parent.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if self.is_ancestor(child, parent) {
            log::warn!("Cannot attach a node below its own descendant");
            return;
        }
        if !self.nodes.contains_key(parent) {
            log::error!("Parent node not found during attach!");
            if !self.root_nodes.contains(&child) {
                self.root_nodes.push(child);
            }
            return;
        }

        // 1. Detach from old
        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == child) {
            self.root_nodes.remove(i);
        }

        // 2. Attach to new
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }

        // 3. Update child
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_dirty();
        }
    }

    /// Whether `ancestor` lies on the parent chain of `node`.
    fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(handle) = current {
            if handle == ancestor {
                return true;
            }
            current = self.nodes.get(handle).and_then(|n| n.parent);
        }
        false
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    /// Depth-first search for a node called `name`, starting at the roots.
    #[must_use]
    pub fn find_node_by_name(&self, name: &str) -> Option<NodeHandle> {
        let mut stack: Vec<NodeHandle> = self.root_nodes.iter().rev().copied().collect();
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            if node.name == name {
                return Some(handle);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    // ========================================================================
    // Components
    // ========================================================================

    pub fn add_skeleton(&mut self, skeleton: Skeleton) -> SkeletonKey {
        self.skeletons.insert(skeleton)
    }

    #[must_use]
    pub fn skeleton(&self, key: SkeletonKey) -> Option<&Skeleton> {
        self.skeletons.get(key)
    }

    pub fn skeleton_mut(&mut self, key: SkeletonKey) -> Option<&mut Skeleton> {
        self.skeletons.get_mut(key)
    }

    /// Adds `mesh` on a new node under `parent` and binds the mesh's skeleton
    /// to that node, so the skeleton root follows the node's world matrix.
    pub fn add_skinned_mesh(&mut self, mesh: SkinnedMesh, parent: NodeHandle) -> NodeHandle {
        let mut node = Node::new(&mesh.name);
        node.transform.position = mesh.normalization.offset;
        node.transform.scale = glam::Vec3::splat(mesh.normalization.scale);
        node.skin = Some(SkinBinding {
            skeleton: mesh.skeleton,
        });
        node.mesh = Some(self.meshes.insert(mesh));
        self.add_to_parent(node, parent)
    }

    #[must_use]
    pub fn mesh(&self, key: MeshKey) -> Option<&SkinnedMesh> {
        self.meshes.get(key)
    }

    // ========================================================================
    // Matrix update pipeline
    // ========================================================================

    /// Updates every node's world matrix, then every bound skeleton's bone
    /// and joint matrices. Call once per frame before rendering.
    pub fn update_matrix_world(&mut self) {
        transform_system::update_hierarchy_iterative(&mut self.nodes, &self.root_nodes);

        for node in self.nodes.values() {
            let Some(binding) = &node.skin else {
                continue;
            };
            let Some(skeleton) = self.skeletons.get_mut(binding.skeleton) else {
                continue;
            };

            let world = node.transform.world_matrix;
            skeleton.update_world_matrices(world);

            skeleton.compute_joint_matrices(world.inverse());
        }
    }

    /// Updates the world matrices of one subtree only.
    pub fn update_subtree(&mut self, root: NodeHandle) {
        transform_system::update_subtree(&mut self.nodes, root);
    }
}
