//! Transform System
//!
//! Propagates local transforms down the node hierarchy. Kept separate from
//! [`Scene`](crate::scene::Scene) so it only borrows the node storage and the
//! root list, not the whole scene.

use glam::Affine3A;
use slotmap::SlotMap;

use crate::scene::NodeHandle;
use crate::scene::node::Node;

/// Updates the world matrices of every node reachable from `roots`.
///
/// Uses an explicit stack rather than recursion. A node's world matrix is
/// recomputed when its local matrix changed or any ancestor's world matrix did.
pub fn update_hierarchy_iterative(nodes: &mut SlotMap<NodeHandle, Node>, roots: &[NodeHandle]) {
    // (node, parent world matrix, parent changed)
    let mut stack: Vec<(NodeHandle, Affine3A, bool)> = Vec::with_capacity(64);

    for &root_handle in roots.iter().rev() {
        stack.push((root_handle, Affine3A::IDENTITY, false));
    }

    while let Some((node_handle, parent_world_matrix, parent_changed)) = stack.pop() {
        let Some(node) = nodes.get_mut(node_handle) else {
            continue;
        };

        let local_changed = node.transform.update_local_matrix();
        let world_needs_update = local_changed || parent_changed;

        if world_needs_update {
            let new_world = parent_world_matrix * *node.transform.local_matrix();
            node.transform.set_world_matrix(new_world);
        }

        let current_world = node.transform.world_matrix;
        for &child_handle in node.children.iter().rev() {
            stack.push((child_handle, current_world, world_needs_update));
        }
    }
}

/// Forces an update of the subtree rooted at `root_handle`, starting from
/// its parent's current world matrix.
pub fn update_subtree(nodes: &mut SlotMap<NodeHandle, Node>, root_handle: NodeHandle) {
    let Some(node) = nodes.get(root_handle) else {
        return;
    };
    let parent_world = node
        .parent
        .and_then(|parent| nodes.get(parent))
        .map_or(Affine3A::IDENTITY, |p| p.transform.world_matrix);

    let mut stack = vec![(root_handle, parent_world)];
    while let Some((node_handle, parent_world_matrix)) = stack.pop() {
        let Some(node) = nodes.get_mut(node_handle) else {
            continue;
        };
        node.transform.update_local_matrix();
        let world = parent_world_matrix * *node.transform.local_matrix();
        node.transform.set_world_matrix(world);

        for &child_handle in node.children.iter().rev() {
            stack.push((child_handle, world));
        }
    }
}
