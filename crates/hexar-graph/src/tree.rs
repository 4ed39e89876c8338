use hexar_core::{ComponentType, Node, NodeId, Vec2};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;

/// Offset of a new child from its parent's position.
pub const CHILD_OFFSET: Vec2 = Vec2 { x: 50.0, y: 150.0 };
/// Base position for nodes added without a parent.
pub const UNPARENTED_BASE: Vec2 = Vec2 { x: 400.0, y: 200.0 };
/// Upper bound (exclusive) of the random jitter applied to unparented nodes.
pub const UNPARENTED_JITTER: f32 = 100.0;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Label must not be empty")]
    EmptyLabel,
    #[error("Node {child} points at missing parent {parent}")]
    MissingParent { child: NodeId, parent: NodeId },
    #[error("Node {parent} lists {child} as a child but {child} does not point back")]
    ChildMismatch { parent: NodeId, child: NodeId },
    #[error("Node {child} is missing from the children of {parent}")]
    UnlistedChild { parent: NodeId, child: NodeId },
    #[error("Node {0} appears more than once")]
    DuplicateId(NodeId),
}

/// Arena of component nodes keyed by id.
///
/// Parent and child links are stored as ids on both sides and are kept
/// consistent by every mutation.
pub struct TreeModel {
    nodes: HashMap<NodeId, Node>,
    /// Insertion order, also the paint order.
    order: Vec<NodeId>,
    /// Ids that were deleted and must never be issued again.
    retired: HashSet<NodeId>,
    next_serial: u64,
    rng: SmallRng,
}

impl fmt::Debug for TreeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeModel")
            .field("order", &self.order)
            .field("next_serial", &self.next_serial)
            .finish_non_exhaustive()
    }
}

impl Default for TreeModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeModel {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_rng(&mut rand::rng()))
    }

    /// Deterministic placement jitter, for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            nodes: HashMap::new(),
            order: Vec::new(),
            retired: HashSet::new(),
            next_serial: 1,
            rng,
        }
    }

    /// The tree a fresh workspace opens with.
    pub fn demo() -> Self {
        let mut tree = Self::new();
        tree.seed_demo();
        tree
    }

    pub fn seed_demo(&mut self) {
        let entries = [
            ("root", ComponentType::System, "System Root", 400.0, 100.0, None),
            ("motor", ComponentType::Mechanical, "Motor Assembly", 250.0, 250.0, Some("root")),
            ("sensor", ComponentType::Electronics, "Sensor Module", 550.0, 250.0, Some("root")),
            ("encoder", ComponentType::Electrical, "Rotary Encoder", 250.0, 400.0, Some("motor")),
        ];
        for (id, kind, label, x, y, parent) in entries {
            let mut node = Node::new(id, kind, label, Vec2::new(x, y));
            node.parent = parent.map(NodeId::from);
            self.insert(node);
        }
    }

    /// Insert a fully specified node, linking it under its parent.
    ///
    /// The incoming `children` list is ignored; it is rebuilt from parent links.
    /// Returns `false` when the id is already present.
    pub fn insert(&mut self, mut node: Node) -> bool {
        if self.nodes.contains_key(&node.id) {
            tracing::warn!("Ignoring insert of duplicate node {}", node.id);
            return false;
        }
        node.children.clear();
        node.position = node.position.clamp_non_negative();
        if let Some(parent_id) = node.parent.clone() {
            match self.nodes.get_mut(&parent_id) {
                Some(parent) => parent.children.push(node.id.clone()),
                None => {
                    tracing::warn!(
                        "Node {} references unknown parent {}, inserting as root",
                        node.id,
                        parent_id
                    );
                    node.parent = None;
                }
            }
        }
        self.order.push(node.id.clone());
        self.nodes.insert(node.id.clone(), node);
        true
    }

    /// Create a node of `kind`, optionally under `parent`, and return its id.
    ///
    /// An unknown parent id is treated as no parent.
    pub fn add_node(&mut self, kind: ComponentType, parent: Option<&NodeId>) -> NodeId {
        let parent_pos = parent.and_then(|id| self.nodes.get(id)).map(|p| p.position);
        let position = match parent_pos {
            Some(pos) => pos + CHILD_OFFSET,
            None => self.jittered_position(),
        };
        let id = self.fresh_id();
        let mut node = Node::new(id.clone(), kind, kind.default_label(), position);
        node.parent = parent_pos.and(parent.cloned());
        tracing::debug!("add_node {} ({}) under {:?}", id, kind.token(), node.parent);
        self.insert(node);
        id
    }

    /// Create an unparented node at an explicit scene position.
    pub fn add_node_at(&mut self, kind: ComponentType, position: Vec2) -> NodeId {
        let id = self.fresh_id();
        tracing::debug!("add_node_at {} ({}) at {:?}", id, kind.token(), position);
        self.insert(Node::new(id.clone(), kind, kind.default_label(), position));
        id
    }

    /// Remove `id` and its whole descendant closure.
    ///
    /// Returns the removed ids in depth-first pre-order; empty if `id` is unknown.
    pub fn delete_node(&mut self, id: &NodeId) -> Vec<NodeId> {
        if !self.nodes.contains_key(id) {
            return Vec::new();
        }
        let closure = self.descendant_closure(id);
        let doomed: HashSet<&NodeId> = closure.iter().collect();

        for removed in &closure {
            self.nodes.remove(removed);
        }
        self.order.retain(|existing| !doomed.contains(existing));
        for node in self.nodes.values_mut() {
            node.children.retain(|child| !doomed.contains(child));
        }
        self.retired.extend(closure.iter().cloned());

        tracing::debug!("delete_node {} removed {} node(s)", id, closure.len());
        closure
    }

    /// `id` followed by every node reachable through `children`, depth first.
    pub fn descendant_closure(&self, id: &NodeId) -> Vec<NodeId> {
        let mut closure = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![id.clone()];
        while let Some(current) = stack.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            if let Some(node) = self.nodes.get(&current) {
                stack.extend(node.children.iter().rev().cloned());
            }
            closure.push(current);
        }
        closure
    }

    /// Overwrite a node's position, clamped to non-negative coordinates.
    pub fn move_node(&mut self, id: &NodeId, x: f32, y: f32) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.position = Vec2::new(x, y).clamp_non_negative();
            tracing::trace!("move_node {} to {:?}", id, node.position);
        }
    }

    /// Set a node's label to the trimmed `label`.
    ///
    /// Empty or whitespace-only labels are rejected without mutation.
    pub fn rename_node(&mut self, id: &NodeId, label: &str) -> Result<(), TreeError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(TreeError::EmptyLabel);
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.label = trimmed.to_string();
            tracing::debug!("rename_node {} to {:?}", id, node.label);
        }
        Ok(())
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Nodes in insertion (paint) order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn roots(&self) -> impl Iterator<Item = &Node> {
        self.nodes().filter(|node| node.is_root())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Verify the parent/child back-references.
    pub fn check_consistency(&self) -> Result<(), TreeError> {
        let mut seen = HashSet::new();
        for id in &self.order {
            if !seen.insert(id) {
                return Err(TreeError::DuplicateId(id.clone()));
            }
        }
        for node in self.nodes.values() {
            if let Some(parent_id) = &node.parent {
                let Some(parent) = self.nodes.get(parent_id) else {
                    return Err(TreeError::MissingParent {
                        child: node.id.clone(),
                        parent: parent_id.clone(),
                    });
                };
                if !parent.children.contains(&node.id) {
                    return Err(TreeError::UnlistedChild {
                        parent: parent_id.clone(),
                        child: node.id.clone(),
                    });
                }
            }
            for child_id in &node.children {
                let points_back = self
                    .nodes
                    .get(child_id)
                    .is_some_and(|child| child.parent.as_ref() == Some(&node.id));
                if !points_back {
                    return Err(TreeError::ChildMismatch {
                        parent: node.id.clone(),
                        child: child_id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn fresh_id(&mut self) -> NodeId {
        loop {
            let candidate = NodeId(format!("node-{}", self.next_serial));
            self.next_serial += 1;
            if !self.nodes.contains_key(&candidate) && !self.retired.contains(&candidate) {
                return candidate;
            }
        }
    }

    fn jittered_position(&mut self) -> Vec2 {
        let dx = self.rng.random_range(0.0..UNPARENTED_JITTER);
        let dy = self.rng.random_range(0.0..UNPARENTED_JITTER);
        UNPARENTED_BASE + Vec2::new(dx, dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> (TreeModel, NodeId, NodeId, NodeId, NodeId) {
        let mut tree = TreeModel::with_seed(7);
        let root = tree.add_node(ComponentType::System, None);
        let a = tree.add_node(ComponentType::Mechanical, Some(&root));
        let b = tree.add_node(ComponentType::Electrical, Some(&a));
        let c = tree.add_node(ComponentType::Software, Some(&b));
        (tree, root, a, b, c)
    }

    #[test]
    fn test_delete_removes_descendant_closure() {
        let (mut tree, root, a, b, c) = chain();
        let removed = tree.delete_node(&a);
        assert_eq!(removed, vec![a.clone(), b, c]);
        assert_eq!(tree.len(), 1);
        assert!(tree.contains(&root));
        assert!(tree.get(&root).unwrap().children.is_empty());
        tree.check_consistency().unwrap();
    }

    #[test]
    fn test_delete_leaf_prunes_parent_children() {
        let mut tree = TreeModel::demo();
        tree.delete_node(&NodeId::from("sensor"));
        let root = tree.get(&NodeId::from("root")).unwrap();
        assert_eq!(root.children, vec![NodeId::from("motor")]);
        tree.check_consistency().unwrap();
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut tree = TreeModel::demo();
        assert!(tree.delete_node(&NodeId::from("ghost")).is_empty());
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_add_with_parent_links_both_sides() {
        let mut tree = TreeModel::demo();
        let parent = NodeId::from("sensor");
        let id = tree.add_node(ComponentType::Software, Some(&parent));
        let node = tree.get(&id).unwrap();
        assert_eq!(node.parent.as_ref(), Some(&parent));
        assert_eq!(node.position, Vec2::new(600.0, 400.0));
        assert_eq!(node.label, "New Software");
        assert!(tree.get(&parent).unwrap().children.contains(&id));
        tree.check_consistency().unwrap();
    }

    #[test]
    fn test_add_with_unknown_parent_becomes_root() {
        let mut tree = TreeModel::with_seed(1);
        let id = tree.add_node(ComponentType::System, Some(&NodeId::from("missing")));
        assert!(tree.get(&id).unwrap().is_root());
        tree.check_consistency().unwrap();
    }

    #[test]
    fn test_unparented_position_is_jittered_within_bounds() {
        let mut tree = TreeModel::with_seed(42);
        for _ in 0..50 {
            let id = tree.add_node(ComponentType::Electronics, None);
            let pos = tree.get(&id).unwrap().position;
            assert!(pos.x >= 400.0 && pos.x < 500.0, "x out of range: {}", pos.x);
            assert!(pos.y >= 200.0 && pos.y < 300.0, "y out of range: {}", pos.y);
        }
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut tree = TreeModel::with_seed(3);
        let first = tree.add_node(ComponentType::System, None);
        tree.delete_node(&first);
        let second = tree.add_node(ComponentType::System, None);
        assert_ne!(first, second);
    }

    #[test]
    fn test_fresh_id_skips_existing_ids() {
        let mut tree = TreeModel::with_seed(3);
        tree.insert(Node::new("node-1", ComponentType::System, "Taken", Vec2::ZERO));
        let id = tree.add_node(ComponentType::System, None);
        assert_eq!(id, NodeId::from("node-2"));
    }

    #[test]
    fn test_move_clamps_negative() {
        let mut tree = TreeModel::demo();
        let id = NodeId::from("motor");
        tree.move_node(&id, -50.0, -50.0);
        assert_eq!(tree.get(&id).unwrap().position, Vec2::ZERO);
        tree.move_node(&id, 5000.0, -1.0);
        assert_eq!(tree.get(&id).unwrap().position, Vec2::new(5000.0, 0.0));
        assert_eq!(tree.get(&id).unwrap().parent, Some(NodeId::from("root")));
    }

    #[test]
    fn test_rename_trims_and_rejects_blank() {
        let mut tree = TreeModel::demo();
        let id = NodeId::from("encoder");
        tree.rename_node(&id, "  Hall Sensor ").unwrap();
        assert_eq!(tree.get(&id).unwrap().label, "Hall Sensor");
        assert_eq!(tree.rename_node(&id, "   "), Err(TreeError::EmptyLabel));
        assert_eq!(tree.get(&id).unwrap().label, "Hall Sensor");
        assert!(tree.rename_node(&NodeId::from("ghost"), "x").is_ok());
    }

    #[test]
    fn test_demo_tree_shape() {
        let tree = TreeModel::demo();
        let roots: Vec<_> = tree.roots().map(|n| n.id.clone()).collect();
        assert_eq!(roots, vec![NodeId::from("root")]);
        assert_eq!(
            tree.get(&NodeId::from("root")).unwrap().children,
            vec![NodeId::from("motor"), NodeId::from("sensor")]
        );
        tree.check_consistency().unwrap();
    }

    #[test]
    fn test_consistency_detects_broken_link() {
        let mut tree = TreeModel::demo();
        tree.nodes
            .get_mut(&NodeId::from("root"))
            .unwrap()
            .children
            .push(NodeId::from("encoder"));
        assert!(matches!(
            tree.check_consistency(),
            Err(TreeError::ChildMismatch { .. })
        ));
    }
}
