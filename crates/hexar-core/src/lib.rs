use serde::{Deserialize, Serialize};
use std::fmt;

pub mod error;
pub mod geometry;
pub mod node_type;

pub use error::CoreError;
pub use geometry::{Rect, Vec2};
pub use node_type::ComponentType;

/// Width of a rendered node card in scene units.
pub const NODE_WIDTH: f32 = 160.0;
/// Height of a rendered node card in scene units.
pub const NODE_HEIGHT: f32 = 40.0;

/// Opaque node identifier. The editor never inspects its format.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A component in the tree. Positions are stored in scene space.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub kind: ComponentType,
    pub label: String,
    pub position: Vec2,
    pub parent: Option<NodeId>,
    /// Insertion ordered; mirrors every node whose `parent` is this node.
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn new(
        id: impl Into<NodeId>,
        kind: ComponentType,
        label: impl Into<String>,
        position: Vec2,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
            position,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Bounding box of the node card in scene space.
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, Vec2::new(NODE_WIDTH, NODE_HEIGHT))
    }

    /// Bottom-center point where edges to children start.
    pub fn bottom_anchor(&self) -> Vec2 {
        Vec2::new(self.position.x + NODE_WIDTH * 0.5, self.position.y + NODE_HEIGHT)
    }

    /// Top-center point where the edge from the parent ends.
    pub fn top_anchor(&self) -> Vec2 {
        Vec2::new(self.position.x + NODE_WIDTH * 0.5, self.position.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_anchors() {
        let node = Node::new("a", ComponentType::System, "A", Vec2::new(100.0, 50.0));
        assert_eq!(node.top_anchor(), Vec2::new(180.0, 50.0));
        assert_eq!(node.bottom_anchor(), Vec2::new(180.0, 90.0));
        assert!(node.rect().contains(Vec2::new(259.0, 89.0)));
        assert!(node.is_root());
    }

    #[test]
    fn test_node_serde_roundtrip() {
        let mut node = Node::new("motor", ComponentType::Mechanical, "Motor", Vec2::new(1.0, 2.0));
        node.parent = Some(NodeId::from("root"));
        let json = serde_json::to_string(&node).unwrap();
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId::from("node-7").to_string(), "node-7");
    }
}
