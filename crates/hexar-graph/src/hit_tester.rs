use crate::tree::TreeModel;
use hexar_core::{NODE_HEIGHT, NODE_WIDTH, Node, NodeId, Rect, Vec2};

/// Edge length of the square edit/delete icons on a node card.
pub const ACTION_BUTTON_SIZE: f32 = 20.0;
const ACTION_BUTTON_GAP: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeAction {
    Edit,
    Delete,
}

/// Result of a hit test at a given scene position.
///
/// Priority order: ActionButton > Node > None, topmost node first.
#[derive(Debug, Clone, PartialEq)]
pub enum HitResult {
    None,
    Node(NodeId),
    ActionButton { node_id: NodeId, action: NodeAction },
}

/// Scene-space rectangle of a node's action icon.
pub fn action_button_rect(node: &Node, action: NodeAction) -> Rect {
    let slot = match action {
        NodeAction::Delete => 1.0,
        NodeAction::Edit => 2.0,
    };
    let x = node.position.x + NODE_WIDTH - slot * (ACTION_BUTTON_SIZE + ACTION_BUTTON_GAP);
    let y = node.position.y + (NODE_HEIGHT - ACTION_BUTTON_SIZE) * 0.5;
    Rect::from_pos_size(Vec2::new(x, y), Vec2::new(ACTION_BUTTON_SIZE, ACTION_BUTTON_SIZE))
}

#[derive(Debug, Clone)]
struct NodeRegion {
    id: NodeId,
    card: Rect,
    edit: Rect,
    delete: Rect,
}

/// Hit regions for node cards and their action icons, in paint order.
///
/// Call [`HitTester::update`] after any change to the tree.
#[derive(Debug, Clone, Default)]
pub struct HitTester {
    regions: Vec<NodeRegion>,
}

impl HitTester {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tree(tree: &TreeModel) -> Self {
        let mut tester = Self::new();
        tester.update(tree);
        tester
    }

    pub fn update(&mut self, tree: &TreeModel) {
        self.regions.clear();
        self.regions.extend(tree.nodes().map(|node| NodeRegion {
            id: node.id.clone(),
            card: node.rect(),
            edit: action_button_rect(node, NodeAction::Edit),
            delete: action_button_rect(node, NodeAction::Delete),
        }));
    }

    /// Test a scene-space position. Later-painted nodes win on overlap.
    pub fn hit_test(&self, pos: Vec2) -> HitResult {
        let Some(region) = self.regions.iter().rev().find(|r| r.card.contains(pos)) else {
            return HitResult::None;
        };
        let action = if region.delete.contains(pos) {
            Some(NodeAction::Delete)
        } else if region.edit.contains(pos) {
            Some(NodeAction::Edit)
        } else {
            None
        };
        match action {
            Some(action) => HitResult::ActionButton {
                node_id: region.id.clone(),
                action,
            },
            None => HitResult::Node(region.id.clone()),
        }
    }

    pub fn node_rect(&self, id: &NodeId) -> Option<Rect> {
        self.regions.iter().find(|r| &r.id == id).map(|r| r.card)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexar_core::ComponentType;

    #[test]
    fn test_hit_node_body() {
        let tester = HitTester::from_tree(&TreeModel::demo());
        assert_eq!(
            tester.hit_test(Vec2::new(410.0, 120.0)),
            HitResult::Node(NodeId::from("root"))
        );
        assert_eq!(tester.hit_test(Vec2::new(10.0, 10.0)), HitResult::None);
    }

    #[test]
    fn test_hit_action_buttons() {
        let tree = TreeModel::demo();
        let tester = HitTester::from_tree(&tree);
        let root = tree.get(&NodeId::from("root")).unwrap();

        let delete = action_button_rect(root, NodeAction::Delete).center();
        assert_eq!(
            tester.hit_test(delete),
            HitResult::ActionButton {
                node_id: NodeId::from("root"),
                action: NodeAction::Delete,
            }
        );
        let edit = action_button_rect(root, NodeAction::Edit).center();
        assert_eq!(
            tester.hit_test(edit),
            HitResult::ActionButton {
                node_id: NodeId::from("root"),
                action: NodeAction::Edit,
            }
        );
    }

    #[test]
    fn test_topmost_wins_on_overlap() {
        let mut tree = TreeModel::with_seed(1);
        let below = tree.add_node_at(ComponentType::System, Vec2::new(0.0, 0.0));
        let above = tree.add_node_at(ComponentType::Software, Vec2::new(20.0, 10.0));
        let tester = HitTester::from_tree(&tree);
        assert_eq!(tester.hit_test(Vec2::new(30.0, 20.0)), HitResult::Node(above));
        assert_eq!(tester.hit_test(Vec2::new(5.0, 5.0)), HitResult::Node(below));
    }

    #[test]
    fn test_update_tracks_deletes() {
        let mut tree = TreeModel::demo();
        let mut tester = HitTester::from_tree(&tree);
        assert_eq!(tester.len(), 4);
        tree.delete_node(&NodeId::from("root"));
        tester.update(&tree);
        assert!(tester.is_empty());
        assert_eq!(tester.node_rect(&NodeId::from("root")), None);
    }
}
