use crate::panel::AssistantPanel;
use crate::selection::Selection;
use crate::tree::TreeModel;
use crate::viewport::Viewport;
use hexar_core::{ComponentType, NodeId, Vec2};

/// What an editor operation changed, so the shell can publish events.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    None,
    NodeAdded(NodeId),
    NodesDeleted { id: NodeId, removed: Vec<NodeId> },
    NodeMoved(NodeId),
    SelectionChanged(Option<NodeId>),
    ViewportChanged,
    EditStarted(NodeId),
    LabelCommitted { id: NodeId, label: String },
    LabelRejected(NodeId),
    EditCancelled(NodeId),
    PanelMoved,
}

/// Editor state handed explicitly to the interaction controller and views.
#[derive(Debug, Default)]
pub struct EditorState {
    pub tree: TreeModel,
    pub viewport: Viewport,
    pub selection: Selection,
    pub panel: AssistantPanel,
}

impl EditorState {
    pub fn new(tree: TreeModel) -> Self {
        Self {
            tree,
            viewport: Viewport::new(),
            selection: Selection::new(),
            panel: AssistantPanel::new(),
        }
    }

    pub fn demo() -> Self {
        Self::new(TreeModel::demo())
    }

    /// Add a node and select it.
    pub fn add_node(&mut self, kind: ComponentType, parent: Option<&NodeId>) -> NodeId {
        let id = self.tree.add_node(kind, parent);
        self.selection.set(id.clone());
        id
    }

    /// Palette behavior: new nodes go under the current selection.
    pub fn add_under_selection(&mut self, kind: ComponentType) -> NodeId {
        let parent = self.selection.get().cloned();
        self.add_node(kind, parent.as_ref())
    }

    /// Delete a subtree, clearing the selection if it was inside it.
    pub fn delete_node(&mut self, id: &NodeId) -> Vec<NodeId> {
        let removed = self.tree.delete_node(id);
        if self
            .selection
            .get()
            .is_some_and(|selected| removed.contains(selected))
        {
            self.selection.clear();
        }
        removed
    }

    pub fn delete_selected(&mut self) -> Vec<NodeId> {
        match self.selection.get().cloned() {
            Some(id) => self.delete_node(&id),
            None => Vec::new(),
        }
    }

    /// Drop target: `token` names a component type, `canvas_pos` is the drop
    /// point relative to the canvas origin. Unknown tokens are ignored.
    pub fn drop_component(&mut self, token: &str, canvas_pos: Vec2) -> Option<NodeId> {
        let kind = match token.parse::<ComponentType>() {
            Ok(kind) => kind,
            Err(err) => {
                tracing::warn!("Ignoring drop: {}", err);
                return None;
            }
        };
        let scene = self.viewport.screen_to_scene(canvas_pos);
        let id = self.tree.add_node_at(kind, scene);
        self.selection.set(id.clone());
        Some(id)
    }

    /// Screen position of a node's top-left corner, given the canvas origin.
    pub fn node_screen_origin(&self, id: &NodeId, canvas_origin: Vec2) -> Option<Vec2> {
        self.tree
            .get(id)
            .map(|node| canvas_origin + self.viewport.scene_to_screen(node.position))
    }
}
