use crate::tree::TreeModel;
use hexar_core::{Node, NodeId};

/// At most one selected node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<NodeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &NodeId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }

    pub fn set(&mut self, id: NodeId) {
        self.selected = Some(id);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Select `id`, or clear the selection if `id` is already selected.
    pub fn toggle(&mut self, id: &NodeId) {
        if self.is_selected(id) {
            self.selected = None;
        } else {
            self.selected = Some(id.clone());
        }
    }

    /// Resolve the selected id against the tree.
    pub fn node<'a>(&self, tree: &'a TreeModel) -> Option<&'a Node> {
        self.selected.as_ref().and_then(|id| tree.get(id))
    }
}

/// Change notice produced by [`SelectionBridge::sync`].
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionChange {
    pub previous: Option<NodeId>,
    pub current: Option<Node>,
}

/// Tracks which selection the assistant last saw and reports changes once.
#[derive(Debug, Clone, Default)]
pub struct SelectionBridge {
    last_seen: Option<NodeId>,
}

impl SelectionBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a change exactly once per distinct selected id.
    ///
    /// A selection pointing at a node that no longer exists reads as none.
    pub fn sync(&mut self, selection: &Selection, tree: &TreeModel) -> Option<SelectionChange> {
        let current = selection.node(tree);
        let current_id = current.map(|node| node.id.clone());
        if current_id == self.last_seen {
            return None;
        }
        let previous = std::mem::replace(&mut self.last_seen, current_id);
        tracing::debug!("selection changed {:?} -> {:?}", previous, self.last_seen);
        Some(SelectionChange {
            previous,
            current: current.cloned(),
        })
    }

    pub fn last_seen(&self) -> Option<&NodeId> {
        self.last_seen.as_ref()
    }
}
