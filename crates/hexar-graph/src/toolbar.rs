use crate::editor::{EditorState, Outcome};
use hexar_core::ComponentType;

/// User intents coming from the toolbar and palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    AddNode(ComponentType),
    DeleteSelected,
    ZoomIn,
    ZoomOut,
    ResetView,
}

/// Enabled flags and labels the toolbar renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarState {
    pub can_delete: bool,
    pub can_zoom_in: bool,
    pub can_zoom_out: bool,
    pub zoom_percent: u32,
    pub status: &'static str,
}

impl ToolbarState {
    pub fn from_editor(editor: &EditorState) -> Self {
        let has_selection = !editor.selection.is_empty();
        Self {
            can_delete: has_selection,
            can_zoom_in: editor.viewport.can_zoom_in(),
            can_zoom_out: editor.viewport.can_zoom_out(),
            zoom_percent: editor.viewport.zoom_percent(),
            status: if has_selection {
                "Node selected"
            } else {
                "Click a node to select"
            },
        }
    }

    pub fn allows(&self, action: ToolbarAction) -> bool {
        match action {
            ToolbarAction::AddNode(_) | ToolbarAction::ResetView => true,
            ToolbarAction::DeleteSelected => self.can_delete,
            ToolbarAction::ZoomIn => self.can_zoom_in,
            ToolbarAction::ZoomOut => self.can_zoom_out,
        }
    }
}

/// Apply a toolbar action. Disabled actions are no-ops.
pub fn apply(editor: &mut EditorState, action: ToolbarAction) -> Outcome {
    if !ToolbarState::from_editor(editor).allows(action) {
        tracing::debug!("Ignoring disabled toolbar action {:?}", action);
        return Outcome::None;
    }
    match action {
        ToolbarAction::AddNode(kind) => Outcome::NodeAdded(editor.add_under_selection(kind)),
        ToolbarAction::DeleteSelected => {
            let Some(id) = editor.selection.get().cloned() else {
                return Outcome::None;
            };
            let removed = editor.delete_node(&id);
            Outcome::NodesDeleted { id, removed }
        }
        ToolbarAction::ZoomIn => {
            editor.viewport.zoom_in();
            Outcome::ViewportChanged
        }
        ToolbarAction::ZoomOut => {
            editor.viewport.zoom_out();
            Outcome::ViewportChanged
        }
        ToolbarAction::ResetView => {
            editor.viewport.reset();
            Outcome::ViewportChanged
        }
    }
}
