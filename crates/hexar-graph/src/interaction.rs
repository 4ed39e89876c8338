use crate::editor::{EditorState, Outcome};
use crate::hit_tester::{HitResult, NodeAction};
use crate::tree::TreeError;
use hexar_core::{NodeId, Vec2};

/// Pointer travel (screen px) beyond which a press becomes a drag.
pub const DEFAULT_DRAG_THRESHOLD: f32 = 3.0;

/// What a pointer-down landed on, resolved by the caller's hit test.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerTarget {
    Canvas,
    Node(NodeId),
    ActionButton { node_id: NodeId, action: NodeAction },
    /// Header of the assistant panel; `panel_origin` is its current top-left.
    AssistantHeader { panel_origin: Vec2 },
}

impl From<HitResult> for PointerTarget {
    fn from(hit: HitResult) -> Self {
        match hit {
            HitResult::None => PointerTarget::Canvas,
            HitResult::Node(id) => PointerTarget::Node(id),
            HitResult::ActionButton { node_id, action } => {
                PointerTarget::ActionButton { node_id, action }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Enter,
    Escape,
}

/// Input delivered to the controller. Positions are in screen space.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { pos: Vec2, target: PointerTarget },
    PointerMove { pos: Vec2 },
    PointerUp { pos: Vec2 },
    PointerLeave,
    BeginEdit(NodeId),
    EditInput(String),
    EditKey(EditKey),
    EditBlur,
}

/// Screen placement of the canvas and the window it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Surface {
    pub canvas_origin: Vec2,
    pub window_size: Vec2,
}

/// Ephemeral pointer session, created on press and dropped on release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Pointer minus the dragged thing's origin (or minus the pan when panning).
    pub anchor: Vec2,
    pub origin: Vec2,
    /// Set once the pointer travelled past the drag threshold.
    pub dragged: bool,
}

impl DragSession {
    fn new(anchor: Vec2, origin: Vec2) -> Self {
        Self {
            anchor,
            origin,
            dragged: false,
        }
    }

    fn track(&mut self, pos: Vec2, threshold: f32) {
        if !self.dragged && (pos - self.origin).length() > threshold {
            self.dragged = true;
        }
    }
}

/// An action icon that was pressed and fires if released in place.
#[derive(Debug, Clone, PartialEq)]
struct ArmedAction {
    node_id: NodeId,
    action: NodeAction,
    origin: Vec2,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    DraggingNode { id: NodeId, session: DragSession },
    Panning { session: DragSession },
    EditingLabel { id: NodeId, buffer: String },
    DraggingAssistant { session: DragSession },
}

/// Pointer/keyboard state machine for the canvas.
///
/// Exactly one state is active at a time, so node drags, pans, label edits
/// and panel drags never interleave.
#[derive(Debug, Clone)]
pub struct InteractionController {
    state: InteractionState,
    armed: Option<ArmedAction>,
    drag_threshold: f32,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self::with_drag_threshold(DEFAULT_DRAG_THRESHOLD)
    }

    pub fn with_drag_threshold(drag_threshold: f32) -> Self {
        Self {
            state: InteractionState::Idle,
            armed: None,
            drag_threshold: drag_threshold.max(0.0),
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// True while a drag session is open or an action icon is held; only
    /// then do pointer moves matter.
    pub fn is_pointer_tracking(&self) -> bool {
        self.armed.is_some()
            || matches!(
                self.state,
                InteractionState::DraggingNode { .. }
                    | InteractionState::Panning { .. }
                    | InteractionState::DraggingAssistant { .. }
            )
    }

    /// The action icon currently held down, if any.
    pub fn armed_action(&self) -> Option<(&NodeId, NodeAction)> {
        self.armed
            .as_ref()
            .map(|armed| (&armed.node_id, armed.action))
    }

    pub fn editing(&self) -> Option<(&NodeId, &str)> {
        match &self.state {
            InteractionState::EditingLabel { id, buffer } => Some((id, buffer.as_str())),
            _ => None,
        }
    }

    pub fn dragging_node(&self) -> Option<&NodeId> {
        match &self.state {
            InteractionState::DraggingNode { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Drop back to idle if the node this state refers to was removed.
    pub fn forget_removed(&mut self, removed: &[NodeId]) {
        let stale = match &self.state {
            InteractionState::DraggingNode { id, .. } | InteractionState::EditingLabel { id, .. } => {
                removed.contains(id)
            }
            _ => false,
        };
        if stale {
            self.state = InteractionState::Idle;
        }
        if self
            .armed
            .as_ref()
            .is_some_and(|armed| removed.contains(&armed.node_id))
        {
            self.armed = None;
        }
    }

    pub fn handle(&mut self, event: InputEvent, editor: &mut EditorState, surface: &Surface) -> Outcome {
        match event {
            InputEvent::PointerDown { pos, target } => self.pointer_down(pos, target, editor, surface),
            InputEvent::PointerMove { pos } => self.pointer_move(pos, editor, surface),
            InputEvent::PointerUp { pos } => self.pointer_up(pos, editor),
            InputEvent::PointerLeave => {
                self.armed = None;
                if self.is_pointer_tracking() {
                    self.state = InteractionState::Idle;
                }
                Outcome::None
            }
            InputEvent::BeginEdit(id) => self.begin_edit(id, editor),
            InputEvent::EditInput(text) => {
                if let InteractionState::EditingLabel { buffer, .. } = &mut self.state {
                    *buffer = text;
                }
                Outcome::None
            }
            InputEvent::EditKey(EditKey::Enter) | InputEvent::EditBlur => self.commit_edit(editor),
            InputEvent::EditKey(EditKey::Escape) => self.cancel_edit(),
        }
    }

    fn pointer_down(
        &mut self,
        pos: Vec2,
        target: PointerTarget,
        editor: &mut EditorState,
        surface: &Surface,
    ) -> Outcome {
        self.armed = None;
        match &self.state {
            InteractionState::Idle => {}
            InteractionState::EditingLabel { id, .. } => {
                let on_edited_node = match &target {
                    PointerTarget::Node(node_id)
                    | PointerTarget::ActionButton { node_id, .. } => node_id == id,
                    _ => false,
                };
                // Presses inside the edited card belong to the text field.
                if on_edited_node {
                    return Outcome::None;
                }
                return self.commit_edit(editor);
            }
            _ => return Outcome::None,
        }

        match target {
            PointerTarget::Canvas => {
                let anchor = pos - editor.viewport.pan();
                self.state = InteractionState::Panning {
                    session: DragSession::new(anchor, pos),
                };
                Outcome::None
            }
            PointerTarget::Node(id) => {
                let Some(node_origin) = editor.node_screen_origin(&id, surface.canvas_origin) else {
                    return Outcome::None;
                };
                self.state = InteractionState::DraggingNode {
                    id,
                    session: DragSession::new(pos - node_origin, pos),
                };
                Outcome::None
            }
            PointerTarget::ActionButton { node_id, action } => {
                self.armed = Some(ArmedAction {
                    node_id,
                    action,
                    origin: pos,
                });
                Outcome::None
            }
            PointerTarget::AssistantHeader { panel_origin } => {
                editor.panel.begin_float(panel_origin);
                self.state = InteractionState::DraggingAssistant {
                    session: DragSession::new(pos - panel_origin, pos),
                };
                Outcome::None
            }
        }
    }

    fn pointer_move(&mut self, pos: Vec2, editor: &mut EditorState, surface: &Surface) -> Outcome {
        let threshold = self.drag_threshold;
        if self
            .armed
            .as_ref()
            .is_some_and(|armed| (pos - armed.origin).length() > threshold)
        {
            self.armed = None;
        }
        match &mut self.state {
            InteractionState::Panning { session } => {
                session.track(pos, threshold);
                editor.viewport.set_pan(pos - session.anchor);
                Outcome::ViewportChanged
            }
            InteractionState::DraggingNode { id, session } => {
                session.track(pos, threshold);
                if !editor.tree.contains(id) {
                    self.state = InteractionState::Idle;
                    return Outcome::None;
                }
                let local = pos - surface.canvas_origin - session.anchor;
                let scene = editor.viewport.screen_to_scene(local);
                editor.tree.move_node(id, scene.x, scene.y);
                Outcome::NodeMoved(id.clone())
            }
            InteractionState::DraggingAssistant { session } => {
                session.track(pos, threshold);
                editor.panel.move_to(pos - session.anchor, surface.window_size);
                Outcome::PanelMoved
            }
            InteractionState::Idle | InteractionState::EditingLabel { .. } => Outcome::None,
        }
    }

    fn pointer_up(&mut self, pos: Vec2, editor: &mut EditorState) -> Outcome {
        let threshold = self.drag_threshold;
        if let Some(armed) = self.armed.take() {
            if (pos - armed.origin).length() > threshold {
                return Outcome::None;
            }
            return self.run_action(armed.node_id, armed.action, editor);
        }
        if !self.is_pointer_tracking() {
            return Outcome::None;
        }
        let finished = std::mem::take(&mut self.state);
        match finished {
            InteractionState::DraggingNode { id, mut session } => {
                session.track(pos, threshold);
                if session.dragged || !editor.tree.contains(&id) {
                    return Outcome::None;
                }
                editor.selection.toggle(&id);
                Outcome::SelectionChanged(editor.selection.get().cloned())
            }
            _ => Outcome::None,
        }
    }

    fn run_action(&mut self, node_id: NodeId, action: NodeAction, editor: &mut EditorState) -> Outcome {
        match action {
            NodeAction::Edit => self.begin_edit(node_id, editor),
            NodeAction::Delete => {
                let removed = editor.delete_node(&node_id);
                if removed.is_empty() {
                    return Outcome::None;
                }
                Outcome::NodesDeleted {
                    id: node_id,
                    removed,
                }
            }
        }
    }

    fn begin_edit(&mut self, id: NodeId, editor: &EditorState) -> Outcome {
        if self.state != InteractionState::Idle {
            return Outcome::None;
        }
        let Some(node) = editor.tree.get(&id) else {
            return Outcome::None;
        };
        self.state = InteractionState::EditingLabel {
            buffer: node.label.clone(),
            id: id.clone(),
        };
        Outcome::EditStarted(id)
    }

    fn commit_edit(&mut self, editor: &mut EditorState) -> Outcome {
        let InteractionState::EditingLabel { id, buffer } = std::mem::take(&mut self.state) else {
            return Outcome::None;
        };
        if !editor.tree.contains(&id) {
            return Outcome::EditCancelled(id);
        }
        match editor.tree.rename_node(&id, &buffer) {
            Ok(()) => {
                let label = editor
                    .tree
                    .get(&id)
                    .map(|node| node.label.clone())
                    .unwrap_or_default();
                Outcome::LabelCommitted { id, label }
            }
            Err(TreeError::EmptyLabel) => {
                tracing::debug!("Rejected empty label for {}", id);
                Outcome::LabelRejected(id)
            }
            Err(err) => {
                tracing::warn!("Rename of {} failed: {}", id, err);
                Outcome::LabelRejected(id)
            }
        }
    }

    fn cancel_edit(&mut self) -> Outcome {
        match std::mem::take(&mut self.state) {
            InteractionState::EditingLabel { id, .. } => Outcome::EditCancelled(id),
            other => {
                self.state = other;
                Outcome::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit_tester::{HitTester, action_button_rect};

    fn surface() -> Surface {
        Surface {
            canvas_origin: Vec2::new(200.0, 60.0),
            window_size: Vec2::new(1280.0, 720.0),
        }
    }

    fn down(pos: Vec2, target: PointerTarget) -> InputEvent {
        InputEvent::PointerDown { pos, target }
    }

    fn node(id: &str) -> PointerTarget {
        PointerTarget::Node(NodeId::from(id))
    }

    #[test]
    fn test_click_toggles_selection() {
        let mut editor = EditorState::demo();
        let mut controller = InteractionController::new();
        let s = surface();
        let pos = Vec2::new(620.0, 180.0);

        controller.handle(down(pos, node("root")), &mut editor, &s);
        let outcome = controller.handle(InputEvent::PointerUp { pos }, &mut editor, &s);
        assert_eq!(outcome, Outcome::SelectionChanged(Some(NodeId::from("root"))));

        controller.handle(down(pos, node("root")), &mut editor, &s);
        let outcome = controller.handle(InputEvent::PointerUp { pos }, &mut editor, &s);
        assert_eq!(outcome, Outcome::SelectionChanged(None));
        assert_eq!(controller.state(), &InteractionState::Idle);
    }

    #[test]
    fn test_drag_moves_node_without_selecting() {
        let mut editor = EditorState::demo();
        let mut controller = InteractionController::new();
        let s = surface();
        // root sits at scene (400, 100); grab it 10px in from its corner.
        let grab = Vec2::new(610.0, 170.0);
        controller.handle(down(grab, node("root")), &mut editor, &s);
        assert!(controller.is_pointer_tracking());

        let outcome = controller.handle(
            InputEvent::PointerMove {
                pos: Vec2::new(660.0, 220.0),
            },
            &mut editor,
            &s,
        );
        assert_eq!(outcome, Outcome::NodeMoved(NodeId::from("root")));
        assert_eq!(
            editor.tree.get(&NodeId::from("root")).unwrap().position,
            Vec2::new(450.0, 150.0)
        );

        let outcome = controller.handle(
            InputEvent::PointerUp {
                pos: Vec2::new(660.0, 220.0),
            },
            &mut editor,
            &s,
        );
        assert_eq!(outcome, Outcome::None);
        assert!(editor.selection.is_empty());
        assert!(!controller.is_pointer_tracking());
    }

    #[test]
    fn test_drag_respects_zoom_and_pan() {
        let mut editor = EditorState::demo();
        editor.viewport.set_zoom(2.0);
        editor.viewport.set_pan(Vec2::new(-100.0, -50.0));
        let mut controller = InteractionController::new();
        let s = surface();
        // root on screen: origin + pan + pos * zoom = (200-100+800, 60-50+200)
        let grab = Vec2::new(900.0, 210.0);
        controller.handle(down(grab, node("root")), &mut editor, &s);
        controller.handle(
            InputEvent::PointerMove {
                pos: Vec2::new(1000.0, 410.0),
            },
            &mut editor,
            &s,
        );
        assert_eq!(
            editor.tree.get(&NodeId::from("root")).unwrap().position,
            Vec2::new(450.0, 200.0)
        );
    }

    #[test]
    fn test_drag_clamps_to_non_negative() {
        let mut editor = EditorState::demo();
        let mut controller = InteractionController::new();
        let s = surface();
        controller.handle(down(Vec2::new(600.0, 160.0), node("root")), &mut editor, &s);
        controller.handle(
            InputEvent::PointerMove {
                pos: Vec2::new(-500.0, -500.0),
            },
            &mut editor,
            &s,
        );
        assert_eq!(
            editor.tree.get(&NodeId::from("root")).unwrap().position,
            Vec2::ZERO
        );
    }

    #[test]
    fn test_small_jitter_still_counts_as_click() {
        let mut editor = EditorState::demo();
        let mut controller = InteractionController::new();
        let s = surface();
        let pos = Vec2::new(620.0, 180.0);
        controller.handle(down(pos, node("sensor")), &mut editor, &s);
        controller.handle(
            InputEvent::PointerMove {
                pos: pos + Vec2::new(1.0, 1.0),
            },
            &mut editor,
            &s,
        );
        let outcome = controller.handle(
            InputEvent::PointerUp {
                pos: pos + Vec2::new(1.0, 1.0),
            },
            &mut editor,
            &s,
        );
        assert_eq!(outcome, Outcome::SelectionChanged(Some(NodeId::from("sensor"))));
    }

    #[test]
    fn test_pan_follows_pointer() {
        let mut editor = EditorState::demo();
        editor.viewport.set_pan(Vec2::new(10.0, 10.0));
        let mut controller = InteractionController::new();
        let s = surface();
        controller.handle(down(Vec2::new(100.0, 100.0), PointerTarget::Canvas), &mut editor, &s);
        let outcome = controller.handle(
            InputEvent::PointerMove {
                pos: Vec2::new(150.0, 80.0),
            },
            &mut editor,
            &s,
        );
        assert_eq!(outcome, Outcome::ViewportChanged);
        assert_eq!(editor.viewport.pan(), Vec2::new(60.0, -10.0));

        // Leaving the canvas ends the pan.
        controller.handle(InputEvent::PointerLeave, &mut editor, &s);
        assert_eq!(controller.state(), &InteractionState::Idle);
        assert!(!controller.is_pointer_tracking());
        // Moves after the session ended do nothing.
        controller.handle(
            InputEvent::PointerMove {
                pos: Vec2::new(400.0, 400.0),
            },
            &mut editor,
            &s,
        );
        assert_eq!(editor.viewport.pan(), Vec2::new(60.0, -10.0));
    }

    #[test]
    fn test_pointer_leave_during_node_press_does_not_select() {
        let mut editor = EditorState::demo();
        let mut controller = InteractionController::new();
        let s = surface();
        controller.handle(down(Vec2::new(620.0, 180.0), node("root")), &mut editor, &s);
        controller.handle(InputEvent::PointerLeave, &mut editor, &s);
        controller.handle(
            InputEvent::PointerUp {
                pos: Vec2::new(620.0, 180.0),
            },
            &mut editor,
            &s,
        );
        assert!(editor.selection.is_empty());
    }

    #[test]
    fn test_action_buttons_never_start_drag() {
        let mut editor = EditorState::demo();
        let mut controller = InteractionController::new();
        let s = surface();
        let tester = HitTester::from_tree(&editor.tree);
        let root = editor.tree.get(&NodeId::from("root")).unwrap().clone();
        let delete_scene = action_button_rect(&root, NodeAction::Delete).center();
        let target = PointerTarget::from(tester.hit_test(delete_scene));
        let screen = s.canvas_origin + editor.viewport.scene_to_screen(delete_scene);

        let outcome = controller.handle(down(screen, target), &mut editor, &s);
        assert_eq!(outcome, Outcome::None);
        assert_eq!(controller.state(), &InteractionState::Idle);
        assert_eq!(
            controller.armed_action(),
            Some((&NodeId::from("root"), NodeAction::Delete))
        );

        let outcome = controller.handle(InputEvent::PointerUp { pos: screen }, &mut editor, &s);
        assert!(matches!(outcome, Outcome::NodesDeleted { ref removed, .. } if removed.len() == 4));
        assert!(!controller.is_pointer_tracking());
        assert!(editor.tree.is_empty());
    }

    #[test]
    fn test_delete_icon_pressed_then_dragged_away_keeps_node() {
        let mut editor = EditorState::demo();
        let mut controller = InteractionController::new();
        let s = surface();
        let motor = editor.tree.get(&NodeId::from("motor")).unwrap().clone();
        let delete_scene = action_button_rect(&motor, NodeAction::Delete).center();
        let screen = s.canvas_origin + editor.viewport.scene_to_screen(delete_scene);
        let target = PointerTarget::ActionButton {
            node_id: motor.id.clone(),
            action: NodeAction::Delete,
        };

        controller.handle(down(screen, target), &mut editor, &s);
        let away = screen + Vec2::new(40.0, 0.0);
        controller.handle(InputEvent::PointerMove { pos: away }, &mut editor, &s);
        let outcome = controller.handle(InputEvent::PointerUp { pos: away }, &mut editor, &s);
        assert_eq!(outcome, Outcome::None);
        assert_eq!(editor.tree.len(), 4);
        // Nothing moved while the icon was held.
        assert_eq!(editor.tree.get(&motor.id).unwrap().position, motor.position);
        assert_eq!(editor.viewport.pan(), Vec2::ZERO);
        assert!(!controller.is_pointer_tracking());
    }

    #[test]
    fn test_edit_icon_starts_edit_on_release() {
        let mut editor = EditorState::demo();
        let mut controller = InteractionController::new();
        let s = surface();
        let id = NodeId::from("sensor");
        let pos = Vec2::new(300.0, 300.0);
        let target = PointerTarget::ActionButton {
            node_id: id.clone(),
            action: NodeAction::Edit,
        };
        assert_eq!(controller.handle(down(pos, target.clone()), &mut editor, &s), Outcome::None);
        let outcome = controller.handle(InputEvent::PointerUp { pos }, &mut editor, &s);
        assert_eq!(outcome, Outcome::EditStarted(id.clone()));
        assert_eq!(controller.editing(), Some((&id, "Sensor Module")));

        // Leaving the canvas with the icon held disarms it.
        controller.handle(InputEvent::EditKey(EditKey::Escape), &mut editor, &s);
        controller.handle(down(pos, target), &mut editor, &s);
        controller.handle(InputEvent::PointerLeave, &mut editor, &s);
        let outcome = controller.handle(InputEvent::PointerUp { pos }, &mut editor, &s);
        assert_eq!(outcome, Outcome::None);
        assert_eq!(controller.state(), &InteractionState::Idle);
    }

    #[test]
    fn test_edit_commit_with_enter() {
        let mut editor = EditorState::demo();
        let mut controller = InteractionController::new();
        let s = surface();
        let id = NodeId::from("motor");

        let outcome = controller.handle(InputEvent::BeginEdit(id.clone()), &mut editor, &s);
        assert_eq!(outcome, Outcome::EditStarted(id.clone()));
        assert_eq!(controller.editing(), Some((&id, "Motor Assembly")));

        controller.handle(InputEvent::EditInput("  Drive Motor ".into()), &mut editor, &s);
        let outcome = controller.handle(InputEvent::EditKey(EditKey::Enter), &mut editor, &s);
        assert_eq!(
            outcome,
            Outcome::LabelCommitted {
                id: id.clone(),
                label: "Drive Motor".into(),
            }
        );
        assert_eq!(editor.tree.get(&id).unwrap().label, "Drive Motor");
        assert_eq!(controller.state(), &InteractionState::Idle);
    }

    #[test]
    fn test_edit_escape_discards() {
        let mut editor = EditorState::demo();
        let mut controller = InteractionController::new();
        let s = surface();
        let id = NodeId::from("sensor");
        controller.handle(InputEvent::BeginEdit(id.clone()), &mut editor, &s);
        controller.handle(InputEvent::EditInput("Changed".into()), &mut editor, &s);
        let outcome = controller.handle(InputEvent::EditKey(EditKey::Escape), &mut editor, &s);
        assert_eq!(outcome, Outcome::EditCancelled(id.clone()));
        assert_eq!(editor.tree.get(&id).unwrap().label, "Sensor Module");
    }

    #[test]
    fn test_blank_commit_keeps_label() {
        let mut editor = EditorState::demo();
        let mut controller = InteractionController::new();
        let s = surface();
        let id = NodeId::from("encoder");
        controller.handle(InputEvent::BeginEdit(id.clone()), &mut editor, &s);
        controller.handle(InputEvent::EditInput("   ".into()), &mut editor, &s);
        let outcome = controller.handle(InputEvent::EditBlur, &mut editor, &s);
        assert_eq!(outcome, Outcome::LabelRejected(id.clone()));
        assert_eq!(editor.tree.get(&id).unwrap().label, "Rotary Encoder");
        assert_eq!(controller.state(), &InteractionState::Idle);
    }

    #[test]
    fn test_press_while_editing() {
        let mut editor = EditorState::demo();
        let mut controller = InteractionController::new();
        let s = surface();
        let id = NodeId::from("root");
        controller.handle(InputEvent::BeginEdit(id.clone()), &mut editor, &s);
        controller.handle(InputEvent::EditInput("Plant".into()), &mut editor, &s);

        // Pressing on the edited card neither drags nor commits.
        let outcome = controller.handle(down(Vec2::new(620.0, 180.0), node("root")), &mut editor, &s);
        assert_eq!(outcome, Outcome::None);
        assert!(controller.editing().is_some());

        // Pressing elsewhere behaves like blur.
        let outcome = controller.handle(down(Vec2::new(5.0, 5.0), PointerTarget::Canvas), &mut editor, &s);
        assert!(matches!(outcome, Outcome::LabelCommitted { .. }));
        assert_eq!(editor.tree.get(&id).unwrap().label, "Plant");
        assert!(!controller.is_pointer_tracking());
    }

    #[test]
    fn test_begin_edit_ignored_while_dragging() {
        let mut editor = EditorState::demo();
        let mut controller = InteractionController::new();
        let s = surface();
        controller.handle(down(Vec2::new(10.0, 10.0), PointerTarget::Canvas), &mut editor, &s);
        let outcome = controller.handle(InputEvent::BeginEdit(NodeId::from("root")), &mut editor, &s);
        assert_eq!(outcome, Outcome::None);
        assert!(matches!(controller.state(), InteractionState::Panning { .. }));
    }

    #[test]
    fn test_assistant_drag_is_clamped() {
        let mut editor = EditorState::demo();
        let mut controller = InteractionController::new();
        let s = surface();
        let panel_origin = Vec2::new(880.0, 80.0);
        controller.handle(
            down(
                Vec2::new(900.0, 90.0),
                PointerTarget::AssistantHeader { panel_origin },
            ),
            &mut editor,
            &s,
        );
        assert_eq!(editor.panel.position(), Some(panel_origin));

        controller.handle(
            InputEvent::PointerMove {
                pos: Vec2::new(500.0, 300.0),
            },
            &mut editor,
            &s,
        );
        assert_eq!(editor.panel.position(), Some(Vec2::new(480.0, 290.0)));

        controller.handle(
            InputEvent::PointerMove {
                pos: Vec2::new(5000.0, 5000.0),
            },
            &mut editor,
            &s,
        );
        assert_eq!(editor.panel.position(), Some(Vec2::new(900.0, 620.0)));
        // Panel drags leave the tree and viewport alone.
        assert_eq!(editor.viewport.pan(), Vec2::ZERO);
        assert!(editor.selection.is_empty());
    }

    #[test]
    fn test_forget_removed_resets_edit() {
        let mut editor = EditorState::demo();
        let mut controller = InteractionController::new();
        let s = surface();
        controller.handle(InputEvent::BeginEdit(NodeId::from("encoder")), &mut editor, &s);
        let removed = editor.delete_node(&NodeId::from("motor"));
        controller.forget_removed(&removed);
        assert_eq!(controller.state(), &InteractionState::Idle);
    }
}
