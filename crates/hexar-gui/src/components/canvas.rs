use crate::settings::AppSettings;
use crate::theme::{Theme, component_color};
use egui::{Pos2, Stroke};
use egui_phosphor::regular as ph;
use hexar_core::{ComponentType, NODE_HEIGHT, NODE_WIDTH, Node, NodeId, Vec2};
use hexar_graph::{
    EditKey, EditorState, HitResult, HitTester, InputEvent, InteractionController,
    InteractionState, NodeAction, PointerTarget, Surface, Viewport, action_button_rect,
    route_connections,
};

const CURVE_SEGMENTS: usize = 24;
const DASH_LENGTH: f32 = 6.0;
const DASH_GAP: f32 = 4.0;
const STRIPE_WIDTH: f32 = 4.0;
const LABEL_INSET: f32 = 12.0;

/// What the canvas collected this frame, applied by the app afterwards.
#[derive(Debug, Default)]
pub struct CanvasOutput {
    pub surface: Surface,
    /// Pointer presses, applied before this frame's moves and releases.
    pub presses: Vec<InputEvent>,
    /// Label-edit events, applied after pointer releases.
    pub edits: Vec<InputEvent>,
    /// Set when a pan is running and the pointer is no longer over the canvas.
    pub pointer_left: bool,
    /// Palette drop: component type and canvas-local drop point.
    pub dropped: Option<(ComponentType, Vec2)>,
}

pub struct CanvasView {
    hit_tester: HitTester,
    focused_edit: Option<NodeId>,
}

impl CanvasView {
    pub fn new() -> Self {
        Self {
            hit_tester: HitTester::new(),
            focused_edit: None,
        }
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        editor: &EditorState,
        controller: &InteractionController,
        theme: &Theme,
        settings: &AppSettings,
    ) -> CanvasOutput {
        let rect = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        let origin = Vec2::new(rect.min.x, rect.min.y);
        let viewport = &editor.viewport;
        let to_screen = |p: Vec2| to_pos2(origin + viewport.scene_to_screen(p));

        let mut output = CanvasOutput {
            surface: Surface {
                canvas_origin: origin,
                window_size: {
                    let size = ui.ctx().screen_rect().size();
                    Vec2::new(size.x, size.y)
                },
            },
            ..Default::default()
        };

        painter.rect_filled(rect, 0.0, theme.canvas_background());
        if settings.show_grid {
            draw_grid(&painter, rect, viewport, settings.grid_size, theme);
        }

        let edge_stroke = Stroke::new(2.0 * viewport.zoom(), theme.connection());
        for connection in route_connections(&editor.tree) {
            let points: Vec<Pos2> = connection
                .curve
                .flatten(CURVE_SEGMENTS)
                .into_iter()
                .map(to_screen)
                .collect();
            painter.extend(egui::Shape::dashed_line(
                &points,
                edge_stroke,
                DASH_LENGTH * viewport.zoom(),
                DASH_GAP * viewport.zoom(),
            ));
        }

        self.hit_tester.update(&editor.tree);
        let hover_scene = response
            .hover_pos()
            .map(|pos| viewport.screen_to_scene(Vec2::new(pos.x, pos.y) - origin));
        let hovered = hover_scene.map_or(HitResult::None, |p| self.hit_tester.hit_test(p));
        let hovered_id = match &hovered {
            HitResult::Node(id) | HitResult::ActionButton { node_id: id, .. } => Some(id),
            HitResult::None => None,
        };

        let editing = controller.editing();
        for node in editor.tree.nodes() {
            let is_editing = editing.is_some_and(|(id, _)| id == &node.id);
            let show_actions = !is_editing
                && (hovered_id == Some(&node.id) || editor.selection.is_selected(&node.id));
            draw_node(
                &painter,
                node,
                viewport,
                &to_screen,
                theme,
                NodeLook {
                    selected: editor.selection.is_selected(&node.id),
                    dragging: controller.dragging_node() == Some(&node.id),
                    show_label: !is_editing,
                    show_actions,
                },
            );
        }

        if let Some((id, buffer)) = editing {
            self.label_editor(ui, editor, id, buffer, &to_screen, &mut output);
        } else {
            self.focused_edit = None;
        }

        if response.contains_pointer() && ui.input(|i| i.pointer.primary_pressed()) {
            if let Some(press) = ui.input(|i| i.pointer.press_origin()) {
                let scene = viewport.screen_to_scene(Vec2::new(press.x, press.y) - origin);
                output.presses.push(InputEvent::PointerDown {
                    pos: Vec2::new(press.x, press.y),
                    target: PointerTarget::from(self.hit_tester.hit_test(scene)),
                });
            }
        }

        let panning = matches!(controller.state(), InteractionState::Panning { .. });
        output.pointer_left = panning && !response.contains_pointer();

        if response.double_clicked() {
            if let HitResult::Node(id) = &hovered {
                output.edits.push(InputEvent::BeginEdit(id.clone()));
            }
        }

        if let Some(kind) = response.dnd_release_payload::<ComponentType>() {
            if let Some(pos) = response.hover_pos() {
                output.dropped = Some((*kind, Vec2::new(pos.x, pos.y) - origin));
            }
        }

        let cursor = if controller.armed_action().is_some() {
            Some(egui::CursorIcon::PointingHand)
        } else if controller.is_pointer_tracking() {
            Some(egui::CursorIcon::Grabbing)
        } else {
            match hovered {
                HitResult::ActionButton { .. } => Some(egui::CursorIcon::PointingHand),
                HitResult::Node(_) => Some(egui::CursorIcon::Grab),
                HitResult::None => None,
            }
        };
        if let Some(cursor) = cursor.filter(|_| response.contains_pointer()) {
            ui.ctx().set_cursor_icon(cursor);
        }

        output
    }

    fn label_editor(
        &mut self,
        ui: &mut egui::Ui,
        editor: &EditorState,
        id: &NodeId,
        buffer: &str,
        to_screen: &impl Fn(Vec2) -> Pos2,
        output: &mut CanvasOutput,
    ) {
        let Some(node) = editor.tree.get(id) else {
            return;
        };
        let zoom = editor.viewport.zoom();
        let min = to_screen(node.position + Vec2::new(LABEL_INSET, 8.0));
        let size = egui::vec2(
            (NODE_WIDTH - LABEL_INSET * 2.0) * zoom,
            (NODE_HEIGHT - 16.0) * zoom,
        );
        let mut text = buffer.to_string();
        let edit = ui.put(
            egui::Rect::from_min_size(min, size),
            egui::TextEdit::singleline(&mut text)
                .font(egui::FontId::proportional(13.0 * zoom))
                .desired_width(size.x),
        );
        if self.focused_edit.as_ref() != Some(id) {
            edit.request_focus();
            self.focused_edit = Some(id.clone());
        }
        if edit.changed() {
            output.edits.push(InputEvent::EditInput(text));
        }
        if edit.lost_focus() {
            let key = ui.input(|i| {
                if i.key_pressed(egui::Key::Enter) {
                    Some(EditKey::Enter)
                } else if i.key_pressed(egui::Key::Escape) {
                    Some(EditKey::Escape)
                } else {
                    None
                }
            });
            output.edits.push(match key {
                Some(key) => InputEvent::EditKey(key),
                None => InputEvent::EditBlur,
            });
        }
    }
}

impl Default for CanvasView {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
struct NodeLook {
    selected: bool,
    dragging: bool,
    show_label: bool,
    show_actions: bool,
}

fn to_pos2(v: Vec2) -> Pos2 {
    Pos2::new(v.x, v.y)
}

fn draw_grid(
    painter: &egui::Painter,
    rect: egui::Rect,
    viewport: &Viewport,
    grid: f32,
    theme: &Theme,
) {
    let spacing = grid * viewport.zoom();
    if spacing < 4.0 {
        return;
    }
    let stroke = Stroke::new(1.0, theme.grid_line());
    let pan = viewport.pan();

    let mut x = rect.min.x + pan.x.rem_euclid(spacing);
    while x < rect.max.x {
        painter.line_segment([Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)], stroke);
        x += spacing;
    }
    let mut y = rect.min.y + pan.y.rem_euclid(spacing);
    while y < rect.max.y {
        painter.line_segment([Pos2::new(rect.min.x, y), Pos2::new(rect.max.x, y)], stroke);
        y += spacing;
    }
}

fn draw_node(
    painter: &egui::Painter,
    node: &Node,
    viewport: &Viewport,
    to_screen: &impl Fn(Vec2) -> Pos2,
    theme: &Theme,
    look: NodeLook,
) {
    let zoom = viewport.zoom();
    let screen_rect = egui::Rect::from_min_size(
        to_screen(node.position),
        egui::vec2(NODE_WIDTH * zoom, NODE_HEIGHT * zoom),
    );
    let radius = 6.0 * zoom;
    let accent = component_color(node.kind);

    if look.dragging {
        painter.rect_filled(
            screen_rect.translate(egui::vec2(0.0, 3.0 * zoom)),
            radius,
            theme.flavor.crust,
        );
    }
    painter.rect_filled(screen_rect, radius, theme.node_fill());
    let stripe = egui::Rect::from_min_size(
        screen_rect.min,
        egui::vec2(STRIPE_WIDTH * zoom, screen_rect.height()),
    );
    painter.rect_filled(
        stripe,
        egui::CornerRadius {
            nw: radius as u8,
            sw: radius as u8,
            ne: 0,
            se: 0,
        },
        accent,
    );
    painter.rect_stroke(
        screen_rect,
        radius,
        Stroke::new(if look.selected { 2.0 } else { 1.0 }, theme.node_border(look.selected)),
        egui::StrokeKind::Inside,
    );

    if look.show_label {
        let text_room = if look.show_actions {
            NODE_WIDTH - LABEL_INSET - 2.0 * 24.0
        } else {
            NODE_WIDTH - LABEL_INSET * 2.0
        };
        let font = egui::FontId::proportional(13.0 * zoom);
        let galley = painter.layout(
            node.label.clone(),
            font,
            theme.flavor.text,
            text_room * zoom,
        );
        let pos = Pos2::new(
            screen_rect.min.x + LABEL_INSET * zoom,
            screen_rect.center().y - galley.size().y / 2.0,
        );
        painter.with_clip_rect(screen_rect).galley(pos, galley, theme.flavor.text);
    }

    if look.show_actions {
        for (action, icon, color) in [
            (NodeAction::Edit, ph::PENCIL_SIMPLE, theme.flavor.subtext0),
            (NodeAction::Delete, ph::TRASH, theme.flavor.red),
        ] {
            let button = action_button_rect(node, action);
            painter.text(
                to_screen(button.center()),
                egui::Align2::CENTER_CENTER,
                icon,
                egui::FontId::proportional(14.0 * zoom),
                color,
            );
        }
    }
}
