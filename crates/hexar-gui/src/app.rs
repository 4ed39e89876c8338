use std::time::{Duration, Instant};

use crate::components::{
    assistant_panel::assistant_panel_ui,
    canvas::{CanvasOutput, CanvasView},
    notifications::NotificationManager,
    palette::{PALETTE_WIDTH, PaletteIntent, palette_ui},
    status_bar::status_bar_ui,
    toolbar::{ToolbarIntent, toolbar_ui},
};
use crate::settings::AppSettings;
use crate::theme::Theme;
use hexar_assistant::Assistant;
use hexar_core::Vec2;
use hexar_events::{Event, EventBus, EventListener};
use hexar_graph::{
    EditorState, InputEvent, InteractionController, Outcome, PANEL_WIDTH, SelectionBridge,
    ToolbarAction, ToolbarState, TreeModel, toolbar,
};

/// Gap between the docked assistant panel and the canvas edges.
const DOCK_MARGIN: f32 = 16.0;

pub struct WorkspaceApp {
    editor: EditorState,
    controller: InteractionController,
    bridge: SelectionBridge,
    assistant: Assistant,

    // Events
    event_bus: EventBus,

    // Settings
    settings: AppSettings,
    theme: Theme,

    // Views
    canvas: CanvasView,
    notifications: NotificationManager,
    docked_origin: Vec2,

    project_id: Option<String>,
}

impl WorkspaceApp {
    pub fn new(cc: &eframe::CreationContext<'_>, project_id: Option<String>, empty: bool) -> Self {
        let (settings, load_warning) = AppSettings::load();
        let theme = Theme::new(settings.theme);
        theme.apply(&cc.egui_ctx);
        tracing::info!("Applied theme {:?}", settings.theme);

        let mut editor = if empty {
            EditorState::new(TreeModel::new())
        } else {
            EditorState::demo()
        };
        editor.panel.visible = settings.show_assistant;

        let event_bus = EventBus::new();
        if let Some(id) = project_id {
            event_bus.publish(Event::OpenProject { id });
        }
        if let Some(message) = load_warning {
            event_bus.publish(Event::ShowWarning { message });
        }

        Self {
            editor,
            controller: InteractionController::with_drag_threshold(settings.drag_threshold_px),
            bridge: SelectionBridge::new(),
            assistant: Assistant::new(Duration::from_millis(settings.assistant_latency_ms)),
            event_bus,
            theme,
            canvas: CanvasView::new(),
            notifications: NotificationManager::new(),
            docked_origin: Vec2::new(DOCK_MARGIN, DOCK_MARGIN),
            project_id: None,
            settings,
        }
    }

    fn project_label(&self) -> &str {
        self.project_id.as_deref().unwrap_or("New Project")
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) -> Vec<ToolbarAction> {
        if ctx.wants_keyboard_input() || self.controller.editing().is_some() {
            return Vec::new();
        }
        ctx.input(|i| {
            let mut actions = Vec::new();
            if i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace) {
                actions.push(ToolbarAction::DeleteSelected);
            }
            if i.modifiers.command
                && (i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals))
            {
                actions.push(ToolbarAction::ZoomIn);
            }
            if i.modifiers.command && i.key_pressed(egui::Key::Minus) {
                actions.push(ToolbarAction::ZoomOut);
            }
            if i.modifiers.command && i.key_pressed(egui::Key::Num0) {
                actions.push(ToolbarAction::ResetView);
            }
            actions
        })
    }

    fn apply_toolbar_intent(&mut self, intent: ToolbarIntent) {
        match intent {
            ToolbarIntent::Editor(action) => {
                let outcome = toolbar::apply(&mut self.editor, action);
                self.publish_outcome(outcome);
            }
            ToolbarIntent::ToggleSidebar => self.settings.show_sidebar = !self.settings.show_sidebar,
            ToolbarIntent::ShowAssistant => self.editor.panel.show(),
            ToolbarIntent::SetTheme(mode) => self.settings.theme = mode,
            ToolbarIntent::ToggleGrid => self.settings.show_grid = !self.settings.show_grid,
        }
    }

    fn apply_palette_intent(&mut self, intent: PaletteIntent) {
        match intent {
            PaletteIntent::Add(kind) => {
                let outcome = toolbar::apply(&mut self.editor, ToolbarAction::AddNode(kind));
                self.publish_outcome(outcome);
            }
            PaletteIntent::Project(action) => self.event_bus.publish(Event::ShowInfo {
                message: format!("{} is not available yet", action.label()),
            }),
        }
    }

    fn handle_input(&mut self, event: InputEvent, surface: &hexar_graph::Surface) {
        let outcome = self.controller.handle(event, &mut self.editor, surface);
        self.publish_outcome(outcome);
    }

    /// Feed one frame of canvas and pointer input through the controller.
    ///
    /// Presses go first, then a canvas leave, then raw moves and releases,
    /// then label edits, so a click completed within a single frame still
    /// reads as press then release. Only pans end on leaving the canvas; node
    /// and panel drags follow the pointer anywhere in the window.
    fn process_pointer(
        &mut self,
        ctx: &egui::Context,
        canvas: CanvasOutput,
        header_press: Option<InputEvent>,
    ) {
        let surface = canvas.surface;
        for press in canvas.presses.into_iter().chain(header_press) {
            self.handle_input(press, &surface);
        }
        if canvas.pointer_left {
            self.handle_input(InputEvent::PointerLeave, &surface);
        }

        let raw = ctx.input(|i| i.events.clone());
        for event in raw {
            let input = match event {
                egui::Event::PointerMoved(pos) if self.controller.is_pointer_tracking() => {
                    InputEvent::PointerMove {
                        pos: Vec2::new(pos.x, pos.y),
                    }
                }
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed: false,
                    ..
                } => InputEvent::PointerUp {
                    pos: Vec2::new(pos.x, pos.y),
                },
                egui::Event::PointerGone => InputEvent::PointerLeave,
                _ => continue,
            };
            self.handle_input(input, &surface);
        }

        for edit in canvas.edits {
            self.handle_input(edit, &surface);
        }

        if let Some((kind, canvas_pos)) = canvas.dropped {
            if let Some(id) = self.editor.drop_component(kind.token(), canvas_pos) {
                self.publish_outcome(Outcome::NodeAdded(id));
            }
        }
    }

    fn publish_outcome(&mut self, outcome: Outcome) {
        let event = match outcome {
            Outcome::NodeAdded(id) => {
                let Some(node) = self.editor.tree.get(&id) else {
                    return;
                };
                Event::NodeAdded {
                    kind: node.kind,
                    parent: node.parent.clone(),
                    id,
                }
            }
            Outcome::NodesDeleted { id, removed } => {
                self.controller.forget_removed(&removed);
                Event::NodeDeleted { id, removed }
            }
            Outcome::NodeMoved(id) => {
                let Some(node) = self.editor.tree.get(&id) else {
                    return;
                };
                Event::NodeMoved {
                    position: node.position,
                    id,
                }
            }
            Outcome::LabelCommitted { id, label } => Event::NodeRenamed { id, label },
            Outcome::ViewportChanged => Event::ViewportChanged {
                zoom: self.editor.viewport.zoom(),
                pan: self.editor.viewport.pan(),
            },
            Outcome::SelectionChanged(_)
            | Outcome::EditStarted(_)
            | Outcome::LabelRejected(_)
            | Outcome::EditCancelled(_)
            | Outcome::PanelMoved
            | Outcome::None => return,
        };
        self.event_bus.publish(event);
    }
}

impl eframe::App for WorkspaceApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.settings.show_assistant = self.editor.panel.visible;
        self.settings.save();
        tracing::info!("Exiting with {} nodes", self.editor.tree.len());
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.theme.mode != self.settings.theme {
            tracing::info!("Applying theme {:?}", self.settings.theme);
            self.theme = Theme::new(self.settings.theme);
            self.theme.apply(ctx);
        }
        let now = Instant::now();

        let shortcuts = self.handle_shortcuts(ctx);

        let toolbar_state = ToolbarState::from_editor(&self.editor);
        let toolbar_intents = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar_ui(ui, &toolbar_state, self.settings.theme, self.settings.show_grid)
            })
            .inner;

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            status_bar_ui(ui, &self.editor, self.project_label());
        });

        let palette_intents = if self.settings.show_sidebar {
            egui::SidePanel::left("palette")
                .exact_width(PALETTE_WIDTH)
                .resizable(false)
                .show(ctx, |ui| {
                    palette_ui(ui, self.project_id.as_deref(), self.editor.tree.len())
                })
                .inner
        } else {
            Vec::new()
        };

        let canvas = egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                self.docked_origin = Vec2::new(
                    rect.max.x - PANEL_WIDTH - DOCK_MARGIN,
                    rect.min.y + DOCK_MARGIN,
                );
                self.canvas
                    .show(ui, &self.editor, &self.controller, &self.theme, &self.settings)
            })
            .inner;

        let header_press = assistant_panel_ui(
            ctx,
            &mut self.editor.panel,
            &mut self.assistant,
            self.docked_origin,
            now,
        );

        for action in shortcuts {
            self.apply_toolbar_intent(ToolbarIntent::Editor(action));
        }
        for intent in toolbar_intents {
            self.apply_toolbar_intent(intent);
        }
        for intent in palette_intents {
            self.apply_palette_intent(intent);
        }
        self.process_pointer(ctx, canvas, header_press);

        if let Some(change) = self.bridge.sync(&self.editor.selection, &self.editor.tree) {
            self.event_bus.publish(Event::SelectionChanged {
                id: change.current.map(|node| node.id),
            });
        }

        let bus = self.event_bus.clone();
        bus.dispatch_to(self);

        let selected = self.editor.selection.node(&self.editor.tree);
        if self.assistant.poll(now, self.editor.tree.nodes(), selected) {
            ctx.request_repaint();
        }
        if let Some(wait) = self.assistant.time_until_reply(now) {
            ctx.request_repaint_after(wait);
        }

        self.notifications.render(ctx);
    }
}

impl EventListener for WorkspaceApp {
    fn handle_event(&mut self, event: &Event) {
        match event {
            Event::SelectionChanged { id } => {
                let node = id.as_ref().and_then(|id| self.editor.tree.get(id));
                self.assistant.on_selection_changed(node);
            }
            Event::ShowInfo { message } => self.notifications.info(message.clone()),
            Event::ShowWarning { message } => self.notifications.warning(message.clone()),
            Event::OpenProject { id } => {
                tracing::info!("Opening project {}", id);
                self.project_id = Some(id.clone());
            }
            Event::NodeDeleted { id, removed } => {
                tracing::info!("Deleted {} ({} nodes)", id, removed.len());
            }
            other => tracing::trace!("event {:?}", other),
        }
    }
}
