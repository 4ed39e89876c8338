use crate::settings::ThemeMode;
use crate::theme::component_color;
use egui_phosphor::regular as ph;
use hexar_core::ComponentType;
use hexar_graph::{ToolbarAction, ToolbarState};

/// Component types offered as one-click buttons; the rest sit in the menu.
const QUICK_ADD_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolbarIntent {
    Editor(ToolbarAction),
    ToggleSidebar,
    ShowAssistant,
    SetTheme(ThemeMode),
    ToggleGrid,
}

pub fn toolbar_ui(
    ui: &mut egui::Ui,
    state: &ToolbarState,
    theme: ThemeMode,
    show_grid: bool,
) -> Vec<ToolbarIntent> {
    let mut intents = Vec::new();

    ui.horizontal(|ui| {
        if ui
            .button(ph::SIDEBAR)
            .on_hover_text("Toggle palette")
            .clicked()
        {
            intents.push(ToolbarIntent::ToggleSidebar);
        }
        ui.separator();

        for kind in ComponentType::ALL.into_iter().take(QUICK_ADD_COUNT) {
            let text = egui::RichText::new(format!("{} {}", ph::PLUS, kind.label()))
                .color(component_color(kind));
            if ui
                .button(text)
                .on_hover_text(format!("Add {}", kind.label()))
                .clicked()
            {
                intents.push(ToolbarIntent::Editor(ToolbarAction::AddNode(kind)));
            }
        }
        ui.menu_button(format!("{} More", ph::CARET_DOWN), |ui| {
            for kind in ComponentType::ALL {
                if ui.button(kind.label()).clicked() {
                    intents.push(ToolbarIntent::Editor(ToolbarAction::AddNode(kind)));
                    ui.close();
                }
            }
        });
        ui.separator();

        if ui
            .add_enabled(state.can_delete, egui::Button::new(format!("{} Delete", ph::TRASH)))
            .on_hover_text("Delete selected node and its children")
            .on_disabled_hover_text("Select a node first")
            .clicked()
        {
            intents.push(ToolbarIntent::Editor(ToolbarAction::DeleteSelected));
        }
        ui.add_enabled(false, egui::Button::new(ph::ARROW_COUNTER_CLOCKWISE))
            .on_disabled_hover_text("Undo (Coming soon)");
        ui.add_enabled(false, egui::Button::new(ph::ARROW_CLOCKWISE))
            .on_disabled_hover_text("Redo (Coming soon)");
        ui.separator();

        if ui
            .add_enabled(state.can_zoom_out, egui::Button::new(ph::MAGNIFYING_GLASS_MINUS))
            .on_hover_text("Zoom out")
            .clicked()
        {
            intents.push(ToolbarIntent::Editor(ToolbarAction::ZoomOut));
        }
        ui.label(format!("{}%", state.zoom_percent));
        if ui
            .add_enabled(state.can_zoom_in, egui::Button::new(ph::MAGNIFYING_GLASS_PLUS))
            .on_hover_text("Zoom in")
            .clicked()
        {
            intents.push(ToolbarIntent::Editor(ToolbarAction::ZoomIn));
        }
        if ui
            .button(ph::CORNERS_OUT)
            .on_hover_text("Reset view")
            .clicked()
        {
            intents.push(ToolbarIntent::Editor(ToolbarAction::ResetView));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .button(format!("{} Assistant", ph::ROBOT))
                .on_hover_text("Show the troubleshooting assistant")
                .clicked()
            {
                intents.push(ToolbarIntent::ShowAssistant);
            }
            ui.menu_button(ph::PALETTE, |ui| {
                for mode in ThemeMode::ALL {
                    if ui.radio(theme == mode, mode.label()).clicked() {
                        intents.push(ToolbarIntent::SetTheme(mode));
                        ui.close();
                    }
                }
                ui.separator();
                let mut grid = show_grid;
                if ui.checkbox(&mut grid, "Show grid").changed() {
                    intents.push(ToolbarIntent::ToggleGrid);
                }
            });
            ui.label(egui::RichText::new(state.status).weak());
        });
    });

    intents
}
