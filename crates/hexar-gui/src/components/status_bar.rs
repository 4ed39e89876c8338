use crate::theme::badge;
use egui_phosphor::regular as ph;
use hexar_graph::{EditorState, ToolbarState};

/// Bottom strip: selection hint on the left, counters on the right.
pub fn status_bar_ui(ui: &mut egui::Ui, editor: &EditorState, project_label: &str) {
    let state = ToolbarState::from_editor(editor);
    ui.horizontal(|ui| {
        let icon = if editor.selection.is_empty() {
            ph::CURSOR_CLICK
        } else {
            ph::CHECK_CIRCLE
        };
        ui.label(egui::RichText::new(format!("{icon} {}", state.status)).weak());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            badge(
                ui,
                &format!("{}%", state.zoom_percent),
                ui.visuals().window_fill,
            );
            ui.separator();
            badge(
                ui,
                &format!("{} nodes", editor.tree.len()),
                ui.visuals().selection.bg_fill,
            );
            ui.separator();
            ui.label(egui::RichText::new(project_label).small().weak());
        });
    });
}
