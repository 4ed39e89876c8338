use crate::theme::{component_color, section_heading};
use egui_phosphor::regular as ph;
use hexar_core::ComponentType;

pub const PALETTE_WIDTH: f32 = 220.0;

/// Project actions that have no backend yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectAction {
    Save,
    Export,
    Share,
    Invite,
}

impl ProjectAction {
    const ALL: [ProjectAction; 4] = [
        ProjectAction::Save,
        ProjectAction::Export,
        ProjectAction::Share,
        ProjectAction::Invite,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProjectAction::Save => "Save",
            ProjectAction::Export => "Export",
            ProjectAction::Share => "Share",
            ProjectAction::Invite => "Invite",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ProjectAction::Save => ph::FLOPPY_DISK,
            ProjectAction::Export => ph::DOWNLOAD_SIMPLE,
            ProjectAction::Share => ph::SHARE_NETWORK,
            ProjectAction::Invite => ph::USERS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteIntent {
    /// Click: add under the current selection.
    Add(ComponentType),
    Project(ProjectAction),
}

/// Component list plus project info. Buttons double as drag sources carrying
/// the component type as payload.
pub fn palette_ui(
    ui: &mut egui::Ui,
    project_id: Option<&str>,
    node_count: usize,
) -> Vec<PaletteIntent> {
    let mut intents = Vec::new();

    ui.heading("Components");
    ui.label(egui::RichText::new("Drag to add or click to create").small().weak());
    ui.add_space(4.0);

    for kind in ComponentType::ALL {
        let text = egui::RichText::new(format!("{}  {}", ph::SQUARE, kind.label()))
            .color(component_color(kind));
        let response = ui.add_sized(
            [ui.available_width(), 28.0],
            egui::Button::new(text).sense(egui::Sense::click_and_drag()),
        );
        response.dnd_set_drag_payload(kind);
        if response.clicked() {
            intents.push(PaletteIntent::Add(kind));
        }
        if response.dragged() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        }
    }

    ui.add_space(12.0);
    section_heading(ui, "Project Info");
    egui::Grid::new("project_info").num_columns(2).show(ui, |ui| {
        ui.label(egui::RichText::new("ID").strong());
        ui.label(project_id.unwrap_or("New Project"));
        ui.end_row();
        ui.label(egui::RichText::new("Nodes").strong());
        ui.label(node_count.to_string());
        ui.end_row();
        ui.label(egui::RichText::new("Status").strong());
        ui.label("Draft");
        ui.end_row();
    });

    ui.add_space(12.0);
    ui.horizontal_wrapped(|ui| {
        for action in ProjectAction::ALL {
            if ui
                .button(format!("{} {}", action.icon(), action.label()))
                .clicked()
            {
                intents.push(PaletteIntent::Project(action));
            }
        }
    });

    intents
}
