//! Catppuccin-based styling shared by the workspace panels.

use crate::settings::ThemeMode;
use egui::{Color32, Vec2};
use hexar_core::ComponentType;

pub mod spacing {
    pub const ITEM_SPACING: f32 = 8.0;
    pub const BUTTON_PADDING: f32 = 8.0;
}

pub mod radius {
    use egui::CornerRadius;

    pub const LARGE: CornerRadius = CornerRadius::same(10);
    pub const PILL: CornerRadius = CornerRadius::same(255);
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: ThemeMode,
    pub flavor: catppuccin_egui::Theme,
}

impl Theme {
    pub fn new(mode: ThemeMode) -> Self {
        let flavor = match mode {
            ThemeMode::Latte => catppuccin_egui::LATTE,
            ThemeMode::Frappe => catppuccin_egui::FRAPPE,
            ThemeMode::Macchiato => catppuccin_egui::MACCHIATO,
            ThemeMode::Mocha => catppuccin_egui::MOCHA,
        };
        Self { mode, flavor }
    }

    pub fn apply(&self, ctx: &egui::Context) {
        catppuccin_egui::set_theme(ctx, self.flavor);

        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        ctx.set_fonts(fonts);

        let mut style = (*ctx.style()).clone();
        style.spacing.item_spacing = Vec2::new(spacing::ITEM_SPACING, spacing::ITEM_SPACING);
        style.spacing.button_padding =
            Vec2::new(spacing::BUTTON_PADDING, spacing::BUTTON_PADDING / 2.0);
        style.interaction.show_tooltips_only_when_still = false;
        ctx.set_style(style);
    }

    pub fn canvas_background(&self) -> Color32 {
        self.flavor.base
    }

    pub fn grid_line(&self) -> Color32 {
        self.flavor.surface0
    }

    pub fn connection(&self) -> Color32 {
        self.flavor.overlay1
    }

    pub fn node_fill(&self) -> Color32 {
        self.flavor.mantle
    }

    pub fn node_border(&self, selected: bool) -> Color32 {
        if selected {
            self.flavor.blue
        } else {
            self.flavor.surface1
        }
    }
}

pub fn component_color(kind: ComponentType) -> Color32 {
    let [r, g, b] = kind.color();
    Color32::from_rgb(r, g, b)
}

pub fn badge(ui: &mut egui::Ui, text: &str, color: Color32) {
    let frame = egui::Frame::default()
        .fill(color)
        .corner_radius(radius::PILL)
        .inner_margin(egui::Margin::symmetric(6, 2));

    frame.show(ui, |ui| {
        ui.label(
            egui::RichText::new(text)
                .small()
                .color(ui.visuals().strong_text_color()),
        );
    });
}

pub fn section_heading(ui: &mut egui::Ui, text: &str) {
    ui.label(
        egui::RichText::new(text.to_uppercase())
            .small()
            .strong()
            .color(ui.visuals().weak_text_color()),
    );
}
