use crate::theme::{radius, section_heading};
use egui::Pos2;
use egui_phosphor::regular as ph;
use hexar_assistant::{Assistant, MessageRole};
use hexar_core::Vec2;
use hexar_graph::{AssistantPanel, InputEvent, PANEL_WIDTH, PointerTarget};
use std::time::Instant;

const MESSAGE_AREA_HEIGHT: f32 = 320.0;

/// Draw the floating assistant, or its reopen button when closed.
///
/// Returns the header press that starts a panel drag, if any.
pub fn assistant_panel_ui(
    ctx: &egui::Context,
    panel: &mut AssistantPanel,
    assistant: &mut Assistant,
    docked_origin: Vec2,
    now: Instant,
) -> Option<InputEvent> {
    if !panel.visible {
        reopen_button(ctx, panel);
        return None;
    }

    let screen = ctx.screen_rect();
    panel.keep_in_window(Vec2::new(screen.width(), screen.height()));
    let origin = panel.position().unwrap_or(docked_origin);
    let mut press = None;

    egui::Area::new(egui::Id::new("assistant_panel"))
        .order(egui::Order::Foreground)
        .fixed_pos(Pos2::new(origin.x, origin.y))
        .show(ctx, |ui| {
            egui::Frame::window(ui.style())
                .corner_radius(radius::LARGE)
                .show(ui, |ui| {
                    let inner_width = PANEL_WIDTH - ui.style().spacing.window_margin.sum().x;
                    ui.set_width(inner_width);

                    let header = ui
                        .horizontal(|ui| {
                            ui.label(egui::RichText::new(ph::DOTS_SIX_VERTICAL).weak());
                            ui.label(egui::RichText::new(format!("{} Hexar AI", ph::ROBOT)).strong());
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if ui.small_button(ph::X).on_hover_text("Close").clicked() {
                                    panel.close();
                                    assistant.cancel_pending();
                                }
                                let toggle_icon = if panel.minimized { ph::CARET_UP } else { ph::MINUS };
                                if ui.small_button(toggle_icon).on_hover_text("Minimize").clicked() {
                                    panel.toggle_minimized();
                                }
                            });
                        })
                        .response;
                    let grip = ui.interact(
                        header.rect,
                        ui.id().with("assistant_header"),
                        egui::Sense::drag(),
                    );
                    if grip.drag_started() {
                        if let Some(pos) = ctx.input(|i| i.pointer.press_origin()) {
                            press = Some(InputEvent::PointerDown {
                                pos: Vec2::new(pos.x, pos.y),
                                target: PointerTarget::AssistantHeader { panel_origin: origin },
                            });
                        }
                    }

                    if panel.minimized || !panel.visible {
                        return;
                    }
                    ui.separator();
                    transcript_ui(ui, assistant);
                    quick_actions_ui(ui, assistant);
                    input_ui(ui, assistant, now);
                });
        });

    press
}

fn reopen_button(ctx: &egui::Context, panel: &mut AssistantPanel) {
    let screen = ctx.screen_rect();
    egui::Area::new(egui::Id::new("assistant_reopen"))
        .order(egui::Order::Foreground)
        .fixed_pos(screen.max - egui::vec2(64.0, 96.0))
        .show(ctx, |ui| {
            let button = egui::Button::new(egui::RichText::new(ph::CHAT_CIRCLE_DOTS).size(22.0))
                .corner_radius(radius::PILL)
                .min_size(egui::vec2(44.0, 44.0));
            if ui.add(button).on_hover_text("Show AI assistant").clicked() {
                panel.show();
            }
        });
}

fn transcript_ui(ui: &mut egui::Ui, assistant: &mut Assistant) {
    egui::ScrollArea::vertical()
        .max_height(MESSAGE_AREA_HEIGHT)
        .stick_to_bottom(true)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for message in assistant.messages() {
                let (icon, color) = match message.role {
                    MessageRole::Assistant => (ph::ROBOT, ui.visuals().hyperlink_color),
                    MessageRole::User => (ph::USER, ui.visuals().strong_text_color()),
                    MessageRole::System => (ph::LIGHTBULB, ui.visuals().warn_fg_color),
                };
                ui.horizontal_top(|ui| {
                    ui.label(egui::RichText::new(icon).color(color));
                    ui.vertical(|ui| {
                        let text = egui::RichText::new(&message.content);
                        let text = if message.role == MessageRole::System {
                            text.italics().weak()
                        } else {
                            text
                        };
                        ui.add(egui::Label::new(text).wrap());
                        ui.label(egui::RichText::new(message.time_label()).small().weak());
                    });
                });
            }

            if assistant.is_pending() {
                ui.horizontal(|ui| {
                    ui.add(egui::Spinner::new());
                    ui.label(egui::RichText::new("Thinking...").weak());
                });
            }

            let mut toggled = None;
            if let Some(steps) = assistant.checklist() {
                ui.add_space(6.0);
                section_heading(ui, &format!("{} Troubleshooting Steps", ph::WRENCH));
                for (index, step) in steps.iter().enumerate() {
                    let marker = if step.is_completed() {
                        ph::CHECK_CIRCLE.to_string()
                    } else {
                        step.number.to_string()
                    };
                    let row = ui
                        .selectable_label(step.is_completed(), format!("{marker}  {}", step.title))
                        .on_hover_text("Click to mark complete");
                    ui.label(egui::RichText::new(step.description).small().weak());
                    if row.clicked() {
                        toggled = Some(index);
                    }
                }
            }
            if let Some(index) = toggled {
                assistant.toggle_step(index);
            }
        });
}

fn quick_actions_ui(ui: &mut egui::Ui, assistant: &mut Assistant) {
    let actions = assistant.quick_actions();
    if actions.is_empty() {
        return;
    }
    ui.horizontal_wrapped(|ui| {
        for action in actions {
            if ui.small_button(action.label).clicked() {
                assistant.apply_quick_action(action);
            }
        }
    });
}

fn input_ui(ui: &mut egui::Ui, assistant: &mut Assistant, now: Instant) {
    ui.horizontal(|ui| {
        let send_width = 36.0;
        let input = ui.add(
            egui::TextEdit::singleline(&mut assistant.input)
                .hint_text("Describe an issue...")
                .desired_width(ui.available_width() - send_width),
        );
        let enter = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let can_send = !assistant.input.trim().is_empty();
        let clicked = ui
            .add_enabled(can_send, egui::Button::new(ph::PAPER_PLANE_RIGHT))
            .on_hover_text("Send")
            .clicked();
        if (enter || clicked) && assistant.submit_input(now) {
            input.request_focus();
        }
    });
}
