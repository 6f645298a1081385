//! UI components using egui.

use egui::{Align2, Color32, Context, CornerRadius, Frame, Margin, Stroke, Vec2};

/// Actions that can be triggered by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Add a point where the axes cross.
    AddPoint,
}

/// Values shown in the toolbar.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Number of points on the graph.
    pub point_count: usize,
    /// Whether a point is being dragged.
    pub dragging: bool,
}

/// Draw the UI for one frame and return any action the user triggered.
pub fn render_ui(ctx: &Context, ui_state: &UiState) -> Option<UiAction> {
    let mut action = None;

    egui::Area::new(egui::Id::new("bottom_toolbar"))
        .anchor(Align2::CENTER_BOTTOM, Vec2::new(0.0, -12.0))
        .interactable(true)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            Frame::new()
                .fill(Color32::from_rgba_unmultiplied(250, 250, 252, 250))
                .corner_radius(CornerRadius::same(8))
                .stroke(Stroke::new(1.0, Color32::from_gray(220)))
                .shadow(egui::epaint::Shadow {
                    spread: 0,
                    blur: 6,
                    offset: [0, 2],
                    color: Color32::from_black_alpha(10),
                })
                .inner_margin(Margin::symmetric(12, 6))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let add = ui
                            .button(egui::RichText::new("Add point").size(14.0).color(Color32::from_gray(60)))
                            .on_hover_text("Add a point at the center (A)");
                        if add.clicked() {
                            action = Some(UiAction::AddPoint);
                        }

                        ui.add_space(8.0);
                        ui.label(egui::RichText::new("|").size(14.0).color(Color32::from_gray(200)));
                        ui.add_space(8.0);

                        let status = if ui_state.dragging {
                            format!("{} points (dragging)", ui_state.point_count)
                        } else {
                            format!("{} points", ui_state.point_count)
                        };
                        ui.label(egui::RichText::new(status).size(12.0).color(Color32::from_gray(100)));
                    });
                });
        });

    action
}
