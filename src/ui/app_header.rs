pub enum HeaderAction {
    ToggleLog,
    Help,
    None,
}

/// Render the app header (OMERE window status + utility buttons)
pub fn render_header(ui: &mut egui::Ui, omere_window: Option<&str>, stop_label: &str) -> HeaderAction {
    let mut action = HeaderAction::None;

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            match omere_window {
                Some(title) => {
                    ui.label(
                        egui::RichText::new(format!("OMERE open: {}", title))
                            .color(egui::Color32::from_rgb(168, 226, 187))
                            .strong(),
                    );
                }
                None => {
                    ui.label(
                        egui::RichText::new("OMERE window not detected")
                            .color(egui::Color32::from_rgb(200, 200, 200))
                            .strong(),
                    );
                }
            }
            ui.label(
                egui::RichText::new(format!("Emergency stop: Esc / {}", stop_label))
                    .color(egui::Color32::from_rgb(140, 140, 140))
                    .small(),
            );
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
            ui.spacing_mut().item_spacing = egui::vec2(6.0, 0.0);
            let compact_size = egui::vec2(66.0, 26.0);
            let help_size = egui::vec2(26.0, 26.0);

            if ui
                .add_sized(
                    help_size,
                    egui::Button::new(egui::RichText::new("?").strong())
                        .rounding(egui::Rounding::same(13.0)),
                )
                .clicked()
            {
                action = HeaderAction::Help;
            }

            if ui.add_sized(compact_size, egui::Button::new("Log")).clicked() {
                action = HeaderAction::ToggleLog;
            }
        });
    });

    action
}
