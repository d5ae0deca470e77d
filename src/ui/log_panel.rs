fn line_color(line: &str) -> egui::Color32 {
    if line.contains("not found on screen") || line.contains("failed") || line.contains("Duplicate") {
        egui::Color32::from_rgb(230, 190, 110)
    } else if line.contains("Error") {
        egui::Color32::from_rgb(240, 120, 120)
    } else {
        egui::Color32::from_rgb(200, 200, 200)
    }
}

/// Returns true when the user asked to clear the log
pub fn render_log_panel(ctx: &egui::Context, log_snapshot: &[String], is_running: bool) -> bool {
    const RUNNING_LOG_LINES: usize = 20;
    let mut clear = false;

    egui::SidePanel::right("log_panel")
        .resizable(true)
        .default_width(320.0)
        .min_width(200.0)
        .show(ctx, |ui| {
            egui::Frame::none()
                .fill(egui::Color32::from_rgb(12, 12, 12))
                .inner_margin(egui::Margin::same(8.0))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new("Log")
                                .strong()
                                .color(egui::Color32::LIGHT_GRAY),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui
                                .add_enabled(!is_running && !log_snapshot.is_empty(), egui::Button::new("Clear").small())
                                .clicked()
                            {
                                clear = true;
                            }
                            ui.label(
                                egui::RichText::new(format!("{} lines", log_snapshot.len()))
                                    .small()
                                    .color(egui::Color32::DARK_GRAY),
                            );
                        });
                    });

                    ui.add_space(6.0);
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .stick_to_bottom(true)
                        .show(ui, |ui| {
                            if log_snapshot.is_empty() {
                                ui.label(
                                    egui::RichText::new("No log entries yet.")
                                        .italics()
                                        .color(egui::Color32::DARK_GRAY),
                                );
                                return;
                            }

                            // Keep the panel cheap to draw while the batch is typing
                            let start_idx = if is_running {
                                log_snapshot.len().saturating_sub(RUNNING_LOG_LINES)
                            } else {
                                0
                            };
                            for line in &log_snapshot[start_idx..] {
                                ui.label(
                                    egui::RichText::new(line)
                                        .monospace()
                                        .color(line_color(line)),
                                );
                            }
                        });
                });
        });

    clear
}
