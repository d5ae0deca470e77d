pub fn status_color(status: &str) -> egui::Color32 {
    if status.starts_with("Record") || status.contains("Running") || status.contains("complete") {
        egui::Color32::from_rgb(100, 255, 100)
    } else if status.contains("Error") || status.contains("missing") || status.contains("Failed") {
        egui::Color32::from_rgb(255, 100, 100)
    } else {
        egui::Color32::GRAY
    }
}

pub fn render_status(ui: &mut egui::Ui, status: &str, hotkey_error: Option<&str>) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Status:").strong());
        ui.label(egui::RichText::new(status).color(status_color(status)));
    });

    if let Some(err) = hotkey_error {
        let full = format!("Hotkey error: {}", err);
        let shortened = if full.chars().count() > 80 {
            format!("{}...", full.chars().take(77).collect::<String>())
        } else {
            full.clone()
        };
        let label = egui::RichText::new(shortened).color(egui::Color32::from_rgb(200, 120, 120));
        let response = ui.label(label);
        if full.chars().count() > 80 {
            response.on_hover_text(full);
        }
    }
}
