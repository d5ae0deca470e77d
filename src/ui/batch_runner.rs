use crate::settings::BatchSettings;
use crate::ui::status::render_status;

#[derive(Debug, PartialEq, Eq)]
pub enum BatchUiAction {
    CheckImages,
    PreviewJobs,
    Start,
    Stop,
    None,
}

fn path_row(ui: &mut egui::Ui, label: &str, value: &mut String, pick: impl FnOnce() -> Option<std::path::PathBuf>) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(label).strong());
        ui.text_edit_singleline(value);
        if ui.button("Browse...").clicked() {
            if let Some(path) = pick() {
                *value = path.display().to_string();
            }
        }
    });
}

/// Render the batch configuration and controls
pub fn render_ui(
    ui: &mut egui::Ui,
    settings: &mut BatchSettings,
    is_running: bool,
    status: &str,
) -> BatchUiAction {
    let mut action = BatchUiAction::None;

    ui.heading("OMERE Batch");
    ui.label("Runs one equivalent fluence calculation per input file.");
    ui.add_space(8.0);

    ui.add_enabled_ui(!is_running, |ui| {
        ui.group(|ui| {
            ui.heading(egui::RichText::new("Application").size(14.0).strong());
            ui.add_space(4.0);

            ui.checkbox(&mut settings.launch_application, "Start OMERE (off: use the open window)");
            path_row(ui, "Omere.exe:", &mut settings.exe_path, || {
                rfd::FileDialog::new()
                    .add_filter("Executable", &["exe"])
                    .set_title("Select Omere.exe")
                    .pick_file()
            });
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Window title contains:").strong());
                ui.text_edit_singleline(&mut settings.window_title);
            });
        });

        ui.add_space(8.0);

        ui.group(|ui| {
            ui.heading(egui::RichText::new("Files").size(14.0).strong());
            ui.add_space(4.0);

            path_row(ui, "Reference images:", &mut settings.images_dir, || {
                rfd::FileDialog::new()
                    .set_title("Select folder with button screenshots")
                    .set_directory(std::env::current_dir().unwrap_or_default())
                    .pick_folder()
            });
            path_row(ui, "Input list:", &mut settings.input_list_path, || {
                rfd::FileDialog::new()
                    .add_filter("Text Files", &["txt"])
                    .set_title("Select list of input files")
                    .set_directory(std::env::current_dir().unwrap_or_default())
                    .pick_file()
            });
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Output folder:").strong());
                ui.text_edit_singleline(&mut settings.output_dir);
            });
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Output suffix:").strong());
                ui.text_edit_singleline(&mut settings.output_suffix);
            });
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Min Confidence:").strong());
                ui.add(egui::Slider::new(&mut settings.confidence, 0.5..=0.99));
            });
        });
    });

    ui.add_space(8.0);

    ui.horizontal(|ui| {
        if ui.add_enabled(!is_running, egui::Button::new("Check images")).clicked() {
            action = BatchUiAction::CheckImages;
        }
        if ui.add_enabled(!is_running, egui::Button::new("Preview jobs")).clicked() {
            action = BatchUiAction::PreviewJobs;
        }
    });

    ui.separator();

    if is_running {
        ui.colored_label(egui::Color32::GREEN, "RUNNING");
        if ui.button("Stop").clicked() {
            action = BatchUiAction::Stop;
        }
    } else if ui.button("Start").clicked() {
        action = BatchUiAction::Start;
    }

    ui.separator();
    render_status(ui, status, None);

    action
}
