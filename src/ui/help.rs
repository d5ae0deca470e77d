use crate::core::hotkey::hotkey_label;
use crate::omere::buttons::Button;
use crate::settings::AppSettings;

pub fn render_help(ui: &mut egui::Ui, settings: &AppSettings) {
    ui.heading("Quick start");
    ui.label("- Take screenshots of OMERE's buttons on this computer and put them in the images folder.");
    ui.label("- Press Check images to confirm every screenshot loads.");
    ui.label("- Write one input file path per line in the input list; lines starting with # are skipped.");
    ui.label("- Press Preview jobs to see the output file name for each input.");
    ui.label("- Press Start and leave the mouse and keyboard alone until the batch finishes.");
    ui.label(format!(
        "- Press Esc or {} to stop.",
        hotkey_label(&settings.emergency_stop_hotkey)
    ));

    ui.add_space(10.0);
    ui.heading("Reference images");
    for button in Button::ALL {
        ui.label(format!("- {}: {}", button.file_name(), button.label()));
    }

    ui.add_space(10.0);
    ui.heading("Output names");
    ui.label("- The identifier is the input file name up to its first underscore.");
    ui.label(format!(
        "- Example: C:\\data\\Fe_electrons.txt -> {}\\Fe{}",
        settings.batch.output_dir, settings.batch.output_suffix
    ));
    ui.label("- Inputs sharing an identifier overwrite each other's output.");

    ui.add_space(10.0);
    ui.heading("Notes");
    ui.label("- Buttons that are not found are logged and skipped; the batch keeps going.");
    ui.label("- Increase the calculation wait if OMERE is still busy when the next record starts.");
    ui.label("- Screenshots must be taken at the same display scaling the batch runs at.");
    ui.label("- Settings save automatically.");
}
