use crate::settings::{HotkeyConfig, HotkeyKey, TimingSettings};
use crate::core::hotkey::{hotkey_key_label, hotkey_label};

fn ms_row(ui: &mut egui::Ui, label: &str, value: &mut u64, hint: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(label).strong());
        ui.add(egui::DragValue::new(value).speed(10.0).clamp_range(0..=120_000).suffix(" ms"));
    })
    .response
    .on_hover_text(hint);
}

/// Render delays and the emergency stop hotkey; returns true if the hotkey changed
pub fn render_timing(ui: &mut egui::Ui, timing: &mut TimingSettings, hotkey: &mut HotkeyConfig) -> bool {
    ui.heading("Timing");
    ui.label("OMERE gives no signal when a dialog is ready, so every step waits a fixed time.");
    ui.add_space(8.0);

    ui.group(|ui| {
        ms_row(ui, "Startup delay:", &mut timing.startup_delay_ms, "Wait after OMERE's window appears");
        ms_row(ui, "Window timeout:", &mut timing.window_timeout_ms, "How long to look for OMERE's window");
        ms_row(ui, "After click:", &mut timing.click_settle_ms, "Wait after ordinary button clicks");
        ms_row(ui, "After dialog open:", &mut timing.dialog_settle_ms, "Wait after opening Calculation Parameters");
        ms_row(ui, "Calculation:", &mut timing.calculation_wait_ms, "Wait for one calculation to finish");
        ms_row(ui, "Between records:", &mut timing.record_delay_ms, "Pause before each input file");

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Text box offset:").strong());
            ui.add(egui::DragValue::new(&mut timing.field_offset_x).clamp_range(-500..=500).suffix(" px"));
        })
        .response
        .on_hover_text("Distance from a label to the text box on its right");
    });

    ui.add_space(8.0);

    let before = *hotkey;
    ui.group(|ui| {
        ui.heading(egui::RichText::new("Emergency stop").size(14.0).strong());
        ui.horizontal(|ui| {
            ui.label("Key:");
            egui::ComboBox::from_id_source("stop_hotkey")
                .selected_text(hotkey_label(hotkey))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut hotkey.key, None, "Disabled");
                    for key in HotkeyKey::ALL {
                        ui.selectable_value(&mut hotkey.key, Some(key), hotkey_key_label(key));
                    }
                });
            ui.checkbox(&mut hotkey.modifiers.ctrl, "Ctrl");
            ui.checkbox(&mut hotkey.modifiers.alt, "Alt");
            ui.checkbox(&mut hotkey.modifiers.shift, "Shift");
        });
        ui.label("Esc also stops a running batch.");
    });

    before != *hotkey
}
