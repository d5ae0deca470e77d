use std::time::{Duration, Instant};

use eframe::egui;

use crate::core::hotkey::{hotkey_label, EmergencyStop};
use crate::core::input::is_escape_key_down;
use crate::core::window::find_window_by_title;
use crate::settings::AppSettings;
use crate::tools::batch_runner::BatchRunnerTool;
use crate::ui::app_header::{render_header, HeaderAction};
use crate::ui::help::render_help;
use crate::ui::log_panel::render_log_panel;
use crate::ui::status::render_status;
use crate::ui::timing::render_timing;

const WINDOW_CHECK_INTERVAL: Duration = Duration::from_secs(1);
const SAVE_DELAY: Duration = Duration::from_millis(750);

/// Writes settings once edits have settled and no text field has focus
struct SettingsSaver {
    saved: AppSettings,
    last_seen: AppSettings,
    last_edit: Instant,
}

impl SettingsSaver {
    fn new(settings: &AppSettings, now: Instant) -> Self {
        Self {
            saved: settings.clone(),
            last_seen: settings.clone(),
            last_edit: now,
        }
    }

    /// True when `settings` has unsaved edits that have been quiet for `SAVE_DELAY`
    fn due(&mut self, settings: &AppSettings, editing: bool, now: Instant) -> bool {
        if *settings != self.last_seen {
            self.last_seen = settings.clone();
            self.last_edit = now;
        }
        *settings != self.saved && !editing && now.duration_since(self.last_edit) >= SAVE_DELAY
    }

    fn mark_saved(&mut self, settings: &AppSettings) {
        self.saved = settings.clone();
    }
}

pub struct OmereBatchApp {
    settings: AppSettings,
    saver: SettingsSaver,
    batch: BatchRunnerTool,
    emergency_stop: EmergencyStop,

    // OMERE window detection
    omere_window: Option<String>,
    last_window_check: Option<Instant>,

    // Tab state
    selected_tab: Tab,
    show_log: bool,
}

impl OmereBatchApp {
    pub fn new(settings: AppSettings) -> Self {
        let mut emergency_stop = EmergencyStop::new();
        emergency_stop.apply(&settings.emergency_stop_hotkey);

        Self {
            saver: SettingsSaver::new(&settings, Instant::now()),
            settings,
            batch: BatchRunnerTool::default(),
            emergency_stop,
            omere_window: None,
            last_window_check: None,
            selected_tab: Tab::default(),
            show_log: true,
        }
    }

    fn refresh_window_status(&mut self) {
        let due = self
            .last_window_check
            .map_or(true, |t| t.elapsed() >= WINDOW_CHECK_INTERVAL);
        if due {
            self.omere_window = find_window_by_title(&self.settings.batch.window_title).map(|(_, title)| title);
            self.last_window_check = Some(Instant::now());
        }
    }

    fn save_if_changed(&mut self, editing: bool) {
        if self.saver.due(&self.settings, editing, Instant::now()) {
            self.settings.auto_save();
            self.saver.mark_saved(&self.settings);
        }
    }
}

#[derive(PartialEq, Eq, Default)]
enum Tab {
    #[default]
    Batch,
    Timing,
    Help,
}

impl eframe::App for OmereBatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Emergency stop works while OMERE has focus
        let hotkey_pressed = self.emergency_stop.poll();
        if self.batch.is_running() && (hotkey_pressed || is_escape_key_down()) {
            self.batch.stop();
        }

        self.refresh_window_status();

        if self.show_log {
            let snapshot = self.batch.log_snapshot();
            if render_log_panel(ctx, &snapshot, self.batch.is_running()) {
                self.batch.clear_log();
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let stop_label = hotkey_label(&self.settings.emergency_stop_hotkey);
            match render_header(ui, self.omere_window.as_deref(), &stop_label) {
                HeaderAction::ToggleLog => self.show_log = !self.show_log,
                HeaderAction::Help => self.selected_tab = Tab::Help,
                HeaderAction::None => {}
            }
            ui.separator();

            // Tab navigation bar
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.selected_tab, Tab::Batch, "Batch");
                ui.selectable_value(&mut self.selected_tab, Tab::Timing, "Timing");
                ui.selectable_value(&mut self.selected_tab, Tab::Help, "Help");
            });
            ui.separator();

            // Content area
            egui::ScrollArea::vertical().show(ui, |ui| match self.selected_tab {
                Tab::Batch => {
                    self.batch.update(ui, &mut self.settings);
                }
                Tab::Timing => {
                    if render_timing(ui, &mut self.settings.timing, &mut self.settings.emergency_stop_hotkey) {
                        self.emergency_stop.apply(&self.settings.emergency_stop_hotkey);
                    }
                    ui.separator();
                    render_status(ui, &self.batch.get_status(), self.emergency_stop.error());
                }
                Tab::Help => {
                    render_help(ui, &self.settings);
                }
            });
        });

        self.save_if_changed(ctx.wants_keyboard_input());

        // Keep polling the stop keys and worker status while a batch runs
        ctx.request_repaint_after(if self.batch.is_running() {
            Duration::from_millis(100)
        } else {
            WINDOW_CHECK_INTERVAL
        });
    }
}
