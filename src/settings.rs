use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppSettings {
    #[serde(default)]
    pub batch: BatchSettings,

    #[serde(default)]
    pub timing: TimingSettings,

    #[serde(default)]
    pub emergency_stop_hotkey: HotkeyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchSettings {
    // Target application
    #[serde(default = "default_exe_path")]
    pub exe_path: String,
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_true")]
    pub launch_application: bool,

    // Inputs and outputs
    #[serde(default = "default_images_dir")]
    pub images_dir: String,
    #[serde(default = "default_input_list")]
    pub input_list_path: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    // Treated as Minimum Confidence (0.0-1.0)
    #[serde(default = "default_confidence")]
    pub confidence: f32,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            exe_path: default_exe_path(),
            window_title: default_window_title(),
            launch_application: true,
            images_dir: default_images_dir(),
            input_list_path: default_input_list(),
            output_dir: default_output_dir(),
            output_suffix: default_output_suffix(),
            confidence: default_confidence(),
        }
    }
}

fn default_exe_path() -> String {
    r"C:\Program Files (x86)\TRAD\OMERE 5.9\Omere.exe".to_string()
}

fn default_window_title() -> String {
    "OMERE".to_string()
}

fn default_images_dir() -> String {
    "images".to_string()
}

fn default_input_list() -> String {
    "electron_input_files.txt".to_string()
}

fn default_output_dir() -> String {
    "omere_outputs".to_string()
}

fn default_output_suffix() -> String {
    "_equiFlux.fle".to_string()
}

fn default_confidence() -> f32 {
    0.9
}

fn default_true() -> bool {
    true
}

/// Fixed delays that stand in for waiting on OMERE's dialogs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingSettings {
    pub startup_delay_ms: u64,
    pub window_timeout_ms: u64,
    pub click_settle_ms: u64,
    pub dialog_settle_ms: u64,
    pub calculation_wait_ms: u64,
    pub record_delay_ms: u64,
    pub field_offset_x: i32,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            startup_delay_ms: 4000,
            window_timeout_ms: 15000,
            click_settle_ms: 100,
            dialog_settle_ms: 500,
            calculation_wait_ms: 7000,
            record_delay_ms: 100,
            field_offset_x: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HotkeyModifiers {
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HotkeyKey {
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Pause,
    End,
}

impl HotkeyKey {
    pub const ALL: [HotkeyKey; 14] = [
        HotkeyKey::F1,
        HotkeyKey::F2,
        HotkeyKey::F3,
        HotkeyKey::F4,
        HotkeyKey::F5,
        HotkeyKey::F6,
        HotkeyKey::F7,
        HotkeyKey::F8,
        HotkeyKey::F9,
        HotkeyKey::F10,
        HotkeyKey::F11,
        HotkeyKey::F12,
        HotkeyKey::Pause,
        HotkeyKey::End,
    ];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HotkeyConfig {
    pub key: Option<HotkeyKey>,
    #[serde(default)]
    pub modifiers: HotkeyModifiers,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            key: Some(HotkeyKey::F12),
            modifiers: HotkeyModifiers::default(),
        }
    }
}

impl AppSettings {
    const SETTINGS_FILE: &'static str = "omere_batch_settings.json";

    /// Load settings from the default file, or defaults if it is missing or invalid
    pub fn load() -> Self {
        Self::load_from(Path::new(Self::SETTINGS_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<AppSettings>(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Ignoring invalid settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(Path::new(Self::SETTINGS_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Auto-save (errors only logged)
    pub fn auto_save(&self) {
        if let Err(e) = self.save() {
            tracing::warn!("Failed to save settings: {}", e);
        }
    }

    /// Directory that relative paths in the settings are resolved against
    pub fn base_dir() -> PathBuf {
        Path::new(Self::SETTINGS_FILE)
            .canonicalize()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf))
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default()
    }
}

/// Resolve a possibly relative settings path against `base`
pub fn resolve_path(base: &Path, value: &str) -> PathBuf {
    let path = Path::new(value.trim());
    if path.is_absolute() || base.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
