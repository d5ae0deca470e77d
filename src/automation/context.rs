use rustautogui::{MatchMode, RustAutoGui};
use std::path::Path;

use crate::automation::detection::find_stored_template;
use crate::automation::interaction::{clear_focused_field, click_at_screen, delay_ms, type_text};
use crate::error::{AutomationError, Result};
use crate::omere::buttons::Button;
use crate::omere::runner::Desktop;

/// Screen automation backed by rustautogui with every OMERE button stored as a template
pub struct AutomationContext {
    pub gui: RustAutoGui,
    precision: f32,
}

impl AutomationContext {
    pub fn new(precision: f32) -> Result<Self> {
        let gui = RustAutoGui::new(false)
            .map_err(|e| AutomationError::Backend(format!("Failed to initialize RustAutoGui: {}", e)))?;

        Ok(Self { gui, precision })
    }

    /// Store a template searched over the whole screen
    pub fn store_template(&mut self, path: &Path, alias: &str) -> Result<()> {
        let path_str = path.to_string_lossy();
        self.gui
            .store_template_from_file(&path_str, None, MatchMode::Segmented, alias)
            .map_err(|e| AutomationError::Template {
                name: alias.to_string(),
                reason: e.to_string(),
            })
    }

    /// Load the reference screenshot of every button from `images_dir`
    pub fn store_button_templates(&mut self, images_dir: &Path) -> Result<()> {
        for button in Button::ALL {
            self.store_template(&button.template_path(images_dir), button.alias())?;
        }
        Ok(())
    }
}

impl Desktop for AutomationContext {
    fn locate(&mut self, button: Button) -> Option<(u32, u32)> {
        let precision = self.precision;
        find_stored_template(&mut self.gui, button.alias(), precision)
            .and_then(|matches| matches.into_iter().next())
    }

    fn click_at(&mut self, x: u32, y: u32) -> Result<()> {
        click_at_screen(&mut self.gui, x, y)
    }

    fn clear_field(&mut self) -> Result<()> {
        clear_focused_field(&mut self.gui)
    }

    fn type_text(&mut self, text: &str) -> Result<()> {
        type_text(&mut self.gui, text)
    }

    fn pause(&mut self, ms: u64) {
        delay_ms(ms);
    }
}
