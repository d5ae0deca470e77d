use rustautogui::RustAutoGui;
use std::thread;
use std::time::Duration;

use crate::error::{AutomationError, Result};

/// Delay for a specified number of milliseconds
pub fn delay_ms(ms: u64) {
    if ms > 0 {
        thread::sleep(Duration::from_millis(ms));
    }
}

/// Move to screen coordinates and left click once
pub fn click_at_screen(gui: &mut RustAutoGui, x: u32, y: u32) -> Result<()> {
    gui.move_mouse_to_pos(x, y, 0.0)
        .map_err(|e| AutomationError::Input(format!("Failed to move mouse to ({}, {}): {}", x, y, e)))?;

    // Short sleep to stabilize cursor
    thread::sleep(Duration::from_millis(20));

    gui.left_click()
        .map_err(|e| AutomationError::Input(format!("Failed to click at ({}, {}): {}", x, y, e)))
}

/// Select everything in the focused text box and delete it
pub fn clear_focused_field(gui: &mut RustAutoGui) -> Result<()> {
    gui.keyboard_multi_key("ctrl", "a", None)
        .map_err(|e| AutomationError::Input(format!("Ctrl+A failed: {}", e)))?;
    gui.keyboard_command("delete")
        .map_err(|e| AutomationError::Input(format!("Delete failed: {}", e)))
}

/// Type text into the focused control
pub fn type_text(gui: &mut RustAutoGui, text: &str) -> Result<()> {
    gui.keyboard_input(text)
        .map_err(|e| AutomationError::Input(format!("Keyboard error: {}", e)))
}
