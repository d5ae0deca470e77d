use rustautogui::RustAutoGui;
use std::time::Instant;

/// Find a stored template on screen
/// Returns match centers in screen coordinates
pub fn find_stored_template(
    gui: &mut RustAutoGui,
    alias: &str,
    precision: f32,
) -> Option<Vec<(u32, u32)>> {
    let start_time = Instant::now();

    let result = match gui.find_stored_image_on_screen(precision, alias) {
        Ok(Some(matches)) => {
            let positions: Vec<(u32, u32)> = matches.iter().map(|(x, y, _score)| (*x, *y)).collect();

            if positions.is_empty() {
                None
            } else {
                Some(positions)
            }
        }
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("Template search for '{}' failed: {}", alias, e);
            None
        }
    };

    tracing::debug!(
        "Searched '{}' in {} ms ({})",
        alias,
        start_time.elapsed().as_millis(),
        if result.is_some() { "found" } else { "not found" }
    );

    result
}

/// Offset a located point horizontally, clamped to the screen's left edge
pub fn offset_point(pos: (u32, u32), offset_x: i32) -> (u32, u32) {
    let x = (pos.0 as i64 + offset_x as i64).max(0) as u32;
    (x, pos.1)
}
