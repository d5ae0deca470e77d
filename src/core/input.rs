/// Check if ESC key is currently down (works even when app doesn't have focus)
#[cfg(windows)]
pub fn is_escape_key_down() -> bool {
    use windows::Win32::UI::Input::KeyboardAndMouse::GetAsyncKeyState;

    unsafe {
        let key_state = GetAsyncKeyState(0x1B); // VK_ESCAPE
        (key_state as u16) & 0x8000 != 0
    }
}

#[cfg(not(windows))]
pub fn is_escape_key_down() -> bool {
    false
}
