/// Handle of a top-level window, kept as the raw value so non-Windows builds compile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHandle(pub isize);

#[cfg(windows)]
mod imp {
    use super::WindowHandle;
    use windows::Win32::Foundation::{BOOL, HWND, LPARAM};
    use windows::Win32::UI::WindowsAndMessaging::{
        EnumWindows, GetWindowTextLengthW, GetWindowTextW, IsWindowVisible,
        SetForegroundWindow,
    };

    struct Search {
        fragment: String,
        found: Option<(WindowHandle, String)>,
    }

    fn window_title(hwnd: HWND) -> Option<String> {
        unsafe {
            let len = GetWindowTextLengthW(hwnd);
            if len <= 0 {
                return None;
            }
            let mut buffer = vec![0u16; len as usize + 1];
            let copied = GetWindowTextW(hwnd, &mut buffer);
            if copied <= 0 {
                return None;
            }
            Some(String::from_utf16_lossy(&buffer[..copied as usize]))
        }
    }

    unsafe extern "system" fn enum_proc(hwnd: HWND, lparam: LPARAM) -> BOOL {
        let search = &mut *(lparam.0 as *mut Search);
        if !IsWindowVisible(hwnd).as_bool() {
            return BOOL(1);
        }
        if let Some(title) = window_title(hwnd) {
            if title.to_lowercase().contains(&search.fragment) {
                search.found = Some((WindowHandle(hwnd.0), title));
                return BOOL(0);
            }
        }
        BOOL(1)
    }

    pub fn find_window_by_title(fragment: &str) -> Option<(WindowHandle, String)> {
        let mut search = Search {
            fragment: fragment.to_lowercase(),
            found: None,
        };
        unsafe {
            // Returns an error when the callback stops the enumeration early
            let _ = EnumWindows(Some(enum_proc), LPARAM(&mut search as *mut Search as isize));
        }
        search.found
    }

    pub fn bring_to_foreground(handle: WindowHandle) -> bool {
        unsafe { SetForegroundWindow(HWND(handle.0)).as_bool() }
    }

    /// Make screen coordinates match the physical pixels the matcher sees
    pub fn enable_dpi_awareness() {
        use windows::Win32::UI::HiDpi::{
            SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
        };
        unsafe {
            let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
        }
    }
}

#[cfg(not(windows))]
mod imp {
    use super::WindowHandle;

    pub fn find_window_by_title(_fragment: &str) -> Option<(WindowHandle, String)> {
        None
    }

    pub fn bring_to_foreground(_handle: WindowHandle) -> bool {
        false
    }

    pub fn enable_dpi_awareness() {}
}

pub use imp::{bring_to_foreground, enable_dpi_awareness, find_window_by_title};
