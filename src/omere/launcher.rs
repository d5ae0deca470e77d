use std::path::Path;
use std::process::{Child, Command};
use std::time::{Duration, Instant};

use crate::core::window::{bring_to_foreground, find_window_by_title, WindowHandle};
use crate::error::{AutomationError, Result};

const WINDOW_POLL_MS: u64 = 250;

/// Start OMERE with its install directory as working directory
pub fn launch(exe_path: &Path) -> Result<Child> {
    if !exe_path.is_file() {
        return Err(AutomationError::ExecutableNotFound(exe_path.to_path_buf()));
    }

    let mut command = Command::new(exe_path);
    if let Some(dir) = exe_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        command.current_dir(dir);
    }

    let child = command.spawn().map_err(AutomationError::Launch)?;
    tracing::info!("Started {} (pid {})", exe_path.display(), child.id());
    Ok(child)
}

/// Poll for a visible window whose title contains `title`
/// `should_stop` is checked between polls
pub fn wait_for_window(
    title: &str,
    timeout: Duration,
    should_stop: &dyn Fn() -> bool,
) -> Result<Option<(WindowHandle, String)>> {
    let deadline = Instant::now() + timeout;
    loop {
        if should_stop() {
            return Err(AutomationError::Cancelled);
        }
        if let Some(found) = find_window_by_title(title) {
            return Ok(Some(found));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        std::thread::sleep(Duration::from_millis(WINDOW_POLL_MS));
    }
}

/// Bring the OMERE window forward if it can be found; best effort
pub fn focus_window(title: &str, timeout: Duration, should_stop: &dyn Fn() -> bool) -> Result<bool> {
    match wait_for_window(title, timeout, should_stop)? {
        Some((handle, window_title)) => {
            if !bring_to_foreground(handle) {
                tracing::warn!("Could not bring '{}' to the foreground", window_title);
            }
            tracing::info!("Found window '{}'", window_title);
            Ok(true)
        }
        None => {
            tracing::warn!("No window titled '{}' appeared within {:?}", title, timeout);
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_executable_is_reported() {
        let dir = tempdir().expect("Failed to create temp directory");
        let exe = dir.path().join("Omere.exe");
        match launch(&exe) {
            Err(AutomationError::ExecutableNotFound(path)) => assert_eq!(path, exe),
            other => panic!("unexpected result: {:?}", other.map(|c| c.id())),
        }
    }

    #[test]
    fn waiting_honours_stop_request() {
        let result = wait_for_window("no such window", Duration::from_secs(30), &|| true);
        assert!(matches!(result, Err(AutomationError::Cancelled)));
    }

    #[test]
    fn waiting_times_out_without_a_window() {
        let result = wait_for_window(
            "omere-batch test window that never exists",
            Duration::from_millis(0),
            &|| false,
        )
        .expect("wait failed");
        assert!(result.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn launched_program_runs_in_its_own_directory() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().expect("Failed to create temp directory");
        let install = dir.path().join("OMERE 5.9");
        fs::create_dir(&install).expect("create dir failed");
        let exe = install.join("omere.sh");
        fs::write(&exe, "#!/bin/sh\npwd > started_in.txt\n").expect("write failed");
        fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).expect("chmod failed");

        // A parallel test may still hold the fresh file open while forking (ETXTBSY)
        let mut child = None;
        for _ in 0..20 {
            match launch(&exe) {
                Ok(c) => {
                    child = Some(c);
                    break;
                }
                Err(AutomationError::Launch(e)) if e.raw_os_error() == Some(26) => {
                    std::thread::sleep(Duration::from_millis(50));
                }
                Err(e) => panic!("launch failed: {}", e),
            }
        }
        let status = child.expect("launch kept failing").wait().expect("wait failed");
        assert!(status.success());

        let started_in = fs::read_to_string(install.join("started_in.txt")).expect("script did not run");
        assert_eq!(
            Path::new(started_in.trim()).canonicalize().expect("canonicalize failed"),
            install.canonicalize().expect("canonicalize failed")
        );
    }
}
