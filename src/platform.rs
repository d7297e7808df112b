//! Platform detection utilities

use std::fs;

/// Does a /proc/version string come from a WSL kernel?
fn kernel_is_wsl(version: &str) -> bool {
    let lower = version.to_lowercase();
    lower.contains("microsoft") || lower.contains("wsl")
}

/// Detect if running in WSL (Windows Subsystem for Linux)
///
/// WSL changes which speech backend works and needs `select()` instead of
/// epoll on the terminal.
pub fn is_wsl() -> bool {
    if let Ok(contents) = fs::read_to_string("/proc/version") {
        if kernel_is_wsl(&contents) {
            return true;
        }
    }

    std::env::var("WSL_DISTRO_NAME").is_ok()
}
