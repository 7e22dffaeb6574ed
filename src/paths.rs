//! Platform-specific filesystem path helpers.

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "MAIRE_CONFIG_PATH";

/// Path to the debug log file, located in the OS temp directory.
#[must_use]
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("maire.log")
}

#[must_use]
#[cfg(windows)]
fn home_dir_from(var_os: &mut impl FnMut(&'static str) -> Option<OsString>) -> Option<PathBuf> {
    if let Some(home) = var_os("USERPROFILE") {
        return Some(PathBuf::from(home));
    }
    var_os("HOME").map(PathBuf::from)
}

#[must_use]
#[cfg(not(windows))]
fn home_dir_from(var_os: &mut impl FnMut(&'static str) -> Option<OsString>) -> Option<PathBuf> {
    var_os("HOME").map(PathBuf::from)
}

#[must_use]
#[cfg(windows)]
fn config_dir_from(var_os: &mut impl FnMut(&'static str) -> Option<OsString>) -> Option<PathBuf> {
    var_os("APPDATA")
        .map(PathBuf::from)
        .or_else(|| home_dir_from(var_os).map(|home| home.join("AppData").join("Roaming")))
}

#[must_use]
#[cfg(not(windows))]
fn config_dir_from(var_os: &mut impl FnMut(&'static str) -> Option<OsString>) -> Option<PathBuf> {
    var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| home_dir_from(var_os).map(|home| home.join(".config")))
}

/// Resolve the config file path, honoring `MAIRE_CONFIG_PATH`.
#[must_use]
pub fn config_file() -> PathBuf {
    let mut var_os = |key: &'static str| std::env::var_os(key);
    config_file_from(&mut var_os)
}

fn config_file_from(var_os: &mut impl FnMut(&'static str) -> Option<OsString>) -> PathBuf {
    if let Some(explicit) = var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(explicit);
    }
    config_dir_from(var_os)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("maire")
        .join("config.json")
}
