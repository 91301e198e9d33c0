//! Where mapmemo keeps its config, saved annotations, logs and bundled atlas.
//!
//! Development builds keep everything next to the working directory so a
//! checkout is self-contained. Installed builds use the platform config and
//! data folders from `dirs`.

use std::path::PathBuf;

/// Debug builds, or anything launched through cargo
pub fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

/// Folder holding `config.json`. Only Linux separates it from the data folder.
pub fn config_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }

    #[cfg(target_os = "linux")]
    {
        dirs::config_dir().map(|p| p.join("mapmemo"))
    }

    #[cfg(not(target_os = "linux"))]
    {
        data_dir()
    }
}

pub fn data_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }

    dirs::data_dir().map(|p| p.join("mapmemo"))
}

pub fn config_file() -> PathBuf {
    config_dir()
        .map(|p| p.join("config.json"))
        .unwrap_or_else(|| PathBuf::from("config.json"))
}

/// One JSON file per durable key lives here
pub fn storage_dir() -> PathBuf {
    data_dir()
        .map(|p| p.join("storage"))
        .unwrap_or_else(|| PathBuf::from("storage"))
}

pub fn logs_dir() -> PathBuf {
    data_dir()
        .map(|p| p.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Where export dialogs open by default (the user's downloads folder when known).
pub fn exports_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Atlas shipped in `assets/`, beside the executable once installed
pub fn bundled_atlas_file() -> PathBuf {
    if is_dev_mode() {
        return PathBuf::from("assets/regions.json");
    }

    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.join("assets")))
        .unwrap_or_else(|| PathBuf::from("assets"))
        .join("regions.json")
}

/// Create the config, storage and log folders before anything writes to them
pub fn ensure_directories() -> std::io::Result<()> {
    if let Some(config) = config_dir() {
        std::fs::create_dir_all(&config)?;
    }
    std::fs::create_dir_all(storage_dir())?;
    std::fs::create_dir_all(logs_dir())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_is_named_config_json() {
        assert_eq!(config_file().file_name().unwrap(), "config.json");
    }

    #[test]
    fn test_debug_builds_keep_files_local() {
        assert!(is_dev_mode());
        assert_eq!(config_dir(), Some(PathBuf::from(".")));
        assert_eq!(storage_dir(), PathBuf::from("./storage"));
        assert_eq!(logs_dir(), PathBuf::from("./logs"));
    }

    #[test]
    fn test_bundled_atlas_in_dev_mode() {
        assert_eq!(bundled_atlas_file(), PathBuf::from("assets/regions.json"));
    }
}
