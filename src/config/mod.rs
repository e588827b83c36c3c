mod settings;

pub use settings::{ChartSettings, Config, ExportSettings, ViewSettings};

use crate::error::{DteError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";

/// Get the config directory path (XDG config dir, or ~/.dte/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "dte") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        DteError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".dte"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Load config.toml, falling back to defaults when the file does not exist
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| DteError::ConfigParse { path, source: e })
}

/// Write the config template, refusing to overwrite an existing file
pub fn init_config(config_dir: &Path) -> Result<PathBuf> {
    let path = config_dir.join(CONFIG_FILE);
    if path.exists() {
        return Err(DteError::AlreadyInitialized(path));
    }
    fs::create_dir_all(config_dir)?;
    fs::write(&path, CONFIG_TEMPLATE)?;
    Ok(path)
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[view]
page_size = 10               # rows per page for the file list and the data table
reset_page_on_filter = true  # jump back to page 1 when a filter changes

[chart]
label = "Total a Pagar"
border_color = "rgba(75, 192, 192, 1)"
background_color = "rgba(75, 192, 192, 0.2)"
sort_by_date = false         # keep input order; true sorts points by emission date

[export]
output_dir = "."             # where export archives are written (~ is expanded)
"#;
