//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars.
//!
//! Config lives at `~/.config/qfm/config.toml` (platform config dir). If
//! missing on first run, a commented-out default is generated so users can
//! discover all options. A malformed file never aborts startup; the loader
//! falls back to defaults with a warning.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> / defaulted for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct QfmConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    /// Action name → key expression, e.g. `Exit = "Ctrl+E"`.
    #[serde(default)]
    pub hotkeys: BTreeMap<String, String>,
    /// Template name → file body, for CreateFromTemplate.
    #[serde(default)]
    pub templates: BTreeMap<String, String>,
    /// Snippet name → text, for AppendSnippet.
    #[serde(default)]
    pub snippets: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_directory: Option<String>,
    pub editor: Option<String>,
    pub bookmarks: Option<Vec<String>>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_DIRECTORY: &str = ".";
pub const DEFAULT_EDITOR: &str = "nano";

/// Built-in bindings used when the config carries no `[hotkeys]` table.
/// Chosen to dodge keys terminals claim for themselves: Ctrl+S/Q (flow
/// control), Ctrl+C (interrupt), Ctrl+I/J/M (Tab, LF, Enter), Ctrl+Z.
pub fn default_hotkeys() -> BTreeMap<String, String> {
    let pairs = [
        ("CreateFile", "Ctrl+N"),
        ("ReadFile", "Ctrl+R"),
        ("AppendFile", "Ctrl+A"),
        ("DeleteFile", "Ctrl+D"),
        ("ListFiles", "Ctrl+L"),
        ("SearchFiles", "Ctrl+F"),
        ("OpenInEditor", "Ctrl+O"),
        ("ChangeDirectory", "Ctrl+G"),
        ("GoBackDirectory", "Ctrl+B"),
        ("JumpToDefault", "Ctrl+U"),
        ("AddBookmark", "Ctrl+T"),
        ("CycleBookmarks", "Ctrl+P"),
        ("MoveFile", "Alt+M"),
        ("CopyFile", "Alt+C"),
        ("FileInfo", "Alt+I"),
        ("CopyFilePath", "Alt+P"),
        ("CreateFromTemplate", "Alt+T"),
        ("AppendSnippet", "Alt+S"),
        ("Exit", "Ctrl+E"),
    ];
    pairs
        .into_iter()
        .map(|(action, key)| (action.to_string(), key.to_string()))
        .collect()
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub hotkeys: BTreeMap<String, String>,
    pub default_directory: String,
    pub editor: String,
    pub bookmarks: Vec<String>,
    pub templates: BTreeMap<String, String>,
    pub snippets: BTreeMap<String, String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `qfm/config.toml` under the platform config dir.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("qfm").join("config.toml"))
}

/// Load config from disk.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `QfmConfig::default()`. If it exists but is malformed, returns
/// `ConfigError::Parse`.
pub fn load_config() -> Result<QfmConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine config directory, using default config");
            return Ok(QfmConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(QfmConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: QfmConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Load config, falling back to defaults on any failure. Startup never
/// aborts over a bad config file.
pub fn load_or_default() -> QfmConfig {
    match load_config() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config ({e}), using defaults");
            QfmConfig::default()
        }
    }
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# qfm configuration
# All settings are optional; defaults cover anything not specified.
# Override hierarchy: defaults, then this file, then env vars.

# [general]
# default_directory = "~/projects"   # JumpToDefault target (QFM_DEFAULT_DIR overrides)
# editor = "nano"                    # External editor (QFM_EDITOR or EDITOR overrides)
# bookmarks = ["~/projects", "/tmp"]

# Key expressions: modifiers in Ctrl, Shift, Alt order, joined with "+".
# Spelling is case-insensitive and "Control+" is accepted for "Ctrl+".
# [hotkeys]
# Exit = "Ctrl+E"
# CreateFile = "Ctrl+N"
# ReadFile = "Ctrl+R"
# AppendFile = "Ctrl+A"
# DeleteFile = "Ctrl+D"
# ListFiles = "Ctrl+L"
# SearchFiles = "Ctrl+F"
# OpenInEditor = "Ctrl+O"
# ChangeDirectory = "Ctrl+G"
# GoBackDirectory = "Ctrl+B"
# JumpToDefault = "Ctrl+U"
# AddBookmark = "Ctrl+T"
# CycleBookmarks = "Ctrl+P"
# MoveFile = "Alt+M"
# CopyFile = "Alt+C"
# FileInfo = "Alt+I"
# CopyFilePath = "Alt+P"
# CreateFromTemplate = "Alt+T"
# AppendSnippet = "Alt+S"

# [templates]
# rust-main = "fn main() {\n    println!(\"hello\");\n}\n"

# [snippets]
# sig = "Reviewed-by: me\n"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env.
pub fn resolve(config: &QfmConfig) -> ResolvedConfig {
    // Default directory: env → config → "."
    let default_directory = std::env::var("QFM_DEFAULT_DIR")
        .ok()
        .or_else(|| config.general.default_directory.clone())
        .unwrap_or_else(|| DEFAULT_DIRECTORY.to_string());

    // Editor: env → config → EDITOR → "nano"
    let editor = std::env::var("QFM_EDITOR")
        .ok()
        .or_else(|| config.general.editor.clone())
        .or_else(|| std::env::var("EDITOR").ok())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string());

    // An absent or empty [hotkeys] table would leave the session with no
    // Exit binding, so it falls back to the built-in set.
    let hotkeys = if config.hotkeys.is_empty() {
        default_hotkeys()
    } else {
        config.hotkeys.clone()
    };

    ResolvedConfig {
        hotkeys,
        default_directory,
        editor,
        bookmarks: config.general.bookmarks.clone().unwrap_or_default(),
        templates: config.templates.clone(),
        snippets: config.snippets.clone(),
    }
}
