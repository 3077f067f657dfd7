//! Configuration: root folder resolution and upload policy
//!
//! All paths and limits are carried on explicit values handed to the
//! service at startup; nothing here is ambient process state.

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable consulted when no CLI argument is given
pub const ROOT_FOLDER_ENV: &str = "MEDIATRACK_ROOT";

/// File extensions accepted by the upload endpoint (lowercase)
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "mp3", "wav", "ogg", "flac", "aac", "m4a", "wma", "mp4", "webm", "mkv", "avi", "mov", "ogv",
];

/// Subset of [`ALLOWED_EXTENSIONS`] classified as audio; everything else
/// in the allowed set is video
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac", "aac", "m4a", "wma"];

/// Upload size cap: 100 MiB
pub const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Service configuration resolved once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Folder holding the database file and the uploads directory
    pub root_folder: PathBuf,
    /// Upload acceptance rules
    pub upload: UploadPolicy,
}

impl Config {
    pub fn new(root_folder: PathBuf) -> Self {
        Self {
            root_folder,
            upload: UploadPolicy::default(),
        }
    }

    /// Path of the SQLite database file
    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join("mediatrack.db")
    }

    /// Directory where uploaded media files are stored
    pub fn upload_dir(&self) -> PathBuf {
        self.root_folder.join("uploads")
    }

    /// Create the root folder and uploads directory if missing
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root_folder)?;
        std::fs::create_dir_all(self.upload_dir())?;
        Ok(())
    }
}

/// Resolve the root folder, in priority order:
/// 1. Command-line argument (highest priority)
/// 2. `MEDIATRACK_ROOT` environment variable
/// 3. `root_folder` key in the platform config file (config.toml)
/// 4. OS-dependent default data directory (fallback)
pub fn resolve_root_folder(cli_arg: Option<&Path>) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Ok(config_path) = config_file_path() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(root_folder);
                }
            }
        }
    }

    default_root_folder()
}

/// Platform config file location (~/.config/mediatrack/config.toml or
/// the OS equivalent)
fn config_file_path() -> Result<PathBuf> {
    let path = dirs::config_dir()
        .map(|d| d.join("mediatrack").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if path.exists() {
        Ok(path)
    } else {
        Err(Error::Config(format!("Config file not found: {:?}", path)))
    }
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("mediatrack"))
        .unwrap_or_else(|| PathBuf::from("./mediatrack_data"))
}

/// Upload acceptance rules: extension whitelist and size cap
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub allowed_extensions: Vec<String>,
    pub audio_extensions: Vec<String>,
    pub max_bytes: usize,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_extensions: ALLOWED_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            audio_extensions: AUDIO_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            max_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl UploadPolicy {
    /// Lowercased extension of `filename`, if it has one
    pub fn extension(filename: &str) -> Option<String> {
        let (_, ext) = filename.rsplit_once('.')?;
        if ext.is_empty() {
            None
        } else {
            Some(ext.to_ascii_lowercase())
        }
    }

    /// Whether `filename` carries an accepted extension
    pub fn is_allowed(&self, filename: &str) -> bool {
        match Self::extension(filename) {
            Some(ext) => self.allowed_extensions.iter().any(|a| *a == ext),
            None => false,
        }
    }

    /// Classify an accepted file as audio or video by extension
    pub fn kind_for(&self, filename: &str) -> crate::db::models::MediaKind {
        use crate::db::models::MediaKind;
        match Self::extension(filename) {
            Some(ext) if self.audio_extensions.iter().any(|a| *a == ext) => MediaKind::Audio,
            _ => MediaKind::Video,
        }
    }

    /// Sorted, comma-separated extension list for the rejection message
    pub fn allowed_list(&self) -> String {
        let mut exts: Vec<&str> = self.allowed_extensions.iter().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts.join(", ")
    }
}
