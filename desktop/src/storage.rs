use directories::ProjectDirs;
use sq_core::best_time::BestTimeRecord;
use sq_core::config::GameConfig;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_NAME: &str = "subtract_quiz";
const ORG_NAME: &str = "practice";
const SAVE_FILE: &str = "best_time.json";
const FALLBACK_SAVE_FILE: &str = "personal_best.json";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("Failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", ORG_NAME, APP_NAME)
}

#[derive(Debug, Clone)]
pub struct BestTimeStore {
    path: PathBuf,
}

impl BestTimeStore {
    pub fn new() -> Self {
        let path = match project_dirs() {
            Some(dirs) => dirs.data_dir().join(SAVE_FILE),
            None => PathBuf::from(FALLBACK_SAVE_FILE),
        };
        log::debug!("best time file: {}", path.display());
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable records count as "no best time yet".
    pub fn load(&self) -> Option<f64> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no best time recorded yet");
                return None;
            }
            Err(e) => {
                log::warn!("could not read {}: {}", self.path.display(), e);
                return None;
            }
        };

        match BestTimeRecord::parse(&bytes) {
            Ok(record) => record.best_time,
            Err(e) => {
                log::warn!("ignoring malformed {}: {}", self.path.display(), e);
                None
            }
        }
    }

    pub fn save(&self, best_time: f64) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string(&BestTimeRecord::new(best_time))?;
        fs::write(&self.path, json).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })?;

        log::info!("saved best time {:.2}s to {}", best_time, self.path.display());
        Ok(())
    }
}

impl Default for BestTimeStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only: the game never writes its own configuration.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: Option<PathBuf>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self {
            path: project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE)),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: Some(p.as_ref().to_path_buf()),
        }
    }

    pub fn load_or_default(&self) -> GameConfig {
        let Some(path) = &self.path else {
            return GameConfig::default();
        };
        let Ok(bytes) = fs::read(path) else {
            return GameConfig::default();
        };
        match serde_json::from_slice::<GameConfig>(&bytes) {
            Ok(cfg) => cfg.validated(),
            Err(e) => {
                log::warn!("ignoring malformed {}: {}", path.display(), e);
                GameConfig::default()
            }
        }
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}
