use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::Duration;

use crate::types::StalePolicy;
use crate::ui_constants::{DEFAULT_SLOT_COUNT, SEARCH_DEBOUNCE_MS};

const CONFIG_PATH_ENV: &str = "FRAME_PICKER_CONFIG_PATH";
const SEARCH_ORIGIN_ENV: &str = "FRAME_PICKER_SEARCH_ORIGIN";

fn default_page_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_slot_count() -> usize {
    DEFAULT_SLOT_COUNT
}

fn default_debounce_ms() -> u64 {
    SEARCH_DEBOUNCE_MS
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    // Explicit search service origin; when unset it is derived from page_origin
    #[serde(default)]
    pub search_origin: Option<String>,
    #[serde(default = "default_page_origin")]
    pub page_origin: String,
    #[serde(default = "default_slot_count")]
    pub slot_count: usize,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default)]
    pub stale_policy: StalePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search_origin: None,
            page_origin: default_page_origin(),
            slot_count: DEFAULT_SLOT_COUNT,
            debounce_ms: SEARCH_DEBOUNCE_MS,
            stale_policy: StalePolicy::default(),
        }
    }
}

lazy_static! {
    pub static ref APP_CONFIG: RwLock<AppConfig> = RwLock::new(AppConfig::default());
}

/// Read the global config without spelling out the lock dance at every call site.
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&AppConfig) -> R,
{
    match APP_CONFIG.read() {
        Ok(cfg) => f(&cfg),
        Err(poisoned) => f(&poisoned.into_inner()),
    }
}

fn config_file_path() -> PathBuf {
    if let Ok(p) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(p);
    }
    PathBuf::from("frame_picker.json")
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> std::io::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let cfg: AppConfig = serde_json::from_str(&data)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(cfg.sanitized())
    }

    pub fn save_to_file(&self, path: &Path) -> std::io::Result<()> {
        let data = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, data)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// A zero slot count would leave nothing to click.
    fn sanitized(mut self) -> Self {
        if self.slot_count == 0 {
            log::warn!("slot_count 0 in config; using {DEFAULT_SLOT_COUNT}");
            self.slot_count = DEFAULT_SLOT_COUNT;
        }
        self
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(origin) = std::env::var(SEARCH_ORIGIN_ENV) {
            if !origin.trim().is_empty() {
                log::info!("Search origin overridden by {SEARCH_ORIGIN_ENV}: {origin}");
                self.search_origin = Some(origin);
            }
        }
    }
}

/// Load `.env`, then the config file (writing defaults if it is missing),
/// then environment overrides.
pub fn load_config_from_disk() {
    let _ = dotenvy::dotenv();
    let path = config_file_path();
    let mut cfg = match AppConfig::load_from_file(&path) {
        Ok(cfg) => {
            log::info!("Loaded config from {}", path.to_string_lossy());
            cfg
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let cfg = AppConfig::default();
            match cfg.save_to_file(&path) {
                Ok(()) => log::info!("Wrote default config to {}", path.to_string_lossy()),
                Err(e) => log::warn!(
                    "Failed to write default config to {}: {}",
                    path.to_string_lossy(),
                    e
                ),
            }
            cfg
        }
        Err(e) => {
            log::info!(
                "Using default config; cannot load {}: {}",
                path.to_string_lossy(),
                e
            );
            AppConfig::default()
        }
    };
    cfg.apply_env_overrides();
    match APP_CONFIG.write() {
        Ok(mut slot) => *slot = cfg,
        Err(poisoned) => *poisoned.into_inner() = cfg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Temp file per test and per process so parallel runs don't collide.
    fn temp_config_path(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("{}_{}.json", name, std::process::id()));
        p
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: AppConfig = serde_json::from_str(r#"{"slot_count": 3}"#).unwrap();
        assert_eq!(cfg.slot_count, 3);
        assert_eq!(cfg.debounce_ms, 2000);
        assert_eq!(cfg.page_origin, "http://localhost:3000");
        assert_eq!(cfg.search_origin, None);
        assert_eq!(cfg.stale_policy, StalePolicy::LastArrived);
    }

    #[test]
    fn save_then_load_keeps_values() {
        let path = temp_config_path("frame_picker_cfg_roundtrip");
        let cfg = AppConfig {
            search_origin: Some("http://search.local:8080".to_string()),
            slot_count: 7,
            debounce_ms: 500,
            stale_policy: StalePolicy::LatestIssued,
            ..AppConfig::default()
        };
        cfg.save_to_file(&path).unwrap();
        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.debounce(), Duration::from_millis(500));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn zero_slots_fall_back_to_default() {
        let path = temp_config_path("frame_picker_cfg_zero_slots");
        std::fs::write(&path, r#"{"slot_count": 0}"#).unwrap();
        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.slot_count, DEFAULT_SLOT_COUNT);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn invalid_json_is_invalid_data() {
        let path = temp_config_path("frame_picker_cfg_invalid");
        std::fs::write(&path, "{ nope").unwrap();
        let err = AppConfig::load_from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
        let _ = std::fs::remove_file(path);
    }
}
