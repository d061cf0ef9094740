use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sm_core::error::MappingError;
use sm_core::list::{DEFAULT_ITEM_HEIGHT, DEFAULT_LIST_HEIGHT, DEFAULT_OVERSCAN};
use sm_core::scroll::DEFAULT_SCROLL_DEBOUNCE;
use sm_core::{ListWidth, VirtualListOptions};

const LIST_PREFS_FILE: &str = "list_prefs.v1.json";
const LIST_PREFS_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("cannot resolve a config directory")]
    NoConfigDir,

    #[error("{action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("list prefs JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported list prefs version: {0}")]
    UnsupportedVersion(u32),

    #[error(transparent)]
    Width(#[from] MappingError),

    #[error("list prefs {field} must be positive, got {value}")]
    NonPositiveExtent { field: &'static str, value: f32 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListPrefs {
    pub version: u32,
    pub item_height: f32,
    pub viewport_height: f32,
    pub width: String,
    pub overscan: usize,
    pub debounce_ms: u64,
    pub instrumentation: bool,
}

impl Default for ListPrefs {
    fn default() -> Self {
        Self {
            version: LIST_PREFS_VERSION,
            item_height: DEFAULT_ITEM_HEIGHT,
            viewport_height: DEFAULT_LIST_HEIGHT,
            width: ListWidth::default().to_string(),
            overscan: DEFAULT_OVERSCAN,
            debounce_ms: DEFAULT_SCROLL_DEBOUNCE.as_millis() as u64,
            instrumentation: false,
        }
    }
}

impl ListPrefs {
    /// Row and viewport extents must be finite and above zero.
    pub fn check_extents(&self) -> Result<(), PrefsError> {
        for (field, value) in [
            ("item_height", self.item_height),
            ("viewport_height", self.viewport_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(PrefsError::NonPositiveExtent { field, value });
            }
        }
        Ok(())
    }

    pub fn to_options(&self) -> Result<VirtualListOptions, PrefsError> {
        self.check_extents()?;
        Ok(VirtualListOptions {
            item_height: self.item_height,
            height: self.viewport_height,
            width: self.width.parse()?,
            overscan_count: self.overscan,
            debounce: Duration::from_millis(self.debounce_ms),
            ..VirtualListOptions::default()
        })
    }
}

pub fn list_prefs_path() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir).join("survey-mapper").join(LIST_PREFS_FILE));
    }
    if let Ok(home) = std::env::var("HOME") {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("survey-mapper")
                .join(LIST_PREFS_FILE),
        );
    }
    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return Some(
                PathBuf::from(appdata)
                    .join("survey-mapper")
                    .join(LIST_PREFS_FILE),
            );
        }
    }
    None
}

pub fn load_list_prefs() -> Result<ListPrefs, PrefsError> {
    let Some(path) = list_prefs_path() else {
        return Ok(ListPrefs::default());
    };
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no list prefs, using defaults");
        return Ok(ListPrefs::default());
    }
    let content = std::fs::read_to_string(&path).map_err(|source| PrefsError::Io {
        action: "read",
        path: path.clone(),
        source,
    })?;
    parse_list_prefs(&content)
}

pub fn save_list_prefs(prefs: &ListPrefs) -> Result<(), PrefsError> {
    let path = list_prefs_path().ok_or(PrefsError::NoConfigDir)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| PrefsError::Io {
            action: "create",
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(&path, serialize_list_prefs(prefs)?).map_err(|source| PrefsError::Io {
        action: "write",
        path: path.clone(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "saved list prefs");
    Ok(())
}

pub fn serialize_list_prefs(prefs: &ListPrefs) -> Result<String, PrefsError> {
    Ok(serde_json::to_string_pretty(prefs)?)
}

pub fn parse_list_prefs(content: &str) -> Result<ListPrefs, PrefsError> {
    let prefs: ListPrefs = serde_json::from_str(content)?;
    if prefs.version != LIST_PREFS_VERSION {
        return Err(PrefsError::UnsupportedVersion(prefs.version));
    }
    prefs.check_extents()?;
    prefs.width.parse::<ListWidth>()?;
    Ok(prefs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_prefs_001_list_prefs_missing_fields_take_defaults() {
        let prefs = parse_list_prefs(r#"{"version": 1, "overscan": 2, "extra": true}"#)
            .expect("parse prefs");
        assert_eq!(prefs.overscan, 2);
        assert_eq!(prefs.item_height, DEFAULT_ITEM_HEIGHT);
        let options = prefs.to_options().expect("options");
        assert_eq!(options.overscan_count, 2);
        assert_eq!(options.width, ListWidth::Percent(100.0));
    }

    #[test]
    fn t_prefs_002_list_prefs_reject_bad_version_and_width() {
        assert!(matches!(
            parse_list_prefs(r#"{"version": 2}"#),
            Err(PrefsError::UnsupportedVersion(2))
        ));
        assert!(matches!(
            parse_list_prefs(r#"{"version": 1, "width": "wide"}"#),
            Err(PrefsError::Width(_))
        ));
    }

    #[test]
    fn t_prefs_003_serialized_prefs_parse_back() {
        let prefs = ListPrefs {
            width: "640px".to_string(),
            instrumentation: true,
            ..ListPrefs::default()
        };
        let encoded = serialize_list_prefs(&prefs).expect("serialize");
        assert_eq!(parse_list_prefs(&encoded).expect("parse"), prefs);
    }

    #[test]
    fn t_prefs_004_non_positive_extents_are_rejected() {
        assert!(matches!(
            parse_list_prefs(r#"{"version": 1, "item_height": 0, "viewport_height": -10}"#),
            Err(PrefsError::NonPositiveExtent { field: "item_height", .. })
        ));
        assert!(matches!(
            parse_list_prefs(r#"{"version": 1, "viewport_height": -10}"#),
            Err(PrefsError::NonPositiveExtent { field: "viewport_height", .. })
        ));

        let prefs = ListPrefs {
            item_height: -1.0,
            ..ListPrefs::default()
        };
        assert!(prefs.to_options().is_err());
    }
}
