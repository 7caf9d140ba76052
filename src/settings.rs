use crate::error::SyncError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "appsettings.json";
pub const CLIENT_SECRET_FILE: &str = "credentials.json";
pub const TOKEN_CACHE_FILE: &str = "token.json";

/// Local files the sync reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub settings: PathBuf,
    pub client_secret: PathBuf,
    pub token_cache: PathBuf,
}

impl AppPaths {
    pub fn in_dir(dir: impl AsRef<Path>) -> AppPaths {
        let dir = dir.as_ref();
        AppPaths {
            settings: dir.join(SETTINGS_FILE),
            client_secret: dir.join(CLIENT_SECRET_FILE),
            token_cache: dir.join(TOKEN_CACHE_FILE),
        }
    }

    /// Files living next to the running executable, or in the working
    /// directory if that cannot be determined.
    pub fn beside_executable() -> AppPaths {
        let dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        AppPaths::in_dir(dir)
    }
}

#[derive(Deserialize, Debug, Default)]
struct SettingsFile {
    #[serde(rename = "Clist", default)]
    clist: ClistSection,
}

#[derive(Deserialize, Debug, Default)]
struct ClistSection {
    #[serde(rename = "ApiKey", default)]
    api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: String,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Settings, SyncError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            SyncError::Configuration(format!(
                "Could not read settings file {}: {e}",
                path.display()
            ))
        })?;
        Settings::from_json(&raw).map_err(|e| match e {
            SyncError::Configuration(msg) => {
                SyncError::Configuration(format!("{msg} ({})", path.display()))
            }
            other => other,
        })
    }

    pub fn from_json(raw: &str) -> Result<Settings, SyncError> {
        let file: SettingsFile = serde_json::from_str(raw)
            .map_err(|e| SyncError::Configuration(format!("Malformed settings file: {e}")))?;

        match file.clist.api_key {
            Some(key) if !key.trim().is_empty() => Ok(Settings { api_key: key }),
            _ => Err(SyncError::Configuration(
                "Please fill in your Clist API key (Clist:ApiKey)".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_nested_api_key() {
        let settings = Settings::from_json(r#"{"Clist": {"ApiKey": "user:abc123"}}"#).unwrap();
        assert_eq!(settings.api_key, "user:abc123");
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        for raw in [r#"{}"#, r#"{"Clist": {}}"#, r#"{"Clist": {"ApiKey": null}}"#] {
            let result = Settings::from_json(raw);
            assert!(matches!(result, Err(SyncError::Configuration(_))), "{raw}");
        }
    }

    #[test]
    fn test_empty_key_is_configuration_error() {
        let result = Settings::from_json(r#"{"Clist": {"ApiKey": "  "}}"#);
        assert!(matches!(result, Err(SyncError::Configuration(_))));
    }

    #[test]
    fn test_malformed_json_is_configuration_error() {
        let result = Settings::from_json("{not json");
        assert!(matches!(result, Err(SyncError::Configuration(_))));
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let path = Path::new("/definitely/not/here/appsettings.json");
        match Settings::load(path) {
            Err(SyncError::Configuration(msg)) => assert!(msg.contains("appsettings.json")),
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_paths_resolve_inside_dir() {
        let paths = AppPaths::in_dir("/opt/contests");
        assert_eq!(paths.settings, PathBuf::from("/opt/contests/appsettings.json"));
        assert_eq!(paths.client_secret, PathBuf::from("/opt/contests/credentials.json"));
        assert_eq!(paths.token_cache, PathBuf::from("/opt/contests/token.json"));
    }
}
