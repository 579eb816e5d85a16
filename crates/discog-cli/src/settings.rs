use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use discog_server::ServerConfig;
use discog_store::StoreConfig;

/// Settings file picked up from the working directory when `--config` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = "discog.toml";

/// Contents of a `discog.toml` settings file.
///
/// ```toml
/// [store]
/// data_dir = "/var/lib/discog"
///
/// [store.slots]
/// albums = "albums.json"
///
/// [server]
/// bind_addr = "0.0.0.0:5001"
/// ```
///
/// Every key is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub store: StoreConfig,
    pub server: ServerConfig,
}

impl Settings {
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        toml::from_str(raw).context("invalid settings file")
    }

    /// Load settings from `path`, or from `./discog.toml` if it exists, or
    /// fall back to defaults.
    ///
    /// An explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_SETTINGS_FILE), false),
        };
        if !required && !path.is_file() {
            tracing::debug!("no settings file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings = Self::from_toml(&raw)
            .with_context(|| format!("parsing settings from {}", path.display()))?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn partial_sections() {
        let settings = Settings::from_toml(
            r#"
            [store]
            data_dir = "/var/lib/discog"

            [store.slots]
            albums = "records.json"

            [server]
            bind_addr = "0.0.0.0:8080"
            "#,
        )
        .unwrap();
        assert_eq!(settings.store.data_dir, PathBuf::from("/var/lib/discog"));
        assert_eq!(settings.store.slots.albums, "records.json");
        assert_eq!(settings.store.slots.users, "users.json");
        assert_eq!(settings.store.slots.counter, "id.json");
        assert_eq!(
            settings.server.bind_addr,
            "0.0.0.0:8080".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(Settings::from_toml("[store\ndata_dir = ").is_err());
        assert!(Settings::from_toml("[server]\nbind_addr = \"not an address\"").is_err());
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[store]\ndata_dir = \"catalog\"\n").unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.store.data_dir, PathBuf::from("catalog"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn settings_roundtrip_through_toml() {
        let settings = Settings::default();
        let raw = toml::to_string(&settings).unwrap();
        assert_eq!(Settings::from_toml(&raw).unwrap(), settings);
    }
}
