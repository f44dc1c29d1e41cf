use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How the film fan-out treats individual failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilmPolicy {
    /// First failed film aborts the whole film step; no titles are kept.
    #[default]
    FailFast,
    /// Wait for every film; keep the titles that loaded, report the rest.
    SettleAll,
}

/// Global configuration loaded from `~/.config/holo/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoloConfig {
    /// Root of the REST API; collection and id are appended to it.
    pub api_root: String,
    /// Collection the primary entity is read from.
    pub selected_collection: String,
    /// Numeric id of the primary entity.
    pub character_id: u32,
    /// Text shown in a node that has nothing to display.
    pub placeholder: String,
    /// Join policy for the film fetches.
    pub film_policy: FilmPolicy,
    /// Optional whole-request timeout in seconds (None = wait indefinitely).
    pub request_timeout_secs: Option<u64>,
    /// Optional User-Agent header (None = libcurl default).
    pub user_agent: Option<String>,
}

impl Default for HoloConfig {
    fn default() -> Self {
        Self {
            api_root: "https://swapi.py4e.com/api/".to_string(),
            selected_collection: "people".to_string(),
            character_id: 1,
            placeholder: "Loading...".to_string(),
            film_policy: FilmPolicy::FailFast,
            request_timeout_secs: None,
            user_agent: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("holo")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from the default location, creating a default file if none exists.
pub fn load_or_init() -> Result<HoloConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HoloConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit path. Missing keys take their defaults.
pub fn load_from(path: &Path) -> Result<HoloConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: HoloConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_values() {
        let cfg = HoloConfig::default();
        assert_eq!(cfg.api_root, "https://swapi.py4e.com/api/");
        assert_eq!(cfg.selected_collection, "people");
        assert_eq!(cfg.character_id, 1);
        assert_eq!(cfg.placeholder, "Loading...");
        assert_eq!(cfg.film_policy, FilmPolicy::FailFast);
        assert!(cfg.request_timeout_secs.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = HoloConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: HoloConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_partial_file_keeps_defaults() {
        let toml = r#"
            selected_collection = "starships"
            character_id = 9
        "#;
        let cfg: HoloConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.selected_collection, "starships");
        assert_eq!(cfg.character_id, 9);
        assert_eq!(cfg.api_root, HoloConfig::default().api_root);
        assert_eq!(cfg.placeholder, "Loading...");
    }

    #[test]
    fn config_toml_film_policy_and_timeout() {
        let toml = r#"
            film_policy = "settle-all"
            request_timeout_secs = 10
            user_agent = "holo/0.1"
        "#;
        let cfg: HoloConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.film_policy, FilmPolicy::SettleAll);
        assert_eq!(cfg.request_timeout_secs, Some(10));
        assert_eq!(cfg.user_agent.as_deref(), Some("holo/0.1"));

        let cfg: HoloConfig = toml::from_str(r#"film_policy = "fail-fast""#).unwrap();
        assert_eq!(cfg.film_policy, FilmPolicy::FailFast);
    }

    #[test]
    fn config_toml_unknown_policy_rejected() {
        assert!(toml::from_str::<HoloConfig>(r#"film_policy = "sometimes""#).is_err());
    }

    #[test]
    fn load_from_reads_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "api_root = \"http://127.0.0.1:8000/api/\"").unwrap();
        let cfg = load_from(f.path()).unwrap();
        assert_eq!(cfg.api_root, "http://127.0.0.1:8000/api/");
        assert_eq!(cfg.character_id, 1);
    }

    #[test]
    fn load_from_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(format!("{:#}", err).contains("read config"));
    }
}
