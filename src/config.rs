use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_PATH: &str = "revive.db";
pub const DEFAULT_EXPORT_FILE: &str = "items.csv";
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Contents of `revive.toml`. Every key is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ReviveConfig {
    pub database: Option<PathBuf>,
    pub export_file: Option<PathBuf>,
    pub list_limit: Option<usize>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("revive.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<ReviveConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: ReviveConfig = toml::from_str(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

/// Paths and limits resolved once at startup and handed to the commands.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database: PathBuf,
    pub export_file: PathBuf,
    pub list_limit: usize,
}

impl Settings {
    /// Command-line values win over the config file, which wins over the defaults.
    pub fn resolve(cli_database: Option<PathBuf>, config: Option<ReviveConfig>) -> Self {
        let config = config.unwrap_or_default();
        Self {
            database: cli_database
                .or(config.database)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            export_file: config
                .export_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE)),
            list_limit: config.list_limit.unwrap_or(DEFAULT_LIST_LIMIT),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.database, PathBuf::from("revive.db"));
        assert_eq!(settings.export_file, PathBuf::from("items.csv"));
        assert_eq!(settings.list_limit, 50);
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = ReviveConfig {
            database: Some(PathBuf::from("from_config.db")),
            export_file: Some(PathBuf::from("out/listing.csv")),
            list_limit: Some(20),
        };

        let settings = Settings::resolve(Some(PathBuf::from("cli.db")), Some(config.clone()));
        assert_eq!(settings.database, PathBuf::from("cli.db"));
        assert_eq!(settings.export_file, PathBuf::from("out/listing.csv"));
        assert_eq!(settings.list_limit, 20);

        let settings = Settings::resolve(None, Some(config));
        assert_eq!(settings.database, PathBuf::from("from_config.db"));
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("revive.toml");
        assert!(load_config(Some(&path)).unwrap().is_none());

        std::fs::write(&path, "database = \"data/revive.db\"\nlist_limit = 10\n").unwrap();
        let config = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(config.database, Some(PathBuf::from("data/revive.db")));
        assert_eq!(config.export_file, None);
        assert_eq!(config.list_limit, Some(10));

        std::fs::write(&path, "list_limit = \"many\"\n").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_ensure_db_dir() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("revive.db");
        ensure_db_dir(&db).unwrap();
        assert!(db.parent().unwrap().is_dir());
        ensure_db_dir(Path::new("revive.db")).unwrap();
    }
}
