//! Configuration file handling for pocketplan.
//!
//! The configuration file is stored at `$POCKETPLAN_HOME/config.json` and holds the signed-in user,
//! the length of the monthly statistics and the location of the data file.

use crate::error::Res;
use crate::stats::DEFAULT_MONTH_COUNT;
use crate::store::FileStore;
use crate::{utils, validate};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "pocketplan";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DATA_JSON: &str = "data.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$POCKETPLAN_HOME` and from there it loads `$POCKETPLAN_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory, a `config.json` for `user_id` and an empty data file. An
    /// existing data file is kept, so running this again only switches the user.
    ///
    /// # Errors
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>, user_id: &str) -> Res<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the pocketplan home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;
        let config_path = root.join(CONFIG_JSON);

        let config_file = ConfigFile {
            user_id: user_id.to_string(),
            ..ConfigFile::default()
        };
        config_file.save(&config_path).await?;

        let config = Self {
            root,
            config_path,
            config_file,
        };
        FileStore::create_empty(&config.data_path()).await?;
        debug!("Created config at {}", config.config_path.display());
        Ok(config)
    }

    /// Validates that the home directory and its config file exist, loads the config file and
    /// checks that the data file it points to is present.
    pub async fn load(home: impl Into<PathBuf>) -> Res<Self> {
        let maybe_relative = home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The pocketplan home directory is missing, run 'pocketplan init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let config = Self {
            root,
            config_path,
            config_file,
        };
        let data_path = config.data_path();
        if !data_path.is_file() {
            bail!("The data file is missing '{}'", data_path.display())
        }
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The signed-in user, empty when signed out.
    pub fn user_id(&self) -> &str {
        &self.config_file.user_id
    }

    pub fn month_count(&self) -> usize {
        self.config_file.month_count
    }

    /// Returns the stored `data_path` if it is absolute, otherwise resolves it against the home
    /// directory.
    pub fn data_path(&self) -> PathBuf {
        let p = self.config_file.data_path();
        if p.is_absolute() {
            return p;
        }
        self.root.join(p)
    }

    /// A store over this configuration's data file, signed in as the configured user.
    pub fn store(&self) -> FileStore {
        FileStore::new(self.data_path(), self.user_id())
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "pocketplan",
///   "config_version": 1,
///   "user_id": "5f0c2a9e-7c1b-4d8e-9a43-2b6f1d3e8c70",
///   "month_count": 6,
///   "data_path": "data.json"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "pocketplan"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The signed-in user. Empty when nobody is signed in.
    #[serde(default)]
    user_id: String,

    /// Number of months in the monthly statistics
    #[serde(default = "default_month_count")]
    month_count: usize,

    /// Path to the data file (optional, relative to the home directory or absolute)
    /// Defaults to $POCKETPLAN_HOME/data.json if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_path: Option<PathBuf>,
}

fn default_month_count() -> usize {
    DEFAULT_MONTH_COUNT
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            user_id: String::new(),
            month_count: DEFAULT_MONTH_COUNT,
            data_path: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it belongs to another app.
    async fn load(path: impl AsRef<Path>) -> Res<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .await
            .with_context(|| format!("Failed to load config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.config_version == CONFIG_VERSION,
            "Unsupported config_version {}, expected {}",
            config.config_version,
            CONFIG_VERSION
        );
        validate::month_count(config.month_count)
            .with_context(|| format!("Invalid month_count in {}", path.display()))?;
        Ok(config)
    }

    async fn save(&self, path: impl AsRef<Path>) -> Res<()> {
        utils::serialize(path.as_ref(), self)
            .await
            .context("Unable to write config file")
    }

    fn data_path(&self) -> PathBuf {
        self.data_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATA_JSON))
    }
}
