use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::debug;

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "AUTOMATION_SEARCH_DATA_DIR";

/// Data directory looked up relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "data";

/// Result count used when the caller does not ask for one
pub const DEFAULT_MAX_RESULTS: usize = 5;

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// 検索テーブルを置くディレクトリ（未指定なら自動解決）
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// 既定の最大結果数
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl Config {
    /// Default config with the data directory taken from the environment, if set
    pub fn from_env() -> Self {
        let data_dir = env::var_os(DATA_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Self {
            data_dir,
            ..Self::default()
        }
    }

    /// Directory holding the backing tables
    ///
    /// An explicit `data_dir` wins. Otherwise `./data` is used when it exists,
    /// then the per-user data directory.
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }

        let local = PathBuf::from(DEFAULT_DATA_DIR);
        if local.is_dir() {
            return local;
        }

        let user_dir =
            dirs::data_dir().map(|dir| dir.join("automation-search").join(DEFAULT_DATA_DIR));
        match user_dir {
            Some(dir) if dir.is_dir() => dir,
            _ => {
                debug!("No data directory found, falling back to ./{}", DEFAULT_DATA_DIR);
                local
            }
        }
    }
}
