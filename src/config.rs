use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// Settings shared by every page. Loaded from an optional JSON file; CLI
/// flags override whatever the file sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Path prefix the static assets are served under.
    pub base_path: String,
    /// Where exported views are written.
    pub output_dir: PathBuf,
    pub items_per_page: usize,
    /// Pin "today" instead of asking the system clock.
    pub today: Option<Date>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_path: "/".to_string(),
            output_dir: PathBuf::from("dist"),
            items_per_page: 10,
            today: None,
        }
    }
}

impl DashboardConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        tracing::debug!(path = ?path, "loaded config");
        Ok(config)
    }

    /// Load `path` if given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn today(&self) -> Date {
        self.today.unwrap_or_else(|| {
            OffsetDateTime::now_local()
                .unwrap_or_else(|_| OffsetDateTime::now_utc())
                .date()
        })
    }

    /// `<output_dir>/<base_path>/<page>.json`
    pub fn export_path(&self, page: &str) -> PathBuf {
        let base = self.base_path.trim_matches('/');
        let mut path = self.output_dir.clone();
        if !base.is_empty() {
            path.push(base);
        }
        path.push(format!("{page}.json"));
        path
    }
}
