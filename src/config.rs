use std::path::PathBuf;

pub const DEFAULT_DATABASE_PATH: &str = "readlist.db";
pub const DEFAULT_CATALOG_URL: &str = "https://openlibrary.org";
pub const DEFAULT_COVERS_URL: &str = "https://covers.openlibrary.org";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_path: PathBuf,
    pub catalog_url: String,
    pub covers_url: String,
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            covers_url: DEFAULT_COVERS_URL.to_string(),
            debug: false,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup; unset or blank keys keep their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Self {
            database_path: read("READLIST_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            catalog_url: read("READLIST_CATALOG_URL")
                .map(|value| value.trim_end_matches('/').to_string())
                .unwrap_or(defaults.catalog_url),
            covers_url: read("READLIST_COVERS_URL")
                .map(|value| value.trim_end_matches('/').to_string())
                .unwrap_or(defaults.covers_url),
            debug: read("READLIST_DEBUG")
                .map(|value| is_truthy(&value))
                .unwrap_or(false),
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}

fn is_truthy(value: &str) -> bool {
    let lowered = value.trim().to_ascii_lowercase();
    lowered == "1" || lowered == "true" || lowered == "yes" || lowered == "on"
}
