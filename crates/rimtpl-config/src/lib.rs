use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_DEFS_SUBPATH: &str = "Mods/Core/Defs";
pub const DEFAULT_OUTPUT_DIR: &str = "DefInjected";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RimTplConfig {
    /// Defs tree relative to the installation folder.
    pub defs_subpath: Option<String>,
    /// Folder under the template root that is wiped and rebuilt.
    pub output_dir: Option<String>,
    pub tags: Option<TagsCfg>,
}

/// Extra tag names appended to the built-in curated lists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagsCfg {
    pub labels: Option<Vec<String>>,
    pub list_starts: Option<Vec<String>>,
    pub list_labels: Option<Vec<String>>,
    pub nested_lists: Option<Vec<String>>,
    pub nested_starts: Option<Vec<String>>,
    pub nested_labels: Option<Vec<String>>,
}

impl RimTplConfig {
    pub fn defs_subpath(&self) -> &str {
        self.defs_subpath.as_deref().unwrap_or(DEFAULT_DEFS_SUBPATH)
    }

    pub fn output_dir(&self) -> &str {
        self.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

pub fn load_config() -> Result<RimTplConfig, ConfigError> {
    // Search order: CWD/rimtpl.toml, $HOME/.config/rimtpl/rimtpl.toml
    let mut merged = RimTplConfig::default();
    if let Ok(p) = std::env::current_dir() {
        merged = merge(merged, read_optional(&p.join("rimtpl.toml")));
    }
    if let Some(base) = dirs::config_dir() {
        merged = merge(
            merged,
            read_optional(&base.join("rimtpl").join("rimtpl.toml")),
        );
    }
    Ok(merged)
}

fn read_optional(path: &Path) -> RimTplConfig {
    let Ok(s) = std::fs::read_to_string(path) else {
        return RimTplConfig::default();
    };
    match parse_config(&s, path) {
        Ok(cfg) => {
            tracing::debug!(event = "config_loaded", path = %path.display());
            cfg
        }
        Err(e) => {
            tracing::warn!(event = "config_ignored", error = %e);
            RimTplConfig::default()
        }
    }
}

pub fn parse_config(text: &str, path: &Path) -> Result<RimTplConfig, ConfigError> {
    toml::from_str::<RimTplConfig>(text).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn merge(mut a: RimTplConfig, b: RimTplConfig) -> RimTplConfig {
    if a.defs_subpath.is_none() {
        a.defs_subpath = b.defs_subpath;
    }
    if a.output_dir.is_none() {
        a.output_dir = b.output_dir;
    }
    a.tags = merge_opt(a.tags, b.tags, merge_tags);
    a
}

fn merge_opt<T: Default>(a: Option<T>, b: Option<T>, f: fn(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f(a, b)),
        (None, Some(b)) => Some(b),
        (Some(a), None) => Some(a),
        (None, None) => None,
    }
}

fn merge_tags(mut a: TagsCfg, b: TagsCfg) -> TagsCfg {
    if a.labels.is_none() {
        a.labels = b.labels;
    }
    if a.list_starts.is_none() {
        a.list_starts = b.list_starts;
    }
    if a.list_labels.is_none() {
        a.list_labels = b.list_labels;
    }
    if a.nested_lists.is_none() {
        a.nested_lists = b.nested_lists;
    }
    if a.nested_starts.is_none() {
        a.nested_starts = b.nested_starts;
    }
    if a.nested_labels.is_none() {
        a.nested_labels = b.nested_labels;
    }
    a
}
