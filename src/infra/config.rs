use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::format::NameStyle;

/// How resolution-time failures are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Abort the whole run on the first bad argument or bundle entry.
    Strict,
    /// Log and skip invalid items, keep assembling the rest.
    #[default]
    Lenient,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Extensions collected when a directory argument is expanded
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Extra ignore globs for directory walks (in addition to .gitignore)
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Resolution failure policy
    #[serde(default)]
    pub strictness: Strictness,

    /// Default header style when --style is not given
    #[serde(default)]
    pub style: Option<NameStyle>,
}

fn default_extensions() -> Vec<String> {
    vec![".txt".to_string(), ".md".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            ignore_patterns: Vec::new(),
            strictness: Strictness::default(),
            style: None,
        }
    }
}

pub fn load_config() -> Result<Config> {
    let mut builder = config::Config::builder();

    // Load from config files in priority order
    let config_paths = ["nanodoc.toml", ".nanodoc.toml"];

    for path in &config_paths {
        if Path::new(path).exists() {
            builder = builder.add_source(config::File::with_name(path));
            break;
        }
    }

    // Add environment variables with NANODOC_ prefix. No key separator:
    // NANODOC_IGNORE_PATTERNS maps to the flat `ignore_patterns` key,
    // and list-valued keys split on commas
    builder = builder.add_source(
        config::Environment::with_prefix("NANODOC")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("extensions")
            .with_list_parse_key("ignore_patterns"),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}
