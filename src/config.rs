use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::compiler::{CompileOptions, ConfigError, Mode};

pub const CONFIG_FILE_NAME: &str = ".lingorc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Paths and glob patterns excluded from scanning.
    #[serde(default)]
    pub ignores: Vec<String>,

    /// Directories (or globs) to scan for source files.
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,

    /// Import specifiers whose named exports are treated as i18n macros.
    #[serde(default = "default_macro_modules")]
    pub macro_modules: Vec<String>,

    /// Output shaping mode: `development` or `production`.
    #[serde(default)]
    pub mode: Mode,

    /// Keep full descriptor metadata even in production mode.
    #[serde(default)]
    pub extract: bool,

    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
}

fn default_includes() -> Vec<String> {
    ["src", "app", "components", "pages"]
        .map(String::from)
        .to_vec()
}

fn default_macro_modules() -> Vec<String> {
    ["@lingui/core/macro", "@lingui/react/macro", "@lingui/macro"]
        .map(String::from)
        .to_vec()
}

fn default_ignore_test_files() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            includes: default_includes(),
            macro_modules: default_macro_modules(),
            mode: Mode::default(),
            extract: false,
            ignore_test_files: default_ignore_test_files(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob patterns in `ignores` or `includes` are
    /// invalid. Include patterns without wildcards are treated as literal
    /// directory paths and skip validation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for pattern in &self.ignores {
            if Pattern::new(pattern).is_err() {
                return Err(ConfigError::InvalidPattern {
                    field: "ignores",
                    pattern: pattern.clone(),
                });
            }
        }

        for pattern in &self.includes {
            if (pattern.contains('*') || pattern.contains('?')) && Pattern::new(pattern).is_err() {
                return Err(ConfigError::InvalidPattern {
                    field: "includes",
                    pattern: pattern.clone(),
                });
            }
        }

        Ok(())
    }

    /// Compilation options for this run.
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            mode: self.mode,
            extract: self.extract,
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

/// A loaded project config. `from_file` reports whether a config file was
/// found or defaults were used.
pub struct LoadedConfig {
    pub config: Config,
    pub from_file: bool,
}

pub fn load_config(project_root: &Path) -> Result<LoadedConfig> {
    let Some(config_path) = find_config_file(project_root) else {
        return Ok(LoadedConfig {
            config: Config::default(),
            from_file: false,
        });
    };

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;
    config.validate()?;

    Ok(LoadedConfig {
        config,
        from_file: true,
    })
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}
