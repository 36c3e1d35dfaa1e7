use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::cli::commands::{ReportedError, ReportedSite};

// ============================================================
// Config Types (get_config)
// ============================================================

/// Configuration DTO for MCP
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub ignores: Vec<String>,
    pub includes: Vec<String>,
    pub macro_modules: Vec<String>,
    pub mode: String,
    pub extract: bool,
    pub ignore_test_files: bool,
}

impl From<crate::config::Config> for ConfigValues {
    fn from(c: crate::config::Config) -> Self {
        Self {
            ignores: c.ignores,
            includes: c.includes,
            macro_modules: c.macro_modules,
            mode: match c.mode {
                crate::compiler::Mode::Development => "development".to_string(),
                crate::compiler::Mode::Production => "production".to_string(),
            },
            extract: c.extract,
            ignore_test_files: c.ignore_test_files,
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Absolute path to the project root
    pub project_root_path: String,
}

// ============================================================
// Compile Types (compile_source / compile_project)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompileSourceParams {
    /// JS/JSX/TS/TSX source text to compile
    pub source: String,
    /// Virtual file name used in reported locations (defaults to "input.tsx")
    pub file_name: Option<String>,
    /// Output mode: "development" (default) or "production"
    pub mode: Option<String>,
    /// Keep full descriptor metadata even in production mode
    pub extract: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompileProjectParams {
    /// Absolute path to the project root
    pub project_root_path: String,
    /// Output mode: "development" or "production" (overrides config)
    pub mode: Option<String>,
    /// Keep full descriptor metadata even in production mode
    pub extract: Option<bool>,
    /// Maximum number of compiled messages to return (default 50, max 200)
    pub limit: Option<u32>,
    /// Offset for pagination (default 0)
    pub offset: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileSourceResult {
    pub total_count: usize,
    pub sites: Vec<ReportedSite>,
    pub errors: Vec<ReportedError>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileProjectResult {
    pub total_count: usize,
    pub files_scanned: usize,
    pub sites: Vec<ReportedSite>,
    pub errors: Vec<ReportedError>,
    pub pagination: Pagination,
}
