//! Command implementations and the shared project compilation pipeline.

pub mod check;
pub mod compile;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;
use swc_common::SourceMap;

use crate::cli::args::CommonArgs;
use crate::cli::scan::scan_files;
use crate::compiler::{CompileOptions, DescriptorSummary};
use crate::config::load_config;
use crate::lower::{ModuleCompiler, SiteKind};
use crate::parser::parse_source;

/// One compiled call site located in a source file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedSite {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
    pub kind: SiteShape,
    #[serde(flatten)]
    pub descriptor: DescriptorSummary,
}

/// Serializable shape of the output invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteShape {
    Call,
    Element,
}

impl From<SiteKind> for SiteShape {
    fn from(kind: SiteKind) -> Self {
        match kind {
            SiteKind::Call => SiteShape::Call,
            SiteKind::Element => SiteShape::Element,
        }
    }
}

/// A call site or file that failed to compile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedError {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
    pub message: String,
}

/// Everything one run produced, ready for the reporter.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReport {
    pub sites: Vec<ReportedSite>,
    pub errors: Vec<ReportedError>,
    pub files_scanned: usize,
}

impl ProjectReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Compile every macro call site under the project root.
///
/// Call sites are isolated, so files compile in parallel; the report is
/// sorted afterwards for deterministic output.
pub fn compile_project(common: &CommonArgs) -> Result<ProjectReport> {
    let loaded = load_config(&common.path)?;
    let mut config = loaded.config;
    if let Some(mode) = common.mode {
        config.mode = mode;
    }
    if common.extract {
        config.extract = true;
    }

    let options = config.compile_options();
    let scan = scan_files(
        &common.path,
        &config.includes,
        &config.ignores,
        config.ignore_test_files,
        common.verbose,
    );
    if common.verbose && scan.skipped_count > 0 {
        eprintln!("Skipped {} inaccessible paths", scan.skipped_count);
    }

    let source_map = Arc::new(SourceMap::default());
    let outcomes: Vec<(Vec<ReportedSite>, Vec<ReportedError>)> = scan
        .files
        .par_iter()
        .map(|file| compile_file(file, &source_map, &config.macro_modules, options))
        .collect();

    let mut sites = Vec::new();
    let mut errors = Vec::new();
    for (file_sites, file_errors) in outcomes {
        sites.extend(file_sites);
        errors.extend(file_errors);
    }
    sites.sort_by(|a, b| (&a.file_path, a.line, a.col).cmp(&(&b.file_path, b.line, b.col)));
    errors.sort_by(|a, b| (&a.file_path, a.line, a.col).cmp(&(&b.file_path, b.line, b.col)));

    Ok(ProjectReport {
        sites,
        errors,
        files_scanned: scan.files.len(),
    })
}

fn compile_file(
    file_path: &str,
    source_map: &Arc<SourceMap>,
    macro_modules: &[String],
    options: CompileOptions,
) -> (Vec<ReportedSite>, Vec<ReportedError>) {
    let code = match fs::read_to_string(Path::new(file_path)) {
        Ok(code) => code,
        Err(e) => {
            return (
                Vec::new(),
                vec![ReportedError {
                    file_path: file_path.to_string(),
                    line: 1,
                    col: 1,
                    message: format!("cannot read file: {e}"),
                }],
            );
        }
    };
    compile_source_text(code, file_path, source_map, macro_modules, options)
}

/// Compile one unit of source text into located report entries. Also the
/// entry point for the MCP `compile_source` tool.
pub fn compile_source_text(
    code: String,
    file_path: &str,
    source_map: &Arc<SourceMap>,
    macro_modules: &[String],
    options: CompileOptions,
) -> (Vec<ReportedSite>, Vec<ReportedError>) {
    let parsed = match parse_source(code, file_path, source_map.clone()) {
        Ok(parsed) => parsed,
        Err(e) => {
            return (
                Vec::new(),
                vec![ReportedError {
                    file_path: file_path.to_string(),
                    line: 1,
                    col: 1,
                    message: e.to_string(),
                }],
            );
        }
    };

    let output = ModuleCompiler::new(macro_modules, options).compile(&parsed.module);

    let sites = output
        .sites
        .into_iter()
        .map(|site| {
            let loc = parsed.source_map.lookup_char_pos(site.span.lo);
            ReportedSite {
                file_path: file_path.to_string(),
                line: loc.line,
                col: loc.col_display + 1,
                kind: site.kind.into(),
                descriptor: site.descriptor.summary(),
            }
        })
        .collect();

    let errors = output
        .errors
        .into_iter()
        .map(|diagnostic| {
            let loc = parsed.source_map.lookup_char_pos(diagnostic.span.lo);
            ReportedError {
                file_path: file_path.to_string(),
                line: loc.line,
                col: loc.col_display + 1,
                message: diagnostic.error.to_string(),
            }
        })
        .collect();

    (sites, errors)
}
