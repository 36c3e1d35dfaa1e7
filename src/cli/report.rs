//! Report formatting and printing utilities.
//!
//! Compiled messages and per-site failures are printed in a compact
//! cargo-style layout. Separate from the pipeline so lingo can be used as a
//! library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{ProjectReport, ReportedError, ReportedSite};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print a run's report to stdout.
pub fn print(report: &ProjectReport, list_sites: bool, verbose: bool) {
    print_to(report, list_sites, verbose, &mut io::stdout().lock());
}

/// Print the full report as JSON (the `--json` flag).
pub fn print_json(report: &ProjectReport) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, report)?;
    let _ = writeln!(stdout);
    Ok(())
}

/// Print to a custom writer. Useful for testing or redirecting output.
pub fn print_to<W: Write>(report: &ProjectReport, list_sites: bool, verbose: bool, writer: &mut W) {
    if list_sites && !report.sites.is_empty() {
        let location_width = report
            .sites
            .iter()
            .map(|site| location_of(site.file_path.as_str(), site.line, site.col).width())
            .max()
            .unwrap_or(0);

        for site in &report.sites {
            print_site(site, location_width, verbose, writer);
        }
        let _ = writeln!(writer);
    }

    for error in &report.errors {
        print_error(error, writer);
    }

    print_summary(report, writer);
}

fn location_of(file_path: &str, line: usize, col: usize) -> String {
    format!("{file_path}:{line}:{col}")
}

fn print_site<W: Write>(site: &ReportedSite, location_width: usize, verbose: bool, writer: &mut W) {
    let location = location_of(&site.file_path, site.line, site.col);
    let padding = " ".repeat(location_width.saturating_sub(location.width()));

    let message = match &site.descriptor.message {
        Some(message) => format!("\"{message}\""),
        None => String::new(),
    };

    let _ = writeln!(
        writer,
        "{location}{padding}  {id}  {message}",
        location = location.as_str().dimmed(),
        id = site.descriptor.id.as_str().cyan().bold(),
    );

    if verbose {
        if let Some(context) = &site.descriptor.context {
            let _ = writeln!(
                writer,
                "{:location_width$}  context: {}",
                "",
                context.as_str().dimmed()
            );
        }
        if !site.descriptor.values.is_empty() {
            let values = site.descriptor.values.join(", ");
            let _ = writeln!(
                writer,
                "{:location_width$}  values: {}",
                "",
                values.as_str().dimmed()
            );
        }
        if !site.descriptor.components.is_empty() {
            let components = site.descriptor.components.join(", ");
            let _ = writeln!(
                writer,
                "{:location_width$}  components: {}",
                "",
                components.as_str().dimmed()
            );
        }
    }
}

fn print_error<W: Write>(error: &ReportedError, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{}: {}",
        "error".red().bold(),
        error.message.as_str().bold()
    );
    let _ = writeln!(
        writer,
        "  {} {}",
        "-->".blue().bold(),
        location_of(&error.file_path, error.line, error.col)
    );
}

fn print_summary<W: Write>(report: &ProjectReport, writer: &mut W) {
    if report.has_errors() {
        let _ = writeln!(
            writer,
            "{} {} call sites failed to compile",
            FAILURE_MARK.red().bold(),
            report.errors.len(),
        );
    } else {
        let _ = writeln!(
            writer,
            "{} Compiled {} messages from {} files",
            SUCCESS_MARK.green().bold(),
            report.sites.len(),
            report.files_scanned,
        );
    }
}
