//! Project-level compilation: scanning, config handling, and reporting.

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;

use lingo::cli::args::CommonArgs;
use lingo::cli::commands::{SiteShape, compile_project};
use lingo::compiler::Mode;

fn common_args(path: PathBuf) -> CommonArgs {
    CommonArgs {
        path,
        mode: None,
        extract: false,
        verbose: false,
    }
}

fn project_with(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    // Stop the upward config search at the project root.
    fs::create_dir(dir.path().join(".git")).unwrap();
    for (path, content) in files {
        let full = dir.path().join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }
    dir
}

#[test]
fn test_compile_project_reports_located_sites() {
    let dir = project_with(&[(
        "src/app.tsx",
        r#"import { Trans } from '@lingui/react/macro';
export function App() {
    return <Trans>Hello World</Trans>;
}
"#,
    )]);

    let report = compile_project(&common_args(dir.path().to_path_buf())).unwrap();

    assert_eq!(report.files_scanned, 1);
    assert_eq!(report.errors.len(), 0);
    assert_eq!(report.sites.len(), 1);

    let site = &report.sites[0];
    assert!(site.file_path.ends_with("app.tsx"));
    assert_eq!(site.line, 3);
    assert_eq!(site.kind, SiteShape::Element);
    assert_eq!(site.descriptor.id, "mY42CM");
}

#[test]
fn test_compile_project_collects_sites_across_files() {
    let dir = project_with(&[
        (
            "src/a.tsx",
            "import { t } from '@lingui/core/macro';\nexport const a = t`Hello`;\n",
        ),
        (
            "src/b.tsx",
            "import { t } from '@lingui/core/macro';\nexport const b = t`Hello World`;\n",
        ),
    ]);

    let report = compile_project(&common_args(dir.path().to_path_buf())).unwrap();

    assert_eq!(report.files_scanned, 2);
    let ids: Vec<&str> = report
        .sites
        .iter()
        .map(|site| site.descriptor.id.as_str())
        .collect();
    assert_eq!(ids, vec!["uzTaYi", "mY42CM"]);
}

#[test]
fn test_compile_project_reports_usage_errors_per_site() {
    let dir = project_with(&[(
        "src/app.tsx",
        r#"import { t } from '@lingui/core/macro';
export const bad = t``;
export const good = t`Hello`;
"#,
    )]);

    let report = compile_project(&common_args(dir.path().to_path_buf())).unwrap();

    assert_eq!(report.sites.len(), 1);
    assert_eq!(report.sites[0].descriptor.id, "uzTaYi");
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].line, 2);
    assert!(report.errors[0].message.contains("message is empty"));
}

#[test]
fn test_config_file_controls_mode() {
    let dir = project_with(&[
        (".lingorc.json", r#"{ "mode": "production" }"#),
        (
            "src/app.tsx",
            "import { t } from '@lingui/core/macro';\nexport const a = t`Hello`;\n",
        ),
    ]);

    let report = compile_project(&common_args(dir.path().to_path_buf())).unwrap();
    assert_eq!(report.sites.len(), 1);
    assert_eq!(report.sites[0].descriptor.message, None);

    // CLI override wins over the config file.
    let mut args = common_args(dir.path().to_path_buf());
    args.mode = Some(Mode::Development);
    let report = compile_project(&args).unwrap();
    assert_eq!(report.sites[0].descriptor.message.as_deref(), Some("Hello"));
}

#[test]
fn test_parse_errors_do_not_abort_the_run() {
    let dir = project_with(&[
        ("src/broken.ts", "const = ;\n"),
        (
            "src/app.tsx",
            "import { t } from '@lingui/core/macro';\nexport const a = t`Hello`;\n",
        ),
    ]);

    let report = compile_project(&common_args(dir.path().to_path_buf())).unwrap();
    assert_eq!(report.sites.len(), 1);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].file_path.ends_with("broken.ts"));
}
