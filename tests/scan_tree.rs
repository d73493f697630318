use jsconf::app::models::{DirReport, FileMatches, RuntimeConfig};
use jsconf::app::scanner::Scanner;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "BUILD", "# gazelle:js_grep_extern React //npm:react\n");
    write(
        root,
        "app/BUILD.bazel",
        "# gazelle:js_rule_per_file\n# gazelle:js_grep_extern tok\n# gazelle:js_grep_exturn a b\n",
    );
    // BUILD.bazel wins over BUILD when both exist.
    write(root, "app/BUILD", "# gazelle:js_rule_per_file false\n");
    write(root, "app/main.js", "React.render(<App />);\n");
    write(root, "app/other.jsx", "const xReactx = 1;\n");
    write(root, "app/notes.txt", "React\n");
    write(root, "app/nested/deep.js", "// nothing\n");
    write(
        root,
        "lib/BUILD",
        "# gazelle:js_grep_extern goog //closure:base\n# gazelle:js_rule_per_file true extra\n",
    );
    write(root, "lib/util.js", "goog.provide('lib.util');\nReact.x;\n");
    write(root, "dist/BUILD", "# gazelle:js_rule_per_file\n");
    write(root, "dist/sub/bundle.js", "React\n");
    dir
}

fn runtime(root: &Path, strict: bool) -> RuntimeConfig {
    RuntimeConfig {
        root: root.to_path_buf(),
        build_file_names: vec!["BUILD.bazel".to_string(), "BUILD".to_string()],
        source_extensions: vec!["js".to_string(), "jsx".to_string()],
        exclude: vec!["dist".to_string()],
        scan: true,
        strict,
    }
}

fn find<'a>(reports: &'a [DirReport], rel: &str) -> &'a DirReport {
    reports
        .iter()
        .find(|r| r.relative_path == rel)
        .unwrap_or_else(|| panic!("no report for {rel:?}"))
}

#[test]
fn test_directories_visited_parent_first() {
    let dir = fixture();
    let reports = Scanner::new(&runtime(dir.path(), false)).unwrap().scan().unwrap();
    let order: Vec<&str> = reports.iter().map(|r| r.relative_path.as_str()).collect();
    assert_eq!(order, vec!["", "app", "app/nested", "lib"]);
}

#[test]
fn test_configuration_inherited_and_extended() {
    let dir = fixture();
    let reports = Scanner::new(&runtime(dir.path(), false)).unwrap().scan().unwrap();

    let root = find(&reports, "");
    assert!(!root.rule_per_file);
    assert_eq!(
        root.grep_externs,
        vec![("React".to_string(), "//npm:react".to_string())]
    );

    let app = find(&reports, "app");
    assert!(app.rule_per_file);
    assert_eq!(app.grep_externs, root.grep_externs);
    assert_eq!(
        app.build_file.as_deref(),
        Some(Path::new("app").join("BUILD.bazel").as_path())
    );
    assert_eq!(app.diagnostics.len(), 1);
    assert_eq!(app.diagnostics[0].key, "js_grep_extern");

    let nested = find(&reports, "app/nested");
    assert!(nested.rule_per_file);
    assert!(nested.build_file.is_none());
    assert!(nested.diagnostics.is_empty());

    let lib = find(&reports, "lib");
    assert!(!lib.rule_per_file);
    assert_eq!(lib.grep_externs.len(), 2);
    assert_eq!(lib.diagnostics.len(), 1);
    assert!(lib.diagnostics[0].reason.contains("expected 0 or 1 arguments"));
}

#[test]
fn test_sources_matched_against_externs() {
    let dir = fixture();
    let reports = Scanner::new(&runtime(dir.path(), false)).unwrap().scan().unwrap();

    assert_eq!(
        find(&reports, "app").files,
        vec![
            FileMatches {
                relative_path: "app/main.js".to_string(),
                labels: vec!["//npm:react".to_string()],
                error: None,
            },
            FileMatches {
                relative_path: "app/other.jsx".to_string(),
                labels: Vec::new(),
                error: None,
            },
        ]
    );
    assert_eq!(
        find(&reports, "lib").files[0].labels,
        vec!["//npm:react".to_string(), "//closure:base".to_string()]
    );
}

#[test]
fn test_strict_reports_unknown_js_directives() {
    let dir = fixture();
    let reports = Scanner::new(&runtime(dir.path(), true)).unwrap().scan().unwrap();
    let app = find(&reports, "app");
    assert_eq!(app.diagnostics.len(), 2);
    // Malformed (line 2) before unknown (line 3): build file order.
    assert_eq!(app.diagnostics[0].key, "js_grep_extern");
    assert_eq!(app.diagnostics[0].line, 2);
    assert_eq!(app.diagnostics[1].key, "js_grep_exturn");
    assert_eq!(app.diagnostics[1].line, 3);
    assert_eq!(app.diagnostics[1].reason, "unknown directive");
}

#[cfg(unix)]
#[test]
fn test_unreadable_source_does_not_abort_scan() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "BUILD", "# gazelle:js_grep_extern React //npm:react\n");
    write(root, "ok.js", "React.render();\n");
    std::os::unix::fs::symlink(root.join("missing.js"), root.join("dangling.js")).unwrap();
    write(root, "pkg/BUILD", "# gazelle:js_rule_per_file\n");
    write(root, "pkg/a.js", "React\n");

    let reports = Scanner::new(&runtime(root, false)).unwrap().scan().unwrap();

    let top = find(&reports, "");
    assert_eq!(top.files.len(), 2);
    assert_eq!(top.files[0].relative_path, "dangling.js");
    assert!(top.files[0].labels.is_empty());
    assert!(top.files[0].error.is_some());
    assert_eq!(top.files[1].labels, vec!["//npm:react".to_string()]);
    assert!(top.files[1].error.is_none());

    let pkg = find(&reports, "pkg");
    assert!(pkg.rule_per_file);
    assert_eq!(pkg.files[0].labels, vec!["//npm:react".to_string()]);
}

#[test]
fn test_non_utf8_build_file_still_resolves() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("a")).unwrap();
    fs::write(
        root.join("a/BUILD"),
        b"# gazelle:js_rule_per_file\n# caf\xe9 latin1 comment\n# gazelle:js_grep_extern goog //closure:base\n",
    )
    .unwrap();

    let reports = Scanner::new(&runtime(root, false)).unwrap().scan().unwrap();

    let a = find(&reports, "a");
    assert!(a.rule_per_file);
    assert_eq!(
        a.grep_externs,
        vec![("goog".to_string(), "//closure:base".to_string())]
    );
    assert!(a.diagnostics.is_empty());
}

#[test]
fn test_invalid_exclude_glob() {
    let dir = fixture();
    let mut config = runtime(dir.path(), false);
    config.exclude = vec!["[".to_string()];
    assert!(Scanner::new(&config).is_err());
}
