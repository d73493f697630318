use crate::closure_js::Diagnostic;
use std::path::PathBuf;

/// Represents the final configuration after merging the settings file and CLI args.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub build_file_names: Vec<String>,
    pub source_extensions: Vec<String>,
    pub exclude: Vec<String>,
    pub scan: bool,
    pub strict: bool,
}

/// The resolved JS configuration of one visited directory.
#[derive(Debug)]
pub struct DirReport {
    pub relative_path: String,
    pub build_file: Option<PathBuf>,
    pub rule_per_file: bool,
    /// (token, label) pairs in effect, inherited ones first.
    pub grep_externs: Vec<(String, String)>,
    pub diagnostics: Vec<Diagnostic>,
    pub files: Vec<FileMatches>,
}

/// Extern labels a source file would pick up.
#[derive(Debug, PartialEq, Eq)]
pub struct FileMatches {
    pub relative_path: String,
    pub labels: Vec<String>,
    /// Set when the file could not be read; `labels` is then empty.
    pub error: Option<String>,
}
