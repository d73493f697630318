use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Resolve per-directory Closure/JS build configuration from build file directives"
)]
pub struct Cli {
    /// Root of the source tree to walk
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Settings file to use instead of ~/.config/jsconf/config.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Build file names to look for, in priority order (e.g., BUILD.bazel BUILD)
    #[arg(long, num_args = 1..)]
    pub build_file: Option<Vec<String>>,

    /// Patterns for files or directories to exclude
    #[arg(long, num_args = 1..)]
    pub exclude: Option<Vec<String>>,

    /// Grep js sources for configured externs and report the matching labels
    #[arg(long)]
    pub scan: bool,

    /// Report unknown js_* directives and fail if any directive is malformed
    #[arg(long)]
    pub strict: bool,
}
