use crate::app::cli::Cli;
use crate::app::models::RuntimeConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_BUILD_FILE_NAMES: &[&str] = &["BUILD.bazel", "BUILD"];
const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &["js", "jsx"];

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    build_file_names: Option<Vec<String>>,
    source_extensions: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
}

fn default_settings_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("jsconf").join("config.toml"))
}

/// An explicit path must exist; the default location is optional.
fn load_settings_file(explicit: Option<&Path>) -> Result<SettingsFile> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_settings_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(SettingsFile::default()),
        },
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read settings at {:?}", path))?;

    toml::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))
}

/// Settings file entries first, then CLI entries; first occurrence wins.
fn merge_lists(from_file: Option<Vec<String>>, from_cli: Option<Vec<String>>) -> Vec<String> {
    let mut seen = HashSet::new();
    from_file
        .into_iter()
        .chain(from_cli)
        .flatten()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

fn or_defaults(values: Vec<String>, defaults: &[&str]) -> Vec<String> {
    if values.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        values
    }
}

pub fn resolve_config(cli: Cli) -> Result<RuntimeConfig> {
    let settings = load_settings_file(cli.config.as_deref())?;

    let build_file_names = merge_lists(settings.build_file_names, cli.build_file);
    let source_extensions = merge_lists(settings.source_extensions, None);

    Ok(RuntimeConfig {
        root: cli.root,
        build_file_names: or_defaults(build_file_names, DEFAULT_BUILD_FILE_NAMES),
        source_extensions: or_defaults(source_extensions, DEFAULT_SOURCE_EXTENSIONS),
        exclude: merge_lists(settings.exclude, cli.exclude),
        scan: cli.scan,
        strict: cli.strict,
    })
}
