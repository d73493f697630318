use crate::app::models::{DirReport, FileMatches, RuntimeConfig};
use crate::closure_js::{BuildFile, Configurer, Diagnostic, JsConfig, JsConfigurer, Registry};
use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use pathdiff::diff_paths;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Plays host for one run: walks the tree top-down and resolves each
/// directory's JS configuration from its parent's.
pub struct Scanner {
    root: PathBuf,
    build_file_names: Vec<String>,
    source_extensions: Vec<String>,
    exclude_set: GlobSet,
    scan: bool,
    strict: bool,
}

impl Scanner {
    pub fn new(config: &RuntimeConfig) -> Result<Self> {
        Ok(Self {
            root: config.root.clone(),
            build_file_names: config.build_file_names.clone(),
            source_extensions: config.source_extensions.clone(),
            exclude_set: build_globset(&config.exclude)?,
            scan: config.scan,
            strict: config.strict,
        })
    }

    pub fn scan(&self) -> Result<Vec<DirReport>> {
        let (dirs, sources) = self.collect();
        let configurer = JsConfigurer;

        let mut root_registry = Registry::new();
        configurer.register_flags(&mut root_registry);
        configurer
            .check_flags(&root_registry)
            .context("Invalid root configuration")?;

        let mut registries: HashMap<PathBuf, Registry> = HashMap::new();
        let mut reports = Vec::new();

        for dir in dirs {
            let mut registry = if dir == self.root {
                root_registry.clone()
            } else {
                match dir.parent().and_then(|p| registries.get(p)) {
                    Some(parent) => parent.clone(),
                    // An ancestor was excluded.
                    None => continue,
                }
            };

            let rel = diff_paths(&dir, &self.root).unwrap_or_default();
            let build_file = self.read_build_file(&dir, &rel);

            let mut diagnostics = match (&build_file, self.strict) {
                (Some(file), true) => unknown_directives(&configurer, file),
                _ => Vec::new(),
            };
            diagnostics.extend(configurer.configure(&mut registry, &rel, build_file.as_ref()));
            // Build file order.
            diagnostics.sort_by_key(|d| d.line);

            let js = JsConfig::from_registry(&registry)
                .with_context(|| format!("No JS configuration for {}", rel.display()))?;

            let files = match sources.get(&dir) {
                Some(paths) if self.scan => self.match_sources(js, paths),
                _ => Vec::new(),
            };

            reports.push(DirReport {
                relative_path: rel.to_string_lossy().replace('\\', "/"),
                build_file: build_file.map(|f| f.path),
                rule_per_file: js.rule_per_file,
                grep_externs: js
                    .grep_externs
                    .iter()
                    .map(|ge| (ge.token().to_string(), ge.label().to_string()))
                    .collect(),
                diagnostics,
                files,
            });
            registries.insert(dir, registry);
        }

        Ok(reports)
    }

    /// Directories in parent-before-child order, plus source files grouped by directory.
    fn collect(&self) -> (Vec<PathBuf>, BTreeMap<PathBuf, Vec<PathBuf>>) {
        let mut dirs = Vec::new();
        let mut sources: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();

        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .build();

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("Error walking entry: {}", err);
                    continue;
                }
            };
            let path = entry.path();
            if path.components().any(|c| c.as_os_str() == ".git") || self.is_excluded(path) {
                continue;
            }
            if path.is_dir() {
                dirs.push(path.to_path_buf());
            } else if self.is_source(path) {
                if let Some(parent) = path.parent() {
                    sources
                        .entry(parent.to_path_buf())
                        .or_default()
                        .push(path.to_path_buf());
                }
            }
        }

        // Path ordering is component-wise, so parents sort before their children.
        dirs.sort();
        for files in sources.values_mut() {
            files.sort();
        }
        (dirs, sources)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        match diff_paths(path, &self.root) {
            Some(rel) if !rel.as_os_str().is_empty() => self.exclude_set.is_match(&rel),
            _ => false,
        }
    }

    fn is_source(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.source_extensions.iter().any(|e| e == ext))
    }

    /// Reads the first build file present in `dir`, in configured priority order.
    ///
    /// Directive lines are ASCII, so stray non-UTF-8 bytes elsewhere in the
    /// file are decoded lossily. An unreadable file is treated as absent.
    fn read_build_file(&self, dir: &Path, rel: &Path) -> Option<BuildFile> {
        let name = self
            .build_file_names
            .iter()
            .find(|name| dir.join(name).is_file())?;
        let path = dir.join(name);
        match fs::read(&path) {
            Ok(bytes) => Some(BuildFile::parse(
                &rel.join(name),
                &String::from_utf8_lossy(&bytes),
            )),
            Err(err) => {
                log::warn!("Failed to read build file {:?}: {}", path, err);
                None
            }
        }
    }

    fn match_sources(&self, js: &JsConfig, paths: &[PathBuf]) -> Vec<FileMatches> {
        paths
            .iter()
            .map(|path| {
                let rel = diff_paths(path, &self.root).unwrap_or_else(|| path.clone());
                let relative_path = rel.to_string_lossy().replace('\\', "/");
                match fs::read(path) {
                    Ok(content) => FileMatches {
                        relative_path,
                        labels: js
                            .matching_labels(&content)
                            .into_iter()
                            .map(str::to_string)
                            .collect(),
                        error: None,
                    },
                    Err(err) => {
                        log::warn!("Failed to read source {:?}: {}", path, err);
                        FileMatches {
                            relative_path,
                            labels: Vec::new(),
                            error: Some(err.to_string()),
                        }
                    }
                }
            })
            .collect()
    }
}

/// `js_*` directives this extension does not know about, which are most likely typos.
fn unknown_directives(configurer: &impl Configurer, file: &BuildFile) -> Vec<Diagnostic> {
    let known = configurer.known_directives();
    file.directives
        .iter()
        .filter(|d| d.key.starts_with("js_") && !known.contains(&d.key.as_str()))
        .map(|d| {
            log::warn!("{}: unknown directive `{}`", file.path.display(), d.key);
            Diagnostic::new(d, "unknown directive")
        })
        .collect()
}

/// Exclude patterns match root-relative paths; `*` stays within one path component.
fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let globs = patterns
        .iter()
        .map(|pat| {
            GlobBuilder::new(pat)
                .literal_separator(true)
                .build()
                .with_context(|| format!("Invalid exclude pattern {:?}", pat))
        })
        .collect::<Result<Vec<_>>>()?;
    globs
        .into_iter()
        .fold(GlobSetBuilder::new(), |mut builder, glob| {
            builder.add(glob);
            builder
        })
        .build()
        .context("Failed to compile exclude patterns")
}
