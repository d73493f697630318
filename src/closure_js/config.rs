use std::path::Path;

use super::directive::{parse_bool, BuildFile, Diagnostic, Directive};
use super::error::ConfigError;
use super::grep_extern::GrepExtern;
use super::registry::Registry;
use super::Configurer;

/// Registry key for the JS extension's configuration.
pub const JS_NAME: &str = "js";

const GREP_EXTERN: &str = "js_grep_extern";
const RULE_PER_FILE: &str = "js_rule_per_file";

pub const KNOWN_DIRECTIVES: &[&str] = &[GREP_EXTERN, RULE_PER_FILE];

/// Configuration values related to JS rules for one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsConfig {
    /// Tokens searched for in js/jsx files; a hit adds the label to deps.
    pub grep_externs: Vec<GrepExtern>,
    /// Generate a rule per js file instead of one per directory, named for the directory.
    pub rule_per_file: bool,
}

impl JsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_registry(registry: &Registry) -> Result<&Self, ConfigError> {
        registry.get::<Self>(JS_NAME)
    }

    /// Labels of every rule whose token occurs in `content`, in rule order.
    pub fn matching_labels(&self, content: &[u8]) -> Vec<&str> {
        self.grep_externs
            .iter()
            .filter(|ge| ge.matches(content))
            .map(GrepExtern::label)
            .collect()
    }

    /// Applies one directive. Unknown keys are left for other extensions.
    pub fn apply(&mut self, directive: &Directive) -> Result<(), Diagnostic> {
        match directive.key.as_str() {
            GREP_EXTERN => {
                let fields: Vec<&str> = directive.value.split_whitespace().collect();
                let [token, label] = fields[..] else {
                    return Err(Diagnostic::new(
                        directive,
                        "expected 2 fields: `js_grep_extern (token) (extern label)`",
                    ));
                };
                let ge = GrepExtern::new(token, label)
                    .map_err(|e| Diagnostic::new(directive, e.to_string()))?;
                self.grep_externs.push(ge);
            }
            RULE_PER_FILE => {
                let fields: Vec<&str> = directive.value.split_whitespace().collect();
                match fields[..] {
                    [] => self.rule_per_file = true,
                    [arg] => {
                        self.rule_per_file = parse_bool(arg).ok_or_else(|| {
                            Diagnostic::new(
                                directive,
                                format!("`js_rule_per_file` invalid argument: {arg:?}"),
                            )
                        })?;
                    }
                    _ => {
                        return Err(Diagnostic::new(
                            directive,
                            "expected 0 or 1 arguments: `js_rule_per_file [true|false]`",
                        ));
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Applies every directive in order, skipping and collecting the malformed ones.
    pub fn apply_all<'a>(
        &mut self,
        directives: impl IntoIterator<Item = &'a Directive>,
    ) -> Vec<Diagnostic> {
        directives
            .into_iter()
            .filter_map(|d| self.apply(d).err())
            .collect()
    }
}

/// The JS extension's [`Configurer`].
#[derive(Debug, Default, Clone, Copy)]
pub struct JsConfigurer;

impl Configurer for JsConfigurer {
    fn known_directives(&self) -> &'static [&'static str] {
        KNOWN_DIRECTIVES
    }

    fn register_flags(&self, registry: &mut Registry) {
        registry.insert(JS_NAME, JsConfig::new());
    }

    fn configure(
        &self,
        registry: &mut Registry,
        rel: &Path,
        file: Option<&BuildFile>,
    ) -> Vec<Diagnostic> {
        let mut config = if registry.contains(JS_NAME) {
            match JsConfig::from_registry(registry) {
                Ok(parent) => parent.clone(),
                Err(err) => {
                    log::error!("{}: {}; starting from an empty config", rel.display(), err);
                    JsConfig::new()
                }
            }
        } else {
            JsConfig::new()
        };
        registry.insert(JS_NAME, config.clone());

        let Some(file) = file else {
            return Vec::new();
        };

        let diagnostics = config.apply_all(&file.directives);
        for diag in &diagnostics {
            log::warn!("{}: {}", file.path.display(), diag);
        }
        log::debug!(
            "{}: {} grep externs, rule_per_file={}",
            rel.display(),
            config.grep_externs.len(),
            config.rule_per_file
        );
        registry.insert(JS_NAME, config);
        diagnostics
    }
}
