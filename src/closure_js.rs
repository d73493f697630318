//! Per-directory configuration for the Closure/JS build extension.
//!
//! Directives in a directory's build file adjust the configuration that
//! directory and its descendants see. The host walks the tree top-down and
//! calls [`Configurer::configure`] once per directory with a registry cloned
//! from the parent.

pub mod config;
pub mod directive;
pub mod error;
pub mod grep_extern;
pub mod registry;

pub use config::{JsConfig, JsConfigurer, JS_NAME, KNOWN_DIRECTIVES};
pub use directive::{BuildFile, Diagnostic, Directive};
pub use error::ConfigError;
pub use grep_extern::GrepExtern;
pub use registry::Registry;

use std::path::Path;

/// The hooks a language extension exposes to the host traversal.
pub trait Configurer {
    /// Directive keys this extension understands.
    fn known_directives(&self) -> &'static [&'static str];

    /// Seeds the root configuration. Called once per run before any directory.
    fn register_flags(&self, registry: &mut Registry);

    /// Validates the root configuration after flags are registered.
    fn check_flags(&self, _registry: &Registry) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Derives the configuration for the directory at `rel` from whatever the
    /// registry currently holds, applying the directives in `file`.
    fn configure(
        &self,
        registry: &mut Registry,
        rel: &Path,
        file: Option<&BuildFile>,
    ) -> Vec<Diagnostic>;
}
