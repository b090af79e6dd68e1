//! Shared state for one build action invocation

use chrono::NaiveDateTime;

use b4x_fs::{NormalizedPath, ProjectLayout};

use crate::Result;
use crate::config::ActionsConfig;
use crate::variables::VariableResolver;

/// Project layout, settings and clock reading used by every action.
///
/// The clock is read once so `%DATE%`, `%TIME%` and the build stamp agree
/// within one run.
#[derive(Debug, Clone)]
pub struct ActionContext {
    layout: ProjectLayout,
    config: ActionsConfig,
    now: NaiveDateTime,
}

impl ActionContext {
    pub fn new(layout: ProjectLayout, now: NaiveDateTime) -> Self {
        Self {
            layout,
            config: ActionsConfig::default(),
            now,
        }
    }

    /// A context using the local clock and the project's settings file.
    pub fn load(layout: ProjectLayout) -> Result<Self> {
        let config = ActionsConfig::load(layout.project_dir())?;
        Ok(Self::new(layout, chrono::Local::now().naive_local()).with_config(config))
    }

    pub fn with_config(mut self, config: ActionsConfig) -> Self {
        self.config = config;
        self
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn config(&self) -> &ActionsConfig {
        &self.config
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    pub fn variables(&self) -> VariableResolver<'_> {
        VariableResolver::new(&self.layout, self.now)
    }

    /// Expand placeholders in `text`.
    pub fn expand(&self, text: &str) -> Result<String> {
        self.variables().expand(text)
    }

    /// Expand placeholders in a path argument, then resolve it against the
    /// project layout.
    pub fn resolve(&self, raw: &str) -> Result<NormalizedPath> {
        let expanded = self.expand(raw)?;
        let resolved = self.layout.resolve(&expanded);
        tracing::debug!(raw, resolved = %resolved, "Resolved path");
        Ok(resolved)
    }
}
