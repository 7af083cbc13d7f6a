//! Report configuration types.

use serde::{Deserialize, Serialize};

/// Report configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Custom report title.
    #[serde(default)]
    pub title: Option<String>,
    /// Render the decision guideline section.
    #[serde(default = "default_true")]
    pub guidelines: bool,
    /// Text rendered in place of a missing value.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

fn default_true() -> bool {
    true
}

fn default_placeholder() -> String {
    "-".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: None,
            guidelines: true,
            placeholder: default_placeholder(),
        }
    }
}

impl ReportConfig {
    /// Default report title.
    pub const DEFAULT_TITLE: &'static str = "Scoring Method Evaluation Report";

    /// Set a custom title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable or disable the guideline section.
    pub fn with_guidelines(mut self, enabled: bool) -> Self {
        self.guidelines = enabled;
        self
    }

    /// The title to render.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(Self::DEFAULT_TITLE)
    }
}
