//! Binder configuration types
//!
//! This module defines the small set of knobs the core needs: which control
//! paths count as foreign hardware to strip, and how the bindings file is
//! written.

use serde::{Deserialize, Serialize};

/// Configuration for the binder library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinderConfig {
    /// Substrings that mark a host binding path as disallowed hardware
    #[serde(default = "default_disallowed_patterns")]
    pub disallowed_patterns: Vec<String>,

    /// Whether unmodified host defaults are written to the bindings file
    #[serde(default = "default_true")]
    pub persist_baseline: bool,

    /// Whether the bindings file is pretty-printed
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_true() -> bool {
    true
}

fn default_disallowed_patterns() -> Vec<String> {
    vec!["Gamepad".to_string(), "XInputController".to_string()]
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            disallowed_patterns: default_disallowed_patterns(),
            persist_baseline: true,
            pretty: true,
        }
    }
}

impl BinderConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: add a disallowed path pattern
    pub fn add_disallowed_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.disallowed_patterns.push(pattern.into());
        self
    }

    /// Builder method: replace all disallowed path patterns
    pub fn with_disallowed_patterns(mut self, patterns: Vec<String>) -> Self {
        self.disallowed_patterns = patterns;
        self
    }

    /// Builder method: persist unmodified host defaults or not
    pub fn with_persist_baseline(mut self, enabled: bool) -> Self {
        self.persist_baseline = enabled;
        self
    }

    /// Builder method: pretty-print the bindings file
    pub fn with_pretty(mut self, enabled: bool) -> Self {
        self.pretty = enabled;
        self
    }

    /// Check if a control path matches any disallowed pattern
    ///
    /// Empty paths never match.
    pub fn is_disallowed(&self, path: &str) -> bool {
        !path.is_empty()
            && self
                .disallowed_patterns
                .iter()
                .any(|pattern| !pattern.is_empty() && path.contains(pattern.as_str()))
    }
}
