//! Configuration schema.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Owner label used when neither the command line nor the file sets one.
pub const DEFAULT_OWNER: &str = "local";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Display label for the repository owner.
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Defect heuristics.
    #[serde(default)]
    pub heuristics: HeuristicsConfig,

    /// Override file lookup.
    #[serde(default)]
    pub overrides: OverridesConfig,

    /// Report outputs.
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            heuristics: HeuristicsConfig::default(),
            overrides: OverridesConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Checks values that TOML typing alone cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.owner.trim().is_empty() {
            return Err(ConfigError::invalid("owner", "must not be empty"));
        }
        if self.overrides.extension.trim().is_empty() {
            return Err(ConfigError::invalid(
                "overrides.extension",
                "must not be empty",
            ));
        }
        self.heuristics.validate()
    }
}

fn default_owner() -> String {
    DEFAULT_OWNER.to_string()
}

fn default_true() -> bool {
    true
}

/// How a heuristic pattern is matched against a commit message.
///
/// Matching is always case-insensitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The literal pattern anywhere in the message.
    Substring,
    /// The literal pattern as a whole word.
    #[default]
    Word,
    /// The pattern is a regular expression.
    Regex,
}

impl MatchMode {
    /// Returns the lowercase name used in configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Substring => "substring",
            Self::Word => "word",
            Self::Regex => "regex",
        }
    }
}

/// One named defect-indicating pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicRule {
    /// Rule name, reported on records it matches.
    pub name: String,

    /// The pattern, interpreted according to `mode`.
    pub pattern: String,

    /// How `pattern` is matched.
    #[serde(default)]
    pub mode: MatchMode,
}

impl HeuristicRule {
    /// Creates a rule.
    #[must_use]
    pub fn new(name: impl Into<String>, pattern: impl Into<String>, mode: MatchMode) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            mode,
        }
    }

    /// The built-in rule set, in evaluation order.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("fix", r"\bfix(e[sd]|ing)?\b", MatchMode::Regex),
            Self::new("bugfix", r"\b(bug|hot)[ -]?fix(e[sd])?\b", MatchMode::Regex),
            Self::new("bug", r"\bbugs?\b", MatchMode::Regex),
            Self::new("defect", r"\bdefects?\b", MatchMode::Regex),
            Self::new("issue-ref", r"\bissues?\s*#?\d+", MatchMode::Regex),
            Self::new(
                "closes-ref",
                r"\b(close[sd]?|resolve[sd]?)\s+#\d+",
                MatchMode::Regex,
            ),
            Self::new("jira", r"\bjira-\d+\b", MatchMode::Regex),
        ]
    }
}

/// Heuristics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeuristicsConfig {
    /// Start from the built-in rule set.
    #[serde(default = "default_true")]
    pub use_defaults: bool,

    /// Additional rules. A rule named like a built-in one replaces it.
    #[serde(default, rename = "rule")]
    pub rules: Vec<HeuristicRule>,
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            use_defaults: true,
            rules: Vec::new(),
        }
    }
}

impl HeuristicsConfig {
    /// Returns the rules to evaluate, in order.
    #[must_use]
    pub fn effective_rules(&self) -> Vec<HeuristicRule> {
        let mut rules = if self.use_defaults {
            HeuristicRule::defaults()
        } else {
            Vec::new()
        };

        for rule in &self.rules {
            match rules.iter_mut().find(|r| r.name == rule.name) {
                Some(existing) => *existing = rule.clone(),
                None => rules.push(rule.clone()),
            }
        }
        rules
    }

    fn validate(&self) -> ConfigResult<()> {
        let mut seen = HashSet::new();
        for (idx, rule) in self.rules.iter().enumerate() {
            if rule.name.trim().is_empty() {
                return Err(ConfigError::invalid(
                    format!("heuristics.rule[{idx}].name"),
                    "must not be empty",
                ));
            }
            let field = format!("heuristics.rule.{}", rule.name);
            if rule.pattern.is_empty() {
                return Err(ConfigError::invalid(
                    format!("{field}.pattern"),
                    "must not be empty",
                ));
            }
            if !seen.insert(rule.name.as_str()) {
                return Err(ConfigError::invalid(field, "is defined twice"));
            }
        }
        Ok(())
    }
}

/// Override file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverridesConfig {
    /// Directory searched for `<repo>.<extension>`.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Override file extension.
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for OverridesConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            extension: default_extension(),
        }
    }
}

impl OverridesConfig {
    /// Returns the override file path for a repository name.
    #[must_use]
    pub fn path_for(&self, repo_name: &str) -> PathBuf {
        self.dir.join(format!("{repo_name}.{}", self.extension))
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_extension() -> String {
    "dft".to_string()
}

/// Report output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory reports are written to.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Write `<repo>.json`.
    #[serde(default = "default_true")]
    pub json: bool,

    /// Write `<repo>.csv`.
    #[serde(default = "default_true")]
    pub csv: bool,

    /// Write `<repo>-commit-recs.txt`, one JSON record per line.
    #[serde(default)]
    pub records: bool,

    /// Pretty-print the JSON report.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            json: true,
            csv: true,
            records: false,
            pretty: true,
        }
    }
}

impl OutputConfig {
    /// Returns the path of a report file for a repository.
    #[must_use]
    pub fn path_for(&self, repo_name: &str, suffix: &str) -> PathBuf {
        self.dir.join(format!("{repo_name}{suffix}"))
    }
}
