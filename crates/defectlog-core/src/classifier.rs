//! Defect classification.

use defectlog_commit::{Classification, CommitId, CommitRecord};
use defectlog_config::{HeuristicRule, HeuristicsConfig, MatchMode};
use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::{CoreError, CoreResult, OverrideSet};

#[derive(Debug, Clone)]
struct CompiledRule {
    rule: HeuristicRule,
    regex: Regex,
}

/// An ordered, compiled set of message heuristics.
///
/// Rules are tried in order and the first match wins. Matching is
/// case-insensitive in every mode.
#[derive(Debug, Clone, Default)]
pub struct HeuristicSet {
    rules: Vec<CompiledRule>,
}

impl HeuristicSet {
    /// Compiles the given rules.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPattern`] naming the first rule whose
    /// pattern does not compile.
    pub fn compile(rules: impl IntoIterator<Item = HeuristicRule>) -> CoreResult<Self> {
        let rules = rules
            .into_iter()
            .map(|rule| {
                let regex = RegexBuilder::new(&regex_source(&rule))
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| CoreError::InvalidPattern {
                        name: rule.name.clone(),
                        source,
                    })?;
                Ok(CompiledRule { rule, regex })
            })
            .collect::<CoreResult<Vec<_>>>()?;

        debug!(count = rules.len(), "compiled heuristic rules");
        Ok(Self { rules })
    }

    /// Compiles the effective rules of a heuristics configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule pattern does not compile.
    pub fn from_config(config: &HeuristicsConfig) -> CoreResult<Self> {
        Self::compile(config.effective_rules())
    }

    /// Returns the first rule matching the message.
    #[must_use]
    pub fn first_match(&self, message: &str) -> Option<&HeuristicRule> {
        self.rules
            .iter()
            .find(|compiled| compiled.regex.is_match(message))
            .map(|compiled| &compiled.rule)
    }

    /// Iterates over the rules in evaluation order.
    pub fn rules(&self) -> impl Iterator<Item = &HeuristicRule> {
        self.rules.iter().map(|compiled| &compiled.rule)
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn regex_source(rule: &HeuristicRule) -> String {
    match rule.mode {
        MatchMode::Substring => regex::escape(&rule.pattern),
        MatchMode::Word => format!(r"\b{}\b", regex::escape(&rule.pattern)),
        MatchMode::Regex => rule.pattern.clone(),
    }
}

/// Decides whether commits fix defects.
///
/// Classification depends only on the commit, the override set and the
/// heuristics; records can be classified in any order.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    heuristics: &'a HeuristicSet,
    overrides: &'a OverrideSet,
}

impl<'a> Classifier<'a> {
    /// Creates a classifier.
    #[must_use]
    pub fn new(heuristics: &'a HeuristicSet, overrides: &'a OverrideSet) -> Self {
        Self {
            heuristics,
            overrides,
        }
    }

    /// Classifies a commit by id and message.
    #[must_use]
    pub fn classification(&self, id: &CommitId, message: &str) -> Classification {
        if self.overrides.contains(id) {
            return Classification::overridden();
        }

        match self.heuristics.first_match(message) {
            Some(rule) => Classification::heuristic(&rule.name),
            None => Classification::unclassified(),
        }
    }

    /// Classifies a record in place.
    pub fn classify(&self, record: &mut CommitRecord) {
        let classification = self.classification(&record.id, &record.message);
        debug!(
            id = record.id.short(),
            source = classification.source().as_str(),
            rule = classification.rule(),
            "classified commit"
        );
        record.classify(classification);
    }
}
