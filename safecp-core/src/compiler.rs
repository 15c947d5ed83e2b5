//! compiler.rs - Compiles the pattern configuration into a `PatternStore`.
//!
//! This module turns the parsed `PatternConfig` into compiled regexes ready
//! for matching. Compilation is lenient: a rule that is empty, oversized, or
//! fails to compile is skipped with a warning rather than disabling the
//! whole store, so one bad rule cannot turn protection off entirely.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};
use regex::{Regex, RegexBuilder};

use crate::config::PatternConfig;
use crate::errors::SafecpError;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// The literal token a replacement template may contain; rendered with the
/// 1-based ordinal of the substitution mapping it is assigned to.
pub const COUNTER_TOKEN: &str = "{counter}";

/// A parsed replacement template.
///
/// Templates without the counter token always render to the same constant
/// placeholder for every value the rule matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementTemplate {
    raw: String,
    has_counter: bool,
}

impl ReplacementTemplate {
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            has_counter: raw.contains(COUNTER_TOKEN),
        }
    }

    /// Renders the placeholder for the `counter`-th distinct mapped value.
    pub fn render(&self, counter: usize) -> String {
        if self.has_counter {
            self.raw.replace(COUNTER_TOKEN, &counter.to_string())
        } else {
            self.raw.clone()
        }
    }

    /// Whether distinct matched values receive distinct placeholders.
    pub fn is_counted(&self) -> bool {
        self.has_counter
    }
}

/// Represents a single compiled detection rule.
#[derive(Debug)]
pub struct CompiledPattern {
    /// The unique name of the rule; bookkeeping only, never emitted.
    pub name: String,
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// The placeholder template for values this rule matches.
    pub template: ReplacementTemplate,
}

/// The ordered, immutable collection of compiled rules.
///
/// Order is the pattern-file order and drives discovery order during
/// sanitization.
#[derive(Debug, Default)]
pub struct PatternStore {
    patterns: Vec<CompiledPattern>,
}

impl PatternStore {
    /// Compiles a `PatternConfig` into a store, skipping invalid rules.
    ///
    /// Returns an error only when the configuration itself is unusable, not
    /// when individual rules are; those are logged and dropped.
    pub fn compile(config: &PatternConfig) -> Result<Self, SafecpError> {
        debug!("Starting compilation of {} patterns.", config.rules.len());

        let mut patterns = Vec::with_capacity(config.rules.len());
        for (name, rule) in &config.rules {
            match compile_rule(name, &rule.pattern, &rule.replacement_template) {
                Ok(compiled) => patterns.push(compiled),
                Err(e) => warn!("Skipping pattern '{}': {}", name, e),
            }
        }

        if patterns.is_empty() && !config.rules.is_empty() {
            warn!("No pattern compiled successfully; clipboard text will pass through unchanged.");
        }

        debug!("Finished compiling patterns. Total compiled: {}.", patterns.len());
        Ok(Self { patterns })
    }

    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn compile_rule(
    name: &str,
    pattern: &str,
    replacement_template: &str,
) -> Result<CompiledPattern, SafecpError> {
    if pattern.is_empty() {
        return Err(SafecpError::PatternInvalid(
            name.to_string(),
            "empty `pattern` field".to_string(),
        ));
    }
    if replacement_template.is_empty() {
        return Err(SafecpError::PatternInvalid(
            name.to_string(),
            "empty `replacement_template` field".to_string(),
        ));
    }
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(SafecpError::PatternLengthExceeded(
            name.to_string(),
            pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
    }

    let regex = RegexBuilder::new(pattern)
        .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
        .build()
        .map_err(|e| SafecpError::PatternCompilation(name.to_string(), e))?;

    Ok(CompiledPattern {
        name: name.to_string(),
        regex,
        template: ReplacementTemplate::parse(replacement_template),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PatternRule;
    use indexmap::IndexMap;

    fn config_of(entries: &[(&str, &str, &str)]) -> PatternConfig {
        let mut rules = IndexMap::new();
        for (name, pattern, template) in entries {
            rules.insert(
                name.to_string(),
                PatternRule {
                    pattern: pattern.to_string(),
                    replacement_template: template.to_string(),
                },
            );
        }
        PatternConfig { rules }
    }

    #[test]
    fn compiles_rules_in_file_order() {
        let config = config_of(&[
            ("b_rule", "bbb", "B"),
            ("a_rule", "aaa", "A"),
        ]);
        let store = PatternStore::compile(&config).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.patterns()[0].name, "b_rule");
        assert_eq!(store.patterns()[1].name, "a_rule");
    }

    #[test]
    fn invalid_regex_is_skipped_not_fatal() {
        let config = config_of(&[
            ("broken", "(unclosed", "X"),
            ("ok", "[0-9]+", "NUM_{counter}"),
        ]);
        let store = PatternStore::compile(&config).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.patterns()[0].name, "ok");
    }

    #[test]
    fn empty_fields_are_skipped() {
        let config = config_of(&[("no_pattern", "", "X"), ("no_template", "x", "")]);
        let store = PatternStore::compile(&config).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn template_rendering() {
        let counted = ReplacementTemplate::parse("KEY_{counter}");
        assert!(counted.is_counted());
        assert_eq!(counted.render(3), "KEY_3");

        let constant = ReplacementTemplate::parse("[REDACTED]");
        assert!(!constant.is_counted());
        assert_eq!(constant.render(7), "[REDACTED]");
    }

    #[test]
    fn default_patterns_all_compile() {
        let config = PatternConfig::load_default_rules().unwrap();
        let store = PatternStore::compile(&config).unwrap();
        assert_eq!(store.len(), config.rules.len());
    }
}
