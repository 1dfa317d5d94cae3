use serde_json::Value;
use std::collections::HashMap;

use super::model::{kind_of, RuleDefinition, RuleSpec, RuleSummary, WordCase};
use super::tokenizer::DigitPolicy;
use crate::error::{CaserError, Result};

/// Rules every registry starts with, in priority order.
pub const BUILTIN_RULES: &[(&str, &str, WordCase)] = &[
    ("camel-case", "", WordCase::Camel),
    ("upper-camel-case", "", WordCase::Capitalize),
    ("kebab-case", "-", WordCase::Lower),
    ("train-case", "-", WordCase::Capitalize),
    ("snake-case", "_", WordCase::Lower),
    ("screaming-snake-case", "_", WordCase::Upper),
    ("dot-case", ".", WordCase::Lower),
    ("upper-dot-case", ".", WordCase::Upper),
];

/// Name-keyed table of casing rules.
///
/// Registration order is kept: it is the tie-break priority used by
/// detection. Re-registering a name replaces the definition but keeps its
/// original position. Rules are never removed.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: Vec<RuleDefinition>,
    index: HashMap<String, usize>,
    /// Non-alphanumeric characters of every registered separator.
    boundary_chars: Vec<char>,
    digits: DigitPolicy,
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleRegistry {
    /// A registry holding the built-in rules.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for (name, separator, word_case) in BUILTIN_RULES {
            registry.insert(RuleDefinition::new(*name, *separator).with_case(*word_case));
        }
        registry
    }

    /// A registry with no rules at all.
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            index: HashMap::new(),
            boundary_chars: Vec::new(),
            digits: DigitPolicy::default(),
        }
    }

    pub fn with_digit_policy(mut self, digits: DigitPolicy) -> Self {
        self.digits = digits;
        self
    }

    pub fn digit_policy(&self) -> DigitPolicy {
        self.digits
    }

    pub fn register_rule(&mut self, rule: RuleDefinition) -> Result<()> {
        rule.validate()?;
        self.insert(rule);
        Ok(())
    }

    /// Register a batch. Every rule is validated before any is committed.
    pub fn register_rules(&mut self, rules: Vec<RuleDefinition>) -> Result<()> {
        for (i, rule) in rules.iter().enumerate() {
            rule.validate()
                .map_err(|e| CaserError::invalid_rule(format!("rule #{i}: {}", strip(e))))?;
        }
        for rule in rules {
            self.insert(rule);
        }
        Ok(())
    }

    /// Register a rule given as untyped JSON.
    pub fn register_rule_value(&mut self, value: &Value) -> Result<()> {
        let spec = RuleSpec::from_value(value)?;
        self.register_rule(spec.into())
    }

    /// Register a JSON array of rules, all or nothing.
    pub fn register_rules_value(&mut self, value: &Value) -> Result<()> {
        let items = value.as_array().ok_or_else(|| {
            CaserError::invalid_rule(format!(
                "rule definitions must be an array, got {}",
                kind_of(value)
            ))
        })?;
        let rules = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                RuleSpec::from_value(item)
                    .map(RuleDefinition::from)
                    .map_err(|e| CaserError::invalid_rule(format!("rule #{i}: {}", strip(e))))
            })
            .collect::<Result<Vec<_>>>()?;
        self.register_rules(rules)
    }

    pub fn get_rule(&self, name: &str) -> Option<&RuleDefinition> {
        self.index.get(name).map(|&i| &self.rules[i])
    }

    pub(crate) fn require(&self, name: &str) -> Result<&RuleDefinition> {
        self.get_rule(name)
            .ok_or_else(|| CaserError::RuleNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Rules in registration order.
    pub fn rules(&self) -> impl Iterator<Item = &RuleDefinition> {
        self.rules.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn summaries(&self) -> Vec<RuleSummary> {
        self.rules.iter().map(RuleDefinition::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether `ch` separates words in any registered style.
    pub fn is_boundary(&self, ch: char) -> bool {
        ch.is_whitespace() || self.boundary_chars.contains(&ch)
    }

    fn insert(&mut self, rule: RuleDefinition) {
        match self.index.get(&rule.name) {
            Some(&i) => {
                tracing::debug!("Overwriting rule '{}'", rule.name);
                self.rules[i] = rule;
                // The replaced separator may no longer be used by any rule.
                let mut chars = Vec::new();
                for rule in &self.rules {
                    push_boundary_chars(&mut chars, &rule.separator);
                }
                self.boundary_chars = chars;
            }
            None => {
                tracing::debug!("Registered rule '{}' (separator {:?})", rule.name, rule.separator);
                push_boundary_chars(&mut self.boundary_chars, &rule.separator);
                self.index.insert(rule.name.clone(), self.rules.len());
                self.rules.push(rule);
            }
        }
    }
}

fn push_boundary_chars(chars: &mut Vec<char>, separator: &str) {
    for ch in separator.chars() {
        if !ch.is_alphanumeric() && !chars.contains(&ch) {
            chars.push(ch);
        }
    }
}

fn strip(err: CaserError) -> String {
    match err {
        CaserError::InvalidRule(msg) | CaserError::RuleNotFound(msg) => msg,
    }
}
