use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::capitalize;
use crate::error::{CaserError, Result};

/// Name reported by detection when no registered rule matches.
pub const UNKNOWN_RULE: &str = "unknown";

/// Caller-supplied per-word transform: `(word, index, all_words) -> output`.
pub type ConvertFn = Arc<dyn Fn(&str, usize, &[String]) -> String + Send + Sync>;

// ─── Word Casing ───────────────────────────────────────────────────────────

/// Built-in per-word casing policy of a rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordCase {
    /// every word lowercase
    #[default]
    Lower,
    /// every word uppercase
    Upper,
    /// first letter of every word uppercase, the rest lowercase
    Capitalize,
    /// first word lowercase, the following words capitalized
    Camel,
}

impl WordCase {
    pub fn apply(self, word: &str, index: usize) -> String {
        match self {
            WordCase::Lower => word.to_lowercase(),
            WordCase::Upper => word.to_uppercase(),
            WordCase::Capitalize => capitalize(word),
            WordCase::Camel if index == 0 => word.to_lowercase(),
            WordCase::Camel => capitalize(word),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WordCase::Lower => "lower",
            WordCase::Upper => "upper",
            WordCase::Capitalize => "capitalize",
            WordCase::Camel => "camel",
        }
    }
}

impl fmt::Display for WordCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Rule Definition ───────────────────────────────────────────────────────

/// A named casing style: the separator placed between words and the casing
/// applied to each word.
#[derive(Clone)]
pub struct RuleDefinition {
    pub name: String,
    pub separator: String,
    pub word_case: WordCase,
    /// Overrides `word_case` when present.
    pub convert_fn: Option<ConvertFn>,
}

impl RuleDefinition {
    /// A rule that lowercases every word, like the custom rules registered
    /// without an explicit policy.
    pub fn new(name: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            separator: separator.into(),
            word_case: WordCase::Lower,
            convert_fn: None,
        }
    }

    pub fn with_case(mut self, word_case: WordCase) -> Self {
        self.word_case = word_case;
        self
    }

    pub fn with_convert_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, usize, &[String]) -> String + Send + Sync + 'static,
    {
        self.convert_fn = Some(Arc::new(f));
        self
    }

    pub fn has_convert_fn(&self) -> bool {
        self.convert_fn.is_some()
    }

    /// Render a single word of `words` at `index` under this rule.
    pub fn render_word(&self, word: &str, index: usize, words: &[String]) -> String {
        match &self.convert_fn {
            Some(f) => f(word, index, words),
            None => self.word_case.apply(word, index),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CaserError::invalid_rule("rule name must be a non-empty string"));
        }
        if self.name == UNKNOWN_RULE {
            return Err(CaserError::invalid_rule(format!(
                "'{UNKNOWN_RULE}' is reserved for undetected input"
            )));
        }
        Ok(())
    }

    pub fn summary(&self) -> RuleSummary {
        RuleSummary {
            name: self.name.clone(),
            separator: self.separator.clone(),
            case: if self.has_convert_fn() {
                "custom".into()
            } else {
                self.word_case.as_str().into()
            },
        }
    }
}

impl fmt::Debug for RuleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDefinition")
            .field("name", &self.name)
            .field("separator", &self.separator)
            .field("word_case", &self.word_case)
            .field("convert_fn", &self.convert_fn.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

// ─── Serializable Forms ────────────────────────────────────────────────────

/// JSON shape of a rule, as found in config files and server requests.
/// Function hooks have no JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub name: String,
    pub separator: String,
    #[serde(default)]
    pub case: WordCase,
}

impl RuleSpec {
    /// Parse an untyped value, reporting structural problems as `InvalidRule`.
    pub fn from_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(CaserError::invalid_rule(format!(
                "rule definition must be an object, got {}",
                kind_of(value)
            )));
        }
        serde_json::from_value(value.clone())
            .map_err(|e| CaserError::invalid_rule(e.to_string()))
    }
}

impl From<RuleSpec> for RuleDefinition {
    fn from(spec: RuleSpec) -> Self {
        RuleDefinition::new(spec.name, spec.separator).with_case(spec.case)
    }
}

/// Read-only listing entry for a registered rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSummary {
    pub name: String,
    pub separator: String,
    /// Casing policy name, or `custom` for rules with a function hook.
    pub case: String,
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_word_case_apply() {
        assert_eq!(WordCase::Lower.apply("Text", 1), "text");
        assert_eq!(WordCase::Upper.apply("text", 1), "TEXT");
        assert_eq!(WordCase::Capitalize.apply("tEXT", 0), "Text");
        assert_eq!(WordCase::Camel.apply("Some", 0), "some");
        assert_eq!(WordCase::Camel.apply("text", 1), "Text");
    }

    #[test]
    fn test_convert_fn_overrides_case() {
        let rule = RuleDefinition::new("shout", "!")
            .with_case(WordCase::Lower)
            .with_convert_fn(|word, index, _| format!("{}{}", word.to_uppercase(), index));
        let words = vec!["a".to_string(), "b".to_string()];
        assert_eq!(rule.render_word("b", 1, &words), "B1");
        assert_eq!(rule.summary().case, "custom");
    }

    #[test]
    fn test_validate_rejects_empty_and_reserved_names() {
        assert!(RuleDefinition::new("", "-").validate().is_err());
        assert!(RuleDefinition::new("   ", "-").validate().is_err());
        assert!(RuleDefinition::new(UNKNOWN_RULE, "-").validate().is_err());
        assert!(RuleDefinition::new("colon-case", ":").validate().is_ok());
    }

    #[test]
    fn test_spec_from_value_defaults_to_lower() {
        let spec = RuleSpec::from_value(&json!({"name": "at-case", "separator": "@"})).unwrap();
        assert_eq!(spec.case, WordCase::Lower);

        let spec = RuleSpec::from_value(&json!({
            "name": "loud-case", "separator": "!", "case": "upper"
        }))
        .unwrap();
        assert_eq!(spec.case, WordCase::Upper);
    }

    #[test]
    fn test_spec_from_value_rejects_bad_shapes() {
        for bad in [
            json!({}),
            json!({"name": "rule-name"}),
            json!({"separator": ":"}),
            json!({"name": "x", "separator": 5}),
            json!({"name": 1, "separator": "-"}),
            json!({"name": "x", "separator": "-", "case": "sideways"}),
            json!("I am an evil string"),
            json!(1),
        ] {
            let err = RuleSpec::from_value(&bad).unwrap_err();
            assert!(matches!(err, CaserError::InvalidRule(_)), "{bad} → {err:?}");
        }
    }
}
