use crate::engine::convert::convert;
use crate::engine::detect::detect;
use crate::engine::model::UNKNOWN_RULE;
use crate::engine::registry::RuleRegistry;
use crate::engine::tokenizer::{tokenize, tokenize_as};
use crate::error::Result;

/// A source string bound to a rule registry.
///
/// ```
/// use caser::RuleRegistry;
///
/// let registry = RuleRegistry::new();
/// let text = registry.wrap("someTextString");
/// assert_eq!(text.detect(), "camel-case");
/// assert_eq!(text.convert_to("screaming-snake-case").unwrap(), "SOME_TEXT_STRING");
/// ```
#[derive(Debug, Clone)]
pub struct Caser<'r> {
    registry: &'r RuleRegistry,
    source: String,
}

impl<'r> Caser<'r> {
    pub fn new(registry: &'r RuleRegistry, source: impl Into<String>) -> Self {
        Self {
            registry,
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Name of the rule the source appears to be written in, or `"unknown"`.
    pub fn detect(&self) -> &'r str {
        detect(self.registry, &self.source)
            .map(|rule| rule.name.as_str())
            .unwrap_or(UNKNOWN_RULE)
    }

    /// The source split into lowercase words.
    pub fn words(&self) -> Vec<String> {
        tokenize(self.registry, &self.source)
    }

    /// Convert the source, read as `from`, into the `to` style.
    pub fn convert(&self, from: &str, to: &str) -> Result<String> {
        let from_rule = self.registry.require(from)?;
        self.registry.require(to)?;
        let words = tokenize_as(self.registry, &self.source, from_rule);
        convert(self.registry, &words, to)
    }

    /// Convert the source into the `to` style, detecting its current style.
    /// Undetectable input is still tokenized and converted.
    pub fn convert_to(&self, to: &str) -> Result<String> {
        let words = match detect(self.registry, &self.source) {
            Some(rule) => tokenize_as(self.registry, &self.source, rule),
            None => tokenize(self.registry, &self.source),
        };
        convert(self.registry, &words, to)
    }
}

impl RuleRegistry {
    /// Bind `source` to this registry.
    pub fn wrap(&self, source: impl Into<String>) -> Caser<'_> {
        Caser::new(self, source)
    }
}
