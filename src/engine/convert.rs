use super::model::RuleDefinition;
use super::registry::RuleRegistry;
use crate::error::Result;

/// Join `words` under the rule registered as `target`.
pub fn convert(registry: &RuleRegistry, words: &[String], target: &str) -> Result<String> {
    let rule = registry.require(target)?;
    Ok(render(words, rule))
}

/// Apply `rule`'s per-word transform to each word and join with its separator.
/// A rule's function hook is called exactly once per word.
pub fn render(words: &[String], rule: &RuleDefinition) -> String {
    words
        .iter()
        .enumerate()
        .map(|(i, word)| rule.render_word(word, i, words))
        .collect::<Vec<_>>()
        .join(&rule.separator)
}
