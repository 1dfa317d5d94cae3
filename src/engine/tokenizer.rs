use serde::{Deserialize, Serialize};

use super::model::RuleDefinition;
use super::registry::RuleRegistry;

/// How digit runs are grouped into words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigitPolicy {
    /// Digits join the preceding word, or start a new one (`v2` stays whole).
    #[default]
    Attach,
    /// Every digit run is a word of its own (`v2` → `v`, `2`).
    Split,
}

/// Split `input` into lowercase words, whatever casing style produced it.
///
/// Word boundaries are separator characters of any registered rule,
/// whitespace, a lowercase → uppercase transition, and the last capital of an
/// acronym followed by a lowercase letter (`HTMLParser` → `html`, `parser`).
pub fn tokenize(registry: &RuleRegistry, input: &str) -> Vec<String> {
    split_words(input, |ch| registry.is_boundary(ch), registry.digit_policy())
}

/// Tokenize `input` knowing it was written in `rule`: the exact separator
/// string is split on first, then each piece is tokenized normally.
pub fn tokenize_as(registry: &RuleRegistry, input: &str, rule: &RuleDefinition) -> Vec<String> {
    if rule.separator.is_empty() {
        return tokenize(registry, input);
    }
    input
        .split(rule.separator.as_str())
        .flat_map(|piece| tokenize(registry, piece))
        .collect()
}

fn split_words(input: &str, is_boundary: impl Fn(char) -> bool, digits: DigitPolicy) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    // Case of the last letter in `current`; digits leave it untouched.
    let mut last_letter_upper: Option<bool> = None;

    for (i, &ch) in chars.iter().enumerate() {
        if is_boundary(ch) {
            flush(&mut words, &mut current, &mut last_letter_upper);
            continue;
        }

        if ch.is_numeric() {
            let after_letter = current.chars().last().is_some_and(|c| !c.is_numeric());
            if digits == DigitPolicy::Split && after_letter {
                flush(&mut words, &mut current, &mut last_letter_upper);
            }
            current.push(ch);
            continue;
        }

        if digits == DigitPolicy::Split && current.chars().last().is_some_and(char::is_numeric) {
            flush(&mut words, &mut current, &mut last_letter_upper);
        }

        if ch.is_uppercase() && !current.is_empty() {
            let camel_hump = last_letter_upper == Some(false);
            let acronym_end = last_letter_upper == Some(true)
                && chars.get(i + 1).is_some_and(|next| next.is_lowercase());
            if camel_hump || acronym_end {
                flush(&mut words, &mut current, &mut last_letter_upper);
            }
        }

        current.extend(ch.to_lowercase());
        if ch.is_uppercase() {
            last_letter_upper = Some(true);
        } else if ch.is_lowercase() {
            last_letter_upper = Some(false);
        }
    }

    flush(&mut words, &mut current, &mut last_letter_upper);
    words
}

fn flush(words: &mut Vec<String>, current: &mut String, last_letter_upper: &mut Option<bool>) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
    *last_letter_upper = None;
}
