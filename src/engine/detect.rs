use super::convert::render;
use super::model::RuleDefinition;
use super::registry::RuleRegistry;
use super::tokenizer::tokenize_as;

const SEPARATOR_PRESENT: u8 = 2;
const SEPARATOR_ABSENT: u8 = 1;
/// A separator of letters or digits also occurs inside ordinary words.
const SEPARATOR_AMBIGUOUS: u8 = 1;
const CASING_MATCH: u8 = 2;
/// Rules with a function hook are never run during detection.
const CASING_OPAQUE: u8 = 1;

/// Guess which registered rule produced `input`.
///
/// Each rule is scored on its separator signature and on whether rendering
/// the input's words under that rule reproduces the input. The highest score
/// wins; ties go to the earliest registered rule. Returns `None` for blank
/// input or when every rule is ruled out by its separator.
pub fn detect<'r>(registry: &'r RuleRegistry, input: &str) -> Option<&'r RuleDefinition> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let mut best: Option<(&RuleDefinition, u8)> = None;
    for rule in registry.rules() {
        let Some(score) = score(registry, rule, input) else {
            continue;
        };
        tracing::trace!("rule '{}' scored {} for {:?}", rule.name, score, input);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((rule, score));
        }
    }

    match best {
        Some((rule, score)) => {
            tracing::debug!("Detected '{}' for {:?} (score {})", rule.name, input, score);
            Some(rule)
        }
        None => {
            tracing::debug!("No rule matches {:?}", input);
            None
        }
    }
}

fn score(registry: &RuleRegistry, rule: &RuleDefinition, input: &str) -> Option<u8> {
    let separator = separator_signal(registry, rule, input)?;
    let casing = if rule.has_convert_fn() {
        CASING_OPAQUE
    } else if render(&tokenize_as(registry, input, rule), rule) == input {
        CASING_MATCH
    } else {
        0
    };
    Some(separator + casing)
}

/// `None` disqualifies the rule.
fn separator_signal(registry: &RuleRegistry, rule: &RuleDefinition, input: &str) -> Option<u8> {
    let sep = rule.separator.as_str();
    let mut boundaries = input.chars().filter(|&ch| registry.is_boundary(ch));

    if sep.is_empty() {
        return match boundaries.next() {
            Some(_) => None,
            None => Some(SEPARATOR_ABSENT),
        };
    }
    if !input.contains(sep) || boundaries.any(|ch| !sep.contains(ch)) {
        return None;
    }
    if sep.chars().all(char::is_alphanumeric) {
        return Some(SEPARATOR_AMBIGUOUS);
    }
    Some(SEPARATOR_PRESENT)
}
