pub mod convert;
pub mod detect;
pub mod model;
pub mod registry;
pub mod tokenizer;

/// Uppercase the first letter of `word` and lowercase the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    let mut result = String::with_capacity(word.len());
    if let Some(first) = chars.next() {
        result.extend(first.to_uppercase());
        for ch in chars {
            result.extend(ch.to_lowercase());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::capitalize;

    #[test]
    fn test_capitalize_simple() {
        assert_eq!(capitalize("text"), "Text");
        assert_eq!(capitalize("TEXT"), "Text");
    }

    #[test]
    fn test_capitalize_leading_digit() {
        assert_eq!(capitalize("2fa"), "2fa");
    }

    #[test]
    fn test_capitalize_empty_and_non_ascii() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("élan"), "Élan");
    }
}
