use serde_json::{json, Value};

use crate::engine::registry::RuleRegistry;
use crate::mcp::protocol::*;

/// Returns the read-only tools the caser server exposes.
pub fn list_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "detect_case".into(),
            description: "Detects which registered casing rule a string is written in, \
                          e.g. 'someTextString' → camel-case. Returns 'unknown' when no rule matches."
                .into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string", "description": "Identifier to inspect" }
                },
                "required": ["text"]
            }),
        },
        ToolDefinition {
            name: "convert_case".into(),
            description: "Converts a string from one named casing rule to another. \
                          Use when the source style is known."
                .into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string" },
                    "from": { "type": "string", "description": "Rule the text is written in" },
                    "to": { "type": "string", "description": "Target rule" }
                },
                "required": ["text", "from", "to"]
            }),
        },
        ToolDefinition {
            name: "convert_case_to".into(),
            description: "Converts a string to the target casing rule, detecting its current \
                          style automatically."
                .into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string" },
                    "to": { "type": "string", "description": "Target rule" }
                },
                "required": ["text", "to"]
            }),
        },
        ToolDefinition {
            name: "tokenize".into(),
            description: "Splits a string into its lowercase words, whatever its casing style."
                .into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string" }
                },
                "required": ["text"]
            }),
        },
        ToolDefinition {
            name: "list_rules".into(),
            description: "Lists every registered casing rule with its separator and word casing, \
                          in detection priority order."
                .into(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
    ]
}

/// Dispatches a read-only tool call and returns the result.
pub fn call_tool(registry: &RuleRegistry, name: &str, args: &Value) -> ToolCallResult {
    match run_tool(registry, name, args) {
        Ok(text) => ToolCallResult::text(text),
        Err(err) => err,
    }
}

fn run_tool(registry: &RuleRegistry, name: &str, args: &Value) -> Result<String, ToolCallResult> {
    match name {
        "detect_case" => Ok(registry.wrap(required_str(args, "text")?).detect().to_string()),

        "convert_case" => {
            let text = required_str(args, "text")?;
            let from = required_str(args, "from")?;
            let to = required_str(args, "to")?;
            registry
                .wrap(text)
                .convert(from, to)
                .map_err(|e| rule_error(registry, e))
        }

        "convert_case_to" => {
            let text = required_str(args, "text")?;
            let to = required_str(args, "to")?;
            registry.wrap(text).convert_to(to).map_err(|e| rule_error(registry, e))
        }

        "tokenize" => {
            let words = registry.wrap(required_str(args, "text")?).words();
            Ok(json!(words).to_string())
        }

        "list_rules" => Ok(serde_json::to_string(&registry.summaries()).unwrap_or_default()),

        _ => Err(ToolCallResult::error(format!("Unknown tool: {}", name))),
    }
}

fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, ToolCallResult> {
    args[key]
        .as_str()
        .ok_or_else(|| ToolCallResult::error(format!("Missing required string argument '{key}'")))
}

fn rule_error(registry: &RuleRegistry, err: crate::error::CaserError) -> ToolCallResult {
    ToolCallResult::error(format!(
        "{}. Available: {}",
        err,
        registry.names().join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(result: &ToolCallResult) -> &str {
        result.first_text().unwrap()
    }

    #[test]
    fn test_detect_case() {
        let registry = RuleRegistry::new();
        let result = call_tool(&registry, "detect_case", &json!({"text": "SOME_TEXT_STRING"}));
        assert!(result.is_error.is_none());
        assert_eq!(text_of(&result), "screaming-snake-case");
    }

    #[test]
    fn test_detect_case_unknown() {
        let registry = RuleRegistry::new();
        let result = call_tool(&registry, "detect_case", &json!({"text": "some text"}));
        assert_eq!(text_of(&result), "unknown");
    }

    #[test]
    fn test_convert_case() {
        let registry = RuleRegistry::new();
        let result = call_tool(
            &registry,
            "convert_case",
            &json!({"text": "someTextString", "from": "camel-case", "to": "kebab-case"}),
        );
        assert_eq!(text_of(&result), "some-text-string");
    }

    #[test]
    fn test_convert_case_unknown_rule() {
        let registry = RuleRegistry::new();
        let result = call_tool(
            &registry,
            "convert_case",
            &json!({"text": "someText", "from": "camel-case", "to": "wavy-case"}),
        );
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("wavy-case"));
        assert!(text_of(&result).contains("kebab-case"));
    }

    #[test]
    fn test_convert_case_to() {
        let registry = RuleRegistry::new();
        let result = call_tool(
            &registry,
            "convert_case_to",
            &json!({"text": "some.text.string", "to": "upper-camel-case"}),
        );
        assert_eq!(text_of(&result), "SomeTextString");
    }

    #[test]
    fn test_tokenize() {
        let registry = RuleRegistry::new();
        let result = call_tool(&registry, "tokenize", &json!({"text": "HTMLParser"}));
        assert_eq!(text_of(&result), r#"["html","parser"]"#);
    }

    #[test]
    fn test_list_rules() {
        let registry = RuleRegistry::new();
        let result = call_tool(&registry, "list_rules", &json!({}));
        assert!(text_of(&result).contains(r#""name":"train-case","separator":"-","case":"capitalize""#));
    }

    #[test]
    fn test_missing_text_is_an_error() {
        let registry = RuleRegistry::new();
        for tool in ["detect_case", "convert_case_to", "tokenize"] {
            let result = call_tool(&registry, tool, &json!({"to": "kebab-case"}));
            assert_eq!(result.is_error, Some(true), "tool: {tool}");
            assert!(text_of(&result).contains("'text'"));
        }
        let result = call_tool(&registry, "detect_case", &json!({"text": 42}));
        assert_eq!(result.is_error, Some(true));
    }

    #[test]
    fn test_missing_rule_arguments_are_errors() {
        let registry = RuleRegistry::new();
        let result = call_tool(&registry, "convert_case_to", &json!({"text": "someText"}));
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("'to'"));

        let result = call_tool(
            &registry,
            "convert_case",
            &json!({"text": "someText", "to": "kebab-case"}),
        );
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).contains("'from'"));
    }

    #[test]
    fn test_empty_text_is_still_accepted() {
        let registry = RuleRegistry::new();
        let result = call_tool(&registry, "detect_case", &json!({"text": ""}));
        assert!(result.is_error.is_none());
        assert_eq!(text_of(&result), "unknown");
    }

    #[test]
    fn test_unknown_tool() {
        let registry = RuleRegistry::new();
        let result = call_tool(&registry, "nonexistent_tool", &json!({}));
        assert_eq!(result.is_error, Some(true));
    }

    #[test]
    fn test_list_tools_count() {
        assert_eq!(list_tools().len(), 5);
    }
}
