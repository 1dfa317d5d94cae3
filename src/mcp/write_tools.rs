use serde_json::{json, Value};

use crate::engine::registry::RuleRegistry;
use crate::mcp::protocol::*;

/// Names of tools that mutate the registry; `tools/call` routes these to
/// [`call_write_tool`].
pub const WRITE_TOOLS: &[&str] = &["register_rule", "register_rules"];

/// Returns the registry-mutating tools the caser server exposes.
/// Registered rules live for the lifetime of the server process only.
pub fn list_write_tools() -> Vec<ToolDefinition> {
    let rule_schema = json!({
        "type": "object",
        "properties": {
            "name": { "type": "string", "description": "Unique rule name, e.g. semicolon-case" },
            "separator": { "type": "string", "description": "Inserted between words; may be empty" },
            "case": {
                "type": "string",
                "enum": ["lower", "upper", "capitalize", "camel"],
                "description": "Per-word casing (default: lower)"
            }
        },
        "required": ["name", "separator"]
    });

    vec![
        ToolDefinition {
            name: "register_rule".into(),
            description: "Registers a custom casing rule, or replaces the rule with the same name. \
                          The rule is immediately usable by detect and convert tools."
                .into(),
            input_schema: rule_schema.clone(),
        },
        ToolDefinition {
            name: "register_rules".into(),
            description: "Registers several casing rules at once. If any rule is invalid, \
                          none are registered."
                .into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "rules": { "type": "array", "items": rule_schema }
                },
                "required": ["rules"]
            }),
        },
    ]
}

/// Dispatches a write tool call against the registry.
pub fn call_write_tool(registry: &mut RuleRegistry, name: &str, args: &Value) -> ToolCallResult {
    match name {
        "register_rule" => match registry.register_rule_value(args) {
            Ok(()) => {
                tracing::info!("Registered rule via tool call: {}", args["name"]);
                ToolCallResult::text(format!(
                    "Registered rule '{}'",
                    args["name"].as_str().unwrap_or_default()
                ))
            }
            Err(e) => ToolCallResult::error(e.to_string()),
        },

        "register_rules" => match registry.register_rules_value(&args["rules"]) {
            Ok(()) => {
                let count = args["rules"].as_array().map_or(0, Vec::len);
                tracing::info!("Registered {} rules via tool call", count);
                ToolCallResult::text(format!("Registered {count} rule(s)"))
            }
            Err(e) => ToolCallResult::error(e.to_string()),
        },

        _ => ToolCallResult::error(format!("Unknown write tool: {}", name)),
    }
}
