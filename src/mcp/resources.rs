use crate::engine::registry::RuleRegistry;
use crate::mcp::protocol::*;

const RULES_URI: &str = "caser://rules";

/// Returns the resources the caser server exposes: the whole rule table and
/// one entry per registered rule.
pub fn list_resources(registry: &RuleRegistry) -> Vec<ResourceDefinition> {
    let mut resources = vec![ResourceDefinition {
        uri: RULES_URI.into(),
        name: "Casing Rules".into(),
        description: "All registered casing rules in detection priority order".into(),
        mime_type: "application/json".into(),
    }];

    for rule in registry.rules() {
        resources.push(ResourceDefinition {
            uri: format!("{RULES_URI}/{}", rule.name),
            name: format!("Rule: {}", rule.name),
            description: format!("Separator {:?}, rendered as {}", rule.separator, rule.summary().case),
            mime_type: "application/json".into(),
        });
    }

    resources
}

/// Reads a resource by URI.
pub fn read_resource(registry: &RuleRegistry, uri: &str) -> ResourceReadResult {
    let (mime, text) = match uri.strip_prefix(RULES_URI) {
        Some("") => (
            "application/json",
            serde_json::to_string(&registry.summaries()).unwrap_or_default(),
        ),
        Some(rest) if rest.starts_with('/') => {
            let name = &rest[1..];
            match registry.get_rule(name) {
                Some(rule) => (
                    "application/json",
                    serde_json::to_string(&rule.summary()).unwrap_or_default(),
                ),
                None => ("text/plain", format!("Rule '{}' not found", name)),
            }
        }
        _ => ("text/plain", format!("Unknown resource: {}", uri)),
    };

    ResourceReadResult {
        contents: vec![ResourceContent {
            uri: uri.to_string(),
            mime_type: mime.to_string(),
            text,
        }],
    }
}
