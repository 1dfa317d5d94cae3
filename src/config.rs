use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::engine::model::{RuleDefinition, RuleSpec};
use crate::engine::registry::RuleRegistry;
use crate::engine::tokenizer::DigitPolicy;

/// User configuration, read from `~/.caser/config.json` unless a path is
/// given explicitly.
///
/// ```json
/// {
///   "digits": "attach",
///   "rules": [{ "name": "semicolon-case", "separator": ":" }]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaserConfig {
    #[serde(default)]
    pub digits: DigitPolicy,
    /// Extra rules registered after the built-ins, in order.
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

impl CaserConfig {
    /// Load from a JSON file. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: CaserConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Load from the default location, falling back to an empty config when
    /// the file does not exist.
    pub fn load_default() -> Result<Self> {
        let path = default_config_path()?;
        if !path.exists() {
            tracing::debug!("No config at {}, using built-in rules only", path.display());
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Load `path` if given, otherwise the default location.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Self::load_default(),
        }
    }

    /// Build a registry with the built-ins plus every configured rule.
    /// Nothing from the config is registered if any rule is invalid.
    pub fn build_registry(&self) -> Result<RuleRegistry> {
        let mut registry = RuleRegistry::new().with_digit_policy(self.digits);
        let rules = self.rules.iter().cloned().map(RuleDefinition::from).collect();
        registry
            .register_rules(rules)
            .context("Invalid rule in config")?;
        tracing::info!(
            "Rule registry ready: {} rules ({} from config)",
            registry.len(),
            self.rules.len()
        );
        Ok(registry)
    }
}

/// Returns the default config path: `~/.caser/config.json`
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".caser").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::model::WordCase;
    use std::env::temp_dir;

    fn temp_config(content: &str) -> PathBuf {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = temp_dir().join(format!("caser_test_{}_{}.json", std::process::id(), id));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_and_build_registry() {
        let path = temp_config(
            r#"{
                "digits": "split",
                "rules": [
                    {"name": "semicolon-case", "separator": ":"},
                    {"name": "loud-colon-case", "separator": ":", "case": "upper"}
                ]
            }"#,
        );
        let config = CaserConfig::load(&path).unwrap();
        assert_eq!(config.digits, DigitPolicy::Split);
        assert_eq!(config.rules[1].case, WordCase::Upper);

        let registry = config.build_registry().unwrap();
        assert!(registry.contains("semicolon-case"));
        assert_eq!(registry.digit_policy(), DigitPolicy::Split);
        assert_eq!(registry.wrap("someText").convert_to("loud-colon-case").unwrap(), "SOME:TEXT");
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let path = temp_config("{}");
        let config = CaserConfig::load(&path).unwrap();
        assert_eq!(config, CaserConfig::default());
        assert_eq!(config.build_registry().unwrap().len(), 8);
    }

    #[test]
    fn test_load_missing_file() {
        let path = temp_dir().join("caser_test_does_not_exist.json");
        assert!(CaserConfig::load(&path).is_err());
        assert!(CaserConfig::resolve(Some(&path)).is_err());
    }

    #[test]
    fn test_load_rejects_wrong_types() {
        let path = temp_config(r#"{"rules": [{"name": "x-case", "separator": 1}]}"#);
        assert!(CaserConfig::load(&path).is_err());

        let path = temp_config(r#"{"rules": {"name": "x-case", "separator": "x"}}"#);
        assert!(CaserConfig::load(&path).is_err());
    }

    #[test]
    fn test_build_registry_rejects_blank_name() {
        let config = CaserConfig {
            digits: DigitPolicy::Attach,
            rules: vec![
                RuleSpec {
                    name: "fine-case".into(),
                    separator: "~".into(),
                    case: WordCase::Lower,
                },
                RuleSpec {
                    name: "".into(),
                    separator: "-".into(),
                    case: WordCase::Lower,
                },
            ],
        };
        let err = config.build_registry().unwrap_err();
        assert!(format!("{err:#}").contains("rule #1"));
    }
}
