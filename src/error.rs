use thiserror::Error;

/// Result alias for rule-engine operations.
pub type Result<T> = std::result::Result<T, CaserError>;

/// Errors raised by the rule engine. Every variant is recoverable by the
/// caller fixing its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaserError {
    /// A rule definition is structurally invalid (missing or wrong-typed
    /// field, reserved name, or a bad element inside a batch).
    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    /// A conversion referenced a rule name that was never registered.
    #[error("Rule '{0}' is not registered")]
    RuleNotFound(String),
}

impl CaserError {
    pub fn invalid_rule(message: impl Into<String>) -> Self {
        Self::InvalidRule(message.into())
    }
}
