//! Detect and convert identifier casing styles (`someTextString` ↔
//! `SOME_TEXT_STRING`) against a registry of named rules that callers can
//! extend at runtime.

pub mod config;
pub mod engine;
pub mod error;
pub mod facade;
pub mod mcp;
pub mod server;

pub use engine::model::{ConvertFn, RuleDefinition, RuleSpec, WordCase, UNKNOWN_RULE};
pub use engine::registry::RuleRegistry;
pub use engine::tokenizer::DigitPolicy;
pub use error::{CaserError, Result};
pub use facade::Caser;
