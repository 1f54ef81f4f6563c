//! Rule reference parsing (pure Rust)

pub mod rule_reference;

pub use rule_reference::{RuleReference, ANY_RULE, ANY_RULE_RESOURCE, ARN_PREFIX, EVENTS_ARN_PREFIX};
