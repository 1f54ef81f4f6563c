//! Error types for permission synthesis and template injection

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EventRuleError {
    /// A function name or rule short name was empty when a logical name was derived from it.
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Two different resource definitions were synthesized under the same logical name.
    #[error(
        "Logical name collision: resource '{logical_name}' already exists with a different definition"
    )]
    LogicalNameCollision { logical_name: String },

    #[error("Service descriptor error: {0}")]
    Descriptor(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EventRuleError {
    pub fn invalid_name(message: impl Into<String>) -> Self {
        Self::InvalidName(message.into())
    }

    pub fn descriptor(message: impl Into<String>) -> Self {
        Self::Descriptor(message.into())
    }

    pub fn template(message: impl Into<String>) -> Self {
        Self::Template(message.into())
    }
}

pub type EventRuleResult<T> = Result<T, EventRuleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_message_names_the_resource() {
        let err = EventRuleError::LogicalNameCollision {
            logical_name: "GetMetricsLambdaPermissionMyDashrule".to_string(),
        };
        assert!(err
            .to_string()
            .contains("'GetMetricsLambdaPermissionMyDashrule'"));
    }

    #[test]
    fn test_serde_errors_convert() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").expect_err("truncated JSON");
        let err: EventRuleError = parse_err.into();
        assert!(matches!(err, EventRuleError::Serialization(_)));
    }
}
