//! Serverless service descriptor
//!
//! Only the parts needed to find existing-rule events are modelled: the
//! function table and each function's event list. The descriptor is read from
//! the JSON rendering of `serverless.yml` (`serverless print --format json`),
//! so variables are already resolved when it gets here.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{EventRuleError, EventRuleResult};

/// Event key naming an existing rule by name, namespaced name, ARN or `ANY`.
pub const CLOUD_WATCH_RULE_KEY: &str = "cloudWatchRule";

/// Event key naming an existing rule by ARN.
pub const CLOUD_WATCH_RULE_ARN_KEY: &str = "cloudWatchRuleArn";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceDescriptor {
    #[serde(default)]
    pub service: Option<ServiceName>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub functions: BTreeMap<String, FunctionDefinition>,
}

/// `service` is either a plain string or, in older configurations, `{ name: ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ServiceName {
    Name(String),
    Object { name: String },
}

impl ServiceName {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Name(name) | Self::Object { name } => name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FunctionDefinition {
    #[serde(default)]
    pub handler: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<EventDeclaration>,
}

impl FunctionDefinition {
    /// Rule references of this function's events, in declaration order.
    pub fn rule_references(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(EventDeclaration::rule_reference)
    }
}

/// One entry of a function's `events` list.
///
/// Event types other than existing rules (`http`, `schedule`, ...) are kept in
/// `other` untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EventDeclaration {
    #[serde(rename = "cloudWatchRule", default)]
    pub cloud_watch_rule: Option<String>,
    #[serde(rename = "cloudWatchRuleArn", default)]
    pub cloud_watch_rule_arn: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl EventDeclaration {
    pub fn with_rule(rule: impl Into<String>) -> Self {
        Self {
            cloud_watch_rule: Some(rule.into()),
            ..Self::default()
        }
    }

    pub fn with_rule_arn(arn: impl Into<String>) -> Self {
        Self {
            cloud_watch_rule_arn: Some(arn.into()),
            ..Self::default()
        }
    }

    /// The existing rule this event refers to, if any.
    ///
    /// `cloudWatchRule` wins over `cloudWatchRuleArn` unless it is empty. Empty
    /// values count as unset, so an event whose keys are all empty has no rule.
    pub fn rule_reference(&self) -> Option<&str> {
        self.cloud_watch_rule
            .as_deref()
            .filter(|rule| !rule.is_empty())
            .or_else(|| {
                self.cloud_watch_rule_arn
                    .as_deref()
                    .filter(|arn| !arn.is_empty())
            })
    }

    /// True when at least one rule key is present, even if empty.
    pub fn declares_rule_key(&self) -> bool {
        self.cloud_watch_rule.is_some() || self.cloud_watch_rule_arn.is_some()
    }

    /// True when both keys carry different non-empty values; the ARN key is ignored then.
    pub fn has_conflicting_keys(&self) -> bool {
        match (
            self.cloud_watch_rule.as_deref(),
            self.cloud_watch_rule_arn.as_deref(),
        ) {
            (Some(rule), Some(arn)) => !rule.is_empty() && !arn.is_empty() && rule != arn,
            _ => false,
        }
    }
}

impl ServiceDescriptor {
    /// Read and parse a descriptor from disk.
    pub fn from_path(path: impl AsRef<Path>) -> EventRuleResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            EventRuleError::descriptor(format!(
                "failed to read service descriptor '{}': {}",
                path.display(),
                e
            ))
        })?;
        content.parse()
    }

    pub fn service_name(&self) -> Option<&str> {
        self.service.as_ref().map(ServiceName::as_str)
    }
}

impl FromStr for ServiceDescriptor {
    type Err = EventRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map_err(|e| {
            EventRuleError::descriptor(format!("failed to parse service descriptor: {e}"))
        })
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
