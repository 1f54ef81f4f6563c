//! Classification of user-supplied event rule references

use std::fmt;

use crate::cloudformation::{Join, Ref, AWS_ACCOUNT_ID, AWS_REGION};
use crate::types::SourceArn;

/// Prefix identifying a fully-qualified ARN.
pub const ARN_PREFIX: &str = "arn";

/// Sentinel rule reference meaning "any rule in the deploying account and region".
pub const ANY_RULE: &str = "ANY";

/// Resource segment matching every EventBridge rule.
///
/// The wildcard has to follow the `rule/` resource type. IAM accepts a bare
/// `*` in the resource part of a `SourceArn` but never matches it.
pub const ANY_RULE_RESOURCE: &str = "rule/*";

/// Service prefix of EventBridge ARNs in the standard partition.
pub const EVENTS_ARN_PREFIX: &str = "arn:aws:events";

const ARN_SEPARATOR: &str = ":";
const QUALIFIED_ARN_PREFIX: &str = "arn:";
const RESOURCE_PATH_SEPARATOR: char = '/';

/// A rule reference taken from a function event, classified once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleReference {
    /// A full ARN, used verbatim as the permission's source.
    Literal(String),
    /// The `ANY` sentinel.
    Wildcard,
    /// Anything else: a rule name, optionally namespaced with `:` separators.
    Bare(String),
}

impl RuleReference {
    pub fn parse(reference: &str) -> Self {
        if reference.starts_with(ARN_PREFIX) {
            Self::Literal(reference.to_string())
        } else if reference == ANY_RULE {
            Self::Wildcard
        } else {
            Self::Bare(reference.to_string())
        }
    }

    /// The reference exactly as the user wrote it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(reference) | Self::Bare(reference) => reference,
            Self::Wildcard => ANY_RULE,
        }
    }

    /// The human-meaningful rule name: the segment after the last `:`.
    ///
    /// For references shaped like an ARN (`arn:...`) the resource path
    /// (`rule/[bus/]name`) is stripped as well, so only the rule's own name
    /// remains. A path with nothing after its last `/` is kept whole. May be
    /// empty (`"my-namespace:"`); naming rejects that later.
    pub fn short_name(&self) -> &str {
        let reference = self.as_str();
        let name = reference
            .rsplit_once(ARN_SEPARATOR)
            .map_or(reference, |(_, name)| name);

        match self {
            Self::Literal(arn) if arn.starts_with(QUALIFIED_ARN_PREFIX) => name
                .rsplit_once(RESOURCE_PATH_SEPARATOR)
                .map(|(_, rule)| rule)
                .filter(|rule| !rule.is_empty())
                .unwrap_or(name),
            Self::Literal(_) | Self::Wildcard | Self::Bare(_) => name,
        }
    }

    /// Build the `SourceArn` restricting which rule may invoke the function.
    pub fn source_arn(&self) -> SourceArn {
        let resource = match self {
            Self::Literal(arn) => return SourceArn::Literal(arn.clone()),
            Self::Wildcard => ANY_RULE_RESOURCE,
            Self::Bare(reference) => reference.as_str(),
        };

        SourceArn::Scoped(Join::new(
            ARN_SEPARATOR,
            vec![
                EVENTS_ARN_PREFIX.into(),
                Ref::new(AWS_REGION).into(),
                Ref::new(AWS_ACCOUNT_ID).into(),
                resource.into(),
            ],
        ))
    }
}

impl From<&str> for RuleReference {
    fn from(reference: &str) -> Self {
        Self::parse(reference)
    }
}

impl fmt::Display for RuleReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
