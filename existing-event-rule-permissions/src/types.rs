use serde::Serialize;

use crate::cloudformation::{GetAtt, Join};

/// CloudFormation resource type of a Lambda resource-based permission.
pub const LAMBDA_PERMISSION_TYPE: &str = "AWS::Lambda::Permission";

/// Action granted to the event rule.
pub const INVOKE_FUNCTION_ACTION: &str = "lambda:InvokeFunction";

/// Service principal of EventBridge (formerly CloudWatch Events).
pub const EVENTS_PRINCIPAL: &str = "events.amazonaws.com";

/// A synthesized permission resource, keyed by its logical ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionDescriptor {
    pub logical_name: String,
    pub definition: PermissionDefinition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PermissionDefinition {
    #[serde(rename = "Type")]
    pub resource_type: String,
    pub properties: PermissionProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PermissionProperties {
    pub function_name: GetAtt,
    pub action: String,
    pub principal: String,
    pub source_arn: SourceArn,
}

/// Constrains which event rule may invoke the function.
///
/// `Literal` is an ARN the user supplied verbatim. `Scoped` is resolved by
/// CloudFormation to the region and account of the deploying stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SourceArn {
    Literal(String),
    Scoped(Join),
}
