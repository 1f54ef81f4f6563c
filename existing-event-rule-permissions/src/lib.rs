//! This crate provides the core logic for granting existing event rules access
//! to Serverless functions:
//! - Rule reference classification (name, namespaced name, ARN, `ANY`)
//! - Logical resource naming compatible with the Serverless Framework
//! - `AWS::Lambda::Permission` synthesis
//! - Injection of the synthesized permissions into a compiled CloudFormation template
//!

pub mod cloudformation;
pub mod commands;
pub mod descriptor;
mod error;
pub mod naming;
mod parsing;
mod synthesis;
mod types;

// Re-exports for a small, focused public API
pub use cloudformation::CloudFormationTemplate;
pub use commands::{compile_events, CompileSummary, LogReporter, Reporter};
pub use descriptor::{EventDeclaration, FunctionDefinition, ServiceDescriptor};
pub use error::{EventRuleError, EventRuleResult};
pub use naming::{function_logical_name, normalize_name, permission_logical_name};
pub use parsing::{RuleReference, ANY_RULE, ANY_RULE_RESOURCE, ARN_PREFIX, EVENTS_ARN_PREFIX};
pub use synthesis::{build_permission, synthesize};
pub use types::{
    PermissionDefinition, PermissionDescriptor, PermissionProperties, SourceArn,
    EVENTS_PRINCIPAL, INVOKE_FUNCTION_ACTION, LAMBDA_PERMISSION_TYPE,
};
