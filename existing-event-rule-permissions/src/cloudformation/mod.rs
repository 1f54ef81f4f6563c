//! CloudFormation building blocks: intrinsic functions and the compiled template.

pub mod intrinsic;
pub mod template;

pub use intrinsic::{GetAtt, Join, JoinPart, Ref};
pub use template::CloudFormationTemplate;

/// Pseudo parameter resolving to the region of the deploying stack.
pub const AWS_REGION: &str = "AWS::Region";

/// Pseudo parameter resolving to the account of the deploying stack.
pub const AWS_ACCOUNT_ID: &str = "AWS::AccountId";
