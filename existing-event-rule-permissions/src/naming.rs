//! Logical resource naming
//!
//! CloudFormation logical IDs only allow alphanumeric characters. The Serverless
//! Framework maps user-facing names onto that charset by capitalizing the first
//! character and spelling out the punctuation it permits in function names. The
//! helpers here follow the same convention so that generated resources line up
//! with the ones the framework creates.

use crate::error::{EventRuleError, EventRuleResult};

/// Suffix the framework appends to a normalized function name for the function resource.
pub const LAMBDA_FUNCTION_SUFFIX: &str = "LambdaFunction";

/// Infix between the normalized function name and rule name of a permission resource.
pub const LAMBDA_PERMISSION_INFIX: &str = "LambdaPermission";

/// Normalize a name for use inside a CloudFormation logical ID.
///
/// The first character is upper-cased, `-` becomes `Dash`, `_` becomes
/// `Underscore` and `/` is dropped. Distinct inputs may normalize to the same
/// output (`a/b` and `Ab`); callers that care detect this at insertion time.
pub fn normalize_name(name: &str) -> EventRuleResult<String> {
    let mut chars = name.chars();
    let first = chars
        .next()
        .ok_or_else(|| EventRuleError::invalid_name("cannot normalize an empty name"))?;

    let capitalized: String = first.to_uppercase().chain(chars).collect();

    Ok(capitalized
        .replace('-', "Dash")
        .replace('_', "Underscore")
        .replace('/', ""))
}

/// Logical ID of the `AWS::Lambda::Function` resource the framework creates for `function_name`.
pub fn function_logical_name(function_name: &str) -> EventRuleResult<String> {
    Ok(format!(
        "{}{}",
        normalize_name(function_name)?,
        LAMBDA_FUNCTION_SUFFIX
    ))
}

/// Logical ID of the invoke permission granted to rule `rule_name` on `function_name`.
pub fn permission_logical_name(function_name: &str, rule_name: &str) -> EventRuleResult<String> {
    Ok(format!(
        "{}{}{}",
        normalize_name(function_name)?,
        LAMBDA_PERMISSION_INFIX,
        normalize_name(rule_name)?
    ))
}
