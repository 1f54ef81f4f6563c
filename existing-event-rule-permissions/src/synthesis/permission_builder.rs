//! Lambda permission synthesis (deterministic, no I/O)

use log::debug;

use crate::cloudformation::GetAtt;
use crate::error::EventRuleResult;
use crate::naming::{function_logical_name, permission_logical_name};
use crate::parsing::RuleReference;
use crate::types::{
    PermissionDefinition, PermissionDescriptor, PermissionProperties, EVENTS_PRINCIPAL,
    INVOKE_FUNCTION_ACTION, LAMBDA_PERMISSION_TYPE,
};

/// Synthesize the permission letting an existing event rule invoke `function_name`.
///
/// Fails only when the function name or the rule's short name is empty.
pub fn synthesize(
    function_name: &str,
    rule_reference: &str,
) -> EventRuleResult<PermissionDescriptor> {
    build_permission(function_name, &RuleReference::parse(rule_reference))
}

/// Same as [`synthesize`] for an already classified rule reference.
pub fn build_permission(
    function_name: &str,
    rule: &RuleReference,
) -> EventRuleResult<PermissionDescriptor> {
    let logical_name = permission_logical_name(function_name, rule.short_name())?;

    let definition = PermissionDefinition {
        resource_type: LAMBDA_PERMISSION_TYPE.to_string(),
        properties: PermissionProperties {
            function_name: GetAtt::arn(function_logical_name(function_name)?),
            action: INVOKE_FUNCTION_ACTION.to_string(),
            principal: EVENTS_PRINCIPAL.to_string(),
            source_arn: rule.source_arn(),
        },
    };

    debug!(
        "Synthesized {} for function {} and rule {}",
        logical_name, function_name, rule
    );

    Ok(PermissionDescriptor {
        logical_name,
        definition,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloudformation::JoinPart;
    use crate::error::EventRuleError;
    use crate::types::SourceArn;
    use serde_json::json;

    #[test]
    fn test_namespaced_rule_uses_final_segment() {
        let descriptor = synthesize("getMetrics", "my-namespace:my-rule").expect("valid input");
        assert_eq!(
            descriptor.logical_name,
            "GetMetricsLambdaPermissionMyDashrule"
        );
    }

    #[test]
    fn test_any_rule_end_to_end() {
        let descriptor = synthesize("getClusterMetrics", "ANY").expect("valid input");
        assert_eq!(
            descriptor.logical_name,
            "GetClusterMetricsLambdaPermissionANY"
        );

        match &descriptor.definition.properties.source_arn {
            SourceArn::Scoped(join) => {
                assert_eq!(
                    join.parts().last(),
                    Some(&JoinPart::Literal("rule/*".to_string()))
                );
            }
            SourceArn::Literal(arn) => panic!("Expected scoped source ARN, got {arn}"),
        }
    }

    #[test]
    fn test_arn_rule_end_to_end() {
        let arn = "arn:aws:events:us-east-1:111122223333:rule/daily-batch";
        let descriptor = synthesize("processOrder", arn).expect("valid input");

        assert_eq!(
            descriptor.logical_name,
            "ProcessOrderLambdaPermissionDailyDashbatch"
        );
        assert_eq!(
            descriptor.definition.properties.source_arn,
            SourceArn::Literal(arn.to_string())
        );
    }

    #[test]
    fn test_arn_like_references_are_accepted_permissively() {
        let descriptor = synthesize("hello", "arnold/nightly").expect("valid input");
        assert_eq!(
            descriptor.logical_name,
            "HelloLambdaPermissionArnoldnightly"
        );
        assert_eq!(
            descriptor.definition.properties.source_arn,
            SourceArn::Literal("arnold/nightly".to_string())
        );

        let arn = "arn:aws:events:us-east-1:1:rule/";
        let descriptor = synthesize("hello", arn).expect("valid input");
        assert_eq!(descriptor.logical_name, "HelloLambdaPermissionRule");
    }

    #[test]
    fn test_full_definition_shape() {
        let descriptor = synthesize("hello-world", "nightly_job").expect("valid input");
        let value = serde_json::to_value(&descriptor.definition).expect("serializable");

        assert_eq!(
            value,
            json!({
                "Type": "AWS::Lambda::Permission",
                "Properties": {
                    "FunctionName": { "Fn::GetAtt": ["HelloDashworldLambdaFunction", "Arn"] },
                    "Action": "lambda:InvokeFunction",
                    "Principal": "events.amazonaws.com",
                    "SourceArn": {
                        "Fn::Join": [
                            ":",
                            [
                                "arn:aws:events",
                                { "Ref": "AWS::Region" },
                                { "Ref": "AWS::AccountId" },
                                "nightly_job"
                            ]
                        ]
                    }
                }
            })
        );
        assert_eq!(
            descriptor.logical_name,
            "HelloDashworldLambdaPermissionNightlyUnderscorejob"
        );
    }

    #[test]
    fn test_distinct_functions_get_distinct_names() {
        let first = synthesize("ingest", "shared-rule").expect("valid input");
        let second = synthesize("report", "shared-rule").expect("valid input");

        assert_ne!(first.logical_name, second.logical_name);
        assert_eq!(
            first.definition.properties.source_arn,
            second.definition.properties.source_arn
        );
    }

    #[test]
    fn test_synthesis_is_idempotent() {
        let first = synthesize("processOrder", "my-namespace:my-rule").expect("valid input");
        let second = synthesize("processOrder", "my-namespace:my-rule").expect("valid input");

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).expect("serializable"),
            serde_json::to_string(&second).expect("serializable")
        );
    }

    #[test]
    fn test_empty_function_name_fails() {
        assert!(matches!(
            synthesize("", "my-rule"),
            Err(EventRuleError::InvalidName(_))
        ));
    }

    #[test]
    fn test_empty_rule_short_name_fails() {
        assert!(matches!(
            synthesize("hello", "my-namespace:"),
            Err(EventRuleError::InvalidName(_))
        ));
        assert!(matches!(
            synthesize("hello", ""),
            Err(EventRuleError::InvalidName(_))
        ));
    }
}
