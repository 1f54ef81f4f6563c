//! The "compile events" pass: add permissions for every existing-rule event

use log::{debug, warn};

use super::reporter::{permission_added_message, Reporter};
use crate::cloudformation::CloudFormationTemplate;
use crate::descriptor::{ServiceDescriptor, CLOUD_WATCH_RULE_ARN_KEY, CLOUD_WATCH_RULE_KEY};
use crate::error::EventRuleResult;
use crate::synthesis::synthesize;

/// Outcome of a successful compile pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileSummary {
    /// Logical names of the inserted permissions, in insertion order.
    pub permissions: Vec<String>,
}

/// Synthesize a permission for every existing-rule event in `descriptor` and
/// insert it into `template`.
///
/// Functions are visited in name order and events in declaration order. The
/// first error aborts the pass; permissions inserted before it remain in
/// `template`, so callers should only persist the template on success.
pub fn compile_events(
    descriptor: &ServiceDescriptor,
    template: &mut CloudFormationTemplate,
    reporter: &mut dyn Reporter,
) -> EventRuleResult<CompileSummary> {
    let mut summary = CompileSummary::default();

    for (function_name, function) in &descriptor.functions {
        debug!(
            "Inspecting {} events of function {}",
            function.events.len(),
            function_name
        );

        for event in &function.events {
            let Some(rule) = event.rule_reference() else {
                if event.declares_rule_key() {
                    warn!(
                        "Function {} has an event with an empty {} and {}; skipping it",
                        function_name, CLOUD_WATCH_RULE_KEY, CLOUD_WATCH_RULE_ARN_KEY
                    );
                }
                continue;
            };

            if event.has_conflicting_keys() {
                warn!(
                    "Function {} declares both {} and {}; using {}",
                    function_name, CLOUD_WATCH_RULE_KEY, CLOUD_WATCH_RULE_ARN_KEY, rule
                );
            }

            let permission = synthesize(function_name, rule)?;
            template.insert_permission(&permission)?;
            reporter.report(&permission_added_message(rule, function_name));
            summary.permissions.push(permission.logical_name);
        }
    }

    Ok(summary)
}
