//! Compiled CloudFormation template
//!
//! The template is kept as an untyped JSON document so that everything the
//! framework compiled into it survives a read/modify/write cycle. Key order is
//! preserved (`serde_json` is built with `preserve_order`), which keeps diffs
//! of rewritten templates small.

use std::path::Path;
use std::str::FromStr;

use log::debug;
use serde_json::{json, Map, Value};

use crate::error::{EventRuleError, EventRuleResult};
use crate::types::PermissionDescriptor;

const RESOURCES_KEY: &str = "Resources";

#[derive(Debug, Clone, PartialEq)]
pub struct CloudFormationTemplate {
    document: Value,
}

impl Default for CloudFormationTemplate {
    fn default() -> Self {
        Self {
            document: json!({
                "AWSTemplateFormatVersion": "2010-09-09",
                "Resources": {}
            }),
        }
    }
}

impl CloudFormationTemplate {
    /// Wrap an already parsed template document. The root must be a JSON object.
    pub fn from_value(document: Value) -> EventRuleResult<Self> {
        if !document.is_object() {
            return Err(EventRuleError::template("template root must be a JSON object"));
        }
        Ok(Self { document })
    }

    /// Read and parse a template from disk.
    pub fn from_path(path: impl AsRef<Path>) -> EventRuleResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            EventRuleError::template(format!("failed to read template '{}': {}", path.display(), e))
        })?;
        content.parse()
    }

    pub fn as_value(&self) -> &Value {
        &self.document
    }

    pub fn into_value(self) -> Value {
        self.document
    }

    /// The `Resources` section, if the template has one.
    pub fn resources(&self) -> Option<&Map<String, Value>> {
        self.document.get(RESOURCES_KEY).and_then(Value::as_object)
    }

    pub fn resource(&self, logical_name: &str) -> Option<&Value> {
        self.resources()
            .and_then(|resources| resources.get(logical_name))
    }

    /// The `Resources` section, created empty if missing.
    pub fn resources_mut(&mut self) -> EventRuleResult<&mut Map<String, Value>> {
        let root = self
            .document
            .as_object_mut()
            .ok_or_else(|| EventRuleError::template("template root must be a JSON object"))?;

        root.entry(RESOURCES_KEY)
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| EventRuleError::template("'Resources' must be a JSON object"))
    }

    /// Insert a synthesized permission under its logical name.
    ///
    /// Re-inserting an identical definition is a no-op. A different definition
    /// under an existing logical name is rejected rather than overwritten.
    pub fn insert_permission(&mut self, descriptor: &PermissionDescriptor) -> EventRuleResult<()> {
        let body = serde_json::to_value(&descriptor.definition)?;
        let resources = self.resources_mut()?;

        match resources.get(&descriptor.logical_name) {
            Some(existing) if *existing != body => {
                return Err(EventRuleError::LogicalNameCollision {
                    logical_name: descriptor.logical_name.clone(),
                });
            }
            Some(_) => {
                debug!(
                    "Resource {} already present with an identical definition",
                    descriptor.logical_name
                );
            }
            None => {}
        }

        resources.insert(descriptor.logical_name.clone(), body);
        Ok(())
    }

    pub fn to_json_pretty(&self) -> EventRuleResult<String> {
        Ok(serde_json::to_string_pretty(&self.document)?)
    }

    /// Serialize the template and write it to `path`, replacing any existing file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> EventRuleResult<()> {
        let path = path.as_ref();
        let content = self.to_json_pretty()?;
        std::fs::write(path, content).map_err(|e| {
            EventRuleError::template(format!(
                "failed to write template '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

impl FromStr for CloudFormationTemplate {
    type Err = EventRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let document: Value = serde_json::from_str(s)
            .map_err(|e| EventRuleError::template(format!("failed to parse template: {e}")))?;
        Self::from_value(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::synthesize;
    use tempfile::TempDir;

    #[test]
    fn test_default_template_has_empty_resources() {
        let template = CloudFormationTemplate::default();
        assert_eq!(template.resources().map(Map::len), Some(0));
    }

    #[test]
    fn test_from_str_rejects_non_object_root() {
        let result = "[1, 2, 3]".parse::<CloudFormationTemplate>();
        assert!(matches!(result, Err(EventRuleError::Template(_))));
    }

    #[test]
    fn test_from_str_rejects_invalid_json() {
        let result = "{ not json".parse::<CloudFormationTemplate>();
        assert!(matches!(result, Err(EventRuleError::Template(_))));
    }

    #[test]
    fn test_resources_mut_creates_missing_section() {
        let mut template =
            CloudFormationTemplate::from_value(json!({ "Outputs": {} })).expect("object root");
        assert!(template.resources().is_none());
        template.resources_mut().expect("created");
        assert!(template.resources().is_some());
    }

    #[test]
    fn test_resources_mut_rejects_malformed_section() {
        let mut template =
            CloudFormationTemplate::from_value(json!({ "Resources": [] })).expect("object root");
        assert!(matches!(
            template.resources_mut(),
            Err(EventRuleError::Template(_))
        ));
    }

    #[test]
    fn test_insert_permission_preserves_existing_resources() {
        let mut template = CloudFormationTemplate::from_value(json!({
            "Resources": {
                "HelloLambdaFunction": { "Type": "AWS::Lambda::Function" }
            }
        }))
        .expect("object root");

        let descriptor = synthesize("hello", "my-rule").expect("valid input");
        template.insert_permission(&descriptor).expect("no collision");

        let keys: Vec<&String> = template.resources().expect("resources").keys().collect();
        assert_eq!(
            keys,
            vec!["HelloLambdaFunction", "HelloLambdaPermissionMyDashrule"]
        );
        assert_eq!(
            template.resource("HelloLambdaPermissionMyDashrule"),
            Some(&serde_json::to_value(&descriptor.definition).expect("serializable"))
        );
    }

    #[test]
    fn test_insert_identical_permission_twice_is_idempotent() {
        let mut template = CloudFormationTemplate::default();
        let descriptor = synthesize("hello", "ANY").expect("valid input");

        template.insert_permission(&descriptor).expect("first insert");
        let snapshot = template.clone();
        template.insert_permission(&descriptor).expect("second insert");

        assert_eq!(template, snapshot);
    }

    #[test]
    fn test_insert_colliding_permission_fails() {
        let mut template = CloudFormationTemplate::default();
        // Both references end in "my-rule" but scope the source ARN differently.
        let first = synthesize("hello", "my-rule").expect("valid input");
        let second = synthesize(
            "hello",
            "arn:aws:events:us-east-1:111122223333:rule/bus:my-rule",
        )
        .expect("valid input");
        assert_eq!(first.logical_name, second.logical_name);

        template.insert_permission(&first).expect("first insert");
        let err = template
            .insert_permission(&second)
            .expect_err("different definition under same name");
        match err {
            EventRuleError::LogicalNameCollision { logical_name } => {
                assert_eq!(logical_name, "HelloLambdaPermissionMyDashrule");
            }
            other => panic!("Expected LogicalNameCollision, got {other:?}"),
        }
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("template.json");

        let mut template = CloudFormationTemplate::default();
        template
            .insert_permission(&synthesize("hello", "ANY").expect("valid input"))
            .expect("no collision");
        template.write_to(&path).expect("write");

        let read_back = CloudFormationTemplate::from_path(&path).expect("read");
        assert_eq!(read_back, template);
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = TempDir::new().expect("temp dir");
        let result = CloudFormationTemplate::from_path(dir.path().join("missing.json"));
        assert!(matches!(result, Err(EventRuleError::Template(_))));
    }
}
