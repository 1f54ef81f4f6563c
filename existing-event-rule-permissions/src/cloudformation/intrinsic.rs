//! Typed CloudFormation intrinsic functions
//!
//! Each struct serializes to the single-key object CloudFormation expects, e.g.
//! `{"Ref": "AWS::Region"}` or `{"Fn::GetAtt": ["MyLambdaFunction", "Arn"]}`.

use serde::Serialize;

/// `{"Ref": "<logical id or pseudo parameter>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ref {
    #[serde(rename = "Ref")]
    pub target: String,
}

impl Ref {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

/// `{"Fn::GetAtt": ["<logical id>", "<attribute>"]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetAtt {
    #[serde(rename = "Fn::GetAtt")]
    pub target: (String, String),
}

impl GetAtt {
    pub fn new(logical_id: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            target: (logical_id.into(), attribute.into()),
        }
    }

    pub fn arn(logical_id: impl Into<String>) -> Self {
        Self::new(logical_id, "Arn")
    }
}

/// A single element of a `Fn::Join` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum JoinPart {
    Literal(String),
    Ref(Ref),
}

impl From<&str> for JoinPart {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl From<String> for JoinPart {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl From<Ref> for JoinPart {
    fn from(value: Ref) -> Self {
        Self::Ref(value)
    }
}

/// `{"Fn::Join": ["<delimiter>", [<parts>...]]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Join {
    #[serde(rename = "Fn::Join")]
    pub join: (String, Vec<JoinPart>),
}

impl Join {
    pub fn new(delimiter: impl Into<String>, parts: Vec<JoinPart>) -> Self {
        Self {
            join: (delimiter.into(), parts),
        }
    }

    pub fn delimiter(&self) -> &str {
        &self.join.0
    }

    pub fn parts(&self) -> &[JoinPart] {
        &self.join.1
    }
}
