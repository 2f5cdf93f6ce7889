use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single annotation usage: its qualified name plus member values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationValue {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub members: BTreeMap<String, MemberValue>,
}

/// Value of an annotation member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemberValue {
    Bool(bool),
    Int(i64),
    String(String),
    Array(Vec<MemberValue>),
    /// Reference to a type, written as `{"class": "com.acme.Foo"}`
    Class { class: String },
    Annotation(AnnotationValue),
}

impl AnnotationValue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: BTreeMap::new(),
        }
    }

    pub fn with_member(mut self, member: impl Into<String>, value: impl Into<MemberValue>) -> Self {
        self.members.insert(member.into(), value.into());
        self
    }

    pub fn set_member(&mut self, member: impl Into<String>, value: impl Into<MemberValue>) {
        self.members.insert(member.into(), value.into());
    }

    pub fn member(&self, member: &str) -> Option<&MemberValue> {
        self.members.get(member)
    }

    pub fn string_value(&self, member: &str) -> Option<&str> {
        self.member(member).and_then(MemberValue::as_str)
    }

    pub fn bool_value(&self, member: &str) -> Option<bool> {
        self.member(member).and_then(MemberValue::as_bool)
    }
}

impl MemberValue {
    pub fn class(name: impl Into<String>) -> Self {
        MemberValue::Class { class: name.into() }
    }

    /// Strings and class references both read as text; single-element arrays unwrap
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MemberValue::String(s) => Some(s),
            MemberValue::Class { class } => Some(class),
            MemberValue::Array(values) if values.len() == 1 => values[0].as_str(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MemberValue::Bool(b) => Some(*b),
            MemberValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Reads the value as a list of names, treating a scalar as a one-element list
    pub fn as_strings(&self) -> Vec<&str> {
        match self {
            MemberValue::Array(values) => values.iter().filter_map(MemberValue::as_str).collect(),
            other => other.as_str().into_iter().collect(),
        }
    }
}

impl From<&str> for MemberValue {
    fn from(value: &str) -> Self {
        MemberValue::String(value.to_string())
    }
}

impl From<String> for MemberValue {
    fn from(value: String) -> Self {
        MemberValue::String(value)
    }
}

impl From<bool> for MemberValue {
    fn from(value: bool) -> Self {
        MemberValue::Bool(value)
    }
}

impl From<i64> for MemberValue {
    fn from(value: i64) -> Self {
        MemberValue::Int(value)
    }
}

impl From<Vec<MemberValue>> for MemberValue {
    fn from(value: Vec<MemberValue>) -> Self {
        MemberValue::Array(value)
    }
}

impl From<AnnotationValue> for MemberValue {
    fn from(value: AnnotationValue) -> Self {
        MemberValue::Annotation(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_values_deserialize_untagged() {
        let json = r#"{
            "name": "beanforge.aop.Introduction",
            "members": {
                "interfaces": [{"class": "com.acme.Greeter"}, "com.acme.Other"],
                "proxyTarget": true,
                "order": 3
            }
        }"#;
        let value: AnnotationValue = serde_json::from_str(json).unwrap();

        assert_eq!(
            value.member("interfaces").unwrap().as_strings(),
            vec!["com.acme.Greeter", "com.acme.Other"]
        );
        assert_eq!(value.bool_value("proxyTarget"), Some(true));
        assert_eq!(value.member("order"), Some(&MemberValue::Int(3)));
    }

    #[test]
    fn test_scalar_reads_as_single_element_list() {
        let value = MemberValue::class("com.acme.Greeter");
        assert_eq!(value.as_strings(), vec!["com.acme.Greeter"]);
        assert_eq!(value.as_str(), Some("com.acme.Greeter"));
    }
}
