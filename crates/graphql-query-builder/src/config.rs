use std::fmt;

use crate::{field::Field, render::SelectionSet};

/// Options applied to the whole document.
///
/// Deserializes from the free-form JSON configuration callers pass around:
/// `{"operationName": "...", "fragment": [{"name": "...", "on": "...", "fields": [...]}]}`.
/// Unrecognized keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Name inserted right after the operation keyword.
    #[serde(default)]
    pub operation_name: Option<String>,
    /// Named fragments appended after the operation, in order.
    #[serde(default, rename = "fragment", deserialize_with = "crate::json::null_as_default")]
    pub fragments: Vec<FragmentDefinition>,
}

impl Config {
    pub fn with_operation_name(mut self, operation_name: impl Into<String>) -> Self {
        self.operation_name = Some(operation_name.into());
        self
    }

    pub fn with_fragment(mut self, fragment: FragmentDefinition) -> Self {
        self.fragments.push(fragment);
        self
    }
}

/// `fragment <name> on <on> { fields }`
///
/// Building a document fails when a configured fragment selects nothing.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct FragmentDefinition {
    pub name: String,
    pub on: String,
    pub fields: Vec<Field>,
}

impl FragmentDefinition {
    pub fn new(name: impl Into<String>, on: impl Into<String>, fields: impl IntoIterator<Item = Field>) -> Self {
        FragmentDefinition {
            name: name.into(),
            on: on.into(),
            fields: fields.into_iter().collect(),
        }
    }
}

impl fmt::Display for FragmentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fragment {} on {} {{ {} }}", self.name, self.on, SelectionSet(&self.fields))
    }
}
