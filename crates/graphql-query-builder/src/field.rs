use std::fmt;

use indexmap::IndexMap;

use crate::{
    error::Error,
    variable::{Variable, VariableMap},
};

/// Root field (or nested operation) name, optionally aliased.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum OperationName {
    /// Rendered verbatim.
    Plain(String),
    /// Rendered as `alias: name`.
    Aliased { name: String, alias: String },
}

impl OperationName {
    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        OperationName::Aliased {
            name: name.into(),
            alias: alias.into(),
        }
    }

    /// The field name, without its alias.
    pub fn name(&self) -> &str {
        match self {
            OperationName::Plain(name) | OperationName::Aliased { name, .. } => name,
        }
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationName::Plain(name) => f.write_str(name),
            OperationName::Aliased { name, alias } => write!(f, "{alias}: {name}"),
        }
    }
}

impl From<&str> for OperationName {
    fn from(value: &str) -> Self {
        OperationName::Plain(value.to_owned())
    }
}

impl From<String> for OperationName {
    fn from(value: String) -> Self {
        OperationName::Plain(value)
    }
}

/// One entry of a selection set.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum Field {
    /// A field selected by name.
    Leaf(String),
    /// Sibling fields with their own sub-selections, `name { ... }` each. An empty
    /// sub-selection renders the bare name.
    Group(IndexMap<String, Vec<Field>>),
    /// A field taking arguments, with an optional sub-selection.
    Operation(NestedOperation),
    /// `... on Type { ... }`
    InlineFragment(InlineFragment),
    /// `...Name`, defined through [`crate::Config::fragments`].
    FragmentSpread(String),
}

impl Field {
    pub fn group<K, F>(entries: impl IntoIterator<Item = (K, F)>) -> Self
    where
        K: Into<String>,
        F: IntoIterator<Item = Field>,
    {
        Field::Group(
            entries
                .into_iter()
                .map(|(key, fields)| (key.into(), fields.into_iter().collect()))
                .collect(),
        )
    }

    pub fn inline_fragment(type_condition: impl Into<String>, fields: impl IntoIterator<Item = Field>) -> Self {
        Field::InlineFragment(InlineFragment::new(type_condition, fields))
    }

    pub fn fragment_spread(name: impl Into<String>) -> Self {
        Field::FragmentSpread(name.into())
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::Leaf(value.to_owned())
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Field::Leaf(value)
    }
}

impl From<NestedOperation> for Field {
    fn from(value: NestedOperation) -> Self {
        Field::Operation(value)
    }
}

impl From<InlineFragment> for Field {
    fn from(value: InlineFragment) -> Self {
        Field::InlineFragment(value)
    }
}

/// A field invoked like an operation: `name (arg: $key) { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedOperation {
    operation: OperationName,
    variables: VariableMap,
    fields: Vec<Field>,
}

impl NestedOperation {
    /// Fails unless at least one of `variables` or `fields` is given, even if empty.
    pub fn new(
        operation: impl Into<OperationName>,
        variables: Option<VariableMap>,
        fields: Option<Vec<Field>>,
    ) -> Result<Self, Error> {
        let operation = operation.into();

        if variables.is_none() && fields.is_none() {
            return Err(Error::MalformedField {
                operation: operation.to_string(),
            });
        }

        Ok(NestedOperation {
            operation,
            variables: variables.unwrap_or_default(),
            fields: fields.unwrap_or_default(),
        })
    }

    pub fn with_fields(operation: impl Into<OperationName>, fields: impl IntoIterator<Item = Field>) -> Self {
        NestedOperation {
            operation: operation.into(),
            variables: VariableMap::new(),
            fields: fields.into_iter().collect(),
        }
    }

    pub fn with_variables<K, V>(operation: impl Into<OperationName>, variables: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Variable>,
    {
        NestedOperation {
            operation: operation.into(),
            variables: collect_variables(variables),
            fields: Vec::new(),
        }
    }

    pub fn variable(mut self, key: impl Into<String>, variable: impl Into<Variable>) -> Self {
        self.variables.insert(key.into(), variable.into());
        self
    }

    pub fn field(mut self, field: impl Into<Field>) -> Self {
        self.fields.push(field.into());
        self
    }

    pub fn operation(&self) -> &OperationName {
        &self.operation
    }

    pub fn variables(&self) -> &VariableMap {
        &self.variables
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InlineFragment {
    type_condition: String,
    fields: Vec<Field>,
}

impl InlineFragment {
    pub fn new(type_condition: impl Into<String>, fields: impl IntoIterator<Item = Field>) -> Self {
        InlineFragment {
            type_condition: type_condition.into(),
            fields: fields.into_iter().collect(),
        }
    }

    pub fn type_condition(&self) -> &str {
        &self.type_condition
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/// A root operation: `operation (arguments) { fields }`.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct OperationDescriptor {
    pub operation: OperationName,
    #[serde(default, deserialize_with = "crate::json::null_as_default")]
    pub variables: VariableMap,
    #[serde(default, deserialize_with = "crate::json::null_as_default")]
    pub fields: Vec<Field>,
}

impl OperationDescriptor {
    pub fn new(operation: impl Into<OperationName>) -> Self {
        OperationDescriptor {
            operation: operation.into(),
            variables: VariableMap::new(),
            fields: Vec::new(),
        }
    }

    pub fn variable(mut self, key: impl Into<String>, variable: impl Into<Variable>) -> Self {
        self.variables.insert(key.into(), variable.into());
        self
    }

    pub fn field(mut self, field: impl Into<Field>) -> Self {
        self.fields.push(field.into());
        self
    }

    pub fn fields<F: Into<Field>>(mut self, fields: impl IntoIterator<Item = F>) -> Self {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }
}

/// One descriptor or a list of them, built into a single document.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum Operations {
    One(OperationDescriptor),
    Many(Vec<OperationDescriptor>),
}

impl From<OperationDescriptor> for Operations {
    fn from(value: OperationDescriptor) -> Self {
        Operations::One(value)
    }
}

impl From<Vec<OperationDescriptor>> for Operations {
    fn from(value: Vec<OperationDescriptor>) -> Self {
        Operations::Many(value)
    }
}

impl<const N: usize> From<[OperationDescriptor; N]> for Operations {
    fn from(value: [OperationDescriptor; N]) -> Self {
        Operations::Many(value.into())
    }
}

fn collect_variables<K, V>(variables: impl IntoIterator<Item = (K, V)>) -> VariableMap
where
    K: Into<String>,
    V: Into<Variable>,
{
    variables
        .into_iter()
        .map(|(key, variable)| (key.into(), variable.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_without_variables_or_fields_is_malformed() {
        let error = NestedOperation::new("average_age", None, None).unwrap_err();

        insta::assert_snapshot!(error, @"operation `average_age` must have variables, fields, namedFragment, or inlineFragment properties");
    }

    #[test]
    fn empty_variables_are_enough() {
        let operation = NestedOperation::new("innerMutation", Some(VariableMap::new()), None).unwrap();

        assert!(operation.variables().is_empty());
        assert!(operation.fields().is_empty());
    }

    #[test]
    fn aliased_operation_name() {
        let operation = OperationName::aliased("thoughts", "myThoughts");

        assert_eq!(operation.to_string(), "myThoughts: thoughts");
        assert_eq!(operation.name(), "thoughts");
    }
}
