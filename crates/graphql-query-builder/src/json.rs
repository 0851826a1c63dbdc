//! Decoding of descriptors from their JSON shape.
//!
//! Fields are strings, groups (`{"user": ["id", ...]}`) or operation objects
//! (`{"operation", "variables", "fields", "inlineFragment", "namedFragment"}`). Variables are
//! either plain values or `{"value", "name", "type", "list", "required"}` objects.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::{
    error::Error,
    field::{Field, InlineFragment, NestedOperation, OperationDescriptor, OperationName, Operations},
    variable::{ListWrapping, Variable, VariableMap},
};

/// Deserializes `null` the same as a missing value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl TryFrom<Value> for Operations {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(operation_descriptor)
                .collect::<Result<Vec<_>, _>>()
                .map(Operations::Many),
            value => operation_descriptor(value).map(Operations::One),
        }
    }
}

fn operation_descriptor(value: Value) -> Result<OperationDescriptor, Error> {
    Ok(OperationDescriptor::deserialize(value)?)
}

impl TryFrom<Value> for OperationName {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(name) => Ok(OperationName::Plain(name)),
            Value::Object(mut object) => {
                let name = take_string(&mut object, "name")?;
                let alias = take_string(&mut object, "alias")?;

                match (name, alias) {
                    (Some(name), Some(alias)) => Ok(OperationName::Aliased { name, alias }),
                    _ => Err(Error::InvalidDescriptor(
                        "an aliased operation needs both `name` and `alias`".to_owned(),
                    )),
                }
            }
            other => Err(Error::InvalidDescriptor(format!(
                "operation must be a string or {{name, alias}}, got `{other}`"
            ))),
        }
    }
}

impl TryFrom<Value> for Variable {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let mut object = match value {
            Value::Object(object) => object,
            value => return Ok(Variable::new(value)),
        };

        let list = match object.remove("list") {
            Some(Value::Bool(true)) => Some(ListWrapping::NullableItems),
            Some(Value::Array(items)) if items.first().is_some_and(is_truthy) => Some(ListWrapping::RequiredItems),
            Some(Value::Array(_)) => Some(ListWrapping::NullableItems),
            _ => None,
        };

        Ok(Variable {
            value: object.remove("value"),
            name: take_string(&mut object, "name")?,
            ty: take_string(&mut object, "type")?,
            list,
            required: object.remove("required").as_ref().is_some_and(is_truthy),
        })
    }
}

impl TryFrom<Value> for Field {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(name) => Ok(Field::Leaf(name)),
            Value::Object(object) if object.contains_key("operation") => operation_field(object),
            Value::Object(object) => object
                .into_iter()
                .map(|(key, fields)| match fields {
                    Value::Array(_) => Ok((key, field_list(fields)?)),
                    other => Err(Error::InvalidDescriptor(format!(
                        "sub-selection of `{key}` must be a list, got `{other}`"
                    ))),
                })
                .collect::<Result<_, _>>()
                .map(Field::Group),
            other => Err(Error::InvalidDescriptor(format!(
                "a field must be a name or an object, got `{other}`"
            ))),
        }
    }
}

fn operation_field(mut object: Map<String, Value>) -> Result<Field, Error> {
    let operation = OperationName::try_from(object.remove("operation").unwrap_or_default())?;
    let inline_fragment = object.remove("inlineFragment").as_ref().is_some_and(is_truthy);
    let named_fragment = object.remove("namedFragment").as_ref().is_some_and(is_truthy);
    let variables = present(object.remove("variables")).map(variable_map).transpose()?;
    let fields = present(object.remove("fields")).map(field_list).transpose()?;

    if inline_fragment {
        let Some(fields) = fields else {
            return Err(Error::MalformedInlineFragment {
                operation: operation.to_string(),
            });
        };

        return Ok(Field::InlineFragment(InlineFragment::new(fragment_name(operation)?, fields)));
    }

    if named_fragment {
        return Ok(Field::FragmentSpread(fragment_name(operation)?));
    }

    NestedOperation::new(operation, variables, fields).map(Field::Operation)
}

fn fragment_name(operation: OperationName) -> Result<String, Error> {
    match operation {
        OperationName::Plain(name) => Ok(name),
        OperationName::Aliased { name, alias } => Err(Error::InvalidDescriptor(format!(
            "fragment `{alias}: {name}` cannot be aliased"
        ))),
    }
}

fn variable_map(value: Value) -> Result<VariableMap, Error> {
    match value {
        Value::Object(object) => object
            .into_iter()
            .map(|(key, variable)| Ok::<_, Error>((key, Variable::try_from(variable)?)))
            .collect(),
        other => Err(Error::InvalidDescriptor(format!(
            "variables must be an object, got `{other}`"
        ))),
    }
}

fn field_list(value: Value) -> Result<Vec<Field>, Error> {
    match value {
        Value::Array(items) => items.into_iter().map(Field::try_from).collect(),
        other => Err(Error::InvalidDescriptor(format!("fields must be a list, got `{other}`"))),
    }
}

fn take_string(object: &mut Map<String, Value>, key: &str) -> Result<Option<String>, Error> {
    match object.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value)),
        Some(other) => Err(Error::InvalidDescriptor(format!(
            "`{key}` must be a string, got `{other}`"
        ))),
    }
}

fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|value| !value.is_null())
}

/// Whether a loosely typed flag counts as set.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(value) => *value,
        Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0 && !number.is_nan()),
        Value::String(value) => !value.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn plain_values_are_shorthand() {
        let variable = Variable::try_from(json!("Jon Doe")).unwrap();

        assert_eq!(variable, Variable::new("Jon Doe"));
    }

    #[test]
    fn descriptor_object() {
        let variable = Variable::try_from(json!({
            "value": ["a", "b"],
            "name": "labels",
            "type": "Tag",
            "list": [true],
            "required": true
        }))
        .unwrap();

        assert_eq!(
            variable,
            Variable::new(json!(["a", "b"]))
                .named("labels")
                .with_type("Tag")
                .list_of_required()
                .required()
        );
    }

    #[test]
    fn serde_reads_objects_as_descriptors() {
        let variable: Variable = serde_json::from_value(json!({"value": 1, "type": "ID", "required": true})).unwrap();

        assert_eq!(variable, Variable::new(1).with_type("ID").required());

        let variable: Variable = serde_json::from_value(json!([1, 2])).unwrap();

        assert_eq!(variable, Variable::new(vec![json!(1), json!(2)]));
    }

    #[test]
    fn list_flag_forms() {
        let list = |flag: Value| Variable::try_from(json!({"value": [1], "list": flag})).unwrap().list;

        assert_eq!(list(json!(true)), Some(ListWrapping::NullableItems));
        assert_eq!(list(json!(false)), None);
        assert_eq!(list(json!([true])), Some(ListWrapping::RequiredItems));
        assert_eq!(list(json!([false])), Some(ListWrapping::NullableItems));
        assert_eq!(list(json!([])), Some(ListWrapping::NullableItems));
    }

    #[test]
    fn descriptor_without_value_is_undefined() {
        let variable = Variable::try_from(json!({"type": "Int"})).unwrap();

        assert_eq!(variable.value, None);
        assert_eq!(variable.ty.as_deref(), Some("Int"));
    }

    #[test]
    fn operation_field_needs_content() {
        let error = Field::try_from(json!({"operation": "getFilteredUsersCount"})).unwrap_err();

        insta::assert_snapshot!(error, @"operation `getFilteredUsersCount` must have variables, fields, namedFragment, or inlineFragment properties");
    }

    #[test]
    fn inline_fragment_needs_fields() {
        let error = Field::try_from(json!({"operation": "User", "inlineFragment": true})).unwrap_err();

        insta::assert_snapshot!(error, @"inline fragment on `User` must have a fields property");
    }

    #[test]
    fn fragments_win_over_operation_content() {
        let field = Field::try_from(json!({
            "operation": "InlineFragmentType",
            "fields": ["grade"],
            "inlineFragment": true,
            "namedFragment": true
        }))
        .unwrap();

        assert_eq!(field, Field::inline_fragment("InlineFragmentType", ["grade".into()]));

        let field = Field::try_from(json!({"operation": "NamedFragment", "namedFragment": true})).unwrap();

        assert_eq!(field, Field::fragment_spread("NamedFragment"));
    }

    #[test]
    fn group_values_must_be_lists() {
        let error = Field::try_from(json!({"user": "id"})).unwrap_err();

        insta::assert_snapshot!(error, @r#"invalid descriptor: sub-selection of `user` must be a list, got `"id"`"#);
    }

    #[test]
    fn nested_errors_abort_the_whole_descriptor() {
        let error = serde_json::from_value::<Operations>(json!({
            "operation": "thought",
            "fields": [{"edges": [{"operation": "rights"}]}]
        }))
        .unwrap_err();

        assert!(error.to_string().contains("operation `rights` must have variables"));
    }
}
