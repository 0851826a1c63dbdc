use serde_json::{Number, Value};

use crate::variable::{Variable, VariableType};

/// Derives the declared type of a variable.
///
/// An explicit type is used verbatim. Otherwise the value (or the first item of a list
/// value) decides between `Object`, `Boolean`, `Int` and `Float`, anything else being a
/// `String`. List and required wrappings are applied on top in both cases.
pub fn infer_type(variable: &Variable) -> VariableType {
    let name = match &variable.ty {
        Some(ty) => ty.clone(),
        None => scalar_name(variable.value.as_ref()).to_owned(),
    };

    VariableType {
        name,
        list: variable.list,
        required: variable.required,
    }
}

fn scalar_name(value: Option<&Value>) -> &'static str {
    let candidate = match value {
        Some(Value::Array(items)) => items.first(),
        other => other,
    };

    match candidate {
        Some(Value::Object(_) | Value::Array(_)) => "Object",
        Some(Value::Bool(_)) => "Boolean",
        Some(Value::Number(number)) if is_integral(number) => "Int",
        Some(Value::Number(_)) => "Float",
        Some(Value::String(_) | Value::Null) | None => "String",
    }
}

fn is_integral(number: &Number) -> bool {
    number.is_i64() || number.is_u64() || number.as_f64().is_some_and(|float| float.fract() == 0.0)
}
