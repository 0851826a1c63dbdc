use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

/// Variables keyed by the name they are declared under in the document (`$key`).
///
/// Insertion order is the declaration order.
pub type VariableMap = IndexMap<String, Variable>;

/// A GraphQL variable: the runtime value sent next to the document and the hints used to
/// declare it.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct Variable {
    /// `None` when no value was ever supplied. The variable is still declared.
    pub value: Option<Value>,
    /// Argument name to bind to, when it differs from the variable key.
    pub name: Option<String>,
    /// Explicit type name, skips inference.
    pub ty: Option<String>,
    pub list: Option<ListWrapping>,
    pub required: bool,
}

/// How a list variable wraps its item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListWrapping {
    /// `[T]`
    NullableItems,
    /// `[T!]`
    RequiredItems,
}

impl Variable {
    pub fn new(value: impl Into<Value>) -> Self {
        Variable {
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// A variable declared without a value.
    pub fn undefined() -> Self {
        Variable::default()
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn list(mut self) -> Self {
        self.list = Some(ListWrapping::NullableItems);
        self
    }

    pub fn list_of_required(mut self) -> Self {
        self.list = Some(ListWrapping::RequiredItems);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The argument name this variable binds to in an argument list.
    pub fn argument_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(key)
    }
}

macro_rules! impl_from_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Variable {
                fn from(value: $ty) -> Self {
                    Variable::new(value)
                }
            }
        )*
    };
}

impl_from_value!(bool, i32, i64, u32, u64, f64, &str, String, Vec<Value>);

/// Declared type of a variable, e.g. `[String!]!`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableType {
    pub name: String,
    pub list: Option<ListWrapping>,
    pub required: bool,
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.list {
            None => f.write_str(&self.name)?,
            Some(ListWrapping::NullableItems) => write!(f, "[{}]", self.name)?,
            Some(ListWrapping::RequiredItems) => write!(f, "[{}!]", self.name)?,
        }

        if self.required {
            f.write_str("!")?;
        }

        Ok(())
    }
}
