use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// A generated GraphQL document and the values of the variables it declares.
///
/// Serializes to the `{"query": ..., "variables": {...}}` body of a GraphQL request.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Document {
    pub query: String,
    pub variables: Variables,
}

/// Variable values in declaration order. A variable declared without a value maps to `None`
/// and is left out when serialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables(IndexMap<String, Option<Value>>);

impl Variables {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// The value of a variable, `None` if it is not declared or has no value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).and_then(Option::as_ref)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> + '_ {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_ref()))
    }

    pub fn into_inner(self) -> IndexMap<String, Option<Value>> {
        self.0
    }
}

impl FromIterator<(String, Option<Value>)> for Variables {
    fn from_iter<T: IntoIterator<Item = (String, Option<Value>)>>(iter: T) -> Self {
        Variables(iter.into_iter().collect())
    }
}

impl Serialize for Variables {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &self.0 {
            if let Some(value) = value {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}
