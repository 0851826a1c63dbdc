//! Document assembly strategies.
//!
//! Variable collection and field rendering happen before an adapter runs: it receives the
//! merged variables through a [`BuildContext`] and every root operation already rendered as
//! a [`ResolvedOperation`]. Adapters only decide the shape of the final document.

mod app_sync;
mod default;

use std::fmt::{self, Write};

use itertools::Itertools;

pub use app_sync::AppSyncAdapter;
pub use default::DefaultAdapter;

use crate::{
    config::Config,
    document::{Document, Variables},
    error::Error,
    field::{OperationDescriptor, OperationName},
    infer::infer_type,
    render::{non_empty_selection, Arguments},
    variable::VariableMap,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Query => "query",
            OperationType::Mutation => "mutation",
            OperationType::Subscription => "subscription",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the final document out of resolved root operations.
pub trait DocumentBuilder {
    fn build_one(&self, context: &BuildContext<'_>, operation: &ResolvedOperation<'_>) -> Result<Document, Error> {
        self.build_many(context, std::slice::from_ref(operation))
    }

    fn build_many(&self, context: &BuildContext<'_>, operations: &[ResolvedOperation<'_>]) -> Result<Document, Error>;
}

/// A root operation with its argument list and selection already rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOperation<'a> {
    /// Name, possibly aliased.
    pub operation: &'a OperationName,
    /// `(argument: $key, ...)`, empty without variables.
    pub arguments: String,
    /// Selection set content without braces, empty without fields.
    pub selection: String,
}

impl<'a> ResolvedOperation<'a> {
    pub fn new(descriptor: &'a OperationDescriptor) -> Self {
        ResolvedOperation {
            operation: &descriptor.operation,
            arguments: Arguments(&descriptor.variables).to_string(),
            selection: non_empty_selection(&descriptor.fields).unwrap_or_default(),
        }
    }

    /// `operation (arguments) { selection }`, leaving out the empty parts.
    pub fn render(&self) -> String {
        self.render_with_selection(|selection| format!("{{ {selection} }}"))
    }

    /// Like [`Self::render`], with the braced selection produced by `wrap`.
    pub fn render_with_selection(&self, wrap: impl FnOnce(&str) -> String) -> String {
        let mut out = self.operation.to_string();

        if !self.arguments.is_empty() {
            out.push(' ');
            out.push_str(&self.arguments);
        }

        if !self.selection.is_empty() {
            out.push(' ');
            out.push_str(&wrap(&self.selection));
        }

        out
    }
}

/// Everything an adapter needs besides the operations themselves.
#[derive(Debug)]
pub struct BuildContext<'a> {
    operation_type: OperationType,
    variables: VariableMap,
    config: &'a Config,
}

impl<'a> BuildContext<'a> {
    pub fn new(operation_type: OperationType, variables: VariableMap, config: &'a Config) -> Self {
        BuildContext {
            operation_type,
            variables,
            config,
        }
    }

    pub fn operation_type(&self) -> OperationType {
        self.operation_type
    }

    /// Every variable of the document, in declaration order.
    pub fn variables(&self) -> &VariableMap {
        &self.variables
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    /// `($key: Type, ...)`, empty without variables.
    pub fn variable_definitions(&self) -> String {
        if self.variables.is_empty() {
            return String::new();
        }

        format!(
            "({})",
            self.variables
                .iter()
                .format_with(", ", |(key, variable), f| f(&format_args!("${key}: {}", infer_type(variable))))
        )
    }

    /// Configured named fragments, space separated.
    ///
    /// A fragment selecting nothing cannot be written as valid GraphQL and is rejected.
    pub fn fragment_definitions(&self) -> Result<String, Error> {
        if let Some(fragment) = self
            .config
            .fragments
            .iter()
            .find(|fragment| non_empty_selection(&fragment.fields).is_none())
        {
            return Err(Error::InvalidDescriptor(format!(
                "fragment `{}` on `{}` must select at least one field",
                fragment.name, fragment.on
            )));
        }

        Ok(self.config.fragments.iter().join(" "))
    }

    /// Assembles `<keyword> [name] (<definitions>) { <body> } [fragments]` and finishes it.
    pub fn write_document(&self, name: Option<&str>, body: &str) -> Result<Document, Error> {
        let definitions = self.variable_definitions();
        let fragments = self.fragment_definitions()?;

        let mut query = String::with_capacity(body.len() + definitions.len() + fragments.len() + 32);
        query.push_str(self.operation_type.as_str());

        if let Some(name) = name {
            write!(query, " {name}")?;
        }

        if !definitions.is_empty() {
            write!(query, " {definitions}")?;
        }

        write!(query, " {{ {body} }}")?;

        if !fragments.is_empty() {
            tracing::trace!(count = self.config.fragments.len(), "appending fragment definitions");
            write!(query, " {fragments}")?;
        }

        Ok(self.finish(&query))
    }

    /// Normalizes whitespace of the assembled text and pairs it with the variable values.
    pub fn finish(&self, query: &str) -> Document {
        let variables = self
            .variables
            .iter()
            .map(|(key, variable)| (key.clone(), variable.value.clone()))
            .collect::<Variables>();

        Document {
            query: normalize_whitespace(query),
            variables,
        }
    }
}

/// Collapses every run of whitespace into a single space.
pub fn normalize_whitespace(query: &str) -> String {
    query.split_whitespace().join(" ")
}
