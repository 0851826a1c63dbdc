//! Generates GraphQL documents from declarative operation descriptors.
//!
//! A descriptor names a root field, its variables and its selection. The builder renders
//! the document text, declares every variable used anywhere in the selection with an
//! inferred type, and returns the variable values ready to be sent next to it.
//!
//! [`build_query`], [`build_mutation`] and [`build_subscription`] take one
//! [`OperationDescriptor`] or a list of them. Descriptors are either built in Rust or
//! deserialized from the JSON shape used by JavaScript query builders.
#![cfg_attr(test, allow(unused_crate_dependencies))]

mod adapter;
mod collect;
mod config;
mod document;
mod error;
mod field;
mod infer;
mod json;
mod render;
mod variable;

pub use adapter::{
    normalize_whitespace, AppSyncAdapter, BuildContext, DefaultAdapter, DocumentBuilder, OperationType,
    ResolvedOperation,
};
pub use config::{Config, FragmentDefinition};
pub use document::{Document, Variables};
pub use error::Error;
pub use field::{Field, InlineFragment, NestedOperation, OperationDescriptor, OperationName, Operations};
pub use infer::infer_type;
pub use render::{render_fields, render_nested_operation};
pub use variable::{ListWrapping, Variable, VariableMap, VariableType};

/// Builds a `query` document. Without an adapter the [`DefaultAdapter`] is used.
pub fn build_query(
    operations: impl Into<Operations>,
    adapter: Option<&dyn DocumentBuilder>,
    config: Option<&Config>,
) -> Result<Document, Error> {
    build(OperationType::Query, operations.into(), adapter, config)
}

/// Builds a `mutation` document. Without an adapter the [`DefaultAdapter`] is used.
pub fn build_mutation(
    operations: impl Into<Operations>,
    adapter: Option<&dyn DocumentBuilder>,
    config: Option<&Config>,
) -> Result<Document, Error> {
    build(OperationType::Mutation, operations.into(), adapter, config)
}

/// Builds a `subscription` document. Without an adapter the [`DefaultAdapter`] is used.
pub fn build_subscription(
    operations: impl Into<Operations>,
    adapter: Option<&dyn DocumentBuilder>,
) -> Result<Document, Error> {
    build(OperationType::Subscription, operations.into(), adapter, None)
}

fn build(
    operation_type: OperationType,
    operations: Operations,
    adapter: Option<&dyn DocumentBuilder>,
    config: Option<&Config>,
) -> Result<Document, Error> {
    let default_config = Config::default();
    let config = config.unwrap_or(&default_config);
    let adapter = adapter.unwrap_or(&DefaultAdapter);

    let (document, root_fields) = match &operations {
        Operations::One(descriptor) => {
            let context = BuildContext::new(operation_type, collect::collect_one(descriptor), config);
            let document = adapter.build_one(&context, &ResolvedOperation::new(descriptor))?;
            (document, 1)
        }
        Operations::Many(descriptors) => {
            let context = BuildContext::new(operation_type, collect::collect_many(descriptors), config);
            let resolved = descriptors.iter().map(ResolvedOperation::new).collect::<Vec<_>>();
            let document = adapter.build_many(&context, &resolved)?;
            (document, descriptors.len())
        }
    };

    tracing::debug!(
        %operation_type,
        root_fields,
        variables = document.variables.len(),
        "built GraphQL document"
    );

    Ok(document)
}
