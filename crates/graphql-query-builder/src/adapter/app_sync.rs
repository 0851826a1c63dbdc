use itertools::Itertools;

use super::{BuildContext, DocumentBuilder, ResolvedOperation};
use crate::{document::Document, error::Error};

/// Wraps every root selection in a `nodes` connection envelope, as AWS AppSync schemas
/// expect, and names the document after the root field:
/// `query Thoughts { thoughts { nodes { id } } }`.
///
/// A configured `operationName` takes precedence over the derived name.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppSyncAdapter;

impl DocumentBuilder for AppSyncAdapter {
    fn build_many(&self, context: &BuildContext<'_>, operations: &[ResolvedOperation<'_>]) -> Result<Document, Error> {
        let body = operations
            .iter()
            .map(|operation| operation.render_with_selection(|selection| format!("{{ nodes {{ {selection} }} }}")))
            .join(" ");

        let name = match &context.config().operation_name {
            Some(name) => name.clone(),
            // the last root field names the document
            None => operations
                .last()
                .map(|operation| capitalize(operation.operation.name()))
                .unwrap_or_default(),
        };

        context.write_document(Some(&name), &body)
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
