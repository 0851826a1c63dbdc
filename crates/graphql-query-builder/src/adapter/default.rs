use itertools::Itertools;

use super::{BuildContext, DocumentBuilder, ResolvedOperation};
use crate::{document::Document, error::Error};

/// Plain selection sets: `query [name] ($id: Int) { thought (id: $id) { id } }`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAdapter;

impl DocumentBuilder for DefaultAdapter {
    fn build_many(&self, context: &BuildContext<'_>, operations: &[ResolvedOperation<'_>]) -> Result<Document, Error> {
        let body = operations.iter().map(ResolvedOperation::render).join(" ");

        context.write_document(context.config().operation_name.as_deref(), &body)
    }
}
