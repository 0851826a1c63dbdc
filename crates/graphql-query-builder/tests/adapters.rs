#![allow(unused_crate_dependencies)]

use graphql_query_builder::{
    build_mutation, build_query, BuildContext, Config, Document, DocumentBuilder, Error, OperationDescriptor,
    ResolvedOperation, Variable,
};

/// Prefixes every root field with a namespace and names the document after the root count.
struct Namespaced(&'static str);

impl DocumentBuilder for Namespaced {
    fn build_many(&self, context: &BuildContext<'_>, operations: &[ResolvedOperation<'_>]) -> Result<Document, Error> {
        let body = operations
            .iter()
            .map(|operation| format!("{}_{}", self.0, operation.render()))
            .collect::<Vec<_>>()
            .join("\n");

        let name = format!("Batch{}", operations.len());
        context.write_document(Some(&name), &body)
    }
}

/// Ignores the shared assembly and only keeps the first root field.
struct FirstOnly;

impl DocumentBuilder for FirstOnly {
    fn build_one(&self, context: &BuildContext<'_>, operation: &ResolvedOperation<'_>) -> Result<Document, Error> {
        Ok(context.finish(&format!(
            "{}   {} {{\n  {}\n}}",
            context.operation_type(),
            context.variable_definitions(),
            operation.render()
        )))
    }

    fn build_many(&self, context: &BuildContext<'_>, operations: &[ResolvedOperation<'_>]) -> Result<Document, Error> {
        match operations.first() {
            Some(operation) => self.build_one(context, operation),
            None => Ok(context.finish(context.operation_type().as_str())),
        }
    }
}

#[test]
fn custom_adapter_receives_rendered_operations() {
    let document = build_query(
        [
            OperationDescriptor::new("users").fields(["id"]),
            OperationDescriptor::new("posts").variable("first", 10).fields(["title"]),
        ],
        Some(&Namespaced("admin")),
        None,
    )
    .unwrap();

    insta::assert_snapshot!(document.query, @"query Batch2 ($first: Int) { admin_users { id } admin_posts (first: $first) { title } }");
    assert_eq!(document.variables.get("first"), Some(&serde_json::json!(10)));
}

#[test]
fn custom_adapter_output_is_normalized() {
    let descriptor = OperationDescriptor::new("userSignup")
        .variable("email", Variable::new("jon.doe@example.com").required())
        .field("userId");
    let document = build_mutation(descriptor, Some(&FirstOnly), Some(&Config::default())).unwrap();

    insta::assert_snapshot!(document.query, @"mutation ($email: String!) { userSignup (email: $email) { userId } }");
}

#[test]
fn variables_of_dropped_operations_stay_declared() {
    let document = build_query(
        vec![
            OperationDescriptor::new("me").field("id"),
            OperationDescriptor::new("user").variable("id", Variable::new("42").with_type("ID")).field("name"),
        ],
        Some(&FirstOnly),
        None,
    )
    .unwrap();

    insta::assert_snapshot!(document.query, @"query ($id: ID) { me { id } }");
    assert_eq!(document.variables.keys().collect::<Vec<_>>(), ["id"]);
}
