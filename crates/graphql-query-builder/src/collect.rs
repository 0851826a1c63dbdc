//! Gathers every variable referenced by a selection tree into one declaration map.
//!
//! Merges behave like inserting into the accumulated map: a key keeps the position it was
//! first seen at and takes the value of the last source declaring it.

use crate::{
    field::{Field, OperationDescriptor},
    variable::VariableMap,
};

/// Variables declared by a single root operation, nested ones first.
pub(crate) fn collect_one(operation: &OperationDescriptor) -> VariableMap {
    let mut variables = nested_variables(&operation.fields);
    variables.extend(operation.variables.clone());

    tracing::trace!(count = variables.len(), "collected operation variables");
    variables
}

/// Variables declared by a list of root operations. Later operations win on identical keys.
pub(crate) fn collect_many(operations: &[OperationDescriptor]) -> VariableMap {
    let mut resolved = VariableMap::new();
    for operation in operations {
        resolved.extend(operation.variables.clone());
        resolved.extend(nested_variables(&operation.fields));
    }

    let mut variables = operations
        .last()
        .map(|operation| nested_variables(&operation.fields))
        .unwrap_or_default();
    variables.extend(resolved);

    tracing::trace!(
        count = variables.len(),
        operations = operations.len(),
        "collected operation variables"
    );
    variables
}

/// Variables declared by nested operations anywhere below `fields`.
pub(crate) fn nested_variables(fields: &[Field]) -> VariableMap {
    let mut variables = VariableMap::new();
    collect_deepest(fields, &mut variables);
    variables
}

fn collect_deepest(fields: &[Field], variables: &mut VariableMap) {
    for field in fields {
        match field {
            Field::Operation(operation) => {
                let mut merged = operation.variables().clone();
                merged.extend(variables.iter().map(|(key, variable)| (key.clone(), variable.clone())));

                // The sub-selection continues from the current accumulator, so its result
                // already holds every key seen so far.
                collect_deepest(operation.fields(), variables);
                merged.extend(variables.drain(..));

                *variables = merged;
            }
            Field::Group(group) => {
                for fields in group.values() {
                    collect_deepest(fields, variables);
                }
            }
            Field::InlineFragment(fragment) => {
                // same merge as a nested operation without variables of its own
                let mut merged = variables.clone();
                collect_deepest(fragment.fields(), variables);
                merged.extend(variables.drain(..));

                *variables = merged;
            }
            Field::Leaf(_) | Field::FragmentSpread(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::{field::NestedOperation, variable::Variable};

    fn keys(variables: &VariableMap) -> String {
        variables.keys().join(", ")
    }

    #[test]
    fn nested_before_own() {
        let operation = OperationDescriptor::new("getPublicationNames")
            .variable("id", Variable::new(12).with_type("ID"))
            .field(
                NestedOperation::with_fields("publication", ["name".into()])
                    .variable("input", Variable::new(1).with_type("FilterInput")),
            );

        assert_eq!(keys(&collect_one(&operation)), "input, id");
    }

    #[test]
    fn walks_groups_and_inline_fragments() {
        let fields = vec![
            Field::group([(
                "edges",
                vec![Field::from(NestedOperation::with_variables("rights", [("rightsLimit", 999)]))],
            )]),
            Field::inline_fragment(
                "User",
                [NestedOperation::with_variables("friends", [("first", 10)]).into()],
            ),
        ];

        assert_eq!(keys(&nested_variables(&fields)), "rightsLimit, first");
    }

    #[test]
    fn inline_fragments_keep_earlier_declarations_first() {
        let fields = vec![
            NestedOperation::with_variables("rights", [("rightsLimit", 999)]).into(),
            Field::inline_fragment(
                "User",
                [
                    "id".into(),
                    NestedOperation::with_fields("friends", ["id".into()])
                        .variable("first", 10)
                        .into(),
                ],
            ),
        ];

        assert_eq!(keys(&nested_variables(&fields)), "rightsLimit, first");
    }

    #[test]
    fn earlier_siblings_stay_behind_later_declarations() {
        let fields = vec![
            NestedOperation::with_fields("platforms", [])
                .variable("visible", true)
                .field(Field::group([(
                    "edges",
                    vec![NestedOperation::with_variables("rights", [("idChannel", Variable::undefined())]).into()],
                )]))
                .field(
                    NestedOperation::with_variables("channels", [("idChannel", Variable::undefined().named("id"))])
                        .variable("channelLimit", 999),
                )
                .into(),
        ];

        let variables = nested_variables(&fields);

        assert_eq!(keys(&variables), "visible, idChannel, channelLimit");
        // the accumulated declaration is merged last and wins
        assert_eq!(variables["idChannel"].name, None);
    }

    #[test]
    fn many_puts_last_nested_variables_first() {
        let operations = [
            OperationDescriptor::new("namespaceField")
                .field(NestedOperation::with_fields("mutationA", ["id".into()]).variable("nameA", "A")),
            OperationDescriptor::new("namespaceField")
                .field(NestedOperation::with_fields("mutationB", ["id".into()]).variable("nameB", "B")),
        ];

        assert_eq!(keys(&collect_many(&operations)), "nameB, nameA");
    }

    #[test]
    fn later_operation_wins() {
        let operations = [
            OperationDescriptor::new("thoughtCreate").variable("name", "Tyrion"),
            OperationDescriptor::new("prayerCreate").variable("name", Variable::new("Tyrion").required()),
        ];

        let variables = collect_many(&operations);

        assert_eq!(keys(&variables), "name");
        assert!(variables["name"].required);
    }
}
