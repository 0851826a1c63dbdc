//! Selection set rendering.
//!
//! Tokens are separated by single spaces. Empty sub-selections and argument lists are left
//! out entirely, so no `{ }` or `()` is ever produced for a field.

use std::fmt::{self, Display, Write};

use itertools::Itertools;

use crate::{
    field::{Field, InlineFragment, NestedOperation},
    variable::VariableMap,
};

/// Renders the content of a selection set, without the surrounding braces.
pub fn render_fields(fields: &[Field]) -> String {
    SelectionSet(fields).to_string()
}

/// Renders a field invoked with arguments, e.g. `publication (id: $id) { id name }`.
pub fn render_nested_operation(operation: &NestedOperation) -> String {
    operation.to_string()
}

/// Rendered content of a selection set, `None` when none of its fields renders anything.
pub(crate) fn non_empty_selection(fields: &[Field]) -> Option<String> {
    let selection = SelectionSet(fields).to_string();

    (!selection.trim().is_empty()).then_some(selection)
}

/// Space separated fields of a selection set.
pub struct SelectionSet<'a>(pub &'a [Field]);

impl Display for SelectionSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().format(" "))
    }
}

/// `(argument: $key, ...)`, or nothing without variables.
pub struct Arguments<'a>(pub &'a VariableMap);

impl Display for Arguments<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }

        write!(
            f,
            "({})",
            self.0.iter().format_with(", ", |(key, variable), f| {
                f(&format_args!("{}: ${key}", variable.argument_name(key)))
            })
        )
    }
}

/// ` { fields }`, with the leading space, or nothing when the selection renders empty.
pub(crate) struct SubSelection<'a>(pub &'a [Field]);

impl Display for SubSelection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match non_empty_selection(self.0) {
            Some(selection) => write!(f, " {{ {selection} }}"),
            None => Ok(()),
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Leaf(name) => f.write_str(name),
            Field::Group(group) => write!(
                f,
                "{}",
                group
                    .iter()
                    .format_with(" ", |(key, fields), f| f(&format_args!("{key}{}", SubSelection(fields))))
            ),
            Field::Operation(operation) => operation.fmt(f),
            Field::InlineFragment(fragment) => fragment.fmt(f),
            Field::FragmentSpread(name) => write!(f, "...{name}"),
        }
    }
}

impl Display for NestedOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operation())?;

        if !self.variables().is_empty() {
            f.write_char(' ')?;
            Arguments(self.variables()).fmt(f)?;
        }

        SubSelection(self.fields()).fmt(f)
    }
}

impl Display for InlineFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "... on {}{}", self.type_condition(), SubSelection(self.fields()))
    }
}
