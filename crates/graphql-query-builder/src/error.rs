/// Errors raised while describing or building a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An operation field with nothing to render besides its name.
    #[error("operation `{operation}` must have variables, fields, namedFragment, or inlineFragment properties")]
    MalformedField { operation: String },
    /// An inline fragment without a selection.
    #[error("inline fragment on `{operation}` must have a fields property")]
    MalformedInlineFragment { operation: String },
    /// A JSON descriptor that does not have any of the recognized shapes.
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(String),
    /// A descriptor field failed to decode, carrying the message of the failing part.
    #[error(transparent)]
    Deserialize(#[from] serde_json::Error),
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
}
