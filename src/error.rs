use std::fmt;
use thiserror::Error;

/// Which node an error happened in.
///
/// The media id is preferred once it has been read; before that the raw
/// shortcode is tried, then the raw `id` of nodes without one (user nodes
/// holding a feed), so that errors on the very first fields still point at
/// something recognisable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeContext {
    Media(i64),
    Shortcode(String),
    /// Raw, unparsed `id` of a node that has no shortcode
    Id(String),
    Unknown,
}

impl fmt::Display for NodeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeContext::Media(id) => write!(f, "media {}", id),
            NodeContext::Shortcode(code) => write!(f, "shortcode {}", code),
            NodeContext::Id(id) => write!(f, "node {}", id),
            NodeContext::Unknown => f.write_str("unknown node"),
        }
    }
}

/// Errors produced while hydrating raw platform nodes.
///
/// Every variant aborts the whole conversion call; no partially built
/// entity is ever handed back alongside one of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HydrateError {
    /// A field the entity cannot exist without is absent from the node
    #[error("Missing required field `{path}` ({context})")]
    MissingField { path: String, context: NodeContext },

    /// A present field holds a value that cannot become the target type
    #[error("Field `{path}` expected {expected}, found {found} ({context})")]
    TypeCoercion {
        path: String,
        expected: &'static str,
        found: String,
        context: NodeContext,
    },

    /// `__typename` carries a value no conversion path knows about
    #[error("Unsupported media type `{type_name}` ({context})")]
    UnsupportedVariant { type_name: String, context: NodeContext },

    /// A GraphQL response body has none of the expected payload roots
    #[error("Node not found in response: {0}")]
    NodeNotFound(String),
}

/// Type alias for Result with HydrateError
pub type HydrateResult<T> = Result<T, HydrateError>;

impl HydrateError {
    /// Returns category for metrics
    pub fn category(&self) -> &'static str {
        match self {
            HydrateError::MissingField { .. } => "missing_field",
            HydrateError::TypeCoercion { .. } => "type_coercion",
            HydrateError::UnsupportedVariant { .. } => "unsupported_variant",
            HydrateError::NodeNotFound(_) => "node_not_found",
        }
    }

    /// Field path the error refers to, if it is about a single field.
    pub fn path(&self) -> Option<&str> {
        match self {
            HydrateError::MissingField { path, .. } | HydrateError::TypeCoercion { path, .. } => Some(path),
            HydrateError::UnsupportedVariant { .. } | HydrateError::NodeNotFound(_) => None,
        }
    }
}
