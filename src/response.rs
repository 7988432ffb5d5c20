//! Locating payload nodes inside whole GraphQL response bodies.

use crate::error::{HydrateError, HydrateResult};
use serde_json::Value;

/// The media node of a shortcode query.
///
/// Current web endpoints answer under `data.xdt_shortcode_media`, older ones
/// under `data.shortcode_media`; the legacy `?__a=1` page wraps it in
/// `graphql.shortcode_media`.
pub fn shortcode_media(body: &Value) -> HydrateResult<&Value> {
    non_null(body.pointer("/data/xdt_shortcode_media"))
        .or_else(|| non_null(body.pointer("/data/shortcode_media")))
        .or_else(|| non_null(body.pointer("/graphql/shortcode_media")))
        .ok_or_else(|| not_found(body, "shortcode media"))
}

/// The user node of a profile query, which holds the feed collections
/// (`edge_owner_to_timeline_media`, `edge_user_to_photos_of_you`).
pub fn profile_user(body: &Value) -> HydrateResult<&Value> {
    non_null(body.pointer("/data/user"))
        .or_else(|| non_null(body.pointer("/graphql/user")))
        .ok_or_else(|| not_found(body, "user"))
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn not_found(body: &Value, what: &str) -> HydrateError {
    // The platform puts the reason for an empty answer in a top-level message
    match body.get("message").and_then(|v| v.as_str()) {
        Some(message) => {
            log::debug!("GraphQL response without {}: {}", what, message);
            HydrateError::NodeNotFound(format!("{}: {}", what, message))
        }
        None => HydrateError::NodeNotFound(what.to_string()),
    }
}
