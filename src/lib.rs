//! igmedia - Hydration of Instagram GraphQL media nodes into typed entities
//!
//! Raw nodes from the platform's internal API are loosely typed: photos,
//! videos, carousels and carousel children each carry a different subset of
//! fields. This crate reads them through one accessor layer and produces
//! `Media`, `MediaDetailed` and feed entities whose required fields are
//! always populated.
//!
//! # Module Structure
//!
//! - `node`: presence checks, type coercion and field paths over raw nodes
//! - `model`: hydrated entities and the media variant tag
//! - `hydrator`: base, detailed, carousel and feed conversion
//! - `profile`: owner profile collaborator
//! - `response`: locating payload nodes in full GraphQL responses
//! - `hashtags`: caption hashtag extraction
//! - `config`: hydrator configuration
//! - `error`: error taxonomy
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//!
//! let node = json!({
//!     "id": "2045",
//!     "shortcode": "BxYz",
//!     "__typename": "GraphImage",
//!     "dimensions": {"height": 1080, "width": 1080},
//!     "display_url": "https://cdn.test/full.jpg",
//!     "taken_at_timestamp": 1_600_000_000,
//!     "edge_media_to_caption": {"edges": [{"node": {"text": "Great day! #sun"}}]},
//!     "edge_media_to_parent_comment": {"count": 3},
//!     "edge_media_preview_like": {"count": 10},
//!     "is_video": false
//! });
//!
//! let media = igmedia::convert_base(&node).unwrap();
//! assert_eq!(media.id, 2045);
//! assert_eq!(media.hashtags, vec!["#sun"]);
//! assert_eq!(media.thumbnail_src, media.display_src);
//! ```

pub mod config;
pub mod error;
pub mod hashtags;
pub mod hydrator;
pub mod model;
pub mod node;
pub mod profile;
pub mod response;

// Re-export commonly used types for convenience
pub use config::{HydratorConfig, UnknownVariantPolicy};
pub use error::{HydrateError, HydrateResult, NodeContext};
pub use hydrator::{convert_base, convert_detailed, convert_tagged_feed, convert_timeline_feed, MediaHydrator};
pub use model::{
    Media, MediaDetailed, MediaFeed, MediaVariant, Profile, Resource, SidecarItem, TaggedMediasFeed, TimelineFeed,
};
pub use profile::{OwnerProfileHydrator, ProfileHydrator};
