//! MediaHydrator: turns raw GraphQL media nodes into typed entities.
//!
//! Three entry points, all pure functions of their input node:
//! - base media (profile grids, feeds): [`MediaHydrator::hydrate_media`]
//! - single-media detail pages, including carousel children:
//!   [`MediaHydrator::hydrate_media_detailed`]
//! - cursor-paginated media pages: [`MediaHydrator::hydrate_media_feed`] and
//!   the tagged/timeline shortcuts
//!
//! Any missing required field aborts the call with a [`HydrateError`] that
//! names the field path; nothing partially built is returned.

use crate::config::{HydratorConfig, UnknownVariantPolicy};
use crate::error::{HydrateError, HydrateResult, NodeContext};
use crate::hashtags::build_hashtags;
use crate::model::{
    DetailedParts, Media, MediaDetailed, MediaFeed, MediaVariant, Resource, SidecarItem, TaggedMediasFeed,
    TimelineFeed,
};
use crate::node::NodeReader;
use crate::profile::{OwnerProfileHydrator, ProfileHydrator};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::Arc;

/// Collection key of the "photos of you" feed on a user node.
pub const TAGGED_MEDIAS_EDGE: &str = "edge_user_to_photos_of_you";

/// Collection key of a profile's own posts on a user node.
pub const TIMELINE_MEDIAS_EDGE: &str = "edge_owner_to_timeline_media";

/// `product_type` value marking IGTV uploads.
const IGTV_PRODUCT_TYPE: &str = "igtv";

static DEFAULT_HYDRATOR: Lazy<MediaHydrator> = Lazy::new(MediaHydrator::default);

/// Hydrate base media with the default configuration.
pub fn convert_base(node: &Value) -> HydrateResult<Media> {
    DEFAULT_HYDRATOR.hydrate_media(node)
}

/// Hydrate a media detail node with the default configuration.
pub fn convert_detailed(node: &Value) -> HydrateResult<MediaDetailed> {
    DEFAULT_HYDRATOR.hydrate_media_detailed(node)
}

/// Hydrate the tagged-medias page of a user node with the default configuration.
pub fn convert_tagged_feed(node: &Value) -> HydrateResult<TaggedMediasFeed> {
    DEFAULT_HYDRATOR.hydrate_tagged_medias(node)
}

/// Hydrate the timeline page of a user node with the default configuration.
pub fn convert_timeline_feed(node: &Value) -> HydrateResult<TimelineFeed> {
    DEFAULT_HYDRATOR.hydrate_timeline(node)
}

/// Stateless converter; safe to share across threads.
#[derive(Clone)]
pub struct MediaHydrator {
    config: HydratorConfig,
    profiles: Arc<dyn ProfileHydrator>,
}

impl Default for MediaHydrator {
    fn default() -> Self {
        Self::new(HydratorConfig::default())
    }
}

impl std::fmt::Debug for MediaHydrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaHydrator").field("config", &self.config).finish_non_exhaustive()
    }
}

impl MediaHydrator {
    pub fn new(config: HydratorConfig) -> Self {
        Self {
            config,
            profiles: Arc::new(OwnerProfileHydrator),
        }
    }

    /// Use a different owner-profile collaborator for detail responses.
    pub fn with_profile_hydrator(mut self, profiles: Arc<dyn ProfileHydrator>) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn config(&self) -> &HydratorConfig {
        &self.config
    }

    /// Fields common to every media variant.
    ///
    /// Requires `id`, `shortcode`, `dimensions`, `display_url`,
    /// `taken_at_timestamp`, `edge_media_preview_like`, `is_video` and one of
    /// the two comment counters.
    pub fn hydrate_media(&self, node: &Value) -> HydrateResult<Media> {
        let reader = NodeReader::root(node)?;
        let (media, _) = self.base_media(&reader)?;
        Ok(media)
    }

    /// Base fields plus display resources, audio flag, tagged users, owner
    /// profile and carousel children.
    pub fn hydrate_media_detailed(&self, node: &Value) -> HydrateResult<MediaDetailed> {
        let reader = NodeReader::root(node)?;
        let (media, reader) = self.base_media(&reader)?;
        let parts = self.detailed_parts(&media, &reader)?;
        Ok(media.extend(parts))
    }

    /// `edge_user_to_photos_of_you` page of a user node.
    pub fn hydrate_tagged_medias(&self, node: &Value) -> HydrateResult<TaggedMediasFeed> {
        self.hydrate_media_feed(node, TAGGED_MEDIAS_EDGE)
    }

    /// `edge_owner_to_timeline_media` page of a user node.
    pub fn hydrate_timeline(&self, node: &Value) -> HydrateResult<TimelineFeed> {
        self.hydrate_media_feed(node, TIMELINE_MEDIAS_EDGE)
    }

    /// Any `{ page_info, edges, count? }` media collection stored under
    /// `edge_key` on `node`. Each edge gets base hydration, in source order.
    pub fn hydrate_media_feed(&self, node: &Value, edge_key: &str) -> HydrateResult<MediaFeed> {
        let root = NodeReader::root(node)?;
        let collection = root.child(edge_key)?;

        let page_info = collection.child("page_info")?;
        let has_next_page = page_info.required_bool("has_next_page")?;
        // The last page sends `end_cursor: null`; only a missing key is an error
        if !page_info.has_key("end_cursor") {
            return Err(page_info.missing("end_cursor"));
        }
        let end_cursor = page_info.optional_str("end_cursor")?.map(String::from);
        let count = collection.optional_i64("count")?;

        let medias = root
            .edge_nodes(edge_key, "medias", true)?
            .iter()
            .map(|item| self.base_media(item).map(|(media, _)| media))
            .collect::<HydrateResult<Vec<_>>>()?;

        log::debug!(
            "Hydrated {} page: {} medias, has_next_page={}",
            edge_key,
            medias.len(),
            has_next_page
        );

        Ok(MediaFeed {
            has_next_page,
            end_cursor,
            count,
            medias,
        })
    }

    /// Returns the media together with a reader whose error context is the
    /// media id, for the detail pass to reuse.
    fn base_media<'a>(&self, node: &NodeReader<'a>) -> HydrateResult<(Media, NodeReader<'a>)> {
        let node = node.clone().identified();
        let id = node.required_i64("id")?;
        let node = node.with_context(NodeContext::Media(id));

        let short_code = node.required_str("shortcode")?.to_string();
        let type_name = node.optional_str("__typename")?;
        let is_video = node.required_bool("is_video")?;
        let variant = self.select_variant(type_name, is_video, &node)?;

        log::debug!("Hydrating media {} ({})", short_code, variant);

        let caption = match node.edge_nodes("edge_media_to_caption", "caption", false)?.first() {
            Some(edge) => Some(edge.required_str("text")?.to_string()),
            None => None,
        };
        let hashtags = caption.as_deref().map(build_hashtags).unwrap_or_default();

        let dimensions = node.child("dimensions")?;
        let height = dimensions.required_u32("height")?;
        let width = dimensions.required_u32("width")?;

        let display_src = node.required_str("display_url")?.to_string();
        let thumbnail_src = match node.optional_str("thumbnail_src")? {
            Some(src) => src.to_string(),
            None => display_src.clone(),
        };

        let date = timestamp(&node, "taken_at_timestamp")?;

        // Detail views count all comments, list views only top-level ones
        let comments_count = if node.has("edge_media_to_comment") {
            node.required_count("edge_media_to_comment")?
        } else if node.has("edge_media_to_parent_comment") {
            node.required_count("edge_media_to_parent_comment")?
        } else {
            return Err(node.missing("edge_media_to_comment|edge_media_to_parent_comment"));
        };
        let likes_count = node.required_count("edge_media_preview_like")?;

        let thumbnails = resources(&node, "thumbnail_resources", false)?;

        let is_igtv = node.optional_str("product_type")? == Some(IGTV_PRODUCT_TYPE);
        let owner_id = match node.optional_child("owner")? {
            Some(owner) => Some(owner.required_i64("id")?),
            None => None,
        };

        let media = Media {
            id,
            link: self.config.post_link(&short_code),
            short_code,
            type_name: type_name.map(String::from),
            variant,
            caption,
            hashtags,
            height,
            width,
            thumbnail_src,
            display_src,
            date,
            comments_count,
            likes_count,
            thumbnails,
            location: node.get("location").cloned(),
            is_video,
            video_url: node.optional_str("video_url")?.map(String::from),
            video_view_count: node.optional_i64("video_view_count")?,
            accessibility_caption: node.optional_str("accessibility_caption")?.map(String::from),
            is_igtv,
            owner_id,
        };

        Ok((media, node))
    }

    fn select_variant(
        &self,
        type_name: Option<&str>,
        is_video: bool,
        node: &NodeReader<'_>,
    ) -> HydrateResult<MediaVariant> {
        let Some(type_name) = type_name else {
            return Ok(MediaVariant::from_is_video(is_video));
        };
        let known = match MediaVariant::from_type_name(type_name) {
            Some(variant) => Some(variant),
            None if self.config.accept_xdt_type_names => MediaVariant::from_xdt_type_name(type_name),
            None => None,
        };
        if let Some(variant) = known {
            return Ok(variant);
        }

        match self.config.unknown_variants {
            UnknownVariantPolicy::Degrade => {
                log::warn!(
                    "Unknown __typename {} on {}, hydrating as ordinary media",
                    type_name,
                    node.context()
                );
                Ok(MediaVariant::from_is_video(is_video))
            }
            UnknownVariantPolicy::Reject => Err(HydrateError::UnsupportedVariant {
                type_name: type_name.to_string(),
                context: node.context().clone(),
            }),
        }
    }

    fn detailed_parts(&self, media: &Media, node: &NodeReader<'_>) -> HydrateResult<DetailedParts> {
        let display_resources = resources(node, "display_resources", true)?;

        // has_audio only ships alongside video_url, and always does
        let has_audio = if node.has("video_url") {
            Some(node.required_bool("has_audio")?)
        } else {
            None
        };

        let tagged_users = node
            .edge_nodes("edge_media_to_tagged_user", "tagged_users", false)?
            .iter()
            .map(|edge| edge.required("user").cloned())
            .collect::<HydrateResult<Vec<_>>>()?;

        let profile = match node.optional_child("owner")? {
            Some(owner) => Some(self.profiles.hydrate(&owner)?),
            None => None,
        };

        let side_car_items = if media.variant.is_sidecar_root() {
            self.sidecar_items(node)?
        } else {
            Vec::new()
        };

        Ok(DetailedParts {
            display_resources,
            has_audio,
            tagged_users,
            profile,
            side_car_items,
        })
    }

    fn sidecar_items(&self, node: &NodeReader<'_>) -> HydrateResult<Vec<SidecarItem>> {
        let children = node.edge_nodes("edge_sidecar_to_children", "side_car_items", true)?;
        if children.is_empty() {
            return Err(node.missing("side_car_items[0]"));
        }

        log::debug!("Expanding sidecar on {}: {} children", node.context(), children.len());

        children.iter().map(|child| self.sidecar_item(child)).collect()
    }

    /// Carousel child: only the fields the platform sends for children.
    fn sidecar_item(&self, child: &NodeReader<'_>) -> HydrateResult<SidecarItem> {
        let dimensions = child.child("dimensions")?;
        let video_url = child.optional_str("video_url")?.map(String::from);
        let has_audio = if video_url.is_some() {
            Some(child.required_bool("has_audio")?)
        } else {
            None
        };
        let accessibility_caption = if self.config.require_child_accessibility_caption {
            Some(child.required_str("accessibility_caption")?.to_string())
        } else {
            child.optional_str("accessibility_caption")?.map(String::from)
        };

        Ok(SidecarItem {
            id: child.required_i64("id")?,
            short_code: child.required_str("shortcode")?.to_string(),
            type_name: child.optional_str("__typename")?.map(String::from),
            height: dimensions.required_u32("height")?,
            width: dimensions.required_u32("width")?,
            display_resources: resources(child, "display_resources", true)?,
            is_video: child.required_bool("is_video")?,
            video_view_count: child.optional_i64("video_view_count")?,
            video_url,
            has_audio,
            accessibility_caption,
        })
    }
}

/// Resolution variants stored under `key`; an absent optional list is empty.
fn resources(node: &NodeReader<'_>, key: &str, required: bool) -> HydrateResult<Vec<Resource>> {
    let items = if required {
        node.required_array(key)?
    } else {
        node.optional_array(key)?.unwrap_or_default()
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let path = node.field_path(&format!("{}[{}]", key, index));
            let entry = NodeReader::at(item, path, node.context().clone())?;
            Ok(Resource {
                src: entry.required_str("src")?.to_string(),
                config_width: entry.required_u32("config_width")?,
                config_height: entry.required_u32("config_height")?,
            })
        })
        .collect()
}

/// Unix epoch seconds, interpreted as UTC.
fn timestamp(node: &NodeReader<'_>, key: &str) -> HydrateResult<DateTime<Utc>> {
    let seconds = node.required_i64(key)?;
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| HydrateError::TypeCoercion {
        path: node.field_path(key),
        expected: "unix timestamp",
        found: format!("number {}", seconds),
        context: node.context().clone(),
    })
}
