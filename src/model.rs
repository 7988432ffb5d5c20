//! Hydrated entities.
//!
//! These are the only shapes that leave the crate. Every required field is a
//! plain value; anything the platform may omit is an `Option` or an empty
//! `Vec`, never a sentinel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// Media kind, selected once from `__typename` (and `is_video` when the
/// discriminator is missing or unrecognised).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaVariant {
    Photo,
    Video,
    SidecarRoot,
    SidecarChild,
}

impl MediaVariant {
    /// `__typename` of a carousel container.
    pub const SIDECAR_TYPENAME: &'static str = "GraphSidecar";

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaVariant::Photo => "photo",
            MediaVariant::Video => "video",
            MediaVariant::SidecarRoot => "sidecar_root",
            MediaVariant::SidecarChild => "sidecar_child",
        }
    }

    /// Variant named by a platform `__typename`, if it is a known one.
    /// Matching is exact; see [`MediaVariant::from_xdt_type_name`] for the
    /// prefixed names newer endpoints send.
    pub fn from_type_name(type_name: &str) -> Option<Self> {
        match type_name {
            "GraphImage" => Some(MediaVariant::Photo),
            "GraphVideo" => Some(MediaVariant::Video),
            "GraphSidecar" => Some(MediaVariant::SidecarRoot),
            _ => None,
        }
    }

    /// `XDTGraphImage` and friends, mapped to their classic counterpart.
    pub fn from_xdt_type_name(type_name: &str) -> Option<Self> {
        type_name.strip_prefix("XDT").and_then(Self::from_type_name)
    }

    /// Fallback when the discriminator says nothing useful.
    pub fn from_is_video(is_video: bool) -> Self {
        if is_video {
            MediaVariant::Video
        } else {
            MediaVariant::Photo
        }
    }

    pub fn is_sidecar_root(&self) -> bool {
        matches!(self, MediaVariant::SidecarRoot)
    }
}

impl fmt::Display for MediaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "photo" => Ok(MediaVariant::Photo),
            "video" => Ok(MediaVariant::Video),
            "sidecar_root" => Ok(MediaVariant::SidecarRoot),
            "sidecar_child" => Ok(MediaVariant::SidecarChild),
            _ => Err(format!("Unknown media variant: {}", s)),
        }
    }
}

/// One resolution variant of an image (`thumbnail_resources`,
/// `display_resources`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub src: String,
    pub config_width: u32,
    pub config_height: u32,
}

/// Owner profile embedded in a media detail response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub username: String,
    pub full_name: Option<String>,
    pub profile_pic_url: Option<String>,
    pub is_verified: Option<bool>,
    pub is_private: Option<bool>,
    pub followers_count: Option<i64>,
    pub media_count: Option<i64>,
}

/// Fields shared by every media variant, as found in profile grids and feeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub id: i64,
    pub short_code: String,
    /// Raw `__typename`, kept verbatim when present
    pub type_name: Option<String>,
    pub variant: MediaVariant,
    pub caption: Option<String>,
    pub hashtags: Vec<String>,
    pub height: u32,
    pub width: u32,
    pub thumbnail_src: String,
    pub display_src: String,
    pub date: DateTime<Utc>,
    pub comments_count: i64,
    pub likes_count: i64,
    pub link: String,
    pub thumbnails: Vec<Resource>,
    /// Opaque location record, passed through untouched
    pub location: Option<Value>,
    pub is_video: bool,
    pub video_url: Option<String>,
    pub video_view_count: Option<i64>,
    pub accessibility_caption: Option<String>,
    pub is_igtv: bool,
    pub owner_id: Option<i64>,
}

/// What a single-media detail response adds on top of [`Media`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailedParts {
    pub display_resources: Vec<Resource>,
    pub has_audio: Option<bool>,
    pub tagged_users: Vec<Value>,
    pub profile: Option<Profile>,
    pub side_car_items: Vec<SidecarItem>,
}

impl Media {
    /// Compose a detailed entity from this base value and the detail-only parts.
    pub fn extend(self, parts: DetailedParts) -> MediaDetailed {
        MediaDetailed {
            media: self,
            display_resources: parts.display_resources,
            has_audio: parts.has_audio,
            tagged_users: parts.tagged_users,
            profile: parts.profile,
            side_car_items: parts.side_car_items,
        }
    }
}

/// A media detail page: base fields plus resolutions, tags, owner and, for
/// carousels, the child items in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaDetailed {
    #[serde(flatten)]
    pub media: Media,
    pub display_resources: Vec<Resource>,
    pub has_audio: Option<bool>,
    /// Opaque user records, flattened out of `edges[].node.user`
    pub tagged_users: Vec<Value>,
    pub profile: Option<Profile>,
    pub side_car_items: Vec<SidecarItem>,
}

impl Deref for MediaDetailed {
    type Target = Media;

    fn deref(&self) -> &Media {
        &self.media
    }
}

/// One child of a carousel.
///
/// The platform's child payload has no caption, counters or owner, so this
/// type has no fields for them either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidecarItem {
    pub id: i64,
    pub short_code: String,
    pub type_name: Option<String>,
    pub height: u32,
    pub width: u32,
    pub display_resources: Vec<Resource>,
    pub is_video: bool,
    pub video_view_count: Option<i64>,
    pub video_url: Option<String>,
    pub has_audio: Option<bool>,
    pub accessibility_caption: Option<String>,
}

impl SidecarItem {
    pub fn variant(&self) -> MediaVariant {
        MediaVariant::SidecarChild
    }
}

/// One page of a cursor-paginated media collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaFeed {
    pub has_next_page: bool,
    /// `None` on the last page, where the platform sends `null`
    pub end_cursor: Option<String>,
    /// Total size of the collection when the platform reports it
    pub count: Option<i64>,
    pub medias: Vec<Media>,
}

/// Page of media the user is tagged in.
pub type TaggedMediasFeed = MediaFeed;

/// Page of a profile's own timeline.
pub type TimelineFeed = MediaFeed;
