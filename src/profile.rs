//! Owner profile hydration.
//!
//! Detail responses embed the post owner as an `owner` record. Turning it
//! into a [`Profile`] is delegated through [`ProfileHydrator`] so callers with
//! richer profile sources can plug their own in.

use crate::error::HydrateResult;
use crate::model::Profile;
use crate::node::NodeReader;

/// Builds a [`Profile`] from an owner node, tolerating the same optional
/// fields as media hydration.
pub trait ProfileHydrator: Send + Sync {
    fn hydrate(&self, owner: &NodeReader<'_>) -> HydrateResult<Profile>;
}

/// Reads the fields the platform embeds in a media `owner` record.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnerProfileHydrator;

impl ProfileHydrator for OwnerProfileHydrator {
    fn hydrate(&self, owner: &NodeReader<'_>) -> HydrateResult<Profile> {
        let followers_count = match owner.optional_child("edge_followed_by")? {
            Some(edge) => edge.optional_i64("count")?,
            None => None,
        };
        let media_count = match owner.optional_child("edge_owner_to_timeline_media")? {
            Some(edge) => edge.optional_i64("count")?,
            None => None,
        };

        Ok(Profile {
            id: owner.required_i64("id")?,
            username: owner.required_str("username")?.to_string(),
            full_name: owner.optional_str("full_name")?.map(String::from),
            profile_pic_url: owner.optional_str("profile_pic_url")?.map(String::from),
            is_verified: owner.optional_bool("is_verified")?,
            is_private: owner.optional_bool("is_private")?,
            followers_count,
            media_count,
        })
    }
}
