//! Hydrator configuration.
//!
//! Defaults work as-is; overrides come from an optional TOML file and then
//! `IGMEDIA_*` environment variables, e.g.
//!
//! ```text
//! IGMEDIA_URL_BASE=https://www.instagram.com/
//! IGMEDIA_UNKNOWN_VARIANTS=reject
//! IGMEDIA_REQUIRE_CHILD_ACCESSIBILITY_CAPTION=true
//! IGMEDIA_ACCEPT_XDT_TYPE_NAMES=true
//! ```

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Public web origin used to build post links.
pub const DEFAULT_URL_BASE: &str = "https://www.instagram.com/";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "IGMEDIA_";

/// What to do with a `__typename` no conversion path recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownVariantPolicy {
    /// Hydrate it as ordinary media (photo or video by `is_video`)
    #[default]
    Degrade,
    /// Fail the conversion with `HydrateError::UnsupportedVariant`
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydratorConfig {
    /// Base of `Media::link`, must end with `/`
    pub url_base: String,
    pub unknown_variants: UnknownVariantPolicy,
    /// Fail sidecar children that lack `accessibility_caption`
    pub require_child_accessibility_caption: bool,
    /// Read `XDT`-prefixed `__typename`s as their classic names. Off, they
    /// are unknown discriminators and never expand carousel children.
    pub accept_xdt_type_names: bool,
}

impl Default for HydratorConfig {
    fn default() -> Self {
        Self {
            url_base: DEFAULT_URL_BASE.to_string(),
            unknown_variants: UnknownVariantPolicy::default(),
            require_child_accessibility_caption: false,
            accept_xdt_type_names: false,
        }
    }
}

impl HydratorConfig {
    fn figment() -> Figment {
        Figment::from(Serialized::defaults(HydratorConfig::default()))
    }

    /// Defaults overridden by `IGMEDIA_*` environment variables.
    pub fn from_env() -> Result<Self, figment::Error> {
        Self::figment().merge(Env::prefixed(ENV_PREFIX)).extract()
    }

    /// Defaults, then the TOML file at `path` (skipped if missing), then env.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, figment::Error> {
        Self::figment()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
    }

    /// `url_base` + `p/<shortcode>/`.
    pub fn post_link(&self, short_code: &str) -> String {
        if self.url_base.ends_with('/') {
            format!("{}p/{}/", self.url_base, short_code)
        } else {
            format!("{}/p/{}/", self.url_base, short_code)
        }
    }
}
