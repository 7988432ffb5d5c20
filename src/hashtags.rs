//! Hashtag extraction from captions.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches `#tag` where the tag is a run of word characters (Unicode aware)
/// and the `#` does not sit inside another word, so `a#b` yields nothing.
static HASHTAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|[^\w#])(#\w+)").unwrap());

/// Hashtags of a caption in order of appearance, `#` included.
///
/// Case and duplicates are kept as written: `"Great day! #sun #fun #sun"`
/// gives `["#sun", "#fun", "#sun"]`.
pub fn build_hashtags(text: &str) -> Vec<String> {
    HASHTAG_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
