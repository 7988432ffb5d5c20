//! Raw node fixtures shaped like real GraphQL payloads
//!
//! One builder per media shape: photo, video, sidecar root, sidecar child,
//! plus a user node holding a tagged-medias page.

#![allow(dead_code)]

use serde_json::{json, Value};

pub const TAKEN_AT: i64 = 1_600_000_000;

pub fn resources(base: &str) -> Value {
    json!([
        {"src": format!("{}/640.jpg", base), "config_width": 640, "config_height": 800},
        {"src": format!("{}/1080.jpg", base), "config_width": 1080, "config_height": 1350}
    ])
}

/// Photo as it appears in a profile grid or feed page.
pub fn photo_node(id: &str, shortcode: &str) -> Value {
    json!({
        "__typename": "GraphImage",
        "id": id,
        "shortcode": shortcode,
        "dimensions": {"height": 1350, "width": 1080},
        "display_url": format!("https://cdn.test/{}/display.jpg", shortcode),
        "thumbnail_src": format!("https://cdn.test/{}/thumb.jpg", shortcode),
        "thumbnail_resources": resources(&format!("https://cdn.test/{}/thumb", shortcode)),
        "taken_at_timestamp": TAKEN_AT,
        "edge_media_to_caption": {"edges": [{"node": {"text": "Great day! #sun #fun #sun"}}]},
        "edge_media_to_parent_comment": {"count": 4},
        "edge_media_preview_like": {"count": 120},
        "accessibility_caption": "Photo by someone.",
        "is_video": false,
        "owner": {"id": "25025320"}
    })
}

/// Video detail page, including the detail-only fields.
pub fn video_detail_node() -> Value {
    json!({
        "__typename": "GraphVideo",
        "id": "3000000000000000001",
        "shortcode": "CVid01",
        "dimensions": {"height": 1920, "width": 1080},
        "display_url": "https://cdn.test/CVid01/display.jpg",
        "display_resources": resources("https://cdn.test/CVid01/display"),
        "taken_at_timestamp": TAKEN_AT,
        "edge_media_to_caption": {"edges": []},
        "edge_media_to_comment": {"count": 9},
        "edge_media_preview_like": {"count": 77},
        "edge_media_to_tagged_user": {"edges": [
            {"node": {"user": {"username": "alice", "id": "1"}, "x": 0.5, "y": 0.5}},
            {"node": {"user": {"username": "bob", "id": "2"}, "x": 0.1, "y": 0.9}}
        ]},
        "is_video": true,
        "video_url": "https://cdn.test/CVid01/video.mp4",
        "video_view_count": 1500,
        "has_audio": true,
        "product_type": "igtv",
        "location": {"id": "213385402", "name": "Paris, France", "slug": "paris-france"},
        "owner": {
            "id": "25025320",
            "username": "instagram",
            "full_name": "Instagram",
            "is_verified": true,
            "edge_followed_by": {"count": 1000}
        }
    })
}

/// One child of a carousel; note the missing caption, counters and owner.
pub fn sidecar_child_node(id: &str, is_video: bool) -> Value {
    let type_name = if is_video { "GraphVideo" } else { "GraphImage" };
    let mut child = json!({
        "__typename": type_name,
        "id": id,
        "shortcode": format!("child{}", id),
        "dimensions": {"height": 1080, "width": 1080},
        "display_url": format!("https://cdn.test/child{}/display.jpg", id),
        "display_resources": resources(&format!("https://cdn.test/child{}", id)),
        "accessibility_caption": format!("Child {}", id),
        "is_video": is_video
    });
    if is_video {
        child["video_url"] = json!(format!("https://cdn.test/child{}/video.mp4", id));
        child["video_view_count"] = json!(42);
        child["has_audio"] = json!(false);
    }
    child
}

/// Carousel container detail page with three children.
pub fn sidecar_detail_node() -> Value {
    json!({
        "__typename": "GraphSidecar",
        "id": "2500000000000000000",
        "shortcode": "CSide1",
        "dimensions": {"height": 1080, "width": 1080},
        "display_url": "https://cdn.test/CSide1/display.jpg",
        "display_resources": resources("https://cdn.test/CSide1/display"),
        "taken_at_timestamp": TAKEN_AT,
        "edge_media_to_caption": {"edges": [{"node": {"text": "Three in a row #carousel"}}]},
        "edge_media_to_comment": {"count": 2},
        "edge_media_preview_like": {"count": 15},
        "edge_media_to_tagged_user": {"edges": []},
        "edge_sidecar_to_children": {"edges": [
            {"node": sidecar_child_node("11", false)},
            {"node": sidecar_child_node("12", true)},
            {"node": sidecar_child_node("13", false)}
        ]},
        "is_video": false,
        "owner": {"id": "25025320", "username": "instagram"}
    })
}

/// Photo detail page.
pub fn photo_detail_node() -> Value {
    let mut node = photo_node("2045", "BxYz");
    node["display_resources"] = resources("https://cdn.test/BxYz/display");
    node["edge_media_to_tagged_user"] = json!({"edges": []});
    node["owner"] = json!({"id": "25025320", "username": "instagram"});
    node
}

/// User node holding one page of tagged medias.
pub fn tagged_page(has_next_page: bool, end_cursor: Value, nodes: Vec<Value>) -> Value {
    let edges: Vec<Value> = nodes.into_iter().map(|node| json!({"node": node})).collect();
    json!({
        "id": "25025320",
        "edge_user_to_photos_of_you": {
            "count": 250,
            "page_info": {"has_next_page": has_next_page, "end_cursor": end_cursor},
            "edges": edges
        }
    })
}
