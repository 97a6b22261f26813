//! Domain types returned to callers.

use serde::{Deserialize, Serialize};

/// Named renditions of a media item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Representations {
    pub full: Option<String>,
    pub large: Option<String>,
    pub medium: Option<String>,
    pub small: Option<String>,
    pub tall: Option<String>,
    pub thumb: Option<String>,
    pub thumb_small: Option<String>,
    pub thumb_tiny: Option<String>,
}

/// Average intensity of the four corner regions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Intensities {
    pub ne: Option<f64>,
    pub nw: Option<f64>,
    pub se: Option<f64>,
    pub sw: Option<f64>,
}

/// A decoded media record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub id: i64,
    pub source_id: i64,
    pub source_name: Option<String>,
    pub source: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub source_url: Option<String>,
    pub view_url: Option<String>,
    pub mime_type: Option<String>,
    pub format: Option<String>,
    pub sha512_hash: Option<String>,
    pub orig_sha512_hash: Option<String>,
    pub deletion_reason: Option<String>,
    pub duplicate_of: Option<i64>,
    pub uploader: Option<i64>,

    pub aspect_ratio: Option<f64>,
    pub duration: Option<f64>,
    pub wilson_score: Option<f64>,
    pub comment_count: Option<i64>,
    pub downvotes: Option<i64>,
    pub faves: Option<i64>,
    pub height: Option<i64>,
    pub width: Option<i64>,
    pub score: Option<i64>,
    pub size: Option<i64>,
    pub tag_count: Option<i64>,
    pub upvotes: Option<i64>,

    /// Unix timestamps in seconds.
    pub created_at: Option<f64>,
    pub first_seen_at: Option<f64>,
    pub updated_at: Option<f64>,

    pub animated: bool,
    pub hidden_from_users: bool,
    pub processed: bool,
    pub spoilered: bool,
    pub thumbnails_generated: bool,

    pub representations: Representations,
    pub intensities: Intensities,
    pub tag_ids: Vec<i64>,
    /// Names for `tag_ids`, position for position. `None` when the id is
    /// missing from the catalog.
    pub tags: Vec<Option<String>>,
}

/// A tag with its full stored details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    /// Canonical tag this tag is an alias of.
    pub alias: Option<i64>,
    pub implications: Vec<i64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub slug: Option<String>,
}
