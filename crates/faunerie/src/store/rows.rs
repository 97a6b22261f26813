//! Raw result rows, as stored.

use rusqlite::Row;

/// Explicit column list for record retrieval across the four joined tables.
pub const RECORD_COLUMNS: &str = "images.id, images.source_id, images.source_name, images.source, \
images.animated, images.aspect_ratio, images.comment_count, images.created_at, \
images.deletion_reason, images.description, images.downvotes, images.duplicate_of, \
images.duration, images.faves, images.first_seen_at, images.format, images.height, \
images.hidden_from_users, images.mime_type, images.name, images.orig_sha512_hash, \
images.processed, images.score, images.sha512_hash, images.size, images.source_url, \
images.spoilered, images.tag_count, images.thumbnails_generated, images.updated_at, \
images.uploader, images.upvotes, images.width, images.wilson_score, \
image_tags.tags, \
image_intensities.ne, image_intensities.nw, image_intensities.se, image_intensities.sw, \
image_representations.\"view\", image_representations.\"full\", image_representations.large, \
image_representations.medium, image_representations.small, image_representations.tall, \
image_representations.thumb, image_representations.thumb_small, image_representations.thumb_tiny";

/// Inner joins across the record tables. Items missing a side-table row are
/// not returned.
pub const RECORD_SOURCE: &str = "images \
JOIN image_tags ON images.id = image_tags.image_id \
JOIN image_intensities ON images.id = image_intensities.image_id \
JOIN image_representations ON images.id = image_representations.image_id";

/// One joined row, with text still in stored (escaped) form and flags as
/// stored integers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub id: i64,
    pub source_id: i64,
    pub source_name: Option<String>,
    pub source: Option<String>,
    pub animated: Option<i64>,
    pub aspect_ratio: Option<f64>,
    pub comment_count: Option<i64>,
    pub created_at: Option<f64>,
    pub deletion_reason: Option<String>,
    pub description: Option<String>,
    pub downvotes: Option<i64>,
    pub duplicate_of: Option<i64>,
    pub duration: Option<f64>,
    pub faves: Option<i64>,
    pub first_seen_at: Option<f64>,
    pub format: Option<String>,
    pub height: Option<i64>,
    pub hidden_from_users: Option<i64>,
    pub mime_type: Option<String>,
    pub name: Option<String>,
    pub orig_sha512_hash: Option<String>,
    pub processed: Option<i64>,
    pub score: Option<i64>,
    pub sha512_hash: Option<String>,
    pub size: Option<i64>,
    pub source_url: Option<String>,
    pub spoilered: Option<i64>,
    pub tag_count: Option<i64>,
    pub thumbnails_generated: Option<i64>,
    pub updated_at: Option<f64>,
    pub uploader: Option<i64>,
    pub upvotes: Option<i64>,
    pub width: Option<i64>,
    pub wilson_score: Option<f64>,

    /// Packed `,id1,id2,...,` list.
    pub tags: String,

    pub ne: Option<f64>,
    pub nw: Option<f64>,
    pub se: Option<f64>,
    pub sw: Option<f64>,

    pub view: Option<String>,
    pub full: Option<String>,
    pub large: Option<String>,
    pub medium: Option<String>,
    pub small: Option<String>,
    pub tall: Option<String>,
    pub thumb: Option<String>,
    pub thumb_small: Option<String>,
    pub thumb_tiny: Option<String>,
}

impl RawRow {
    /// Reads a row selected with [`RECORD_COLUMNS`].
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            source_id: row.get("source_id")?,
            source_name: row.get("source_name")?,
            source: row.get("source")?,
            animated: row.get("animated")?,
            aspect_ratio: row.get("aspect_ratio")?,
            comment_count: row.get("comment_count")?,
            created_at: row.get("created_at")?,
            deletion_reason: row.get("deletion_reason")?,
            description: row.get("description")?,
            downvotes: row.get("downvotes")?,
            duplicate_of: row.get("duplicate_of")?,
            duration: row.get("duration")?,
            faves: row.get("faves")?,
            first_seen_at: row.get("first_seen_at")?,
            format: row.get("format")?,
            height: row.get("height")?,
            hidden_from_users: row.get("hidden_from_users")?,
            mime_type: row.get("mime_type")?,
            name: row.get("name")?,
            orig_sha512_hash: row.get("orig_sha512_hash")?,
            processed: row.get("processed")?,
            score: row.get("score")?,
            sha512_hash: row.get("sha512_hash")?,
            size: row.get("size")?,
            source_url: row.get("source_url")?,
            spoilered: row.get("spoilered")?,
            tag_count: row.get("tag_count")?,
            thumbnails_generated: row.get("thumbnails_generated")?,
            updated_at: row.get("updated_at")?,
            uploader: row.get("uploader")?,
            upvotes: row.get("upvotes")?,
            width: row.get("width")?,
            wilson_score: row.get("wilson_score")?,
            tags: row.get("tags")?,
            ne: row.get("ne")?,
            nw: row.get("nw")?,
            se: row.get("se")?,
            sw: row.get("sw")?,
            view: row.get("view")?,
            full: row.get("full")?,
            large: row.get("large")?,
            medium: row.get("medium")?,
            small: row.get("small")?,
            tall: row.get("tall")?,
            thumb: row.get("thumb")?,
            thumb_small: row.get("thumb_small")?,
            thumb_tiny: row.get("thumb_tiny")?,
        })
    }
}
