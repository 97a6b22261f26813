//! Turns raw store rows into [`MediaRecord`]s.

use crate::catalog::TagCatalog;
use crate::query::unescape_stored_text;
use crate::record::{Intensities, MediaRecord, Representations};
use crate::store::RawRow;

/// Parses a packed `,id1,id2,...,` list. Empty and non-integer segments are
/// skipped.
pub fn parse_packed_ids(packed: &str) -> Vec<i64> {
    packed
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| segment.parse::<i64>().ok())
        .collect()
}

pub fn decode_rows(rows: Vec<RawRow>, catalog: &TagCatalog) -> Vec<MediaRecord> {
    rows.into_iter().map(|row| decode_row(row, catalog)).collect()
}

pub fn decode_row(row: RawRow, catalog: &TagCatalog) -> MediaRecord {
    let tag_ids = parse_packed_ids(&row.tags);
    let tags = tag_ids
        .iter()
        .map(|id| catalog.name(*id).map(unescape_stored_text))
        .collect();

    MediaRecord {
        id: row.id,
        source_id: row.source_id,
        source_name: row.source_name,
        source: unescape(row.source),
        name: unescape(row.name),
        description: unescape(row.description),
        source_url: unescape(row.source_url),
        view_url: unescape(row.view),
        mime_type: row.mime_type,
        format: row.format,
        sha512_hash: row.sha512_hash,
        orig_sha512_hash: row.orig_sha512_hash,
        deletion_reason: row.deletion_reason,
        duplicate_of: row.duplicate_of,
        uploader: row.uploader,

        aspect_ratio: row.aspect_ratio,
        duration: row.duration,
        wilson_score: row.wilson_score,
        comment_count: row.comment_count,
        downvotes: row.downvotes,
        faves: row.faves,
        height: row.height,
        width: row.width,
        score: row.score,
        size: row.size,
        tag_count: row.tag_count,
        upvotes: row.upvotes,

        created_at: row.created_at,
        first_seen_at: row.first_seen_at,
        updated_at: row.updated_at,

        animated: flag(row.animated),
        hidden_from_users: flag(row.hidden_from_users),
        processed: flag(row.processed),
        spoilered: flag(row.spoilered),
        thumbnails_generated: flag(row.thumbnails_generated),

        representations: Representations {
            full: unescape(row.full),
            large: unescape(row.large),
            medium: unescape(row.medium),
            small: unescape(row.small),
            tall: unescape(row.tall),
            thumb: unescape(row.thumb),
            thumb_small: unescape(row.thumb_small),
            thumb_tiny: unescape(row.thumb_tiny),
        },
        intensities: Intensities {
            ne: row.ne,
            nw: row.nw,
            se: row.se,
            sw: row.sw,
        },
        tag_ids,
        tags,
    }
}

fn unescape(value: Option<String>) -> Option<String> {
    value.as_deref().map(unescape_stored_text)
}

fn flag(value: Option<i64>) -> bool {
    value == Some(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::escape_like_value;

    fn catalog() -> TagCatalog {
        TagCatalog::from_entries([(1, "red".to_string()), (2, "sky\\_blue".to_string())])
    }

    #[test]
    fn packed_ids_skip_empty_and_invalid_segments() {
        assert_eq!(parse_packed_ids(",1,2,"), vec![1, 2]);
        assert_eq!(parse_packed_ids(""), Vec::<i64>::new());
        assert_eq!(parse_packed_ids(",,"), Vec::<i64>::new());
        assert_eq!(parse_packed_ids(",4,x,5,"), vec![4, 5]);
    }

    #[test]
    fn tags_map_to_names_with_misses_as_none() {
        let row = RawRow {
            tags: ",1,2,42,".to_string(),
            ..RawRow::default()
        };
        let record = decode_row(row, &catalog());
        assert_eq!(record.tag_ids, vec![1, 2, 42]);
        assert_eq!(
            record.tags,
            vec![
                Some("red".to_string()),
                Some("sky_blue".to_string()),
                None
            ]
        );
    }

    #[test]
    fn flags_are_true_only_for_one() {
        let row = RawRow {
            animated: Some(1),
            hidden_from_users: Some(0),
            processed: None,
            spoilered: Some(2),
            thumbnails_generated: Some(1),
            ..RawRow::default()
        };
        let record = decode_row(row, &TagCatalog::default());
        assert!(record.animated);
        assert!(!record.hidden_from_users);
        assert!(!record.processed);
        assert!(!record.spoilered);
        assert!(record.thumbnails_generated);
    }

    #[test]
    fn stored_text_is_unescaped() {
        let row = RawRow {
            name: Some("it\\'s 100\\% \\_done".to_string()),
            description: Some("plain".to_string()),
            source_url: Some("https://a.example/x\\_y".to_string()),
            view: Some("https://cdn.example/a\\_b.png".to_string()),
            thumb: Some("https://cdn.example/t\\_1.png".to_string()),
            mime_type: Some("image/png".to_string()),
            ..RawRow::default()
        };
        let record = decode_row(row, &TagCatalog::default());
        assert_eq!(record.name.as_deref(), Some("it's 100% _done"));
        assert_eq!(record.description.as_deref(), Some("plain"));
        assert_eq!(record.source_url.as_deref(), Some("https://a.example/x_y"));
        assert_eq!(record.view_url.as_deref(), Some("https://cdn.example/a_b.png"));
        assert_eq!(
            record.representations.thumb.as_deref(),
            Some("https://cdn.example/t_1.png")
        );
        assert_eq!(record.representations.full, None);
        assert_eq!(record.mime_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn text_stored_in_escaped_form_decodes_to_the_original() {
        let original = "50% off_sale";
        let stored = original.replace('%', "\\%").replace('_', "\\_");
        let row = RawRow {
            name: Some(stored),
            ..RawRow::default()
        };
        let record = decode_row(row, &TagCatalog::default());
        assert_eq!(record.name.as_deref(), Some(original));
        // The same text searched for literally escapes the same characters.
        assert_eq!(escape_like_value(original), "50\\% off\\_sale");
    }
}
