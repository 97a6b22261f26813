//! Row builders shared by tests.

use rusqlite::params;

use super::Store;

#[derive(Debug, Clone, Default)]
pub(crate) struct RecordFixture {
    pub id: i64,
    /// Packed `,id1,id2,...,` list.
    pub tags: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub source_name: Option<String>,
    pub source_url: Option<String>,
    pub mime_type: Option<String>,
    pub created_at: Option<f64>,
    pub score: Option<i64>,
    pub width: Option<i64>,
    pub animated: bool,
    pub spoilered: bool,
}

pub(crate) fn insert_tag(store: &Store, id: i64, name: &str, implications: Option<&str>) {
    store
        .connection()
        .execute(
            "INSERT INTO tags (id, name, implications, slug) VALUES (?1, ?2, ?3, ?2)",
            params![id, name, implications],
        )
        .expect("insert tag");
}

/// Inserts an item with all of its side-table rows.
pub(crate) fn insert_record(store: &Store, record: &RecordFixture) {
    let conn = store.connection();
    conn.execute(
        "INSERT INTO images (id, source_id, source_name, source, animated, created_at, \
         description, hidden_from_users, mime_type, name, processed, score, source_url, \
         spoilered, thumbnails_generated, width) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8, ?9, 1, ?10, ?11, ?12, 1, ?13)",
        params![
            record.id,
            1000 + record.id,
            record.source_name,
            "https://source.example",
            record.animated,
            record.created_at,
            record.description,
            record.mime_type,
            record.name,
            record.score,
            record.source_url,
            record.spoilered,
            record.width,
        ],
    )
    .expect("insert image");
    conn.execute(
        "INSERT INTO image_tags (image_id, tags) VALUES (?1, ?2)",
        params![record.id, record.tags],
    )
    .expect("insert image tags");
    conn.execute(
        "INSERT INTO image_intensities (image_id, ne, nw, se, sw) VALUES (?1, 0.5, 0.25, 0.75, 1.0)",
        params![record.id],
    )
    .expect("insert intensities");
    conn.execute(
        "INSERT INTO image_representations (image_id, \"view\", \"full\", thumb) VALUES (?1, ?2, ?3, ?4)",
        params![
            record.id,
            format!("https://cdn.example/{}/view.png", record.id),
            format!("https://cdn.example/{}/full.png", record.id),
            format!("https://cdn.example/{}/thumb.png", record.id),
        ],
    )
    .expect("insert representations");
}
