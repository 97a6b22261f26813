//! Collection schema.
//!
//! `images` holds one row per media item; `image_tags`, `image_intensities`,
//! and `image_representations` are 1:1 side tables keyed by `image_id`.
//! `image_tags.tags` is the packed `,id1,id2,...,` tag list.

pub const SCHEMA: &str = r#"
CREATE TABLE images (
    id INT NOT NULL UNIQUE,
    source_id INT NOT NULL UNIQUE,
    source_name TEXT,
    source TEXT NOT NULL,
    animated BOOL,
    aspect_ratio FLOAT,
    comment_count INT,
    created_at TIMESTAMP,
    deletion_reason LONGTEXT,
    description LONGTEXT,
    downvotes INT,
    duplicate_of INT,
    duration FLOAT,
    faves INT,
    first_seen_at TIMESTAMP,
    format TEXT,
    height INT,
    hidden_from_users BOOL,
    mime_type TEXT,
    name LONGTEXT,
    orig_sha512_hash TEXT,
    processed BOOL,
    score INT,
    sha512_hash TEXT,
    size INT,
    source_url LONGTEXT,
    spoilered BOOL,
    tag_count INT,
    thumbnails_generated BOOL,
    updated_at TIMESTAMP,
    uploader INT,
    upvotes INT,
    width INT,
    wilson_score FLOAT,
    PRIMARY KEY (id),
    FOREIGN KEY (uploader) REFERENCES uploaders(id)
);
CREATE TABLE image_tags (
    image_id INT NOT NULL UNIQUE,
    tags LONGTEXT NOT NULL,
    PRIMARY KEY (image_id),
    FOREIGN KEY (image_id) REFERENCES images(id)
);
CREATE TABLE image_intensities (
    image_id INT NOT NULL UNIQUE,
    ne FLOAT NOT NULL,
    nw FLOAT NOT NULL,
    se FLOAT NOT NULL,
    sw FLOAT NOT NULL,
    PRIMARY KEY (image_id),
    FOREIGN KEY (image_id) REFERENCES images(id)
);
CREATE TABLE image_representations (
    image_id INT NOT NULL UNIQUE,
    "view" LONGTEXT NOT NULL,
    "full" TEXT,
    large TEXT,
    medium TEXT,
    small TEXT,
    tall TEXT,
    thumb TEXT,
    thumb_small TEXT,
    thumb_tiny TEXT,
    PRIMARY KEY (image_id),
    FOREIGN KEY (image_id) REFERENCES images(id)
);
CREATE TABLE tags (
    id INT NOT NULL UNIQUE,
    name TEXT NOT NULL UNIQUE,
    alias INT,
    implications LONGTEXT,
    category TEXT,
    description LONGTEXT,
    description_short LONGTEXT,
    slug TEXT UNIQUE,
    PRIMARY KEY (id)
);
CREATE TABLE uploaders (
    id INT NOT NULL UNIQUE,
    name TEXT,
    PRIMARY KEY (id)
);
"#;

pub const METADATA_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS metadata (key TEXT NOT NULL UNIQUE, value LONGTEXT NOT NULL, PRIMARY KEY (key))";
