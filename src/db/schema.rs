//! Database schema and migrations.
//!
//! Migrations are applied in order when the database is opened. The
//! `schema_version` table records which ones have run.

/// Database migrations, one SQL script per version.
pub const MIGRATIONS: &[&str] = &[
    // v1: members
    r#"
CREATE TABLE members (
    id          TEXT PRIMARY KEY,                 -- login id chosen at registration
    name        TEXT NOT NULL,
    pass        TEXT NOT NULL,                    -- Argon2 PHC string
    email       TEXT NOT NULL DEFAULT '',
    mobile      TEXT NOT NULL DEFAULT '',
    zipcode     TEXT NOT NULL DEFAULT '',
    address1    TEXT NOT NULL DEFAULT '',
    address2    TEXT NOT NULL DEFAULT '',
    phone       TEXT NOT NULL DEFAULT '',
    email_get   INTEGER NOT NULL DEFAULT 0,
    reg_date    TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v2: board posts
    r#"
CREATE TABLE posts (
    no          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    writer      TEXT NOT NULL,
    content     TEXT NOT NULL,
    reg_date    TEXT NOT NULL DEFAULT (datetime('now')),
    read_count  INTEGER NOT NULL DEFAULT 0,
    pass        TEXT NOT NULL,                    -- plaintext post password
    file1       TEXT                              -- stored attachment name
);
"#,
    // v3: speed up writer search
    r#"
CREATE INDEX idx_posts_writer ON posts(writer);
"#,
];
