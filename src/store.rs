//! Post storage over an embedded SQLite database.
//!
//! Storage owns identity and creation time: `id` and `created` are assigned
//! here at insertion and never change afterward.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row};

#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    /// The outward-facing form: `"firstName lastName"`.
    pub fn display(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A post as submitted, before storage assigns `id` and `created`.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: Author,
}

/// A persisted post.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: Author,
    pub created: DateTime<Utc>,
}

pub fn initialize(conn: &Connection) {
    conn.execute_batch("PRAGMA journal_mode=WAL;").ok();

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS posts (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            author_first TEXT NOT NULL,
            author_last TEXT NOT NULL,
            created TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_posts_created ON posts(created);
        ",
    )
    .expect("Failed to initialize database");
}

fn row_to_post(row: &Row) -> rusqlite::Result<Post> {
    let created_raw: String = row.get(5)?;
    let created = DateTime::parse_from_rfc3339(&created_raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?;
    Ok(Post {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        author: Author {
            first_name: row.get(3)?,
            last_name: row.get(4)?,
        },
        created,
    })
}

pub fn insert(conn: &Connection, new: &NewPost) -> rusqlite::Result<Post> {
    let id = uuid::Uuid::new_v4().to_string();
    let created = Utc::now();
    conn.execute(
        "INSERT INTO posts (id, title, content, author_first, author_last, created) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            id,
            new.title,
            new.content,
            new.author.first_name,
            new.author.last_name,
            created.to_rfc3339()
        ],
    )?;
    Ok(Post {
        id,
        title: new.title.clone(),
        content: new.content.clone(),
        author: new.author.clone(),
        created,
    })
}

pub fn insert_many(conn: &Connection, batch: &[NewPost]) -> rusqlite::Result<Vec<Post>> {
    let mut inserted = Vec::with_capacity(batch.len());
    for new in batch {
        inserted.push(insert(conn, new)?);
    }
    Ok(inserted)
}

pub fn find_by_id(conn: &Connection, id: &str) -> rusqlite::Result<Option<Post>> {
    conn.query_row(
        "SELECT id, title, content, author_first, author_last, created FROM posts WHERE id = ?1",
        [id],
        row_to_post,
    )
    .optional()
}

pub fn list_all(conn: &Connection) -> rusqlite::Result<Vec<Post>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, content, author_first, author_last, created FROM posts ORDER BY created DESC",
    )?;
    let posts = stmt
        .query_map([], row_to_post)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(posts)
}

pub fn count(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))
}

/// Returns whether a record was actually removed.
pub fn delete(conn: &Connection, id: &str) -> rusqlite::Result<bool> {
    let removed = conn.execute("DELETE FROM posts WHERE id = ?1", [id])?;
    Ok(removed > 0)
}

/// Wipes every record; returns how many were removed.
pub fn drop_all(conn: &Connection) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM posts", [])
}
