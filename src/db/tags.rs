// src/db/tags.rs
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::db::stamp;
use crate::domain::content::{check_required, Tag, TAG_NAME_MAX};
use crate::errors::ServerError;

/// Insert the tag if it doesn't exist, then return its id.
pub fn get_or_create_tag(
    conn: &Connection,
    name: &str,
    now: DateTime<Utc>,
) -> Result<i64, ServerError> {
    let name = name.trim();
    check_required("name", name, TAG_NAME_MAX)?;

    conn.execute(
        "insert or ignore into tags (name, created_at, updated_at) values (?1, ?2, ?2)",
        params![name, stamp(now)],
    )
    .map_err(|e| ServerError::DbError(format!("insert tag failed: {e}")))?;

    conn.query_row("select id from tags where name = ?", params![name], |row| {
        row.get(0)
    })
    .map_err(|e| ServerError::DbError(format!("select tag id failed: {e}")))
}

pub fn list_tags(conn: &Connection) -> Result<Vec<Tag>, ServerError> {
    let mut stmt = conn.prepare(
        "select id, name from tags where is_published = 1 order by name collate nocase, id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(Tag {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;

    rows.collect::<Result<Vec<_>, _>>().map_err(ServerError::from)
}

pub fn tags_for_image(conn: &Connection, image_id: i64) -> Result<Vec<Tag>, ServerError> {
    let mut stmt = conn.prepare(
        r#"
        select t.id, t.name
        from image_tags it
        join tags t on t.id = it.tag_id
        where it.image_id = ?
        order by t.name collate nocase, t.id
        "#,
    )?;
    let rows = stmt.query_map(params![image_id], |row| {
        Ok(Tag {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;

    rows.collect::<Result<Vec<_>, _>>().map_err(ServerError::from)
}
