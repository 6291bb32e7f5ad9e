// src/db/images.rs
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use crate::db::stamp;
use crate::db::tags::{get_or_create_tag, tags_for_image};
use crate::domain::content::{check_required, Image, NewImage, TITLE_MAX};
use crate::errors::ServerError;

/// Inserts an image and links its tags, creating missing ones.
///
/// Runs in its own transaction unless the caller already opened one.
pub fn insert_image(
    conn: &Connection,
    image: &NewImage,
    now: DateTime<Utc>,
) -> Result<i64, ServerError> {
    check_required("title", &image.title, TITLE_MAX)?;

    let tx = if conn.is_autocommit() {
        Some(conn.unchecked_transaction()?)
    } else {
        None
    };

    conn.execute(
        "insert into images (title, image, created_at, updated_at) values (?1, ?2, ?3, ?3)",
        params![image.title, image.image.trim(), stamp(now)],
    )
    .map_err(|e| ServerError::DbError(format!("insert image failed: {e}")))?;
    let image_id = conn.last_insert_rowid();

    for name in &image.tags {
        let tag_id = get_or_create_tag(conn, name, now)?;
        conn.execute(
            "insert or ignore into image_tags (image_id, tag_id) values (?, ?)",
            params![image_id, tag_id],
        )?;
    }

    if let Some(tx) = tx {
        tx.commit()?;
    }
    Ok(image_id)
}

pub fn get_image(conn: &Connection, id: i64) -> Result<Option<Image>, ServerError> {
    let row = conn
        .query_row(
            "select id, title, image from images where id = ? and is_published = 1",
            params![id],
            |r| {
                Ok(Image {
                    id: r.get(0)?,
                    title: r.get(1)?,
                    image: r.get(2)?,
                    tags: Vec::new(),
                })
            },
        )
        .optional()?;

    match row {
        Some(mut image) => {
            image.tags = tags_for_image(conn, image.id)?;
            Ok(Some(image))
        }
        None => Ok(None),
    }
}

/// Deletes an image unless some content still points at it.
pub fn delete_image(conn: &Connection, id: i64) -> Result<(), ServerError> {
    match conn.execute("delete from images where id = ?", params![id]) {
        Ok(0) => Err(ServerError::NotFound),
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
            Err(ServerError::BadRequest(format!(
                "image {id} is still referenced by published content"
            )))
        }
        Err(e) => Err(ServerError::DbError(format!("delete image failed: {e}"))),
    }
}
