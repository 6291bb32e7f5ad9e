// src/db/jumbotrons.rs
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::db::stamp;
use crate::domain::content::{
    check_len, check_required, Jumbotron, NewJumbotron, DESCRIPTION_MAX, TITLE_MAX,
};
use crate::errors::ServerError;

pub fn insert_jumbotron(
    conn: &Connection,
    jumbotron: &NewJumbotron,
    now: DateTime<Utc>,
) -> Result<i64, ServerError> {
    check_required("header_title", &jumbotron.header_title, TITLE_MAX)?;
    check_len("short_description", &jumbotron.short_description, DESCRIPTION_MAX)?;

    conn.execute(
        r#"
        insert into jumbotrons (image_id, header_title, short_description, created_at, updated_at)
        values (?1, ?2, ?3, ?4, ?4)
        "#,
        params![
            jumbotron.image_id,
            jumbotron.header_title,
            jumbotron.short_description,
            stamp(now),
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert jumbotron failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

pub fn list_jumbotrons(conn: &Connection) -> Result<Vec<Jumbotron>, ServerError> {
    let mut stmt = conn.prepare(
        r#"
        select j.id, i.image, j.header_title, j.short_description
        from jumbotrons j
        join images i on i.id = j.image_id
        where j.is_published = 1
        order by j.id
        "#,
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(Jumbotron {
            id: row.get(0)?,
            image_path: row.get(1)?,
            header_title: row.get(2)?,
            short_description: row.get(3)?,
        })
    })?;

    rows.collect::<Result<Vec<_>, _>>().map_err(ServerError::from)
}
