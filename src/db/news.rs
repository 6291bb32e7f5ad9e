// src/db/news.rs
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::{newest_first, stamp};
use crate::domain::content::{
    check_len, check_required, Announcement, NewAnnouncement, NewNews, News, DESCRIPTION_MAX,
    TITLE_MAX,
};
use crate::errors::ServerError;

pub fn insert_news(
    conn: &Connection,
    news: &NewNews,
    now: DateTime<Utc>,
) -> Result<i64, ServerError> {
    check_required("title", &news.title, TITLE_MAX)?;
    check_len("description", &news.description, DESCRIPTION_MAX)?;

    conn.execute(
        r#"
        insert into news (title, description, image_id, created_at, updated_at)
        values (?1, ?2, ?3, ?4, ?4)
        "#,
        params![news.title, news.description, news.image_id, stamp(now)],
    )
    .map_err(|e| ServerError::DbError(format!("insert news failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

/// Published news, newest first.
pub fn list_news(conn: &Connection, limit: Option<usize>) -> Result<Vec<News>, ServerError> {
    let mut stmt = conn.prepare(
        r#"
        select n.id, n.title, n.description, i.image, n.created_at
        from news n
        join images i on i.id = n.image_id
        where n.is_published = 1
        "#,
    )?;
    let rows = stmt
        .query_map([], news_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = newest_first(rows, |n| (n.created_at.as_str(), n.id))?;
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    Ok(rows)
}

pub fn get_news(conn: &Connection, id: i64) -> Result<Option<News>, ServerError> {
    conn.query_row(
        r#"
        select n.id, n.title, n.description, i.image, n.created_at
        from news n
        join images i on i.id = n.image_id
        where n.id = ? and n.is_published = 1
        "#,
        params![id],
        news_from_row,
    )
    .optional()
    .map_err(ServerError::from)
}

fn news_from_row(row: &Row<'_>) -> rusqlite::Result<News> {
    Ok(News {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        image_path: row.get(3)?,
        created_at: row.get(4)?,
    })
}

pub fn insert_announcement(
    conn: &Connection,
    announcement: &NewAnnouncement,
    now: DateTime<Utc>,
) -> Result<i64, ServerError> {
    check_len("title", &announcement.title, TITLE_MAX)?;
    check_len("description", &announcement.description, DESCRIPTION_MAX)?;

    conn.execute(
        r#"
        insert into announcements (title, description, created_at, updated_at)
        values (?1, ?2, ?3, ?3)
        "#,
        params![announcement.title, announcement.description, stamp(now)],
    )
    .map_err(|e| ServerError::DbError(format!("insert announcement failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

/// Published announcements, newest first.
pub fn list_announcements(conn: &Connection) -> Result<Vec<Announcement>, ServerError> {
    let mut stmt = conn.prepare(
        r#"
        select id, title, description, created_at
        from announcements
        where is_published = 1
        "#,
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Announcement {
                id: row.get(0)?,
                title: row.get(1)?,
                description: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    newest_first(rows, |a| (a.created_at.as_str(), a.id))
}
