// src/db/activities.rs
//
// Events and projects share one column layout; `ActivityKind` picks the table.
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::{newest_first, stamp};
use crate::domain::content::{
    check_len, check_required, Activity, ActivityKind, Camp, NewActivity, DESCRIPTION_MAX,
    TITLE_MAX,
};
use crate::domain::TimeRange;
use crate::errors::ServerError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityFilter {
    pub featured_only: bool,
    pub camp: Option<Camp>,
}

pub fn insert_activity(
    conn: &Connection,
    kind: ActivityKind,
    activity: &NewActivity,
    now: DateTime<Utc>,
) -> Result<i64, ServerError> {
    check_required("title", &activity.title, TITLE_MAX)?;
    check_len("description", &activity.description, DESCRIPTION_MAX)?;
    let range = TimeRange::new(activity.start_date, activity.end_date)
        .map_err(|e| ServerError::BadRequest(e.to_string()))?;

    let sql = format!(
        r#"
        insert into {} (
            title, description, start_date, end_date, camp, image_id, is_featured,
            created_at, updated_at
        ) values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
        "#,
        kind.table()
    );
    conn.execute(
        &sql,
        params![
            activity.title,
            activity.description,
            stamp(range.start),
            range.end.map(stamp),
            activity.camp,
            activity.image_id,
            activity.is_featured,
            stamp(now),
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert into {} failed: {e}", kind.table())))?;

    Ok(conn.last_insert_rowid())
}

/// Published activities, latest start first.
pub fn list_activities(
    conn: &Connection,
    kind: ActivityKind,
    filter: ActivityFilter,
) -> Result<Vec<Activity>, ServerError> {
    let sql = format!(
        r#"
        select a.id, a.title, a.description, a.start_date, a.end_date, a.camp,
               i.image, a.is_featured
        from {} a
        join images i on i.id = a.image_id
        where a.is_published = 1
          and (?1 = 0 or a.is_featured = 1)
          and (?2 is null or a.camp = ?2)
        "#,
        kind.table()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![filter.featured_only, filter.camp], |row| {
            activity_from_row(kind, row)
        })?
        .collect::<Result<Vec<_>, _>>()?;

    newest_first(rows, |a| (a.start_date.as_str(), a.id))
}

pub fn get_activity(
    conn: &Connection,
    kind: ActivityKind,
    id: i64,
) -> Result<Option<Activity>, ServerError> {
    let sql = format!(
        r#"
        select a.id, a.title, a.description, a.start_date, a.end_date, a.camp,
               i.image, a.is_featured
        from {} a
        join images i on i.id = a.image_id
        where a.id = ? and a.is_published = 1
        "#,
        kind.table()
    );
    conn.query_row(&sql, params![id], |row| activity_from_row(kind, row))
        .optional()
        .map_err(ServerError::from)
}

fn activity_from_row(kind: ActivityKind, row: &Row<'_>) -> rusqlite::Result<Activity> {
    Ok(Activity {
        id: row.get(0)?,
        kind,
        title: row.get(1)?,
        description: row.get(2)?,
        start_date: row.get(3)?,
        end_date: row.get(4)?,
        camp: row.get(5)?,
        image_path: row.get(6)?,
        is_featured: row.get(7)?,
    })
}
