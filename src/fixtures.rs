// src/fixtures.rs
//
// Bulk content loading from a JSON file. Images are declared once under a
// `key` and referenced by that key from the other sections.
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::db::activities::insert_activity;
use crate::db::images::insert_image;
use crate::db::jumbotrons::insert_jumbotron;
use crate::db::news::{insert_announcement, insert_news};
use crate::db::Database;
use crate::domain::content::{
    ActivityKind, Camp, NewActivity, NewAnnouncement, NewImage, NewJumbotron, NewNews,
};
use crate::errors::ServerError;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixtures {
    #[serde(default)]
    pub images: Vec<ImageFixture>,
    #[serde(default)]
    pub jumbotrons: Vec<JumbotronFixture>,
    #[serde(default)]
    pub events: Vec<ActivityFixture>,
    #[serde(default)]
    pub projects: Vec<ActivityFixture>,
    #[serde(default)]
    pub news: Vec<NewsFixture>,
    #[serde(default)]
    pub announcements: Vec<AnnouncementFixture>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageFixture {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JumbotronFixture {
    pub image: String,
    pub header_title: String,
    #[serde(default)]
    pub short_description: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActivityFixture {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub camp: Camp,
    pub image: String,
    #[serde(default)]
    pub is_featured: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewsFixture {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnnouncementFixture {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub images: usize,
    pub jumbotrons: usize,
    pub events: usize,
    pub projects: usize,
    pub news: usize,
    pub announcements: usize,
}

pub fn read_fixtures(path: &Path) -> Result<Fixtures, ServerError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        ServerError::BadRequest(format!("cannot read {}: {e}", path.display()))
    })?;
    serde_json::from_str(&raw)
        .map_err(|e| ServerError::BadRequest(format!("{}: {e}", path.display())))
}

/// Inserts every fixture in one transaction; nothing is kept on error.
pub fn load_fixtures(
    db: &Database,
    fixtures: &Fixtures,
    now: DateTime<Utc>,
) -> Result<LoadSummary, ServerError> {
    db.with_conn(|conn| {
        let tx = conn.transaction()?;
        let summary = insert_all(&tx, fixtures, now)?;
        tx.commit()?;
        Ok(summary)
    })
}

fn insert_all(
    conn: &Connection,
    fixtures: &Fixtures,
    now: DateTime<Utc>,
) -> Result<LoadSummary, ServerError> {
    let mut keys: HashMap<&str, i64> = HashMap::new();
    for image in &fixtures.images {
        if keys.contains_key(image.key.as_str()) {
            return Err(ServerError::BadRequest(format!(
                "duplicate image key {:?}",
                image.key
            )));
        }
        let id = insert_image(
            conn,
            &NewImage {
                title: image.title.clone(),
                image: image.image.clone(),
                tags: image.tags.clone(),
            },
            now,
        )?;
        keys.insert(image.key.as_str(), id);
    }

    let image_id = |key: &str| {
        keys.get(key)
            .copied()
            .ok_or_else(|| ServerError::BadRequest(format!("unknown image key {key:?}")))
    };

    for j in &fixtures.jumbotrons {
        let jumbotron = NewJumbotron {
            image_id: image_id(&j.image)?,
            header_title: j.header_title.clone(),
            short_description: j.short_description.clone(),
        };
        insert_jumbotron(conn, &jumbotron, now)?;
    }

    for (kind, rows) in [
        (ActivityKind::Event, &fixtures.events),
        (ActivityKind::Project, &fixtures.projects),
    ] {
        for a in rows {
            let activity = NewActivity {
                title: a.title.clone(),
                description: a.description.clone(),
                start_date: a.start_date,
                end_date: a.end_date,
                camp: a.camp,
                image_id: image_id(&a.image)?,
                is_featured: a.is_featured,
            };
            insert_activity(conn, kind, &activity, now)?;
        }
    }

    for n in &fixtures.news {
        let news = NewNews {
            title: n.title.clone(),
            description: n.description.clone(),
            image_id: image_id(&n.image)?,
        };
        insert_news(conn, &news, now)?;
    }

    for a in &fixtures.announcements {
        let announcement = NewAnnouncement {
            title: a.title.clone(),
            description: a.description.clone(),
        };
        insert_announcement(conn, &announcement, now)?;
    }

    Ok(LoadSummary {
        images: fixtures.images.len(),
        jumbotrons: fixtures.jumbotrons.len(),
        events: fixtures.events.len(),
        projects: fixtures.projects.len(),
        news: fixtures.news.len(),
        announcements: fixtures.announcements.len(),
    })
}
