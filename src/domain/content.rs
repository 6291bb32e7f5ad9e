// src/domain/content.rs

use crate::errors::ServerError;
use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

pub const TITLE_MAX: usize = 50;
pub const DESCRIPTION_MAX: usize = 225;
pub const TAG_NAME_MAX: usize = 50;

/// Organization camps an event or project belongs to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Camp {
    #[default]
    General,
    Suba,
    Baybayon,
    Lasang,
    ZeroWaste,
}

impl Camp {
    pub const ALL: [Camp; 5] = [
        Camp::General,
        Camp::Suba,
        Camp::Baybayon,
        Camp::Lasang,
        Camp::ZeroWaste,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Camp::General => "general",
            Camp::Suba => "suba",
            Camp::Baybayon => "baybayon",
            Camp::Lasang => "lasang",
            Camp::ZeroWaste => "zero_waste",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl ToSql for Camp {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Camp {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = value.as_str()?;
        Camp::parse(raw).ok_or_else(|| FromSqlError::Other(format!("unknown camp {raw:?}").into()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub id: i64,
    pub title: String,
    /// Relative storage path, empty when no file was uploaded.
    pub image: String,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jumbotron {
    pub id: i64,
    pub image_path: String,
    pub header_title: String,
    pub short_description: String,
}

/// Which table an [`Activity`] lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Event,
    Project,
}

impl ActivityKind {
    pub fn table(&self) -> &'static str {
        match self {
            ActivityKind::Event => "events",
            ActivityKind::Project => "projects",
        }
    }
}

/// An event or a project: both are scheduled and carry a status.
///
/// Dates stay in their stored text form; they are parsed when the status is
/// computed so that a corrupt row surfaces as `InvalidInput`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub id: i64,
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub camp: Camp,
    pub image_path: String,
    pub is_featured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct News {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_path: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: String,
}

// === Insert payloads ===

#[derive(Debug, Clone)]
pub struct NewImage {
    pub title: String,
    pub image: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NewJumbotron {
    pub image_id: i64,
    pub header_title: String,
    pub short_description: String,
}

#[derive(Debug, Clone)]
pub struct NewActivity {
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub camp: Camp,
    pub image_id: i64,
    pub is_featured: bool,
}

#[derive(Debug, Clone)]
pub struct NewNews {
    pub title: String,
    pub description: String,
    pub image_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub title: String,
    pub description: String,
}

/// Rejects values longer than the column allows.
pub fn check_len(field: &str, value: &str, max: usize) -> Result<(), ServerError> {
    let len = value.chars().count();
    if len > max {
        return Err(ServerError::BadRequest(format!(
            "{field}: at most {max} characters allowed, got {len}"
        )));
    }
    Ok(())
}

pub fn check_required(field: &str, value: &str, max: usize) -> Result<(), ServerError> {
    if value.trim().is_empty() {
        return Err(ServerError::BadRequest(format!("{field}: may not be blank")));
    }
    check_len(field, value, max)
}
