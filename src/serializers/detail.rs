// src/serializers/detail.rs
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::content::{Activity, Announcement, Camp, Image, News, Tag};
use crate::domain::status::parse_timestamp;
use crate::domain::Status;
use crate::errors::ServerError;
use crate::serializers::SerializeContext;

/// Full event or project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityDetail {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub camp: Camp,
    pub image: Option<String>,
    pub is_featured: bool,
    pub status: Status,
}

impl ActivityDetail {
    pub fn new(activity: &Activity, ctx: &SerializeContext<'_>) -> Result<Self, ServerError> {
        let range = ctx.time_range(activity)?;
        Ok(Self {
            id: activity.id,
            title: activity.title.clone(),
            description: activity.description.clone(),
            start_date: range.start,
            end_date: range.end,
            camp: activity.camp,
            image: ctx.image_url(&activity.image_path),
            is_featured: activity.is_featured,
            status: range.status_at(ctx.now),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsDetail {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewsDetail {
    pub fn new(news: &News, ctx: &SerializeContext<'_>) -> Result<Self, ServerError> {
        Ok(Self {
            id: news.id,
            title: news.title.clone(),
            description: news.description.clone(),
            image: ctx.image_url(&news.image_path),
            created_at: parse_timestamp(&news.created_at)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnouncementDetail {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl AnnouncementDetail {
    pub fn new(announcement: &Announcement) -> Result<Self, ServerError> {
        Ok(Self {
            id: announcement.id,
            title: announcement.title.clone(),
            description: announcement.description.clone(),
            created_at: parse_timestamp(&announcement.created_at)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageDetail {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
    pub tags: Vec<String>,
}

impl ImageDetail {
    pub fn new(image: &Image, ctx: &SerializeContext<'_>) -> Self {
        Self {
            id: image.id,
            title: image.title.clone(),
            image: ctx.image_url(&image.image),
            tags: image.tags.iter().map(|t| t.name.clone()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagDetail {
    pub id: i64,
    pub name: String,
}

impl From<&Tag> for TagDetail {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name.clone(),
        }
    }
}
