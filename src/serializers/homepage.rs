// src/serializers/homepage.rs
//
// Compact shapes for the homepage feed.
use serde::Serialize;

use crate::domain::content::{Activity, Camp, Jumbotron, News};
use crate::domain::Status;
use crate::errors::ServerError;
use crate::serializers::SerializeContext;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomepageJumbotron {
    pub id: i64,
    pub image: Option<String>,
    pub header_title: String,
    pub short_description: String,
}

impl HomepageJumbotron {
    pub fn new(jumbotron: &Jumbotron, ctx: &SerializeContext<'_>) -> Self {
        Self {
            id: jumbotron.id,
            image: ctx.image_url(&jumbotron.image_path),
            header_title: jumbotron.header_title.clone(),
            short_description: jumbotron.short_description.clone(),
        }
    }
}

/// Homepage card for an event or a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomepageActivity {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
    pub camp: Camp,
    pub status: Status,
}

impl HomepageActivity {
    pub fn new(activity: &Activity, ctx: &SerializeContext<'_>) -> Result<Self, ServerError> {
        Ok(Self {
            id: activity.id,
            title: activity.title.clone(),
            image: ctx.image_url(&activity.image_path),
            camp: activity.camp,
            status: ctx.status(activity)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomepageNews {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

impl HomepageNews {
    pub fn new(news: &News, ctx: &SerializeContext<'_>) -> Self {
        Self {
            id: news.id,
            title: news.title.clone(),
            description: news.description.clone(),
            image: ctx.image_url(&news.image_path),
        }
    }
}
