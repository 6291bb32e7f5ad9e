pub mod detail;
pub mod homepage;

use chrono::{DateTime, Utc};

use crate::config::MediaConfig;
use crate::domain::content::Activity;
use crate::domain::media::{build_absolute_url, mount_relative_url};
use crate::domain::{RequestContext, Status, TimeRange};
use crate::errors::ServerError;

pub use detail::{ActivityDetail, AnnouncementDetail, ImageDetail, NewsDetail, TagDetail};
pub use homepage::{HomepageActivity, HomepageJumbotron, HomepageNews};

/// Everything a serializer needs besides the record itself.
#[derive(Debug, Clone, Copy)]
pub struct SerializeContext<'a> {
    /// Present when serializing for an HTTP request; media URLs are then absolute.
    pub request: Option<&'a RequestContext>,
    pub media: &'a MediaConfig,
    /// Reference instant for status fields.
    pub now: DateTime<Utc>,
}

impl<'a> SerializeContext<'a> {
    pub fn new(
        request: Option<&'a RequestContext>,
        media: &'a MediaConfig,
        now: DateTime<Utc>,
    ) -> Self {
        Self { request, media, now }
    }

    /// URL for a stored asset; `None` when nothing is attached.
    pub fn image_url(&self, relative_path: &str) -> Option<String> {
        match self.request {
            Some(req) => build_absolute_url(
                &req.scheme,
                &req.host,
                Some(relative_path),
                &self.media.mount_prefix,
            ),
            None => mount_relative_url(Some(relative_path), &self.media.mount_prefix),
        }
    }

    pub fn time_range(&self, activity: &Activity) -> Result<TimeRange, ServerError> {
        TimeRange::parse(&activity.start_date, activity.end_date.as_deref()).inspect_err(|e| {
            tracing::warn!(
                table = activity.kind.table(),
                id = activity.id,
                error = %e,
                "unreadable schedule"
            )
        })
    }

    pub fn status(&self, activity: &Activity) -> Result<Status, ServerError> {
        Ok(self.time_range(activity)?.status_at(self.now))
    }
}
