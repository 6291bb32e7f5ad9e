// src/domain/status.rs

use crate::errors::ServerError;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Temporal label shown next to events and projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Past,
    Ongoing,
    Upcoming,
}

impl Status {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "past" => Some(Status::Past),
            "ongoing" => Some(Status::Ongoing),
            "upcoming" => Some(Status::Upcoming),
            _ => None,
        }
    }
}

/// Determines the status of a record relative to `now`.
///
/// A record is upcoming until it starts, and past only once `now` is strictly
/// after its end. Without an end date it stays ongoing forever once started.
pub fn classify(start: DateTime<Utc>, end: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Status {
    if now < start {
        return Status::Upcoming;
    }
    match end {
        Some(end) if now > end => Status::Past,
        _ => Status::Ongoing,
    }
}

/// Start and optional end of an event or project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Result<Self, ServerError> {
        if let Some(end) = end {
            if end < start {
                return Err(ServerError::InvalidInput(format!(
                    "end {} is before start {}",
                    end.to_rfc3339(),
                    start.to_rfc3339()
                )));
            }
        }
        Ok(Self { start, end })
    }

    /// Builds a range from stored text values.
    pub fn parse(start: &str, end: Option<&str>) -> Result<Self, ServerError> {
        let start = parse_timestamp(start)?;
        let end = end
            .filter(|s| !s.trim().is_empty())
            .map(parse_timestamp)
            .transpose()?;
        Self::new(start, end)
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> Status {
        classify(self.start, self.end, now)
    }
}

/// Parses a timezone-aware timestamp.
///
/// Accepts RFC 3339 and the space-separated form
/// `2022-03-19 14:35:46.271745+00:00`. Values without an offset are
/// rejected: they cannot be compared against `now`.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, ServerError> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%:z"))
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ServerError::InvalidInput(format!("timestamp {value:?}: {e}")))
}
