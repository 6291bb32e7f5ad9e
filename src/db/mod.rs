pub mod activities;
pub mod connection;
pub mod images;
pub mod jumbotrons;
pub mod news;
pub mod tags;

pub use connection::{init_db, Database};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::status::parse_timestamp;
use crate::errors::ServerError;

/// Storage form of a timestamp: RFC 3339, UTC, nanosecond precision.
/// Lossless, so a saved end still compares equal to the same `now`.
pub fn stamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Orders rows newest first by a stored timestamp, id breaking ties.
///
/// Rows written by an outside uploader may carry any offset, so the text is
/// parsed and compared as instants rather than sorted as strings.
pub fn newest_first<T>(
    rows: Vec<T>,
    key: impl Fn(&T) -> (&str, i64),
) -> Result<Vec<T>, ServerError> {
    let mut keyed = rows
        .into_iter()
        .map(|row| {
            let (at, id) = {
                let (raw, id) = key(&row);
                (parse_timestamp(raw)?, id)
            };
            Ok((at, id, row))
        })
        .collect::<Result<Vec<_>, ServerError>>()?;

    keyed.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
    Ok(keyed.into_iter().map(|(_, _, row)| row).collect())
}
