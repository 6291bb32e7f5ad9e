use crate::app::App;
use crate::config::AppConfig;
use crate::db::activities::{self, ActivityFilter};
use crate::db::{images, jumbotrons, news, tags};
use crate::domain::content::{ActivityKind, Camp};
use crate::domain::{RequestContext, Status};
use crate::errors::ServerError;
use crate::responses::{error_to_response, json_response, ResultResp};
use crate::serializers::{
    ActivityDetail, AnnouncementDetail, HomepageActivity, HomepageJumbotron, HomepageNews,
    ImageDetail, NewsDetail, SerializeContext, TagDetail,
};
use astra::{Request, Response};
use std::collections::HashMap;
use std::time::Instant;

pub const HOMEPAGE_NEWS_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    HomepageJumbotrons,
    HomepageActivities(ActivityKind),
    HomepageNews,
    Activities(ActivityKind),
    Activity(ActivityKind, i64),
    NewsList,
    News(i64),
    Announcements,
    Tags,
    Image(i64),
}

fn route(path: &str) -> Option<Route> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let route = match segments.as_slice() {
        ["api", "homepage", "jumbotrons"] => Route::HomepageJumbotrons,
        ["api", "homepage", "events"] => Route::HomepageActivities(ActivityKind::Event),
        ["api", "homepage", "projects"] => Route::HomepageActivities(ActivityKind::Project),
        ["api", "homepage", "news"] => Route::HomepageNews,
        ["api", "events"] => Route::Activities(ActivityKind::Event),
        ["api", "events", id] => Route::Activity(ActivityKind::Event, id.parse().ok()?),
        ["api", "projects"] => Route::Activities(ActivityKind::Project),
        ["api", "projects", id] => Route::Activity(ActivityKind::Project, id.parse().ok()?),
        ["api", "news"] => Route::NewsList,
        ["api", "news", id] => Route::News(id.parse().ok()?),
        ["api", "announcements"] => Route::Announcements,
        ["api", "tags"] => Route::Tags,
        ["api", "images", id] => Route::Image(id.parse().ok()?),
        _ => return None,
    };
    Some(route)
}

/// Entry point used by the server: never fails, logs every request.
pub fn respond(req: Request, app: &App) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let resp = match handle(req, app) {
        Ok(resp) => resp,
        Err(err) => {
            match &err {
                ServerError::DbError(_) | ServerError::InternalError => {
                    tracing::error!(%method, %path, error = %err, "request failed")
                }
                ServerError::InvalidInput(_) => {
                    tracing::warn!(%method, %path, error = %err, "bad record")
                }
                _ => {}
            }
            error_to_response(err)
        }
    };

    tracing::info!(
        %method,
        %path,
        status = resp.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "handled request"
    );
    resp
}

pub fn handle(req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str();
    let Some(route) = route(req.uri().path()) else {
        return Err(ServerError::NotFound);
    };
    if method != "GET" {
        return Err(ServerError::MethodNotAllowed);
    }

    let request_ctx = request_context(&req, &app.config)?;
    let ctx = SerializeContext::new(Some(&request_ctx), &app.config.media, app.clock.now());
    let query = parse_query(&req);

    match route {
        Route::HomepageJumbotrons => {
            let rows = app.db.with_conn(|conn| jumbotrons::list_jumbotrons(conn))?;
            let out: Vec<_> = rows.iter().map(|j| HomepageJumbotron::new(j, &ctx)).collect();
            json_response(200, &out)
        }
        Route::HomepageActivities(kind) => {
            let filter = ActivityFilter {
                featured_only: true,
                camp: None,
            };
            let rows = app
                .db
                .with_conn(|conn| activities::list_activities(conn, kind, filter))?;
            let out = rows
                .iter()
                .map(|a| HomepageActivity::new(a, &ctx))
                .collect::<Result<Vec<_>, _>>()?;
            json_response(200, &out)
        }
        Route::HomepageNews => {
            let rows = app
                .db
                .with_conn(|conn| news::list_news(conn, Some(HOMEPAGE_NEWS_LIMIT)))?;
            let out: Vec<_> = rows.iter().map(|n| HomepageNews::new(n, &ctx)).collect();
            json_response(200, &out)
        }
        Route::Activities(kind) => {
            let filter = ActivityFilter {
                featured_only: false,
                camp: camp_filter(&query)?,
            };
            let status = status_filter(&query)?;

            let rows = app
                .db
                .with_conn(|conn| activities::list_activities(conn, kind, filter))?;
            let mut out = Vec::with_capacity(rows.len());
            for activity in &rows {
                let detail = ActivityDetail::new(activity, &ctx)?;
                if status.map_or(true, |s| s == detail.status) {
                    out.push(detail);
                }
            }
            json_response(200, &out)
        }
        Route::Activity(kind, id) => {
            let row = app
                .db
                .with_conn(|conn| activities::get_activity(conn, kind, id))?
                .ok_or(ServerError::NotFound)?;
            json_response(200, &ActivityDetail::new(&row, &ctx)?)
        }
        Route::NewsList => {
            let rows = app.db.with_conn(|conn| news::list_news(conn, None))?;
            let out = rows
                .iter()
                .map(|n| NewsDetail::new(n, &ctx))
                .collect::<Result<Vec<_>, _>>()?;
            json_response(200, &out)
        }
        Route::News(id) => {
            let row = app
                .db
                .with_conn(|conn| news::get_news(conn, id))?
                .ok_or(ServerError::NotFound)?;
            json_response(200, &NewsDetail::new(&row, &ctx)?)
        }
        Route::Announcements => {
            let rows = app.db.with_conn(|conn| news::list_announcements(conn))?;
            let out = rows
                .iter()
                .map(AnnouncementDetail::new)
                .collect::<Result<Vec<_>, _>>()?;
            json_response(200, &out)
        }
        Route::Tags => {
            let rows = app.db.with_conn(|conn| tags::list_tags(conn))?;
            let out: Vec<TagDetail> = rows.iter().map(TagDetail::from).collect();
            json_response(200, &out)
        }
        Route::Image(id) => {
            let row = app
                .db
                .with_conn(|conn| images::get_image(conn, id))?
                .ok_or(ServerError::NotFound)?;
            json_response(200, &ImageDetail::new(&row, &ctx))
        }
    }
}

/// Scheme and host the client used to reach us.
///
/// `X-Forwarded-Proto` is only read when `trust_forwarded_proto` is set,
/// i.e. when a known TLS-terminating proxy overwrites it. Falls back to the
/// configured host when the request carries no `Host` header.
pub fn request_context(req: &Request, config: &AppConfig) -> Result<RequestContext, ServerError> {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .map(|v| {
                v.to_str()
                    .map_err(|_| ServerError::BadRequest(format!("{name} header is not ASCII")))
            })
            .transpose()
    };

    let host = header("host")?.unwrap_or(&config.default_host);
    let forwarded = if config.trust_forwarded_proto {
        header("x-forwarded-proto")?
    } else {
        None
    };
    let scheme = forwarded
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .unwrap_or("http");

    RequestContext::new(scheme, host)
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

fn status_filter(query: &HashMap<String, String>) -> Result<Option<Status>, ServerError> {
    match query.get("status") {
        None => Ok(None),
        Some(raw) => Status::parse(raw)
            .map(Some)
            .ok_or_else(|| ServerError::BadRequest(format!("unknown status {raw:?}"))),
    }
}

fn camp_filter(query: &HashMap<String, String>) -> Result<Option<Camp>, ServerError> {
    match query.get("camp") {
        None => Ok(None),
        Some(raw) => Camp::parse(raw)
            .map(Some)
            .ok_or_else(|| ServerError::BadRequest(format!("unknown camp {raw:?}"))),
    }
}
