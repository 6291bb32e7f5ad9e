use crate::app::App;
use crate::config::AppConfig;
use crate::db::activities::insert_activity;
use crate::db::connection::init_db;
use crate::db::images::insert_image;
use crate::domain::content::{ActivityKind, Camp, NewActivity, NewImage};
use crate::domain::FixedClock;
use crate::router::handle;
use astra::{Body, Request};
use chrono::{DateTime, Duration, TimeZone, Utc};
use http::Method;
use std::io::Read;
use tempfile::TempDir;

pub const TEST_IMAGE: &str = "images/content/test_U5U97df.jpg";

/// An app wired to a throwaway database and a pinned clock.
pub struct TestApp {
    pub app: App,
    // Keeps the database file alive for the duration of the test.
    _dir: TempDir,
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 3, 19, 14, 35, 46).unwrap()
}

pub fn day() -> Duration {
    Duration::days(1)
}

/// Initialize a fresh test DB using the production schema
pub fn init_test_app() -> TestApp {
    init_test_app_with(AppConfig::default())
}

pub fn init_test_app_with(config: AppConfig) -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.sqlite3");

    let config = AppConfig {
        db_path: db_path.to_string_lossy().into_owned(),
        ..config
    };
    let app = App::with_clock(config, Box::new(FixedClock(fixed_now())));

    init_db(&app.db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    TestApp { app, _dir: dir }
}

pub fn seed_image(app: &App, path: &str, tags: &[&str]) -> i64 {
    let image = NewImage {
        title: "eating_me".to_string(),
        image: path.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    };
    app.db
        .with_conn(|conn| insert_image(conn, &image, fixed_now()))
        .expect("Failed to insert image")
}

pub fn new_activity(
    title: &str,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    image_id: i64,
) -> NewActivity {
    NewActivity {
        title: title.to_string(),
        description: "description 1".to_string(),
        start_date: start,
        end_date: end,
        camp: Camp::General,
        image_id,
        is_featured: true,
    }
}

pub fn seed_activity(app: &App, kind: ActivityKind, activity: &NewActivity) -> i64 {
    app.db
        .with_conn(|conn| insert_activity(conn, kind, activity, fixed_now()))
        .expect("Failed to insert activity")
}

/// Issue a GET as the test client would, returning status and parsed JSON body.
pub fn get(app: &App, uri: &str) -> (u16, serde_json::Value) {
    let req = http::Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("Host", "testserver")
        .body(Body::empty())
        .unwrap();
    send(app, req)
}

/// Runs a request through the router, mapping errors the way the server does.
pub fn send(app: &App, req: Request) -> (u16, serde_json::Value) {
    let resp = match handle(req, app) {
        Ok(resp) => resp,
        Err(err) => crate::responses::error_to_response(err),
    };
    let status = resp.status().as_u16();

    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();

    let json = serde_json::from_str(&body)
        .unwrap_or_else(|e| panic!("Response was not JSON ({e}): {body}"));
    (status, json)
}
