// src/tests/router_tests/activity_tests.rs
//
// Status fixtures are built relative to the pinned clock: yesterday, now and
// tomorrow.

use crate::domain::content::{ActivityKind, Camp};
use crate::tests::utils::{
    day, fixed_now, get, init_test_app, new_activity, seed_activity, seed_image, TestApp,
    TEST_IMAGE,
};
use rusqlite::params;
use serde_json::Value;

struct Seeded {
    upcoming: i64,
    ongoing: i64,
    past: i64,
    open_ended: i64,
}

fn seed_statuses(t: &TestApp, kind: ActivityKind) -> Seeded {
    let image_id = seed_image(&t.app, TEST_IMAGE, &[]);
    let now = fixed_now();
    let tomorrow = now + day();
    let yesterday = now - day();

    Seeded {
        upcoming: seed_activity(
            &t.app,
            kind,
            &new_activity("upcoming", tomorrow, Some(tomorrow), image_id),
        ),
        ongoing: seed_activity(
            &t.app,
            kind,
            &new_activity("ongoing", now, Some(tomorrow), image_id),
        ),
        past: seed_activity(
            &t.app,
            kind,
            &new_activity("past", yesterday, Some(yesterday), image_id),
        ),
        open_ended: seed_activity(
            &t.app,
            kind,
            &new_activity("ongoing no end date", now, None, image_id),
        ),
    }
}

fn status_of(body: &Value, id: i64) -> String {
    body.as_array()
        .unwrap()
        .iter()
        .find(|item| item["id"] == id)
        .unwrap_or_else(|| panic!("id {id} missing from {body}"))["status"]
        .as_str()
        .unwrap()
        .to_string()
}

#[test]
fn event_statuses() {
    let t = init_test_app();
    let ids = seed_statuses(&t, ActivityKind::Event);

    let (status, body) = get(&t.app, "/api/events/");

    assert_eq!(status, 200);
    assert_eq!(status_of(&body, ids.upcoming), "upcoming");
    assert_eq!(status_of(&body, ids.ongoing), "ongoing");
    assert_eq!(status_of(&body, ids.past), "past");
    assert_eq!(status_of(&body, ids.open_ended), "ongoing");
}

#[test]
fn project_statuses_on_detail_endpoint() {
    let t = init_test_app();
    let ids = seed_statuses(&t, ActivityKind::Project);

    for (id, expected) in [
        (ids.upcoming, "upcoming"),
        (ids.ongoing, "ongoing"),
        (ids.past, "past"),
        (ids.open_ended, "ongoing"),
    ] {
        let (status, body) = get(&t.app, &format!("/api/projects/{id}/"));
        assert_eq!(status, 200);
        assert_eq!(body["status"], expected, "project {id}");
    }

    let (_, body) = get(&t.app, &format!("/api/projects/{}", ids.open_ended));
    assert!(body["end_date"].is_null());
    assert_eq!(body["start_date"], "2022-03-19T14:35:46Z");
}

#[test]
fn list_filters_by_status() {
    let t = init_test_app();
    let ids = seed_statuses(&t, ActivityKind::Event);

    let (_, body) = get(&t.app, "/api/events/?status=ongoing");
    let mut got: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect();
    got.sort();

    let mut want = vec![ids.ongoing, ids.open_ended];
    want.sort();
    assert_eq!(got, want);

    let (_, body) = get(&t.app, "/api/events/?status=PAST");
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], ids.past);
}

#[test]
fn unknown_filters_are_rejected() {
    let t = init_test_app();

    let (status, body) = get(&t.app, "/api/events/?status=someday");
    assert_eq!(status, 400);
    assert!(body["detail"].as_str().unwrap().contains("someday"));

    let (status, _) = get(&t.app, "/api/projects/?camp=mountain");
    assert_eq!(status, 400);
}

#[test]
fn list_filters_by_camp() {
    let t = init_test_app();
    let image_id = seed_image(&t.app, TEST_IMAGE, &[]);

    let mut suba = new_activity("river cleanup", fixed_now(), None, image_id);
    suba.camp = Camp::Suba;
    let suba_id = seed_activity(&t.app, ActivityKind::Project, &suba);
    seed_activity(
        &t.app,
        ActivityKind::Project,
        &new_activity("general", fixed_now(), None, image_id),
    );

    let (_, body) = get(&t.app, "/api/projects/?camp=suba");
    let items = body.as_array().unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], suba_id);
    assert_eq!(items[0]["camp"], "suba");
}

#[test]
fn unpublished_and_missing_records_are_not_found() {
    let t = init_test_app();
    let ids = seed_statuses(&t, ActivityKind::Event);

    t.app
        .db
        .with_conn(|conn| {
            conn.execute(
                "update events set is_published = 0 where id = ?",
                params![ids.past],
            )?;
            Ok(())
        })
        .unwrap();

    let (status, _) = get(&t.app, &format!("/api/events/{}/", ids.past));
    assert_eq!(status, 404);

    let (status, _) = get(&t.app, "/api/events/9999/");
    assert_eq!(status, 404);

    let (_, body) = get(&t.app, "/api/events/");
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[test]
fn naive_stored_timestamp_is_invalid_input() {
    let t = init_test_app();
    let ids = seed_statuses(&t, ActivityKind::Event);

    t.app
        .db
        .with_conn(|conn| {
            conn.execute(
                "update events set start_date = '2022-03-19 14:35:46' where id = ?",
                params![ids.ongoing],
            )?;
            Ok(())
        })
        .unwrap();

    let (status, body) = get(&t.app, &format!("/api/events/{}/", ids.ongoing));
    assert_eq!(status, 422);
    assert!(body["detail"].as_str().unwrap().contains("2022-03-19 14:35:46"));

    // One bad row fails the listing instead of guessing a status.
    let (status, _) = get(&t.app, "/api/events/");
    assert_eq!(status, 422);

    // Other records are unaffected.
    let (status, _) = get(&t.app, &format!("/api/events/{}/", ids.past));
    assert_eq!(status, 200);
}
