// src/tests/router_tests/homepage_tests.rs

use crate::config::{AppConfig, MediaConfig};
use crate::db::jumbotrons::insert_jumbotron;
use crate::db::news::insert_news;
use crate::domain::content::{ActivityKind, NewJumbotron, NewNews};
use crate::tests::utils::{
    day, fixed_now, get, init_test_app, init_test_app_with, new_activity, seed_activity,
    seed_image, send, TEST_IMAGE,
};
use astra::Body;
use http::Method;
use rusqlite::params;

fn expected_url() -> String {
    format!("http://testserver/media/{TEST_IMAGE}")
}

#[test]
fn jumbotron_image_full_url() {
    let t = init_test_app();
    let image_id = seed_image(&t.app, TEST_IMAGE, &[]);
    t.app
        .db
        .with_conn(|conn| {
            insert_jumbotron(
                conn,
                &NewJumbotron {
                    image_id,
                    header_title: "J1".to_string(),
                    short_description: "short description 1".to_string(),
                },
                fixed_now(),
            )
        })
        .unwrap();

    let (status, body) = get(&t.app, "/api/homepage/jumbotrons/");

    assert_eq!(status, 200);
    assert_eq!(body[0]["image"], expected_url());
    assert_eq!(body[0]["header_title"], "J1");
    assert_eq!(body[0]["short_description"], "short description 1");
}

#[test]
fn event_and_project_image_full_url() {
    let t = init_test_app();
    let image_id = seed_image(&t.app, TEST_IMAGE, &[]);
    let when = fixed_now();
    seed_activity(
        &t.app,
        ActivityKind::Event,
        &new_activity("Event 1", when, Some(when), image_id),
    );
    seed_activity(
        &t.app,
        ActivityKind::Project,
        &new_activity("Project 1", when, Some(when), image_id),
    );

    for uri in ["/api/homepage/events/", "/api/homepage/projects/"] {
        let (status, body) = get(&t.app, uri);
        assert_eq!(status, 200, "{uri}");
        assert_eq!(body[0]["image"], expected_url(), "{uri}");
        assert_eq!(body[0]["status"], "ongoing", "{uri}");
        assert_eq!(body[0]["camp"], "general", "{uri}");
    }
}

#[test]
fn news_image_full_url() {
    let t = init_test_app();
    let image_id = seed_image(&t.app, TEST_IMAGE, &[]);
    t.app
        .db
        .with_conn(|conn| {
            insert_news(
                conn,
                &NewNews {
                    title: "News 1".to_string(),
                    description: "description 1".to_string(),
                    image_id,
                },
                fixed_now(),
            )
        })
        .unwrap();

    let (status, body) = get(&t.app, "/api/homepage/news");

    assert_eq!(status, 200);
    assert_eq!(body[0]["image"], expected_url());
    assert_eq!(body[0]["title"], "News 1");
}

#[test]
fn homepage_lists_only_featured_activities() {
    let t = init_test_app();
    let image_id = seed_image(&t.app, TEST_IMAGE, &[]);

    let featured = seed_activity(
        &t.app,
        ActivityKind::Event,
        &new_activity("featured", fixed_now(), None, image_id),
    );
    let mut hidden = new_activity("not featured", fixed_now(), None, image_id);
    hidden.is_featured = false;
    seed_activity(&t.app, ActivityKind::Event, &hidden);

    let (_, body) = get(&t.app, "/api/homepage/events/");
    let items = body.as_array().unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], featured);

    // The full listing still has both.
    let (_, body) = get(&t.app, "/api/events/");
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[test]
fn homepage_news_keeps_three_newest() {
    let t = init_test_app();
    let image_id = seed_image(&t.app, TEST_IMAGE, &[]);

    for n in 0..5 {
        t.app
            .db
            .with_conn(|conn| {
                insert_news(
                    conn,
                    &NewNews {
                        title: format!("News {n}"),
                        description: String::new(),
                        image_id,
                    },
                    fixed_now() + day() * n,
                )
            })
            .unwrap();
    }

    let (_, body) = get(&t.app, "/api/homepage/news/");
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();

    assert_eq!(titles, vec!["News 4", "News 3", "News 2"]);
}

#[test]
fn homepage_news_orders_by_instant_across_offsets() {
    let t = init_test_app();
    let image_id = seed_image(&t.app, TEST_IMAGE, &[]);

    // Stored text sorts N0 first, but it is the oldest instant (17:00Z).
    let created = [
        ("N0", "2022-03-20T01:00:00+08:00"),
        ("N1", "2022-03-19T18:00:00Z"),
        ("N2", "2022-03-19T19:00:00Z"),
        ("N3", "2022-03-19 20:00:00+00:00"),
    ];
    t.app
        .db
        .with_conn(|conn| {
            for (title, at) in created {
                let id = insert_news(
                    conn,
                    &NewNews {
                        title: title.to_string(),
                        description: String::new(),
                        image_id,
                    },
                    fixed_now(),
                )?;
                conn.execute(
                    "update news set created_at = ?1 where id = ?2",
                    params![at, id],
                )?;
            }
            Ok(())
        })
        .unwrap();

    let (status, body) = get(&t.app, "/api/homepage/news/");
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();

    assert_eq!(status, 200);
    assert_eq!(titles, vec!["N3", "N2", "N1"]);
}

#[test]
fn forwarded_proto_and_mount_prefix_shape_the_url() {
    let t = init_test_app_with(AppConfig {
        media: MediaConfig::new("uploads"),
        trust_forwarded_proto: true,
        ..AppConfig::default()
    });
    let image_id = seed_image(&t.app, TEST_IMAGE, &[]);
    seed_activity(
        &t.app,
        ActivityKind::Project,
        &new_activity("Project 1", fixed_now(), None, image_id),
    );

    let req = http::Request::builder()
        .method(Method::GET)
        .uri("/api/homepage/projects/")
        .header("Host", "kalunwa.example.org:8443")
        .header("X-Forwarded-Proto", "https")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&t.app, req);

    assert_eq!(status, 200);
    assert_eq!(
        body[0]["image"],
        format!("https://kalunwa.example.org:8443/uploads/{TEST_IMAGE}")
    );
}

#[test]
fn forwarded_proto_is_ignored_unless_trusted() {
    let t = init_test_app();
    let image_id = seed_image(&t.app, TEST_IMAGE, &[]);
    seed_activity(
        &t.app,
        ActivityKind::Event,
        &new_activity("Event 1", fixed_now(), None, image_id),
    );

    let req = http::Request::builder()
        .method(Method::GET)
        .uri("/api/homepage/events/")
        .header("Host", "testserver")
        .header("X-Forwarded-Proto", "https")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&t.app, req);

    assert_eq!(status, 200);
    assert_eq!(body[0]["image"], expected_url());
}

#[test]
fn missing_host_falls_back_to_configured_default() {
    let t = init_test_app_with(AppConfig {
        default_host: "fallback.local".to_string(),
        ..AppConfig::default()
    });
    let image_id = seed_image(&t.app, TEST_IMAGE, &[]);
    seed_activity(
        &t.app,
        ActivityKind::Event,
        &new_activity("Event 1", fixed_now(), None, image_id),
    );

    let req = http::Request::builder()
        .method(Method::GET)
        .uri("/api/homepage/events/")
        .body(Body::empty())
        .unwrap();
    let (_, body) = send(&t.app, req);

    assert_eq!(
        body[0]["image"],
        format!("http://fallback.local/media/{TEST_IMAGE}")
    );
}

#[test]
fn image_without_file_serializes_as_null() {
    let t = init_test_app();
    let image_id = seed_image(&t.app, "", &[]);
    seed_activity(
        &t.app,
        ActivityKind::Event,
        &new_activity("Event 1", fixed_now(), None, image_id),
    );

    let (_, body) = get(&t.app, "/api/homepage/events/");

    assert!(body[0]["image"].is_null());
}
