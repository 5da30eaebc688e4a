//! API integration tests
//!
//! Tests for the region and event REST endpoints

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, HeaderName, HeaderValue, Request, StatusCode};
use axum::Router;
use axum_test::TestServer;
use paralympics::database::entities::regions;
use paralympics::database::setup_database;
use paralympics::server::app::create_app;
use sea_orm::{Database, DatabaseConnection, EntityTrait};
use serde_json::{json, Value};
use tempfile::NamedTempFile;
use tower::ServiceExt;

/// Create a test server backed by a temporary SQLite file
async fn setup_test_server() -> Result<(TestServer, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.path().display());

    let db = Database::connect(&db_url).await?;
    setup_database(&db).await?;

    let app = create_app(db, Some("*"))?;
    let server = TestServer::new(app)?;

    Ok((server, temp_file))
}

/// Router and connection over a temporary SQLite file, for tests that drive
/// the service from many tasks at once
async fn setup_test_router() -> Result<(Router, DatabaseConnection, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.path().display());

    let db = Database::connect(&db_url).await?;
    setup_database(&db).await?;

    let app = create_app(db.clone(), Some("*"))?;
    Ok((app, db, temp_file))
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> Result<StatusCode> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string()))?,
        None => request.body(Body::empty())?,
    };
    let response = app.oneshot(request).await?;
    Ok(response.status())
}

fn rome_1960() -> Value {
    json!({
        "type": "summer",
        "year": 1960,
        "country": "Italy",
        "host": "Rome",
        "NOC": "ITA",
        "start": "18/09/1960",
        "end": "25/09/1960",
        "duration": 7,
        "disabilities_included": "Spinal injury",
        "countries": 23,
        "events": 57,
        "sports": 8,
        "participants": 209,
        "highlights": "First Games"
    })
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "paralympics-rest");
    assert!(body["version"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_region_lifecycle() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let payload = json!({"NOC": "ZZZ", "region": "Testland", "notes": ""});
    let response = server.post("/regions").json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"message": "Region added with NOC= ZZZ"})
    );

    let response = server.get("/regions/ZZZ").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), payload);

    let response = server.delete("/regions/ZZZ").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"message": "Region ZZZ deleted."})
    );

    let response = server.get("/regions/ZZZ").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({"message": "Region ZZZ not found."})
    );

    Ok(())
}

#[tokio::test]
async fn test_list_regions_and_repeatable_reads() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let response = server.get("/regions").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Vec<Value>>().len(), 0);

    for (code, name) in [("SWE", "Sweden"), ("GBR", "UK")] {
        let response = server
            .post("/regions")
            .json(&json!({"NOC": code, "region": name}))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    let regions: Vec<Value> = server.get("/regions").await.json();
    assert_eq!(regions.len(), 2);
    assert_eq!(regions[0]["NOC"], "GBR");
    assert_eq!(regions[1]["NOC"], "SWE");
    assert_eq!(regions[1]["notes"], Value::Null);

    let first: Value = server.get("/regions/GBR").await.json();
    let second: Value = server.get("/regions/GBR").await.json();
    assert_eq!(first, second);

    Ok(())
}

#[tokio::test]
async fn test_region_without_name_is_rejected() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let response = server
        .post("/regions")
        .json(&json!({"NOC": "ZZZ", "notes": "no name"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("The Region details failed validation"));

    let regions: Vec<Value> = server.get("/regions").await.json();
    assert!(regions.is_empty());

    let response = server.get("/regions/ZZZ").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_region_malformed_bodies() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let response = server
        .post("/regions")
        .bytes("not json".into())
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server
        .post("/regions")
        .json(&json!({"NOC": "TOOLONG", "region": "Testland"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_region_is_a_server_error() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let payload = json!({"NOC": "GBR", "region": "UK"});
    let response = server.post("/regions").json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server.post("/regions").json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({"message": "An Internal Server Error occurred."})
    );

    let regions: Vec<Value> = server.get("/regions").await.json();
    assert_eq!(regions.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_region_patch_changes_only_supplied_fields() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    server
        .post("/regions")
        .json(&json!({"NOC": "GBR", "region": "UK", "notes": "Great Britain"}))
        .await;

    let response = server
        .patch("/regions/GBR")
        .json(&json!({"notes": "Team GB"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"message": "Region GBR updated."})
    );

    let region: Value = server.get("/regions/GBR").await.json();
    assert_eq!(
        region,
        json!({"NOC": "GBR", "region": "UK", "notes": "Team GB"})
    );

    // An empty patch is accepted and leaves the row as it was
    let response = server.patch("/regions/GBR").json(&json!({})).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let unchanged: Value = server.get("/regions/GBR").await.json();
    assert_eq!(unchanged, region);

    Ok(())
}

#[tokio::test]
async fn test_region_patch_errors() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let response = server
        .patch("/regions/XXX")
        .json(&json!({"notes": "nothing here"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    server
        .post("/regions")
        .json(&json!({"NOC": "GBR", "region": "UK"}))
        .await;

    let response = server
        .patch("/regions/GBR")
        .json(&json!({"region": null}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server
        .patch("/regions/GBR")
        .json(&json!({"NOC": "ENG"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let region: Value = server.get("/regions/GBR").await.json();
    assert_eq!(region["region"], "UK");

    Ok(())
}

#[tokio::test]
async fn test_delete_missing_region() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let response = server.delete("/regions/XXX").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({"message": "Region XXX not found."})
    );

    Ok(())
}

#[tokio::test]
async fn test_event_lifecycle() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let response = server.post("/events").json(&rome_1960()).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"message": "Event added with id= 1"})
    );

    let response = server.get("/events/1").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let event: Value = response.json();
    assert_eq!(event["id"], 1);
    assert_eq!(event["type"], "summer");
    assert_eq!(event["NOC"], "ITA");
    assert_eq!(event["participants"], 209);
    assert_eq!(event["participants_m"], Value::Null);

    let response = server
        .patch("/events/1")
        .json(&json!({"participants_m": 180, "participants_f": 29}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"message": "Event with id=1 updated."})
    );

    let event: Value = server.get("/events/1").await.json();
    assert_eq!(event["participants_m"], 180);
    assert_eq!(event["participants_f"], 29);
    assert_eq!(event["host"], "Rome");

    let events: Vec<Value> = server.get("/events").await.json();
    assert_eq!(events.len(), 1);

    let response = server.delete("/events/1").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"message": "Event 1 deleted."})
    );

    let response = server.get("/events/1").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_event_errors_map_to_client_statuses() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let response = server.get("/events/42").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({"message": "Event 42 not found."})
    );

    let response = server.get("/events/forty-two").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = server.delete("/events/42").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = server
        .patch("/events/42")
        .json(&json!({"sports": 9}))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = server
        .post("/events")
        .json(&json!({"type": "summer", "year": "sixty"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let events: Vec<Value> = server.get("/events").await.json();
    assert!(events.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_event_patch_validation() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    server.post("/events").json(&rome_1960()).await;

    let response = server
        .patch("/events/1")
        .json(&json!({"year": null}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server
        .patch("/events/1")
        .json(&json!({"event_id": 1}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let event: Value = server.get("/events/1").await.json();
    assert_eq!(event["year"], 1960);

    Ok(())
}

#[tokio::test]
async fn test_unknown_path_returns_json_404() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let response = server.get("/athletes").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["message"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_cors_headers() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let response = server
        .get("/regions")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("http://localhost:8050"),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_some());

    Ok(())
}

#[tokio::test]
async fn test_unsupported_method_returns_json_405() -> Result<()> {
    let (server, _db_file) = setup_test_server().await?;

    let response = server
        .put("/regions")
        .json(&json!({"NOC": "ZZZ", "region": "Testland"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = response.json();
    assert!(body["message"].is_string());

    let response = server.post("/events/1").json(&rome_1960()).await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(response.json::<Value>()["message"].is_string());

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_patches_all_succeed() -> Result<()> {
    let (app, db, _db_file) = setup_test_router().await?;

    let created = send(
        app.clone(),
        "POST",
        "/regions",
        Some(json!({"NOC": "GBR", "region": "UK"})),
    )
    .await?;
    assert_eq!(created, StatusCode::OK);

    let mut tasks = Vec::new();
    for n in 0..40 {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            send(app, "PATCH", "/regions/GBR", Some(json!({"notes": format!("n{}", n)}))).await
        }));
    }

    let mut notes_sent = Vec::new();
    for (n, task) in tasks.into_iter().enumerate() {
        assert_eq!(task.await??, StatusCode::OK, "patch {} failed", n);
        notes_sent.push(format!("n{}", n));
    }

    let region = regions::Entity::find_by_id("GBR")
        .one(&db)
        .await?
        .expect("GBR still present");
    assert_eq!(region.region, "UK");
    let notes = region.notes.expect("notes written");
    assert!(notes_sent.contains(&notes));

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_deletes_remove_once() -> Result<()> {
    let (app, db, _db_file) = setup_test_router().await?;

    let created = send(
        app.clone(),
        "POST",
        "/regions",
        Some(json!({"NOC": "ZZZ", "region": "Testland"})),
    )
    .await?;
    assert_eq!(created, StatusCode::OK);

    let mut tasks = Vec::new();
    for _ in 0..20 {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            send(app, "DELETE", "/regions/ZZZ", None).await
        }));
    }

    let mut deleted = 0;
    for task in tasks {
        match task.await?? {
            StatusCode::OK => deleted += 1,
            StatusCode::NOT_FOUND => {}
            other => panic!("unexpected status {}", other),
        }
    }
    assert_eq!(deleted, 1);
    assert!(regions::Entity::find_by_id("ZZZ").one(&db).await?.is_none());

    Ok(())
}
