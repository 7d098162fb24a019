//! End-to-end HTTP scenarios against the in-memory store.

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use api_server::handlers;
use api_server::middleware::error::error_detail;
use api_server::state::AppState;

macro_rules! test_app {
    () => {
        test_app!(AppState::in_memory())
    };
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(error_detail())
                .app_data(web::Data::new($state))
                .configure(handlers::configure_routes)
                .default_service(web::to(handlers::not_found)),
        )
        .await
    };
}

/// Call the service and decode the JSON body (`Null` when there is none).
macro_rules! send {
    ($app:expr, $req:expr $(,)?) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }};
}

#[actix_web::test]
async fn test_blog_lifecycle() {
    let app = test_app!();

    let (status, tech) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/categories")
            .set_json(json!({ "name": "Tech" })),
    );
    assert_eq!(status, StatusCode::CREATED);
    let tech_id = tech["id"].as_str().unwrap().to_string();
    assert_eq!(tech["name"], "Tech");

    let (status, duplicate) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/categories")
            .set_json(json!({ "name": "Tech" })),
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate["message"], "Category with this name already exists");

    let (status, post) = send!(
        app,
        test::TestRequest::post().uri("/api/posts").set_json(json!({
            "title": "Hello World",
            "content": "1234567890",
            "author": "Ann",
            "category": tech_id,
        })),
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(post["category"], json!({ "id": tech_id, "name": "Tech" }));
    assert_eq!(post["tags"], json!([]));
    assert_eq!(post["published"], false);
    let post_id = post["id"].as_str().unwrap().to_string();

    let (status, updated) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/posts/{}", post_id))
            .set_json(json!({ "published": true })),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["published"], true);
    assert_eq!(updated["title"], "Hello World");

    let (status, fetched) = send!(
        app,
        test::TestRequest::get().uri(&format!("/api/posts/{}", post_id)),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, updated);

    let (status, listed) = send!(app, test::TestRequest::get().uri("/api/posts"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let (status, removed) = send!(
        app,
        test::TestRequest::delete().uri(&format!("/api/posts/{}", post_id)),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["message"], "Post removed");

    let (status, missing) = send!(
        app,
        test::TestRequest::get().uri(&format!("/api/posts/{}", post_id)),
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["message"], "Post not found");
}

#[actix_web::test]
async fn test_short_title_is_rejected() {
    let app = test_app!();

    let (status, body) = send!(
        app,
        test::TestRequest::post().uri("/api/posts").set_json(json!({
            "title": "Hi",
            "content": "1234567890",
            "author": "Ann",
            "category": uuid::Uuid::new_v4().to_string(),
        })),
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().unwrap();
    assert!(errors.iter().any(|e| e["field"] == "title"));
}

#[actix_web::test]
async fn test_unknown_category_is_rejected() {
    let app = test_app!();

    let (status, body) = send!(
        app,
        test::TestRequest::post().uri("/api/posts").set_json(json!({
            "title": "Hello World",
            "content": "1234567890",
            "author": "Ann",
            "category": uuid::Uuid::new_v4().to_string(),
        })),
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid category reference");

    let (_, listed) = send!(app, test::TestRequest::get().uri("/api/posts"));
    assert_eq!(listed, json!([]));
}

#[actix_web::test]
async fn test_malformed_ids_are_bad_requests() {
    let app = test_app!();

    for req in [
        test::TestRequest::get().uri("/api/posts/abc"),
        test::TestRequest::delete().uri("/api/posts/abc"),
        test::TestRequest::put()
            .uri("/api/posts/abc")
            .set_json(json!({ "published": true })),
    ] {
        let (status, body) = send!(app, req);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["field"], "id");
        assert_eq!(body["errors"][0]["message"], "Invalid ID format");
    }
}

#[actix_web::test]
async fn test_update_reports_id_and_body_errors_together() {
    let app = test_app!();

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri("/api/posts/abc")
            .set_json(json!({ "published": "yes" })),
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["id", "published"]);
}

#[actix_web::test]
async fn test_unmatched_route() {
    let app = test_app!();

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/nothing?x=1"));

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not Found - /api/nothing?x=1");
    assert!(body["stack"].is_string());
}

#[actix_web::test]
async fn test_production_hides_stack() {
    let app = test_app!(AppState::in_memory().with_error_detail(false));

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/nothing"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Not Found - /api/nothing" }));

    let (status, body) = send!(
        app,
        test::TestRequest::get().uri("/api/posts/0b0f3e6e-8a53-4c55-9d5e-8d1f3c1f6a10"),
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Post not found" }));
}

#[actix_web::test]
async fn test_development_stack_on_handler_errors() {
    let app = test_app!();

    let (status, body) = send!(
        app,
        test::TestRequest::get().uri("/api/posts/0b0f3e6e-8a53-4c55-9d5e-8d1f3c1f6a10"),
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Post not found");
    assert!(body["stack"].as_str().unwrap().contains("NotFound"));

    // Field-level bodies never carry a stack.
    let (status, body) = send!(app, test::TestRequest::get().uri("/api/posts/abc"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("stack").is_none());
}

#[actix_web::test]
async fn test_malformed_json_body() {
    let app = test_app!();

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/categories")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json"),
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[actix_web::test]
async fn test_health_and_root() {
    let app = test_app!();

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/health"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        test::read_body(resp).await,
        web::Bytes::from_static(b"API is running...")
    );
}
