use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use engine::{Index, SharedIndex};
use http_body_util::BodyExt;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;
use tower::ServiceExt;

fn write_tiny_corpus(dir: &std::path::Path) {
    fs::write(dir.join("rust_intro.txt"), "Rust rust rust systems.").unwrap();
    fs::write(dir.join("learning.txt"), "Learning rust.").unwrap();
    fs::write(dir.join("go.txt"), "Go has goroutines.").unwrap();
    fs::write(dir.join("python.txt"), "Python has a GIL.").unwrap();
}

fn admin_app() -> Router {
    let mut index = Index::new();
    index.add_document("a", "Alpha", "alpha words", None);
    index.add_document("b", "Beta", "beta words", None);
    index.add_document("c", "Gamma", "gamma words", None);
    let _ = index.build_index();
    server::router(SharedIndex::new(index), Some("secret".into()))
}

async fn call(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::post(uri).header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("X-ADMIN-TOKEN", token);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn search_returns_ranked_results() {
    let dir = tempdir().unwrap();
    write_tiny_corpus(dir.path());
    let app = server::build_app(&dir.path().to_string_lossy()).unwrap();

    let (status, json) = call(app, get("/search?q=rust&k=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_hits"], 2);
    let arr = json["results"].as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["doc_id"], "rust_intro");
    assert_eq!(arr[0]["title"], "Rust Intro");
    assert_eq!(arr[1]["doc_id"], "learning");
    assert!(arr[0]["score"].as_f64().unwrap() > arr[1]["score"].as_f64().unwrap());
    assert!(arr[0]["snippet"].as_str().unwrap().contains("<em>Rust</em>"));
    assert!(arr[0]["location"].as_str().unwrap().ends_with("rust_intro.txt"));
}

#[tokio::test]
async fn search_limits_to_k_but_reports_total() {
    let dir = tempdir().unwrap();
    write_tiny_corpus(dir.path());
    let app = server::build_app(&dir.path().to_string_lossy()).unwrap();

    let (_, json) = call(app, get("/search?q=rust&k=1")).await;
    assert_eq!(json["total_hits"], 2);
    assert_eq!(json["results"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn blank_and_unknown_queries_are_empty() {
    let app = admin_app();
    let (status, json) = call(app.clone(), get("/search?q=%20%20")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_hits"], 0);
    let (_, json) = call(app, get("/search?q=zebra")).await;
    assert!(json["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn doc_lookup_and_not_found() {
    let app = admin_app();
    let (status, json) = call(app.clone(), get("/doc/b")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Beta");
    assert_eq!(json["text"], "beta words");

    let (status, json) = call(app, get("/doc/missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not found");
}

#[tokio::test]
async fn stats_and_health() {
    let app = admin_app();
    let (status, json) = call(app.clone(), get("/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["document_count"], 3);
    assert_eq!(json["vocabulary_size"], 4);
    assert_eq!(json["is_indexed"], true);

    let resp = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn batch_then_commit_makes_documents_searchable() {
    let app = admin_app();
    let docs = serde_json::json!([
        { "id": "d", "title": "Delta", "content": "delta river" },
        { "id": "e", "title": "Epsilon", "body": "epsilon small", "location": "mem://e" }
    ]);
    let (status, json) = call(app.clone(), post_json("/index/batch", Some("secret"), docs)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["added"], 2);

    let (_, stats) = call(app.clone(), get("/stats")).await;
    assert_eq!(stats["is_indexed"], false);

    let (status, json) = call(app.clone(), post_json("/index/commit", Some("secret"), Value::Null)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "built");
    assert_eq!(json["documents"], 5);

    let (_, json) = call(app, get("/search?q=river")).await;
    assert_eq!(json["results"][0]["doc_id"], "d");
}

#[tokio::test]
async fn admin_endpoints_require_token() {
    let app = admin_app();
    let (status, _) = call(app.clone(), post_json("/index/commit", None, Value::Null)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = call(app, post_json("/index/commit", Some("wrong"), Value::Null)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let no_token = server::router(SharedIndex::default(), None);
    let (status, _) = call(no_token, post_json("/index/batch", Some("secret"), serde_json::json!([]))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn search_after_batch_renders_from_the_rebuilt_index() {
    let app = admin_app();
    let docs = serde_json::json!([
        { "id": "a", "title": "Alpha Revised", "content": "alpha lighthouse keeper", "location": "mem://a" }
    ]);
    let (status, _) = call(app.clone(), post_json("/index/batch", Some("secret"), docs)).await;
    assert_eq!(status, StatusCode::OK);

    // No commit: the search rebuilds and renders the replaced text.
    let (status, json) = call(app.clone(), get("/search?q=lighthouse")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_hits"], 1);
    let hit = &json["results"][0];
    assert_eq!(hit["doc_id"], "a");
    assert_eq!(hit["title"], "Alpha Revised");
    assert_eq!(hit["location"], "mem://a");
    assert_eq!(hit["snippet"], "alpha <em>lighthouse</em> keeper");

    let (_, stats) = call(app, get("/stats")).await;
    assert_eq!(stats["is_indexed"], true);
}

#[tokio::test]
async fn concurrent_batches_and_searches_stay_consistent() {
    let app = admin_app();
    let writers = (0..8).map(|round| {
        let app = app.clone();
        tokio::spawn(async move {
            let docs = serde_json::json!([
                { "id": "a", "title": "Alpha", "content": format!("alpha beacon {round}") }
            ]);
            call(app, post_json("/index/batch", Some("secret"), docs)).await.0
        })
    });
    let readers = (0..8).map(|_| {
        let app = app.clone();
        tokio::spawn(async move { call(app, get("/search?q=alpha")).await.1 })
    });
    let writers: Vec<_> = writers.collect();
    let readers: Vec<_> = readers.collect();

    for writer in writers {
        assert_eq!(writer.await.unwrap(), StatusCode::OK);
    }
    for reader in readers {
        let json = reader.await.unwrap();
        for hit in json["results"].as_array().unwrap() {
            assert_eq!(hit["doc_id"], "a");
            assert!(hit["snippet"].as_str().unwrap().contains("<em>alpha</em>"));
        }
    }
}
