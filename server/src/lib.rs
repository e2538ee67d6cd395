use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::{HeaderMap, StatusCode}, routing::{get, post}, Json, Router};
use engine::loader::load_directory;
use engine::tokenizer::tokenize;
use engine::{BuildStatus, Index, SharedIndex, Statistics};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

const MAX_K: usize = 100;
const SNIPPET_BEFORE: usize = 100;
const SNIPPET_AFTER: usize = 200;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_ms: u128,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: String,
    pub score: f64,
    pub title: String,
    pub location: Option<String>,
    pub snippet: Option<String>,
}

#[derive(Deserialize)]
pub struct BatchDoc {
    pub id: String,
    pub title: String,
    #[serde(alias = "body")]
    pub content: String,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub index: SharedIndex,
    pub admin_token: Option<String>,
}

/// Load `data_dir`, build the index and wire up the HTTP routes.
pub fn build_app(data_dir: &str) -> Result<Router> {
    let mut index = Index::new();
    load_directory(&mut index, data_dir)?;
    if index.build_index() == BuildStatus::Empty {
        tracing::warn!(data_dir, "serving an empty index");
    }
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    Ok(router(SharedIndex::new(index), admin_token))
}

pub fn router(index: SharedIndex, admin_token: Option<String>) -> Router {
    let app_state = AppState { index, admin_token };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/stats", get(stats_handler))
        .route("/index/batch", post(index_batch))
        .route("/index/commit", post(index_commit))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let k = params.k.clamp(1, MAX_K);
    let highlighter = term_pattern(&params.q);

    // Ranking and snippet rendering share one lock guard so every hit is
    // rendered from the document it was scored against.
    let (total_hits, results) = state.index.search_with(&params.q, usize::MAX, |index, scored| {
        let total_hits = scored.len();
        let results: Vec<SearchHit> = scored
            .into_iter()
            .take(k)
            .map(|hit| {
                let doc = index.get_document(&hit.doc_id);
                let excerpt = doc.and_then(|d| snippet(&d.content, highlighter.as_ref()));
                SearchHit {
                    location: doc.and_then(|d| d.location.clone()),
                    doc_id: hit.doc_id,
                    score: hit.score,
                    title: hit.title,
                    snippet: excerpt,
                }
            })
            .collect();
        (total_hits, results)
    });

    let elapsed = start.elapsed();
    Json(SearchResponse { query: params.q, took_ms: elapsed.as_millis(), took_s: elapsed.as_secs_f64(), total_hits, results })
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<String>) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    state
        .index
        .with_index(|index| {
            index.get_document(&doc_id).map(|doc| {
                json!({
                    "doc_id": doc.id,
                    "title": doc.title,
                    "location": doc.location,
                    "text": doc.content,
                })
            })
        })
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))))
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<Statistics> {
    Json(state.index.statistics())
}

/// Case-insensitive alternation of the query's terms, longest first.
fn term_pattern(query: &str) -> Option<Regex> {
    let mut terms = tokenize(query);
    terms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    terms.dedup();
    if terms.is_empty() {
        return None;
    }
    let alternation = terms.iter().map(|t| regex::escape(t)).collect::<Vec<_>>().join("|");
    RegexBuilder::new(&alternation).case_insensitive(true).build().ok()
}

/// Window of text around the first query term, with every term wrapped in `<em>`.
fn snippet(text: &str, terms: Option<&Regex>) -> Option<String> {
    if text.is_empty() { return None; }
    let Some(pat) = terms else {
        return Some(text.chars().take(SNIPPET_AFTER).collect());
    };
    let window = match pat.find(text) {
        Some(m) => {
            let start = floor_char_boundary(text, m.start().saturating_sub(SNIPPET_BEFORE));
            let end = floor_char_boundary(text, (m.start() + SNIPPET_AFTER).min(text.len()));
            &text[start..end]
        }
        None => {
            let end = text.char_indices().nth(SNIPPET_AFTER).map_or(text.len(), |(i, _)| i);
            &text[..end]
        }
    };
    Some(pat.replace_all(window, |caps: &regex::Captures| format!("<em>{}</em>", &caps[0])).into_owned())
}

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

async fn index_batch(State(state): State<AppState>, headers: HeaderMap, Json(docs): Json<Vec<BatchDoc>>) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let added = docs.len();
    for doc in docs {
        state.index.add_document(doc.id, doc.title, doc.content, doc.location);
    }
    tracing::info!(added, "batch added");
    Ok(Json(json!({ "added": added })))
}

async fn index_commit(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<BuildStatus>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    Ok(Json(state.index.build_index()))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
