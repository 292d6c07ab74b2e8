use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use movie_hub::api::{create_router, AppState, ViewSettings};
use movie_hub::db::{FileStorage, KeyValueStore, StorageKey};
use movie_hub::error::AppResult;
use movie_hub::models::Movie;
use movie_hub::services::{ingest_catalog, providers::CatalogSource};

struct StaticSource(Value);

#[async_trait::async_trait]
impl CatalogSource for StaticSource {
    async fn fetch_catalog(&self) -> AppResult<Value> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Storage that serves a fixed watchlist and refuses every write
struct ReadOnlyStorage;

impl KeyValueStore for ReadOnlyStorage {
    fn get(&self, key: StorageKey) -> Option<String> {
        match key {
            StorageKey::Watchlist => Some(r#"[{"id":"1","title":"Dune"}]"#.to_string()),
            StorageKey::Ratings => Some(r#"{"1":6}"#.to_string()),
        }
    }

    fn set(&self, _key: StorageKey, _value: &str) -> AppResult<()> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
    }

    fn name(&self) -> &'static str {
        "read-only"
    }
}

fn numbered_catalog(n: usize) -> Vec<Movie> {
    (1..=n)
        .map(|i| Movie::new(i.to_string(), format!("Movie {}", i)))
        .collect()
}

fn create_test_server_with(state: AppState) -> TestServer {
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn create_test_server(movies: Vec<Movie>) -> TestServer {
    let state = AppState::in_memory();
    state.catalog.set_movies(movies);
    create_test_server_with(state)
}

fn dune_and_arrival() -> Vec<Movie> {
    let mut dune = Movie::new("1", "Dune");
    dune.poster = "https://example.com/dune.jpg".to_string();
    dune.imdb_rating = Some("8.0".to_string());
    let mut arrival = Movie::new("2", "Arrival");
    arrival.imdb_rating = Some("7.9".to_string());
    vec![dune, arrival]
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(dune_and_arrival());
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["movies"], 2);
}

#[tokio::test]
async fn test_request_id_header_present() {
    let server = create_test_server(Vec::new());
    let response = server.get("/health").await;
    let header = response.header("x-request-id");
    assert!(!header.is_empty());
}

#[tokio::test]
async fn test_home_pagination() {
    let server = create_test_server(numbered_catalog(40));

    let first: Value = server.get("/movies").await.json();
    assert_eq!(first["showing"], 15);
    assert_eq!(first["total"], 40);
    assert_eq!(first["has_more"], true);
    assert_eq!(first["remaining"], 25);
    assert_eq!(first["movies"].as_array().unwrap().len(), 15);

    let second: Value = server.get("/movies").add_query_param("pages", 2).await.json();
    assert_eq!(second["showing"], 30);

    let capped: Value = server.get("/movies").add_query_param("pages", 4).await.json();
    assert_eq!(capped["showing"], 40);
    assert_eq!(capped["has_more"], false);
    assert_eq!(capped["remaining"], 0);
}

#[tokio::test]
async fn test_listing_resolves_poster_url() {
    let server = create_test_server(dune_and_arrival());

    let body: Value = server.get("/movies").await.json();
    let movies = body["movies"].as_array().unwrap();
    assert_eq!(movies[0]["poster_url"], "https://example.com/dune.jpg");
    assert_eq!(
        movies[1]["poster_url"],
        "https://via.placeholder.com/300x450?text=No+Image"
    );
    assert_eq!(movies[0]["imdbRating"], "8.0");
}

#[tokio::test]
async fn test_search_case_insensitive() {
    let mut movies = dune_and_arrival();
    movies.push(Movie::new("3", "Inception"));
    let server = create_test_server(movies);

    let body: Value = server
        .get("/search")
        .add_query_param("query", "incep")
        .await
        .json();
    assert_eq!(body["count"], 1);
    assert_eq!(body["movies"][0]["title"], "Inception");

    let all: Value = server.get("/search").await.json();
    assert_eq!(all["count"], 3);
    assert_eq!(all["movies"][0]["id"], "1");
}

#[tokio::test]
async fn test_top_rated_order() {
    let server = create_test_server(dune_and_arrival());
    let body: Value = server.get("/movies/top-rated").await.json();
    assert_eq!(body["movies"][0]["title"], "Dune");
    assert_eq!(body["movies"][1]["title"], "Arrival");
}

#[tokio::test]
async fn test_most_watched_limited_and_sorted() {
    let server = create_test_server(numbered_catalog(30));

    let body: Value = server.get("/movies/most-watched").await.json();
    let entries = body["movies"].as_array().unwrap();

    assert_eq!(body["total"], 30);
    assert_eq!(entries.len(), 20);
    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[0]["trending"], true);
    assert_eq!(entries[5]["trending"], false);

    let views: Vec<u64> = entries.iter().map(|e| e["views"].as_u64().unwrap()).collect();
    assert!(views.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_most_watched_stable_within_session() {
    let settings = ViewSettings {
        stable_popularity: true,
        ..ViewSettings::default()
    };
    let state = AppState::new(Arc::new(movie_hub::db::MemoryStorage::new()), settings);
    state.catalog.set_movies(numbered_catalog(10));
    let server = create_test_server_with(state);

    let first: Value = server.get("/movies/most-watched").await.json();
    let second: Value = server.get("/movies/most-watched").await.json();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_movie_detail_and_not_found() {
    let server = create_test_server(dune_and_arrival());

    let response = server.get("/movies/1").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["movie"]["title"], "Dune");
    assert_eq!(body["user_rating"], Value::Null);
    assert_eq!(body["in_watchlist"], false);

    assert_eq!(body["display"]["rating"], "8.0");
    assert_eq!(body["display"]["year"], "N/A");
    assert_eq!(body["display"]["runtime"], "2h");
    assert_eq!(body["display"]["plot"], "No description available.");

    let response = server.get("/movies/999").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "Movie not found");
}

#[tokio::test]
async fn test_watchlist_add_duplicate_remove() {
    let server = create_test_server(dune_and_arrival());
    let dune = json!({ "id": "1", "title": "Dune" });

    let response = server.post("/watchlist").json(&dune).await;
    response.assert_status(StatusCode::CREATED);

    let list: Vec<Value> = server.get("/watchlist").await.json();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], "1");

    let response = server.post("/watchlist").json(&dune).await;
    response.assert_status(StatusCode::CONFLICT);
    let list: Vec<Value> = server.get("/watchlist").await.json();
    assert_eq!(list.len(), 1);

    let membership: Value = server.get("/watchlist/1").await.json();
    assert_eq!(membership["in_watchlist"], true);

    let response = server.delete("/watchlist/1").await;
    response.assert_status_ok();
    let remaining: Vec<Value> = response.json();
    assert!(remaining.is_empty());

    let membership: Value = server.get("/watchlist/1").await.json();
    assert_eq!(membership["in_watchlist"], false);
}

#[tokio::test]
async fn test_detail_falls_back_to_watchlist_snapshot() {
    let state = AppState::in_memory();
    state.catalog.set_movies(dune_and_arrival());
    let catalog = Arc::clone(&state.catalog);
    let server = create_test_server_with(state);

    let mut dune = json!({ "id": "1", "title": "Dune", "year": 2021, "runtime": "155 min" });
    server
        .post("/watchlist")
        .json(&dune)
        .await
        .assert_status(StatusCode::CREATED);
    server
        .put("/ratings/1")
        .json(&json!({ "rating": 9 }))
        .await
        .assert_status_ok();

    catalog.reset();

    let response = server.get("/movies/1").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["in_watchlist"], true);
    assert_eq!(body["user_rating"], 9);
    assert_eq!(body["display"]["year"], "2021");
    assert_eq!(body["display"]["runtime"], "155 min");
    dune["poster"] = json!("");
    dune["poster_url"] = json!("https://via.placeholder.com/300x450?text=No+Image");
    assert_eq!(body["movie"], dune);

    server
        .get("/movies/2")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_storage_write_failure_is_server_error() {
    let state = AppState::new(Arc::new(ReadOnlyStorage), ViewSettings::default());
    let server = create_test_server_with(state);

    let response = server
        .post("/watchlist")
        .json(&json!({ "id": "2", "title": "Arrival" }))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Storage error"));

    server
        .delete("/watchlist/1")
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    server
        .put("/ratings/1")
        .json(&json!({ "rating": 9 }))
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let list: Vec<Value> = server.get("/watchlist").await.json();
    assert_eq!(list, vec![json!({ "id": "1", "title": "Dune", "poster": "" })]);
    let body: Value = server.get("/ratings/1").await.json();
    assert_eq!(body["rating"], 6);
}

#[tokio::test]
async fn test_watchlist_rejects_empty_id() {
    let server = create_test_server(Vec::new());
    let response = server
        .post("/watchlist")
        .json(&json!({ "id": "", "title": "Dune" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rating_flow() {
    let server = create_test_server(dune_and_arrival());

    let response = server.put("/ratings/1").json(&json!({ "rating": 8 })).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["rating"], 8);

    let body: Value = server.get("/ratings/1").await.json();
    assert_eq!(body["rating"], 8);

    let response = server.put("/ratings/1").json(&json!({ "rating": 11 })).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let response = server.put("/ratings/1").json(&json!({ "rating": 0 })).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = server.get("/ratings").await.json();
    assert_eq!(body, json!({ "1": 8 }));

    let detail: Value = server.get("/movies/1").await.json();
    assert_eq!(detail["user_rating"], 8);
}

#[tokio::test]
async fn test_rating_missing_selection() {
    let server = create_test_server(dune_and_arrival());

    let response = server.put("/ratings/1").json(&json!({})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Please select a rating");

    let body: Value = server.get("/ratings/1").await.json();
    assert_eq!(body["rating"], Value::Null);
}

#[tokio::test]
async fn test_ingestion_then_browse() {
    let state = AppState::in_memory();
    let source = StaticSource(json!({
        "data": [
            { "id": 1, "title": "Dune", "year": 2021 },
            { "id": 2, "title": "Arrival", "year": 2016 },
            { "id": 3, "title": "" },
            { "title": "No id" }
        ]
    }));

    let admitted = ingest_catalog(&source, &state.catalog).await;
    assert_eq!(admitted, 2);

    let server = create_test_server_with(state);
    let body: Value = server.get("/movies").await.json();
    assert_eq!(body["total"], 2);
    assert_eq!(body["movies"][0]["id"], "1");
    assert_eq!(body["movies"][1]["year"], 2016);
}

#[tokio::test]
async fn test_watchlist_and_ratings_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let storage = Arc::new(FileStorage::open(dir.path()).unwrap());
        let server = create_test_server_with(AppState::new(storage, ViewSettings::default()));
        server
            .post("/watchlist")
            .json(&json!({ "id": "1", "title": "Dune" }))
            .await
            .assert_status(StatusCode::CREATED);
        server
            .put("/ratings/1")
            .json(&json!({ "rating": 9 }))
            .await
            .assert_status_ok();
    }

    let storage = Arc::new(FileStorage::open(dir.path()).unwrap());
    let server = create_test_server_with(AppState::new(storage, ViewSettings::default()));

    let list: Vec<Value> = server.get("/watchlist").await.json();
    assert_eq!(list.len(), 1);
    let body: Value = server.get("/ratings/1").await.json();
    assert_eq!(body["rating"], 9);
}
