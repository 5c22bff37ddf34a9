use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Form, Json, Router,
    body::Body,
    extract::{Path, Query, State},
    http::{
        HeaderMap, Request, StatusCode,
        header::{AUTHORIZATION, RETRY_AFTER},
    },
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower::ServiceExt;

use tophits::{
    config::default_features,
    management,
    report::{ERROR_MESSAGE, FAILURE_MESSAGE},
    server::{AppState, make_app},
    spotify::{Endpoints, SpotifyClient},
    types::Credentials,
};

const TOKEN: &str = "test-token";

// Mock of the Spotify accounts and Web API endpoints used by a lookup.

async fn token(
    headers: HeaderMap,
    Form(params): Form<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    // base64("id:secret")
    let authorized = headers
        .get(AUTHORIZATION)
        .is_some_and(|v| v == "Basic aWQ6c2VjcmV0");
    let grant = params.get("grant_type").map(String::as_str);
    if !authorized || grant != Some("client_credentials") {
        return Err(StatusCode::BAD_REQUEST);
    }

    Ok(Json(json!({
        "access_token": TOKEN,
        "token_type": "Bearer",
        "expires_in": 3600
    })))
}

fn check_bearer(headers: &HeaderMap) -> Result<(), StatusCode> {
    let expected = format!("Bearer {}", TOKEN);
    match headers.get(AUTHORIZATION) {
        Some(v) if v == expected.as_str() => Ok(()),
        _ => Err(StatusCode::FORBIDDEN),
    }
}

async fn search(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    check_bearer(&headers)?;
    assert_eq!(params.get("type").map(String::as_str), Some("artist"));

    match params.get("q").map(String::as_str) {
        Some("artist:Radiohead") => Ok(Json(json!({
            "artists": {
                "items": [{
                    "id": "a1",
                    "name": "Radiohead",
                    "genres": ["alternative rock", "art rock"],
                    "images": [
                        { "url": "https://img/640", "height": 640, "width": 640 },
                        { "url": "https://img/320", "height": 320, "width": 320 },
                        { "url": "https://img/160", "height": 160, "width": 160 }
                    ],
                    "popularity": 79,
                    "uri": "spotify:artist:a1"
                }]
            }
        }))),
        Some("artist:Broken") => Err(StatusCode::INTERNAL_SERVER_ERROR),
        _ => Ok(Json(json!({ "artists": { "items": [] } }))),
    }
}

async fn top_tracks(
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    check_bearer(&headers)?;
    if id != "a1" || params.get("market").map(String::as_str) != Some("US") {
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(Json(json!({
        "tracks": [
            { "id": "t1", "name": "Creep", "uri": "spotify:track:t1", "preview_url": "https://p/t1" },
            { "id": "t2", "name": "Karma Police", "uri": "spotify:track:t2", "preview_url": "https://p/t2" },
            { "id": "t3", "name": "No Surprises", "uri": "spotify:track:t3", "preview_url": "https://p/t3" },
            { "id": "t4", "name": "Airbag", "uri": "spotify:track:t4", "preview_url": null }
        ]
    })))
}

async fn audio_features(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    check_bearer(&headers)?;
    let ids = params.get("ids").cloned().unwrap_or_default();

    let features: Vec<Value> = ids
        .split(',')
        .enumerate()
        .map(|(i, id)| {
            if id == "t2" {
                return Value::Null;
            }
            json!({
                "id": id,
                "uri": format!("spotify:track:{}", id),
                "acousticness": 0.1,
                "danceability": 0.5,
                "energy": 0.7,
                "liveness": 0.2,
                "key": i + 1,
                "valence": 0.3,
                "tempo": 90.0 + i as f64,
                "mode": 1,
                "time_signature": 4
            })
        })
        .collect();

    Ok(Json(json!({ "audio_features": features })))
}

async fn spawn_mock_spotify() -> String {
    let app = Router::new()
        .route("/api/token", post(token))
        .route("/v1/search", get(search))
        .route("/v1/artists/{id}/top-tracks", get(top_tracks))
        .route("/v1/audio-features", get(audio_features));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn create_test_client(base: &str) -> SpotifyClient {
    SpotifyClient::new(
        Credentials {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
        },
        Endpoints {
            api_url: format!("{}/v1", base),
            token_url: format!("{}/api/token", base),
            market: "US".to_string(),
        },
    )
}

async fn create_test_app() -> Router {
    let base = spawn_mock_spotify().await;
    let state = AppState::new(create_test_client(&base), default_features());
    make_app(Arc::new(state))
}

async fn get_page(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn is_form_only(html: &str) -> bool {
    html.contains("name='artist'")
        && !html.contains(ERROR_MESSAGE)
        && !html.contains("Top Ten Hits Analytics:")
}

#[tokio::test]
async fn test_first_request_returns_form_regardless_of_path() {
    for uri in ["/", "/?artist=radiohead", "/radiohead", "/some/deep/path"] {
        let app = create_test_app().await;
        let (status, html) = get_page(&app, uri).await;

        assert_eq!(status, StatusCode::OK);
        assert!(is_form_only(&html), "first request to {} was not the form", uri);
    }
}

#[tokio::test]
async fn test_form_submission_renders_report() {
    let app = create_test_app().await;
    get_page(&app, "/").await;

    let (status, html) = get_page(&app, "/?artist=radiohead").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Top Ten Hits Analytics: <strong>Radiohead</strong>"));
    assert!(html.contains("<img src='https://img/320'"));
    assert!(html.contains("alternative rock, art rock"));
    assert!(html.contains("79/100"));
    assert_eq!(html.matches("<source src=").count(), 3);
    assert_eq!(
        html.matches("function draw_").count(),
        default_features().len()
    );
    assert!(!html.contains(ERROR_MESSAGE));
}

#[tokio::test]
async fn test_tracks_without_features_are_left_out_of_charts() {
    let app = create_test_app().await;
    get_page(&app, "/").await;

    let (_, html) = get_page(&app, "/radiohead").await;

    // Karma Police has a preview but no audio features
    assert!(html.contains("<source src='https://p/t2'"));
    assert!(!html.contains("[\"Karma Police\","));
    assert!(html.contains("[\"Creep\",90.0]"));
    assert!(html.contains("[\"Airbag\",4.0,\"E\"]"));
}

#[tokio::test]
async fn test_unknown_artist_renders_error_page() {
    let app = create_test_app().await;
    get_page(&app, "/").await;

    let (status, html) = get_page(&app, "/?artist=nobody+at+all").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(ERROR_MESSAGE));
    assert!(!html.contains("Top Ten Hits Analytics:"));
    assert!(!html.contains("<source"));
}

#[tokio::test]
async fn test_blank_artist_renders_error_page() {
    let app = create_test_app().await;
    get_page(&app, "/").await;

    let (_, html) = get_page(&app, "/?artist=").await;
    assert!(html.contains(ERROR_MESSAGE));
}

#[tokio::test]
async fn test_upstream_failure_returns_server_error() {
    let app = create_test_app().await;
    get_page(&app, "/").await;

    let (status, html) = get_page(&app, "/?artist=broken").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(html.contains(FAILURE_MESSAGE));
}

#[tokio::test]
async fn test_health_does_not_consume_the_form() {
    let app = create_test_app().await;

    let (status, body) = get_page(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["features"], json!(default_features()));

    let (status, _) = get_page(&app, "/favicon.ico").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, html) = get_page(&app, "/radiohead").await;
    assert!(is_form_only(&html));
}

#[tokio::test]
async fn test_concurrent_first_requests_show_form_once() {
    let app = create_test_app().await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let app = app.clone();
        handles.push(tokio::spawn(async move { get_page(&app, "/").await }));
    }

    let mut forms = 0;
    for handle in handles {
        let (_, html) = handle.await.unwrap();
        if is_form_only(&html) {
            forms += 1;
        }
    }
    assert_eq!(forms, 1);
}

#[tokio::test]
async fn test_lookup_collects_features_in_track_order() {
    let base = spawn_mock_spotify().await;
    let client = create_test_client(&base);

    let report = management::lookup(&client, "Radiohead")
        .await
        .unwrap()
        .expect("artist should be found");

    assert_eq!(report.artist.name, "Radiohead");
    assert_eq!(report.artist.image.as_deref(), Some("https://img/320"));

    let titles: Vec<&str> = report.tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Creep", "Karma Police", "No Surprises", "Airbag"]);

    let karma = report.tracks.get("Karma Police").unwrap();
    assert!(karma.features.is_none());
    assert_eq!(karma.preview_url.as_deref(), Some("https://p/t2"));

    let airbag = report.tracks.get("Airbag").unwrap();
    assert_eq!(airbag.feature("key"), Some(4.0));
    assert!(airbag.preview_url.is_none());

    assert!(
        management::lookup(&client, "Nobody")
            .await
            .unwrap()
            .is_none()
    );
}

// Mock whose search endpoint misbehaves in a chosen way, counting every call.

#[derive(Clone, Copy)]
enum Failure {
    RateLimitedOnce,
    FirstTokenRejected,
    AlwaysUnauthorized,
}

struct Flaky {
    failure: Failure,
    token_calls: AtomicUsize,
    search_calls: AtomicUsize,
}

async fn flaky_token(State(flaky): State<Arc<Flaky>>) -> Json<Value> {
    let n = flaky.token_calls.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "access_token": format!("tok{}", n),
        "token_type": "Bearer",
        "expires_in": 3600
    }))
}

async fn flaky_search(State(flaky): State<Arc<Flaky>>, headers: HeaderMap) -> Response {
    let n = flaky.search_calls.fetch_add(1, Ordering::SeqCst);
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let rejected = match flaky.failure {
        Failure::RateLimitedOnce if n == 0 => {
            return (StatusCode::TOO_MANY_REQUESTS, [(RETRY_AFTER, "0")]).into_response();
        }
        Failure::RateLimitedOnce => false,
        Failure::FirstTokenRejected => bearer == "Bearer tok0",
        Failure::AlwaysUnauthorized => true,
    };
    if rejected {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    Json(json!({
        "artists": { "items": [{ "id": "x1", "name": "X" }] }
    }))
    .into_response()
}

async fn spawn_flaky_spotify(failure: Failure) -> (SpotifyClient, Arc<Flaky>) {
    let flaky = Arc::new(Flaky {
        failure,
        token_calls: AtomicUsize::new(0),
        search_calls: AtomicUsize::new(0),
    });
    let app = Router::new()
        .route("/api/token", post(flaky_token))
        .route("/v1/search", get(flaky_search))
        .with_state(flaky.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (create_test_client(&format!("http://{}", addr)), flaky)
}

#[tokio::test]
async fn test_rate_limited_request_is_retried() {
    let (client, flaky) = spawn_flaky_spotify(Failure::RateLimitedOnce).await;

    let artist = client.search_artist("x").await.unwrap();

    assert_eq!(artist.map(|a| a.name).as_deref(), Some("X"));
    assert_eq!(flaky.search_calls.load(Ordering::SeqCst), 2);
    assert_eq!(flaky.token_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unauthorized_request_refreshes_token() {
    let (client, flaky) = spawn_flaky_spotify(Failure::FirstTokenRejected).await;

    let artist = client.search_artist("x").await.unwrap();

    assert_eq!(artist.map(|a| a.name).as_deref(), Some("X"));
    assert_eq!(flaky.search_calls.load(Ordering::SeqCst), 2);
    assert_eq!(flaky.token_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_retries_are_bounded() {
    let (client, flaky) = spawn_flaky_spotify(Failure::AlwaysUnauthorized).await;

    assert!(client.search_artist("x").await.is_err());
    // one attempt plus three retries, each with a fresh token
    assert_eq!(flaky.search_calls.load(Ordering::SeqCst), 4);
    assert_eq!(flaky.token_calls.load(Ordering::SeqCst), 4);
}
