//! Router-level tests against a scripted upstream.
//!
//! Covers the response policies end to end: envelopes, fallbacks,
//! availability versus correctness, parameter validation and the
//! freereels home cache.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use nonton_api::headers::HeaderProfile;
use nonton_api::testing::ScriptedUpstream;
use nonton_core::{Envelope, EnvelopeCodec};
use nonton_server::{build_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &str = "integration-secret";

fn setup(upstream: ScriptedUpstream) -> (Router, Arc<ScriptedUpstream>) {
    let state = AppState::new(upstream, EnvelopeCodec::new(SECRET), Duration::from_secs(300));
    let upstream = Arc::clone(&state.upstream);
    (build_router(state), upstream)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Request and open the envelope.
async fn get_sealed(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    let envelope: Envelope = serde_json::from_value(body).expect("enveloped body");
    let payload = EnvelopeCodec::new(SECRET).decode(&envelope).unwrap();
    (status, payload)
}

fn manga(id: &str) -> Value {
    json!({
        "manga_id": id,
        "title": format!("Title {id}"),
        "cover_portrait_url": format!("https://cdn.example.com/{id}.jpg")
    })
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup(ScriptedUpstream::new());
    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "nonton");
}

#[tokio::test]
async fn test_popular_serves_empty_when_both_sources_fail() {
    let (app, upstream) = setup(
        ScriptedUpstream::new()
            .status("komik/popular?type=project", 500)
            .status("komik/latest?type=project", 502),
    );
    let (status, payload) = get_sealed(&app, "/api/komik/popular").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload, json!([]));
    assert_eq!(upstream.calls().len(), 2);
}

#[tokio::test]
async fn test_recommended_falls_back_exactly_once() {
    let (app, upstream) = setup(
        ScriptedUpstream::new()
            .json("komik/recommended?type=project", json!({ "data": [] }))
            .json("komik/popular?type=project", json!({ "data": [manga("p1")] })),
    );
    let (status, payload) = get_sealed(&app, "/api/komik/recommended").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload[0]["id"], "p1");
    assert_eq!(
        upstream.calls(),
        ["komik/recommended?type=project", "komik/popular?type=project"]
    );
}

#[tokio::test]
async fn test_latest_drops_unrenderable_covers() {
    let (app, _) = setup(ScriptedUpstream::new().json(
        "komik/latest?type=project",
        json!({ "data": [
            manga("ok"),
            { "manga_id": "rel", "title": "Relative", "cover_portrait_url": "/img/rel.jpg" },
            { "manga_id": "none", "title": "No cover" }
        ] }),
    ));
    let (_, payload) = get_sealed(&app, "/api/komik/latest").await;

    let ids: Vec<&str> = payload
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["ok"]);
}

#[tokio::test]
async fn test_detail_survives_chapterlist_failure() {
    let (app, _) = setup(
        ScriptedUpstream::new()
            .json("komik/detail?manga_id=m1&type=project", json!({ "data": manga("m1") }))
            .status("komik/chapterlist?manga_id=m1&type=project", 500),
    );
    let (status, payload) = get_sealed(&app, "/api/komik/detail/m1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["id"], "m1");
    assert_eq!(payload["episodes"], json!([]));
}

#[tokio::test]
async fn test_detail_missing_is_not_found() {
    let (app, _) = setup(
        ScriptedUpstream::new().json("komik/detail?manga_id=gone&type=project", json!({})),
    );
    let (status, body) = get(&app, "/api/komik/detail/gone").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_search_requires_query() {
    let (app, upstream) = setup(ScriptedUpstream::new());

    for uri in ["/api/komik/search", "/api/komik/search?q=", "/api/komik/search?q=%20%20"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, json!({ "error": "Query parameter 'q' is required" }));
    }
    assert!(upstream.calls().is_empty());
}

#[tokio::test]
async fn test_search_failure_keeps_upstream_status() {
    let (app, _) = setup(ScriptedUpstream::new().status("komik/search?q=solo&type=project", 503));
    let (status, body) = get(&app, "/api/komik/search?q=solo").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({ "error": "Failed to fetch data" }));
}

#[tokio::test]
async fn test_invalid_page_is_rejected() {
    let (app, upstream) = setup(ScriptedUpstream::new());
    let (status, _) = get(&app, "/api/reelshort/search?query=ceo&page=zero").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(upstream.calls().is_empty());
}

#[tokio::test]
async fn test_watch_selects_preferred_resolution() {
    let (app, _) = setup(ScriptedUpstream::new().json(
        "reelshort/episode?bookId=b1&episodeNumber=2",
        json!({ "videoList": [
            { "url": "https://v/480.m3u8", "encode": "H265", "quality": "480p" },
            { "url": "https://v/720.m3u8", "encode": "H264", "quality": "720p" }
        ] }),
    ));
    let (status, payload) = get_sealed(&app, "/api/reelshort/watch?bookId=b1&episodeNumber=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["selected"]["url"], "https://v/720.m3u8");
    assert_eq!(payload["streams"][0]["provider"], "H264");
}

#[tokio::test]
async fn test_watch_upstream_failure_is_enveloped() {
    let (app, _) = setup(
        ScriptedUpstream::new().status("reelshort/episode?bookId=b1&episodeNumber=1", 500),
    );
    let (status, payload) = get_sealed(&app, "/api/reelshort/watch?bookId=b1&episodeNumber=1").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(payload, json!({ "error": "Failed to fetch data" }));
}

#[tokio::test]
async fn test_watch_missing_param_is_plain() {
    let (app, upstream) = setup(ScriptedUpstream::new());
    let (status, body) = get(&app, "/api/reelshort/watch?episodeNumber=1").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Query parameter 'bookId' is required" }));
    assert!(upstream.calls().is_empty());
}

#[tokio::test]
async fn test_freereels_home_is_cached() {
    let (app, upstream) = setup(ScriptedUpstream::new().json(
        "freereels/homepage",
        json!({ "data": [{ "key": "k1", "title": "Fated", "cover": "https://img/k1.jpg" }] }),
    ));

    let (_, first) = get_sealed(&app, "/api/freereels/home").await;
    let (_, second) = get_sealed(&app, "/api/freereels/home").await;

    assert_eq!(first, second);
    assert_eq!(first[0]["id"], "k1");
    assert_eq!(upstream.calls().len(), 1);
}

#[tokio::test]
async fn test_freereels_home_failure_is_not_cached() {
    let (app, upstream) = setup(ScriptedUpstream::new().status("freereels/homepage", 500));

    let (status, payload) = get_sealed(&app, "/api/freereels/home").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload, json!([]));

    get_sealed(&app, "/api/freereels/home").await;
    assert_eq!(upstream.calls().len(), 2);
}

#[tokio::test]
async fn test_dramabox_without_episodes_is_not_found() {
    let (app, _) = setup(ScriptedUpstream::new().json("dramabox/allepisode?bookId=42", json!([])));
    let (status, _) = get(&app, "/api/dramabox/allepisode/42").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_melolo_stream_requires_video_id() {
    let (app, _) = setup(ScriptedUpstream::new());
    let (status, body) = get(&app, "/api/melolo/stream").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Query parameter 'videoId' is required" }));
}

#[tokio::test]
async fn test_anime_detail_episodes_oldest_first() {
    let (app, upstream) = setup(ScriptedUpstream::new().json(
        "anime/detail?urlId=frieren",
        json!({ "data": [{
            "id": 55,
            "judul": "Frieren",
            "cover": "https://img.example.com/f.jpg",
            "chapter": [
                { "id": 3, "url": "frieren-ep-3" },
                { "id": 2, "url": "frieren-ep-2" },
                { "id": 1, "url": "frieren-ep-1" }
            ]
        }] }),
    ));
    let (status, payload) = get_sealed(&app, "/api/anime/detail/frieren").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["id"], "frieren");
    let locators: Vec<&str> = payload["episodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["locator"].as_str().unwrap())
        .collect();
    assert_eq!(locators, ["frieren-ep-1", "frieren-ep-2", "frieren-ep-3"]);
    assert_eq!(
        upstream.profile_of("anime/detail?urlId=frieren"),
        Some(HeaderProfile::Bare)
    );
}

#[tokio::test]
async fn test_anime_video_route() {
    let (app, _) = setup(ScriptedUpstream::new().json(
        "anime/getvideo?chapterUrlId=frieren-ep-1",
        json!({ "data": [{ "stream": [
            { "reso": "480p", "link": "https://v.example.com/480.mp4", "provide": 1 },
            { "reso": "720p", "link": "https://v.example.com/720.mp4", "provide": 2 }
        ] }] }),
    ));
    let (status, payload) = get_sealed(&app, "/api/anime/getvideo/frieren-ep-1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["selected"]["url"], "https://v.example.com/720.mp4");
    assert_eq!(payload["resolutions"], json!(["720p", "480p"]));
}

#[tokio::test]
async fn test_anime_search_requires_query() {
    let (app, upstream) = setup(ScriptedUpstream::new());
    let (status, body) = get(&app, "/api/anime/search").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Query parameter 'q' is required" }));
    assert!(upstream.calls().is_empty());
}

#[tokio::test]
async fn test_netshort_detail_by_short_play_id() {
    let (app, upstream) = setup(ScriptedUpstream::new().json(
        "netshort/allepisode?shortPlayId=p9",
        json!({
            "shortPlayId": "p9",
            "shortPlayName": "Hidden Heiress",
            "shortPlayCover": "https://img.example.com/p9.jpg",
            "isFinish": 0,
            "shortPlayEpisodeInfos": [
                { "episodeId": "e2", "episodeNo": 2, "playVoucher": "https://v.example.com/2.m3u8" },
                { "episodeId": "e1", "episodeNo": 1, "playVoucher": "https://v.example.com/1.m3u8" }
            ]
        }),
    ));
    let (status, payload) = get_sealed(&app, "/api/netshort/detail?shortPlayId=p9").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["id"], "p9");
    assert_eq!(payload["status"], "ongoing");
    assert_eq!(payload["episodes"][0]["id"], "e1");
    assert_eq!(
        upstream.profile_of("netshort/allepisode?shortPlayId=p9"),
        Some(HeaderProfile::Browser)
    );
}

#[tokio::test]
async fn test_netshort_detail_requires_short_play_id() {
    let (app, upstream) = setup(ScriptedUpstream::new());
    let (status, body) = get(&app, "/api/netshort/detail").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Query parameter 'shortPlayId' is required" }));
    assert!(upstream.calls().is_empty());
}

#[tokio::test]
async fn test_netshort_foryou_failure_serves_empty() {
    let (app, upstream) = setup(ScriptedUpstream::new().status("netshort/foryou?page=1", 500));
    let (status, payload) = get_sealed(&app, "/api/netshort/foryou").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload, json!([]));
    assert_eq!(
        upstream.profile_of("netshort/foryou?page=1"),
        Some(HeaderProfile::Browser)
    );
}

#[tokio::test]
async fn test_netshort_theaters_failure_serves_no_shelves() {
    let (app, _) = setup(ScriptedUpstream::new().status("netshort/theaters", 502));
    let (status, payload) = get_sealed(&app, "/api/netshort/theaters").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload, json!([]));
}

#[tokio::test]
async fn test_flickreels_latest_route() {
    let (app, _) = setup(ScriptedUpstream::new().json(
        "flickreels/latest",
        json!({ "data": [
            { "playlet_id": 3001, "title": "Second Chance", "cover": "https://img/3001.jpg" },
            { "playlet_id": 3002, "cover": "https://img/3002.jpg" }
        ] }),
    ));
    let (status, payload) = get_sealed(&app, "/api/flickreels/latest").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload.as_array().unwrap().len(), 1);
    assert_eq!(payload[0]["id"], "3001");
}

#[tokio::test]
async fn test_dramabox_latest_failure_serves_empty() {
    let (app, _) = setup(ScriptedUpstream::new().status("dramabox/latest", 503));
    let (status, payload) = get_sealed(&app, "/api/dramabox/latest").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload, json!([]));
}

#[tokio::test]
async fn test_freereels_search_failure_is_an_error() {
    let (app, upstream) = setup(ScriptedUpstream::new().status("freereels/search?query=ceo", 500));
    let (status, body) = get(&app, "/api/freereels/search?query=ceo").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch data" }));
    assert_eq!(
        upstream.profile_of("freereels/search?query=ceo"),
        Some(HeaderProfile::UserAgentJson)
    );
}
