//! Aggregation boundary: one HTTP route per upstream resource.
//!
//! Handlers validate parameters, drive the platform clients and return the
//! normalized payload inside a response envelope. Browse lists follow the
//! availability policy (failures become empty lists); detail, search and
//! stream routes follow the correctness policy (failures become errors).

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use nonton_api::Upstream;
use nonton_core::cache::CacheSlot;
use nonton_core::models::ListItem;
use nonton_core::EnvelopeCodec;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod respond;

pub use error::ApiError;

/// Application state shared across HTTP handlers
pub struct AppState<U> {
    pub upstream: Arc<U>,
    pub codec: Arc<EnvelopeCodec>,
    /// FreeReels homepage, the one resource with a revalidation window.
    pub freereels_home: Arc<CacheSlot<Vec<ListItem>>>,
}

impl<U> Clone for AppState<U> {
    fn clone(&self) -> Self {
        Self {
            upstream: Arc::clone(&self.upstream),
            codec: Arc::clone(&self.codec),
            freereels_home: Arc::clone(&self.freereels_home),
        }
    }
}

impl<U: Upstream> AppState<U> {
    pub fn new(upstream: U, codec: EnvelopeCodec, freereels_home_ttl: Duration) -> Self {
        Self {
            upstream: Arc::new(upstream),
            codec: Arc::new(codec),
            freereels_home: Arc::new(CacheSlot::new(freereels_home_ttl)),
        }
    }
}

/// Build application router
pub fn build_router<U: Upstream + 'static>(state: AppState<U>) -> Router {
    use api::{anime, dramabox, flickreels, freereels, komik, melolo, netshort, reelshort};

    let komik_routes: Router<AppState<U>> = Router::new()
        .route("/recommended", get(komik::recommended::<U>))
        .route("/popular", get(komik::popular::<U>))
        .route("/latest", get(komik::latest::<U>))
        .route("/search", get(komik::search::<U>))
        .route("/detail/:manga_id", get(komik::detail::<U>))
        .route("/getimage/:chapter_id", get(komik::images::<U>));

    let anime_routes: Router<AppState<U>> = Router::new()
        .route("/latest", get(anime::latest::<U>))
        .route("/recommended", get(anime::recommended::<U>))
        .route("/movie", get(anime::movies::<U>))
        .route("/search", get(anime::search::<U>))
        .route("/detail/:anime_id", get(anime::detail::<U>))
        .route("/getvideo/:episode_id", get(anime::video::<U>));

    let netshort_routes: Router<AppState<U>> = Router::new()
        .route("/foryou", get(netshort::for_you::<U>))
        .route("/theaters", get(netshort::theaters::<U>))
        .route("/detail", get(netshort::detail::<U>));

    let reelshort_routes: Router<AppState<U>> = Router::new()
        .route("/homepage", get(reelshort::homepage::<U>))
        .route("/search", get(reelshort::search::<U>))
        .route("/watch", get(reelshort::watch::<U>));

    let freereels_routes: Router<AppState<U>> = Router::new()
        .route("/home", get(freereels::home::<U>))
        .route("/search", get(freereels::search::<U>));

    let routes: Router<AppState<U>> = Router::new()
        .nest("/komik", komik_routes)
        .nest("/anime", anime_routes)
        .nest("/netshort", netshort_routes)
        .nest("/reelshort", reelshort_routes)
        .nest("/freereels", freereels_routes)
        .route("/flickreels/latest", get(flickreels::latest::<U>))
        .route("/melolo/latest", get(melolo::latest::<U>))
        .route("/melolo/stream", get(melolo::stream::<U>))
        .route("/dramabox/latest", get(dramabox::latest::<U>))
        .route("/dramabox/allepisode/:book_id", get(dramabox::episodes::<U>));

    Router::new()
        .route("/health", get(api::health))
        .nest("/api", routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
        .with_state(state)
}
