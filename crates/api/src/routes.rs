//! API route definitions

use crate::handlers;
use crate::SharedState;
use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};

/// Create the main application router
pub fn create_router(state: SharedState) -> Router {
    let stats_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/classic/{username}", get(handlers::classic_card))
        .route("/maturity/{username}", get(handlers::maturity_card))
        .route("/profile/{username}", get(handlers::profile))
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/stats", stats_routes)
        .layer(cors)
        .layer(CompressionLayer::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AppConfig, AppState};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use repocards_collector::{
        CollectorError, RepoListing, RepoSource, Result as CollectorResult,
    };
    use repocards_store::MemoryKv;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct EmptySource;

    #[async_trait]
    impl RepoSource for EmptySource {
        async fn list_repos(&self, _username: &str) -> CollectorResult<RepoListing> {
            Err(CollectorError::NotFound)
        }
    }

    fn router_with(config: AppConfig) -> Router {
        let state = Arc::new(AppState::new(
            config,
            Arc::new(MemoryKv::new()),
            Arc::new(EmptySource),
        ));
        create_router(state)
    }

    fn test_router() -> Router {
        router_with(AppConfig::default())
    }

    #[tokio::test]
    async fn health_answers_under_the_stats_prefix() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/stats/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["cache-control"], "no-store");
    }

    #[tokio::test]
    async fn malformed_username_is_a_bad_request_image() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/stats/classic/bad_name")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()["content-type"],
            "image/svg+xml; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn exhausted_ip_window_outranks_username_validation() {
        let router = router_with(AppConfig {
            ip_limit_per_min: 0,
            ..AppConfig::default()
        });
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/stats/classic/bad_name")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn unknown_user_maps_to_not_found_json() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/stats/profile/ghost")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()["content-type"],
            "application/json; charset=utf-8"
        );
    }
}
