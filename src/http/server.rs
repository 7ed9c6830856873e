//! Main router configuration assembling the gateway endpoints.

use std::any::Any;

use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::{any, get, post},
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use super::{
    context::AppState, handler_health::handle_health, handler_mcp::handle_mcp,
    handler_register::handle_register,
};
use crate::errors::GatewayError;

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };
    GatewayError::Internal(message).into_response()
}

/// Build the application router
pub fn build_router(ctx: AppState) -> Router {
    // Relay URLs are handed to third-party tools that may call from a browser
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/health", get(handle_health))
        .route("/register", post(handle_register))
        .route("/mcp/{token}", any(handle_mcp))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::NaverSearchProvider;
    use crate::storage::inmemory::MemoryRegistrationStore;
    use axum::{body::Body, http::Request, http::StatusCode};
    use std::{sync::Arc, time::Duration};
    use tower::ServiceExt;

    fn create_test_app_state() -> AppState {
        let config = Arc::new(crate::config::Config {
            version: "test".to_string(),
            http_port: "3000".to_string().try_into().unwrap(),
            external_base: None::<String>.try_into().unwrap(),
            user_agent: "test-user-agent".to_string(),
            http_client_timeout: "10s".to_string().try_into().unwrap(),
            storage_backend: "memory".to_string(),
            database_url: None,
            supabase_url: None,
            supabase_anon_key: None,
            server_secret: None::<String>.into(),
            naver_search_url: crate::config::DEFAULT_NAVER_SEARCH_URL
                .to_string()
                .try_into()
                .unwrap(),
            naver_search_display: "5".to_string().try_into().unwrap(),
            search_timeout: "8s".to_string().try_into().unwrap(),
        });

        AppState {
            config,
            registration_store: Arc::new(MemoryRegistrationStore::new()),
            search_provider: Arc::new(NaverSearchProvider::new(
                reqwest::Client::new(),
                crate::config::DEFAULT_NAVER_SEARCH_URL,
                5,
                Duration::from_secs(8),
            )),
        }
    }

    #[test]
    fn test_build_router_structure() {
        let app_state = create_test_app_state();
        let _router = build_router(app_state);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let router = build_router(create_test_app_state());
        let response = router
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_register_rejects_get() {
        let router = build_router(create_test_app_state());
        let response = router
            .oneshot(Request::get("/register").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_handle_panic() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
