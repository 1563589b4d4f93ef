//! Top-level router: REST features, health check and `/ws`, wrapped in the
//! shared tower-http stack.

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
use http::{header, HeaderValue, Method};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::adapters::websocket::{websocket_router, WebSocketState};
use crate::config::ServerConfig;
use crate::ports::SessionValidator;

use super::admin::{admin_routes, AdminHandlers};
use super::chat::{chat_routes, ChatHandlers};
use super::middleware::auth_middleware;
use super::notifications::{notification_routes, NotificationHandlers};
use super::tasks::{task_routes, TaskHandlers};

/// Feature handler states mounted by [`api_router`].
#[derive(Clone)]
pub struct ApiRoutes {
    pub tasks: TaskHandlers,
    pub notifications: NotificationHandlers,
    pub chat: ChatHandlers,
    pub admin: AdminHandlers,
    pub realtime: WebSocketState,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// GET /api/health - Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// Build the complete application router.
///
/// `/api/*` runs behind the Bearer auth middleware and gzip compression.
/// `/ws` authenticates from its `token` query parameter instead.
pub fn api_router(
    routes: ApiRoutes,
    validator: Arc<dyn SessionValidator>,
    server: &ServerConfig,
) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .nest("/tasks", task_routes(routes.tasks))
        .nest("/notifications", notification_routes(routes.notifications))
        .nest("/chat", chat_routes(routes.chat))
        .nest("/admin", admin_routes(routes.admin))
        .layer(from_fn_with_state(validator, auth_middleware))
        .layer(CompressionLayer::new());

    Router::new()
        .nest("/api", api)
        .merge(websocket_router(routes.realtime))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors_layer(server))
                .layer(TimeoutLayer::new(server.request_timeout())),
        )
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .allowed_origins()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_ok() {
        let Json(body) = health().await;
        assert_eq!(body, HealthResponse { ok: true });
        assert_eq!(serde_json::to_value(&body).unwrap(), serde_json::json!({ "ok": true }));
    }
}
