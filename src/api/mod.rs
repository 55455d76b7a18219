mod availability;
mod bookings;
mod debug;
pub mod error;
mod help_requests;
mod pledges;
mod professionals;
mod projects;
mod validation;

use axum::{
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use std::any::Any;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::AppState;
use self::error::ApiError;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Availability
        .route("/availability", get(availability::get_availability))
        .route("/availability/check", post(availability::check_slot))
        // Bookings
        .route("/bookings", get(bookings::list_bookings))
        .route("/bookings", post(bookings::create_booking))
        // Projects
        .route("/projects", get(projects::list_projects))
        .route("/projects", post(projects::create_project))
        .route(
            "/projects/:id",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        // Pledges
        .route("/pledges", get(pledges::list_pledges))
        .route("/pledges", post(pledges::create_pledge))
        .route("/pledges/stats", get(pledges::pledge_stats))
        // Help requests
        .route("/help-requests", get(help_requests::list_help_requests))
        .route("/help-requests", post(help_requests::create_help_request))
        .route("/help-requests/:id/assign", put(help_requests::assign_volunteer))
        // Professionals
        .route("/professionals", get(professionals::list_professionals))
        .route("/professionals", post(professionals::register_professional))
        // Development
        .route("/debug", get(debug::store_dump));

    let router = Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http());

    let router = if state.config.server.cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

/// A panicking handler becomes a 500 envelope; the panic text is only logged
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Request handler panicked");
    ApiError::internal("Internal server error").into_response()
}


#[cfg(test)]
mod tests {
    use super::test_support::{get, test_app};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_check() {
        let app = test_app();
        let (status, body) = get(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::Value::String("OK".to_string()));
    }

    #[tokio::test]
    async fn test_malformed_json_uses_error_envelope() {
        let app = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/bookings")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "bad_request");
    }

    #[tokio::test]
    async fn test_handler_panic_becomes_internal_error() {
        let app: axum::Router = axum::Router::new()
            .route(
                "/boom",
                axum::routing::get(|| async {
                    let rows: Vec<u32> = Vec::new();
                    rows[3].to_string()
                }),
            )
            .layer(tower_http::catch_panic::CatchPanicLayer::custom(
                super::handle_panic,
            ));

        let (status, body) = get(&app, "/boom").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "internal_error");
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = test_app();
        let (status, _) = get(&app, "/api/nothing-here").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
