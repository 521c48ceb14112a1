use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, security_headers};
use crate::handlers::{
    create_event, delete_event, get_event, health_check, list_events, update_event,
};
use crate::store::EventStore;

pub fn create_routes(store: Arc<EventStore>) -> Router {
    let mut router = Router::new()
        .route("/health", get(health_check))
        .route("/api/events", get(list_events).post(create_event))
        // the list endpoint is also reachable with a trailing slash
        .route("/api/events/", get(list_events))
        .route(
            "/api/events/:id",
            get(get_event).put(update_event).delete(delete_event),
        )
        .with_state(store);

    for (name, value) in security_headers() {
        router = router.layer(SetResponseHeaderLayer::overriding(name, value));
    }

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(create_cors_layer()),
    )
}
