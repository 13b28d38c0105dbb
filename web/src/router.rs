use crate::controller::{health_check_controller, item_controller};
use crate::sse::handler;
use crate::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Item Stream API"
        ),
        paths(
            item_controller::index,
            item_controller::read,
            item_controller::create,
            item_controller::update,
            item_controller::delete,
            health_check_controller::health_check,
        ),
        components(
            schemas(
                domain::items::Model,
                domain::PageMeta,
            )
        ),
        tags(
            (name = "item_stream", description = "Item CRUD with live SSE updates")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(item_routes(app_state.clone()))
        .merge(item_event_routes(app_state))
        .merge(health_routes())
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn item_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/items", get(item_controller::index))
        .route("/items", post(item_controller::create))
        .route("/items/:id", get(item_controller::read))
        .route("/items/:id", put(item_controller::update))
        .route("/items/:id", delete(item_controller::delete))
        .with_state(app_state)
}

fn item_event_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/items/events", get(handler::item_events))
        .with_state(app_state)
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}
