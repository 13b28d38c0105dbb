use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::controller::ApiResponse;
use crate::params::item::IndexParams;
use crate::sse::notify;
use crate::{AppState, Error};
use domain::{item as ItemApi, items::Model, Id};
use log::*;

/// GET all Items, optionally filtered by a case-insensitive substring match
/// on title and optionally paginated. `page` and `page_size` must be
/// supplied together; when present the response carries pagination metadata.
#[utoipa::path(
    get,
    path = "/items",
    params(IndexParams),
    responses(
        (status = 200, description = "Successfully retrieved Items", body = [domain::items::Model]),
        (status = 400, description = "Invalid pagination parameters"),
        (status = 405, description = "Method not allowed"),
        (status = 503, description = "Service temporarily unavailable")
    )
)]
pub async fn index(
    State(app_state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET all Items");
    debug!("Filter Params: {params:?}");

    // Reject malformed pagination before any storage access
    let page_params = params.page_params()?;

    let list = ItemApi::find_by(app_state.db_conn_ref(), params.q, page_params).await?;

    let response = match list.meta {
        Some(meta) => ApiResponse::paginated(StatusCode::OK.into(), list.items, meta),
        None => ApiResponse::new(StatusCode::OK.into(), list.items),
    };

    Ok(Json(response))
}

/// GET a particular Item specified by its id.
#[utoipa::path(
    get,
    path = "/items/{id}",
    params(
        ("id" = i64, Path, description = "Item id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific Item by its id", body = [domain::items::Model]),
        (status = 404, description = "Item not found"),
        (status = 405, description = "Method not allowed"),
        (status = 503, description = "Service temporarily unavailable")
    )
)]
pub async fn read(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Item by id: {id}");

    let item = ItemApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), item)))
}

/// POST create a new Item
#[utoipa::path(
    post,
    path = "/items",
    request_body = domain::items::Model,
    responses(
        (status = 201, description = "Successfully Created a New Item", body = [domain::items::Model]),
        (status = 422, description = "Unprocessable Entity"),
        (status = 405, description = "Method not allowed"),
        (status = 503, description = "Service temporarily unavailable")
    )
)]
pub async fn create(
    State(app_state): State<AppState>,
    Json(item_model): Json<Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a New Item from: {item_model:?}");

    let item = ItemApi::create(app_state.db_conn_ref(), item_model).await?;

    // Best-effort live update; publishing never fails the request
    notify::item_created(&app_state, &item);

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), item)))
}

/// PUT update an Item, replacing its title and description.
#[utoipa::path(
    put,
    path = "/items/{id}",
    params(
        ("id" = i64, Path, description = "Id of item to update"),
    ),
    request_body = domain::items::Model,
    responses(
        (status = 200, description = "Successfully Updated Item", body = [domain::items::Model]),
        (status = 404, description = "Item not found"),
        (status = 422, description = "Unprocessable Entity"),
        (status = 405, description = "Method not allowed"),
        (status = 503, description = "Service temporarily unavailable")
    )
)]
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(item_model): Json<Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update Item with id: {id}");

    let item = ItemApi::update(app_state.db_conn_ref(), id, item_model).await?;

    debug!("Updated Item: {item:?}");

    notify::item_updated(&app_state, &item);

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), item)))
}

/// DELETE an Item specified by its primary key.
#[utoipa::path(
    delete,
    path = "/items/{id}",
    params(
        ("id" = i64, Path, description = "Item id to delete")
    ),
    responses(
        (status = 200, description = "Successfully deleted a certain Item by its id", body = [i64]),
        (status = 404, description = "Item not found"),
        (status = 405, description = "Method not allowed"),
        (status = 503, description = "Service temporarily unavailable")
    )
)]
pub async fn delete(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Item by id: {id}");

    ItemApi::delete_by_id(app_state.db_conn_ref(), id).await?;

    notify::item_deleted(&app_state, id);

    Ok(Json(json!({"id": id})))
}

#[cfg(test)]
// Gated like the entity_api tests: seaORM's mock feature removes the Clone
// trait implementation from DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use ::sse::Next;
    use clap::Parser;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use service::config::Config;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn failed_create_broadcasts_nothing() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let app_state = AppState::new(Config::parse_from(["item_stream_rs"]), &db);
        let mut subscription = app_state.broadcaster.subscribe();

        let result = create(
            State(app_state.clone()),
            Json(Model {
                id: 0,
                title: "   ".to_string(),
                description: String::new(),
                created_at: chrono::Utc::now().into(),
            }),
        )
        .await;

        assert!(result.is_err());

        // The subscriber is still registered and its queue stayed empty
        assert_eq!(app_state.broadcaster.subscriber_count(), 1);
        assert!(matches!(
            subscription.next(Duration::from_secs(1)).await,
            Next::Timeout
        ));
    }
}
