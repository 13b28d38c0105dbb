use super::error::{EntityApiErrorKind, Error};
use entity::items::{ActiveModel, Column, Entity, Model};
use entity::Id;
use sea_orm::{
    entity::prelude::*,
    sea_query::{extension::postgres::PgExpr, Expr},
    ActiveValue::{Set, Unchanged},
    DatabaseConnection, PaginatorTrait, QueryFilter, QueryOrder, TryIntoModel,
};

use log::*;
use serde::Serialize;
use utoipa::ToSchema;

/// A validated pagination request: 1-based page number plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u64,
    pub page_size: u64,
}

/// Pagination metadata accompanying a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageMeta {
    pub total_count: u64,
    pub page: u64,
    pub page_size: u64,
}

/// The result of a listing query. `meta` is present iff the caller asked
/// for pagination.
#[derive(Debug)]
pub struct ItemList {
    pub items: Vec<Model>,
    pub meta: Option<PageMeta>,
}

/// Find items, newest first, optionally filtered by a case-insensitive
/// substring match on title and optionally paginated.
pub async fn find_by(
    db: &DatabaseConnection,
    title_filter: Option<&str>,
    page_params: Option<PageParams>,
) -> Result<ItemList, Error> {
    let mut query = Entity::find();

    if let Some(term) = title_filter.filter(|term| !term.is_empty()) {
        let pattern = format!("%{term}%");
        query = query.filter(Expr::col(Column::Title).ilike(pattern));
    }

    let query = query.order_by_desc(Column::Id);

    match page_params {
        Some(params) => {
            let paginator = query.paginate(db, params.page_size);
            let total_count = paginator.num_items().await?;
            // sea-orm pages are 0-based, the API's are 1-based; clamp so a
            // stray page 0 reads the first page instead of underflowing
            let items = paginator.fetch_page(params.page.saturating_sub(1)).await?;

            Ok(ItemList {
                items,
                meta: Some(PageMeta {
                    total_count,
                    page: params.page,
                    page_size: params.page_size,
                }),
            })
        }
        None => Ok(ItemList {
            items: query.all(db).await?,
            meta: None,
        }),
    }
}

pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

pub async fn create(db: &DatabaseConnection, item_model: Model) -> Result<Model, Error> {
    debug!("New Item Model to be inserted: {:?}", item_model);

    validate(&item_model)?;

    let now = chrono::Utc::now();

    let item_active_model: ActiveModel = ActiveModel {
        title: Set(item_model.title),
        description: Set(item_model.description),
        created_at: Set(now.into()),
        ..Default::default()
    };

    Ok(item_active_model.save(db).await?.try_into_model()?)
}

/// Replaces the title and description of an existing item.
pub async fn update(db: &DatabaseConnection, id: Id, model: Model) -> Result<Model, Error> {
    validate(&model)?;

    let result = Entity::find_by_id(id).one(db).await?;

    match result {
        Some(item) => {
            debug!("Existing Item model to be Updated: {:?}", item);

            let active_model: ActiveModel = ActiveModel {
                id: Unchanged(item.id),
                title: Set(model.title),
                description: Set(model.description),
                created_at: Unchanged(item.created_at),
            };

            Ok(active_model.update(db).await?.try_into_model()?)
        }
        None => {
            debug!("Item with id {} not found", id);

            Err(Error {
                source: None,
                error_kind: EntityApiErrorKind::RecordNotFound,
            })
        }
    }
}

pub async fn delete_by_id(db: &DatabaseConnection, id: Id) -> Result<(), Error> {
    let result = find_by_id(db, id).await?;

    result.delete(db).await?;
    Ok(())
}

fn validate(model: &Model) -> Result<(), Error> {
    if model.title.trim().is_empty() {
        return Err(Error {
            source: None,
            error_kind: EntityApiErrorKind::ValidationError,
        });
    }
    Ok(())
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn item_model(id: Id, title: &str) -> Model {
        Model {
            id,
            title: title.to_owned(),
            description: "A fine item".to_owned(),
            created_at: chrono::Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn create_returns_a_new_item_model() -> Result<(), Error> {
        let model = item_model(1, "Alpha");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model.clone()]])
            .into_connection();

        let item = create(&db, model.clone()).await?;

        assert_eq!(item.id, model.id);
        assert_eq!(item.title, model.title);

        Ok(())
    }

    #[tokio::test]
    async fn create_with_blank_title_returns_validation_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = create(&db, item_model(1, "   ")).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::ValidationError
        );
    }

    #[tokio::test]
    async fn update_returns_an_updated_item_model() -> Result<(), Error> {
        let model = item_model(1, "Alpha");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model.clone()], vec![model.clone()]])
            .into_connection();

        let item = update(&db, model.id, model.clone()).await?;

        assert_eq!(item.title, model.title);

        Ok(())
    }

    #[tokio::test]
    async fn update_missing_item_returns_record_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Model>::new()])
            .into_connection();

        let result = update(&db, 42, item_model(42, "Alpha")).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::RecordNotFound
        );
    }

    #[tokio::test]
    async fn find_by_with_zero_page_reads_the_first_page() -> Result<(), Error> {
        use std::collections::BTreeMap;

        let mut count_row = BTreeMap::new();
        count_row.insert("num_items", sea_orm::Value::BigInt(Some(1)));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row]])
            .append_query_results(vec![vec![item_model(1, "Alpha")]])
            .into_connection();

        let list = find_by(
            &db,
            None,
            Some(PageParams {
                page: 0,
                page_size: 10,
            }),
        )
        .await?;

        assert_eq!(list.items.len(), 1);
        assert_eq!(list.meta.unwrap().total_count, 1);

        Ok(())
    }

    #[tokio::test]
    async fn find_by_without_pagination_returns_all_rows_and_no_meta() -> Result<(), Error> {
        let rows = vec![item_model(2, "Bravo"), item_model(1, "Alpha")];

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![rows.clone()])
            .into_connection();

        let list = find_by(&db, Some("a"), None).await?;

        assert_eq!(list.items, rows);
        assert!(list.meta.is_none());

        Ok(())
    }
}
