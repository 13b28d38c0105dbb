use crate::error::Error;
use crate::{ItemList, PageParams};
pub use entity_api::item::{create, delete_by_id, find_by_id, update};
use sea_orm::DatabaseConnection;

pub async fn find_by(
    db: &DatabaseConnection,
    title_filter: Option<String>,
    page_params: Option<PageParams>,
) -> Result<ItemList, Error> {
    let items = entity_api::item::find_by(db, title_filter.as_deref(), page_params).await?;

    Ok(items)
}
