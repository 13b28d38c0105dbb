//! Adapter between completed item mutations and the broadcaster.
//!
//! Called by controllers only after the storage mutation committed. Publish
//! returns nothing and swallows its own failures, so a live-update problem
//! can never affect the mutation's response.

use ::sse::message::{ItemEvent, ItemSnapshot};
use domain::{items::Model, Id};
use log::*;
use service::AppState;

fn snapshot(item: &Model) -> ItemSnapshot {
    ItemSnapshot {
        id: item.id,
        title: item.title.clone(),
        description: item.description.clone(),
    }
}

pub(crate) fn item_created(app_state: &AppState, item: &Model) {
    debug!("Broadcasting created event for item {}", item.id);

    app_state.broadcaster.publish(&ItemEvent::Created {
        item: snapshot(item),
    });
}

pub(crate) fn item_updated(app_state: &AppState, item: &Model) {
    debug!("Broadcasting updated event for item {}", item.id);

    app_state.broadcaster.publish(&ItemEvent::Updated {
        item: snapshot(item),
    });
}

pub(crate) fn item_deleted(app_state: &AppState, id: Id) {
    debug!("Broadcasting deleted event for item {id}");

    app_state.broadcaster.publish(&ItemEvent::Deleted { id });
}
