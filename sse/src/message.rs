use serde::Serialize;

/// Snapshot of an item as carried inside event payloads. The broadcaster
/// never holds on to storage models, only this copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSnapshot {
    pub id: i64,
    pub title: String,
    pub description: String,
}

/// One completed item mutation, broadcast to all subscribers.
///
/// Wire shapes:
/// - `{"type":"created","item":{"id":1,"title":"...","description":"..."}}`
/// - `{"type":"updated","item":{"id":1,"title":"...","description":"..."}}`
/// - `{"type":"deleted","id":1}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemEvent {
    Created { item: ItemSnapshot },
    Updated { item: ItemSnapshot },
    Deleted { id: i64 },
}
