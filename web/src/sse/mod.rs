//! SSE surface of the web layer.
//!
//! `handler` drives one long-lived event stream per listener; `notify` is
//! the adapter that turns completed item mutations into broadcast events.
//! The core SSE infrastructure (Broadcaster, Subscription, event types)
//! lives in the `sse` crate.

pub(crate) mod handler;
pub(crate) mod notify;
