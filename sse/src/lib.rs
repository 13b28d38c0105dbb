//! Server-Sent Events (SSE) infrastructure for live item updates.
//!
//! This crate provides the process-wide broadcast mechanism that bridges
//! synchronous request-handling mutations to long-lived streaming
//! connections.
//!
//! # Architecture
//!
//! - **Bounded per-subscriber queues**: each connection owns one bounded
//!   queue of serialized events; a full queue marks a stuck consumer and
//!   gets evicted rather than blocking publishers.
//! - **Non-blocking publish**: mutation handlers hand an event to the
//!   broadcaster and move on; publish never awaits and can never fail the
//!   mutation that triggered it.
//! - **Ephemeral events**: events are serialized once, fanned out, and not
//!   retained. A listener that connects later sees only new events.
//! - **Type-safe events**: the event payload is a closed tagged enum with
//!   a fixed wire shape, not an open-ended map.
//!
//! # Message flow
//!
//! 1. A stream session subscribes and obtains a [`Subscription`]
//! 2. A controller finishes a create/update/delete against storage
//! 3. It publishes the matching [`message::ItemEvent`] via the [`Broadcaster`]
//! 4. Every registered queue receives the serialized payload (best effort)
//! 5. Each session drains its own queue and frames the payload onto its
//!    connection, heartbeating while idle
//!
//! # Modules
//!
//! - `broadcaster`: subscriber registry, publish fan-out, subscription lifecycle
//! - `message`: the item event payloads and their wire shapes

pub mod broadcaster;
pub mod message;

pub use broadcaster::{Broadcaster, Next, SubscriberId, Subscription};
