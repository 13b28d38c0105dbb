use ::sse::{Next, Subscription};
use async_stream::stream;
use axum::extract::State;
use axum::http::header;
use axum::response::sse::{Event, Sse};
use axum::response::IntoResponse;
use futures::{Stream, StreamExt};
use log::*;
use service::AppState;
use std::convert::Infallible;
use std::time::Duration;

/// One outbound frame of a stream session.
#[derive(Debug, PartialEq)]
enum Frame {
    Comment(&'static str),
    Data(String),
}

/// The session loop: drain the subscription queue, heartbeat while idle.
/// The loop only ends when the registration disappears (eviction); every
/// other termination is external. A client disconnect drops the whole
/// stream, and with it the subscription.
fn session_frames(
    mut subscription: Subscription,
    heartbeat: Duration,
) -> impl Stream<Item = Frame> {
    stream! {
        // Lets the client know the stream is live before any event arrives
        yield Frame::Comment("connected");

        loop {
            match subscription.next(heartbeat).await {
                Next::Event(payload) => yield Frame::Data(payload),
                Next::Timeout => yield Frame::Comment("keep-alive"),
                Next::Closed => {
                    debug!(
                        "Subscriber {} was unregistered, ending stream",
                        subscription.id().as_str()
                    );
                    break;
                }
            }
        }
    }
}

/// SSE handler that establishes a long-lived connection carrying live item
/// create/update/delete events.
pub(crate) async fn item_events(State(app_state): State<AppState>) -> impl IntoResponse {
    let subscription = app_state.broadcaster.subscribe();
    debug!(
        "Establishing SSE connection for subscriber {}",
        subscription.id().as_str()
    );

    // Dropping the stream drops the subscription, which unregisters it on
    // every termination path including cancellation mid-await.
    let stream = session_frames(subscription, app_state.sse_heartbeat_interval()).map(|frame| {
        Ok::<Event, Infallible>(match frame {
            Frame::Comment(comment) => Event::default().comment(comment),
            Frame::Data(payload) => Event::default().data(payload),
        })
    });

    ([(header::CACHE_CONTROL, "no-cache")], Sse::new(stream))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::sse::message::ItemEvent;
    use ::sse::Broadcaster;
    use futures::pin_mut;

    const HEARTBEAT: Duration = Duration::from_secs(15);

    #[tokio::test(start_paused = true)]
    async fn idle_session_emits_one_heartbeat_per_interval() {
        let broadcaster = Broadcaster::new();
        let subscription = broadcaster.subscribe();

        let frames = session_frames(subscription, HEARTBEAT);
        pin_mut!(frames);

        assert_eq!(frames.next().await, Some(Frame::Comment("connected")));
        // With no events pending, each idle window yields exactly one keep-alive
        assert_eq!(frames.next().await, Some(Frame::Comment("keep-alive")));
        assert_eq!(frames.next().await, Some(Frame::Comment("keep-alive")));
    }

    #[tokio::test]
    async fn session_frames_carry_published_events() {
        let broadcaster = Broadcaster::new();
        let subscription = broadcaster.subscribe();

        broadcaster.publish(&ItemEvent::Deleted { id: 3 });

        let frames = session_frames(subscription, HEARTBEAT);
        pin_mut!(frames);

        assert_eq!(frames.next().await, Some(Frame::Comment("connected")));
        assert_eq!(
            frames.next().await,
            Some(Frame::Data(r#"{"type":"deleted","id":3}"#.to_string()))
        );
    }

    #[tokio::test]
    async fn session_ends_after_eviction() {
        let broadcaster = Broadcaster::with_queue_capacity(1);
        let subscription = broadcaster.subscribe();

        // The second publish overflows the queue and evicts the subscriber
        broadcaster.publish(&ItemEvent::Deleted { id: 1 });
        broadcaster.publish(&ItemEvent::Deleted { id: 2 });

        let frames = session_frames(subscription, HEARTBEAT);
        pin_mut!(frames);

        assert_eq!(frames.next().await, Some(Frame::Comment("connected")));
        assert!(matches!(frames.next().await, Some(Frame::Data(_))));
        assert_eq!(frames.next().await, None);
    }

    #[tokio::test]
    async fn dropping_the_stream_cleans_up_the_registration() {
        let broadcaster = Broadcaster::new();
        let subscription = broadcaster.subscribe();

        let frames = session_frames(subscription, HEARTBEAT);
        {
            pin_mut!(frames);
            assert_eq!(frames.next().await, Some(Frame::Comment("connected")));
        }

        assert_eq!(broadcaster.subscriber_count(), 0);
    }
}
