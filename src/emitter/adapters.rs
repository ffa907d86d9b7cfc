//! # Async adapters over listener registration.
//!
//! - [`EventFuture`] resolves with the next emission of one event
//!   (see [`TypedEventEmitter::next_event`](crate::TypedEventEmitter::next_event)).
//! - [`EventStream`] yields every subsequent emission of one event
//!   (see [`TypedEventEmitter::subscribe`](crate::TypedEventEmitter::subscribe)).
//!
//! Both own a [`Subscription`]: dropping the adapter removes its listener. Emission
//! stays synchronous; the listener only hands a clone of the arguments to a
//! `tokio::sync` channel and never awaits.
//!
//! ## Rules
//! - Listeners, adapter listeners included, run on the emitting thread. The
//!   adapters only queue owned copies for whoever awaits them.
//! - The stream buffer is unbounded and never slows `emit`; a consumer that
//!   stops polling should drop the stream.
//!
//! ```text
//! emit::<E>(args) ──► adapter listener ──► args.clone() ──► [oneshot / mpsc] ──► .await / .next()
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Weak;
use std::task::{Context, Poll};

use futures::Stream;
use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};

use crate::error::EmitterError;
use crate::listeners::Registry;

/// Removes one registration from its emitter on drop.
#[derive(Debug)]
pub(crate) struct Subscription {
    registry: Weak<Mutex<Registry>>,
    event: &'static str,
    seq: u64,
}

impl Subscription {
    pub(crate) fn new(registry: Weak<Mutex<Registry>>, event: &'static str, seq: u64) -> Self {
        Self {
            registry,
            event,
            seq,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            let _removed = registry.lock().remove_seq(self.event, self.seq);
        }
    }
}

/// Future resolving with the arguments of the next emission of one event.
///
/// Resolves to [`EmitterError::Closed`] if the listener is removed (or the
/// emitter dropped) before the event fires.
#[must_use = "futures do nothing unless awaited"]
#[derive(Debug)]
pub struct EventFuture<A> {
    rx: oneshot::Receiver<A>,
    subscription: Subscription,
}

impl<A> EventFuture<A> {
    pub(crate) fn new(rx: oneshot::Receiver<A>, subscription: Subscription) -> Self {
        Self { rx, subscription }
    }
}

impl<A> Future for EventFuture<A> {
    type Output = Result<A, EmitterError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let event = self.subscription.event;
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|res| res.map_err(|_| EmitterError::Closed { event }))
    }
}

/// Stream of the arguments of every emission of one event.
///
/// Ends when the listener is removed or the emitter dropped. Buffered items
/// are still yielded before the end.
#[must_use = "streams do nothing unless polled"]
#[derive(Debug)]
pub struct EventStream<A> {
    rx: mpsc::UnboundedReceiver<A>,
    subscription: Subscription,
}

impl<A> EventStream<A> {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<A>, subscription: Subscription) -> Self {
        Self { rx, subscription }
    }

    /// Name of the event this stream follows.
    pub fn event(&self) -> &'static str {
        self.subscription.event
    }
}

impl<A> Stream for EventStream<A> {
    type Item = A;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<A>> {
        self.rx.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use crate::{Event, TypedEventEmitter};

    crate::event_map! {
        Feed {
            Item("item"): (u32, String),
            Done("done"): (),
        }
    }

    #[tokio::test]
    async fn test_next_event_resolves_with_args() {
        let emitter = TypedEventEmitter::<Feed>::new();
        let next = emitter.next_event::<Item>();
        assert_eq!(emitter.listener_count::<Item>(), 1);

        emitter.emit::<Item>((7, "seven".to_string()));
        assert_eq!(next.await, Ok((7, "seven".to_string())));
        assert_eq!(emitter.listener_count::<Item>(), 0);
    }

    #[tokio::test]
    async fn test_next_event_closed_when_listener_removed() {
        let emitter = TypedEventEmitter::<Feed>::new();
        let next = emitter.next_event::<Done>();

        emitter.remove_all_listeners(None);
        assert_eq!(next.await, Err(crate::EmitterError::Closed { event: "done" }));
    }

    #[tokio::test]
    async fn test_next_event_closed_when_emitter_dropped() {
        let emitter = TypedEventEmitter::<Feed>::new();
        let next = emitter.next_event::<Done>();
        drop(emitter);
        assert!(next.await.is_err());
    }

    #[test]
    fn test_dropping_future_removes_listener() {
        let emitter = TypedEventEmitter::<Feed>::new();
        let next = emitter.next_event::<Done>();
        assert_eq!(emitter.listener_count::<Done>(), 1);
        drop(next);
        assert_eq!(emitter.listener_count::<Done>(), 0);
    }

    #[tokio::test]
    async fn test_stream_yields_each_emission() {
        let emitter = TypedEventEmitter::<Feed>::new();
        let mut items = emitter.subscribe::<Item>();
        assert_eq!(items.event(), "item");

        emitter.emit::<Item>((1, "a".to_string()));
        emitter.emit::<Item>((2, "b".to_string()));

        assert_eq!(items.next().await, Some((1, "a".to_string())));
        assert_eq!(items.next().await, Some((2, "b".to_string())));
    }

    #[tokio::test]
    async fn test_stream_ends_after_remove_all() {
        let emitter = TypedEventEmitter::<Feed>::new();
        let mut items = emitter.subscribe::<Item>();

        emitter.emit::<Item>((1, "a".to_string()));
        emitter.remove_all_listeners(Some(Item::event_name()));

        assert_eq!(items.next().await, Some((1, "a".to_string())));
        assert_eq!(items.next().await, None);
    }

    #[test]
    fn test_dropping_stream_removes_listener() {
        let emitter = TypedEventEmitter::<Feed>::new();
        emitter.on::<Item>(|_: &(u32, String)| {});
        let items = emitter.subscribe::<Item>();
        assert_eq!(emitter.listener_count::<Item>(), 2);

        drop(items);
        assert_eq!(emitter.listener_count::<Item>(), 1);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_stream_buffers_emissions_until_polled() {
        let emitter = TypedEventEmitter::<Feed>::new();
        let mut items = emitter.subscribe::<Item>();

        for n in 0..100 {
            assert!(emitter.emit::<Item>((n, String::new())));
        }
        drop(emitter);

        let mut seen = 0;
        while let Some((n, _)) = items.next().await {
            assert_eq!(n, seen);
            seen += 1;
        }
        assert_eq!(seen, 100);
    }

    #[tokio::test]
    async fn test_stream_across_tasks() {
        let emitter = TypedEventEmitter::<Feed>::new();
        let items = emitter.subscribe::<Item>();

        let reader = tokio::spawn(async move { items.take(3).collect::<Vec<_>>().await });
        for n in 0..3 {
            emitter.emit::<Item>((n, n.to_string()));
        }

        let got = reader.await.expect("reader task");
        assert_eq!(got.len(), 3);
        assert_eq!(got[2], (2, "2".to_string()));
    }
}
