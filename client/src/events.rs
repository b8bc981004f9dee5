//! Event stream for the presentation layer.
//!
//! The session pushes events into a bounded channel; the presentation layer
//! consumes them as a [`futures::Stream`] at its own pace. Dealer draws
//! arrive one event at a time so each can be shown before the next.

use chiphouse_types::casino::{Card, Outcome};
use futures::Stream as FutStream;
use tokio::sync::mpsc;
use tracing::warn;

const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Events emitted by a session.
#[derive(Clone, Debug, PartialEq)]
pub enum TableEvent {
    /// A card was dealt to the player.
    PlayerCard(Card),
    /// The dealer revealed or drew a card.
    DealerCard(Card),
    /// The balance changed (new value in whole chips).
    BalanceChanged(u64),
    /// A round resolved; the outcome awaits acknowledgment.
    RoundResolved(Outcome),
    /// A user-facing message (errors, rejections).
    Message(String),
}

/// Stream of events from a session.
pub struct TableEvents {
    receiver: mpsc::Receiver<TableEvent>,
}

impl TableEvents {
    /// Receive the next event from the stream.
    pub async fn next(&mut self) -> Option<TableEvent> {
        self.receiver.recv().await
    }

    /// Drain everything currently buffered without waiting.
    pub fn drain(&mut self) -> Vec<TableEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }
}

impl FutStream for TableEvents {
    type Item = TableEvent;

    fn poll_next(
        mut self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

/// Sending half held by the session.
#[derive(Clone)]
pub(crate) struct EventSink {
    sender: mpsc::Sender<TableEvent>,
}

impl EventSink {
    /// Emit without blocking; a full or closed channel drops the event.
    pub(crate) fn emit(&self, event: TableEvent) {
        if let Err(err) = self.sender.try_send(event) {
            warn!(error = %err, "dropped table event");
        }
    }
}

/// Create a linked sink/stream pair.
pub(crate) fn channel(capacity: usize) -> (EventSink, TableEvents) {
    let capacity = if capacity == 0 {
        DEFAULT_CHANNEL_CAPACITY
    } else {
        capacity
    };
    let (sender, receiver) = mpsc::channel(capacity);
    (EventSink { sender }, TableEvents { receiver })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_events_arrive_in_order() {
        let (sink, mut events) = channel(8);
        sink.emit(TableEvent::BalanceChanged(900));
        sink.emit(TableEvent::Message("hello".into()));
        assert_eq!(events.next().await, Some(TableEvent::BalanceChanged(900)));
        assert_eq!(
            events.next().await,
            Some(TableEvent::Message("hello".into()))
        );
    }

    #[tokio::test]
    async fn test_stream_impl() {
        let (sink, events) = channel(8);
        sink.emit(TableEvent::BalanceChanged(1));
        sink.emit(TableEvent::BalanceChanged(2));
        drop(sink);
        let collected: Vec<_> = events.collect().await;
        assert_eq!(collected.len(), 2);
    }

    #[tokio::test]
    async fn test_full_channel_drops_instead_of_blocking() {
        let (sink, mut events) = channel(1);
        sink.emit(TableEvent::BalanceChanged(1));
        sink.emit(TableEvent::BalanceChanged(2)); // dropped
        assert_eq!(events.drain(), vec![TableEvent::BalanceChanged(1)]);
    }
}
