//! Message bridge between the session and the host transport.
//!
//! Outbound: [`Bridge::send`] queues intents; the runtime drains them with
//! [`Bridge::take_outgoing`] and writes each as one JSON line.
//!
//! Inbound: the transport hands every raw line to [`Bridge::deliver`], which
//! fans it out to every [`Subscription`]. Delivery goes through a channel, so
//! a handler never runs inside the call that produced the line and never
//! re-enters [`Bridge::send`].
//!
//! The bridge does not look at message shape. Decoding belongs to the
//! session.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::Intent;

/// Bidirectional channel to the host.
#[derive(Debug, Default)]
pub struct Bridge {
    /// Intents waiting to be written, oldest first.
    outgoing: Vec<Intent>,
    /// Inbound subscribers in registration order.
    subscribers: Vec<mpsc::UnboundedSender<Arc<str>>>,
}

impl Bridge {
    /// Create a bridge with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an intent for the host. Fire-and-forget.
    pub fn send(&mut self, intent: Intent) {
        self.outgoing.push(intent);
    }

    /// Drain queued intents as encoded lines, in send order.
    ///
    /// An intent that fails to encode is logged and dropped.
    pub fn take_outgoing(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outgoing)
            .into_iter()
            .filter_map(|intent| match intent.encode() {
                Ok(line) => Some(line),
                Err(error) => {
                    warn!(%error, ?intent, "dropping unencodable intent");
                    None
                },
            })
            .collect()
    }

    /// Number of queued intents.
    pub fn pending(&self) -> usize {
        self.outgoing.len()
    }

    /// Register a handler for inbound messages.
    ///
    /// Every subscription receives every message delivered after it was
    /// created, in delivery order.
    pub fn subscribe(&mut self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        Subscription { rx }
    }

    /// Fan one raw inbound message out to all subscribers.
    ///
    /// Subscriptions that were dropped are pruned.
    pub fn deliver(&mut self, raw: impl Into<Arc<str>>) {
        let raw = raw.into();
        self.subscribers.retain(|tx| tx.send(Arc::clone(&raw)).is_ok());
        debug!(subscribers = self.subscribers.len(), "delivered host message");
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Receiving end of [`Bridge::subscribe`].
#[derive(Debug)]
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<Arc<str>>,
}

impl Subscription {
    /// Wait for the next message. `None` once the bridge is gone.
    pub async fn recv(&mut self) -> Option<Arc<str>> {
        self.rx.recv().await
    }

    /// Next message if one is already queued.
    pub fn try_recv(&mut self) -> Option<Arc<str>> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outgoing_preserves_send_order() {
        let mut bridge = Bridge::new();
        bridge.send(Intent::Init);
        bridge.send(Intent::Restart);
        assert_eq!(bridge.pending(), 2);

        assert_eq!(bridge.take_outgoing(), vec![r#"{"Init":null}"#, r#"{"Restart":null}"#]);
        assert!(bridge.take_outgoing().is_empty());
    }

    #[test]
    fn every_subscriber_gets_every_message_in_order() {
        let mut bridge = Bridge::new();
        let mut first = bridge.subscribe();
        let mut second = bridge.subscribe();

        bridge.deliver("a");
        bridge.deliver("b");

        for sub in [&mut first, &mut second] {
            assert_eq!(sub.try_recv().as_deref(), Some("a"));
            assert_eq!(sub.try_recv().as_deref(), Some("b"));
            assert_eq!(sub.try_recv(), None);
        }
    }

    #[test]
    fn delivery_is_not_validated() {
        let mut bridge = Bridge::new();
        let mut sub = bridge.subscribe();

        bridge.deliver("not json at all");

        assert_eq!(sub.try_recv().as_deref(), Some("not json at all"));
    }

    #[test]
    fn dropped_subscriptions_are_pruned() {
        let mut bridge = Bridge::new();
        let kept = bridge.subscribe();
        drop(bridge.subscribe());

        bridge.deliver("x");

        assert_eq!(bridge.subscriber_count(), 1);
        drop(kept);
    }

    #[tokio::test]
    async fn recv_waits_for_delivery() {
        let mut bridge = Bridge::new();
        let mut sub = bridge.subscribe();

        bridge.deliver(String::from("late"));

        assert_eq!(sub.recv().await.as_deref(), Some("late"));
        drop(bridge);
        assert_eq!(sub.recv().await, None);
    }
}
