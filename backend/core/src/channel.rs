use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::traits::Transport;
use crate::types::{Command, DisplayItem, Profile, ResponseEnvelope, SessionId};

/// Default channel buffer size for outbound events.
const DEFAULT_BUFFER_SIZE: usize = 256;

/// One transport call, captured as a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outbound {
    Profiles { profiles: Vec<Profile> },
    Commands { session: SessionId, commands: Vec<Command> },
    Envelope { session: SessionId, envelope: ResponseEnvelope },
    SidePanel { session: SessionId, items: Vec<DisplayItem> },
}

impl Outbound {
    pub fn session(&self) -> Option<&SessionId> {
        match self {
            Outbound::Profiles { .. } => None,
            Outbound::Commands { session, .. }
            | Outbound::Envelope { session, .. }
            | Outbound::SidePanel { session, .. } => Some(session),
        }
    }
}

/// A `Transport` that forwards every call into a bounded mpsc channel.
///
/// The consumer side (a websocket writer, a console printer, a test) takes the
/// receiver once and drains it in order.
pub struct OutboundBus {
    tx: mpsc::Sender<Outbound>,
    rx: Option<mpsc::Receiver<Outbound>>,
}

impl OutboundBus {
    pub fn new() -> Self {
        Self::with_buffer_size(DEFAULT_BUFFER_SIZE)
    }

    pub fn with_buffer_size(buffer: usize) -> Self {
        let (tx, rx) = mpsc::channel(buffer);
        info!(buffer_size = buffer, "OutboundBus initialized");
        Self { tx, rx: Some(rx) }
    }

    /// Take the receiver (can only be called once).
    pub fn take_rx(&mut self) -> Option<mpsc::Receiver<Outbound>> {
        debug!("Outbound receiver taken");
        self.rx.take()
    }

    /// A transport handle that pushes into this bus.
    pub fn transport(&self) -> BusTransport {
        BusTransport { tx: self.tx.clone() }
    }
}

impl Default for OutboundBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable sending half of an [`OutboundBus`].
#[derive(Clone)]
pub struct BusTransport {
    tx: mpsc::Sender<Outbound>,
}

impl BusTransport {
    async fn push(&self, event: Outbound) -> Result<()> {
        self.tx
            .send(event)
            .await
            .map_err(|_| anyhow!("outbound bus closed"))
    }
}

#[async_trait]
impl Transport for BusTransport {
    async fn publish_profiles(&self, profiles: &[Profile]) -> Result<()> {
        self.push(Outbound::Profiles { profiles: profiles.to_vec() }).await
    }

    async fn set_commands(&self, session: &SessionId, commands: &[Command]) -> Result<()> {
        self.push(Outbound::Commands {
            session: session.clone(),
            commands: commands.to_vec(),
        })
        .await
    }

    async fn send(&self, session: &SessionId, envelope: &ResponseEnvelope) -> Result<()> {
        self.push(Outbound::Envelope {
            session: session.clone(),
            envelope: envelope.clone(),
        })
        .await
    }

    async fn set_side_panel(&self, session: &SessionId, items: &[DisplayItem]) -> Result<()> {
        self.push(Outbound::SidePanel {
            session: session.clone(),
            items: items.to_vec(),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bus_preserves_order() {
        let mut bus = OutboundBus::new();
        let mut rx = bus.take_rx().unwrap();
        let transport = bus.transport();
        let session: SessionId = "s1".into();

        transport.send(&session, &ResponseEnvelope::text("one")).await.unwrap();
        transport.send(&session, &ResponseEnvelope::text("two")).await.unwrap();

        for expected in ["one", "two"] {
            match rx.recv().await.unwrap() {
                Outbound::Envelope { envelope, .. } => assert_eq!(envelope.text, expected),
                other => panic!("unexpected event: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_bus_take_rx_once() {
        let mut bus = OutboundBus::new();
        assert!(bus.take_rx().is_some());
        assert!(bus.take_rx().is_none());
    }

    #[tokio::test]
    async fn test_send_fails_after_receiver_dropped() {
        let mut bus = OutboundBus::with_buffer_size(1);
        drop(bus.take_rx());
        let err = bus
            .transport()
            .send(&"s".to_string(), &ResponseEnvelope::text("lost"))
            .await;
        assert!(err.is_err());
    }
}
