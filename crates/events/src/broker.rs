//! Transport seam between the publisher and the broker client.
//!
//! [`EventPublisher`](crate::publisher::EventPublisher) only talks to the
//! broker through these traits, so tests can substitute a scripted fake
//! and the retry policy can be exercised without a running broker.

use async_trait::async_trait;

/// Error surfaced by a broker transport.
///
/// The split matters to the retry policy: connection-level failures are
/// transient and trigger reconnect-and-retry, while a rejected publish is
/// final and propagates immediately.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BrokerError {
    /// Failed to reach the broker or the connection dropped.
    #[error("connection error: {0}")]
    Connection(String),

    /// The channel (or its parent connection) is no longer usable.
    #[error("channel closed: {0}")]
    ChannelClosed(String),

    /// The broker accepted the connection but refused the operation.
    #[error("publish rejected: {0}")]
    Rejected(String),
}

impl BrokerError {
    /// Whether this failure indicates a lost connection/channel and is
    /// therefore worth a reconnect-and-retry.
    pub fn is_connection_loss(&self) -> bool {
        matches!(
            self,
            BrokerError::Connection(_) | BrokerError::ChannelClosed(_)
        )
    }
}

/// Wire-level message attributes attached to every published event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageProperties {
    pub content_type: &'static str,
    /// Persistent delivery: the broker keeps the message across restarts.
    pub persistent: bool,
}

impl Default for MessageProperties {
    fn default() -> Self {
        Self {
            content_type: "application/json",
            persistent: true,
        }
    }
}

/// Factory for broker channels. Implemented by [`AmqpBroker`](crate::amqp::AmqpBroker)
/// in production and by fakes in tests.
#[async_trait]
pub trait Broker: Send + Sync {
    /// Open a connection to the broker at `url` and derive a channel on it.
    ///
    /// The returned handle owns both; a channel is never held without its
    /// live parent connection.
    async fn connect(&self, url: &str) -> Result<Box<dyn BrokerChannel>, BrokerError>;
}

/// A live connection/channel pair.
#[async_trait]
pub trait BrokerChannel: Send + Sync {
    /// Idempotently declare an exchange on this channel.
    async fn declare_exchange(
        &self,
        name: &str,
        kind: &str,
        durable: bool,
    ) -> Result<(), BrokerError>;

    /// Publish `body` to `exchange` with the given routing key,
    /// non-mandatory delivery.
    async fn publish(
        &self,
        exchange: &str,
        routing_key: &str,
        body: &[u8],
        props: &MessageProperties,
    ) -> Result<(), BrokerError>;

    /// Whether both the channel and its parent connection are still open.
    fn is_open(&self) -> bool;

    /// Tear down the channel and its connection. Both are released even
    /// when one of the two close operations fails.
    async fn close(&self) -> Result<(), BrokerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_errors_are_transient() {
        assert!(BrokerError::Connection("refused".into()).is_connection_loss());
        assert!(BrokerError::ChannelClosed("gone".into()).is_connection_loss());
        assert!(!BrokerError::Rejected("no such exchange".into()).is_connection_loss());
    }

    #[test]
    fn default_properties_are_persistent_json() {
        let props = MessageProperties::default();
        assert_eq!(props.content_type, "application/json");
        assert!(props.persistent);
    }
}
