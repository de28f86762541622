//! AMQP 0-9-1 transport backed by lapin.

use async_trait::async_trait;
use lapin::options::{BasicPublishOptions, ExchangeDeclareOptions};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Connection, ConnectionProperties, ExchangeKind};

use crate::broker::{Broker, BrokerChannel, BrokerError, MessageProperties};

/// AMQP delivery-mode value for persistent messages.
const DELIVERY_MODE_PERSISTENT: u8 = 2;

/// Reply code sent with a clean channel/connection close.
const REPLY_SUCCESS: u16 = 200;

/// Production [`Broker`] implementation speaking AMQP 0-9-1 via lapin.
#[derive(Debug, Default)]
pub struct AmqpBroker;

#[async_trait]
impl Broker for AmqpBroker {
    async fn connect(&self, url: &str) -> Result<Box<dyn BrokerChannel>, BrokerError> {
        let connection = Connection::connect(url, ConnectionProperties::default())
            .await
            .map_err(map_error)?;
        let channel = connection.create_channel().await.map_err(map_error)?;
        Ok(Box::new(AmqpChannel {
            connection,
            channel,
        }))
    }
}

/// A lapin connection together with the single channel derived from it.
///
/// Owning both in one handle enforces the invariant that a channel is
/// never held usable once its parent connection is gone: the pair is
/// opened, checked, and closed together.
struct AmqpChannel {
    connection: Connection,
    channel: lapin::Channel,
}

#[async_trait]
impl BrokerChannel for AmqpChannel {
    async fn declare_exchange(
        &self,
        name: &str,
        kind: &str,
        durable: bool,
    ) -> Result<(), BrokerError> {
        let options = ExchangeDeclareOptions {
            durable,
            ..Default::default()
        };
        self.channel
            .exchange_declare(name, exchange_kind(kind), options, FieldTable::default())
            .await
            .map_err(map_error)
    }

    async fn publish(
        &self,
        exchange: &str,
        routing_key: &str,
        body: &[u8],
        props: &MessageProperties,
    ) -> Result<(), BrokerError> {
        let mut properties = BasicProperties::default().with_content_type(props.content_type.into());
        if props.persistent {
            properties = properties.with_delivery_mode(DELIVERY_MODE_PERSISTENT);
        }

        let confirm = self
            .channel
            .basic_publish(
                exchange,
                routing_key,
                BasicPublishOptions::default(),
                body,
                properties,
            )
            .await
            .map_err(map_error)?;

        // Without publisher confirms enabled this resolves as soon as the
        // frame is on the wire.
        confirm.await.map_err(map_error)?;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.connection.status().connected() && self.channel.status().connected()
    }

    async fn close(&self) -> Result<(), BrokerError> {
        // Close the channel first, then the connection. The connection
        // close runs regardless of the channel close outcome so both
        // handles are always released.
        let channel_result = self.channel.close(REPLY_SUCCESS, "shutdown").await;
        let connection_result = self.connection.close(REPLY_SUCCESS, "shutdown").await;
        channel_result.and(connection_result).map_err(map_error)
    }
}

/// Map a configured exchange kind name onto the lapin enum.
fn exchange_kind(kind: &str) -> ExchangeKind {
    match kind {
        "topic" => ExchangeKind::Topic,
        "direct" => ExchangeKind::Direct,
        "fanout" => ExchangeKind::Fanout,
        "headers" => ExchangeKind::Headers,
        other => ExchangeKind::Custom(other.to_string()),
    }
}

/// Classify a lapin error for the retry policy.
fn map_error(err: lapin::Error) -> BrokerError {
    match &err {
        lapin::Error::InvalidChannelState(_) | lapin::Error::InvalidConnectionState(_) => {
            BrokerError::ChannelClosed(err.to_string())
        }
        _ => BrokerError::Connection(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_exchange_kinds_resolve() {
        assert!(matches!(exchange_kind("topic"), ExchangeKind::Topic));
        assert!(matches!(exchange_kind("direct"), ExchangeKind::Direct));
        assert!(matches!(exchange_kind("fanout"), ExchangeKind::Fanout));
        assert!(matches!(exchange_kind("headers"), ExchangeKind::Headers));
    }

    #[test]
    fn unknown_exchange_kind_is_passed_through() {
        match exchange_kind("x-delayed-message") {
            ExchangeKind::Custom(name) => assert_eq!(name, "x-delayed-message"),
            other => panic!("expected custom kind, got {other:?}"),
        }
    }
}
