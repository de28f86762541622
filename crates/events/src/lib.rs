//! Userhub event publishing infrastructure.
//!
//! This crate provides the resilient broker-publishing path for domain
//! events:
//!
//! - [`EventPublisher`] — owns one broker connection/channel pair and the
//!   reconnect/retry policy (bounded exponential backoff on both).
//! - [`Broker`] / [`BrokerChannel`] — the injectable transport seam, so
//!   the publisher is testable without a live broker.
//! - [`AmqpBroker`] — the production AMQP 0-9-1 transport (lapin).
//! - [`UserCreated`] — the typed `user.created` domain event.

pub mod amqp;
pub mod broker;
pub mod event;
pub mod publisher;

pub use amqp::AmqpBroker;
pub use broker::{Broker, BrokerChannel, BrokerError, MessageProperties};
pub use event::UserCreated;
pub use publisher::{EventPublisher, PublisherConfig, PublisherError};
