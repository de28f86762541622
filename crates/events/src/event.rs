//! Typed domain events published by the service.

use serde::{Deserialize, Serialize};
use userhub_core::types::DbId;

/// Payload of the `user.created` event.
///
/// Serializes to exactly `{"user_id": ..., "username": ..., "email": ...}`,
/// which is the wire contract consumers bind against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreated {
    pub user_id: DbId,
    pub username: String,
    pub email: String,
}

impl UserCreated {
    /// Routing key convention: `<entity>.<event>`.
    pub const ROUTING_KEY: &'static str = "user.created";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_wire_contract() {
        let event = UserCreated {
            user_id: 42,
            username: "alice".into(),
            email: "a@x.com".into(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "user_id": 42,
                "username": "alice",
                "email": "a@x.com",
            })
        );
    }

    #[test]
    fn routing_key_follows_entity_event_convention() {
        assert_eq!(UserCreated::ROUTING_KEY, "user.created");
    }
}
