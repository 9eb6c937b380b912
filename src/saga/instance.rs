// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// The saga instance targeted by a handler invocation.
///
/// Loading and persisting it is the host's business; the tracing stages only
/// read its identity, lifecycle flags, and entity snapshot once the handler
/// has run.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSagaInstance {
    saga_type: String,
    saga_id: String,
    is_new: bool,
    completed: bool,
    entity: Value,
}

impl ActiveSagaInstance {
    /// An instance loaded from storage.
    pub fn new(saga_type: impl Into<String>, saga_id: impl Into<String>, entity: Value) -> Self {
        Self {
            saga_type: saga_type.into(),
            saga_id: saga_id.into(),
            is_new: false,
            completed: false,
            entity,
        }
    }

    /// An instance created by the current message.
    pub fn started(saga_type: impl Into<String>, saga_id: impl Into<String>, entity: Value) -> Self {
        Self {
            is_new: true,
            ..Self::new(saga_type, saga_id, entity)
        }
    }

    pub fn saga_type(&self) -> &str {
        &self.saga_type
    }

    pub fn saga_id(&self) -> &str {
        &self.saga_id
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn mark_as_complete(&mut self) {
        self.completed = true;
    }

    pub fn entity(&self) -> &Value {
        &self.entity
    }

    /// Replaces the entity with the structured form of `entity`.
    pub fn set_entity<T: Serialize + ?Sized>(&mut self, entity: &T) -> Result<(), serde_json::Error> {
        self.entity = serde_json::to_value(entity)?;
        Ok(())
    }

    /// Reads the entity back as saga data.
    pub fn entity_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct OrderSagaData {
        order_id: String,
        confirmed: bool,
    }

    #[test]
    fn started_instances_are_new() {
        let saga = ActiveSagaInstance::started("OrderSaga", "s1", Value::Null);
        assert!(saga.is_new());
        assert!(!saga.is_completed());

        let loaded = ActiveSagaInstance::new("OrderSaga", "s1", Value::Null);
        assert!(!loaded.is_new());
    }

    #[test]
    fn entity_round_trips_through_saga_data() {
        let mut saga = ActiveSagaInstance::new("OrderSaga", "s1", json!({"order_id": "o-1", "confirmed": false}));

        let mut data: OrderSagaData = saga.entity_as().unwrap();
        data.confirmed = true;
        saga.set_entity(&data).unwrap();
        saga.mark_as_complete();

        assert_eq!(saga.entity(), &json!({"order_id": "o-1", "confirmed": true}));
        assert!(saga.is_completed());
    }
}
