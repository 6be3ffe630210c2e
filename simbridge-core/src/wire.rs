//! Named-dictionary messages exchanged with the training platform.
//!
//! The platform speaks JSON objects keyed by field name in both directions:
//! configs and actions arrive as objects, states leave as objects. These
//! helpers move between those objects and the typed records of a plant
//! descriptor. A missing or mistyped field fails immediately; this layer
//! does not recover malformed messages.
use crate::error::BridgeError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Decodes an episode config message.
///
/// An empty object means the platform runs in prediction mode and supplies
/// no config; `None` is returned so the caller substitutes the plant
/// default.
pub fn config_from_value<C: DeserializeOwned>(value: &Value) -> Result<Option<C>, BridgeError> {
    match value {
        Value::Object(map) if map.is_empty() => Ok(None),
        _ => Ok(Some(serde_json::from_value(value.clone())?)),
    }
}

/// Decodes an action message; `None` or JSON null means no action issued.
pub fn action_from_value<A: DeserializeOwned>(
    value: Option<&Value>,
) -> Result<Option<A>, BridgeError> {
    match value {
        None => Ok(None),
        Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
    }
}

/// Encodes a state record as the dictionary sent to the platform.
pub fn state_to_value<S: Serialize>(state: &S) -> Result<Value, BridgeError> {
    Ok(serde_json::to_value(state)?)
}
