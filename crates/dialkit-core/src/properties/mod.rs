//! Typed widget properties.
//!
//! Every widget exposes its style as a typed struct plus a key enum so hosts
//! can read and write individual properties. A name-keyed JSON interface is
//! layered on top for hosts that drive widgets from data; names the widget
//! does not recognize are kept verbatim alongside the typed fields.

mod bar;
mod knob;

pub use bar::{BarGraphConfig, BarGraphProperties, BarGraphProperty, BarGraphPropertyKey, MarkerScale};
pub use knob::{KnobConfig, KnobProperties, KnobProperty, KnobPropertyKey};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Property errors from the name-keyed interface.
#[derive(Debug, Error)]
pub enum PropertyError {
    #[error("invalid value for property `{key}`: {source}")]
    InvalidValue {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("property `{0}` holds a function and cannot be set from data")]
    NotData(&'static str),
}

/// Properties set under names the widget does not recognize.
pub type ExtraProperties = BTreeMap<String, Value>;

pub(crate) fn decode<T: DeserializeOwned>(key: &'static str, value: Value) -> Result<T, PropertyError> {
    serde_json::from_value(value).map_err(|source| PropertyError::InvalidValue { key, source })
}

pub(crate) fn encode<T: Serialize>(value: &T) -> Option<Value> {
    match serde_json::to_value(value) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Failed to encode property value: {}", e);
            None
        }
    }
}
