//! Key-value record shape — how a [`Device`] is laid out in the store.
//!
//! A record is a flat map of attribute names to typed values, keyed by the
//! device `id`. Attribute names are identical to the device's JSON keys.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::id::DeviceId;

/// A single typed attribute value, tagged the way key-value stores tag them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// Text.
    S(String),
    /// Number, kept in its textual form.
    N(String),
    #[serde(rename = "BOOL")]
    Bool(bool),
}

impl AttributeValue {
    /// Borrow the text when this is a string value.
    #[must_use]
    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(value) => Some(value),
            Self::N(_) | Self::Bool(_) => None,
        }
    }
}

/// A stored record: attribute name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(BTreeMap<String, AttributeValue>);

impl Item {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: AttributeValue) {
        self.0.insert(name.into(), value);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn take_s(&mut self, name: &'static str) -> Result<String, RecordError> {
        match self.0.remove(name) {
            Some(AttributeValue::S(value)) => Ok(value),
            Some(_) => Err(RecordError::NotAString(name)),
            None => Err(RecordError::MissingAttribute(name)),
        }
    }
}

impl FromIterator<(String, AttributeValue)> for Item {
    fn from_iter<T: IntoIterator<Item = (String, AttributeValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A stored record could not be read back as a [`Device`].
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("record has no `{0}` attribute")]
    MissingAttribute(&'static str),

    #[error("record attribute `{0}` is not a string")]
    NotAString(&'static str),
}

impl From<&Device> for Item {
    fn from(device: &Device) -> Self {
        device
            .fields()
            .into_iter()
            .map(|(name, value)| (name.to_string(), AttributeValue::S(value.to_string())))
            .collect()
    }
}

impl TryFrom<Item> for Device {
    type Error = RecordError;

    fn try_from(mut item: Item) -> Result<Self, Self::Error> {
        let [id, device_model, name, note, serial] = Device::FIELDS;
        Ok(Self {
            id: DeviceId::new(item.take_s(id)?),
            device_model: item.take_s(device_model)?,
            name: item.take_s(name)?,
            note: item.take_s(note)?,
            serial: item.take_s(serial)?,
        })
    }
}
