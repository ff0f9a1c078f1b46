//! Device — the sole record held by the registry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{MissingFields, ValidationError};
use crate::id::DeviceId;

/// A registered device. Every field is required text.
///
/// Serialized with camelCase keys in the canonical order
/// `id`, `deviceModel`, `name`, `note`, `serial`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: DeviceId,
    pub device_model: String,
    pub name: String,
    pub note: String,
    pub serial: String,
}

impl Device {
    /// Canonical field keys, in serialization and validation order.
    pub const FIELDS: [&'static str; 5] = ["id", "deviceModel", "name", "note", "serial"];

    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Pair each canonical key with its value, in [`Device::FIELDS`] order.
    #[must_use]
    pub fn fields(&self) -> [(&'static str, &str); 5] {
        [
            (Self::FIELDS[0], self.id.as_str()),
            (Self::FIELDS[1], &self.device_model),
            (Self::FIELDS[2], &self.name),
            (Self::FIELDS[3], &self.note),
            (Self::FIELDS[4], &self.serial),
        ]
    }

    /// Check that every field is non-empty.
    ///
    /// All fields are evaluated; the error lists each empty one.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] when at least one field is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing: Vec<&'static str> = self
            .fields()
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(key, _)| key)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(MissingFields::new(missing)))
        }
    }

    /// Parse a raw request body into a validated device.
    ///
    /// Checks run in strict precedence and stop at the first failing stage:
    /// empty body, then JSON decoding, then field presence. The body must be a
    /// JSON object (or `null`); any other value is malformed. Unknown keys are
    /// ignored, absent keys and `null` values count as empty, and a repeated
    /// key keeps its last value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyBody`], [`ValidationError::MalformedBody`]
    /// or [`ValidationError::MissingFields`].
    pub fn parse(body: impl AsRef<[u8]>) -> Result<Self, ValidationError> {
        let body = body.as_ref();
        if body.is_empty() {
            return Err(ValidationError::EmptyBody);
        }

        let object: Option<Map<String, Value>> = serde_json::from_slice(body)?;
        let draft = object
            .map(DeviceDraft::from_object)
            .transpose()?
            .unwrap_or_default();
        let device = draft.into_device();
        device.validate()?;
        Ok(device)
    }
}

/// Loosely-typed input shape: anything missing is `None`.
#[derive(Debug, Default)]
struct DeviceDraft {
    id: Option<String>,
    device_model: Option<String>,
    name: Option<String>,
    note: Option<String>,
    serial: Option<String>,
}

impl DeviceDraft {
    /// Pick the known keys out of a decoded JSON object.
    ///
    /// Each known key must hold a string or `null`.
    fn from_object(mut object: Map<String, Value>) -> Result<Self, serde_json::Error> {
        let mut take = |key: &str| -> Result<Option<String>, serde_json::Error> {
            object
                .remove(key)
                .map_or(Ok(None), serde_json::from_value::<Option<String>>)
        };

        Ok(Self {
            id: take(Device::FIELDS[0])?,
            device_model: take(Device::FIELDS[1])?,
            name: take(Device::FIELDS[2])?,
            note: take(Device::FIELDS[3])?,
            serial: take(Device::FIELDS[4])?,
        })
    }

    fn into_device(self) -> Device {
        Device {
            id: DeviceId::new(self.id.unwrap_or_default()),
            device_model: self.device_model.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            note: self.note.unwrap_or_default(),
            serial: self.serial.unwrap_or_default(),
        }
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    draft: DeviceDraft,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.draft.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn device_model(mut self, device_model: impl Into<String>) -> Self {
        self.draft.device_model = Some(device_model.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.draft.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.draft.note = Some(note.into());
        self
    }

    #[must_use]
    pub fn serial(mut self, serial: impl Into<String>) -> Self {
        self.draft.serial = Some(serial.into());
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] listing every missing or empty field.
    pub fn build(self) -> Result<Device, ValidationError> {
        let device = self.draft.into_device();
        device.validate()?;
        Ok(device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing(result: Result<Device, ValidationError>) -> Vec<&'static str> {
        match result {
            Err(ValidationError::MissingFields(fields)) => fields.fields().to_vec(),
            other => panic!("expected missing fields, got {other:?}"),
        }
    }

    #[test]
    fn should_build_valid_device_when_all_fields_provided() {
        let device = Device::builder()
            .id("1")
            .device_model("testDeviceModel")
            .name("testName")
            .note("testNote")
            .serial("testSerial")
            .build()
            .unwrap();
        assert_eq!(device.id.as_str(), "1");
        assert_eq!(device.serial, "testSerial");
    }

    #[test]
    fn should_list_every_missing_field_when_building() {
        let result = Device::builder().id("1").note("n").build();
        assert_eq!(missing(result), vec!["deviceModel", "name", "serial"]);
    }

    #[test]
    fn should_serialize_keys_in_canonical_order() {
        let device = Device::builder()
            .id("id_test")
            .device_model("deviceModel_test")
            .name("name_test")
            .note("note_test")
            .serial("serial_test")
            .build()
            .unwrap();
        let json = serde_json::to_string(&device).unwrap();
        assert_eq!(
            json,
            r#"{"id":"id_test","deviceModel":"deviceModel_test","name":"name_test","note":"note_test","serial":"serial_test"}"#
        );
    }

    #[test]
    fn should_reject_empty_body_as_no_inputs() {
        let result = Device::parse("");
        assert!(matches!(result, Err(ValidationError::EmptyBody)));
    }

    #[test]
    fn should_reject_broken_json_as_malformed() {
        let result = Device::parse("{{{}");
        assert!(matches!(result, Err(ValidationError::MalformedBody(_))));
    }

    #[test]
    fn should_report_malformed_before_missing_fields() {
        let result = Device::parse(r#"{"id":"", "name": 3}"#);
        assert!(matches!(result, Err(ValidationError::MalformedBody(_))));
    }

    #[test]
    fn should_reject_non_object_body_as_malformed() {
        assert!(matches!(
            Device::parse("[1, 2]"),
            Err(ValidationError::MalformedBody(_))
        ));
        assert!(matches!(
            Device::parse("   "),
            Err(ValidationError::MalformedBody(_))
        ));
    }

    #[test]
    fn should_reject_array_of_strings_as_malformed() {
        assert!(matches!(
            Device::parse(r#"["a","b","c","d","e"]"#),
            Err(ValidationError::MalformedBody(_))
        ));
        assert!(matches!(
            Device::parse("[]"),
            Err(ValidationError::MalformedBody(_))
        ));
    }

    #[test]
    fn should_reject_scalar_bodies_as_malformed() {
        for body in [r#""id""#, "42", "true"] {
            assert!(
                matches!(Device::parse(body), Err(ValidationError::MalformedBody(_))),
                "body {body} should be malformed"
            );
        }
    }

    #[test]
    fn should_keep_last_value_of_repeated_key() {
        let body = r#"{"id":"a","id":"b","deviceModel":"m","name":"n","note":"no","serial":"s"}"#;
        let device = Device::parse(body).unwrap();
        assert_eq!(device.id.as_str(), "b");
    }

    #[test]
    fn should_reject_non_string_value_for_known_key_as_malformed() {
        let body = r#"{"id":"1","deviceModel":"m","name":"n","note":{"a":1},"serial":"s"}"#;
        assert!(matches!(
            Device::parse(body),
            Err(ValidationError::MalformedBody(_))
        ));
    }

    #[test]
    fn should_ignore_non_string_value_for_unknown_key() {
        let body = r#"{"id":"1","deviceModel":"m","name":"n","note":"no","serial":"s","extra":[1,2]}"#;
        assert!(Device::parse(body).is_ok());
    }

    #[test]
    fn should_reject_invalid_utf8_as_malformed() {
        let result = Device::parse([b'{', 0xff, b'}']);
        assert!(matches!(result, Err(ValidationError::MalformedBody(_))));
    }

    #[test]
    fn should_report_only_empty_id() {
        let body = r#"{"id":"" , "deviceModel":"testDeviceModel" , "name":"testName" , "note":"testNote" , "serial":"testSerial" }"#;
        assert_eq!(missing(Device::parse(body)), vec!["id"]);
    }

    #[test]
    fn should_report_missing_fields_in_canonical_order() {
        let body = r#"{"serial":"", "name":"", "id":"1", "note":"testNote", "deviceModel":""}"#;
        assert_eq!(
            missing(Device::parse(body)),
            vec!["deviceModel", "name", "serial"]
        );
    }

    #[test]
    fn should_treat_absent_and_null_keys_as_empty() {
        let body = r#"{"id":"1", "deviceModel":null, "name":"n"}"#;
        assert_eq!(
            missing(Device::parse(body)),
            vec!["deviceModel", "note", "serial"]
        );
    }

    #[test]
    fn should_report_all_fields_when_body_is_json_null() {
        assert_eq!(missing(Device::parse("null")), Device::FIELDS.to_vec());
    }

    #[test]
    fn should_ignore_unknown_keys() {
        let body = r#"{"id":"1","deviceModel":"m","name":"n","note":"no","serial":"s","color":"red"}"#;
        let device = Device::parse(body).unwrap();
        assert_eq!(device.device_model, "m");
        assert_eq!(device.note, "no");
    }
}
