//! Profile descriptor - the BLE communication contract of one kind of device

use serde::ser::{Serialize, SerializeStruct, Serializer};
use uuid::Uuid;

use crate::parser::{ParseFn, ParsedValue};

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("{field} is not a hyphenated 128-bit UUID: {value:?}")]
    InvalidUuid { field: &'static str, value: String },
}

/// How to talk to one kind of BLE peripheral.
///
/// Fields are only reachable through accessors, a descriptor cannot change
/// once built. The write direction is stored once and exposed under both of
/// its names, `write_characteristic` and `tx_characteristic`.
#[derive(Debug, Clone)]
pub struct ProfileDescriptor {
    name: String,
    service: String,
    characteristic: String,
    write_characteristic: String,
    parser: ParseFn,
}

impl ProfileDescriptor {
    /// Build a descriptor.
    ///
    /// # Arguments
    /// * `service` - service UUID
    /// * `characteristic` - characteristic the host reads or subscribes to
    /// * `write_characteristic` - characteristic the host writes to
    /// * `parser` - decodes data arriving on `characteristic`
    ///
    /// No validation happens here, see [`ProfileDescriptor::validate`].
    pub fn new(
        name: impl Into<String>,
        service: impl Into<String>,
        characteristic: impl Into<String>,
        write_characteristic: impl Into<String>,
        parser: ParseFn,
    ) -> Self {
        Self {
            name: name.into(),
            service: service.into(),
            characteristic: characteristic.into(),
            write_characteristic: write_characteristic.into(),
            parser,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Device to host
    pub fn characteristic(&self) -> &str {
        &self.characteristic
    }

    /// Host to device
    pub fn write_characteristic(&self) -> &str {
        &self.write_characteristic
    }

    /// Same value as [`ProfileDescriptor::write_characteristic`]
    pub fn tx_characteristic(&self) -> &str {
        &self.write_characteristic
    }

    pub fn parser(&self) -> ParseFn {
        self.parser
    }

    /// Decode a buffer received on the read characteristic
    pub fn parse(&self, data: &[u8]) -> ParsedValue {
        (self.parser)(data)
    }

    pub fn service_uuid(&self) -> Result<Uuid, ProfileError> {
        parse_uuid("service", &self.service)
    }

    pub fn characteristic_uuid(&self) -> Result<Uuid, ProfileError> {
        parse_uuid("characteristic", &self.characteristic)
    }

    pub fn write_characteristic_uuid(&self) -> Result<Uuid, ProfileError> {
        parse_uuid("write_characteristic", &self.write_characteristic)
    }

    /// Check that every UUID field is in the fixed hyphenated form
    pub fn validate(&self) -> Result<(), ProfileError> {
        self.service_uuid()?;
        self.characteristic_uuid()?;
        self.write_characteristic_uuid()?;
        Ok(())
    }
}

fn parse_uuid(field: &'static str, value: &str) -> Result<Uuid, ProfileError> {
    let invalid = || ProfileError::InvalidUuid {
        field,
        value: value.to_string(),
    };

    if !bleprof_proto::is_uuid_str(value) {
        return Err(invalid());
    }
    Uuid::parse_str(value).map_err(|_| invalid())
}

// The parser has no serialized form. Keys use the camelCase contract names.
impl Serialize for ProfileDescriptor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        let mut s = serializer.serialize_struct("ProfileDescriptor", 5)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("service", &self.service)?;
        s.serialize_field("characteristic", &self.characteristic)?;
        s.serialize_field("writeCharacteristic", &self.write_characteristic)?;
        s.serialize_field("txCharacteristic", self.tx_characteristic())?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    const SERVICE: &str = "0000180d-0000-1000-8000-00805f9b34fb";
    const NOTIFY: &str = "00002a37-0000-1000-8000-00805f9b34fb";
    const WRITE: &str = "00002a39-0000-1000-8000-00805f9b34fb";

    fn heart_rate() -> ProfileDescriptor {
        ProfileDescriptor::new("Heart Rate", SERVICE, NOTIFY, WRITE, parser::raw)
    }

    #[test]
    fn tx_aliases_write_characteristic() {
        let d = heart_rate();
        assert_eq!(d.write_characteristic(), WRITE);
        assert_eq!(d.tx_characteristic(), WRITE);
    }

    #[test]
    fn typed_uuids() {
        let d = heart_rate();
        assert_eq!(
            d.service_uuid().unwrap(),
            Uuid::from_u128(0x0000180d_0000_1000_8000_00805f9b34fb)
        );
        assert_eq!(
            d.characteristic_uuid().unwrap(),
            Uuid::from_u128(0x00002a37_0000_1000_8000_00805f9b34fb)
        );
        assert!(d.validate().is_ok());
    }

    #[test]
    fn malformed_uuid_is_accepted_until_validated() {
        let d = ProfileDescriptor::new("Broken", "not-a-uuid", NOTIFY, WRITE, parser::raw);
        assert_eq!(d.service(), "not-a-uuid");

        match d.validate() {
            Err(ProfileError::InvalidUuid { field, value }) => {
                assert_eq!(field, "service");
                assert_eq!(value, "not-a-uuid");
            }
            other => panic!("expected InvalidUuid, got {other:?}"),
        }
    }

    #[test]
    fn simple_form_uuid_is_rejected() {
        let d = ProfileDescriptor::new(
            "Simple",
            SERVICE,
            "00002a3700001000800000805f9b34fb",
            WRITE,
            parser::raw,
        );
        assert!(matches!(
            d.validate(),
            Err(ProfileError::InvalidUuid { field: "characteristic", .. })
        ));
    }

    #[test]
    fn serialized_shape() {
        let json = serde_json::to_value(heart_rate()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Heart Rate",
                "service": SERVICE,
                "characteristic": NOTIFY,
                "writeCharacteristic": WRITE,
                "txCharacteristic": WRITE,
            })
        );
    }
}
