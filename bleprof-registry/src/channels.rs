//! Channels - numeric values pulled out of a decoded packet by name
//!
//! Sensor packets are recognised first:
//!
//! - `{"type": "eeg", "data": {"tp9": 1.5}}` gives `eeg_tp9 = 1.5`
//! - `{"type": "imu", "data": {"accel": {"x": 1}, "gyro": {"x": 2}}}` gives
//!   `accel_x = 1`, `gyro_x = 2`
//! - `{"type": "heart_rate", "bpm": 61}` gives `bpm = 61`
//! - `{"samples": [packet, ...]}` is a batch, each packet is read in order
//!   and a later packet overwrites an earlier one's channels
//!
//! Anything else is flattened generically: `{"a": {"b": 1}, "c": [3, 4]}`
//! gives `a_b = 1`, `c_0 = 3`, `c_1 = 4`. A bare number becomes `value`.
//! Booleans count as numbers (1 and 0).

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::parser::ParsedValue;

/// Channel name used for a packet that is a single number
pub const VALUE_CHANNEL: &str = "value";

/// Flatten the numbers in `value` into named channels.
///
/// Strings and nulls are skipped, as are arrays nested in arrays.
pub fn flatten(value: &Value) -> BTreeMap<String, f64> {
    let mut channels = BTreeMap::new();
    match value {
        Value::Object(map) => {
            for packet in packets(map) {
                packet_channels(packet, &mut channels);
            }
        }
        _ => {
            if let Some(n) = number(value) {
                channels.insert(VALUE_CHANNEL.to_string(), n);
            }
        }
    }
    channels
}

/// The packets of a batch, or the object itself
fn packets(map: &Map<String, Value>) -> Vec<&Map<String, Value>> {
    if let Some(Value::Array(samples)) = map.get("samples") {
        let batch: Vec<_> = samples.iter().filter_map(Value::as_object).collect();
        if !batch.is_empty() {
            return batch;
        }
    }
    vec![map]
}

fn packet_channels(packet: &Map<String, Value>, channels: &mut BTreeMap<String, f64>) {
    let Some(kind) = packet.get("type").and_then(Value::as_str) else {
        flatten_into(packet, "", channels);
        return;
    };
    let data = packet.get("data").and_then(Value::as_object);

    match (kind, data) {
        ("imu", Some(data)) => {
            for part in ["accel", "gyro"] {
                if let Some(Value::Object(values)) = data.get(part) {
                    flatten_into(values, part, channels);
                }
            }
        }
        ("accel" | "accelerometer", Some(data)) => flatten_into(data, "accel", channels),
        (_, Some(data)) => flatten_into(data, kind, channels),
        // heart_rate, phone_sensors and the like carry their values inline
        (_, None) => {
            let mut values = packet.clone();
            values.remove("type");
            flatten_into(&values, "", channels);
        }
    }
}

fn flatten_into(map: &Map<String, Value>, prefix: &str, channels: &mut BTreeMap<String, f64>) {
    for (key, item) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}_{key}")
        };

        match item {
            Value::Object(inner) => flatten_into(inner, &name, channels),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if let Some(n) = number(item) {
                        channels.insert(format!("{name}_{i}"), n);
                    }
                }
            }
            _ => {
                if let Some(n) = number(item) {
                    channels.insert(name, n);
                }
            }
        }
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

impl ParsedValue {
    /// Numeric channels carried by this value
    pub fn channels(&self) -> BTreeMap<String, f64> {
        match self {
            Self::Json(value) => flatten(value),
            Self::Text(text) => text
                .trim()
                .parse::<f64>()
                .map(|n| BTreeMap::from([(VALUE_CHANNEL.to_string(), n)]))
                .unwrap_or_default(),
            Self::Bytes(_) => BTreeMap::new(),
        }
    }
}
