//! Generic UART profile - serial over BLE through the Nordic UART Service
//!
//! Names are from the host's side: `characteristic` is the one the host
//! subscribes to (NUS TX, 6e400003) and `write_characteristic` the one it
//! writes to (NUS RX, 6e400002).

use bleprof_proto::nus;

use crate::parser::{self, ParsedValue};
use crate::{ProfileDescriptor, ProfileRegistry};

pub const KEY: &str = "generic_uart";
pub const NAME: &str = "Generic UART";

/// Incoming data is UTF-8 text
pub fn parse(data: &[u8]) -> ParsedValue {
    parser::utf8_text(data)
}

pub fn descriptor() -> ProfileDescriptor {
    ProfileDescriptor::new(NAME, nus::SERVICE_UUID, nus::TX_UUID, nus::RX_UUID, parse)
}

pub fn register(registry: &mut ProfileRegistry) {
    registry.register(KEY, descriptor());
}
