//! Nordic UART Service (NUS) UUIDs
//!
//! The RX/TX names follow the peripheral's point of view: the host writes to
//! RX and subscribes to TX.

/// NUS Service UUID
pub const SERVICE_UUID: &str = "6e400001-b5a3-f393-e0a9-e50e24dcca9e";

/// RX Characteristic UUID (write, write without response)
pub const RX_UUID: &str = "6e400002-b5a3-f393-e0a9-e50e24dcca9e";

/// TX Characteristic UUID (notify)
pub const TX_UUID: &str = "6e400003-b5a3-f393-e0a9-e50e24dcca9e";
