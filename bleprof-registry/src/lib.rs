//! bleprof registry
//!
//! Named BLE device profiles: which service to talk to, which characteristic
//! to subscribe to, which one to write to, and how to decode what arrives.
//!
//! # Example
//!
//! ```
//! use bleprof_registry::{ProfileRegistry, profiles::generic_uart};
//!
//! let mut registry = ProfileRegistry::new();
//! generic_uart::register(&mut registry);
//!
//! let uart = registry.get(generic_uart::KEY).unwrap();
//! println!("subscribe to {}", uart.characteristic());
//! println!("write to {}", uart.write_characteristic());
//!
//! let decoded = uart.parse(b"hello");
//! assert_eq!(decoded.as_text(), Some("hello"));
//! ```

pub mod channels;
pub mod config;
mod descriptor;
pub mod parser;
pub mod profiles;
mod registry;

pub use descriptor::{ProfileDescriptor, ProfileError};
pub use parser::{ParseFn, ParsedValue, ParserKind};
pub use registry::ProfileRegistry;
