//! Built-in profiles
//!
//! Each profile unit exposes a `KEY`, a `descriptor()` and a
//! `register(&mut ProfileRegistry)` that registers it exactly once.

pub mod generic_uart;

use crate::ProfileRegistry;

/// Register every built-in profile
pub fn register_builtin(registry: &mut ProfileRegistry) {
    generic_uart::register(registry);
}
