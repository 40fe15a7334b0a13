//! Profile registry - known profiles, keyed by name

use std::collections::HashMap;

use crate::descriptor::ProfileDescriptor;

/// Profiles known to the application, keyed by profile key.
///
/// Created empty, filled during startup by the profile units and the config
/// loader, then read by whoever drives the BLE connection. There is no
/// unregister.
#[derive(Debug, Default)]
pub struct ProfileRegistry {
    profiles: HashMap<String, ProfileDescriptor>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in profile
    pub fn with_builtin_profiles() -> Self {
        let mut registry = Self::new();
        crate::profiles::register_builtin(&mut registry);
        registry
    }

    /// Register a profile under `key`.
    ///
    /// Last write wins: an existing entry for `key` is replaced and a warning
    /// is logged. The descriptor is not validated.
    pub fn register(&mut self, key: &str, descriptor: ProfileDescriptor) {
        if let Some(previous) = self.profiles.get(key) {
            log::warn!(
                "profile '{key}' already registered ({}), replacing with {}",
                previous.name(),
                descriptor.name()
            );
        } else {
            log::info!("registered profile '{key}' ({})", descriptor.name());
        }

        self.profiles.insert(key.to_string(), descriptor);
    }

    pub fn get(&self, key: &str) -> Option<&ProfileDescriptor> {
        self.profiles.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.profiles.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Entries sorted by key
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProfileDescriptor)> {
        let mut entries: Vec<_> = self
            .profiles
            .iter()
            .map(|(key, descriptor)| (key.as_str(), descriptor))
            .collect();
        entries.sort_unstable_by_key(|(key, _)| *key);
        entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn descriptor(name: &str, service: &str) -> ProfileDescriptor {
        ProfileDescriptor::new(
            name,
            service,
            "00000002-0000-1000-8000-00805f9b34fb",
            "00000003-0000-1000-8000-00805f9b34fb",
            parser::utf8_text,
        )
    }

    #[test]
    fn starts_empty() {
        let registry = ProfileRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get("generic_uart").is_none());
    }

    #[test]
    fn fresh_key_is_retrievable() {
        let mut registry = ProfileRegistry::new();
        registry.register("thermo", descriptor("Thermometer", "0000181a-0000-1000-8000-00805f9b34fb"));

        let found = registry.get("thermo").unwrap();
        assert_eq!(found.name(), "Thermometer");
        assert_eq!(found.service(), "0000181a-0000-1000-8000-00805f9b34fb");
        assert_eq!(found.characteristic(), "00000002-0000-1000-8000-00805f9b34fb");
        assert_eq!(found.write_characteristic(), "00000003-0000-1000-8000-00805f9b34fb");
        assert_eq!(found.parse(b"21.5").as_text(), Some("21.5"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn last_write_wins() {
        let mut registry = ProfileRegistry::new();
        registry.register("other", descriptor("Other", "00000010-0000-1000-8000-00805f9b34fb"));
        registry.register("k", descriptor("First", "00000020-0000-1000-8000-00805f9b34fb"));
        registry.register("k", descriptor("Second", "00000030-0000-1000-8000-00805f9b34fb"));

        let k = registry.get("k").unwrap();
        assert_eq!(k.name(), "Second");
        assert_eq!(k.service(), "00000030-0000-1000-8000-00805f9b34fb");

        let other = registry.get("other").unwrap();
        assert_eq!(other.name(), "Other");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn keys_are_independent() {
        let mut registry = ProfileRegistry::new();
        registry.register("b", descriptor("B", "0000000b-0000-1000-8000-00805f9b34fb"));
        registry.register("a", descriptor("A", "0000000a-0000-1000-8000-00805f9b34fb"));

        assert_eq!(registry.get("a").unwrap().name(), "A");
        assert_eq!(registry.get("b").unwrap().name(), "B");
        assert_eq!(registry.keys(), vec!["a", "b"]);

        let names: Vec<&str> = registry.iter().map(|(_, d)| d.name()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    /// Records log lines per thread, so parallel tests do not see each other's records
    mod capture {
        use std::cell::RefCell;
        use std::sync::Once;

        thread_local! {
            static RECORDS: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
        }

        struct CaptureLogger;

        impl log::Log for CaptureLogger {
            fn enabled(&self, _metadata: &log::Metadata) -> bool {
                true
            }

            fn log(&self, record: &log::Record) {
                RECORDS.with(|r| r.borrow_mut().push((record.level(), record.args().to_string())));
            }

            fn flush(&self) {}
        }

        static LOGGER: CaptureLogger = CaptureLogger;
        static INIT: Once = Once::new();

        /// Drain what this thread logged so far
        pub fn take() -> Vec<(log::Level, String)> {
            INIT.call_once(|| {
                log::set_logger(&LOGGER).unwrap();
                log::set_max_level(log::LevelFilter::Trace);
            });
            RECORDS.with(|r| r.borrow_mut().drain(..).collect())
        }
    }

    #[test]
    fn overwrite_logs_one_warning() {
        capture::take();
        let mut registry = ProfileRegistry::new();

        registry.register("k", descriptor("First", "00000020-0000-1000-8000-00805f9b34fb"));
        let first = capture::take();
        assert!(first.iter().all(|(level, _)| *level != log::Level::Warn));
        assert!(
            first
                .iter()
                .any(|(level, msg)| *level == log::Level::Info && msg.contains("'k'"))
        );

        registry.register("k", descriptor("Second", "00000030-0000-1000-8000-00805f9b34fb"));
        let warnings: Vec<String> = capture::take()
            .into_iter()
            .filter(|(level, _)| *level == log::Level::Warn)
            .map(|(_, msg)| msg)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("'k'"));
        assert!(warnings[0].contains("First"));
        assert!(warnings[0].contains("Second"));
    }

    #[test]
    fn builtin_profiles() {
        let registry = ProfileRegistry::with_builtin_profiles();
        assert_eq!(registry.keys(), vec!["generic_uart"]);
    }
}
