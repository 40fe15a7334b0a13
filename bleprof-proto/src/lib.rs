//! BLE profile protocol constants and UUID string helpers

pub mod nus;

/// Length of a hyphenated 128-bit UUID string
pub const UUID_STR_LEN: usize = 36;

// Byte offsets of the hyphens in `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`
const HYPHENS: [usize; 4] = [8, 13, 18, 23];

/// Check that `s` is a 128-bit UUID in the fixed hyphenated form
/// `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` (either hex case).
/// Braced, URN and simple forms are rejected.
pub fn is_uuid_str(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != UUID_STR_LEN {
        return false;
    }

    bytes.iter().enumerate().all(|(i, b)| {
        if HYPHENS.contains(&i) {
            *b == b'-'
        } else {
            b.is_ascii_hexdigit()
        }
    })
}
