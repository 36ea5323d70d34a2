//! Shell quoting helpers shared by the transfer and remote modules.
//!
//! Everything handed to a remote `sh` goes through [`quote`]; paths are
//! interpolated into command strings, never into format strings the
//! remote shell re-evaluates.

/// Quote a string for a POSIX shell (single quotes, `'` escaped)
pub fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}
