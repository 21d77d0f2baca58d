//! Human-readable byte counts.

use std::fmt;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Formats a byte count as `B`, `KB` or `MB`, with one decimal for the
/// larger units.
pub struct FileSize(pub u64);

impl fmt::Display for FileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.0;
        if bytes < KIB {
            write!(f, "{bytes} B")
        } else if bytes < MIB {
            write!(f, "{:.1} KB", bytes as f64 / KIB as f64)
        } else {
            write!(f, "{:.1} MB", bytes as f64 / MIB as f64)
        }
    }
}
