//! Transcript persistence adapters.

pub mod json_file;

pub use json_file::JsonFileStore;

use std::path::PathBuf;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `ERRANDRY_DATA_DIR` environment variable
/// 2. `~/.errandry`
/// 3. `./.errandry` when no home directory exists
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ERRANDRY_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".errandry");
    }

    PathBuf::from(".errandry")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_data_dir_from_env() {
        // SAFETY: This test is single-threaded and restores the env var immediately.
        unsafe {
            std::env::set_var("ERRANDRY_DATA_DIR", "/tmp/test-errandry");
        }
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-errandry"));
        unsafe {
            std::env::remove_var("ERRANDRY_DATA_DIR");
        }
    }
}
