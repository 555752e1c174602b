//! CLI configuration from environment variables.

use std::path::PathBuf;

/// Default backing file, relative to the working directory.
const DEFAULT_STORE_PATH: &str = "brewline.json";

/// Path of the JSON store file.
///
/// Read from `BREWLINE_STORE_PATH`, falling back to `brewline.json`.
#[must_use]
pub fn store_path() -> PathBuf {
    std::env::var("BREWLINE_STORE_PATH")
        .map_or_else(|_| PathBuf::from(DEFAULT_STORE_PATH), PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(unsafe_code)]
    fn test_store_path_env_override_and_default() {
        // SAFETY: no other test in this binary touches the environment.
        unsafe { std::env::set_var("BREWLINE_STORE_PATH", "/tmp/alt.json") };
        assert_eq!(store_path(), PathBuf::from("/tmp/alt.json"));

        unsafe { std::env::remove_var("BREWLINE_STORE_PATH") };
        assert_eq!(store_path(), PathBuf::from("brewline.json"));
    }
}
