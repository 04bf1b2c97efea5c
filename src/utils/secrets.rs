use std::env;

/// Reads an environment variable, treating blank values as unset.
pub fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Reads a credentials file referenced from the settings.
pub fn read_secret_file(path: &str) -> std::io::Result<String> {
    std::fs::read_to_string(path)
}
