use anyhow::{Context, Result};
use std::env;
use std::fs;

/// Retrieve an environment variable value by its name. If the variable itself is unset,
/// a sibling variable named by appending `_FILE` is consulted and treated as the path to
/// a file holding the value (the usual mounted-secret convention).
///
/// Returns [Result::Ok()] with the trimmed value when either source produces one;
/// returns [Result::Err()] otherwise.
pub fn get_env_var(name: &str) -> Result<String> {
    let value = match env::var(name) {
        Ok(s) => s,
        Err(e) => get_from_file(name).context(format!(
            "No value found for {} or {}_FILE. Original Error: {:?}",
            name, name, e
        ))?,
    };
    Ok(value.trim().to_string())
}

fn get_from_file(name: &str) -> Result<String> {
    let path = env::var(format!("{}_FILE", name))?;
    Ok(fs::read_to_string(path)?)
}

pub mod variables {
    pub use crate::environment_variables::*;
}
