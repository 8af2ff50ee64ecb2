//! Credentials file loading.

use std::path::Path;

use anyhow::{Context, Result, bail};
use dynect_provider::Credentials;

/// Read `customer username password` from the first line of `path`.
pub fn load(path: &Path) -> Result<Credentials> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Credentials file does not exist: {}", path.display()))?;

    let line = content.lines().next().unwrap_or_default();
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(customer), Some(username), Some(password)) => {
            Ok(Credentials::new(customer, username, password))
        }
        _ => bail!(
            "Credentials file {} must hold `customer username password` on its first line",
            path.display()
        ),
    }
}
