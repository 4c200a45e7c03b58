//! Client version canonicalization.
//!
//! Versions arrive from the wire as 1–4 dot-separated numeric components
//! ("2.0", "1.2.3.4") and every lookup key uses the three-component form
//! ("2.0.0", "1.2.3"). Anything non-numeric is rejected.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("malformed version {0:?}")]
pub struct VersionError(pub String);

/// Canonicalizes a version string to `major.minor.patch`, padding missing
/// components with zero and dropping a trailing build component.
pub fn normalize(version: &str) -> Result<String, VersionError> {
    let trimmed = version.trim();
    if trimmed.is_empty() {
        return Err(VersionError(version.to_string()));
    }

    let parts: Vec<&str> = trimmed.split('.').collect();
    if parts.len() > 4 {
        return Err(VersionError(version.to_string()));
    }

    let mut components = Vec::with_capacity(parts.len());
    for part in parts {
        let n: u32 = part
            .parse()
            .map_err(|_| VersionError(version.to_string()))?;
        components.push(n);
    }

    while components.len() < 3 {
        components.push(0);
    }

    Ok(format!(
        "{}.{}.{}",
        components[0], components[1], components[2]
    ))
}
