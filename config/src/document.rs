//! TOML documents.

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::paths;

/// Parses `toml` read from `file` into a table.
pub fn parse_document(toml: &str, file: &Path) -> Result<toml::Table> {
    toml.parse::<toml::Table>().map_err(|e| {
        anyhow::Error::from(e).context(format!(
            "could not parse `{}` as TOML",
            file.display()
        ))
    })
}

/// Reads and deserializes a TOML file.
pub fn load<T: DeserializeOwned>(file: impl AsRef<Path>) -> Result<T> {
    let file = file.as_ref();
    log::debug!("loading `{}`", file.display());
    let contents = paths::read(file)?;
    from_document(&contents, file)
}

/// Deserializes TOML text that was read from `file`.
///
/// `file` is only used for error messages.
pub fn from_document<T: DeserializeOwned>(toml: &str, file: &Path) -> Result<T> {
    let table = parse_document(toml, file)?;
    toml::Value::Table(table)
        .try_into()
        .with_context(|| format!("invalid options in `{}`", file.display()))
}
