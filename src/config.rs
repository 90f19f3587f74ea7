use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

#[derive(Clone, Default, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) log: LogConfig,
    pub(crate) codec: CodecConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct LogConfig {
    pub(crate) level: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct CodecConfig {
    pub(crate) input: Format,
    pub(crate) output: Format,
    /// Emit `@context` on JSON documents.
    pub(crate) context: bool,
    pub(crate) flatten: bool,
    /// Strip `bto` and `bcc` before writing.
    pub(crate) clean: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Format {
    Json,
    Cbor,
    /// Sniff the first significant byte of the input.
    Auto,
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(Format::Json),
            "cbor" => Ok(Format::Cbor),
            "auto" => Ok(Format::Auto),
            other => bail!("unknown format {other:?}, expected json, cbor or auto"),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            input: Format::Json,
            output: Format::Cbor,
            context: true,
            flatten: false,
            clean: true,
        }
    }
}

impl Config {
    pub(crate) fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("unable to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }
}
