//! Optional TOML configuration merged beneath command-line arguments.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tunnelgen_core::VariantKind;
use tunnelgen_report::ReportFormat;

/// Seed as written in a configuration file: either a number or free text.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum SeedValue {
    Number(u64),
    Text(String),
}

impl SeedValue {
    pub(crate) fn into_text(self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(text) => text,
        }
    }
}

/// Values accepted under the `[generation]` table.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct GenerationConfig {
    pub(crate) length: Option<f64>,
    pub(crate) variant: Option<VariantKind>,
    pub(crate) min_height: Option<u32>,
    pub(crate) min_width: Option<u32>,
    pub(crate) seed: Option<SeedValue>,
    pub(crate) format: Option<ReportFormat>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    generation: GenerationConfig,
}

/// Reads the configuration file at `path`.
pub(crate) fn load(path: &Path) -> Result<GenerationConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config at {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid config at {}", path.display()))
}

fn parse(contents: &str) -> Result<GenerationConfig> {
    let file: ConfigFile = toml::from_str(contents).context("failed to parse config toml")?;
    if let Some(length) = file.generation.length {
        if !length.is_finite() || length < 0.0 {
            bail!("tunnel length must be a non-negative number of miles, got {length}");
        }
    }
    Ok(file.generation)
}
