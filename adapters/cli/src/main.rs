#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates and prints tunnel descriptions.

mod config;
mod seed;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tunnelgen_core::{GenerationRequest, VariantKind};
use tunnelgen_report::{write_report, ReportFormat};
use tunnelgen_system_generator::generate;

use crate::config::GenerationConfig;

#[derive(Parser, Debug)]
#[command(name = "tunnelgen")]
#[command(about = "Generate a tunnel description.")]
struct Cli {
    /// Total length of the tunnel in miles
    length: Option<f64>,

    /// Tunnel variant: dry or wet
    #[arg(long)]
    variant: Option<VariantKind>,

    /// Minimum passage height in feet (dry only)
    #[arg(long)]
    min_height: Option<u32>,

    /// Minimum passage width in feet (dry only)
    #[arg(long)]
    min_width: Option<u32>,

    /// Seed for a reproducible run; numbers are used directly, text is hashed
    #[arg(long)]
    seed: Option<String>,

    /// TOML file with a [generation] table; command-line values take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long)]
    format: Option<ReportFormat>,
}

/// Fully resolved options for a single run.
#[derive(Debug, PartialEq)]
struct Settings {
    length_miles: f64,
    variant: VariantKind,
    min_height: u32,
    min_width: u32,
    seed: Option<String>,
    format: ReportFormat,
}

impl Settings {
    fn resolve(cli: Cli, file: GenerationConfig) -> Result<Self> {
        let length_miles = cli
            .length
            .or(file.length)
            .context("a tunnel length in miles is required (argument or config file)")?;

        Ok(Self {
            length_miles,
            variant: cli.variant.or(file.variant).unwrap_or_default(),
            min_height: cli.min_height.or(file.min_height).unwrap_or(0),
            min_width: cli.min_width.or(file.min_width).unwrap_or(0),
            seed: cli
                .seed
                .or_else(|| file.seed.map(config::SeedValue::into_text)),
            format: cli.format.or(file.format).unwrap_or_default(),
        })
    }

    fn request(&self) -> GenerationRequest {
        GenerationRequest::new(self.length_miles, self.variant)
            .with_minimums(self.min_height, self.min_width)
    }

    fn seed(&self) -> u64 {
        match &self.seed {
            Some(text) => seed::seed_from_text(text),
            None => rand::random(),
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "tunnelgen=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Entry point for the tunnel generator command-line interface.
fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let file = match &cli.config {
        Some(path) => config::load(path)?,
        None => GenerationConfig::default(),
    };
    let settings = Settings::resolve(cli, file)?;

    let seed = settings.seed();
    info!(seed, variant = %settings.variant, "seeding generator");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let run = generate(&settings.request(), &mut rng).context("failed to generate tunnel")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, settings.format, settings.length_miles, &run)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tunnelgen").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn command_line_overrides_config_file() {
        let cli = parse(&["2", "--variant", "wet", "--seed", "99"]);
        let file = GenerationConfig {
            length: Some(7.0),
            variant: Some(VariantKind::Dry),
            min_height: Some(5),
            format: Some(ReportFormat::Json),
            ..GenerationConfig::default()
        };

        let settings = Settings::resolve(cli, file).expect("length supplied");
        assert_eq!(
            settings,
            Settings {
                length_miles: 2.0,
                variant: VariantKind::Wet,
                min_height: 5,
                min_width: 0,
                seed: Some("99".to_owned()),
                format: ReportFormat::Json,
            }
        );
        assert_eq!(settings.seed(), 99);
    }

    #[test]
    fn length_is_required_somewhere() {
        let cli = parse(&["--variant", "dry"]);
        assert!(Settings::resolve(cli, GenerationConfig::default()).is_err());
    }

    #[test]
    fn unknown_variant_is_a_parse_error() {
        let args = ["tunnelgen", "1", "--variant", "damp"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
