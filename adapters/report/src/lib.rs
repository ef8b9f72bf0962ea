#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Text and JSON presentation of generated tunnel runs.

use std::{fmt, io::Write, str::FromStr};

use anyhow::{bail, Context, Result as AnyResult};
use serde::Serialize;
use tunnelgen_core::{AttributeKey, AttributeValue, Section, TunnelRun, VariantKind};

/// Output encodings supported by the report adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human readable section breakdown.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> AnyResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => bail!("unknown report format `{value}` (expected `text` or `json`)"),
        }
    }
}

/// Writes `run` to `out` in the requested `format`.
///
/// `requested_miles` is echoed back exactly as the caller supplied it.
pub fn write_report<W: Write>(
    out: &mut W,
    format: ReportFormat,
    requested_miles: f64,
    run: &TunnelRun,
) -> AnyResult<()> {
    match format {
        ReportFormat::Text => out
            .write_all(render_text(requested_miles, run).as_bytes())
            .context("failed to write text report"),
        ReportFormat::Json => write_json(out, requested_miles, run),
    }
}

/// Renders the header, summary and per-section breakdown of `run`.
///
/// Warnings raised while building the profile come first, as they are noticed
/// before generation starts.
#[must_use]
pub fn render_text(requested_miles: f64, run: &TunnelRun) -> String {
    let mut text = String::new();
    for diagnostic in run.diagnostics() {
        text.push_str(&format!("Warning: {diagnostic}\n"));
    }
    text.push_str(&header(run.variant(), requested_miles, run.requested_length_ft()));
    text.push('\n');

    text.push_str("\nTunnel Generation Complete.\n");
    text.push_str(&format!("Total Sections: {}\n", run.sections().len()));
    text.push_str(&format!(
        "Actual Total Length: {} feet\n",
        group_thousands(run.total_length_ft())
    ));
    text.push_str(&format!(
        "Total Elevation Change: {:+.1} feet\n",
        run.elevation_change_ft()
    ));
    text.push_str("\n--- Section Breakdown ---\n");

    for (index, section) in run.sections().iter().enumerate() {
        text.push_str(&section_line(index + 1, section));
        text.push('\n');
    }
    text
}

/// Line announcing the requested tunnel. Miles always keep a decimal point.
#[must_use]
pub fn header(variant: VariantKind, requested_miles: f64, requested_length_ft: u32) -> String {
    format!(
        "Generating {variant} tunnel of length {requested_miles:?} miles ({} feet)...",
        group_thousands(u64::from(requested_length_ft))
    )
}

/// One line describing a single section.
#[must_use]
pub fn section_line(number: usize, section: &Section) -> String {
    let mut parts = vec![format!("{} feet", section.length_ft())];
    parts.extend(
        section
            .attributes()
            .iter()
            .map(|(key, value)| describe(key, value)),
    );

    let mut line = format!(
        "Section {number}: {} [Elev: {:+.1} ft]",
        parts.join(", "),
        section.elevation_ft()
    );
    if let Some(special) = section.special() {
        line.push_str(&format!(" [Special: {special}]"));
    }
    line
}

fn describe(key: AttributeKey, value: &AttributeValue) -> String {
    let text = match value {
        AttributeValue::Passage(passage) => {
            format!("{} ({})", passage.label(), passage.dimensions())
        }
        AttributeValue::Slope(slope) => {
            format!("{} ({} deg)", slope.category().name(), slope.degree())
        }
        AttributeValue::Flow(flow) => flow.label().to_owned(),
        AttributeValue::Depth(depth) => format!("{} ({}')", depth.label(), depth.feet()),
        AttributeValue::Descriptor(label) => (*label).to_owned(),
    };

    match key {
        AttributeKey::Size
        | AttributeKey::Slope
        | AttributeKey::Direction
        | AttributeKey::Texture
        | AttributeKey::Condition => text,
        AttributeKey::WaterDepth
        | AttributeKey::Ceiling
        | AttributeKey::Flow
        | AttributeKey::Temperature
        | AttributeKey::Illumination
        | AttributeKey::Air => format!("{}: {text}", key.label()),
    }
}

/// Formats `value` with comma thousands separators.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[derive(Serialize)]
struct JsonReport<'a> {
    requested_miles: f64,
    total_length_ft: u64,
    #[serde(flatten)]
    run: &'a TunnelRun,
}

fn write_json<W: Write>(out: &mut W, requested_miles: f64, run: &TunnelRun) -> AnyResult<()> {
    let report = JsonReport {
        requested_miles,
        total_length_ft: run.total_length_ft(),
        run,
    };
    serde_json::to_writer_pretty(&mut *out, &report).context("failed to encode json report")?;
    out.write_all(b"\n").context("failed to write json report")
}
