//! Error types raised while building tables or preparing a run.

use thiserror::Error;

/// Malformed static table data. These indicate a defect in the table
/// definitions rather than a runtime condition.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TableError {
    /// Every option in the table carries zero weight.
    #[error("table `{table}` has zero total weight")]
    ZeroTotalWeight {
        /// Name of the offending table.
        table: &'static str,
    },
    /// A percentile band does not start where the previous one ended.
    #[error("table `{table}` band {low}-{high} should start at {expected_low}")]
    MisalignedBand {
        /// Name of the offending table.
        table: &'static str,
        /// Roll the band was expected to start at.
        expected_low: u32,
        /// Declared lower bound.
        low: u32,
        /// Declared upper bound.
        high: u32,
    },
    /// The percentile bands stop before 100.
    #[error("table `{table}` only covers rolls 1-{covered}")]
    IncompleteBands {
        /// Name of the offending table.
        table: &'static str,
        /// Highest roll covered.
        covered: u32,
    },
}

/// Reasons a generation call aborts before producing any section.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GenerationError {
    /// Requested length is negative, not finite, or too large to count in feet.
    #[error("cannot generate a tunnel of {miles} miles")]
    InvalidLength {
        /// Requested length in miles.
        miles: f64,
    },
    /// Variant name not recognised.
    #[error("unknown tunnel variant `{0}` (expected `dry` or `wet`)")]
    UnknownVariant(String),
    /// A table backing the variant is malformed.
    #[error(transparent)]
    Table(#[from] TableError),
}
