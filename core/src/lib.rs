#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the tunnel generator.
//!
//! This crate defines the vocabulary that connects the static table catalog,
//! the generation systems and the adapters. Variants describe themselves via
//! [`TunnelVariant`], systems roll [`AttributeValue`]s from
//! [`WeightedTable`]s, and finished runs are handed to adapters as
//! [`TunnelRun`] values made of merged [`Section`]s.

mod attribute;
mod error;
mod section;
mod table;
mod variant;

pub use attribute::{
    AttributeKey, AttributeSource, AttributeSpec, AttributeValue, Depth, Flow, Incline, Passage,
    Slope, SlopeCategory, TunnelState, NARROW_WIDTH_LIMIT_FT,
};
pub use error::{GenerationError, TableError};
pub use section::{Diagnostic, Section, SpecialFeature, TunnelRun};
pub use table::{
    roll_dice, DiceFormula, PercentileBand, WeightedOption, WeightedTable, PERCENTILE_HIGH,
    PERCENTILE_LOW,
};
pub use variant::{GenerationRequest, TunnelVariant, VariantKind, FEET_PER_MILE};
