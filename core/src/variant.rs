//! Variant contract shared by the catalog and the generation systems.

use std::{fmt, str::FromStr};

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::{
    AttributeSpec, Diagnostic, DiceFormula, GenerationError, SpecialFeature, WeightedTable,
};

/// Feet in one statute mile.
pub const FEET_PER_MILE: u32 = 5_280;

/// Named tunnel profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantKind {
    /// Dry passages tracking slope, texture and floor condition.
    #[default]
    Dry,
    /// Water-carved passages tracking depth, ceiling, flow and temperature.
    Wet,
}

impl VariantKind {
    /// Lowercase identifier used on the command line and in config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dry => "dry",
            Self::Wet => "wet",
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariantKind {
    type Err = GenerationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dry" => Ok(Self::Dry),
            "wet" => Ok(Self::Wet),
            _ => Err(GenerationError::UnknownVariant(value.to_owned())),
        }
    }
}

/// Parameters of a single generation call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationRequest {
    total_miles: f64,
    variant: VariantKind,
    min_height: u32,
    min_width: u32,
}

impl GenerationRequest {
    /// Requests `total_miles` of tunnel without size restrictions.
    #[must_use]
    pub const fn new(total_miles: f64, variant: VariantKind) -> Self {
        Self {
            total_miles,
            variant,
            min_height: 0,
            min_width: 0,
        }
    }

    /// Restricts the initial size table of the dry variant.
    #[must_use]
    pub const fn with_minimums(self, min_height: u32, min_width: u32) -> Self {
        Self {
            min_height,
            min_width,
            ..self
        }
    }

    /// Requested length in miles.
    #[must_use]
    pub const fn total_miles(&self) -> f64 {
        self.total_miles
    }

    /// Requested variant.
    #[must_use]
    pub const fn variant(&self) -> VariantKind {
        self.variant
    }

    /// Minimum passage height in feet.
    #[must_use]
    pub const fn min_height(&self) -> u32 {
        self.min_height
    }

    /// Minimum passage width in feet.
    #[must_use]
    pub const fn min_width(&self) -> u32 {
        self.min_width
    }

    /// Requested length rounded to whole feet.
    pub fn requested_length_ft(&self) -> Result<u32, GenerationError> {
        let feet = (self.total_miles * f64::from(FEET_PER_MILE)).round();
        if !feet.is_finite() || self.total_miles < 0.0 || feet > f64::from(u32::MAX) {
            return Err(GenerationError::InvalidLength {
                miles: self.total_miles,
            });
        }
        Ok(feet as u32)
    }
}

/// Profile supplying everything variant-specific to the generation systems.
///
/// The attribute state machine and the section accumulator are written once
/// against this trait; the catalog provides one implementation per variant.
pub trait TunnelVariant {
    /// Identifier of the variant.
    fn kind(&self) -> VariantKind;

    /// Attributes tracked by the variant, in roll order.
    fn attributes(&self) -> &[AttributeSpec];

    /// Weight of the special-feature target in the change draw.
    fn special_change_weight(&self) -> u32;

    /// Formulas used to roll section lengths.
    fn length_table(&self) -> &WeightedTable<DiceFormula>;

    /// Rolls the variant's special-feature table. `None` means "no feature".
    fn roll_special_feature(&self, rng: &mut dyn RngCore) -> Option<SpecialFeature>;

    /// Non-fatal conditions noticed while building the profile.
    fn diagnostics(&self) -> &[Diagnostic] {
        &[]
    }
}
