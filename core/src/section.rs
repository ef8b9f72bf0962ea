//! Finished sections and the run that collects them.

use std::fmt;

use serde::Serialize;

use crate::{TunnelState, VariantKind};

/// Optional embellishment rolled for a single section.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SpecialFeature {
    description: String,
    elevation_ft: i32,
}

impl SpecialFeature {
    /// Feature without any vertical drop.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self::with_elevation(description, 0)
    }

    /// Feature that moves the tunnel floor by `elevation_ft` on its own.
    #[must_use]
    pub fn with_elevation(description: impl Into<String>, elevation_ft: i32) -> Self {
        Self {
            description: description.into(),
            elevation_ft,
        }
    }

    /// Text shown in reports.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Elevation contribution added to the section regardless of its length.
    #[must_use]
    pub const fn elevation_ft(&self) -> i32 {
        self.elevation_ft
    }
}

impl fmt::Display for SpecialFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// Contiguous stretch of tunnel with uniform attributes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Section {
    length_ft: u32,
    attributes: TunnelState,
    elevation_ft: f64,
    special: Option<SpecialFeature>,
}

impl Section {
    /// Creates a section owning its attribute snapshot.
    #[must_use]
    pub fn new(
        length_ft: u32,
        attributes: TunnelState,
        elevation_ft: f64,
        special: Option<SpecialFeature>,
    ) -> Self {
        Self {
            length_ft,
            attributes,
            elevation_ft,
            special,
        }
    }

    /// Length in feet.
    #[must_use]
    pub const fn length_ft(&self) -> u32 {
        self.length_ft
    }

    /// Attribute snapshot taken when the section was created.
    #[must_use]
    pub const fn attributes(&self) -> &TunnelState {
        &self.attributes
    }

    /// Net elevation change across the section in feet.
    #[must_use]
    pub const fn elevation_ft(&self) -> f64 {
        self.elevation_ft
    }

    /// Special feature rolled for the section, if any.
    #[must_use]
    pub const fn special(&self) -> Option<&SpecialFeature> {
        self.special.as_ref()
    }

    /// Reports whether `attributes` and `special` describe this same stretch.
    ///
    /// Two absent features compare equal; differing feature text never does.
    #[must_use]
    pub fn matches(&self, attributes: &TunnelState, special: Option<&SpecialFeature>) -> bool {
        self.special.as_ref() == special && &self.attributes == attributes
    }

    /// Folds additional length and elevation into the section.
    pub fn extend(&mut self, length_ft: u32, elevation_ft: f64) {
        self.length_ft += length_ft;
        self.elevation_ft += elevation_ft;
    }
}

/// Non-fatal conditions noticed while preparing a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Diagnostic {
    /// The minimum height/width filter removed every size, so the full size
    /// table was used instead.
    SizeFilterFallback {
        /// Requested minimum passage height in feet.
        min_height: u32,
        /// Requested minimum passage width in feet.
        min_width: u32,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeFilterFallback {
                min_height,
                min_width,
            } => write!(
                f,
                "no size options match min_height={min_height} and min_width={min_width}; \
                 reverting to the default list"
            ),
        }
    }
}

/// Ordered, merged sections of one generated tunnel.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TunnelRun {
    variant: VariantKind,
    requested_length_ft: u32,
    sections: Vec<Section>,
    elevation_change_ft: f64,
    diagnostics: Vec<Diagnostic>,
}

impl TunnelRun {
    /// Assembles a finished run.
    #[must_use]
    pub fn new(
        variant: VariantKind,
        requested_length_ft: u32,
        sections: Vec<Section>,
        elevation_change_ft: f64,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            variant,
            requested_length_ft,
            sections,
            elevation_change_ft,
            diagnostics,
        }
    }

    /// Variant the run was generated with.
    #[must_use]
    pub const fn variant(&self) -> VariantKind {
        self.variant
    }

    /// Target length in whole feet.
    #[must_use]
    pub const fn requested_length_ft(&self) -> u32 {
        self.requested_length_ft
    }

    /// Sections in travel order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Sum of every section length.
    #[must_use]
    pub fn total_length_ft(&self) -> u64 {
        self.sections
            .iter()
            .map(|section| u64::from(section.length_ft()))
            .sum()
    }

    /// Cumulative elevation change across the whole run.
    #[must_use]
    pub const fn elevation_change_ft(&self) -> f64 {
        self.elevation_change_ft
    }

    /// Non-fatal conditions recorded while preparing the run.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
