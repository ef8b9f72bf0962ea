#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Section accumulator that sizes sections, tracks elevation and merges
//! unchanged stretches.

use rand::Rng;
use tracing::{debug, trace};
use tunnelgen_core::{
    DiceFormula, Diagnostic, Section, SpecialFeature, TunnelRun, TunnelState, VariantKind,
    WeightedTable,
};

/// Elevation change across `length_ft` of tunnel described by `state`.
///
/// Slopes contribute `length * sin(angle)`, flows subtract their per-mile drop
/// scaled to the length, and a special feature adds its own fixed drop.
#[must_use]
pub fn elevation_delta(
    state: &TunnelState,
    length_ft: u32,
    special: Option<&SpecialFeature>,
) -> f64 {
    let slope = state
        .slope()
        .map_or(0.0, |slope| slope.elevation_delta(length_ft));
    let flow = state
        .flow()
        .map_or(0.0, |flow| flow.elevation_delta(length_ft));
    let feature = special.map_or(0.0, |feature| f64::from(feature.elevation_ft()));
    slope + flow + feature
}

/// Outcome of recording a section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// The section differed from the previous one and was stored separately.
    Appended,
    /// The section matched the previous one and was folded into it.
    Merged,
}

/// Collects sections until the requested length is covered.
#[derive(Clone, Debug)]
pub struct SectionAccumulator {
    requested_length_ft: u32,
    covered_ft: u32,
    sections: Vec<Section>,
    elevation_change_ft: f64,
}

impl SectionAccumulator {
    /// Starts an empty run aiming for `requested_length_ft`.
    #[must_use]
    pub fn new(requested_length_ft: u32) -> Self {
        Self {
            requested_length_ft,
            covered_ft: 0,
            sections: Vec::new(),
            elevation_change_ft: 0.0,
        }
    }

    /// Reports whether the requested length has been covered.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.covered_ft >= self.requested_length_ft
    }

    /// Feet still to be generated.
    #[must_use]
    pub const fn remaining_ft(&self) -> u32 {
        self.requested_length_ft.saturating_sub(self.covered_ft)
    }

    /// Feet generated so far.
    #[must_use]
    pub const fn covered_ft(&self) -> u32 {
        self.covered_ft
    }

    /// Sections recorded so far.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Rolls the next section length and clamps it to the remaining distance.
    ///
    /// Never returns zero while the run is incomplete.
    pub fn roll_length<R: Rng + ?Sized>(
        &self,
        lengths: &WeightedTable<DiceFormula>,
        rng: &mut R,
    ) -> u32 {
        let formula = lengths.sample(rng);
        let rolled = formula.roll(rng);
        trace!(%formula, rolled, "section length rolled");
        rolled.clamp(1, self.remaining_ft().max(1))
    }

    /// Records a section, merging it into the previous one when the attribute
    /// snapshot and special feature are unchanged.
    pub fn push(
        &mut self,
        length_ft: u32,
        state: &TunnelState,
        special: Option<SpecialFeature>,
    ) -> Placement {
        let elevation = elevation_delta(state, length_ft, special.as_ref());
        self.covered_ft = self.covered_ft.saturating_add(length_ft);
        self.elevation_change_ft += elevation;

        if let Some(last) = self.sections.last_mut() {
            if last.matches(state, special.as_ref()) {
                last.extend(length_ft, elevation);
                debug!(
                    index = self.sections.len(),
                    length_ft, elevation, "section merged into previous"
                );
                return Placement::Merged;
            }
        }

        self.sections
            .push(Section::new(length_ft, state.clone(), elevation, special));
        debug!(
            index = self.sections.len(),
            length_ft, elevation, "section appended"
        );
        Placement::Appended
    }

    /// Seals the accumulated sections into a run.
    #[must_use]
    pub fn finish(self, variant: VariantKind, diagnostics: Vec<Diagnostic>) -> TunnelRun {
        TunnelRun::new(
            variant,
            self.requested_length_ft,
            self.sections,
            self.elevation_change_ft,
            diagnostics,
        )
    }
}
