#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Attribute state machine evolving a tunnel's attributes section to section.

use rand::Rng;
use tracing::trace;
use tunnelgen_core::{
    roll_dice, AttributeSpec, AttributeValue, Passage, SpecialFeature, TableError, TunnelState,
    TunnelVariant, WeightedOption, WeightedTable,
};

/// Relative likelihood of each number of attribute changes between sections.
const CHANGE_COUNTS: [(&str, u32, u32); 6] = [
    ("0", 0, 25),
    ("1", 1, 25),
    ("2", 2, 15),
    ("3", 3, 15),
    ("4", 4, 10),
    ("5", 5, 5),
];

/// Narrowest width a passage can step down to.
pub const MIN_STEPPED_WIDTH_FT: u32 = 5;

/// Applies one width-mutation die roll to `current`.
///
/// A 1 narrows the passage by 10 feet (by 5 feet once it is 10 feet or
/// narrower, never below [`MIN_STEPPED_WIDTH_FT`]), a 6 widens it by 10 feet,
/// and anything else leaves it unchanged.
#[must_use]
pub fn step_width(current: u32, die: u32) -> u32 {
    match die {
        1 if current <= 10 => current.saturating_sub(5).max(MIN_STEPPED_WIDTH_FT),
        1 => current.saturating_sub(10).max(MIN_STEPPED_WIDTH_FT),
        6 => current + 10,
        _ => current,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ChangeTarget {
    Attribute(usize),
    Special,
}

/// Current attribute values of a tunnel and the rules that change them.
pub struct AttributeState<'a> {
    variant: &'a dyn TunnelVariant,
    change_counts: WeightedTable<u32>,
    targets: WeightedTable<ChangeTarget>,
    state: TunnelState,
}

impl<'a> AttributeState<'a> {
    /// Rolls every attribute of `variant` from scratch.
    pub fn new<R: Rng>(variant: &'a dyn TunnelVariant, rng: &mut R) -> Result<Self, TableError> {
        let change_counts = WeightedTable::new(
            "change count",
            CHANGE_COUNTS
                .iter()
                .map(|&(name, count, weight)| WeightedOption::new(name, weight, count))
                .collect(),
        )?;

        let mut targets: Vec<_> = variant
            .attributes()
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                WeightedOption::new(
                    spec.key().label(),
                    spec.change_weight(),
                    ChangeTarget::Attribute(index),
                )
            })
            .collect();
        targets.push(WeightedOption::new(
            "Special",
            variant.special_change_weight(),
            ChangeTarget::Special,
        ));
        let targets = WeightedTable::new("change target", targets)?;

        let mut state = TunnelState::new();
        for spec in variant.attributes() {
            let _ = state.set(spec.key(), spec.generate(rng));
        }

        Ok(Self {
            variant,
            change_counts,
            targets,
            state,
        })
    }

    /// Attribute values describing the current section.
    #[must_use]
    pub const fn state(&self) -> &TunnelState {
        &self.state
    }

    /// Mutates the state for the next section and returns its special feature.
    ///
    /// Change targets are drawn with replacement, so the same attribute may be
    /// re-rolled twice. Each special draw replaces the previous one.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> Option<SpecialFeature> {
        let changes = *self.change_counts.sample(rng);
        let mut special = None;

        for _ in 0..changes {
            match *self.targets.sample(rng) {
                ChangeTarget::Special => {
                    special = self.variant.roll_special_feature(rng);
                    trace!(?special, "special feature rolled");
                }
                ChangeTarget::Attribute(index) => {
                    let spec = &self.variant.attributes()[index];
                    let next = match self.state.get(spec.key()) {
                        Some(current) => mutate(spec, current, rng),
                        None => spec.generate(rng),
                    };
                    trace!(
                        attribute = spec.key().label(),
                        value = next.label(),
                        "attribute changed"
                    );
                    let _ = self.state.set(spec.key(), next);
                }
            }
        }

        special
    }
}

/// Changes `current` through the attribute's mutator, or re-rolls it when the
/// attribute has none.
fn mutate<R: Rng>(spec: &AttributeSpec, current: &AttributeValue, rng: &mut R) -> AttributeValue {
    match current.as_passage() {
        Some(passage) if spec.source().has_mutator() => {
            let die = roll_dice(rng, 1, 6);
            AttributeValue::Passage(Passage::for_width(step_width(passage.width_ft(), die)))
        }
        _ => spec.generate(rng),
    }
}
