//! Tables used by more than one variant.

use tunnelgen_core::{
    AttributeKey, AttributeSource, AttributeSpec, AttributeValue, DiceFormula, TableError,
    WeightedOption, WeightedTable,
};

const LENGTHS: [(&str, u32, DiceFormula); 5] = [
    ("Short", 10, DiceFormula::new(5, 8)),
    ("Medium", 20, DiceFormula::new(10, 6).plus(30)),
    ("Long", 25, DiceFormula::new(10, 4).times(10)),
    ("Very long", 35, DiceFormula::new(10, 6).times(10).plus(400)),
    ("Extended", 10, DiceFormula::new(10, 4).times(50)),
];

const DIRECTIONS: [(&str, u32); 6] = [
    ("Curving right", 15),
    ("Curving left", 15),
    ("Sharp right", 5),
    ("Sharp left", 5),
    ("Straight", 40),
    ("Twisting and snaking", 20),
];

const ILLUMINATION: [(&str, u32); 5] = [
    ("None", 50),
    ("Very weak (moonless)", 20),
    ("Weak light (moonlight with overcast clouds)", 15),
    ("Moderate light (moonlight with no clouds)", 10),
    ("Bright light (twilight)", 5),
];

const AIR: [(&str, u32); 8] = [
    ("Poison/noxious gas", 5),
    ("Stale", 5),
    ("Faint circulation", 20),
    ("Normal", 35),
    ("Drafty (1% chance of torch blowout a round)", 15),
    ("Windy (10% chance of torch blowout per round)", 10),
    ("Rushing air (50% chance of torch blowout per round)", 5),
    ("Steam vapors", 5),
];

/// Section length formulas shared by every variant.
pub(crate) fn length_table() -> Result<WeightedTable<DiceFormula>, TableError> {
    WeightedTable::new(
        "section length",
        LENGTHS
            .iter()
            .map(|&(name, weight, formula)| WeightedOption::new(name, weight, formula))
            .collect(),
    )
}

/// Builds a table of plain labels, each weighted as listed.
pub(crate) fn label_table(
    name: &'static str,
    entries: &[(&'static str, u32)],
) -> Result<WeightedTable<&'static str>, TableError> {
    WeightedTable::new(
        name,
        entries
            .iter()
            .map(|&(label, weight)| WeightedOption::new(label, weight, label))
            .collect(),
    )
}

/// Builds an independently re-rolled descriptor attribute.
pub(crate) fn descriptor_spec(
    key: AttributeKey,
    change_weight: u32,
    entries: &[(&'static str, u32)],
) -> Result<AttributeSpec, TableError> {
    let table = WeightedTable::new(
        key.label(),
        entries
            .iter()
            .map(|&(label, weight)| {
                WeightedOption::new(label, weight, AttributeValue::Descriptor(label))
            })
            .collect(),
    )?;
    Ok(AttributeSpec::new(
        key,
        change_weight,
        AttributeSource::Table(table),
    ))
}

pub(crate) fn direction_spec(change_weight: u32) -> Result<AttributeSpec, TableError> {
    descriptor_spec(AttributeKey::Direction, change_weight, &DIRECTIONS)
}

pub(crate) fn illumination_spec(change_weight: u32) -> Result<AttributeSpec, TableError> {
    descriptor_spec(AttributeKey::Illumination, change_weight, &ILLUMINATION)
}

pub(crate) fn air_spec(change_weight: u32) -> Result<AttributeSpec, TableError> {
    descriptor_spec(AttributeKey::Air, change_weight, &AIR)
}
