//! Wet tunnel profile: water-carved passages tracked by width, depth and flow.

use rand::RngCore;
use tunnelgen_core::{
    AttributeKey, AttributeSource, AttributeSpec, AttributeValue, Depth, DiceFormula, Flow,
    PercentileBand, SpecialFeature, TableError, TunnelVariant, VariantKind, WeightedOption,
    WeightedTable,
};

use crate::shared::{air_spec, descriptor_spec, direction_spec, illumination_spec, length_table};

const WIDTHS: [(&str, u32, u32); 7] = [
    ("5'", 5, 10),
    ("10'", 10, 20),
    ("15'", 15, 20),
    ("20'", 20, 20),
    ("30'", 30, 15),
    ("40'", 40, 10),
    ("60'", 60, 5),
];

const WATER_DEPTHS: [(Depth, u32); 6] = [
    (Depth::new("Trickle", 0), 5),
    (Depth::new("Ankle-deep", 1), 20),
    (Depth::new("Knee-deep", 2), 25),
    (Depth::new("Waist-deep", 3), 25),
    (Depth::new("Chest-deep", 4), 15),
    (Depth::new("Over head", 6), 10),
];

const CEILINGS: [(Depth, u32); 6] = [
    (Depth::new("Flooded to the roof", 0), 5),
    (Depth::new("Very low", 2), 10),
    (Depth::new("Low", 4), 20),
    (Depth::new("Normal", 8), 40),
    (Depth::new("High", 15), 20),
    (Depth::new("Vaulted", 30), 5),
];

const FLOWS: [(Flow, u32); 5] = [
    (Flow::new("Still", 0), 15),
    (Flow::new("Sluggish", 5), 25),
    (Flow::new("Steady", 15), 30),
    (Flow::new("Swift", 30), 20),
    (Flow::new("Torrential", 60), 10),
];

const TEMPERATURES: [(&str, u32); 6] = [
    ("Near freezing", 10),
    ("Cold", 35),
    ("Cool", 30),
    ("Tepid", 15),
    ("Warm", 8),
    ("Hot", 2),
];

const SIZE_CHANGE_WEIGHT: u32 = 20;
const WATER_DEPTH_CHANGE_WEIGHT: u32 = 15;
const CEILING_CHANGE_WEIGHT: u32 = 10;
const FLOW_CHANGE_WEIGHT: u32 = 15;
const DIRECTION_CHANGE_WEIGHT: u32 = 15;
const TEMPERATURE_CHANGE_WEIGHT: u32 = 5;
const AIR_CHANGE_WEIGHT: u32 = 5;
const ILLUMINATION_CHANGE_WEIGHT: u32 = 5;
const SPECIAL_CHANGE_WEIGHT: u32 = 10;

const RAPIDS_DROP: DiceFormula = DiceFormula::new(2, 6);
const WATERFALL_DROP: DiceFormula = DiceFormula::new(3, 10);
const SUMP_LENGTH: DiceFormula = DiceFormula::new(1, 10).times(10);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WetSpecial {
    Nothing,
    Plain(&'static str),
    Rapids,
    Waterfall,
    Sump,
}

/// Wet tunnel profile.
#[derive(Clone, Debug)]
pub struct WetTunnel {
    attributes: Vec<AttributeSpec>,
    lengths: WeightedTable<DiceFormula>,
    specials: WeightedTable<WetSpecial>,
}

impl WetTunnel {
    /// Builds the profile.
    pub fn new() -> Result<Self, TableError> {
        let widths = WeightedTable::new(
            "wet width",
            WIDTHS
                .iter()
                .map(|&(name, width, weight)| WeightedOption::new(name, weight, width))
                .collect(),
        )?;

        let attributes = vec![
            AttributeSpec::new(
                AttributeKey::Size,
                SIZE_CHANGE_WEIGHT,
                AttributeSource::Width(widths),
            ),
            AttributeSpec::new(
                AttributeKey::WaterDepth,
                WATER_DEPTH_CHANGE_WEIGHT,
                AttributeSource::Table(depth_table("water depth", &WATER_DEPTHS)?),
            ),
            AttributeSpec::new(
                AttributeKey::Ceiling,
                CEILING_CHANGE_WEIGHT,
                AttributeSource::Table(depth_table("ceiling", &CEILINGS)?),
            ),
            AttributeSpec::new(
                AttributeKey::Flow,
                FLOW_CHANGE_WEIGHT,
                AttributeSource::Table(flow_table()?),
            ),
            direction_spec(DIRECTION_CHANGE_WEIGHT)?,
            descriptor_spec(
                AttributeKey::Temperature,
                TEMPERATURE_CHANGE_WEIGHT,
                &TEMPERATURES,
            )?,
            air_spec(AIR_CHANGE_WEIGHT)?,
            illumination_spec(ILLUMINATION_CHANGE_WEIGHT)?,
        ];

        Ok(Self {
            attributes,
            lengths: length_table()?,
            specials: special_table()?,
        })
    }
}

fn depth_table(
    name: &'static str,
    entries: &[(Depth, u32)],
) -> Result<WeightedTable<AttributeValue>, TableError> {
    WeightedTable::new(
        name,
        entries
            .iter()
            .map(|&(depth, weight)| {
                WeightedOption::new(depth.label(), weight, AttributeValue::Depth(depth))
            })
            .collect(),
    )
}

fn flow_table() -> Result<WeightedTable<AttributeValue>, TableError> {
    WeightedTable::new(
        "flow",
        FLOWS
            .iter()
            .map(|&(flow, weight)| {
                WeightedOption::new(flow.label(), weight, AttributeValue::Flow(flow))
            })
            .collect(),
    )
}

/// Percentile table; the two "no feature" bands are deliberate gaps.
fn special_table() -> Result<WeightedTable<WetSpecial>, TableError> {
    use WetSpecial::{Nothing, Plain, Rapids, Sump, Waterfall};

    WeightedTable::from_percentile_bands(
        "wet special feature",
        vec![
            PercentileBand::new(1, 12, "Rapids", Rapids),
            PercentileBand::new(13, 18, "Waterfall", Waterfall),
            PercentileBand::new(19, 28, "Whirlpool", Plain("Whirlpool")),
            PercentileBand::new(29, 38, "Submerged rocks", Plain("Submerged rocks")),
            PercentileBand::new(39, 46, "Gravel bar", Plain("Gravel bar")),
            PercentileBand::new(47, 52, "Sump", Sump),
            PercentileBand::new(53, 58, "Side channel", Plain("Side channel")),
            PercentileBand::new(
                59,
                62,
                "Flooded side chamber",
                Plain("Flooded side chamber"),
            ),
            PercentileBand::new(63, 66, "Debris jam", Plain("Debris jam")),
            PercentileBand::new(67, 68, "None", Nothing),
            PercentileBand::new(69, 74, "Blind cave fish", Plain("Blind cave fish")),
            PercentileBand::new(75, 78, "Mineral seep", Plain("Mineral seep")),
            PercentileBand::new(79, 83, "None", Nothing),
            PercentileBand::new(84, 90, "Air pocket dome", Plain("Air pocket dome")),
            PercentileBand::new(
                91,
                95,
                "Ledge above waterline",
                Plain("Ledge above the waterline"),
            ),
            PercentileBand::new(96, 98, "Hot spring inflow", Plain("Hot spring inflow")),
            PercentileBand::new(99, 100, "DM's choice", Plain("DM's choice!")),
        ],
    )
}

fn drop_feature(label: &str, drop_ft: u32) -> SpecialFeature {
    let elevation = i32::try_from(drop_ft).map_or(i32::MIN, |drop| -drop);
    SpecialFeature::with_elevation(format!("{label} ({drop_ft}' drop)"), elevation)
}

impl TunnelVariant for WetTunnel {
    fn kind(&self) -> VariantKind {
        VariantKind::Wet
    }

    fn attributes(&self) -> &[AttributeSpec] {
        &self.attributes
    }

    fn special_change_weight(&self) -> u32 {
        SPECIAL_CHANGE_WEIGHT
    }

    fn length_table(&self) -> &WeightedTable<DiceFormula> {
        &self.lengths
    }

    fn roll_special_feature(&self, rng: &mut dyn RngCore) -> Option<SpecialFeature> {
        match *self.specials.sample(rng) {
            WetSpecial::Nothing => None,
            WetSpecial::Plain(label) => Some(SpecialFeature::new(label)),
            WetSpecial::Rapids => Some(drop_feature("Rapids", RAPIDS_DROP.roll(rng))),
            WetSpecial::Waterfall => Some(drop_feature("Waterfall", WATERFALL_DROP.roll(rng))),
            WetSpecial::Sump => Some(SpecialFeature::new(format!(
                "Sump (flooded for {}', swim or find a bypass)",
                SUMP_LENGTH.roll(rng)
            ))),
        }
    }
}
