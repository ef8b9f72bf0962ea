//! Dry tunnel profile: sized passages, slopes and floor descriptors.

use rand::{Rng, RngCore};
use tracing::warn;
use tunnelgen_core::{
    roll_dice, AttributeKey, AttributeSource, AttributeSpec, AttributeValue, DiceFormula,
    Diagnostic, Incline, Passage, SlopeCategory, SpecialFeature, TableError, TunnelVariant,
    VariantKind, WeightedOption, WeightedTable,
};

use crate::shared::{
    air_spec, descriptor_spec, direction_spec, illumination_spec, label_table, length_table,
};

/// Label, height, width and weight of every dry passage size.
const SIZES: [(&str, u32, u32, u32); 9] = [
    ("Tiny", 1, 1, 5),
    ("Tight", 2, 2, 5),
    ("Crawl", 3, 3, 10),
    ("Wide Crawl", 3, 5, 10),
    ("Very Narrow", 5, 3, 15),
    ("Narrow", 5, 5, 20),
    ("Normal", 10, 10, 25),
    ("Wide", 15, 15, 5),
    ("Very Wide", 20, 60, 5),
];

const SLOPES: [(SlopeCategory, u32); 7] = [
    (SlopeCategory::new("Steep Up", 51, 70, Incline::Up), 5),
    (SlopeCategory::new("Moderate Up", 31, 50, Incline::Up), 10),
    (SlopeCategory::new("Gentle Up", 15, 30, Incline::Up), 20),
    (SlopeCategory::new("Level", -14, 14, Incline::Level), 30),
    (SlopeCategory::new("Gentle Down", 15, 30, Incline::Down), 20),
    (SlopeCategory::new("Moderate Down", 31, 50, Incline::Down), 10),
    (SlopeCategory::new("Steep Down", 51, 70, Incline::Down), 5),
];

const TEXTURES: [(&str, u32); 7] = [
    ("Slick and polished", 10),
    ("Smooth", 15),
    ("Normal", 30),
    ("Rough", 15),
    ("Tiered", 10),
    ("Covered in large boulders", 10),
    ("Covered in sharp rocks", 5),
];

const CONDITIONS: [(&str, u32); 5] = [
    ("Water-filled (up to 1' deep)", 5),
    ("Slippery (wet and slimy)", 25),
    ("Slick (damp or wet)", 45),
    ("Dry, good looking", 20),
    ("Dusty (dead tunnel check for cave-in chances)", 5),
];

const GEOTHERMAL: [(&str, u32); 5] = [
    ("Hot or boiling pool of water", 40),
    ("Poisonous/noxious gas vent", 10),
    ("Steam Vent", 15),
    ("Hot air", 25),
    ("Lava pool", 5),
];

const HABITATION: [(&str, u32); 15] = [
    ("Cairn marking territory", 5),
    ("Ruined building", 1),
    ("Old campsite", 5),
    ("Small abandoned shrine", 1),
    ("Dead bodies", 2),
    ("Shallow grave", 2),
    ("Burial mound", 2),
    ("Secret stash", 2),
    ("Broken tools, weapons, or armor", 13),
    ("Intact tools, weapons, or armor", 2),
    ("Battlefield", 3),
    ("Worked stone surfaces", 20),
    ("Abandoned adventurers gear", 7),
    ("Intact bridge", 18),
    ("Ruined bridge", 10),
];

const SIZE_CHANGE_WEIGHT: u32 = 20;
const SLOPE_CHANGE_WEIGHT: u32 = 15;
const DIRECTION_CHANGE_WEIGHT: u32 = 20;
const TEXTURE_CHANGE_WEIGHT: u32 = 20;
const CONDITION_CHANGE_WEIGHT: u32 = 10;
const AIR_CHANGE_WEIGHT: u32 = 5;
const ILLUMINATION_CHANGE_WEIGHT: u32 = 5;
const SPECIAL_CHANGE_WEIGHT: u32 = 5;

/// Top-level entries of the dry special-feature table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DrySpecial {
    Nothing,
    Plain(&'static str),
    SideRoom,
    SideTunnel,
    Pit,
    Chasm,
    Cliff,
    Geothermal,
    Blockage,
    Habitation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Blockage {
    Plain(&'static str),
    WaterWay,
}

#[derive(Clone, Debug)]
struct DrySpecials {
    features: WeightedTable<DrySpecial>,
    geothermal: WeightedTable<&'static str>,
    blockages: WeightedTable<Blockage>,
    habitation: WeightedTable<&'static str>,
}

impl DrySpecials {
    fn new() -> Result<Self, TableError> {
        let features = WeightedTable::new(
            "dry special feature",
            vec![
                WeightedOption::new("None", 30, DrySpecial::Nothing),
                WeightedOption::new(
                    "Side ledges or tiers",
                    5,
                    DrySpecial::Plain("Side ledges or tiers"),
                ),
                WeightedOption::new("Minor side rooms", 7, DrySpecial::SideRoom),
                WeightedOption::new(
                    "Stairs",
                    3,
                    DrySpecial::Plain("Stairs (natural or man-made)"),
                ),
                WeightedOption::new("Side tunnels", 7, DrySpecial::SideTunnel),
                WeightedOption::new("Pits", 5, DrySpecial::Pit),
                WeightedOption::new("Chasms", 6, DrySpecial::Chasm),
                WeightedOption::new("Cliffs", 3, DrySpecial::Cliff),
                WeightedOption::new("Geothermal activity", 5, DrySpecial::Geothermal),
                WeightedOption::new("Blockages", 9, DrySpecial::Blockage),
                WeightedOption::new("Habitation signs", 10, DrySpecial::Habitation),
                WeightedOption::new(
                    "Minor mineral vein",
                    3,
                    DrySpecial::Plain("Minor mineral vein"),
                ),
                WeightedOption::new("DM's choice", 2, DrySpecial::Plain("DM's choice!")),
            ],
        )?;

        let blockages = WeightedTable::new(
            "dry blockage",
            vec![
                WeightedOption::new(
                    "Large boulder field",
                    15,
                    Blockage::Plain("Large boulder field"),
                ),
                WeightedOption::new("Minor cave-in", 15, Blockage::Plain("Minor cave-in")),
                WeightedOption::new("Water pool", 15, Blockage::Plain("Water pool")),
                WeightedOption::new("Quicksand", 5, Blockage::Plain("Quicksand")),
                WeightedOption::new("Oil pool", 5, Blockage::Plain("Oil pool")),
                WeightedOption::new("Tar pit", 5, Blockage::Plain("Tar pit")),
                WeightedOption::new(
                    "Large stalactites",
                    25,
                    Blockage::Plain("Large stalactites, stalagmites, or columns"),
                ),
                WeightedOption::new("Balconies", 5, Blockage::Plain("Balconies")),
                WeightedOption::new("Water way", 5, Blockage::WaterWay),
                WeightedOption::new("DM's choice", 5, Blockage::Plain("DM's choice!")),
            ],
        )?;

        Ok(Self {
            features,
            geothermal: label_table("dry geothermal", &GEOTHERMAL)?,
            blockages,
            habitation: label_table("dry habitation", &HABITATION)?,
        })
    }

    fn roll(&self, rng: &mut dyn RngCore) -> Option<SpecialFeature> {
        let description = match *self.features.sample(rng) {
            DrySpecial::Nothing => return None,
            DrySpecial::Plain(label) => label.to_owned(),
            DrySpecial::SideRoom => {
                let width = rng.gen_range(3..=60);
                let length = roll_dice(rng, 10, 20) * 10;
                format!("Minor side room ({width}' wide x {length}' long)")
            }
            DrySpecial::SideTunnel => {
                let miles = rng.gen_range(1..=6);
                let stream = if rng.gen_range(1..=100) <= 20 {
                    " (small underground stream)"
                } else {
                    ""
                };
                format!("Side tunnel (dead-ends in {miles} miles, 5'x5' or less){stream}")
            }
            DrySpecial::Pit => format!("Pit ({}' deep)", roll_dice(rng, 3, 6)),
            DrySpecial::Chasm => {
                let depth = rng.gen_range(20..=200);
                let width = rng.gen_range(4..=40);
                format!("Chasm ({depth}' deep x {width}' wide)")
            }
            DrySpecial::Cliff => format!("Cliff ({}' high)", rng.gen_range(10..=100)),
            DrySpecial::Geothermal => format!("Geothermal: {}", self.geothermal.sample(rng)),
            DrySpecial::Blockage => match *self.blockages.sample(rng) {
                Blockage::Plain(label) => format!("Blockage: {label}"),
                Blockage::WaterWay => {
                    let width = rng.gen_range(5..=30);
                    let depth = rng.gen_range(3..=15);
                    format!("Blockage: Water way ({width}' wide x {depth}' deep)")
                }
            },
            DrySpecial::Habitation => format!("Habitation: {}", self.habitation.sample(rng)),
        };
        Some(SpecialFeature::new(description))
    }
}

/// Dry tunnel profile.
#[derive(Clone, Debug)]
pub struct DryTunnel {
    attributes: Vec<AttributeSpec>,
    lengths: WeightedTable<DiceFormula>,
    specials: DrySpecials,
    diagnostics: Vec<Diagnostic>,
}

impl DryTunnel {
    /// Builds the profile, keeping only sizes at least `min_height` tall and
    /// `min_width` wide.
    ///
    /// When no size satisfies both minimums the unfiltered size table is used
    /// and a [`Diagnostic::SizeFilterFallback`] is recorded.
    pub fn new(min_height: u32, min_width: u32) -> Result<Self, TableError> {
        let mut diagnostics = Vec::new();
        let sizes = size_table(min_height, min_width, &mut diagnostics)?;
        let slopes = WeightedTable::new(
            "slope",
            SLOPES
                .iter()
                .map(|&(category, weight)| WeightedOption::new(category.name(), weight, category))
                .collect(),
        )?;

        let attributes = vec![
            AttributeSpec::new(
                AttributeKey::Size,
                SIZE_CHANGE_WEIGHT,
                AttributeSource::Table(sizes),
            ),
            AttributeSpec::new(
                AttributeKey::Slope,
                SLOPE_CHANGE_WEIGHT,
                AttributeSource::Slope(slopes),
            ),
            direction_spec(DIRECTION_CHANGE_WEIGHT)?,
            descriptor_spec(AttributeKey::Texture, TEXTURE_CHANGE_WEIGHT, &TEXTURES)?,
            descriptor_spec(AttributeKey::Condition, CONDITION_CHANGE_WEIGHT, &CONDITIONS)?,
            air_spec(AIR_CHANGE_WEIGHT)?,
            illumination_spec(ILLUMINATION_CHANGE_WEIGHT)?,
        ];

        Ok(Self {
            attributes,
            lengths: length_table()?,
            specials: DrySpecials::new()?,
            diagnostics,
        })
    }
}

fn size_table(
    min_height: u32,
    min_width: u32,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<WeightedTable<AttributeValue>, TableError> {
    let all = WeightedTable::new(
        "dry size",
        SIZES
            .iter()
            .map(|&(label, height, width, weight)| {
                WeightedOption::new(
                    label,
                    weight,
                    AttributeValue::Passage(Passage::sized(label, height, width)),
                )
            })
            .collect(),
    )?;

    let fits = |value: &AttributeValue| {
        value.as_passage().is_some_and(|passage| {
            passage.height_ft().unwrap_or(0) >= min_height && passage.width_ft() >= min_width
        })
    };
    if let Some(filtered) = all.filtered(fits) {
        return Ok(filtered);
    }

    let diagnostic = Diagnostic::SizeFilterFallback {
        min_height,
        min_width,
    };
    warn!(min_height, min_width, "{diagnostic}");
    diagnostics.push(diagnostic);
    Ok(all)
}

impl TunnelVariant for DryTunnel {
    fn kind(&self) -> VariantKind {
        VariantKind::Dry
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
        self.specials.roll(rng)
    }

    fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn special_table_skips_none_roughly_thirty_percent() {
        let specials = DrySpecials::new().expect("static tables");
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let draws = 20_000;
        let empty = (0..draws)
            .filter(|_| specials.roll(&mut rng).is_none())
            .count();
        let share = empty as f64 / f64::from(draws);
        assert!((0.27..0.33).contains(&share), "empty share was {share}");
    }

    #[test]
    fn dry_features_never_change_elevation() {
        let specials = DrySpecials::new().expect("static tables");
        let mut rng = ChaCha8Rng::seed_from_u64(29);
        for _ in 0..5_000 {
            if let Some(feature) = specials.roll(&mut rng) {
                assert_eq!(feature.elevation_ft(), 0, "{feature}");
                assert_ne!(feature.description(), "None");
            }
        }
    }
}
