//! Attribute keys, tagged attribute values and the specs that roll them.

use std::collections::BTreeMap;

use rand::Rng;
use serde::Serialize;

use crate::{WeightedTable, FEET_PER_MILE};

/// Widest passage still described as "Narrow" by width-tracked variants.
pub const NARROW_WIDTH_LIMIT_FT: u32 = 20;

/// Identifies one tracked property of the tunnel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKey {
    /// Passage cross-section.
    Size,
    /// Vertical angle of the floor.
    Slope,
    /// Horizontal heading changes.
    Direction,
    /// Floor texture.
    Texture,
    /// Floor condition.
    Condition,
    /// Depth of standing or flowing water.
    WaterDepth,
    /// Clearance between the water surface and the roof.
    Ceiling,
    /// Current strength and the drop it implies.
    Flow,
    /// Water and air temperature.
    Temperature,
    /// Ambient light.
    Illumination,
    /// Air supply quality.
    Air,
}

impl AttributeKey {
    /// Short label used by reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Size => "Size",
            Self::Slope => "Slope",
            Self::Direction => "Direction",
            Self::Texture => "Texture",
            Self::Condition => "Condition",
            Self::WaterDepth => "Water",
            Self::Ceiling => "Ceiling",
            Self::Flow => "Flow",
            Self::Temperature => "Temperature",
            Self::Illumination => "Light",
            Self::Air => "Air",
        }
    }
}

/// Direction of travel along the vertical axis for a slope category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Incline {
    /// Floor rises along the direction of travel.
    Up,
    /// Floor is roughly flat; the rolled degree keeps its own sign.
    Level,
    /// Floor falls along the direction of travel.
    Down,
}

impl Incline {
    /// Multiplier applied to the rolled degree before computing elevation.
    #[must_use]
    pub const fn angle_sign(self) -> f64 {
        match self {
            Self::Up | Self::Level => 1.0,
            Self::Down => -1.0,
        }
    }
}

/// Slope category with its degree range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SlopeCategory {
    name: &'static str,
    min_degree: i32,
    max_degree: i32,
    incline: Incline,
}

impl SlopeCategory {
    /// Declares a category covering `min_degree..=max_degree`.
    #[must_use]
    pub const fn new(
        name: &'static str,
        min_degree: i32,
        max_degree: i32,
        incline: Incline,
    ) -> Self {
        Self {
            name,
            min_degree,
            max_degree,
            incline,
        }
    }

    /// Category name, e.g. "Gentle Down".
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Inclusive degree range.
    #[must_use]
    pub const fn degree_range(&self) -> (i32, i32) {
        (self.min_degree, self.max_degree)
    }

    /// Vertical direction of the category.
    #[must_use]
    pub const fn incline(&self) -> Incline {
        self.incline
    }
}

/// Concrete slope: a category plus the degree rolled when it was selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Slope {
    category: SlopeCategory,
    degree: i32,
}

impl Slope {
    /// Pairs a category with an explicit degree.
    #[must_use]
    pub const fn new(category: SlopeCategory, degree: i32) -> Self {
        Self { category, degree }
    }

    /// Draws a degree uniformly inside the category range.
    pub fn roll<R: Rng + ?Sized>(category: SlopeCategory, rng: &mut R) -> Self {
        let (low, high) = category.degree_range();
        Self::new(category, rng.gen_range(low..=high))
    }

    /// Category the slope was rolled from.
    #[must_use]
    pub const fn category(&self) -> &SlopeCategory {
        &self.category
    }

    /// Rolled degree.
    #[must_use]
    pub const fn degree(&self) -> i32 {
        self.degree
    }

    /// Signed angle used for elevation: negated for descending categories.
    #[must_use]
    pub fn effective_angle(&self) -> f64 {
        f64::from(self.degree) * self.category.incline.angle_sign()
    }

    /// Elevation gained (or lost) over `length_ft` of tunnel.
    #[must_use]
    pub fn elevation_delta(&self, length_ft: u32) -> f64 {
        f64::from(length_ft) * self.effective_angle().to_radians().sin()
    }
}

/// Passage cross-section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Passage {
    label: &'static str,
    width_ft: u32,
    height_ft: Option<u32>,
}

impl Passage {
    /// Passage with both dimensions fixed by the size table.
    #[must_use]
    pub const fn sized(label: &'static str, height_ft: u32, width_ft: u32) -> Self {
        Self {
            label,
            width_ft,
            height_ft: Some(height_ft),
        }
    }

    /// Width-tracked passage labelled from its width.
    #[must_use]
    pub const fn for_width(width_ft: u32) -> Self {
        let label = if width_ft <= NARROW_WIDTH_LIMIT_FT {
            "Narrow"
        } else {
            "Average"
        };
        Self {
            label,
            width_ft,
            height_ft: None,
        }
    }

    /// Size label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Width in feet.
    #[must_use]
    pub const fn width_ft(&self) -> u32 {
        self.width_ft
    }

    /// Height in feet when the variant tracks it on the passage.
    #[must_use]
    pub const fn height_ft(&self) -> Option<u32> {
        self.height_ft
    }

    /// Dimension text such as `10'x10'` or `30' wide`.
    #[must_use]
    pub fn dimensions(&self) -> String {
        match self.height_ft {
            Some(height) => format!("{height}'x{}'", self.width_ft),
            None => format!("{}' wide", self.width_ft),
        }
    }
}

/// Water current and the drop it carries per mile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Flow {
    label: &'static str,
    drop_per_mile_ft: u32,
}

impl Flow {
    /// Declares a flow rate.
    #[must_use]
    pub const fn new(label: &'static str, drop_per_mile_ft: u32) -> Self {
        Self {
            label,
            drop_per_mile_ft,
        }
    }

    /// Flow label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Feet of drop per mile of tunnel.
    #[must_use]
    pub const fn drop_per_mile_ft(&self) -> u32 {
        self.drop_per_mile_ft
    }

    /// Elevation lost over `length_ft`, as a non-positive delta.
    #[must_use]
    pub fn elevation_delta(&self, length_ft: u32) -> f64 {
        if self.drop_per_mile_ft == 0 {
            return 0.0;
        }
        -(f64::from(self.drop_per_mile_ft) * f64::from(length_ft) / f64::from(FEET_PER_MILE))
    }
}

/// Labelled measurement in feet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Depth {
    label: &'static str,
    feet: u32,
}

impl Depth {
    /// Declares a measurement.
    #[must_use]
    pub const fn new(label: &'static str, feet: u32) -> Self {
        Self { label, feet }
    }

    /// Measurement label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Measurement in feet.
    #[must_use]
    pub const fn feet(&self) -> u32 {
        self.feet
    }
}

/// Value of one tracked attribute. Equality is structural, which is what the
/// section merge relies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
    /// Cross-section of the passage.
    Passage(Passage),
    /// Slope category and degree.
    Slope(Slope),
    /// Water current.
    Flow(Flow),
    /// Labelled measurement.
    Depth(Depth),
    /// Plain descriptive label.
    Descriptor(&'static str),
}

impl AttributeValue {
    /// Primary label of the value.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Passage(passage) => passage.label(),
            Self::Slope(slope) => slope.category().name(),
            Self::Flow(flow) => flow.label(),
            Self::Depth(depth) => depth.label(),
            Self::Descriptor(label) => *label,
        }
    }

    /// Returns the slope when the value is one.
    #[must_use]
    pub const fn as_slope(&self) -> Option<&Slope> {
        match self {
            Self::Slope(slope) => Some(slope),
            _ => None,
        }
    }

    /// Returns the passage when the value is one.
    #[must_use]
    pub const fn as_passage(&self) -> Option<&Passage> {
        match self {
            Self::Passage(passage) => Some(passage),
            _ => None,
        }
    }

    /// Returns the flow when the value is one.
    #[must_use]
    pub const fn as_flow(&self) -> Option<&Flow> {
        match self {
            Self::Flow(flow) => Some(flow),
            _ => None,
        }
    }
}

/// Current value of every tracked attribute, ordered by key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TunnelState {
    values: BTreeMap<AttributeKey, AttributeValue>,
}

impl TunnelState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the value stored for `key`, returning the previous one.
    pub fn set(&mut self, key: AttributeKey, value: AttributeValue) -> Option<AttributeValue> {
        self.values.insert(key, value)
    }

    /// Value stored for `key`.
    #[must_use]
    pub fn get(&self, key: AttributeKey) -> Option<&AttributeValue> {
        self.values.get(&key)
    }

    /// Slope value, when the variant tracks one.
    #[must_use]
    pub fn slope(&self) -> Option<&Slope> {
        self.get(AttributeKey::Slope).and_then(AttributeValue::as_slope)
    }

    /// Flow value, when the variant tracks one.
    #[must_use]
    pub fn flow(&self) -> Option<&Flow> {
        self.get(AttributeKey::Flow).and_then(AttributeValue::as_flow)
    }

    /// Passage value, when the variant tracks one.
    #[must_use]
    pub fn passage(&self) -> Option<&Passage> {
        self.get(AttributeKey::Size).and_then(AttributeValue::as_passage)
    }

    /// Iterates over every tracked attribute in key order.
    pub fn iter(&self) -> impl Iterator<Item = (AttributeKey, &AttributeValue)> {
        self.values.iter().map(|(key, value)| (*key, value))
    }

    /// Number of tracked attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Reports whether nothing has been rolled yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// How an attribute produces fresh values.
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeSource {
    /// Independent re-roll from a table of complete values.
    Table(WeightedTable<AttributeValue>),
    /// Re-roll a slope category, then a degree inside its range.
    Slope(WeightedTable<SlopeCategory>),
    /// Initial width from the table; later changes step the current width.
    Width(WeightedTable<u32>),
}

impl AttributeSource {
    /// Produces a value independent of the current one.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> AttributeValue {
        match self {
            Self::Table(table) => *table.sample(rng),
            Self::Slope(table) => {
                let category = *table.sample(rng);
                AttributeValue::Slope(Slope::roll(category, rng))
            }
            Self::Width(table) => AttributeValue::Passage(Passage::for_width(*table.sample(rng))),
        }
    }

    /// Reports whether changes are relative to the current value.
    #[must_use]
    pub const fn has_mutator(&self) -> bool {
        matches!(self, Self::Width(_))
    }
}

/// Describes one trackable attribute of a variant.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeSpec {
    key: AttributeKey,
    change_weight: u32,
    source: AttributeSource,
}

impl AttributeSpec {
    /// Declares an attribute and its relative likelihood of changing.
    #[must_use]
    pub const fn new(key: AttributeKey, change_weight: u32, source: AttributeSource) -> Self {
        Self {
            key,
            change_weight,
            source,
        }
    }

    /// Key the attribute is stored under.
    #[must_use]
    pub const fn key(&self) -> AttributeKey {
        self.key
    }

    /// Weight used when drawing which attribute changes.
    #[must_use]
    pub const fn change_weight(&self) -> u32 {
        self.change_weight
    }

    /// Value source.
    #[must_use]
    pub const fn source(&self) -> &AttributeSource {
        &self.source
    }

    /// Produces a fresh value, ignoring any current one.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> AttributeValue {
        self.source.generate(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WeightedOption;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const GENTLE_DOWN: SlopeCategory = SlopeCategory::new("Gentle Down", 15, 30, Incline::Down);

    #[test]
    fn descending_slopes_lose_elevation() {
        let slope = Slope::new(GENTLE_DOWN, 30);
        assert!((slope.effective_angle() + 30.0).abs() < f64::EPSILON);
        assert!((slope.elevation_delta(100) + 50.0).abs() < 1e-9);
    }

    #[test]
    fn level_slopes_keep_their_rolled_sign() {
        let level = SlopeCategory::new("Level", -14, 14, Incline::Level);
        let dipping = Slope::new(level, -10);
        let expected = 200.0 * (-10.0f64).to_radians().sin();
        assert!((dipping.elevation_delta(200) - expected).abs() < 1e-9);
    }

    #[test]
    fn rolled_degree_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(19);
        for _ in 0..1_000 {
            let degree = Slope::roll(GENTLE_DOWN, &mut rng).degree();
            assert!((15..=30).contains(&degree));
        }
    }

    #[test]
    fn width_label_follows_threshold() {
        assert_eq!(Passage::for_width(20).label(), "Narrow");
        assert_eq!(Passage::for_width(21).label(), "Average");
        assert_eq!(Passage::for_width(5).dimensions(), "5' wide");
        assert_eq!(Passage::sized("Normal", 10, 10).dimensions(), "10'x10'");
    }

    #[test]
    fn flow_drop_scales_with_length() {
        let swift = Flow::new("Swift", 30);
        assert!((swift.elevation_delta(FEET_PER_MILE) + 30.0).abs() < 1e-9);
        assert!((swift.elevation_delta(2_640) + 15.0).abs() < 1e-9);
        assert_eq!(Flow::new("Still", 0).elevation_delta(500), 0.0);
    }

    #[test]
    fn width_source_generates_labelled_passages() {
        let widths = WeightedTable::new("widths", vec![WeightedOption::new("30'", 1, 30)])
            .expect("weight");
        let source = AttributeSource::Width(widths);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(source.has_mutator());
        assert_eq!(
            source.generate(&mut rng),
            AttributeValue::Passage(Passage::for_width(30))
        );
    }

    #[test]
    fn state_accessors_find_typed_values() {
        let mut state = TunnelState::new();
        assert!(state
            .set(
                AttributeKey::Slope,
                AttributeValue::Slope(Slope::new(GENTLE_DOWN, 20))
            )
            .is_none());
        assert!(state
            .set(AttributeKey::Direction, AttributeValue::Descriptor("Straight"))
            .is_none());
        assert_eq!(state.slope().map(Slope::degree), Some(20));
        assert!(state.flow().is_none());
        assert_eq!(state.len(), 2);
        let keys: Vec<_> = state.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![AttributeKey::Slope, AttributeKey::Direction]);
    }
}
