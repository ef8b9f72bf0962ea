//! Weighted discrete distributions and dice helpers.

use std::fmt;

use rand::Rng;

use crate::TableError;

/// Lowest roll of a percentile (d100) table.
pub const PERCENTILE_LOW: u32 = 1;
/// Highest roll of a percentile (d100) table.
pub const PERCENTILE_HIGH: u32 = 100;

/// Named entry stored inside a [`WeightedTable`].
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedOption<T> {
    name: &'static str,
    weight: u32,
    payload: T,
}

impl<T> WeightedOption<T> {
    /// Creates a new option with the provided relative weight.
    #[must_use]
    pub const fn new(name: &'static str, weight: u32, payload: T) -> Self {
        Self {
            name,
            weight,
            payload,
        }
    }

    /// Human readable name of the option.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Relative weight of the option. Zero-weight options are never drawn.
    #[must_use]
    pub const fn weight(&self) -> u32 {
        self.weight
    }

    /// Data returned when the option is drawn.
    #[must_use]
    pub const fn payload(&self) -> &T {
        &self.payload
    }
}

/// Contiguous inclusive band of a percentile table.
#[derive(Clone, Debug, PartialEq)]
pub struct PercentileBand<T> {
    low: u32,
    high: u32,
    name: &'static str,
    payload: T,
}

impl<T> PercentileBand<T> {
    /// Creates a band covering `low..=high` on a d100 roll.
    #[must_use]
    pub const fn new(low: u32, high: u32, name: &'static str, payload: T) -> Self {
        Self {
            low,
            high,
            name,
            payload,
        }
    }
}

/// Discrete distribution over named options with integer weights.
///
/// The probability of drawing option `i` is `weight_i / total_weight`. A table
/// can only be constructed when the total weight is positive, so sampling never
/// fails at runtime.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedTable<T> {
    name: &'static str,
    options: Vec<WeightedOption<T>>,
    cumulative: Vec<u64>,
}

impl<T> WeightedTable<T> {
    /// Builds a table, rejecting option sets whose weights sum to zero.
    pub fn new(name: &'static str, options: Vec<WeightedOption<T>>) -> Result<Self, TableError> {
        let mut cumulative = Vec::with_capacity(options.len());
        let mut running = 0u64;
        for option in &options {
            running += u64::from(option.weight);
            cumulative.push(running);
        }

        if running == 0 {
            return Err(TableError::ZeroTotalWeight { table: name });
        }

        Ok(Self {
            name,
            options,
            cumulative,
        })
    }

    /// Builds a table from contiguous d100 bands, weighting each band by its width.
    ///
    /// Bands must start at 1, end at 100 and leave no holes between them. Ranges
    /// that intentionally produce nothing are expressed as bands of their own.
    pub fn from_percentile_bands(
        name: &'static str,
        bands: Vec<PercentileBand<T>>,
    ) -> Result<Self, TableError> {
        let mut expected_low = PERCENTILE_LOW;
        let mut options = Vec::with_capacity(bands.len());
        for band in bands {
            if band.low != expected_low || band.high < band.low || band.high > PERCENTILE_HIGH {
                return Err(TableError::MisalignedBand {
                    table: name,
                    expected_low,
                    low: band.low,
                    high: band.high,
                });
            }
            expected_low = band.high + 1;
            options.push(WeightedOption::new(
                band.name,
                band.high - band.low + 1,
                band.payload,
            ));
        }

        if expected_low != PERCENTILE_HIGH + 1 {
            return Err(TableError::IncompleteBands {
                table: name,
                covered: expected_low - 1,
            });
        }

        Self::new(name, options)
    }

    /// Draws an option with probability proportional to its weight.
    pub fn sample_option<R: Rng + ?Sized>(&self, rng: &mut R) -> &WeightedOption<T> {
        let roll = rng.gen_range(0..self.total_weight());
        let index = self.cumulative.partition_point(|&edge| edge <= roll);
        &self.options[index]
    }

    /// Draws an option and returns its payload.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        self.sample_option(rng).payload()
    }

    /// Returns a table containing only the options whose payload satisfies `keep`.
    ///
    /// Yields `None` when the surviving options carry no weight.
    #[must_use]
    pub fn filtered(&self, keep: impl Fn(&T) -> bool) -> Option<Self>
    where
        T: Clone,
    {
        let options = self
            .options
            .iter()
            .filter(|option| keep(option.payload()))
            .cloned()
            .collect();
        Self::new(self.name, options).ok()
    }

    /// Name used in diagnostics and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Sum of every option weight.
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Options in declaration order.
    #[must_use]
    pub fn options(&self) -> &[WeightedOption<T>] {
        &self.options
    }

    /// Number of options, including zero-weight ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Reports whether the table has no options. Always false for a built table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Sums `count` independent uniform draws over `1..=sides`.
///
/// A die with zero sides contributes nothing.
pub fn roll_dice<R: Rng + ?Sized>(rng: &mut R, count: u32, sides: u32) -> u32 {
    if sides == 0 {
        return 0;
    }
    (0..count).map(|_| rng.gen_range(1..=sides)).sum()
}

/// Dice expression of the form `NdS * multiplier + bonus`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DiceFormula {
    count: u32,
    sides: u32,
    multiplier: u32,
    bonus: u32,
}

impl DiceFormula {
    /// Plain `NdS` roll.
    #[must_use]
    pub const fn new(count: u32, sides: u32) -> Self {
        Self {
            count,
            sides,
            multiplier: 1,
            bonus: 0,
        }
    }

    /// Scales the dice total by `multiplier`.
    #[must_use]
    pub const fn times(self, multiplier: u32) -> Self {
        Self { multiplier, ..self }
    }

    /// Adds a flat `bonus` after scaling.
    #[must_use]
    pub const fn plus(self, bonus: u32) -> Self {
        Self { bonus, ..self }
    }

    /// Rolls the formula.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        roll_dice(rng, self.count, self.sides) * self.multiplier + self.bonus
    }
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        if self.multiplier != 1 {
            write!(f, "x{}", self.multiplier)?;
        }
        if self.bonus != 0 {
            write!(f, "+{}", self.bonus)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn colours() -> WeightedTable<&'static str> {
        WeightedTable::new(
            "colours",
            vec![
                WeightedOption::new("red", 1, "red"),
                WeightedOption::new("never", 0, "never"),
                WeightedOption::new("blue", 3, "blue"),
            ],
        )
        .expect("positive weight")
    }

    #[test]
    fn zero_total_weight_is_rejected() {
        let error = WeightedTable::new("empty", vec![WeightedOption::new("a", 0, ())])
            .expect_err("zero weight must fail");
        assert_eq!(error, TableError::ZeroTotalWeight { table: "empty" });

        let error = WeightedTable::<()>::new("none", Vec::new()).expect_err("no options");
        assert_eq!(error, TableError::ZeroTotalWeight { table: "none" });
    }

    #[test]
    fn single_option_is_always_drawn() {
        let table = WeightedTable::new("single", vec![WeightedOption::new("only", 3, 'x')])
            .expect("positive weight");
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        for _ in 0..1_000 {
            assert_eq!(table.sample_option(&mut rng).name(), "only");
        }
    }

    #[test]
    fn zero_weight_options_are_never_drawn() {
        let table = colours();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..5_000 {
            assert_ne!(*table.sample(&mut rng), "never");
        }
    }

    #[test]
    fn draws_follow_weights() {
        let table = colours();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let draws = 40_000;
        let blue = (0..draws)
            .filter(|_| *table.sample(&mut rng) == "blue")
            .count();
        let share = blue as f64 / f64::from(draws);
        assert!((0.72..0.78).contains(&share), "blue share was {share}");
    }

    #[test]
    fn filtered_table_drops_options_and_reports_exhaustion() {
        let table = colours();
        let only_red = table.filtered(|colour| *colour == "red").expect("red remains");
        assert_eq!(only_red.len(), 1);
        assert_eq!(only_red.total_weight(), 1);
        assert!(table.filtered(|colour| *colour == "never").is_none());
        assert!(table.filtered(|_| false).is_none());
    }

    #[test]
    fn percentile_bands_must_cover_one_to_hundred() {
        let complete = WeightedTable::from_percentile_bands(
            "complete",
            vec![
                PercentileBand::new(1, 60, "low", 'a'),
                PercentileBand::new(61, 100, "high", 'b'),
            ],
        )
        .expect("contiguous bands");
        assert_eq!(complete.total_weight(), 100);
        assert_eq!(complete.options()[0].weight(), 60);

        let holed = WeightedTable::from_percentile_bands(
            "holed",
            vec![
                PercentileBand::new(1, 60, "low", 'a'),
                PercentileBand::new(62, 100, "high", 'b'),
            ],
        );
        assert_eq!(
            holed,
            Err(TableError::MisalignedBand {
                table: "holed",
                expected_low: 61,
                low: 62,
                high: 100,
            })
        );

        let short = WeightedTable::from_percentile_bands(
            "short",
            vec![PercentileBand::new(1, 90, "low", 'a')],
        );
        assert_eq!(
            short,
            Err(TableError::IncompleteBands {
                table: "short",
                covered: 90,
            })
        );
    }

    #[test]
    fn dice_stay_within_formula_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let formula = DiceFormula::new(10, 6).times(10).plus(400);
        assert_eq!(formula.to_string(), "10d6x10+400");
        for _ in 0..2_000 {
            let value = formula.roll(&mut rng);
            assert!((500..=1_000).contains(&value), "rolled {value}");
            assert_eq!(value % 10, 0);
        }
    }

    #[test]
    fn roll_dice_sums_each_die() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..2_000 {
            let total = roll_dice(&mut rng, 3, 6);
            assert!((3..=18).contains(&total));
        }
        assert_eq!(roll_dice(&mut rng, 4, 1), 4);
        assert_eq!(roll_dice(&mut rng, 4, 0), 0);
        assert_eq!(roll_dice(&mut rng, 0, 20), 0);
    }

    #[test]
    fn dice_formula_display_matches_notation() {
        assert_eq!(DiceFormula::new(5, 8).to_string(), "5d8");
        assert_eq!(DiceFormula::new(10, 6).plus(30).to_string(), "10d6+30");
        assert_eq!(DiceFormula::new(10, 4).times(50).to_string(), "10d4x50");
    }
}
