#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Entry point that turns a generation request into a finished tunnel run.

use rand::Rng;
use tracing::debug;
use tunnelgen_catalog::variant_for;
use tunnelgen_core::{GenerationError, GenerationRequest, TunnelRun, TunnelVariant};
use tunnelgen_system_attribute_state::AttributeState;
use tunnelgen_system_section_accumulator::{Placement, SectionAccumulator};

/// Generates a tunnel for `request`, drawing every random value from `rng`.
///
/// The same request and an identically seeded `rng` always produce the same
/// run. The sum of section lengths equals the requested length rounded to
/// whole feet.
pub fn generate<R: Rng>(
    request: &GenerationRequest,
    rng: &mut R,
) -> Result<TunnelRun, GenerationError> {
    let requested_length_ft = request.requested_length_ft()?;
    let variant = variant_for(request)?;
    generate_with(variant.as_ref(), requested_length_ft, rng)
}

/// Generates `requested_length_ft` of tunnel from an already built profile.
pub fn generate_with<R: Rng>(
    variant: &dyn TunnelVariant,
    requested_length_ft: u32,
    rng: &mut R,
) -> Result<TunnelRun, GenerationError> {
    debug!(
        variant = %variant.kind(),
        requested_length_ft, "generating tunnel"
    );

    let mut accumulator = SectionAccumulator::new(requested_length_ft);
    let mut attributes = AttributeState::new(variant, rng)?;
    let mut merged = 0usize;

    while !accumulator.is_complete() {
        let special = if accumulator.covered_ft() == 0 {
            None
        } else {
            attributes.advance(rng)
        };
        let length_ft = accumulator.roll_length(variant.length_table(), rng);
        if accumulator.push(length_ft, attributes.state(), special) == Placement::Merged {
            merged += 1;
        }
    }

    let run = accumulator.finish(variant.kind(), variant.diagnostics().to_vec());
    debug!(
        sections = run.sections().len(),
        merged,
        elevation_change_ft = run.elevation_change_ft(),
        "tunnel complete"
    );
    Ok(run)
}
