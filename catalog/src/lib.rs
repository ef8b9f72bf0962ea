#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Static table data for every tunnel variant.

mod dry;
mod shared;
mod wet;

pub use dry::DryTunnel;
pub use wet::WetTunnel;

use tracing::debug;
use tunnelgen_core::{GenerationRequest, TableError, TunnelVariant, VariantKind};

/// Builds the profile named by `request`.
///
/// Size minimums only apply to the dry variant; wet passages are tracked by
/// width alone and ignore them.
pub fn variant_for(request: &GenerationRequest) -> Result<Box<dyn TunnelVariant>, TableError> {
    match request.variant() {
        VariantKind::Dry => Ok(Box::new(DryTunnel::new(
            request.min_height(),
            request.min_width(),
        )?)),
        VariantKind::Wet => {
            if request.min_height() > 0 || request.min_width() > 0 {
                debug!(
                    min_height = request.min_height(),
                    min_width = request.min_width(),
                    "size minimums ignored by the wet variant"
                );
            }
            Ok(Box::new(WetTunnel::new()?))
        }
    }
}
