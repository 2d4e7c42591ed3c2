//! Equipment grounding conductor sizing, 250.122.

use crate::support::nec::{Metal, OcpdRating, Size, egc_size};

use super::ComplianceError;

/// Relative slack when matching a scaled area to a listed size.
const AREA_TOLERANCE: f64 = 1e-9;

/// Sizes the EGC for the OCPD rating.
///
/// When the phase conductors were upsized for voltage drop, the EGC is
/// increased in proportion to their circular-mil area, 250.122(B), without
/// exceeding the voltage-drop size or the phase conductors.
pub(super) fn size(
    rating: OcpdRating,
    metal: Metal,
    phase: Size,
    per_ampacity: Size,
    per_voltage_drop: Size,
) -> Result<Size, ComplianceError> {
    let base = egc_size(rating, metal).ok_or(ComplianceError::NoEgcSize { rating })?;

    let sized = if per_voltage_drop > per_ampacity {
        let ratio = per_voltage_drop.circular_mils() / per_ampacity.circular_mils();
        let area = base.circular_mils() * ratio * (1.0 - AREA_TOLERANCE);
        Size::with_at_least(area)
            .unwrap_or(per_voltage_drop)
            .min(per_voltage_drop)
    } else {
        base
    };

    Ok(sized.min(phase))
}
