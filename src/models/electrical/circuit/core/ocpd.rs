//! Overcurrent protective device selection, 240.4 and 240.6(A).

use uom::si::{electric_current::ampere, f64::ElectricCurrent};

use crate::support::{
    load::CircuitType,
    nec::{Metal, OcpdRating, Rounding, Size},
};

use super::ComplianceError;

/// Ratings a multi-outlet branch circuit may not have, 210.3.
const MULTI_OUTLET_FORBIDDEN: [u32; 3] = [25, 35, 45];

/// What the resolver needs to know about the sized circuit.
#[derive(Debug, Clone, Copy)]
pub(super) struct OcpdRequest {
    /// Ampacity of all sets together.
    pub ampacity: ElectricCurrent,
    /// Current the conductors were sized for.
    pub design_current: ElectricCurrent,
    /// Largest protection the load allows, before standardizing.
    pub max_rating: Option<ElectricCurrent>,
    pub next_higher: bool,
    pub circuit_type: CircuitType,
    pub metal: Metal,
    pub phase: Size,
}

/// The chosen rating and the phase size that goes with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Protection {
    pub rating: OcpdRating,
    pub phase: Size,
}

/// Largest OCPD allowed on small conductors, 240.4(D).
///
/// A multi-outlet circuit cannot be rated 25 A, so 10 AWG aluminum on one
/// stops at 20 A.
pub(super) fn small_conductor_limit(
    size: Size,
    metal: Metal,
    circuit_type: CircuitType,
) -> Option<OcpdRating> {
    let aluminum = metal.uses_aluminum_tables();
    let amperes = match size {
        Size::Awg14 => 15,
        Size::Awg12 if aluminum => 15,
        Size::Awg12 => 20,
        Size::Awg10 if aluminum && circuit_type == CircuitType::MultiOutletBranch => 20,
        Size::Awg10 if aluminum => 25,
        Size::Awg10 => 30,
        _ => return None,
    };
    OcpdRating::new(amperes)
}

/// Picks the OCPD rating, upsizing the phase conductors when the rating has
/// to be raised.
///
/// `ampacity_at` gives the circuit ampacity with phase conductors of another
/// size, or `None` when that size cannot be used.
pub(super) fn resolve(
    request: &OcpdRequest,
    mut ampacity_at: impl FnMut(Size) -> Option<ElectricCurrent>,
) -> Result<Protection, ComplianceError> {
    if let Some(max) = request.max_rating {
        let rating = OcpdRating::standardize(max, Rounding::Down).ok_or(
            ComplianceError::NoStandardOcpd {
                amperes: max.get::<ampere>(),
            },
        )?;
        tracing::debug!(%rating, "OCPD set by the load");
        return Ok(Protection {
            rating,
            phase: request.phase,
        });
    }

    let by_ampacity = OcpdRating::for_current(request.ampacity, request.next_higher);
    let by_load = OcpdRating::for_current(request.design_current, request.next_higher);
    let rating = by_ampacity
        .max(by_load)
        .ok_or(ComplianceError::NoStandardOcpd {
            amperes: request.design_current.get::<ampere>(),
        })?;

    let mut protection = Protection {
        rating,
        phase: request.phase,
    };
    let mut ampacity = request.ampacity;

    if let Some(limit) = small_conductor_limit(request.phase, request.metal, request.circuit_type)
        && limit < protection.rating
    {
        protection.rating = limit;
        // The limit may be too small for the load itself.
        if limit.current() < request.design_current {
            let target = by_load.unwrap_or(limit);
            protection = upsize(request, protection.phase, ampacity, target, &mut ampacity_at)?;
            if protection.phase != request.phase {
                ampacity = ampacity_at(protection.phase)
                    .ok_or(ComplianceError::NoLargerSize { rating: target })?;
            }
        }
    }

    let multi_outlet = request.circuit_type == CircuitType::MultiOutletBranch;
    if !multi_outlet || !MULTI_OUTLET_FORBIDDEN.contains(&protection.rating.amperes()) {
        return Ok(protection);
    }

    let from = protection.rating;
    if let Some(lower) = from
        .next_lower()
        .filter(|lower| lower.current() >= ampacity && lower.current() >= request.design_current)
    {
        tracing::debug!(%from, to = %lower, "multi-outlet rating lowered");
        return Ok(Protection {
            rating: lower,
            ..protection
        });
    }

    let raised = from.next_higher().ok_or(ComplianceError::NoStandardOcpd {
        amperes: from.current().get::<ampere>(),
    })?;
    tracing::debug!(%from, to = %raised, "multi-outlet rating raised");
    upsize(request, protection.phase, ampacity, raised, &mut ampacity_at)
}

/// Smallest phase size, starting at `from`, that supports `rating`.
///
/// `from` is checked against its known `ampacity`; larger sizes go through
/// `ampacity_at`.
fn upsize(
    request: &OcpdRequest,
    from: Size,
    ampacity: ElectricCurrent,
    rating: OcpdRating,
    ampacity_at: &mut impl FnMut(Size) -> Option<ElectricCurrent>,
) -> Result<Protection, ComplianceError> {
    let supports = |size: Size, ampacity: ElectricCurrent| {
        let protected = OcpdRating::for_current(ampacity, request.next_higher)
            .is_some_and(|allowed| allowed >= rating);
        let small_ok = small_conductor_limit(size, request.metal, request.circuit_type)
            .is_none_or(|limit| rating <= limit);
        protected && small_ok
    };

    if supports(from, ampacity) {
        return Ok(Protection {
            rating,
            phase: from,
        });
    }

    from.and_larger()
        .skip(1)
        .find(|&size| ampacity_at(size).is_some_and(|ampacity| supports(size, ampacity)))
        .map(|phase| {
            tracing::debug!(%phase, %rating, "phase upsized for OCPD");
            Protection { rating, phase }
        })
        .ok_or(ComplianceError::NoLargerSize { rating })
}
