use uom::si::f64::Length;

use crate::support::{
    nec::{Edition, Metal, Size},
    units::inches,
};

/// Bundles up to this length (24 in) are treated as free air.
pub const BUNDLING_THRESHOLD_INCHES: f64 = 24.0;

/// Where a conductor or cable is installed, as seen by the factor engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Housing {
    /// Not in any raceway or bundle.
    FreeAir,

    /// In a conduit holding `current_carrying` conductors in total.
    Conduit { current_carrying: usize, nipple: bool },

    /// In a bundle holding `current_carrying` conductors in total.
    Bundle {
        current_carrying: usize,
        length: Length,
        cable_exception: Option<CableException>,
    },
}

/// AC/MC cable bundling exceptions of 310.15(B)(3)(a).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CableException {
    /// Exception (4): no adjustment.
    Exempt,
    /// Exception (5): a 60 % factor regardless of count.
    Reduced,
}

impl CableException {
    /// Adjustment factor granted by the exception.
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            CableException::Exempt => 1.0,
            CableException::Reduced => 0.6,
        }
    }
}

/// The cable properties that decide the bundling exceptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundledCable {
    /// Type AC or MC.
    pub armored: bool,
    /// Has an overall outer jacket.
    pub jacketed: bool,
    pub current_carrying: usize,
    pub metal: Metal,
    pub size: Size,
}

impl BundledCable {
    fn meets_exempt_conditions(&self, edition: Edition) -> bool {
        let size_ok = match edition {
            Edition::Nec2014 => self.size == Size::Awg12,
            Edition::Nec2017 | Edition::Nec2020 => self.size <= Size::Awg12,
        };
        self.armored
            && !self.jacketed
            && self.current_carrying <= 3
            && self.metal == Metal::Copper
            && size_ok
    }

    fn meets_reduced_conditions(&self) -> bool {
        self.armored && !self.jacketed
    }
}

/// Adjustment factor for a count of current-carrying conductors,
/// Table 310.15(B)(3)(a).
#[must_use]
pub fn count_adjustment_factor(current_carrying: usize) -> f64 {
    match current_carrying {
        0..=3 => 1.0,
        4..=6 => 0.8,
        7..=9 => 0.7,
        10..=20 => 0.5,
        21..=30 => 0.45,
        31..=40 => 0.4,
        _ => 0.35,
    }
}

/// Decides which cable exception, if any, applies to a bundle.
///
/// Only the cables in the bundle are considered; the bundle total
/// `current_carrying` includes any plain conductors as well.
/// Returns `None` when the bundle holds no cables.
pub fn cable_exception(
    cables: impl IntoIterator<Item = BundledCable>,
    current_carrying: usize,
    edition: Edition,
) -> Option<CableException> {
    let mut any = false;
    let mut exempt = true;
    let mut reduced = true;
    for cable in cables {
        any = true;
        exempt &= cable.meets_exempt_conditions(edition);
        reduced &= cable.meets_reduced_conditions();
    }

    if !any {
        None
    } else if exempt && current_carrying <= 20 {
        Some(CableException::Exempt)
    } else if reduced && current_carrying > 20 {
        Some(CableException::Reduced)
    } else {
        None
    }
}

/// Adjustment factor for one member of a housing.
///
/// `own_current_carrying` is the member's own count, used when a cable sits
/// in free air. Cable exceptions only benefit members that are cables.
#[must_use]
pub fn adjustment_factor(housing: &Housing, own_current_carrying: usize, is_cable: bool) -> f64 {
    match *housing {
        Housing::FreeAir if is_cable => count_adjustment_factor(own_current_carrying),
        Housing::FreeAir => 1.0,
        Housing::Conduit { nipple: true, .. } => 1.0,
        Housing::Conduit {
            current_carrying, ..
        } => count_adjustment_factor(current_carrying),
        Housing::Bundle { length, .. } if inches(length) <= BUNDLING_THRESHOLD_INCHES => 1.0,
        Housing::Bundle {
            cable_exception: Some(exception),
            ..
        } if is_cable => exception.factor(),
        Housing::Bundle {
            current_carrying, ..
        } => count_adjustment_factor(current_carrying),
    }
}
