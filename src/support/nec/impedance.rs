//! AC resistance and reactance from Chapter 9, Table 9.
//!
//! Table 9 lists ohms to neutral per 1000 ft for three single conductors in a
//! PVC, aluminum or steel conduit at 75 °C.
//! Sizes the table skips (700, 800 and 900 kcmil) are interpolated on
//! circular mils between their listed neighbors.
//! Sizes above 1000 kcmil scale the 1000 kcmil resistance by area and keep
//! its reactance.

use uom::si::{
    electrical_resistance::ohm,
    f64::{ElectricalResistance, Length},
    length::foot,
};

use crate::support::units::LinearResistance;

use super::{Metal, Size};

/// Outer enclosure class selecting a Table 9 column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OuterMaterial {
    #[default]
    Pvc,
    Aluminum,
    Steel,
}

impl OuterMaterial {
    fn column(self) -> usize {
        match self {
            OuterMaterial::Pvc => 0,
            OuterMaterial::Aluminum => 1,
            OuterMaterial::Steel => 2,
        }
    }
}

/// AC resistance per unit length.
///
/// Returns `None` for 14 AWG aluminum.
#[must_use]
pub fn resistance(size: Size, metal: Metal, material: OuterMaterial) -> Option<LinearResistance> {
    let table = if metal.uses_aluminum_tables() {
        &AL_R
    } else {
        &CU_R
    };
    lookup(table, size, material.column(), true).map(per_kft)
}

/// Inductive reactance per unit length.
///
/// Aluminum conduit shares the PVC reactance column.
#[must_use]
pub fn reactance(size: Size, material: OuterMaterial) -> Option<LinearResistance> {
    let column = match material {
        OuterMaterial::Pvc | OuterMaterial::Aluminum => 0,
        OuterMaterial::Steel => 1,
    };
    lookup(&X, size, column, false).map(per_kft)
}

/// Effective impedance `R·cosθ + X·sinθ` at the given power factor.
///
/// For a leading load the reactive term is subtracted.
#[must_use]
pub fn effective_impedance(
    size: Size,
    metal: Metal,
    material: OuterMaterial,
    power_factor: f64,
    lagging: bool,
) -> Option<LinearResistance> {
    let r = resistance(size, metal, material)?;
    let x = reactance(size, material)?;
    let sin = (1.0 - power_factor * power_factor).max(0.0).sqrt();
    let reactive = x * sin;
    Some(if lagging {
        r * power_factor + reactive
    } else {
        r * power_factor - reactive
    })
}

fn per_kft(ohms: f64) -> LinearResistance {
    ElectricalResistance::new::<ohm>(ohms) / Length::new::<foot>(1000.0)
}

/// Looks up a table value, filling sizes the table skips.
///
/// Resistance scales inversely with area above 1000 kcmil; reactance holds.
fn lookup<const C: usize>(
    table: &[Option<[f64; C]>; 28],
    size: Size,
    column: usize,
    scales_with_area: bool,
) -> Option<f64> {
    if let Some(row) = table[size.index()] {
        return Some(row[column]);
    }

    if size > Size::Kcmil1000 {
        let base = table[Size::Kcmil1000.index()]?[column];
        return Some(if scales_with_area {
            base * Size::Kcmil1000.circular_mils() / size.circular_mils()
        } else {
            base
        });
    }

    let below = Size::ALL[..size.index()]
        .iter()
        .rev()
        .find(|s| table[s.index()].is_some())?;
    let above = Size::ALL[size.index() + 1..]
        .iter()
        .find(|s| table[s.index()].is_some())?;
    let low = table[below.index()]?[column];
    let high = table[above.index()]?[column];
    let t = (size.circular_mils() - below.circular_mils())
        / (above.circular_mils() - below.circular_mils());
    Some(low + t * (high - low))
}

// Ohms per 1000 ft as [PVC, aluminum, steel] conduit, indexed by `Size::index`.

const CU_R: [Option<[f64; 3]>; 28] = [
    Some([3.1, 3.1, 3.1]),
    Some([2.0, 2.0, 2.0]),
    Some([1.2, 1.2, 1.2]),
    Some([0.78, 0.78, 0.78]),
    Some([0.49, 0.49, 0.49]),
    Some([0.31, 0.31, 0.31]),
    Some([0.25, 0.25, 0.25]),
    Some([0.19, 0.20, 0.20]),
    Some([0.15, 0.16, 0.16]),
    Some([0.12, 0.13, 0.12]),
    Some([0.10, 0.10, 0.10]),
    Some([0.077, 0.082, 0.079]),
    Some([0.062, 0.067, 0.063]),
    Some([0.052, 0.057, 0.054]),
    Some([0.044, 0.049, 0.045]),
    Some([0.038, 0.043, 0.039]),
    Some([0.033, 0.038, 0.035]),
    Some([0.027, 0.032, 0.029]),
    Some([0.023, 0.028, 0.025]),
    None,
    Some([0.019, 0.024, 0.021]),
    None,
    None,
    Some([0.015, 0.019, 0.018]),
    None,
    None,
    None,
    None,
];

const AL_R: [Option<[f64; 3]>; 28] = [
    None,
    Some([3.2, 3.2, 3.2]),
    Some([2.0, 2.0, 2.0]),
    Some([1.3, 1.3, 1.3]),
    Some([0.81, 0.81, 0.81]),
    Some([0.51, 0.51, 0.51]),
    Some([0.40, 0.41, 0.40]),
    Some([0.32, 0.32, 0.32]),
    Some([0.25, 0.26, 0.25]),
    Some([0.20, 0.21, 0.20]),
    Some([0.16, 0.16, 0.16]),
    Some([0.13, 0.13, 0.13]),
    Some([0.10, 0.11, 0.10]),
    Some([0.085, 0.090, 0.086]),
    Some([0.071, 0.076, 0.072]),
    Some([0.061, 0.066, 0.063]),
    Some([0.054, 0.059, 0.055]),
    Some([0.043, 0.048, 0.045]),
    Some([0.036, 0.041, 0.038]),
    None,
    Some([0.029, 0.034, 0.031]),
    None,
    None,
    Some([0.023, 0.027, 0.025]),
    None,
    None,
    None,
    None,
];

// Reactance as [PVC or aluminum, steel] conduit.

const X: [Option<[f64; 2]>; 28] = [
    Some([0.058, 0.073]),
    Some([0.054, 0.068]),
    Some([0.050, 0.063]),
    Some([0.052, 0.065]),
    Some([0.051, 0.064]),
    Some([0.048, 0.060]),
    Some([0.047, 0.059]),
    Some([0.045, 0.057]),
    Some([0.046, 0.057]),
    Some([0.044, 0.055]),
    Some([0.043, 0.054]),
    Some([0.042, 0.052]),
    Some([0.041, 0.051]),
    Some([0.041, 0.052]),
    Some([0.041, 0.051]),
    Some([0.040, 0.050]),
    Some([0.040, 0.049]),
    Some([0.039, 0.048]),
    Some([0.039, 0.048]),
    None,
    Some([0.038, 0.048]),
    None,
    None,
    Some([0.037, 0.046]),
    None,
    None,
    None,
    None,
];
