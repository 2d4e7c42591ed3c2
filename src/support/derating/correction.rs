use uom::si::{
    f64::{Length, TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::degree_fahrenheit as delta_fahrenheit,
};

use crate::support::{
    nec::{Edition, Insulation, TempRating},
    units::{fahrenheit, inches},
};

/// Upper edge of each ambient row of Table 310.15(B)(2)(a), in °F.
const ROW_EDGES_F: [f64; 16] = [
    50.0, 59.0, 68.0, 77.0, 86.0, 95.0, 104.0, 113.0, 122.0, 131.0, 140.0, 149.0, 158.0, 167.0,
    176.0, 185.0,
];

const FACTORS_60: [f64; 16] = [
    1.29, 1.22, 1.15, 1.08, 1.00, 0.91, 0.82, 0.71, 0.58, 0.41, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
];

const FACTORS_75: [f64; 16] = [
    1.20, 1.15, 1.11, 1.05, 1.00, 0.94, 0.88, 0.82, 0.75, 0.67, 0.58, 0.47, 0.33, 0.0, 0.0, 0.0,
];

const FACTORS_90: [f64; 16] = [
    1.15, 1.12, 1.08, 1.04, 1.00, 0.96, 0.91, 0.87, 0.82, 0.76, 0.71, 0.65, 0.58, 0.50, 0.41, 0.29,
];

/// Ambient temperature correction factor, Table 310.15(B)(2)(a).
///
/// The table is based on a 30 °C (86 °F) ambient.
/// Temperatures at or below 50 °F use the first row.
/// A factor of zero means the conductor cannot operate at this ambient,
/// including any ambient above 185 °F.
#[must_use]
pub fn temperature_correction_factor(ambient: ThermodynamicTemperature, rating: TempRating) -> f64 {
    let ambient_f = fahrenheit(ambient);
    let Some(row) = ROW_EDGES_F.iter().position(|&edge| ambient_f <= edge) else {
        return 0.0;
    };

    match rating {
        TempRating::T60 => FACTORS_60[row],
        TempRating::T75 => FACTORS_75[row],
        TempRating::T90 => FACTORS_90[row],
    }
}

/// Temperature adder for raceways and cables exposed to sunlight on or above
/// a rooftop, 310.15(B)(3)(c).
///
/// `distance` is the clearance above the roof; `None` means the installation
/// is not on a rooftop.
///
/// - NEC 2014 uses a ladder of adders out to 36 in.
/// - NEC 2017 and 2020 add 60 °F only below 7/8 in, and exempt XHHW-2.
#[must_use]
pub fn rooftop_adder(
    distance: Option<Length>,
    insulation: Insulation,
    edition: Edition,
) -> TemperatureInterval {
    let Some(distance) = distance else {
        return TemperatureInterval::new::<delta_fahrenheit>(0.0);
    };
    let d = inches(distance);

    let adder = match edition {
        Edition::Nec2014 => match d {
            d if d <= 0.5 => 60.0,
            d if d <= 3.5 => 40.0,
            d if d <= 12.0 => 30.0,
            d if d <= 36.0 => 25.0,
            _ => 0.0,
        },
        Edition::Nec2017 | Edition::Nec2020 => {
            if insulation == Insulation::Xhhw2 || d >= 0.875 {
                0.0
            } else {
                60.0
            }
        }
    };

    TemperatureInterval::new::<delta_fahrenheit>(adder)
}

/// Correction factor for the ambient plus any rooftop adder, using the
/// insulation's own temperature rating.
#[must_use]
pub fn correction_factor(
    ambient: ThermodynamicTemperature,
    rooftop: Option<Length>,
    insulation: Insulation,
    edition: Edition,
) -> f64 {
    correction_factor_at(ambient, rooftop, insulation, edition, insulation.temp_rating())
}

/// Correction factor read from another temperature column.
///
/// Used to check a conductor against the rating of the equipment terminals
/// it lands on.
#[must_use]
pub fn correction_factor_at(
    ambient: ThermodynamicTemperature,
    rooftop: Option<Length>,
    insulation: Insulation,
    edition: Edition,
    rating: TempRating,
) -> f64 {
    let effective = ambient + rooftop_adder(rooftop, insulation, edition);
    temperature_correction_factor(effective, rating)
}
