//! Rounded imperial readings of SI quantities.
//!
//! Converting 95 °F to kelvin and back does not always return exactly 95,
//! which would drop a value into the wrong row of a table whose rows end at
//! 95 °F. Readings are rounded to nine decimal places to remove that noise.

use uom::si::{
    area::square_inch,
    f64::{Area, Length, TemperatureInterval, ThermodynamicTemperature},
    length::{foot, inch},
    temperature_interval::degree_fahrenheit as delta_fahrenheit,
    thermodynamic_temperature::degree_fahrenheit,
};

const PRECISION: f64 = 1e9;

fn rounded(value: f64) -> f64 {
    (value * PRECISION).round() / PRECISION
}

/// Reads an absolute temperature in degrees Fahrenheit.
#[must_use]
pub fn fahrenheit(temperature: ThermodynamicTemperature) -> f64 {
    rounded(temperature.get::<degree_fahrenheit>())
}

/// Reads a temperature difference in degrees Fahrenheit.
#[must_use]
pub fn delta_fahrenheit_of(interval: TemperatureInterval) -> f64 {
    rounded(interval.get::<delta_fahrenheit>())
}

/// Reads a length in inches.
#[must_use]
pub fn inches(length: Length) -> f64 {
    rounded(length.get::<inch>())
}

/// Reads a length in feet.
#[must_use]
pub fn feet(length: Length) -> f64 {
    rounded(length.get::<foot>())
}

/// Reads an area in square inches.
#[must_use]
pub fn square_inches(area: Area) -> f64 {
    rounded(area.get::<square_inch>())
}
