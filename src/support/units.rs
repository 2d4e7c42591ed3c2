//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical quantities at its API boundary
//! (temperatures, lengths, currents, voltages, areas).
//! The NEC tables are published in imperial units with row edges at whole
//! degrees Fahrenheit and whole inches, so this module provides rounded
//! imperial readings that keep table lookups stable under the SI round trip:
//!
//! ```
//! use twine_electrical::support::units::fahrenheit;
//! use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::degree_fahrenheit};
//!
//! let ambient = ThermodynamicTemperature::new::<degree_fahrenheit>(95.0);
//! assert_eq!(fahrenheit(ambient), 95.0);
//! ```

mod imperial;
mod quantities;

pub use imperial::{delta_fahrenheit_of, fahrenheit, feet, inches, square_inches};
pub use quantities::LinearResistance;
