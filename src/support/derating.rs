//! Ampacity derating factors.
//!
//! The allowable ampacity of a conductor is its Table 310.15(B)(16) value
//! multiplied by two factors:
//!
//! - a **correction** factor for ambient temperatures other than 30 °C
//!   (86 °F), including the rooftop adder of 310.15(B)(3)(c), and
//! - an **adjustment** factor for more than three current-carrying conductors
//!   sharing a raceway or bundled together, 310.15(B)(3)(a).
//!
//! Their product is the compound factor.
//! All functions here are pure: container context enters through [`Housing`],
//! and the NEC edition is always an explicit argument.
//!
//! ```
//! use twine_electrical::support::{
//!     derating::{Housing, adjustment_factor, temperature_correction_factor},
//!     nec::TempRating,
//! };
//! use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::degree_fahrenheit};
//!
//! let ambient = ThermodynamicTemperature::new::<degree_fahrenheit>(100.0);
//! let correction = temperature_correction_factor(ambient, TempRating::T90);
//!
//! let housing = Housing::Conduit { current_carrying: 4, nipple: false };
//! let adjustment = adjustment_factor(&housing, 1, false);
//!
//! assert_eq!(correction * adjustment, 0.91 * 0.8);
//! ```

mod adjustment;
mod correction;

pub use adjustment::{
    BUNDLING_THRESHOLD_INCHES, BundledCable, CableException, Housing, adjustment_factor,
    cable_exception, count_adjustment_factor,
};
pub use correction::{
    correction_factor, correction_factor_at, rooftop_adder, temperature_correction_factor,
};
