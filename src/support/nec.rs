//! National Electrical Code tables.
//!
//! This module is a stateless lookup service over the NEC tables used for
//! conductor sizing:
//!
//! | Lookup | Source |
//! |--------|--------|
//! | [`standard_ampacity`] | Table 310.15(B)(16) |
//! | [`Insulation::insulated_area`] | Chapter 9, Table 5 |
//! | [`Size::circular_mils`] | Chapter 9, Table 8 |
//! | [`ConduitType::area`] | Chapter 9, Table 4 |
//! | [`OcpdRating`] | 240.6(A) |
//! | [`egc_size`] | Table 250.122 |
//! | [`impedance`] | Chapter 9, Table 9 |
//!
//! Section numbers follow the 2017 edition.
//! Rules that changed between editions take an explicit [`Edition`] argument
//! elsewhere in the crate; the tables here are shared by all supported editions.
//!
//! # Example
//!
//! ```
//! use twine_electrical::support::nec::{Metal, Size, TempRating, standard_ampacity};
//! use uom::si::electric_current::ampere;
//!
//! let ampacity = standard_ampacity(Size::Awg12, Metal::Copper, TempRating::T90).unwrap();
//! assert_eq!(ampacity.get::<ampere>(), 30.0);
//! assert_eq!(Size::Awg12.next_up(), Some(Size::Awg10));
//! assert_eq!(Size::Kcmil2000.next_up(), None);
//! ```

mod ampacity;
mod edition;
mod egc;
pub mod impedance;
mod insulation;
mod metal;
mod ocpd;
mod raceway;
mod size;

pub use ampacity::standard_ampacity;
pub use edition::Edition;
pub use egc::egc_size;
pub use impedance::OuterMaterial;
pub use insulation::{Insulation, TempRating};
pub use metal::Metal;
pub use ocpd::{OcpdRating, Rounding};
pub use raceway::{ConduitType, TradeSize};
pub use size::Size;
