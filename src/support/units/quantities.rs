use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N2, N3, P1, Z0},
};

/// Resistance per unit length, Ω/m in SI.
///
/// NEC Chapter 9 Table 9 lists conductor resistance and reactance in
/// ohms per 1000 feet.
pub type LinearResistance = Quantity<ISQ<P1, P1, N3, N2, Z0, Z0, Z0>, SI<f64>, f64>;
