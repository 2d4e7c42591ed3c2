//! Supporting utilities used by models.
//!
//! Everything in this module is public because it is useful on its own,
//! but the APIs are not yet stable.

pub mod constraint;
pub mod derating;
pub mod load;
pub mod nec;
pub mod units;
pub mod voltage_drop;
pub mod wiring;
