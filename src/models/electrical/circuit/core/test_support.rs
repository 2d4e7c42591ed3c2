//! Fixtures shared by the circuit tests.

use uom::si::{
    electric_current::ampere,
    f64::{ElectricCurrent, ThermodynamicTemperature},
    thermodynamic_temperature::degree_fahrenheit,
};

use crate::support::{
    load::GenericLoad,
    wiring::{Installation, VoltageSystem},
};

use super::{Circuit, Sizing};

pub(super) fn amps(value: f64) -> ElectricCurrent {
    ElectricCurrent::new::<ampere>(value)
}

pub(super) fn deg_f(value: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<degree_fahrenheit>(value)
}

pub(super) fn load(system: VoltageSystem, amperes: f64) -> GenericLoad {
    GenericLoad::new(system, amps(amperes)).unwrap()
}

/// Sizes `load` with every other setting at its default, in a fresh installation.
pub(super) fn size_default(load: GenericLoad) -> Sizing {
    let mut install = Installation::default();
    let mut circuit = Circuit::builder(load).build(&mut install).unwrap();
    circuit.calculate(&mut install).unwrap()
}
