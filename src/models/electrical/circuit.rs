//! Branch circuit, feeder and service sizing.
//!
//! This module provides a [`twine_core::Model`] implementation that sizes a
//! single circuit on its own. The computational core is in the internal
//! `core` module; its [`Circuit`] type is re-exported for callers that size
//! several circuits sharing an [`Installation`].

pub(crate) mod core;

use std::marker::PhantomData;

use thiserror::Error;
use twine_core::Model;

use crate::support::{
    load::Load,
    nec::Edition,
    voltage_drop::{ImpedanceMethod, VoltageDropSolver},
    wiring::{AnyConduitable, Conductor, Installation},
};

pub use self::core::{
    Circuit, CircuitBuilder, CircuitConfig, CircuitError, ComplianceError, Messages, Sizing,
    Termination, Warning, WiringMode,
};

/// Everything needed to size one circuit.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitInput<L> {
    pub load: L,
    pub config: CircuitConfig,
    /// Conductor or cable the circuit is built from.
    pub template: AnyConduitable,
    /// Must be a private conduit, private bundle or free air.
    pub wiring: WiringMode,
    pub edition: Edition,
}

impl<L> CircuitInput<L> {
    /// Input with default options for `load`.
    pub fn new(load: L) -> Self {
        Self {
            load,
            config: CircuitConfig::default(),
            template: Conductor::default().into(),
            wiring: WiringMode::default(),
            edition: Edition::default(),
        }
    }
}

/// Why [`CircuitModel`] produced no sizing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SizingError {
    #[error(transparent)]
    Circuit(#[from] CircuitError),

    #[error("a standalone circuit cannot use a shared conduit or bundle")]
    SharedWiring,

    /// The circuit could not be sized to code.
    #[error("circuit is not compliant (codes {:?})", .messages.codes())]
    NotCompliant { messages: Messages },
}

/// Sizes a circuit in an installation of its own.
///
/// Each call builds a fresh [`Installation`], so the circuit is only derated
/// for its own conductors.
#[derive(Debug, Clone, Copy)]
pub struct CircuitModel<L, S = ImpedanceMethod> {
    solver: S,
    _load: PhantomData<L>,
}

impl<L> Default for CircuitModel<L> {
    fn default() -> Self {
        Self::new(ImpedanceMethod)
    }
}

impl<L, S> CircuitModel<L, S> {
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            _load: PhantomData,
        }
    }
}

impl<L, S> Model for CircuitModel<L, S>
where
    L: Load + Clone,
    S: VoltageDropSolver + Clone,
{
    type Input = CircuitInput<L>;
    type Output = Sizing;
    type Error = SizingError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        if matches!(
            input.wiring,
            WiringMode::SharedConduit(_) | WiringMode::SharedBundle(_)
        ) {
            return Err(SizingError::SharedWiring);
        }

        let mut install = Installation::new(input.edition);
        let mut circuit = Circuit::builder(input.load.clone())
            .solver(self.solver.clone())
            .config(input.config)
            .template(&input.template)
            .wiring(input.wiring)
            .build(&mut install)?;

        let sizing = circuit.calculate(&mut install)?;
        if sizing.is_valid() {
            Ok(sizing)
        } else {
            Err(SizingError::NotCompliant {
                messages: sizing.messages,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{electric_current::ampere, f64::ElectricCurrent};

    use crate::support::{
        load::GenericLoad,
        nec::{OcpdRating, Size},
        wiring::{Conduit, VoltageSystem},
    };

    fn input(system: VoltageSystem, amperes: f64) -> CircuitInput<GenericLoad> {
        let load = GenericLoad::new(system, ElectricCurrent::new::<ampere>(amperes)).unwrap();
        CircuitInput::new(load)
    }

    #[test]
    fn sizes_a_standalone_circuit() {
        let model = CircuitModel::default();
        let sizing = model.call(&input(VoltageSystem::OnePhase120, 100.0)).unwrap();

        assert_eq!(sizing.phase, Some(Size::Awg1));
        assert_eq!(sizing.ocpd, OcpdRating::new(110));
        assert_eq!(sizing.ground, Some(Size::Awg6));
    }

    #[test]
    fn calls_are_independent() {
        let model = CircuitModel::default();
        let input = input(VoltageSystem::OnePhase120, 10.0);

        let first = model.call(&input).unwrap();
        let second = model.call(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn non_compliant_circuits_are_errors() {
        let model = CircuitModel::default();
        let mut input = input(VoltageSystem::OnePhase120, 100.0);
        input.config.sets = 2;

        let Err(SizingError::NotCompliant { messages }) = model.call(&input) else {
            panic!("expected a compliance error");
        };
        assert_eq!(messages.codes(), vec![-1]);
    }

    #[test]
    fn shared_wiring_is_rejected() {
        let model = CircuitModel::default();
        let mut elsewhere = Installation::default();
        let mut input = input(VoltageSystem::OnePhase120, 10.0);
        input.wiring = WiringMode::SharedConduit(elsewhere.add_conduit(Conduit::default()));

        assert_eq!(model.call(&input), Err(SizingError::SharedWiring));
    }
}
