use thiserror::Error;

use crate::support::wiring::{OwnershipError, ParameterError, VoltageSystem, WiringError};

/// A circuit could not be set up or changed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CircuitError {
    #[error(transparent)]
    Wiring(#[from] WiringError),

    #[error("a circuit needs at least one set of conductors")]
    NoSets,

    #[error("{sets} parallel sets cannot share one conduit with other circuits")]
    SetsInSharedConduit { sets: usize },

    #[error("{sets} sets cannot be split evenly across {conduits} conduits")]
    UnevenConduits { sets: usize, conduits: usize },

    #[error("the conduit count can only be set for private conduits")]
    NotPrivateConduit,

    #[error("the cable is built for {cable}, but the load is on {load}")]
    SystemMismatch {
        cable: VoltageSystem,
        load: VoltageSystem,
    },
}

impl From<ParameterError> for CircuitError {
    fn from(error: ParameterError) -> Self {
        CircuitError::Wiring(error.into())
    }
}

impl From<OwnershipError> for CircuitError {
    fn from(error: OwnershipError) -> Self {
        CircuitError::Wiring(error.into())
    }
}
