use thiserror::Error;

use crate::support::{
    constraint::ConstraintError,
    nec::{ConduitType, Insulation, Size, TradeSize},
};

use super::{BundleId, ConduitId, MemberId, VoltageSystem};

/// An argument that is out of range or not allowed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("ambient temperature {fahrenheit} °F is outside -40 °F to 185 °F")]
    AmbientOutOfRange { fahrenheit: f64 },

    #[error("invalid {name}")]
    Constraint {
        name: &'static str,
        #[source]
        source: ConstraintError,
    },

    #[error("{insulation} has no listed area at {size}, so it cannot be put in a conduit")]
    NoListedArea { size: Size, insulation: Insulation },

    #[error("the neutral of a {system} system cannot change role")]
    NeutralFixed { system: VoltageSystem },

    #[error("{conduit_type} is not made in the {trade_size} trade size")]
    TradeSizeNotOffered {
        conduit_type: ConduitType,
        trade_size: TradeSize,
    },

    #[error("no {conduit_type} trade size holds {square_inches} in² of conductors")]
    NoTradeSize {
        conduit_type: ConduitType,
        square_inches: f64,
    },
}

impl ParameterError {
    pub(crate) fn constraint(name: &'static str) -> impl FnOnce(ConstraintError) -> Self {
        move |source| ParameterError::Constraint { name, source }
    }
}

/// A containment rule was broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OwnershipError {
    /// The value is propagated from the container and must be set there.
    #[error("{what} of an attached member is set through its container")]
    Attached { what: &'static str },

    #[error("no conduit with id {0:?}")]
    UnknownConduit(ConduitId),

    #[error("no bundle with id {0:?}")]
    UnknownBundle(BundleId),

    #[error("no member with id {0:?}")]
    UnknownMember(MemberId),
}

/// Any error raised by the wiring model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WiringError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Ownership(#[from] OwnershipError),
}
