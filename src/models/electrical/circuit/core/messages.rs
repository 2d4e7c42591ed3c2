use std::fmt;

use thiserror::Error;

use crate::support::{
    nec::{OcpdRating, Size},
    wiring::ParameterError,
};

/// A code requirement the circuit could not meet.
///
/// Each variant has a stable negative [`code`](ComplianceError::code).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComplianceError {
    /// Conductors in parallel must be 1/0 AWG or larger, 310.10(H).
    #[error("parallel conductors must be 1/0 AWG or larger, not {size}")]
    ParallelTooSmall { size: Size },

    /// The ambient temperature is above what the insulation or the
    /// terminations are rated for.
    #[error("the ambient temperature exceeds the conductor rating")]
    AmbientExceedsRating,

    #[error("no conductor size carries {amperes} A")]
    NoSizeForAmpacity { amperes: f64 },

    #[error("no conductor size keeps the voltage drop within the limit")]
    NoSizeForVoltageDrop,

    #[error("no standard OCPD rating fits {amperes} A")]
    NoStandardOcpd { amperes: f64 },

    #[error("no trade size holds the conductors")]
    NoTradeSize(#[source] ParameterError),

    #[error("no equipment grounding conductor is listed for {rating}")]
    NoEgcSize { rating: OcpdRating },

    /// The OCPD had to be raised, but no conductor supports the new rating.
    #[error("no conductor size supports a {rating} OCPD")]
    NoLargerSize { rating: OcpdRating },
}

impl ComplianceError {
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            ComplianceError::ParallelTooSmall { .. } => -1,
            ComplianceError::AmbientExceedsRating => -2,
            ComplianceError::NoSizeForAmpacity { .. } => -3,
            ComplianceError::NoSizeForVoltageDrop => -4,
            ComplianceError::NoStandardOcpd { .. } => -5,
            ComplianceError::NoTradeSize(_) => -6,
            ComplianceError::NoEgcSize { .. } => -7,
            ComplianceError::NoLargerSize { .. } => -8,
        }
    }
}

/// An installation the code allows but that deserves a second look.
///
/// Each variant has a stable positive [`code`](Warning::code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Warning {
    CableInConduit,
    InsulatedConductorsInFreeAir,
    InsulatedConductorsInBundle,
}

impl Warning {
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Warning::CableInConduit => 1,
            Warning::InsulatedConductorsInFreeAir => 2,
            Warning::InsulatedConductorsInBundle => 3,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Warning::CableInConduit => "cable installed in a conduit",
            Warning::InsulatedConductorsInFreeAir => "single insulated conductors in free air",
            Warning::InsulatedConductorsInBundle => "single insulated conductors bundled",
        })
    }
}

/// Errors and warnings collected by one sizing pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Messages {
    errors: Vec<ComplianceError>,
    warnings: Vec<Warning>,
}

impl Messages {
    pub(super) fn error(&mut self, error: ComplianceError) {
        tracing::warn!(code = error.code(), %error, "compliance error");
        self.errors.push(error);
    }

    pub(super) fn warning(&mut self, warning: Warning) {
        tracing::debug!(code = warning.code(), %warning, "sizing warning");
        self.warnings.push(warning);
    }

    #[must_use]
    pub fn errors(&self) -> &[ComplianceError] {
        &self.errors
    }

    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Codes of every message, errors first.
    #[must_use]
    pub fn codes(&self) -> Vec<i32> {
        self.errors
            .iter()
            .map(ComplianceError::code)
            .chain(self.warnings.iter().map(|w| w.code()))
            .collect()
    }
}
