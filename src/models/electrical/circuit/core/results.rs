//! Results of a sizing pass.

use uom::si::f64::{ElectricCurrent, ElectricPotential};

use crate::support::nec::{OcpdRating, Size, TradeSize};

use super::Messages;

/// Snapshot of a circuit after sizing.
///
/// Fields are `None` when sizing stopped before reaching them; the reason is
/// in [`messages`](Sizing::messages).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sizing {
    /// Phase conductor size, per set.
    pub phase: Option<Size>,

    /// Neutral size, `None` when the system has no neutral.
    pub neutral: Option<Size>,

    /// Equipment grounding conductor size.
    pub ground: Option<Size>,

    /// Smallest phase size that carries the design current.
    pub size_per_ampacity: Option<Size>,

    /// Smallest phase size that keeps the voltage drop within the limit.
    pub size_per_voltage_drop: Option<Size>,

    pub ocpd: Option<OcpdRating>,

    /// Ampacity of all sets together, limited by the terminations.
    pub ampacity: Option<ElectricCurrent>,

    /// Voltage drop at the final phase size.
    pub voltage_drop: Option<ElectricPotential>,

    /// Trade size of the circuit's conduit, when it runs in one.
    pub trade_size: Option<TradeSize>,

    pub messages: Messages,
}

impl Sizing {
    /// Whether the circuit was fully sized without compliance errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.messages.has_errors()
            && self.phase.is_some()
            && self.ground.is_some()
            && self.ocpd.is_some()
    }
}
